//
//  chatbridge
//  api/resources/campaigns.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Campaigns API types.
//!
//! A campaign sends one template to every contact of an audience through a
//! WhatsApp instance, either immediately or at `scheduled_at`
//! (`YYYY-MM-DD HH:MM:SS`, server time).

use serde::{Deserialize, Serialize};

use super::{flexible_id, flexible_string, Audience, Endpoint, Resource, Template};

/// Endpoint marker for `/campaigns`.
pub struct Campaigns;

impl Endpoint for Campaigns {
    const PATH: &'static str = "campaigns";
    type Model = Campaign;
}

/// Wrapper over `/campaigns`.
pub type CampaignResource<'a> = Resource<'a, Campaigns>;

/// A scheduled or running campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(default, deserialize_with = "flexible_id")]
    pub id: Option<u64>,

    #[serde(default)]
    pub name: Option<String>,

    /// Lifecycle state, e.g. `scheduled`, `running`, `completed`.
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub scheduled_at: Option<String>,

    #[serde(default, deserialize_with = "flexible_id")]
    pub audience_id: Option<u64>,

    #[serde(default, deserialize_with = "flexible_id")]
    pub template_id: Option<u64>,

    #[serde(default, deserialize_with = "flexible_string")]
    pub whatsapp_instance_id: Option<String>,

    /// Embedded audience, present on detail responses.
    #[serde(default)]
    pub audience: Option<Audience>,

    /// Embedded template, present on detail responses.
    #[serde(default)]
    pub template: Option<Template>,
}
