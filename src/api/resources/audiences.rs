//
//  chatbridge
//  api/resources/audiences.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Audiences API types.
//!
//! An audience is a named, tagged group of contacts that campaigns are sent
//! to. Contacts can be supplied inline on creation as `{phone, name}` pairs.

use serde::{Deserialize, Serialize};

use super::{flexible_id, Endpoint, Resource};

/// Endpoint marker for `/audiences`.
pub struct Audiences;

impl Endpoint for Audiences {
    const PATH: &'static str = "audiences";
    type Model = Audience;
}

/// Wrapper over `/audiences`.
pub type AudienceResource<'a> = Resource<'a, Audiences>;

/// A group of contacts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Audience {
    #[serde(default, deserialize_with = "flexible_id")]
    pub id: Option<u64>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub tag: Option<String>,

    /// Number of contacts in the audience.
    #[serde(default, deserialize_with = "flexible_id")]
    pub contacts_count: Option<u64>,
}
