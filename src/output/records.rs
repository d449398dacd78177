//
//  chatbridge
//  output/records.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Table rendering for the API models.

use super::{format_bool, format_status, or_dash, print_field, print_header, truncate};
use super::{TableOutput, TableRow};
use crate::api::resources::{
    Audience, Campaign, Contact, QrCode, SendResult, Template, WhatsAppInstance,
};

fn text(value: &Option<String>) -> String {
    or_dash(value.as_deref())
}

fn status(value: &Option<String>, color: bool) -> String {
    value
        .as_deref()
        .map(|s| format_status(s, color))
        .unwrap_or_else(|| "-".to_string())
}

fn flag(value: Option<bool>, color: bool) -> String {
    value
        .map(|v| format_bool(v, color))
        .unwrap_or_else(|| "-".to_string())
}

impl TableRow for Contact {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Phone", "Email"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            or_dash(self.id),
            truncate(&text(&self.name), 40),
            text(&self.phone),
            text(&self.email),
        ]
    }
}

impl TableOutput for Contact {
    fn print_table(&self, color: bool) {
        print_header(&format!("Contact #{}", or_dash(self.id)));
        print_field("Name", &text(&self.name), color);
        print_field("Phone", &text(&self.phone), color);
        print_field("Email", &text(&self.email), color);
        if let Some(custom) = &self.custom_fields {
            for (key, value) in custom {
                print_field(key, &super::display_value(value), color);
            }
        }
        print_field("Created", &text(&self.created_at), color);
    }
}

impl TableRow for Audience {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Tag", "Contacts", "Description"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            or_dash(self.id),
            text(&self.name),
            text(&self.tag),
            or_dash(self.contacts_count),
            truncate(&text(&self.description), 50),
        ]
    }
}

impl TableOutput for Audience {
    fn print_table(&self, color: bool) {
        print_header(&format!("Audience #{}", or_dash(self.id)));
        print_field("Name", &text(&self.name), color);
        print_field("Tag", &text(&self.tag), color);
        print_field("Contacts", &or_dash(self.contacts_count), color);
        print_field("Description", &text(&self.description), color);
    }
}

impl TableRow for Template {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Type", "Active", "Content"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            or_dash(self.id),
            text(&self.name),
            text(&self.kind),
            flag(self.is_active, color),
            truncate(&text(&self.content).replace('\n', " "), 50),
        ]
    }
}

impl TableOutput for Template {
    fn print_table(&self, color: bool) {
        print_header(&format!("Template #{}", or_dash(self.id)));
        print_field("Name", &text(&self.name), color);
        print_field("Type", &text(&self.kind), color);
        print_field("Active", &flag(self.is_active, color), color);
        println!();
        println!("{}", text(&self.content));
    }
}

impl TableRow for Campaign {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Status", "Scheduled", "Audience", "Template"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let audience = self
            .audience
            .as_ref()
            .and_then(|a| a.name.clone())
            .or_else(|| self.audience_id.map(|id| format!("#{}", id)));
        let template = self
            .template
            .as_ref()
            .and_then(|t| t.name.clone())
            .or_else(|| self.template_id.map(|id| format!("#{}", id)));

        vec![
            or_dash(self.id),
            text(&self.name),
            status(&self.status, color),
            text(&self.scheduled_at),
            text(&audience),
            text(&template),
        ]
    }
}

impl TableOutput for Campaign {
    fn print_table(&self, color: bool) {
        print_header(&format!("Campaign #{}", or_dash(self.id)));
        print_field("Name", &text(&self.name), color);
        print_field("Status", &status(&self.status, color), color);
        print_field("Scheduled", &text(&self.scheduled_at), color);
        print_field("Instance", &text(&self.whatsapp_instance_id), color);
        print_field("Audience", &or_dash(self.audience_id), color);
        print_field("Template", &or_dash(self.template_id), color);
    }
}

impl TableRow for WhatsAppInstance {
    fn headers() -> Vec<&'static str> {
        vec!["UUID", "Status", "Number", "Autoresponse"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.instance_uuid.clone(),
            status(&self.status, color),
            text(&self.logged_number),
            flag(self.activate_autoresponse, color),
        ]
    }
}

impl TableOutput for WhatsAppInstance {
    fn print_table(&self, color: bool) {
        print_header(&format!("Instance {}", self.instance_uuid));
        print_field("Status", &status(&self.status, color), color);
        print_field("Number", &text(&self.logged_number), color);
        print_field("Autoresponse", &flag(self.activate_autoresponse, color), color);
    }
}

impl TableOutput for QrCode {
    fn print_table(&self, color: bool) {
        print_field("QR code", &text(&self.qr_url), color);
    }
}

impl TableOutput for SendResult {
    fn print_table(&self, color: bool) {
        print_field("Quota remaining", &or_dash(self.message_quota_remaining), color);
        print_field("Storage used", &or_dash(self.storage_used), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_row_prefers_names() {
        let campaign = Campaign {
            id: Some(7),
            name: Some("Launch".into()),
            status: Some("scheduled".into()),
            audience_id: Some(3),
            template: Some(Template {
                name: Some("Welcome".into()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let row = campaign.row(false);
        assert_eq!(row.len(), Campaign::headers().len());
        assert_eq!(row[0], "7");
        assert_eq!(row[2], "scheduled");
        assert_eq!(row[3], "-");
        assert_eq!(row[4], "#3");
        assert_eq!(row[5], "Welcome");
    }

    #[test]
    fn test_instance_row() {
        let instance = WhatsAppInstance {
            instance_uuid: "9b2c".into(),
            status: Some("ready".into()),
            logged_number: None,
            activate_autoresponse: Some(false),
        };
        assert_eq!(instance.row(false), vec!["9b2c", "ready", "-", "No"]);
    }
}
