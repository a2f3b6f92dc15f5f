//! Cloudflare API wire types.

use serde::{Deserialize, Serialize};

/// Standard Cloudflare response envelope.
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    pub errors: Option<Vec<CloudflareError>>,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareError {
    pub code: i32,
    pub message: String,
}

/// Cloudflare zone object.
#[derive(Debug, Deserialize)]
pub struct CloudflareZone {
    pub id: String,
    pub name: String,
    pub status: String,
}

/// Cloudflare DNS record object.
#[derive(Debug, Deserialize)]
pub struct CloudflareDnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub priority: Option<u16>,
    pub proxied: Option<bool>,
}

/// Body for zone creation.
#[derive(Debug, Serialize)]
pub struct CreateZoneBody {
    pub name: String,
    #[serde(rename = "type")]
    pub zone_type: &'static str,
}

/// Body for DNS record creation/update.
#[derive(Debug, Serialize)]
pub struct RecordBody {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

/// Email routing rule matcher.
#[derive(Debug, Serialize, Deserialize)]
pub struct CloudflareRuleMatcher {
    #[serde(rename = "type")]
    pub matcher_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Email routing rule action.
#[derive(Debug, Serialize, Deserialize)]
pub struct CloudflareRuleAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub value: Vec<String>,
}

/// Email routing rule object (also used as the create body).
#[derive(Debug, Serialize, Deserialize)]
pub struct CloudflareRoutingRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub enabled: bool,
    pub matchers: Vec<CloudflareRuleMatcher>,
    pub actions: Vec<CloudflareRuleAction>,
}
