//! Resend API wire types.

use serde::{Deserialize, Serialize};

use crate::types::DEFAULT_RECORD_TTL;

/// Error body returned on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ResendErrorBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Domain object.
#[derive(Debug, Deserialize)]
pub struct ResendDomain {
    pub id: String,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub records: Vec<ResendDomainRecord>,
}

/// DNS record Resend requires for domain verification.
///
/// `ttl` arrives as either a number or the string `"Auto"`.
#[derive(Debug, Deserialize)]
pub struct ResendDomainRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub ttl: Option<serde_json::Value>,
    #[serde(default)]
    pub priority: Option<u16>,
}

impl ResendDomainRecord {
    /// TTL in seconds, defaulting when the API answers `"Auto"`.
    pub fn ttl_seconds(&self) -> u32 {
        self.ttl
            .as_ref()
            .and_then(serde_json::Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(DEFAULT_RECORD_TTL)
    }
}

/// `GET /domains` response wrapper.
#[derive(Debug, Deserialize)]
pub struct ResendDomainList {
    pub data: Vec<ResendDomain>,
}

/// Body for domain registration.
#[derive(Debug, Serialize)]
pub struct CreateDomainBody {
    pub name: String,
}

/// Body for `POST /emails`.
#[derive(Debug, Serialize)]
pub struct SendEmailBody {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
}

/// `POST /emails` response.
#[derive(Debug, Deserialize)]
pub struct SendEmailResponse {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_numeric() {
        let record: ResendDomainRecord = serde_json::from_str(
            r#"{"type":"MX","name":"send.example.com","value":"feedback-smtp.us-east-1.amazonses.com","ttl":600,"priority":10}"#,
        )
        .unwrap();
        assert_eq!(record.ttl_seconds(), 600);
        assert_eq!(record.priority, Some(10));
    }

    #[test]
    fn ttl_auto_falls_back() {
        let record: ResendDomainRecord = serde_json::from_str(
            r#"{"type":"TXT","name":"send.example.com","value":"v=spf1 include:amazonses.com ~all","ttl":"Auto"}"#,
        )
        .unwrap();
        assert_eq!(record.ttl_seconds(), DEFAULT_RECORD_TTL);
    }

    #[test]
    fn domain_without_records_parses() {
        let domain: ResendDomain =
            serde_json::from_str(r#"{"id":"d1","name":"example.com","status":"pending"}"#).unwrap();
        assert!(domain.records.is_empty());
    }
}
