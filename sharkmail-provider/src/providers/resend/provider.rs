//! Resend `MailProvider` trait implementation.

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::{normalize_domain_name, parse_record_type};
use crate::traits::{ErrorContext, MailProvider, ProviderErrorMapper};
use crate::types::{OutboundEmail, RecordSpec, SendingDomain, SendingDomainStatus, SentEmail};

use super::types::{CreateDomainBody, SendEmailBody, SendEmailResponse};
use super::{ResendDomain, ResendDomainList, ResendProvider};

impl ResendProvider {
    /// Map a Resend domain to the unified type.
    ///
    /// Resend statuses: not_started, pending, verified, failure,
    /// temporary_failure.
    fn domain_to_unified(&self, domain: ResendDomain) -> SendingDomain {
        let status = match domain.status.as_str() {
            "verified" => SendingDomainStatus::Verified,
            "pending" | "not_started" => SendingDomainStatus::Pending,
            "failure" | "temporary_failure" => SendingDomainStatus::Failed,
            _ => SendingDomainStatus::Unknown,
        };

        // Records with types we do not manage are dropped rather than failing
        // the whole lookup
        let required_records = domain
            .records
            .iter()
            .filter_map(|r| {
                let record_type = parse_record_type(&r.record_type, self.provider_name()).ok()?;
                Some(RecordSpec {
                    record_type,
                    name: r.name.clone(),
                    content: r.value.clone(),
                    ttl: r.ttl_seconds(),
                    priority: r.priority,
                })
            })
            .collect();

        SendingDomain {
            id: domain.id,
            name: domain.name,
            status,
            required_records,
        }
    }

    fn domain_context(domain: &str) -> ErrorContext {
        ErrorContext {
            domain: Some(domain.to_string()),
            ..ErrorContext::default()
        }
    }
}

#[async_trait]
impl MailProvider for ResendProvider {
    fn id(&self) -> &'static str {
        "resend"
    }

    async fn register_domain(&self, domain_name: &str) -> Result<SendingDomain> {
        let body = CreateDomainBody {
            name: domain_name.to_string(),
        };

        match self
            .post::<ResendDomain, _>("/domains", &body, Self::domain_context(domain_name))
            .await
        {
            Ok(domain) => Ok(self.domain_to_unified(domain)),
            // Already registered: resolve to the existing registration so the
            // caller's retry converges instead of failing
            Err(ProviderError::RecordExists { .. }) => self
                .find_domain(domain_name)
                .await?
                .ok_or_else(|| ProviderError::DomainNotFound {
                    provider: self.id().to_string(),
                    domain: domain_name.to_string(),
                    raw_message: Some("registered but not listed".to_string()),
                }),
            Err(e) => Err(e),
        }
    }

    async fn find_domain(&self, domain_name: &str) -> Result<Option<SendingDomain>> {
        let list: ResendDomainList = self.get("/domains", ErrorContext::default()).await?;
        let want = normalize_domain_name(domain_name);

        let Some(found) = list
            .data
            .into_iter()
            .find(|d| normalize_domain_name(&d.name) == want)
        else {
            return Ok(None);
        };

        // The list endpoint omits the DNS record details; re-fetch by id
        let domain: ResendDomain = self
            .get(
                &format!("/domains/{}", found.id),
                Self::domain_context(domain_name),
            )
            .await?;
        Ok(Some(self.domain_to_unified(domain)))
    }

    async fn request_verification(&self, domain_id: &str) -> Result<()> {
        self.post_empty(
            &format!("/domains/{domain_id}/verify"),
            Self::domain_context(domain_id),
        )
        .await
    }

    async fn send(&self, email: &OutboundEmail) -> Result<SentEmail> {
        let body = SendEmailBody {
            from: email.from.clone(),
            to: vec![email.to.clone()],
            subject: email.subject.clone(),
            text: email.text.clone(),
        };

        let resp: SendEmailResponse = self
            .post("/emails", &body, ErrorContext::default())
            .await?;
        Ok(SentEmail { id: resp.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::resend::types::ResendDomainRecord;

    fn provider() -> ResendProvider {
        ResendProvider::new(String::new())
    }

    fn domain(status: &str) -> ResendDomain {
        ResendDomain {
            id: "d1".to_string(),
            name: "example.com".to_string(),
            status: status.to_string(),
            records: vec![],
        }
    }

    #[test]
    fn status_mapping() {
        let p = provider();
        assert_eq!(
            p.domain_to_unified(domain("verified")).status,
            SendingDomainStatus::Verified
        );
        assert_eq!(
            p.domain_to_unified(domain("not_started")).status,
            SendingDomainStatus::Pending
        );
        assert_eq!(
            p.domain_to_unified(domain("pending")).status,
            SendingDomainStatus::Pending
        );
        assert_eq!(
            p.domain_to_unified(domain("temporary_failure")).status,
            SendingDomainStatus::Failed
        );
        assert_eq!(
            p.domain_to_unified(domain("???")).status,
            SendingDomainStatus::Unknown
        );
    }

    #[test]
    fn records_map_to_specs() {
        let p = provider();
        let mut d = domain("pending");
        d.records = vec![
            ResendDomainRecord {
                record_type: "TXT".to_string(),
                name: "send.example.com".to_string(),
                value: "v=spf1 include:amazonses.com ~all".to_string(),
                ttl: None,
                priority: None,
            },
            ResendDomainRecord {
                record_type: "MX".to_string(),
                name: "send.example.com".to_string(),
                value: "feedback-smtp.us-east-1.amazonses.com".to_string(),
                ttl: Some(serde_json::json!(600)),
                priority: Some(10),
            },
        ];

        let unified = p.domain_to_unified(d);
        assert_eq!(unified.required_records.len(), 2);
        assert_eq!(unified.required_records[1].priority, Some(10));
        assert_eq!(unified.required_records[1].ttl, 600);
    }

    #[test]
    fn unknown_record_types_are_dropped() {
        let p = provider();
        let mut d = domain("pending");
        d.records = vec![ResendDomainRecord {
            record_type: "NAPTR".to_string(),
            name: "x".to_string(),
            value: "y".to_string(),
            ttl: None,
            priority: None,
        }];

        assert!(p.domain_to_unified(d).required_records.is_empty());
    }
}
