//! Cloudflare `DnsProvider` trait implementation.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;
use crate::providers::common::parse_record_type;
use crate::traits::{DnsProvider, ErrorContext, ProviderErrorMapper};
use crate::types::{DnsRecord, RecordSpec, RoutingRule, RoutingRuleSpec, Zone, ZoneStatus};

use super::types::{
    CloudflareRuleAction, CloudflareRuleMatcher, CreateZoneBody, RecordBody,
};
use super::{
    CloudflareDnsRecord, CloudflareProvider, CloudflareRoutingRule, CloudflareZone,
    MAX_PAGE_SIZE_RECORDS, MAX_PAGE_SIZE_ZONES,
};

impl CloudflareProvider {
    /// Map a Cloudflare zone to the unified type.
    /// Cloudflare statuses: active, pending, initializing, moved.
    pub(crate) fn zone_to_unified(zone: CloudflareZone) -> Zone {
        let status = match zone.status.as_str() {
            "active" => ZoneStatus::Active,
            "pending" | "initializing" => ZoneStatus::Pending,
            "moved" => ZoneStatus::Paused,
            _ => ZoneStatus::Unknown,
        };

        Zone {
            id: zone.id,
            name: zone.name,
            status,
        }
    }

    /// Map a Cloudflare DNS record to the unified type.
    pub(crate) fn record_to_unified(
        &self,
        cf_record: CloudflareDnsRecord,
        zone_id: &str,
    ) -> Result<DnsRecord> {
        let record_type = parse_record_type(&cf_record.record_type, self.provider_name())?;

        Ok(DnsRecord {
            id: cf_record.id,
            zone_id: zone_id.to_string(),
            record_type,
            name: cf_record.name,
            content: cf_record.content,
            ttl: cf_record.ttl,
            priority: cf_record.priority,
            proxied: cf_record.proxied,
        })
    }

    /// Map a Cloudflare routing rule to the unified type.
    ///
    /// A rule matching `all` is the catch-all (`address == None`); otherwise
    /// the matched literal `to` value is the address.
    fn rule_to_unified(rule: CloudflareRoutingRule) -> RoutingRule {
        let address = rule
            .matchers
            .iter()
            .find(|m| m.matcher_type == "literal" && m.field.as_deref() == Some("to"))
            .and_then(|m| m.value.clone());
        let forward_to = rule
            .actions
            .iter()
            .find(|a| a.action_type == "forward")
            .and_then(|a| a.value.first().cloned())
            .unwrap_or_default();

        RoutingRule {
            id: rule.id.unwrap_or_else(|| "catch_all".to_string()),
            address,
            forward_to,
            enabled: rule.enabled,
        }
    }

    fn rule_body(spec: &RoutingRuleSpec) -> CloudflareRoutingRule {
        let matchers = match &spec.address {
            Some(address) => vec![CloudflareRuleMatcher {
                matcher_type: "literal".to_string(),
                field: Some("to".to_string()),
                value: Some(address.clone()),
            }],
            None => vec![CloudflareRuleMatcher {
                matcher_type: "all".to_string(),
                field: None,
                value: None,
            }],
        };

        CloudflareRoutingRule {
            id: None,
            name: spec.address.clone(),
            enabled: true,
            matchers,
            actions: vec![CloudflareRuleAction {
                action_type: "forward".to_string(),
                value: vec![spec.forward_to.clone()],
            }],
        }
    }

    fn record_body(spec: &RecordSpec) -> RecordBody {
        RecordBody {
            record_type: spec.record_type.as_str().to_string(),
            name: spec.name.clone(),
            content: spec.content.clone(),
            ttl: spec.ttl,
            priority: spec.priority,
        }
    }

    fn zone_context(zone_id: &str) -> ErrorContext {
        ErrorContext {
            domain: Some(zone_id.to_string()),
            ..ErrorContext::default()
        }
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    fn id(&self) -> &'static str {
        "cloudflare"
    }

    async fn verify_credentials(&self) -> Result<bool> {
        #[derive(Deserialize)]
        struct VerifyResponse {
            status: String,
        }

        match self
            .get::<VerifyResponse>("/user/tokens/verify", ErrorContext::default())
            .await
        {
            Ok(resp) => Ok(resp.status == "active"),
            Err(_) => Ok(false),
        }
    }

    async fn list_zones(&self) -> Result<Vec<Zone>> {
        let zones: Vec<CloudflareZone> = self
            .get(
                &format!("/zones?per_page={MAX_PAGE_SIZE_ZONES}"),
                ErrorContext::default(),
            )
            .await?;
        Ok(zones.into_iter().map(Self::zone_to_unified).collect())
    }

    async fn get_zone(&self, zone_id: &str) -> Result<Zone> {
        let zone: CloudflareZone = self
            .get(&format!("/zones/{zone_id}"), Self::zone_context(zone_id))
            .await?;
        Ok(Self::zone_to_unified(zone))
    }

    async fn create_zone(&self, domain_name: &str) -> Result<Zone> {
        let body = CreateZoneBody {
            name: domain_name.to_string(),
            zone_type: "full",
        };
        let context = ErrorContext {
            domain: Some(domain_name.to_string()),
            ..ErrorContext::default()
        };
        let zone: CloudflareZone = self.post("/zones", &body, context).await?;
        Ok(Self::zone_to_unified(zone))
    }

    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        let cf_records: Vec<CloudflareDnsRecord> = self
            .get(
                &format!("/zones/{zone_id}/dns_records?per_page={MAX_PAGE_SIZE_RECORDS}"),
                Self::zone_context(zone_id),
            )
            .await?;

        cf_records
            .into_iter()
            .map(|r| self.record_to_unified(r, zone_id))
            .collect()
    }

    async fn create_record(&self, zone_id: &str, spec: &RecordSpec) -> Result<DnsRecord> {
        let context = ErrorContext {
            record_name: Some(spec.name.clone()),
            domain: Some(zone_id.to_string()),
            ..ErrorContext::default()
        };
        let cf_record: CloudflareDnsRecord = self
            .post(
                &format!("/zones/{zone_id}/dns_records"),
                &Self::record_body(spec),
                context,
            )
            .await?;
        self.record_to_unified(cf_record, zone_id)
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        spec: &RecordSpec,
    ) -> Result<DnsRecord> {
        let context = ErrorContext {
            record_name: Some(spec.name.clone()),
            record_id: Some(record_id.to_string()),
            domain: Some(zone_id.to_string()),
        };
        let cf_record: CloudflareDnsRecord = self
            .patch(
                &format!("/zones/{zone_id}/dns_records/{record_id}"),
                &Self::record_body(spec),
                context,
            )
            .await?;
        self.record_to_unified(cf_record, zone_id)
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        let context = ErrorContext {
            record_id: Some(record_id.to_string()),
            domain: Some(zone_id.to_string()),
            ..ErrorContext::default()
        };
        self.delete(
            &format!("/zones/{zone_id}/dns_records/{record_id}"),
            context,
        )
        .await
    }

    async fn enable_email_routing(&self, zone_id: &str) -> Result<()> {
        self.post_empty(
            &format!("/zones/{zone_id}/email/routing/enable"),
            Self::zone_context(zone_id),
        )
        .await
    }

    async fn list_routing_rules(&self, zone_id: &str) -> Result<Vec<RoutingRule>> {
        let rules: Vec<CloudflareRoutingRule> = self
            .get(
                &format!("/zones/{zone_id}/email/routing/rules"),
                Self::zone_context(zone_id),
            )
            .await?;
        Ok(rules.into_iter().map(Self::rule_to_unified).collect())
    }

    async fn create_routing_rule(
        &self,
        zone_id: &str,
        spec: &RoutingRuleSpec,
    ) -> Result<RoutingRule> {
        let body = Self::rule_body(spec);

        // The catch-all rule lives at a dedicated endpoint
        let rule: CloudflareRoutingRule = if spec.address.is_none() {
            self.put(
                &format!("/zones/{zone_id}/email/routing/rules/catch_all"),
                &body,
                Self::zone_context(zone_id),
            )
            .await?
        } else {
            self.post(
                &format!("/zones/{zone_id}/email/routing/rules"),
                &body,
                Self::zone_context(zone_id),
            )
            .await?
        };

        Ok(Self::rule_to_unified(rule))
    }
}
