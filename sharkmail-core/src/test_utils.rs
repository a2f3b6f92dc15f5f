//! Test helpers
//!
//! Mock implementations of the repositories and providers, plus factory
//! functions used across the service tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use sharkmail_provider::{
    DnsProvider, DnsRecord, MailProvider, OutboundEmail, ProviderError, RecordSpec, RoutingRule,
    RoutingRuleSpec, SendingDomain, SendingDomainStatus, SentEmail, Zone, ZoneStatus,
};

use crate::error::CoreResult;
use crate::services::{
    DnsSetupService, DomainService, ServiceContext, WarmingControlService, WarmingService,
};
use crate::traits::{DomainRepository, WarmingActivityRepository, WarmingSessionRepository};
use crate::types::{
    Domain, DomainStatus, ImportDomainRequest, SessionStatus, WarmingConfig, WarmingCounters,
    WarmingEmail, WarmingSession, WarmingStatus,
};

// ===== MockDomainRepository =====

#[derive(Default)]
pub struct MockDomainRepository {
    domains: Mutex<Vec<Domain>>,
}

#[async_trait]
impl DomainRepository for MockDomainRepository {
    async fn find_all(&self, user_id: &str) -> CoreResult<Vec<Domain>> {
        Ok(self
            .domains
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, user_id: &str, domain_id: &str) -> CoreResult<Option<Domain>> {
        Ok(self
            .domains
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.user_id == user_id && d.id == domain_id)
            .cloned())
    }

    async fn find_by_name(
        &self,
        user_id: &str,
        domain_name: &str,
    ) -> CoreResult<Option<Domain>> {
        Ok(self
            .domains
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.user_id == user_id && d.domain_name == domain_name)
            .cloned())
    }

    async fn insert(&self, domain: &Domain) -> CoreResult<()> {
        self.domains.lock().unwrap().push(domain.clone());
        Ok(())
    }

    async fn update(&self, domain: &Domain) -> CoreResult<()> {
        let mut store = self.domains.lock().unwrap();
        if let Some(existing) = store.iter_mut().find(|d| d.id == domain.id) {
            *existing = domain.clone();
        }
        Ok(())
    }

    async fn delete(&self, user_id: &str, domain_id: &str) -> CoreResult<bool> {
        let mut store = self.domains.lock().unwrap();
        let before = store.len();
        store.retain(|d| !(d.user_id == user_id && d.id == domain_id));
        Ok(store.len() < before)
    }
}

// ===== MockWarmingSessionRepository =====

#[derive(Default)]
pub struct MockWarmingSessionRepository {
    sessions: Mutex<HashMap<String, WarmingSession>>,
}

#[async_trait]
impl WarmingSessionRepository for MockWarmingSessionRepository {
    async fn find(&self, user_id: &str) -> CoreResult<Option<WarmingSession>> {
        Ok(self.sessions.lock().unwrap().get(user_id).cloned())
    }

    async fn create_if_absent(&self, user_id: &str, session: &WarmingSession) -> CoreResult<()> {
        self.sessions
            .lock()
            .unwrap()
            .entry(user_id.to_string())
            .or_insert_with(|| session.clone());
        Ok(())
    }

    async fn update_config(&self, user_id: &str, config: &WarmingConfig) -> CoreResult<()> {
        if let Some(session) = self.sessions.lock().unwrap().get_mut(user_id) {
            session.config = config.clone();
            session.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn transition_status(
        &self,
        user_id: &str,
        from: &[SessionStatus],
        to: SessionStatus,
    ) -> CoreResult<bool> {
        let mut store = self.sessions.lock().unwrap();
        let Some(session) = store.get_mut(user_id) else {
            return Ok(false);
        };
        if !from.contains(&session.status) {
            return Ok(false);
        }
        session.status = to;
        session.updated_at = Utc::now();
        Ok(true)
    }

    async fn increment_counters(&self, user_id: &str, delta: WarmingCounters) -> CoreResult<()> {
        if let Some(session) = self.sessions.lock().unwrap().get_mut(user_id) {
            session.counters.emails_sent_total += delta.emails_sent_total;
            session.counters.ai_emails_sent += delta.ai_emails_sent;
            session.counters.replies_sent += delta.replies_sent;
        }
        Ok(())
    }

    async fn active_user_ids(&self) -> CoreResult<Vec<String>> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, s)| s.status == SessionStatus::Active)
            .map(|(id, _)| id.clone())
            .collect())
    }
}

// ===== MockWarmingActivityRepository =====

#[derive(Default)]
pub struct MockWarmingActivityRepository {
    entries: Mutex<HashMap<String, Vec<WarmingEmail>>>,
}

#[async_trait]
impl WarmingActivityRepository for MockWarmingActivityRepository {
    async fn append(&self, user_id: &str, email: &WarmingEmail) -> CoreResult<()> {
        self.entries
            .lock()
            .unwrap()
            .entry(user_id.to_string())
            .or_default()
            .push(email.clone());
        Ok(())
    }

    async fn recent(&self, user_id: &str, limit: usize) -> CoreResult<Vec<WarmingEmail>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(user_id)
            .map(|entries| entries.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

// ===== MockDnsProvider =====

#[derive(Default)]
pub struct MockDnsProvider {
    zones: Mutex<HashMap<String, Zone>>,
    records: Mutex<HashMap<String, Vec<DnsRecord>>>,
    rules: Mutex<HashMap<String, Vec<RoutingRule>>>,
    routing_on: Mutex<HashSet<String>>,
    next_id: AtomicUsize,
}

impl MockDnsProvider {
    pub fn add_zone(&self, zone_id: &str, name: &str) {
        self.zones.lock().unwrap().insert(
            zone_id.to_string(),
            Zone {
                id: zone_id.to_string(),
                name: name.to_string(),
                status: ZoneStatus::Active,
            },
        );
    }

    pub fn has_zone_named(&self, name: &str) -> bool {
        self.zones
            .lock()
            .unwrap()
            .values()
            .any(|z| z.name == name)
    }

    pub fn records(&self, zone_id: &str) -> Vec<DnsRecord> {
        self.records
            .lock()
            .unwrap()
            .get(zone_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn routing_rules(&self, zone_id: &str) -> Vec<RoutingRule> {
        self.rules
            .lock()
            .unwrap()
            .get(zone_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn routing_enabled(&self, zone_id: &str) -> bool {
        self.routing_on.lock().unwrap().contains(zone_id)
    }

    fn next(&self, prefix: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}-{n}")
    }

    fn not_found(zone_id: &str) -> ProviderError {
        ProviderError::DomainNotFound {
            provider: "mock-dns".to_string(),
            domain: zone_id.to_string(),
            raw_message: None,
        }
    }
}

#[async_trait]
impl DnsProvider for MockDnsProvider {
    fn id(&self) -> &'static str {
        "mock-dns"
    }

    async fn verify_credentials(&self) -> sharkmail_provider::Result<bool> {
        Ok(true)
    }

    async fn list_zones(&self) -> sharkmail_provider::Result<Vec<Zone>> {
        Ok(self.zones.lock().unwrap().values().cloned().collect())
    }

    async fn get_zone(&self, zone_id: &str) -> sharkmail_provider::Result<Zone> {
        self.zones
            .lock()
            .unwrap()
            .get(zone_id)
            .cloned()
            .ok_or_else(|| Self::not_found(zone_id))
    }

    async fn create_zone(&self, domain_name: &str) -> sharkmail_provider::Result<Zone> {
        let zone = Zone {
            id: self.next("zone"),
            name: domain_name.to_string(),
            status: ZoneStatus::Pending,
        };
        self.zones
            .lock()
            .unwrap()
            .insert(zone.id.clone(), zone.clone());
        Ok(zone)
    }

    async fn list_records(&self, zone_id: &str) -> sharkmail_provider::Result<Vec<DnsRecord>> {
        Ok(self.records(zone_id))
    }

    async fn create_record(
        &self,
        zone_id: &str,
        spec: &RecordSpec,
    ) -> sharkmail_provider::Result<DnsRecord> {
        let record = DnsRecord {
            id: self.next("rec"),
            zone_id: zone_id.to_string(),
            record_type: spec.record_type,
            name: spec.name.clone(),
            content: spec.content.clone(),
            ttl: spec.ttl,
            priority: spec.priority,
            proxied: None,
        };
        self.records
            .lock()
            .unwrap()
            .entry(zone_id.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        spec: &RecordSpec,
    ) -> sharkmail_provider::Result<DnsRecord> {
        let mut store = self.records.lock().unwrap();
        let records = store.entry(zone_id.to_string()).or_default();
        let Some(record) = records.iter_mut().find(|r| r.id == record_id) else {
            return Err(ProviderError::RecordNotFound {
                provider: "mock-dns".to_string(),
                record_id: record_id.to_string(),
                raw_message: None,
            });
        };
        record.record_type = spec.record_type;
        record.name = spec.name.clone();
        record.content = spec.content.clone();
        record.ttl = spec.ttl;
        record.priority = spec.priority;
        Ok(record.clone())
    }

    async fn delete_record(
        &self,
        zone_id: &str,
        record_id: &str,
    ) -> sharkmail_provider::Result<()> {
        if let Some(records) = self.records.lock().unwrap().get_mut(zone_id) {
            records.retain(|r| r.id != record_id);
        }
        Ok(())
    }

    async fn enable_email_routing(&self, zone_id: &str) -> sharkmail_provider::Result<()> {
        if !self.zones.lock().unwrap().contains_key(zone_id) {
            return Err(Self::not_found(zone_id));
        }
        self.routing_on.lock().unwrap().insert(zone_id.to_string());
        Ok(())
    }

    async fn list_routing_rules(
        &self,
        zone_id: &str,
    ) -> sharkmail_provider::Result<Vec<RoutingRule>> {
        Ok(self.routing_rules(zone_id))
    }

    async fn create_routing_rule(
        &self,
        zone_id: &str,
        spec: &RoutingRuleSpec,
    ) -> sharkmail_provider::Result<RoutingRule> {
        let rule = RoutingRule {
            id: self.next("rule"),
            address: spec.address.clone(),
            forward_to: spec.forward_to.clone(),
            enabled: true,
        };
        self.rules
            .lock()
            .unwrap()
            .entry(zone_id.to_string())
            .or_default()
            .push(rule.clone());
        Ok(rule)
    }
}

// ===== MockMailProvider =====

#[derive(Default)]
pub struct MockMailProvider {
    domains: Mutex<HashMap<String, SendingDomain>>,
    verification_requests: Mutex<Vec<String>>,
    sent: Mutex<Vec<OutboundEmail>>,
    fail_sends: AtomicBool,
    next_id: AtomicUsize,
}

impl MockMailProvider {
    pub fn set_verified(&self, domain_name: &str) {
        if let Some(domain) = self.domains.lock().unwrap().get_mut(domain_name) {
            domain.status = SendingDomainStatus::Verified;
        }
    }

    pub fn set_unverified(&self, domain_name: &str) {
        if let Some(domain) = self.domains.lock().unwrap().get_mut(domain_name) {
            domain.status = SendingDomainStatus::Pending;
        }
    }

    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::Relaxed);
    }

    pub fn sent_emails(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn verification_requested(&self, domain_name: &str) -> bool {
        self.verification_request_count(domain_name) > 0
    }

    pub fn verification_request_count(&self, domain_name: &str) -> usize {
        let Some(id) = self
            .domains
            .lock()
            .unwrap()
            .get(domain_name)
            .map(|d| d.id.clone())
        else {
            return 0;
        };
        self.verification_requests
            .lock()
            .unwrap()
            .iter()
            .filter(|requested| **requested == id)
            .count()
    }

    fn sending_records(domain_name: &str) -> Vec<RecordSpec> {
        vec![
            RecordSpec::txt(
                format!("send.{domain_name}"),
                "v=spf1 include:amazonses.com ~all",
            ),
            RecordSpec::mx(
                format!("send.{domain_name}"),
                "feedback-smtp.us-east-1.amazonses.com",
                10,
            ),
            RecordSpec::txt(
                format!("resend._domainkey.{domain_name}"),
                "p=MIGfMA0GCSqGSIb3DQEBAQUAA4GNADCBiQKBgQ",
            ),
        ]
    }
}

#[async_trait]
impl MailProvider for MockMailProvider {
    fn id(&self) -> &'static str {
        "mock-mail"
    }

    async fn register_domain(
        &self,
        domain_name: &str,
    ) -> sharkmail_provider::Result<SendingDomain> {
        let mut store = self.domains.lock().unwrap();
        if let Some(existing) = store.get(domain_name) {
            return Ok(existing.clone());
        }
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        let domain = SendingDomain {
            id: format!("md-{n}"),
            name: domain_name.to_string(),
            status: SendingDomainStatus::Pending,
            required_records: Self::sending_records(domain_name),
        };
        store.insert(domain_name.to_string(), domain.clone());
        Ok(domain)
    }

    async fn find_domain(
        &self,
        domain_name: &str,
    ) -> sharkmail_provider::Result<Option<SendingDomain>> {
        Ok(self.domains.lock().unwrap().get(domain_name).cloned())
    }

    async fn request_verification(&self, domain_id: &str) -> sharkmail_provider::Result<()> {
        self.verification_requests
            .lock()
            .unwrap()
            .push(domain_id.to_string());
        Ok(())
    }

    async fn send(&self, email: &OutboundEmail) -> sharkmail_provider::Result<SentEmail> {
        if self.fail_sends.load(Ordering::Relaxed) {
            return Err(ProviderError::NetworkError {
                provider: "mock-mail".to_string(),
                detail: "send disabled".to_string(),
            });
        }
        self.sent.lock().unwrap().push(email.clone());
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        Ok(SentEmail {
            id: format!("msg-{n}"),
        })
    }
}

// ===== Factories =====

pub struct TestServices {
    pub ctx: Arc<ServiceContext>,
    pub domains: DomainService,
    pub dns_setup: DnsSetupService,
    pub warming: WarmingService,
    pub control: WarmingControlService,
}

pub struct TestFixtures {
    pub domain_repo: Arc<MockDomainRepository>,
    pub sessions: Arc<MockWarmingSessionRepository>,
    pub activity: Arc<MockWarmingActivityRepository>,
    pub dns: Arc<MockDnsProvider>,
    pub mailer: Arc<MockMailProvider>,
}

/// Build every service over fresh mocks.
pub fn create_test_services() -> (TestServices, TestFixtures) {
    let domain_repo = Arc::new(MockDomainRepository::default());
    let sessions = Arc::new(MockWarmingSessionRepository::default());
    let activity = Arc::new(MockWarmingActivityRepository::default());
    let dns = Arc::new(MockDnsProvider::default());
    let mailer = Arc::new(MockMailProvider::default());

    let ctx = Arc::new(ServiceContext::new(
        domain_repo.clone(),
        sessions.clone(),
        activity.clone(),
        dns.clone(),
        mailer.clone(),
    ));

    let services = TestServices {
        ctx: ctx.clone(),
        domains: DomainService::new(ctx.clone()),
        dns_setup: DnsSetupService::new(ctx.clone()),
        warming: WarmingService::new(ctx.clone()),
        control: WarmingControlService::new(ctx),
    };

    let fixtures = TestFixtures {
        domain_repo,
        sessions,
        activity,
        dns,
        mailer,
    };

    (services, fixtures)
}

/// Shorthand for an import request body.
pub fn import_request(zone_id: &str, domain_name: &str) -> ImportDomainRequest {
    ImportDomainRequest {
        zone_id: zone_id.to_string(),
        domain_name: domain_name.to_string(),
    }
}

/// Insert a fully configured, warming-verified domain directly.
pub async fn insert_verified_domain(
    fixtures: &TestFixtures,
    user_id: &str,
    domain_name: &str,
) -> Domain {
    let now = Utc::now();
    let domain = Domain {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        domain_name: domain_name.to_string(),
        status: DomainStatus::Active,
        zone_id: Some(format!("zone-{domain_name}")),
        dns_configured: true,
        email_routing_enabled: false,
        forward_to: None,
        warming_enabled: true,
        warming_status: WarmingStatus::Verified,
        created_at: now,
        updated_at: now,
    };
    fixtures.domain_repo.insert(&domain).await.unwrap();
    domain
}

/// A throwaway activity log entry.
pub fn sample_activity(subject: &str) -> WarmingEmail {
    WarmingEmail {
        from_email: "team@example.com".to_string(),
        to_email: "hello@example.com".to_string(),
        subject: subject.to_string(),
        is_ai: false,
        is_reply: false,
        sent_at: Utc::now(),
    }
}
