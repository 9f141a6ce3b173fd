/// Abstract liveness check for candidate domains, injectable so tests can
/// substitute deterministic fakes for the live DNS system.
#[async_trait::async_trait]
pub trait DomainValidator: Send + Sync {
    /// True iff the domain currently has at least one authoritative
    /// nameserver. Implementations fail closed: any resolver error means
    /// false, never a propagated failure.
    async fn has_nameservers(&self, domain: &str) -> bool;
}
