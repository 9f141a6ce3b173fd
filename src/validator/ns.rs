use super::types::DomainValidator;
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::TokioResolver;
use tracing::debug;

/// NS-record probe against a live resolver. Presence of a delegation is a
/// weak liveness signal; NXDOMAIN, timeouts and refused answers all reject
/// the candidate for this run.
pub struct NsValidator {
    resolver: TokioResolver,
}

impl NsValidator {
    pub fn new(resolver: TokioResolver) -> Self {
        Self { resolver }
    }
}

#[async_trait::async_trait]
impl DomainValidator for NsValidator {
    async fn has_nameservers(&self, domain: &str) -> bool {
        match self.resolver.lookup(domain, RecordType::NS).await {
            Ok(lookup) => lookup
                .records()
                .iter()
                .any(|record| record.record_type() == RecordType::NS),
            Err(e) => {
                debug!("NS lookup failed for {}: {}", domain, e);
                false
            }
        }
    }
}
