pub mod ns;
pub mod types;

pub use self::ns::NsValidator;
pub use self::types::DomainValidator;

use crate::config::Config;
use anyhow::{Context, Result};
use hickory_resolver::config::{NameServerConfig, ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::xfer::Protocol;
use hickory_resolver::Resolver;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Build the production validator from the `[dns]` config table.
pub fn create_validator(config: &Config) -> Result<Arc<dyn DomainValidator>> {
    let resolver_config = if config.dns.nameservers.is_empty() {
        info!("No nameservers configured, using Google public DNS.");
        ResolverConfig::google()
    } else {
        let mut cfg = ResolverConfig::new();
        for server in &config.dns.nameservers {
            let addr: SocketAddr = server
                .parse()
                .with_context(|| format!("Invalid nameserver address {server:?}"))?;
            cfg.add_name_server(NameServerConfig::new(addr, Protocol::Udp));
        }
        cfg
    };

    let mut opts = ResolverOpts::default();
    // Every candidate is looked up once per run; a resolver cache buys nothing.
    opts.cache_size = 0;
    opts.timeout = std::time::Duration::from_millis(config.dns.timeout_ms);
    opts.attempts = config.dns.attempts;

    let resolver = Resolver::builder_with_config(resolver_config, TokioConnectionProvider::default())
        .with_options(opts)
        .build();

    Ok(Arc::new(NsValidator::new(resolver)))
}
