use crate::config::Source;
use crate::error::PipelineError;
use crate::exclusions::ExclusionList;
use crate::extract;
use crate::fetch::Fetcher;
use crate::stats::RunStats;
use crate::validator::DomainValidator;
use crate::writer::DomainSink;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use url::Url;

/// Terminal state of one source's run. Every spawned pipeline resolves to
/// exactly one of these; the orchestrator's barrier counts them.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// Ran to the end; `written` domains were accepted by the writer.
    Completed { written: u64 },
    /// The source URL failed syntactic validation; nothing was fetched.
    Skipped { url: String },
    /// Transport failure fetching the document; siblings are unaffected.
    Aborted { url: String },
}

/// Fetch → extract → dedup → exclude → validate → write for one source.
/// Strictly sequential over this source's own data; concurrency exists only
/// across sources.
pub async fn run_source(
    source: Source,
    fetcher: Arc<Fetcher>,
    validator: Arc<dyn DomainValidator>,
    exclusions: Arc<ExclusionList>,
    sink: DomainSink,
    stats: Arc<RunStats>,
) -> PipelineOutcome {
    let url = match Url::parse(&source.url) {
        Ok(url) => url,
        Err(parse_err) => {
            warn!(
                "{}",
                PipelineError::InvalidUrl {
                    url: source.url.clone(),
                    source: parse_err,
                }
            );
            return PipelineOutcome::Skipped { url: source.url };
        }
    };

    info!("Fetching {} list from {}", source.category, url);
    let body = match fetcher.fetch(&url).await {
        Ok(body) => body,
        Err(e) => {
            error!("{}", e);
            return PipelineOutcome::Aborted { url: source.url };
        }
    };

    let candidates = extract::extract_domains(&body);
    let unique = extract::dedup_first_seen(candidates);
    stats.add_candidates(unique.len() as u64);
    debug!("{}: {} unique candidates", url, unique.len());

    let mut written = 0u64;
    for domain in unique {
        if exclusions.contains(&domain) {
            stats.inc_excluded();
            continue;
        }
        if !validator.has_nameservers(&domain).await {
            stats.inc_rejected();
            continue;
        }
        stats.inc_validated();
        if sink.append(domain).await {
            written += 1;
        } else {
            // Writer gone means shutdown is underway; the domain is dropped.
            error!("Writer for {} is closed, dropping domain", source.category);
        }
    }

    info!(
        "{} done: {} domains appended to {}",
        url, written, source.category
    );
    PipelineOutcome::Completed { written }
}
