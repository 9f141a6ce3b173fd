use std::path::PathBuf;
use thiserror::Error;

/// Failure classes for one source pipeline. None of these are fatal to the
/// run: an invalid URL skips its source, a transport failure aborts its
/// source, and a persistence failure drops a single domain's write.
/// Validation has no variant here: a candidate the resolver cannot confirm
/// is rejected, never surfaced as an error.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid source url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("fetch failed for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("append to {} failed: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
