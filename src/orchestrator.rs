use crate::config::Config;
use crate::exclusions::ExclusionList;
use crate::fetch::Fetcher;
use crate::pipeline::{self, PipelineOutcome};
use crate::stats::RunStats;
use crate::validator::DomainValidator;
use crate::writer::CategoryWriters;
use anyhow::Result;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info};

/// Outcome counts for one whole run. `completed` equals `launched` whenever
/// the barrier worked; the two are reported separately so a regression is
/// visible instead of a hang.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub launched: usize,
    pub completed: usize,
    pub skipped: usize,
    pub aborted: usize,
    pub written: u64,
}

pub struct Orchestrator {
    config: Config,
    validator: Arc<dyn DomainValidator>,
    exclusions: Arc<ExclusionList>,
    stats: Arc<RunStats>,
}

impl Orchestrator {
    pub fn new(
        config: Config,
        validator: Arc<dyn DomainValidator>,
        exclusions: Arc<ExclusionList>,
        stats: Arc<RunStats>,
    ) -> Self {
        Self {
            config,
            validator,
            exclusions,
            stats,
        }
    }

    /// Launch one pipeline per registry source and block until all of them
    /// reach a terminal state. The JoinSet is the completion barrier: every
    /// spawned task yields exactly one `join_next` result on every exit
    /// path, including panic, so the barrier can neither hang on a failed
    /// source nor release early.
    pub async fn run(&self) -> Result<RunSummary> {
        let fetcher = Arc::new(Fetcher::new(&self.config)?);
        let writers = CategoryWriters::spawn(&self.config);

        let mut tasks = JoinSet::new();
        for source in self.config.sources.clone() {
            let sink = writers.sink(source.category);
            tasks.spawn(pipeline::run_source(
                source,
                fetcher.clone(),
                self.validator.clone(),
                self.exclusions.clone(),
                sink,
                self.stats.clone(),
            ));
        }

        let mut summary = RunSummary {
            launched: tasks.len(),
            ..RunSummary::default()
        };
        info!("Launched {} source pipelines", summary.launched);

        while let Some(joined) = tasks.join_next().await {
            summary.completed += 1;
            match joined {
                Ok(PipelineOutcome::Completed { written }) => summary.written += written,
                Ok(PipelineOutcome::Skipped { .. }) => summary.skipped += 1,
                Ok(PipelineOutcome::Aborted { .. }) => summary.aborted += 1,
                Err(join_err) => {
                    error!("Source pipeline panicked: {}", join_err);
                    summary.aborted += 1;
                }
            }
        }

        // All pipeline sinks are dropped once the barrier releases; this
        // drains the writer queues so every accepted domain is on disk.
        writers.shutdown().await;

        Ok(summary)
    }
}
