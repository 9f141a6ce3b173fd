use crate::config::{Category, Config};
use crate::error::PipelineError;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Serialized append access to the category files. Each category gets one
/// dedicated writer task owning its file handle, fed by a channel, so
/// concurrent pipelines can never interleave partial lines.
pub struct CategoryWriters {
    handles: HashMap<Category, DomainSink>,
    tasks: Vec<(Category, JoinHandle<()>)>,
}

#[derive(Clone)]
pub struct DomainSink {
    tx: mpsc::Sender<String>,
}

impl DomainSink {
    /// Queue one domain for append. Awaits channel capacity rather than
    /// dropping; only a persistence failure may lose a validated domain.
    /// Returns false if the writer task is already gone.
    pub async fn append(&self, domain: String) -> bool {
        self.tx.send(domain).await.is_ok()
    }
}

impl CategoryWriters {
    pub fn spawn(config: &Config) -> Self {
        let mut handles = HashMap::new();
        let mut tasks = Vec::new();
        for category in Category::ALL {
            let path = config.category_path(category);
            let (tx, rx) = mpsc::channel(1024);
            tasks.push((category, tokio::spawn(write_loop(path, rx))));
            handles.insert(category, DomainSink { tx });
        }
        Self { handles, tasks }
    }

    pub fn sink(&self, category: Category) -> DomainSink {
        self.handles[&category].clone()
    }

    /// Drop all senders so each writer drains its queue and exits, then
    /// join the tasks. After this returns every accepted domain is on disk.
    pub async fn shutdown(mut self) {
        self.handles.clear();
        for (category, task) in self.tasks {
            if let Err(e) = task.await {
                error!("Writer task for {} panicked: {}", category, e);
            }
        }
    }
}

async fn write_loop(path: PathBuf, mut rx: mpsc::Receiver<String>) {
    let mut file: Option<File> = None;
    let mut written = 0u64;

    while let Some(domain) = rx.recv().await {
        // Opened lazily so categories that validate nothing leave no file.
        if file.is_none() {
            match OpenOptions::new().append(true).create(true).open(&path).await {
                Ok(handle) => file = Some(handle),
                Err(source) => {
                    error!(
                        "{}",
                        PipelineError::Persistence {
                            path: path.clone(),
                            source,
                        }
                    );
                    continue;
                }
            }
        }
        let Some(handle) = file.as_mut() else {
            continue;
        };

        let line = format!("{domain}\n");
        match handle.write_all(line.as_bytes()).await {
            Ok(()) => written += 1,
            Err(source) => {
                error!(
                    "{}",
                    PipelineError::Persistence {
                        path: path.clone(),
                        source,
                    }
                );
            }
        }
    }

    if let Some(mut handle) = file {
        if let Err(source) = handle.flush().await {
            error!(
                "{}",
                PipelineError::Persistence {
                    path: path.clone(),
                    source,
                }
            );
        }
    }
    debug!("Writer for {} drained, {} lines", path.display(), written);
}
