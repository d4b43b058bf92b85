//! FeedWorker - lifecycle state machine for one feed pipeline
//!
//! `Stopped → Starting → Running → Stopping → Stopped`, reentrant. Only one
//! adapter task runs per worker instance; the only cross-task signal is the
//! cancellation token. The supervisor task owns the child process and the
//! dispatcher and releases both on every exit path, including the
//! fatal-error path.

use std::sync::Arc;
use std::time::Duration;

use tokio::process::Child;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use contracts::{FeedConfig, FeedIngest, SourceConfig};
use dispatcher::Dispatcher;
use ingestion::SourceAdapter;

use crate::error::WorkerError;
use crate::process;

/// Default envelope channel capacity between source and dispatch loop
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// How long `stop()` waits for the background task before forcing it down
pub const STOP_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Worker lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Stopped,
    Starting,
    Running,
    Stopping,
}

struct WorkerRuntime {
    /// Stop signal into the background task
    cancel: CancellationToken,
    /// Completion signal out of the background task
    done: CancellationToken,
    /// Fatal outcome slot, filled by the supervisor before `done` fires
    failure: Arc<Mutex<Option<WorkerError>>>,
    /// Handle for forced shutdown after the grace period
    task: JoinHandle<()>,
}

/// Owns the lifecycle of one configured feed
pub struct FeedWorker {
    config: FeedConfig,
    ingest: Arc<dyn FeedIngest>,
    channel_capacity: usize,
    state: WorkerState,
    runtime: Option<WorkerRuntime>,
}

impl FeedWorker {
    /// Create a stopped worker for the given configuration
    pub fn new(config: FeedConfig, ingest: Arc<dyn FeedIngest>) -> Self {
        Self {
            config,
            ingest,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            state: WorkerState::Stopped,
            runtime: None,
        }
    }

    /// Override the envelope channel capacity
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Current lifecycle state.
    ///
    /// A background task that ended on its own (fatal source error) reports
    /// `Stopped`: cleanup has already run inside the supervisor.
    pub fn state(&self) -> WorkerState {
        match &self.runtime {
            Some(runtime) if runtime.done.is_cancelled() => WorkerState::Stopped,
            Some(_) | None => self.state,
        }
    }

    /// Completes when the background task ends on its own.
    ///
    /// Cancellation-safe, so hosts can race it against a shutdown signal.
    /// Returns immediately when the worker is not running.
    pub async fn finished(&self) {
        if let Some(runtime) = &self.runtime {
            runtime.done.cancelled().await;
        }
    }

    /// Start the feed pipeline.
    ///
    /// A repeated `start()` while already running is a no-op with a warning,
    /// not an error.
    pub async fn start(&mut self) -> Result<(), WorkerError> {
        if let Some(runtime) = &self.runtime {
            if !runtime.done.is_cancelled() {
                warn!(feed_id = %self.config.feed.id, "worker already running, start ignored");
                return Ok(());
            }
            // Previous run ended on its own; its cleanup already ran.
            self.runtime = None;
        }

        self.state = WorkerState::Starting;
        let feed = &self.config.feed;
        info!(
            feed_id = %feed.id,
            source = self.config.source.mode(),
            "feed worker starting"
        );

        // Idempotent feed registration: "already exists" is success
        if let Err(e) = self
            .ingest
            .create_feed_if_absent(&feed.id, &feed.name, &feed.tags)
            .await
        {
            debug!(feed_id = %feed.id, error = %e, "feed may already exist");
        }

        let child = match self.launch_generator() {
            Ok(child) => child,
            Err(e) => {
                self.state = WorkerState::Stopped;
                return Err(e);
            }
        };

        let dispatcher = match Dispatcher::from_config(
            &self.config.sinks,
            &self.config.feed,
            Some(Arc::clone(&self.ingest)),
        )
        .await
        {
            Ok(dispatcher) => dispatcher,
            Err(e) => {
                // Give back the scoped resource acquired above
                if let Some(child) = child {
                    process::terminate_generator(child).await;
                }
                self.state = WorkerState::Stopped;
                return Err(e.into());
            }
        };

        let adapter = SourceAdapter::from_config(&self.config);
        let cancel = CancellationToken::new();
        let done = CancellationToken::new();
        let failure: Arc<Mutex<Option<WorkerError>>> = Arc::new(Mutex::new(None));

        let task = tokio::spawn({
            let feed_id = feed.id.clone();
            let cancel = cancel.clone();
            let done = done.clone();
            let failure = Arc::clone(&failure);
            let capacity = self.channel_capacity;
            async move {
                let result =
                    supervise(&feed_id, adapter, dispatcher, child, cancel, capacity).await;
                if let Err(e) = result {
                    error!(feed_id = %feed_id, error = %e, "feed worker failed");
                    observability::record_worker_failure(&feed_id);
                    *failure.lock().await = Some(e);
                }
                done.cancel();
            }
        });

        self.runtime = Some(WorkerRuntime {
            cancel,
            done,
            failure,
            task,
        });
        self.state = WorkerState::Running;
        info!(feed_id = %feed.id, "feed worker running");
        Ok(())
    }

    /// Stop the feed pipeline.
    ///
    /// Returns after the background task has observably exited, or after
    /// [`STOP_GRACE_PERIOD`] with the task forcibly aborted (the child
    /// process is then reaped via `kill_on_drop`). Surfaces the fatal source
    /// error when the task had already ended on one. Reentrant: stopping a
    /// stopped worker is a no-op.
    pub async fn stop(&mut self) -> Result<(), WorkerError> {
        let Some(runtime) = self.runtime.take() else {
            debug!(feed_id = %self.config.feed.id, "worker already stopped");
            self.state = WorkerState::Stopped;
            return Ok(());
        };

        self.state = WorkerState::Stopping;
        info!(feed_id = %self.config.feed.id, "feed worker stopping");
        runtime.cancel.cancel();

        if tokio::time::timeout(STOP_GRACE_PERIOD, runtime.done.cancelled())
            .await
            .is_err()
        {
            warn!(
                feed_id = %self.config.feed.id,
                grace_secs = STOP_GRACE_PERIOD.as_secs(),
                "grace period expired, aborting feed task"
            );
            runtime.task.abort();
        }

        self.state = WorkerState::Stopped;
        info!(feed_id = %self.config.feed.id, "feed worker stopped");

        let result = match runtime.failure.lock().await.take() {
            Some(e) => Err(e),
            None => Ok(()),
        };
        result
    }

    fn launch_generator(&self) -> Result<Option<Child>, WorkerError> {
        let SourceConfig::Stream(stream) = &self.config.source else {
            return Ok(None);
        };
        match &stream.command {
            Some(command) => Ok(Some(process::spawn_generator(command)?)),
            None => Ok(None),
        }
    }
}

/// The background task: drain the source into the dispatcher, then release
/// every owned resource regardless of how the sequence ended.
async fn supervise(
    feed_id: &str,
    adapter: SourceAdapter,
    mut dispatcher: Dispatcher,
    child: Option<Child>,
    cancel: CancellationToken,
    capacity: usize,
) -> Result<(), WorkerError> {
    let source_name = adapter.name();
    let (tx, mut rx) = mpsc::channel(capacity);
    let mut source_task = tokio::spawn(adapter.run(tx, cancel.clone()));

    let mut dispatched: u64 = 0;
    let mut sink_failures: u64 = 0;

    // Envelopes are dispatched in production order; the loop ends when the
    // source drops its sender.
    while let Some(envelope) = rx.recv().await {
        let report = dispatcher.dispatch(&envelope).await;
        observability::record_pipeline_event(source_name);
        dispatched += 1;
        sink_failures += report.failed() as u64;
    }

    let outcome = match (&mut source_task).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            if cancel.is_cancelled() {
                // Stop was requested while the failure happened; not fatal
                debug!(feed_id = %feed_id, error = %e, "source ended during shutdown");
                Ok(())
            } else {
                Err(WorkerError::Source(e))
            }
        }
        Err(e) => Err(WorkerError::supervisor(format!("source task died: {e}"))),
    };

    // Scoped resources: released on every exit path, fatal ones included
    if let Some(child) = child {
        process::terminate_generator(child).await;
    }
    dispatcher.close().await;

    info!(
        feed_id = %feed_id,
        source = source_name,
        events = dispatched,
        sink_failures,
        "feed pipeline shut down"
    );
    outcome
}
