//! Worker error types

use thiserror::Error;

use dispatcher::DispatcherError;
use ingestion::SourceError;

/// Worker-level errors
#[derive(Debug, Error)]
pub enum WorkerError {
    /// Generator child process could not be launched
    #[error("failed to launch generator '{command}': {message}")]
    ProcessSpawn { command: String, message: String },

    /// Fatal source error ended the event sequence
    #[error("source failed: {0}")]
    Source(#[from] SourceError),

    /// Dispatcher could not be built from the configured targets
    #[error("dispatcher setup failed: {0}")]
    Dispatcher(#[from] DispatcherError),

    /// The background task itself died
    #[error("worker task failed: {message}")]
    Supervisor { message: String },
}

impl WorkerError {
    /// Create a process spawn error
    pub fn process_spawn(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProcessSpawn {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a supervisor failure error
    pub fn supervisor(message: impl Into<String>) -> Self {
        Self::Supervisor {
            message: message.into(),
        }
    }
}
