//! Child-process supervision for the optional external generator
//!
//! The generator (e.g. an adsbcot instance producing the event stream) is a
//! scoped resource: acquired while starting, terminated on every exit path.
//! `kill_on_drop` backs the forced-abort path where the supervisor task never
//! reaches its cleanup code.

use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::error::WorkerError;

/// Launch the generator command as a child process
pub(crate) fn spawn_generator(command: &str) -> Result<Child, WorkerError> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| WorkerError::process_spawn(command, "empty command"))?;

    let child = Command::new(program)
        .args(parts)
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| WorkerError::process_spawn(command, e.to_string()))?;

    info!(command = %command, pid = ?child.id(), "generator process launched");
    Ok(child)
}

/// Terminate and reap the generator
pub(crate) async fn terminate_generator(mut child: Child) {
    let pid = child.id();
    match child.kill().await {
        Ok(()) => debug!(pid = ?pid, "generator process terminated"),
        Err(e) => warn!(pid = ?pid, error = %e, "failed to terminate generator process"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_spawn_and_terminate() {
        let child = spawn_generator("sleep 30").unwrap();
        let terminated = tokio::time::timeout(Duration::from_secs(2), terminate_generator(child));
        assert!(terminated.await.is_ok(), "termination must reap promptly");
    }

    #[tokio::test]
    async fn test_spawn_unknown_program_fails() {
        let result = spawn_generator("definitely-not-a-real-program-xyz --flag");
        assert!(matches!(result, Err(WorkerError::ProcessSpawn { .. })));
    }

    #[test]
    fn test_spawn_empty_command_fails() {
        let result = spawn_generator("   ");
        assert!(matches!(result, Err(WorkerError::ProcessSpawn { .. })));
    }
}
