//! MCP tool definitions for mcp-devtools
//!
//! Each module holds one tool's input/output schema and a `run_*` function
//! that does the work. The server only adapts these to the protocol.

pub mod color;
pub mod current_time;
pub mod downloads;
pub mod environment;
pub mod exec;
pub mod network;
pub mod npm;

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::ToolError;

/// Race `fut` against the request's cancellation token.
///
/// On cancellation the future is dropped and `Cancelled` is returned.
pub(crate) async fn cancellable<T>(
    tool: &'static str,
    ct: &CancellationToken,
    fut: impl Future<Output = Result<T, ToolError>>,
) -> Result<T, ToolError> {
    tokio::select! {
        biased;
        _ = ct.cancelled() => Err(ToolError::Cancelled { tool }),
        result = fut => result,
    }
}

/// Run a blocking OS call on the blocking thread pool.
pub(crate) async fn blocking<T, F>(tool: &'static str, f: F) -> Result<T, ToolError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ToolError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ToolError::external(tool, "worker task failed", e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancellable_passes_result_through() {
        let ct = CancellationToken::new();
        let result = cancellable("t", &ct, async { Ok::<_, ToolError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_cancelled_token_wins() {
        let ct = CancellationToken::new();
        ct.cancel();
        let result = cancellable("t", &ct, std::future::pending::<Result<(), ToolError>>()).await;
        assert!(matches!(result, Err(ToolError::Cancelled { tool: "t" })));
    }

    #[tokio::test]
    async fn test_blocking_runs_closure() {
        let result = blocking("t", || Ok(2 + 2)).await;
        assert_eq!(result.unwrap(), 4);
    }
}
