//! MCP current_time tool.

use std::time::SystemTime;

use serde::Serialize;

use crate::clock::UtcDateTime;

pub const NAME: &str = "current_time";

#[derive(Debug, Serialize)]
pub struct CurrentTimeOutput {
    /// Current server time in RFC1123 format
    pub time: String,
}

pub fn run_current_time() -> CurrentTimeOutput {
    current_time_at(SystemTime::now())
}

fn current_time_at(now: SystemTime) -> CurrentTimeOutput {
    let stamp = UtcDateTime::from_system_time(now).to_rfc1123();
    CurrentTimeOutput { time: format!("Current server time is: {}", stamp) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_fixed_time() {
        let now = UNIX_EPOCH + Duration::from_secs(1_136_214_245);
        assert_eq!(
            current_time_at(now).time,
            "Current server time is: Mon, 02 Jan 2006 15:04:05 UTC"
        );
    }

    #[test]
    fn test_now_has_prefix() {
        assert!(run_current_time().time.starts_with("Current server time is: "));
    }
}
