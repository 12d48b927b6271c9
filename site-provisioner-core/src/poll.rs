//! Polling Waiter
//!
//! Bounded polling loop: sleep, check, repeat until the check reports a terminal state or the
//! attempt budget runs out.

use std::fmt::{self, Display};
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What a single check observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    /// Not terminal yet; poll again.
    Pending,
    /// Terminal success.
    Succeeded,
    /// Terminal failure; polling stops.
    Failed,
}

impl From<bool> for PollStatus {
    /// `true` is success, `false` still pending.
    fn from(done: bool) -> Self {
        if done {
            Self::Succeeded
        } else {
            Self::Pending
        }
    }
}

/// How a poll ended.
///
/// `Failed` (the check said so) and `TimedOut` (budget exhausted while pending) stay distinct
/// for logs and error text; [`is_success`](Self::is_success) is the boolean view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PollOutcome {
    Succeeded { attempts: u32 },
    Failed { attempts: u32 },
    TimedOut { attempts: u32 },
}

impl PollOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Number of checks performed.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Succeeded { attempts } | Self::Failed { attempts } | Self::TimedOut { attempts } => {
                *attempts
            }
        }
    }
}

impl Display for PollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded { attempts } => write!(f, "succeeded after {attempts} check(s)"),
            Self::Failed { attempts } => write!(f, "failed on check {attempts}"),
            Self::TimedOut { attempts } => {
                write!(f, "still pending after {attempts} check(s)")
            }
        }
    }
}

/// Attempt budget and spacing of a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollSettings {
    pub max_attempts: u32,
    #[serde(rename = "intervalMs", with = "crate::utils::duration_ms")]
    pub interval: Duration,
}

impl Default for PollSettings {
    /// 30 checks, 10 seconds apart.
    fn default() -> Self {
        Self {
            max_attempts: 30,
            interval: Duration::from_secs(10),
        }
    }
}

/// Polls `check` up to `max_attempts` times, sleeping `interval` before each call.
///
/// A check that returns `Err` counts as pending for that iteration (logged at `warn`), so an
/// isolated network blip does not end the wait. `max_attempts == 0` returns `TimedOut`
/// without calling `check`.
pub async fn poll_until<F, Fut, E>(mut check: F, max_attempts: u32, interval: Duration) -> PollOutcome
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<PollStatus, E>>,
    E: Display,
{
    for attempt in 1..=max_attempts {
        tokio::time::sleep(interval).await;

        match check().await {
            Ok(PollStatus::Succeeded) => return PollOutcome::Succeeded { attempts: attempt },
            Ok(PollStatus::Failed) => return PollOutcome::Failed { attempts: attempt },
            Ok(PollStatus::Pending) => {
                log::debug!("Poll {attempt}/{max_attempts}: pending");
            }
            Err(e) => {
                log::warn!("Poll {attempt}/{max_attempts}: check failed, treating as pending: {e}");
            }
        }
    }

    PollOutcome::TimedOut {
        attempts: max_attempts,
    }
}
