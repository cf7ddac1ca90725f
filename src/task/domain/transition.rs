//! The three employee-facing transitions and the buckets they connect.

use super::{Bucket, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Employee-facing task transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Pool → pending, in progress and owned by the viewer.
    Claim,
    /// Pending → completed.
    Complete,
    /// Completed → pending.
    Reopen,
}

impl Transition {
    /// Bucket the task must be in before the transition.
    #[must_use]
    pub const fn source(self) -> Bucket {
        match self {
            Self::Claim => Bucket::Pool,
            Self::Complete => Bucket::Pending,
            Self::Reopen => Bucket::Completed,
        }
    }

    /// Bucket the task lands in after the transition.
    #[must_use]
    pub const fn target(self) -> Bucket {
        match self {
            Self::Claim | Self::Reopen => Bucket::Pending,
            Self::Complete => Bucket::Completed,
        }
    }

    /// Status written to the remote API.
    #[must_use]
    pub const fn target_status(self) -> TaskStatus {
        match self {
            Self::Claim => TaskStatus::InProgress,
            Self::Complete => TaskStatus::Completed,
            Self::Reopen => TaskStatus::Pending,
        }
    }

    /// Returns the transition name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Claim => "claim",
            Self::Complete => "complete",
            Self::Reopen => "reopen",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
