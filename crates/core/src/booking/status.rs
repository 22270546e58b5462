//! Visit status values and the transition table between them.
//!
//! ```text
//! pending  -> approved | rejected | cancelled
//! approved -> completed | cancelled
//! rejected, completed, cancelled: terminal
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of a visit. Stored as lowercase text in `visits.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
    Cancelled,
}

/// Statuses that hold a slot: they count against availability and the
/// active-slot uniqueness constraint.
pub const ACTIVE_STATUSES: &[VisitStatus] = &[VisitStatus::Pending, VisitStatus::Approved];

/// Statuses an agent may set through the status endpoint.
pub const AGENT_DECISIONS: &[VisitStatus] = &[
    VisitStatus::Approved,
    VisitStatus::Rejected,
    VisitStatus::Cancelled,
];

impl VisitStatus {
    /// Stable string form, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Statuses reachable from `self` in one step.
    pub fn valid_transitions(self) -> &'static [VisitStatus] {
        match self {
            Self::Pending => &[Self::Approved, Self::Rejected, Self::Cancelled],
            Self::Approved => &[Self::Completed, Self::Cancelled],
            Self::Rejected | Self::Completed | Self::Cancelled => &[],
        }
    }

    pub fn can_transition(self, to: VisitStatus) -> bool {
        self.valid_transitions().contains(&to)
    }

    pub fn is_terminal(self) -> bool {
        self.valid_transitions().is_empty()
    }

    pub fn is_active(self) -> bool {
        ACTIVE_STATUSES.contains(&self)
    }

    /// Statuses from which a transition into `to` is legal.
    pub fn sources_of(to: VisitStatus) -> Vec<VisitStatus> {
        ALL.iter().copied().filter(|s| s.can_transition(to)).collect()
    }
}

const ALL: [VisitStatus; 5] = [
    VisitStatus::Pending,
    VisitStatus::Approved,
    VisitStatus::Rejected,
    VisitStatus::Completed,
    VisitStatus::Cancelled,
];

impl fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisitStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL.iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid visit status '{s}'. Must be one of: pending, approved, rejected, completed, cancelled"
                ))
            })
    }
}

impl TryFrom<String> for VisitStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Validate a transition, returning [`CoreError::InvalidTransition`] when the
/// state machine does not allow it.
pub fn validate_transition(from: VisitStatus, to: VisitStatus) -> Result<(), CoreError> {
    if from.can_transition(to) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

/// Validate a status an agent asked for on a pending visit.
///
/// Only [`AGENT_DECISIONS`] may be requested, and only while the visit is
/// still `pending`; anything else is an invalid transition.
pub fn validate_agent_decision(current: VisitStatus, requested: VisitStatus) -> Result<(), CoreError> {
    if !AGENT_DECISIONS.contains(&requested) {
        return Err(CoreError::Validation(format!(
            "Status '{requested}' cannot be set by an agent decision. Must be one of: approved, rejected, cancelled"
        )));
    }
    if current != VisitStatus::Pending {
        return Err(CoreError::InvalidTransition {
            from: current.to_string(),
            to: requested.to_string(),
        });
    }
    validate_transition(current, requested)
}

/// Validate a cancellation requested by the visitor.
pub fn validate_cancellation(current: VisitStatus) -> Result<(), CoreError> {
    validate_transition(current, VisitStatus::Cancelled)
}
