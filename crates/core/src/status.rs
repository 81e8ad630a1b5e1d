//! Project lifecycle state machine.
//!
//! A project moves through three client-visible states:
//!
//! ```text
//! waiting ──feedback──▶ feedback ──new version──▶ waiting
//!    │                     │
//!    └──────approve────────┴──▶ approved (terminal)
//! ```
//!
//! Status only moves forward: an approved project never reopens, and a
//! feedback submission against it is rejected rather than silently applied.

use serde::{Deserialize, Serialize};

/// Client-visible lifecycle status of a project.
///
/// Stored as lowercase TEXT in the `projects.status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Waiting on the client: a preview is (or will be) available.
    Waiting,
    /// The client asked for changes; the studio owes a revision.
    Feedback,
    /// The client signed off. Terminal.
    Approved,
}

impl ProjectStatus {
    /// Stable lowercase name matching the stored column value.
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Waiting => "waiting",
            ProjectStatus::Feedback => "feedback",
            ProjectStatus::Approved => "approved",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action a client can take on a resolved preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientAction {
    /// Submit a free-text change request.
    SubmitFeedback,
    /// Sign off on the current version.
    Approve,
}

/// Outcome of applying an action to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Persist the new status (and, for feedback, append a history entry).
    Move(ProjectStatus),
    /// Nothing to do; the project is already in the requested state.
    Noop,
    /// The action is not allowed from the current state.
    Rejected(&'static str),
}

/// Compute the transition for a client action against the current status.
pub fn next_status(current: ProjectStatus, action: ClientAction) -> Transition {
    match (current, action) {
        (ProjectStatus::Waiting, ClientAction::SubmitFeedback)
        | (ProjectStatus::Feedback, ClientAction::SubmitFeedback) => {
            Transition::Move(ProjectStatus::Feedback)
        }
        (ProjectStatus::Approved, ClientAction::SubmitFeedback) => {
            Transition::Rejected("project is already approved; feedback is closed")
        }
        (ProjectStatus::Waiting, ClientAction::Approve)
        | (ProjectStatus::Feedback, ClientAction::Approve) => {
            Transition::Move(ProjectStatus::Approved)
        }
        (ProjectStatus::Approved, ClientAction::Approve) => Transition::Noop,
    }
}

/// Status after the studio attaches a new version.
///
/// A revision answers outstanding feedback, so `feedback` returns to
/// `waiting`. A late upload never reopens an approved project.
pub fn status_after_version_attached(current: ProjectStatus) -> ProjectStatus {
    match current {
        ProjectStatus::Waiting | ProjectStatus::Feedback => ProjectStatus::Waiting,
        ProjectStatus::Approved => ProjectStatus::Approved,
    }
}

/// Explicit outcome of a write that the caller must not assume succeeded.
///
/// Status writes report `Persisted` only after the authoritative store
/// accepted them. Outbound notifications are queued and report
/// `QueuedForRetry`; the background dispatcher owns the final result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistOutcome {
    Persisted,
    QueuedForRetry,
    Failed,
}
