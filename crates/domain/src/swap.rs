// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The lifecycle position of a swap request, derived from its flags.
///
/// `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapState {
    /// Neither party has approved yet.
    Requested,
    /// The manager has approved, the recipient has not.
    ManagerApproved,
    /// The recipient has approved, the manager has not.
    RecipientApproved,
    /// Both parties approved and the shift has been reassigned.
    Approved,
    /// A party rejected the request.
    Rejected,
}

impl SwapState {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "Requested",
            Self::ManagerApproved => "ManagerApproved",
            Self::RecipientApproved => "RecipientApproved",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl std::fmt::Display for SwapState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request to hand a shift from its current employee to another.
///
/// Completion needs both the manager who owns the shift and the recipient
/// to approve, in either order. `version` increases on every persisted
/// change and guards against lost updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSwapRequest {
    pub request_id: Option<i64>,
    pub shift_id: i64,
    pub requested_by: i64,
    pub requested_to: i64,
    pub reason: Option<String>,
    pub manager_approved: bool,
    pub recipient_approved: bool,
    /// True once both approvals are present.
    pub is_approved: bool,
    pub requested_at: OffsetDateTime,
    pub approved_at: Option<OffsetDateTime>,
    pub rejected_at: Option<OffsetDateTime>,
    pub version: i64,
}

impl ShiftSwapRequest {
    /// Creates a fresh, unapproved request.
    ///
    /// # Arguments
    ///
    /// * `shift_id` - The shift changing hands
    /// * `requested_by` - The employee giving the shift away
    /// * `requested_to` - The employee receiving it
    /// * `reason` - Optional free text from the requester
    /// * `requested_at` - When the request was made
    #[must_use]
    pub const fn new(
        shift_id: i64,
        requested_by: i64,
        requested_to: i64,
        reason: Option<String>,
        requested_at: OffsetDateTime,
    ) -> Self {
        Self {
            request_id: None,
            shift_id,
            requested_by,
            requested_to,
            reason,
            manager_approved: false,
            recipient_approved: false,
            is_approved: false,
            requested_at,
            approved_at: None,
            rejected_at: None,
            version: 0,
        }
    }

    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        self.rejected_at.is_some()
    }

    /// Whether the request has reached a terminal state.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.is_approved || self.is_rejected()
    }

    #[must_use]
    pub const fn state(&self) -> SwapState {
        if self.is_approved {
            SwapState::Approved
        } else if self.is_rejected() {
            SwapState::Rejected
        } else {
            match (self.manager_approved, self.recipient_approved) {
                (true, false) => SwapState::ManagerApproved,
                (false, true) => SwapState::RecipientApproved,
                // Both flags without is_approved is never persisted.
                (true, true) => SwapState::Approved,
                (false, false) => SwapState::Requested,
            }
        }
    }
}
