// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rota rules for flexirota.
//!
//! Two pieces of logic live here, both pure functions over
//! `flexirota-domain` values:
//!
//! - [`AssignmentEngine`] turns shift templates into concrete shifts by
//!   handing each required role slot to the least-loaded eligible employee.
//! - The swap state machine ([`request_swap`], [`approve`], [`reject`])
//!   moves a shift between two employees once both the recipient and the
//!   organisation's manager have approved.
//!
//! Nothing in this crate touches storage; callers persist the returned
//! values themselves.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod assignment;
mod clock;
mod error;
mod swap;

#[cfg(test)]
mod tests;

pub use assignment::{AssignmentEngine, AssignmentRun, TemplateAssignment};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::CoreError;
pub use swap::{
    SwapOutcome, SwapParty, SwapTransition, approve, is_pending_for, reject, request_swap,
    resolve_party,
};
