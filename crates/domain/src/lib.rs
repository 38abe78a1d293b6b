// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod error;
mod schedule;
mod swap;
mod time_range;
mod types;
mod validation;
mod workload;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use schedule::{Availability, RoleRequirement, Shift, ShiftTemplate};
pub use swap::{ShiftSwapRequest, SwapState};
pub use time_range::{TimeRange, TimeRangeParts};
pub use types::{Organisation, Role, User, UserRole};
pub use validation::{
    validate_name, validate_requirements, validate_shift_template, validate_user_fields,
    validate_username,
};
pub use workload::{DEFAULT_WORKLOAD_WINDOW, compute_workloads, workload};
