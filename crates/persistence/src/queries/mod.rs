// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `organisations`: Organisations, roles and users
//! - `schedule`: Shift templates with their requirements, and shifts
//! - `swaps`: Swap requests and the pending-swap view
//! - `availability`: Declared unavailability windows

pub mod availability;
pub mod organisations;
pub mod schedule;
pub mod swaps;
