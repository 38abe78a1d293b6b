// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Every multi-row write runs inside a single transaction. Swap
//! transitions additionally take the write lock up front and check the
//! request's version so that two concurrent approvals cannot both apply.
//!
//! ## Module Organization
//!
//! - `organisations`: Organisations, roles and users
//! - `schedule`: Templates, shifts and committing an assignment
//! - `swaps`: Opening requests and persisting transitions
//! - `availability`: Declared unavailability windows

pub mod availability;
pub mod organisations;
pub mod schedule;
pub mod swaps;
