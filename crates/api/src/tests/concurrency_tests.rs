// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Concurrent swap decisions against a shared database file.

use flexirota_domain::{Shift, User};
use flexirota_persistence::Persistence;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use super::helpers::{World, create_test_now};
use crate::policy::AssignmentPolicy;
use crate::{RequestSwapRequest, ShiftInfo, SwapDecisionResponse, SwapStatus, approve_swap};

static FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

struct TempDatabase {
    path: PathBuf,
}

impl TempDatabase {
    fn new() -> Self {
        let id: u64 = FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
        let path: PathBuf = std::env::temp_dir().join(format!(
            "flexirota_api_{}_{id}.db",
            std::process::id()
        ));
        Self { path }
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut name = self.path.clone().into_os_string();
            name.push(suffix);
            let _ = std::fs::remove_file(name);
        }
    }
}

#[test]
fn test_manager_and_recipient_approving_at_once_complete_the_swap_once() {
    let database: TempDatabase = TempDatabase::new();
    let mut world: World =
        World::with_persistence(Persistence::new_with_file(&database.path).unwrap());
    let alice: User = world.hire("alice", &world.server.clone());
    let bob: User = world.hire("bob", &world.server.clone());
    let shift: ShiftInfo = world.shift(&alice, 12, 8);
    let request_id: i64 = crate::request_swap(
        &mut world.persistence,
        &alice,
        &RequestSwapRequest {
            shift_id: shift.shift_id,
            requested_to: bob.user_id.unwrap(),
            reason: None,
        },
        create_test_now(),
    )
    .unwrap()
    .request_id;

    let barrier: Arc<Barrier> = Arc::new(Barrier::new(2));
    let actors: [User; 2] = [world.manager.clone(), bob.clone()];
    let handles: Vec<thread::JoinHandle<SwapDecisionResponse>> = actors
        .into_iter()
        .map(|actor| {
            let barrier: Arc<Barrier> = Arc::clone(&barrier);
            let path: PathBuf = database.path.clone();
            thread::spawn(move || {
                let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
                barrier.wait();
                approve_swap(
                    &mut persistence,
                    &actor,
                    request_id,
                    &AssignmentPolicy::default(),
                    create_test_now(),
                )
                .unwrap()
            })
        })
        .collect();

    let mut statuses: Vec<SwapStatus> = handles
        .into_iter()
        .map(|h| h.join().unwrap().status)
        .collect();
    statuses.sort_by_key(|s| *s == SwapStatus::Completed);
    assert_eq!(statuses, vec![SwapStatus::Partial, SwapStatus::Completed]);

    let stored: Shift = world.persistence.get_shift(shift.shift_id).unwrap();
    assert_eq!(stored.employee_id, bob.user_id.unwrap());
    let request = world.persistence.get_swap_request(request_id).unwrap();
    assert!(request.is_approved);
    assert_eq!(request.version, 2);
}
