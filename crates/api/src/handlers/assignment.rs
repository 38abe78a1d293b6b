// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use flexirota::{AssignmentEngine, TemplateAssignment};
use flexirota_domain::{Shift, ShiftTemplate, User, compute_workloads};
use flexirota_persistence::Persistence;
use std::collections::HashMap;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use super::{actor_id, store_error, to_infos};
use crate::auth::AuthorizationService;
use crate::error::{ApiError, translate_core_error};
use crate::policy::AssignmentPolicy;
use crate::request_response::AutoAssignResponse;

/// Staffs every open template of the acting manager.
///
/// Workloads are computed once from the organisation's shifts in the
/// policy's lookback window. Templates are then staffed in creation order,
/// least-loaded eligible employee first, and each fully staffed template
/// is committed (its shifts stored, the template deleted) before the next
/// one is attempted.
///
/// If a template cannot be staffed the call fails with
/// `InsufficientCandidates`. Templates committed earlier in the same call
/// stay committed; the failed template and those after it stay open.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `actor` - The acting user, who must be a manager of an organisation
/// * `policy` - The workload window to apply
/// * `now` - The instant workloads are measured at
///
/// # Errors
///
/// Returns an error if the actor is not a manager, a requirement cannot be
/// met, or persistence fails.
pub fn auto_assign(
    persistence: &mut Persistence,
    actor: &User,
    policy: &AssignmentPolicy,
    now: OffsetDateTime,
) -> Result<AutoAssignResponse, ApiError> {
    let organisation_id: i64 = AuthorizationService::require_manager(actor, "auto_assign")?;
    let manager_id: i64 = actor_id(actor)?;

    let templates: Vec<ShiftTemplate> = persistence
        .list_shift_templates_by_manager(manager_id)
        .map_err(store_error("Shift template"))?;
    let employees: Vec<User> = persistence
        .list_employees_by_organisation(organisation_id)
        .map_err(store_error("User"))?;

    let window: Duration = policy.workload_window();
    let since: OffsetDateTime = now.checked_sub(window).ok_or_else(|| ApiError::Internal {
        message: String::from("Workload window reaches before the representable range"),
    })?;
    let employee_ids: Vec<i64> = employees.iter().filter_map(|e| e.user_id).collect();
    let history: Vec<Shift> = persistence
        .list_shifts_for_employees_since(&employee_ids, since)
        .map_err(store_error("Shift"))?;
    let workloads: HashMap<i64, Duration> = compute_workloads(&employees, &history, now, window);

    debug!(
        manager_id,
        templates = templates.len(),
        employees = employees.len(),
        history = history.len(),
        "Starting auto-assign"
    );

    let mut engine: AssignmentEngine = AssignmentEngine::new(workloads);
    let mut created: Vec<Shift> = Vec::new();
    for template in &templates {
        let assignment: TemplateAssignment =
            match engine.assign_template(organisation_id, template, &employees) {
                Ok(assignment) => assignment,
                Err(err) => {
                    warn!(
                        manager_id,
                        template_id = template.template_id,
                        committed = created.len(),
                        error = %err,
                        "Auto-assign stopped"
                    );
                    return Err(translate_core_error(err));
                }
            };
        let saved: Vec<Shift> = persistence
            .commit_template_assignment(&assignment)
            .map_err(store_error("Shift template"))?;
        created.extend(saved);
    }

    info!(
        manager_id,
        templates = templates.len(),
        shifts = created.len(),
        "Auto-assign completed"
    );
    Ok(AutoAssignResponse {
        created: to_infos(&created)?,
    })
}
