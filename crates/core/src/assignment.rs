// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Greedy least-loaded assignment of employees to shift templates.
//!
//! Templates are staffed one at a time. For every requirement the eligible
//! employees are ordered by their running workload and the lightest are
//! picked, so later requirements and templates see the load added by
//! earlier ones. A template is all-or-nothing: if any requirement cannot be
//! filled, none of its shifts are produced and no workload is recorded.

use crate::error::CoreError;
use flexirota_domain::{DomainError, RoleRequirement, Shift, ShiftTemplate, User};
use std::collections::{HashMap, HashSet};
use time::Duration;

/// The shifts produced for one fully staffed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateAssignment {
    /// The template that was consumed.
    pub template_id: i64,
    /// One unsaved shift per filled slot, in requirement order.
    pub shifts: Vec<Shift>,
}

/// The outcome of planning a whole auto-assign call in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRun {
    /// Templates staffed before the first failure, in processing order.
    pub completed: Vec<TemplateAssignment>,
    /// The error that stopped the run, if any.
    pub failure: Option<CoreError>,
}

impl AssignmentRun {
    /// Total number of shifts across all completed templates.
    #[must_use]
    pub fn shift_count(&self) -> usize {
        self.completed.iter().map(|t| t.shifts.len()).sum()
    }
}

/// Running workload state for one auto-assign call.
#[derive(Debug, Clone, Default)]
pub struct AssignmentEngine {
    workloads: HashMap<i64, Duration>,
}

impl AssignmentEngine {
    /// Creates an engine seeded with each employee's recent workload.
    ///
    /// Employees missing from `workloads` are treated as having none.
    #[must_use]
    pub const fn new(workloads: HashMap<i64, Duration>) -> Self {
        Self { workloads }
    }

    /// The current running workload of `employee_id`.
    #[must_use]
    pub fn workload_of(&self, employee_id: i64) -> Duration {
        self.workloads
            .get(&employee_id)
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    /// Staffs a single template.
    ///
    /// Requirements are processed in requirement-id order. Candidates for a
    /// requirement are employees of `organisation_id` whose job title is the
    /// required role and who are not already on this template. They are
    /// ordered by running workload, ties broken by user id.
    ///
    /// On success the template's duration is added to the workload of every
    /// chosen employee. On failure the engine is left untouched.
    ///
    /// # Arguments
    ///
    /// * `organisation_id` - The organisation of the template's manager
    /// * `template` - The template to staff
    /// * `employees` - The candidate pool
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The template has not been persisted
    /// - A requirement has fewer eligible candidates than its quantity
    pub fn assign_template(
        &mut self,
        organisation_id: i64,
        template: &ShiftTemplate,
        employees: &[User],
    ) -> Result<TemplateAssignment, CoreError> {
        let template_id: i64 = template
            .template_id
            .ok_or(DomainError::MissingIdentifier {
                entity: "ShiftTemplate",
            })?;
        let duration: Duration = template.time_range.duration();

        let mut pool: Vec<(i64, &User)> = employees
            .iter()
            .filter_map(|u| u.user_id.map(|id| (id, u)))
            .collect();
        pool.sort_by_key(|(id, _)| *id);

        let mut requirements: Vec<&RoleRequirement> = template.requirements.iter().collect();
        requirements.sort_by_key(|r| r.requirement_id);

        let mut assigned_users: HashSet<i64> = HashSet::new();
        let mut staged: HashMap<i64, Duration> = HashMap::new();
        let mut shifts: Vec<Shift> = Vec::with_capacity(requirements.len());

        for requirement in requirements {
            let mut candidates: Vec<i64> = pool
                .iter()
                .filter(|(id, user)| {
                    user.can_fill(requirement.role_id, organisation_id)
                        && !assigned_users.contains(id)
                })
                .map(|(id, _)| *id)
                .collect();

            // Stable sort keeps the user-id order among equal workloads.
            candidates.sort_by_key(|id| {
                self.workload_of(*id) + staged.get(id).copied().unwrap_or(Duration::ZERO)
            });

            let required: usize = usize::try_from(requirement.quantity).unwrap_or(usize::MAX);
            if candidates.len() < required {
                return Err(CoreError::InsufficientCandidates {
                    role_id: requirement.role_id,
                    role_name: requirement.role_name.clone(),
                    template_id,
                    required: requirement.quantity,
                    available: candidates.len(),
                });
            }

            for employee_id in candidates.into_iter().take(required) {
                shifts.push(Shift::new(
                    employee_id,
                    template.manager_id,
                    template.time_range,
                ));
                assigned_users.insert(employee_id);
                *staged.entry(employee_id).or_insert(Duration::ZERO) += duration;
            }
        }

        for (employee_id, added) in staged {
            *self.workloads.entry(employee_id).or_insert(Duration::ZERO) += added;
        }

        Ok(TemplateAssignment {
            template_id,
            shifts,
        })
    }

    /// Plans a whole auto-assign call.
    ///
    /// Templates are processed in template-id order and the run stops at
    /// the first template that cannot be staffed. Templates completed before
    /// the failure are still reported.
    #[must_use]
    pub fn plan(
        &mut self,
        organisation_id: i64,
        templates: &[ShiftTemplate],
        employees: &[User],
    ) -> AssignmentRun {
        let mut ordered: Vec<&ShiftTemplate> = templates.iter().collect();
        ordered.sort_by_key(|t| t.template_id);

        let mut completed: Vec<TemplateAssignment> = Vec::new();
        for template in ordered {
            match self.assign_template(organisation_id, template, employees) {
                Ok(assignment) => completed.push(assignment),
                Err(err) => {
                    return AssignmentRun {
                        completed,
                        failure: Some(err),
                    };
                }
            }
        }

        AssignmentRun {
            completed,
            failure: None,
        }
    }
}
