// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use flexirota_domain::Availability;

use super::{Fixture, create_fixture, create_test_day_range};

#[test]
fn test_availability_lifecycle() {
    let mut fixture: Fixture = create_fixture();
    let user_id: i64 = fixture.employee_id(0);

    let monday: Availability = fixture
        .persistence
        .create_availability(&Availability::new(user_id, create_test_day_range(5)))
        .unwrap();
    let tuesday: Availability = fixture
        .persistence
        .create_availability(&Availability::new(user_id, create_test_day_range(6)))
        .unwrap();

    assert_eq!(
        fixture.persistence.list_availability_by_user(user_id).unwrap(),
        vec![monday.clone(), tuesday.clone()]
    );

    let monday_id: i64 = monday.availability_id.unwrap();
    fixture.persistence.delete_availability(monday_id).unwrap();

    assert!(matches!(
        fixture.persistence.get_availability(monday_id),
        Err(PersistenceError::NotFound(_))
    ));
    assert_eq!(
        fixture
            .persistence
            .get_availability(tuesday.availability_id.unwrap())
            .unwrap(),
        tuesday
    );
}

#[test]
fn test_availability_for_unknown_user_violates_foreign_key() {
    let mut fixture: Fixture = create_fixture();

    let result: Result<Availability, PersistenceError> = fixture
        .persistence
        .create_availability(&Availability::new(999, create_test_day_range(5)));

    assert!(result.is_err());
}
