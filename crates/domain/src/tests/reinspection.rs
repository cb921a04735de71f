// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ComplianceDecision, reinspection_due_date};
use time::macros::date;

#[test]
fn test_compliant_due_date_is_912_days_out() {
    let due = reinspection_due_date(ComplianceDecision::Compliant, date!(2024 - 01 - 01)).unwrap();
    assert_eq!(due, date!(2026 - 07 - 01));
}

#[test]
fn test_non_compliant_due_date_is_365_days_out() {
    let due =
        reinspection_due_date(ComplianceDecision::NonCompliant, date!(2024 - 01 - 01)).unwrap();
    assert_eq!(due, date!(2024 - 12 - 31));
}

#[test]
fn test_due_date_overflow_is_an_error() {
    let result = reinspection_due_date(ComplianceDecision::Compliant, time::Date::MAX);
    assert!(result.is_err());
}
