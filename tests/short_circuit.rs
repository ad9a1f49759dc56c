//! Parameters are never inspected when the version gate fails.
//!
//! Built only with `--features test-hooks`. Kept as the single test in this
//! binary because the inspection counter is process-wide.

use skeleton_core::parameters::{get_parameter_check_count, reset_parameter_check_count};
use skeleton_core::{decode, validate, Validator, ValidatorConfig};

#[test]
fn version_failure_skips_parameter_inspection() {
    let future = decode(br#"{version: "2.0.0", parameters: [{name: "a", type: "string"}, {name: "b"}]}"#).unwrap();
    let current = decode(br#"{version: "1.0.0", parameters: [{name: "a", type: "string"}, {name: "b", type: "integer"}]}"#).unwrap();
    let collecting = Validator::new(ValidatorConfig { collect_all: true, ..Default::default() });

    reset_parameter_check_count();
    assert!(validate(&future).is_err());
    assert!(!collecting.check(&future).valid);
    assert_eq!(get_parameter_check_count(), 0);

    assert!(validate(&current).is_ok());
    assert!(collecting.check(&current).valid);
    assert_eq!(get_parameter_check_count(), 4);
}
