//! Parameter Type Rules
//!
//! Each rule inspects one parameter and reports every problem it finds, in
//! field order (default value first, then enum entries). Callers that want
//! fail-fast behaviour take the first finding.

use std::num::ParseIntError;

use crate::error::ManifestError;
use crate::manifest::{Parameter, ParameterType};

#[cfg(feature = "test-hooks")]
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "test-hooks")]
static PARAMETER_CHECK_COUNT: AtomicU32 = AtomicU32::new(0);

#[cfg(feature = "test-hooks")]
pub fn get_parameter_check_count() -> u32 {
    PARAMETER_CHECK_COUNT.load(Ordering::SeqCst)
}

#[cfg(feature = "test-hooks")]
pub fn reset_parameter_check_count() {
    PARAMETER_CHECK_COUNT.store(0, Ordering::SeqCst);
}

#[inline]
pub(crate) fn note_parameter_checked() {
    #[cfg(feature = "test-hooks")]
    PARAMETER_CHECK_COUNT.fetch_add(1, Ordering::SeqCst);
}

/// Per-parameter rule - produces findings
pub trait ParameterRule {
    fn name(&self) -> &'static str;
    fn check(&self, index: usize, param: &Parameter) -> Vec<ManifestError>;
}

// --- Concrete Rules ---

pub struct TypeRequiredRule;

impl ParameterRule for TypeRequiredRule {
    fn name(&self) -> &'static str { "type_required" }

    fn check(&self, index: usize, param: &Parameter) -> Vec<ManifestError> {
        if param.param_type.is_unset() {
            vec![ManifestError::MissingType {
                index,
                name: param.name.clone(),
            }]
        } else {
            vec![]
        }
    }
}

pub struct IntegerRule;

impl ParameterRule for IntegerRule {
    fn name(&self) -> &'static str { "integer" }

    fn check(&self, index: usize, param: &Parameter) -> Vec<ManifestError> {
        if param.param_type != ParameterType::Integer {
            return vec![];
        }

        let default = Some(&param.default_value).filter(|v| !v.is_empty());

        default
            .into_iter()
            .chain(param.enum_values.iter())
            .filter_map(|value| {
                parse_integer(value).err().map(|source| ManifestError::IntegerParse {
                    index,
                    name: param.name.clone(),
                    value: value.clone(),
                    source,
                })
            })
            .collect()
    }
}

pub struct BooleanRule;

impl ParameterRule for BooleanRule {
    fn name(&self) -> &'static str { "boolean" }

    // An enum makes a boolean parameter invalid no matter what its default
    // says, so that finding is reported first.
    fn check(&self, index: usize, param: &Parameter) -> Vec<ManifestError> {
        if param.param_type != ParameterType::Boolean {
            return vec![];
        }

        let mut findings = vec![];

        if !param.enum_values.is_empty() {
            findings.push(ManifestError::BooleanEnumNotAllowed {
                index,
                name: param.name.clone(),
            });
        }

        if !param.default_value.is_empty() && parse_bool_literal(&param.default_value).is_none() {
            findings.push(ManifestError::BooleanParse {
                index,
                name: param.name.clone(),
                value: param.default_value.clone(),
            });
        }

        findings
    }
}

/// Flags type tags outside the recognized set. Not part of the default
/// rule set: by default such parameters are treated as strings.
pub struct UnrecognizedTypeRule;

impl ParameterRule for UnrecognizedTypeRule {
    fn name(&self) -> &'static str { "unrecognized_type" }

    fn check(&self, index: usize, param: &Parameter) -> Vec<ManifestError> {
        match &param.param_type {
            ParameterType::Unrecognized(tag) => vec![ManifestError::UnknownType {
                index,
                name: param.name.clone(),
                type_tag: tag.clone(),
            }],
            _ => vec![],
        }
    }
}

/// Rules every manifest must pass, in evaluation order.
pub fn core_rules() -> Vec<Box<dyn ParameterRule>> {
    vec![
        Box::new(TypeRequiredRule),
        Box::new(IntegerRule),
        Box::new(BooleanRule),
    ]
}

/// Validate parameters in sequence order; the first failing parameter wins.
pub fn validate_parameters(params: &[Parameter]) -> Result<(), ManifestError> {
    let rules = core_rules();

    for (index, param) in params.iter().enumerate() {
        note_parameter_checked();
        tracing::debug!(index, name = %param.name, param_type = %param.param_type, "checking parameter");

        for rule in &rules {
            if let Some(err) = rule.check(index, param).into_iter().next() {
                return Err(err);
            }
        }
    }

    Ok(())
}

/// Base-10 integer in the platform's native signed range. A leading sign is allowed.
pub fn parse_integer(value: &str) -> Result<isize, ParseIntError> {
    value.parse::<isize>()
}

/// Canonical boolean spellings.
pub fn parse_bool_literal(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(default: &str) -> Parameter {
        Parameter::new("port", "integer").with_default(default)
    }

    #[test]
    fn test_missing_type() {
        let params = vec![Parameter::new("ok", "string"), Parameter::new("bad", "")];
        let err = validate_parameters(&params).unwrap_err();
        assert!(matches!(err, ManifestError::MissingType { index: 1, ref name } if name == "bad"));
    }

    #[test]
    fn test_integer_default() {
        assert!(validate_parameters(&[int("42")]).is_ok());
        assert!(validate_parameters(&[int("-7")]).is_ok());
        assert!(validate_parameters(&[int("+7")]).is_ok());
        assert!(validate_parameters(&[int("")]).is_ok());
        for bad in ["abc", "4.2", "1,000", " 42", "0x10", "99999999999999999999999"] {
            let err = validate_parameters(&[int(bad)]).unwrap_err();
            assert!(matches!(err, ManifestError::IntegerParse { .. }), "{bad}");
        }
    }

    #[test]
    fn test_integer_enum_first_failure_wins() {
        let p = Parameter::new("n", "integer").with_enum(["1", "two", "three"]);
        match validate_parameters(&[p]).unwrap_err() {
            ManifestError::IntegerParse { value, .. } => assert_eq!(value, "two"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_integer_default_checked_before_enum() {
        let p = Parameter::new("n", "integer").with_default("x").with_enum(["y"]);
        match validate_parameters(&[p]).unwrap_err() {
            ManifestError::IntegerParse { value, .. } => assert_eq!(value, "x"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_integer_rule_reports_every_bad_value() {
        let p = Parameter::new("n", "integer").with_default("x").with_enum(["1", "y", "z"]);
        assert_eq!(IntegerRule.check(0, &p).len(), 3);
    }

    #[test]
    fn test_boolean_default_literals() {
        for ok in ["true", "false", "1", "0", "t", "f", "T", "F", "TRUE", "FALSE", "True", "False"] {
            let p = Parameter::new("flag", "boolean").with_default(ok);
            assert!(validate_parameters(&[p]).is_ok(), "{ok}");
        }
        for bad in ["yes", "no", "tRuE", "2", "on"] {
            let p = Parameter::new("flag", "boolean").with_default(bad);
            let err = validate_parameters(&[p]).unwrap_err();
            assert!(matches!(err, ManifestError::BooleanParse { .. }), "{bad}");
        }
    }

    #[test]
    fn test_boolean_enum_rejected_regardless_of_default() {
        for default in ["", "true", "maybe"] {
            let p = Parameter::new("flag", "boolean").with_default(default).with_enum(["true", "false"]);
            let err = validate_parameters(&[p]).unwrap_err();
            assert!(matches!(err, ManifestError::BooleanEnumNotAllowed { .. }), "{default}");
        }
    }

    #[test]
    fn test_string_accepts_anything() {
        let p = Parameter::new("s", "string").with_default("4.2 + anything").with_enum(["", "x", "42", "true"]);
        assert!(validate_parameters(&[p]).is_ok());
    }

    #[test]
    fn test_unrecognized_type_treated_as_string() {
        let p = Parameter::new("f", "float").with_default("abc").with_enum(["x"]);
        assert!(validate_parameters(&[p.clone()]).is_ok());
        assert_eq!(UnrecognizedTypeRule.check(2, &p).len(), 1);
    }

    #[test]
    fn test_empty_parameter_list() {
        assert!(validate_parameters(&[]).is_ok());
    }
}
