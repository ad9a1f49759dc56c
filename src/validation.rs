//! Manifest Validation - version gate, then parameter rules
//!
//! The version is always checked first and a failure there ends the pass:
//! parameter semantics are only meaningful for a version this engine
//! understands. This holds in every mode, including `collect_all`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::{Policy, ValidatorConfig};
use crate::error::ManifestError;
use crate::hashing::manifest_digest;
use crate::manifest::{decode, Manifest, Parameter};
use crate::parameters::{core_rules, note_parameter_checked, validate_parameters, ParameterRule, UnrecognizedTypeRule};
use crate::version::check_version;

/// Validate a manifest with the default rules: first failure wins.
pub fn validate(manifest: &Manifest) -> Result<(), ManifestError> {
    check_version(&manifest.version)?;
    validate_parameters(&manifest.parameters)
}

/// Decode then validate. Returns the manifest only if it is valid.
pub fn decode_and_validate(bytes: &[u8]) -> Result<Manifest, ManifestError> {
    let manifest = decode(bytes)?;
    validate(&manifest)?;
    Ok(manifest)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParameterRef {
    pub index: usize,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    pub rule: String,
    pub severity: ViolationSeverity,
    pub kind: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<ParameterRef>,
}

impl Violation {
    fn new(rule: &str, severity: ViolationSeverity, error: &ManifestError) -> Self {
        Self {
            rule: rule.to_string(),
            severity,
            kind: error.kind().to_string(),
            message: error.to_string(),
            parameter: error.parameter().map(|(index, name)| ParameterRef {
                index,
                name: name.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub manifest_version: String,
    pub parameter_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    fn new(manifest: &Manifest, violations: Vec<Violation>) -> Self {
        let valid = !violations.iter().any(|v| v.severity == ViolationSeverity::Error);
        Self {
            valid,
            manifest_version: manifest.version.clone(),
            parameter_count: manifest.parameters.len(),
            digest: manifest_digest(manifest).ok(),
            violations,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.severity == ViolationSeverity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.severity == ViolationSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.severity == ViolationSeverity::Warning)
    }
}

struct Finding {
    rule: &'static str,
    severity: ViolationSeverity,
    error: ManifestError,
}

/// Validator orchestrates the version gate, rules, and policies
pub struct Validator {
    config: ValidatorConfig,
    rules: Vec<Box<dyn ParameterRule>>,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        let mut rules = core_rules();
        rules.push(Box::new(UnrecognizedTypeRule));
        Self { config, rules }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Fail-fast validation honouring the configured policies.
    pub fn validate(&self, manifest: &Manifest) -> Result<(), ManifestError> {
        check_version(&manifest.version)?;

        let mut findings = vec![];
        self.scan(&manifest.parameters, false, &mut findings);

        match findings.into_iter().find(|f| f.severity == ViolationSeverity::Error) {
            Some(finding) => Err(finding.error),
            None => Ok(()),
        }
    }

    /// Build a report. Never fails: every problem becomes a violation.
    pub fn check(&self, manifest: &Manifest) -> ValidationReport {
        if let Err(err) = check_version(&manifest.version) {
            tracing::debug!(error = %err, "version gate failed, parameters not inspected");
            let violation = Violation::new("version", ViolationSeverity::Error, &err);
            return ValidationReport::new(manifest, vec![violation]);
        }

        let mut findings = vec![];
        self.scan(&manifest.parameters, self.config.collect_all, &mut findings);

        let violations = findings
            .iter()
            .map(|f| Violation::new(f.rule, f.severity.clone(), &f.error))
            .collect();

        ValidationReport::new(manifest, violations)
    }

    /// Walk parameters in order, routing each finding through its policy.
    /// Stops after the first error unless `collect` is set.
    fn scan(&self, params: &[Parameter], collect: bool, sink: &mut Vec<Finding>) {
        let mut seen: HashMap<&str, usize> = HashMap::new();

        for (index, param) in params.iter().enumerate() {
            note_parameter_checked();
            tracing::debug!(index, name = %param.name, param_type = %param.param_type, "checking parameter");

            let mut found = vec![];

            if !param.name.is_empty() {
                if let Some(&first) = seen.get(param.name.as_str()) {
                    found.push((
                        "unique_name",
                        ManifestError::DuplicateName {
                            index,
                            name: param.name.clone(),
                            first,
                        },
                    ));
                } else {
                    seen.insert(param.name.as_str(), index);
                }
            }

            for rule in &self.rules {
                found.extend(rule.check(index, param).into_iter().map(|e| (rule.name(), e)));
            }

            for (rule, error) in found {
                let severity = match self.config.policy_for(&error) {
                    Policy::Allow => continue,
                    Policy::Warn => {
                        tracing::warn!(rule, error = %error, "manifest warning");
                        ViolationSeverity::Warning
                    }
                    Policy::Reject => ViolationSeverity::Error,
                };

                let stop = severity == ViolationSeverity::Error && !collect;
                sink.push(Finding { rule, severity, error });
                if stop {
                    return;
                }
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}
