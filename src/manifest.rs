//! Manifest Model - what a template exposes for instantiation
//!
//! A manifest is decoded from the template's YAML metadata file, validated,
//! and discarded. Parameter order is prompt order and is never normalized.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::ManifestError;

/// Metadata for one template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Manifest {
    #[serde(deserialize_with = "nullable")]
    pub version: String,
    #[serde(deserialize_with = "nullable")]
    pub parameters: Vec<Parameter>,
}

/// One substitution variable a template exposes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Parameter {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub prompt: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub param_type: ParameterType,
    #[serde(rename = "enum", deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub default_value: String,
}

/// YAML `~` decodes to the field's zero value, same as an absent key.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parameter type tag.
///
/// The wire form is a free string. `Unset` is the empty tag and
/// `Unrecognized` keeps any other text verbatim so encoding stays lossless.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParameterType {
    #[default]
    Unset,
    String,
    Integer,
    Boolean,
    Unrecognized(String),
}

impl ParameterType {
    pub const STRING: &'static str = "string";
    pub const INTEGER: &'static str = "integer";
    pub const BOOLEAN: &'static str = "boolean";

    /// The three tags templates may declare.
    pub const RECOGNIZED: [&'static str; 3] = [Self::STRING, Self::INTEGER, Self::BOOLEAN];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Unset => "",
            Self::String => Self::STRING,
            Self::Integer => Self::INTEGER,
            Self::Boolean => Self::BOOLEAN,
            Self::Unrecognized(tag) => tag,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl From<String> for ParameterType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "" => Self::Unset,
            Self::STRING => Self::String,
            Self::INTEGER => Self::Integer,
            Self::BOOLEAN => Self::Boolean,
            _ => Self::Unrecognized(tag),
        }
    }
}

impl From<&str> for ParameterType {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<ParameterType> for String {
    fn from(t: ParameterType) -> Self {
        match t {
            ParameterType::Unrecognized(tag) => tag,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode raw manifest bytes. Purely structural: no semantic checks.
pub fn decode(bytes: &[u8]) -> Result<Manifest, ManifestError> {
    Manifest::from_slice(bytes)
}

impl Manifest {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ManifestError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_slice(bytes)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ManifestError> {
        Self::from_slice(s.as_bytes())
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

impl Parameter {
    pub fn new(name: impl Into<String>, param_type: impl Into<ParameterType>) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            ..Default::default()
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }
}
