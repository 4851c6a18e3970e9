//! Error types raised while constructing model nodes.
//!
//! Every failure in this crate is a deterministic consequence of the staged
//! input: nothing here is transient or retryable. A [`ConstructionError`]
//! carries all structural violations detected by one `build()` call, each
//! tagged with the path of the offending field and the [`Rule`] it broke.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Convenience alias used by every builder in the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the model crate.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more structural checks failed during `build()`.
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    /// A repeating field was staged with a null element.
    ///
    /// Builders accept `None` elements when appending or replacing so that the rejection
    /// happens at `build()` time rather than at the call site; this variant is
    /// what that deferred rejection looks like.
    #[error("Repeating element: '{path}' does not permit null elements (building {type_name})")]
    InvalidArgument {
        type_name: &'static str,
        path: String,
    },

    /// A configuration document could not be parsed.
    #[error("Invalid model configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Returns the structural violations if this is a construction error.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Error::Construction(err) => &err.violations,
            _ => &[],
        }
    }
}

/// All violations reported by a single failed `build()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructionError {
    pub type_name: &'static str,
    pub violations: Vec<Violation>,
}

impl ConstructionError {
    pub fn new(type_name: &'static str, violations: Vec<Violation>) -> Self {
        Self {
            type_name,
            violations,
        }
    }

    /// True if some violation of `rule`'s kind was reported against `path`.
    pub fn has(&self, path: &str, kind: RuleKind) -> bool {
        self.violations
            .iter()
            .any(|v| v.path == path && v.rule.kind() == kind)
    }
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to build {} ({} violation{})",
            self.type_name,
            self.violations.len(),
            if self.violations.len() == 1 { "" } else { "s" }
        )?;
        for v in &self.violations {
            write!(f, "; {}", v)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConstructionError {}

/// A single failed check, located by field path (e.g. `Consent.provision.actor[0].reference`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub path: String,
    pub rule: Rule,
}

impl Violation {
    pub fn new(path: impl Into<String>, rule: Rule) -> Self {
        Self {
            path: path.into(),
            rule,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rule {
            Rule::MissingRequired => write!(f, "Missing required element: '{}'", self.path),
            Rule::EmptyRequiredList => {
                write!(f, "Missing required element: '{}' (list must not be empty)", self.path)
            }
            Rule::DisallowedChoiceType { actual, allowed } => write!(
                f,
                "Invalid type: {} for choice element: '{}' must be one of: {:?}",
                actual, self.path, allowed
            ),
            Rule::DisallowedReferenceTarget { actual, allowed } => write!(
                f,
                "Resource type found in reference: '{}' for element: '{}' must be one of: {:?}",
                actual.as_deref().unwrap_or("<none>"),
                self.path,
                allowed
            ),
            Rule::InvalidReference(msg) => {
                write!(f, "Invalid reference for element: '{}': {}", self.path, msg)
            }
            Rule::VacuousNode => write!(
                f,
                "ele-1: All FHIR elements must have a @value or children ('{}')",
                self.path
            ),
            Rule::Prohibited => write!(f, "Element: '{}' is prohibited", self.path),
            Rule::InvalidValue(msg) => write!(f, "Invalid value for '{}': {}", self.path, msg),
        }
    }
}

/// The structural rule a [`Violation`] broke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", content = "detail", rename_all = "kebab-case")]
pub enum Rule {
    MissingRequired,
    EmptyRequiredList,
    DisallowedChoiceType {
        actual: &'static str,
        allowed: &'static [&'static str],
    },
    DisallowedReferenceTarget {
        actual: Option<String>,
        allowed: &'static [&'static str],
    },
    InvalidReference(String),
    VacuousNode,
    Prohibited,
    InvalidValue(String),
}

/// Payload-free discriminant of [`Rule`], handy for assertions and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RuleKind {
    MissingRequired,
    EmptyRequiredList,
    DisallowedChoiceType,
    DisallowedReferenceTarget,
    InvalidReference,
    VacuousNode,
    Prohibited,
    InvalidValue,
}

impl Rule {
    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::MissingRequired => RuleKind::MissingRequired,
            Rule::EmptyRequiredList => RuleKind::EmptyRequiredList,
            Rule::DisallowedChoiceType { .. } => RuleKind::DisallowedChoiceType,
            Rule::DisallowedReferenceTarget { .. } => RuleKind::DisallowedReferenceTarget,
            Rule::InvalidReference(_) => RuleKind::InvalidReference,
            Rule::VacuousNode => RuleKind::VacuousNode,
            Rule::Prohibited => RuleKind::Prohibited,
            Rule::InvalidValue(_) => RuleKind::InvalidValue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_messages() {
        let v = Violation::new("AuditEvent.type", Rule::MissingRequired);
        assert_eq!(v.to_string(), "Missing required element: 'AuditEvent.type'");

        let v = Violation::new(
            "AuditEventDetail.value",
            Rule::DisallowedChoiceType {
                actual: "integer",
                allowed: &["string", "base64Binary"],
            },
        );
        assert!(v.to_string().contains("Invalid type: integer"));
    }

    #[test]
    fn test_construction_error_display_counts() {
        let err = ConstructionError::new(
            "Consent",
            vec![
                Violation::new("Consent.status", Rule::MissingRequired),
                Violation::new("Consent.category", Rule::EmptyRequiredList),
            ],
        );
        let s = err.to_string();
        assert!(s.starts_with("Failed to build Consent (2 violations)"));
        assert!(err.has("Consent.category", RuleKind::EmptyRequiredList));
        assert!(!err.has("Consent.category", RuleKind::MissingRequired));
    }

    #[test]
    fn test_rule_serializes_with_tag() {
        let v = Violation::new("Consent.scope", Rule::MissingRequired);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["path"], "Consent.scope");
        assert_eq!(json["rule"]["rule"], "missing-required");
    }
}
