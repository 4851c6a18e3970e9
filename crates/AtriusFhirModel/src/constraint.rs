//! Constraint metadata attached to model types.
//!
//! `#[derive(FhirValidate)]` turns `#[fhir_invariant(...)]` and
//! `#[fhir_binding(...)]` attributes into static tables. Evaluating an
//! invariant's expression needs an expression engine, which this crate does
//! not ship; callers plug one in through [`ConstraintEngine`].

use serde::Serialize;

use crate::visitor::Visitable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A named rule over an element, expressed in FHIRPath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Invariant {
    pub key: &'static str,
    pub severity: Severity,
    pub human: &'static str,
    pub expr: &'static str,
    /// Element the rule is defined on, e.g. `Consent` or `AuditEvent.entity`.
    pub path: &'static str,
}

/// Terminology binding of a coded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub name: &'static str,
    /// `required`, `extensible`, `preferred` or `example`.
    pub strength: &'static str,
    pub value_set: &'static str,
    pub description: &'static str,
    pub path: &'static str,
}

/// One failed (or unevaluable) invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintIssue {
    pub key: &'static str,
    pub severity: Severity,
    pub path: &'static str,
    pub instance_path: String,
    pub expression: &'static str,
    pub message: String,
}

/// Evaluates invariant expressions against a node.
pub trait ConstraintEngine {
    fn eval_bool(&self, focus: &dyn Visitable, expr: &str) -> Result<bool, String>;
}

pub trait FhirValidate {
    /// Invariants declared on the type itself.
    fn invariants() -> &'static [Invariant];

    /// Invariants declared on individual fields, evaluated with each value of
    /// the field as focus.
    fn field_invariants() -> &'static [Invariant];

    /// Bindings declared on the type's coded fields.
    fn bindings() -> &'static [Binding];

    /// Runs every invariant of this type (type-level and field-level) through
    /// `engine`. Nested types are not visited.
    fn validate_with_engine(&self, engine: &dyn ConstraintEngine) -> Vec<ConstraintIssue>;
}

/// Evaluates one invariant against `focus` and records an issue when it does
/// not hold. An engine error is recorded as a failure carrying the error text.
#[doc(hidden)]
pub fn evaluate_invariant(
    engine: &dyn ConstraintEngine,
    focus: &dyn Visitable,
    invariant: &Invariant,
    instance_path: String,
    issues: &mut Vec<ConstraintIssue>,
) {
    let message = match engine.eval_bool(focus, invariant.expr) {
        Ok(true) => return,
        Ok(false) => invariant.human.to_string(),
        Err(e) => {
            tracing::warn!(key = invariant.key, error = %e, "Invariant could not be evaluated");
            format!("{} (evaluation failed: {})", invariant.human, e)
        }
    };
    issues.push(ConstraintIssue {
        key: invariant.key,
        severity: invariant.severity,
        path: invariant.path,
        instance_path,
        expression: invariant.expr,
        message,
    });
}
