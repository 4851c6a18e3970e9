mod common;

use std::cell::RefCell;
use std::collections::HashMap;

use atrius_fhir_model::constraint::{ConstraintEngine, FhirValidate, Severity};
use atrius_fhir_model::prelude::*;
use common::*;

/// Answers by expression text; anything not listed holds.
#[derive(Default)]
struct ScriptedEngine {
    answers: HashMap<&'static str, Result<bool, String>>,
    seen: RefCell<Vec<(&'static str, String)>>,
}

impl ScriptedEngine {
    fn answer(mut self, expr: &'static str, result: Result<bool, String>) -> Self {
        self.answers.insert(expr, result);
        self
    }
}

impl ConstraintEngine for ScriptedEngine {
    fn eval_bool(&self, focus: &dyn Visitable, expr: &str) -> Result<bool, String> {
        self.seen
            .borrow_mut()
            .push((focus.type_name(), expr.to_string()));
        self.answers.get(expr).cloned().unwrap_or(Ok(true))
    }
}

fn keys(invariants: &[atrius_fhir_model::constraint::Invariant]) -> Vec<&'static str> {
    invariants.iter().map(|i| i.key).collect()
}

#[test]
fn test_consent_invariant_table() {
    assert_eq!(
        keys(Consent::invariants()),
        vec!["ppc-1", "ppc-2", "ppc-3", "ppc-4", "ppc-5", "consent-6", "consent-7", "consent-8"]
    );
    let (rules, warnings): (Vec<&atrius_fhir_model::constraint::Invariant>, Vec<_>) = Consent::invariants()
        .iter()
        .partition(|i| i.severity == Severity::Error);
    assert!(rules.iter().all(|i| i.key.starts_with("ppc-")));
    assert!(warnings.iter().all(|i| i.key.starts_with("consent-")));
    assert!(Consent::invariants().iter().all(|i| i.path == "Consent"));

    assert_eq!(keys(ConsentProvisionActor::field_invariants()), vec!["consent-9"]);
    assert_eq!(
        keys(ConsentProvision::field_invariants()),
        vec!["consent-10", "consent-11", "consent-12"]
    );

    let status = Consent::bindings()
        .iter()
        .find(|b| b.path == "Consent.status")
        .unwrap();
    assert_eq!(status.strength, "required");
    assert!(status.value_set.ends_with("|4.3.0"));
}

#[test]
fn test_audit_event_invariant_table() {
    assert_eq!(
        keys(AuditEvent::invariants()),
        vec!["auditEvent-2", "auditEvent-3", "auditEvent-4"]
    );
    assert!(
        AuditEvent::invariants()
            .iter()
            .all(|i| i.severity == Severity::Warning)
    );
    assert_eq!(
        keys(AuditEventAgent::field_invariants()),
        vec!["auditEvent-5", "auditEvent-6", "auditEvent-7"]
    );
    assert_eq!(keys(AuditEventSource::field_invariants()), vec!["auditEvent-8"]);
    assert_eq!(keys(AuditEventEntity::invariants()), vec!["sev-1"]);
    assert_eq!(
        keys(AuditEventEntity::field_invariants()),
        vec!["auditEvent-9", "auditEvent-10", "auditEvent-11", "auditEvent-12"]
    );
    assert!(AuditEvent::bindings().iter().any(|b| b.path == "AuditEvent.type"));
}

#[test]
fn test_all_invariants_hold() {
    let consent = consent().build().unwrap();
    let engine = ScriptedEngine::default();
    assert!(consent.validate_with_engine(&engine).is_empty());

    let seen = engine.seen.borrow();
    assert_eq!(seen.len(), 8);
    assert!(seen.iter().all(|(focus, _)| *focus == "Consent"));
}

#[test]
fn test_failed_invariant_is_reported() {
    let consent = consent().build().unwrap();
    let engine = ScriptedEngine::default()
        .answer("policy.exists() or policyRule.exists()", Ok(false));

    let issues = consent.validate_with_engine(&engine);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].key, "ppc-1");
    assert_eq!(issues[0].instance_path, "Consent");
    assert_eq!(issues[0].message, "Either a Policy or PolicyRule");

    let json = serde_json::to_value(&issues[0]).unwrap();
    assert_eq!(json["instancePath"], "Consent");
    assert_eq!(json["severity"], "error");
}

#[test]
fn test_engine_error_is_reported_as_failure() {
    init_tracing();

    let entity = AuditEventEntity::builder()
        .what(reference("Patient/p1"))
        .build()
        .unwrap();
    let expr = AuditEventEntity::invariants()[0].expr;
    let engine = ScriptedEngine::default().answer(expr, Err("unsupported function".into()));

    let issues = entity.validate_with_engine(&engine);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].key, "sev-1");
    assert!(issues[0].message.contains("evaluation failed: unsupported function"));
}

#[test]
fn test_policy_carries_no_invariants() {
    assert!(ConsentPolicy::invariants().is_empty());
    assert!(ConsentPolicy::field_invariants().is_empty());

    let policy = ConsentPolicy::builder()
        .uri(Uri::from("http://example.org/policy"))
        .build()
        .unwrap();
    let consent = consent().policy(policy.clone()).build().unwrap();
    let engine = ScriptedEngine::default()
        .answer("policy.exists() or policyRule.exists()", Ok(false));

    let issues = consent.validate_with_engine(&engine);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].path, "Consent");
    assert!(policy.validate_with_engine(&engine).is_empty());
}

#[test]
fn test_field_invariant_runs_once_per_value() {
    let source = AuditEventSource::builder()
        .observer(reference("Device/d1"))
        .r#type(coding("1"))
        .r#type(coding("4"))
        .build()
        .unwrap();
    let expr = AuditEventSource::field_invariants()[0].expr;
    let engine = ScriptedEngine::default().answer(expr, Ok(false));

    let issues = source.validate_with_engine(&engine);
    let paths: Vec<_> = issues.iter().map(|i| i.instance_path.as_str()).collect();
    assert_eq!(paths, vec!["AuditEvent.source.type[0]", "AuditEvent.source.type[1]"]);
    assert!(issues.iter().all(|i| i.key == "auditEvent-8"));
    assert!(issues.iter().all(|i| i.severity == Severity::Warning));

    let seen = engine.seen.borrow();
    assert!(seen.iter().all(|(focus, _)| *focus == "Coding"));
}

#[test]
fn test_field_invariant_skips_absent_values() {
    let entity = AuditEventEntity::builder()
        .what(reference("Patient/p1"))
        .role(coding("1"))
        .build()
        .unwrap();
    let engine = ScriptedEngine::default();
    assert!(entity.validate_with_engine(&engine).is_empty());

    // sev-1 on the entity plus auditEvent-10 on the one populated coded field
    let seen = engine.seen.borrow();
    let foci: Vec<_> = seen.iter().map(|(focus, _)| *focus).collect();
    assert_eq!(foci, vec!["AuditEvent.entity", "Coding"]);
}

#[test]
fn test_required_field_invariant_reports_element_path() {
    let actor = actor("PROV", "Practitioner/pr1");
    let expr = ConsentProvisionActor::field_invariants()[0].expr;
    let engine = ScriptedEngine::default().answer(expr, Ok(false));

    let issues = actor.validate_with_engine(&engine);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].key, "consent-9");
    assert_eq!(issues[0].path, "Consent.provision.actor.role");
    assert_eq!(issues[0].instance_path, "Consent.provision.actor.role");
}
