mod common;

use atrius_fhir_model::Error;
use atrius_fhir_model::error::RuleKind;
use atrius_fhir_model::prelude::*;
use common::*;

#[test]
fn test_audit_event_reports_every_missing_required_field() {
    init_tracing();

    let err = AuditEvent::builder()
        .outcome(Code::from("0"))
        .build()
        .unwrap_err();

    let violations = err.violations();
    assert_eq!(violations.len(), 4, "{err}");
    let reported: Vec<_> = violations
        .iter()
        .map(|v| (v.path.as_str(), v.rule.kind()))
        .collect();
    assert_eq!(
        reported,
        vec![
            ("AuditEvent.type", RuleKind::MissingRequired),
            ("AuditEvent.recorded", RuleKind::MissingRequired),
            ("AuditEvent.agent", RuleKind::EmptyRequiredList),
            ("AuditEvent.source", RuleKind::MissingRequired),
        ]
    );
}

#[test]
fn test_complete_audit_event_builds() {
    let event = audit_event().build().unwrap();
    assert_eq!(event.r#type().code().and_then(|c| c.as_str()), Some("rest"));
    assert_eq!(event.source().observer().target_type(), Some("Device"));
}

#[test]
fn test_consent_actor_reference_type_is_checked() {
    let patient = ConsentProvisionActor::builder()
        .role(concept("PRCP"))
        .reference(typed_reference("Patient", "Peter"))
        .build();
    assert!(patient.is_ok());

    let err = ConsentProvisionActor::builder()
        .role(concept("PRCP"))
        .reference(typed_reference("Foo", "Nobody"))
        .build()
        .unwrap_err();
    assert_eq!(err.violations().len(), 1);
    assert_eq!(err.violations()[0].path, "Consent.provision.actor.reference");
    assert_eq!(
        err.violations()[0].rule.kind(),
        RuleKind::DisallowedReferenceTarget
    );
}

#[test]
fn test_consent_actor_without_declared_type_is_accepted() {
    let untyped = Reference::builder()
        .display(FhirString::from("Someone"))
        .build()
        .unwrap();
    let actor = ConsentProvisionActor::builder()
        .role(concept("PRCP"))
        .reference(untyped)
        .build();
    assert!(actor.is_ok());
}

#[test]
fn test_consent_category_needs_at_least_one_element() {
    let err = Consent::builder()
        .status(Code::from("active"))
        .scope(concept("patient-privacy"))
        .build()
        .unwrap_err();
    assert_eq!(err.violations().len(), 1);
    assert_eq!(err.violations()[0].path, "Consent.category");
    assert_eq!(err.violations()[0].rule.kind(), RuleKind::EmptyRequiredList);

    let consent = Consent::builder()
        .status(Code::from("active"))
        .scope(concept("patient-privacy"))
        .category(concept("59284-0"))
        .build()
        .unwrap();
    assert_eq!(consent.category().len(), 1);
}

#[test]
fn test_primitive_checks_wait_for_required_fields() {
    let incomplete = Consent::builder()
        .id(Id::from("not a valid id!"))
        .status(Code::from("active"))
        .scope(concept("patient-privacy"));

    let err = incomplete.clone().build().unwrap_err();
    let reported: Vec<_> = err
        .violations()
        .iter()
        .map(|v| (v.path.as_str(), v.rule.kind()))
        .collect();
    assert_eq!(reported, vec![("Consent.category", RuleKind::EmptyRequiredList)]);

    let err = incomplete.category(concept("59284-0")).build().unwrap_err();
    let reported: Vec<_> = err
        .violations()
        .iter()
        .map(|v| (v.path.as_str(), v.rule.kind()))
        .collect();
    assert_eq!(reported, vec![("Consent.id", RuleKind::InvalidValue)]);
}

#[test]
fn test_consent_category_replaced_with_empty_list_fails() {
    let err = consent().categories(Vec::<CodeableConcept>::new()).build().unwrap_err();
    assert!(matches!(&err, Error::Construction(c) if c.has("Consent.category", RuleKind::EmptyRequiredList)));
}

#[test]
fn test_audit_event_detail_value_is_required() {
    let err = AuditEventEntityDetail::builder()
        .r#type(FhirString::from("requested-format"))
        .build()
        .unwrap_err();
    assert_eq!(err.violations().len(), 1);
    assert_eq!(err.violations()[0].path, "AuditEvent.entity.detail.value");
    assert_eq!(err.violations()[0].rule.kind(), RuleKind::MissingRequired);

    let detail = AuditEventEntityDetail::builder()
        .r#type(FhirString::from("requested-format"))
        .value(FhirString::from("json"))
        .build()
        .unwrap();
    assert!(matches!(detail.value(), AuditEventDetailValue::String(_)));

    let binary = AuditEventEntityDetail::builder()
        .r#type(FhirString::from("payload"))
        .value(Base64Binary::from("aGVsbG8="))
        .build()
        .unwrap();
    assert!(matches!(binary.value(), AuditEventDetailValue::Base64Binary(_)));
}

#[test]
fn test_null_list_element_is_an_invalid_argument() {
    let err = Consent::builder()
        .status(Code::from("active"))
        .scope(concept("patient-privacy"))
        .category(concept("59284-0"))
        .category(None)
        .build()
        .unwrap_err();
    match err {
        Error::InvalidArgument { type_name, path } => {
            assert_eq!(type_name, "Consent");
            assert_eq!(path, "Consent.category[1]");
        }
        other => panic!("expected InvalidArgument, got {other:?}"),
    }
}

#[test]
fn test_null_in_replaced_list_is_an_invalid_argument() {
    let err = audit_event()
        .agents(vec![Some(agent()), None])
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidArgument { ref path, .. } if path == "AuditEvent.agent[1]"
    ));
}

#[test]
fn test_construction_error_display_lists_violations() {
    let err = AuditEvent::builder().build().unwrap_err();
    let text = err.to_string();
    assert!(text.contains("AuditEvent"));
    assert!(text.contains("AuditEvent.recorded"));
}
