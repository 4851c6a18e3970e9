//! Installs a process-wide configuration, so it lives in its own test binary.

mod common;

use std::sync::Arc;

use atrius_fhir_model::config::ModelConfig;
use atrius_fhir_model::error::RuleKind;
use atrius_fhir_model::prelude::*;
use atrius_fhir_model::validation::Validator;
use common::*;

fn untyped_reference() -> Reference {
    Reference::builder()
        .display(FhirString::from("Someone"))
        .build()
        .unwrap()
}

#[test]
fn test_installed_config_switches_reference_checks() {
    init_tracing();

    let lenient = ConsentProvisionActor::builder()
        .role(concept("PRCP"))
        .reference(untyped_reference())
        .build();
    assert!(lenient.is_ok());

    ModelConfig::install(
        ModelConfig::from_json(r#"{ "requireReferenceType": true }"#).unwrap(),
    );
    assert!(ModelConfig::current().require_reference_type);

    let err = ConsentProvisionActor::builder()
        .role(concept("PRCP"))
        .reference(untyped_reference())
        .build()
        .unwrap_err();
    assert_eq!(err.violations().len(), 1);
    assert_eq!(err.violations()[0].path, "Consent.provision.actor.reference");
    assert_eq!(
        err.violations()[0].rule.kind(),
        RuleKind::DisallowedReferenceTarget
    );

    // a parsable literal reference still satisfies strict mode
    assert!(
        ConsentProvisionActor::builder()
            .role(concept("PRCP"))
            .reference(reference("Patient/p1"))
            .build()
            .is_ok()
    );

    ModelConfig::install(ModelConfig {
        check_reference_types: false,
        ..ModelConfig::default()
    });
    assert!(
        ConsentProvisionActor::builder()
            .role(concept("PRCP"))
            .reference(typed_reference("Foo", "Nobody"))
            .build()
            .is_ok()
    );

    ModelConfig::install(ModelConfig::default());
}

#[test]
fn test_explicit_config_overrides_the_global_one() {
    let strict = Arc::new(ModelConfig {
        require_reference_type: true,
        ..ModelConfig::default()
    });
    let mut check = Validator::with_config("Consent", strict);
    let untyped = untyped_reference();
    check.check_reference_type(Some(&untyped), "patient", &["Patient"]);

    let err = check.finish(|| Some(untyped.clone())).unwrap_err();
    assert_eq!(err.violations()[0].path, "Consent.patient");
}
