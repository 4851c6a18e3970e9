mod common;

use std::collections::{HashMap, HashSet};

use atrius_fhir_model::frozen::{Frozen, structural_hash};
use atrius_fhir_model::prelude::*;
use common::*;

fn detailed_event() -> AuditEvent {
    let entity = AuditEventEntity::builder()
        .what(reference("Patient/p1"))
        .role(coding("1"))
        .detail(
            AuditEventEntityDetail::builder()
                .r#type(FhirString::from("query"))
                .value(FhirString::from("name=peter"))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    audit_event()
        .id(Id::from("ev-1"))
        .subtype(coding("read"))
        .action(Code::from("R"))
        .outcome(Code::from("0"))
        .purpose_of_event(concept("TREAT"))
        .entity(entity)
        .build()
        .unwrap()
}

#[test]
fn test_to_builder_round_trip_is_equal() {
    let event = detailed_event();
    let rebuilt = event.to_builder().build().unwrap();
    assert_eq!(event, rebuilt);
    assert_eq!(structural_hash(&event), structural_hash(&rebuilt));

    let consent = consent()
        .performer(reference("Organization/o1"))
        .provision(
            ConsentProvision::builder()
                .r#type(Code::from("permit"))
                .actor(actor("PRCP", "Practitioner/pr1"))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    assert_eq!(consent, consent.to_builder().build().unwrap());
}

#[test]
fn test_to_builder_leaves_original_untouched() {
    let event = detailed_event();
    let changed = event
        .to_builder()
        .outcome(Code::from("8"))
        .build()
        .unwrap();

    assert_eq!(event.outcome().and_then(|c| c.as_str()), Some("0"));
    assert_eq!(changed.outcome().and_then(|c| c.as_str()), Some("8"));
    assert_ne!(event, changed);
    assert_eq!(event.agent(), changed.agent());
}

#[test]
fn test_append_and_replace_list_setters() {
    let appended = audit_event().agent(agent()).build().unwrap();
    assert_eq!(appended.agent().len(), 2);

    let replaced = appended.to_builder().agents(vec![agent()]).build().unwrap();
    assert_eq!(replaced.agent().len(), 1);
}

#[test]
fn test_list_order_is_part_of_equality() {
    let a = CodeableConcept::builder()
        .coding(coding("x"))
        .coding(coding("y"))
        .build()
        .unwrap();
    let b = CodeableConcept::builder()
        .coding(coding("y"))
        .coding(coding("x"))
        .build()
        .unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_equal_nodes_deduplicate_in_hash_set() {
    let mut set = HashSet::new();
    set.insert(coding("login"));
    set.insert(coding("login"));
    set.insert(coding("logout"));
    assert_eq!(set.len(), 2);
}

#[test]
fn test_frozen_resource_as_map_key() {
    let event = Frozen::new(detailed_event());
    let same = Frozen::new(detailed_event());
    assert_eq!(event.hash_value(), same.hash_value());
    assert_eq!(event, same);

    let mut seen = HashMap::new();
    seen.insert(event.clone(), 1);
    *seen.entry(same).or_insert(0) += 1;
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[&event], 2);

    let owned: AuditEvent = event.into_inner();
    assert_eq!(owned.id().and_then(|id| id.as_str()), Some("ev-1"));
}

#[test]
fn test_extension_round_trip_on_backbone() {
    let ext = Extension::builder()
        .url("http://example.org/fhir/StructureDefinition/reviewed")
        .value(FhirBoolean::from(true))
        .build()
        .unwrap();
    let agent = AuditEventAgent::builder()
        .requestor(FhirBoolean::from(false))
        .extension(ext.clone())
        .modifier_extension(ext.clone())
        .build()
        .unwrap();

    assert_eq!(ElementNode::extension(&agent), &[ext.clone()][..]);
    assert_eq!(agent.modifier_extension().len(), 1);
    assert_eq!(agent, agent.to_builder().build().unwrap());
}

#[test]
fn test_null_extension_is_rejected() {
    let err = Coding::builder()
        .code(Code::from("a"))
        .extension(None)
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        atrius_fhir_model::Error::InvalidArgument { ref path, .. } if path == "Coding.extension[0]"
    ));
}

#[test]
fn test_contained_resources_round_trip() {
    let consent = consent()
        .contained(Resource::from(audit_event().build().unwrap()))
        .build()
        .unwrap();
    assert_eq!(consent.contained().len(), 1);
    assert_eq!(consent.contained()[0].resource_type(), "AuditEvent");
    assert_eq!(consent, consent.to_builder().build().unwrap());
}

#[test]
fn test_date_time_offset_distinguishes_nodes() {
    let written = |text: &str| DateTime::from(PrecisionDateTime::parse(text).unwrap());
    let local = consent()
        .date_time(written("2024-01-01T10:00:00+01:00"))
        .build()
        .unwrap();
    let utc = consent()
        .date_time(written("2024-01-01T09:00:00Z"))
        .build()
        .unwrap();
    assert_ne!(local, utc);
    assert_ne!(structural_hash(&local), structural_hash(&utc));

    // same instant all the same
    let at = |c: &Consent| c.date_time().and_then(|d| d.value()).and_then(|v| v.to_chrono());
    assert_eq!(at(&local), at(&utc));

    let partial = consent().date_time(written("2024-01")).build().unwrap();
    assert_eq!(
        partial.to_builder().build().unwrap().date_time().and_then(|d| d.value()).map(|v| v.original_string()),
        Some("2024-01")
    );
}

#[test]
fn test_decimal_scale_distinguishes_nodes() {
    let quantity = |text: &str| {
        Quantity::builder()
            .value(FhirDecimal::from(PreciseDecimal::parse(text).unwrap()))
            .build()
            .unwrap()
    };
    assert_ne!(quantity("1.50"), quantity("1.5"));
    assert_eq!(quantity("1.50"), quantity("1.50"));

    let kept = quantity("1.50").to_builder().build().unwrap();
    assert_eq!(kept.value().and_then(|d| d.value()).map(|d| d.original_string()), Some("1.50"));
}
