#![allow(dead_code)]

use atrius_fhir_model::prelude::*;
use chrono::DateTime as ChronoDateTime;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn coding(code: &str) -> Coding {
    Coding::builder()
        .system(Uri::from("http://example.org/codes"))
        .code(Code::from(code))
        .build()
        .unwrap()
}

pub fn concept(code: &str) -> CodeableConcept {
    CodeableConcept::from(coding(code))
}

pub fn reference(literal: &str) -> Reference {
    Reference::builder()
        .reference(FhirString::from(literal))
        .build()
        .unwrap()
}

pub fn typed_reference(resource_type: &str, display: &str) -> Reference {
    Reference::builder()
        .r#type(Uri::from(resource_type))
        .display(FhirString::from(display))
        .build()
        .unwrap()
}

pub fn instant(rfc3339: &str) -> Instant {
    Instant::from(ChronoDateTime::parse_from_rfc3339(rfc3339).unwrap())
}

pub fn agent() -> AuditEventAgent {
    AuditEventAgent::builder()
        .who(reference("Practitioner/pr1"))
        .requestor(FhirBoolean::from(true))
        .build()
        .unwrap()
}

pub fn source() -> AuditEventSource {
    AuditEventSource::builder()
        .site(FhirString::from("Cloud"))
        .observer(reference("Device/d1"))
        .build()
        .unwrap()
}

pub fn audit_event() -> AuditEventBuilder {
    AuditEvent::builder()
        .r#type(coding("rest"))
        .recorded(instant("2024-05-02T08:30:00Z"))
        .agent(agent())
        .source(source())
}

pub fn consent() -> ConsentBuilder {
    Consent::builder()
        .status(Code::from("active"))
        .scope(concept("patient-privacy"))
        .category(concept("59284-0"))
        .patient(reference("Patient/p1"))
}

pub fn actor(role: &str, literal: &str) -> ConsentProvisionActor {
    ConsentProvisionActor::builder()
        .role(concept(role))
        .reference(reference(literal))
        .build()
        .unwrap()
}
