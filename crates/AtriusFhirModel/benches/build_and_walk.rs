use atrius_fhir_model::frozen::structural_hash;
use atrius_fhir_model::prelude::*;
use atrius_fhir_model::visitor::{CollectingVisitor, PathVisitor};
use chrono::DateTime as ChronoDateTime;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn coding(code: &str) -> Coding {
    Coding::builder()
        .system(Uri::from("http://terminology.hl7.org/CodeSystem/audit-event-type"))
        .code(Code::from(code))
        .build()
        .unwrap()
}

fn reference(literal: &str) -> Reference {
    Reference::builder()
        .reference(FhirString::from(literal))
        .build()
        .unwrap()
}

fn audit_event(entities: usize) -> AuditEvent {
    let recorded = ChronoDateTime::parse_from_rfc3339("2024-05-02T08:30:00Z").unwrap();
    let agent = AuditEventAgent::builder()
        .who(reference("Practitioner/pr1"))
        .requestor(FhirBoolean::from(true))
        .build()
        .unwrap();
    let source = AuditEventSource::builder()
        .observer(reference("Device/d1"))
        .build()
        .unwrap();

    AuditEvent::builder()
        .r#type(coding("rest"))
        .recorded(Instant::from(recorded))
        .agent(agent)
        .source(source)
        .entities((0..entities).map(|i| {
            AuditEventEntity::builder()
                .what(reference(&format!("Patient/p{i}")))
                .detail(
                    AuditEventEntityDetail::builder()
                        .r#type(FhirString::from("query"))
                        .value(FhirString::from("name=peter"))
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap()
        }))
        .build()
        .unwrap()
}

fn nested_provision(depth: usize) -> ConsentProvision {
    let mut provision = ConsentProvision::builder()
        .r#type(Code::from("permit"))
        .build()
        .unwrap();
    for _ in 0..depth {
        provision = ConsentProvision::builder()
            .provision(provision)
            .build()
            .unwrap();
    }
    provision
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("model/build");

    group.bench_function("coding", |b| b.iter(|| coding(black_box("rest"))));

    group.bench_function("audit_event_10_entities", |b| {
        b.iter(|| audit_event(black_box(10)))
    });

    let event = audit_event(10);
    group.bench_function("audit_event_to_builder", |b| {
        b.iter(|| black_box(&event).to_builder().build().unwrap())
    });

    group.bench_function("missing_required_fields", |b| {
        b.iter(|| AuditEvent::builder().build().unwrap_err())
    });

    group.finish();
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("model/walk");

    let event = audit_event(100);
    group.bench_function("collect_references", |b| {
        b.iter(|| {
            let mut refs = CollectingVisitor::<Reference>::new();
            black_box(&event).accept("AuditEvent", None, &mut refs).unwrap();
            refs.into_result().len()
        })
    });

    group.bench_function("paths", |b| {
        b.iter(|| {
            let mut paths = PathVisitor::new();
            black_box(&event).accept("AuditEvent", None, &mut paths).unwrap();
            paths.into_paths().len()
        })
    });

    let provision = nested_provision(500);
    group.bench_function("nested_provisions_500", |b| {
        b.iter(|| {
            let mut found = CollectingVisitor::<ConsentProvision>::new();
            black_box(&provision).accept("provision", None, &mut found).unwrap();
            found.result().len()
        })
    });

    group.finish();
}

fn bench_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("model/hash");

    let event = audit_event(100);
    group.bench_function("structural_hash", |b| {
        b.iter(|| structural_hash(black_box(&event)))
    });

    let other = event.clone();
    group.bench_function("structural_eq", |b| {
        b.iter(|| black_box(&event) == black_box(&other))
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_walk, bench_hash);
criterion_main!(benches);
