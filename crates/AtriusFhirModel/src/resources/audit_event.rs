//! `AuditEvent`: a record of an event relevant to security or privacy.

use atrius_model_macros::{FhirChoice, FhirValidate, Visitable};

use crate::choice::DataType;
use crate::datatypes::{CodeableConcept, Coding, Period, Reference};
use crate::element::{BackboneBase, BackboneBaseBuilder, impl_backbone_builder, staged};
use crate::error::Result;
use crate::primitives::{Base64Binary, Code, FhirBoolean, FhirString, Instant, Uri};
use crate::resource::{DomainResourceBase, DomainResourceBaseBuilder, impl_domain_resource_builder};
use crate::validation::Validator;

/// Resource types an agent or observer may point at.
pub const PARTICIPANT_TARGETS: &[&str] = &[
    "PractitionerRole",
    "Practitioner",
    "Organization",
    "Device",
    "Patient",
    "RelatedPerson",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirValidate)]
#[fhir(type_name = "AuditEvent", kind = "resource")]
#[fhir_invariant(
    key = "auditEvent-2",
    severity = "warning",
    human = "SHALL, if possible, contain a code from value set http://hl7.org/fhir/ValueSet/audit-event-type",
    expr = "type.exists() and type.memberOf('http://hl7.org/fhir/ValueSet/audit-event-type', 'extensible')",
    path = "AuditEvent"
)]
#[fhir_invariant(
    key = "auditEvent-3",
    severity = "warning",
    human = "SHALL, if possible, contain a code from value set http://hl7.org/fhir/ValueSet/audit-event-sub-type",
    expr = "subtype.exists() implies (subtype.all(memberOf('http://hl7.org/fhir/ValueSet/audit-event-sub-type', 'extensible')))",
    path = "AuditEvent"
)]
#[fhir_invariant(
    key = "auditEvent-4",
    severity = "warning",
    human = "SHALL, if possible, contain a code from value set http://terminology.hl7.org/ValueSet/v3-PurposeOfUse",
    expr = "purposeOfEvent.exists() implies (purposeOfEvent.all(memberOf('http://terminology.hl7.org/ValueSet/v3-PurposeOfUse', 'extensible')))",
    path = "AuditEvent"
)]
pub struct AuditEvent {
    #[fhir(base)]
    base: DomainResourceBase,
    #[fhir_binding(
        name = "AuditEventType",
        strength = "extensible",
        value_set = "http://hl7.org/fhir/ValueSet/audit-event-type",
        description = "Type of event."
    )]
    r#type: Coding,
    #[fhir_binding(
        name = "AuditEventSubType",
        strength = "extensible",
        value_set = "http://hl7.org/fhir/ValueSet/audit-event-sub-type",
        description = "Sub-type of event."
    )]
    subtype: Vec<Coding>,
    #[fhir_binding(
        name = "AuditEventAction",
        strength = "required",
        value_set = "http://hl7.org/fhir/ValueSet/audit-event-action|4.3.0",
        description = "Indicator for type of action performed during the event that generated the event."
    )]
    action: Option<Code>,
    period: Option<Period>,
    recorded: Instant,
    #[fhir_binding(
        name = "AuditEventOutcome",
        strength = "required",
        value_set = "http://hl7.org/fhir/ValueSet/audit-event-outcome|4.3.0",
        description = "Indicates whether the event succeeded or failed."
    )]
    outcome: Option<Code>,
    outcome_desc: Option<FhirString>,
    #[fhir_binding(
        name = "AuditPurposeOfUse",
        strength = "extensible",
        value_set = "http://terminology.hl7.org/ValueSet/v3-PurposeOfUse",
        description = "The reason the activity took place."
    )]
    purpose_of_event: Vec<CodeableConcept>,
    agent: Vec<AuditEventAgent>,
    source: AuditEventSource,
    entity: Vec<AuditEventEntity>,
}

impl AuditEvent {
    pub fn builder() -> AuditEventBuilder {
        AuditEventBuilder::default()
    }

    pub fn r#type(&self) -> &Coding {
        &self.r#type
    }

    pub fn subtype(&self) -> &[Coding] {
        &self.subtype
    }

    pub fn action(&self) -> Option<&Code> {
        self.action.as_ref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn recorded(&self) -> &Instant {
        &self.recorded
    }

    pub fn outcome(&self) -> Option<&Code> {
        self.outcome.as_ref()
    }

    pub fn outcome_desc(&self) -> Option<&FhirString> {
        self.outcome_desc.as_ref()
    }

    pub fn purpose_of_event(&self) -> &[CodeableConcept] {
        &self.purpose_of_event
    }

    pub fn agent(&self) -> &[AuditEventAgent] {
        &self.agent
    }

    pub fn source(&self) -> &AuditEventSource {
        &self.source
    }

    pub fn entity(&self) -> &[AuditEventEntity] {
        &self.entity
    }

    pub fn to_builder(&self) -> AuditEventBuilder {
        AuditEventBuilder {
            base: self.base.to_builder(),
            r#type: Some(self.r#type.clone()),
            subtype: staged(&self.subtype),
            action: self.action.clone(),
            period: self.period.clone(),
            recorded: Some(self.recorded.clone()),
            outcome: self.outcome.clone(),
            outcome_desc: self.outcome_desc.clone(),
            purpose_of_event: staged(&self.purpose_of_event),
            agent: staged(&self.agent),
            source: Some(self.source.clone()),
            entity: staged(&self.entity),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditEventBuilder {
    base: DomainResourceBaseBuilder,
    r#type: Option<Coding>,
    subtype: Vec<Option<Coding>>,
    action: Option<Code>,
    period: Option<Period>,
    recorded: Option<Instant>,
    outcome: Option<Code>,
    outcome_desc: Option<FhirString>,
    purpose_of_event: Vec<Option<CodeableConcept>>,
    agent: Vec<Option<AuditEventAgent>>,
    source: Option<AuditEventSource>,
    entity: Vec<Option<AuditEventEntity>>,
}

impl_domain_resource_builder!(AuditEventBuilder);

impl AuditEventBuilder {
    pub fn r#type(mut self, r#type: impl Into<Option<Coding>>) -> Self {
        self.r#type = r#type.into();
        self
    }

    pub fn subtype(mut self, subtype: impl Into<Option<Coding>>) -> Self {
        self.subtype.push(subtype.into());
        self
    }

    pub fn subtypes(mut self, subtypes: impl IntoIterator<Item = impl Into<Option<Coding>>>) -> Self {
        self.subtype = subtypes.into_iter().map(Into::into).collect();
        self
    }

    pub fn action(mut self, action: impl Into<Option<Code>>) -> Self {
        self.action = action.into();
        self
    }

    pub fn period(mut self, period: impl Into<Option<Period>>) -> Self {
        self.period = period.into();
        self
    }

    pub fn recorded(mut self, recorded: impl Into<Option<Instant>>) -> Self {
        self.recorded = recorded.into();
        self
    }

    pub fn outcome(mut self, outcome: impl Into<Option<Code>>) -> Self {
        self.outcome = outcome.into();
        self
    }

    pub fn outcome_desc(mut self, outcome_desc: impl Into<Option<FhirString>>) -> Self {
        self.outcome_desc = outcome_desc.into();
        self
    }

    pub fn purpose_of_event(mut self, purpose: impl Into<Option<CodeableConcept>>) -> Self {
        self.purpose_of_event.push(purpose.into());
        self
    }

    pub fn purpose_of_event_all(mut self, purposes: impl IntoIterator<Item = impl Into<Option<CodeableConcept>>>) -> Self {
        self.purpose_of_event = purposes.into_iter().map(Into::into).collect();
        self
    }

    pub fn agent(mut self, agent: impl Into<Option<AuditEventAgent>>) -> Self {
        self.agent.push(agent.into());
        self
    }

    pub fn agents(mut self, agents: impl IntoIterator<Item = impl Into<Option<AuditEventAgent>>>) -> Self {
        self.agent = agents.into_iter().map(Into::into).collect();
        self
    }

    pub fn source(mut self, source: impl Into<Option<AuditEventSource>>) -> Self {
        self.source = source.into();
        self
    }

    pub fn entity(mut self, entity: impl Into<Option<AuditEventEntity>>) -> Self {
        self.entity.push(entity.into());
        self
    }

    pub fn entities(mut self, entities: impl IntoIterator<Item = impl Into<Option<AuditEventEntity>>>) -> Self {
        self.entity = entities.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<AuditEvent> {
        let mut check = Validator::new("AuditEvent");
        let base = self.base.build(&mut check);
        let r#type = check.require_non_null(self.r#type, "type");
        let subtype = check.check_list(self.subtype, "subtype");
        let recorded = check.require_non_null(self.recorded, "recorded");
        let purpose_of_event = check.check_list(self.purpose_of_event, "purposeOfEvent");
        let agent = check.require_non_empty_list(self.agent, "agent");
        let source = check.require_non_null(self.source, "source");
        let entity = check.check_list(self.entity, "entity");
        check.finish(|| {
            Some(AuditEvent {
                base,
                r#type: r#type?,
                subtype,
                action: self.action,
                period: self.period,
                recorded: recorded?,
                outcome: self.outcome,
                outcome_desc: self.outcome_desc,
                purpose_of_event,
                agent,
                source: source?,
                entity,
            })
        })
    }
}

/// An actor taking part in the event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirValidate)]
#[fhir(type_name = "AuditEvent.agent", kind = "backbone")]
pub struct AuditEventAgent {
    #[fhir(base)]
    base: BackboneBase,
    #[fhir_binding(
        name = "AuditAgentType",
        strength = "extensible",
        value_set = "http://hl7.org/fhir/ValueSet/participation-role-type",
        description = "The Participation type of the agent to the event."
    )]
    #[fhir_invariant(
        key = "auditEvent-5",
        severity = "warning",
        human = "SHALL, if possible, contain a code from value set http://hl7.org/fhir/ValueSet/participation-role-type",
        expr = "$this.memberOf('http://hl7.org/fhir/ValueSet/participation-role-type', 'extensible')",
        path = "AuditEvent.agent.type"
    )]
    r#type: Option<CodeableConcept>,
    #[fhir_binding(
        name = "AuditAgentRole",
        strength = "example",
        value_set = "http://hl7.org/fhir/ValueSet/security-role-type",
        description = "What security role enabled the agent to participate in the event."
    )]
    role: Vec<CodeableConcept>,
    who: Option<Reference>,
    alt_id: Option<FhirString>,
    name: Option<FhirString>,
    requestor: FhirBoolean,
    location: Option<Reference>,
    policy: Vec<Uri>,
    #[fhir_binding(
        name = "DICOMMediaType",
        strength = "extensible",
        value_set = "http://hl7.org/fhir/ValueSet/dicm-405-mediatype",
        description = "Used when the event is about exporting/importing onto media."
    )]
    #[fhir_invariant(
        key = "auditEvent-6",
        severity = "warning",
        human = "SHALL, if possible, contain a code from value set http://hl7.org/fhir/ValueSet/dicm-405-mediatype",
        expr = "$this.memberOf('http://hl7.org/fhir/ValueSet/dicm-405-mediatype', 'extensible')",
        path = "AuditEvent.agent.media"
    )]
    media: Option<Coding>,
    network: Option<AuditEventAgentNetwork>,
    #[fhir_binding(
        name = "AuditPurposeOfUse",
        strength = "extensible",
        value_set = "http://terminology.hl7.org/ValueSet/v3-PurposeOfUse",
        description = "The reason the activity took place."
    )]
    #[fhir_invariant(
        key = "auditEvent-7",
        severity = "warning",
        human = "SHALL, if possible, contain a code from value set http://terminology.hl7.org/ValueSet/v3-PurposeOfUse",
        expr = "$this.memberOf('http://terminology.hl7.org/ValueSet/v3-PurposeOfUse', 'extensible')",
        path = "AuditEvent.agent.purposeOfUse"
    )]
    purpose_of_use: Vec<CodeableConcept>,
}

impl AuditEventAgent {
    pub fn builder() -> AuditEventAgentBuilder {
        AuditEventAgentBuilder::default()
    }

    pub fn r#type(&self) -> Option<&CodeableConcept> {
        self.r#type.as_ref()
    }

    pub fn role(&self) -> &[CodeableConcept] {
        &self.role
    }

    pub fn who(&self) -> Option<&Reference> {
        self.who.as_ref()
    }

    pub fn alt_id(&self) -> Option<&FhirString> {
        self.alt_id.as_ref()
    }

    pub fn name(&self) -> Option<&FhirString> {
        self.name.as_ref()
    }

    pub fn requestor(&self) -> &FhirBoolean {
        &self.requestor
    }

    pub fn location(&self) -> Option<&Reference> {
        self.location.as_ref()
    }

    pub fn policy(&self) -> &[Uri] {
        &self.policy
    }

    pub fn media(&self) -> Option<&Coding> {
        self.media.as_ref()
    }

    pub fn network(&self) -> Option<&AuditEventAgentNetwork> {
        self.network.as_ref()
    }

    pub fn purpose_of_use(&self) -> &[CodeableConcept] {
        &self.purpose_of_use
    }

    pub fn to_builder(&self) -> AuditEventAgentBuilder {
        AuditEventAgentBuilder {
            base: self.base.to_builder(),
            r#type: self.r#type.clone(),
            role: staged(&self.role),
            who: self.who.clone(),
            alt_id: self.alt_id.clone(),
            name: self.name.clone(),
            requestor: Some(self.requestor.clone()),
            location: self.location.clone(),
            policy: staged(&self.policy),
            media: self.media.clone(),
            network: self.network.clone(),
            purpose_of_use: staged(&self.purpose_of_use),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditEventAgentBuilder {
    base: BackboneBaseBuilder,
    r#type: Option<CodeableConcept>,
    role: Vec<Option<CodeableConcept>>,
    who: Option<Reference>,
    alt_id: Option<FhirString>,
    name: Option<FhirString>,
    requestor: Option<FhirBoolean>,
    location: Option<Reference>,
    policy: Vec<Option<Uri>>,
    media: Option<Coding>,
    network: Option<AuditEventAgentNetwork>,
    purpose_of_use: Vec<Option<CodeableConcept>>,
}

impl_backbone_builder!(AuditEventAgentBuilder);

impl AuditEventAgentBuilder {
    pub fn r#type(mut self, r#type: impl Into<Option<CodeableConcept>>) -> Self {
        self.r#type = r#type.into();
        self
    }

    pub fn role(mut self, role: impl Into<Option<CodeableConcept>>) -> Self {
        self.role.push(role.into());
        self
    }

    pub fn roles(mut self, roles: impl IntoIterator<Item = impl Into<Option<CodeableConcept>>>) -> Self {
        self.role = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn who(mut self, who: impl Into<Option<Reference>>) -> Self {
        self.who = who.into();
        self
    }

    pub fn alt_id(mut self, alt_id: impl Into<Option<FhirString>>) -> Self {
        self.alt_id = alt_id.into();
        self
    }

    pub fn name(mut self, name: impl Into<Option<FhirString>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn requestor(mut self, requestor: impl Into<Option<FhirBoolean>>) -> Self {
        self.requestor = requestor.into();
        self
    }

    pub fn location(mut self, location: impl Into<Option<Reference>>) -> Self {
        self.location = location.into();
        self
    }

    pub fn policy(mut self, policy: impl Into<Option<Uri>>) -> Self {
        self.policy.push(policy.into());
        self
    }

    pub fn policies(mut self, policies: impl IntoIterator<Item = impl Into<Option<Uri>>>) -> Self {
        self.policy = policies.into_iter().map(Into::into).collect();
        self
    }

    pub fn media(mut self, media: impl Into<Option<Coding>>) -> Self {
        self.media = media.into();
        self
    }

    pub fn network(mut self, network: impl Into<Option<AuditEventAgentNetwork>>) -> Self {
        self.network = network.into();
        self
    }

    pub fn purpose_of_use(mut self, purpose: impl Into<Option<CodeableConcept>>) -> Self {
        self.purpose_of_use.push(purpose.into());
        self
    }

    pub fn purpose_of_use_all(mut self, purposes: impl IntoIterator<Item = impl Into<Option<CodeableConcept>>>) -> Self {
        self.purpose_of_use = purposes.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<AuditEventAgent> {
        let mut check = Validator::new("AuditEvent.agent");
        let base = self.base.build(&mut check);
        let role = check.check_list(self.role, "role");
        let requestor = check.require_non_null(self.requestor, "requestor");
        let policy = check.check_list(self.policy, "policy");
        let purpose_of_use = check.check_list(self.purpose_of_use, "purposeOfUse");
        check.check_reference_type(self.who.as_ref(), "who", PARTICIPANT_TARGETS);
        check.check_reference_type(self.location.as_ref(), "location", &["Location"]);
        check.finish_element(|| {
            Some(AuditEventAgent {
                base,
                r#type: self.r#type,
                role,
                who: self.who,
                alt_id: self.alt_id,
                name: self.name,
                requestor: requestor?,
                location: self.location,
                policy,
                media: self.media,
                network: self.network,
                purpose_of_use,
            })
        })
    }
}

/// Logical network location of an agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirValidate)]
#[fhir(type_name = "AuditEvent.agent.network", kind = "backbone")]
pub struct AuditEventAgentNetwork {
    #[fhir(base)]
    base: BackboneBase,
    address: Option<FhirString>,
    #[fhir_binding(
        name = "AuditEventAgentNetworkType",
        strength = "required",
        value_set = "http://hl7.org/fhir/ValueSet/network-type|4.3.0",
        description = "The type of network access point of this agent in the audit event."
    )]
    r#type: Option<Code>,
}

impl AuditEventAgentNetwork {
    pub fn builder() -> AuditEventAgentNetworkBuilder {
        AuditEventAgentNetworkBuilder::default()
    }

    pub fn address(&self) -> Option<&FhirString> {
        self.address.as_ref()
    }

    pub fn r#type(&self) -> Option<&Code> {
        self.r#type.as_ref()
    }

    pub fn to_builder(&self) -> AuditEventAgentNetworkBuilder {
        AuditEventAgentNetworkBuilder {
            base: self.base.to_builder(),
            address: self.address.clone(),
            r#type: self.r#type.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditEventAgentNetworkBuilder {
    base: BackboneBaseBuilder,
    address: Option<FhirString>,
    r#type: Option<Code>,
}

impl_backbone_builder!(AuditEventAgentNetworkBuilder);

impl AuditEventAgentNetworkBuilder {
    pub fn address(mut self, address: impl Into<Option<FhirString>>) -> Self {
        self.address = address.into();
        self
    }

    pub fn r#type(mut self, r#type: impl Into<Option<Code>>) -> Self {
        self.r#type = r#type.into();
        self
    }

    pub fn build(self) -> Result<AuditEventAgentNetwork> {
        let mut check = Validator::new("AuditEvent.agent.network");
        let base = self.base.build(&mut check);
        check.finish_element(|| {
            Some(AuditEventAgentNetwork {
                base,
                address: self.address,
                r#type: self.r#type,
            })
        })
    }
}

/// The system that detected and recorded the event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirValidate)]
#[fhir(type_name = "AuditEvent.source", kind = "backbone")]
pub struct AuditEventSource {
    #[fhir(base)]
    base: BackboneBase,
    site: Option<FhirString>,
    observer: Reference,
    #[fhir_binding(
        name = "AuditEventSourceType",
        strength = "extensible",
        value_set = "http://hl7.org/fhir/ValueSet/audit-source-type",
        description = "Code specifying the type of system that detected and recorded the event."
    )]
    #[fhir_invariant(
        key = "auditEvent-8",
        severity = "warning",
        human = "SHALL, if possible, contain a code from value set http://hl7.org/fhir/ValueSet/audit-source-type",
        expr = "$this.memberOf('http://hl7.org/fhir/ValueSet/audit-source-type', 'extensible')",
        path = "AuditEvent.source.type"
    )]
    r#type: Vec<Coding>,
}

impl AuditEventSource {
    pub fn builder() -> AuditEventSourceBuilder {
        AuditEventSourceBuilder::default()
    }

    pub fn site(&self) -> Option<&FhirString> {
        self.site.as_ref()
    }

    pub fn observer(&self) -> &Reference {
        &self.observer
    }

    pub fn r#type(&self) -> &[Coding] {
        &self.r#type
    }

    pub fn to_builder(&self) -> AuditEventSourceBuilder {
        AuditEventSourceBuilder {
            base: self.base.to_builder(),
            site: self.site.clone(),
            observer: Some(self.observer.clone()),
            r#type: staged(&self.r#type),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditEventSourceBuilder {
    base: BackboneBaseBuilder,
    site: Option<FhirString>,
    observer: Option<Reference>,
    r#type: Vec<Option<Coding>>,
}

impl_backbone_builder!(AuditEventSourceBuilder);

impl AuditEventSourceBuilder {
    pub fn site(mut self, site: impl Into<Option<FhirString>>) -> Self {
        self.site = site.into();
        self
    }

    pub fn observer(mut self, observer: impl Into<Option<Reference>>) -> Self {
        self.observer = observer.into();
        self
    }

    pub fn r#type(mut self, r#type: impl Into<Option<Coding>>) -> Self {
        self.r#type.push(r#type.into());
        self
    }

    pub fn types(mut self, types: impl IntoIterator<Item = impl Into<Option<Coding>>>) -> Self {
        self.r#type = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<AuditEventSource> {
        let mut check = Validator::new("AuditEvent.source");
        let base = self.base.build(&mut check);
        let observer = check.require_non_null(self.observer, "observer");
        let r#type = check.check_list(self.r#type, "type");
        check.check_reference_type(observer.as_ref(), "observer", PARTICIPANT_TARGETS);
        check.finish_element(|| {
            Some(AuditEventSource {
                base,
                site: self.site,
                observer: observer?,
                r#type,
            })
        })
    }
}

/// Data or objects used by the event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirValidate)]
#[fhir(type_name = "AuditEvent.entity", kind = "backbone")]
#[fhir_invariant(
    key = "sev-1",
    severity = "error",
    human = "Either a name or a query (NOT both)",
    expr = "name.empty() or query.empty()",
    path = "AuditEvent.entity"
)]
pub struct AuditEventEntity {
    #[fhir(base)]
    base: BackboneBase,
    what: Option<Reference>,
    #[fhir_binding(
        name = "AuditEventEntityType",
        strength = "extensible",
        value_set = "http://hl7.org/fhir/ValueSet/audit-entity-type",
        description = "Code for the entity type involved in the audit event."
    )]
    #[fhir_invariant(
        key = "auditEvent-9",
        severity = "warning",
        human = "SHALL, if possible, contain a code from value set http://hl7.org/fhir/ValueSet/audit-entity-type",
        expr = "$this.memberOf('http://hl7.org/fhir/ValueSet/audit-entity-type', 'extensible')",
        path = "AuditEvent.entity.type"
    )]
    r#type: Option<Coding>,
    #[fhir_binding(
        name = "AuditEventEntityRole",
        strength = "extensible",
        value_set = "http://hl7.org/fhir/ValueSet/object-role",
        description = "Code representing the role the entity played in the audit event."
    )]
    #[fhir_invariant(
        key = "auditEvent-10",
        severity = "warning",
        human = "SHALL, if possible, contain a code from value set http://hl7.org/fhir/ValueSet/object-role",
        expr = "$this.memberOf('http://hl7.org/fhir/ValueSet/object-role', 'extensible')",
        path = "AuditEvent.entity.role"
    )]
    role: Option<Coding>,
    #[fhir_binding(
        name = "AuditEventEntityLifecycle",
        strength = "extensible",
        value_set = "http://hl7.org/fhir/ValueSet/object-lifecycle-events",
        description = "Identifier for the data life-cycle stage for the entity."
    )]
    #[fhir_invariant(
        key = "auditEvent-11",
        severity = "warning",
        human = "SHALL, if possible, contain a code from value set http://hl7.org/fhir/ValueSet/object-lifecycle-events",
        expr = "$this.memberOf('http://hl7.org/fhir/ValueSet/object-lifecycle-events', 'extensible')",
        path = "AuditEvent.entity.lifecycle"
    )]
    lifecycle: Option<Coding>,
    #[fhir_binding(
        name = "SecurityLabels",
        strength = "extensible",
        value_set = "http://hl7.org/fhir/ValueSet/security-labels",
        description = "Security Labels from the Healthcare Privacy and Security Classification System."
    )]
    #[fhir_invariant(
        key = "auditEvent-12",
        severity = "warning",
        human = "SHALL, if possible, contain a code from value set http://hl7.org/fhir/ValueSet/security-labels",
        expr = "$this.memberOf('http://hl7.org/fhir/ValueSet/security-labels', 'extensible')",
        path = "AuditEvent.entity.securityLabel"
    )]
    security_label: Vec<Coding>,
    name: Option<FhirString>,
    description: Option<FhirString>,
    query: Option<Base64Binary>,
    detail: Vec<AuditEventEntityDetail>,
}

impl AuditEventEntity {
    pub fn builder() -> AuditEventEntityBuilder {
        AuditEventEntityBuilder::default()
    }

    pub fn what(&self) -> Option<&Reference> {
        self.what.as_ref()
    }

    pub fn r#type(&self) -> Option<&Coding> {
        self.r#type.as_ref()
    }

    pub fn role(&self) -> Option<&Coding> {
        self.role.as_ref()
    }

    pub fn lifecycle(&self) -> Option<&Coding> {
        self.lifecycle.as_ref()
    }

    pub fn security_label(&self) -> &[Coding] {
        &self.security_label
    }

    pub fn name(&self) -> Option<&FhirString> {
        self.name.as_ref()
    }

    pub fn description(&self) -> Option<&FhirString> {
        self.description.as_ref()
    }

    pub fn query(&self) -> Option<&Base64Binary> {
        self.query.as_ref()
    }

    pub fn detail(&self) -> &[AuditEventEntityDetail] {
        &self.detail
    }

    pub fn to_builder(&self) -> AuditEventEntityBuilder {
        AuditEventEntityBuilder {
            base: self.base.to_builder(),
            what: self.what.clone(),
            r#type: self.r#type.clone(),
            role: self.role.clone(),
            lifecycle: self.lifecycle.clone(),
            security_label: staged(&self.security_label),
            name: self.name.clone(),
            description: self.description.clone(),
            query: self.query.clone(),
            detail: staged(&self.detail),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditEventEntityBuilder {
    base: BackboneBaseBuilder,
    what: Option<Reference>,
    r#type: Option<Coding>,
    role: Option<Coding>,
    lifecycle: Option<Coding>,
    security_label: Vec<Option<Coding>>,
    name: Option<FhirString>,
    description: Option<FhirString>,
    query: Option<Base64Binary>,
    detail: Vec<Option<AuditEventEntityDetail>>,
}

impl_backbone_builder!(AuditEventEntityBuilder);

impl AuditEventEntityBuilder {
    pub fn what(mut self, what: impl Into<Option<Reference>>) -> Self {
        self.what = what.into();
        self
    }

    pub fn r#type(mut self, r#type: impl Into<Option<Coding>>) -> Self {
        self.r#type = r#type.into();
        self
    }

    pub fn role(mut self, role: impl Into<Option<Coding>>) -> Self {
        self.role = role.into();
        self
    }

    pub fn lifecycle(mut self, lifecycle: impl Into<Option<Coding>>) -> Self {
        self.lifecycle = lifecycle.into();
        self
    }

    pub fn security_label(mut self, label: impl Into<Option<Coding>>) -> Self {
        self.security_label.push(label.into());
        self
    }

    pub fn security_labels(mut self, labels: impl IntoIterator<Item = impl Into<Option<Coding>>>) -> Self {
        self.security_label = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(mut self, name: impl Into<Option<FhirString>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<Option<FhirString>>) -> Self {
        self.description = description.into();
        self
    }

    pub fn query(mut self, query: impl Into<Option<Base64Binary>>) -> Self {
        self.query = query.into();
        self
    }

    pub fn detail(mut self, detail: impl Into<Option<AuditEventEntityDetail>>) -> Self {
        self.detail.push(detail.into());
        self
    }

    pub fn details(mut self, details: impl IntoIterator<Item = impl Into<Option<AuditEventEntityDetail>>>) -> Self {
        self.detail = details.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<AuditEventEntity> {
        let mut check = Validator::new("AuditEvent.entity");
        let base = self.base.build(&mut check);
        let security_label = check.check_list(self.security_label, "securityLabel");
        let detail = check.check_list(self.detail, "detail");
        check.finish_element(|| {
            Some(AuditEventEntity {
                base,
                what: self.what,
                r#type: self.r#type,
                role: self.role,
                lifecycle: self.lifecycle,
                security_label,
                name: self.name,
                description: self.description,
                query: self.query,
                detail,
            })
        })
    }
}

/// A named property of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirValidate)]
#[fhir(type_name = "AuditEvent.entity.detail", kind = "backbone")]
pub struct AuditEventEntityDetail {
    #[fhir(base)]
    base: BackboneBase,
    r#type: FhirString,
    value: AuditEventDetailValue,
}

/// Permitted types for `AuditEvent.entity.detail.value[x]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirChoice)]
pub enum AuditEventDetailValue {
    String(FhirString),
    Base64Binary(Base64Binary),
}

impl AuditEventEntityDetail {
    pub fn builder() -> AuditEventEntityDetailBuilder {
        AuditEventEntityDetailBuilder::default()
    }

    pub fn r#type(&self) -> &FhirString {
        &self.r#type
    }

    pub fn value(&self) -> &AuditEventDetailValue {
        &self.value
    }

    pub fn to_builder(&self) -> AuditEventEntityDetailBuilder {
        AuditEventEntityDetailBuilder {
            base: self.base.to_builder(),
            r#type: Some(self.r#type.clone()),
            value: Some(self.value.clone().into()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditEventEntityDetailBuilder {
    base: BackboneBaseBuilder,
    r#type: Option<FhirString>,
    value: Option<DataType>,
}

impl_backbone_builder!(AuditEventEntityDetailBuilder);

impl AuditEventEntityDetailBuilder {
    pub fn r#type(mut self, r#type: impl Into<Option<FhirString>>) -> Self {
        self.r#type = r#type.into();
        self
    }

    pub fn value(mut self, value: impl Into<AuditEventDetailValue>) -> Self {
        self.value = Some(value.into().into());
        self
    }

    /// Sets the value from a datatype whose concrete type is only known at runtime.
    pub fn value_data_type(mut self, value: impl Into<Option<DataType>>) -> Self {
        self.value = value.into();
        self
    }

    pub fn build(self) -> Result<AuditEventEntityDetail> {
        let mut check = Validator::new("AuditEvent.entity.detail");
        let base = self.base.build(&mut check);
        let r#type = check.require_non_null(self.r#type, "type");
        let value = check.require_choice_element::<AuditEventDetailValue>(self.value, "value");
        check.finish_element(|| {
            Some(AuditEventEntityDetail {
                base,
                r#type: r#type?,
                value: value?,
            })
        })
    }
}
