//! `Consent`: a healthcare consumer's choices about who may do what with
//! their information.

use atrius_model_macros::{FhirChoice, FhirValidate, Visitable};

use crate::choice::DataType;
use crate::datatypes::{Attachment, CodeableConcept, Coding, Identifier, Period, Reference};
use crate::element::{BackboneBase, BackboneBaseBuilder, impl_backbone_builder, staged};
use crate::error::Result;
use crate::primitives::{Code, DateTime, FhirBoolean, Uri};
use crate::resource::{DomainResourceBase, DomainResourceBaseBuilder, impl_domain_resource_builder};
use crate::validation::Validator;

pub const PERFORMER_TARGETS: &[&str] = &[
    "Organization",
    "Patient",
    "Practitioner",
    "RelatedPerson",
    "PractitionerRole",
];

pub const SOURCE_TARGETS: &[&str] = &[
    "Consent",
    "DocumentReference",
    "Contract",
    "QuestionnaireResponse",
];

pub const ACTOR_TARGETS: &[&str] = &[
    "Device",
    "Group",
    "CareTeam",
    "Organization",
    "Patient",
    "Practitioner",
    "RelatedPerson",
    "PractitionerRole",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirValidate)]
#[fhir(type_name = "Consent", kind = "resource")]
#[fhir_invariant(
    key = "ppc-1",
    severity = "error",
    human = "Either a Policy or PolicyRule",
    expr = "policy.exists() or policyRule.exists()",
    path = "Consent"
)]
#[fhir_invariant(
    key = "ppc-2",
    severity = "error",
    human = "IF Scope=privacy, there must be a patient",
    expr = "patient.exists() or scope.coding.where(system='something' and code='patient-privacy').exists().not()",
    path = "Consent"
)]
#[fhir_invariant(
    key = "ppc-3",
    severity = "error",
    human = "IF Scope=research, there must be a patient",
    expr = "patient.exists() or scope.coding.where(system='something' and code='research').exists().not()",
    path = "Consent"
)]
#[fhir_invariant(
    key = "ppc-4",
    severity = "error",
    human = "IF Scope=adr, there must be a patient",
    expr = "patient.exists() or scope.coding.where(system='something' and code='adr').exists().not()",
    path = "Consent"
)]
#[fhir_invariant(
    key = "ppc-5",
    severity = "error",
    human = "IF Scope=treatment, there must be a patient",
    expr = "patient.exists() or scope.coding.where(system='something' and code='treatment').exists().not()",
    path = "Consent"
)]
#[fhir_invariant(
    key = "consent-6",
    severity = "warning",
    human = "SHALL, if possible, contain a code from value set http://hl7.org/fhir/ValueSet/consent-scope",
    expr = "scope.exists() and scope.memberOf('http://hl7.org/fhir/ValueSet/consent-scope', 'extensible')",
    path = "Consent"
)]
#[fhir_invariant(
    key = "consent-7",
    severity = "warning",
    human = "SHALL, if possible, contain a code from value set http://hl7.org/fhir/ValueSet/consent-category",
    expr = "category.exists() and category.all(memberOf('http://hl7.org/fhir/ValueSet/consent-category', 'extensible'))",
    path = "Consent"
)]
#[fhir_invariant(
    key = "consent-8",
    severity = "warning",
    human = "SHALL, if possible, contain a code from value set http://hl7.org/fhir/ValueSet/consent-policy",
    expr = "policyRule.exists() implies (policyRule.memberOf('http://hl7.org/fhir/ValueSet/consent-policy', 'extensible'))",
    path = "Consent"
)]
pub struct Consent {
    #[fhir(base)]
    base: DomainResourceBase,
    identifier: Vec<Identifier>,
    #[fhir_binding(
        name = "ConsentState",
        strength = "required",
        value_set = "http://hl7.org/fhir/ValueSet/consent-state-codes|4.3.0",
        description = "Indicates the state of the consent."
    )]
    status: Code,
    #[fhir_binding(
        name = "ConsentScope",
        strength = "extensible",
        value_set = "http://hl7.org/fhir/ValueSet/consent-scope",
        description = "The four anticipated uses for the Consent Resource."
    )]
    scope: CodeableConcept,
    #[fhir_binding(
        name = "ConsentCategory",
        strength = "extensible",
        value_set = "http://hl7.org/fhir/ValueSet/consent-category",
        description = "A classification of the type of consents found in a consent statement."
    )]
    category: Vec<CodeableConcept>,
    patient: Option<Reference>,
    date_time: Option<DateTime>,
    performer: Vec<Reference>,
    organization: Vec<Reference>,
    source: Option<ConsentSource>,
    policy: Vec<ConsentPolicy>,
    #[fhir_binding(
        name = "ConsentPolicyRule",
        strength = "extensible",
        value_set = "http://hl7.org/fhir/ValueSet/consent-policy",
        description = "Regulatory policy examples."
    )]
    policy_rule: Option<CodeableConcept>,
    verification: Vec<ConsentVerification>,
    provision: Option<ConsentProvision>,
}

/// Permitted types for `Consent.source[x]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirChoice)]
pub enum ConsentSource {
    Attachment(Attachment),
    Reference(Reference),
}

impl Consent {
    pub fn builder() -> ConsentBuilder {
        ConsentBuilder::default()
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    pub fn status(&self) -> &Code {
        &self.status
    }

    pub fn scope(&self) -> &CodeableConcept {
        &self.scope
    }

    pub fn category(&self) -> &[CodeableConcept] {
        &self.category
    }

    pub fn patient(&self) -> Option<&Reference> {
        self.patient.as_ref()
    }

    pub fn date_time(&self) -> Option<&DateTime> {
        self.date_time.as_ref()
    }

    pub fn performer(&self) -> &[Reference] {
        &self.performer
    }

    pub fn organization(&self) -> &[Reference] {
        &self.organization
    }

    pub fn source(&self) -> Option<&ConsentSource> {
        self.source.as_ref()
    }

    pub fn policy(&self) -> &[ConsentPolicy] {
        &self.policy
    }

    pub fn policy_rule(&self) -> Option<&CodeableConcept> {
        self.policy_rule.as_ref()
    }

    pub fn verification(&self) -> &[ConsentVerification] {
        &self.verification
    }

    pub fn provision(&self) -> Option<&ConsentProvision> {
        self.provision.as_ref()
    }

    pub fn to_builder(&self) -> ConsentBuilder {
        ConsentBuilder {
            base: self.base.to_builder(),
            identifier: staged(&self.identifier),
            status: Some(self.status.clone()),
            scope: Some(self.scope.clone()),
            category: staged(&self.category),
            patient: self.patient.clone(),
            date_time: self.date_time.clone(),
            performer: staged(&self.performer),
            organization: staged(&self.organization),
            source: self.source.clone().map(DataType::from),
            policy: staged(&self.policy),
            policy_rule: self.policy_rule.clone(),
            verification: staged(&self.verification),
            provision: self.provision.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConsentBuilder {
    base: DomainResourceBaseBuilder,
    identifier: Vec<Option<Identifier>>,
    status: Option<Code>,
    scope: Option<CodeableConcept>,
    category: Vec<Option<CodeableConcept>>,
    patient: Option<Reference>,
    date_time: Option<DateTime>,
    performer: Vec<Option<Reference>>,
    organization: Vec<Option<Reference>>,
    source: Option<DataType>,
    policy: Vec<Option<ConsentPolicy>>,
    policy_rule: Option<CodeableConcept>,
    verification: Vec<Option<ConsentVerification>>,
    provision: Option<ConsentProvision>,
}

impl_domain_resource_builder!(ConsentBuilder);

impl ConsentBuilder {
    pub fn identifier(mut self, identifier: impl Into<Option<Identifier>>) -> Self {
        self.identifier.push(identifier.into());
        self
    }

    pub fn identifiers(mut self, identifiers: impl IntoIterator<Item = impl Into<Option<Identifier>>>) -> Self {
        self.identifier = identifiers.into_iter().map(Into::into).collect();
        self
    }

    pub fn status(mut self, status: impl Into<Option<Code>>) -> Self {
        self.status = status.into();
        self
    }

    pub fn scope(mut self, scope: impl Into<Option<CodeableConcept>>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn category(mut self, category: impl Into<Option<CodeableConcept>>) -> Self {
        self.category.push(category.into());
        self
    }

    pub fn categories(mut self, categories: impl IntoIterator<Item = impl Into<Option<CodeableConcept>>>) -> Self {
        self.category = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn patient(mut self, patient: impl Into<Option<Reference>>) -> Self {
        self.patient = patient.into();
        self
    }

    pub fn date_time(mut self, date_time: impl Into<Option<DateTime>>) -> Self {
        self.date_time = date_time.into();
        self
    }

    pub fn performer(mut self, performer: impl Into<Option<Reference>>) -> Self {
        self.performer.push(performer.into());
        self
    }

    pub fn performers(mut self, performers: impl IntoIterator<Item = impl Into<Option<Reference>>>) -> Self {
        self.performer = performers.into_iter().map(Into::into).collect();
        self
    }

    pub fn organization(mut self, organization: impl Into<Option<Reference>>) -> Self {
        self.organization.push(organization.into());
        self
    }

    pub fn organizations(mut self, organizations: impl IntoIterator<Item = impl Into<Option<Reference>>>) -> Self {
        self.organization = organizations.into_iter().map(Into::into).collect();
        self
    }

    pub fn source(mut self, source: impl Into<ConsentSource>) -> Self {
        self.source = Some(source.into().into());
        self
    }

    /// Sets the source from a datatype whose concrete type is only known at runtime.
    pub fn source_data_type(mut self, source: impl Into<Option<DataType>>) -> Self {
        self.source = source.into();
        self
    }

    pub fn policy(mut self, policy: impl Into<Option<ConsentPolicy>>) -> Self {
        self.policy.push(policy.into());
        self
    }

    pub fn policies(mut self, policies: impl IntoIterator<Item = impl Into<Option<ConsentPolicy>>>) -> Self {
        self.policy = policies.into_iter().map(Into::into).collect();
        self
    }

    pub fn policy_rule(mut self, policy_rule: impl Into<Option<CodeableConcept>>) -> Self {
        self.policy_rule = policy_rule.into();
        self
    }

    pub fn verification(mut self, verification: impl Into<Option<ConsentVerification>>) -> Self {
        self.verification.push(verification.into());
        self
    }

    pub fn verifications(mut self, verifications: impl IntoIterator<Item = impl Into<Option<ConsentVerification>>>) -> Self {
        self.verification = verifications.into_iter().map(Into::into).collect();
        self
    }

    pub fn provision(mut self, provision: impl Into<Option<ConsentProvision>>) -> Self {
        self.provision = provision.into();
        self
    }

    pub fn build(self) -> Result<Consent> {
        let mut check = Validator::new("Consent");
        let base = self.base.build(&mut check);
        let identifier = check.check_list(self.identifier, "identifier");
        let status = check.require_non_null(self.status, "status");
        let scope = check.require_non_null(self.scope, "scope");
        let category = check.require_non_empty_list(self.category, "category");
        let performer = check.check_list(self.performer, "performer");
        let organization = check.check_list(self.organization, "organization");
        let source = check.check_choice_element::<ConsentSource>(self.source, "source");
        let policy = check.check_list(self.policy, "policy");
        let verification = check.check_list(self.verification, "verification");
        check.check_reference_type(self.patient.as_ref(), "patient", &["Patient"]);
        check.check_reference_types(&performer, "performer", PERFORMER_TARGETS);
        check.check_reference_types(&organization, "organization", &["Organization"]);
        check.check_choice_reference_type(source.as_ref(), "source", SOURCE_TARGETS);
        check.finish(|| {
            Some(Consent {
                base,
                identifier,
                status: status?,
                scope: scope?,
                category,
                patient: self.patient,
                date_time: self.date_time,
                performer,
                organization,
                source,
                policy,
                policy_rule: self.policy_rule,
                verification,
                provision: self.provision,
            })
        })
    }
}

/// A policy the consent refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirValidate)]
#[fhir(type_name = "Consent.policy", kind = "backbone")]
pub struct ConsentPolicy {
    #[fhir(base)]
    base: BackboneBase,
    authority: Option<Uri>,
    uri: Option<Uri>,
}

impl ConsentPolicy {
    pub fn builder() -> ConsentPolicyBuilder {
        ConsentPolicyBuilder::default()
    }

    pub fn authority(&self) -> Option<&Uri> {
        self.authority.as_ref()
    }

    pub fn uri(&self) -> Option<&Uri> {
        self.uri.as_ref()
    }

    pub fn to_builder(&self) -> ConsentPolicyBuilder {
        ConsentPolicyBuilder {
            base: self.base.to_builder(),
            authority: self.authority.clone(),
            uri: self.uri.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConsentPolicyBuilder {
    base: BackboneBaseBuilder,
    authority: Option<Uri>,
    uri: Option<Uri>,
}

impl_backbone_builder!(ConsentPolicyBuilder);

impl ConsentPolicyBuilder {
    pub fn authority(mut self, authority: impl Into<Option<Uri>>) -> Self {
        self.authority = authority.into();
        self
    }

    pub fn uri(mut self, uri: impl Into<Option<Uri>>) -> Self {
        self.uri = uri.into();
        self
    }

    pub fn build(self) -> Result<ConsentPolicy> {
        let mut check = Validator::new("Consent.policy");
        let base = self.base.build(&mut check);
        check.finish_element(|| {
            Some(ConsentPolicy {
                base,
                authority: self.authority,
                uri: self.uri,
            })
        })
    }
}

/// Whether the consent was confirmed with the patient or their representative.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirValidate)]
#[fhir(type_name = "Consent.verification", kind = "backbone")]
pub struct ConsentVerification {
    #[fhir(base)]
    base: BackboneBase,
    verified: FhirBoolean,
    verified_with: Option<Reference>,
    verification_date: Option<DateTime>,
}

impl ConsentVerification {
    pub fn builder() -> ConsentVerificationBuilder {
        ConsentVerificationBuilder::default()
    }

    pub fn verified(&self) -> &FhirBoolean {
        &self.verified
    }

    pub fn verified_with(&self) -> Option<&Reference> {
        self.verified_with.as_ref()
    }

    pub fn verification_date(&self) -> Option<&DateTime> {
        self.verification_date.as_ref()
    }

    pub fn to_builder(&self) -> ConsentVerificationBuilder {
        ConsentVerificationBuilder {
            base: self.base.to_builder(),
            verified: Some(self.verified.clone()),
            verified_with: self.verified_with.clone(),
            verification_date: self.verification_date.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConsentVerificationBuilder {
    base: BackboneBaseBuilder,
    verified: Option<FhirBoolean>,
    verified_with: Option<Reference>,
    verification_date: Option<DateTime>,
}

impl_backbone_builder!(ConsentVerificationBuilder);

impl ConsentVerificationBuilder {
    pub fn verified(mut self, verified: impl Into<Option<FhirBoolean>>) -> Self {
        self.verified = verified.into();
        self
    }

    pub fn verified_with(mut self, verified_with: impl Into<Option<Reference>>) -> Self {
        self.verified_with = verified_with.into();
        self
    }

    pub fn verification_date(mut self, date: impl Into<Option<DateTime>>) -> Self {
        self.verification_date = date.into();
        self
    }

    pub fn build(self) -> Result<ConsentVerification> {
        let mut check = Validator::new("Consent.verification");
        let base = self.base.build(&mut check);
        let verified = check.require_non_null(self.verified, "verified");
        check.check_reference_type(
            self.verified_with.as_ref(),
            "verifiedWith",
            &["Patient", "RelatedPerson"],
        );
        check.finish_element(|| {
            Some(ConsentVerification {
                base,
                verified: verified?,
                verified_with: self.verified_with,
                verification_date: self.verification_date,
            })
        })
    }
}

/// A rule (permit or deny) with optional nested exceptions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirValidate)]
#[fhir(type_name = "Consent.provision", kind = "backbone")]
pub struct ConsentProvision {
    #[fhir(base)]
    base: BackboneBase,
    #[fhir_binding(
        name = "ConsentProvisionType",
        strength = "required",
        value_set = "http://hl7.org/fhir/ValueSet/consent-provision-type|4.3.0",
        description = "How a rule statement is applied, such as adding additional consent or removing consent."
    )]
    r#type: Option<Code>,
    period: Option<Period>,
    actor: Vec<ConsentProvisionActor>,
    #[fhir_binding(
        name = "ConsentAction",
        strength = "example",
        value_set = "http://hl7.org/fhir/ValueSet/consent-action",
        description = "Detailed codes for the consent action."
    )]
    action: Vec<CodeableConcept>,
    #[fhir_binding(
        name = "SecurityLabels",
        strength = "extensible",
        value_set = "http://hl7.org/fhir/ValueSet/security-labels",
        description = "Security Labels from the Healthcare Privacy and Security Classification System."
    )]
    #[fhir_invariant(
        key = "consent-10",
        severity = "warning",
        human = "SHALL, if possible, contain a code from value set http://hl7.org/fhir/ValueSet/security-labels",
        expr = "$this.memberOf('http://hl7.org/fhir/ValueSet/security-labels', 'extensible')",
        path = "Consent.provision.securityLabel"
    )]
    security_label: Vec<Coding>,
    #[fhir_binding(
        name = "PurposeOfUse",
        strength = "extensible",
        value_set = "http://terminology.hl7.org/ValueSet/v3-PurposeOfUse",
        description = "What purposes of use are controlled by this exception. If more than one label is specified, operations must have all the specified labels."
    )]
    #[fhir_invariant(
        key = "consent-11",
        severity = "warning",
        human = "SHALL, if possible, contain a code from value set http://terminology.hl7.org/ValueSet/v3-PurposeOfUse",
        expr = "$this.memberOf('http://terminology.hl7.org/ValueSet/v3-PurposeOfUse', 'extensible')",
        path = "Consent.provision.purpose"
    )]
    purpose: Vec<Coding>,
    #[fhir_binding(
        name = "ConsentContentClass",
        strength = "extensible",
        value_set = "http://hl7.org/fhir/ValueSet/consent-content-class",
        description = "The class (type) of information a consent rule covers."
    )]
    #[fhir_invariant(
        key = "consent-12",
        severity = "warning",
        human = "SHALL, if possible, contain a code from value set http://hl7.org/fhir/ValueSet/consent-content-class",
        expr = "$this.memberOf('http://hl7.org/fhir/ValueSet/consent-content-class', 'extensible')",
        path = "Consent.provision.class"
    )]
    class: Vec<Coding>,
    #[fhir_binding(
        name = "ConsentContentCode",
        strength = "example",
        value_set = "http://hl7.org/fhir/ValueSet/consent-content-code",
        description = "If this code is found in an instance, then the exception applies."
    )]
    code: Vec<CodeableConcept>,
    data_period: Option<Period>,
    data: Vec<ConsentProvisionData>,
    provision: Vec<ConsentProvision>,
}

impl ConsentProvision {
    pub fn builder() -> ConsentProvisionBuilder {
        ConsentProvisionBuilder::default()
    }

    pub fn r#type(&self) -> Option<&Code> {
        self.r#type.as_ref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn actor(&self) -> &[ConsentProvisionActor] {
        &self.actor
    }

    pub fn action(&self) -> &[CodeableConcept] {
        &self.action
    }

    pub fn security_label(&self) -> &[Coding] {
        &self.security_label
    }

    pub fn purpose(&self) -> &[Coding] {
        &self.purpose
    }

    pub fn class(&self) -> &[Coding] {
        &self.class
    }

    pub fn code(&self) -> &[CodeableConcept] {
        &self.code
    }

    pub fn data_period(&self) -> Option<&Period> {
        self.data_period.as_ref()
    }

    pub fn data(&self) -> &[ConsentProvisionData] {
        &self.data
    }

    pub fn provision(&self) -> &[ConsentProvision] {
        &self.provision
    }

    pub fn to_builder(&self) -> ConsentProvisionBuilder {
        ConsentProvisionBuilder {
            base: self.base.to_builder(),
            r#type: self.r#type.clone(),
            period: self.period.clone(),
            actor: staged(&self.actor),
            action: staged(&self.action),
            security_label: staged(&self.security_label),
            purpose: staged(&self.purpose),
            class: staged(&self.class),
            code: staged(&self.code),
            data_period: self.data_period.clone(),
            data: staged(&self.data),
            provision: staged(&self.provision),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConsentProvisionBuilder {
    base: BackboneBaseBuilder,
    r#type: Option<Code>,
    period: Option<Period>,
    actor: Vec<Option<ConsentProvisionActor>>,
    action: Vec<Option<CodeableConcept>>,
    security_label: Vec<Option<Coding>>,
    purpose: Vec<Option<Coding>>,
    class: Vec<Option<Coding>>,
    code: Vec<Option<CodeableConcept>>,
    data_period: Option<Period>,
    data: Vec<Option<ConsentProvisionData>>,
    provision: Vec<Option<ConsentProvision>>,
}

impl_backbone_builder!(ConsentProvisionBuilder);

impl ConsentProvisionBuilder {
    pub fn r#type(mut self, r#type: impl Into<Option<Code>>) -> Self {
        self.r#type = r#type.into();
        self
    }

    pub fn period(mut self, period: impl Into<Option<Period>>) -> Self {
        self.period = period.into();
        self
    }

    pub fn actor(mut self, actor: impl Into<Option<ConsentProvisionActor>>) -> Self {
        self.actor.push(actor.into());
        self
    }

    pub fn actors(mut self, actors: impl IntoIterator<Item = impl Into<Option<ConsentProvisionActor>>>) -> Self {
        self.actor = actors.into_iter().map(Into::into).collect();
        self
    }

    pub fn action(mut self, action: impl Into<Option<CodeableConcept>>) -> Self {
        self.action.push(action.into());
        self
    }

    pub fn actions(mut self, actions: impl IntoIterator<Item = impl Into<Option<CodeableConcept>>>) -> Self {
        self.action = actions.into_iter().map(Into::into).collect();
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

    pub fn purpose(mut self, purpose: impl Into<Option<Coding>>) -> Self {
        self.purpose.push(purpose.into());
        self
    }

    pub fn purposes(mut self, purposes: impl IntoIterator<Item = impl Into<Option<Coding>>>) -> Self {
        self.purpose = purposes.into_iter().map(Into::into).collect();
        self
    }

    pub fn class(mut self, class: impl Into<Option<Coding>>) -> Self {
        self.class.push(class.into());
        self
    }

    pub fn classes(mut self, classes: impl IntoIterator<Item = impl Into<Option<Coding>>>) -> Self {
        self.class = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn code(mut self, code: impl Into<Option<CodeableConcept>>) -> Self {
        self.code.push(code.into());
        self
    }

    pub fn codes(mut self, codes: impl IntoIterator<Item = impl Into<Option<CodeableConcept>>>) -> Self {
        self.code = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn data_period(mut self, data_period: impl Into<Option<Period>>) -> Self {
        self.data_period = data_period.into();
        self
    }

    pub fn data(mut self, data: impl Into<Option<ConsentProvisionData>>) -> Self {
        self.data.push(data.into());
        self
    }

    pub fn data_all(mut self, data: impl IntoIterator<Item = impl Into<Option<ConsentProvisionData>>>) -> Self {
        self.data = data.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a nested provision (an exception to this one).
    pub fn provision(mut self, provision: impl Into<Option<ConsentProvision>>) -> Self {
        self.provision.push(provision.into());
        self
    }

    pub fn provisions(mut self, provisions: impl IntoIterator<Item = impl Into<Option<ConsentProvision>>>) -> Self {
        self.provision = provisions.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<ConsentProvision> {
        let mut check = Validator::new("Consent.provision");
        let base = self.base.build(&mut check);
        let actor = check.check_list(self.actor, "actor");
        let action = check.check_list(self.action, "action");
        let security_label = check.check_list(self.security_label, "securityLabel");
        let purpose = check.check_list(self.purpose, "purpose");
        let class = check.check_list(self.class, "class");
        let code = check.check_list(self.code, "code");
        let data = check.check_list(self.data, "data");
        let provision = check.check_list(self.provision, "provision");
        check.finish_element(|| {
            Some(ConsentProvision {
                base,
                r#type: self.r#type,
                period: self.period,
                actor,
                action,
                security_label,
                purpose,
                class,
                code,
                data_period: self.data_period,
                data,
                provision,
            })
        })
    }
}

/// Who the provision applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirValidate)]
#[fhir(type_name = "Consent.provision.actor", kind = "backbone")]
pub struct ConsentProvisionActor {
    #[fhir(base)]
    base: BackboneBase,
    #[fhir_binding(
        name = "ConsentActorRole",
        strength = "extensible",
        value_set = "http://hl7.org/fhir/ValueSet/security-role-type",
        description = "How an actor is involved in the consent considerations."
    )]
    #[fhir_invariant(
        key = "consent-9",
        severity = "warning",
        human = "SHALL, if possible, contain a code from value set http://hl7.org/fhir/ValueSet/security-role-type",
        expr = "$this.memberOf('http://hl7.org/fhir/ValueSet/security-role-type', 'extensible')",
        path = "Consent.provision.actor.role"
    )]
    role: CodeableConcept,
    reference: Reference,
}

impl ConsentProvisionActor {
    pub fn builder() -> ConsentProvisionActorBuilder {
        ConsentProvisionActorBuilder::default()
    }

    pub fn role(&self) -> &CodeableConcept {
        &self.role
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    pub fn to_builder(&self) -> ConsentProvisionActorBuilder {
        ConsentProvisionActorBuilder {
            base: self.base.to_builder(),
            role: Some(self.role.clone()),
            reference: Some(self.reference.clone()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConsentProvisionActorBuilder {
    base: BackboneBaseBuilder,
    role: Option<CodeableConcept>,
    reference: Option<Reference>,
}

impl_backbone_builder!(ConsentProvisionActorBuilder);

impl ConsentProvisionActorBuilder {
    pub fn role(mut self, role: impl Into<Option<CodeableConcept>>) -> Self {
        self.role = role.into();
        self
    }

    pub fn reference(mut self, reference: impl Into<Option<Reference>>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn build(self) -> Result<ConsentProvisionActor> {
        let mut check = Validator::new("Consent.provision.actor");
        let base = self.base.build(&mut check);
        let role = check.require_non_null(self.role, "role");
        let reference = check.require_non_null(self.reference, "reference");
        check.check_reference_type(reference.as_ref(), "reference", ACTOR_TARGETS);
        check.finish_element(|| {
            Some(ConsentProvisionActor {
                base,
                role: role?,
                reference: reference?,
            })
        })
    }
}

/// A resource the provision is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirValidate)]
#[fhir(type_name = "Consent.provision.data", kind = "backbone")]
pub struct ConsentProvisionData {
    #[fhir(base)]
    base: BackboneBase,
    #[fhir_binding(
        name = "ConsentDataMeaning",
        strength = "required",
        value_set = "http://hl7.org/fhir/ValueSet/consent-data-meaning|4.3.0",
        description = "How a resource reference is interpreted when testing consent restrictions."
    )]
    meaning: Code,
    reference: Reference,
}

impl ConsentProvisionData {
    pub fn builder() -> ConsentProvisionDataBuilder {
        ConsentProvisionDataBuilder::default()
    }

    pub fn meaning(&self) -> &Code {
        &self.meaning
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    pub fn to_builder(&self) -> ConsentProvisionDataBuilder {
        ConsentProvisionDataBuilder {
            base: self.base.to_builder(),
            meaning: Some(self.meaning.clone()),
            reference: Some(self.reference.clone()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConsentProvisionDataBuilder {
    base: BackboneBaseBuilder,
    meaning: Option<Code>,
    reference: Option<Reference>,
}

impl_backbone_builder!(ConsentProvisionDataBuilder);

impl ConsentProvisionDataBuilder {
    pub fn meaning(mut self, meaning: impl Into<Option<Code>>) -> Self {
        self.meaning = meaning.into();
        self
    }

    pub fn reference(mut self, reference: impl Into<Option<Reference>>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn build(self) -> Result<ConsentProvisionData> {
        let mut check = Validator::new("Consent.provision.data");
        let base = self.base.build(&mut check);
        let meaning = check.require_non_null(self.meaning, "meaning");
        let reference = check.require_non_null(self.reference, "reference");
        check.finish_element(|| {
            Some(ConsentProvisionData {
                base,
                meaning: meaning?,
                reference: reference?,
            })
        })
    }
}
