use atrius_model_macros::{FhirValidate, Visitable};

use crate::datatypes::{CodeableConcept, Period, Reference};
use crate::element::{ElementBase, ElementBaseBuilder, impl_element_builder};
use crate::error::Result;
use crate::primitives::{Code, FhirString, Uri};
use crate::validation::Validator;

/// A business identifier: a value that is unique within a system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirValidate)]
#[fhir(type_name = "Identifier", kind = "element")]
pub struct Identifier {
    #[fhir(base)]
    base: ElementBase,
    #[fhir_binding(
        name = "IdentifierUse",
        strength = "required",
        value_set = "http://hl7.org/fhir/ValueSet/identifier-use|4.3.0",
        description = "Identifies the purpose for this identifier, if known ."
    )]
    r#use: Option<Code>,
    r#type: Option<CodeableConcept>,
    system: Option<Uri>,
    value: Option<FhirString>,
    period: Option<Period>,
    // Box breaks the Identifier -> Reference -> Identifier cycle
    assigner: Option<Box<Reference>>,
}

impl Identifier {
    pub fn builder() -> IdentifierBuilder {
        IdentifierBuilder::default()
    }

    pub fn r#use(&self) -> Option<&Code> {
        self.r#use.as_ref()
    }

    pub fn r#type(&self) -> Option<&CodeableConcept> {
        self.r#type.as_ref()
    }

    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn value(&self) -> Option<&FhirString> {
        self.value.as_ref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn assigner(&self) -> Option<&Reference> {
        self.assigner.as_deref()
    }

    pub fn to_builder(&self) -> IdentifierBuilder {
        IdentifierBuilder {
            base: self.base.to_builder(),
            r#use: self.r#use.clone(),
            r#type: self.r#type.clone(),
            system: self.system.clone(),
            value: self.value.clone(),
            period: self.period.clone(),
            assigner: self.assigner.as_deref().cloned(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IdentifierBuilder {
    base: ElementBaseBuilder,
    r#use: Option<Code>,
    r#type: Option<CodeableConcept>,
    system: Option<Uri>,
    value: Option<FhirString>,
    period: Option<Period>,
    assigner: Option<Reference>,
}

impl_element_builder!(IdentifierBuilder);

impl IdentifierBuilder {
    pub fn r#use(mut self, r#use: impl Into<Option<Code>>) -> Self {
        self.r#use = r#use.into();
        self
    }

    pub fn r#type(mut self, r#type: impl Into<Option<CodeableConcept>>) -> Self {
        self.r#type = r#type.into();
        self
    }

    pub fn system(mut self, system: impl Into<Option<Uri>>) -> Self {
        self.system = system.into();
        self
    }

    pub fn value(mut self, value: impl Into<Option<FhirString>>) -> Self {
        self.value = value.into();
        self
    }

    pub fn period(mut self, period: impl Into<Option<Period>>) -> Self {
        self.period = period.into();
        self
    }

    pub fn assigner(mut self, assigner: impl Into<Option<Reference>>) -> Self {
        self.assigner = assigner.into();
        self
    }

    pub fn build(self) -> Result<Identifier> {
        let mut check = Validator::new("Identifier");
        let base = self.base.build(&mut check);
        check.check_reference_type(self.assigner.as_ref(), "assigner", &["Organization"]);
        check.finish_element(|| {
            Some(Identifier {
                base,
                r#use: self.r#use,
                r#type: self.r#type,
                system: self.system,
                value: self.value,
                period: self.period,
                assigner: self.assigner.map(Box::new),
            })
        })
    }
}
