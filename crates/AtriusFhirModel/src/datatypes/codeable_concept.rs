use atrius_model_macros::Visitable;

use crate::datatypes::Coding;
use crate::element::{ElementBase, ElementBaseBuilder, impl_element_builder, staged};
use crate::error::Result;
use crate::primitives::FhirString;
use crate::validation::Validator;

/// A concept expressed as zero or more codings plus optional text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable)]
#[fhir(type_name = "CodeableConcept", kind = "element")]
pub struct CodeableConcept {
    #[fhir(base)]
    base: ElementBase,
    coding: Vec<Coding>,
    text: Option<FhirString>,
}

impl CodeableConcept {
    pub fn builder() -> CodeableConceptBuilder {
        CodeableConceptBuilder::default()
    }

    pub fn coding(&self) -> &[Coding] {
        &self.coding
    }

    pub fn text(&self) -> Option<&FhirString> {
        self.text.as_ref()
    }

    pub fn to_builder(&self) -> CodeableConceptBuilder {
        CodeableConceptBuilder {
            base: self.base.to_builder(),
            coding: staged(&self.coding),
            text: self.text.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodeableConceptBuilder {
    base: ElementBaseBuilder,
    coding: Vec<Option<Coding>>,
    text: Option<FhirString>,
}

impl_element_builder!(CodeableConceptBuilder);

impl CodeableConceptBuilder {
    pub fn coding(mut self, coding: impl Into<Option<Coding>>) -> Self {
        self.coding.push(coding.into());
        self
    }

    pub fn codings(mut self, coding: impl IntoIterator<Item = impl Into<Option<Coding>>>) -> Self {
        self.coding = coding.into_iter().map(Into::into).collect();
        self
    }

    pub fn text(mut self, text: impl Into<Option<FhirString>>) -> Self {
        self.text = text.into();
        self
    }

    pub fn build(self) -> Result<CodeableConcept> {
        let mut check = Validator::new("CodeableConcept");
        let base = self.base.build(&mut check);
        let coding = check.check_list(self.coding, "coding");
        check.finish_element(|| {
            Some(CodeableConcept {
                base,
                coding,
                text: self.text,
            })
        })
    }
}

impl From<Coding> for CodeableConcept {
    /// A concept holding just this coding.
    fn from(coding: Coding) -> Self {
        CodeableConcept {
            base: ElementBase::default(),
            coding: vec![coding],
            text: None,
        }
    }
}
