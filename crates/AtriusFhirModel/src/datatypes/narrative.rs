use atrius_model_macros::{FhirValidate, Visitable};

use crate::element::{ElementBase, ElementBaseBuilder, impl_element_builder};
use crate::error::Result;
use crate::primitives::{Code, Xhtml};
use crate::validation::Validator;

/// Human-readable summary of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirValidate)]
#[fhir(type_name = "Narrative", kind = "element")]
#[fhir_invariant(
    key = "txt-1",
    severity = "error",
    human = "The narrative SHALL contain only the basic html formatting elements and attributes",
    expr = "htmlChecks()",
    path = "Narrative.div"
)]
#[fhir_invariant(
    key = "txt-2",
    severity = "error",
    human = "The narrative SHALL have some non-whitespace content",
    expr = "htmlChecks()",
    path = "Narrative.div"
)]
pub struct Narrative {
    #[fhir(base)]
    base: ElementBase,
    #[fhir_binding(
        name = "NarrativeStatus",
        strength = "required",
        value_set = "http://hl7.org/fhir/ValueSet/narrative-status|4.3.0",
        description = "The status of a resource narrative."
    )]
    status: Code,
    div: Xhtml,
}

impl Narrative {
    pub fn builder() -> NarrativeBuilder {
        NarrativeBuilder::default()
    }

    pub fn status(&self) -> &Code {
        &self.status
    }

    pub fn div(&self) -> &Xhtml {
        &self.div
    }

    pub fn to_builder(&self) -> NarrativeBuilder {
        NarrativeBuilder {
            base: self.base.to_builder(),
            status: Some(self.status.clone()),
            div: Some(self.div.clone()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NarrativeBuilder {
    base: ElementBaseBuilder,
    status: Option<Code>,
    div: Option<Xhtml>,
}

impl_element_builder!(NarrativeBuilder);

impl NarrativeBuilder {
    pub fn status(mut self, status: impl Into<Option<Code>>) -> Self {
        self.status = status.into();
        self
    }

    pub fn div(mut self, div: impl Into<Option<Xhtml>>) -> Self {
        self.div = div.into();
        self
    }

    pub fn build(self) -> Result<Narrative> {
        let mut check = Validator::new("Narrative");
        let base = self.base.build(&mut check);
        let status = check.require_non_null(self.status, "status");
        let div = check.require_non_null(self.div, "div");
        check.finish_element(|| {
            Some(Narrative {
                base,
                status: status?,
                div: div?,
            })
        })
    }
}
