use atrius_model_macros::{FhirValidate, Visitable};

use crate::element::{ElementBase, ElementBaseBuilder, impl_element_builder};
use crate::error::Result;
use crate::primitives::DateTime;
use crate::validation::Validator;

/// A time range defined by start and/or end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirValidate)]
#[fhir(type_name = "Period", kind = "element")]
#[fhir_invariant(
    key = "per-1",
    severity = "error",
    human = "If present, start SHALL have a lower value than end",
    expr = "start.hasValue().not() or end.hasValue().not() or (start <= end)",
    path = "Period"
)]
pub struct Period {
    #[fhir(base)]
    base: ElementBase,
    start: Option<DateTime>,
    end: Option<DateTime>,
}

impl Period {
    pub fn builder() -> PeriodBuilder {
        PeriodBuilder::default()
    }

    pub fn start(&self) -> Option<&DateTime> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&DateTime> {
        self.end.as_ref()
    }

    pub fn to_builder(&self) -> PeriodBuilder {
        PeriodBuilder {
            base: self.base.to_builder(),
            start: self.start.clone(),
            end: self.end.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PeriodBuilder {
    base: ElementBaseBuilder,
    start: Option<DateTime>,
    end: Option<DateTime>,
}

impl_element_builder!(PeriodBuilder);

impl PeriodBuilder {
    pub fn start(mut self, start: impl Into<Option<DateTime>>) -> Self {
        self.start = start.into();
        self
    }

    pub fn end(mut self, end: impl Into<Option<DateTime>>) -> Self {
        self.end = end.into();
        self
    }

    pub fn build(self) -> Result<Period> {
        let mut check = Validator::new("Period");
        let base = self.base.build(&mut check);
        check.finish_element(|| {
            Some(Period {
                base,
                start: self.start,
                end: self.end,
            })
        })
    }
}
