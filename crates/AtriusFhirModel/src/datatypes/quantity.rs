use atrius_model_macros::{FhirValidate, Visitable};

use crate::element::{ElementBase, ElementBaseBuilder, impl_element_builder};
use crate::error::Result;
use crate::primitives::{Code, FhirDecimal, FhirString, Uri};
use crate::validation::Validator;

/// A measured amount.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirValidate)]
#[fhir(type_name = "Quantity", kind = "element")]
#[fhir_invariant(
    key = "qty-3",
    severity = "error",
    human = "If a code for the unit is present, the system SHALL also be present",
    expr = "code.empty() or system.exists()",
    path = "Quantity"
)]
pub struct Quantity {
    #[fhir(base)]
    base: ElementBase,
    value: Option<FhirDecimal>,
    #[fhir_binding(
        name = "QuantityComparator",
        strength = "required",
        value_set = "http://hl7.org/fhir/ValueSet/quantity-comparator|4.3.0",
        description = "How the Quantity should be understood and represented."
    )]
    comparator: Option<Code>,
    unit: Option<FhirString>,
    system: Option<Uri>,
    code: Option<Code>,
}

impl Quantity {
    pub fn builder() -> QuantityBuilder {
        QuantityBuilder::default()
    }

    pub fn value(&self) -> Option<&FhirDecimal> {
        self.value.as_ref()
    }

    pub fn comparator(&self) -> Option<&Code> {
        self.comparator.as_ref()
    }

    pub fn unit(&self) -> Option<&FhirString> {
        self.unit.as_ref()
    }

    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    pub fn to_builder(&self) -> QuantityBuilder {
        QuantityBuilder {
            base: self.base.to_builder(),
            value: self.value.clone(),
            comparator: self.comparator.clone(),
            unit: self.unit.clone(),
            system: self.system.clone(),
            code: self.code.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuantityBuilder {
    base: ElementBaseBuilder,
    value: Option<FhirDecimal>,
    comparator: Option<Code>,
    unit: Option<FhirString>,
    system: Option<Uri>,
    code: Option<Code>,
}

impl_element_builder!(QuantityBuilder);

impl QuantityBuilder {
    pub fn value(mut self, value: impl Into<Option<FhirDecimal>>) -> Self {
        self.value = value.into();
        self
    }

    pub fn comparator(mut self, comparator: impl Into<Option<Code>>) -> Self {
        self.comparator = comparator.into();
        self
    }

    pub fn unit(mut self, unit: impl Into<Option<FhirString>>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn system(mut self, system: impl Into<Option<Uri>>) -> Self {
        self.system = system.into();
        self
    }

    pub fn code(mut self, code: impl Into<Option<Code>>) -> Self {
        self.code = code.into();
        self
    }

    pub fn build(self) -> Result<Quantity> {
        let mut check = Validator::new("Quantity");
        let base = self.base.build(&mut check);
        check.finish_element(|| {
            Some(Quantity {
                base,
                value: self.value,
                comparator: self.comparator,
                unit: self.unit,
                system: self.system,
                code: self.code,
            })
        })
    }
}
