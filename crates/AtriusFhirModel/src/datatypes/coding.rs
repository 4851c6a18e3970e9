use atrius_model_macros::Visitable;

use crate::element::{ElementBase, ElementBaseBuilder, impl_element_builder};
use crate::error::Result;
use crate::primitives::{Code, FhirBoolean, FhirString, Uri};
use crate::validation::Validator;

/// A reference to a code defined by a terminology system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable)]
#[fhir(type_name = "Coding", kind = "element")]
pub struct Coding {
    #[fhir(base)]
    base: ElementBase,
    system: Option<Uri>,
    version: Option<FhirString>,
    code: Option<Code>,
    display: Option<FhirString>,
    user_selected: Option<FhirBoolean>,
}

impl Coding {
    pub fn builder() -> CodingBuilder {
        CodingBuilder::default()
    }

    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn version(&self) -> Option<&FhirString> {
        self.version.as_ref()
    }

    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    pub fn display(&self) -> Option<&FhirString> {
        self.display.as_ref()
    }

    pub fn user_selected(&self) -> Option<&FhirBoolean> {
        self.user_selected.as_ref()
    }

    pub fn to_builder(&self) -> CodingBuilder {
        CodingBuilder {
            base: self.base.to_builder(),
            system: self.system.clone(),
            version: self.version.clone(),
            code: self.code.clone(),
            display: self.display.clone(),
            user_selected: self.user_selected.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodingBuilder {
    base: ElementBaseBuilder,
    system: Option<Uri>,
    version: Option<FhirString>,
    code: Option<Code>,
    display: Option<FhirString>,
    user_selected: Option<FhirBoolean>,
}

impl_element_builder!(CodingBuilder);

impl CodingBuilder {
    pub fn system(mut self, system: impl Into<Option<Uri>>) -> Self {
        self.system = system.into();
        self
    }

    pub fn version(mut self, version: impl Into<Option<FhirString>>) -> Self {
        self.version = version.into();
        self
    }

    pub fn code(mut self, code: impl Into<Option<Code>>) -> Self {
        self.code = code.into();
        self
    }

    pub fn display(mut self, display: impl Into<Option<FhirString>>) -> Self {
        self.display = display.into();
        self
    }

    pub fn user_selected(mut self, user_selected: impl Into<Option<FhirBoolean>>) -> Self {
        self.user_selected = user_selected.into();
        self
    }

    pub fn build(self) -> Result<Coding> {
        let mut check = Validator::new("Coding");
        let base = self.base.build(&mut check);
        check.finish_element(|| {
            Some(Coding {
                base,
                system: self.system,
                version: self.version,
                code: self.code,
                display: self.display,
                user_selected: self.user_selected,
            })
        })
    }
}
