use atrius_model_macros::{FhirChoice, FhirValidate, Visitable};

use crate::choice::DataType;
use crate::datatypes::{
    Attachment, CodeableConcept, Coding, Identifier, Period, Quantity, Reference,
};
use crate::element::{ElementBase, ElementBaseBuilder, impl_element_builder};
use crate::error::Result;
use crate::primitives::{
    Base64Binary, Canonical, Code, DateTime, FhirBoolean, FhirDecimal, FhirString, Id, Instant,
    Integer, Markdown, PositiveInt, UnsignedInt, Uri, Url,
};
use crate::validation::Validator;

/// An additional piece of data not covered by the base definition.
///
/// Extensions nest: a complex extension carries child extensions instead of
/// a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirValidate)]
#[fhir(type_name = "Extension", kind = "element")]
#[fhir_invariant(
    key = "ext-1",
    severity = "error",
    human = "Must have either extensions or value[x], not both",
    expr = "extension.exists() != value.exists()",
    path = "Extension"
)]
pub struct Extension {
    #[fhir(base)]
    base: ElementBase,
    #[fhir(skip)]
    url: String,
    value: Option<ExtensionValue>,
}

/// Permitted types for `Extension.value[x]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirChoice)]
pub enum ExtensionValue {
    Base64Binary(Base64Binary),
    Boolean(FhirBoolean),
    Canonical(Canonical),
    Code(Code),
    DateTime(DateTime),
    Decimal(FhirDecimal),
    Id(Id),
    Instant(Instant),
    Integer(Integer),
    Markdown(Markdown),
    PositiveInt(PositiveInt),
    String(FhirString),
    UnsignedInt(UnsignedInt),
    Uri(Uri),
    Url(Url),
    Attachment(Attachment),
    Coding(Coding),
    CodeableConcept(CodeableConcept),
    Identifier(Identifier),
    Period(Period),
    Quantity(Quantity),
    Reference(Reference),
}

impl Extension {
    pub fn builder() -> ExtensionBuilder {
        ExtensionBuilder::default()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn value(&self) -> Option<&ExtensionValue> {
        self.value.as_ref()
    }

    pub fn to_builder(&self) -> ExtensionBuilder {
        ExtensionBuilder {
            base: self.base.to_builder(),
            url: Some(self.url.clone()),
            value: self.value.clone().map(DataType::from),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExtensionBuilder {
    base: ElementBaseBuilder,
    url: Option<String>,
    value: Option<DataType>,
}

impl_element_builder!(ExtensionBuilder);

impl ExtensionBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn value(mut self, value: impl Into<ExtensionValue>) -> Self {
        self.value = Some(value.into().into());
        self
    }

    /// Sets the value from a datatype whose concrete type is only known at runtime.
    pub fn value_data_type(mut self, value: impl Into<Option<DataType>>) -> Self {
        self.value = value.into();
        self
    }

    pub fn build(self) -> Result<Extension> {
        let mut check = Validator::new("Extension");
        let base = self.base.build(&mut check);
        let url = check.require_non_null(self.url, "url");
        if let Some(url) = &url {
            check.check_value("url", crate::validation::check_uri(url));
        }
        let value = check.check_choice_element::<ExtensionValue>(self.value, "value");
        check.finish_element(|| {
            Some(Extension {
                base,
                url: url?,
                value,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementBuilder;
    use crate::visitor::Visitable;

    const URL: &str = "http://example.org/fhir/StructureDefinition/flag";

    #[test]
    fn test_simple_extension() {
        let ext = Extension::builder()
            .url(URL)
            .value(FhirBoolean::from(true))
            .build()
            .unwrap();
        assert_eq!(ext.url(), URL);
        assert!(matches!(ext.value(), Some(ExtensionValue::Boolean(_))));
        assert!(ext.has_structural_content());
    }

    #[test]
    fn test_complex_extension_nests() {
        let inner = Extension::builder()
            .url("part")
            .value(Code::from("x"))
            .build()
            .unwrap();
        let outer = Extension::builder().url(URL).extension(inner).build().unwrap();
        assert!(!outer.has_structural_content());
        assert_eq!((&outer as &dyn Visitable).child_nodes().len(), 1);
    }

    #[test]
    fn test_url_required_and_checked() {
        let err = Extension::builder().value(Integer::from(1)).build().unwrap_err();
        assert_eq!(err.violations()[0].path, "Extension.url");

        let err = Extension::builder()
            .url("has a space")
            .value(Integer::from(1))
            .build()
            .unwrap_err();
        assert_eq!(err.violations()[0].path, "Extension.url");
    }

    #[test]
    fn test_url_only_extension_is_vacuous() {
        assert!(Extension::builder().url(URL).build().is_err());
    }
}
