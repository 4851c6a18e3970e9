use atrius_model_macros::{FhirValidate, Visitable};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::datatypes::Identifier;
use crate::element::{ElementBase, ElementBaseBuilder, impl_element_builder};
use crate::error::Result;
use crate::primitives::{FhirString, Uri};
use crate::validation::Validator;

// [base/]Type/id[/_history/vid]; group 4 is the resource type
static REFERENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^((http|https)://([A-Za-z0-9\-\\.:%$]*/)+)?([A-Za-z]+)/([A-Za-z0-9\-.]{1,64})(/_history/[A-Za-z0-9\-.]{1,64})?$",
    )
    .expect("valid reference regex")
});
const RESOURCE_TYPE_GROUP: usize = 4;

/// A typed pointer to another resource. Never resolved by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirValidate)]
#[fhir(type_name = "Reference", kind = "element")]
#[fhir_invariant(
    key = "ref-1",
    severity = "error",
    human = "SHALL have a contained resource if a local reference is provided",
    expr = "reference.startsWith('#').not() or (reference.substring(1).trace('url') in %rootResource.contained.id.trace('ids'))",
    path = "Reference"
)]
pub struct Reference {
    #[fhir(base)]
    base: ElementBase,
    reference: Option<FhirString>,
    r#type: Option<Uri>,
    identifier: Option<Box<Identifier>>,
    display: Option<FhirString>,
}

/// What the literal `reference` value says about its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralReference<'a> {
    /// No literal reference value.
    Absent,
    /// A reference to a contained resource (`#id`).
    Local,
    /// A value with a URI scheme (`urn:uuid:...`, `https://...`) that is not
    /// inspected further.
    Absolute,
    /// A relative or conditional reference naming its resource type.
    Typed(&'a str),
    /// A relative value from which no resource type could be read.
    Unparsable(&'a str),
}

impl Reference {
    pub fn builder() -> ReferenceBuilder {
        ReferenceBuilder::default()
    }

    pub fn reference(&self) -> Option<&FhirString> {
        self.reference.as_ref()
    }

    pub fn r#type(&self) -> Option<&Uri> {
        self.r#type.as_ref()
    }

    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_deref()
    }

    pub fn display(&self) -> Option<&FhirString> {
        self.display.as_ref()
    }

    /// Classifies the literal reference value.
    pub fn literal(&self) -> LiteralReference<'_> {
        let Some(value) = self.reference.as_ref().and_then(|r| r.as_str()) else {
            return LiteralReference::Absent;
        };
        if value.starts_with('#') {
            return LiteralReference::Local;
        }
        // any ':' with content after it counts, including one inside a query
        if has_scheme(value) {
            return LiteralReference::Absolute;
        }
        // conditional references carry their type before the '?'
        if let Some((head, _query)) = value.split_once('?') {
            return LiteralReference::Typed(head);
        }
        match REFERENCE_PATTERN
            .captures(value)
            .and_then(|c| c.get(RESOURCE_TYPE_GROUP))
        {
            Some(m) => LiteralReference::Typed(m.as_str()),
            None => LiteralReference::Unparsable(value),
        }
    }

    /// The resource type this reference targets, from `type` or the literal value.
    pub fn target_type(&self) -> Option<&str> {
        self.r#type
            .as_ref()
            .and_then(|t| t.as_str())
            .or(match self.literal() {
                LiteralReference::Typed(t) => Some(t),
                _ => None,
            })
    }

    pub fn to_builder(&self) -> ReferenceBuilder {
        ReferenceBuilder {
            base: self.base.to_builder(),
            reference: self.reference.clone(),
            r#type: self.r#type.clone(),
            identifier: self.identifier.as_deref().cloned(),
            display: self.display.clone(),
        }
    }
}

// a prefix followed by ':' and a non-empty remainder
fn has_scheme(value: &str) -> bool {
    matches!(value.find(':'), Some(i) if i > 0 && value.len() > i + 1)
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceBuilder {
    base: ElementBaseBuilder,
    reference: Option<FhirString>,
    r#type: Option<Uri>,
    identifier: Option<Identifier>,
    display: Option<FhirString>,
}

impl_element_builder!(ReferenceBuilder);

impl ReferenceBuilder {
    pub fn reference(mut self, reference: impl Into<Option<FhirString>>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn r#type(mut self, r#type: impl Into<Option<Uri>>) -> Self {
        self.r#type = r#type.into();
        self
    }

    pub fn identifier(mut self, identifier: impl Into<Option<Identifier>>) -> Self {
        self.identifier = identifier.into();
        self
    }

    pub fn display(mut self, display: impl Into<Option<FhirString>>) -> Self {
        self.display = display.into();
        self
    }

    pub fn build(self) -> Result<Reference> {
        let mut check = Validator::new("Reference");
        let base = self.base.build(&mut check);
        check.finish_element(|| {
            Some(Reference {
                base,
                reference: self.reference,
                r#type: self.r#type,
                identifier: self.identifier.map(Box::new),
                display: self.display,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(value: &str) -> Reference {
        Reference::builder()
            .reference(FhirString::from(value))
            .build()
            .unwrap()
    }

    #[test]
    fn test_literal_classification() {
        assert_eq!(literal("Patient/123").literal(), LiteralReference::Typed("Patient"));
        assert_eq!(
            literal("http://example.org/fhir/Observation/1/_history/2").literal(),
            LiteralReference::Absolute
        );
        assert_eq!(
            literal("Patient?identifier=123").literal(),
            LiteralReference::Typed("Patient")
        );
        assert_eq!(literal("#p1").literal(), LiteralReference::Local);
        assert_eq!(literal("urn:uuid:53fefa32").literal(), LiteralReference::Absolute);
        assert_eq!(literal("Patient").literal(), LiteralReference::Unparsable("Patient"));
        assert_eq!(
            literal("Patient/1/_history/3").literal(),
            LiteralReference::Typed("Patient")
        );
    }

    #[test]
    fn test_scheme_is_detected_anywhere_in_the_value() {
        assert_eq!(
            literal("Patient?identifier=http://x|1").literal(),
            LiteralReference::Absolute
        );
        assert_eq!(literal("Device/d:1").literal(), LiteralReference::Absolute);
        // a trailing ':' has no scheme-specific part
        assert_eq!(literal("Patient/1:").literal(), LiteralReference::Unparsable("Patient/1:"));
        assert_eq!(literal("Patient?x:").literal(), LiteralReference::Typed("Patient"));
    }

    #[test]
    fn test_target_type_prefers_declared_type() {
        let r = Reference::builder()
            .reference(FhirString::from("Patient/1"))
            .r#type(Uri::from("Group"))
            .build()
            .unwrap();
        assert_eq!(r.target_type(), Some("Group"));
        assert_eq!(literal("Device/d").target_type(), Some("Device"));
        assert_eq!(literal("#x").target_type(), None);
    }

    #[test]
    fn test_empty_reference_is_vacuous() {
        assert!(Reference::builder().build().is_err());
    }
}
