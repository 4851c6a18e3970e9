//! FHIR primitive datatypes.
//!
//! A primitive is an element like any other: it carries an optional id, a
//! list of extensions and an optional value. [`Primitive<K>`] is generic over
//! a zero-sized kind marker that fixes the Rust value type and the FHIR type
//! name, so `Code`, `Uri` and friends are plain type aliases.
//!
//! Values converted with `From` are not checked on the spot; they are checked
//! when the node holding them is built (or when the primitive itself is built
//! through [`PrimitiveBuilder`]).

use chrono::{DateTime as ChronoDateTime, FixedOffset};
use rust_decimal::Decimal;
use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::element::{ElementBase, ElementBaseBuilder, ElementBuilder, ElementNode};
use crate::error::Result;
use crate::precision::{PreciseDecimal, PrecisionDateTime, PrecisionInstant};
use crate::validation::Validator;
use crate::visitor::{BaseFields, Child, NodeKind, PrimitiveValue, TypeInfo, Visitable};

/// Marker describing one FHIR primitive type.
pub trait PrimitiveKind: 'static {
    type Value: Clone + fmt::Debug + PartialEq + Eq + Hash + Send + Sync + 'static;

    const TYPE_NAME: &'static str;

    fn view(value: &Self::Value) -> PrimitiveValue<'_>;
}

macro_rules! primitive_kinds {
    ($($(#[$doc:meta])* $kind:ident => $name:literal, $value:ty, |$v:ident| $view:expr;)+) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub enum $kind {}

            impl PrimitiveKind for $kind {
                type Value = $value;
                const TYPE_NAME: &'static str = $name;

                fn view($v: &Self::Value) -> PrimitiveValue<'_> {
                    $view
                }
            }
        )+
    };
}

primitive_kinds! {
    StringKind => "string", String, |v| PrimitiveValue::String(v);
    CodeKind => "code", String, |v| PrimitiveValue::String(v);
    IdKind => "id", String, |v| PrimitiveValue::String(v);
    UriKind => "uri", String, |v| PrimitiveValue::String(v);
    UrlKind => "url", String, |v| PrimitiveValue::String(v);
    CanonicalKind => "canonical", String, |v| PrimitiveValue::String(v);
    MarkdownKind => "markdown", String, |v| PrimitiveValue::String(v);
    /// Base64 text as it appears on the wire.
    Base64BinaryKind => "base64Binary", String, |v| PrimitiveValue::String(v);
    /// An XHTML fragment rooted at a `div`.
    XhtmlKind => "xhtml", String, |v| PrimitiveValue::String(v);
    BooleanKind => "boolean", bool, |v| PrimitiveValue::Boolean(*v);
    IntegerKind => "integer", i32, |v| PrimitiveValue::Integer(i64::from(*v));
    UnsignedIntKind => "unsignedInt", u32, |v| PrimitiveValue::Integer(i64::from(*v));
    PositiveIntKind => "positiveInt", u32, |v| PrimitiveValue::Integer(i64::from(*v));
    DecimalKind => "decimal", PreciseDecimal, |v| PrimitiveValue::Decimal(v);
    InstantKind => "instant", PrecisionInstant, |v| PrimitiveValue::DateTime(v.as_datetime());
    /// A possibly partial date and time; see [`PrecisionDateTime`].
    DateTimeKind => "dateTime", PrecisionDateTime, |v| PrimitiveValue::DateTime(v);
}

pub type FhirString = Primitive<StringKind>;
pub type Code = Primitive<CodeKind>;
pub type Id = Primitive<IdKind>;
pub type Uri = Primitive<UriKind>;
pub type Url = Primitive<UrlKind>;
pub type Canonical = Primitive<CanonicalKind>;
pub type Markdown = Primitive<MarkdownKind>;
pub type Base64Binary = Primitive<Base64BinaryKind>;
pub type Xhtml = Primitive<XhtmlKind>;
pub type FhirBoolean = Primitive<BooleanKind>;
pub type Integer = Primitive<IntegerKind>;
pub type UnsignedInt = Primitive<UnsignedIntKind>;
pub type PositiveInt = Primitive<PositiveIntKind>;
pub type FhirDecimal = Primitive<DecimalKind>;
pub type Instant = Primitive<InstantKind>;
pub type DateTime = Primitive<DateTimeKind>;

/// A primitive element: id, extensions and an optional value of kind `K`.
pub struct Primitive<K: PrimitiveKind> {
    base: ElementBase,
    value: Option<K::Value>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: PrimitiveKind> Primitive<K> {
    /// Wraps a value without id or extensions.
    pub fn new(value: K::Value) -> Self {
        Self {
            base: ElementBase::default(),
            value: Some(value),
            _kind: PhantomData,
        }
    }

    /// Wraps and checks a value.
    pub fn checked(value: K::Value) -> Result<Self> {
        Self::builder().value(value).build()
    }

    pub fn value(&self) -> Option<&K::Value> {
        self.value.as_ref()
    }

    pub fn builder() -> PrimitiveBuilder<K> {
        PrimitiveBuilder::default()
    }

    pub fn to_builder(&self) -> PrimitiveBuilder<K> {
        PrimitiveBuilder {
            base: self.base.to_builder(),
            value: self.value.clone(),
        }
    }
}

impl<K: PrimitiveKind<Value = String>> Primitive<K> {
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl<K: PrimitiveKind> Clone for Primitive<K> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            value: self.value.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: PrimitiveKind> PartialEq for Primitive<K> {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.value == other.value
    }
}

impl<K: PrimitiveKind> Eq for Primitive<K> {}

impl<K: PrimitiveKind> Hash for Primitive<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base.hash(state);
        self.value.hash(state);
    }
}

impl<K: PrimitiveKind> fmt::Debug for Primitive<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(K::TYPE_NAME);
        if let Some(id) = self.base.id() {
            s.field("id", &id);
        }
        if !self.base.extension().is_empty() {
            s.field("extension", &self.base.extension());
        }
        s.field("value", &self.value).finish()
    }
}

impl<K: PrimitiveKind> TypeInfo for Primitive<K> {
    const TYPE_NAME: &'static str = K::TYPE_NAME;
    const KIND: NodeKind = NodeKind::Primitive;
}

impl<K: PrimitiveKind> Visitable for Primitive<K> {
    fn type_name(&self) -> &'static str {
        K::TYPE_NAME
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Primitive
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn children<'a>(&'a self, out: &mut Vec<Child<'a>>) {
        self.base.base_children(out);
    }

    fn has_structural_content(&self) -> bool {
        self.value.is_some()
    }

    fn primitive_value(&self) -> Option<PrimitiveValue<'_>> {
        self.value.as_ref().map(K::view)
    }
}

impl<K: PrimitiveKind> ElementNode for Primitive<K> {
    fn element_base(&self) -> &ElementBase {
        &self.base
    }
}

impl<K: PrimitiveKind<Value = String>> From<&str> for Primitive<K> {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl<K: PrimitiveKind<Value = String>> From<String> for Primitive<K> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<bool> for FhirBoolean {
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl<K: PrimitiveKind<Value = u32>> From<u32> for Primitive<K> {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<PreciseDecimal> for FhirDecimal {
    fn from(value: PreciseDecimal) -> Self {
        Self::new(value)
    }
}

impl From<Decimal> for FhirDecimal {
    fn from(value: Decimal) -> Self {
        Self::new(PreciseDecimal::from(value))
    }
}

impl From<PrecisionDateTime> for DateTime {
    fn from(value: PrecisionDateTime) -> Self {
        Self::new(value)
    }
}

impl From<ChronoDateTime<FixedOffset>> for DateTime {
    fn from(value: ChronoDateTime<FixedOffset>) -> Self {
        Self::new(PrecisionDateTime::from(value))
    }
}

impl From<PrecisionInstant> for Instant {
    fn from(value: PrecisionInstant) -> Self {
        Self::new(value)
    }
}

impl From<ChronoDateTime<FixedOffset>> for Instant {
    fn from(value: ChronoDateTime<FixedOffset>) -> Self {
        Self::new(PrecisionInstant::from(value))
    }
}

/// Builder for [`Primitive<K>`]; lets callers attach an id or extensions,
/// or build an extension-only primitive with no value.
pub struct PrimitiveBuilder<K: PrimitiveKind> {
    base: ElementBaseBuilder,
    value: Option<K::Value>,
}

impl<K: PrimitiveKind> Default for PrimitiveBuilder<K> {
    fn default() -> Self {
        Self {
            base: ElementBaseBuilder::default(),
            value: None,
        }
    }
}

impl<K: PrimitiveKind> fmt::Debug for PrimitiveBuilder<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimitiveBuilder")
            .field("type", &K::TYPE_NAME)
            .field("base", &self.base)
            .field("value", &self.value)
            .finish()
    }
}

impl<K: PrimitiveKind> PrimitiveBuilder<K> {
    pub fn value(mut self, value: impl Into<Option<K::Value>>) -> Self {
        self.value = value.into();
        self
    }

    pub fn build(self) -> Result<Primitive<K>> {
        let mut check = Validator::new(K::TYPE_NAME);
        let base = self.base.build(&mut check);
        if let Some(value) = &self.value {
            check.check_primitive("value", K::TYPE_NAME, K::view(value));
        }
        let value = self.value;
        check.finish_element(|| {
            Some(Primitive {
                base,
                value,
                _kind: PhantomData,
            })
        })
    }
}

impl<K: PrimitiveKind> ElementBuilder for PrimitiveBuilder<K> {
    fn element_base_mut(&mut self) -> &mut ElementBaseBuilder {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleKind;
    use crate::frozen::structural_hash;
    use crate::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_and_value() {
        let code = Code::from("active");
        assert_eq!(code.as_str(), Some("active"));
        assert_eq!(code.type_name(), "code");

        let flag = FhirBoolean::from(true);
        assert_eq!(flag.primitive_value(), Some(PrimitiveValue::Boolean(true)));

        let amount = FhirDecimal::from(dec!(1.50));
        assert_eq!(amount.value().map(|d| d.original_string()), Some("1.50"));
    }

    #[test]
    fn test_extension_only_primitive_builds() {
        let ext = Extension::builder()
            .url("http://hl7.org/fhir/StructureDefinition/data-absent-reason")
            .value(Code::from("unknown"))
            .build()
            .unwrap();
        let status = Code::builder().extension(ext).build().unwrap();
        assert!(status.value().is_none());
        assert_eq!(status.extension().len(), 1);
    }

    #[test]
    fn test_empty_primitive_is_vacuous() {
        let err = FhirString::builder().id("x".to_string()).build().unwrap_err();
        assert_eq!(err.violations()[0].rule.kind(), RuleKind::VacuousNode);
    }

    #[test]
    fn test_checked_rejects_bad_id() {
        let err = Id::checked("not a valid id!".to_string()).unwrap_err();
        assert_eq!(err.violations()[0].path, "id.value");
        assert!(Id::checked("abc-123.x".to_string()).is_ok());
    }

    #[test]
    fn test_decimal_precision_is_part_of_equality() {
        let precise = FhirDecimal::from(PreciseDecimal::parse("1.50").unwrap());
        let short = FhirDecimal::from(PreciseDecimal::parse("1.5").unwrap());
        assert_ne!(precise, short);
        assert_eq!(precise, FhirDecimal::from(dec!(1.50)));
        assert_eq!(
            precise.primitive_value(),
            Some(PrimitiveValue::Decimal(&PreciseDecimal::parse("1.50").unwrap()))
        );
    }

    #[test]
    fn test_date_time_offset_is_part_of_equality() {
        let local =
            DateTime::from(ChronoDateTime::parse_from_rfc3339("2024-01-01T10:00:00+01:00").unwrap());
        let utc = DateTime::from(ChronoDateTime::parse_from_rfc3339("2024-01-01T09:00:00Z").unwrap());
        assert_ne!(local, utc);
        assert_ne!(structural_hash(&local), structural_hash(&utc));

        let year = DateTime::from(PrecisionDateTime::parse("2024").unwrap());
        let day = DateTime::from(PrecisionDateTime::parse("2024-01-01").unwrap());
        assert_ne!(year, day);
    }

    #[test]
    fn test_id_can_be_cleared() {
        let with_id = FhirString::builder().id("s1".to_string()).value("a".to_string()).build().unwrap();
        assert_eq!(with_id.id(), Some("s1"));

        let cleared = with_id.to_builder().id(None).build().unwrap();
        assert_eq!(cleared.id(), None);
        assert_eq!(cleared, FhirString::from("a"));
    }

    #[test]
    fn test_equality_includes_extensions() {
        let plain = FhirString::from("a");
        let with_id = FhirString::builder().id("s1".to_string()).value("a".to_string()).build().unwrap();
        assert_ne!(plain, with_id);
        assert_eq!(plain, FhirString::from("a"));
    }
}
