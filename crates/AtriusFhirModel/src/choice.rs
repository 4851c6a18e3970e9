//! Choice (`[x]`) fields.
//!
//! Each choice field has its own enum listing exactly the permitted types,
//! derived with `#[derive(Visitable, FhirChoice)]`. Builders stage choice
//! values as a [`DataType`], the open union of all datatypes, so that a
//! generic producer (a parser, say) can hand over a value whose concrete type
//! is only known at runtime. The validator narrows it to the field's enum at
//! `build()` and reports anything outside the permitted set.

use atrius_model_macros::Visitable;

use crate::datatypes::{
    Attachment, CodeableConcept, Coding, Identifier, Period, Quantity, Reference,
};
use crate::primitives::{
    Base64Binary, Canonical, Code, DateTime, FhirBoolean, FhirDecimal, FhirString, Id, Instant,
    Integer, Markdown, PositiveInt, UnsignedInt, Uri, Url,
};
use crate::visitor::Visitable;

/// A closed set of permitted types for one choice field.
pub trait Choice:
    Visitable + Sized + Into<DataType> + TryFrom<DataType, Error = DataType>
{
    /// FHIR names of the permitted types, in declaration order.
    const ALLOWED: &'static [&'static str];

    fn as_visitable(&self) -> &dyn Visitable {
        self
    }
}

/// Any FHIR datatype that may appear in a choice field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable)]
pub enum DataType {
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

macro_rules! data_type_from {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for DataType {
                fn from(value: $ty) -> Self {
                    DataType::$variant(value)
                }
            }
        )+
    };
}

data_type_from! {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::AuditEventDetailValue;

    #[test]
    fn test_data_type_reports_concrete_type_name() {
        let value = DataType::from(Integer::from(4));
        assert_eq!(value.type_name(), "integer");
        assert!(value.as_any().is::<Integer>());
    }

    #[test]
    fn test_choice_narrowing() {
        let ok = AuditEventDetailValue::try_from(DataType::from(FhirString::from("abc")));
        assert!(matches!(ok, Ok(AuditEventDetailValue::String(_))));

        let rejected = AuditEventDetailValue::try_from(DataType::from(Integer::from(1)));
        assert!(matches!(rejected, Err(DataType::Integer(_))));

        assert_eq!(AuditEventDetailValue::ALLOWED, &["string", "base64Binary"]);
    }
}
