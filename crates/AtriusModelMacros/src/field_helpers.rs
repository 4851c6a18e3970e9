//=============================================================================
// `#[fhir(...)]` Attribute Helpers
//=============================================================================

use heck::ToLowerCamelCase;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::{Attribute, Lit, Meta, token};

/// Category of node a struct represents, from `#[fhir(kind = "...")]`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum StructKind {
    Element,
    Backbone,
    Resource,
}

impl StructKind {
    /// The matching `NodeKind` variant.
    pub(crate) fn node_kind(self) -> TokenStream {
        match self {
            StructKind::Element => quote! { atrius_fhir_model::visitor::NodeKind::Element },
            StructKind::Backbone => quote! { atrius_fhir_model::visitor::NodeKind::Backbone },
            StructKind::Resource => quote! { atrius_fhir_model::visitor::NodeKind::Resource },
        }
    }
}

/// Struct-level `#[fhir(type_name = "...", kind = "...")]`.
pub(crate) struct StructAttrs {
    pub(crate) type_name: String,
    pub(crate) kind: StructKind,
}

fn fhir_metas(attrs: &[Attribute]) -> syn::Result<Vec<Meta>> {
    let mut out = Vec::new();
    for attr in attrs {
        if attr.path().is_ident("fhir") {
            let list = attr.parse_args_with(Punctuated::<Meta, token::Comma>::parse_terminated)?;
            out.extend(list);
        }
    }
    Ok(out)
}

fn string_value(meta: &Meta) -> syn::Result<Option<String>> {
    let Meta::NameValue(nv) = meta else {
        return Ok(None);
    };
    match &nv.value {
        syn::Expr::Lit(expr_lit) => match &expr_lit.lit {
            Lit::Str(lit_str) => Ok(Some(lit_str.value())),
            other => Err(syn::Error::new(other.span(), "expected string literal")),
        },
        other => Err(syn::Error::new_spanned(other, "expected string literal")),
    }
}

/// Parses the struct-level attributes. `type_name` defaults to the struct's
/// own name; `kind` is required.
pub(crate) fn parse_struct_attrs(ident: &syn::Ident, attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut type_name = None;
    let mut kind = None;

    for meta in fhir_metas(attrs)? {
        if meta.path().is_ident("type_name") {
            type_name = string_value(&meta)?;
        } else if meta.path().is_ident("kind") {
            let value = string_value(&meta)?.unwrap_or_default();
            kind = Some(match value.as_str() {
                "element" => StructKind::Element,
                "backbone" => StructKind::Backbone,
                "resource" => StructKind::Resource,
                _ => {
                    return Err(syn::Error::new_spanned(
                        meta,
                        "kind must be one of \"element\", \"backbone\", \"resource\"",
                    ));
                }
            });
        }
    }

    let kind = kind.ok_or_else(|| {
        syn::Error::new(
            ident.span(),
            "missing #[fhir(kind = \"...\")] on a Visitable struct",
        )
    })?;

    Ok(StructAttrs {
        type_name: type_name.unwrap_or_else(|| ident.to_string()),
        kind,
    })
}

/// Reads the struct-level `type_name` only, for derives that do not need `kind`.
pub(crate) fn struct_type_name(ident: &syn::Ident, attrs: &[Attribute]) -> syn::Result<String> {
    for meta in fhir_metas(attrs)? {
        if meta.path().is_ident("type_name")
            && let Some(name) = string_value(&meta)?
        {
            return Ok(name);
        }
    }
    Ok(ident.to_string())
}

/// Field-level `#[fhir(base)]`, `#[fhir(skip)]` and `#[fhir(rename = "...")]`.
#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub(crate) base: bool,
    pub(crate) skip: bool,
    pub(crate) rename: Option<String>,
}

pub(crate) fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for meta in fhir_metas(&field.attrs)? {
        match &meta {
            Meta::Path(path) if path.is_ident("base") => out.base = true,
            Meta::Path(path) if path.is_ident("skip") => out.skip = true,
            Meta::NameValue(nv) if nv.path.is_ident("rename") => out.rename = string_value(&meta)?,
            _ => return Err(syn::Error::new_spanned(meta, "unknown fhir field attribute")),
        }
    }
    Ok(out)
}

/// Determines the FHIR element name of a field.
///
/// `#[fhir(rename = "...")]` wins; otherwise the Rust name (without any `r#`
/// prefix) is converted from `snake_case` to `lowerCamelCase`.
///
/// ```rust,ignore
/// // purpose_of_event -> "purposeOfEvent"
/// // r#type           -> "type"
/// ```
pub(crate) fn get_effective_field_name(field: &syn::Field) -> syn::Result<String> {
    if let Some(rename) = parse_field_attrs(field)?.rename {
        return Ok(rename);
    }
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new(Span::call_site(), "expected a named field"))?;
    Ok(ident.unraw().to_string().to_lower_camel_case())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn field(tokens: syn::FieldsNamed) -> syn::Field {
        tokens.named.into_iter().next().unwrap()
    }

    #[test]
    fn test_effective_field_name() {
        let f = field(parse_quote!({ purpose_of_event: Vec<CodeableConcept> }));
        assert_eq!(get_effective_field_name(&f).unwrap(), "purposeOfEvent");

        let f = field(parse_quote!({ r#type: Option<Code> }));
        assert_eq!(get_effective_field_name(&f).unwrap(), "type");

        let f = field(parse_quote!({ #[fhir(rename = "class")] clazz: Vec<Coding> }));
        assert_eq!(get_effective_field_name(&f).unwrap(), "class");
    }

    #[test]
    fn test_struct_attrs() {
        let input: syn::DeriveInput = parse_quote! {
            #[fhir(type_name = "AuditEvent.agent", kind = "backbone")]
            struct AuditEventAgent {}
        };
        let attrs = parse_struct_attrs(&input.ident, &input.attrs).unwrap();
        assert_eq!(attrs.type_name, "AuditEvent.agent");
        assert!(attrs.kind == StructKind::Backbone);
    }

    #[test]
    fn test_missing_kind_is_an_error() {
        let input: syn::DeriveInput = parse_quote! {
            struct Coding {}
        };
        assert!(parse_struct_attrs(&input.ident, &input.attrs).is_err());
    }
}
