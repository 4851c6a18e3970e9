//=============================================================================
// #[derive(FhirChoice)]
//=============================================================================

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, spanned::Spanned};

use crate::type_helpers::single_field_type;

/// Generates the conversions that tie a per-field choice enum to the open
/// `DataType` union, plus its `Choice` impl.
///
/// Variant names must match the corresponding `DataType` variant.
///
/// ```rust,ignore
/// #[derive(Visitable, FhirChoice)]
/// pub enum ConsentSource {
///     Attachment(Attachment),
///     Reference(Reference),
/// }
/// // ConsentSource::ALLOWED == ["Attachment", "Reference"]
/// ```
pub(crate) fn derive(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let Data::Enum(de) = &input.data else {
        return Err(syn::Error::new(input.span(), "FhirChoice only supports enums"));
    };

    let mut variants = Vec::new();
    let mut types = Vec::new();
    for variant in &de.variants {
        let ty = single_field_type(&variant.fields).ok_or_else(|| {
            syn::Error::new(variant.span(), "FhirChoice variants must hold exactly one datatype")
        })?;
        variants.push(&variant.ident);
        types.push(ty);
    }

    let data_type = quote! { atrius_fhir_model::choice::DataType };

    Ok(quote! {
        #(
            impl ::core::convert::From<#types> for #name {
                fn from(value: #types) -> Self {
                    #name::#variants(value)
                }
            }
        )*

        impl ::core::convert::From<#name> for #data_type {
            fn from(value: #name) -> Self {
                match value {
                    #(#name::#variants(inner) => #data_type::#variants(inner),)*
                }
            }
        }

        impl ::core::convert::TryFrom<#data_type> for #name {
            type Error = #data_type;

            #[allow(unreachable_patterns)]
            fn try_from(value: #data_type) -> ::core::result::Result<Self, Self::Error> {
                match value {
                    #(#data_type::#variants(inner) => Ok(#name::#variants(inner)),)*
                    other => Err(other),
                }
            }
        }

        impl atrius_fhir_model::choice::Choice for #name {
            const ALLOWED: &'static [&'static str] = &[
                #(<#types as atrius_fhir_model::visitor::TypeInfo>::TYPE_NAME,)*
            ];
        }
    })
}
