//=============================================================================
// #[derive(Visitable)]
//=============================================================================

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DataEnum, DataStruct, DeriveInput, Fields, LitStr, spanned::Spanned};

use crate::field_helpers::{StructKind, get_effective_field_name, parse_field_attrs, parse_struct_attrs};
use crate::type_helpers::{ContainerKind, container_kind, single_field_type};

pub(crate) fn derive(input: &DeriveInput) -> syn::Result<TokenStream> {
    match &input.data {
        Data::Struct(ds) => derive_struct(input, ds),
        Data::Enum(de) => derive_enum(input, de),
        Data::Union(_) => Err(syn::Error::new(input.span(), "Visitable does not support unions")),
    }
}

fn derive_struct(input: &DeriveInput, ds: &DataStruct) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let attrs = parse_struct_attrs(name, &input.attrs)?;
    let type_name = LitStr::new(&attrs.type_name, name.span());
    let node_kind = attrs.kind.node_kind();

    let Fields::Named(fields) = &ds.fields else {
        return Err(syn::Error::new(input.span(), "Visitable requires named fields"));
    };

    let mut base = None;
    let mut child_stmts = Vec::new();
    let mut content_exprs = Vec::new();

    for field in &fields.named {
        let Some(ident) = &field.ident else { continue };
        let field_attrs = parse_field_attrs(field)?;
        if field_attrs.base {
            base = Some(ident.clone());
            continue;
        }
        if field_attrs.skip {
            continue;
        }

        let field_name = LitStr::new(&get_effective_field_name(field)?, ident.span());
        match container_kind(&field.ty) {
            ContainerKind::Plain => {
                child_stmts.push(quote! {
                    out.push(atrius_fhir_model::visitor::Child::new(#field_name, None, &self.#ident));
                });
                content_exprs.push(quote! { true });
            }
            ContainerKind::Option => {
                child_stmts.push(quote! {
                    if let Some(value) = &self.#ident {
                        out.push(atrius_fhir_model::visitor::Child::new(#field_name, None, value));
                    }
                });
                content_exprs.push(quote! { self.#ident.is_some() });
            }
            ContainerKind::Vec => {
                child_stmts.push(quote! {
                    for (i, value) in self.#ident.iter().enumerate() {
                        out.push(atrius_fhir_model::visitor::Child::new(#field_name, Some(i), value));
                    }
                });
                content_exprs.push(quote! { !self.#ident.is_empty() });
            }
        }
    }

    let base = base.ok_or_else(|| {
        syn::Error::new(input.span(), "Visitable struct needs a #[fhir(base)] field")
    })?;

    let node_traits = match attrs.kind {
        StructKind::Element => quote! {
            impl atrius_fhir_model::element::ElementNode for #name {
                fn element_base(&self) -> &atrius_fhir_model::element::ElementBase {
                    &self.#base
                }
            }
        },
        StructKind::Backbone => quote! {
            impl atrius_fhir_model::element::ElementNode for #name {
                fn element_base(&self) -> &atrius_fhir_model::element::ElementBase {
                    self.#base.element()
                }
            }

            impl atrius_fhir_model::element::BackboneNode for #name {
                fn backbone_base(&self) -> &atrius_fhir_model::element::BackboneBase {
                    &self.#base
                }
            }
        },
        StructKind::Resource => quote! {
            impl atrius_fhir_model::resource::ResourceNode for #name {
                fn resource_base(&self) -> &atrius_fhir_model::resource::ResourceBase {
                    self.#base.resource()
                }
            }

            impl atrius_fhir_model::resource::DomainResourceNode for #name {
                fn domain_resource_base(&self) -> &atrius_fhir_model::resource::DomainResourceBase {
                    &self.#base
                }
            }
        },
    };

    Ok(quote! {
        impl atrius_fhir_model::visitor::TypeInfo for #name {
            const TYPE_NAME: &'static str = #type_name;
            const KIND: atrius_fhir_model::visitor::NodeKind = #node_kind;
        }

        impl atrius_fhir_model::visitor::Visitable for #name {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn kind(&self) -> atrius_fhir_model::visitor::NodeKind {
                #node_kind
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn children<'a>(&'a self, out: &mut Vec<atrius_fhir_model::visitor::Child<'a>>) {
                atrius_fhir_model::visitor::BaseFields::base_children(&self.#base, out);
                #(#child_stmts)*
            }

            fn has_structural_content(&self) -> bool {
                false #(|| #content_exprs)*
            }
        }

        #node_traits
    })
}

/// Enums of single-field tuple variants delegate every method to the payload,
/// so a choice value or a `Resource` looks exactly like the node it holds.
fn derive_enum(input: &DeriveInput, de: &DataEnum) -> syn::Result<TokenStream> {
    let name = &input.ident;

    let mut variants = Vec::new();
    for variant in &de.variants {
        if single_field_type(&variant.fields).is_none() {
            return Err(syn::Error::new(
                variant.span(),
                "Visitable enum variants must hold exactly one node",
            ));
        }
        variants.push(&variant.ident);
    }
    if variants.is_empty() {
        return Err(syn::Error::new(input.span(), "Visitable enum needs at least one variant"));
    }

    let delegate = |call: TokenStream| {
        let arms = variants.iter().map(|v| {
            quote! { #name::#v(inner) => atrius_fhir_model::visitor::Visitable::#call }
        });
        quote! {
            match self {
                #(#arms,)*
            }
        }
    };

    let type_name = delegate(quote! { type_name(inner) });
    let kind = delegate(quote! { kind(inner) });
    let as_any = delegate(quote! { as_any(inner) });
    let children = delegate(quote! { children(inner, out) });
    let content = delegate(quote! { has_structural_content(inner) });
    let primitive_value = delegate(quote! { primitive_value(inner) });

    Ok(quote! {
        impl atrius_fhir_model::visitor::Visitable for #name {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn kind(&self) -> atrius_fhir_model::visitor::NodeKind {
                #kind
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                #as_any
            }

            fn children<'a>(&'a self, out: &mut Vec<atrius_fhir_model::visitor::Child<'a>>) {
                #children
            }

            fn has_structural_content(&self) -> bool {
                #content
            }

            fn primitive_value(&self) -> Option<atrius_fhir_model::visitor::PrimitiveValue<'_>> {
                #primitive_value
            }
        }
    })
}
