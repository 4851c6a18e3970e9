//=============================================================================
// #[derive(FhirValidate)]
//=============================================================================

use std::collections::HashMap;

use proc_macro2::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{Attribute, Data, DeriveInput, Expr, Fields, Lit, LitStr, MetaNameValue, Token, spanned::Spanned};

use crate::field_helpers::{get_effective_field_name, struct_type_name};
use crate::type_helpers::{ContainerKind, container_kind};

/// `key = "literal"` arguments of one `#[fhir_invariant]` / `#[fhir_binding]`.
struct LiteralArgs<'a> {
    attr: &'a Attribute,
    values: HashMap<String, LitStr>,
}

impl<'a> LiteralArgs<'a> {
    fn parse(attr: &'a Attribute) -> syn::Result<Self> {
        let pairs = attr.parse_args_with(Punctuated::<MetaNameValue, Token![,]>::parse_terminated)?;
        let mut values = HashMap::new();
        for pair in pairs {
            let key = pair
                .path
                .get_ident()
                .map(ToString::to_string)
                .ok_or_else(|| syn::Error::new(pair.path.span(), "expected a plain key"))?;
            let Expr::Lit(expr) = &pair.value else {
                return Err(syn::Error::new(pair.value.span(), "expected a string literal"));
            };
            let Lit::Str(value) = &expr.lit else {
                return Err(syn::Error::new(expr.lit.span(), "expected a string literal"));
            };
            values.insert(key, value.clone());
        }
        Ok(Self { attr, values })
    }

    fn required(&self, key: &str) -> syn::Result<&LitStr> {
        self.values.get(key).ok_or_else(|| {
            let attr_name = self
                .attr
                .path()
                .get_ident()
                .map(ToString::to_string)
                .unwrap_or_default();
            syn::Error::new(self.attr.span(), format!("#[{attr_name}] is missing `{key}`"))
        })
    }
}

fn invariant(attr: &Attribute) -> syn::Result<TokenStream> {
    let args = LiteralArgs::parse(attr)?;
    let key = args.required("key")?;
    let human = args.required("human")?;
    let expr = args.required("expr")?;
    let path = args.required("path")?;
    let severity = match args.required("severity")?.value().as_str() {
        "error" => quote! { atrius_fhir_model::constraint::Severity::Error },
        "warning" => quote! { atrius_fhir_model::constraint::Severity::Warning },
        other => {
            return Err(syn::Error::new(
                attr.span(),
                format!("severity must be \"error\" or \"warning\", not {other:?}"),
            ));
        }
    };
    Ok(quote! {
        atrius_fhir_model::constraint::Invariant {
            key: #key,
            severity: #severity,
            human: #human,
            expr: #expr,
            path: #path,
        }
    })
}

fn binding(attr: &Attribute, element_path: &LitStr) -> syn::Result<TokenStream> {
    let args = LiteralArgs::parse(attr)?;
    let name = args.required("name")?;
    let strength = args.required("strength")?;
    let value_set = args.required("value_set")?;
    let description = args.required("description")?;
    Ok(quote! {
        atrius_fhir_model::constraint::Binding {
            name: #name,
            strength: #strength,
            value_set: #value_set,
            description: #description,
            path: #element_path,
        }
    })
}

fn invariants_on(attrs: &[Attribute]) -> syn::Result<Vec<TokenStream>> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("fhir_invariant"))
        .map(invariant)
        .collect()
}

/// Evaluation of a field's invariants against each value the field holds.
/// `run` expects `focus` and `instance_path` in scope.
fn per_value(kind: ContainerKind, ident: &syn::Ident, element_path: &LitStr, run: TokenStream) -> TokenStream {
    match kind {
        ContainerKind::Plain => quote! {
            let focus = &self.#ident;
            let instance_path = #element_path.to_string();
            #run
        },
        ContainerKind::Option => quote! {
            if let Some(focus) = &self.#ident {
                let instance_path = #element_path.to_string();
                #run
            }
        },
        ContainerKind::Vec => quote! {
            for (index, focus) in self.#ident.iter().enumerate() {
                let instance_path = format!("{}[{}]", #element_path, index);
                #run
            }
        },
    }
}

pub(crate) fn derive(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(input.span(), "FhirValidate only supports structs"));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new(input.span(), "FhirValidate requires named fields"));
    };

    let type_name = struct_type_name(name, &input.attrs)?;
    let type_invariants = invariants_on(&input.attrs)?;

    let mut bindings = Vec::new();
    let mut field_invariants = Vec::new();
    let mut field_checks = Vec::new();
    for field in &fields.named {
        let Some(ident) = &field.ident else { continue };
        let element_path = LitStr::new(
            &format!("{}.{}", type_name, get_effective_field_name(field)?),
            ident.span(),
        );

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("fhir_binding")) {
            bindings.push(binding(attr, &element_path)?);
        }

        let invariants = invariants_on(&field.attrs)?;
        if invariants.is_empty() {
            continue;
        }
        field_invariants.extend(invariants.iter().cloned());
        let run = quote! {
            for inv in VALUE_INVARIANTS {
                atrius_fhir_model::constraint::evaluate_invariant(
                    engine,
                    focus,
                    inv,
                    instance_path.clone(),
                    &mut issues,
                );
            }
        };
        let each = per_value(container_kind(&field.ty), ident, &element_path, run);
        field_checks.push(quote! {
            {
                const VALUE_INVARIANTS: &[atrius_fhir_model::constraint::Invariant] = &[#(#invariants),*];
                #each
            }
        });
    }

    Ok(quote! {
        impl atrius_fhir_model::constraint::FhirValidate for #name {
            fn invariants() -> &'static [atrius_fhir_model::constraint::Invariant] {
                const INVARIANTS: &[atrius_fhir_model::constraint::Invariant] = &[#(#type_invariants),*];
                INVARIANTS
            }

            fn field_invariants() -> &'static [atrius_fhir_model::constraint::Invariant] {
                const FIELD_INVARIANTS: &[atrius_fhir_model::constraint::Invariant] = &[#(#field_invariants),*];
                FIELD_INVARIANTS
            }

            fn bindings() -> &'static [atrius_fhir_model::constraint::Binding] {
                const BINDINGS: &[atrius_fhir_model::constraint::Binding] = &[#(#bindings),*];
                BINDINGS
            }

            fn validate_with_engine(
                &self,
                engine: &dyn atrius_fhir_model::constraint::ConstraintEngine,
            ) -> Vec<atrius_fhir_model::constraint::ConstraintIssue> {
                let mut issues = Vec::new();
                for inv in <Self as atrius_fhir_model::constraint::FhirValidate>::invariants() {
                    atrius_fhir_model::constraint::evaluate_invariant(
                        engine,
                        self,
                        inv,
                        inv.path.to_string(),
                        &mut issues,
                    );
                }
                #(#field_checks)*
                issues
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_binding_path_uses_element_name() {
        let input: DeriveInput = parse_quote! {
            #[fhir(type_name = "AuditEvent.agent.network", kind = "backbone")]
            struct AuditEventAgentNetwork {
                #[fhir_binding(
                    name = "AuditEventAgentNetworkType",
                    strength = "required",
                    value_set = "http://hl7.org/fhir/ValueSet/network-type|4.3.0",
                    description = "The type of network access point."
                )]
                r#type: Option<Code>,
            }
        };
        let tokens = derive(&input).unwrap().to_string();
        assert!(tokens.contains("\"AuditEvent.agent.network.type\""));
    }

    #[test]
    fn test_field_invariant_is_evaluated_per_value() {
        let input: DeriveInput = parse_quote! {
            #[fhir(type_name = "AuditEvent.source", kind = "backbone")]
            struct AuditEventSource {
                #[fhir_invariant(
                    key = "auditEvent-8",
                    severity = "warning",
                    human = "h",
                    expr = "$this.memberOf('x', 'extensible')",
                    path = "AuditEvent.source.type"
                )]
                r#type: Vec<Coding>,
            }
        };
        let tokens = derive(&input).unwrap().to_string();
        assert!(tokens.contains("fn field_invariants"));
        assert!(tokens.contains("\"auditEvent-8\""));
        assert!(tokens.contains("enumerate"));
        assert!(tokens.contains("\"AuditEvent.source.type\""));
    }

    #[test]
    fn test_unknown_severity_is_an_error() {
        let input: DeriveInput = parse_quote! {
            #[fhir_invariant(key = "x-1", severity = "fatal", human = "h", expr = "e", path = "X")]
            struct X {}
        };
        assert!(derive(&input).is_err());
    }

    #[test]
    fn test_missing_invariant_key_is_an_error() {
        let input: DeriveInput = parse_quote! {
            #[fhir_invariant(severity = "error", human = "h", expr = "e", path = "X")]
            struct X {}
        };
        let err = derive(&input).unwrap_err();
        assert!(err.to_string().contains("missing `key`"));
    }
}
