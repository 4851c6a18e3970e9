//! # Atrius Model Macros - Derives for FHIR Model Nodes
//!
//! This crate provides the procedural macros that wire model structs and enums
//! into the node framework of `atrius-fhir-model`. Hand-writing the traversal,
//! choice conversions and constraint tables for every node type would be
//! repetitive and easy to get out of declaration order, so they are generated.
//!
//! ## Overview
//!
//! - **`#[derive(Visitable)]`** - on a struct, lists the struct's fields as
//!   traversal children in declaration order and implements `TypeInfo` plus
//!   the node trait matching its kind (`ElementNode`, `BackboneNode`, or
//!   `ResourceNode`/`DomainResourceNode`). On an enum of single-field tuple
//!   variants, delegates everything to the payload.
//! - **`#[derive(FhirChoice)]`** - for the enum of a choice (`[x]`) field,
//!   generates `From` conversions for each permitted type, the round trip to
//!   and from `DataType`, and the `Choice` impl with its allowed type names.
//! - **`#[derive(FhirValidate)]`** - collects `#[fhir_invariant]` and
//!   `#[fhir_binding]` metadata into static tables and evaluates invariants
//!   through a pluggable engine.
//!
//! ## Attributes
//!
//! ### Struct level
//!
//! `#[fhir(type_name = "...", kind = "element" | "backbone" | "resource")]`
//!
//! Backbone elements use their path as type name, for example
//! `"Consent.provision.actor"`, so violation paths read naturally.
//!
//! ### Field level
//!
//! - `#[fhir(base)]` - the embedded `ElementBase` / `BackboneBase` /
//!   `DomainResourceBase`. Its children are emitted ahead of the struct's own.
//! - `#[fhir(skip)]` - not a child node (e.g. `Extension.url`, a plain string).
//! - `#[fhir(rename = "...")]` - element name when it differs from the
//!   `lowerCamelCase` form of the Rust name.
//!
//! ## Usage
//!
//! ```ignore
//! use atrius_model_macros::{FhirValidate, Visitable};
//!
//! #[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirValidate)]
//! #[fhir(type_name = "Period", kind = "element")]
//! #[fhir_invariant(
//!     key = "per-1",
//!     severity = "error",
//!     human = "If present, start SHALL have a lower value than end",
//!     expr = "start.hasValue().not() or end.hasValue().not() or (start <= end)",
//!     path = "Period"
//! )]
//! pub struct Period {
//!     #[fhir(base)]
//!     base: ElementBase,
//!     start: Option<DateTime>,
//!     end: Option<DateTime>,
//! }
//! ```
//!
//! Generated code refers to `atrius_fhir_model::...` paths; inside the model
//! crate itself this resolves through `extern crate self as atrius_fhir_model`.

extern crate proc_macro;

mod choice_impl;
mod fhir_validate;
mod field_helpers;
mod type_helpers;
mod visitable_impl;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

#[proc_macro_derive(Visitable, attributes(fhir))]
pub fn visitable_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    visitable_impl::derive(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[proc_macro_derive(FhirChoice)]
pub fn fhir_choice_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    choice_impl::derive(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[proc_macro_derive(FhirValidate, attributes(fhir, fhir_invariant, fhir_binding))]
pub fn derive_fhir_validate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    fhir_validate::derive(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
