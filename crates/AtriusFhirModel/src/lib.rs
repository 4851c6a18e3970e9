//! # Atrius FHIR Model
//!
//! Immutable, validated node types for FHIR resources and datatypes.
//!
//! ## Overview
//!
//! Every FHIR instance is a tree of nodes. This crate provides:
//!
//! - **Nodes** - primitives ([`primitives`]), complex datatypes ([`datatypes`]),
//!   backbone elements and resources ([`resources`]). Nodes are immutable once
//!   built and compare and hash structurally.
//! - **Builders** - every node is created through a builder that stages
//!   values, accepts absent ones without complaint, and runs all checks in
//!   `build()`. `to_builder()` goes the other way for copy-with-modification.
//! - **Validation** - [`validation::Validator`] collects every cardinality,
//!   choice-type, reference-target and primitive-format violation of one build
//!   and reports them together in a [`error::ConstructionError`].
//! - **Choice types** - each `[x]` field is an enum of its permitted types,
//!   see [`choice`].
//! - **Traversal** - [`visitor::walk`] drives a [`visitor::Visitor`] through a
//!   tree depth-first in declaration order.
//!
//! ## Example
//!
//! ```
//! use atrius_fhir_model::prelude::*;
//!
//! let patient = Reference::builder()
//!     .reference(FhirString::from("Patient/example"))
//!     .build()
//!     .unwrap();
//!
//! let actor = ConsentProvisionActor::builder()
//!     .role(CodeableConcept::from(
//!         Coding::builder().code(Code::from("PRCP")).build().unwrap(),
//!     ))
//!     .reference(patient)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(actor.reference().target_type(), Some("Patient"));
//!
//! // A missing required field is reported with its path.
//! let err = ConsentProvisionActor::builder().build().unwrap_err();
//! assert_eq!(err.violations()[0].path, "Consent.provision.actor.role");
//! ```
//!
//! ## Configuration
//!
//! Process-wide checks can be tuned through [`config::ModelConfig`], either
//! from JSON or from `ATRIUS_MODEL_*` environment variables.

extern crate self as atrius_fhir_model;

pub mod choice;
pub mod config;
pub mod constraint;
pub mod datatypes;
pub mod element;
pub mod error;
pub mod frozen;
pub mod precision;
pub mod primitives;
pub mod resource;
pub mod resource_type;
pub mod resources;
pub mod validation;
pub mod visitor;

pub use error::{Error, Result};

/// Node types plus the traits that carry the shared getters and setters.
pub mod prelude {
    pub use crate::choice::{Choice, DataType};
    pub use crate::constraint::{ConstraintEngine, FhirValidate};
    pub use crate::datatypes::*;
    pub use crate::element::{BackboneBuilder, BackboneNode, ElementBuilder, ElementNode};
    pub use crate::precision::{DateTimePrecision, PreciseDecimal, PrecisionDateTime, PrecisionInstant};
    pub use crate::primitives::{
        Base64Binary, Canonical, Code, DateTime, FhirBoolean, FhirDecimal, FhirString, Id,
        Instant, Integer, Markdown, PositiveInt, Primitive, PrimitiveKind, UnsignedInt, Uri, Url,
        Xhtml,
    };
    pub use crate::resource::{
        DomainResourceBuilder, DomainResourceNode, ResourceBuilder, ResourceNode,
    };
    pub use crate::resources::*;
    pub use crate::visitor::{NodeKind, PrimitiveValue, TypeInfo, Visitable, Visitor};
}
