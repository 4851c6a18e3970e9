//=============================================================================
// Type Analysis Helper Functions
//=============================================================================

use syn::{GenericArgument, Path, PathArguments, Type, TypePath};

/// How a field holds its node(s).
pub(crate) enum ContainerKind {
    /// `T`: a required single node.
    Plain,
    /// `Option<T>` (including `Option<Box<T>>`).
    Option,
    /// `Vec<T>`: a repeating field.
    Vec,
}

/// Classifies a field type by its outermost container.
///
/// ```rust,ignore
/// // Coding               -> Plain
/// // Option<Box<Reference>> -> Option
/// // Vec<CodeableConcept>  -> Vec
/// ```
pub(crate) fn container_kind(ty: &Type) -> ContainerKind {
    if get_option_inner_type(ty).is_some() {
        ContainerKind::Option
    } else if get_vec_inner_type(ty).is_some() {
        ContainerKind::Vec
    } else {
        ContainerKind::Plain
    }
}

fn single_generic_arg<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(TypePath {
        path: Path { segments, .. },
        ..
    }) = ty
    else {
        return None;
    };
    let segment = segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner_ty)) => Some(inner_ty),
        _ => None,
    }
}

/// Extracts `T` from `Option<T>`.
pub(crate) fn get_option_inner_type(ty: &Type) -> Option<&Type> {
    single_generic_arg(ty, "Option")
}

/// Extracts `T` from `Vec<T>`.
pub(crate) fn get_vec_inner_type(ty: &Type) -> Option<&Type> {
    single_generic_arg(ty, "Vec")
}

/// Extracts the payload type of a single-field tuple variant such as
/// `String(FhirString)`.
pub(crate) fn single_field_type(fields: &syn::Fields) -> Option<&Type> {
    match fields {
        syn::Fields::Unnamed(unnamed) if unnamed.unnamed.len() == 1 => {
            unnamed.unnamed.first().map(|f| &f.ty)
        }
        _ => None,
    }
}
