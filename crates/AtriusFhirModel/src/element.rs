//! Common fields shared by every element and backbone element.
//!
//! Instead of an inheritance chain, each node embeds one of the base values
//! defined here and exposes it through the [`ElementNode`] / [`BackboneNode`]
//! traits. Builders embed the matching staging value and pick up the shared
//! setters from [`ElementBuilder`] / [`BackboneBuilder`], whose methods
//! return `Self` so fluent chains keep the concrete builder type.

use crate::datatypes::Extension;
use crate::validation::Validator;
use crate::visitor::{BaseFields, Child, Visitable};

/// `id` and `extension`, present on every element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ElementBase {
    id: Option<String>,
    extension: Vec<Extension>,
}

impl ElementBase {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn extension(&self) -> &[Extension] {
        &self.extension
    }

    pub fn to_builder(&self) -> ElementBaseBuilder {
        ElementBaseBuilder {
            id: self.id.clone(),
            extension: staged(&self.extension),
        }
    }
}

impl BaseFields for ElementBase {
    fn base_children<'a>(&'a self, out: &mut Vec<Child<'a>>) {
        push_list(out, "extension", &self.extension);
    }
}

/// Staging value for [`ElementBase`].
#[derive(Debug, Clone, Default)]
pub struct ElementBaseBuilder {
    id: Option<String>,
    extension: Vec<Option<Extension>>,
}

impl ElementBaseBuilder {
    pub fn build(self, check: &mut Validator) -> ElementBase {
        ElementBase {
            id: self.id,
            extension: check.check_list(self.extension, "extension"),
        }
    }
}

/// [`ElementBase`] plus `modifierExtension`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BackboneBase {
    element: ElementBase,
    modifier_extension: Vec<Extension>,
}

impl BackboneBase {
    pub fn element(&self) -> &ElementBase {
        &self.element
    }

    pub fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }

    pub fn to_builder(&self) -> BackboneBaseBuilder {
        BackboneBaseBuilder {
            element: self.element.to_builder(),
            modifier_extension: staged(&self.modifier_extension),
        }
    }
}

impl BaseFields for BackboneBase {
    fn base_children<'a>(&'a self, out: &mut Vec<Child<'a>>) {
        self.element.base_children(out);
        push_list(out, "modifierExtension", &self.modifier_extension);
    }
}

#[derive(Debug, Clone, Default)]
pub struct BackboneBaseBuilder {
    element: ElementBaseBuilder,
    modifier_extension: Vec<Option<Extension>>,
}

impl BackboneBaseBuilder {
    pub fn build(self, check: &mut Validator) -> BackboneBase {
        BackboneBase {
            element: self.element.build(check),
            modifier_extension: check.check_list(self.modifier_extension, "modifierExtension"),
        }
    }
}

/// Read access to the common element fields.
pub trait ElementNode: Visitable {
    fn element_base(&self) -> &ElementBase;

    fn id(&self) -> Option<&str> {
        self.element_base().id()
    }

    fn extension(&self) -> &[Extension] {
        self.element_base().extension()
    }

    /// Extensions with the given url.
    fn extensions_by_url<'a>(&'a self, url: &'a str) -> impl Iterator<Item = &'a Extension> + 'a
    where
        Self: Sized,
    {
        self.extension().iter().filter(move |e| e.url() == url)
    }
}

pub trait BackboneNode: ElementNode {
    fn backbone_base(&self) -> &BackboneBase;

    fn modifier_extension(&self) -> &[Extension] {
        self.backbone_base().modifier_extension()
    }
}

/// Shared setters for every element builder.
pub trait ElementBuilder: Sized {
    #[doc(hidden)]
    fn element_base_mut(&mut self) -> &mut ElementBaseBuilder;

    /// Sets or, with `None`, clears the element id.
    fn id(mut self, id: impl Into<Option<String>>) -> Self {
        self.element_base_mut().id = id.into();
        self
    }

    /// Appends one extension. `None` is accepted here and rejected by `build()`.
    fn extension(mut self, extension: impl Into<Option<Extension>>) -> Self {
        self.element_base_mut().extension.push(extension.into());
        self
    }

    /// Replaces all extensions.
    fn extensions(mut self, extensions: impl IntoIterator<Item = impl Into<Option<Extension>>>) -> Self {
        self.element_base_mut().extension = extensions.into_iter().map(Into::into).collect();
        self
    }
}

pub trait BackboneBuilder: ElementBuilder {
    #[doc(hidden)]
    fn backbone_base_mut(&mut self) -> &mut BackboneBaseBuilder;

    fn modifier_extension(mut self, extension: impl Into<Option<Extension>>) -> Self {
        self.backbone_base_mut().modifier_extension.push(extension.into());
        self
    }

    fn modifier_extensions(mut self, extensions: impl IntoIterator<Item = impl Into<Option<Extension>>>) -> Self {
        self.backbone_base_mut().modifier_extension = extensions.into_iter().map(Into::into).collect();
        self
    }
}

/// Wires a builder whose `base` field is an [`ElementBaseBuilder`].
macro_rules! impl_element_builder {
    ($($builder:ty),+ $(,)?) => {
        $(
            impl $crate::element::ElementBuilder for $builder {
                fn element_base_mut(&mut self) -> &mut $crate::element::ElementBaseBuilder {
                    &mut self.base
                }
            }
        )+
    };
}

/// Wires a builder whose `base` field is a [`BackboneBaseBuilder`].
macro_rules! impl_backbone_builder {
    ($($builder:ty),+ $(,)?) => {
        $(
            impl $crate::element::ElementBuilder for $builder {
                fn element_base_mut(&mut self) -> &mut $crate::element::ElementBaseBuilder {
                    self.base.element_mut()
                }
            }

            impl $crate::element::BackboneBuilder for $builder {
                fn backbone_base_mut(&mut self) -> &mut $crate::element::BackboneBaseBuilder {
                    &mut self.base
                }
            }
        )+
    };
}

pub(crate) use impl_backbone_builder;
pub(crate) use impl_element_builder;

impl BackboneBaseBuilder {
    #[doc(hidden)]
    pub fn element_mut(&mut self) -> &mut ElementBaseBuilder {
        &mut self.element
    }
}

/// Copies a built list back into builder staging form.
pub(crate) fn staged<T: Clone>(items: &[T]) -> Vec<Option<T>> {
    items.iter().cloned().map(Some).collect()
}

/// Pushes each element of a repeating field as an indexed child.
pub(crate) fn push_list<'a, T: Visitable>(out: &mut Vec<Child<'a>>, name: &'static str, items: &'a [T]) {
    out.extend(
        items
            .iter()
            .enumerate()
            .map(|(i, item)| Child::new(name, Some(i), item as &dyn Visitable)),
    );
}
