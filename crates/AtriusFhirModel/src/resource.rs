//! Common fields of resources and domain resources.

use crate::datatypes::{Extension, Meta, Narrative};
use crate::element::{push_list, staged};
use crate::primitives::{Code, Id, Uri};
use crate::resources::Resource;
use crate::validation::Validator;
use crate::visitor::{BaseFields, Child, Visitable};

/// `id`, `meta`, `implicitRules` and `language`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResourceBase {
    id: Option<Id>,
    meta: Option<Meta>,
    implicit_rules: Option<Uri>,
    language: Option<Code>,
}

impl ResourceBase {
    pub fn id(&self) -> Option<&Id> {
        self.id.as_ref()
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    pub fn implicit_rules(&self) -> Option<&Uri> {
        self.implicit_rules.as_ref()
    }

    pub fn language(&self) -> Option<&Code> {
        self.language.as_ref()
    }

    pub fn to_builder(&self) -> ResourceBaseBuilder {
        ResourceBaseBuilder {
            id: self.id.clone(),
            meta: self.meta.clone(),
            implicit_rules: self.implicit_rules.clone(),
            language: self.language.clone(),
        }
    }
}

impl BaseFields for ResourceBase {
    fn base_children<'a>(&'a self, out: &mut Vec<Child<'a>>) {
        push_opt(out, "id", self.id.as_ref());
        push_opt(out, "meta", self.meta.as_ref());
        push_opt(out, "implicitRules", self.implicit_rules.as_ref());
        push_opt(out, "language", self.language.as_ref());
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResourceBaseBuilder {
    id: Option<Id>,
    meta: Option<Meta>,
    implicit_rules: Option<Uri>,
    language: Option<Code>,
}

impl ResourceBaseBuilder {
    pub fn build(self) -> ResourceBase {
        ResourceBase {
            id: self.id,
            meta: self.meta,
            implicit_rules: self.implicit_rules,
            language: self.language,
        }
    }
}

/// [`ResourceBase`] plus narrative, contained resources and extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DomainResourceBase {
    resource: ResourceBase,
    text: Option<Narrative>,
    contained: Vec<Resource>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
}

impl DomainResourceBase {
    pub fn resource(&self) -> &ResourceBase {
        &self.resource
    }

    pub fn text(&self) -> Option<&Narrative> {
        self.text.as_ref()
    }

    pub fn contained(&self) -> &[Resource] {
        &self.contained
    }

    pub fn extension(&self) -> &[Extension] {
        &self.extension
    }

    pub fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }

    pub fn to_builder(&self) -> DomainResourceBaseBuilder {
        DomainResourceBaseBuilder {
            resource: self.resource.to_builder(),
            text: self.text.clone(),
            contained: staged(&self.contained),
            extension: staged(&self.extension),
            modifier_extension: staged(&self.modifier_extension),
        }
    }
}

impl BaseFields for DomainResourceBase {
    fn base_children<'a>(&'a self, out: &mut Vec<Child<'a>>) {
        self.resource.base_children(out);
        push_opt(out, "text", self.text.as_ref());
        push_list(out, "contained", &self.contained);
        push_list(out, "extension", &self.extension);
        push_list(out, "modifierExtension", &self.modifier_extension);
    }
}

#[derive(Debug, Clone, Default)]
pub struct DomainResourceBaseBuilder {
    resource: ResourceBaseBuilder,
    text: Option<Narrative>,
    contained: Vec<Option<Resource>>,
    extension: Vec<Option<Extension>>,
    modifier_extension: Vec<Option<Extension>>,
}

impl DomainResourceBaseBuilder {
    pub fn build(self, check: &mut Validator) -> DomainResourceBase {
        DomainResourceBase {
            resource: self.resource.build(),
            text: self.text,
            contained: check.check_list(self.contained, "contained"),
            extension: check.check_list(self.extension, "extension"),
            modifier_extension: check.check_list(self.modifier_extension, "modifierExtension"),
        }
    }

    #[doc(hidden)]
    pub fn resource_mut(&mut self) -> &mut ResourceBaseBuilder {
        &mut self.resource
    }
}

/// Read access to the common resource fields.
pub trait ResourceNode: Visitable {
    fn resource_base(&self) -> &ResourceBase;

    fn id(&self) -> Option<&Id> {
        self.resource_base().id()
    }

    fn meta(&self) -> Option<&Meta> {
        self.resource_base().meta()
    }

    fn implicit_rules(&self) -> Option<&Uri> {
        self.resource_base().implicit_rules()
    }

    fn language(&self) -> Option<&Code> {
        self.resource_base().language()
    }
}

pub trait DomainResourceNode: ResourceNode {
    fn domain_resource_base(&self) -> &DomainResourceBase;

    fn text(&self) -> Option<&Narrative> {
        self.domain_resource_base().text()
    }

    fn contained(&self) -> &[Resource] {
        self.domain_resource_base().contained()
    }

    fn extension(&self) -> &[Extension] {
        self.domain_resource_base().extension()
    }

    fn modifier_extension(&self) -> &[Extension] {
        self.domain_resource_base().modifier_extension()
    }
}

pub trait ResourceBuilder: Sized {
    #[doc(hidden)]
    fn resource_base_mut(&mut self) -> &mut ResourceBaseBuilder;

    fn id(mut self, id: impl Into<Option<Id>>) -> Self {
        self.resource_base_mut().id = id.into();
        self
    }

    fn meta(mut self, meta: impl Into<Option<Meta>>) -> Self {
        self.resource_base_mut().meta = meta.into();
        self
    }

    fn implicit_rules(mut self, implicit_rules: impl Into<Option<Uri>>) -> Self {
        self.resource_base_mut().implicit_rules = implicit_rules.into();
        self
    }

    fn language(mut self, language: impl Into<Option<Code>>) -> Self {
        self.resource_base_mut().language = language.into();
        self
    }
}

pub trait DomainResourceBuilder: ResourceBuilder {
    #[doc(hidden)]
    fn domain_resource_base_mut(&mut self) -> &mut DomainResourceBaseBuilder;

    fn text(mut self, text: impl Into<Option<Narrative>>) -> Self {
        self.domain_resource_base_mut().text = text.into();
        self
    }

    fn contained(mut self, resource: impl Into<Option<Resource>>) -> Self {
        self.domain_resource_base_mut().contained.push(resource.into());
        self
    }

    fn contained_all(mut self, resources: impl IntoIterator<Item = impl Into<Option<Resource>>>) -> Self {
        self.domain_resource_base_mut().contained = resources.into_iter().map(Into::into).collect();
        self
    }

    fn extension(mut self, extension: impl Into<Option<Extension>>) -> Self {
        self.domain_resource_base_mut().extension.push(extension.into());
        self
    }

    fn extensions(mut self, extensions: impl IntoIterator<Item = impl Into<Option<Extension>>>) -> Self {
        self.domain_resource_base_mut().extension = extensions.into_iter().map(Into::into).collect();
        self
    }

    fn modifier_extension(mut self, extension: impl Into<Option<Extension>>) -> Self {
        self.domain_resource_base_mut().modifier_extension.push(extension.into());
        self
    }

    fn modifier_extensions(mut self, extensions: impl IntoIterator<Item = impl Into<Option<Extension>>>) -> Self {
        self.domain_resource_base_mut().modifier_extension =
            extensions.into_iter().map(Into::into).collect();
        self
    }
}

/// Wires a resource builder whose `base` field is a [`DomainResourceBaseBuilder`].
macro_rules! impl_domain_resource_builder {
    ($($builder:ty),+ $(,)?) => {
        $(
            impl $crate::resource::ResourceBuilder for $builder {
                fn resource_base_mut(&mut self) -> &mut $crate::resource::ResourceBaseBuilder {
                    self.base.resource_mut()
                }
            }

            impl $crate::resource::DomainResourceBuilder for $builder {
                fn domain_resource_base_mut(
                    &mut self,
                ) -> &mut $crate::resource::DomainResourceBaseBuilder {
                    &mut self.base
                }
            }
        )+
    };
}

pub(crate) use impl_domain_resource_builder;

fn push_opt<'a, T: Visitable>(out: &mut Vec<Child<'a>>, name: &'static str, value: Option<&'a T>) {
    if let Some(value) = value {
        out.push(Child::new(name, None, value));
    }
}
