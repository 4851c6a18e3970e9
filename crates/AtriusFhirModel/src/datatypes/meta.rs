use atrius_model_macros::Visitable;

use crate::datatypes::Coding;
use crate::element::{ElementBase, ElementBaseBuilder, impl_element_builder, staged};
use crate::error::Result;
use crate::primitives::{Canonical, Id, Instant, Uri};
use crate::validation::Validator;

/// Resource metadata maintained by the infrastructure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable)]
#[fhir(type_name = "Meta", kind = "element")]
pub struct Meta {
    #[fhir(base)]
    base: ElementBase,
    version_id: Option<Id>,
    last_updated: Option<Instant>,
    source: Option<Uri>,
    profile: Vec<Canonical>,
    security: Vec<Coding>,
    tag: Vec<Coding>,
}

impl Meta {
    pub fn builder() -> MetaBuilder {
        MetaBuilder::default()
    }

    pub fn version_id(&self) -> Option<&Id> {
        self.version_id.as_ref()
    }

    pub fn last_updated(&self) -> Option<&Instant> {
        self.last_updated.as_ref()
    }

    pub fn source(&self) -> Option<&Uri> {
        self.source.as_ref()
    }

    pub fn profile(&self) -> &[Canonical] {
        &self.profile
    }

    pub fn security(&self) -> &[Coding] {
        &self.security
    }

    pub fn tag(&self) -> &[Coding] {
        &self.tag
    }

    pub fn to_builder(&self) -> MetaBuilder {
        MetaBuilder {
            base: self.base.to_builder(),
            version_id: self.version_id.clone(),
            last_updated: self.last_updated.clone(),
            source: self.source.clone(),
            profile: staged(&self.profile),
            security: staged(&self.security),
            tag: staged(&self.tag),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetaBuilder {
    base: ElementBaseBuilder,
    version_id: Option<Id>,
    last_updated: Option<Instant>,
    source: Option<Uri>,
    profile: Vec<Option<Canonical>>,
    security: Vec<Option<Coding>>,
    tag: Vec<Option<Coding>>,
}

impl_element_builder!(MetaBuilder);

impl MetaBuilder {
    pub fn version_id(mut self, version_id: impl Into<Option<Id>>) -> Self {
        self.version_id = version_id.into();
        self
    }

    pub fn last_updated(mut self, last_updated: impl Into<Option<Instant>>) -> Self {
        self.last_updated = last_updated.into();
        self
    }

    pub fn source(mut self, source: impl Into<Option<Uri>>) -> Self {
        self.source = source.into();
        self
    }

    pub fn profile(mut self, profile: impl Into<Option<Canonical>>) -> Self {
        self.profile.push(profile.into());
        self
    }

    pub fn profiles(mut self, profile: impl IntoIterator<Item = impl Into<Option<Canonical>>>) -> Self {
        self.profile = profile.into_iter().map(Into::into).collect();
        self
    }

    pub fn security(mut self, security: impl Into<Option<Coding>>) -> Self {
        self.security.push(security.into());
        self
    }

    pub fn securities(mut self, security: impl IntoIterator<Item = impl Into<Option<Coding>>>) -> Self {
        self.security = security.into_iter().map(Into::into).collect();
        self
    }

    pub fn tag(mut self, tag: impl Into<Option<Coding>>) -> Self {
        self.tag.push(tag.into());
        self
    }

    pub fn tags(mut self, tag: impl IntoIterator<Item = impl Into<Option<Coding>>>) -> Self {
        self.tag = tag.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<Meta> {
        let mut check = Validator::new("Meta");
        let base = self.base.build(&mut check);
        let profile = check.check_list(self.profile, "profile");
        let security = check.check_list(self.security, "security");
        let tag = check.check_list(self.tag, "tag");
        check.finish_element(|| {
            Some(Meta {
                base,
                version_id: self.version_id,
                last_updated: self.last_updated,
                source: self.source,
                profile,
                security,
                tag,
            })
        })
    }
}
