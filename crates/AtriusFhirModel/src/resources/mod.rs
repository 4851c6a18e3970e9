//! Bundled resource definitions.

pub mod audit_event;
pub mod consent;

pub use audit_event::*;
pub use consent::*;

use atrius_model_macros::Visitable;

use crate::resource::{DomainResourceBase, DomainResourceNode, ResourceBase, ResourceNode};

/// Any resource this crate models; used for `contained` and for callers that
/// handle resources generically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable)]
pub enum Resource {
    AuditEvent(Box<AuditEvent>),
    Consent(Box<Consent>),
}

impl Resource {
    pub fn resource_type(&self) -> &'static str {
        match self {
            Resource::AuditEvent(_) => "AuditEvent",
            Resource::Consent(_) => "Consent",
        }
    }

    fn as_domain_resource(&self) -> &dyn DomainResourceNode {
        match self {
            Resource::AuditEvent(r) => &**r,
            Resource::Consent(r) => &**r,
        }
    }
}

impl ResourceNode for Resource {
    fn resource_base(&self) -> &ResourceBase {
        self.as_domain_resource().resource_base()
    }
}

impl DomainResourceNode for Resource {
    fn domain_resource_base(&self) -> &DomainResourceBase {
        self.as_domain_resource().domain_resource_base()
    }
}

impl From<AuditEvent> for Resource {
    fn from(value: AuditEvent) -> Self {
        Resource::AuditEvent(Box::new(value))
    }
}

impl From<Consent> for Resource {
    fn from(value: Consent) -> Self {
        Resource::Consent(Box::new(value))
    }
}
