use atrius_model_macros::{FhirValidate, Visitable};

use crate::element::{ElementBase, ElementBaseBuilder, impl_element_builder};
use crate::error::Result;
use crate::primitives::{Base64Binary, Code, DateTime, FhirString, UnsignedInt, Url};
use crate::validation::Validator;

/// Content stored inline (`data`) or by location (`url`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Visitable, FhirValidate)]
#[fhir(type_name = "Attachment", kind = "element")]
#[fhir_invariant(
    key = "att-1",
    severity = "error",
    human = "If the Attachment has data, it SHALL have a contentType",
    expr = "data.empty() or contentType.exists()",
    path = "Attachment"
)]
pub struct Attachment {
    #[fhir(base)]
    base: ElementBase,
    #[fhir_binding(
        name = "MimeType",
        strength = "required",
        value_set = "http://hl7.org/fhir/ValueSet/mimetypes|4.3.0",
        description = "The mime type of an attachment. Any valid mime type is allowed."
    )]
    content_type: Option<Code>,
    language: Option<Code>,
    data: Option<Base64Binary>,
    url: Option<Url>,
    size: Option<UnsignedInt>,
    hash: Option<Base64Binary>,
    title: Option<FhirString>,
    creation: Option<DateTime>,
}

impl Attachment {
    pub fn builder() -> AttachmentBuilder {
        AttachmentBuilder::default()
    }

    pub fn content_type(&self) -> Option<&Code> {
        self.content_type.as_ref()
    }

    pub fn language(&self) -> Option<&Code> {
        self.language.as_ref()
    }

    pub fn data(&self) -> Option<&Base64Binary> {
        self.data.as_ref()
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn size(&self) -> Option<&UnsignedInt> {
        self.size.as_ref()
    }

    pub fn hash(&self) -> Option<&Base64Binary> {
        self.hash.as_ref()
    }

    pub fn title(&self) -> Option<&FhirString> {
        self.title.as_ref()
    }

    pub fn creation(&self) -> Option<&DateTime> {
        self.creation.as_ref()
    }

    pub fn to_builder(&self) -> AttachmentBuilder {
        AttachmentBuilder {
            base: self.base.to_builder(),
            content_type: self.content_type.clone(),
            language: self.language.clone(),
            data: self.data.clone(),
            url: self.url.clone(),
            size: self.size.clone(),
            hash: self.hash.clone(),
            title: self.title.clone(),
            creation: self.creation.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttachmentBuilder {
    base: ElementBaseBuilder,
    content_type: Option<Code>,
    language: Option<Code>,
    data: Option<Base64Binary>,
    url: Option<Url>,
    size: Option<UnsignedInt>,
    hash: Option<Base64Binary>,
    title: Option<FhirString>,
    creation: Option<DateTime>,
}

impl_element_builder!(AttachmentBuilder);

impl AttachmentBuilder {
    pub fn content_type(mut self, content_type: impl Into<Option<Code>>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn language(mut self, language: impl Into<Option<Code>>) -> Self {
        self.language = language.into();
        self
    }

    pub fn data(mut self, data: impl Into<Option<Base64Binary>>) -> Self {
        self.data = data.into();
        self
    }

    pub fn url(mut self, url: impl Into<Option<Url>>) -> Self {
        self.url = url.into();
        self
    }

    pub fn size(mut self, size: impl Into<Option<UnsignedInt>>) -> Self {
        self.size = size.into();
        self
    }

    pub fn hash(mut self, hash: impl Into<Option<Base64Binary>>) -> Self {
        self.hash = hash.into();
        self
    }

    pub fn title(mut self, title: impl Into<Option<FhirString>>) -> Self {
        self.title = title.into();
        self
    }

    pub fn creation(mut self, creation: impl Into<Option<DateTime>>) -> Self {
        self.creation = creation.into();
        self
    }

    pub fn build(self) -> Result<Attachment> {
        let mut check = Validator::new("Attachment");
        let base = self.base.build(&mut check);
        check.finish_element(|| {
            Some(Attachment {
                base,
                content_type: self.content_type,
                language: self.language,
                data: self.data,
                url: self.url,
                size: self.size,
                hash: self.hash,
                title: self.title,
                creation: self.creation,
            })
        })
    }
}
