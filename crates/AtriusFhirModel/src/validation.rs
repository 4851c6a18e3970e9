//! # Validation engine
//!
//! A [`Validator`] is created at the start of every `build()`. The builder
//! feeds its staged values through the checks below, which move the values
//! out (unwrapping list elements and choice values as they go) and record a
//! [`Violation`] for everything that is wrong. [`Validator::finish`] then
//! either constructs the node or returns every recorded violation at once.
//!
//! Checks are pure: they only look at the values handed to them and never
//! touch global state apart from the configuration snapshot taken when the
//! validator was created.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::choice::{Choice, DataType};
use crate::config::ModelConfig;
use crate::datatypes::{LiteralReference, Reference};
use crate::error::{ConstructionError, Error, Result, Rule, Violation};
use crate::resource_type::is_resource_type;
use crate::visitor::{PrimitiveValue, Visitable};

static ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9\-.]{1,64}$").expect("valid id regex"));

const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Collects violations for one `build()` call.
#[derive(Debug)]
pub struct Validator {
    type_name: &'static str,
    config: Arc<ModelConfig>,
    violations: Vec<Violation>,
    null_element: Option<String>,
}

impl Validator {
    /// Starts a validation pass using the current process-wide configuration.
    pub fn new(type_name: &'static str) -> Self {
        Self::with_config(type_name, ModelConfig::current())
    }

    pub fn with_config(type_name: &'static str, config: Arc<ModelConfig>) -> Self {
        Self {
            type_name,
            config,
            violations: Vec::new(),
            null_element: None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    fn path(&self, field: &str) -> String {
        format!("{}.{}", self.type_name, field)
    }

    fn report(&mut self, field: &str, rule: Rule) {
        let path = self.path(field);
        self.violations.push(Violation::new(path, rule));
    }

    /// Fails if a mandatory singular field is absent.
    pub fn require_non_null<T>(&mut self, value: Option<T>, field: &str) -> Option<T> {
        if value.is_none() {
            self.report(field, Rule::MissingRequired);
        }
        value
    }

    /// Fails if a mandatory repeating field has no elements.
    pub fn require_non_empty_list<T>(&mut self, values: Vec<Option<T>>, field: &str) -> Vec<T> {
        if values.is_empty() {
            self.report(field, Rule::EmptyRequiredList);
        }
        self.check_list(values, field)
    }

    /// Unwraps the elements of a repeating field, remembering the first null
    /// element so that `finish` can reject the build.
    pub fn check_list<T>(&mut self, values: Vec<Option<T>>, field: &str) -> Vec<T> {
        let mut out = Vec::with_capacity(values.len());
        for (i, value) in values.into_iter().enumerate() {
            match value {
                Some(v) => out.push(v),
                None => {
                    if self.null_element.is_none() {
                        self.null_element = Some(format!("{}[{}]", self.path(field), i));
                    }
                }
            }
        }
        out
    }

    /// Fails if a required choice field is absent or holds a type outside `C`'s set.
    pub fn require_choice_element<C: Choice>(&mut self, value: Option<DataType>, field: &str) -> Option<C> {
        if value.is_none() {
            self.report(field, Rule::MissingRequired);
            return None;
        }
        self.check_choice_element(value, field)
    }

    /// Like [`require_choice_element`](Self::require_choice_element), but absence is allowed.
    pub fn check_choice_element<C: Choice>(&mut self, value: Option<DataType>, field: &str) -> Option<C> {
        match C::try_from(value?) {
            Ok(choice) => Some(choice),
            Err(other) => {
                self.report(
                    field,
                    Rule::DisallowedChoiceType {
                        actual: other.type_name(),
                        allowed: C::ALLOWED,
                    },
                );
                None
            }
        }
    }

    /// Checks a reference's target type against `allowed`.
    ///
    /// The resource type is taken from `Reference.type` and, for relative
    /// literal references, from the literal itself; both must be allowed and
    /// they must agree. A reference that declares no type passes unless the
    /// configuration asks for strict reference typing.
    pub fn check_reference_type(
        &mut self,
        reference: Option<&Reference>,
        field: &str,
        allowed: &'static [&'static str],
    ) {
        let Some(reference) = reference else { return };
        if !self.config.check_reference_types {
            return;
        }

        let mut literal_type = None;
        match reference.literal() {
            LiteralReference::Typed(resource_type) => {
                if !is_resource_type(resource_type) {
                    let msg = format!("unknown resource type in reference value: '{}'", resource_type);
                    self.report(field, Rule::InvalidReference(msg));
                } else if !allowed.contains(&resource_type) {
                    self.report(
                        field,
                        Rule::DisallowedReferenceTarget {
                            actual: Some(resource_type.to_string()),
                            allowed,
                        },
                    );
                }
                literal_type = Some(resource_type);
            }
            LiteralReference::Unparsable(value) => {
                let msg = format!("resource type not found in reference value: '{}'", value);
                self.report(field, Rule::InvalidReference(msg));
            }
            LiteralReference::Local | LiteralReference::Absolute | LiteralReference::Absent => {}
        }

        match reference.r#type().and_then(|t| t.as_str()) {
            Some(declared) => {
                if !is_resource_type(declared) || !allowed.contains(&declared) {
                    self.report(
                        field,
                        Rule::DisallowedReferenceTarget {
                            actual: Some(declared.to_string()),
                            allowed,
                        },
                    );
                }
                if let Some(literal) = literal_type
                    && literal != declared
                {
                    let msg = format!(
                        "resource type in reference value '{}' does not match Reference.type '{}'",
                        literal, declared
                    );
                    self.report(field, Rule::InvalidReference(msg));
                }
            }
            None => {
                if self.config.require_reference_type && literal_type.is_none() {
                    self.report(
                        field,
                        Rule::DisallowedReferenceTarget {
                            actual: None,
                            allowed,
                        },
                    );
                }
            }
        }
    }

    /// [`check_reference_type`](Self::check_reference_type) for every element of a list.
    pub fn check_reference_types(
        &mut self,
        references: &[Reference],
        field: &str,
        allowed: &'static [&'static str],
    ) {
        for (i, reference) in references.iter().enumerate() {
            self.check_reference_type(Some(reference), &format!("{}[{}]", field, i), allowed);
        }
    }

    /// Reference check for a choice field; a no-op unless the choice holds a `Reference`.
    pub fn check_choice_reference_type<C: Choice>(
        &mut self,
        value: Option<&C>,
        field: &str,
        allowed: &'static [&'static str],
    ) {
        let reference = value.and_then(|c| c.as_visitable().downcast_ref::<Reference>());
        self.check_reference_type(reference, field, allowed);
    }

    /// Fails if a field that must not be populated is present.
    pub fn prohibited<T>(&mut self, value: Option<&T>, field: &str) {
        if value.is_some() {
            self.report(field, Rule::Prohibited);
        }
    }

    /// Records an [`Rule::InvalidValue`] when `result` is an error.
    pub fn check_value(&mut self, field: &str, result: std::result::Result<(), String>) {
        if let Err(msg) = result {
            self.report(field, Rule::InvalidValue(msg));
        }
    }

    /// Checks a primitive value against the rules of its FHIR type.
    pub fn check_primitive(&mut self, field: &str, type_name: &str, value: PrimitiveValue<'_>) {
        let result = check_primitive_value(type_name, value, &self.config);
        self.check_value(field, result);
    }

    /// Constructs the node if no check failed.
    ///
    /// `build` is only called when every check passed; it returns `None` only
    /// if a required value was dropped, which the checks have already reported.
    pub fn finish<N: Visitable>(self, build: impl FnOnce() -> Option<N>) -> Result<N> {
        self.complete(build, false)
    }

    /// Like [`finish`](Self::finish), additionally requiring that the node
    /// carries a value or children (`ele-1`).
    pub fn finish_element<N: Visitable>(self, build: impl FnOnce() -> Option<N>) -> Result<N> {
        self.complete(build, true)
    }

    fn complete<N: Visitable>(mut self, build: impl FnOnce() -> Option<N>, element: bool) -> Result<N> {
        if let Some(path) = self.null_element.take() {
            debug!(type_name = self.type_name, %path, "Rejected null list element");
            return Err(Error::InvalidArgument {
                type_name: self.type_name,
                path,
            });
        }

        if self.violations.is_empty() {
            match build() {
                Some(node) => {
                    self.check_primitive_children(&node);
                    if element && !require_structural_content(&node) {
                        self.violations
                            .push(Violation::new(self.type_name, Rule::VacuousNode));
                    }
                    if self.violations.is_empty() {
                        return Ok(node);
                    }
                }
                None => self
                    .violations
                    .push(Violation::new(self.type_name, Rule::MissingRequired)),
            }
        }

        Err(self.into_error())
    }

    fn check_primitive_children(&mut self, node: &dyn Visitable) {
        for child in node.child_nodes() {
            if let Some(value) = child.node.primitive_value() {
                let field = match child.index {
                    Some(i) => format!("{}[{}]", child.name, i),
                    None => child.name.to_string(),
                };
                self.check_primitive(&field, child.node.type_name(), value);
            }
        }
    }

    fn into_error(self) -> Error {
        debug!(
            type_name = self.type_name,
            violations = self.violations.len(),
            "Rejected build"
        );
        for v in &self.violations {
            trace!(type_name = self.type_name, "{}", v);
        }
        ConstructionError::new(self.type_name, self.violations).into()
    }
}

/// `ele-1`: true if the node has a value, a declared field, or any extension.
pub fn require_structural_content(node: &dyn Visitable) -> bool {
    node.has_structural_content() || !node.child_nodes().is_empty()
}

/// Checks a primitive value against the lexical rules of `type_name`.
pub fn check_primitive_value(
    type_name: &str,
    value: PrimitiveValue<'_>,
    config: &ModelConfig,
) -> std::result::Result<(), String> {
    match (type_name, value) {
        ("string" | "markdown", PrimitiveValue::String(s)) => check_string(s, config),
        ("code", PrimitiveValue::String(s)) => check_code(s),
        ("id", PrimitiveValue::String(s)) => check_id(s),
        ("uri" | "url" | "canonical", PrimitiveValue::String(s)) => check_uri(s),
        ("base64Binary", PrimitiveValue::String(s)) => check_base64(s),
        ("xhtml", PrimitiveValue::String(s)) => check_xhtml(s),
        ("positiveInt", PrimitiveValue::Integer(i)) if i < 1 => {
            Err(format!("value {} must be greater than or equal to 1", i))
        }
        _ => Ok(()),
    }
}

/// FHIR `string`: non-blank, bounded length, no control characters other
/// than tab, carriage return and line feed.
pub fn check_string(s: &str, config: &ModelConfig) -> std::result::Result<(), String> {
    let length = s.chars().count();
    if length > config.max_string_length {
        return Err(format!(
            "string length {} exceeds maximum {}",
            length, config.max_string_length
        ));
    }
    if s.trim_matches(&[' ', '\t', '\r', '\n'][..]).is_empty() {
        return Err("string must contain non-whitespace content".to_string());
    }
    if config.check_control_chars
        && let Some(c) = s
            .chars()
            .find(|c| (*c as u32) < 32 && !matches!(c, '\t' | '\r' | '\n'))
    {
        return Err(format!("string contains control character U+{:04X}", c as u32));
    }
    Ok(())
}

/// FHIR `code`: no leading or trailing whitespace, and internal whitespace
/// only as single spaces.
pub fn check_code(s: &str) -> std::result::Result<(), String> {
    if s.is_empty() {
        return Err("code must not be empty".to_string());
    }
    if s.trim() != s {
        return Err(format!("code '{}' has leading or trailing whitespace", s));
    }
    let mut previous_space = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if c != ' ' || previous_space {
                return Err(format!("code '{}' contains invalid whitespace", s));
            }
            previous_space = true;
        } else {
            previous_space = false;
        }
    }
    Ok(())
}

pub fn check_id(s: &str) -> std::result::Result<(), String> {
    if ID_PATTERN.is_match(s) {
        Ok(())
    } else {
        Err(format!("id '{}' must match [A-Za-z0-9\\-\\.]{{1,64}}", s))
    }
}

pub fn check_uri(s: &str) -> std::result::Result<(), String> {
    if s.is_empty() {
        return Err("uri must not be empty".to_string());
    }
    if s.chars().any(char::is_whitespace) {
        return Err(format!("uri '{}' must not contain whitespace", s));
    }
    Ok(())
}

pub fn check_base64(s: &str) -> std::result::Result<(), String> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD
        .decode(compact.as_bytes())
        .map(|_| ())
        .map_err(|e| format!("invalid base64 content: {}", e))
}

/// FHIR `xhtml`: well-formed XML whose root is an XHTML `div`.
pub fn check_xhtml(s: &str) -> std::result::Result<(), String> {
    let doc = roxmltree::Document::parse(s).map_err(|e| format!("xhtml is not well-formed: {}", e))?;
    let root = doc.root_element();
    if root.tag_name().name() != "div" || root.tag_name().namespace() != Some(XHTML_NS) {
        return Err("xhtml root element must be a div in the XHTML namespace".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleKind;
    use crate::prelude::*;

    fn validator() -> Validator {
        Validator::with_config("Test", Arc::new(ModelConfig::default()))
    }

    fn strict() -> Validator {
        Validator::with_config(
            "Test",
            Arc::new(ModelConfig {
                require_reference_type: true,
                ..ModelConfig::default()
            }),
        )
    }

    fn reference(literal: Option<&str>, declared: Option<&str>) -> Reference {
        let mut builder = Reference::builder();
        if let Some(literal) = literal {
            builder = builder.reference(FhirString::from(literal));
        }
        if let Some(declared) = declared {
            builder = builder.r#type(Uri::from(declared));
        }
        builder.display(FhirString::from("x")).build().unwrap()
    }

    const PATIENT_ONLY: &[&str] = &["Patient"];

    #[test]
    fn test_require_non_null() {
        let mut check = validator();
        assert_eq!(check.require_non_null(Some(1), "a"), Some(1));
        assert_eq!(check.require_non_null(None::<i32>, "b"), None);
        assert_eq!(check.violations().len(), 1);
        assert_eq!(check.violations()[0].path, "Test.b");
    }

    #[test]
    fn test_check_list_defers_null() {
        let mut check = validator();
        let values = check.check_list(vec![Some(1), None, Some(3)], "item");
        assert_eq!(values, vec![1, 3]);
        let err = check.finish(|| Some(FhirString::from("x"))).unwrap_err();
        match err {
            Error::InvalidArgument { path, .. } => assert_eq!(path, "Test.item[1]"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_require_non_empty_list() {
        let mut check = validator();
        let values: Vec<i32> = check.require_non_empty_list(Vec::new(), "category");
        assert!(values.is_empty());
        assert_eq!(check.violations()[0].rule, Rule::EmptyRequiredList);
    }

    #[test]
    fn test_reference_without_type_is_permissive() {
        let mut check = validator();
        check.check_reference_type(Some(&reference(None, None)), "subject", PATIENT_ONLY);
        assert!(check.violations().is_empty());
    }

    #[test]
    fn test_strict_mode_requires_type() {
        let mut check = strict();
        check.check_reference_type(Some(&reference(None, None)), "subject", PATIENT_ONLY);
        assert_eq!(check.violations()[0].rule.kind(), RuleKind::DisallowedReferenceTarget);

        // a typed literal satisfies strict mode
        let mut check = strict();
        check.check_reference_type(Some(&reference(Some("Patient/1"), None)), "subject", PATIENT_ONLY);
        assert!(check.violations().is_empty());
    }

    #[test]
    fn test_reference_literal_checks() {
        let mut check = validator();
        check.check_reference_type(Some(&reference(Some("Patient/123"), None)), "a", PATIENT_ONLY);
        check.check_reference_type(Some(&reference(Some("#contained"), None)), "b", PATIENT_ONLY);
        check.check_reference_type(Some(&reference(Some("urn:uuid:1234"), None)), "c", PATIENT_ONLY);
        check.check_reference_type(Some(&reference(Some("Patient?identifier=x"), None)), "d", PATIENT_ONLY);
        // the query's url makes the whole value absolute, so the type is not checked
        check.check_reference_type(
            Some(&reference(Some("Device?identifier=http://x|1"), None)),
            "i",
            PATIENT_ONLY,
        );
        assert!(check.violations().is_empty());

        check.check_reference_type(Some(&reference(Some("Device/1"), None)), "e", PATIENT_ONLY);
        check.check_reference_type(Some(&reference(Some("not a ref"), None)), "f", PATIENT_ONLY);
        check.check_reference_type(Some(&reference(Some("Foo/1"), None)), "h", PATIENT_ONLY);
        check.check_reference_type(
            Some(&reference(Some("Patient/1"), Some("Device"))),
            "g",
            &["Patient", "Device"],
        );
        let kinds: Vec<_> = check
            .violations()
            .iter()
            .map(|v| (v.path.as_str(), v.rule.kind()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("Test.e", RuleKind::DisallowedReferenceTarget),
                ("Test.f", RuleKind::InvalidReference),
                ("Test.h", RuleKind::InvalidReference),
                ("Test.g", RuleKind::InvalidReference),
            ]
        );
    }

    #[test]
    fn test_reference_checks_can_be_disabled() {
        let mut check = Validator::with_config(
            "Test",
            Arc::new(ModelConfig {
                check_reference_types: false,
                ..ModelConfig::default()
            }),
        );
        check.check_reference_type(Some(&reference(None, Some("Foo"))), "a", PATIENT_ONLY);
        assert!(check.violations().is_empty());
    }

    #[test]
    fn test_prohibited() {
        let mut check = validator();
        check.prohibited(Some(&1), "x");
        check.prohibited(None::<&i32>, "y");
        assert_eq!(check.violations().len(), 1);
        assert_eq!(check.violations()[0].rule, Rule::Prohibited);
    }

    #[test]
    fn test_string_checks() {
        let config = ModelConfig::default();
        assert!(check_string("hello", &config).is_ok());
        assert!(check_string("   ", &config).is_err());
        assert!(check_string("bell\u{7}", &config).is_err());
        assert!(check_string("tab\there", &config).is_ok());
        let lenient = ModelConfig {
            check_control_chars: false,
            ..ModelConfig::default()
        };
        assert!(check_string("bell\u{7}", &lenient).is_ok());
    }

    #[test]
    fn test_string_length_counts_characters() {
        let config = ModelConfig {
            max_string_length: 4,
            ..ModelConfig::default()
        };
        // four characters, eight bytes
        assert!(check_string("äöüß", &config).is_ok());
        let err = check_string("äöüßx", &config).unwrap_err();
        assert_eq!(err, "string length 5 exceeds maximum 4");
    }

    #[test]
    fn test_code_checks() {
        assert!(check_code("final").is_ok());
        assert!(check_code("entered in error").is_ok());
        assert!(check_code(" final").is_err());
        assert!(check_code("two  spaces").is_err());
        assert!(check_code("tab\tcode").is_err());
    }

    #[test]
    fn test_id_uri_base64_xhtml_checks() {
        assert!(check_id("a.b-C9").is_ok());
        assert!(check_id(&"x".repeat(65)).is_err());
        assert!(check_uri("http://example.org/fhir").is_ok());
        assert!(check_uri("http://example.org/has space").is_err());
        assert!(check_base64("aGVsbG8=").is_ok());
        assert!(check_base64("aGVsbG8").is_err());
        assert!(check_xhtml(r#"<div xmlns="http://www.w3.org/1999/xhtml">ok</div>"#).is_ok());
        assert!(check_xhtml("<div>no namespace</div>").is_err());
        assert!(check_xhtml("<p xmlns=\"http://www.w3.org/1999/xhtml\">p</p>").is_err());
    }
}
