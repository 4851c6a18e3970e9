use std::convert::Infallible;

use super::{Visitable, Visitor};

/// Collects every node of concrete type `T` reachable from the walked root,
/// in traversal order.
///
/// ```
/// use atrius_fhir_model::prelude::*;
/// use atrius_fhir_model::visitor::{CollectingVisitor, Visitable};
///
/// let concept = CodeableConcept::builder()
///     .coding(Coding::builder().code(Code::from("a")).build().unwrap())
///     .coding(Coding::builder().code(Code::from("b")).build().unwrap())
///     .build()
///     .unwrap();
/// let mut visitor = CollectingVisitor::<Coding>::new();
/// concept.accept("category", None, &mut visitor).unwrap();
/// assert_eq!(visitor.result().len(), 2);
/// ```
#[derive(Debug)]
pub struct CollectingVisitor<'a, T> {
    found: Vec<&'a T>,
}

impl<'a, T: Visitable> CollectingVisitor<'a, T> {
    pub fn new() -> Self {
        Self {
            found: Vec::new(),
        }
    }

    pub fn result(&self) -> &[&'a T] {
        &self.found
    }

    pub fn into_result(self) -> Vec<&'a T> {
        self.found
    }
}

impl<T: Visitable> Default for CollectingVisitor<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Visitable> Visitor<'a> for CollectingVisitor<'a, T> {
    type Error = Infallible;

    fn visit_start(
        &mut self,
        _name: &'a str,
        _index: Option<usize>,
        node: &'a dyn Visitable,
    ) -> Result<(), Self::Error> {
        if let Some(found) = node.downcast_ref::<T>() {
            self.found.push(found);
        }
        Ok(())
    }
}
