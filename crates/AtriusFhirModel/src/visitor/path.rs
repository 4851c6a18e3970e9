use std::convert::Infallible;

use super::{Visitable, Visitor};

/// Records the instance path of every visited node, e.g.
/// `Consent.provision.actor[1].reference`.
///
/// Paths are built from the element names handed to the walk, so the root
/// name given to `accept` becomes the first segment.
#[derive(Debug, Default)]
pub struct PathVisitor {
    segments: Vec<String>,
    paths: Vec<(String, &'static str)>,
}

impl PathVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(path, type name)` pairs in traversal order.
    pub fn paths(&self) -> &[(String, &'static str)] {
        &self.paths
    }

    pub fn into_paths(self) -> Vec<(String, &'static str)> {
        self.paths
    }

    /// Paths of all visited nodes whose FHIR type is `type_name`.
    pub fn paths_of_type<'s>(&'s self, type_name: &'s str) -> impl Iterator<Item = &'s str> + 's {
        self.paths
            .iter()
            .filter(move |(_, t)| *t == type_name)
            .map(|(p, _)| p.as_str())
    }
}

impl<'t> Visitor<'t> for PathVisitor {
    type Error = Infallible;

    fn visit_start(
        &mut self,
        name: &'t str,
        index: Option<usize>,
        node: &'t dyn Visitable,
    ) -> Result<(), Self::Error> {
        let segment = match index {
            Some(i) => format!("{}[{}]", name, i),
            None => name.to_string(),
        };
        self.segments.push(segment);
        self.paths.push((self.segments.join("."), node.type_name()));
        Ok(())
    }

    fn visit_end(
        &mut self,
        _name: &'t str,
        _index: Option<usize>,
        _node: &'t dyn Visitable,
    ) -> Result<(), Self::Error> {
        self.segments.pop();
        Ok(())
    }
}
