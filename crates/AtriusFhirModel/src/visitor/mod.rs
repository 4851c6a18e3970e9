//! # Traversal protocol
//!
//! Every model node implements [`Visitable`], which exposes its structural
//! children in declaration order. [`walk`] drives a [`Visitor`] over a tree
//! depth-first with the following strictly ordered events per node:
//!
//! 1. [`Visitor::pre_visit`] – returning `false` skips the node entirely,
//!    including its own start/end events.
//! 2. [`Visitor::visit_start`]
//! 3. [`Visitor::visit`] – returning `false` prunes the children but the
//!    closing events below still fire.
//! 4. every child, in declaration order (list elements carry their index)
//! 5. [`Visitor::visit_end`]
//! 6. [`Visitor::post_visit`]
//!
//! The walk keeps its own work-stack rather than recursing, so deeply nested
//! trees (a consent provision containing provisions containing provisions...)
//! cannot exhaust the native stack. Errors returned by a visitor abort the
//! walk and are handed back to the caller untouched.
//!
//! ```
//! use atrius_fhir_model::prelude::*;
//! use atrius_fhir_model::visitor::{CollectingVisitor, Visitable};
//!
//! let coding = Coding::builder().code(Code::from("login")).build().unwrap();
//! let mut codes = CollectingVisitor::<Code>::new();
//! coding.accept("type", None, &mut codes).unwrap();
//! assert_eq!(codes.result().len(), 1);
//! ```

mod collecting;
mod path;

pub use collecting::CollectingVisitor;
pub use path::PathVisitor;

use crate::precision::{PreciseDecimal, PrecisionDateTime};
use std::any::Any;
use std::fmt;

/// Broad category of a node, mirroring the FHIR type hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A primitive datatype (`string`, `boolean`, ...) carrying an optional value.
    Primitive,
    /// A complex datatype (`Coding`, `Reference`, ...).
    Element,
    /// A nested structural node of a resource (`Consent.provision`, ...).
    Backbone,
    /// A top-level addressable resource.
    Resource,
}

/// Static type information for concrete node types.
pub trait TypeInfo {
    /// FHIR name of the type (`"AuditEvent"`, `"base64Binary"`, ...).
    const TYPE_NAME: &'static str;
    const KIND: NodeKind;
}

/// Borrowed view of a primitive node's value, for codecs that need the
/// actual scalar without downcasting to every primitive type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimitiveValue<'a> {
    Boolean(bool),
    Integer(i64),
    Decimal(&'a PreciseDecimal),
    String(&'a str),
    /// `dateTime` and `instant` values.
    DateTime(&'a PrecisionDateTime),
}

/// One structural child of a node as seen by the traversal.
#[derive(Clone, Copy)]
pub struct Child<'a> {
    pub name: &'a str,
    /// Position within a repeating field; `None` for singular fields.
    pub index: Option<usize>,
    pub node: &'a dyn Visitable,
}

impl<'a> Child<'a> {
    pub fn new(name: &'a str, index: Option<usize>, node: &'a dyn Visitable) -> Self {
        Self { name, index, node }
    }
}

impl fmt::Debug for Child<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Child")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("type", &self.node.type_name())
            .finish()
    }
}

/// A node that can be walked by a [`Visitor`].
///
/// Implementations are normally derived with `#[derive(Visitable)]`.
pub trait Visitable: Any + fmt::Debug {
    /// FHIR name of the runtime type of this node.
    fn type_name(&self) -> &'static str;

    fn kind(&self) -> NodeKind;

    fn as_any(&self) -> &dyn Any;

    /// Appends the node's structural children to `out` in declaration order.
    fn children<'a>(&'a self, out: &mut Vec<Child<'a>>);

    /// True iff any field beyond the common id/extension fields carries a
    /// value. For primitives this is "has a value".
    fn has_structural_content(&self) -> bool;

    fn primitive_value(&self) -> Option<PrimitiveValue<'_>> {
        None
    }

    /// Walks this node and its subtree with `visitor`.
    fn accept<'t, V>(
        &'t self,
        name: &'t str,
        index: Option<usize>,
        visitor: &mut V,
    ) -> Result<(), V::Error>
    where
        Self: Sized,
        V: Visitor<'t> + ?Sized,
    {
        walk(Child::new(name, index, self), visitor)
    }
}

impl<'a> dyn Visitable + 'a {
    pub fn is<T: Visitable>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Visitable>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Convenience collection of [`Visitable::children`].
    pub fn child_nodes(&self) -> Vec<Child<'_>> {
        let mut out = Vec::new();
        self.children(&mut out);
        out
    }
}

impl<T: Visitable> Visitable for Box<T> {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn kind(&self) -> NodeKind {
        (**self).kind()
    }

    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn children<'a>(&'a self, out: &mut Vec<Child<'a>>) {
        (**self).children(out)
    }

    fn has_structural_content(&self) -> bool {
        (**self).has_structural_content()
    }

    fn primitive_value(&self) -> Option<PrimitiveValue<'_>> {
        (**self).primitive_value()
    }
}

/// Common fields embedded in a node (id, extensions, metadata ...) that
/// contribute children ahead of the node's own fields.
pub trait BaseFields {
    fn base_children<'a>(&'a self, out: &mut Vec<Child<'a>>);
}

/// Callbacks invoked by [`walk`]. Every method defaults to "continue".
///
/// The lifetime `'t` is the lifetime of the walked tree, which lets a visitor
/// keep references to the nodes it sees. Visitors that cannot fail use
/// [`std::convert::Infallible`] as their error.
pub trait Visitor<'t> {
    type Error;

    fn pre_visit(&mut self, _node: &'t dyn Visitable) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn visit_start(
        &mut self,
        _name: &'t str,
        _index: Option<usize>,
        _node: &'t dyn Visitable,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit(
        &mut self,
        _name: &'t str,
        _index: Option<usize>,
        _node: &'t dyn Visitable,
    ) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn visit_end(
        &mut self,
        _name: &'t str,
        _index: Option<usize>,
        _node: &'t dyn Visitable,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn post_visit(&mut self, _node: &'t dyn Visitable) -> Result<(), Self::Error> {
        Ok(())
    }
}

enum Frame<'t> {
    Enter(Child<'t>),
    Leave(Child<'t>),
}

/// Depth-first walk of `root` and its subtree.
pub fn walk<'t, V>(root: Child<'t>, visitor: &mut V) -> Result<(), V::Error>
where
    V: Visitor<'t> + ?Sized,
{
    let mut stack = vec![Frame::Enter(root)];
    let mut children = Vec::new();

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(child) => {
                if !visitor.pre_visit(child.node)? {
                    continue;
                }
                visitor.visit_start(child.name, child.index, child.node)?;
                stack.push(Frame::Leave(child));
                if visitor.visit(child.name, child.index, child.node)? {
                    child.node.children(&mut children);
                    // reversed so the first declared child is popped first
                    stack.extend(children.drain(..).rev().map(Frame::Enter));
                }
            }
            Frame::Leave(child) => {
                visitor.visit_end(child.name, child.index, child.node)?;
                visitor.post_visit(child.node)?;
            }
        }
    }
    Ok(())
}
