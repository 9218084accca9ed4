//! Host-facing node model
//!
//! The transform never looks inside a concrete syntax tree. A host compiler
//! implements [`Host`] and hands each marker occurrence over as a pair of
//! [`AstNode`] values: the annotation and the declaration it is attached to.
//!
//! ```rust,ignore
//! struct MyHost;
//!
//! impl Host for MyHost {
//!     type Annotation = MyAnnotation;
//!     type Class = MyClass;
//!     type Unit = MySourceFile;
//! }
//!
//! let mut nodes = [AstNode::Annotation(&annotation), AstNode::Class(&mut class)];
//! transform.visit(&mut nodes, &mut source_file)?;
//! ```

use std::fmt;
use strum_macros::Display;

/// Bundles the node types a host compiler exposes to the transform.
pub trait Host: Sized + 'static {
    /// One occurrence of an annotation in source.
    type Annotation: AnnotationNode;
    /// A class (or interface) declaration that injectors may mutate in place.
    type Class: ClassNode;
    /// The compilation unit (source file) being compiled.
    type Unit: CompilationUnit;
}

/// An annotation occurrence.
pub trait AnnotationNode {
    /// Simple type name of the annotation, e.g. `Artefact`.
    fn type_name(&self) -> &str;

    /// Value of a named member, `None` when the member was not supplied.
    fn member(&self, name: &str) -> Option<MemberValue>;
}

/// Handle to a class declaration.
pub trait ClassNode {
    /// Qualified name of the declared type.
    fn name(&self) -> &str;

    fn is_interface(&self) -> bool;
}

pub trait CompilationUnit {
    fn name(&self) -> &str;
}

/// The value supplied for an annotation member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValue {
    /// A compile-time string literal.
    Literal(String),
    /// Any other expression, kept as source text.
    Expression(String),
}

impl MemberValue {
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            MemberValue::Literal(value) => Some(value),
            MemberValue::Expression(_) => None,
        }
    }
}

/// Annotated declarations other than classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DeclarationKind {
    Method,
    Field,
    Property,
    Constructor,
    Parameter,
    Package,
    /// Type declarations that are not classes: enums, unions, aliases.
    Type,
    Other,
}

/// Kind of a node as reported in contract violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Annotation,
    Class,
    Interface,
    Declaration(DeclarationKind),
    Expression,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Annotation => f.write_str("Annotation"),
            NodeKind::Class => f.write_str("Class"),
            NodeKind::Interface => f.write_str("Interface"),
            NodeKind::Declaration(kind) => write!(f, "{}", kind),
            NodeKind::Expression => f.write_str("Expression"),
        }
    }
}

/// A node handed over by the host for one marker occurrence.
pub enum AstNode<'a, H: Host> {
    Annotation(&'a H::Annotation),
    Class(&'a mut H::Class),
    /// An annotated declaration that is not a class.
    Declaration(DeclarationKind),
    /// Anything that cannot carry annotations at all.
    Expression,
}

impl<H: Host> AstNode<'_, H> {
    pub fn kind(&self) -> NodeKind {
        match self {
            AstNode::Annotation(_) => NodeKind::Annotation,
            AstNode::Class(class) if class.is_interface() => NodeKind::Interface,
            AstNode::Class(_) => NodeKind::Class,
            AstNode::Declaration(kind) => NodeKind::Declaration(*kind),
            AstNode::Expression => NodeKind::Expression,
        }
    }

    /// Whether the node is a declaration that can carry annotations.
    pub fn is_annotated(&self) -> bool {
        matches!(self, AstNode::Class(_) | AstNode::Declaration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{TestAnnotation, TestClass, TestHost};

    #[test]
    fn test_node_kinds() {
        let annotation = TestAnnotation::artefact("Service");
        let mut class = TestClass::new("app.Foo");
        let mut interface = TestClass::interface("app.Bar");

        assert_eq!(
            AstNode::<TestHost>::Annotation(&annotation).kind(),
            NodeKind::Annotation
        );
        assert_eq!(AstNode::<TestHost>::Class(&mut class).kind(), NodeKind::Class);
        assert_eq!(
            AstNode::<TestHost>::Class(&mut interface).kind(),
            NodeKind::Interface
        );
        assert_eq!(
            AstNode::<TestHost>::Declaration(DeclarationKind::Method)
                .kind()
                .to_string(),
            "Method"
        );
        assert!(!AstNode::<TestHost>::Expression.is_annotated());
    }

    #[test]
    fn test_member_value_literal() {
        assert_eq!(
            MemberValue::Literal("Controller".into()).as_literal(),
            Some("Controller")
        );
        assert_eq!(MemberValue::Expression("TYPE".into()).as_literal(), None);
    }
}
