//! # Artefactor
//!
//! Location-independent artefacts for framework code.
//!
//! A class becomes a framework artefact (a controller, a service, ...) by
//! carrying a single marker annotation that names the artefact type, instead
//! of living in a particular directory or following a naming convention.
//! While the class is compiled, the marker is dispatched to every registered
//! injector that supports the named type, and those injectors add the
//! behaviour the framework expects.
//!
//! ## Features
//!
//! - **Capability-based dispatch**: injectors advertise either a set of
//!   artefact types or that they apply to all of them
//! - **Host agnostic**: the host compiler plugs in through the [`ast::Host`] trait
//! - **Fail-fast injection**: the first failing injector stops the class and
//!   is reported through a [`DiagnosticSink`]
//! - **Batch compilation**: independent units run in parallel against one
//!   shared, read-only registry
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use artefactor::prelude::*;
//!
//! // 1. Register injectors once per compilation run
//! let registry = InjectorRegistry::<MyHost>::builder()
//!     .universal("logging", LoggingInjector)
//!     .scoped("controller", ["Controller"], ControllerInjector)
//!     .build()?;
//!
//! // 2. Create the transform
//! let transform = ArtefactTypeTransform::new(Arc::new(registry))
//!     .with_config(TransformConfig::from_env()?);
//!
//! // 3. Hand every marker occurrence to it
//! let mut nodes = [AstNode::Annotation(&annotation), AstNode::Class(&mut class)];
//! match transform.visit(&mut nodes, &mut unit)? {
//!     SiteOutcome::Completed { applied } => tracing::debug!("{} injectors applied", applied),
//!     _ => {}
//! }
//! ```

pub mod ast;
pub mod compilation;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod registry;
pub mod transform;

#[cfg(test)]
mod test_support;

// Re-export core types
pub use ast::{AnnotationNode, AstNode, ClassNode, CompilationUnit, Host, MemberValue};
pub use compilation::{Compilation, CompilationReport, UnitJob};
pub use config::{ConfigService, FailureScope, TransformConfig};
pub use diagnostic::{Diagnostic, DiagnosticSink, MemorySink, TracingSink};
pub use error::{InjectionError, Rejection, Result};
pub use registry::{
    ArtefactType, Capability, ClassInjector, InjectorDescriptor, InjectorRegistry,
    InjectorRegistryBuilder,
};
pub use transform::{ArtefactTypeTransform, SiteOutcome};

/// Prelude module for convenient imports
///
/// ```
/// use artefactor::prelude::*;
/// ```
pub mod prelude {
    pub use crate::ast::{
        AnnotationNode, AstNode, ClassNode, CompilationUnit, DeclarationKind, Host, MemberValue,
        NodeKind,
    };
    pub use crate::compilation::{Compilation, CompilationReport, Site, SiteReport, Target, UnitJob};
    pub use crate::config::{ConfigService, FailureScope, TransformConfig};
    pub use crate::diagnostic::{Diagnostic, DiagnosticSink, MemorySink, TracingSink};
    pub use crate::error::{InjectionError, Rejection, Result};
    pub use crate::registry::{
        ArtefactType, Capability, ClassInjector, InjectorDescriptor, InjectorRegistry,
        InjectorRegistryBuilder,
    };
    pub use crate::transform::{ArtefactTypeTransform, SiteOutcome, find_matches};
    pub use std::sync::Arc;
}
