//! Artefact type transform
//!
//! The host calls [`ArtefactTypeTransform::visit`] once for every occurrence
//! of the marker annotation. Each occurrence moves through
//!
//! ```text
//! validate ──► Ignored
//!    │    └──► Rejected            (usage error)
//!    ▼
//! find_matches ──► apply ──► Completed
//!                      └──► Failed  (injector error, logged then returned)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let registry = Arc::new(
//!     InjectorRegistry::builder()
//!         .universal("logging", LoggingInjector)
//!         .scoped("controller", ["Controller"], ControllerInjector)
//!         .build()?,
//! );
//! let transform = ArtefactTypeTransform::new(registry);
//!
//! let mut nodes = [AstNode::Annotation(&annotation), AstNode::Class(&mut class)];
//! transform.visit(&mut nodes, &mut unit)?;
//! ```

mod executor;
mod matcher;
mod validator;

pub use executor::InjectionExecutor;
pub use matcher::{find_matches, MatchResult};
pub use validator::{AnnotationSiteValidator, Validation};

use crate::ast::{AstNode, ClassNode, Host};
use crate::config::TransformConfig;
use crate::diagnostic::{DiagnosticSink, TracingSink};
use crate::error::{InjectionError, Rejection, Result};
use crate::registry::{ArtefactType, InjectorRegistry};
use std::sync::Arc;
use strum_macros::Display;
use uuid::Uuid;

/// Terminal state of one marker occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SiteOutcome {
    Ignored,
    Completed { applied: usize },
    Rejected,
    Failed,
    /// Never processed because the build was aborted first.
    Skipped,
}

impl SiteOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, SiteOutcome::Rejected | SiteOutcome::Failed)
    }
}

pub struct ArtefactTypeTransform<H: Host> {
    registry: Arc<InjectorRegistry<H>>,
    config: TransformConfig,
    sink: Arc<dyn DiagnosticSink>,
    run_id: Uuid,
}

impl<H: Host> ArtefactTypeTransform<H> {
    /// Default configuration, diagnostics go to `tracing`.
    pub fn new(registry: Arc<InjectorRegistry<H>>) -> Self {
        Self {
            registry,
            config: TransformConfig::default(),
            sink: Arc::new(TracingSink),
            run_id: Uuid::new_v4(),
        }
    }

    pub fn with_config(mut self, config: TransformConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn registry(&self) -> &InjectorRegistry<H> {
        &self.registry
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Identifies this compilation run in diagnostics.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Process one marker occurrence: `nodes` must be exactly the annotation
    /// followed by the declaration it is attached to.
    ///
    /// # Errors
    /// - contract violation if `nodes` does not have that shape
    /// - [`InjectionError::Rejected`] for interfaces and missing or
    ///   non-literal artefact types
    /// - [`InjectionError::InjectorFailed`] if a matched injector fails
    pub fn visit(&self, nodes: &mut [AstNode<'_, H>], unit: &mut H::Unit) -> Result<SiteOutcome> {
        let found = nodes.len();
        let [annotation, target] = nodes else {
            return Err(InjectionError::NodeArity { found });
        };

        let validator = AnnotationSiteValidator::new(&self.config.marker, &self.config.value_member);
        match validator.validate(annotation, target)? {
            Validation::Ignored => Ok(SiteOutcome::Ignored),
            Validation::Rejected { class, reason } => {
                let message = self.rejection_message(&class, reason);
                Err(InjectionError::Rejected {
                    class,
                    reason,
                    message,
                })
            }
            Validation::Accepted {
                class,
                artefact_type,
            } => {
                let applied = self.perform_injection(unit, class, &artefact_type)?;
                Ok(SiteOutcome::Completed { applied })
            }
        }
    }

    /// Run every injector matching `artefact_type` against `class`, skipping
    /// validation.
    pub fn perform_injection(
        &self,
        unit: &mut H::Unit,
        class: &mut H::Class,
        artefact_type: &ArtefactType,
    ) -> Result<usize> {
        let matches = find_matches(artefact_type, self.registry.descriptors());
        tracing::debug!(
            "{} injector(s) matched {} for {}",
            matches.len(),
            artefact_type,
            class.name()
        );
        InjectionExecutor::new(self.sink.as_ref(), self.run_id).apply(
            unit,
            class,
            artefact_type,
            &matches,
        )
    }

    fn rejection_message(&self, class: &str, reason: Rejection) -> String {
        match reason {
            Rejection::Interface => format!(
                "Error processing interface '{}'. @{} not allowed for interfaces.",
                class, self.config.marker
            ),
            Rejection::MissingArtefactType => format!(
                "Class [{}] contains an invalid @{} annotation. No artefact found for value specified.",
                class, self.config.marker
            ),
        }
    }
}
