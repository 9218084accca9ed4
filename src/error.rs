use crate::ast::NodeKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, InjectionError>;

/// Why a marker occurrence was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("interface not supported")]
    Interface,

    #[error("missing or non-literal artefact type")]
    MissingArtefactType,
}

#[derive(Debug, Error)]
pub enum InjectionError {
    #[error("Internal error: expected an annotation and its target, got {found} node(s)")]
    NodeArity { found: usize },

    #[error("Internal error: wrong types: {annotation} / {target}")]
    ContractViolation { annotation: NodeKind, target: NodeKind },

    #[error("{message}")]
    Rejected {
        class: String,
        reason: Rejection,
        message: String,
    },

    #[error("Error occurred calling AST injector '{injector}' on [{class}] ({artefact_type}): {source}")]
    InjectorFailed {
        class: String,
        artefact_type: String,
        injector: String,
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("Duplicate injector registered: {name}")]
    DuplicateInjector { name: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl InjectionError {
    /// The host called the transform outside of its contract.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            InjectionError::NodeArity { .. } | InjectionError::ContractViolation { .. }
        )
    }

    /// The annotated source has to be fixed by its author.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, InjectionError::Rejected { .. })
    }

    pub fn is_injector_failure(&self) -> bool {
        matches!(self, InjectionError::InjectorFailed { .. })
    }

    /// Qualified name of the class this error belongs to, if any.
    pub fn class(&self) -> Option<&str> {
        match self {
            InjectionError::Rejected { class, .. } | InjectionError::InjectorFailed { class, .. } => {
                Some(class)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_reasons() {
        assert_eq!(Rejection::Interface.to_string(), "interface not supported");
        assert_eq!(
            Rejection::MissingArtefactType.to_string(),
            "missing or non-literal artefact type"
        );
    }

    #[test]
    fn test_error_classification() {
        let violation = InjectionError::ContractViolation {
            annotation: NodeKind::Class,
            target: NodeKind::Annotation,
        };
        assert!(violation.is_contract_violation());
        assert!(!violation.is_usage_error());
        assert_eq!(
            violation.to_string(),
            "Internal error: wrong types: Class / Annotation"
        );

        let failed = InjectionError::InjectorFailed {
            class: "app.Foo".to_string(),
            artefact_type: "Service".to_string(),
            injector: "broken".to_string(),
            index: 1,
            source: anyhow::anyhow!("boom"),
        };
        assert!(failed.is_injector_failure());
        assert_eq!(failed.class(), Some("app.Foo"));
        assert!(failed.to_string().ends_with(": boom"));
    }
}
