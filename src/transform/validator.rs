use crate::ast::{AnnotationNode, AstNode, ClassNode, Host};
use crate::error::{InjectionError, Rejection, Result};
use crate::registry::ArtefactType;

/// Result of inspecting one marker occurrence.
pub enum Validation<'t, H: Host> {
    /// A class carrying a literal artefact type.
    Accepted {
        class: &'t mut H::Class,
        artefact_type: ArtefactType,
    },
    /// Not a marker occurrence on a class; nothing to do.
    Ignored,
    Rejected { class: String, reason: Rejection },
}

/// Checks an annotation/target pair and extracts the declared artefact type.
pub struct AnnotationSiteValidator<'c> {
    marker: &'c str,
    value_member: &'c str,
}

impl<'c> AnnotationSiteValidator<'c> {
    pub fn new(marker: &'c str, value_member: &'c str) -> Self {
        Self {
            marker,
            value_member,
        }
    }

    /// # Errors
    /// Returns a contract violation when `annotation` is not an annotation
    /// or `target` is not an annotated declaration.
    pub fn validate<'t, H: Host>(
        &self,
        annotation: &AstNode<'_, H>,
        target: &'t mut AstNode<'_, H>,
    ) -> Result<Validation<'t, H>> {
        let (annotation_kind, target_kind) = (annotation.kind(), target.kind());
        let annotation = match annotation {
            AstNode::Annotation(annotation) if target.is_annotated() => *annotation,
            _ => {
                return Err(InjectionError::ContractViolation {
                    annotation: annotation_kind,
                    target: target_kind,
                });
            }
        };

        if annotation.type_name() != self.marker {
            return Ok(Validation::Ignored);
        }
        let class = match target {
            AstNode::Class(class) => &mut **class,
            _ => return Ok(Validation::Ignored),
        };

        if class.is_interface() {
            return Ok(Validation::Rejected {
                class: class.name().to_string(),
                reason: Rejection::Interface,
            });
        }

        let artefact_type = annotation
            .member(self.value_member)
            .and_then(|value| value.as_literal().and_then(ArtefactType::new));
        match artefact_type {
            Some(artefact_type) => Ok(Validation::Accepted {
                class,
                artefact_type,
            }),
            None => Ok(Validation::Rejected {
                class: class.name().to_string(),
                reason: Rejection::MissingArtefactType,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{DeclarationKind, MemberValue};
    use crate::test_support::{TestAnnotation, TestClass, TestHost};

    fn validator() -> AnnotationSiteValidator<'static> {
        AnnotationSiteValidator::new("Artefact", "value")
    }

    #[derive(Debug, PartialEq)]
    enum Seen {
        Accepted(String),
        Ignored,
        Rejected(String, Rejection),
    }

    fn check(annotation: &TestAnnotation, class: &mut TestClass) -> Seen {
        let mut target = AstNode::<TestHost>::Class(class);
        match validator()
            .validate(&AstNode::Annotation(annotation), &mut target)
            .unwrap()
        {
            Validation::Accepted { artefact_type, .. } => Seen::Accepted(artefact_type.to_string()),
            Validation::Ignored => Seen::Ignored,
            Validation::Rejected { class, reason } => Seen::Rejected(class, reason),
        }
    }

    #[test]
    fn test_accepts_literal_on_class() {
        let annotation = TestAnnotation::artefact("Controller");
        let mut class = TestClass::new("app.FooController");
        let mut target = AstNode::<TestHost>::Class(&mut class);

        let result = validator()
            .validate(&AstNode::Annotation(&annotation), &mut target)
            .unwrap();
        match result {
            Validation::Accepted {
                class,
                artefact_type,
            } => {
                assert_eq!(class.name, "app.FooController");
                assert_eq!(artefact_type.as_str(), "Controller");
            }
            _ => panic!("expected the site to be accepted"),
        }
    }

    #[test]
    fn test_interface_rejected_regardless_of_value() {
        for annotation in [
            TestAnnotation::artefact("Controller"),
            TestAnnotation::new("Artefact"),
            TestAnnotation::new("Artefact")
                .with_member("value", MemberValue::Expression("TYPE".into())),
        ] {
            let mut interface = TestClass::interface("app.Foo");
            assert_eq!(
                check(&annotation, &mut interface),
                Seen::Rejected("app.Foo".into(), Rejection::Interface)
            );
        }
    }

    #[test]
    fn test_value_member_literal_accepted() {
        let mut class = TestClass::new("app.Baz");
        assert_eq!(
            check(&TestAnnotation::artefact("Service"), &mut class),
            Seen::Accepted("Service".into())
        );
    }

    #[test]
    fn test_missing_value_rejected() {
        let mut class = TestClass::new("app.Bar");
        assert_eq!(
            check(&TestAnnotation::new("Artefact"), &mut class),
            Seen::Rejected("app.Bar".into(), Rejection::MissingArtefactType)
        );
    }

    #[test]
    fn test_non_literal_or_empty_value_rejected() {
        let non_literal = TestAnnotation::new("Artefact")
            .with_member("value", MemberValue::Expression("Types.CONTROLLER".into()));
        let empty = TestAnnotation::artefact("");

        for annotation in [non_literal, empty] {
            let mut class = TestClass::new("app.Bar");
            assert_eq!(
                check(&annotation, &mut class),
                Seen::Rejected("app.Bar".into(), Rejection::MissingArtefactType)
            );
        }
    }

    #[test]
    fn test_other_annotation_ignored() {
        let mut class = TestClass::new("app.Foo");
        assert_eq!(check(&TestAnnotation::new("Deprecated"), &mut class), Seen::Ignored);
    }

    #[test]
    fn test_non_class_declaration_ignored() {
        let annotation = TestAnnotation::artefact("Service");
        let mut target = AstNode::<TestHost>::Declaration(DeclarationKind::Method);
        let result = validator()
            .validate(&AstNode::Annotation(&annotation), &mut target)
            .unwrap();
        assert!(matches!(result, Validation::Ignored));
    }

    #[test]
    fn test_wrong_node_types_violate_contract() {
        let annotation = TestAnnotation::artefact("Service");
        let mut class = TestClass::new("app.Foo");

        let mut expression = AstNode::<TestHost>::Expression;
        let err = validator()
            .validate(&AstNode::Annotation(&annotation), &mut expression)
            .err()
            .unwrap();
        assert!(err.is_contract_violation());

        let mut target = AstNode::<TestHost>::Annotation(&annotation);
        let err = validator()
            .validate(&AstNode::<TestHost>::Class(&mut class), &mut target)
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Internal error: wrong types: Class / Annotation");
    }
}
