use super::matcher::MatchResult;
use crate::ast::{ClassNode, CompilationUnit, Host};
use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::error::{InjectionError, Result};
use crate::registry::ArtefactType;
use chrono::Utc;
use uuid::Uuid;

/// Runs matched injectors against a class, stopping at the first failure.
///
/// Work done by injectors that ran before a failure stays in place; the
/// returned error is expected to abort compilation of the class.
pub struct InjectionExecutor<'s> {
    sink: &'s dyn DiagnosticSink,
    run_id: Uuid,
}

impl<'s> InjectionExecutor<'s> {
    pub fn new(sink: &'s dyn DiagnosticSink, run_id: Uuid) -> Self {
        Self { sink, run_id }
    }

    /// Returns the number of injectors applied.
    pub fn apply<H: Host>(
        &self,
        unit: &mut H::Unit,
        class: &mut H::Class,
        artefact_type: &ArtefactType,
        matches: &MatchResult<'_, H>,
    ) -> Result<usize> {
        for (index, descriptor) in matches.iter().enumerate() {
            tracing::debug!(
                "Applying injector {} to {} ({})",
                descriptor.name(),
                class.name(),
                artefact_type
            );
            if let Err(cause) = descriptor.inject(unit, class) {
                self.sink.emit(&Diagnostic {
                    run_id: self.run_id,
                    timestamp: Utc::now(),
                    unit: unit.name().to_string(),
                    class: class.name().to_string(),
                    artefact_type: artefact_type.clone(),
                    injector: descriptor.name().to_string(),
                    index,
                    message: format!("Error occurred calling AST injector: {}", cause),
                    cause: format!("{:#}", cause),
                });
                return Err(InjectionError::InjectorFailed {
                    class: class.name().to_string(),
                    artefact_type: artefact_type.to_string(),
                    injector: descriptor.name().to_string(),
                    index,
                    source: cause,
                });
            }
        }
        Ok(matches.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::MemorySink;
    use crate::registry::InjectorRegistry;
    use crate::test_support::{Failing, Recorder, TestClass, TestHost, TestUnit};
    use crate::transform::matcher::find_matches;

    #[test]
    fn test_runs_in_order() {
        let registry = InjectorRegistry::<TestHost>::builder()
            .universal("i1", Recorder("i1"))
            .universal("i2", Recorder("i2"))
            .build()
            .unwrap();
        let sink = MemorySink::new();
        let artefact_type = ArtefactType::new("Service").unwrap();
        let matches = find_matches(&artefact_type, registry.descriptors());
        let mut unit = TestUnit::new("Foo.groovy");
        let mut class = TestClass::new("app.Foo");

        let applied = InjectionExecutor::new(&sink, Uuid::new_v4())
            .apply::<TestHost>(&mut unit, &mut class, &artefact_type, &matches)
            .unwrap();

        assert_eq!(applied, 2);
        assert_eq!(class.injected, vec!["i1", "i2"]);
        assert_eq!(unit.touched, 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_stops_at_first_failure() {
        let registry = InjectorRegistry::<TestHost>::builder()
            .universal("i1", Recorder("i1"))
            .universal("i2", Failing("cannot add action"))
            .universal("i3", Recorder("i3"))
            .build()
            .unwrap();
        let sink = MemorySink::new();
        let run_id = Uuid::new_v4();
        let artefact_type = ArtefactType::new("Controller").unwrap();
        let matches = find_matches(&artefact_type, registry.descriptors());
        let mut unit = TestUnit::new("FooController.groovy");
        let mut class = TestClass::new("app.FooController");

        let err = InjectionExecutor::new(&sink, run_id)
            .apply::<TestHost>(&mut unit, &mut class, &artefact_type, &matches)
            .unwrap_err();

        // i1 is not rolled back, i3 never runs
        assert_eq!(class.injected, vec!["i1"]);
        match err {
            InjectionError::InjectorFailed {
                injector,
                index,
                source,
                ..
            } => {
                assert_eq!(injector, "i2");
                assert_eq!(index, 1);
                assert_eq!(source.to_string(), "cannot add action");
            }
            other => panic!("unexpected error: {other}"),
        }

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].run_id, run_id);
        assert_eq!(records[0].unit, "FooController.groovy");
        assert_eq!(
            records[0].message,
            "Error occurred calling AST injector: cannot add action"
        );
    }

    #[test]
    fn test_no_matches_completes_without_effect() {
        let sink = MemorySink::new();
        let artefact_type = ArtefactType::new("Admin").unwrap();
        let matches: MatchResult<'_, TestHost> = Vec::new();
        let mut unit = TestUnit::new("Admin.groovy");
        let mut class = TestClass::new("app.Admin");

        let applied = InjectionExecutor::new(&sink, Uuid::nil())
            .apply::<TestHost>(&mut unit, &mut class, &artefact_type, &matches)
            .unwrap();

        assert_eq!(applied, 0);
        assert!(class.injected.is_empty());
        assert_eq!(unit.touched, 0);
        assert!(sink.is_empty());
    }
}
