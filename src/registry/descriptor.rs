use super::capability::{ArtefactType, Capability};
use crate::ast::Host;
use std::fmt;
use std::sync::Arc;

/// A pluggable unit that adds framework behaviour to a class.
///
/// Injectors mutate the class in place. They should be additive: the
/// transform does not undo the work of earlier injectors when a later one
/// fails.
///
/// # Example
///
/// ```rust,ignore
/// struct LoggerInjector;
///
/// impl ClassInjector<MyHost> for LoggerInjector {
///     fn inject(&self, _unit: &mut MySourceFile, class: &mut MyClass) -> anyhow::Result<()> {
///         class.add_field("log", "Logger");
///         Ok(())
///     }
/// }
/// ```
pub trait ClassInjector<H: Host>: Send + Sync {
    fn inject(&self, unit: &mut H::Unit, class: &mut H::Class) -> anyhow::Result<()>;
}

impl<H, F> ClassInjector<H> for F
where
    H: Host,
    F: Fn(&mut H::Unit, &mut H::Class) -> anyhow::Result<()> + Send + Sync,
{
    fn inject(&self, unit: &mut H::Unit, class: &mut H::Class) -> anyhow::Result<()> {
        self(unit, class)
    }
}

/// One registered injector together with its capability.
pub struct InjectorDescriptor<H: Host> {
    name: String,
    capability: Capability,
    injector: Arc<dyn ClassInjector<H>>,
}

impl<H: Host> InjectorDescriptor<H> {
    pub fn new<I>(name: impl Into<String>, capability: Capability, injector: I) -> Self
    where
        I: ClassInjector<H> + 'static,
    {
        Self {
            name: name.into(),
            capability,
            injector: Arc::new(injector),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    pub fn supports(&self, artefact_type: &ArtefactType) -> bool {
        self.capability.supports(artefact_type)
    }

    pub fn inject(&self, unit: &mut H::Unit, class: &mut H::Class) -> anyhow::Result<()> {
        self.injector.inject(unit, class)
    }
}

impl<H: Host> Clone for InjectorDescriptor<H> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            capability: self.capability.clone(),
            injector: Arc::clone(&self.injector),
        }
    }
}

impl<H: Host> fmt::Debug for InjectorDescriptor<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectorDescriptor")
            .field("name", &self.name)
            .field("capability", &self.capability)
            .finish_non_exhaustive()
    }
}
