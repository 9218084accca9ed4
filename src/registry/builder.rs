use super::{Capability, ClassInjector, InjectorDescriptor, InjectorRegistry};
use crate::ast::Host;
use crate::error::{InjectionError, Result};
use std::collections::HashSet;

/// Builder for an [`InjectorRegistry`]
///
/// Descriptors keep the order in which they were added; that order is the
/// order injectors run in.
///
/// # Example
/// ```rust,ignore
/// let registry = InjectorRegistryBuilder::new()
///     .universal("logging", LoggingInjector)
///     .scoped("controller", ["Controller"], ControllerInjector)
///     .build()?;
/// ```
pub struct InjectorRegistryBuilder<H: Host> {
    descriptors: Vec<InjectorDescriptor<H>>,
}

impl<H: Host> InjectorRegistryBuilder<H> {
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    /// Register an injector that applies to every artefact type
    pub fn universal<I>(self, name: impl Into<String>, injector: I) -> Self
    where
        I: ClassInjector<H> + 'static,
    {
        self.descriptor(InjectorDescriptor::new(name, Capability::Universal, injector))
    }

    /// Register an injector for an explicit set of artefact types
    pub fn scoped<T, S, I>(self, name: impl Into<String>, types: T, injector: I) -> Self
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
        I: ClassInjector<H> + 'static,
    {
        self.descriptor(InjectorDescriptor::new(
            name,
            Capability::scoped(types),
            injector,
        ))
    }

    /// Register a prepared descriptor
    pub fn descriptor(mut self, descriptor: InjectorDescriptor<H>) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Build the registry
    ///
    /// # Errors
    /// Returns [`InjectionError::DuplicateInjector`] if two descriptors share a name.
    pub fn build(self) -> Result<InjectorRegistry<H>> {
        let mut seen = HashSet::new();
        for descriptor in &self.descriptors {
            if !seen.insert(descriptor.name()) {
                return Err(InjectionError::DuplicateInjector {
                    name: descriptor.name().to_string(),
                });
            }
        }
        tracing::debug!("Injector registry built ({} injectors)", self.descriptors.len());
        Ok(InjectorRegistry::from_descriptors(self.descriptors))
    }
}

impl<H: Host> Default for InjectorRegistryBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}
