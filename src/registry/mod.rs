//! Injector registry
//!
//! The registry is assembled once, before any class is compiled, and is
//! read-only from then on. Share it as `Arc<InjectorRegistry<H>>`.

mod builder;
mod capability;
mod descriptor;

pub use builder::InjectorRegistryBuilder;
pub use capability::{ArtefactType, Capability};
pub use descriptor::{ClassInjector, InjectorDescriptor};

use crate::ast::Host;
use std::collections::BTreeSet;

/// Ordered, immutable set of injector descriptors for one compilation run.
pub struct InjectorRegistry<H: Host> {
    descriptors: Vec<InjectorDescriptor<H>>,
}

impl<H: Host> InjectorRegistry<H> {
    pub fn builder() -> InjectorRegistryBuilder<H> {
        InjectorRegistryBuilder::new()
    }

    /// A registry without injectors. Every marked class completes untouched.
    pub fn empty() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    pub(crate) fn from_descriptors(descriptors: Vec<InjectorDescriptor<H>>) -> Self {
        Self { descriptors }
    }

    pub fn descriptors(&self) -> &[InjectorDescriptor<H>] {
        &self.descriptors
    }

    pub fn iter(&self) -> impl Iterator<Item = &InjectorDescriptor<H>> {
        self.descriptors.iter()
    }

    pub fn get(&self, name: &str) -> Option<&InjectorDescriptor<H>> {
        self.descriptors.iter().find(|d| d.name() == name)
    }

    /// Every artefact type named by a scoped injector, sorted.
    pub fn supported_types(&self) -> BTreeSet<&str> {
        self.descriptors
            .iter()
            .filter_map(|d| match d.capability() {
                Capability::Scoped(types) => Some(types.iter().map(String::as_str)),
                Capability::Universal => None,
            })
            .flatten()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl<H: Host> Default for InjectorRegistry<H> {
    fn default() -> Self {
        Self::empty()
    }
}
