use crate::ast::Host;
use crate::registry::{ArtefactType, InjectorDescriptor};

/// Injectors selected for one artefact type, in registry order.
pub type MatchResult<'r, H> = Vec<&'r InjectorDescriptor<H>>;

/// Select the descriptors that are universal or list `artefact_type`.
///
/// Registry order is kept as-is.
pub fn find_matches<'r, H: Host>(
    artefact_type: &ArtefactType,
    registry: &'r [InjectorDescriptor<H>],
) -> MatchResult<'r, H> {
    registry
        .iter()
        .filter(|descriptor| descriptor.supports(artefact_type))
        .collect()
}
