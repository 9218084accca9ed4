use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// A non-empty artefact type name such as `Controller` or `Service`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ArtefactType(String);

impl ArtefactType {
    /// Returns `None` for an empty name.
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() { None } else { Some(Self(name)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtefactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArtefactType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Which artefact types an injector applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    /// Applies to every artefact type.
    Universal,
    /// Applies only to the listed types. Matching is exact and case-sensitive.
    Scoped(BTreeSet<String>),
}

impl Capability {
    pub fn scoped<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Capability::Scoped(types.into_iter().map(Into::into).collect())
    }

    pub fn supports(&self, artefact_type: &ArtefactType) -> bool {
        match self {
            Capability::Universal => true,
            Capability::Scoped(types) => types.contains(artefact_type.as_str()),
        }
    }

    pub fn is_universal(&self) -> bool {
        matches!(self, Capability::Universal)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Universal => f.write_str("*"),
            Capability::Scoped(types) => {
                let names: Vec<&str> = types.iter().map(String::as_str).collect();
                write!(f, "{{{}}}", names.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(name: &str) -> ArtefactType {
        ArtefactType::new(name).unwrap()
    }

    #[test]
    fn test_empty_artefact_type_rejected() {
        assert!(ArtefactType::new("").is_none());
        assert_eq!(ty("Controller").as_str(), "Controller");
    }

    #[test]
    fn test_universal_supports_everything() {
        assert!(Capability::Universal.supports(&ty("Controller")));
        assert!(Capability::Universal.supports(&ty("Anything")));
    }

    #[test]
    fn test_scoped_is_exact_and_case_sensitive() {
        let capability = Capability::scoped(["Service", "Controller"]);
        assert!(capability.supports(&ty("Service")));
        assert!(!capability.supports(&ty("service")));
        assert!(!capability.supports(&ty("Serv")));
        assert!(!capability.supports(&ty("Service*")));
        assert_eq!(capability.to_string(), "{Controller, Service}");
    }
}
