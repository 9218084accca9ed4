use crate::error::{InjectionError, Result};
use dashmap::DashMap;
use serde::Deserialize;
use std::env;
use std::ffi::OsString;
use std::sync::Arc;
use strum_macros::{Display, EnumString};

pub const MARKER_KEY: &str = "ARTEFACTOR_MARKER";
pub const VALUE_MEMBER_KEY: &str = "ARTEFACTOR_VALUE_MEMBER";
pub const FAILURE_SCOPE_KEY: &str = "ARTEFACTOR_FAILURE_SCOPE";
pub const THREADS_KEY: &str = "ARTEFACTOR_THREADS";

/// Configuration service
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Seeded from the process environment.
    pub fn new() -> Self {
        Self::from_os_pairs(env::vars_os())
    }

    /// Entries whose key or value is not valid UTF-8 are skipped.
    pub fn from_os_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let service = Self::default();
        for (key, value) in pairs {
            if let (Ok(key), Ok(value)) = (key.into_string(), value.into_string()) {
                service.set(&key, &value);
            }
        }
        service
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let service = Self::default();
        for (key, value) in pairs {
            service.set(key.as_ref(), value.as_ref());
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }
}

/// How far a fatal error reaches when several classes are compiled together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum FailureScope {
    /// Only the failing class is lost; other classes keep compiling.
    #[default]
    Class,
    /// The first fatal error stops every class that has not started yet.
    Build,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
    /// Simple type name of the marker annotation.
    pub marker: String,
    /// Member holding the artefact type.
    pub value_member: String,
    pub failure_scope: FailureScope,
    /// Worker threads for batch compilation.
    pub threads: usize,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            marker: "Artefact".to_string(),
            value_member: "value".to_string(),
            failure_scope: FailureScope::default(),
            threads: num_cpus::get(),
        }
    }
}

impl TransformConfig {
    /// Overlay the `ARTEFACTOR_*` keys found in `service` on the defaults.
    pub fn from_service(service: &ConfigService) -> Result<Self> {
        let mut config = Self::default();
        if let Some(marker) = service.get(MARKER_KEY) {
            config.marker = marker;
        }
        if let Some(member) = service.get(VALUE_MEMBER_KEY) {
            config.value_member = member;
        }
        if let Some(scope) = service.get(FAILURE_SCOPE_KEY) {
            config.failure_scope = scope.parse().map_err(|_| {
                InjectionError::Config(format!("{}: unknown failure scope '{}'", FAILURE_SCOPE_KEY, scope))
            })?;
        }
        if let Some(threads) = service.get(THREADS_KEY) {
            config.threads = threads.parse().map_err(|e| {
                InjectionError::Config(format!("{}: {}", THREADS_KEY, e))
            })?;
        }
        config.validate()
    }

    pub fn from_env() -> Result<Self> {
        Self::from_service(&ConfigService::new())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| InjectionError::Config(e.to_string()))?;
        config.validate()
    }

    pub fn with_failure_scope(mut self, scope: FailureScope) -> Self {
        self.failure_scope = scope;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    fn validate(self) -> Result<Self> {
        if self.marker.is_empty() {
            return Err(InjectionError::Config("marker must not be empty".into()));
        }
        if self.value_member.is_empty() {
            return Err(InjectionError::Config("value member must not be empty".into()));
        }
        if self.threads == 0 {
            return Err(InjectionError::Config("threads must be at least 1".into()));
        }
        Ok(self)
    }
}
