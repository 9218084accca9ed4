//! Diagnostic channel
//!
//! When an injector fails, the transform emits one [`Diagnostic`] to the
//! configured [`DiagnosticSink`] before returning the error to the host.

use crate::registry::ArtefactType;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Structured record of an injector failure.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub run_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub unit: String,
    pub class: String,
    pub artefact_type: ArtefactType,
    pub injector: String,
    /// Position of the failing injector among the matched injectors.
    pub index: usize,
    pub message: String,
    /// Full cause chain.
    pub cause: String,
}

impl Diagnostic {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Forwards diagnostics to `tracing` at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        tracing::error!(
            run_id = %diagnostic.run_id,
            unit = %diagnostic.unit,
            class = %diagnostic.class,
            artefact_type = %diagnostic.artefact_type,
            injector = %diagnostic.injector,
            index = diagnostic.index,
            cause = %diagnostic.cause,
            "{}",
            diagnostic.message
        );
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        // A panicking reader cannot leave the vector half-written.
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.lock().push(diagnostic.clone());
    }
}
