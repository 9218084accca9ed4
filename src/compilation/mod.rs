//! Batch compilation
//!
//! Compiles several units at once. Units are independent and run on a rayon
//! pool; the sites inside one unit run one after another in source order.
//! The only shared state is the read-only injector registry and, in
//! [`FailureScope::Build`] mode, an abort flag.

use crate::ast::{AstNode, ClassNode, CompilationUnit, DeclarationKind, Host};
use crate::config::FailureScope;
use crate::error::{InjectionError, Result};
use crate::transform::{ArtefactTypeTransform, SiteOutcome};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// Declaration a marker occurrence is attached to, owned by the job.
pub enum Target<H: Host> {
    Class(H::Class),
    Declaration(DeclarationKind),
    Expression,
}

pub struct Site<H: Host> {
    pub annotation: H::Annotation,
    pub target: Target<H>,
}

/// A compilation unit and the marker occurrences found in it.
pub struct UnitJob<H: Host> {
    pub unit: H::Unit,
    pub sites: Vec<Site<H>>,
}

impl<H: Host> UnitJob<H> {
    pub fn new(unit: H::Unit) -> Self {
        Self {
            unit,
            sites: Vec::new(),
        }
    }

    pub fn site(mut self, annotation: H::Annotation, target: Target<H>) -> Self {
        self.sites.push(Site { annotation, target });
        self
    }

    /// Classes of this unit, in site order.
    pub fn classes(&self) -> impl Iterator<Item = &H::Class> {
        self.sites.iter().filter_map(|site| match &site.target {
            Target::Class(class) => Some(class),
            _ => None,
        })
    }
}

#[derive(Debug)]
pub struct SiteReport {
    pub unit: String,
    pub class: Option<String>,
    pub outcome: SiteOutcome,
    pub error: Option<InjectionError>,
}

#[derive(Debug)]
pub struct CompilationReport {
    pub run_id: Uuid,
    pub sites: Vec<SiteReport>,
}

impl CompilationReport {
    pub fn is_success(&self) -> bool {
        self.sites.iter().all(|site| !site.outcome.is_error())
    }

    pub fn errors(&self) -> impl Iterator<Item = &InjectionError> {
        self.sites.iter().filter_map(|site| site.error.as_ref())
    }

    pub fn count(&self, predicate: impl Fn(&SiteOutcome) -> bool) -> usize {
        self.sites.iter().filter(|site| predicate(&site.outcome)).count()
    }

    pub fn completed(&self) -> usize {
        self.count(|outcome| matches!(outcome, SiteOutcome::Completed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| *outcome == SiteOutcome::Skipped)
    }
}

/// Runs the transform over many units for one compilation run.
pub struct Compilation<H: Host> {
    transform: ArtefactTypeTransform<H>,
    pool: rayon::ThreadPool,
}

impl<H> Compilation<H>
where
    H: Host,
    H::Annotation: Send,
    H::Class: Send,
    H::Unit: Send,
{
    pub fn new(transform: ArtefactTypeTransform<H>) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(transform.config().threads)
            .build()
            .map_err(|e| InjectionError::Config(format!("thread pool: {}", e)))?;
        Ok(Self { transform, pool })
    }

    pub fn transform(&self) -> &ArtefactTypeTransform<H> {
        &self.transform
    }

    /// Process every site of every job. Classes are mutated in place.
    pub fn run(&self, jobs: &mut [UnitJob<H>]) -> CompilationReport {
        let scope = self.transform.config().failure_scope;
        tracing::info!(
            "Compiling {} unit(s) on {} thread(s), failure scope: {}",
            jobs.len(),
            self.pool.current_num_threads(),
            scope
        );

        let aborted = AtomicBool::new(false);
        let per_unit: Vec<Vec<SiteReport>> = self.pool.install(|| {
            jobs.par_iter_mut()
                .map(|job| self.run_unit(job, scope, &aborted))
                .collect()
        });

        let report = CompilationReport {
            run_id: self.transform.run_id(),
            sites: per_unit.into_iter().flatten().collect(),
        };
        tracing::info!(
            "Compilation finished ({} completed, {} error(s), {} skipped)",
            report.completed(),
            report.errors().count(),
            report.skipped()
        );
        report
    }

    fn run_unit(&self, job: &mut UnitJob<H>, scope: FailureScope, aborted: &AtomicBool) -> Vec<SiteReport> {
        let UnitJob { unit, sites } = job;
        let mut reports = Vec::with_capacity(sites.len());

        for site in sites.iter_mut() {
            let class = match &site.target {
                Target::Class(class) => Some(class.name().to_string()),
                _ => None,
            };
            let mut report = SiteReport {
                unit: unit.name().to_string(),
                class,
                outcome: SiteOutcome::Skipped,
                error: None,
            };

            if scope == FailureScope::Build && aborted.load(Ordering::SeqCst) {
                reports.push(report);
                continue;
            }

            match self.visit_site(unit, site) {
                Ok(outcome) => report.outcome = outcome,
                Err(error) => {
                    report.outcome = if error.is_usage_error() {
                        SiteOutcome::Rejected
                    } else {
                        SiteOutcome::Failed
                    };
                    tracing::warn!("{}: {}", report.unit, error);
                    if scope == FailureScope::Build {
                        aborted.store(true, Ordering::SeqCst);
                    }
                    report.error = Some(error);
                }
            }
            reports.push(report);
        }
        reports
    }

    fn visit_site(&self, unit: &mut H::Unit, site: &mut Site<H>) -> Result<SiteOutcome> {
        let target: AstNode<'_, H> = match &mut site.target {
            Target::Class(class) => AstNode::Class(class),
            Target::Declaration(kind) => AstNode::Declaration(*kind),
            Target::Expression => AstNode::Expression,
        };
        let mut nodes = [AstNode::Annotation(&site.annotation), target];
        self.transform.visit(&mut nodes, unit)
    }
}
