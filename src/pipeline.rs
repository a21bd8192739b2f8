//! Pipeline orchestration.
//!
//! One resolution run: resolve the well-known context, admit candidates,
//! infer, discover handlers, synthesize, plan. The run is single-threaded
//! and synchronous; cancellation is cooperative and checked between
//! candidates, so a cancelled run never produces a partial artifact.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

use crate::core::{GeneratorOptions, WellKnownTypes};
use crate::diagnostics::{CollectingReporter, Diagnostic, DiagnosticReporter};
use crate::emit::{plan, synthesize_request, GeneratedUnit, SynthesizedRequest};
use crate::handlers::discover_handlers;
use crate::inference::infer_arguments;
use crate::logging::{Logger, NullLogger};
use crate::reflection::SymbolGraph;
use crate::resolver::{resolve_candidate, CandidateRequest};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("generation was cancelled")]
    Cancelled,
}

/// Cooperative cancellation signal, shared with the host.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Drives one resolution run over a borrowed symbol graph.
pub struct Generator<'a> {
    graph: &'a dyn SymbolGraph,
    options: GeneratorOptions,
    logger: &'a dyn Logger,
}

/// Outcome of a completed (non-cancelled) run.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub unit: Option<GeneratedUnit>,
    pub diagnostics: Vec<Diagnostic>,
}

static NULL_LOGGER: NullLogger = NullLogger;

impl<'a> Generator<'a> {
    pub fn new(graph: &'a dyn SymbolGraph) -> Self {
        Self {
            graph,
            options: GeneratorOptions::default(),
            logger: &NULL_LOGGER,
        }
    }

    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_logger(mut self, logger: &'a dyn Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Runs the pipeline, collecting diagnostics internally.
    pub fn generate(
        &self,
        candidates: &[CandidateRequest],
        cancellation: &CancellationToken,
    ) -> Result<GenerationOutcome, GenerateError> {
        let mut reporter = CollectingReporter::new();
        let unit = self.generate_with_reporter(candidates, &mut reporter, cancellation)?;
        for diagnostic in &reporter.diagnostics {
            self.logger.warn(&diagnostic.to_string());
        }
        Ok(GenerationOutcome {
            unit,
            diagnostics: reporter.diagnostics,
        })
    }

    /// Runs the pipeline against a caller-supplied diagnostic sink.
    pub fn generate_with_reporter(
        &self,
        candidates: &[CandidateRequest],
        reporter: &mut dyn DiagnosticReporter,
        cancellation: &CancellationToken,
    ) -> Result<Option<GeneratedUnit>, GenerateError> {
        let Some(well_known) = WellKnownTypes::resolve(self.graph) else {
            // The compilation lacks the framework types; there is nothing
            // this tool can do in such an environment.
            self.logger
                .info("dependency-property generation skipped: framework types not found");
            return Ok(None);
        };

        let nullable = self
            .options
            .nullable_annotations
            .unwrap_or_else(|| self.graph.nullable_enabled());

        let mut synthesized = Vec::new();
        for candidate in candidates {
            if cancellation.is_cancelled() {
                self.logger.debug("generation cancelled between candidates");
                return Err(GenerateError::Cancelled);
            }

            let Some(mut request) =
                resolve_candidate(self.graph, &well_known, candidate, reporter)
            else {
                self.logger.debug(&format!(
                    "candidate '{}' rejected or unresolvable",
                    candidate.property_name
                ));
                continue;
            };

            infer_arguments(self.graph, &well_known, &mut request);
            let handlers = discover_handlers(self.graph, &well_known, &request);
            let declarations =
                synthesize_request(self.graph, &well_known, &request, &handlers, nullable);

            self.logger.debug(&format!(
                "admitted '{}' on '{}' (keyed: {}, attached: {}, value type: {})",
                request.target_name,
                self.graph.type_display(request.owner),
                request.is_keyed,
                request.is_attached,
                request.value_type_display
            ));

            synthesized.push(SynthesizedRequest {
                namespace: self.graph.namespace_of(request.owner).to_string(),
                owner_display: self.graph.type_display(request.owner).to_string(),
                declarations,
            });
        }

        let unit = plan(synthesized, &self.options.generated_unit_name, nullable);
        if let Some(unit) = &unit {
            self.logger
                .info(&format!("emitted generated unit '{}'", unit.name));
        }
        Ok(unit)
    }
}
