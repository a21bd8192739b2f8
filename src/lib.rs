//! Dependency-property declaration synthesizer.
//!
//! Given a compiled program's symbol graph and a stream of abbreviated
//! registration call sites, this crate classifies each candidate, infers
//! the property's value type and call shape, discovers compatible
//! change-notification and coercion callbacks on the owning type, and emits
//! one aggregate source unit with the full-form declarations: typed
//! accessors, registration-token fields, and registration helpers wiring up
//! the synthesized property metadata.
//!
//! The syntactic scan that produces candidates, diagnostic rendering, and
//! output packaging are external collaborators; this crate consumes
//! pre-resolved symbols through the [`reflection::SymbolGraph`] trait and
//! hands back typed diagnostics and a rendered [`emit::GeneratedUnit`].

pub mod core;
pub mod diagnostics;
pub mod emit;
pub mod handlers;
pub mod inference;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod reflection;
pub mod resolver;

pub use crate::core::{GeneratorOptions, WellKnownTypes};
pub use diagnostics::{CollectingReporter, Diagnostic, DiagnosticReporter, ErrorCode};
pub use emit::GeneratedUnit;
pub use pipeline::{CancellationToken, GenerateError, GenerationOutcome, Generator};
pub use resolver::{CandidateRequest, GenerationRequest, RegistrationKind};
