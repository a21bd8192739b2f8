//! Typed rejection diagnostics.

mod error;
mod error_code;

pub use error::{CollectingReporter, Diagnostic, DiagnosticData, DiagnosticReporter};
pub use error_code::{dp_error_code, ErrorCode};
