use serde::Serialize;
use std::fmt;

use super::error_code::{dp_error_code, ErrorCode};

/// Structured payload of a rejection diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DiagnosticData {
    MismatchedIdentifiers {
        expected_name: String,
        actual_name: String,
    },
    UnexpectedFieldType {
        expected_types: Vec<String>,
    },
    NotAStaticReadonlyField,
}

/// A non-fatal, per-candidate rejection. The run always continues past a
/// diagnostic; only the offending candidate is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub code: ErrorCode,
    /// Name of the backing field the candidate was anchored to.
    pub field_name: String,
    /// Display name of the type declaring the field.
    pub owner_display: String,
    pub data: DiagnosticData,
}

impl Diagnostic {
    pub fn numeric_code(&self) -> i32 {
        dp_error_code(self.code)
    }

    pub fn message(&self) -> String {
        match &self.data {
            DiagnosticData::MismatchedIdentifiers {
                expected_name,
                actual_name,
            } => format!(
                "field '{}.{}' should be named '{}' to match the declared property (found '{}')",
                self.owner_display, self.field_name, expected_name, actual_name
            ),
            DiagnosticData::UnexpectedFieldType { expected_types } => format!(
                "field '{}.{}' must be declared as one of: {}",
                self.owner_display,
                self.field_name,
                expected_types.join(", ")
            ),
            DiagnosticData::NotAStaticReadonlyField => format!(
                "field '{}.{}' must be static and readonly to back a dependency property",
                self.owner_display, self.field_name
            ),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DP{}: {}", -self.numeric_code(), self.message())
    }
}

/// Sink for rejection diagnostics. Rendering and reporting policy belong to
/// the host; the synthesizer only produces the typed events.
pub trait DiagnosticReporter {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Reporter that simply accumulates diagnostics, used by the default
/// pipeline entry point and by specs.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagnosticReporter for CollectingReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Diagnostic {
        Diagnostic {
            code: ErrorCode::MismatchedIdentifiers,
            field_name: "FooProp".to_string(),
            owner_display: "Widget".to_string(),
            data: DiagnosticData::MismatchedIdentifiers {
                expected_name: "FooProperty".to_string(),
                actual_name: "FooProp".to_string(),
            },
        }
    }

    #[test]
    fn message_names_the_expected_field() {
        let diagnostic = sample();
        assert!(diagnostic.message().contains("'FooProperty'"));
        assert!(diagnostic.to_string().starts_with("DP981001:"));
    }

    #[test]
    fn serializes_with_tagged_payload() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["data"]["kind"], "mismatchedIdentifiers");
        assert_eq!(json["data"]["expectedName"], "FooProperty");
    }
}
