//! Candidate admission.
//!
//! Validates each candidate handed over by the syntactic scan and enriches
//! it into a [`GenerationRequest`]. Malformed candidates are rejected with a
//! single diagnostic each; the run always continues.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::WellKnownTypes;
use crate::diagnostics::{Diagnostic, DiagnosticData, DiagnosticReporter, ErrorCode};
use crate::reflection::{FieldSymbol, SiteRef, SymbolGraph, TypeId};

static LEGAL_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_][0-9a-zA-Z_]*$").unwrap());

/// Which abbreviated registration form the scan matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationKind {
    Plain,
    Attached,
}

/// Raw input from the syntactic scan: one abbreviated declaration.
#[derive(Debug, Clone)]
pub struct CandidateRequest {
    pub kind: RegistrationKind,
    pub property_name: String,
    pub site: SiteRef,
}

impl CandidateRequest {
    pub fn new(kind: RegistrationKind, property_name: impl Into<String>, site: SiteRef) -> Self {
        Self {
            kind,
            property_name: property_name.into(),
            site,
        }
    }
}

/// An admitted candidate, fully specified for synthesis. `backing_field` is
/// set during admission and never after; `value_type` is written once by
/// inference and read by every later stage.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub target_name: String,
    pub backing_field: FieldSymbol,
    pub owner: TypeId,
    pub site: SiteRef,
    pub is_keyed: bool,
    pub is_attached: bool,
    pub narrowing_type: Option<TypeId>,
    pub value_type: TypeId,
    pub value_type_display: String,
    pub explicit_generic: bool,
    pub has_default_value: bool,
    pub has_flags: bool,
    pub default_value_text: Option<String>,
    pub flags_text: Option<String>,
}

impl GenerationRequest {
    /// Name of the plain registration-token field, whether it exists on the
    /// owner or will be synthesized.
    pub fn plain_field_name(&self) -> String {
        format!("{}Property", self.target_name)
    }

    pub fn keyed_field_name(&self) -> String {
        format!("{}PropertyKey", self.target_name)
    }
}

/// Admits a candidate, or reports one diagnostic and returns `None`.
///
/// A candidate whose enclosing field cannot be resolved at all is skipped
/// silently; the diagnostics all describe a resolvable field.
pub fn resolve_candidate(
    graph: &dyn SymbolGraph,
    well_known: &WellKnownTypes,
    candidate: &CandidateRequest,
    reporter: &mut dyn DiagnosticReporter,
) -> Option<GenerationRequest> {
    let field = graph.resolve_enclosing_field(candidate.site)?;
    let owner_display = graph.type_display(field.containing_type).to_string();

    if !field.is_static_readonly() {
        reporter.report(Diagnostic {
            code: ErrorCode::NotAStaticReadonlyField,
            field_name: field.name.clone(),
            owner_display,
            data: DiagnosticData::NotAStaticReadonlyField,
        });
        return None;
    }

    let is_keyed = if graph.types_equal(field.declared_type, well_known.dependency_property) {
        false
    } else if graph.types_equal(field.declared_type, well_known.dependency_property_key) {
        true
    } else {
        reporter.report(Diagnostic {
            code: ErrorCode::UnexpectedFieldType,
            field_name: field.name.clone(),
            owner_display,
            data: DiagnosticData::UnexpectedFieldType {
                expected_types: vec![
                    graph.type_display(well_known.dependency_property).to_string(),
                    graph
                        .type_display(well_known.dependency_property_key)
                        .to_string(),
                ],
            },
        });
        return None;
    };

    let suffix = if is_keyed { "PropertyKey" } else { "Property" };
    let expected_name = format!("{}{}", candidate.property_name, suffix);
    if !LEGAL_IDENTIFIER.is_match(&candidate.property_name) || field.name != expected_name {
        reporter.report(Diagnostic {
            code: ErrorCode::MismatchedIdentifiers,
            field_name: field.name.clone(),
            owner_display,
            data: DiagnosticData::MismatchedIdentifiers {
                expected_name,
                actual_name: field.name.clone(),
            },
        });
        return None;
    }

    let is_attached = candidate.kind == RegistrationKind::Attached;
    let narrowing_type = if is_attached {
        graph.generic_target_argument_of(candidate.site)
    } else {
        None
    };

    Some(GenerationRequest {
        target_name: candidate.property_name.clone(),
        owner: field.containing_type,
        backing_field: field.clone(),
        site: candidate.site,
        is_keyed,
        is_attached,
        narrowing_type,
        value_type: well_known.object,
        value_type_display: graph.type_display(well_known.object).to_string(),
        explicit_generic: false,
        has_default_value: false,
        has_flags: false,
        default_value_text: None,
        flags_text: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_pattern_rejects_non_identifiers() {
        assert!(LEGAL_IDENTIFIER.is_match("Foo"));
        assert!(LEGAL_IDENTIFIER.is_match("_foo2"));
        assert!(!LEGAL_IDENTIFIER.is_match("2Foo"));
        assert!(!LEGAL_IDENTIFIER.is_match("Foo.Bar"));
        assert!(!LEGAL_IDENTIFIER.is_match(""));
    }
}
