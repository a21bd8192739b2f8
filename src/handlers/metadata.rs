//! Metadata expression synthesis.
//!
//! Builds the property-metadata construction passed to the registration
//! call. One of five shapes applies, keyed off the inferred call shape and
//! the discovered handlers:
//!
//! - flags present: `new FrameworkPropertyMetadata(default, options, change, coerce)`
//! - default only:  `new PropertyMetadata(defaultValue, change, coerce)`
//! - change only:   `new PropertyMetadata(change) { CoerceValueCallback = coerce }`
//! - coerce only:   `new PropertyMetadata() { CoerceValueCallback = coerce }`
//! - none:          no metadata (`null` at the registration call)

use crate::output::output_ast as o;
use crate::resolver::GenerationRequest;

/// Builds the metadata expression, or `None` for the null-metadata shape.
///
/// `value_type_name` is the type the registration helper ranges over:
/// `TValue` when the helper is generic, the inferred display type
/// otherwise.
pub fn metadata_expression(
    request: &GenerationRequest,
    value_type_name: &str,
    change: Option<o::Expression>,
    coerce: Option<o::Expression>,
) -> Option<o::Expression> {
    if request.has_flags {
        let default_value = if request.has_default_value {
            o::read_var("defaultValue")
        } else {
            o::Expression::Default(o::type_node(value_type_name))
        };
        return Some(o::instantiate(
            o::type_node("FrameworkPropertyMetadata"),
            vec![
                default_value,
                o::read_var("options"),
                change.unwrap_or(o::Expression::Null),
                coerce.unwrap_or(o::Expression::Null),
            ],
        ));
    }

    if request.has_default_value {
        return Some(o::instantiate(
            o::type_node("PropertyMetadata"),
            vec![
                o::read_var("defaultValue"),
                change.unwrap_or(o::Expression::Null),
                coerce.unwrap_or(o::Expression::Null),
            ],
        ));
    }

    match (change, coerce) {
        (Some(change), coerce) => Some(o::instantiate_with_init(
            o::type_node("PropertyMetadata"),
            vec![change],
            coerce
                .map(|c| vec![("CoerceValueCallback".to_string(), c)])
                .unwrap_or_default(),
        )),
        (None, Some(coerce)) => Some(o::instantiate_with_init(
            o::type_node("PropertyMetadata"),
            vec![],
            vec![("CoerceValueCallback".to_string(), coerce)],
        )),
        (None, None) => None,
    }
}
