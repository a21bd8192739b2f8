//! Value-type and call-shape inference.
//!
//! Resolution order: an explicit generic value argument always wins; a
//! first positional argument whose static type is not the metadata-options
//! type is a default value (and its type, absent a generic, becomes the
//! value type); a first argument typed as the options type is always the
//! options argument and never a default value; otherwise the value type
//! falls back to `object`.

use crate::core::WellKnownTypes;
use crate::resolver::GenerationRequest;
use crate::reflection::SymbolGraph;

pub fn infer_arguments(
    graph: &dyn SymbolGraph,
    well_known: &WellKnownTypes,
    request: &mut GenerationRequest,
) {
    let mut value_type = None;

    if let Some(explicit) = graph.generic_value_argument_of(request.site) {
        request.explicit_generic = true;
        value_type = Some(explicit);
    }

    let args = graph.call_arguments_of(request.site);
    if let Some(first) = args.first() {
        if graph.types_equal(first.static_type, well_known.metadata_options) {
            // A lone options-typed argument is never a default value; a
            // trailing argument after it is ignored.
            request.has_flags = true;
            request.flags_text = Some(first.text.clone());
        } else {
            request.has_default_value = true;
            request.default_value_text = Some(first.text.clone());
            if value_type.is_none() {
                value_type = Some(first.static_type);
            }
            if let Some(second) = args.get(1) {
                request.has_flags = true;
                request.flags_text = Some(second.text.clone());
            }
        }
    }

    let resolved = value_type.unwrap_or(well_known.object);
    request.value_type = resolved;
    request.value_type_display = graph.type_display(resolved).to_string();
}
