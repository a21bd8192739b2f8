//! Per-run context and generator configuration.

use serde::{Deserialize, Serialize};

use crate::reflection::{SymbolGraph, TypeId, WellKnownType};

/// The framework types every stage needs, resolved once at the start of a
/// run and passed explicitly. A graph that cannot supply all of them is an
/// environment the tool cannot operate in; the run then produces no output.
#[derive(Debug, Clone, Copy)]
pub struct WellKnownTypes {
    pub dependency_property: TypeId,
    pub dependency_property_key: TypeId,
    pub dependency_object: TypeId,
    pub changed_event_args: TypeId,
    pub metadata_options: TypeId,
    pub routed_event: TypeId,
    pub object: TypeId,
}

impl WellKnownTypes {
    pub fn resolve(graph: &dyn SymbolGraph) -> Option<Self> {
        Some(Self {
            dependency_property: graph.lookup_well_known(WellKnownType::DependencyProperty)?,
            dependency_property_key: graph
                .lookup_well_known(WellKnownType::DependencyPropertyKey)?,
            dependency_object: graph.lookup_well_known(WellKnownType::DependencyObject)?,
            changed_event_args: graph.lookup_well_known(WellKnownType::ChangedEventArgs)?,
            metadata_options: graph.lookup_well_known(WellKnownType::MetadataOptions)?,
            routed_event: graph.lookup_well_known(WellKnownType::RoutedEvent)?,
            object: graph.lookup_well_known(WellKnownType::Object)?,
        })
    }
}

/// Generator configuration supplied by the host integration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorOptions {
    /// Name of the aggregate generated unit.
    pub generated_unit_name: String,

    /// Overrides the graph's null-safety mode when set.
    pub nullable_annotations: Option<bool>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            generated_unit_name: "DependencyProperties.g.cs".to_string(),
            nullable_annotations: None,
        }
    }
}
