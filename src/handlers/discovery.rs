//! Handler discovery.
//!
//! One pass over the owning type's members, in declaration order, running
//! two independent searches: a ranked change-notification search and a
//! first-match coercion search.
//!
//! Change-candidate ranks: none (0) < routed event field (1) < instance
//! method (2) < static method (3). A routed event is accepted only while
//! nothing has been found; any qualifying method is accepted while the best
//! rank is below 3, so a later method supersedes an earlier routed event or
//! method but a routed event never supersedes a method.
//!
//! The scan stops early only once both a static change method and a
//! coercion method are in hand. A routed-event or instance-method match
//! does not arm the early exit; the selection outcome is identical either
//! way, and that observable behavior is kept.

use crate::core::WellKnownTypes;
use crate::reflection::{MemberSymbol, MethodSymbol, SymbolGraph, TypeId};
use crate::resolver::GenerationRequest;

/// Which of the two accepted instance-method shapes matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceShape {
    /// `void On<Name>Changed(DependencyPropertyChangedEventArgs e)`
    ChangeArgs,
    /// `void On<Name>Changed(T oldValue, T newValue)`
    OldNew,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeCandidate {
    RoutedEvent { field_name: String },
    Instance { method: MethodSymbol, shape: InstanceShape },
    Static { method: MethodSymbol },
}

impl ChangeCandidate {
    pub fn rank(&self) -> u8 {
        match self {
            ChangeCandidate::RoutedEvent { .. } => 1,
            ChangeCandidate::Instance { .. } => 2,
            ChangeCandidate::Static { .. } => 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredHandlers {
    pub change: Option<ChangeCandidate>,
    pub coerce: Option<MethodSymbol>,
}

pub fn discover_handlers(
    graph: &dyn SymbolGraph,
    well_known: &WellKnownTypes,
    request: &GenerationRequest,
) -> DiscoveredHandlers {
    // The base-chain walk for first-parameter compatibility starts at the
    // narrowing type for attached properties, the owner otherwise.
    let chain_root = request.narrowing_type.unwrap_or(request.owner);
    let signal_field_name = format!("{}ChangedEvent", request.target_name);

    let mut change: Option<ChangeCandidate> = None;
    let mut change_rank = 0u8;
    let mut coerce: Option<MethodSymbol> = None;

    for member in graph.members_of(request.owner) {
        match member {
            MemberSymbol::Field(field) => {
                if change_rank == 0
                    && field.is_static_readonly()
                    && graph.types_equal(field.declared_type, well_known.routed_event)
                    && field.name == signal_field_name
                {
                    let candidate = ChangeCandidate::RoutedEvent {
                        field_name: field.name.clone(),
                    };
                    change_rank = candidate.rank();
                    change = Some(candidate);
                }
            }
            MemberSymbol::Method(method) => {
                if change_rank < 3 {
                    if method.is_static() {
                        if static_change_qualifies(graph, well_known, request, chain_root, method) {
                            let candidate = ChangeCandidate::Static {
                                method: method.clone(),
                            };
                            change_rank = candidate.rank();
                            change = Some(candidate);
                        }
                    } else if !request.is_attached {
                        if let Some(shape) =
                            instance_change_shape(graph, well_known, request, method)
                        {
                            let candidate = ChangeCandidate::Instance {
                                method: method.clone(),
                                shape,
                            };
                            change_rank = candidate.rank();
                            change = Some(candidate);
                        }
                    }
                }
                if coerce.is_none()
                    && method.is_static()
                    && coerce_qualifies(graph, well_known, request, chain_root, method)
                {
                    coerce = Some(method.clone());
                }
            }
        }
        if change_rank == 3 && coerce.is_some() {
            break;
        }
    }

    DiscoveredHandlers { change, coerce }
}

fn static_change_qualifies(
    graph: &dyn SymbolGraph,
    well_known: &WellKnownTypes,
    request: &GenerationRequest,
    chain_root: TypeId,
    method: &MethodSymbol,
) -> bool {
    if !method.is_void() || method.parameters.len() != 2 {
        return false;
    }
    let Some(stem) = method.name.strip_suffix("Changed") else {
        return false;
    };
    if !stem.contains(&request.target_name) {
        return false;
    }
    if !graph.types_equal(method.parameters[1].param_type, well_known.changed_event_args) {
        return false;
    }
    let first = method.parameters[0].param_type;
    graph.types_equal(first, well_known.dependency_object)
        || graph.is_on_base_chain(chain_root, first)
}

fn instance_change_shape(
    graph: &dyn SymbolGraph,
    well_known: &WellKnownTypes,
    request: &GenerationRequest,
    method: &MethodSymbol,
) -> Option<InstanceShape> {
    if !method.is_void() {
        return None;
    }
    let name = &request.target_name;
    if method.name != format!("On{}Changed", name) && method.name != format!("{}Changed", name) {
        return None;
    }
    match method.parameters.as_slice() {
        [args]
            if graph.types_equal(args.param_type, well_known.changed_event_args) =>
        {
            Some(InstanceShape::ChangeArgs)
        }
        [old, new]
            if graph.types_equal(old.param_type, new.param_type)
                && graph.types_equal(old.param_type, request.value_type)
                && has_prefix_ci(&old.name, "old")
                && has_prefix_ci(&new.name, "new") =>
        {
            Some(InstanceShape::OldNew)
        }
        _ => None,
    }
}

fn coerce_qualifies(
    graph: &dyn SymbolGraph,
    well_known: &WellKnownTypes,
    request: &GenerationRequest,
    chain_root: TypeId,
    method: &MethodSymbol,
) -> bool {
    if method.name != format!("Coerce{}", request.target_name) {
        return false;
    }
    if method.parameters.len() != 2 {
        return false;
    }
    let Some(return_type) = method.return_type else {
        return false;
    };
    if !graph.types_equal(return_type, well_known.object)
        && !graph.types_equal(return_type, request.value_type)
    {
        return false;
    }
    let second = method.parameters[1].param_type;
    if !graph.types_equal(second, well_known.object)
        && !graph.types_equal(second, request.value_type)
    {
        return false;
    }
    let first = method.parameters[0].param_type;
    graph.types_equal(first, well_known.dependency_object)
        || graph.is_on_base_chain(chain_root, first)
}

// Parameter names may contain non-ASCII identifier characters, so the
// prefix slice must respect char boundaries.
fn has_prefix_ci(name: &str, prefix: &str) -> bool {
    name.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
