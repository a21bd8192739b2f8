//! Cast and lambda synthesis.
//!
//! Decides, per discovered handler, whether its signature already satisfies
//! the callback contract (method group, no wrapper) or must be adapted by a
//! closure, and computes the minimal set of casts the closure needs.
//!
//! The change callback contract is
//! `(DependencyObject d, DependencyPropertyChangedEventArgs e)`; the
//! coercion contract is `(DependencyObject d, object baseValue) -> object`.

use crate::core::WellKnownTypes;
use crate::output::output_ast as o;
use crate::reflection::{MethodSymbol, SymbolGraph};
use crate::resolver::GenerationRequest;

use super::discovery::{ChangeCandidate, InstanceShape};

pub fn change_callback(
    graph: &dyn SymbolGraph,
    well_known: &WellKnownTypes,
    request: &GenerationRequest,
    candidate: &ChangeCandidate,
) -> o::Expression {
    match candidate {
        ChangeCandidate::RoutedEvent { field_name } => {
            routed_event_wrapper(graph, well_known, request, field_name)
        }
        ChangeCandidate::Instance { method, shape } => {
            instance_wrapper(graph, well_known, request, method, *shape)
        }
        ChangeCandidate::Static { method } => static_change(graph, well_known, method),
    }
}

/// `(d, e) => ((Owner)d).RaiseEvent(new RoutedPropertyChangedEventArgs<T>(
///     (T)e.OldValue, (T)e.NewValue, <Name>ChangedEvent))`
fn routed_event_wrapper(
    graph: &dyn SymbolGraph,
    well_known: &WellKnownTypes,
    request: &GenerationRequest,
    field_name: &str,
) -> o::Expression {
    let chain_root = request.narrowing_type.unwrap_or(request.owner);
    let args_type = o::type_node(format!(
        "RoutedPropertyChangedEventArgs<{}>",
        request.value_type_display
    ));
    let body = o::invoke_on(
        target_cast(graph, well_known, chain_root),
        "RaiseEvent",
        vec![o::instantiate(
            args_type,
            vec![
                value_cast(well_known, request, o::read_prop(o::read_var("e"), "OldValue")),
                value_cast(well_known, request, o::read_prop(o::read_var("e"), "NewValue")),
                o::read_var(field_name),
            ],
        )],
    );
    o::lambda(&["d", "e"], body)
}

fn instance_wrapper(
    graph: &dyn SymbolGraph,
    well_known: &WellKnownTypes,
    request: &GenerationRequest,
    method: &MethodSymbol,
    shape: InstanceShape,
) -> o::Expression {
    let receiver = target_cast(graph, well_known, request.owner);
    let args = match shape {
        InstanceShape::ChangeArgs => vec![o::read_var("e")],
        InstanceShape::OldNew => vec![
            value_cast(well_known, request, o::read_prop(o::read_var("e"), "OldValue")),
            value_cast(well_known, request, o::read_prop(o::read_var("e"), "NewValue")),
        ],
    };
    o::lambda(&["d", "e"], o::invoke_on(receiver, &method.name, args))
}

fn static_change(
    graph: &dyn SymbolGraph,
    well_known: &WellKnownTypes,
    method: &MethodSymbol,
) -> o::Expression {
    let first = method.parameters[0].param_type;
    if graph.types_equal(first, well_known.dependency_object) {
        // Signature already matches the contract; pass the method group.
        return o::read_var(&method.name);
    }
    let cast_to = o::type_node(graph.type_display(first));
    o::lambda(
        &["d", "e"],
        o::invoke(
            &method.name,
            vec![o::cast(cast_to, o::read_var("d")), o::read_var("e")],
        ),
    )
}

pub fn coerce_callback(
    graph: &dyn SymbolGraph,
    well_known: &WellKnownTypes,
    request: &GenerationRequest,
    method: &MethodSymbol,
) -> o::Expression {
    let first = method.parameters[0].param_type;
    let second = method.parameters[1].param_type;

    let direct = method
        .return_type
        .is_some_and(|rt| graph.types_equal(rt, well_known.object))
        && graph.types_equal(first, well_known.dependency_object)
        && graph.types_equal(second, well_known.object);
    if direct {
        return o::read_var(&method.name);
    }

    let target = if graph.types_equal(first, well_known.dependency_object) {
        o::read_var("d")
    } else {
        o::cast(o::type_node(graph.type_display(first)), o::read_var("d"))
    };
    let base_value = if graph.types_equal(second, well_known.object) {
        o::read_var("baseValue")
    } else {
        o::cast(
            o::type_node(&request.value_type_display),
            o::read_var("baseValue"),
        )
    };
    o::lambda(
        &["d", "baseValue"],
        o::invoke(&method.name, vec![target, base_value]),
    )
}

/// `(Owner)d`, or `d` untouched when the target type already is the base
/// target type.
fn target_cast(
    graph: &dyn SymbolGraph,
    well_known: &WellKnownTypes,
    target: crate::reflection::TypeId,
) -> o::Expression {
    if graph.types_equal(target, well_known.dependency_object) {
        o::read_var("d")
    } else {
        o::cast(o::type_node(graph.type_display(target)), o::read_var("d"))
    }
}

/// Casts an old/new/base value to the value type, unless the value type is
/// `object`.
fn value_cast(
    well_known: &WellKnownTypes,
    request: &GenerationRequest,
    expr: o::Expression,
) -> o::Expression {
    if request.value_type == well_known.object {
        expr
    } else {
        o::cast(o::type_node(&request.value_type_display), expr)
    }
}
