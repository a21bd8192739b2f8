//! Per-request declaration synthesis.
//!
//! For each admitted request this produces the accessor declarations, the
//! registration-token field when one must be added, and the registration
//! helper whose body builds the metadata expression and performs the actual
//! registration call.

use crate::core::WellKnownTypes;
use crate::handlers::{casts, metadata, DiscoveredHandlers};
use crate::output::output_ast as o;
use crate::reflection::{Accessibility, MemberSymbol, SymbolGraph};
use crate::resolver::GenerationRequest;

pub fn synthesize_request(
    graph: &dyn SymbolGraph,
    well_known: &WellKnownTypes,
    request: &GenerationRequest,
    handlers: &DiscoveredHandlers,
    nullable: bool,
) -> Vec<o::Declaration> {
    let mut declarations = Vec::new();

    let existing_plain = find_plain_field_accessibility(graph, request);
    let plain_accessibility = existing_plain.unwrap_or(if request.is_keyed {
        Accessibility::Public
    } else {
        request.backing_field.accessibility
    });

    // Keyed registration restricts writes, but templated-binding consumers
    // still need the plain token; synthesize it when the type lacks one.
    if request.is_keyed && existing_plain.is_none() {
        declarations.push(o::Declaration::Field(o::FieldDecl {
            accessibility: Accessibility::Public,
            is_static: true,
            is_readonly: true,
            field_type: o::type_node(graph.type_display(well_known.dependency_property)),
            name: request.plain_field_name(),
            initializer: Some(o::read_prop(
                o::read_var(request.keyed_field_name()),
                "DependencyProperty",
            )),
        }));
    }

    if request.is_attached {
        declarations.extend(attached_accessors(graph, well_known, request, plain_accessibility));
    } else {
        declarations.push(instance_accessor(well_known, request, plain_accessibility));
    }

    declarations.push(registration_helper(
        graph, well_known, request, handlers, nullable,
    ));

    declarations
}

fn find_plain_field_accessibility(
    graph: &dyn SymbolGraph,
    request: &GenerationRequest,
) -> Option<Accessibility> {
    let plain_name = request.plain_field_name();
    graph.members_of(request.owner).iter().find_map(|member| match member {
        MemberSymbol::Field(field) if field.name == plain_name => Some(field.accessibility),
        _ => None,
    })
}

fn value_type_node(request: &GenerationRequest) -> o::TypeNode {
    o::type_node(&request.value_type_display)
}

/// Wraps a `GetValue` read in a cast to the value type, unless the value
/// type is `object`.
fn read_value(
    well_known: &WellKnownTypes,
    request: &GenerationRequest,
    get_value: o::Expression,
) -> o::Expression {
    if request.value_type == well_known.object {
        get_value
    } else {
        o::cast(value_type_node(request), get_value)
    }
}

fn write_token_name(request: &GenerationRequest) -> String {
    if request.is_keyed {
        request.keyed_field_name()
    } else {
        request.plain_field_name()
    }
}

fn instance_accessor(
    well_known: &WellKnownTypes,
    request: &GenerationRequest,
    plain_accessibility: Accessibility,
) -> o::Declaration {
    let setter_accessibility = if request.is_keyed
        && request.backing_field.accessibility != plain_accessibility
    {
        Some(request.backing_field.accessibility)
    } else {
        None
    };
    o::Declaration::Property(o::PropertyDecl {
        accessibility: plain_accessibility,
        value_type: value_type_node(request),
        name: request.target_name.clone(),
        getter: read_value(
            well_known,
            request,
            o::invoke("GetValue", vec![o::read_var(request.plain_field_name())]),
        ),
        setter: Some(o::SetterDecl {
            accessibility: setter_accessibility,
            body: o::invoke(
                "SetValue",
                vec![o::read_var(write_token_name(request)), o::read_var("value")],
            ),
        }),
    })
}

fn attached_accessors(
    graph: &dyn SymbolGraph,
    well_known: &WellKnownTypes,
    request: &GenerationRequest,
    plain_accessibility: Accessibility,
) -> Vec<o::Declaration> {
    let target_type = request
        .narrowing_type
        .map(|ty| graph.type_display(ty).to_string())
        .unwrap_or_else(|| graph.type_display(well_known.dependency_object).to_string());
    let write_accessibility = if request.is_keyed {
        request.backing_field.accessibility
    } else {
        plain_accessibility
    };

    let getter = o::Declaration::Method(o::MethodDecl {
        accessibility: plain_accessibility,
        is_static: true,
        return_type: Some(value_type_node(request)),
        name: format!("Get{}", request.target_name),
        type_params: vec![],
        params: vec![o::ParamDecl {
            name: "d".to_string(),
            param_type: o::type_node(&target_type),
        }],
        body: o::MethodBody::Expression(read_value(
            well_known,
            request,
            o::invoke_on(
                o::read_var("d"),
                "GetValue",
                vec![o::read_var(request.plain_field_name())],
            ),
        )),
    });

    let setter = o::Declaration::Method(o::MethodDecl {
        accessibility: write_accessibility,
        is_static: true,
        return_type: None,
        name: format!("Set{}", request.target_name),
        type_params: vec![],
        params: vec![
            o::ParamDecl {
                name: "d".to_string(),
                param_type: o::type_node(&target_type),
            },
            o::ParamDecl {
                name: "value".to_string(),
                param_type: value_type_node(request),
            },
        ],
        body: o::MethodBody::Expression(o::invoke_on(
            o::read_var("d"),
            "SetValue",
            vec![o::read_var(write_token_name(request)), o::read_var("value")],
        )),
    });

    vec![getter, setter]
}

fn registration_helper(
    graph: &dyn SymbolGraph,
    well_known: &WellKnownTypes,
    request: &GenerationRequest,
    handlers: &DiscoveredHandlers,
    nullable: bool,
) -> o::Declaration {
    // The helper is generic only when the call shape lets the language bind
    // the type parameter: an explicit generic argument or a default-value
    // argument. Flags-only and no-argument shapes use the resolved type
    // directly.
    let generic = request.explicit_generic || request.has_default_value;
    let value_type_name = if generic {
        "TValue".to_string()
    } else {
        request.value_type_display.clone()
    };

    let mut params = Vec::new();
    if request.has_default_value {
        params.push(o::ParamDecl {
            name: "defaultValue".to_string(),
            param_type: o::type_node(&value_type_name),
        });
    }
    if request.has_flags {
        params.push(o::ParamDecl {
            name: "options".to_string(),
            param_type: o::type_node(
                graph.type_display(well_known.metadata_options),
            ),
        });
    }

    let change = handlers
        .change
        .as_ref()
        .map(|candidate| casts::change_callback(graph, well_known, request, candidate));
    let coerce = handlers
        .coerce
        .as_ref()
        .map(|method| casts::coerce_callback(graph, well_known, request, method));
    let metadata_expr = metadata::metadata_expression(request, &value_type_name, change, coerce);

    let metadata_stmt = match metadata_expr {
        Some(expr) => o::Statement::DeclareVar {
            name: "metadata".to_string(),
            var_type: None,
            value: expr,
        },
        None => {
            let mut metadata_type = o::type_node("PropertyMetadata");
            if nullable {
                metadata_type = metadata_type.nullable();
            }
            o::Statement::DeclareVar {
                name: "metadata".to_string(),
                var_type: Some(metadata_type),
                value: o::Expression::Null,
            }
        }
    };

    let operation = match (request.is_attached, request.is_keyed) {
        (false, false) => "Register",
        (false, true) => "RegisterReadOnly",
        (true, false) => "RegisterAttached",
        (true, true) => "RegisterAttachedReadOnly",
    };
    let register_call = o::invoke_on(
        o::read_var(graph.type_display(well_known.dependency_property)),
        operation,
        vec![
            o::literal_str(&request.target_name),
            o::Expression::TypeOf(o::type_node(&value_type_name)),
            o::Expression::TypeOf(o::type_node(graph.type_display(request.owner))),
            o::read_var("metadata"),
        ],
    );

    let token_type = if request.is_keyed {
        graph.type_display(well_known.dependency_property_key)
    } else {
        graph.type_display(well_known.dependency_property)
    };

    o::Declaration::Method(o::MethodDecl {
        accessibility: Accessibility::Private,
        is_static: true,
        return_type: Some(o::type_node(token_type)),
        name: format!("Register{}", request.target_name),
        type_params: if generic {
            vec!["TValue".to_string()]
        } else {
            vec![]
        },
        params,
        body: o::MethodBody::Block(vec![metadata_stmt, o::Statement::Return(register_call)]),
    })
}
