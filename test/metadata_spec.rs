//! Metadata expression shape tests.

use depprop_compiler::core::WellKnownTypes;
use depprop_compiler::diagnostics::CollectingReporter;
use depprop_compiler::handlers::metadata::metadata_expression;
use depprop_compiler::inference::infer_arguments;
use depprop_compiler::output::output_ast as o;
use depprop_compiler::reflection::testing::TestSymbolGraph;
use depprop_compiler::reflection::{Accessibility, WellKnownType};
use depprop_compiler::resolver::{resolve_candidate, CandidateRequest, GenerationRequest, RegistrationKind};

enum Shape {
    NoArgs,
    DefaultOnly,
    FlagsOnly,
    DefaultAndFlags,
}

fn request_with(shape: Shape) -> GenerationRequest {
    let mut graph = TestSymbolGraph::new();
    let owner = graph.add_target_type("Widget", "Demo.Controls");
    let int_type = graph.add_type("int", "System", None);
    let options = graph.well_known(WellKnownType::MetadataOptions);
    let dp = graph.well_known(WellKnownType::DependencyProperty);
    let field = graph.add_backing_field(owner, "FooProperty", dp, Accessibility::Public);
    let builder = graph.add_call_site(field);
    let site = match shape {
        Shape::NoArgs => builder.finish(),
        Shape::DefaultOnly => builder.arg(int_type, "42").finish(),
        Shape::FlagsOnly => builder
            .arg(options, "FrameworkPropertyMetadataOptions.AffectsRender")
            .finish(),
        Shape::DefaultAndFlags => builder
            .arg(int_type, "42")
            .arg(options, "FrameworkPropertyMetadataOptions.AffectsRender")
            .finish(),
    };
    let wk = WellKnownTypes::resolve(&graph).unwrap();
    let mut reporter = CollectingReporter::new();
    let candidate = CandidateRequest::new(RegistrationKind::Plain, "Foo", site);
    let mut request = resolve_candidate(&graph, &wk, &candidate, &mut reporter).unwrap();
    infer_arguments(&graph, &wk, &mut request);
    request
}

fn change() -> o::Expression {
    o::read_var("FooChanged")
}

fn coerce() -> o::Expression {
    o::read_var("CoerceFoo")
}

#[test]
fn flags_shape_uses_the_framework_metadata_constructor() {
    let request = request_with(Shape::DefaultAndFlags);
    let expr = metadata_expression(&request, "TValue", Some(change()), Some(coerce())).unwrap();
    match expr {
        o::Expression::Instantiate { type_, args, initializers } => {
            assert_eq!(type_.name, "FrameworkPropertyMetadata");
            assert_eq!(args.len(), 4);
            assert_eq!(args[0], o::read_var("defaultValue"));
            assert_eq!(args[1], o::read_var("options"));
            assert_eq!(args[2], change());
            assert_eq!(args[3], coerce());
            assert!(initializers.is_empty());
        }
        other => panic!("unexpected shape: {:?}", other),
    }
}

#[test]
fn flags_without_default_falls_back_to_the_type_default() {
    let request = request_with(Shape::FlagsOnly);
    let expr = metadata_expression(&request, "object", None, None).unwrap();
    match expr {
        o::Expression::Instantiate { args, .. } => {
            assert_eq!(args[0], o::Expression::Default(o::type_node("object")));
            assert_eq!(args[2], o::Expression::Null);
            assert_eq!(args[3], o::Expression::Null);
        }
        other => panic!("unexpected shape: {:?}", other),
    }
}

#[test]
fn default_only_shape_uses_the_plain_metadata_constructor() {
    let request = request_with(Shape::DefaultOnly);
    let expr = metadata_expression(&request, "TValue", Some(change()), None).unwrap();
    match expr {
        o::Expression::Instantiate { type_, args, initializers } => {
            assert_eq!(type_.name, "PropertyMetadata");
            assert_eq!(args.len(), 3);
            assert_eq!(args[0], o::read_var("defaultValue"));
            assert_eq!(args[1], change());
            assert_eq!(args[2], o::Expression::Null);
            assert!(initializers.is_empty());
        }
        other => panic!("unexpected shape: {:?}", other),
    }
}

#[test]
fn change_handler_only_sets_the_coercion_through_an_initializer() {
    let request = request_with(Shape::NoArgs);
    let expr = metadata_expression(&request, "object", Some(change()), Some(coerce())).unwrap();
    match expr {
        o::Expression::Instantiate { type_, args, initializers } => {
            assert_eq!(type_.name, "PropertyMetadata");
            assert_eq!(args, vec![change()]);
            assert_eq!(
                initializers,
                vec![("CoerceValueCallback".to_string(), coerce())]
            );
        }
        other => panic!("unexpected shape: {:?}", other),
    }
}

#[test]
fn coercion_only_uses_an_empty_constructor_with_an_initializer() {
    let request = request_with(Shape::NoArgs);
    let expr = metadata_expression(&request, "object", None, Some(coerce())).unwrap();
    match expr {
        o::Expression::Instantiate { args, initializers, .. } => {
            assert!(args.is_empty());
            assert_eq!(
                initializers,
                vec![("CoerceValueCallback".to_string(), coerce())]
            );
        }
        other => panic!("unexpected shape: {:?}", other),
    }
}

#[test]
fn no_handlers_and_no_arguments_mean_no_metadata() {
    let request = request_with(Shape::NoArgs);
    assert!(metadata_expression(&request, "object", None, None).is_none());
}
