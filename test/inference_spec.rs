//! Value-type and call-shape inference tests.

use depprop_compiler::core::WellKnownTypes;
use depprop_compiler::diagnostics::CollectingReporter;
use depprop_compiler::inference::infer_arguments;
use depprop_compiler::reflection::testing::TestSymbolGraph;
use depprop_compiler::reflection::{Accessibility, SiteRef, TypeId, WellKnownType};
use depprop_compiler::resolver::{resolve_candidate, CandidateRequest, GenerationRequest, RegistrationKind};

struct Fixture {
    graph: TestSymbolGraph,
    int_type: TypeId,
    double_type: TypeId,
}

impl Fixture {
    fn new() -> Self {
        let mut graph = TestSymbolGraph::new();
        let int_type = graph.add_type("int", "System", None);
        let double_type = graph.add_type("double", "System", None);
        Self {
            graph,
            int_type,
            double_type,
        }
    }

    fn request_for(&self, site: SiteRef) -> GenerationRequest {
        let wk = WellKnownTypes::resolve(&self.graph).unwrap();
        let mut reporter = CollectingReporter::new();
        let candidate = CandidateRequest::new(RegistrationKind::Plain, "Foo", site);
        let mut request = resolve_candidate(&self.graph, &wk, &candidate, &mut reporter)
            .expect("fixture candidates are well-formed");
        infer_arguments(&self.graph, &wk, &mut request);
        request
    }

    fn site(&mut self) -> depprop_compiler::reflection::testing::SiteBuilder<'_> {
        let owner = self.graph.add_target_type("Widget", "Demo.Controls");
        let dp = self.graph.well_known(WellKnownType::DependencyProperty);
        let field = self
            .graph
            .add_backing_field(owner, "FooProperty", dp, Accessibility::Public);
        self.graph.add_call_site(field)
    }
}

#[test]
fn explicit_generic_argument_has_highest_precedence() {
    let mut fixture = Fixture::new();
    let (int_type, double_type) = (fixture.int_type, fixture.double_type);
    let site = fixture
        .site()
        .value_generic(int_type)
        .arg(double_type, "0.0")
        .finish();

    let request = fixture.request_for(site);
    assert_eq!(request.value_type, int_type);
    assert_eq!(request.value_type_display, "int");
    assert!(request.explicit_generic);
    // The mistyped first argument is still the default value.
    assert!(request.has_default_value);
    assert_eq!(request.default_value_text.as_deref(), Some("0.0"));
}

#[test]
fn default_argument_type_becomes_the_value_type() {
    let mut fixture = Fixture::new();
    let int_type = fixture.int_type;
    let site = fixture.site().arg(int_type, "42").finish();

    let request = fixture.request_for(site);
    assert_eq!(request.value_type, int_type);
    assert!(request.has_default_value);
    assert!(!request.has_flags);
}

#[test]
fn options_typed_single_argument_is_never_a_default_value() {
    let mut fixture = Fixture::new();
    let options = fixture.graph.well_known(WellKnownType::MetadataOptions);
    let site = fixture
        .site()
        .arg(options, "FrameworkPropertyMetadataOptions.AffectsRender")
        .finish();

    let request = fixture.request_for(site);
    assert!(!request.has_default_value);
    assert!(request.has_flags);
    assert_eq!(
        request.flags_text.as_deref(),
        Some("FrameworkPropertyMetadataOptions.AffectsRender")
    );
    // Unresolved by the argument rules: fall back to the top type.
    assert_eq!(request.value_type_display, "object");
}

#[test]
fn default_plus_options_fills_both_shapes() {
    let mut fixture = Fixture::new();
    let int_type = fixture.int_type;
    let options = fixture.graph.well_known(WellKnownType::MetadataOptions);
    let site = fixture
        .site()
        .arg(int_type, "7")
        .arg(options, "FrameworkPropertyMetadataOptions.Inherits")
        .finish();

    let request = fixture.request_for(site);
    assert!(request.has_default_value);
    assert!(request.has_flags);
    assert_eq!(request.value_type, int_type);
    assert_eq!(request.default_value_text.as_deref(), Some("7"));
    assert_eq!(
        request.flags_text.as_deref(),
        Some("FrameworkPropertyMetadataOptions.Inherits")
    );
}

#[test]
fn no_arguments_fall_back_to_the_top_type() {
    let mut fixture = Fixture::new();
    let site = fixture.site().finish();

    let request = fixture.request_for(site);
    assert!(!request.has_default_value);
    assert!(!request.has_flags);
    assert!(!request.explicit_generic);
    assert_eq!(request.value_type_display, "object");
}

#[test]
fn trailing_argument_after_an_options_argument_is_ignored() {
    let mut fixture = Fixture::new();
    let int_type = fixture.int_type;
    let options = fixture.graph.well_known(WellKnownType::MetadataOptions);
    let site = fixture
        .site()
        .arg(options, "FrameworkPropertyMetadataOptions.None")
        .arg(int_type, "3")
        .finish();

    let request = fixture.request_for(site);
    assert!(request.has_flags);
    assert!(!request.has_default_value);
    assert_eq!(request.default_value_text, None);
}
