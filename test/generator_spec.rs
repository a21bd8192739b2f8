//! End-to-end pipeline tests.

use std::sync::Mutex;

use depprop_compiler::logging::{LogLevel, Logger};
use depprop_compiler::reflection::testing::TestSymbolGraph;
use depprop_compiler::reflection::{Accessibility, MemberModifiers, WellKnownType};
use depprop_compiler::{
    CancellationToken, CandidateRequest, GenerateError, Generator, RegistrationKind,
};

#[derive(Default)]
struct RecordingLogger {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl Logger for RecordingLogger {
    fn level(&self) -> LogLevel {
        LogLevel::Debug
    }

    fn write(&self, level: LogLevel, msg: &str) {
        self.lines
            .lock()
            .expect("logger mutex poisoned")
            .push((level, msg.to_string()));
    }
}

/// The worked instance scenario: owner `Widget`, property `Foo`, explicit
/// generic `int`, an `int` default value, and a static change handler
/// needing a cast wrapper.
fn widget_foo_graph() -> (TestSymbolGraph, CandidateRequest) {
    let mut graph = TestSymbolGraph::new();
    let owner = graph.add_target_type("Widget", "Demo.Controls");
    let int_type = graph.add_type("int", "System", None);
    let dp = graph.well_known(WellKnownType::DependencyProperty);
    let args = graph.well_known(WellKnownType::ChangedEventArgs);
    let field = graph.add_backing_field(owner, "FooProperty", dp, Accessibility::Public);
    graph.add_static_method(owner, "FooChanged", None, vec![("d", owner), ("e", args)]);
    let site = graph
        .add_call_site(field)
        .value_generic(int_type)
        .arg(int_type, "0")
        .finish();
    (graph, CandidateRequest::new(RegistrationKind::Plain, "Foo", site))
}

#[test]
fn instance_scenario_with_generic_precedence_and_cast_wrapper() {
    let (graph, candidate) = widget_foo_graph();
    let outcome = Generator::new(&graph)
        .generate(&[candidate], &CancellationToken::new())
        .unwrap();

    assert!(outcome.diagnostics.is_empty());
    let source = outcome.unit.expect("one admitted request emits a unit").source;

    assert!(source.contains("namespace Demo.Controls"));
    assert!(source.contains("partial class Widget"));
    // Generic argument wins over the default-value argument's type.
    assert!(source.contains("public int Foo"));
    assert!(source.contains("get => (int)GetValue(FooProperty);"));
    assert!(source.contains("set => SetValue(FooProperty, value);"));
    // Default present, no flags: the plain metadata constructor, with the
    // change handler wrapped to cast the target.
    assert!(source.contains(
        "var metadata = new PropertyMetadata(defaultValue, (d, e) => FooChanged((Widget)d, e), null);"
    ));
    assert!(source.contains("private static DependencyProperty RegisterFoo<TValue>(TValue defaultValue)"));
    assert!(source.contains(
        "return DependencyProperty.Register(\"Foo\", typeof(TValue), typeof(Widget), metadata);"
    ));
}

/// The worked attached scenario: keyed attached `Bar` narrowed to `Button`,
/// with no plain-token field on the owner.
fn overlay_bar_graph() -> (TestSymbolGraph, CandidateRequest) {
    let mut graph = TestSymbolGraph::new();
    let owner = graph.add_target_type("Overlay", "Demo.Controls");
    let button = graph.add_target_type("Button", "Demo.Controls");
    let key = graph.well_known(WellKnownType::DependencyPropertyKey);
    let field = graph.add_backing_field(owner, "BarPropertyKey", key, Accessibility::Internal);
    let site = graph.add_call_site(field).target_generic(button).finish();
    (graph, CandidateRequest::new(RegistrationKind::Attached, "Bar", site))
}

#[test]
fn keyed_attached_scenario_synthesizes_the_plain_token_and_accessors() {
    let (graph, candidate) = overlay_bar_graph();
    let outcome = Generator::new(&graph)
        .generate(&[candidate], &CancellationToken::new())
        .unwrap();
    let source = outcome.unit.unwrap().source;

    // The plain token is synthesized, public, initialized from the key.
    assert!(source.contains(
        "public static readonly DependencyProperty BarProperty = BarPropertyKey.DependencyProperty;"
    ));
    // Read accessibility from the plain token, write from the keyed token.
    assert!(source.contains("public static object GetBar(Button d) => d.GetValue(BarProperty);"));
    assert!(source.contains(
        "internal static void SetBar(Button d, object value) => d.SetValue(BarPropertyKey, value);"
    ));
    // Keyed attached registration, non-generic helper (nothing at the call
    // site could bind a type parameter).
    assert!(source.contains("private static DependencyPropertyKey RegisterBar()"));
    assert!(source.contains("PropertyMetadata metadata = null;"));
    assert!(source.contains(
        "return DependencyProperty.RegisterAttachedReadOnly(\"Bar\", typeof(object), typeof(Overlay), metadata);"
    ));
}

#[test]
fn keyed_instance_property_restricts_the_setter() {
    let mut graph = TestSymbolGraph::new();
    let owner = graph.add_target_type("Widget", "Demo.Controls");
    let int_type = graph.add_type("int", "System", None);
    let key = graph.well_known(WellKnownType::DependencyPropertyKey);
    let field = graph.add_backing_field(owner, "CountPropertyKey", key, Accessibility::Private);
    let site = graph.add_call_site(field).value_generic(int_type).finish();
    let candidate = CandidateRequest::new(RegistrationKind::Plain, "Count", site);

    let outcome = Generator::new(&graph)
        .generate(&[candidate], &CancellationToken::new())
        .unwrap();
    let source = outcome.unit.unwrap().source;

    assert!(source.contains("public int Count"));
    assert!(source.contains("get => (int)GetValue(CountProperty);"));
    assert!(source.contains("private set => SetValue(CountPropertyKey, value);"));
    assert!(source.contains(
        "public static readonly DependencyProperty CountProperty = CountPropertyKey.DependencyProperty;"
    ));
}

#[test]
fn flags_only_call_shape_emits_framework_metadata() {
    let mut graph = TestSymbolGraph::new();
    let owner = graph.add_target_type("Widget", "Demo.Controls");
    let dp = graph.well_known(WellKnownType::DependencyProperty);
    let options = graph.well_known(WellKnownType::MetadataOptions);
    let field = graph.add_backing_field(owner, "FooProperty", dp, Accessibility::Public);
    let site = graph
        .add_call_site(field)
        .arg(options, "FrameworkPropertyMetadataOptions.AffectsRender")
        .finish();
    let candidate = CandidateRequest::new(RegistrationKind::Plain, "Foo", site);

    let outcome = Generator::new(&graph)
        .generate(&[candidate], &CancellationToken::new())
        .unwrap();
    let source = outcome.unit.unwrap().source;

    assert!(source.contains(
        "private static DependencyProperty RegisterFoo(FrameworkPropertyMetadataOptions options)"
    ));
    assert!(source.contains(
        "var metadata = new FrameworkPropertyMetadata(default(object), options, null, null);"
    ));
}

#[test]
fn runs_are_idempotent() {
    let (graph, candidate) = widget_foo_graph();
    let generator = Generator::new(&graph);
    let first = generator
        .generate(&[candidate.clone()], &CancellationToken::new())
        .unwrap();
    let second = generator
        .generate(&[candidate], &CancellationToken::new())
        .unwrap();
    assert_eq!(first.unit, second.unit);
}

#[test]
fn cancellation_abandons_the_run() {
    let (graph, candidate) = widget_foo_graph();
    let token = CancellationToken::new();
    token.cancel();
    let result = Generator::new(&graph).generate(&[candidate], &token);
    assert!(matches!(result, Err(GenerateError::Cancelled)));
}

#[test]
fn no_candidates_emit_no_unit() {
    let (graph, _) = widget_foo_graph();
    let outcome = Generator::new(&graph)
        .generate(&[], &CancellationToken::new())
        .unwrap();
    assert!(outcome.unit.is_none());
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn missing_framework_types_abort_without_diagnostics() {
    let mut graph = TestSymbolGraph::without_well_known();
    let site = graph.add_dangling_site();
    let candidate = CandidateRequest::new(RegistrationKind::Plain, "Foo", site);
    let outcome = Generator::new(&graph)
        .generate(&[candidate], &CancellationToken::new())
        .unwrap();
    assert!(outcome.unit.is_none());
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn a_rejected_candidate_does_not_stop_the_rest() {
    let mut graph = TestSymbolGraph::new();
    let owner = graph.add_target_type("Widget", "Demo.Controls");
    let int_type = graph.add_type("int", "System", None);
    let dp = graph.well_known(WellKnownType::DependencyProperty);

    let bad_field = graph.add_field(
        owner,
        "BadProperty",
        dp,
        MemberModifiers::empty(),
        Accessibility::Public,
    );
    let bad_site = graph.add_call_site(bad_field).finish();

    let good_field = graph.add_backing_field(owner, "GoodProperty", dp, Accessibility::Public);
    let good_site = graph.add_call_site(good_field).value_generic(int_type).finish();

    let outcome = Generator::new(&graph)
        .generate(
            &[
                CandidateRequest::new(RegistrationKind::Plain, "Bad", bad_site),
                CandidateRequest::new(RegistrationKind::Plain, "Good", good_site),
            ],
            &CancellationToken::new(),
        )
        .unwrap();

    assert_eq!(outcome.diagnostics.len(), 1);
    let source = outcome.unit.unwrap().source;
    assert!(source.contains("public int Good"));
    assert!(!source.contains("Bad"));
}

#[test]
fn rejection_diagnostics_are_surfaced_at_warn_level() {
    let mut graph = TestSymbolGraph::new();
    let owner = graph.add_target_type("Widget", "Demo.Controls");
    let dp = graph.well_known(WellKnownType::DependencyProperty);
    let field = graph.add_field(
        owner,
        "BadProperty",
        dp,
        MemberModifiers::empty(),
        Accessibility::Public,
    );
    let site = graph.add_call_site(field).finish();
    let candidate = CandidateRequest::new(RegistrationKind::Plain, "Bad", site);

    let logger = RecordingLogger::default();
    Generator::new(&graph)
        .with_logger(&logger)
        .generate(&[candidate], &CancellationToken::new())
        .unwrap();

    let lines = logger.lines.lock().unwrap();
    let warns: Vec<_> = lines
        .iter()
        .filter(|(level, _)| *level == LogLevel::Warn)
        .collect();
    assert_eq!(warns.len(), 1);
    assert!(warns[0].1.contains("BadProperty"));
    assert!(warns[0].1.starts_with("DP981003:"));
}

#[test]
fn nullable_mode_annotates_the_null_metadata_declaration() {
    let mut graph = TestSymbolGraph::new();
    graph.set_nullable(true);
    let owner = graph.add_target_type("Widget", "Demo.Controls");
    let dp = graph.well_known(WellKnownType::DependencyProperty);
    let field = graph.add_backing_field(owner, "FooProperty", dp, Accessibility::Public);
    let site = graph.add_call_site(field).finish();
    let candidate = CandidateRequest::new(RegistrationKind::Plain, "Foo", site);

    let outcome = Generator::new(&graph)
        .generate(&[candidate], &CancellationToken::new())
        .unwrap();
    let source = outcome.unit.unwrap().source;
    assert!(source.contains("#nullable enable"));
    assert!(source.contains("PropertyMetadata? metadata = null;"));
}

#[test]
fn routed_event_handler_raises_the_event_with_casts() {
    let mut graph = TestSymbolGraph::new();
    let owner = graph.add_target_type("Widget", "Demo.Controls");
    let int_type = graph.add_type("int", "System", None);
    let dp = graph.well_known(WellKnownType::DependencyProperty);
    let routed = graph.well_known(WellKnownType::RoutedEvent);
    let field = graph.add_backing_field(owner, "FooProperty", dp, Accessibility::Public);
    graph.add_backing_field(owner, "FooChangedEvent", routed, Accessibility::Public);
    let site = graph
        .add_call_site(field)
        .value_generic(int_type)
        .arg(int_type, "0")
        .finish();
    let candidate = CandidateRequest::new(RegistrationKind::Plain, "Foo", site);

    let outcome = Generator::new(&graph)
        .generate(&[candidate], &CancellationToken::new())
        .unwrap();
    let source = outcome.unit.unwrap().source;
    assert!(source.contains(
        "(d, e) => ((Widget)d).RaiseEvent(new RoutedPropertyChangedEventArgs<int>((int)e.OldValue, (int)e.NewValue, FooChangedEvent))"
    ));
}
