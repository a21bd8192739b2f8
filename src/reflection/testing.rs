//! In-memory symbol graph for specs.

use std::collections::HashMap;

use super::host::{
    Accessibility, CallArgument, FieldSymbol, MemberModifiers, MemberSymbol, MethodSymbol,
    ParameterSymbol, SiteRef, SymbolGraph, TypeId, WellKnownType,
};

struct TypeData {
    display: String,
    namespace: String,
    base: Option<TypeId>,
}

#[derive(Default)]
struct SiteData {
    field: Option<FieldSymbol>,
    value_generic: Option<TypeId>,
    target_generic: Option<TypeId>,
    args: Vec<CallArgument>,
}

/// A hand-assembled symbol graph. Seeds the framework well-known types on
/// construction; everything else is added by the test.
pub struct TestSymbolGraph {
    types: Vec<TypeData>,
    members: HashMap<TypeId, Vec<MemberSymbol>>,
    well_known: HashMap<WellKnownType, TypeId>,
    sites: Vec<SiteData>,
    nullable: bool,
}

impl TestSymbolGraph {
    pub fn new() -> Self {
        let mut graph = Self {
            types: Vec::new(),
            members: HashMap::new(),
            well_known: HashMap::new(),
            sites: Vec::new(),
            nullable: false,
        };
        graph.seed_well_known();
        graph
    }

    /// A graph with no framework types registered, for exercising the
    /// missing-environment path.
    pub fn without_well_known() -> Self {
        Self {
            types: Vec::new(),
            members: HashMap::new(),
            well_known: HashMap::new(),
            sites: Vec::new(),
            nullable: false,
        }
    }

    fn seed_well_known(&mut self) {
        let object = self.add_type("object", "System", None);
        let dependency_object = self.add_type("DependencyObject", "System.Windows", Some(object));
        let entries = [
            (WellKnownType::Object, object),
            (WellKnownType::DependencyObject, dependency_object),
        ];
        for (kind, ty) in entries {
            self.well_known.insert(kind, ty);
        }
        for (kind, name) in [
            (WellKnownType::DependencyProperty, "DependencyProperty"),
            (WellKnownType::DependencyPropertyKey, "DependencyPropertyKey"),
            (
                WellKnownType::ChangedEventArgs,
                "DependencyPropertyChangedEventArgs",
            ),
            (
                WellKnownType::MetadataOptions,
                "FrameworkPropertyMetadataOptions",
            ),
            (WellKnownType::RoutedEvent, "RoutedEvent"),
        ] {
            let ty = self.add_type(name, "System.Windows", None);
            self.well_known.insert(kind, ty);
        }
    }

    pub fn set_nullable(&mut self, nullable: bool) {
        self.nullable = nullable;
    }

    pub fn well_known(&self, kind: WellKnownType) -> TypeId {
        self.well_known[&kind]
    }

    pub fn add_type(
        &mut self,
        display: impl Into<String>,
        namespace: impl Into<String>,
        base: Option<TypeId>,
    ) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeData {
            display: display.into(),
            namespace: namespace.into(),
            base,
        });
        id
    }

    /// A type deriving from `DependencyObject`, the common case for owners
    /// and narrowing types.
    pub fn add_target_type(&mut self, display: impl Into<String>, namespace: impl Into<String>) -> TypeId {
        let base = self.well_known(WellKnownType::DependencyObject);
        self.add_type(display, namespace, Some(base))
    }

    pub fn add_field(
        &mut self,
        owner: TypeId,
        name: impl Into<String>,
        declared_type: TypeId,
        modifiers: MemberModifiers,
        accessibility: Accessibility,
    ) -> FieldSymbol {
        let field = FieldSymbol {
            name: name.into(),
            declared_type,
            modifiers,
            accessibility,
            containing_type: owner,
        };
        self.members
            .entry(owner)
            .or_default()
            .push(MemberSymbol::Field(field.clone()));
        field
    }

    /// A `static readonly` field, the shape every backing field must have.
    pub fn add_backing_field(
        &mut self,
        owner: TypeId,
        name: impl Into<String>,
        declared_type: TypeId,
        accessibility: Accessibility,
    ) -> FieldSymbol {
        self.add_field(
            owner,
            name,
            declared_type,
            MemberModifiers::STATIC | MemberModifiers::READONLY,
            accessibility,
        )
    }

    pub fn add_method(
        &mut self,
        owner: TypeId,
        name: impl Into<String>,
        return_type: Option<TypeId>,
        parameters: Vec<(&str, TypeId)>,
        modifiers: MemberModifiers,
    ) {
        let method = MethodSymbol {
            name: name.into(),
            return_type,
            parameters: parameters
                .into_iter()
                .map(|(name, ty)| ParameterSymbol::new(name, ty))
                .collect(),
            modifiers,
            accessibility: Accessibility::Private,
        };
        self.members
            .entry(owner)
            .or_default()
            .push(MemberSymbol::Method(method));
    }

    pub fn add_static_method(
        &mut self,
        owner: TypeId,
        name: impl Into<String>,
        return_type: Option<TypeId>,
        parameters: Vec<(&str, TypeId)>,
    ) {
        self.add_method(owner, name, return_type, parameters, MemberModifiers::STATIC);
    }

    pub fn add_instance_method(
        &mut self,
        owner: TypeId,
        name: impl Into<String>,
        return_type: Option<TypeId>,
        parameters: Vec<(&str, TypeId)>,
    ) {
        self.add_method(owner, name, return_type, parameters, MemberModifiers::empty());
    }

    pub fn add_call_site(&mut self, field: FieldSymbol) -> SiteBuilder<'_> {
        let site = SiteRef(self.sites.len() as u32);
        self.sites.push(SiteData {
            field: Some(field),
            ..SiteData::default()
        });
        SiteBuilder { graph: self, site }
    }

    /// A call site whose enclosing field cannot be resolved.
    pub fn add_dangling_site(&mut self) -> SiteRef {
        let site = SiteRef(self.sites.len() as u32);
        self.sites.push(SiteData::default());
        site
    }
}

impl Default for TestSymbolGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Fluent configuration of one call site.
pub struct SiteBuilder<'a> {
    graph: &'a mut TestSymbolGraph,
    site: SiteRef,
}

impl SiteBuilder<'_> {
    fn data(&mut self) -> &mut SiteData {
        &mut self.graph.sites[self.site.0 as usize]
    }

    pub fn value_generic(mut self, ty: TypeId) -> Self {
        self.data().value_generic = Some(ty);
        self
    }

    pub fn target_generic(mut self, ty: TypeId) -> Self {
        self.data().target_generic = Some(ty);
        self
    }

    pub fn arg(mut self, static_type: TypeId, text: &str) -> Self {
        self.data().args.push(CallArgument::new(static_type, text));
        self
    }

    pub fn finish(self) -> SiteRef {
        self.site
    }
}

impl SymbolGraph for TestSymbolGraph {
    fn resolve_enclosing_field(&self, site: SiteRef) -> Option<&FieldSymbol> {
        self.sites.get(site.0 as usize)?.field.as_ref()
    }

    fn members_of(&self, ty: TypeId) -> &[MemberSymbol] {
        self.members.get(&ty).map(Vec::as_slice).unwrap_or(&[])
    }

    fn base_type_of(&self, ty: TypeId) -> Option<TypeId> {
        self.types.get(ty.0 as usize)?.base
    }

    fn generic_value_argument_of(&self, site: SiteRef) -> Option<TypeId> {
        self.sites.get(site.0 as usize)?.value_generic
    }

    fn generic_target_argument_of(&self, site: SiteRef) -> Option<TypeId> {
        self.sites.get(site.0 as usize)?.target_generic
    }

    fn call_arguments_of(&self, site: SiteRef) -> &[CallArgument] {
        self.sites
            .get(site.0 as usize)
            .map(|s| s.args.as_slice())
            .unwrap_or(&[])
    }

    fn type_display(&self, ty: TypeId) -> &str {
        &self.types[ty.0 as usize].display
    }

    fn namespace_of(&self, ty: TypeId) -> &str {
        &self.types[ty.0 as usize].namespace
    }

    fn lookup_well_known(&self, ty: WellKnownType) -> Option<TypeId> {
        self.well_known.get(&ty).copied()
    }

    fn nullable_enabled(&self) -> bool {
        self.nullable
    }
}
