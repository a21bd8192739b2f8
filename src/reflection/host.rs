use bitflags::bitflags;
use smallvec::SmallVec;
use std::fmt;

/// Opaque identity of a type in the host program. Two `TypeId`s compare
/// equal exactly when the host considers the types identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct TypeId(pub u32);

/// Reference to a registration call site discovered by the syntactic scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct SiteRef(pub u32);

/// Declared accessibility of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Accessibility {
    Public,
    Internal,
    Protected,
    Private,
}

impl Accessibility {
    pub fn keyword(&self) -> &'static str {
        match self {
            Accessibility::Public => "public",
            Accessibility::Internal => "internal",
            Accessibility::Protected => "protected",
            Accessibility::Private => "private",
        }
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

bitflags! {
    /// Modifier flags on a member declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MemberModifiers: u8 {
        const STATIC = 1 << 0;
        const READONLY = 1 << 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSymbol {
    pub name: String,
    pub param_type: TypeId,
}

impl ParameterSymbol {
    pub fn new(name: impl Into<String>, param_type: TypeId) -> Self {
        Self {
            name: name.into(),
            param_type,
        }
    }
}

/// A field declared on a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSymbol {
    pub name: String,
    pub declared_type: TypeId,
    pub modifiers: MemberModifiers,
    pub accessibility: Accessibility,
    pub containing_type: TypeId,
}

impl FieldSymbol {
    pub fn is_static_readonly(&self) -> bool {
        self.modifiers
            .contains(MemberModifiers::STATIC | MemberModifiers::READONLY)
    }
}

/// A method declared on a type. `return_type` of `None` means `void`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSymbol {
    pub name: String,
    pub return_type: Option<TypeId>,
    pub parameters: SmallVec<[ParameterSymbol; 2]>,
    pub modifiers: MemberModifiers,
    pub accessibility: Accessibility,
}

impl MethodSymbol {
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(MemberModifiers::STATIC)
    }

    pub fn is_void(&self) -> bool {
        self.return_type.is_none()
    }
}

/// A member of a type, in declaration order when enumerated through
/// [`SymbolGraph::members_of`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberSymbol {
    Field(FieldSymbol),
    Method(MethodSymbol),
}

/// A positional argument at a registration call site: its statically known
/// type plus the original source text. The text is kept on the admitted
/// request so the host can rewrite the abbreviated call against the
/// synthesized helper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallArgument {
    pub static_type: TypeId,
    pub text: String,
}

impl CallArgument {
    pub fn new(static_type: TypeId, text: impl Into<String>) -> Self {
        Self {
            static_type,
            text: text.into(),
        }
    }
}

/// The framework types the synthesizer needs to recognize in the host
/// program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownType {
    /// `DependencyProperty`, the plain registration token.
    DependencyProperty,
    /// `DependencyPropertyKey`, the restricted-write registration token.
    DependencyPropertyKey,
    /// `DependencyObject`, the most general target-object type.
    DependencyObject,
    /// `DependencyPropertyChangedEventArgs`.
    ChangedEventArgs,
    /// `FrameworkPropertyMetadataOptions`, the metadata flags type.
    MetadataOptions,
    /// `RoutedEvent`.
    RoutedEvent,
    /// `object`, the universal top type.
    Object,
}

/// Read-only query surface over the host program's symbols.
///
/// The synthesizer never embeds a real symbol system; any front end that can
/// answer these questions (type identity, declaration-ordered member
/// enumeration, base-type walk, call-site facts, well-known type lookup) can
/// drive it. The graph is immutable for the duration of one resolution run.
pub trait SymbolGraph {
    /// Resolves the field declaration enclosing a registration call site.
    fn resolve_enclosing_field(&self, site: SiteRef) -> Option<&FieldSymbol>;

    /// Members of `ty`, in declaration order.
    fn members_of(&self, ty: TypeId) -> &[MemberSymbol];

    /// Direct base type of `ty`, if any.
    fn base_type_of(&self, ty: TypeId) -> Option<TypeId>;

    /// The explicit value-type generic argument at the call site, if one was
    /// written.
    fn generic_value_argument_of(&self, site: SiteRef) -> Option<TypeId>;

    /// The explicit target-type generic argument at an attached registration
    /// call site, if one was written (the narrowing type).
    fn generic_target_argument_of(&self, site: SiteRef) -> Option<TypeId>;

    /// Positional arguments at the call site (0, 1 or 2).
    fn call_arguments_of(&self, site: SiteRef) -> &[CallArgument];

    /// Display name of a type, as it should appear in synthesized source.
    fn type_display(&self, ty: TypeId) -> &str;

    /// Containing namespace of a type; empty string for the global
    /// namespace.
    fn namespace_of(&self, ty: TypeId) -> &str;

    /// Looks up one of the framework types this tool recognizes.
    fn lookup_well_known(&self, ty: WellKnownType) -> Option<TypeId>;

    /// Whether the host compilation has nullable annotations enabled.
    fn nullable_enabled(&self) -> bool {
        false
    }

    fn types_equal(&self, a: TypeId, b: TypeId) -> bool {
        a == b
    }

    /// Walks the base-type chain starting at `from` (inclusive) and reports
    /// whether `target` appears on it.
    fn is_on_base_chain(&self, from: TypeId, target: TypeId) -> bool {
        let mut current = Some(from);
        while let Some(ty) = current {
            if self.types_equal(ty, target) {
                return true;
            }
            current = self.base_type_of(ty);
        }
        false
    }
}
