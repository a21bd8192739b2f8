//! Reflection over the host program's symbols.
//!
//! The synthesizer consumes pre-resolved symbol information through the
//! narrow [`SymbolGraph`] query surface and never parses source text itself.

mod host;
pub mod testing;

pub use host::{
    Accessibility, CallArgument, FieldSymbol, MemberModifiers, MemberSymbol, MethodSymbol,
    ParameterSymbol, SiteRef, SymbolGraph, TypeId, WellKnownType,
};
