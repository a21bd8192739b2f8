//! Structured output representation and its C# renderer.

pub mod emitter;
pub mod output_ast;
