//! Emission planning.
//!
//! Groups synthesized requests by namespace, then by owning type, in
//! first-seen symbol-graph order, and renders the single aggregate unit.
//! Identical input always renders byte-identical output.

use indexmap::IndexMap;
use serde::Serialize;

use crate::output::emitter::{CSharpEmitter, EmitterContext};
use crate::output::output_ast as o;

/// One admitted request's synthesized declarations, tagged with its grouping
/// keys.
#[derive(Debug, Clone)]
pub struct SynthesizedRequest {
    pub namespace: String,
    pub owner_display: String,
    pub declarations: Vec<o::Declaration>,
}

/// The single aggregate output artifact of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedUnit {
    pub name: String,
    pub source: String,
}

/// Renders the aggregate unit, or `None` when no request was admitted.
pub fn plan(
    requests: Vec<SynthesizedRequest>,
    unit_name: &str,
    nullable: bool,
) -> Option<GeneratedUnit> {
    if requests.is_empty() {
        return None;
    }

    let mut groups: IndexMap<String, IndexMap<String, Vec<Vec<o::Declaration>>>> = IndexMap::new();
    for request in requests {
        groups
            .entry(request.namespace)
            .or_default()
            .entry(request.owner_display)
            .or_default()
            .push(request.declarations);
    }

    let emitter = CSharpEmitter::new();
    let mut ctx = EmitterContext::create_root();
    ctx.println("// <auto-generated/>");
    if nullable {
        ctx.println("#nullable enable");
    }
    ctx.println("using System;");
    ctx.println("using System.Windows;");

    for (namespace, types) in &groups {
        ctx.println("");
        let in_namespace = !namespace.is_empty();
        if in_namespace {
            ctx.println(&format!("namespace {}", namespace));
            ctx.println("{");
            ctx.inc_indent();
        }
        let mut first_type = true;
        for (owner, fragments) in types {
            if !first_type {
                ctx.println("");
            }
            first_type = false;
            ctx.println(&format!("partial class {}", owner));
            ctx.println("{");
            ctx.inc_indent();
            let mut first_decl = true;
            for declarations in fragments {
                for declaration in declarations {
                    if !first_decl {
                        ctx.println("");
                    }
                    first_decl = false;
                    emitter.emit_declaration(declaration, &mut ctx);
                }
            }
            ctx.dec_indent();
            ctx.println("}");
        }
        if in_namespace {
            ctx.dec_indent();
            ctx.println("}");
        }
    }

    Some(GeneratedUnit {
        name: unit_name.to_string(),
        source: ctx.to_source(),
    })
}
