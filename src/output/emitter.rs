//! C# renderer for the output AST.

use super::output_ast as o;

const INDENT_WITH: &str = "    ";

/// Indentation-tracking line builder.
pub struct EmitterContext {
    lines: Vec<String>,
    indent: usize,
}

impl EmitterContext {
    pub fn create_root() -> Self {
        Self {
            lines: Vec::new(),
            indent: 0,
        }
    }

    pub fn println(&mut self, line: &str) {
        if line.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines
                .push(format!("{}{}", INDENT_WITH.repeat(self.indent), line));
        }
    }

    pub fn inc_indent(&mut self) {
        self.indent += 1;
    }

    pub fn dec_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn to_source(&self) -> String {
        let mut source = self.lines.join("\n");
        source.push('\n');
        source
    }
}

pub struct CSharpEmitter;

impl CSharpEmitter {
    pub fn new() -> Self {
        Self
    }

    pub fn emit_expression(&self, expr: &o::Expression) -> String {
        match expr {
            o::Expression::ReadVar(name) => name.clone(),
            o::Expression::ReadProp { receiver, name } => {
                format!("{}.{}", self.emit_receiver(receiver), name)
            }
            o::Expression::LiteralStr(value) => format!("\"{}\"", escape_string(value)),
            o::Expression::Null => "null".to_string(),
            o::Expression::Default(ty) => format!("default({})", ty.display()),
            o::Expression::TypeOf(ty) => format!("typeof({})", ty.display()),
            o::Expression::Cast { to, expr } => {
                format!("({}){}", to.display(), self.emit_cast_operand(expr))
            }
            o::Expression::Invoke {
                receiver,
                name,
                args,
            } => {
                let rendered_args = self.emit_args(args);
                match receiver {
                    Some(receiver) => format!(
                        "{}.{}({})",
                        self.emit_receiver(receiver),
                        name,
                        rendered_args
                    ),
                    None => format!("{}({})", name, rendered_args),
                }
            }
            o::Expression::Instantiate {
                type_,
                args,
                initializers,
            } => {
                let mut out = format!("new {}({})", type_.display(), self.emit_args(args));
                if !initializers.is_empty() {
                    let inits = initializers
                        .iter()
                        .map(|(name, value)| format!("{} = {}", name, self.emit_expression(value)))
                        .collect::<Vec<_>>()
                        .join(", ");
                    out.push_str(&format!(" {{ {} }}", inits));
                }
                out
            }
            o::Expression::Lambda { params, body } => {
                format!("({}) => {}", params.join(", "), self.emit_expression(body))
            }
        }
    }

    fn emit_args(&self, args: &[o::Expression]) -> String {
        args.iter()
            .map(|a| self.emit_expression(a))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Receivers that are casts or lambdas need parentheses:
    /// `((Widget)d).OnFooChanged(e)`.
    fn emit_receiver(&self, receiver: &o::Expression) -> String {
        let rendered = self.emit_expression(receiver);
        match receiver {
            o::Expression::Cast { .. } | o::Expression::Lambda { .. } => format!("({})", rendered),
            _ => rendered,
        }
    }

    fn emit_cast_operand(&self, operand: &o::Expression) -> String {
        let rendered = self.emit_expression(operand);
        match operand {
            o::Expression::Lambda { .. } => format!("({})", rendered),
            _ => rendered,
        }
    }

    pub fn emit_statement(&self, stmt: &o::Statement, ctx: &mut EmitterContext) {
        match stmt {
            o::Statement::DeclareVar {
                name,
                var_type,
                value,
            } => {
                let declared = match var_type {
                    Some(ty) => ty.display(),
                    None => "var".to_string(),
                };
                ctx.println(&format!(
                    "{} {} = {};",
                    declared,
                    name,
                    self.emit_expression(value)
                ));
            }
            o::Statement::Return(value) => {
                ctx.println(&format!("return {};", self.emit_expression(value)));
            }
        }
    }

    pub fn emit_declaration(&self, decl: &o::Declaration, ctx: &mut EmitterContext) {
        match decl {
            o::Declaration::Field(field) => self.emit_field(field, ctx),
            o::Declaration::Property(property) => self.emit_property(property, ctx),
            o::Declaration::Method(method) => self.emit_method(method, ctx),
        }
    }

    fn emit_field(&self, field: &o::FieldDecl, ctx: &mut EmitterContext) {
        let mut line = field.accessibility.keyword().to_string();
        if field.is_static {
            line.push_str(" static");
        }
        if field.is_readonly {
            line.push_str(" readonly");
        }
        line.push_str(&format!(" {} {}", field.field_type.display(), field.name));
        if let Some(initializer) = &field.initializer {
            line.push_str(&format!(" = {}", self.emit_expression(initializer)));
        }
        line.push(';');
        ctx.println(&line);
    }

    fn emit_property(&self, property: &o::PropertyDecl, ctx: &mut EmitterContext) {
        ctx.println(&format!(
            "{} {} {}",
            property.accessibility.keyword(),
            property.value_type.display(),
            property.name
        ));
        ctx.println("{");
        ctx.inc_indent();
        ctx.println(&format!("get => {};", self.emit_expression(&property.getter)));
        if let Some(setter) = &property.setter {
            let prefix = setter
                .accessibility
                .map(|a| format!("{} ", a.keyword()))
                .unwrap_or_default();
            ctx.println(&format!(
                "{}set => {};",
                prefix,
                self.emit_expression(&setter.body)
            ));
        }
        ctx.dec_indent();
        ctx.println("}");
    }

    fn emit_method(&self, method: &o::MethodDecl, ctx: &mut EmitterContext) {
        let return_type = method
            .return_type
            .as_ref()
            .map(|t| t.display())
            .unwrap_or_else(|| "void".to_string());
        let type_params = if method.type_params.is_empty() {
            String::new()
        } else {
            format!("<{}>", method.type_params.join(", "))
        };
        let params = method
            .params
            .iter()
            .map(|p| format!("{} {}", p.param_type.display(), p.name))
            .collect::<Vec<_>>()
            .join(", ");
        let static_kw = if method.is_static { " static" } else { "" };
        let signature = format!(
            "{}{} {} {}{}({})",
            method.accessibility.keyword(),
            static_kw,
            return_type,
            method.name,
            type_params,
            params
        );
        match &method.body {
            o::MethodBody::Expression(expr) => {
                ctx.println(&format!("{} => {};", signature, self.emit_expression(expr)));
            }
            o::MethodBody::Block(statements) => {
                ctx.println(&signature);
                ctx.println("{");
                ctx.inc_indent();
                for stmt in statements {
                    self.emit_statement(stmt, ctx);
                }
                ctx.dec_indent();
                ctx.println("}");
            }
        }
    }
}

impl Default for CSharpEmitter {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
