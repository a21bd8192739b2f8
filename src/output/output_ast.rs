//! Output AST
//!
//! Structured representation of the declarations this tool synthesizes.
//! Synthesis stages build trees of these nodes; the emitter renders them to
//! source text at the very end, keeping formatting concerns out of the
//! classification logic.

use crate::reflection::Accessibility;

/// A type as it appears in synthesized source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    pub name: String,
    pub nullable: bool,
}

impl TypeNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nullable: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn display(&self) -> String {
        if self.nullable {
            format!("{}?", self.name)
        } else {
            self.name.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// A bare identifier; also used for method groups.
    ReadVar(String),
    /// `receiver.name`
    ReadProp {
        receiver: Box<Expression>,
        name: String,
    },
    /// A quoted string literal.
    LiteralStr(String),
    Null,
    /// `default(T)`
    Default(TypeNode),
    /// `typeof(T)`
    TypeOf(TypeNode),
    /// `(T)expr`
    Cast {
        to: TypeNode,
        expr: Box<Expression>,
    },
    /// `receiver.name(args)` or `name(args)`
    Invoke {
        receiver: Option<Box<Expression>>,
        name: String,
        args: Vec<Expression>,
    },
    /// `new T(args) { init = value, .. }`
    Instantiate {
        type_: TypeNode,
        args: Vec<Expression>,
        initializers: Vec<(String, Expression)>,
    },
    /// `(params) => body`
    Lambda {
        params: Vec<String>,
        body: Box<Expression>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `var name = value;` or `T name = value;`
    DeclareVar {
        name: String,
        var_type: Option<TypeNode>,
        value: Expression,
    },
    Return(Expression),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub is_readonly: bool,
    pub field_type: TypeNode,
    pub name: String,
    pub initializer: Option<Expression>,
}

/// An instance property with an expression-bodied getter and setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDecl {
    pub accessibility: Accessibility,
    pub value_type: TypeNode,
    pub name: String,
    pub getter: Expression,
    pub setter: Option<SetterDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetterDecl {
    /// Rendered only when more restrictive than the property itself.
    pub accessibility: Option<Accessibility>,
    pub body: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    pub name: String,
    pub param_type: TypeNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodBody {
    /// `=> expr;`
    Expression(Expression),
    Block(Vec<Statement>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub accessibility: Accessibility,
    pub is_static: bool,
    /// `None` means `void`.
    pub return_type: Option<TypeNode>,
    pub name: String,
    pub type_params: Vec<String>,
    pub params: Vec<ParamDecl>,
    pub body: MethodBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Field(FieldDecl),
    Property(PropertyDecl),
    Method(MethodDecl),
}

// Constructor helpers, in the style of the predefined-type helpers of the
// output AST this module is patterned on.

pub fn read_var(name: impl Into<String>) -> Expression {
    Expression::ReadVar(name.into())
}

pub fn read_prop(receiver: Expression, name: impl Into<String>) -> Expression {
    Expression::ReadProp {
        receiver: Box::new(receiver),
        name: name.into(),
    }
}

pub fn literal_str(value: impl Into<String>) -> Expression {
    Expression::LiteralStr(value.into())
}

pub fn cast(to: TypeNode, expr: Expression) -> Expression {
    Expression::Cast {
        to,
        expr: Box::new(expr),
    }
}

pub fn invoke(name: impl Into<String>, args: Vec<Expression>) -> Expression {
    Expression::Invoke {
        receiver: None,
        name: name.into(),
        args,
    }
}

pub fn invoke_on(receiver: Expression, name: impl Into<String>, args: Vec<Expression>) -> Expression {
    Expression::Invoke {
        receiver: Some(Box::new(receiver)),
        name: name.into(),
        args,
    }
}

pub fn instantiate(type_: TypeNode, args: Vec<Expression>) -> Expression {
    Expression::Instantiate {
        type_,
        args,
        initializers: Vec::new(),
    }
}

pub fn instantiate_with_init(
    type_: TypeNode,
    args: Vec<Expression>,
    initializers: Vec<(String, Expression)>,
) -> Expression {
    Expression::Instantiate {
        type_,
        args,
        initializers,
    }
}

pub fn lambda(params: &[&str], body: Expression) -> Expression {
    Expression::Lambda {
        params: params.iter().map(|p| p.to_string()).collect(),
        body: Box::new(body),
    }
}

pub fn type_node(name: impl Into<String>) -> TypeNode {
    TypeNode::new(name)
}
