//! Attributes as seen by the generator.

use crate::TypeId;

/// A constructor argument of an applied attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrArg {
    /// `typeof(T)`, resolved.
    Type(TypeId),
    /// A string literal, unescaped.
    Str(String),
    Int(i64),
    /// Any other expression, as source text (`nameof(x)`, a constant).
    Expr(String),
}

/// An attribute applied to a member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeData {
    /// Resolved attribute class.
    pub class: TypeId,
    /// Positional constructor arguments, in source order.
    pub args: Vec<AttrArg>,
    /// Source text without the surrounding brackets, e.g. `Range(0, 10)`.
    pub text: String,
}

impl AttributeData {
    pub fn new(class: TypeId, text: impl Into<String>) -> Self {
        AttributeData {
            class,
            args: Vec::new(),
            text: text.into(),
        }
    }

    #[must_use]
    pub fn with_arg(mut self, arg: AttrArg) -> Self {
        self.args.push(arg);
        self
    }

    /// The single argument, if the attribute was applied with exactly one.
    pub fn single_arg(&self) -> Option<&AttrArg> {
        match self.args.as_slice() {
            [arg] => Some(arg),
            _ => None,
        }
    }
}
