//! Statement trees for emitted snippets.
//!
//! Encode and decode snippets are built from a handful of statement shapes.
//! Keeping them structured until the last moment lets tests walk the
//! control flow (which flag guards which assignment) directly.

use ssg_classify::ContainerShape;

use crate::runtime;
use crate::Capsule;

/// One output line, indented relative to the snippet's insertion depth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub depth: usize,
    pub text: String,
}

impl Line {
    pub fn new(depth: usize, text: impl Into<String>) -> Self {
        Line {
            depth,
            text: text.into(),
        }
    }
}

/// Which callback a primitive belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Live value into shadow, before serialization.
    Encode,
    /// Shadow into live value, after deserialization.
    Decode,
}

/// A runtime helper, identified by direction, container shape and capsule.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Primitive {
    pub direction: Direction,
    pub container: ContainerShape,
    pub capsule: Capsule,
}

impl Primitive {
    pub fn method_name(&self) -> String {
        let kind = self.capsule.primitive_suffix();
        match (self.direction, self.container) {
            (Direction::Encode, ContainerShape::None) => format!("OnBeforeSerialize{kind}"),
            (Direction::Encode, ContainerShape::Array | ContainerShape::List) => {
                format!("OnBeforeSerializeCollection{kind}")
            }
            (Direction::Decode, ContainerShape::None) => format!("OnAfterDeserialize{kind}"),
            (Direction::Decode, ContainerShape::Array) => format!("OnAfterDeserialize{kind}Array"),
            (Direction::Decode, ContainerShape::List) => format!("OnAfterDeserialize{kind}List"),
        }
    }
}

/// A call argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Arg {
    /// A variable or field, by value.
    Value(String),
    /// A field passed by `ref`, mutated in place by the callee.
    Ref(String),
    /// `typeof(T)`, the runtime type witness.
    TypeOf(String),
}

impl Arg {
    fn render(&self) -> String {
        match self {
            Arg::Value(name) => name.clone(),
            Arg::Ref(name) => format!("ref {name}"),
            Arg::TypeOf(ty) => format!("typeof({ty})"),
        }
    }
}

/// A call to a runtime primitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub primitive: Primitive,
    /// Explicit generic arguments, already joined (`string, int`).
    pub type_args: Option<String>,
    pub args: Vec<Arg>,
}

impl Call {
    pub fn render(&self) -> String {
        let args: Vec<String> = self.args.iter().map(Arg::render).collect();
        let type_args = self
            .type_args
            .as_ref()
            .map(|t| format!("<{t}>"))
            .unwrap_or_default();
        format!(
            "{}.{}{type_args}({})",
            runtime::UTIL,
            self.primitive.method_name(),
            args.join(", ")
        )
    }
}

/// Which flag value lets a guarded assignment run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Polarity {
    WhenTrue,
    WhenFalse,
}

/// Condition on a boolean local.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Guard {
    pub flag: String,
    pub polarity: Polarity,
}

impl Guard {
    pub fn when_true(flag: impl Into<String>) -> Self {
        Guard {
            flag: flag.into(),
            polarity: Polarity::WhenTrue,
        }
    }

    pub fn when_false(flag: impl Into<String>) -> Self {
        Guard {
            flag: flag.into(),
            polarity: Polarity::WhenFalse,
        }
    }

    /// Whether the guarded block runs for a given flag value.
    pub fn admits(&self, flag: bool) -> bool {
        match self.polarity {
            Polarity::WhenTrue => flag,
            Polarity::WhenFalse => !flag,
        }
    }

    fn condition(&self) -> String {
        match self.polarity {
            Polarity::WhenTrue => self.flag.clone(),
            Polarity::WhenFalse => format!("!{}", self.flag),
        }
    }
}

/// Statement shapes used by the emitters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    /// `(bool flag, value_ty value) = call;`
    Destructure {
        flag: String,
        value: String,
        value_ty: String,
        call: Call,
    },
    /// `call;`
    Invoke(Call),
    /// `if (target == null) { target = empty; }`
    DefaultIfNull { target: String, empty: String },
    /// `if (guard) { target = value; }`
    AssignIf {
        guard: Guard,
        target: String,
        value: String,
    },
}

impl Stmt {
    fn render_into(&self, out: &mut Vec<Line>) {
        match self {
            Stmt::Destructure {
                flag,
                value,
                value_ty,
                call,
            } => out.push(Line::new(
                0,
                format!("(bool {flag}, {value_ty} {value}) = {};", call.render()),
            )),
            Stmt::Invoke(call) => out.push(Line::new(0, format!("{};", call.render()))),
            Stmt::DefaultIfNull { target, empty } => {
                out.push(Line::new(0, format!("if ({target} == null)")));
                out.push(Line::new(0, "{"));
                out.push(Line::new(1, format!("{target} = {empty};")));
                out.push(Line::new(0, "}"));
            }
            Stmt::AssignIf {
                guard,
                target,
                value,
            } => {
                out.push(Line::new(0, format!("if ({})", guard.condition())));
                out.push(Line::new(0, "{"));
                out.push(Line::new(1, format!("{target} = {value};")));
                out.push(Line::new(0, "}"));
            }
        }
    }
}

/// Ordered statements for one member in one callback.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Snippet {
    pub stmts: Vec<Stmt>,
}

impl Snippet {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Snippet { stmts }
    }

    pub fn lines(&self) -> Vec<Line> {
        let mut out = Vec::with_capacity(self.stmts.len() * 4);
        for stmt in &self.stmts {
            stmt.render_into(&mut out);
        }
        out
    }

    /// The snippet as text, four spaces per relative depth level.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for line in self.lines() {
            for _ in 0..line.depth {
                text.push_str("    ");
            }
            text.push_str(&line.text);
            text.push('\n');
        }
        text
    }

    /// Assignments guarded by a flag, with the flag's polarity.
    pub fn guarded_assignments(&self) -> impl Iterator<Item = (&Guard, &str, &str)> {
        self.stmts.iter().filter_map(|stmt| match stmt {
            Stmt::AssignIf {
                guard,
                target,
                value,
            } => Some((guard, target.as_str(), value.as_str())),
            _ => None,
        })
    }
}
