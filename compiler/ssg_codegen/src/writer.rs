//! C# text assembly.
//!
//! [`SourceWriter`] is a plain line buffer. Every write takes the absolute
//! depth of the line, so nested scopes never share a mutable indentation
//! counter and the same output can be written from any starting depth.

use crate::{runtime, Line, NamespaceOutput, OutputItem, TypeOutput, UnitOutput};

const INDENT: &str = "    ";

/// Output buffer for generated source.
#[derive(Default)]
pub struct SourceWriter {
    output: String,
}

impl SourceWriter {
    pub fn new() -> Self {
        SourceWriter {
            output: String::with_capacity(4096),
        }
    }

    /// Write one line at `depth`.
    pub fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.output.push_str(INDENT);
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    /// Write lines carrying relative depth, anchored at `depth`.
    pub fn lines(&mut self, depth: usize, lines: &[Line]) {
        for line in lines {
            self.line(depth + line.depth, &line.text);
        }
    }

    pub fn blank_line(&mut self) {
        self.output.push('\n');
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    /// Take the generated output, leaving the buffer empty.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

/// Write one type, its members and nested types, at `depth`.
pub fn write_type(w: &mut SourceWriter, ty: &TypeOutput, depth: usize) {
    let mut header = ty.header.clone();
    if ty.implements_callbacks() {
        header.push_str(" : ");
        header.push_str(runtime::CALLBACK_RECEIVER);
    }
    for constraint in &ty.constraints {
        header.push(' ');
        header.push_str(constraint);
    }

    w.line(depth, &header);
    w.line(depth, "{");
    let body = depth + 1;

    if ty.implements_callbacks() {
        for shadow in &ty.shadows {
            w.lines(body, &shadow.lines());
        }

        w.line(body, "public void OnBeforeSerialize()");
        w.line(body, "{");
        for snippet in &ty.encode {
            w.lines(body + 1, &snippet.lines());
        }
        w.line(body, "}");

        w.line(body, "public void OnAfterDeserialize()");
        w.line(body, "{");
        for snippet in &ty.decode {
            w.lines(body + 1, &snippet.lines());
        }
        w.line(body, "}");
    }

    for nested in &ty.nested {
        write_type(w, nested, body);
    }
    w.line(depth, "}");
}

/// Write usings at the head of a scope. C# rejects a using directive that
/// follows any type or namespace in the same scope.
fn write_usings(w: &mut SourceWriter, usings: &[String], depth: usize) {
    for using in usings {
        w.line(depth, &format!("using {using};"));
    }
    if !usings.is_empty() {
        w.blank_line();
    }
}

fn write_items(w: &mut SourceWriter, items: &[OutputItem], depth: usize) {
    for item in items {
        match item {
            OutputItem::Type(ty) => write_type(w, ty, depth),
            OutputItem::Namespace(ns) => write_namespace(w, ns, depth),
        }
    }
}

fn write_namespace(w: &mut SourceWriter, ns: &NamespaceOutput, depth: usize) {
    w.line(depth, &format!("namespace {}", ns.name));
    w.line(depth, "{");
    write_usings(w, &ns.usings, depth + 1);
    write_items(w, &ns.items, depth + 1);
    w.line(depth, "}");
}

/// Render a whole file. Returns `None` when there is nothing to emit.
pub fn write_unit(unit: &UnitOutput) -> Option<String> {
    if unit.is_empty() {
        return None;
    }

    let mut w = SourceWriter::new();
    write_usings(&mut w, &unit.usings, 0);
    write_items(&mut w, &unit.items, 0);
    Some(w.take_output())
}
