//! What happens to each attribute of an annotated member.
//!
//! Attributes either stay on the live member only, or are carried over to
//! the shadow field. The decision is a closed set of outcomes, so callers
//! handle every case in one `match`.

use ssg_ir::{AttrArg, AttributeData, WellKnown};

use crate::SHADOW_SUFFIX;

/// Outcome for one attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrDisposition {
    /// Taken by the classifier as a signal; not carried over.
    Consumed,
    /// Bookkeeping the generator re-synthesizes or that means nothing on a
    /// shadow field; not carried over.
    Ignored,
    /// Carried over with different text.
    Rewritten(String),
    /// Carried over unchanged.
    Passthrough,
}

/// Decides dispositions for the attributes of one member, in order.
///
/// The identity marker is consumed at most once per member. A second
/// occurrence falls through to [`AttrDisposition::Passthrough`].
pub struct AttrFilter<'a> {
    wk: &'a WellKnown,
    identity_marker_seen: bool,
}

impl<'a> AttrFilter<'a> {
    pub fn new(wk: &'a WellKnown) -> Self {
        AttrFilter {
            wk,
            identity_marker_seen: false,
        }
    }

    /// Whether an identity marker with a `SerializeReference` argument was
    /// consumed.
    pub fn identity_marker_seen(&self) -> bool {
        self.identity_marker_seen
    }

    pub fn dispose(&mut self, attr: &AttributeData) -> AttrDisposition {
        let wk = self.wk;
        let class = attr.class;

        if class == wk.saints_serialized
            || class == wk.serialize_field
            || class == wk.non_serialized
            || class == wk.hide_in_inspector
        {
            return AttrDisposition::Ignored;
        }

        if class == wk.formerly_serialized_as {
            return match attr.single_arg().and_then(rename_to_shadow) {
                Some(text) => AttrDisposition::Rewritten(text),
                // The shadow must not inherit a rename it cannot suffix.
                None => AttrDisposition::Ignored,
            };
        }

        if class == wk.value_attribute && !self.identity_marker_seen {
            if let Some(AttrArg::Type(target)) = attr.single_arg() {
                if *target == wk.serialize_reference {
                    self.identity_marker_seen = true;
                    return AttrDisposition::Consumed;
                }
            }
        }

        AttrDisposition::Passthrough
    }
}

/// Rewrite a `FormerlySerializedAs` argument so the old key maps onto the
/// shadow field.
fn rename_to_shadow(arg: &AttrArg) -> Option<String> {
    const CLASS: &str = "global::UnityEngine.Serialization.FormerlySerializedAs";
    match arg {
        AttrArg::Str(old) => Some(format!(
            "{CLASS}(\"{}{SHADOW_SUFFIX}\")",
            escape_string_literal(old)
        )),
        AttrArg::Expr(expr) => Some(format!("{CLASS}({expr} + \"{SHADOW_SUFFIX}\")")),
        AttrArg::Type(_) | AttrArg::Int(_) => None,
    }
}

/// Escape text for use inside a regular C# string literal.
pub fn escape_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            _ => out.push(c),
        }
    }
    out
}
