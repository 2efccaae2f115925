//! Per-type aggregation of shadow fields and callback snippets.

use ssg_classify::Classifier;
use ssg_ir::{TypeDecl, TypePool, WellKnown};

use crate::{
    emit_decode, emit_encode, synthesize_shadow, EmitError, Encloser, ShadowField, Snippet,
};

/// Deepest type nesting accepted before giving up on a file.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Everything generated for one partial type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeOutput {
    /// Dotted path from the outermost type, for diagnostics.
    pub path: String,
    /// Declaration up to and including type parameters,
    /// e.g. `public partial class Cache<T>`.
    pub header: String,
    /// Constraint clauses, re-emitted after the base list.
    pub constraints: Vec<String>,
    /// Shadow fields in member declaration order.
    pub shadows: Vec<ShadowField>,
    /// Encode snippets, one per shadow, same order.
    pub encode: Vec<Snippet>,
    /// Decode snippets, one per shadow, same order.
    pub decode: Vec<Snippet>,
    pub nested: Vec<TypeOutput>,
}

impl TypeOutput {
    /// Whether this type gets the callback interface and the two routines.
    pub fn implements_callbacks(&self) -> bool {
        !self.shadows.is_empty()
    }
}

#[derive(Default)]
struct MemberBody {
    shadows: Vec<ShadowField>,
    encode: Vec<Snippet>,
    decode: Vec<Snippet>,
}

/// Walks the members of a type, and of its nested types, producing one
/// [`TypeOutput`] per type that has something to emit.
pub struct MemberAggregator<'a> {
    pool: &'a TypePool,
    classifier: Classifier<'a>,
}

impl<'a> MemberAggregator<'a> {
    pub fn new(pool: &'a TypePool, wk: &'a WellKnown) -> Self {
        MemberAggregator {
            pool,
            classifier: Classifier::new(pool, wk),
        }
    }

    /// Aggregate a type declared at nesting `depth` inside `outer` (empty for
    /// top-level types).
    ///
    /// A member whose type cannot be classified removes this type's own body
    /// from the output; the error goes to `skipped` and nested types are
    /// still generated. Any other error is returned and fails the file.
    #[tracing::instrument(level = "debug", skip_all, fields(ty = %decl.name, depth = depth))]
    pub fn aggregate(
        &self,
        decl: &TypeDecl,
        outer: &str,
        depth: usize,
        skipped: &mut Vec<EmitError>,
    ) -> Result<Option<TypeOutput>, EmitError> {
        let path = if outer.is_empty() {
            decl.name.clone()
        } else {
            format!("{outer}.{}", decl.name)
        };

        if depth > MAX_NESTING_DEPTH {
            return Err(EmitError::NestingTooDeep {
                type_name: path,
                limit: MAX_NESTING_DEPTH,
            });
        }

        if !decl.is_partial() {
            tracing::debug!(ty = %path, "not partial, skipped");
            return Ok(None);
        }

        let mut nested = Vec::new();
        for inner in &decl.nested {
            if let Some(output) = self.aggregate(inner, &path, depth + 1, skipped)? {
                nested.push(output);
            }
        }

        let body = match self.members(decl, &path) {
            Ok(body) => body,
            Err(err) if err.is_type_scoped() => {
                tracing::warn!(ty = %path, error = %err, "type skipped");
                skipped.push(err);
                MemberBody::default()
            }
            Err(err) => return Err(err),
        };

        if body.shadows.is_empty() && nested.is_empty() {
            return Ok(None);
        }

        Ok(Some(TypeOutput {
            path,
            header: header(decl),
            constraints: decl.constraints.clone(),
            shadows: body.shadows,
            encode: body.encode,
            decode: body.decode,
            nested,
        }))
    }

    fn members(&self, decl: &TypeDecl, path: &str) -> Result<MemberBody, EmitError> {
        let encloser = if decl.is_reference_type() {
            Encloser::Reference
        } else {
            Encloser::Value
        };

        let mut body = MemberBody::default();
        for member in decl.members.iter().filter(|m| self.classifier.is_annotated(m)) {
            let cls = self
                .classifier
                .classify_member(member)
                .map_err(|source| EmitError::Classify {
                    type_name: path.to_owned(),
                    member: member.name.clone(),
                    source,
                })?;
            tracing::debug!(
                member = %member.name,
                container = %cls.container(),
                kind = %cls.kind(),
                identity = cls.preserves_identity(),
                "classified"
            );

            body.shadows
                .push(synthesize_shadow(self.pool, &member.name, &cls, encloser)?);
            body.encode.push(emit_encode(self.pool, &member.name, &cls)?);
            body.decode.push(emit_decode(self.pool, &member.name, &cls)?);
        }
        Ok(body)
    }
}

/// `[accessibility] [modifiers] class|struct Name[<T, ..>]`
fn header(decl: &TypeDecl) -> String {
    let mut parts: Vec<&str> = Vec::new();
    parts.extend(decl.accessibility.keyword());
    parts.extend(decl.modifiers.keywords());
    parts.push(decl.kind.keyword());

    let mut header = parts.join(" ");
    header.push(' ');
    header.push_str(&decl.name);
    if !decl.type_params.is_empty() {
        header.push('<');
        header.push_str(&decl.type_params.join(", "));
        header.push('>');
    }
    header
}
