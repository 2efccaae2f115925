//! Per-file generation: walk the namespaces and top-level types of one unit.

use ssg_ir::{Item, NamespaceDecl, SourceUnit, TypePool, WellKnown};

use crate::{EmitError, MemberAggregator, TypeOutput, MAX_NESTING_DEPTH};

/// Generated type or namespace, kept in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputItem {
    Type(TypeOutput),
    Namespace(NamespaceOutput),
}

/// Generated content for one namespace block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespaceOutput {
    pub name: String,
    pub usings: Vec<String>,
    pub items: Vec<OutputItem>,
}

/// Generated content for one source file.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct UnitOutput {
    pub usings: Vec<String>,
    pub items: Vec<OutputItem>,
    /// Types dropped because a member could not be classified.
    pub skipped: Vec<EmitError>,
}

impl UnitOutput {
    /// Whether the file has nothing to emit.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Top-level types, outside any namespace.
    pub fn types(&self) -> impl Iterator<Item = &TypeOutput> {
        self.items.iter().filter_map(|item| match item {
            OutputItem::Type(ty) => Some(ty),
            OutputItem::Namespace(_) => None,
        })
    }

    /// Top-level namespaces.
    pub fn namespaces(&self) -> impl Iterator<Item = &NamespaceOutput> {
        self.items.iter().filter_map(|item| match item {
            OutputItem::Namespace(ns) => Some(ns),
            OutputItem::Type(_) => None,
        })
    }
}

/// Generate everything for one unit.
///
/// Fails only on errors that abort the file; type-scoped failures are
/// collected in [`UnitOutput::skipped`].
#[tracing::instrument(level = "debug", skip_all, fields(path = %unit.path))]
pub fn generate_unit(
    pool: &TypePool,
    wk: &WellKnown,
    unit: &SourceUnit,
) -> Result<UnitOutput, EmitError> {
    let aggregator = MemberAggregator::new(pool, wk);
    let mut skipped = Vec::new();
    let items = items(&aggregator, &unit.items, 0, &mut skipped)?;

    tracing::debug!(items = items.len(), skipped = skipped.len(), "unit generated");
    Ok(UnitOutput {
        usings: unit.usings.clone(),
        items,
        skipped,
    })
}

/// Generate the items of one scope, dropping those with nothing to emit.
/// `depth` is the namespace nesting level of the scope.
fn items(
    aggregator: &MemberAggregator<'_>,
    decls: &[Item],
    depth: usize,
    skipped: &mut Vec<EmitError>,
) -> Result<Vec<OutputItem>, EmitError> {
    let mut out = Vec::with_capacity(decls.len());
    for decl in decls {
        let item = match decl {
            Item::Type(ty) => aggregator.aggregate(ty, "", 0, skipped)?.map(OutputItem::Type),
            Item::Namespace(ns) => {
                namespace(aggregator, ns, depth, skipped)?.map(OutputItem::Namespace)
            }
        };
        out.extend(item);
    }
    Ok(out)
}

fn namespace(
    aggregator: &MemberAggregator<'_>,
    ns: &NamespaceDecl,
    depth: usize,
    skipped: &mut Vec<EmitError>,
) -> Result<Option<NamespaceOutput>, EmitError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(EmitError::NestingTooDeep {
            type_name: ns.name.clone(),
            limit: MAX_NESTING_DEPTH,
        });
    }

    let items = items(aggregator, &ns.items, depth + 1, skipped)?;
    if items.is_empty() {
        return Ok(None);
    }
    Ok(Some(NamespaceOutput {
        name: ns.name.clone(),
        usings: ns.usings.clone(),
        items,
    }))
}
