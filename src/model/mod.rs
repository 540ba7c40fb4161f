//! Grouping model: derived indexes over the registry snapshot.
//!
//! Two passes over the registry build everything the renderer needs:
//! parameter-signature sets keyed by `domain.name`, and the
//! provider -> domain -> op name kernel index. `BTreeMap`/`BTreeSet` keys give
//! the lexicographic iteration order the report requires.

use crate::registry::{KernelDef, OperatorSchema, Registry, UNBOUNDED_VERSION, effective_domain};
use std::collections::{BTreeMap, BTreeSet};

/// Distinct rendered `(inputs, outputs)` signatures per `domain.name`.
/// A set because multiple schema overloads may exist for the same name.
pub type ParamSignatures = BTreeMap<String, BTreeSet<String>>;

/// provider -> domain -> op name -> kernel defs in encounter order.
pub type KernelIndex<'a> =
    BTreeMap<&'a str, BTreeMap<&'a str, BTreeMap<&'a str, Vec<&'a KernelDef>>>>;

/// formatted version range -> type-slot name -> union of accepted type strings.
pub type VersionTypeIndex<'a> = BTreeMap<String, BTreeMap<&'a str, BTreeSet<&'a str>>>;

/// Render a version range for the OpSet Version column.
///
/// An upper bound at the sentinel (i32 max) means the kernel applies to all
/// later opset versions and is rendered `"<min>+"`; bounded ranges render as
/// `"[<min>, <max>]"`.
pub fn format_version_range(range: (i32, i32)) -> String {
    let (min, max) = range;
    if max >= UNBOUNDED_VERSION {
        format!("{}+", min)
    } else {
        format!("[{}, {}]", min, max)
    }
}

/// Render one schema overload's parameter signature: inputs then outputs in
/// declaration order, comma-joined, parenthesized.
fn format_param_signature(schema: &OperatorSchema) -> String {
    let mut parts = Vec::with_capacity(schema.inputs.len() + schema.outputs.len());
    for inp in &schema.inputs {
        parts.push(format!("*in* {}:**{}**", inp.name, inp.type_str));
    }
    for outp in &schema.outputs {
        parts.push(format!("*out* {}:**{}**", outp.name, outp.type_str));
    }
    format!("({})", parts.join(", "))
}

/// Render the Parameters cell: all overload signatures for the operator,
/// joined with `" or "` in lexicographic order. No signatures -> empty cell.
pub fn format_param_cell(signatures: Option<&BTreeSet<String>>) -> String {
    match signatures {
        Some(set) => set.iter().cloned().collect::<Vec<_>>().join(" or "),
        None => String::new(),
    }
}

/// First collection pass: one signature set per `domain.name`.
pub fn build_param_signatures(registry: &dyn Registry) -> ParamSignatures {
    let mut index = ParamSignatures::new();
    for schema in registry.operator_schemas() {
        let fullname = format!("{}.{}", effective_domain(&schema.domain), schema.name);
        index
            .entry(fullname)
            .or_default()
            .insert(format_param_signature(schema));
    }
    index
}

/// Second collection pass: bucket every kernel def under its
/// (provider, domain, op name), preserving encounter order within a bucket.
pub fn build_kernel_index(registry: &dyn Registry) -> KernelIndex<'_> {
    let mut index = KernelIndex::new();
    for def in registry.kernel_defs() {
        index
            .entry(def.provider.as_str())
            .or_default()
            .entry(effective_domain(&def.domain))
            .or_default()
            .entry(def.op_name.as_str())
            .or_default()
            .push(def);
    }
    index
}

/// Collapse one operator's kernel defs into version -> slot -> type-set rows.
/// Defs that format to the same version range merge their type strings.
pub fn build_version_type_index<'a>(kernels: &[&'a KernelDef]) -> VersionTypeIndex<'a> {
    let mut index = VersionTypeIndex::new();
    for def in kernels {
        let version = format_version_range(def.version_range);
        let slots = index.entry(version).or_default();
        for (slot, types) in &def.type_constraints {
            let set = slots.entry(slot.as_str()).or_default();
            for t in types {
                set.insert(t.as_str());
            }
        }
    }
    index
}
