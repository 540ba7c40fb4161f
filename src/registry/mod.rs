//! Registry layer: operator schemas + kernel definitions.
//!
//! The registry is an external, already-populated data source. The generator
//! only reads it, through the `Registry` trait, so tests can supply a
//! fabricated in-memory registry instead of a snapshot file.

pub mod snapshot;

pub use snapshot::Snapshot;

use std::collections::BTreeMap;

/// Operators with an empty domain string are documented under this domain.
pub const DEFAULT_DOMAIN: &str = "ai.onnx.ml";

/// Sentinel upper bound meaning "applies to all later opset versions".
pub const UNBOUNDED_VERSION: i32 = 2147483647;

/// A named, typed input or output slot of an operator schema.
#[derive(Debug, Clone)]
pub struct FormalParam {
    pub name: String,
    pub type_str: String,
}

/// Abstract definition of an operator: name, domain, and typed I/O slots,
/// independent of any implementation.
#[derive(Debug, Clone)]
pub struct OperatorSchema {
    pub name: String,
    pub domain: String,
    pub inputs: Vec<FormalParam>,
    pub outputs: Vec<FormalParam>,
}

/// A concrete kernel implementation record: which provider implements which
/// operator, for which opset versions, with which concrete types per slot.
#[derive(Debug, Clone)]
pub struct KernelDef {
    pub provider: String,
    pub domain: String,
    pub op_name: String,
    /// Inclusive (min, max); max at `UNBOUNDED_VERSION` means open-ended.
    pub version_range: (i32, i32),
    /// Type-slot name -> concrete type strings the slot accepts.
    pub type_constraints: BTreeMap<String, Vec<String>>,
}

/// Read-only view of the operator registry.
pub trait Registry {
    fn operator_schemas(&self) -> &[OperatorSchema];
    fn kernel_defs(&self) -> &[KernelDef];
}

/// Normalize the empty domain to `DEFAULT_DOMAIN` for indexing and output.
pub fn effective_domain(domain: &str) -> &str {
    if domain.is_empty() { DEFAULT_DOMAIN } else { domain }
}
