//! Registry snapshot (registry.json): the serialized form of the two registry
//! queries, dumped by the engine.
//!
//! JSON shape:
//! {
//!   "operator_schemas": [
//!     {
//!       "name": "Abs",
//!       "domain": "",                       // "" is normalized downstream
//!       "inputs":  [{"name": "X", "type_str": "T"}],
//!       "outputs": [{"name": "Y", "type_str": "T"}]
//!     },
//!     ...
//!   ],
//!   "kernel_defs": [
//!     {
//!       "provider": "CPUExecutionProvider",
//!       "domain": "",
//!       "op_name": "Abs",
//!       "version_range": [6, 2147483647],    // inclusive; max=2147483647 => open-ended
//!       "type_constraints": {"T": ["tensor(float)", "tensor(double)"]}
//!     },
//!     ...
//!   ]
//! }
//!
//! Raw shapes are validated into a `Snapshot`, the file-backed `Registry`.

use crate::registry::{FormalParam, KernelDef, OperatorSchema, Registry};
use anyhow::{Context, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct RawSnapshot {
    #[serde(default)]
    pub operator_schemas: Vec<RawSchema>,

    #[serde(default)]
    pub kernel_defs: Vec<RawKernelDef>,
}

/// Raw schema record as it appears in registry.json.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSchema {
    pub name: String,

    #[serde(default)]
    pub domain: String,

    #[serde(default)]
    pub inputs: Vec<RawParam>,

    #[serde(default)]
    pub outputs: Vec<RawParam>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawParam {
    pub name: String,
    pub type_str: String,
}

/// Raw kernel definition record as it appears in registry.json.
#[derive(Debug, Clone, Deserialize)]
pub struct RawKernelDef {
    pub provider: String,

    #[serde(default)]
    pub domain: String,

    pub op_name: String,

    pub version_range: (i32, i32),

    #[serde(default)]
    pub type_constraints: BTreeMap<String, Vec<String>>,
}

/// Validated registry snapshot, held wholly in memory.
#[derive(Debug, Clone)]
pub struct Snapshot {
    schemas: Vec<OperatorSchema>,
    kernels: Vec<KernelDef>,
}

impl Registry for Snapshot {
    fn operator_schemas(&self) -> &[OperatorSchema] {
        &self.schemas
    }

    fn kernel_defs(&self) -> &[KernelDef] {
        &self.kernels
    }
}

impl Snapshot {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read registry snapshot {}", path.display()))?;
        let raw: RawSnapshot = serde_json::from_str(&text)
            .with_context(|| format!("parse registry snapshot {}", path.display()))?;
        raw.validate_and_build()
    }
}

impl RawSnapshot {
    /// Check record shapes and convert into the in-memory registry.
    ///
    /// Record order is preserved: downstream indexing keeps kernel defs in
    /// encounter order within each bucket.
    pub fn validate_and_build(self) -> anyhow::Result<Snapshot> {
        let mut schemas = Vec::with_capacity(self.operator_schemas.len());
        for (i, raw) in self.operator_schemas.into_iter().enumerate() {
            if raw.name.is_empty() {
                bail!("operator schema #{} has an empty name", i);
            }
            schemas.push(OperatorSchema {
                name: raw.name,
                domain: raw.domain,
                inputs: raw.inputs.into_iter().map(RawParam::into_param).collect(),
                outputs: raw.outputs.into_iter().map(RawParam::into_param).collect(),
            });
        }

        let mut kernels = Vec::with_capacity(self.kernel_defs.len());
        for (i, raw) in self.kernel_defs.into_iter().enumerate() {
            if raw.provider.is_empty() {
                bail!("kernel def #{} has an empty provider", i);
            }
            if raw.op_name.is_empty() {
                bail!("kernel def #{} has an empty op_name", i);
            }
            let (min, max) = raw.version_range;
            if min > max {
                bail!(
                    "kernel def #{} ({}) has inverted version range [{}, {}]",
                    i,
                    raw.op_name,
                    min,
                    max
                );
            }
            kernels.push(KernelDef {
                provider: raw.provider,
                domain: raw.domain,
                op_name: raw.op_name,
                version_range: raw.version_range,
                type_constraints: raw.type_constraints,
            });
        }

        Ok(Snapshot { schemas, kernels })
    }
}

impl RawParam {
    fn into_param(self) -> FormalParam {
        FormalParam {
            name: self.name,
            type_str: self.type_str,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_a_minimal_snapshot() {
        let raw: RawSnapshot = serde_json::from_str(
            r#"{
                "operator_schemas": [
                    {
                        "name": "Abs",
                        "domain": "",
                        "inputs":  [{"name": "X", "type_str": "T"}],
                        "outputs": [{"name": "Y", "type_str": "T"}]
                    }
                ],
                "kernel_defs": [
                    {
                        "provider": "CPUExecutionProvider",
                        "op_name": "Abs",
                        "version_range": [6, 2147483647],
                        "type_constraints": {"T": ["tensor(float)"]}
                    }
                ]
            }"#,
        )
        .unwrap();

        let snap = raw.validate_and_build().unwrap();
        assert_eq!(snap.operator_schemas().len(), 1);
        assert_eq!(snap.kernel_defs().len(), 1);

        let def = &snap.kernel_defs()[0];
        assert_eq!(def.provider, "CPUExecutionProvider");
        assert_eq!(def.domain, "");
        assert_eq!(def.version_range, (6, 2147483647));
        assert_eq!(
            def.type_constraints.get("T"),
            Some(&vec!["tensor(float)".to_string()])
        );
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let raw: RawSnapshot = serde_json::from_str("{}").unwrap();
        let snap = raw.validate_and_build().unwrap();
        assert_eq!(snap.operator_schemas().len(), 0);
        assert_eq!(snap.kernel_defs().len(), 0);
    }

    #[test]
    fn rejects_missing_version_range() {
        let err = serde_json::from_str::<RawSnapshot>(
            r#"{"kernel_defs": [{"provider": "CPUExecutionProvider", "op_name": "Abs"}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("version_range"));
    }

    #[test]
    fn rejects_inverted_version_range() {
        let raw: RawSnapshot = serde_json::from_str(
            r#"{"kernel_defs": [{
                "provider": "CPUExecutionProvider",
                "op_name": "Abs",
                "version_range": [7, 6]
            }]}"#,
        )
        .unwrap();
        let err = raw.validate_and_build().unwrap_err();
        assert!(err.to_string().contains("inverted version range"));
    }
}
