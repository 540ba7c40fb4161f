//! Markdown emission.
//!
//! The document layout is load-bearing: downstream documentation sites consume
//! the generated file as-is, so heading text, column order, and the
//! cell-merging blanks are matched exactly, including the two `| |` separator
//! rows after every domain.

use crate::model;
use crate::registry::Registry;

const HEADER: &str = "## Supported Operators Data Types\n";

/// Fixed generation notice emitted under the title, reproduced verbatim so the
/// output is a drop-in replacement for the file it regenerates.
const GENERATION_NOTICE: &str = concat!(
    "*This file is automatically generated from the\n",
    "            [def files](/onnxruntime/core/providers/cpu/cpu_execution_provider.cc) via ",
    "[this script](/tools/python/gen_opkernel_doc.py).\n",
    "            Do not modify directly and instead edit operator definitions.*\n",
);

const TABLE_PREAMBLE: &str = concat!(
    "| Op Name | Parameters | OpSet Version | Types Supported |\n",
    "|---------|------------|---------------|-----------------|\n",
);

/// Render the full report for one registry snapshot.
///
/// Row cells merge visually: the op name and parameter cells appear only on
/// the operator's first row, and the version cell only on the first row for
/// that version range.
pub fn render_markdown(registry: &dyn Registry) -> String {
    let signatures = model::build_param_signatures(registry);
    let index = model::build_kernel_index(registry);

    let mut out = String::new();
    out.push_str(HEADER);
    out.push_str(GENERATION_NOTICE);
    out.push('\n');

    for (provider, domains) in &index {
        out.push_str("\n\n## Operators implemented by ");
        out.push_str(provider);
        out.push_str("\n\n");
        out.push_str(TABLE_PREAMBLE);

        for (domain, names) in domains {
            out.push_str("**Operator Domain:** *");
            out.push_str(domain);
            out.push_str("*\n");

            for (name, defs) in names {
                let version_types = model::build_version_type_index(defs);

                let mut name_cell_pending = true;
                for (version, slots) in &version_types {
                    let mut version_cell_pending = true;
                    for (slot, types) in slots {
                        if name_cell_pending {
                            name_cell_pending = false;
                            let params = model::format_param_cell(
                                signatures.get(&format!("{}.{}", domain, name)),
                            );
                            out.push('|');
                            out.push_str(name);
                            out.push('|');
                            out.push_str(&params);
                            out.push('|');
                        } else {
                            out.push_str("| | |");
                        }

                        if version_cell_pending {
                            version_cell_pending = false;
                            out.push_str(version);
                        }
                        out.push('|');

                        let joined = types.iter().copied().collect::<Vec<_>>().join(", ");
                        out.push_str("**");
                        out.push_str(slot);
                        out.push_str("** = ");
                        out.push_str(&joined);
                        out.push_str("|\n");
                    }
                }
            }

            // Visual separator between domain/provider sections.
            out.push_str("| |\n| |\n");
        }
    }

    out
}
