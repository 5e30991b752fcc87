use gpusmi_types::{Compatibility, ValueMap};
use serde_json::Value;

/// Sections whose children always get the parent-key prefix under gpuvsmi
/// output, regardless of how many entries they hold.
const GPUV_PREFIXED_SECTIONS: [&str; 6] = ["asic", "bus", "pcie", "vbios", "board", "limit"];

/// Collapse a nested record into a single level of scalar/list values.
///
/// Join rules, per key:
/// - scalars and lists are copied unchanged (lists are never exploded)
/// - a map with more than one entry first folds each map-valued child into
///   `child_key + "_" + grandchild_key` pairs, then recurses on the result
/// - a map with exactly one entry is recursed into without a join prefix;
///   legacy output depends on this asymmetry, so it stays
/// - under gpuvsmi, children of the allow-listed sections always get the
///   `section_` prefix, even single-entry ones
///
/// Output key order follows first-encounter order during the walk.
pub fn flatten(record: &ValueMap, compat: Compatibility) -> ValueMap {
    let mut flat = ValueMap::new();

    for (key, value) in record {
        match value {
            Value::Object(children) => {
                let mut children = children.clone();

                if children.len() > 1 {
                    let mut joined = ValueMap::new();
                    for (child_key, child_value) in &children {
                        match child_value {
                            Value::Object(grandchildren) => {
                                for (grand_key, grand_value) in grandchildren {
                                    joined.insert(
                                        format!("{}_{}", child_key, grand_key),
                                        grand_value.clone(),
                                    );
                                }
                            }
                            other => {
                                joined.insert(child_key.clone(), other.clone());
                            }
                        }
                    }
                    children = joined;
                }

                if compat == Compatibility::GpuvSmi
                    && GPUV_PREFIXED_SECTIONS.contains(&key.as_str())
                {
                    let mut prefixed = ValueMap::new();
                    for (child_key, child_value) in &children {
                        prefixed.insert(format!("{}_{}", key, child_key), child_value.clone());
                    }
                    children = prefixed;
                }

                for (flat_key, flat_value) in flatten(&children, compat) {
                    flat.insert(flat_key, flat_value);
                }
            }
            other => {
                flat.insert(key.clone(), other.clone());
            }
        }
    }

    flat
}
