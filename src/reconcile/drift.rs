use json_patch::PatchOperation;
use serde_json::Value;
use std::fmt::{self, Display, Write};

/// Single field which differs between stored and desired spec
#[derive(Debug, PartialEq)]
pub enum Drift {
    Added {
        path: String,
        desired: Value,
    },
    Removed {
        path: String,
        stored: Value,
    },
    Changed {
        path: String,
        stored: Value,
        desired: Value,
    },
}

impl Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { path, desired } => write!(f, "+ {} = {}", path, desired),
            Self::Removed { path, stored } => write!(f, "- {} = {}", path, stored),
            Self::Changed {
                path,
                stored,
                desired,
            } => write!(f, "r {}\n  - {}\n  + {}", path, stored, desired),
        }
    }
}

fn write_field(out: &mut String, n: &str) {
    if n.contains(|c: char| c == '"' || c == '.') {
        write!(out, ".\"{}\"", n.replace("\"", "\\\"")).unwrap()
    } else {
        write!(out, ".{}", n).unwrap()
    }
}

/// Render RFC 6901 pointer relative to spec as `.spec.field` path
fn spec_path(pointer: &str) -> String {
    let mut out = ".spec".to_owned();
    for part in pointer.split('/').skip(1) {
        write_field(&mut out, &part.replace("~1", "/").replace("~0", "~"));
    }
    out
}

fn lookup(value: &Value, pointer: &str) -> Value {
    value.pointer(pointer).cloned().unwrap_or(Value::Null)
}

/// List every field of `stored` spec which needs to change to become `desired`
pub fn drift(stored: &Value, desired: &Value) -> Vec<Drift> {
    json_patch::diff(stored, desired)
        .0
        .into_iter()
        .filter_map(|op| match op {
            PatchOperation::Add(a) => Some(Drift::Added {
                path: spec_path(&a.path),
                desired: a.value,
            }),
            PatchOperation::Remove(r) => Some(Drift::Removed {
                stored: lookup(stored, &r.path),
                path: spec_path(&r.path),
            }),
            PatchOperation::Replace(r) => Some(Drift::Changed {
                stored: lookup(stored, &r.path),
                path: spec_path(&r.path),
                desired: r.value,
            }),
            // move, copy and test carry no per-field values to report
            _ => None,
        })
        .collect()
}
