//! Renderers over a registry [`Snapshot`](crate::registry::Snapshot).
//!
//! - `tree`: indented YAML-ish tree with folded name prefixes.
//! - `json`: flat, type-tagged JSON object keyed by exact metric name.
//!
//! Both read metric values through the capability-based attribute selection
//! in `attributes`.

pub mod attributes;
pub mod json;
pub mod name;
pub mod tree;

pub use attributes::{attributes_for, AttributeSet};
pub use json::render_json;
pub use name::{split_name, SegmentGroups, Separator};
pub use tree::{render_entries, render_tree, segment_cmp, tree_order, PathTreeWriter};
