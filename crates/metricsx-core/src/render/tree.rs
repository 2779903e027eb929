//! Hierarchical text rendering with folded name prefixes.
//!
//! Entries are rendered in segment order (see [`tree_order`]); then every
//! entry that shares a prefix with its predecessor is contiguous and "header
//! already written" reduces to "the previous entry starts with the same
//! segments". The writer keeps only the previous entry's segments (the
//! cursor) and never builds a tree.
//!
//! ```text
//! aaa.bbb.ccc.ddd = 1          aaa:
//! aaa.bbb.ccc.eee = 2            bbb:
//! aaa.bbb.ggg     = 4    =>        ccc:
//! aaa.iii         = 0                ddd: 1
//!                                    eee: 2
//!                                  ggg: 4
//!                                iii: 0
//! ```
//!
//! Segments are compared together with their separator class, so `a.b/c` and
//! `a/b.c` never share more than `a`. Input in any other order is rendered
//! without losing entries, but a prefix interrupted by an unrelated name gets
//! its header written again.

use std::cmp::Ordering;
use std::fmt::{self, Write};

use crate::metric::Metric;
use crate::registry::Snapshot;

use super::attributes::attributes_for;
use super::name::{split_name, Separator};

const INDENT_STEP: &str = "  ";

/// Single-pass writer; one instance per render.
pub struct PathTreeWriter<W> {
    out: W,
    last: Vec<(Separator, String)>,
}

impl<W: Write> PathTreeWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: Vec::new() }
    }

    pub fn write_entry(&mut self, name: &str, metric: &Metric) -> fmt::Result {
        let indent = self.write_key(name)?;
        self.write_value(&indent, metric)
    }

    /// Emit the headers this name does not share with the previous entry.
    /// Returns the indentation reached after the last segment.
    fn write_key(&mut self, name: &str) -> Result<String, fmt::Error> {
        let segments: Vec<(Separator, &str)> = split_name(name).segments().collect();

        let shared = self
            .last
            .iter()
            .zip(&segments)
            .take_while(|((last_sep, last_seg), (sep, seg))| last_sep == sep && last_seg == seg)
            .count();
        // the leaf always gets its own line
        let shared = shared.min(segments.len().saturating_sub(1));

        let mut indent = String::new();
        for (depth, (sep, segment)) in segments.iter().enumerate() {
            if depth >= shared {
                let prefix = if *sep == Separator::Slash { "/" } else { "" };
                write!(self.out, "\n{indent}{prefix}{segment}:")?;
            }
            indent.push_str(INDENT_STEP);
        }

        self.last = segments.into_iter().map(|(sep, seg)| (sep, seg.to_string())).collect();
        Ok(indent)
    }

    fn write_value(&mut self, indent: &str, metric: &Metric) -> fmt::Result {
        match attributes_for(metric).as_slice() {
            [] => write!(self.out, " {metric}"),
            [(_, value)] => write!(self.out, " {value}"),
            attributes => {
                for (label, value) in attributes {
                    write!(self.out, "\n{indent}{label}: {value}")?;
                }
                Ok(())
            }
        }
    }

    /// Write the terminator and hand back the sink.
    pub fn finish(mut self) -> Result<W, fmt::Error> {
        self.out.write_char('\n')?;
        Ok(self.out)
    }
}

/// Compare two names segment by segment, each segment tagged with its
/// separator class.
///
/// Raw string order is not enough: in `cache.hits`, `cache.hits-ratio`,
/// `cache.hits.l1` the `-` sorts below `.` and splits the `hits` subtree.
pub fn segment_cmp(a: &str, b: &str) -> Ordering {
    split_name(a).segments().cmp(split_name(b).segments())
}

/// Snapshot entries in render order: names sharing a prefix are contiguous.
pub fn tree_order(snapshot: &Snapshot) -> Vec<(&str, &Metric)> {
    let mut entries: Vec<(&str, &Metric)> = snapshot.iter().map(|(name, metric)| (name.as_str(), metric)).collect();
    entries.sort_by(|(a, _), (b, _)| segment_cmp(a, b));
    entries
}

/// Render entries in the order given. Callers must sort with [`segment_cmp`].
pub fn render_entries<'a, I>(entries: I) -> crate::Result<String>
where
    I: IntoIterator<Item = (&'a str, &'a Metric)>,
{
    let mut writer = PathTreeWriter::new(String::new());
    for (name, metric) in entries {
        writer.write_entry(name, metric)?;
    }
    Ok(writer.finish()?)
}

pub fn render_tree(snapshot: &Snapshot) -> crate::Result<String> {
    render_entries(tree_order(snapshot))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn gauge(v: i64) -> Metric {
        Metric::gauge(move || v)
    }

    #[test]
    fn empty_is_just_the_terminator() {
        assert_eq!(render_tree(&Snapshot::new()).unwrap(), "\n");
    }

    #[test]
    fn nested_leaf_after_sibling_branch() {
        let mut s = Snapshot::new();
        s.insert("a.b.c".into(), gauge(1));
        s.insert("a.d".into(), gauge(2));
        assert_eq!(render_tree(&s).unwrap(), "\na:\n  b:\n    c: 1\n  d: 2\n");
    }

    #[test]
    fn similar_segment_names_are_not_folded() {
        let mut s = Snapshot::new();
        s.insert("a.bc.x".into(), gauge(1));
        s.insert("a.b.y".into(), gauge(2));
        // "a.b." is not a prefix of "a.bc.x."
        assert_eq!(render_tree(&s).unwrap(), "\na:\n  b:\n    y: 2\n  bc:\n    x: 1\n");
    }

    #[test]
    fn separator_class_is_part_of_the_cursor() {
        let mut s = Snapshot::new();
        s.insert("a.b/c".into(), gauge(1));
        s.insert("a/b.c".into(), gauge(2));
        assert_eq!(render_tree(&s).unwrap(), "\na:\n  b:\n    /c: 1\n  /b.c: 2\n");
    }

    #[test]
    fn segment_order_keeps_subtrees_together() {
        assert_eq!(segment_cmp("cache.hits.l1", "cache.hits-ratio"), Ordering::Less);
        assert_eq!(segment_cmp("a.b", "a/b"), Ordering::Less);
        assert_eq!(segment_cmp("a/b", "a/b|c"), Ordering::Less);
        assert_eq!(segment_cmp("x.y", "x.y"), Ordering::Equal);
    }

    #[test]
    fn prefix_after_its_child_still_gets_a_line() {
        let (ab, a) = (gauge(1), gauge(2));
        let out = render_entries([("a.b", &ab), ("a", &a)]).unwrap();
        assert_eq!(out, "\na:\n  b: 1\na: 2\n");
    }

    #[test]
    fn writer_can_target_any_fmt_sink() {
        let mut w = PathTreeWriter::new(String::from("metrics:"));
        w.write_entry("x", &gauge(5)).unwrap();
        assert_eq!(w.finish().unwrap(), "metrics:\nx: 5\n");
    }
}
