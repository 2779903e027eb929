//! Metric name segmentation.
//!
//! Split policy (plain character splitting, no patterns):
//! - dot group: text before the first `/`, split on `.`; a `|` in it is literal;
//! - slash group: text after the first `/` up to the next `|`, split on `/`;
//!   a `.` in it is literal;
//! - pipe group: everything after that `|`, split on `|`.
//!
//! So `foo|bar.baz` is `foo|bar` + `baz`, and `foo/bar.baz|bee` is
//! `foo` + `/bar.baz` + `bee`.

/// Separator class of a segment. Ordered dot < slash < pipe, the order the
/// groups appear in a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Separator {
    Dot,
    Slash,
    Pipe,
}

impl Separator {
    pub const fn as_char(self) -> char {
        match self {
            Separator::Dot => '.',
            Separator::Slash => '/',
            Separator::Pipe => '|',
        }
    }
}

/// A metric name split into its three segment groups.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SegmentGroups<'a> {
    pub dots: Vec<&'a str>,
    pub slashes: Vec<&'a str>,
    pub pipes: Vec<&'a str>,
}

impl<'a> SegmentGroups<'a> {
    /// All segments in render order, tagged with their separator class.
    pub fn segments(&self) -> impl Iterator<Item = (Separator, &'a str)> + '_ {
        let dots = self.dots.iter().map(|s| (Separator::Dot, *s));
        let slashes = self.slashes.iter().map(|s| (Separator::Slash, *s));
        let pipes = self.pipes.iter().map(|s| (Separator::Pipe, *s));
        dots.chain(slashes).chain(pipes)
    }
}

pub fn split_name(name: &str) -> SegmentGroups<'_> {
    let Some((dot_part, rest)) = name.split_once('/') else {
        return SegmentGroups {
            dots: name.split('.').collect(),
            ..SegmentGroups::default()
        };
    };

    let (slash_part, pipe_part) = match rest.split_once('|') {
        Some((s, p)) => (s, Some(p)),
        None => (rest, None),
    };

    SegmentGroups {
        dots: dot_part.split('.').collect(),
        slashes: slash_part.split('/').collect(),
        pipes: pipe_part.map(|p| p.split('|').collect()).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(name: &str) -> (Vec<&str>, Vec<&str>, Vec<&str>) {
        let g = split_name(name);
        (g.dots, g.slashes, g.pipes)
    }

    #[test]
    fn dots_only() {
        assert_eq!(groups("a.b.c"), (vec!["a", "b", "c"], vec![], vec![]));
    }

    #[test]
    fn pipe_before_any_slash_is_literal() {
        assert_eq!(groups("foo.bar|baz"), (vec!["foo", "bar|baz"], vec![], vec![]));
        assert_eq!(groups("foo|bar.baz"), (vec!["foo|bar", "baz"], vec![], vec![]));
    }

    #[test]
    fn dot_after_slash_is_literal() {
        assert_eq!(groups("foo/bar.baz"), (vec!["foo"], vec!["bar.baz"], vec![]));
        assert_eq!(groups("foo/bar.baz|bee"), (vec!["foo"], vec!["bar.baz"], vec!["bee"]));
    }

    #[test]
    fn resource_timer_name() {
        assert_eq!(
            groups("resources/orders/42|GET|timer"),
            (vec!["resources"], vec!["orders", "42"], vec!["GET", "timer"])
        );
    }

    #[test]
    fn root_path_gives_empty_slash_segment() {
        assert_eq!(groups("resources/|GET"), (vec!["resources"], vec![""], vec!["GET"]));
    }

    #[test]
    fn segments_are_in_render_order() {
        let g = split_name("a.b/c|d");
        let got: Vec<_> = g.segments().collect();
        assert_eq!(
            got,
            vec![
                (Separator::Dot, "a"),
                (Separator::Dot, "b"),
                (Separator::Slash, "c"),
                (Separator::Pipe, "d"),
            ]
        );
    }
}
