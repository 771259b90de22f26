//! Branch tracking for policy traversal.
//!
//! Two parallel paths are carried during exploration: the *structural branch*
//! (segments used to descend the policy tree) and the *named branch* (literal
//! configuration keys plus positional markers, used only for diagnostics).

use std::fmt;

/// Rendering of an empty branch (the root of the configuration tree).
pub const TOP: &str = "<TOP>";

/// One structural step in a policy-tree descent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Descent into an explicitly declared field policy.
    Key(String),
    /// Descent into the wildcard policy of a map node.
    Wildcard,
    /// Descent into the inner policy of a list-policy.
    Element,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(name) => write!(f, "{}", name),
            Segment::Wildcard => write!(f, "*"),
            // List positions are recorded canonically; only the descent matters.
            Segment::Element => write!(f, "0"),
        }
    }
}

/// Join branch elements with `:`, or render the root marker for an empty branch.
pub fn render<T: fmt::Display>(parts: &[T]) -> String {
    if parts.is_empty() {
        TOP.to_string()
    } else {
        parts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(":")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_branch_renders_as_top() {
        assert_eq!(render::<String>(&[]), "<TOP>");
    }

    #[test]
    fn named_branch_is_colon_joined() {
        let named = ["website".to_string(), "docs".to_string(), "#1".to_string()];
        assert_eq!(render(&named), "website:docs:#1");
    }

    #[test]
    fn structural_segments_render_canonically() {
        let branch = [
            Segment::Key("code".to_string()),
            Segment::Wildcard,
            Segment::Key("files".to_string()),
            Segment::Element,
        ];
        assert_eq!(render(&branch), "code:*:files:0");
    }
}
