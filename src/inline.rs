//! Inline scanning and marker dispatch.
//!
//! The scanner walks a line left to right looking for trigger characters.
//! At each trigger it offers the position to that marker's handlers in
//! registration order; the first accepted match wins, text between matches
//! flows through as escaped text. A handler may hand back a position earlier
//! than the trigger (bare URL detection does); a claimed position later than
//! the trigger is rejected so the scan can never skip input.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

use crate::handlers::{self, MathPatterns};
use crate::node::{Content, Node};
use crate::registry::{Handler, MarkerRegistry};
use crate::settings::Settings;

/// A reference definition harvested during the block phase.
#[derive(Clone, Debug, PartialEq)]
pub struct Reference {
    pub url: String,
    pub title: Option<String>,
}

/// Read-only state handlers draw on.
pub struct InlineContext<'a> {
    pub settings: &'a Settings,
    pub references: &'a IndexMap<String, Reference>,
    pub math: &'a MathPatterns,
}

/// The slice of line a handler is offered.
pub struct Excerpt<'a> {
    /// The working text the scanner is currently consuming.
    pub context: &'a str,
    /// Byte offset of the trigger within `context`.
    pub offset: usize,
    /// `context` from the trigger onward.
    pub text: &'a str,
}

impl<'a> Excerpt<'a> {
    /// Character immediately before the trigger, `None` at start of text.
    pub fn before(&self) -> Option<char> {
        self.context[..self.offset].chars().next_back()
    }
}

/// What an accepted match produces.
pub enum MatchNode {
    /// A finished node.
    Node(Node),
    /// An element whose body still needs an inline parse of its own.
    Container {
        name: String,
        attributes: Vec<(String, String)>,
        body: String,
        /// Handlers barred inside this element, on top of the inherited set.
        add_non_nestables: Vec<Handler>,
    },
}

pub struct InlineMatch {
    pub node: MatchNode,
    /// Bytes consumed starting at the claimed position.
    pub extent: usize,
    /// Claimed start within `context`; defaults to the trigger offset.
    pub position: Option<usize>,
}

impl InlineMatch {
    pub fn node(node: Node, extent: usize) -> Self {
        Self {
            node: MatchNode::Node(node),
            extent,
            position: None,
        }
    }
}

lazy_static! {
    // A backslash or two trailing spaces before a newline is a hard break.
    static ref HARD_BREAK: Regex = Regex::new(r"(?: *\\|[ ]{2,})\n").unwrap();
}

/// Turns unmarked text into nodes, honoring hard line breaks.
fn unmarked_text(text: &str, out: &mut Vec<Node>) {
    let mut last = 0;
    for found in HARD_BREAK.find_iter(text) {
        if found.start() > last {
            out.push(Node::text(&text[last..found.start()]));
        }
        out.push(Node::element("br", Content::Empty));
        out.push(Node::text("\n"));
        last = found.end();
    }
    if last < text.len() {
        out.push(Node::text(&text[last..]));
    }
}

fn next_marker(registry: &MarkerRegistry, text: &str) -> Option<(usize, char)> {
    text.char_indices().find(|&(_, ch)| registry.is_marker(ch))
}

/// Parses one line of text into inline nodes.
pub fn parse_line(
    registry: &MarkerRegistry,
    ctx: &InlineContext<'_>,
    text: &str,
    non_nestables: &[Handler],
) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut remainder = text;

    'scan: while let Some((marker_position, marker)) = next_marker(registry, remainder) {
        let handler_list = registry
            .handlers_for(marker)
            .expect("marker came from the registry");

        let excerpt = Excerpt {
            context: remainder,
            offset: marker_position,
            text: &remainder[marker_position..],
        };

        for &handler in handler_list {
            if non_nestables.contains(&handler) {
                continue;
            }

            let Some(inline) = handlers::apply(handler, ctx, &excerpt) else {
                continue;
            };

            // A match may not start past the trigger that produced it.
            if inline.position.is_some_and(|p| p > marker_position) {
                continue;
            }
            let position = inline.position.unwrap_or(marker_position);

            unmarked_text(&remainder[..position], &mut nodes);

            match inline.node {
                MatchNode::Node(node) => nodes.push(node),
                MatchNode::Container {
                    name,
                    attributes,
                    body,
                    add_non_nestables,
                } => {
                    let mut inherited = non_nestables.to_vec();
                    for barred in add_non_nestables {
                        if !inherited.contains(&barred) {
                            inherited.push(barred);
                        }
                    }
                    let children = parse_line(registry, ctx, &body, &inherited);
                    let mut node = Node::element(&name, Content::Children(children));
                    node.attributes = attributes;
                    nodes.push(node);
                }
            }

            remainder = &remainder[position + inline.extent..];
            continue 'scan;
        }

        // No handler claimed the trigger; it flows through as text. An
        // unclaimed backslash keeps its newline so the hard-break pattern
        // sees them together.
        let mut step = marker_position + marker.len_utf8();
        if marker == '\\' && remainder[step..].starts_with('\n') {
            step += 1;
        }
        unmarked_text(&remainder[..step], &mut nodes);
        remainder = &remainder[step..];
    }

    if !remainder.is_empty() {
        unmarked_text(remainder, &mut nodes);
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> String {
        let settings = Settings::default();
        let registry = MarkerRegistry::default();
        let references = IndexMap::new();
        let math = MathPatterns::compile(&settings.math);
        let ctx = InlineContext {
            settings: &settings,
            references: &references,
            math: &math,
        };
        let nodes = parse_line(&registry, &ctx, text, &[]);
        let mut out = String::new();
        for node in &nodes {
            out.push_str(&node.render());
        }
        out
    }

    #[test]
    fn plain_text_passes_through_escaped() {
        assert_eq!(parse("a < b"), "a &lt; b");
    }

    #[test]
    fn unclaimed_marker_degrades_to_text() {
        assert_eq!(parse("5 * 3"), "5 * 3");
    }

    #[test]
    fn first_registered_handler_wins() {
        // Code outranks smart backticks on the backtick marker.
        assert_eq!(parse("`x`"), "<code>x</code>");
    }

    #[test]
    fn hard_break_from_trailing_spaces() {
        assert_eq!(parse("one  \ntwo"), "one<br />\ntwo");
    }

    #[test]
    fn hard_break_from_trailing_backslash() {
        assert_eq!(parse("one\\\ntwo"), "one<br />\ntwo");
    }

    #[test]
    fn links_do_not_nest_inside_links() {
        assert_eq!(
            parse("[a [b](u2)](u1)"),
            "<a href=\"u1\">a [b](u2)</a>"
        );
    }
}
