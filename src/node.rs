//! Element tree handed to the HTML renderer.
//!
//! A node is a tag name (or none, for bare text runs), an ordered attribute
//! list and either text, raw markup or child nodes. The renderer is the only
//! place markup strings are assembled; everything upstream works on nodes.

/// Characters the grammar reserves; plain text is escaped so none of them
/// leak through as markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Empty,
    /// Escaped on render.
    Text(String),
    /// Emitted verbatim.
    Raw(String),
    Children(Vec<Node>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// `None` renders the content with no wrapping tag.
    pub name: Option<String>,
    /// Insertion order is emission order.
    pub attributes: Vec<(String, String)>,
    pub content: Content,
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node {
            name: None,
            attributes: Vec::new(),
            content: Content::Text(text.into()),
        }
    }

    pub fn raw(markup: impl Into<String>) -> Self {
        Node {
            name: None,
            attributes: Vec::new(),
            content: Content::Raw(markup.into()),
        }
    }

    pub fn element(name: &str, content: Content) -> Self {
        Node {
            name: Some(name.to_string()),
            attributes: Vec::new(),
            content,
        }
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attributes.push((key.to_string(), value.into()));
        self
    }

    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.attributes.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value;
        } else {
            self.attributes.push((key.to_string(), value));
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn is_void(&self) -> bool {
        matches!(
            self.name.as_deref(),
            Some("br" | "hr" | "img" | "input")
        )
    }

    /// Renders this node to markup.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        let Some(name) = self.name.as_deref() else {
            self.render_content(out);
            return;
        };

        out.push('<');
        out.push_str(name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape_html(value));
            out.push('"');
        }

        if self.is_void() {
            out.push_str(" />");
            return;
        }

        out.push('>');
        self.render_content(out);
        out.push_str("</");
        out.push_str(name);
        out.push('>');
    }

    fn render_content(&self, out: &mut String) {
        match &self.content {
            Content::Empty => {}
            Content::Text(text) => out.push_str(&escape_html(text)),
            Content::Raw(markup) => out.push_str(markup),
            Content::Children(children) => {
                for child in children {
                    child.render_into(out);
                }
            }
        }
    }
}

/// Renders a sequence of block-level nodes, one per line.
pub fn render_blocks(blocks: &[Node]) -> String {
    let mut parts = Vec::with_capacity(blocks.len());
    for block in blocks {
        let markup = block.render();
        if !markup.is_empty() {
            parts.push(markup);
        }
    }
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_reserved_characters() {
        assert_eq!(escape_html("a < b & c > \"d\""), "a &lt; b &amp; c &gt; &quot;d&quot;");
    }

    #[test]
    fn renders_nested_elements() {
        let node = Node::element(
            "p",
            Content::Children(vec![
                Node::text("see "),
                Node::element("em", Content::Text("this".into())),
            ]),
        );
        assert_eq!(node.render(), "<p>see <em>this</em></p>");
    }

    #[test]
    fn renders_void_elements_without_closing_tag() {
        let node = Node::element("input", Content::Empty)
            .with_attr("type", "checkbox")
            .with_attr("disabled", "disabled");
        assert_eq!(node.render(), "<input type=\"checkbox\" disabled=\"disabled\" />");
    }

    #[test]
    fn attribute_values_are_escaped() {
        let node = Node::element("a", Content::Text("x".into())).with_attr("href", "a\"b");
        assert_eq!(node.render(), "<a href=\"a&quot;b\">x</a>");
    }

    #[test]
    fn raw_content_is_not_escaped() {
        assert_eq!(Node::raw("&hellip;").render(), "&hellip;");
    }
}
