//! The inline handler family.
//!
//! Each handler inspects the excerpt offered by the dispatch loop and either
//! claims a span (returning its node and extent) or declines with `None`.
//! Handlers self-guard on their settings, so a disabled construct simply
//! never claims its trigger and the characters flow through as text.

use fancy_regex::Regex as FancyRegex;
use lazy_static::lazy_static;
use regex::Regex;

use crate::emoji;
use crate::inline::{Excerpt, InlineContext, InlineMatch, MatchNode};
use crate::node::{Content, Node};
use crate::registry::Handler;
use crate::settings::MathSettings;

/// Inline math delimiter pairs compiled to patterns. Built from settings and
/// cached on the engine; rebuilt whenever settings change.
pub struct MathPatterns {
    inline: Vec<FancyRegex>,
}

impl MathPatterns {
    pub fn compile(math: &MathSettings) -> Self {
        let mut inline = Vec::with_capacity(math.inline.delimiters.len());
        for delim in &math.inline.delimiters {
            let left = regex::escape(&delim.left);
            let right = regex::escape(&delim.right);
            // A one-character right delimiter is excluded from the interior
            // alternation so the lazy repeat cannot run past it.
            let pattern = if delim.left.starts_with('\\') || delim.left.chars().count() > 1 {
                format!(r"^{left}(?![\r\n])((?:\\{right}|\\{left}|[^\r\n])+?){right}(?![^\s,.])")
            } else {
                format!(
                    r"^{left}(?![\r\n])((?:\\{right}|\\{left}|[^{right}\r\n])+?){right}(?![^\s,.])"
                )
            };
            if let Ok(re) = FancyRegex::new(&pattern) {
                inline.push(re);
            }
        }
        Self { inline }
    }

    /// First configured pair whose pattern matches at the start of `text`.
    pub fn inline_span<'t>(&self, text: &'t str) -> Option<fancy_regex::Match<'t>> {
        self.inline
            .iter()
            .find_map(|re| re.find(text).ok().flatten())
    }
}

fn fcaptures<'t>(re: &FancyRegex, text: &'t str) -> Option<fancy_regex::Captures<'t>> {
    re.captures(text).ok().flatten()
}

/// Resolves a configured entity string to the character it names. Unknown
/// names pass through unchanged and render as their literal text.
fn decode_entity(entity: &str) -> String {
    let known = match entity {
        "&hellip;" => "\u{2026}",
        "&laquo;" => "\u{ab}",
        "&raquo;" => "\u{bb}",
        "&ldquo;" => "\u{201c}",
        "&rdquo;" => "\u{201d}",
        "&lsquo;" => "\u{2018}",
        "&rsquo;" => "\u{2019}",
        "&mdash;" => "\u{2014}",
        "&ndash;" => "\u{2013}",
        "&copy;" => "\u{a9}",
        "&reg;" => "\u{ae}",
        "&trade;" => "\u{2122}",
        "&para;" => "\u{b6}",
        "&plusmn;" => "\u{b1}",
        "&nbsp;" => "\u{a0}",
        _ => {
            if let Some(num) = entity
                .strip_prefix("&#")
                .and_then(|s| s.strip_suffix(';'))
            {
                let code = if let Some(hex) = num.strip_prefix('x').or_else(|| num.strip_prefix('X'))
                {
                    u32::from_str_radix(hex, 16).ok()
                } else {
                    num.parse::<u32>().ok()
                };
                if let Some(ch) = code.and_then(char::from_u32) {
                    return ch.to_string();
                }
            }
            entity
        }
    };
    known.to_string()
}

fn before_is_blank(excerpt: &Excerpt<'_>) -> bool {
    match excerpt.before() {
        None => true,
        Some(ch) => ch.is_whitespace(),
    }
}

/// Dispatches to the handler named by the tag.
pub fn apply(
    handler: Handler,
    ctx: &InlineContext<'_>,
    excerpt: &Excerpt<'_>,
) -> Option<InlineMatch> {
    match handler {
        Handler::Emphasis => emphasis(ctx, excerpt),
        Handler::Strikethrough => strikethrough(ctx, excerpt),
        Handler::Marking => marking(ctx, excerpt),
        Handler::Insertions => insertions(ctx, excerpt),
        Handler::Keystrokes => keystrokes(ctx, excerpt),
        Handler::Superscript => superscript(ctx, excerpt),
        Handler::Subscript => subscript(ctx, excerpt),
        Handler::MathNotation => math_notation(ctx, excerpt),
        Handler::Typographer => typographer(ctx, excerpt),
        Handler::Smartypants => smartypants(ctx, excerpt),
        Handler::Emojis => emojis(ctx, excerpt),
        Handler::Code => code(ctx, excerpt),
        Handler::Link => link(ctx, excerpt),
        Handler::Image => image(ctx, excerpt),
        Handler::Url => url(ctx, excerpt),
        Handler::UrlTag => url_tag(ctx, excerpt),
        Handler::EmailTag => email_tag(ctx, excerpt),
        Handler::Markup => markup(ctx, excerpt),
        Handler::EscapeSequence => escape_sequence(ctx, excerpt),
        Handler::SpecialCharacter => special_character(ctx, excerpt),
    }
}

// --- Emphasis family ----------------------------------------------------

lazy_static! {
    static ref STRONG_STAR: FancyRegex =
        FancyRegex::new(r"(?s)^\*\*((?:\\\*|[^*]|\*[^*]*\*)+?)\*\*(?!\*)").unwrap();
    static ref STRONG_UNDERSCORE: FancyRegex =
        FancyRegex::new(r"(?s)^__((?:\\_|[^_]|_[^_]*_)+?)__(?!_)").unwrap();
    static ref EM_STAR: FancyRegex =
        FancyRegex::new(r"(?s)^\*((?:\\\*|[^*]|\*\*[^*]+?\*\*)+?)\*(?!\*)").unwrap();
    static ref EM_UNDERSCORE: FancyRegex =
        FancyRegex::new(r"(?s)^_((?:\\_|[^_]|__[^_]*__)+?)_(?!_)\b").unwrap();
}

fn emphasis(ctx: &InlineContext<'_>, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
    let emphasis = &ctx.settings.emphasis;
    if !emphasis.enabled || excerpt.text.len() < 2 {
        return None;
    }

    let star = excerpt.text.starts_with('*');
    let (strong_re, em_re): (&FancyRegex, &FancyRegex) = if star {
        (&STRONG_STAR, &EM_STAR)
    } else {
        (&STRONG_UNDERSCORE, &EM_UNDERSCORE)
    };

    let wrap = |name: &str, caps: fancy_regex::Captures<'_>| -> Option<InlineMatch> {
        Some(InlineMatch {
            extent: caps.get(0)?.as_str().len(),
            position: None,
            node: MatchNode::Container {
                name: name.to_string(),
                attributes: Vec::new(),
                body: caps.get(1)?.as_str().to_string(),
                add_non_nestables: Vec::new(),
            },
        })
    };

    if emphasis.bold {
        if let Some(caps) = fcaptures(strong_re, excerpt.text) {
            return wrap("strong", caps);
        }
    }
    if emphasis.italic {
        if let Some(caps) = fcaptures(em_re, excerpt.text) {
            return wrap("em", caps);
        }
    }
    None
}

lazy_static! {
    static ref STRIKETHROUGH: FancyRegex =
        FancyRegex::new(r"(?s)^~~(?=\S)(.+?)(?<=\S)~~").unwrap();
}

fn strikethrough(ctx: &InlineContext<'_>, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
    let emphasis = &ctx.settings.emphasis;
    if !emphasis.enabled || !emphasis.strikethroughs || !excerpt.text.starts_with("~~") {
        return None;
    }
    let caps = fcaptures(&STRIKETHROUGH, excerpt.text)?;
    Some(InlineMatch {
        extent: caps.get(0)?.as_str().len(),
        position: None,
        node: MatchNode::Container {
            name: "del".to_string(),
            attributes: Vec::new(),
            body: caps.get(1)?.as_str().to_string(),
            add_non_nestables: Vec::new(),
        },
    })
}

lazy_static! {
    static ref MARKING: FancyRegex =
        FancyRegex::new(r"(?s)^==((?:\\=|[^=]|=[^=]*=)+?)==(?!=)").unwrap();
    static ref INSERTIONS: FancyRegex =
        FancyRegex::new(r"(?s)^\+\+((?:\\\+|[^+]|\+[^+]*\+)+?)\+\+(?!\+)").unwrap();
    static ref KEYSTROKES: FancyRegex =
        FancyRegex::new(r"(?s)^\[\[([^\[\]]*|[\[\]])\]\](?!\])").unwrap();
    static ref SUPERSCRIPT: FancyRegex =
        FancyRegex::new(r"(?s)^\^((?:\\\^|[^\^]|\^[^\^]+?\^\^)+?)\^(?!\^)").unwrap();
    static ref SUBSCRIPT: FancyRegex =
        FancyRegex::new(r"(?s)^~((?:\\~|[^~]|~~[^~]*~~)+?)~(?!~)").unwrap();
}

fn marking(ctx: &InlineContext<'_>, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
    let emphasis = &ctx.settings.emphasis;
    if !emphasis.enabled || !emphasis.marking {
        return None;
    }
    let caps = fcaptures(&MARKING, excerpt.text)?;
    let node = Node::element("mark", Content::Text(caps.get(1)?.as_str().to_string()));
    Some(InlineMatch::node(node, caps.get(0)?.as_str().len()))
}

fn insertions(ctx: &InlineContext<'_>, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
    let emphasis = &ctx.settings.emphasis;
    if !emphasis.enabled || !emphasis.insertions {
        return None;
    }
    let caps = fcaptures(&INSERTIONS, excerpt.text)?;
    let node = Node::element("ins", Content::Text(caps.get(1)?.as_str().to_string()));
    Some(InlineMatch::node(node, caps.get(0)?.as_str().len()))
}

fn keystrokes(ctx: &InlineContext<'_>, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
    let emphasis = &ctx.settings.emphasis;
    if !emphasis.enabled || !emphasis.keystrokes || excerpt.before() == Some('[') {
        return None;
    }
    let caps = fcaptures(&KEYSTROKES, excerpt.text)?;
    let node = Node::element("kbd", Content::Text(caps.get(1)?.as_str().to_string()));
    Some(InlineMatch::node(node, caps.get(0)?.as_str().len()))
}

fn superscript(ctx: &InlineContext<'_>, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
    let emphasis = &ctx.settings.emphasis;
    if !emphasis.enabled || !emphasis.superscript {
        return None;
    }
    let caps = fcaptures(&SUPERSCRIPT, excerpt.text)?;
    Some(InlineMatch {
        extent: caps.get(0)?.as_str().len(),
        position: None,
        node: MatchNode::Container {
            name: "sup".to_string(),
            attributes: Vec::new(),
            body: caps.get(1)?.as_str().to_string(),
            add_non_nestables: Vec::new(),
        },
    })
}

fn subscript(ctx: &InlineContext<'_>, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
    let emphasis = &ctx.settings.emphasis;
    if !emphasis.enabled || !emphasis.subscript {
        return None;
    }
    let caps = fcaptures(&SUBSCRIPT, excerpt.text)?;
    Some(InlineMatch {
        extent: caps.get(0)?.as_str().len(),
        position: None,
        node: MatchNode::Container {
            name: "sub".to_string(),
            attributes: Vec::new(),
            body: caps.get(1)?.as_str().to_string(),
            add_non_nestables: Vec::new(),
        },
    })
}

// --- Math and escapes ---------------------------------------------------

fn math_notation(ctx: &InlineContext<'_>, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
    let math = &ctx.settings.math;
    if !math.enabled || !math.inline.enabled || excerpt.text.len() < 2 {
        return None;
    }
    if !before_is_blank(excerpt) {
        return None;
    }
    let span = ctx.math.inline_span(excerpt.text)?;
    // The whole span, delimiters included, passes through verbatim.
    let node = Node::text(span.as_str());
    Some(InlineMatch::node(node, span.as_str().len()))
}

const ESCAPABLE: &[char] = &[
    '\\', '`', '*', '_', '{', '}', '[', ']', '(', ')', '>', '#', '+', '-', '.', '!', '|', '?',
    '"', '\'', '<',
];

fn escape_sequence(ctx: &InlineContext<'_>, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
    // A backslash opening a configured math span is math, not an escape.
    if ctx.settings.math.enabled && ctx.math.inline_span(excerpt.text).is_some() {
        return None;
    }
    let escaped = excerpt.text.chars().nth(1)?;
    if !ESCAPABLE.contains(&escaped) {
        return None;
    }
    Some(InlineMatch::node(Node::text(escaped.to_string()), 2))
}

lazy_static! {
    static ref ENTITY: Regex = Regex::new(r"^&#?\w+;").unwrap();
}

fn special_character(_ctx: &InlineContext<'_>, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
    let markup = match excerpt.text.chars().next()? {
        '&' => {
            // A written-out entity survives verbatim instead of having its
            // ampersand re-escaped.
            if let Some(entity) = ENTITY.find(excerpt.text) {
                return Some(InlineMatch::node(Node::raw(entity.as_str()), entity.end()));
            }
            "&amp;"
        }
        '<' => "&lt;",
        '>' => "&gt;",
        '"' => "&quot;",
        _ => return None,
    };
    Some(InlineMatch::node(Node::raw(markup), 1))
}

// --- Typography ---------------------------------------------------------

fn ellipsis_text(ctx: &InlineContext<'_>) -> String {
    let smarty = &ctx.settings.smarty;
    if smarty.enabled && smarty.smart_ellipses {
        decode_entity(&smarty.substitutions.ellipses)
    } else {
        "...".to_string()
    }
}

fn typographer(ctx: &InlineContext<'_>, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
    if !ctx.settings.typographer {
        return None;
    }
    let text = excerpt.text;

    let symbol = |out: &str, extent: usize| Some(InlineMatch::node(Node::text(out), extent));

    match text.chars().next()? {
        '+' if text.starts_with("+-") => symbol("\u{b1}", 2),
        '(' => {
            for (pattern, out) in [
                ("(c)", "\u{a9}"),
                ("(r)", "\u{ae}"),
                ("(tm)", "\u{2122}"),
                ("(p)", "\u{b6}"),
            ] {
                if let Some(prefix) = text.get(..pattern.len()) {
                    if prefix.eq_ignore_ascii_case(pattern) {
                        return symbol(out, pattern.len());
                    }
                }
            }
            None
        }
        '.' => {
            let dots = text.chars().take_while(|&c| c == '.').count();
            match dots {
                4.. => symbol(&ellipsis_text(ctx), dots),
                // Three dots are left for the smart-punctuation handler and
                // otherwise stay literal.
                3 => symbol("...", 3),
                2 if !matches!(excerpt.before(), Some('.' | '!' | '?')) => {
                    symbol(&ellipsis_text(ctx), 2)
                }
                _ => None,
            }
        }
        lead @ ('!' | '?') => {
            let dots = text[1..].chars().take_while(|&c| c == '.').count();
            if dots >= 3 {
                symbol(&format!("{lead}.."), 1 + dots)
            } else {
                None
            }
        }
        _ => None,
    }
}

lazy_static! {
    static ref SMART_BACKTICKS: FancyRegex =
        FancyRegex::new(r#"^``(?!\s)([^"'`]+?)''"#).unwrap();
    static ref SMART_DOUBLE: FancyRegex = FancyRegex::new(r#"^"(?!\s)([^"]+?)""#).unwrap();
    static ref SMART_SINGLE: FancyRegex = FancyRegex::new(r"^'(?!\s)([^']+?)'").unwrap();
    static ref SMART_ANGLED: FancyRegex = FancyRegex::new(r"^<<(?!\s)([^<>]+?)>>").unwrap();
}

fn smartypants(ctx: &InlineContext<'_>, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
    let smarty = &ctx.settings.smarty;
    if !smarty.enabled {
        return None;
    }
    let subs = &smarty.substitutions;
    let text = excerpt.text;

    let quoted = |re: &FancyRegex, open: &str, close: &str| -> Option<InlineMatch> {
        // Quotes only open at a word boundary.
        if !before_is_blank(excerpt) {
            return None;
        }
        let caps = fcaptures(re, text)?;
        let body = caps.get(1)?.as_str();
        let node = Node::text(format!(
            "{}{}{}",
            decode_entity(open),
            body,
            decode_entity(close)
        ));
        Some(InlineMatch::node(node, caps.get(0)?.as_str().len()))
    };

    match text.chars().next()? {
        '`' if smarty.smart_backticks => {
            quoted(&SMART_BACKTICKS, &subs.left_double_quote, &subs.right_double_quote)
        }
        '"' if smarty.smart_quotes => {
            quoted(&SMART_DOUBLE, &subs.left_double_quote, &subs.right_double_quote)
        }
        '\'' if smarty.smart_quotes => {
            quoted(&SMART_SINGLE, &subs.left_single_quote, &subs.right_single_quote)
        }
        '<' if smarty.smart_angled_quotes => {
            quoted(&SMART_ANGLED, &subs.left_angle_quote, &subs.right_angle_quote)
        }
        '-' if smarty.smart_dashes => {
            if text.starts_with("---") {
                Some(InlineMatch::node(Node::text(decode_entity(&subs.mdash)), 3))
            } else if text.starts_with("--") {
                Some(InlineMatch::node(Node::text(decode_entity(&subs.ndash)), 2))
            } else {
                None
            }
        }
        '.' if smarty.smart_ellipses => {
            let dots = text.chars().take_while(|&c| c == '.').count();
            if dots == 3 && excerpt.before() != Some('.') {
                Some(InlineMatch::node(
                    Node::text(decode_entity(&subs.ellipses)),
                    3,
                ))
            } else {
                None
            }
        }
        _ => None,
    }
}

lazy_static! {
    static ref EMOJI: Regex = Regex::new(r"^:([A-Za-z0-9_+-]+):").unwrap();
}

fn emojis(ctx: &InlineContext<'_>, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
    if !ctx.settings.emojis || !before_is_blank(excerpt) {
        return None;
    }
    let caps = EMOJI.captures(excerpt.text)?;
    let glyph = emoji::lookup(&caps[1])?;
    Some(InlineMatch::node(Node::text(glyph), caps[0].len()))
}

// --- Code, links, raw markup --------------------------------------------

lazy_static! {
    static ref CODE_SPAN: FancyRegex =
        FancyRegex::new(r"(?s)^(`+)[ ]*(.+?)[ ]*(?<!`)\1(?!`)").unwrap();
    static ref CODE_NEWLINES: Regex = Regex::new(r"[ ]*\n").unwrap();
}

fn code(ctx: &InlineContext<'_>, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
    let settings = &ctx.settings.code;
    if !settings.enabled || !settings.inline {
        return None;
    }
    let caps = fcaptures(&CODE_SPAN, excerpt.text)?;
    let body = CODE_NEWLINES
        .replace_all(caps.get(2)?.as_str(), " ")
        .into_owned();
    let node = Node::element("code", Content::Text(body));
    Some(InlineMatch::node(node, caps.get(0)?.as_str().len()))
}

lazy_static! {
    static ref LINK_LABEL: Regex = Regex::new(r"^\[((?:[^\]\[]|\[[^\]\[]*\])*)\]").unwrap();
    static ref LINK_DESTINATION: Regex =
        Regex::new(r#"^\(\s*((?:[^ ()]|\([^ )]+\))+?)(?:[ ]+("[^"]*"|'[^']*'))?\s*\)"#).unwrap();
    static ref LINK_REFERENCE: Regex = Regex::new(r"^\s*\[(.*?)\]").unwrap();
    static ref LINK_ATTRIBUTES: Regex = Regex::new(r"^[ ]*\{((?:[#.][-\w]+[ ]*)+)\}").unwrap();
}

/// Parses a `{#id .class}` attribute block into attribute pairs.
fn parse_attribute_data(data: &str) -> Vec<(String, String)> {
    let mut id = None;
    let mut classes: Vec<&str> = Vec::new();
    for token in data.split_whitespace() {
        if let Some(rest) = token.strip_prefix('#') {
            id = Some(rest);
        } else if let Some(rest) = token.strip_prefix('.') {
            classes.push(rest);
        }
    }
    let mut attributes = Vec::new();
    if let Some(id) = id {
        attributes.push(("id".to_string(), id.to_string()));
    }
    if !classes.is_empty() {
        attributes.push(("class".to_string(), classes.join(" ")));
    }
    attributes
}

fn link(ctx: &InlineContext<'_>, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
    if !ctx.settings.links.enabled {
        return None;
    }

    let label_caps = LINK_LABEL.captures(excerpt.text)?;
    let label = label_caps.get(1)?.as_str().to_string();
    let mut extent = label_caps[0].len();
    let mut remainder = &excerpt.text[extent..];

    let (href, title) = if let Some(caps) = LINK_DESTINATION.captures(remainder) {
        let href = caps.get(1)?.as_str().to_string();
        let title = caps.get(2).map(|m| {
            let quoted = m.as_str();
            quoted[1..quoted.len() - 1].to_string()
        });
        extent += caps[0].len();
        remainder = &remainder[caps[0].len()..];
        (href, title)
    } else {
        let definition = if let Some(caps) = LINK_REFERENCE.captures(remainder) {
            let explicit = caps.get(1)?.as_str();
            extent += caps[0].len();
            remainder = &remainder[caps[0].len()..];
            if explicit.is_empty() {
                label.clone()
            } else {
                explicit.to_string()
            }
        } else {
            label.clone()
        };
        let reference = ctx.references.get(&definition.to_lowercase())?;
        (reference.url.clone(), reference.title.clone())
    };

    let mut attributes = vec![("href".to_string(), href)];
    if let Some(title) = title {
        attributes.push(("title".to_string(), title));
    }

    if ctx.settings.special_attributes {
        if let Some(caps) = LINK_ATTRIBUTES.captures(remainder) {
            attributes.extend(parse_attribute_data(&caps[1]));
            extent += caps[0].len();
        }
    }

    Some(InlineMatch {
        extent,
        position: None,
        node: MatchNode::Container {
            name: "a".to_string(),
            attributes,
            body: label,
            add_non_nestables: vec![Handler::Link, Handler::Url],
        },
    })
}

fn image(ctx: &InlineContext<'_>, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
    if !ctx.settings.images || !excerpt.text[1..].starts_with('[') {
        return None;
    }

    let shifted = Excerpt {
        context: excerpt.context,
        offset: excerpt.offset + 1,
        text: &excerpt.text[1..],
    };
    let inner = link(ctx, &shifted)?;
    let MatchNode::Container {
        attributes, body, ..
    } = inner.node
    else {
        return None;
    };

    let mut node = Node::element("img", Content::Empty);
    for (key, value) in attributes {
        if key == "href" {
            node.set_attr("src", value);
            // alt text is the literal label, never reparsed
            node.set_attr("alt", body.clone());
        } else {
            node.set_attr(&key, value);
        }
    }
    Some(InlineMatch::node(node, inner.extent + 1))
}

lazy_static! {
    static ref BARE_URL: Regex = Regex::new(r"(?i)\bhttps?://[^\s<]+\b/*").unwrap();
    static ref URL_TAG: Regex = Regex::new(r"^<(\w+:/{2}[^ >]+)>").unwrap();
    static ref EMAIL_TAG: Regex = Regex::new(r"(?i)^<((mailto:)?\S+?@\S+?)>").unwrap();
}

fn url(ctx: &InlineContext<'_>, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
    if !ctx.settings.links.enabled || !excerpt.text.starts_with("://") {
        return None;
    }
    let found = BARE_URL.find(excerpt.context)?;
    let url = found.as_str();
    let node = Node::element("a", Content::Text(url.to_string())).with_attr("href", url);
    Some(InlineMatch {
        extent: url.len(),
        position: Some(found.start()),
        node: MatchNode::Node(node),
    })
}

fn url_tag(ctx: &InlineContext<'_>, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
    if !ctx.settings.links.enabled {
        return None;
    }
    let caps = URL_TAG.captures(excerpt.text)?;
    let url = caps.get(1)?.as_str();
    let node = Node::element("a", Content::Text(url.to_string())).with_attr("href", url);
    Some(InlineMatch::node(node, caps[0].len()))
}

fn email_tag(ctx: &InlineContext<'_>, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
    let links = &ctx.settings.links;
    if !links.enabled || !links.email_links {
        return None;
    }
    let caps = EMAIL_TAG.captures(excerpt.text)?;
    let address = caps.get(1)?.as_str();
    let href = if caps.get(2).is_some() {
        address.to_string()
    } else {
        format!("mailto:{address}")
    };
    let node = Node::element("a", Content::Text(address.to_string())).with_attr("href", href);
    Some(InlineMatch::node(node, caps[0].len()))
}

lazy_static! {
    static ref MARKUP_CLOSE: Regex = Regex::new(r"(?s)^</\w[\w-]*[ ]*>").unwrap();
    static ref MARKUP_COMMENT: Regex = Regex::new(r"(?s)^<!---?[^>-](?:-?[^-])*-->").unwrap();
    static ref MARKUP_OPEN: Regex = Regex::new(
        r#"(?s)^<\w[\w-]*(?:[ ]*[a-zA-Z_:][\w:.-]*(?:\s*=\s*(?:[^"'=<>`\s]+|"[^"]*"|'[^']*'))?)*[ ]*/?>"#
    )
    .unwrap();
}

fn markup(ctx: &InlineContext<'_>, excerpt: &Excerpt<'_>) -> Option<InlineMatch> {
    if !ctx.settings.markup || !excerpt.text.contains('>') {
        return None;
    }
    let second = excerpt.text.chars().nth(1)?;
    let found = match second {
        '/' => MARKUP_CLOSE.find(excerpt.text),
        '!' => MARKUP_COMMENT.find(excerpt.text),
        ' ' => None,
        _ => MARKUP_OPEN.find(excerpt.text),
    }?;
    Some(InlineMatch::node(
        Node::raw(found.as_str()),
        found.as_str().len(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use indexmap::IndexMap;

    struct Fixture {
        settings: Settings,
        math: MathPatterns,
        references: IndexMap<String, crate::inline::Reference>,
    }

    impl Fixture {
        fn new(settings: Settings) -> Self {
            let math = MathPatterns::compile(&settings.math);
            Self {
                settings,
                math,
                references: IndexMap::new(),
            }
        }

        fn ctx(&self) -> InlineContext<'_> {
            InlineContext {
                settings: &self.settings,
                references: &self.references,
                math: &self.math,
            }
        }
    }

    fn excerpt(context_text: &str, offset: usize) -> Excerpt<'_> {
        Excerpt {
            context: context_text,
            offset,
            text: &context_text[offset..],
        }
    }

    #[test]
    fn escape_yields_to_inline_math() {
        let mut settings = Settings::default();
        settings.math.enabled = true;
        let fx = Fixture::new(settings);
        let ctx = fx.ctx();

        let ex = excerpt(r"\(x^2\) rest", 0);
        assert!(escape_sequence(&ctx, &ex).is_none());
        let got = math_notation(&ctx, &ex).unwrap();
        assert_eq!(got.extent, r"\(x^2\)".len());
    }

    #[test]
    fn escape_produces_literal_character() {
        let fx = Fixture::new(Settings::default());
        let ctx = fx.ctx();

        let ex = excerpt(r"\*not em*", 0);
        let got = escape_sequence(&ctx, &ex).unwrap();
        assert_eq!(got.extent, 2);
        match got.node {
            MatchNode::Node(node) => assert_eq!(node.render(), "*"),
            _ => panic!("expected a plain node"),
        }
    }

    #[test]
    fn math_requires_blank_before() {
        let mut settings = Settings::default();
        settings.math.enabled = true;
        let fx = Fixture::new(settings);
        let ctx = fx.ctx();

        let line = r"word\(x\)";
        let ex = excerpt(line, 4);
        assert!(math_notation(&ctx, &ex).is_none());
    }

    #[test]
    fn smart_quotes_only_open_at_word_boundary() {
        let mut settings = Settings::default();
        settings.smarty.enabled = true;
        let fx = Fixture::new(settings);
        let ctx = fx.ctx();

        let apostrophe = "it's fine";
        assert!(smartypants(&ctx, &excerpt(apostrophe, 2)).is_none());

        let quoted = "'hi'";
        let got = smartypants(&ctx, &excerpt(quoted, 0)).unwrap();
        assert_eq!(got.extent, 4);
    }

    #[test]
    fn typographer_symbol_substitutions() {
        let fx = Fixture::new(Settings::default());
        let ctx = fx.ctx();

        let got = typographer(&ctx, &excerpt("(tm) mark", 0)).unwrap();
        assert_eq!(got.extent, 4);
        let got = typographer(&ctx, &excerpt("+- margin", 0)).unwrap();
        match got.node {
            MatchNode::Node(node) => assert_eq!(node.render(), "\u{b1}"),
            _ => panic!("expected a plain node"),
        }
    }

    #[test]
    fn exactly_three_dots_stay_literal_without_smarty() {
        let fx = Fixture::new(Settings::default());
        let ctx = fx.ctx();

        let got = typographer(&ctx, &excerpt("...", 0)).unwrap();
        assert_eq!(got.extent, 3);
        match got.node {
            MatchNode::Node(node) => assert_eq!(node.render(), "..."),
            _ => panic!("expected a plain node"),
        }
    }

    #[test]
    fn keystrokes_take_the_double_bracket_form() {
        let fx = Fixture::new(Settings::default());
        let ctx = fx.ctx();

        let got = keystrokes(&ctx, &excerpt("[[Ctrl+Alt+Del]]", 0)).unwrap();
        assert_eq!(got.extent, 16);
        match got.node {
            MatchNode::Node(node) => assert_eq!(node.render(), "<kbd>Ctrl+Alt+Del</kbd>"),
            _ => panic!("expected a plain node"),
        }
    }

    #[test]
    fn bare_url_claims_from_its_true_start() {
        let fx = Fixture::new(Settings::default());
        let ctx = fx.ctx();

        let line = "see https://example.com/x now";
        let ex = excerpt(line, 9); // the colon trigger
        let got = url(&ctx, &ex).unwrap();
        assert_eq!(got.position, Some(4));
        assert_eq!(got.extent, "https://example.com/x".len());
    }

    #[test]
    fn reference_links_resolve_case_insensitively() {
        let mut fx = Fixture::new(Settings::default());
        fx.references.insert(
            "guide".to_string(),
            crate::inline::Reference {
                url: "https://example.com/guide".to_string(),
                title: None,
            },
        );
        let ctx = fx.ctx();

        let got = link(&ctx, &excerpt("[Guide] and more", 0)).unwrap();
        assert_eq!(got.extent, "[Guide]".len());
        match got.node {
            MatchNode::Container { attributes, .. } => {
                assert_eq!(
                    attributes,
                    vec![("href".to_string(), "https://example.com/guide".to_string())]
                );
            }
            _ => panic!("expected a container"),
        }
    }

    #[test]
    fn disabled_marking_declines() {
        let mut settings = Settings::default();
        settings.emphasis.marking = false;
        let fx = Fixture::new(settings);
        let ctx = fx.ctx();
        assert!(marking(&ctx, &excerpt("==hi==", 0)).is_none());
    }
}
