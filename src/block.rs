//! Line-oriented block grammar.
//!
//! The document is split into lines and fed through a classifier: each line
//! either continues the currently open block or closes it and starts a new
//! one. Containers (blockquotes, list items) collect raw lines and recurse.
//! Parsing runs in two phases so reference definitions anywhere in the
//! document resolve links anywhere else: phase one builds the block tree and
//! harvests definitions, phase two renders the tree and runs the inline
//! grammar.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use log::trace;
use fancy_regex::Regex as FancyRegex;
use regex::Regex;

use crate::handlers::MathPatterns;
use crate::inline::{parse_line, InlineContext, Reference};
use crate::node::{Content, Node};
use crate::registry::MarkerRegistry;
use crate::settings::Settings;
use crate::table::{collapse_spans, Alignment, TableCell};

pub struct BlockContext<'a> {
    pub settings: &'a Settings,
    pub registry: &'a MarkerRegistry,
    pub math: &'a MathPatterns,
}

/// Receives every completed heading, in document order; decides its id
/// attribute and records table-of-contents entries.
pub trait HeadingSink {
    fn heading(
        &mut self,
        level: u8,
        raw: &str,
        plain: &str,
        explicit_id: Option<&str>,
    ) -> Option<String>;
}

/// Keeps explicit ids and derives nothing.
pub struct NoAnchors;

impl HeadingSink for NoAnchors {
    fn heading(&mut self, _: u8, _: &str, _: &str, explicit_id: Option<&str>) -> Option<String> {
        explicit_id.map(str::to_string)
    }
}

/// Parses a full document to block-level nodes.
pub fn parse_document(
    ctx: &BlockContext<'_>,
    sink: &mut dyn HeadingSink,
    text: &str,
) -> Vec<Node> {
    let normalized = text
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', "    ");
    let lines: Vec<String> = normalized.split('\n').map(str::to_string).collect();

    let mut references = IndexMap::new();
    let blocks = collect_blocks(ctx, &lines, &mut references);
    trace!("collected {} top-level blocks", blocks.len());

    let rc = RenderContext {
        registry: ctx.registry,
        inline: InlineContext {
            settings: ctx.settings,
            references: &references,
            math: ctx.math,
        },
    };
    render_tree(&rc, sink, &blocks)
}

// --- Block tree ---------------------------------------------------------

#[derive(Debug)]
enum RawBlock {
    Paragraph {
        lines: Vec<String>,
    },
    Heading {
        level: u8,
        text: String,
        explicit_id: Option<String>,
        classes: Option<String>,
    },
    Fenced {
        language: Option<String>,
        body: String,
    },
    IndentedCode {
        body: String,
    },
    Math {
        text: String,
    },
    Quote {
        blocks: Vec<RawBlock>,
    },
    List {
        ordered: bool,
        start: u32,
        loose: bool,
        items: Vec<RawItem>,
    },
    Table {
        header: Vec<TableCell>,
        rows: Vec<Vec<TableCell>>,
    },
    Rule,
    Markup {
        html: String,
    },
}

#[derive(Debug)]
struct RawItem {
    blocks: Vec<RawBlock>,
    loose: bool,
    task: Option<bool>,
}

struct Line<'a> {
    body: &'a str,
    indent: usize,
    text: &'a str,
}

impl<'a> Line<'a> {
    fn new(body: &'a str) -> Self {
        let indent = body.len() - body.trim_start_matches(' ').len();
        Line {
            body,
            indent,
            text: &body[indent..],
        }
    }

    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

lazy_static! {
    static ref ATX_HEADING: Regex =
        Regex::new(r"^(#{1,6})(?:[ ]+(.*?))??(?:[ ]+#+)?[ ]*$").unwrap();
    static ref HEADING_ATTRIBUTES: Regex =
        Regex::new(r"[ ]*\{((?:[#.][-\w]+[ ]*)+)\}[ ]*$").unwrap();
    static ref SETEXT_UNDERLINE: Regex = Regex::new(r"^(=+|-+)[ ]*$").unwrap();
    static ref THEMATIC_BREAK: FancyRegex =
        FancyRegex::new(r"^([*\-_])([ ]*\1){2,}[ ]*$").unwrap();
    static ref FENCE_OPEN: Regex = Regex::new(r"^(`{3,}|~{3,})[ ]*([^`]*?)[ ]*$").unwrap();
    static ref LIST_MARKER: Regex = Regex::new(r"^([*+-]|\d{1,9}[.)])(?:[ ]+(.*))?$").unwrap();
    static ref REFERENCE_DEFINITION: Regex =
        Regex::new(r#"^\[(.+?)\]:[ ]*<?(\S+?)>?(?:[ ]+["'(](.+)["')])?[ ]*$"#).unwrap();
    static ref TABLE_DELIMITER: Regex =
        Regex::new(r"^\|?([ ]*:?-+:?[ ]*\|)*[ ]*:?-+:?[ ]*\|?$").unwrap();
    static ref MARKUP_BLOCK_OPEN: Regex = Regex::new(r"^</?(\w[\w-]*)([ ]|/?>|$)").unwrap();
    static ref TASK_MARKER: Regex = Regex::new(r"^\[([ xX])\][ ]").unwrap();
    static ref STRIP_TAGS: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Span-level tags never open an HTML block; a line like `<em>hi</em>` is a
/// paragraph with inline markup.
const TEXT_LEVEL_ELEMENTS: &[&str] = &[
    "a", "abbr", "audio", "b", "bdi", "bdo", "br", "button", "cite", "code", "data", "del",
    "dfn", "em", "i", "iframe", "img", "input", "ins", "kbd", "label", "mark", "object",
    "output", "q", "rp", "rt", "ruby", "s", "samp", "select", "small", "span", "strong", "sub",
    "sup", "textarea", "time", "u", "var", "video", "wbr",
];

enum OpenBlock {
    Paragraph {
        lines: Vec<String>,
    },
    Fenced {
        marker: char,
        opener_len: usize,
        language: Option<String>,
        lines: Vec<String>,
    },
    Math {
        left: String,
        right: String,
        lines: Vec<String>,
        pending_blanks: usize,
        complete: bool,
    },
    IndentedCode {
        lines: Vec<String>,
        pending_blanks: usize,
    },
    Quote {
        lines: Vec<String>,
        interrupted: bool,
    },
    List(OpenList),
    Markup {
        lines: Vec<String>,
    },
    Comment {
        lines: Vec<String>,
    },
    Table {
        header: Vec<TableCell>,
        aligns: Vec<Option<Alignment>>,
        rows: Vec<Vec<TableCell>>,
    },
}

struct OpenList {
    ordered: bool,
    start: u32,
    indent: usize,
    content_indent: usize,
    loose: bool,
    interrupted: bool,
    items: Vec<Vec<String>>,
}

enum Step {
    /// Line absorbed into the open block.
    Consumed,
    /// Open block finished; the line still needs classification.
    Reclassify,
    /// Open block finished and the line was part of it.
    Closed,
    /// Open block turned into a different one; the line is consumed.
    Replace(OpenBlock),
}

fn collect_blocks(
    ctx: &BlockContext<'_>,
    lines: &[String],
    references: &mut IndexMap<String, Reference>,
) -> Vec<RawBlock> {
    let mut blocks: Vec<RawBlock> = Vec::new();
    let mut open: Option<OpenBlock> = None;

    for raw_line in lines {
        let line = Line::new(raw_line);

        if let Some(block) = open.as_mut() {
            match continue_block(ctx, block, &line, &mut blocks) {
                Step::Consumed => continue,
                Step::Closed => {
                    finish(ctx, open.take().unwrap(), &mut blocks, references);
                    continue;
                }
                Step::Replace(next) => {
                    open = Some(next);
                    continue;
                }
                Step::Reclassify => {
                    finish(ctx, open.take().unwrap(), &mut blocks, references);
                }
            }
        }

        if line.is_blank() {
            continue;
        }
        open = start_block(ctx, &line, &mut blocks, references);
    }

    if let Some(block) = open.take() {
        finish(ctx, block, &mut blocks, references);
    }
    blocks
}

fn continue_block(
    ctx: &BlockContext<'_>,
    block: &mut OpenBlock,
    line: &Line<'_>,
    blocks: &mut Vec<RawBlock>,
) -> Step {
    let settings = ctx.settings;
    match block {
        OpenBlock::Paragraph { lines } => {
            if line.is_blank() {
                return Step::Closed;
            }
            // Setext underline promotes the open paragraph to a heading.
            if settings.headings.enabled && line.indent < 4 && lines.len() == 1 {
                if let Some(caps) = SETEXT_UNDERLINE.captures(line.text) {
                    let level = if caps[1].starts_with('=') { 1 } else { 2 };
                    if settings.headings.level_allowed(level) {
                        let text = lines[0].clone();
                        blocks.push(heading_from_text(settings, level, &text));
                        lines.clear();
                        return Step::Closed;
                    }
                }
            }
            // A delimiter row under a single candidate line opens a table.
            if settings.tables.enabled
                && lines.len() == 1
                && lines[0].contains('|')
                && TABLE_DELIMITER.is_match(line.text.trim_end())
            {
                let aligns = parse_alignments(line.text);
                let header: Vec<TableCell> = split_row(&lines[0])
                    .into_iter()
                    .enumerate()
                    .map(|(i, cell)| TableCell::new(cell, aligns.get(i).copied().flatten()))
                    .collect();
                return Step::Replace(OpenBlock::Table {
                    header,
                    aligns,
                    rows: Vec::new(),
                });
            }
            if interrupts_paragraph(ctx, line) {
                return Step::Reclassify;
            }
            lines.push(line.text.to_string());
            Step::Consumed
        }

        OpenBlock::Fenced {
            marker,
            opener_len,
            lines,
            ..
        } => {
            let trimmed = line.text.trim_end();
            let closer_len = trimmed.chars().take_while(|c| c == marker).count();
            if closer_len >= *opener_len && trimmed.chars().all(|c| c == *marker) {
                return Step::Closed;
            }
            lines.push(line.body.to_string());
            Step::Consumed
        }

        OpenBlock::Math {
            right,
            lines,
            pending_blanks,
            complete,
            ..
        } => {
            if line.is_blank() {
                *pending_blanks += 1;
                return Step::Consumed;
            }
            if line.text == right.as_str() {
                *complete = true;
                return Step::Closed;
            }
            for _ in 0..*pending_blanks {
                lines.push(String::new());
            }
            *pending_blanks = 0;
            lines.push(line.body.to_string());
            Step::Consumed
        }

        OpenBlock::IndentedCode {
            lines,
            pending_blanks,
        } => {
            if line.is_blank() {
                *pending_blanks += 1;
                return Step::Consumed;
            }
            if line.indent >= 4 {
                for _ in 0..*pending_blanks {
                    lines.push(String::new());
                }
                *pending_blanks = 0;
                lines.push(line.body[4..].to_string());
                return Step::Consumed;
            }
            Step::Reclassify
        }

        OpenBlock::Quote { lines, interrupted } => {
            if line.is_blank() {
                *interrupted = true;
                return Step::Consumed;
            }
            if let Some(rest) = line.text.strip_prefix('>') {
                *interrupted = false;
                lines.push(rest.strip_prefix(' ').unwrap_or(rest).to_string());
                return Step::Consumed;
            }
            if !*interrupted {
                lines.push(line.text.to_string());
                return Step::Consumed;
            }
            Step::Reclassify
        }

        OpenBlock::List(list) => continue_list(ctx, list, line),

        OpenBlock::Markup { lines } => {
            if line.is_blank() {
                return Step::Closed;
            }
            lines.push(line.body.to_string());
            Step::Consumed
        }

        OpenBlock::Comment { lines } => {
            lines.push(line.body.to_string());
            if line.body.contains("-->") {
                return Step::Closed;
            }
            Step::Consumed
        }

        OpenBlock::Table { aligns, rows, .. } => {
            if line.is_blank() || !line.text.contains('|') {
                return Step::Reclassify;
            }
            let cells: Vec<TableCell> = split_row(line.text)
                .into_iter()
                .enumerate()
                .map(|(i, cell)| TableCell::new(cell, aligns.get(i).copied().flatten()))
                .collect();
            rows.push(cells);
            Step::Consumed
        }
    }
}

fn continue_list(ctx: &BlockContext<'_>, list: &mut OpenList, line: &Line<'_>) -> Step {
    if line.is_blank() {
        list.interrupted = true;
        return Step::Consumed;
    }

    // Same-level marker: a new item, unless the list kind changes.
    if line.indent <= list.indent {
        if let Some(caps) = LIST_MARKER.captures(line.text) {
            let marker = &caps[1];
            let ordered = marker.ends_with('.') || marker.ends_with(')');
            if ordered != list.ordered {
                return Step::Reclassify;
            }
            if list.interrupted {
                list.loose = true;
                list.interrupted = false;
            }
            let content = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let used = line.text.len() - content.len();
            list.content_indent = line.indent + used.max(marker.len() + 1);
            list.items.push(vec![content.to_string()]);
            return Step::Consumed;
        }
    }

    // Indented continuation, dedented into the current item.
    if line.indent >= list.content_indent {
        if list.interrupted {
            if let Some(item) = list.items.last_mut() {
                item.push(String::new());
            }
            list.interrupted = false;
        }
        if let Some(item) = list.items.last_mut() {
            item.push(line.body[list.content_indent..].to_string());
        }
        return Step::Consumed;
    }

    // Lazy continuation of the item's trailing paragraph.
    if !list.interrupted && !interrupts_paragraph(ctx, line) {
        if let Some(item) = list.items.last_mut() {
            item.push(line.text.to_string());
        }
        return Step::Consumed;
    }

    Step::Reclassify
}

/// Block openers that cut a paragraph (or a lazily-continued item) short.
fn interrupts_paragraph(ctx: &BlockContext<'_>, line: &Line<'_>) -> bool {
    let settings = ctx.settings;
    if line.indent >= 4 {
        return false;
    }
    let text = line.text;
    if settings.headings.enabled && text.starts_with('#') && ATX_HEADING.is_match(text) {
        return true;
    }
    if settings.quotes && text.starts_with('>') {
        return true;
    }
    if settings.code.enabled
        && settings.code.blocks
        && (text.starts_with("```") || text.starts_with("~~~"))
    {
        return true;
    }
    if settings.thematic_breaks && THEMATIC_BREAK.is_match(text).unwrap_or(false) {
        return true;
    }
    if settings.lists.enabled {
        if let Some(caps) = LIST_MARKER.captures(text) {
            let marker = &caps[1];
            // Only unordered markers and a list starting at one interrupt.
            if !marker.ends_with('.') && !marker.ends_with(')') {
                return true;
            }
            if marker == "1." || marker == "1)" {
                return true;
            }
        }
    }
    if math_block_open(settings, text).is_some() {
        return true;
    }
    if settings.markup && text.starts_with('<') {
        if let Some(caps) = MARKUP_BLOCK_OPEN.captures(text) {
            if !TEXT_LEVEL_ELEMENTS.contains(&caps[1].to_lowercase().as_str()) {
                return true;
            }
        }
    }
    false
}

fn math_block_open(settings: &Settings, text: &str) -> Option<(String, String)> {
    let math = &settings.math;
    if !math.enabled || !math.block.enabled {
        return None;
    }
    math.block
        .delimiters
        .iter()
        .find(|d| text == d.left)
        .map(|d| (d.left.clone(), d.right.clone()))
}

fn start_block(
    ctx: &BlockContext<'_>,
    line: &Line<'_>,
    blocks: &mut Vec<RawBlock>,
    references: &mut IndexMap<String, Reference>,
) -> Option<OpenBlock> {
    let settings = ctx.settings;

    if line.indent >= 4 {
        if settings.code.enabled && settings.code.blocks {
            return Some(OpenBlock::IndentedCode {
                lines: vec![line.body[4..].to_string()],
                pending_blanks: 0,
            });
        }
        return Some(OpenBlock::Paragraph {
            lines: vec![line.text.to_string()],
        });
    }

    let text = line.text;

    if let Some((left, right)) = math_block_open(settings, text) {
        trace!("opening math block with {left}");
        return Some(OpenBlock::Math {
            left,
            right,
            lines: Vec::new(),
            pending_blanks: 0,
            complete: false,
        });
    }

    if settings.headings.enabled && text.starts_with('#') {
        if let Some(caps) = ATX_HEADING.captures(text) {
            let level = caps[1].len() as u8;
            if settings.headings.level_allowed(level) {
                let body = caps.get(2).map(|m| m.as_str()).unwrap_or("");
                blocks.push(heading_from_text(settings, level, body));
                return None;
            }
        }
    }

    if settings.quotes {
        if let Some(rest) = text.strip_prefix('>') {
            return Some(OpenBlock::Quote {
                lines: vec![rest.strip_prefix(' ').unwrap_or(rest).to_string()],
                interrupted: false,
            });
        }
    }

    if settings.code.enabled && settings.code.blocks {
        if let Some(caps) = FENCE_OPEN.captures(text) {
            let fence = caps[1].to_string();
            let language = caps[2].trim().split_whitespace().next().map(str::to_string);
            return Some(OpenBlock::Fenced {
                marker: fence.chars().next().unwrap_or('`'),
                opener_len: fence.len(),
                language,
                lines: Vec::new(),
            });
        }
    }

    if settings.thematic_breaks && THEMATIC_BREAK.is_match(text).unwrap_or(false) {
        blocks.push(RawBlock::Rule);
        return None;
    }

    if settings.references && text.starts_with('[') {
        if let Some(caps) = REFERENCE_DEFINITION.captures(text) {
            references.insert(
                caps[1].to_lowercase(),
                Reference {
                    url: caps[2].to_string(),
                    title: caps.get(3).map(|m| m.as_str().to_string()),
                },
            );
            return None;
        }
    }

    if settings.lists.enabled {
        if let Some(caps) = LIST_MARKER.captures(text) {
            let marker = &caps[1];
            let ordered = marker.ends_with('.') || marker.ends_with(')');
            let start = if ordered {
                marker[..marker.len() - 1].parse().unwrap_or(1)
            } else {
                1
            };
            let content = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let used = text.len() - content.len();
            return Some(OpenBlock::List(OpenList {
                ordered,
                start,
                indent: line.indent,
                content_indent: line.indent + used.max(marker.len() + 1),
                loose: false,
                interrupted: false,
                items: vec![vec![content.to_string()]],
            }));
        }
    }

    if settings.comments && text.starts_with("<!--") {
        if line.body.contains("-->") {
            blocks.push(RawBlock::Markup {
                html: line.body.to_string(),
            });
            return None;
        }
        return Some(OpenBlock::Comment {
            lines: vec![line.body.to_string()],
        });
    }

    if settings.markup && text.starts_with('<') {
        if let Some(caps) = MARKUP_BLOCK_OPEN.captures(text) {
            let tag = caps[1].to_lowercase();
            if !TEXT_LEVEL_ELEMENTS.contains(&tag.as_str()) {
                return Some(OpenBlock::Markup {
                    lines: vec![line.body.to_string()],
                });
            }
        }
    }

    Some(OpenBlock::Paragraph {
        lines: vec![text.to_string()],
    })
}

fn finish(
    ctx: &BlockContext<'_>,
    open: OpenBlock,
    blocks: &mut Vec<RawBlock>,
    references: &mut IndexMap<String, Reference>,
) {
    match open {
        OpenBlock::Paragraph { lines } => {
            if lines.iter().any(|l| !l.trim().is_empty()) {
                blocks.push(RawBlock::Paragraph { lines });
            }
        }
        OpenBlock::Fenced {
            language, lines, ..
        } => {
            blocks.push(RawBlock::Fenced {
                language,
                body: lines.join("\n"),
            });
        }
        OpenBlock::Math {
            left,
            right,
            lines,
            complete,
            ..
        } => {
            let mut accumulated = String::new();
            for body in &lines {
                accumulated.push('\n');
                accumulated.push_str(body);
            }
            // An unterminated block surfaces its raw text, delimiters lost.
            let text = if complete {
                format!("{left}{accumulated}{right}")
            } else {
                accumulated
            };
            blocks.push(RawBlock::Math { text });
        }
        OpenBlock::IndentedCode { lines, .. } => {
            blocks.push(RawBlock::IndentedCode {
                body: lines.join("\n"),
            });
        }
        OpenBlock::Quote { lines, .. } => {
            let inner = collect_blocks(ctx, &lines, references);
            blocks.push(RawBlock::Quote { blocks: inner });
        }
        OpenBlock::List(list) => {
            let items = list
                .items
                .into_iter()
                .map(|mut lines| {
                    let mut task = None;
                    if ctx.settings.lists.tasks {
                        if let Some(first) = lines.first_mut() {
                            if let Some(caps) = TASK_MARKER.captures(first) {
                                task = Some(caps[1].eq_ignore_ascii_case("x"));
                                *first = first[caps.get(0).unwrap().end()..].to_string();
                            }
                        }
                    }
                    let loose = lines.iter().any(|l| l.trim().is_empty());
                    let inner = collect_blocks(ctx, &lines, references);
                    RawItem {
                        blocks: inner,
                        loose,
                        task,
                    }
                })
                .collect();
            blocks.push(RawBlock::List {
                ordered: list.ordered,
                start: list.start,
                loose: list.loose,
                items,
            });
        }
        OpenBlock::Markup { lines } | OpenBlock::Comment { lines } => {
            blocks.push(RawBlock::Markup {
                html: lines.join("\n"),
            });
        }
        OpenBlock::Table { header, rows, .. } => {
            blocks.push(RawBlock::Table { header, rows });
        }
    }
}

fn heading_from_text(settings: &Settings, level: u8, text: &str) -> RawBlock {
    let mut body = text.trim().to_string();
    let mut explicit_id = None;
    let mut classes = None;
    if settings.special_attributes {
        if let Some(caps) = HEADING_ATTRIBUTES.captures(&body) {
            let start = caps.get(0).unwrap().start();
            let (id, class) = parse_attributes(&caps[1]);
            explicit_id = id;
            classes = class;
            body.truncate(start);
            let end = body.trim_end().len();
            body.truncate(end);
        }
    }
    RawBlock::Heading {
        level,
        text: body,
        explicit_id,
        classes,
    }
}

fn parse_attributes(data: &str) -> (Option<String>, Option<String>) {
    let mut id = None;
    let mut classes = Vec::new();
    for piece in data.split_whitespace() {
        if let Some(rest) = piece.strip_prefix('#') {
            id = Some(rest.to_string());
        } else if let Some(rest) = piece.strip_prefix('.') {
            classes.push(rest.to_string());
        }
    }
    let class = if classes.is_empty() {
        None
    } else {
        Some(classes.join(" "))
    };
    (id, class)
}

/// Splits a table line on unescaped pipes; `\|` stays in the cell for the
/// inline escape pass to unwrap.
fn split_row(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut escaped = false;
    for ch in trimmed.chars() {
        if escaped {
            current.push('\\');
            current.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '|' {
            cells.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }
    if escaped {
        current.push('\\');
    }
    let last = current.trim().to_string();
    if !last.is_empty() {
        cells.push(last);
    }
    cells
}

fn parse_alignments(text: &str) -> Vec<Option<Alignment>> {
    split_row(text)
        .into_iter()
        .map(|cell| {
            let starts = cell.starts_with(':');
            let ends = cell.ends_with(':');
            match (starts, ends) {
                (true, true) => Some(Alignment::Center),
                (true, false) => Some(Alignment::Left),
                (false, true) => Some(Alignment::Right),
                (false, false) => None,
            }
        })
        .collect()
}

// --- Rendering ----------------------------------------------------------

struct RenderContext<'a> {
    registry: &'a MarkerRegistry,
    inline: InlineContext<'a>,
}

fn inline_nodes(rc: &RenderContext<'_>, text: &str) -> Vec<Node> {
    parse_line(rc.registry, &rc.inline, text, &[])
}

fn render_tree(
    rc: &RenderContext<'_>,
    sink: &mut dyn HeadingSink,
    blocks: &[RawBlock],
) -> Vec<Node> {
    blocks
        .iter()
        .map(|block| render_block(rc, sink, block))
        .collect()
}

fn render_block(rc: &RenderContext<'_>, sink: &mut dyn HeadingSink, block: &RawBlock) -> Node {
    let settings = rc.inline.settings;
    match block {
        RawBlock::Paragraph { lines } => {
            Node::element("p", Content::Children(inline_nodes(rc, &lines.join("\n"))))
        }

        RawBlock::Heading {
            level,
            text,
            explicit_id,
            classes,
        } => {
            let children = inline_nodes(rc, text);
            let rendered: String = children.iter().map(Node::render).collect();
            let plain = STRIP_TAGS.replace_all(&rendered, "").trim().to_string();
            let id = sink.heading(*level, text, &plain, explicit_id.as_deref());

            let mut node = Node::element(&format!("h{level}"), Content::Children(children));
            if let Some(id) = id {
                node.set_attr("id", id);
            }
            if let Some(classes) = classes {
                node.set_attr("class", classes.clone());
            }
            node
        }

        RawBlock::Fenced { language, body } => {
            if settings.diagrams.enabled {
                match language.as_deref() {
                    Some("mermaid") if settings.diagrams.mermaid => {
                        return Node::element("div", Content::Text(body.clone()))
                            .with_attr("class", "mermaid");
                    }
                    Some("chart") if settings.diagrams.chartjs => {
                        return Node::element("canvas", Content::Text(body.clone()))
                            .with_attr("class", "chartjs");
                    }
                    _ => {}
                }
            }
            let mut code = Node::element("code", Content::Text(body.clone()));
            if let Some(language) = language {
                code.set_attr("class", format!("language-{language}"));
            }
            Node::element("pre", Content::Children(vec![code]))
        }

        RawBlock::IndentedCode { body } => Node::element(
            "pre",
            Content::Children(vec![Node::element("code", Content::Text(body.clone()))]),
        ),

        RawBlock::Math { text } => Node::text(text.clone()),

        RawBlock::Quote { blocks } => Node::element(
            "blockquote",
            Content::Children(render_tree(rc, sink, blocks)),
        ),

        RawBlock::List {
            ordered,
            start,
            loose,
            items,
        } => {
            let children: Vec<Node> = items
                .iter()
                .map(|item| render_item(rc, sink, *loose, item))
                .collect();
            let name = if *ordered { "ol" } else { "ul" };
            let mut node = Node::element(name, Content::Children(children));
            if *ordered && *start != 1 {
                node.set_attr("start", start.to_string());
            }
            node
        }

        RawBlock::Table { header, rows } => render_table(rc, settings, header, rows),

        RawBlock::Rule => Node::element("hr", Content::Empty),

        RawBlock::Markup { html } => Node::raw(html.clone()),
    }
}

fn render_item(
    rc: &RenderContext<'_>,
    sink: &mut dyn HeadingSink,
    list_loose: bool,
    item: &RawItem,
) -> Node {
    let mut rendered = render_tree(rc, sink, &item.blocks);
    let loose = list_loose || item.loose;

    let checkbox = item.task.map(|checked| {
        let mut input = Node::element("input", Content::Empty)
            .with_attr("type", "checkbox")
            .with_attr("disabled", "disabled");
        if checked {
            input.set_attr("checked", "checked");
        }
        input
    });

    let mut children: Vec<Node> = Vec::new();
    if loose {
        if let Some(input) = checkbox {
            match rendered.first_mut() {
                Some(first) if first.name.as_deref() == Some("p") => {
                    if let Content::Children(kids) = &mut first.content {
                        kids.insert(0, input);
                    }
                }
                _ => children.push(input),
            }
        }
        children.extend(rendered);
    } else {
        if let Some(input) = checkbox {
            children.push(input);
        }
        let mut iter = rendered.into_iter();
        if let Some(first) = iter.next() {
            if first.name.as_deref() == Some("p") {
                if let Content::Children(kids) = first.content {
                    children.extend(kids);
                } else {
                    children.push(first);
                }
            } else {
                children.push(first);
            }
        }
        children.extend(iter);
    }
    Node::element("li", Content::Children(children))
}

fn render_table(
    rc: &RenderContext<'_>,
    settings: &Settings,
    header: &[TableCell],
    rows: &[Vec<TableCell>],
) -> Node {
    let mut header = header.to_vec();
    let mut rows = rows.to_vec();
    if settings.tables.tablespan {
        collapse_spans(&mut header, &mut rows);
    }

    let cell_node = |tag: &str, cell: &TableCell| {
        let mut node = Node::element(tag, Content::Children(inline_nodes(rc, &cell.raw)));
        if let Some(align) = cell.align {
            node.set_attr("style", align.style());
        }
        if cell.colspan > 1 {
            node.set_attr("colspan", cell.colspan.to_string());
        }
        if cell.rowspan > 1 {
            node.set_attr("rowspan", cell.rowspan.to_string());
        }
        node
    };

    let header_row = Node::element(
        "tr",
        Content::Children(header.iter().map(|c| cell_node("th", c)).collect()),
    );
    let thead = Node::element("thead", Content::Children(vec![header_row]));

    let body_rows: Vec<Node> = rows
        .iter()
        .map(|row| {
            Node::element(
                "tr",
                Content::Children(row.iter().map(|c| cell_node("td", c)).collect()),
            )
        })
        .collect();
    let tbody = Node::element("tbody", Content::Children(body_rows));

    Node::element("table", Content::Children(vec![thead, tbody]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::render_blocks;

    fn convert_with(settings: Settings, text: &str) -> String {
        let registry = MarkerRegistry::default();
        let math = MathPatterns::compile(&settings.math);
        let ctx = BlockContext {
            settings: &settings,
            registry: &registry,
            math: &math,
        };
        let nodes = parse_document(&ctx, &mut NoAnchors, text);
        render_blocks(&nodes)
    }

    fn convert(text: &str) -> String {
        convert_with(Settings::default(), text)
    }

    #[test]
    fn headings_and_paragraphs() {
        assert_eq!(convert("# Title\n\ntext"), "<h1>Title</h1>\n<p>text</p>");
    }

    #[test]
    fn hash_without_space_is_a_paragraph() {
        assert_eq!(convert("#nope"), "<p>#nope</p>");
    }

    #[test]
    fn setext_underline_promotes_a_paragraph() {
        assert_eq!(convert("Title\n====="), "<h1>Title</h1>");
    }

    #[test]
    fn heading_attributes_set_id_and_class() {
        assert_eq!(
            convert("# Title {#custom .big}"),
            "<h1 id=\"custom\" class=\"big\">Title</h1>"
        );
    }

    #[test]
    fn disallowed_heading_level_degrades_to_paragraph() {
        let mut settings = Settings::default();
        settings.headings.allowed = vec!["h2".to_string()];
        assert_eq!(convert_with(settings, "# nope"), "<p># nope</p>");
    }

    #[test]
    fn fenced_code_keeps_language_class() {
        assert_eq!(
            convert("```rust\nfn main() {}\n```"),
            "<pre><code class=\"language-rust\">fn main() {}</code></pre>"
        );
    }

    #[test]
    fn indented_code_is_verbatim() {
        assert_eq!(
            convert("    let x = 1;"),
            "<pre><code>let x = 1;</code></pre>"
        );
    }

    #[test]
    fn blockquote_parses_its_body_recursively() {
        assert_eq!(
            convert("> # Hi\n> there"),
            "<blockquote><h1>Hi</h1><p>there</p></blockquote>"
        );
    }

    #[test]
    fn tight_list_unwraps_item_paragraphs() {
        assert_eq!(convert("- a\n- b"), "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn loose_list_keeps_item_paragraphs() {
        assert_eq!(
            convert("- a\n\n- b"),
            "<ul><li><p>a</p></li><li><p>b</p></li></ul>"
        );
    }

    #[test]
    fn nested_list_from_indented_marker() {
        assert_eq!(
            convert("- a\n  - b"),
            "<ul><li>a<ul><li>b</li></ul></li></ul>"
        );
    }

    #[test]
    fn ordered_list_carries_its_start() {
        assert_eq!(
            convert("3. a\n4. b"),
            "<ol start=\"3\"><li>a</li><li>b</li></ol>"
        );
    }

    #[test]
    fn task_items_render_disabled_checkboxes() {
        assert_eq!(
            convert("- [x] done\n- [ ] open"),
            "<ul>\
             <li><input type=\"checkbox\" disabled=\"disabled\" checked=\"checked\" />done</li>\
             <li><input type=\"checkbox\" disabled=\"disabled\" />open</li>\
             </ul>"
        );
    }

    #[test]
    fn thematic_break() {
        assert_eq!(convert("---"), "<hr />");
    }

    #[test]
    fn reference_definitions_resolve_forward() {
        assert_eq!(
            convert("see [label]\n\n[label]: https://e.com"),
            "<p>see <a href=\"https://e.com\">label</a></p>"
        );
    }

    #[test]
    fn table_with_alignments() {
        assert_eq!(
            convert("| a | b |\n|:--|--:|\n| 1 | 2 |"),
            "<table>\
             <thead><tr>\
             <th style=\"text-align: left;\">a</th>\
             <th style=\"text-align: right;\">b</th>\
             </tr></thead>\
             <tbody><tr>\
             <td style=\"text-align: left;\">1</td>\
             <td style=\"text-align: right;\">2</td>\
             </tr></tbody>\
             </table>"
        );
    }

    #[test]
    fn table_header_colspan_from_marker_cell() {
        let out = convert("| > | wide |\n| --- | --- |\n| a | b |");
        assert!(out.contains("<th colspan=\"2\">wide</th>"), "{out}");
    }

    #[test]
    fn html_block_passes_through() {
        assert_eq!(convert("<div>\nhi\n</div>"), "<div>\nhi\n</div>");
    }

    #[test]
    fn span_level_tag_starts_a_paragraph() {
        assert_eq!(convert("<em>hi</em> there"), "<p><em>hi</em> there</p>");
    }

    #[test]
    fn math_block_round_trips_its_delimiters() {
        let mut settings = Settings::default();
        settings.math.enabled = true;
        assert_eq!(convert_with(settings, "$$\nx+y\n$$"), "$$\nx+y$$");
    }

    #[test]
    fn unterminated_math_surfaces_raw_text() {
        let mut settings = Settings::default();
        settings.math.enabled = true;
        assert_eq!(convert_with(settings, "$$\nx+y"), "\nx+y");
    }

    #[test]
    fn diagram_fence_redirects_to_container() {
        let mut settings = Settings::default();
        settings.diagrams.enabled = true;
        assert_eq!(
            convert_with(settings, "```mermaid\ngraph TD;\n```"),
            "<div class=\"mermaid\">graph TD;</div>"
        );
    }
}
