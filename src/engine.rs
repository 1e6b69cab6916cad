//! The conversion engine.
//!
//! An engine owns the settings tree plus everything derived from it (the
//! marker registry and the compiled math delimiter patterns) and the
//! per-conversion state (issued anchors, the running table of contents).
//! Derived state is rebuilt whenever a setting changes; per-conversion state
//! resets at the top of every `convert` call, so repeated conversions of the
//! same input yield identical output.

use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;

use crate::block::{parse_document, BlockContext, HeadingSink, NoAnchors};
use crate::error::{SettingsError, TocError};
use crate::handlers::MathPatterns;
use crate::node::render_blocks;
use crate::registry::{Handler, MarkerRegistry};
use crate::settings::{SettingValue, Settings};
use crate::toc::{
    anchor_slug, hashed_tag, validate_toc_tag, AnchorRegistry, ContentsList, HeadingRecord,
    TOC_ID_DEFAULT,
};

type AnchorCallback = Box<dyn Fn(&str) -> String>;

pub struct Engine {
    settings: Settings,
    registry: MarkerRegistry,
    math: MathPatterns,
    anchor_callback: Option<AnchorCallback>,
    toc_id: String,
    salt: String,
    anchors: AnchorRegistry,
    contents: ContentsList,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let registry = build_registry(&settings);
        let math = MathPatterns::compile(&settings.math);
        Engine {
            settings,
            registry,
            math,
            anchor_callback: None,
            toc_id: TOC_ID_DEFAULT.to_string(),
            salt: fresh_salt(),
            anchors: AnchorRegistry::default(),
            contents: ContentsList::default(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Converts one markdown document to HTML.
    pub fn convert(&mut self, text: &str) -> String {
        self.anchors.reset();
        self.contents.reset();

        let tag = self.settings.toc.tag.clone();
        let has_tag = self.settings.toc.enabled && text.contains(tag.as_str());
        if !has_tag {
            return self.render_body(text);
        }

        // The placeholder is swapped for an opaque hash during parsing so the
        // tag text can never be reinterpreted as grammar syntax.
        let hashed = hashed_tag(&self.salt, &tag);
        let encoded = text.replace(tag.as_str(), &hashed);
        let body = self.render_body(&encoded);

        let container = format!("<div id=\"{}\">{}</div>", self.toc_id, self.toc_markup());
        body.replace(&format!("<p>{hashed}</p>"), &container)
            .replace(&hashed, &tag)
    }

    /// Returns the table of contents of the last conversion. `markup`,
    /// `string` and `html` yield the rendered list; `structured` and `json`
    /// yield the heading records as JSON.
    pub fn table_of_contents(&self, format: &str) -> Result<String, TocError> {
        match format {
            "markup" | "string" | "html" => Ok(self.toc_markup()),
            "structured" | "json" => Ok(self.contents.to_json()),
            other => Err(TocError::UnknownFormat(other.to_string())),
        }
    }

    /// Heading records collected by the last conversion, in document order.
    pub fn headings(&self) -> &[HeadingRecord] {
        self.contents.records()
    }

    /// Overrides slug derivation; the callback receives the heading's plain
    /// text and its result is still deduplicated.
    pub fn set_anchor_callback(&mut self, callback: impl Fn(&str) -> String + 'static) {
        self.anchor_callback = Some(Box::new(callback));
    }

    pub fn set_setting(
        &mut self,
        path: &str,
        value: impl Into<SettingValue>,
    ) -> Result<(), SettingsError> {
        self.settings.set(path, value.into(), false)?;
        self.refresh();
        Ok(())
    }

    /// Like [`set_setting`](Self::set_setting) but list-like values replace
    /// the current value instead of merging into it.
    pub fn set_setting_overwrite(
        &mut self,
        path: &str,
        value: impl Into<SettingValue>,
    ) -> Result<(), SettingsError> {
        self.settings.set(path, value.into(), true)?;
        self.refresh();
        Ok(())
    }

    pub fn get_setting(&self, path: &str) -> Result<SettingValue, SettingsError> {
        self.settings.get(path)
    }

    pub fn set_toc_tag(&mut self, tag: &str) -> Result<(), SettingsError> {
        self.settings.toc.tag = validate_toc_tag(tag)?;
        Ok(())
    }

    pub fn set_toc_id(&mut self, id: &str) {
        self.toc_id = id.to_string();
    }

    fn refresh(&mut self) {
        self.registry = build_registry(&self.settings);
        self.math = MathPatterns::compile(&self.settings.math);
        debug!("rebuilt registry and math patterns after settings change");
    }

    fn render_body(&mut self, text: &str) -> String {
        let Engine {
            settings,
            registry,
            math,
            anchor_callback,
            anchors,
            contents,
            ..
        } = self;
        let ctx = BlockContext {
            settings,
            registry,
            math,
        };
        let mut sink = EngineSink {
            settings,
            callback: anchor_callback.as_deref(),
            anchors,
            contents,
        };
        render_blocks(&parse_document(&ctx, &mut sink, text))
    }

    /// Renders the accumulated ToC markdown to its HTML list.
    fn toc_markup(&self) -> String {
        if self.contents.is_empty() {
            return String::new();
        }
        let ctx = BlockContext {
            settings: &self.settings,
            registry: &self.registry,
            math: &self.math,
        };
        render_blocks(&parse_document(&ctx, &mut NoAnchors, self.contents.markdown()))
    }
}

/// Extra inline triggers come from configuration: each inline math delimiter
/// contributes its first character.
fn build_registry(settings: &Settings) -> MarkerRegistry {
    let mut registry = MarkerRegistry::default();
    if settings.math.enabled && settings.math.inline.enabled {
        for delimiter in &settings.math.inline.delimiters {
            if let Some(ch) = delimiter.left.chars().next() {
                registry.register(ch, Handler::MathNotation);
            }
        }
        registry.demote_special_characters();
    }
    registry
}

fn fresh_salt() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    blake3::hash(&nanos.to_le_bytes()).to_hex().to_string()
}

struct EngineSink<'a> {
    settings: &'a Settings,
    callback: Option<&'a (dyn Fn(&str) -> String)>,
    anchors: &'a mut AnchorRegistry,
    contents: &'a mut ContentsList,
}

impl HeadingSink for EngineSink<'_> {
    fn heading(
        &mut self,
        level: u8,
        raw: &str,
        plain: &str,
        explicit_id: Option<&str>,
    ) -> Option<String> {
        let auto = &self.settings.headings.auto_anchors;
        let id = if let Some(explicit) = explicit_id {
            Some(explicit.to_string())
        } else if let Some(callback) = self.callback {
            Some(self.anchors.uniquify(callback(plain), &auto.blacklist))
        } else if auto.enabled {
            Some(self.anchors.uniquify(anchor_slug(plain, auto), &auto.blacklist))
        } else {
            None
        };

        if self.settings.toc.enabled && self.settings.toc.level_listed(level) {
            if let Some(id) = &id {
                self.contents.push(raw.to_string(), plain, id.clone(), level);
            }
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_headings_get_counted_anchors() {
        let mut engine = Engine::new();
        let out = engine.convert("# Intro\n\n# Intro");
        assert!(out.contains("<h1 id=\"intro\">"), "{out}");
        assert!(out.contains("<h1 id=\"intro-1\">"), "{out}");
    }

    #[test]
    fn placeholder_expands_to_contents_container() {
        let mut engine = Engine::new();
        let out = engine.convert("[toc]\n\n# One\n\n## Two");
        assert!(out.starts_with("<div id=\"toc\">"), "{out}");
        assert!(out.contains("<a href=\"#one\">One</a>"), "{out}");
        assert!(out.contains("<a href=\"#two\">Two</a>"), "{out}");
        assert!(out.contains("<h1 id=\"one\">One</h1>"), "{out}");
    }

    #[test]
    fn placeholder_without_headings_leaves_empty_container() {
        let mut engine = Engine::new();
        assert_eq!(engine.convert("[toc]"), "<div id=\"toc\"></div>");
    }

    #[test]
    fn document_without_placeholder_gets_no_container() {
        let mut engine = Engine::new();
        assert_eq!(engine.convert("# A"), "<h1 id=\"a\">A</h1>");
    }

    #[test]
    fn structured_toc_reports_ids_and_levels() {
        let mut engine = Engine::new();
        engine.convert("# One\n\n## Two");
        let json = engine.table_of_contents("json").unwrap();
        assert!(json.contains("\"id\":\"one\""), "{json}");
        assert!(json.contains("\"level\":2"), "{json}");
    }

    #[test]
    fn unknown_toc_format_is_an_error() {
        let engine = Engine::new();
        assert_eq!(
            engine.table_of_contents("yaml"),
            Err(TocError::UnknownFormat("yaml".to_string()))
        );
    }

    #[test]
    fn anchor_callback_overrides_slug_derivation() {
        let mut engine = Engine::new();
        engine.set_anchor_callback(|text| format!("x-{}", text.to_lowercase()));
        let out = engine.convert("# Hi");
        assert!(out.contains("<h1 id=\"x-hi\">"), "{out}");
    }

    #[test]
    fn inline_math_survives_verbatim_once_enabled() {
        let mut engine = Engine::new();
        engine.set_setting("math", true).unwrap();
        assert_eq!(engine.convert("\\(x^2\\)"), "<p>\\(x^2\\)</p>");
    }

    #[test]
    fn custom_toc_tag_is_validated() {
        let mut engine = Engine::new();
        assert!(engine.set_toc_tag("<toc>").is_err());
        engine.set_toc_tag("{{toc}}").unwrap();
        let out = engine.convert("{{toc}}\n\n# A");
        assert!(out.starts_with("<div id=\"toc\">"), "{out}");
    }

    #[test]
    fn custom_container_id() {
        let mut engine = Engine::new();
        engine.set_toc_id("contents");
        let out = engine.convert("[toc]\n\n# A");
        assert!(out.starts_with("<div id=\"contents\">"), "{out}");
    }

    #[test]
    fn conversions_are_deterministic() {
        let mut engine = Engine::new();
        let first = engine.convert("[toc]\n\n# A\n\n# A");
        let second = engine.convert("[toc]\n\n# A\n\n# A");
        assert_eq!(first, second);
    }
}
