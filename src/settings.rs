//! Feature configuration tree.
//!
//! Every syntax extension is independently toggleable. The tree is strongly
//! typed; the dotted-path accessors (`get`/`set`) are a closed match over the
//! known paths, so an unknown path or a wrong value kind fails fast instead
//! of silently creating state. A boolean assigned to a composite path sets
//! only its `enabled` flag and never touches sibling options.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// One left/right math delimiter pair, tried in list order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MathDelimiter {
    pub left: String,
    pub right: String,
}

impl MathDelimiter {
    pub fn new(left: &str, right: &str) -> Self {
        Self {
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmphasisSettings {
    pub enabled: bool,
    pub bold: bool,
    pub italic: bool,
    pub strikethroughs: bool,
    pub insertions: bool,
    pub subscript: bool,
    pub superscript: bool,
    pub keystrokes: bool,
    pub marking: bool,
}

impl Default for EmphasisSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            bold: true,
            italic: true,
            strikethroughs: true,
            insertions: true,
            subscript: false,
            superscript: false,
            keystrokes: true,
            marking: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeSettings {
    pub enabled: bool,
    pub blocks: bool,
    pub inline: bool,
}

impl Default for CodeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            blocks: true,
            inline: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramSettings {
    pub enabled: bool,
    pub chartjs: bool,
    pub mermaid: bool,
}

impl Default for DiagramSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            chartjs: true,
            mermaid: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoAnchorSettings {
    pub enabled: bool,
    pub delimiter: String,
    pub lowercase: bool,
    /// Literal find → replace pairs applied before normalization.
    pub replacements: Vec<(String, String)>,
    pub transliterate: bool,
    pub blacklist: Vec<String>,
}

impl Default for AutoAnchorSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            delimiter: "-".to_string(),
            lowercase: true,
            replacements: Vec::new(),
            transliterate: false,
            blacklist: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingSettings {
    pub enabled: bool,
    /// Heading levels recognized by the block grammar ("h1".."h6").
    pub allowed: Vec<String>,
    pub auto_anchors: AutoAnchorSettings,
}

impl Default for HeadingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed: all_levels(),
            auto_anchors: AutoAnchorSettings::default(),
        }
    }
}

impl HeadingSettings {
    pub fn level_allowed(&self, level: u8) -> bool {
        let tag = format!("h{level}");
        self.allowed.iter().any(|l| l == &tag)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSettings {
    pub enabled: bool,
    pub email_links: bool,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            email_links: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListSettings {
    pub enabled: bool,
    pub tasks: bool,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            tasks: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MathVariantSettings {
    pub enabled: bool,
    pub delimiters: Vec<MathDelimiter>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MathSettings {
    pub enabled: bool,
    pub inline: MathVariantSettings,
    pub block: MathVariantSettings,
}

impl Default for MathSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            inline: MathVariantSettings {
                enabled: true,
                delimiters: vec![MathDelimiter::new("\\(", "\\)")],
            },
            block: MathVariantSettings {
                enabled: true,
                delimiters: vec![
                    MathDelimiter::new("$$", "$$"),
                    MathDelimiter::new("\\begin{equation}", "\\end{equation}"),
                    MathDelimiter::new("\\begin{align}", "\\end{align}"),
                    MathDelimiter::new("\\begin{alignat}", "\\end{alignat}"),
                    MathDelimiter::new("\\begin{gather}", "\\end{gather}"),
                    MathDelimiter::new("\\begin{CD}", "\\end{CD}"),
                    MathDelimiter::new("\\[", "\\]"),
                ],
            },
        }
    }
}

impl Default for MathVariantSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            delimiters: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartSubstitutions {
    pub ellipses: String,
    pub left_angle_quote: String,
    pub left_double_quote: String,
    pub left_single_quote: String,
    pub mdash: String,
    pub ndash: String,
    pub right_angle_quote: String,
    pub right_double_quote: String,
    pub right_single_quote: String,
}

impl Default for SmartSubstitutions {
    fn default() -> Self {
        Self {
            ellipses: "&hellip;".to_string(),
            left_angle_quote: "&laquo;".to_string(),
            left_double_quote: "&ldquo;".to_string(),
            left_single_quote: "&lsquo;".to_string(),
            mdash: "&mdash;".to_string(),
            ndash: "&ndash;".to_string(),
            right_angle_quote: "&raquo;".to_string(),
            right_double_quote: "&rdquo;".to_string(),
            right_single_quote: "&rsquo;".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartSettings {
    pub enabled: bool,
    pub smart_angled_quotes: bool,
    pub smart_backticks: bool,
    pub smart_dashes: bool,
    pub smart_ellipses: bool,
    pub smart_quotes: bool,
    pub substitutions: SmartSubstitutions,
}

impl Default for SmartSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            smart_angled_quotes: true,
            smart_backticks: true,
            smart_dashes: true,
            smart_ellipses: true,
            smart_quotes: true,
            substitutions: SmartSubstitutions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    pub enabled: bool,
    pub tablespan: bool,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            tablespan: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TocSettings {
    pub enabled: bool,
    /// Levels that produce table-of-contents entries ("h1".."h6").
    pub headings: Vec<String>,
    pub tag: String,
}

impl Default for TocSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            headings: all_levels(),
            tag: "[toc]".to_string(),
        }
    }
}

impl TocSettings {
    pub fn level_listed(&self, level: u8) -> bool {
        let tag = format!("h{level}");
        self.headings.iter().any(|l| l == &tag)
    }
}

fn all_levels() -> Vec<String> {
    (1..=6).map(|n| format!("h{n}")).collect()
}

/// The full configuration tree, built once at engine construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub code: CodeSettings,
    pub comments: bool,
    pub diagrams: DiagramSettings,
    pub emojis: bool,
    pub emphasis: EmphasisSettings,
    pub headings: HeadingSettings,
    pub images: bool,
    pub links: LinkSettings,
    pub lists: ListSettings,
    pub markup: bool,
    pub math: MathSettings,
    pub quotes: bool,
    pub references: bool,
    pub smarty: SmartSettings,
    pub special_attributes: bool,
    pub tables: TableSettings,
    pub thematic_breaks: bool,
    pub toc: TocSettings,
    pub typographer: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            code: CodeSettings::default(),
            comments: true,
            diagrams: DiagramSettings::default(),
            emojis: true,
            emphasis: EmphasisSettings::default(),
            headings: HeadingSettings::default(),
            images: true,
            links: LinkSettings::default(),
            lists: ListSettings::default(),
            markup: true,
            math: MathSettings::default(),
            quotes: true,
            references: true,
            smarty: SmartSettings::default(),
            special_attributes: true,
            tables: TableSettings::default(),
            thematic_breaks: true,
            toc: TocSettings::default(),
            typographer: true,
        }
    }
}

/// A value flowing through the dotted-path accessors.
#[derive(Clone, Debug, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Str(String),
    List(Vec<String>),
    Pairs(Vec<(String, String)>),
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        SettingValue::Bool(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        SettingValue::Str(v.to_string())
    }
}

impl From<Vec<&str>> for SettingValue {
    fn from(v: Vec<&str>) -> Self {
        SettingValue::List(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<(&str, &str)>> for SettingValue {
    fn from(v: Vec<(&str, &str)>) -> Self {
        SettingValue::Pairs(
            v.into_iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
        )
    }
}

fn expect_bool(path: &str, value: SettingValue) -> Result<bool, SettingsError> {
    match value {
        SettingValue::Bool(b) => Ok(b),
        _ => Err(SettingsError::WrongKind {
            path: path.to_string(),
            expected: "boolean",
        }),
    }
}

fn expect_str(path: &str, value: SettingValue) -> Result<String, SettingsError> {
    match value {
        SettingValue::Str(s) => Ok(s),
        _ => Err(SettingsError::WrongKind {
            path: path.to_string(),
            expected: "string",
        }),
    }
}

fn expect_list(path: &str, value: SettingValue) -> Result<Vec<String>, SettingsError> {
    match value {
        SettingValue::List(v) => Ok(v),
        _ => Err(SettingsError::WrongKind {
            path: path.to_string(),
            expected: "list of strings",
        }),
    }
}

fn expect_pairs(path: &str, value: SettingValue) -> Result<Vec<(String, String)>, SettingsError> {
    match value {
        SettingValue::Pairs(v) => Ok(v),
        _ => Err(SettingsError::WrongKind {
            path: path.to_string(),
            expected: "list of pairs",
        }),
    }
}

fn merge_list(current: &mut Vec<String>, incoming: Vec<String>, overwrite: bool) {
    if overwrite {
        *current = incoming;
        return;
    }
    for item in incoming {
        if !current.contains(&item) {
            current.push(item);
        }
    }
}

fn merge_pairs(current: &mut Vec<(String, String)>, incoming: Vec<(String, String)>, overwrite: bool) {
    if overwrite {
        *current = incoming;
        return;
    }
    for (key, value) in incoming {
        if let Some(slot) = current.iter_mut().find(|(k, _)| k == &key) {
            slot.1 = value;
        } else {
            current.push((key, value));
        }
    }
}

fn delimiters_from_pairs(pairs: Vec<(String, String)>) -> Vec<MathDelimiter> {
    pairs
        .into_iter()
        .map(|(left, right)| MathDelimiter { left, right })
        .collect()
}

fn delimiters_to_pairs(delims: &[MathDelimiter]) -> Vec<(String, String)> {
    delims
        .iter()
        .map(|d| (d.left.clone(), d.right.clone()))
        .collect()
}

impl Settings {
    /// Reads the effective value at a dotted path. A composite path reports
    /// its `enabled` flag.
    pub fn get(&self, path: &str) -> Result<SettingValue, SettingsError> {
        use SettingValue::*;
        let value = match path {
            "code" | "code.enabled" => Bool(self.code.enabled),
            "code.blocks" => Bool(self.code.blocks),
            "code.inline" => Bool(self.code.inline),
            "comments" => Bool(self.comments),
            "diagrams" | "diagrams.enabled" => Bool(self.diagrams.enabled),
            "diagrams.chartjs" => Bool(self.diagrams.chartjs),
            "diagrams.mermaid" => Bool(self.diagrams.mermaid),
            "emojis" => Bool(self.emojis),
            "emphasis" | "emphasis.enabled" => Bool(self.emphasis.enabled),
            "emphasis.bold" => Bool(self.emphasis.bold),
            "emphasis.italic" => Bool(self.emphasis.italic),
            "emphasis.strikethroughs" => Bool(self.emphasis.strikethroughs),
            "emphasis.insertions" => Bool(self.emphasis.insertions),
            "emphasis.subscript" => Bool(self.emphasis.subscript),
            "emphasis.superscript" => Bool(self.emphasis.superscript),
            "emphasis.keystrokes" => Bool(self.emphasis.keystrokes),
            "emphasis.marking" => Bool(self.emphasis.marking),
            "headings" | "headings.enabled" => Bool(self.headings.enabled),
            "headings.allowed" => List(self.headings.allowed.clone()),
            "headings.auto_anchors" | "headings.auto_anchors.enabled" => {
                Bool(self.headings.auto_anchors.enabled)
            }
            "headings.auto_anchors.delimiter" => Str(self.headings.auto_anchors.delimiter.clone()),
            "headings.auto_anchors.lowercase" => Bool(self.headings.auto_anchors.lowercase),
            "headings.auto_anchors.replacements" => {
                Pairs(self.headings.auto_anchors.replacements.clone())
            }
            "headings.auto_anchors.transliterate" => Bool(self.headings.auto_anchors.transliterate),
            "headings.auto_anchors.blacklist" => List(self.headings.auto_anchors.blacklist.clone()),
            "images" => Bool(self.images),
            "links" | "links.enabled" => Bool(self.links.enabled),
            "links.email_links" => Bool(self.links.email_links),
            "lists" | "lists.enabled" => Bool(self.lists.enabled),
            "lists.tasks" => Bool(self.lists.tasks),
            "markup" => Bool(self.markup),
            "math" | "math.enabled" => Bool(self.math.enabled),
            "math.inline" | "math.inline.enabled" => Bool(self.math.inline.enabled),
            "math.inline.delimiters" => Pairs(delimiters_to_pairs(&self.math.inline.delimiters)),
            "math.block" | "math.block.enabled" => Bool(self.math.block.enabled),
            "math.block.delimiters" => Pairs(delimiters_to_pairs(&self.math.block.delimiters)),
            "quotes" => Bool(self.quotes),
            "references" => Bool(self.references),
            "smarty" | "smarty.enabled" => Bool(self.smarty.enabled),
            "smarty.smart_angled_quotes" => Bool(self.smarty.smart_angled_quotes),
            "smarty.smart_backticks" => Bool(self.smarty.smart_backticks),
            "smarty.smart_dashes" => Bool(self.smarty.smart_dashes),
            "smarty.smart_ellipses" => Bool(self.smarty.smart_ellipses),
            "smarty.smart_quotes" => Bool(self.smarty.smart_quotes),
            "smarty.substitutions" => Pairs(vec![
                ("ellipses".into(), self.smarty.substitutions.ellipses.clone()),
                ("left-angle-quote".into(), self.smarty.substitutions.left_angle_quote.clone()),
                ("left-double-quote".into(), self.smarty.substitutions.left_double_quote.clone()),
                ("left-single-quote".into(), self.smarty.substitutions.left_single_quote.clone()),
                ("mdash".into(), self.smarty.substitutions.mdash.clone()),
                ("ndash".into(), self.smarty.substitutions.ndash.clone()),
                ("right-angle-quote".into(), self.smarty.substitutions.right_angle_quote.clone()),
                ("right-double-quote".into(), self.smarty.substitutions.right_double_quote.clone()),
                ("right-single-quote".into(), self.smarty.substitutions.right_single_quote.clone()),
            ]),
            "smarty.substitutions.ellipses" => Str(self.smarty.substitutions.ellipses.clone()),
            "smarty.substitutions.left-angle-quote" => {
                Str(self.smarty.substitutions.left_angle_quote.clone())
            }
            "smarty.substitutions.left-double-quote" => {
                Str(self.smarty.substitutions.left_double_quote.clone())
            }
            "smarty.substitutions.left-single-quote" => {
                Str(self.smarty.substitutions.left_single_quote.clone())
            }
            "smarty.substitutions.mdash" => Str(self.smarty.substitutions.mdash.clone()),
            "smarty.substitutions.ndash" => Str(self.smarty.substitutions.ndash.clone()),
            "smarty.substitutions.right-angle-quote" => {
                Str(self.smarty.substitutions.right_angle_quote.clone())
            }
            "smarty.substitutions.right-double-quote" => {
                Str(self.smarty.substitutions.right_double_quote.clone())
            }
            "smarty.substitutions.right-single-quote" => {
                Str(self.smarty.substitutions.right_single_quote.clone())
            }
            "special_attributes" => Bool(self.special_attributes),
            "tables" | "tables.enabled" => Bool(self.tables.enabled),
            "tables.tablespan" => Bool(self.tables.tablespan),
            "thematic_breaks" => Bool(self.thematic_breaks),
            "toc" | "toc.enabled" => Bool(self.toc.enabled),
            "toc.headings" => List(self.toc.headings.clone()),
            "toc.tag" => Str(self.toc.tag.clone()),
            "typographer" => Bool(self.typographer),
            _ => return Err(SettingsError::UnknownPath(path.to_string())),
        };
        Ok(value)
    }

    /// Writes a value at a dotted path. A boolean onto a composite path sets
    /// only its `enabled` flag; list-like values merge key-wise unless
    /// `overwrite` is passed.
    pub fn set(
        &mut self,
        path: &str,
        value: SettingValue,
        overwrite: bool,
    ) -> Result<(), SettingsError> {
        match path {
            "code" | "code.enabled" => self.code.enabled = expect_bool(path, value)?,
            "code.blocks" => self.code.blocks = expect_bool(path, value)?,
            "code.inline" => self.code.inline = expect_bool(path, value)?,
            "comments" => self.comments = expect_bool(path, value)?,
            "diagrams" | "diagrams.enabled" => self.diagrams.enabled = expect_bool(path, value)?,
            "diagrams.chartjs" => self.diagrams.chartjs = expect_bool(path, value)?,
            "diagrams.mermaid" => self.diagrams.mermaid = expect_bool(path, value)?,
            "emojis" => self.emojis = expect_bool(path, value)?,
            "emphasis" | "emphasis.enabled" => self.emphasis.enabled = expect_bool(path, value)?,
            "emphasis.bold" => self.emphasis.bold = expect_bool(path, value)?,
            "emphasis.italic" => self.emphasis.italic = expect_bool(path, value)?,
            "emphasis.strikethroughs" => self.emphasis.strikethroughs = expect_bool(path, value)?,
            "emphasis.insertions" => self.emphasis.insertions = expect_bool(path, value)?,
            "emphasis.subscript" => self.emphasis.subscript = expect_bool(path, value)?,
            "emphasis.superscript" => self.emphasis.superscript = expect_bool(path, value)?,
            "emphasis.keystrokes" => self.emphasis.keystrokes = expect_bool(path, value)?,
            "emphasis.marking" => self.emphasis.marking = expect_bool(path, value)?,
            "headings" | "headings.enabled" => self.headings.enabled = expect_bool(path, value)?,
            "headings.allowed" => {
                merge_list(&mut self.headings.allowed, expect_list(path, value)?, overwrite)
            }
            "headings.auto_anchors" | "headings.auto_anchors.enabled" => {
                self.headings.auto_anchors.enabled = expect_bool(path, value)?
            }
            "headings.auto_anchors.delimiter" => {
                self.headings.auto_anchors.delimiter = expect_str(path, value)?
            }
            "headings.auto_anchors.lowercase" => {
                self.headings.auto_anchors.lowercase = expect_bool(path, value)?
            }
            "headings.auto_anchors.replacements" => merge_pairs(
                &mut self.headings.auto_anchors.replacements,
                expect_pairs(path, value)?,
                overwrite,
            ),
            "headings.auto_anchors.transliterate" => {
                self.headings.auto_anchors.transliterate = expect_bool(path, value)?
            }
            "headings.auto_anchors.blacklist" => merge_list(
                &mut self.headings.auto_anchors.blacklist,
                expect_list(path, value)?,
                overwrite,
            ),
            "images" => self.images = expect_bool(path, value)?,
            "links" | "links.enabled" => self.links.enabled = expect_bool(path, value)?,
            "links.email_links" => self.links.email_links = expect_bool(path, value)?,
            "lists" | "lists.enabled" => self.lists.enabled = expect_bool(path, value)?,
            "lists.tasks" => self.lists.tasks = expect_bool(path, value)?,
            "markup" => self.markup = expect_bool(path, value)?,
            "math" | "math.enabled" => self.math.enabled = expect_bool(path, value)?,
            "math.inline" | "math.inline.enabled" => {
                self.math.inline.enabled = expect_bool(path, value)?
            }
            "math.inline.delimiters" => {
                let incoming = delimiters_from_pairs(expect_pairs(path, value)?);
                if overwrite {
                    self.math.inline.delimiters = incoming;
                } else {
                    for delim in incoming {
                        if !self.math.inline.delimiters.contains(&delim) {
                            self.math.inline.delimiters.push(delim);
                        }
                    }
                }
            }
            "math.block" | "math.block.enabled" => {
                self.math.block.enabled = expect_bool(path, value)?
            }
            "math.block.delimiters" => {
                let incoming = delimiters_from_pairs(expect_pairs(path, value)?);
                if overwrite {
                    self.math.block.delimiters = incoming;
                } else {
                    for delim in incoming {
                        if !self.math.block.delimiters.contains(&delim) {
                            self.math.block.delimiters.push(delim);
                        }
                    }
                }
            }
            "quotes" => self.quotes = expect_bool(path, value)?,
            "references" => self.references = expect_bool(path, value)?,
            "smarty" | "smarty.enabled" => self.smarty.enabled = expect_bool(path, value)?,
            "smarty.smart_angled_quotes" => {
                self.smarty.smart_angled_quotes = expect_bool(path, value)?
            }
            "smarty.smart_backticks" => self.smarty.smart_backticks = expect_bool(path, value)?,
            "smarty.smart_dashes" => self.smarty.smart_dashes = expect_bool(path, value)?,
            "smarty.smart_ellipses" => self.smarty.smart_ellipses = expect_bool(path, value)?,
            "smarty.smart_quotes" => self.smarty.smart_quotes = expect_bool(path, value)?,
            "smarty.substitutions.ellipses" => {
                self.smarty.substitutions.ellipses = expect_str(path, value)?
            }
            "smarty.substitutions.left-angle-quote" => {
                self.smarty.substitutions.left_angle_quote = expect_str(path, value)?
            }
            "smarty.substitutions.left-double-quote" => {
                self.smarty.substitutions.left_double_quote = expect_str(path, value)?
            }
            "smarty.substitutions.left-single-quote" => {
                self.smarty.substitutions.left_single_quote = expect_str(path, value)?
            }
            "smarty.substitutions.mdash" => {
                self.smarty.substitutions.mdash = expect_str(path, value)?
            }
            "smarty.substitutions.ndash" => {
                self.smarty.substitutions.ndash = expect_str(path, value)?
            }
            "smarty.substitutions.right-angle-quote" => {
                self.smarty.substitutions.right_angle_quote = expect_str(path, value)?
            }
            "smarty.substitutions.right-double-quote" => {
                self.smarty.substitutions.right_double_quote = expect_str(path, value)?
            }
            "smarty.substitutions.right-single-quote" => {
                self.smarty.substitutions.right_single_quote = expect_str(path, value)?
            }
            "special_attributes" => self.special_attributes = expect_bool(path, value)?,
            "tables" | "tables.enabled" => self.tables.enabled = expect_bool(path, value)?,
            "tables.tablespan" => self.tables.tablespan = expect_bool(path, value)?,
            "thematic_breaks" => self.thematic_breaks = expect_bool(path, value)?,
            "toc" | "toc.enabled" => self.toc.enabled = expect_bool(path, value)?,
            "toc.headings" => merge_list(&mut self.toc.headings, expect_list(path, value)?, overwrite),
            "toc.tag" => self.toc.tag = expect_str(path, value)?,
            "typographer" => self.typographer = expect_bool(path, value)?,
            _ => return Err(SettingsError::UnknownPath(path.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_path_fails_fast() {
        let mut settings = Settings::default();
        assert_eq!(
            settings.get("nope"),
            Err(SettingsError::UnknownPath("nope".to_string()))
        );
        assert_eq!(
            settings.set("math.wrong", SettingValue::Bool(true), false),
            Err(SettingsError::UnknownPath("math.wrong".to_string()))
        );
    }

    #[test]
    fn boolean_onto_composite_sets_only_enabled() {
        let mut settings = Settings::default();
        settings.set("math", SettingValue::Bool(true), false).unwrap();
        assert!(settings.math.enabled);
        // sibling options survive
        assert_eq!(settings.math.inline.delimiters.len(), 1);
        assert_eq!(settings.math.block.delimiters.len(), 7);
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let mut settings = Settings::default();
        let err = settings
            .set("emphasis.bold", SettingValue::Str("yes".into()), false)
            .unwrap_err();
        assert!(matches!(err, SettingsError::WrongKind { .. }));
    }

    #[test]
    fn composite_get_reports_enabled_flag() {
        let settings = Settings::default();
        assert_eq!(settings.get("smarty").unwrap(), SettingValue::Bool(false));
        assert_eq!(settings.get("tables").unwrap(), SettingValue::Bool(true));
    }

    #[test]
    fn pairs_merge_key_wise_unless_overwritten() {
        let mut settings = Settings::default();
        settings
            .set(
                "math.inline.delimiters",
                SettingValue::from(vec![("$", "$")]),
                false,
            )
            .unwrap();
        assert_eq!(settings.math.inline.delimiters.len(), 2);

        settings
            .set(
                "math.inline.delimiters",
                SettingValue::from(vec![("$", "$")]),
                true,
            )
            .unwrap();
        assert_eq!(
            settings.math.inline.delimiters,
            vec![MathDelimiter::new("$", "$")]
        );
    }

    #[test]
    fn toml_overlay_keeps_defaults_for_missing_fields() {
        let overlay: Settings = toml::from_str(
            r#"
            typographer = false

            [smarty]
            enabled = true
            "#,
        )
        .unwrap();
        assert!(!overlay.typographer);
        assert!(overlay.smarty.enabled);
        assert!(overlay.smarty.smart_quotes);
        assert_eq!(overlay.toc.tag, "[toc]");
    }
}
