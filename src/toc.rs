//! Heading anchors and the table of contents.
//!
//! Anchors run through a fixed pipeline: lowercase, configured literal
//! replacements, Unicode NFC, optional transliteration to ASCII, then every
//! run of non-letter/non-digit characters becomes a single delimiter. The
//! registry deduplicates the result against earlier anchors and a blacklist.
//! The ToC itself is accumulated twice, as structured records and as a
//! markdown list string rendered on demand.

use indexmap::IndexMap;
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::error::SettingsError;
use crate::settings::AutoAnchorSettings;

/// Default id of the `<div>` the ToC placeholder expands into.
pub const TOC_ID_DEFAULT: &str = "toc";

/// One recorded heading, in document order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeadingRecord {
    /// Raw heading text as written in the source.
    pub text: String,
    pub id: String,
    pub level: u8,
}

/// Derives the anchor slug for a heading, before deduplication.
pub fn anchor_slug(text: &str, opts: &AutoAnchorSettings) -> String {
    let mut text = if opts.lowercase {
        text.to_lowercase()
    } else {
        text.to_string()
    };
    for (find, replace) in &opts.replacements {
        text = text.replace(find.as_str(), replace);
    }
    let text: String = text.nfc().collect();
    let text = if opts.transliterate {
        transliterate(&text)
    } else {
        text
    };
    sanitize(&text, &opts.delimiter)
}

/// Collapses every run of non-letter/non-digit characters into a single
/// delimiter and trims delimiters from both ends.
fn sanitize(text: &str, delimiter: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending = false;
    for ch in text.chars() {
        if ch.is_alphabetic() || ch.is_numeric() {
            if pending && !out.is_empty() {
                out.push_str(delimiter);
            }
            pending = false;
            out.push(ch);
        } else {
            pending = true;
        }
    }
    out
}

/// Tracks anchors issued during one conversion and disambiguates repeats.
#[derive(Default)]
pub struct AnchorRegistry {
    taken: IndexMap<String, usize>,
}

impl AnchorRegistry {
    pub fn reset(&mut self) {
        self.taken.clear();
    }

    /// Returns `slug` untouched the first time it appears (unless
    /// blacklisted); repeats get `-1`, `-2` and so on. Generated names are
    /// registered too, so a literal `intro-1` heading later cannot collide.
    pub fn uniquify(&mut self, slug: String, blacklist: &[String]) -> String {
        if !blacklist.contains(&slug) && !self.taken.contains_key(&slug) {
            self.taken.insert(slug.clone(), 0);
            return slug;
        }

        let mut count = self.taken.get(&slug).copied().unwrap_or(0);
        let candidate = loop {
            count += 1;
            let candidate = format!("{slug}-{count}");
            if !blacklist.contains(&candidate) && !self.taken.contains_key(&candidate) {
                break candidate;
            }
        };
        self.taken.insert(slug, count);
        self.taken.insert(candidate.clone(), 0);
        candidate
    }
}

/// The running table of contents for one conversion.
#[derive(Default)]
pub struct ContentsList {
    records: Vec<HeadingRecord>,
    markdown: String,
    first_level: u8,
}

impl ContentsList {
    pub fn reset(&mut self) {
        self.records.clear();
        self.markdown.clear();
        self.first_level = 0;
    }

    /// Appends one heading. `plain` is the tag-stripped display text used in
    /// the markdown list; `raw` is the source text kept in the record.
    pub fn push(&mut self, raw: String, plain: &str, id: String, level: u8) {
        if self.first_level == 0 {
            self.first_level = level;
        }
        // The first heading seen sets the baseline indentation, whatever its
        // absolute level.
        let depth = i32::from(level) - (i32::from(self.first_level) - 1);
        let indent = "  ".repeat(depth.max(1) as usize);
        self.markdown
            .push_str(&format!("{indent}- [{plain}](#{id})\n"));
        self.records.push(HeadingRecord {
            text: raw,
            id,
            level,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn records(&self) -> &[HeadingRecord] {
        &self.records
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.records).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Stand-in the placeholder tag is swapped for during parsing, so the tag
/// itself can never be reinterpreted as grammar syntax.
pub fn hashed_tag(salt: &str, tag: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(salt.as_bytes());
    hasher.update(tag.as_bytes());
    hasher.finalize().to_hex().to_string()
}

/// Validates a user-supplied ToC tag. Tags carrying markup-reserved
/// characters would survive escaping differently than they were written, so
/// they are rejected outright.
pub fn validate_toc_tag(tag: &str) -> Result<String, SettingsError> {
    let tag = tag.trim();
    if tag.is_empty() || tag.chars().any(|c| matches!(c, '&' | '<' | '>' | '"' | '\'')) {
        return Err(SettingsError::MalformedTocTag(tag.to_string()));
    }
    Ok(tag.to_string())
}

fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match transliterate_char(ch) {
            Some(mapped) => out.push_str(mapped),
            None => out.push(ch),
        }
    }
    out
}

fn transliterate_char(ch: char) -> Option<&'static str> {
    let mapped = match ch {
        // Latin
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' => "A",
        'Å' => "AA",
        'Æ' => "AE",
        'Ç' => "C",
        'È' | 'É' | 'Ê' | 'Ë' => "E",
        'Ì' | 'Í' | 'Î' | 'Ï' => "I",
        'Ð' => "D",
        'Ñ' => "N",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ő' => "O",
        'Ø' => "OE",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ű' => "U",
        'Ý' => "Y",
        'Þ' => "TH",
        'ß' => "ss",
        'à' | 'á' | 'â' | 'ã' | 'ä' => "a",
        'å' => "aa",
        'æ' => "ae",
        'ç' => "c",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ð' => "d",
        'ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ő' => "o",
        'ø' => "oe",
        'ù' | 'ú' | 'û' | 'ü' | 'ű' => "u",
        'ý' | 'ÿ' => "y",
        'þ' => "th",

        // Latin symbols
        '©' => "(c)",
        '®' => "(r)",
        '™' => "(tm)",

        // Greek
        'Α' | 'Ά' => "A",
        'Β' => "B",
        'Γ' => "G",
        'Δ' => "D",
        'Ε' | 'Έ' => "E",
        'Ζ' => "Z",
        'Η' | 'Ή' => "H",
        'Θ' => "TH",
        'Ι' | 'Ί' | 'Ϊ' => "I",
        'Κ' => "K",
        'Λ' => "L",
        'Μ' => "M",
        'Ν' => "N",
        'Ξ' => "X",
        'Ο' | 'Ό' | 'Ω' | 'Ώ' => "O",
        'Π' => "P",
        'Ρ' => "R",
        'Σ' => "S",
        'Τ' => "T",
        'Υ' | 'Ύ' | 'Ϋ' => "Y",
        'Φ' => "F",
        'Χ' => "X",
        'Ψ' => "PS",
        'α' | 'ά' => "a",
        'β' => "b",
        'γ' => "g",
        'δ' => "d",
        'ε' | 'έ' => "e",
        'ζ' => "z",
        'η' | 'ή' => "h",
        'θ' => "th",
        'ι' | 'ί' | 'ϊ' | 'ΐ' => "i",
        'κ' => "k",
        'λ' => "l",
        'μ' => "m",
        'ν' => "n",
        'ξ' => "x",
        'ο' | 'ό' | 'ω' | 'ώ' => "o",
        'π' => "p",
        'ρ' => "r",
        'σ' | 'ς' => "s",
        'τ' => "t",
        'υ' | 'ύ' | 'ϋ' | 'ΰ' => "y",
        'φ' => "f",
        'χ' => "x",
        'ψ' => "ps",

        // Turkish
        'Ş' => "S",
        'İ' => "I",
        'Ğ' => "G",
        'ş' => "s",
        'ı' => "i",
        'ğ' => "g",

        // Russian
        'А' => "A",
        'Б' => "B",
        'В' => "V",
        'Г' => "G",
        'Д' => "D",
        'Е' => "E",
        'Ё' => "Yo",
        'Ж' => "Zh",
        'З' => "Z",
        'И' => "I",
        'Й' => "J",
        'К' => "K",
        'Л' => "L",
        'М' => "M",
        'Н' => "N",
        'О' => "O",
        'П' => "P",
        'Р' => "R",
        'С' => "S",
        'Т' => "T",
        'У' => "U",
        'Ф' => "F",
        'Х' => "Kh",
        'Ц' => "Ts",
        'Ч' => "Ch",
        'Ш' => "Sh",
        'Щ' => "Shch",
        'Ъ' => "U",
        'Ы' => "Y",
        'Ь' => "",
        'Э' => "E",
        'Ю' => "Yu",
        'Я' => "Ya",
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' => "u",
        'ы' => "y",
        'ь' => "",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",

        // Ukrainian
        'Є' => "Ye",
        'І' => "I",
        'Ї' => "Yi",
        'Ґ' => "G",
        'є' => "ye",
        'і' => "i",
        'ї' => "yi",
        'ґ' => "g",

        // Czech
        'Č' => "C",
        'Ď' => "D",
        'Ě' => "E",
        'Ň' => "N",
        'Ř' => "R",
        'Š' => "S",
        'Ť' => "T",
        'Ů' => "U",
        'Ž' => "Z",
        'č' => "c",
        'ď' => "d",
        'ě' => "e",
        'ň' => "n",
        'ř' => "r",
        'š' => "s",
        'ť' => "t",
        'ů' => "u",
        'ž' => "z",

        // Polish
        'Ą' => "A",
        'Ć' => "C",
        'Ę' => "E",
        'Ł' => "L",
        'Ń' => "N",
        'Ś' => "S",
        'Ź' | 'Ż' => "Z",
        'ą' => "a",
        'ć' => "c",
        'ę' => "e",
        'ł' => "l",
        'ń' => "n",
        'ś' => "s",
        'ź' | 'ż' => "z",

        // Latvian
        'Ā' => "A",
        'Ē' => "E",
        'Ģ' => "G",
        'Ī' => "I",
        'Ķ' => "K",
        'Ļ' => "L",
        'Ņ' => "N",
        'Ū' => "U",
        'ā' => "a",
        'ē' => "e",
        'ģ' => "g",
        'ī' => "i",
        'ķ' => "k",
        'ļ' => "l",
        'ņ' => "n",
        'ū' => "u",

        _ => return None,
    };
    Some(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> AutoAnchorSettings {
        AutoAnchorSettings::default()
    }

    #[test]
    fn slug_lowercases_and_joins_with_delimiter() {
        assert_eq!(anchor_slug("Getting Started!", &opts()), "getting-started");
        assert_eq!(anchor_slug("  A  --  B  ", &opts()), "a-b");
    }

    #[test]
    fn slug_applies_literal_replacements_first() {
        let mut opts = opts();
        opts.replacements.push(("c++".to_string(), "cpp".to_string()));
        assert_eq!(anchor_slug("About C++", &opts), "about-cpp");
    }

    #[test]
    fn slug_transliterates_when_enabled() {
        let mut opts = opts();
        opts.transliterate = true;
        assert_eq!(anchor_slug("Привет мир", &opts), "privet-mir");
        assert_eq!(anchor_slug("Über Straße", &opts), "uber-strasse");
    }

    #[test]
    fn slug_keeps_unicode_letters_without_transliteration() {
        assert_eq!(anchor_slug("Über uns", &opts()), "über-uns");
    }

    #[test]
    fn first_anchor_passes_untouched_then_counts_up() {
        let mut registry = AnchorRegistry::default();
        assert_eq!(registry.uniquify("intro".into(), &[]), "intro");
        assert_eq!(registry.uniquify("intro".into(), &[]), "intro-1");
        assert_eq!(registry.uniquify("intro".into(), &[]), "intro-2");
    }

    #[test]
    fn blacklisted_anchor_is_suffixed_immediately() {
        let mut registry = AnchorRegistry::default();
        let blacklist = vec!["top".to_string()];
        assert_eq!(registry.uniquify("top".into(), &blacklist), "top-1");
        assert_eq!(registry.uniquify("top".into(), &blacklist), "top-2");
    }

    #[test]
    fn generated_names_are_reserved_too() {
        let mut registry = AnchorRegistry::default();
        assert_eq!(registry.uniquify("a".into(), &[]), "a");
        assert_eq!(registry.uniquify("a".into(), &[]), "a-1");
        // a literal "a-1" heading must not collide with the generated one
        assert_eq!(registry.uniquify("a-1".into(), &[]), "a-1-1");
    }

    #[test]
    fn contents_list_indents_relative_to_first_heading() {
        let mut list = ContentsList::default();
        list.push("Title".into(), "Title", "title".into(), 2);
        list.push("Sub".into(), "Sub", "sub".into(), 3);
        assert_eq!(list.markdown(), "  - [Title](#title)\n    - [Sub](#sub)\n");
    }

    #[test]
    fn malformed_tags_are_rejected() {
        assert!(validate_toc_tag("[toc]").is_ok());
        assert!(validate_toc_tag("{{toc}}").is_ok());
        assert!(validate_toc_tag("<toc>").is_err());
        assert!(validate_toc_tag("").is_err());
    }

    #[test]
    fn hashed_tag_is_stable_per_salt() {
        let a = hashed_tag("salt", "[toc]");
        assert_eq!(a, hashed_tag("salt", "[toc]"));
        assert_ne!(a, hashed_tag("other", "[toc]"));
        assert_eq!(a.len(), 64);
    }
}
