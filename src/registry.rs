//! Marker dispatch table for the inline grammar.
//!
//! Every inline construct is owned by a handler and reachable through one or
//! more trigger characters. Registration order is priority order; the first
//! handler to accept a position wins. The handler set is a closed enum, so
//! dispatch is a match and an unknown handler cannot exist at runtime.

use indexmap::IndexMap;

/// The closed set of inline handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handler {
    Emphasis,
    Strikethrough,
    Marking,
    Insertions,
    Keystrokes,
    Superscript,
    Subscript,
    MathNotation,
    Typographer,
    Smartypants,
    Emojis,
    Code,
    Link,
    Image,
    Url,
    UrlTag,
    EmailTag,
    Markup,
    EscapeSequence,
    SpecialCharacter,
}

impl Handler {
    /// Handlers whose output must not be re-parsed for the same construct
    /// when nested inside themselves.
    pub fn is_non_nestable(self) -> bool {
        matches!(self, Handler::Link | Handler::Url)
    }
}

/// Trigger character to ordered handler list.
pub struct MarkerRegistry {
    table: IndexMap<char, Vec<Handler>>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self {
            table: IndexMap::new(),
        }
    }

    /// Appends a handler to the list for `marker`. Duplicate registrations
    /// are ignored so the table stays a priority list, not a multiset.
    pub fn register(&mut self, marker: char, handler: Handler) {
        let list = self.table.entry(marker).or_default();
        if !list.contains(&handler) {
            list.push(handler);
        }
    }

    pub fn handlers_for(&self, marker: char) -> Option<&[Handler]> {
        self.table.get(&marker).map(Vec::as_slice)
    }

    pub fn is_marker(&self, ch: char) -> bool {
        self.table.contains_key(&ch)
    }

    pub fn markers(&self) -> impl Iterator<Item = char> + '_ {
        self.table.keys().copied()
    }

    /// Moves the entity rewriter to the back of every list it appears in.
    /// It claims a single character unconditionally, so anything registered
    /// after it on the same marker would be unreachable.
    pub fn demote_special_characters(&mut self) {
        for list in self.table.values_mut() {
            if let Some(pos) = list.iter().position(|h| *h == Handler::SpecialCharacter) {
                if pos + 1 != list.len() {
                    list.remove(pos);
                    list.push(Handler::SpecialCharacter);
                }
            }
        }
    }
}

impl Default for MarkerRegistry {
    /// The stock dialect: every built-in construct wired to its markers.
    fn default() -> Self {
        use Handler::*;

        let mut registry = MarkerRegistry::new();
        let sequence: &[(char, Handler)] = &[
            ('!', Image),
            ('[', Link),
            ('[', Keystrokes),
            ('*', Emphasis),
            ('_', Emphasis),
            ('`', Code),
            ('`', Smartypants),
            ('~', Strikethrough),
            ('~', Subscript),
            ('\\', EscapeSequence),
            ('\\', MathNotation),
            ('&', SpecialCharacter),
            ('<', UrlTag),
            ('<', EmailTag),
            ('<', Markup),
            ('<', SpecialCharacter),
            ('<', Smartypants),
            ('>', SpecialCharacter),
            ('>', Smartypants),
            ('"', SpecialCharacter),
            ('"', Smartypants),
            (':', Url),
            (':', Emojis),
            ('=', Marking),
            ('+', Insertions),
            ('+', Typographer),
            ('$', MathNotation),
            ('^', Superscript),
            ('-', Smartypants),
            ('.', Smartypants),
            ('.', Typographer),
            ('\'', Smartypants),
            ('(', Typographer),
            ('!', Typographer),
            ('?', Typographer),
        ];
        for &(marker, handler) in sequence {
            registry.register(marker, handler);
        }
        registry.demote_special_characters();
        registry
    }
}
