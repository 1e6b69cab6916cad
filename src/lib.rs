//! An extensible Markdown dialect engine.
//!
//! `mdext` converts a configurable Markdown dialect to HTML. Every syntax
//! extension (emphasis variants, math passthrough, table spanning, emoji
//! shortcodes, smart punctuation and more) is independently toggleable
//! through a strongly-typed settings tree, and headings feed an automatic
//! anchor and table-of-contents pipeline.
//!
//! ```
//! use mdext::Engine;
//!
//! let mut engine = Engine::new();
//! let html = engine.convert("# Hello\n\nSome *emphasis*.");
//! assert_eq!(html, "<h1 id=\"hello\">Hello</h1>\n<p>Some <em>emphasis</em>.</p>");
//! ```

pub mod block;
pub mod emoji;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod inline;
pub mod node;
pub mod registry;
pub mod settings;
pub mod table;
pub mod toc;

pub use engine::Engine;
pub use error::{SettingsError, TocError};
pub use settings::{SettingValue, Settings};
pub use toc::{HeadingRecord, TOC_ID_DEFAULT};
