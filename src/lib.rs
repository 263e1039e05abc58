// SPDX-License-Identifier: MPL-2.0
//! # wikilinks
//!
//! Finds, parses and rewrites the `[...]` links of XWiki 1.0 style wiki markup.
//!
//! ## Overview
//!
//! Wiki pages written in the XWiki 1.0 syntax reference each other with links in square brackets:
//!
//! ```text
//! See [HelloWorld], [the sandbox|Sandbox.WebHome] or [XWiki>https://www.xwiki.org>_blank].
//! ```
//!
//! `wikilinks` scans such content, turns every bracketed span into a structured [`Link`] and reports
//! the spans that are not valid links. Its main use is renaming a page: every backlink pointing to the
//! old page has to be updated, and there are many ways to write the same link (`[Page]`,
//! `[Main.Page]`, `[Click|Page?x=1]`, ...). Links are therefore parsed and compared structurally
//! instead of searched and replaced as text.
//!
//! **Key Features:**
//!
//! - **Tolerant**: Malformed links never abort a scan, they are collected so the caller can report them.
//! - **Faithful**: Links that are not replaced keep their exact original text.
//! - **Pluggable**: Link syntax ([`LinkParser`]) and link matching ([`ReplaceLinkHandler`]) are traits.
//!
//! ## Basic Usage
//!
//! ```rust
//! use wikilinks::DocumentParser;
//!
//! let results = DocumentParser::new().parse_links("See [HelloWorld] and [broken@@@]");
//!
//! assert_eq!(results.valid_elements()[0].page.as_deref(), Some("HelloWorld"));
//! assert_eq!(results.invalid_elements(), ["broken@@@"]);
//! ```
//!
//! ### Renaming a Page
//!
//! ```rust
//! use wikilinks::{DocumentParser, Link, RenamePageReplaceLinkHandler};
//!
//! let results = DocumentParser::new().parse_links_and_replace(
//!     "[HelloWorld] and [Say hi|Main.HelloWorld?lang=en]",
//!     &Link::to_document(None, "Main", "HelloWorld"),
//!     &Link::to_document(None, "Main", "GoodbyeWorld"),
//!     &RenamePageReplaceLinkHandler,
//!     "Main",
//! );
//!
//! assert_eq!(
//!     results.modified_content(),
//!     "[GoodbyeWorld] and [Say hi|Main.GoodbyeWorld?lang=en]"
//! );
//! assert_eq!(results.replaced_elements().len(), 2);
//! ```
//!
//! ## Modules and API
//!
//! ### `link` Module
//!
//! **Purpose**: The [`Link`] value type.
//!
//! - `Link::normalized(current_space)` fills in the implicit space and page (`WebHome`) of internal links.
//! - `Display` writes the link back in wiki syntax.
//!
//! ### `link_parser` Module
//!
//! **Purpose**: Parses a single link body. [`DefaultLinkParser`] understands
//! `alias|wiki:Space.Page#anchor?query@interwiki|target` as well as URLs and `mailto:` addresses.
//!
//! ### `document_parser` Module
//!
//! **Purpose**: Scans whole documents with [`DocumentParser::parse_links`] and
//! [`DocumentParser::parse_links_and_replace`].
//!
//! ### `replace` Module
//!
//! **Purpose**: Strategies deciding which links get replaced, and by what.
//!
//! ## Limitations
//!
//! - **Scanning**: Links are found with the regular expression `\[(.*?)\]`. Nested brackets, escaped
//!   brackets and links spanning several lines are not supported.
//! - **URLs**: External links are stored as [`url::Url`], so a replaced external link is written in
//!   its normalized form (e.g. with a trailing `/` after the host).
//!
//! ## Logging
//!
//! Uses the `tracing` crate. Rejected link bodies and per-document counts are logged at `debug`
//! level, individual replacements at `trace` level.

pub mod document_parser;
pub mod link;
pub mod link_parser;
pub mod replace;
pub mod results;
#[cfg(test)]
mod test_support;

pub use document_parser::DocumentParser;
pub use link::{Delimiter, Link};
pub use link_parser::{DefaultLinkParser, LinkParseError, LinkParser};
pub use replace::{
    ExactReplaceLinkHandler, RenamePageReplaceLinkHandler, ReplaceContext, ReplaceLinkHandler,
};
pub use results::{ParsingResults, ReplacementResults};
