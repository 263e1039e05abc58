use std::sync::LazyLock;

use regex::{Captures, Regex, Replacer};
use tracing::instrument;

use crate::{
    link::Link,
    link_parser::{DefaultLinkParser, LinkParser},
    replace::{ReplaceContext, ReplaceLinkHandler},
    results::{ParsingResults, ReplacementResults},
};

// Non-greedy so that `[a] and [b]` are two links. `.` stops at line breaks,
// nested or escaped brackets are not supported.
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]").unwrap());

/// Finds the `[...]` links of a wiki document and optionally rewrites some
/// of them.
///
/// The parser holds no state besides its [`LinkParser`], so one instance can
/// be shared and used for any number of documents.
#[derive(Debug, Clone, Default)]
pub struct DocumentParser<P = DefaultLinkParser> {
    link_parser: P,
}

impl DocumentParser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: LinkParser> DocumentParser<P> {
    pub fn with_link_parser(link_parser: P) -> Self {
        Self { link_parser }
    }

    pub fn link_parser(&self) -> &P {
        &self.link_parser
    }

    /// Parses every link in `content`.
    ///
    /// Link texts the [`LinkParser`] rejects end up in
    /// [`ParsingResults::invalid_elements`]; they never stop the scan.
    #[instrument(skip_all, fields(content_len = content.len()))]
    pub fn parse_links(&self, content: &str) -> ParsingResults {
        let mut results = ParsingResults::default();

        for captures in LINK_PATTERN.captures_iter(content) {
            self.parse_link(&captures[1], &mut results);
        }

        tracing::debug!(
            valid = results.valid_elements().len(),
            invalid = results.invalid_elements().len(),
            "parsed links"
        );
        results
    }

    /// Parses every link in `content` and replaces the ones `link_handler`
    /// considers equal to `link_to_look_for`.
    ///
    /// All links are normalized against `current_space` before they are
    /// compared, `link_to_look_for` and `new_link` included. Links that are
    /// not replaced keep their original text, byte for byte.
    #[instrument(skip_all, fields(content_len = content.len(), current_space = current_space))]
    pub fn parse_links_and_replace<H: ReplaceLinkHandler + ?Sized>(
        &self,
        content: &str,
        link_to_look_for: &Link,
        new_link: &Link,
        link_handler: &H,
        current_space: &str,
    ) -> ReplacementResults {
        let mut replacer = LinkReplacer {
            parser: self,
            link_to_look_for: link_to_look_for.normalized(current_space),
            new_link: new_link.normalized(current_space),
            link_handler,
            current_space,
            results: ReplacementResults::default(),
        };

        let modified_content = LINK_PATTERN
            .replace_all(content, replacer.by_ref())
            .into_owned();

        let mut results = replacer.results;
        results.set_modified_content(modified_content);

        tracing::debug!(
            valid = results.valid_elements().len(),
            invalid = results.invalid_elements().len(),
            replaced = results.replaced_elements().len(),
            "replaced links"
        );
        results
    }

    fn parse_link(&self, text: &str, results: &mut ParsingResults) -> Option<Link> {
        match self.link_parser.parse(text) {
            Ok(link) => {
                results.push_valid(link.clone());
                Some(link)
            }
            Err(error) => {
                tracing::debug!(message = "Invalid link", text, error = %error);
                results.push_invalid(text);
                None
            }
        }
    }
}

struct LinkReplacer<'a, P, H: ?Sized> {
    parser: &'a DocumentParser<P>,
    link_to_look_for: Link,
    new_link: Link,
    link_handler: &'a H,
    current_space: &'a str,
    results: ReplacementResults,
}

impl<P: LinkParser, H: ReplaceLinkHandler + ?Sized> LinkReplacer<'_, P, H> {
    fn replacement_for(&mut self, text: &str) -> Option<Link> {
        let link = self.parser.parse_link(text, self.results.parsing_mut())?;
        let found = link.normalized(self.current_space);

        if !self.link_handler.compare(&self.link_to_look_for, &found) {
            return None;
        }

        let context = ReplaceContext {
            current_space: self.current_space,
            link_to_look_for: &self.link_to_look_for,
            written: &link,
        };
        let replacement =
            self.link_handler
                .replacement_link_in_context(&self.new_link, &found, &context);
        tracing::trace!(found = %found, replacement = %replacement, "replacing link");
        self.results.push_replaced(found);
        Some(replacement)
    }
}

impl<P: LinkParser, H: ReplaceLinkHandler + ?Sized> Replacer for LinkReplacer<'_, P, H> {
    fn replace_append(&mut self, captures: &Captures<'_>, dst: &mut String) {
        match self.replacement_for(&captures[1]) {
            Some(replacement) => {
                // appended as is, `$` and `\` have no special meaning here
                dst.push('[');
                dst.push_str(&replacement.to_string());
                dst.push(']');
            }
            None => dst.push_str(&captures[0]),
        }
    }
}
