use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::link::{Delimiter, Link};

/// Turns the text found between `[` and `]` into a [`Link`].
///
/// An `Err` means the text is not a valid link body. [`crate::DocumentParser`]
/// records such texts as invalid elements and keeps scanning.
pub trait LinkParser {
    type Error: std::error::Error;

    fn parse(&self, text: &str) -> Result<Link, Self::Error>;
}

impl<P: LinkParser + ?Sized> LinkParser for &P {
    type Error = P::Error;

    fn parse(&self, text: &str) -> Result<Link, Self::Error> {
        (**self).parse(text)
    }
}

impl<P: LinkParser + ?Sized> LinkParser for Box<P> {
    type Error = P::Error;

    fn parse(&self, text: &str) -> Result<Link, Self::Error> {
        (**self).parse(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkParseError {
    #[error("empty link")]
    Empty,
    #[error("missing link reference in `{0}`")]
    MissingReference(String),
    #[error("invalid URL `{text}`")]
    InvalidUri {
        text: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid interwiki alias in `{0}`")]
    InvalidInterWikiAlias(String),
}

/// Parser for XWiki 1.0 link bodies:
///
/// ```text
/// alias|wiki:Space.Page#anchor?query@interwiki|target
/// alias|https://example.org/some/path|target
/// ```
///
/// `>` may be used instead of `|`. Every part is optional except the
/// reference in the middle.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLinkParser;

impl DefaultLinkParser {
    pub fn new() -> Self {
        Self
    }
}

fn looks_like_uri(reference: &str) -> bool {
    static URL_SCHEME: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").unwrap());

    reference.starts_with("mailto:") || URL_SCHEME.is_match(reference)
}

impl LinkParser for DefaultLinkParser {
    type Error = LinkParseError;

    fn parse(&self, text: &str) -> Result<Link, LinkParseError> {
        let body = text.trim();
        if body.is_empty() {
            return Err(LinkParseError::Empty);
        }

        let mut link = Link::default();
        let mut rest = body;

        // the order matters: every step strips what it consumed from `rest`
        let delimiter = if rest.contains('|') {
            Some(Delimiter::Pipe)
        } else if rest.contains('>') {
            Some(Delimiter::GreaterThan)
        } else {
            None
        };
        if let Some(delimiter) = delimiter {
            link.delimiter = delimiter;
            let separator = delimiter.as_char();

            if let Some((alias, remainder)) = rest.split_once(separator) {
                // `[|Page|_blank]` has a target but no alias
                link.alias = (!alias.is_empty()).then(|| alias.into());
                rest = remainder;
            }
            if let Some((reference, target)) = rest.rsplit_once(separator) {
                link.target = Some(target.into());
                rest = reference;
            }
        }

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(LinkParseError::MissingReference(text.to_string()));
        }

        if looks_like_uri(rest) {
            let uri = Url::parse(rest).map_err(|source| LinkParseError::InvalidUri {
                text: rest.to_string(),
                source,
            })?;
            link.uri = Some(uri);
            return Ok(link);
        }

        let mut rest = rest;
        if let Some((reference, inter_wiki_alias)) = rest.split_once('@') {
            if inter_wiki_alias.is_empty() || inter_wiki_alias.contains('@') {
                return Err(LinkParseError::InvalidInterWikiAlias(text.to_string()));
            }
            link.inter_wiki_alias = Some(inter_wiki_alias.into());
            rest = reference;
        }
        if let Some((reference, query_string)) = rest.split_once('?') {
            link.query_string = Some(query_string.into());
            rest = reference;
        }
        if let Some((reference, anchor)) = rest.split_once('#') {
            link.anchor = Some(anchor.into());
            rest = reference;
        }
        if let Some((wiki, reference)) = rest.split_once(':') {
            link.virtual_wiki_alias = Some(wiki.into());
            rest = reference;
        }
        if let Some((space, reference)) = rest.split_once('.') {
            link.space = Some(space.into());
            rest = reference;
        }
        if !rest.is_empty() {
            link.page = Some(rest.into());
        }

        Ok(link)
    }
}
