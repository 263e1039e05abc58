use std::fmt::{self, Display};

use compact_str::CompactString;
use url::Url;

/// Page name used when a link only names a space (or nothing at all).
pub const DEFAULT_PAGE: &str = "WebHome";

/// Separator between alias, reference and target in a link body.
///
/// Both forms are equivalent, we only remember which one was used so a
/// rewritten link looks like the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Delimiter {
    #[default]
    Pipe, // [Alias|Space.Page|_blank]
    GreaterThan, // [Alias>Space.Page>_blank]
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Pipe => '|',
            Delimiter::GreaterThan => '>',
        }
    }
}

/// A reference found between `[` and `]` in wiki content.
///
/// Either `page` or `uri` is the actual target; a link with a `uri` (or an
/// interwiki alias) is external and never gets the space/page defaults
/// applied by [`Link::normalized`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Link {
    pub alias: Option<CompactString>,
    pub virtual_wiki_alias: Option<CompactString>,
    pub space: Option<CompactString>,
    pub page: Option<CompactString>,
    pub uri: Option<Url>,
    pub query_string: Option<CompactString>,
    pub anchor: Option<CompactString>,
    pub inter_wiki_alias: Option<CompactString>,
    pub target: Option<CompactString>,
    pub delimiter: Delimiter,
}

impl Link {
    /// Link pointing at the document `space.page`, optionally in another wiki.
    pub fn to_document(wiki: Option<&str>, space: &str, page: &str) -> Self {
        Self {
            virtual_wiki_alias: wiki.map(CompactString::from),
            space: Some(space.into()),
            page: Some(page.into()),
            ..Self::default()
        }
    }

    pub fn is_external(&self) -> bool {
        self.uri.is_some() || self.inter_wiki_alias.is_some()
    }

    pub fn is_using_pipe_delimiter(&self) -> bool {
        self.delimiter == Delimiter::Pipe
    }

    /// Returns a copy with the implicit parts of an internal link filled in:
    /// the page defaults to [`DEFAULT_PAGE`] and the space to `current_space`.
    ///
    /// External links are returned as they are.
    pub fn normalized(&self, current_space: &str) -> Link {
        let mut normalized = self.clone();

        if !normalized.is_external() {
            if normalized.page.is_none() {
                normalized.page = Some(DEFAULT_PAGE.into());
            }
            if normalized.space.is_none() {
                normalized.space = Some(current_space.into());
            }
        }

        normalized
    }

    fn reference_contains_delimiter(&self) -> bool {
        let has_delimiter = |part: &str| part.contains(['|', '>']);

        [
            &self.virtual_wiki_alias,
            &self.space,
            &self.page,
            &self.query_string,
            &self.anchor,
            &self.inter_wiki_alias,
        ]
        .into_iter()
        .flatten()
        .any(|part| has_delimiter(part.as_str()))
            || self.uri.as_ref().is_some_and(|uri| has_delimiter(uri.as_str()))
    }
}

impl Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delimiter = self.delimiter.as_char();

        if let Some(alias) = &self.alias {
            write!(f, "{alias}{delimiter}")?;
        } else if self.target.is_some()
            || self.delimiter == Delimiter::GreaterThan
            || self.reference_contains_delimiter()
        {
            // an empty alias, so the body reads back without one
            write!(f, "{delimiter}")?;
        }
        if let Some(wiki) = &self.virtual_wiki_alias {
            write!(f, "{wiki}:")?;
        }
        if let Some(space) = &self.space {
            write!(f, "{space}.")?;
        }
        if let Some(page) = &self.page {
            f.write_str(page)?;
        }
        if let Some(uri) = &self.uri {
            f.write_str(uri.as_str())?;
        }
        if let Some(anchor) = &self.anchor {
            write!(f, "#{anchor}")?;
        }
        if let Some(query_string) = &self.query_string {
            write!(f, "?{query_string}")?;
        }
        if let Some(inter_wiki_alias) = &self.inter_wiki_alias {
            write!(f, "@{inter_wiki_alias}")?;
        }
        if let Some(target) = &self.target {
            write!(f, "{delimiter}{target}")?;
        }

        Ok(())
    }
}
