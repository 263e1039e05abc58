//! Fixtures shared by the unit and integration tests.

use compact_str::CompactString;
use proptest::prelude::*;
use url::Url;

use crate::{
    link::{Delimiter, Link},
    link_parser::{DefaultLinkParser, LinkParser},
    replace::ReplaceLinkHandler,
};

pub mod prelude {
    pub(crate) use super::{
        arb_link, FixedReplacementHandler, NeverMatchHandler, RejectingParser, RENAME_CASES,
        WIKI_CONTENT,
    };
    pub(crate) use proptest::prelude::*;
}

/// Wiki-ish text with a high density of link syntax.
pub const WIKI_CONTENT: &str = "(\\[|\\]|\\||>|\\.|:|#|\\?|@|\n|Main|Page|WebHome|http://x.org|\\$1|\\\\|.|.|.)*";

/// `(link as written, link after renaming Main.Old to Main.New)`
pub const RENAME_CASES: &[(&str, &str)] = &[
    ("Old", "New"),
    ("Main.Old", "Main.New"),
    ("Hi|Old?a=1|_top", "Hi|New?a=1|_top"),
    ("Hi>Main.Old#end", "Hi>Main.New#end"),
    (" Keep ", " Keep "),
    ("x|Main.Other", "x|Main.Other"),
    ("y>Sandbox.Old", "y>Sandbox.Old"),
    ("Old@elsewhere", "Old@elsewhere"),
    ("bad@@", "bad@@"),
];

#[derive(Debug, thiserror::Error)]
#[error("rejected link `{0}`")]
pub struct Rejected(String);

/// Behaves like [`DefaultLinkParser`], but also refuses every text that
/// contains `marker`.
#[derive(Debug)]
pub struct RejectingParser {
    marker: &'static str,
}

impl RejectingParser {
    pub fn new(marker: &'static str) -> Self {
        Self { marker }
    }
}

impl LinkParser for RejectingParser {
    type Error = Rejected;

    fn parse(&self, text: &str) -> Result<Link, Rejected> {
        if text.contains(self.marker) {
            return Err(Rejected(text.to_string()));
        }
        DefaultLinkParser
            .parse(text)
            .map_err(|_| Rejected(text.to_string()))
    }
}

pub struct NeverMatchHandler;

impl ReplaceLinkHandler for NeverMatchHandler {
    fn compare(&self, _link_to_look_for: &Link, _link_to_replace: &Link) -> bool {
        false
    }

    fn replacement_link(&self, new_link: &Link, _link_to_replace: &Link) -> Link {
        new_link.clone()
    }
}

/// Replaces every link with the same fixed link.
pub struct FixedReplacementHandler(pub Link);

impl ReplaceLinkHandler for FixedReplacementHandler {
    fn compare(&self, _link_to_look_for: &Link, _link_to_replace: &Link) -> bool {
        true
    }

    fn replacement_link(&self, _new_link: &Link, _link_to_replace: &Link) -> Link {
        self.0.clone()
    }
}

fn arb_part() -> impl Strategy<Value = Option<CompactString>> {
    proptest::option::of("[A-Za-z0-9_]{0,6}".prop_map(CompactString::from))
}

prop_compose! {
    pub fn arb_link()(
        alias in arb_part(),
        virtual_wiki_alias in arb_part(),
        space in arb_part(),
        page in arb_part(),
        uri in proptest::option::weighted(0.2, Just(Url::parse("https://www.xwiki.org/xwiki/").unwrap())),
        query_string in arb_part(),
        anchor in arb_part(),
        inter_wiki_alias in proptest::option::weighted(0.2, "[a-z]{1,6}".prop_map(CompactString::from)),
        target in arb_part(),
        pipe in any::<bool>(),
    ) -> Link {
        Link {
            alias,
            virtual_wiki_alias,
            space,
            page,
            uri,
            query_string,
            anchor,
            inter_wiki_alias,
            target,
            delimiter: if pipe { Delimiter::Pipe } else { Delimiter::GreaterThan },
        }
    }
}
