use crate::link::Link;

/// Decides which links [`crate::DocumentParser::parse_links_and_replace`]
/// rewrites and what they are rewritten to.
///
/// Both methods receive links that are already normalized against the
/// current space. They are called once per candidate link and must not have
/// side effects.
pub trait ReplaceLinkHandler {
    /// Whether `link_to_replace` (found in the content) is the link we are
    /// looking for.
    fn compare(&self, link_to_look_for: &Link, link_to_replace: &Link) -> bool;

    /// The link written in place of `link_to_replace`.
    fn replacement_link(&self, new_link: &Link, link_to_replace: &Link) -> Link;

    /// Same as [`ReplaceLinkHandler::replacement_link`], with access to the
    /// link as it was written and to the space the content resolves in.
    ///
    /// This is what the document parser calls. Handlers that need to know
    /// which parts of a link were implicit override it.
    fn replacement_link_in_context(
        &self,
        new_link: &Link,
        link_to_replace: &Link,
        _context: &ReplaceContext<'_>,
    ) -> Link {
        self.replacement_link(new_link, link_to_replace)
    }
}

/// What a [`ReplaceLinkHandler`] may want to know about a match besides the
/// normalized links.
#[derive(Debug, Clone, Copy)]
pub struct ReplaceContext<'a> {
    /// Space that unqualified links in the content resolve against.
    pub current_space: &'a str,
    /// The normalized link looked for.
    pub link_to_look_for: &'a Link,
    /// The matched link before normalization.
    pub written: &'a Link,
}

impl<H: ReplaceLinkHandler + ?Sized> ReplaceLinkHandler for &H {
    fn compare(&self, link_to_look_for: &Link, link_to_replace: &Link) -> bool {
        (**self).compare(link_to_look_for, link_to_replace)
    }

    fn replacement_link(&self, new_link: &Link, link_to_replace: &Link) -> Link {
        (**self).replacement_link(new_link, link_to_replace)
    }

    fn replacement_link_in_context(
        &self,
        new_link: &Link,
        link_to_replace: &Link,
        context: &ReplaceContext<'_>,
    ) -> Link {
        (**self).replacement_link_in_context(new_link, link_to_replace, context)
    }
}

impl<H: ReplaceLinkHandler + ?Sized> ReplaceLinkHandler for Box<H> {
    fn compare(&self, link_to_look_for: &Link, link_to_replace: &Link) -> bool {
        (**self).compare(link_to_look_for, link_to_replace)
    }

    fn replacement_link(&self, new_link: &Link, link_to_replace: &Link) -> Link {
        (**self).replacement_link(new_link, link_to_replace)
    }

    fn replacement_link_in_context(
        &self,
        new_link: &Link,
        link_to_replace: &Link,
        context: &ReplaceContext<'_>,
    ) -> Link {
        (**self).replacement_link_in_context(new_link, link_to_replace, context)
    }
}

/// Used when a page is renamed: matches every link pointing to the old
/// document, whatever its alias, query string, anchor or target, and points
/// it to the new document while keeping those parts.
///
/// The rewritten link names the space when the original did or when the new
/// space is not the one the content resolves in, and names the wiki when the
/// document moved to another wiki or the original named one.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenamePageReplaceLinkHandler;

impl ReplaceLinkHandler for RenamePageReplaceLinkHandler {
    fn compare(&self, link_to_look_for: &Link, link_to_replace: &Link) -> bool {
        if link_to_look_for.is_external() || link_to_replace.is_external() {
            return false;
        }

        // no wiki means the current wiki
        let same_wiki = match (
            &link_to_look_for.virtual_wiki_alias,
            &link_to_replace.virtual_wiki_alias,
        ) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        };

        same_wiki
            && link_to_look_for.space == link_to_replace.space
            && link_to_look_for.page == link_to_replace.page
    }

    /// Without a context every part of the link is taken as written, so the
    /// result is always qualified with its space.
    fn replacement_link(&self, new_link: &Link, link_to_replace: &Link) -> Link {
        let context = ReplaceContext {
            current_space: "",
            link_to_look_for: link_to_replace,
            written: link_to_replace,
        };
        self.replacement_link_in_context(new_link, link_to_replace, &context)
    }

    fn replacement_link_in_context(
        &self,
        new_link: &Link,
        link_to_replace: &Link,
        context: &ReplaceContext<'_>,
    ) -> Link {
        let mut replacement = link_to_replace.clone();
        replacement.page = new_link.page.clone();

        let written = context.written;
        let old_wiki = written
            .virtual_wiki_alias
            .as_ref()
            .or(context.link_to_look_for.virtual_wiki_alias.as_ref());
        let wiki_changed = new_link.virtual_wiki_alias.is_some()
            && new_link.virtual_wiki_alias.as_ref() != old_wiki;
        replacement.virtual_wiki_alias = if wiki_changed {
            new_link.virtual_wiki_alias.clone()
        } else {
            written.virtual_wiki_alias.clone()
        };

        let name_space = written.space.is_some()
            || replacement.virtual_wiki_alias.is_some()
            || new_link.space.as_deref() != Some(context.current_space);
        replacement.space = if name_space {
            new_link.space.clone()
        } else {
            None
        };

        replacement
    }
}

/// Matches only links equal in every part to the one looked for and
/// replaces them with the new link as given.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactReplaceLinkHandler;

impl ReplaceLinkHandler for ExactReplaceLinkHandler {
    fn compare(&self, link_to_look_for: &Link, link_to_replace: &Link) -> bool {
        link_to_look_for == link_to_replace
    }

    fn replacement_link(&self, new_link: &Link, _link_to_replace: &Link) -> Link {
        new_link.clone()
    }
}
