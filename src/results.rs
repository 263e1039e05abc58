use std::ops::Deref;

use crate::link::Link;

/// Links found by one [`crate::DocumentParser::parse_links`] pass.
///
/// Valid links and invalid link texts are kept in two separate sequences,
/// each in the order they appear in the content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsingResults {
    valid_elements: Vec<Link>,
    invalid_elements: Vec<String>,
}

impl ParsingResults {
    pub fn valid_elements(&self) -> &[Link] {
        &self.valid_elements
    }

    /// Raw texts (without the surrounding brackets) that failed to parse.
    pub fn invalid_elements(&self) -> &[String] {
        &self.invalid_elements
    }

    pub fn into_parts(self) -> (Vec<Link>, Vec<String>) {
        (self.valid_elements, self.invalid_elements)
    }

    pub(crate) fn push_valid(&mut self, link: Link) {
        self.valid_elements.push(link);
    }

    pub(crate) fn push_invalid(&mut self, text: &str) {
        self.invalid_elements.push(text.to_string());
    }
}

/// Outcome of [`crate::DocumentParser::parse_links_and_replace`].
///
/// Derefs to the [`ParsingResults`] of the same pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementResults {
    parsing: ParsingResults,
    replaced_elements: Vec<Link>,
    modified_content: String,
}

impl ReplacementResults {
    /// The normalized links that were replaced, in order of appearance.
    pub fn replaced_elements(&self) -> &[Link] {
        &self.replaced_elements
    }

    pub fn modified_content(&self) -> &str {
        &self.modified_content
    }

    pub fn into_modified_content(self) -> String {
        self.modified_content
    }

    pub(crate) fn parsing_mut(&mut self) -> &mut ParsingResults {
        &mut self.parsing
    }

    pub(crate) fn push_replaced(&mut self, link: Link) {
        self.replaced_elements.push(link);
    }

    pub(crate) fn set_modified_content(&mut self, content: String) {
        self.modified_content = content;
    }
}

impl Deref for ReplacementResults {
    type Target = ParsingResults;

    fn deref(&self) -> &Self::Target {
        &self.parsing
    }
}
