//! Product tag list and its comma-separated form encoding.

use serde::{Deserialize, Serialize};

/// An ordered set of product tags.
///
/// Tags are trimmed, empty entries are dropped and duplicates keep their
/// first position. The form encoding is a comma-separated string:
///
/// ```
/// use product_desk_core::TagList;
///
/// let tags = TagList::parse("summer, sale ,, summer");
/// assert_eq!(tags.as_slice(), ["summer", "sale"]);
/// assert_eq!(tags.to_form_value(), "summer, sale");
///
/// assert!(TagList::parse("").is_empty());
/// assert_eq!(TagList::default().to_form_value(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagList(Vec<String>);

impl TagList {
    /// Separator used when rendering tags into a form field.
    pub const FORM_SEPARATOR: &'static str = ", ";

    /// Build a tag list from individual tags.
    #[must_use]
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim();
            if tag.is_empty() || out.iter().any(|t| t == tag) {
                continue;
            }
            out.push(tag.to_owned());
        }
        Self(out)
    }

    /// Parse the comma-separated form value.
    ///
    /// An empty or whitespace-only string yields an empty list.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        Self::new(value.split(','))
    }

    /// Render the list as a comma-separated form value.
    #[must_use]
    pub fn to_form_value(&self) -> String {
        self.0.join(Self::FORM_SEPARATOR)
    }

    /// Returns the tags as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns `true` if there are no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the tags.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Consumes the list and returns the inner vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for TagList {
    fn from(tags: Vec<String>) -> Self {
        Self::new(tags)
    }
}

impl From<TagList> for Vec<String> {
    fn from(tags: TagList) -> Self {
        tags.0
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let tags = TagList::new(["a", "b"]);
        let form = tags.to_form_value();
        assert_eq!(form, "a, b");
        assert_eq!(TagList::parse(&form), tags);
    }

    #[test]
    fn test_empty_round_trip() {
        let tags = TagList::default();
        assert_eq!(tags.to_form_value(), "");
        assert!(TagList::parse("").is_empty());
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert!(TagList::parse("   ").is_empty());
        assert!(TagList::parse(" , ,").is_empty());
    }

    #[test]
    fn test_trims_and_dedups() {
        let tags = TagList::parse("  red,blue , red,  green ");
        assert_eq!(tags.as_slice(), ["red", "blue", "green"]);
    }

    #[test]
    fn test_keeps_inner_spaces() {
        let tags = TagList::parse("summer sale, new arrival");
        assert_eq!(tags.as_slice(), ["summer sale", "new arrival"]);
    }

    #[test]
    fn test_serde_as_array() {
        let tags: TagList = serde_json::from_str(r#"["x"," y ",""]"#).unwrap();
        assert_eq!(tags.as_slice(), ["x", "y"]);
        assert_eq!(serde_json::to_string(&tags).unwrap(), r#"["x","y"]"#);
    }
}
