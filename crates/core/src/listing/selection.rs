//! Row selection on the rendered page.

use std::collections::BTreeSet;

use super::{ActionKind, Listable, ListingPage, LogicError};
use crate::types::ProductId;

/// Selected product ids. Only ids on the rendered page are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(BTreeSet<ProductId>);

impl Selection {
    /// Build a selection from ids.
    #[must_use]
    pub fn new(ids: impl IntoIterator<Item = ProductId>) -> Self {
        Self(ids.into_iter().collect())
    }

    /// Parse a comma-separated list of ids; invalid entries are dropped.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        Self::new(
            value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .filter_map(|s| ProductId::parse(s).ok()),
        )
    }

    /// Add or remove one id.
    pub fn toggle(&mut self, id: &ProductId) {
        if !self.0.remove(id) {
            self.0.insert(id.clone());
        }
    }

    /// Select every row on the page, or clear when all are already selected.
    pub fn toggle_all<T: Listable>(&mut self, page: &ListingPage<'_, T>) {
        let all_selected = !page.rows.is_empty() && page.rows.iter().all(|r| self.0.contains(r.id()));
        if all_selected {
            self.0.clear();
        } else {
            self.0 = page.rows.iter().map(|r| r.id().clone()).collect();
        }
    }

    /// Drop ids that are not on the rendered page.
    pub fn retain_visible<T: Listable>(&mut self, page: &ListingPage<'_, T>) {
        self.0.retain(|id| page.rows.iter().any(|r| r.id() == id));
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.0.contains(id)
    }

    /// Number of selected rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the selected ids.
    pub fn iter(&self) -> impl Iterator<Item = &ProductId> {
        self.0.iter()
    }

    /// Comma-separated query-string value.
    #[must_use]
    pub fn to_query_value(&self) -> String {
        self.0
            .iter()
            .map(ProductId::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// The selected id when exactly one row is selected.
    ///
    /// # Errors
    ///
    /// Returns [`LogicError::SelectionRequired`] for zero or several rows.
    pub fn single(&self, action: ActionKind) -> Result<&ProductId, LogicError> {
        let mut ids = self.0.iter();
        match (ids.next(), ids.next()) {
            (Some(id), None) => Ok(id),
            _ => Err(LogicError::SelectionRequired {
                action,
                selected: self.0.len(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::listing::tests::seven_rows;
    use crate::listing::{ListingAction, ListingState, derive_page};

    fn id(n: u32) -> ProductId {
        ProductId::parse(&n.to_string()).unwrap()
    }

    #[test]
    fn test_single_requires_exactly_one() {
        let none = Selection::default();
        assert_eq!(
            none.single(ActionKind::Update),
            Err(LogicError::SelectionRequired {
                action: ActionKind::Update,
                selected: 0
            })
        );

        let two = Selection::new([id(1), id(2)]);
        assert!(matches!(
            two.single(ActionKind::Delete),
            Err(LogicError::SelectionRequired { selected: 2, .. })
        ));

        let one = Selection::new([id(3)]);
        assert_eq!(one.single(ActionKind::Delete).unwrap(), &id(3));
    }

    #[test]
    fn test_retain_visible_drops_rows_from_other_pages() {
        let items = seven_rows();
        // Newest first: page 1 holds ids 7..=3, page 2 holds 2 and 1.
        let state = ListingState::default();
        let mut selection = Selection::new([id(7), id(1)]);
        selection.retain_visible(&derive_page(&items, &state));
        assert_eq!(selection, Selection::new([id(7)]));

        let mut selection = Selection::new([id(7), id(1)]);
        selection.retain_visible(&derive_page(&items, &state.apply(ListingAction::NextPage)));
        assert_eq!(selection, Selection::new([id(1)]));
    }

    #[test]
    fn test_toggle_and_toggle_all() {
        let items = seven_rows();
        let page = derive_page(&items, &ListingState::default());

        let mut selection = Selection::default();
        selection.toggle(&id(4));
        assert!(selection.contains(&id(4)));
        selection.toggle(&id(4));
        assert!(selection.is_empty());

        selection.toggle_all(&page);
        assert_eq!(selection.len(), 5);
        selection.toggle_all(&page);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_parse_and_render() {
        let selection = Selection::parse("gid://shopify/Product/2, 1,,junk");
        assert_eq!(selection, Selection::new([id(1), id(2)]));
        assert_eq!(
            selection.to_query_value(),
            "gid://shopify/Product/1,gid://shopify/Product/2"
        );
    }
}
