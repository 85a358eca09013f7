use std::collections::{BTreeSet, HashSet};

use crate::board::Card;

/// The set of card ids currently selected for a bulk move.
///
/// Membership is order-irrelevant; dispatch order comes from the board
/// snapshot via [`resolve`](SelectionSet::resolve). The caller clears the
/// selection only after a batch fully succeeds — after a partial or total
/// failure it stays intact so the operator can retry without re-selecting.
#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    ids: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: &str) {
        self.ids.insert(id.to_string());
    }

    pub fn remove(&mut self, id: &str) {
        self.ids.remove(id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn selected_ids(&self) -> &HashSet<String> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The selected cards, in board order, cloned out of the live snapshot.
    ///
    /// Ids that no longer exist in the snapshot (e.g. a card deleted by
    /// another operator since selection) are silently dropped: a stale id is
    /// not movable and must never reach the remote service.
    pub fn resolve(&self, cards: &[Card]) -> Vec<Card> {
        cards
            .iter()
            .filter(|card| self.ids.contains(&card.id))
            .cloned()
            .collect()
    }

    /// The distinct statuses currently held by selected cards, per the live
    /// snapshot. Sorted for stable display.
    pub fn distinct_statuses(&self, cards: &[Card]) -> BTreeSet<String> {
        cards
            .iter()
            .filter(|card| self.ids.contains(&card.id))
            .map(|card| card.status.clone())
            .collect()
    }

    /// How many selected cards currently sit in the given status.
    pub fn count_in_status(&self, cards: &[Card], status: &str) -> usize {
        cards
            .iter()
            .filter(|card| self.ids.contains(&card.id) && card.status == status)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, status: &str) -> Card {
        Card {
            id: id.to_string(),
            status: status.to_string(),
            position: 0,
        }
    }

    #[test]
    fn add_remove_clear_membership() {
        let mut selection = SelectionSet::new();
        selection.add("a");
        selection.add("b");
        selection.add("a"); // idempotent
        assert_eq!(selection.len(), 2);
        assert!(selection.contains("a"));

        selection.remove("a");
        assert!(!selection.contains("a"));
        assert_eq!(selection.len(), 1);

        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn resolve_preserves_board_order() {
        let cards = vec![card("c1", "pending"), card("c2", "pending"), card("c3", "done")];
        let mut selection = SelectionSet::new();
        // Selected out of board order on purpose.
        selection.add("c3");
        selection.add("c1");

        let resolved = selection.resolve(&cards);
        let ids: Vec<&str> = resolved.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c3"]);
    }

    #[test]
    fn resolve_drops_stale_ids() {
        let cards = vec![card("c1", "pending")];
        let mut selection = SelectionSet::new();
        selection.add("c1");
        selection.add("deleted-meanwhile");

        let resolved = selection.resolve(&cards);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, "c1");
    }

    #[test]
    fn distinct_statuses_reflects_live_snapshot() {
        let cards = vec![
            card("c1", "pending"),
            card("c2", "confirmed"),
            card("c3", "pending"),
        ];
        let mut selection = SelectionSet::new();
        selection.add("c1");
        selection.add("c2");
        selection.add("c3");

        let statuses = selection.distinct_statuses(&cards);
        assert_eq!(
            statuses.into_iter().collect::<Vec<_>>(),
            vec!["confirmed".to_string(), "pending".to_string()]
        );
    }

    #[test]
    fn count_in_status_excludes_stale_and_unselected() {
        let cards = vec![card("c1", "pending"), card("c2", "pending")];
        let mut selection = SelectionSet::new();
        selection.add("c1");
        selection.add("gone");

        assert_eq!(selection.count_in_status(&cards, "pending"), 1);
        assert_eq!(selection.count_in_status(&cards, "done"), 0);
    }
}
