//! The filter-panel session: owns the catalog, the query, the ranking and
//! the cursor, and orchestrates open → edit → navigate → activate/cancel →
//! close against the host's collaborators.

pub mod nav;

pub use nav::NavOutcome;

use crate::model::{Catalog, Entry};
use crate::ops::rank::{Ranked, rank};

/// Fills the catalog when a session opens. Called exactly once per open;
/// must not block. Items with empty labels are dropped by the catalog
/// itself, so a malformed item never aborts the rest of a pass.
pub trait ItemSource<T> {
    fn populate(&mut self, catalog: &mut Catalog<T>);
}

/// Executes jumps in the host view. Invoked on every successful cursor
/// move and on activate/cancel; expected to be synchronous and idempotent.
pub trait Navigator<T> {
    fn goto(&mut self, target: &T);
}

/// Persistent session states. Population, navigation and closing are
/// phases of single synchronous calls and never outlive them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Open,
}

/// One filter panel. Constructed once by the host and reused across
/// open/close cycles; between sessions it holds only the remembered
/// selection.
#[derive(Debug)]
pub struct Session<T> {
    state: SessionState,
    catalog: Catalog<T>,
    query: String,
    /// Derived total order over catalog indices, best first. Rebuilt
    /// whole on every query change, never patched.
    ranking: Vec<Ranked>,
    /// Position in `ranking`. While open: `Some` iff the ranking is
    /// non-empty.
    cursor: Option<usize>,
    /// Identity (label + target) of the last selected entry, kept across
    /// close/open so the selection can be restored.
    remembered: Option<(String, T)>,
    /// Host location captured at open, restored on cancel.
    origin: Option<T>,
}

impl<T: Clone + PartialEq> Session<T> {
    pub fn new() -> Session<T> {
        Session {
            state: SessionState::Closed,
            catalog: Catalog::new(),
            query: String::new(),
            ranking: Vec::new(),
            cursor: None,
            remembered: None,
            origin: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    /// Open the panel: replace the catalog from `source`, seed the query,
    /// and restore the remembered selection if its entry still exists.
    ///
    /// `origin` is the host's current location, handed back on cancel.
    /// `prefix`, if supplied, must already lead the query or the query is
    /// replaced by it; the host is expected to select everything past the
    /// prefix for overtyping. Restoring the selection here does not fire
    /// `Navigator::goto`: the user hasn't navigated yet.
    pub fn open(&mut self, source: &mut impl ItemSource<T>, origin: T, prefix: Option<&str>) {
        self.query.clear();
        if let Some(prefix) = prefix
            && !self.query.starts_with(prefix)
        {
            self.query = prefix.to_string();
        }

        self.catalog.clear();
        source.populate(&mut self.catalog);
        self.origin = Some(origin);
        self.state = SessionState::Open;

        self.ranking = rank(&self.query, &self.catalog);
        self.cursor = self
            .restore_remembered()
            .or_else(|| (!self.ranking.is_empty()).then_some(0));
        self.assert_cursor_invariant();
    }

    /// Ranking position of the remembered entry in the fresh catalog, if
    /// it is still present. A stale remembered position is not an error.
    fn restore_remembered(&self) -> Option<usize> {
        let (label, target) = self.remembered.as_ref()?;
        self.ranking.iter().position(|row| {
            self.catalog
                .get(row.index)
                .is_some_and(|e| e.label == *label && e.target == *target)
        })
    }

    /// Replace the query text. The ranking is recomputed from scratch and
    /// the cursor resets to the top of it.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.ranking = rank(&self.query, &self.catalog);
        self.cursor = (!self.ranking.is_empty()).then_some(0);
        self.assert_cursor_invariant();
    }

    /// Jump the host to the selected entry and close. Returns false when
    /// there was no selection to activate (the panel still closes).
    pub fn activate(&mut self, nav: &mut impl Navigator<T>) -> bool {
        let target = self.selected_entry().map(|e| e.target.clone());
        let activated = match target {
            Some(target) => {
                nav.goto(&target);
                true
            }
            None => false,
        };
        self.close();
        activated
    }

    /// Abandon the session: return the host to where it was when the
    /// panel opened, discarding any navigation done meanwhile, and close.
    pub fn cancel(&mut self, nav: &mut impl Navigator<T>) {
        if let Some(origin) = self.origin.take() {
            nav.goto(&origin);
        }
        self.close();
    }

    /// Capture the selection identity for the next open, then drop the
    /// catalog, query, ranking and cursor.
    pub fn close(&mut self) {
        self.remembered = self
            .selected_entry()
            .map(|e| (e.label.clone(), e.target.clone()));
        self.catalog.clear();
        self.query.clear();
        self.ranking.clear();
        self.cursor = None;
        self.origin = None;
        self.state = SessionState::Closed;
    }

    // --- Read-only presentation surface ---

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current ranking, best first.
    pub fn ranking(&self) -> &[Ranked] {
        &self.ranking
    }

    /// Entry at a ranking position.
    pub fn entry_at(&self, pos: usize) -> Option<&Entry<T>> {
        self.ranking
            .get(pos)
            .and_then(|row| self.catalog.get(row.index))
    }

    /// Cursor position within the ranking.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn selected_entry(&self) -> Option<&Entry<T>> {
        self.cursor.and_then(|pos| self.entry_at(pos))
    }

    pub fn len(&self) -> usize {
        self.ranking.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty()
    }

    /// Never expose a missing cursor while the ranking is non-empty.
    fn assert_cursor_invariant(&self) {
        debug_assert_eq!(self.cursor.is_some(), !self.ranking.is_empty());
    }
}

impl<T: Clone + PartialEq> Default for Session<T> {
    fn default() -> Session<T> {
        Session::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntryKind;

    /// Item source backed by a fixed list of (label, line) pairs.
    struct VecSource(Vec<(&'static str, u32)>);

    impl ItemSource<u32> for VecSource {
        fn populate(&mut self, catalog: &mut Catalog<u32>) {
            for (label, line) in &self.0 {
                catalog.push(*label, EntryKind::TAG, *line);
            }
        }
    }

    /// Navigator that records every goto it receives.
    #[derive(Default)]
    struct Recorder(Vec<u32>);

    impl Navigator<u32> for Recorder {
        fn goto(&mut self, target: &u32) {
            self.0.push(*target);
        }
    }

    fn abc_source() -> VecSource {
        VecSource(vec![("alpha", 10), ("beta", 20), ("gamma", 30)])
    }

    #[test]
    fn open_defaults_to_first_without_goto() {
        let mut session: Session<u32> = Session::new();
        let mut source = abc_source();
        session.open(&mut source, 1, None);

        assert!(session.is_open());
        assert_eq!(session.cursor(), Some(0));
        assert_eq!(session.selected_entry().unwrap().label, "alpha");
    }

    #[test]
    fn open_with_empty_catalog_has_no_cursor() {
        let mut session: Session<u32> = Session::new();
        let mut source = VecSource(vec![]);
        session.open(&mut source, 1, None);

        assert!(session.is_open());
        assert_eq!(session.cursor(), None);
        assert!(session.is_empty());
    }

    #[test]
    fn query_edit_reranks_and_resets_cursor() {
        let mut session: Session<u32> = Session::new();
        let mut source = VecSource(vec![("foo", 1), ("bar", 2), ("foobar", 3)]);
        session.open(&mut source, 0, None);

        let mut nav = Recorder::default();
        let _ = session.move_last(&mut nav);
        assert_eq!(session.cursor(), Some(2));

        session.set_query("foo");
        assert_eq!(session.cursor(), Some(0));
        let labels: Vec<&str> = (0..session.len())
            .map(|pos| session.entry_at(pos).unwrap().label.as_str())
            .collect();
        assert_eq!(labels, vec!["foo", "foobar", "bar"]);
    }

    #[test]
    fn non_matching_entries_stay_ranked_at_the_bottom() {
        let mut session: Session<u32> = Session::new();
        let mut source = VecSource(vec![("aaa", 1), ("bbb", 2)]);
        session.open(&mut source, 0, None);
        session.set_query("aaa");

        // Zero-score entries are still listed, after the matches
        assert_eq!(session.len(), 2);
        assert_eq!(session.entry_at(0).unwrap().label, "aaa");
        assert_eq!(session.entry_at(1).unwrap().label, "bbb");
    }

    #[test]
    fn activate_hands_over_target_and_closes() {
        let mut session: Session<u32> = Session::new();
        let mut source = abc_source();
        let mut nav = Recorder::default();
        session.open(&mut source, 99, None);

        let _ = session.move_by(1, &mut nav);
        nav.0.clear();
        assert!(session.activate(&mut nav));

        assert_eq!(nav.0, vec![20]);
        assert!(!session.is_open());
        assert_eq!(session.query(), "");
        assert!(session.is_empty());
    }

    #[test]
    fn activate_with_no_selection_still_closes() {
        let mut session: Session<u32> = Session::new();
        let mut source = VecSource(vec![]);
        let mut nav = Recorder::default();
        session.open(&mut source, 99, None);

        assert!(!session.activate(&mut nav));
        assert!(nav.0.is_empty());
        assert!(!session.is_open());
    }

    #[test]
    fn cancel_restores_the_origin() {
        let mut session: Session<u32> = Session::new();
        let mut source = abc_source();
        let mut nav = Recorder::default();
        session.open(&mut source, 99, None);

        let _ = session.move_by(2, &mut nav);
        nav.0.clear();
        session.cancel(&mut nav);

        assert_eq!(nav.0, vec![99]);
        assert!(!session.is_open());
    }

    #[test]
    fn reopen_restores_remembered_selection() {
        let mut session: Session<u32> = Session::new();
        let mut nav = Recorder::default();

        session.open(&mut abc_source(), 0, None);
        let _ = session.move_by(2, &mut nav);
        assert_eq!(session.selected_entry().unwrap().label, "gamma");
        session.close();

        session.open(&mut abc_source(), 0, None);
        assert_eq!(session.cursor(), Some(2));
        assert_eq!(session.selected_entry().unwrap().label, "gamma");
    }

    #[test]
    fn remembered_selection_follows_identity_not_index() {
        let mut session: Session<u32> = Session::new();
        let mut nav = Recorder::default();

        session.open(&mut abc_source(), 0, None);
        let _ = session.move_by(1, &mut nav);
        session.close();

        // Same entries, new one prepended: "beta" now sits one lower
        let mut shifted = VecSource(vec![("omega", 5), ("alpha", 10), ("beta", 20), ("gamma", 30)]);
        session.open(&mut shifted, 0, None);
        assert_eq!(session.selected_entry().unwrap().label, "beta");
        assert_eq!(session.cursor(), Some(2));
    }

    #[test]
    fn stale_remembered_selection_falls_back_to_first() {
        let mut session: Session<u32> = Session::new();
        let mut nav = Recorder::default();

        session.open(&mut abc_source(), 0, None);
        let _ = session.move_by(2, &mut nav);
        session.close();

        let mut smaller = VecSource(vec![("alpha", 10), ("beta", 20)]);
        session.open(&mut smaller, 0, None);
        assert_eq!(session.cursor(), Some(0));
        assert_eq!(session.selected_entry().unwrap().label, "alpha");
    }

    #[test]
    fn remembered_selection_distinguishes_duplicate_labels() {
        let mut session: Session<u32> = Session::new();
        let mut nav = Recorder::default();
        let source = || VecSource(vec![("dup", 1), ("dup", 2)]);

        session.open(&mut source(), 0, None);
        let _ = session.move_by(1, &mut nav);
        assert_eq!(session.selected_entry().unwrap().target, 2);
        session.close();

        session.open(&mut source(), 0, None);
        assert_eq!(session.selected_entry().unwrap().target, 2);
    }

    #[test]
    fn closing_without_selection_forgets_the_remembered_entry() {
        let mut session: Session<u32> = Session::new();
        let mut nav = Recorder::default();

        session.open(&mut abc_source(), 0, None);
        let _ = session.move_by(1, &mut nav);
        session.close();

        // A session over an empty catalog closes with no selection...
        session.open(&mut VecSource(vec![]), 0, None);
        session.close();

        // ...so the next open starts from the top again
        session.open(&mut abc_source(), 0, None);
        assert_eq!(session.cursor(), Some(0));
    }

    #[test]
    fn prefix_seeds_the_query_on_open() {
        let mut session: Session<u32> = Session::new();
        let mut source = VecSource(vec![("get_name", 1), ("set_name", 2)]);
        session.open(&mut source, 0, Some("get_"));

        assert_eq!(session.query(), "get_");
        assert_eq!(session.entry_at(0).unwrap().label, "get_name");
    }

    #[test]
    fn close_clears_query_so_prefix_reapplies() {
        let mut session: Session<u32> = Session::new();
        session.open(&mut abc_source(), 0, Some("al"));
        session.set_query("alpha");
        session.close();

        session.open(&mut abc_source(), 0, Some("al"));
        assert_eq!(session.query(), "al");
    }
}
