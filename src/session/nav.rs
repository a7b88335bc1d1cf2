//! Cursor movement over the current ranking: absolute jumps, relative
//! steps, and paging. Movement clamps at the ends (no wraparound), and
//! every effective move scrolls the host via `Navigator::goto` without
//! leaving the session.

use super::{Navigator, Session};

/// Result of a cursor-movement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum NavOutcome {
    /// The full requested movement happened.
    Moved,
    /// The cursor moved, but hit an end before covering the request.
    Clamped,
    /// Nothing moved: empty ranking, or already at the boundary.
    Unavailable,
}

impl NavOutcome {
    /// Whether the host should acknowledge a refused or shortened move
    /// (a bell or flash, never an error dialog).
    pub fn hit_boundary(self) -> bool {
        !matches!(self, NavOutcome::Moved)
    }

    /// Whether the cursor changed position at all.
    pub fn moved(self) -> bool {
        matches!(self, NavOutcome::Moved | NavOutcome::Clamped)
    }
}

impl<T: Clone + PartialEq> Session<T> {
    /// Jump to the top of the ranking. Fails only on an empty ranking.
    pub fn move_first(&mut self, nav: &mut impl Navigator<T>) -> NavOutcome {
        self.move_to(0, nav)
    }

    /// Jump to the bottom of the ranking. Fails only on an empty ranking.
    pub fn move_last(&mut self, nav: &mut impl Navigator<T>) -> NavOutcome {
        if self.ranking.is_empty() {
            return NavOutcome::Unavailable;
        }
        self.move_to(self.ranking.len() - 1, nav)
    }

    /// Move the cursor by `by` positions (negative = toward the top).
    ///
    /// A request that would run past either end stops at the furthest
    /// reachable position and reports `Clamped`; a request that cannot
    /// move at all reports `Unavailable`. `by == 0` re-announces the
    /// current selection to the navigator.
    pub fn move_by(&mut self, by: isize, nav: &mut impl Navigator<T>) -> NavOutcome {
        if self.ranking.is_empty() {
            return NavOutcome::Unavailable;
        }
        let Some(current) = self.cursor else {
            // Nothing selected yet: any movement starts by taking the top
            return self.move_to(0, nav);
        };

        let last = self.ranking.len() as isize - 1;
        let wanted = current as isize + by;
        let landed = wanted.clamp(0, last);
        if landed == current as isize && by != 0 {
            return NavOutcome::Unavailable;
        }

        let outcome = if landed == wanted {
            NavOutcome::Moved
        } else {
            NavOutcome::Clamped
        };
        match self.move_to(landed as usize, nav) {
            NavOutcome::Moved => outcome,
            other => other,
        }
    }

    /// Page movement: same contract as `move_by`, with the page size
    /// supplied by the caller (the host's viewport height).
    pub fn move_page(
        &mut self,
        by_pages: isize,
        page_size: usize,
        nav: &mut impl Navigator<T>,
    ) -> NavOutcome {
        self.move_by(by_pages.saturating_mul(page_size as isize), nav)
    }

    /// Absolute move to a ranking position, announcing the new selection.
    fn move_to(&mut self, pos: usize, nav: &mut impl Navigator<T>) -> NavOutcome {
        let Some(entry) = self.entry_at(pos) else {
            return NavOutcome::Unavailable;
        };
        let target = entry.target.clone();
        self.cursor = Some(pos);
        nav.goto(&target);
        NavOutcome::Moved
    }
}
