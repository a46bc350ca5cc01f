//! Navigation cursor over the filtered criteria sequence
//!
//! The cursor is a pure state machine: it tracks `(theme, index)` over a
//! [`ThemedCriteria`] view and signals boundary transitions. Persistence and
//! callbacks are wired by the owning session, which is what guarantees each
//! successful move notifies collaborators exactly once.

use serde::{Deserialize, Serialize};

use crate::referential::{Criterion, ThemedCriteria};

/// A resolved navigation position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub theme: String,
    /// Index within the theme's filtered criteria list
    pub index: usize,
}

/// Outcome of a navigation step
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Position changed
    Moved(Position),
    /// `next()` past the last criterion of the last theme; position unchanged
    Completed,
    /// `previous()` at the very first criterion (or cursor not initialized);
    /// position unchanged
    AtStart,
}

/// Cursor over the level-filtered questionnaire
///
/// `initialize` runs exactly once: re-initializing would silently discard
/// forward navigation (the resume-reset bug class), so later calls are
/// no-ops returning the current position.
pub struct NavigationCursor {
    groups: ThemedCriteria,
    /// `(theme index, index within theme)`; None until initialized
    position: Option<(usize, usize)>,
    initialized: bool,
}

impl NavigationCursor {
    pub fn new(groups: ThemedCriteria) -> Self {
        Self {
            groups,
            position: None,
            initialized: false,
        }
    }

    /// Resume from a saved position, or start at the first criterion
    ///
    /// The saved pair is used only when it resolves to a criterion in the
    /// current filtered set; otherwise navigation starts at the beginning.
    /// Returns the resolved position, or None when the questionnaire is
    /// empty. One-shot: subsequent calls return the current position
    /// without moving.
    pub fn initialize(
        &mut self,
        saved_theme: Option<&str>,
        saved_index: Option<usize>,
    ) -> Option<Position> {
        if self.initialized {
            return self.position();
        }
        self.initialized = true;

        let saved = match (saved_theme, saved_index) {
            (Some(theme), Some(index)) => self
                .groups
                .theme_index(theme)
                .filter(|&theme_idx| self.groups.criterion_at(theme_idx, index).is_some())
                .map(|theme_idx| (theme_idx, index)),
            _ => None,
        };

        self.position = saved.or_else(|| {
            if self.groups.is_empty() {
                None
            } else {
                Some((0, 0))
            }
        });
        self.position()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Current position, if any
    pub fn position(&self) -> Option<Position> {
        let (theme_idx, index) = self.position?;
        let (theme, _) = self.groups.group_at(theme_idx)?;
        Some(Position {
            theme: theme.to_string(),
            index,
        })
    }

    /// Criterion at the current position
    pub fn current(&self) -> Option<&Criterion> {
        let (theme_idx, index) = self.position?;
        self.groups.criterion_at(theme_idx, index)
    }

    /// The filtered view this cursor navigates
    pub fn groups(&self) -> &ThemedCriteria {
        &self.groups
    }

    /// Jump directly to a criterion, independent of sequential order
    ///
    /// None (and no move) when the id is not in the filtered set.
    pub fn select_criterion(&mut self, criterion_id: &str) -> Option<Position> {
        let target = self.groups.position_of(criterion_id)?;
        self.position = Some(target);
        self.initialized = true;
        self.position()
    }

    /// Advance one criterion, crossing theme boundaries
    ///
    /// Past the last criterion of the last theme the cursor signals
    /// [`Step::Completed`] without moving: there is no terminal position,
    /// the caller reacts and leaves the questionnaire.
    pub fn next(&mut self) -> Step {
        let Some((theme_idx, index)) = self.position else {
            // Empty questionnaire is trivially complete; uninitialized is a no-op
            return if self.groups.is_empty() && self.initialized {
                Step::Completed
            } else {
                Step::AtStart
            };
        };

        let in_theme = self
            .groups
            .group_at(theme_idx)
            .map(|(_, criteria)| criteria.len())
            .unwrap_or(0);
        if index + 1 < in_theme {
            self.position = Some((theme_idx, index + 1));
        } else if theme_idx + 1 < self.groups.theme_count() {
            self.position = Some((theme_idx + 1, 0));
        } else {
            return Step::Completed;
        }
        match self.position() {
            Some(position) => Step::Moved(position),
            None => Step::AtStart,
        }
    }

    /// Step back one criterion, crossing theme boundaries
    ///
    /// At the very first criterion this is a no-op, not an error.
    pub fn previous(&mut self) -> Step {
        let Some((theme_idx, index)) = self.position else {
            return Step::AtStart;
        };

        if index > 0 {
            self.position = Some((theme_idx, index - 1));
        } else if theme_idx > 0 {
            let last = self
                .groups
                .group_at(theme_idx - 1)
                .map(|(_, criteria)| criteria.len().saturating_sub(1))
                .unwrap_or(0);
            self.position = Some((theme_idx - 1, last));
        } else {
            return Step::AtStart;
        }
        match self.position() {
            Some(position) => Step::Moved(position),
            None => Step::AtStart,
        }
    }
}
