//! Questionnaire navigation

mod cursor;

pub use cursor::{NavigationCursor, Position, Step};
