//! Movie browser state management.

use cinesmart_view::Fragment;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseAction {
    /// Nothing to do.
    None,
    /// Leave the browser.
    Quit,
    /// The search input changed to the given value.
    Input(String),
    /// Open the detail modal for the given movie ID.
    Activate(u64),
    /// Close the detail modal.
    CloseModal,
    /// Open the movie's web page.
    OpenPage(u64),
}

/// State for the movie browser TUI.
#[derive(Debug, Default)]
pub struct BrowseState {
    /// Search input text.
    pub query: String,
    /// Cursor position in the movie list.
    pub cursor: usize,
}

impl BrowseState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a character to the search input.
    pub fn input_push(&mut self, ch: char) {
        self.query.push(ch);
        self.cursor = 0;
    }

    /// Removes the last character from the search input.
    pub fn input_pop(&mut self) {
        self.query.pop();
        self.cursor = 0;
    }

    /// Moves the cursor up.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Moves the cursor down within a list of `len` entries.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn move_down(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    /// Keeps the cursor inside a list of `len` entries.
    pub fn clamp_cursor(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Movie ID of the card under the cursor, if it is a card.
    #[must_use]
    pub fn current_movie(&self, fragments: &[Fragment]) -> Option<u64> {
        fragments
            .get(self.cursor)
            .and_then(Fragment::as_card)
            .map(|card| card.movie_id)
    }
}

#[cfg(test)]
mod tests {
    use cinesmart_view::MovieCard;

    use super::*;

    fn fragments() -> Vec<Fragment> {
        (1..=3)
            .map(|id| {
                Fragment::Card(MovieCard {
                    movie_id: id,
                    title: format!("Movie {id}"),
                    poster_url: String::from("/static/default.jpg"),
                    rating: 5.0,
                    release_date: None,
                })
            })
            .collect()
    }

    #[test]
    fn test_initial_state() {
        // Arrange & Act
        let state = BrowseState::new();

        // Assert
        assert!(state.query.is_empty());
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_move_down_and_up() {
        // Arrange
        let mut state = BrowseState::new();

        // Act & Assert
        state.move_down(3);
        state.move_down(3);
        state.move_down(3);
        assert_eq!(state.cursor, 2);
        state.move_up();
        assert_eq!(state.cursor, 1);
        state.move_up();
        state.move_up();
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_input_resets_cursor() {
        // Arrange
        let mut state = BrowseState::new();
        state.move_down(3);

        // Act
        state.input_push('b');
        state.input_push('a');
        state.input_pop();

        // Assert
        assert_eq!(state.query, "b");
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_clamp_cursor_after_list_shrinks() {
        // Arrange
        let mut state = BrowseState::new();
        state.cursor = 5;

        // Act & Assert
        state.clamp_cursor(2);
        assert_eq!(state.cursor, 1);
        state.clamp_cursor(0);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_current_movie() {
        // Arrange
        let mut state = BrowseState::new();
        state.move_down(3);

        // Act & Assert
        assert_eq!(state.current_movie(&fragments()), Some(2));
        assert_eq!(
            state.current_movie(&[Fragment::Placeholder(String::from("No movies found"))]),
            None
        );
    }
}
