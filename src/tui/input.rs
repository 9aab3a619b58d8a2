//! Input field handling for the terminal user interface.

/// A single-line text input with a character-position cursor.
#[derive(Clone, Default)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub active: bool,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        InputField::default()
    }

    /// Byte offset of the cursor within the value.
    fn byte_offset(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Number of characters in the value.
    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert a character at the cursor position.
    pub fn handle_char(&mut self, c: char) {
        let at = self.byte_offset();
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset();
            self.value.remove(at);
        }
    }

    /// Delete the character at the cursor position.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_offset();
            self.value.remove(at);
        }
    }

    /// Move cursor one position to the left.
    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor one position to the right.
    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Reset the field to empty with the cursor at the start.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_move() {
        let mut f = InputField::new();
        for c in "abc".chars() {
            f.handle_char(c);
        }
        f.move_cursor_left();
        f.handle_char('x');
        assert_eq!(f.value, "abxc");
        assert_eq!(f.cursor, 3);
    }

    #[test]
    fn test_backspace_and_delete_at_bounds() {
        let mut f = InputField::new();
        f.handle_backspace();
        f.handle_delete();
        assert_eq!(f.value, "");

        f.handle_char('a');
        f.handle_char('b');
        f.move_cursor_left();
        f.handle_backspace();
        assert_eq!(f.value, "b");
        f.handle_delete();
        assert_eq!(f.value, "");
        assert_eq!(f.cursor, 0);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut f = InputField::new();
        for c in "héllo".chars() {
            f.handle_char(c);
        }
        assert_eq!(f.value, "héllo");
        f.move_cursor_left();
        f.move_cursor_left();
        f.move_cursor_left();
        f.move_cursor_left();
        f.handle_delete();
        assert_eq!(f.value, "hllo");
    }

    #[test]
    fn test_clear() {
        let mut f = InputField::new();
        f.handle_char('a');
        f.clear();
        assert_eq!(f.value, "");
        assert_eq!(f.cursor, 0);
    }
}
