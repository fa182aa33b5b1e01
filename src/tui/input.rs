//! Single-line text input for the terminal user interface.

/// A text input with a cursor measured in characters, not bytes, so
/// accented input like "João" edits correctly.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub active: bool,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
            active: false,
        }
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn handle_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_offset(self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    /// Delete the character under the cursor.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Take the contents, leaving the field empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    /// The value with a block cursor drawn in when active.
    pub fn display(&self) -> String {
        if !self.active {
            return self.value.clone();
        }
        let at = self.byte_offset(self.cursor);
        format!("{}▏{}", &self.value[..at], &self.value[at..])
    }

    /// Same as [`display`](Self::display) but with every character masked.
    pub fn display_masked(&self) -> String {
        let masked = "•".repeat(self.char_len());
        if !self.active {
            return masked;
        }
        let before = "•".repeat(self.cursor);
        let after = "•".repeat(self.char_len() - self.cursor);
        format!("{before}▏{after}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multibyte_editing() {
        let mut field = InputField::with_value("Joo");
        field.move_cursor_left();
        field.handle_char('ã');
        assert_eq!(field.value, "João");
        field.move_end();
        field.handle_backspace();
        field.handle_backspace();
        assert_eq!(field.value, "Jo");
        field.move_home();
        field.handle_delete();
        assert_eq!(field.value, "o");
    }

    #[test]
    fn test_cursor_bounds() {
        let mut field = InputField::new();
        field.move_cursor_left();
        field.handle_backspace();
        field.handle_delete();
        assert_eq!(field.cursor, 0);
        field.handle_char('a');
        field.move_cursor_right();
        assert_eq!(field.cursor, 1);
    }

    #[test]
    fn test_display_and_take() {
        let mut field = InputField::with_value("abc");
        field.active = true;
        field.move_cursor_left();
        assert_eq!(field.display(), "ab▏c");
        assert_eq!(field.display_masked(), "••▏•");
        assert_eq!(field.take(), "abc");
        assert!(field.value.is_empty());
    }
}
