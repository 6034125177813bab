//! Text buffer and position-wise error counting

/// Number of positions where `new` differs from `previous`.
///
/// Only the overlapping length is compared; characters appended or removed
/// past the shorter buffer are not errors.
pub fn count_errors(previous: &str, new: &str) -> usize {
    previous
        .chars()
        .zip(new.chars())
        .filter(|(old, new)| old != new)
        .count()
}

/// The free-text field and its rolling error count
#[derive(Debug, Clone, Default)]
pub struct TextEntry {
    buffer: String,
    errors: usize,
}

impl TextEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the buffer with `new_text`.
    ///
    /// Recomputes the error count against the previous buffer and returns the
    /// characters that follow the common prefix of the two, which are the ones
    /// just typed.
    pub fn update(&mut self, new_text: impl Into<String>) -> Vec<char> {
        let new_text = new_text.into();
        self.errors = count_errors(&self.buffer, &new_text);

        let common = self
            .buffer
            .chars()
            .zip(new_text.chars())
            .take_while(|(a, b)| a == b)
            .count();
        let typed: Vec<char> = new_text.chars().skip(common).collect();

        self.buffer = new_text;
        typed
    }

    /// The buffer after appending `c`
    pub fn with_char(&self, c: char) -> String {
        let mut next = self.buffer.clone();
        next.push(c);
        next
    }

    /// The buffer with its last character removed
    pub fn without_last(&self) -> String {
        let mut next = self.buffer.clone();
        next.pop();
        next
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.errors = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitution_is_one_error() {
        assert_eq!(count_errors("cat", "cot"), 1);
    }

    #[test]
    fn growth_from_empty_has_no_overlap() {
        assert_eq!(count_errors("", "hi"), 0);
    }

    #[test]
    fn trailing_changes_are_not_errors() {
        assert_eq!(count_errors("hello", "hel"), 0);
        assert_eq!(count_errors("hel", "hello"), 0);
    }

    #[test]
    fn insertion_shifts_every_later_position() {
        // position-wise diff, not an edit distance
        assert_eq!(count_errors("abcd", "xabcd"), 4);
    }

    #[test]
    fn update_returns_newly_typed_chars() {
        let mut entry = TextEntry::new();
        assert_eq!(entry.update("he"), vec!['h', 'e']);
        assert_eq!(entry.update("hey"), vec!['y']);
        assert_eq!(entry.update("he"), Vec::<char>::new());
        assert_eq!(entry.text(), "he");
    }

    #[test]
    fn error_count_is_recomputed_each_change() {
        let mut entry = TextEntry::new();
        entry.update("cat");
        entry.update("cot");
        assert_eq!(entry.errors(), 1);
        entry.update("cote");
        assert_eq!(entry.errors(), 0);
    }

    #[test]
    fn char_helpers_build_next_buffer() {
        let mut entry = TextEntry::new();
        entry.update("ab");
        assert_eq!(entry.with_char('c'), "abc");
        assert_eq!(entry.without_last(), "a");
        assert_eq!(entry.text(), "ab");
    }

    #[test]
    fn len_counts_chars() {
        let mut entry = TextEntry::new();
        entry.update("héllo");
        assert_eq!(entry.len(), 5);
        entry.clear();
        assert!(entry.is_empty());
        assert_eq!(entry.errors(), 0);
    }
}
