use crate::tree::node::{base_name, renamed_path};

/// Result of leaving rename mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// Emit a rename request for `from` → `to`.
    Committed { from: String, to: String },
    /// Revert silently; no request.
    Cancelled,
}

/// Inline-rename editor for a single path.
///
/// At most one of these exists per tree at a time; the engine replaces any
/// live editor when rename begins on another path. The buffer carries a
/// byte-offset cursor kept on char boundaries.
#[derive(Debug, Clone)]
pub struct RenameState {
    path: String,
    original: String,
    buffer: String,
    cursor: usize,
}

impl RenameState {
    /// Start editing the final segment of `path`, cursor at the end.
    pub fn begin(path: &str) -> Self {
        let original = base_name(path).to_string();
        Self {
            path: path.to_string(),
            cursor: original.len(),
            buffer: original.clone(),
            original,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in bytes into the buffer.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
            self.buffer.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.buffer[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// Finish editing. An empty buffer cancels; so does an unchanged name
    /// (no point asking the caller to rename a thing to itself). Otherwise
    /// the new path keeps the parent and swaps the final segment.
    ///
    /// Slashes would silently re-parent the node, so they cancel too.
    pub fn submit(self) -> RenameOutcome {
        let name = self.buffer.trim();
        if name.is_empty() || name == self.original || name.contains('/') {
            return RenameOutcome::Cancelled;
        }
        RenameOutcome::Committed {
            to: renamed_path(&self.path, name),
            from: self.path,
        }
    }

    /// Abandon editing, reverting to the original name.
    pub fn cancel(self) -> RenameOutcome {
        RenameOutcome::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retype(state: &mut RenameState, text: &str) {
        while !state.buffer().is_empty() {
            state.move_end();
            state.backspace();
        }
        for c in text.chars() {
            state.insert_char(c);
        }
    }

    #[test]
    fn begin_seeds_buffer_with_current_name() {
        let state = RenameState::begin("src/a.ts");
        assert_eq!(state.buffer(), "a.ts");
        assert_eq!(state.cursor(), 4);
        assert_eq!(state.path(), "src/a.ts");
    }

    #[test]
    fn commit_replaces_only_the_final_segment() {
        let mut state = RenameState::begin("src/a.ts");
        retype(&mut state, "z.ts");
        assert_eq!(
            state.submit(),
            RenameOutcome::Committed {
                from: "src/a.ts".into(),
                to: "src/z.ts".into()
            }
        );
    }

    #[test]
    fn top_level_rename_has_no_parent_to_keep() {
        let mut state = RenameState::begin("readme.md");
        retype(&mut state, "README.md");
        assert_eq!(
            state.submit(),
            RenameOutcome::Committed {
                from: "readme.md".into(),
                to: "README.md".into()
            }
        );
    }

    #[test]
    fn empty_submission_is_a_cancel() {
        let mut state = RenameState::begin("src/a.ts");
        retype(&mut state, "");
        assert_eq!(state.submit(), RenameOutcome::Cancelled);
    }

    #[test]
    fn whitespace_only_submission_is_a_cancel() {
        let mut state = RenameState::begin("src/a.ts");
        retype(&mut state, "   ");
        assert_eq!(state.submit(), RenameOutcome::Cancelled);
    }

    #[test]
    fn unchanged_name_skips_the_request() {
        let state = RenameState::begin("src/a.ts");
        assert_eq!(state.submit(), RenameOutcome::Cancelled);
    }

    #[test]
    fn slash_in_name_is_a_cancel() {
        let mut state = RenameState::begin("src/a.ts");
        retype(&mut state, "nested/a.ts");
        assert_eq!(state.submit(), RenameOutcome::Cancelled);
    }

    #[test]
    fn cancel_never_commits() {
        let mut state = RenameState::begin("src/a.ts");
        retype(&mut state, "z.ts");
        assert_eq!(state.cancel(), RenameOutcome::Cancelled);
    }

    #[test]
    fn cursor_editing_is_utf8_aware() {
        let mut state = RenameState::begin("src/ätt.rs");
        assert_eq!(state.buffer(), "ätt.rs");
        state.move_home();
        state.move_right();
        state.backspace(); // removes the two-byte 'ä'
        assert_eq!(state.buffer(), "tt.rs");
        assert_eq!(state.cursor(), 0);
        state.insert_char('ö');
        assert_eq!(state.buffer(), "ött.rs");
        assert_eq!(state.cursor(), 'ö'.len_utf8());
    }

    #[test]
    fn backspace_at_start_is_a_noop() {
        let mut state = RenameState::begin("src/a.ts");
        state.move_home();
        state.backspace();
        assert_eq!(state.buffer(), "a.ts");
        state.move_left();
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn move_right_clamps_at_end() {
        let mut state = RenameState::begin("src/a.ts");
        state.move_end();
        state.move_right();
        assert_eq!(state.cursor(), 4);
    }
}
