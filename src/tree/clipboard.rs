/// The pending clipboard operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardOp {
    Copy,
    Cut,
}

/// A captured copy/cut payload awaiting a paste target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardRecord {
    pub op: ClipboardOp,
    /// Source paths in flattened-list order.
    pub paths: Vec<String>,
}

/// Transient clipboard: either empty or exactly one record — an operation
/// can never exist without its paths.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    record: Option<ClipboardRecord>,
}

impl Clipboard {
    /// Store a copy payload, replacing any previous record. Empty path lists
    /// leave the clipboard untouched.
    pub fn set_copy(&mut self, paths: Vec<String>) {
        self.set(ClipboardOp::Copy, paths);
    }

    /// Store a cut payload, replacing any previous record.
    pub fn set_cut(&mut self, paths: Vec<String>) {
        self.set(ClipboardOp::Cut, paths);
    }

    fn set(&mut self, op: ClipboardOp, paths: Vec<String>) {
        if !paths.is_empty() {
            self.record = Some(ClipboardRecord { op, paths });
        }
    }

    /// Take the record out, leaving the clipboard empty.
    pub fn take(&mut self) -> Option<ClipboardRecord> {
        self.record.take()
    }

    pub fn record(&self) -> Option<&ClipboardRecord> {
        self.record.as_ref()
    }

    pub fn clear(&mut self) {
        self.record = None;
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_none()
    }

    /// Number of captured paths; 0 when empty.
    pub fn len(&self) -> usize {
        self.record.as_ref().map_or(0, |r| r.paths.len())
    }

    /// Whether `path` is part of a pending cut (rendered dimmed).
    pub fn is_cut(&self, path: &str) -> bool {
        self.record
            .as_ref()
            .is_some_and(|r| r.op == ClipboardOp::Cut && r.paths.iter().any(|p| p == path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clipboard_is_empty() {
        let cb = Clipboard::default();
        assert!(cb.is_empty());
        assert_eq!(cb.len(), 0);
        assert!(cb.record().is_none());
    }

    #[test]
    fn set_copy_stores_record() {
        let mut cb = Clipboard::default();
        cb.set_copy(vec!["src/a.ts".into(), "src/b.ts".into()]);
        let record = cb.record().unwrap();
        assert_eq!(record.op, ClipboardOp::Copy);
        assert_eq!(record.paths, ["src/a.ts", "src/b.ts"]);
        assert_eq!(cb.len(), 2);
    }

    #[test]
    fn set_cut_marks_paths() {
        let mut cb = Clipboard::default();
        cb.set_cut(vec!["readme.md".into()]);
        assert_eq!(cb.record().unwrap().op, ClipboardOp::Cut);
        assert!(cb.is_cut("readme.md"));
        assert!(!cb.is_cut("src/a.ts"));
    }

    #[test]
    fn copied_paths_are_not_marked_cut() {
        let mut cb = Clipboard::default();
        cb.set_copy(vec!["readme.md".into()]);
        assert!(!cb.is_cut("readme.md"));
    }

    #[test]
    fn empty_payload_does_not_create_a_record() {
        let mut cb = Clipboard::default();
        cb.set_copy(Vec::new());
        assert!(cb.is_empty());
    }

    #[test]
    fn newer_record_replaces_older() {
        let mut cb = Clipboard::default();
        cb.set_copy(vec!["old.txt".into()]);
        cb.set_cut(vec!["new.txt".into()]);
        let record = cb.record().unwrap();
        assert_eq!(record.op, ClipboardOp::Cut);
        assert_eq!(record.paths, ["new.txt"]);
    }

    #[test]
    fn take_empties_the_clipboard() {
        let mut cb = Clipboard::default();
        cb.set_cut(vec!["a".into()]);
        let record = cb.take().unwrap();
        assert_eq!(record.paths, ["a"]);
        assert!(cb.is_empty());
        assert!(cb.take().is_none());
    }

    #[test]
    fn clear_resets() {
        let mut cb = Clipboard::default();
        cb.set_copy(vec!["a".into()]);
        cb.clear();
        assert!(cb.is_empty());
    }
}
