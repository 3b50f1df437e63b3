use std::collections::HashSet;
use std::ops::Range;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::tree::clipboard::{Clipboard, ClipboardOp};
use crate::tree::dragdrop::DragSession;
use crate::tree::filter::{filter_tree, SearchOptions};
use crate::tree::flatten::{flatten, FlatRow};
use crate::tree::node::{parent_path, Node, NodeKind};
use crate::tree::rename::{RenameOutcome, RenameState};
use crate::tree::search::SearchDebouncer;
use crate::tree::window::{Viewport, DEFAULT_OVERSCAN, DEFAULT_ROW_HEIGHT};

/// Feature switches and geometry for one tree instance.
#[derive(Debug, Clone)]
pub struct TreeOptions {
    pub multi_select: bool,
    pub drag_drop: bool,
    pub rename: bool,
    pub delete: bool,
    pub copy_paste: bool,
    /// Off = render every row; fine for small trees.
    pub virtualize: bool,
    pub row_height: usize,
    pub overscan: usize,
    pub search: SearchOptions,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            multi_select: false,
            drag_drop: false,
            rename: false,
            delete: false,
            copy_paste: false,
            virtualize: true,
            row_height: DEFAULT_ROW_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
            search: SearchOptions::default(),
        }
    }
}

/// Outbound notification queued by the engine for the owning application.
///
/// Fire-and-forget: the engine neither awaits results nor rolls anything
/// back. Structural requests (`Move`, `CopyTo`, `Rename`, `Delete`,
/// `Create`) describe edits the caller applies to its structure before
/// handing the updated tree back via [`FileTreeState::set_structure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeRequest {
    /// The full selection after any mutation, in no particular order.
    SelectionChanged(Vec<String>),
    Toggled { path: String, collapsed: bool },
    /// A path was picked by keyboard focus or an explicit activate.
    Select(String),
    Move { sources: Vec<String>, target: String },
    CopyTo { sources: Vec<String>, target: String },
    Rename { from: String, to: String },
    Delete(Vec<String>),
    Create { parent: String, kind: NodeKind },
    FavoriteChanged { path: String, favorite: bool },
}

/// All per-instance widget state: collapse, selection, focus, marks,
/// clipboard, drag session, rename editor, search, and the derived row list.
///
/// The tree structure itself stays caller-owned: it is passed in wholesale
/// (constructor and [`set_structure`](Self::set_structure)) and never
/// mutated here. Rows are re-derived only when the structure, the applied
/// search term, or the collapsed set changes — selection-only changes leave
/// them untouched. Nothing is shared between instances, so several trees can
/// coexist; key events reach an instance only when its owner routes them in.
pub struct FileTreeState {
    root: Node,
    options: TreeOptions,
    collapsed: HashSet<String>,
    selected: HashSet<String>,
    focused: Option<String>,
    favorites: HashSet<String>,
    highlighted: HashSet<String>,
    loading: HashSet<String>,
    errored: HashSet<String>,
    clipboard: Clipboard,
    drag: Option<DragSession>,
    rename: Option<RenameState>,
    viewport: Viewport,
    debouncer: SearchDebouncer,
    raw_term: String,
    active_term: String,
    filtered: Option<Node>,
    rows: Vec<FlatRow>,
    requests: Vec<TreeRequest>,
}

impl FileTreeState {
    pub fn new(root: Node, options: TreeOptions) -> Self {
        let viewport = Viewport::new(options.row_height, options.overscan, options.virtualize);
        let debouncer = SearchDebouncer::new(Duration::from_millis(options.search.debounce_ms));
        let mut state = Self {
            root,
            options,
            collapsed: HashSet::new(),
            selected: HashSet::new(),
            focused: None,
            favorites: HashSet::new(),
            highlighted: HashSet::new(),
            loading: HashSet::new(),
            errored: HashSet::new(),
            clipboard: Clipboard::default(),
            drag: None,
            rename: None,
            viewport,
            debouncer,
            raw_term: String::new(),
            active_term: String::new(),
            filtered: None,
            rows: Vec::new(),
            requests: Vec::new(),
        };
        state.refresh();
        state
    }

    // ── Inputs ──────────────────────────────────────────────────────────────

    /// Replace the structure after the caller applied a structural edit.
    /// Selected paths that no longer exist are dropped quietly.
    pub fn set_structure(&mut self, root: Node) {
        self.root = root;
        self.selected.retain(|p| self.root.contains(p));
        if let Some(focused) = &self.focused {
            if !self.root.contains(focused) {
                self.focused = None;
            }
        }
        self.refresh();
    }

    /// Seed initially-collapsed paths; later changes go through
    /// [`toggle_collapse`](Self::toggle_collapse).
    pub fn seed_collapsed(&mut self, paths: impl IntoIterator<Item = String>) {
        self.collapsed.extend(paths);
        self.reflatten();
    }

    pub fn set_highlighted(&mut self, paths: impl IntoIterator<Item = String>) {
        self.highlighted = paths.into_iter().collect();
    }

    pub fn set_favorites(&mut self, paths: impl IntoIterator<Item = String>) {
        self.favorites = paths.into_iter().collect();
    }

    pub fn set_loading(&mut self, paths: impl IntoIterator<Item = String>) {
        self.loading = paths.into_iter().collect();
    }

    pub fn set_errored(&mut self, paths: impl IntoIterator<Item = String>) {
        self.errored = paths.into_iter().collect();
    }

    // ── Derived state ───────────────────────────────────────────────────────

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// The flattened, filtered row list in render order.
    pub fn rows(&self) -> &[FlatRow] {
        &self.rows
    }

    /// Row indices the render layer should actually draw.
    pub fn visible_range(&self) -> Range<usize> {
        self.viewport.visible_range(self.rows.len())
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport.viewport_height = height;
    }

    pub fn scroll_to(&mut self, offset: usize) {
        let total = self.rows.len();
        self.viewport.scroll_to(offset, total);
    }

    /// The structure rows are currently derived from: the pruned copy while
    /// a search is active, the caller's structure otherwise.
    fn effective_tree(&self) -> &Node {
        self.filtered.as_ref().unwrap_or(&self.root)
    }

    fn refresh(&mut self) {
        self.filtered = if self.active_term.is_empty() {
            None
        } else {
            Some(filter_tree(&self.root, &self.active_term, &self.options.search))
        };
        self.reflatten();
    }

    fn reflatten(&mut self) {
        self.rows = flatten(self.effective_tree(), &self.collapsed);
        if let Some(focused) = &self.focused {
            if !self.rows.iter().any(|row| &row.path == focused) {
                self.focused = None;
            }
        }
    }

    fn push(&mut self, request: TreeRequest) {
        self.requests.push(request);
    }

    /// Take everything queued since the last drain.
    pub fn drain_requests(&mut self) -> Vec<TreeRequest> {
        std::mem::take(&mut self.requests)
    }

    // ── Selection ───────────────────────────────────────────────────────────

    /// Flip selection membership of `path`. Without multi-select a new
    /// selection displaces the old one, so cardinality never exceeds 1.
    pub fn toggle_select(&mut self, path: &str) {
        if !self.effective_tree().contains(path) {
            debug!(path, "select on missing path ignored");
            return;
        }
        if self.selected.contains(path) {
            self.selected.remove(path);
        } else {
            if !self.options.multi_select {
                self.selected.clear();
            }
            self.selected.insert(path.to_string());
        }
        self.emit_selection_changed();
    }

    pub fn clear_selection(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.emit_selection_changed();
        }
    }

    fn emit_selection_changed(&mut self) {
        let set: Vec<String> = self.selected.iter().cloned().collect();
        self.push(TreeRequest::SelectionChanged(set));
    }

    pub fn selected(&self) -> &HashSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, path: &str) -> bool {
        self.selected.contains(path)
    }

    /// The selection in flattened-list order; members currently hidden by a
    /// collapsed ancestor follow, sorted, so payloads stay deterministic.
    pub fn ordered_selection(&self) -> Vec<String> {
        let mut ordered: Vec<String> = self
            .rows
            .iter()
            .filter(|row| self.selected.contains(&row.path))
            .map(|row| row.path.clone())
            .collect();
        if ordered.len() < self.selected.len() {
            let mut hidden: Vec<String> = self
                .selected
                .iter()
                .filter(|p| !ordered.contains(*p))
                .cloned()
                .collect();
            hidden.sort();
            ordered.extend(hidden);
        }
        ordered
    }

    // ── Collapse ────────────────────────────────────────────────────────────

    /// Flip the collapsed state of a directory; leaves and unknown paths are
    /// guarded no-ops.
    pub fn toggle_collapse(&mut self, path: &str) {
        if !self.effective_tree().is_dir_at(path) {
            debug!(path, "collapse toggle on missing or leaf path ignored");
            return;
        }
        let collapsed = if self.collapsed.remove(path) {
            false
        } else {
            self.collapsed.insert(path.to_string());
            true
        };
        self.push(TreeRequest::Toggled {
            path: path.to_string(),
            collapsed,
        });
        self.reflatten();
    }

    pub fn is_collapsed(&self, path: &str) -> bool {
        self.collapsed.contains(path)
    }

    // ── Favorites & marks ───────────────────────────────────────────────────

    pub fn toggle_favorite(&mut self, path: &str) {
        if !self.effective_tree().contains(path) {
            debug!(path, "favorite toggle on missing path ignored");
            return;
        }
        let favorite = if self.favorites.remove(path) {
            false
        } else {
            self.favorites.insert(path.to_string());
            true
        };
        self.push(TreeRequest::FavoriteChanged {
            path: path.to_string(),
            favorite,
        });
    }

    pub fn favorites(&self) -> &HashSet<String> {
        &self.favorites
    }

    pub fn highlighted(&self) -> &HashSet<String> {
        &self.highlighted
    }

    pub fn loading(&self) -> &HashSet<String> {
        &self.loading
    }

    pub fn errored(&self) -> &HashSet<String> {
        &self.errored
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    // ── Focus & keyboard ────────────────────────────────────────────────────

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn focus_row_index(&self) -> Option<usize> {
        let focused = self.focused.as_deref()?;
        self.rows.iter().position(|row| row.path == focused)
    }

    fn focused_row(&self) -> Option<&FlatRow> {
        self.focus_row_index().map(|i| &self.rows[i])
    }

    fn focus_row(&mut self, index: usize) {
        let path = self.rows[index].path.clone();
        if self.focused.as_deref() != Some(path.as_str()) {
            self.focused = Some(path.clone());
            self.push(TreeRequest::Select(path));
        }
        self.viewport.ensure_visible(index);
    }

    /// Move focus one row down (clamped; no wraparound).
    pub fn focus_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let index = match self.focus_row_index() {
            Some(i) => (i + 1).min(self.rows.len() - 1),
            None => 0,
        };
        self.focus_row(index);
    }

    /// Move focus one row up (clamped).
    pub fn focus_prev(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let index = self.focus_row_index().map_or(0, |i| i.saturating_sub(1));
        self.focus_row(index);
    }

    fn expand_focused(&mut self) {
        if let Some(row) = self.focused_row() {
            if row.is_dir && row.is_collapsed {
                let path = row.path.clone();
                self.toggle_collapse(&path);
            }
        }
    }

    fn collapse_focused_or_parent(&mut self) {
        let Some(row) = self.focused_row().cloned() else {
            return;
        };
        if row.is_dir && !row.is_collapsed {
            self.toggle_collapse(&row.path);
        } else if let Some(parent) = parent_path(&row.path) {
            let parent = parent.to_string();
            if let Some(index) = self.rows.iter().position(|r| r.path == parent) {
                self.focus_row(index);
            }
        }
    }

    /// Route one key event into the tree. Returns whether it was consumed.
    ///
    /// While a rename editor is open every key goes to it first. Otherwise
    /// this implements the traversal contract: Up/Down walk the flattened
    /// list, Right expands, Left collapses or climbs to the parent, Enter
    /// activates the focused row, Esc cancels a live drag.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.rename.is_some() {
            return self.handle_rename_key(key);
        }
        match key.code {
            KeyCode::Down => {
                self.focus_next();
                true
            }
            KeyCode::Up => {
                self.focus_prev();
                true
            }
            KeyCode::Right => {
                self.expand_focused();
                true
            }
            KeyCode::Left => {
                self.collapse_focused_or_parent();
                true
            }
            KeyCode::Enter => {
                if let Some(focused) = self.focused.clone() {
                    self.push(TreeRequest::Select(focused));
                }
                true
            }
            KeyCode::Esc if self.drag.is_some() => {
                self.cancel_drag();
                true
            }
            _ => false,
        }
    }

    fn handle_rename_key(&mut self, key: KeyEvent) -> bool {
        let Some(editor) = self.rename.as_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Esc => self.cancel_rename(),
            KeyCode::Enter => self.commit_rename(),
            KeyCode::Backspace => editor.backspace(),
            KeyCode::Left => editor.move_left(),
            KeyCode::Right => editor.move_right(),
            KeyCode::Home => editor.move_home(),
            KeyCode::End => editor.move_end(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                editor.insert_char(c);
            }
            _ => return false,
        }
        true
    }

    // ── Drag & drop ─────────────────────────────────────────────────────────

    /// Start dragging `path`. The payload is the full selection when the
    /// path is already selected, just the path otherwise — the selection is
    /// never changed by grabbing.
    pub fn begin_drag(&mut self, path: &str) {
        if !self.options.drag_drop {
            return;
        }
        if !self.effective_tree().contains(path) {
            debug!(path, "drag begin on missing path ignored");
            return;
        }
        let ordered = self.ordered_selection();
        self.drag = Some(DragSession::grab(path, &self.selected, ordered));
    }

    /// Finish the drag over `target`. Targets inside the payload's own
    /// subtree are rejected without a request; either way the session ends.
    pub fn drop_on(&mut self, target: &str) {
        let Some(session) = self.drag.take() else {
            return;
        };
        if !self.effective_tree().contains(target) {
            debug!(target, "drop on missing path ignored");
            return;
        }
        if !session.can_drop_on(target) {
            debug!(target, "drop into own subtree rejected");
            return;
        }
        self.push(TreeRequest::Move {
            sources: session.paths,
            target: target.to_string(),
        });
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // ── Clipboard ───────────────────────────────────────────────────────────

    pub fn copy(&mut self, paths: Vec<String>) {
        if self.options.copy_paste {
            self.clipboard.set_copy(self.existing(paths));
        }
    }

    pub fn cut(&mut self, paths: Vec<String>) {
        if self.options.copy_paste {
            self.clipboard.set_cut(self.existing(paths));
        }
    }

    /// Dispatch the clipboard onto `target`. Copy keeps the record for
    /// repeated pastes; cut emits one move request per source and clears the
    /// record immediately, without waiting on the caller.
    pub fn paste(&mut self, target: &str) {
        if !self.options.copy_paste || self.clipboard.is_empty() {
            return;
        }
        if !self.effective_tree().contains(target) {
            debug!(target, "paste on missing path ignored");
            return;
        }
        match self.clipboard.record().map(|r| r.op) {
            Some(ClipboardOp::Copy) => {
                let sources = self.clipboard.record().map(|r| r.paths.clone()).unwrap_or_default();
                self.push(TreeRequest::CopyTo {
                    sources,
                    target: target.to_string(),
                });
            }
            Some(ClipboardOp::Cut) => {
                if let Some(record) = self.clipboard.take() {
                    for source in record.paths {
                        self.push(TreeRequest::Move {
                            sources: vec![source],
                            target: target.to_string(),
                        });
                    }
                }
            }
            None => {}
        }
    }

    fn existing(&self, paths: Vec<String>) -> Vec<String> {
        let tree = self.effective_tree();
        paths.into_iter().filter(|p| tree.contains(p)).collect()
    }

    // ── Rename ──────────────────────────────────────────────────────────────

    /// Open the inline rename editor on `path`, replacing (and thereby
    /// cancelling) any editor open elsewhere.
    pub fn begin_rename(&mut self, path: &str) {
        if !self.options.rename {
            return;
        }
        if !self.effective_tree().contains(path) {
            debug!(path, "rename begin on missing path ignored");
            return;
        }
        self.rename = Some(RenameState::begin(path));
    }

    pub fn is_renaming(&self) -> bool {
        self.rename.is_some()
    }

    pub fn rename_editor(&self) -> Option<&RenameState> {
        self.rename.as_ref()
    }

    /// Submit the editor: emits a rename request unless the buffer is empty
    /// or unchanged, which both revert silently.
    pub fn commit_rename(&mut self) {
        if let Some(editor) = self.rename.take() {
            if let RenameOutcome::Committed { from, to } = editor.submit() {
                self.push(TreeRequest::Rename { from, to });
            }
        }
    }

    pub fn cancel_rename(&mut self) {
        self.rename = None;
    }

    /// Focus left the editor; same commit-or-revert table as a submit.
    pub fn blur_rename(&mut self) {
        self.commit_rename();
    }

    // ── Delete & create ─────────────────────────────────────────────────────

    pub fn request_delete(&mut self, paths: Vec<String>) {
        if !self.options.delete {
            return;
        }
        let paths = self.existing(paths);
        if !paths.is_empty() {
            self.push(TreeRequest::Delete(paths));
        }
    }

    /// Ask the caller to create an entry under the directory `parent`
    /// (empty string = top level).
    pub fn request_create(&mut self, parent: &str, kind: NodeKind) {
        if !self.effective_tree().is_dir_at(parent) {
            debug!(parent, "create under missing or leaf path ignored");
            return;
        }
        self.push(TreeRequest::Create {
            parent: parent.to_string(),
            kind,
        });
    }

    // ── Search ──────────────────────────────────────────────────────────────

    /// Record one keystroke of raw search input; the filter itself runs only
    /// after the debounce delay, from [`tick`](Self::tick).
    pub fn input_search(&mut self, term: &str) {
        self.raw_term = term.to_string();
        self.debouncer.submit(term.to_string(), Instant::now());
    }

    /// Promote a debounced term if its delay has elapsed. Call from the
    /// event loop's tick.
    pub fn tick(&mut self) {
        if let Some(term) = self.debouncer.poll(Instant::now()) {
            self.apply_search(&term);
        }
    }

    /// Apply `term` immediately, superseding any pending keystrokes. Terms
    /// shorter than the configured minimum clear the filter.
    pub fn apply_search(&mut self, term: &str) {
        self.raw_term = term.to_string();
        self.debouncer.cancel();
        self.active_term =
            if !term.is_empty() && term.chars().count() >= self.options.search.min_length {
                term.to_string()
            } else {
                String::new()
            };
        self.refresh();
    }

    pub fn clear_search(&mut self) {
        self.apply_search("");
    }

    /// The raw, possibly not-yet-applied input.
    pub fn search_input(&self) -> &str {
        &self.raw_term
    }

    /// The term the current rows were filtered with.
    pub fn active_search(&self) -> &str {
        &self.active_term
    }
}
