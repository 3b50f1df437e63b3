use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::theme::ThemeColors;
use crate::tree::flatten::FlatRow;
use crate::tree::state::FileTreeState;

/// Widget that renders the windowed slice of a tree's flattened rows.
///
/// Reads shared state (focus, selection, marks, rename editor) per row and
/// draws nothing outside [`FileTreeState::visible_range`] — rendering cost
/// follows the viewport, not the structure.
pub struct FileTreeWidget<'a> {
    state: &'a FileTreeState,
    theme: &'a ThemeColors,
    indent_guides: bool,
    block: Option<Block<'a>>,
}

impl<'a> FileTreeWidget<'a> {
    pub fn new(state: &'a FileTreeState, theme: &'a ThemeColors) -> Self {
        Self {
            state,
            theme,
            indent_guides: true,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }

    pub fn indent_guides(mut self, enabled: bool) -> Self {
        self.indent_guides = enabled;
        self
    }

    /// Build the indentation prefix with box-drawing characters.
    ///
    /// Continuation lines depend on whether each ancestor was the last of
    /// its siblings, so this scans backwards through the flattened list.
    fn build_prefix(item: &FlatRow, items: &[FlatRow], item_index: usize, guides: bool) -> String {
        if item.depth == 0 {
            return String::new();
        }
        if !guides {
            return "  ".repeat(item.depth);
        }

        let mut parts: Vec<&str> = Vec::new();
        for d in 0..item.depth.saturating_sub(1) {
            // Walk backwards to the ancestor at depth d above this row.
            let mut ancestor_is_last = false;
            for j in (0..item_index).rev() {
                if items[j].depth == d {
                    ancestor_is_last = items[j].is_last_sibling;
                    break;
                }
                if items[j].depth < d {
                    break;
                }
            }
            parts.push(if ancestor_is_last { "  " } else { "│ " });
        }
        parts.push(if item.is_last_sibling { "└─" } else { "├─" });
        parts.join("")
    }

    fn marker(row: &FlatRow) -> &'static str {
        if row.is_dir {
            if row.is_collapsed {
                "▸ "
            } else {
                "▾ "
            }
        } else {
            "  "
        }
    }

    fn row_style(&self, row: &FlatRow) -> Style {
        let state = self.state;
        if state.focused() == Some(row.path.as_str()) {
            return Style::default()
                .bg(self.theme.focused_bg)
                .fg(self.theme.focused_fg)
                .add_modifier(Modifier::BOLD);
        }
        if state.is_selected(&row.path) {
            return Style::default()
                .bg(self.theme.selected_bg)
                .fg(self.theme.tree_fg);
        }
        if state.errored().contains(&row.path) {
            return Style::default().fg(self.theme.error_fg);
        }
        let mut style = if state.highlighted().contains(&row.path) {
            Style::default().bg(self.theme.highlight_bg)
        } else {
            Style::default()
        };
        style = if row.is_dir {
            style.fg(self.theme.dir_fg).add_modifier(Modifier::BOLD)
        } else {
            style.fg(self.theme.file_fg)
        };
        if state.clipboard().is_cut(&row.path) {
            style = style.add_modifier(Modifier::DIM);
        }
        style
    }

    /// The name cell, split into spans when an inline rename is active so
    /// the cursor position is visible.
    fn name_spans(&self, row: &FlatRow, style: Style) -> Vec<Span<'static>> {
        if let Some(editor) = self.state.rename_editor() {
            if editor.path() == row.path {
                let buffer = editor.buffer();
                let cursor = editor.cursor();
                let edit_style = style.add_modifier(Modifier::UNDERLINED);
                let cursor_style = edit_style.add_modifier(Modifier::REVERSED);
                let mut spans = vec![Span::styled(buffer[..cursor].to_string(), edit_style)];
                match buffer[cursor..].chars().next() {
                    Some(at) => {
                        spans.push(Span::styled(at.to_string(), cursor_style));
                        spans.push(Span::styled(
                            buffer[cursor + at.len_utf8()..].to_string(),
                            edit_style,
                        ));
                    }
                    None => spans.push(Span::styled(" ".to_string(), cursor_style)),
                }
                return spans;
            }
        }
        vec![Span::styled(row.name.clone(), style)]
    }

    fn badges(&self, row: &FlatRow) -> Option<Span<'static>> {
        let state = self.state;
        let mut badges = String::new();
        if state.favorites().contains(&row.path) {
            badges.push_str(" ★");
        }
        if state.loading().contains(&row.path) {
            badges.push_str(" …");
        }
        if state.errored().contains(&row.path) {
            badges.push_str(" !");
        }
        if badges.is_empty() {
            None
        } else {
            Some(Span::styled(
                badges,
                Style::default().fg(self.theme.favorite_fg),
            ))
        }
    }
}

impl Widget for FileTreeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };
        if inner_area.height == 0 || inner_area.width == 0 {
            return;
        }

        let rows = self.state.rows();
        let range = self.state.visible_range();

        for (i, idx) in range.enumerate() {
            let y = inner_area.y + i as u16;
            if y >= inner_area.y + inner_area.height {
                break;
            }
            let row = &rows[idx];
            let prefix = Self::build_prefix(row, rows, idx, self.indent_guides);
            let style = self.row_style(row);

            let mut spans = vec![
                Span::styled(prefix, Style::default().fg(self.theme.border_fg)),
                Span::styled(Self::marker(row).to_string(), style),
            ];
            spans.extend(self.name_spans(row, style));
            if let Some(badge) = self.badges(row) {
                spans.push(badge);
            }

            let line = Line::from(spans);
            buf.set_line(inner_area.x, y, &line, inner_area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::dark_theme;
    use crate::tree::node::Node;
    use crate::tree::state::{FileTreeState, TreeOptions};

    fn sample_state() -> FileTreeState {
        let root: Node =
            serde_json::from_str(r#"{"src": {"a.ts": null, "b.ts": null}, "readme.md": null}"#)
                .unwrap();
        let options = TreeOptions {
            row_height: 1,
            rename: true,
            ..TreeOptions::default()
        };
        FileTreeState::new(root, options)
    }

    fn render_to_text(state: &FileTreeState, width: u16, height: u16) -> Vec<String> {
        let theme = dark_theme();
        let widget = FileTreeWidget::new(state, &theme);
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn renders_rows_with_markers_and_guides() {
        let mut state = sample_state();
        state.set_viewport_height(10);
        let lines = render_to_text(&state, 30, 10);
        assert!(lines[0].starts_with("▾ src"));
        assert!(lines[1].starts_with("├─") && lines[1].contains("a.ts"));
        assert!(lines[2].starts_with("└─") && lines[2].contains("b.ts"));
        assert!(lines[3].starts_with("  readme.md"));
    }

    #[test]
    fn collapsed_dir_shows_closed_marker() {
        let mut state = sample_state();
        state.set_viewport_height(10);
        state.toggle_collapse("src");
        let lines = render_to_text(&state, 30, 10);
        assert!(lines[0].starts_with("▸ src"));
        assert!(lines[1].starts_with("  readme.md"));
        assert!(lines[2].is_empty());
    }

    #[test]
    fn only_the_window_is_rendered() {
        let mut state = sample_state();
        state.set_viewport_height(2);
        state.scroll_to(1);
        let lines = render_to_text(&state, 30, 2);
        // Row 0 ("src") is scrolled out; the slice starts at src/a.ts.
        assert!(lines[0].contains("a.ts"));
        assert!(!lines[0].contains("src "));
    }

    #[test]
    fn favorite_badge_is_appended() {
        let mut state = sample_state();
        state.set_viewport_height(10);
        state.set_favorites(["readme.md".to_string()]);
        let lines = render_to_text(&state, 30, 10);
        assert!(lines[3].contains("readme.md ★"));
    }

    #[test]
    fn rename_editor_replaces_the_name_cell() {
        let mut state = sample_state();
        state.set_viewport_height(10);
        state.begin_rename("src/a.ts");
        let lines = render_to_text(&state, 30, 10);
        // Buffer text plus the reversed cursor cell at the end.
        assert!(lines[1].contains("a.ts"));
    }
}
