use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

/// Status bar widget: focused path, tree info, transient messages, clipboard
/// and drag indicators, key hints.
pub struct StatusBarWidget<'a> {
    path_str: &'a str,
    tree_info: &'a str,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    is_error: bool,
    clipboard_info: Option<&'a str>,
    drag_info: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(path_str: &'a str, tree_info: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            path_str,
            tree_info,
            theme,
            status_message: None,
            is_error: false,
            clipboard_info: None,
            drag_info: None,
        }
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }

    pub fn clipboard_info(mut self, info: &'a str) -> Self {
        self.clipboard_info = Some(info);
        self
    }

    pub fn drag_info(mut self, info: &'a str) -> Self {
        self.drag_info = Some(info);
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;

        if let Some(msg) = self.status_message {
            let style = if self.is_error {
                Style::default()
                    .bg(self.theme.error_fg)
                    .fg(self.theme.status_fg)
            } else {
                Style::default().fg(self.theme.success_fg)
            };

            // Pad or truncate message to fill full width
            let display: String = if msg.len() >= width {
                msg.chars().take(width).collect()
            } else {
                format!("{:<width$}", msg, width = width)
            };

            let line = Line::from(Span::styled(display, style));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        // Normal bar: [path] [tree_info] [clipboard] [drag] [key_hints]
        let key_hints = " /:find  r:ren  y:cp  x:cut  p:paste  D:drag  q:quit ";
        let hints_len = key_hints.len();

        let remaining = width.saturating_sub(hints_len);
        let info_len = self.tree_info.len();
        let path_budget = remaining.saturating_sub(info_len).saturating_sub(1);

        let path_display = if self.path_str.len() > path_budget {
            if path_budget > 3 {
                format!(
                    "...{}",
                    &self.path_str[self.path_str.len() - (path_budget - 3)..]
                )
            } else {
                String::new()
            }
        } else {
            self.path_str.to_string()
        };

        let gap = remaining
            .saturating_sub(path_display.len())
            .saturating_sub(info_len)
            .max(1);

        let mut spans = vec![
            Span::styled(path_display, Style::default().fg(self.theme.status_fg)),
            Span::raw(" ".repeat(gap)),
            Span::styled(
                self.tree_info.to_string(),
                Style::default().fg(self.theme.info_fg),
            ),
        ];

        if let Some(clipboard) = self.clipboard_info {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                clipboard.to_string(),
                Style::default()
                    .fg(self.theme.accent_fg)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        if let Some(drag) = self.drag_info {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                drag.to_string(),
                Style::default()
                    .fg(self.theme.warning_fg)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let used: usize = spans.iter().map(|s| s.content.len()).sum();
        let pad = width.saturating_sub(used).saturating_sub(hints_len);
        if pad > 0 {
            spans.push(Span::raw(" ".repeat(pad)));
        }
        spans.push(Span::styled(
            key_hints,
            Style::default()
                .fg(self.theme.dim_fg)
                .add_modifier(Modifier::DIM),
        ));

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
