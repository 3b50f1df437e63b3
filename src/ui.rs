use ratatui::{
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

use ftree::tree::clipboard::ClipboardOp;
use ftree::{FileTreeWidget, StatusBarWidget};

use crate::app::{App, AppMode};

/// Render the whole frame: search line, tree, status bar.
pub fn render(app: &mut App, frame: &mut Frame) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(frame.area());

    render_search_line(app, frame, chunks[0]);

    // The engine windows rows against the area actually granted to the tree.
    let tree_area = chunks[1];
    app.tree.set_viewport_height(tree_area.height as usize);
    let tree_widget = FileTreeWidget::new(&app.tree, &app.theme).indent_guides(app.indent_guides);
    frame.render_widget(tree_widget, tree_area);

    render_status_bar(app, frame, chunks[2]);
}

fn render_search_line(app: &App, frame: &mut Frame, area: ratatui::layout::Rect) {
    let (label_style, input_style) = if app.mode == AppMode::Search {
        (
            Style::default()
                .fg(app.theme.accent_fg)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(app.theme.tree_fg),
        )
    } else {
        (
            Style::default().fg(app.theme.dim_fg),
            Style::default().fg(app.theme.dim_fg),
        )
    };

    let mut spans = vec![
        Span::styled(" search: ", label_style),
        Span::styled(app.search_input.clone(), input_style),
    ];
    if app.mode == AppMode::Search {
        spans.push(Span::styled(
            " ",
            Style::default().add_modifier(Modifier::REVERSED),
        ));
    } else if !app.tree.active_search().is_empty() {
        spans.push(Span::styled(
            format!("  ({} rows match)", app.tree.rows().len()),
            Style::default().fg(app.theme.dim_fg),
        ));
    }
    frame.render_widget(Line::from(spans), area);
}

fn render_status_bar(app: &App, frame: &mut Frame, area: ratatui::layout::Rect) {
    let summary = app.root.summary();
    let mut tree_info = format!("{} folders, {} files", summary.folders, summary.files);
    let selected = app.tree.selected().len();
    if selected > 0 {
        tree_info.push_str(&format!(" · {} selected", selected));
    }

    let path_str = app.tree.focused().unwrap_or("").to_string();

    let clipboard_info = app.tree.clipboard().record().map(|record| match record.op {
        ClipboardOp::Copy => format!("⧉ {}", record.paths.len()),
        ClipboardOp::Cut => format!("✂ {}", record.paths.len()),
    });
    let drag_info = app
        .tree
        .drag()
        .map(|session| format!("⇅ {} (m to drop, esc to cancel)", session.paths.len()));

    let mut widget = StatusBarWidget::new(&path_str, &tree_info, &app.theme);
    if let Some((msg, _)) = &app.status_message {
        widget = widget.status_message(msg, msg.starts_with("cannot"));
    }
    if let Some(info) = &clipboard_info {
        widget = widget.clipboard_info(info);
    }
    if let Some(info) = &drag_info {
        widget = widget.drag_info(info);
    }
    frame.render_widget(widget, area);
}
