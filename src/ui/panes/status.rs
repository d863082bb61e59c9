//! Status bar rendering with keybindings and state indicators

use crate::engine::RunStatus;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the status bar
pub struct StatusRenderData<'a> {
    pub view_title: &'a str,
    pub message: &'a str,
    pub is_error: bool,
    pub run_status: RunStatus,
    pub is_input: bool,
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Left side: current view and the last message
    let left_spans = vec![
        Span::styled(
            format!(" {} ", data.view_title),
            Style::default()
                .bg(if data.is_error {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.primary
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", data.message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(if data.is_error {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.fg
                }),
        ),
    ];

    frame.render_widget(
        Paragraph::new(Line::from(left_spans))
            .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            .alignment(Alignment::Left),
        layout[0],
    );

    let mut right_spans = key_hints(data.is_input);
    if let Some(chip) = state_chip(data.run_status, data.is_input) {
        right_spans.push(Span::styled(
            "│",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ));
        right_spans.push(chip);
    }

    frame.render_widget(
        Paragraph::new(Line::from(right_spans))
            .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            .alignment(Alignment::Right),
        layout[1],
    );
}

fn key_hints(is_input: bool) -> Vec<Span<'static>> {
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let bindings: &[(&'static str, &'static str)] = if is_input {
        &[(" ↵ ", " confirm "), (" esc ", " cancel ")]
    } else {
        &[(" ⇥ ", " view "), (" F1-F4 ", " jump "), (" q ", " quit ")]
    };

    let mut spans = Vec::new();
    for (index, (key, desc)) in bindings.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled("│", sep_style));
            spans.push(Span::styled(" ", desc_style));
        }
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(*desc, desc_style));
    }
    spans
}

/// The coloured indicator shown at the far right, if any
fn state_chip(status: RunStatus, is_input: bool) -> Option<Span<'static>> {
    let (label, color) = if is_input {
        (" ⌨ INPUT ", DEFAULT_THEME.secondary)
    } else {
        match status {
            RunStatus::Idle => return None,
            RunStatus::Running => (" ▶ RUNNING ", DEFAULT_THEME.secondary),
            RunStatus::CancelRequested => (" STOPPING ", DEFAULT_THEME.error),
            RunStatus::Completed => (" DONE ", DEFAULT_THEME.success),
        }
    };
    Some(Span::styled(
        label,
        Style::default()
            .bg(color)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    ))
}
