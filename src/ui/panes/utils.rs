//! Helpers shared by several panes

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
};

/// Bordered block with the focused border style
pub(crate) fn pane_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        )
}

/// A labelled field: `key` selects it, `value` is its committed content and
/// `editing` is the in-progress text when the field is being edited
pub(crate) fn field_spans<'a>(
    key: &'a str,
    label: &'a str,
    value: String,
    editing: Option<&'a str>,
) -> Vec<Span<'a>> {
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let label_style = Style::default().fg(DEFAULT_THEME.fg);

    let value_span = match editing {
        Some(text) => Span::styled(
            format!("[{}_]", text),
            Style::default()
                .fg(Color::Black)
                .bg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD),
        ),
        None => Span::styled(
            format!("[{}]", value),
            Style::default().fg(DEFAULT_THEME.primary),
        ),
    };

    vec![
        Span::styled(format!(" {} ", key), key_style),
        Span::styled(format!(" {}: ", label), label_style),
        value_span,
        Span::raw("   "),
    ]
}

/// A key hint: the key in a grey chip followed by what it does
pub(crate) fn hint_spans<'a>(key: &'a str, action: &'a str) -> Vec<Span<'a>> {
    vec![
        Span::styled(
            format!(" {} ", key),
            Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black),
        ),
        Span::styled(
            format!(" {}  ", action),
            Style::default().fg(DEFAULT_THEME.fg),
        ),
    ]
}

/// Centre `text` in a cell of `width` columns
pub(crate) fn centered(text: &str, width: usize) -> String {
    format!("{:^width$}", text, width = width)
}
