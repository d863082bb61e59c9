//! Stack pane rendering, top element first
//!
//! An element that is being popped stays on screen, drawn in the error
//! colour, until the pop delay has elapsed and the app removes it.

use super::utils::{centered, field_spans, hint_spans, pane_block};
use crate::structures::Stack;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const CELL_WIDTH: usize = 10;

/// Data needed to render the stack pane
pub struct StackRenderData<'a> {
    pub stack: &'a Stack,
    pub value: i32,
    pub editing_value: Option<&'a str>,
    pub is_popping: bool,
}

/// Render the stack pane
pub fn render_stack_pane(frame: &mut Frame, area: Rect, data: StackRenderData) {
    let block = pane_block(" Stack ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    let mut hints = hint_spans("p", "push");
    hints.extend(hint_spans("o", "pop"));
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(field_spans(
                "v",
                "Value to push",
                data.value.to_string(),
                data.editing_value,
            )),
            Line::from(hints),
        ]),
        rows[0],
    );

    let items = data.stack.as_slice();
    let body = if items.is_empty() {
        vec![Line::styled(
            "(empty stack)",
            Style::default().fg(DEFAULT_THEME.comment),
        )]
    } else {
        cell_lines(items, data.is_popping, rows[1].height as usize)
    };
    frame.render_widget(Paragraph::new(body), rows[1]);

    frame.render_widget(
        Paragraph::new(format!("Number of elements: {}", items.len()))
            .style(Style::default().fg(DEFAULT_THEME.comment)),
        rows[2],
    );
}

/// One row per element, top of the stack first, clipped to `max_rows`
fn cell_lines(items: &[i32], is_popping: bool, max_rows: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let hidden = items.len().saturating_sub(max_rows.max(1));

    for (depth, value) in items.iter().rev().enumerate() {
        if lines.len() + 1 >= max_rows && hidden > 0 {
            lines.push(Line::styled(
                format!("  … {} more", items.len() - depth),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            break;
        }

        let bg = if depth == 0 && is_popping {
            DEFAULT_THEME.error
        } else if depth % 2 == 0 {
            DEFAULT_THEME.element
        } else {
            DEFAULT_THEME.element_dim
        };
        let pointer = if depth == 0 { "top ▶ " } else { "      " };

        lines.push(Line::from(vec![
            Span::styled(pointer, Style::default().fg(DEFAULT_THEME.secondary)),
            Span::styled(
                centered(&value.to_string(), CELL_WIDTH),
                Style::default().bg(bg).fg(Color::Black),
            ),
        ]));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_top_first() {
        let lines = cell_lines(&[1, 2, 3], false, 10);
        assert_eq!(lines.len(), 3);
        assert!(text(&lines[0]).starts_with("top ▶"));
        assert!(text(&lines[0]).contains('3'));
        assert!(text(&lines[2]).contains('1'));
    }

    #[test]
    fn test_popping_highlight() {
        let lines = cell_lines(&[1, 2], true, 10);
        assert_eq!(lines[0].spans[1].style.bg, Some(DEFAULT_THEME.error));
        assert_eq!(lines[1].spans[1].style.bg, Some(DEFAULT_THEME.element_dim));
    }

    #[test]
    fn test_clipped() {
        let items: Vec<i32> = (0..20).collect();
        let lines = cell_lines(&items, false, 5);
        assert_eq!(lines.len(), 5);
        assert!(text(&lines[4]).contains("16 more"));
    }
}
