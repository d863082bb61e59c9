//! Queue pane: boxed cells left to right with Front/Rear labels

use super::utils::{centered, field_spans, hint_spans, pane_block};
use crate::structures::Queue;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const CELL_INNER: usize = 6;
// Box plus one column of spacing
const CELL_STRIDE: usize = CELL_INNER + 3;

/// Data needed to render the queue pane
pub struct QueueRenderData<'a> {
    pub queue: &'a Queue,
    pub value: i32,
    pub editing_value: Option<&'a str>,
}

/// Render the queue pane
pub fn render_queue_pane(frame: &mut Frame, area: Rect, data: QueueRenderData) {
    let block = pane_block(" Queue ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    let mut hints = hint_spans("e", "enqueue");
    hints.extend(hint_spans("d", "dequeue"));
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(field_spans(
                "v",
                "Value to enqueue",
                data.value.to_string(),
                data.editing_value,
            )),
            Line::from(hints),
        ]),
        rows[0],
    );

    let items = data.queue.to_vec();
    let body = if items.is_empty() {
        vec![Line::styled(
            "(empty queue)",
            Style::default().fg(DEFAULT_THEME.comment),
        )]
    } else {
        box_lines(&items, rows[1].width as usize)
    };
    frame.render_widget(Paragraph::new(body), rows[1]);
}

/// Three rows of boxes and a label row; cells past `width` are elided
fn box_lines(items: &[i32], width: usize) -> Vec<Line<'static>> {
    let fits = (width / CELL_STRIDE).max(1);
    let shown = items.len().min(fits);
    let elided = items.len() - shown;

    let top_style = Style::default().fg(DEFAULT_THEME.element);
    let value_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let mut top = Vec::new();
    let mut middle = Vec::new();
    let mut bottom = Vec::new();
    for value in &items[..shown] {
        let bar = "─".repeat(CELL_INNER);
        top.push(Span::styled(format!("┌{}┐ ", bar), top_style));
        middle.push(Span::styled("│", top_style));
        middle.push(Span::styled(
            centered(&value.to_string(), CELL_INNER),
            value_style.bg(DEFAULT_THEME.element_dim),
        ));
        middle.push(Span::styled("│ ", top_style));
        bottom.push(Span::styled(
            format!("└{}┘ ", bar),
            Style::default().fg(DEFAULT_THEME.element_dim),
        ));
    }
    if elided > 0 {
        middle.push(Span::styled(
            format!("… +{}", elided),
            Style::default().fg(DEFAULT_THEME.comment),
        ));
    }

    let label_style = Style::default().fg(DEFAULT_THEME.secondary);
    let mut labels = vec![Span::styled(
        format!("{:<w$}", "Front", w = CELL_STRIDE),
        label_style,
    )];
    if items.len() > 1 {
        let gap = CELL_STRIDE * shown.saturating_sub(2);
        labels.push(Span::raw(" ".repeat(gap)));
        let rear = if elided > 0 { "Rear →" } else { "Rear" };
        labels.push(Span::styled(rear, label_style));
    } else {
        labels[0] = Span::styled("Front/Rear", label_style);
    }

    vec![
        Line::from(top),
        Line::from(middle),
        Line::from(bottom),
        Line::from(labels),
    ]
}
