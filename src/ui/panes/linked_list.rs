//! Linked list pane: nodes drawn left to right with arrows, wrapped to width

use super::utils::{field_spans, hint_spans, pane_block};
use crate::structures::LinkedList;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const ARROW: &str = " ──▶ ";

/// Data needed to render the linked list pane
pub struct ListRenderData<'a> {
    pub list: &'a LinkedList,
    pub value: i32,
    pub position: usize,
    pub editing_value: Option<&'a str>,
    pub editing_position: Option<&'a str>,
}

/// Render the linked list pane
pub fn render_list_pane(frame: &mut Frame, area: Rect, data: ListRenderData) {
    let block = pane_block(" Linked List ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    let mut fields = field_spans("v", "Node value", data.value.to_string(), data.editing_value);
    fields.extend(field_spans(
        "p",
        "Position",
        data.position.to_string(),
        data.editing_position,
    ));

    let mut hints = hint_spans("b", "insert at beginning");
    hints.extend(hint_spans("e", "insert at end"));
    hints.extend(hint_spans("i", "insert at position"));
    hints.extend(hint_spans("d", "delete at position"));

    frame.render_widget(
        Paragraph::new(vec![Line::from(fields), Line::from(hints)]),
        rows[0],
    );

    let values = data.list.to_vec();
    if values.is_empty() {
        frame.render_widget(
            Paragraph::new("(empty list)").style(Style::default().fg(DEFAULT_THEME.comment)),
            rows[1],
        );
        return;
    }

    let lines = node_lines(&values, rows[1].width as usize);
    frame.render_widget(Paragraph::new(lines), rows[1]);
}

/// Lay nodes out as `( 3 ) ──▶ ( 7 )`, starting a new row when one is full
fn node_lines(values: &[i32], width: usize) -> Vec<Line<'static>> {
    let node_style = Style::default()
        .fg(Color::White)
        .bg(DEFAULT_THEME.node)
        .add_modifier(Modifier::BOLD);
    let arrow_style = Style::default().fg(DEFAULT_THEME.arrow);
    let index_style = Style::default().fg(DEFAULT_THEME.comment);

    let mut lines = Vec::new();
    let mut nodes = Vec::new();
    let mut labels = Vec::new();
    let mut used = 0;

    for (index, value) in values.iter().enumerate() {
        let node = format!("( {} )", value);
        let is_last = index + 1 == values.len();
        let cell_width = node.chars().count() + if is_last { 0 } else { ARROW.chars().count() };

        if used > 0 && used + cell_width > width {
            lines.push(Line::from(std::mem::take(&mut nodes)));
            lines.push(Line::from(std::mem::take(&mut labels)));
            lines.push(Line::default());
            used = 0;
        }

        labels.push(Span::styled(
            format!("{:<w$}", index, w = cell_width),
            index_style,
        ));
        nodes.push(Span::styled(node, node_style));
        if !is_last {
            nodes.push(Span::styled(ARROW, arrow_style));
        }
        used += cell_width;
    }

    lines.push(Line::from(nodes));
    lines.push(Line::from(labels));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_single_row() {
        let lines = node_lines(&[1, 22], 80);
        assert_eq!(lines.len(), 2);
        assert_eq!(text(&lines[0]), "( 1 ) ──▶ ( 22 )");
        assert!(text(&lines[1]).starts_with('0'));
    }

    #[test]
    fn test_wraps_when_full() {
        // Each non-final cell is 10 columns wide
        let lines = node_lines(&[1, 2, 3], 20);
        assert_eq!(lines.len(), 5);
        assert_eq!(text(&lines[0]), "( 1 ) ──▶ ( 2 ) ──▶ ");
        assert_eq!(text(&lines[3]), "( 3 )");
    }
}
