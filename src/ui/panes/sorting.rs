//! Sorting pane: controls plus a bar chart of the latest snapshot
//!
//! Bars are scaled to the tallest value (and to zero, when negative values
//! are present) and coloured by height. Indices under the snapshot's markers
//! are drawn in the marker colour. When there are more values than columns,
//! only the leading values that fit are drawn.

use super::utils::{field_spans, hint_spans, pane_block};
use crate::engine::{Algorithm, RunStatus};
use crate::snapshot::Snapshot;
use crate::ui::theme::{value_color, DEFAULT_THEME};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};
use std::time::Duration;

/// Data needed to render the sorting pane
pub struct SortingRenderData<'a> {
    pub snapshot: &'a Snapshot,
    pub algorithm: Algorithm,
    pub step_delay: Duration,
    pub value_count: usize,
    pub custom_text: &'a str,
    pub editing_count: Option<&'a str>,
    pub editing_custom: Option<&'a str>,
}

/// Render the sorting pane
pub fn render_sorting_pane(frame: &mut Frame, area: Rect, data: SortingRenderData) {
    let block = pane_block(" Sorting ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(control_lines(&data)), rows[0]);
    frame.render_widget(Paragraph::new(progress_line(data.snapshot)), rows[1]);

    if data.snapshot.values.is_empty() {
        frame.render_widget(
            Paragraph::new("(no data, press g to generate)")
                .style(Style::default().fg(DEFAULT_THEME.comment)),
            rows[2],
        );
    } else {
        frame.render_widget(Bars::new(data.snapshot), rows[2]);
    }
}

fn control_lines<'a>(data: &'a SortingRenderData<'a>) -> Vec<Line<'a>> {
    let selector = Line::from(vec![
        Span::styled(" ←/→ ", Style::default().bg(DEFAULT_THEME.comment)),
        Span::raw(" Algorithm: "),
        Span::styled(
            format!("◀ {} ▶", data.algorithm),
            Style::default()
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(" +/- ", Style::default().bg(DEFAULT_THEME.comment)),
        Span::raw(" Delay: "),
        Span::styled(
            format!("{} ms", data.step_delay.as_millis()),
            Style::default().fg(DEFAULT_THEME.secondary),
        ),
    ]);

    let mut fields = field_spans(
        "n",
        "Values to generate",
        data.value_count.to_string(),
        data.editing_count,
    );
    fields.extend(field_spans(
        "c",
        "Custom values",
        data.custom_text.to_string(),
        data.editing_custom,
    ));

    let mut hints = hint_spans("g", "generate");
    hints.extend(hint_spans("s", "shuffle"));
    hints.extend(hint_spans("⏎/⎵", "start / stop"));

    vec![selector, Line::from(fields), Line::from(hints)]
}

fn progress_line(snapshot: &Snapshot) -> Line<'static> {
    let status = snapshot.status;
    let (label, color) = match status {
        RunStatus::Idle if snapshot.algorithm.is_some() && snapshot.is_sorted() => {
            ("SORTED", DEFAULT_THEME.success)
        }
        RunStatus::Idle => (status.label(), DEFAULT_THEME.comment),
        RunStatus::Running => (status.label(), DEFAULT_THEME.secondary),
        RunStatus::CancelRequested => (status.label(), DEFAULT_THEME.error),
        RunStatus::Completed => (status.label(), DEFAULT_THEME.success),
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", label),
            Style::default()
                .bg(color)
                .fg(ratatui::style::Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "  {} values  {} steps  {} comparisons",
            snapshot.values.len(),
            snapshot.steps,
            snapshot.comparisons
        )),
    ];
    if let Some(algorithm) = snapshot.algorithm {
        spans.push(Span::styled(
            format!("  ({})", algorithm),
            Style::default().fg(DEFAULT_THEME.comment),
        ));
    }
    Line::from(spans)
}

/// Bar chart of a snapshot's values
pub struct Bars<'a> {
    snapshot: &'a Snapshot,
}

impl<'a> Bars<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Bars { snapshot }
    }

    /// Columns per bar and the number of bars that fit in `width`
    fn layout(len: usize, width: u16) -> (u16, usize) {
        if len == 0 || width == 0 {
            return (0, 0);
        }
        let bar_width = (width as usize / len).max(1);
        let visible = len.min(width as usize / bar_width);
        (bar_width as u16, visible)
    }

    /// Height in rows of a bar for `value`, at least one row above the floor
    fn bar_height(value: i32, floor: i32, top: i32, rows: u16) -> u16 {
        let span = (i64::from(top) - i64::from(floor)).max(1) as f64;
        let scaled = (i64::from(value) - i64::from(floor)) as f64 / span * rows as f64;
        (scaled.round() as u16).clamp(1, rows)
    }
}

impl Widget for Bars<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let values = &self.snapshot.values;
        let (bar_width, visible) = Self::layout(values.len(), area.width);
        if visible == 0 || area.height == 0 {
            return;
        }

        let floor = values.iter().copied().min().unwrap_or(0).min(0);
        let top = self.snapshot.max_value().unwrap_or(1).max(1);
        // Leave a one-column gap between wide bars
        let fill = if bar_width >= 3 { bar_width - 1 } else { bar_width };

        for (index, &value) in values.iter().take(visible).enumerate() {
            let color = if self.snapshot.markers.contains(index) {
                DEFAULT_THEME.marker
            } else {
                value_color(value, floor, top)
            };
            let style = Style::default().fg(color);

            let height = Self::bar_height(value, floor, top, area.height);
            let x0 = area.x + index as u16 * bar_width;
            for y in area.bottom() - height..area.bottom() {
                for x in x0..x0 + fill {
                    buf.set_string(x, y, "█", style);
                }
            }
        }
    }
}
