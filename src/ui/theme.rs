use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub marker: Color,     // Bars under comparison
    pub node: Color,       // Linked list nodes
    pub arrow: Color,      // Links between nodes
    pub element: Color,    // Stack and queue cells
    pub element_dim: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for bars
    marker: Color::Rgb(255, 0, 0),
    node: Color::Rgb(0, 102, 255),
    arrow: Color::Rgb(255, 255, 255),
    element: Color::Rgb(100, 200, 255),
    element_dim: Color::Rgb(50, 150, 200),
};

/// Bar colour for a value, blue for small values through green for large
pub fn value_color(value: i32, min: i32, max: i32) -> Color {
    let span = (i64::from(max) - i64::from(min)).max(1) as f32;
    let norm = ((i64::from(value) - i64::from(min)) as f32 / span).clamp(0.0, 1.0);
    Color::Rgb(
        (norm * 50.0) as u8,
        (norm * 255.0) as u8,
        ((1.0 - norm) * 255.0) as u8,
    )
}
