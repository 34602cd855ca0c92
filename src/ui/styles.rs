use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Confirmed marker (has a real note)
pub fn confirmed_marker_style() -> Style {
    Style::default().fg(Color::Blue)
}

/// Temporary marker (placeholder content)
pub fn temporary_marker_style() -> Style {
    Style::default().fg(Color::Red)
}

/// Selected marker highlight
pub fn selected_marker_style() -> Style {
    Style::default()
        .fg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Marker being dragged
pub fn dragging_marker_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// The live "now" pointer
pub fn clock_pointer_style() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

/// Bar baseline and hour ruler
pub fn ruler_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Category name style
pub fn category_style() -> Style {
    Style::default().fg(Color::Green)
}

/// Tag badge style
pub fn tag_style() -> Style {
    Style::default().fg(Color::Blue)
}

/// Stats distribution bar style
pub fn gauge_style() -> Style {
    Style::default().fg(Color::Green)
}

/// Status line, informational
pub fn status_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Status line, error
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}
