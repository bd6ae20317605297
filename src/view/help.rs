//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with the directory shortcuts grouped by category.
//! Triggered by '?' key, dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::helpers::empty_line;
use super::styles::Palette;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, palette: &Palette) {
    let area = frame.area();
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, area);

    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(palette))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(palette.border),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };

    let hint = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc or ? to close ",
        palette.muted.add_modifier(Modifier::DIM),
    )]))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

/// Calculate the centered rect for the help overlay.
///
/// Returns a Rect that is centered on the screen with the specified
/// percentage of width and height.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/↓", "Scroll down"),
            ("k/↑", "Scroll up"),
            ("Ctrl+d/PgDn", "Page down"),
            ("Ctrl+u/PgUp", "Page up"),
            ("g/Home", "Jump to top"),
            ("G/End", "Jump to bottom"),
            ("Wheel", "Scroll three rows"),
        ],
    ),
    ("Session", &[("L", "Log out")]),
    (
        "Application",
        &[("q/Ctrl+c", "Quit"), ("?", "Toggle this help")],
    ),
];

/// Build the help content lines grouped by category.
fn build_help_content(palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (index, (category, keys)) in SECTIONS.iter().enumerate() {
        if index > 0 {
            lines.push(empty_line());
        }
        lines.push(Line::from(Span::styled(*category, palette.section_header)));
        for (key, description) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<14}"), palette.accent),
                Span::styled(*description, palette.detail),
            ]));
        }
    }

    lines.push(empty_line());
    lines.push(Line::styled(
        "More members load as you near the bottom of the list.",
        palette.muted,
    ));

    lines
}
