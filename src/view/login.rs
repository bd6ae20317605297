//! Login form rendering.

use super::constants::{LOGIN_FORM_HEIGHT, LOGIN_FORM_WIDTH, LOGIN_LABEL_WIDTH};
use super::helpers::{display_width, empty_line, truncate_to_width};
use super::styles::Palette;
use crate::state::auth::{Field, LoginForm, DEMO_COMPANY, DEMO_EMAIL, DEMO_PASSWORD};
use ratatui::{
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const MASK: char = '•';

/// Center a `width` x `height` box in `area`, shrinking it to fit.
pub fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Text shown for `field`: the password is masked one bullet per character.
pub fn display_value(form: &LoginForm, field: Field) -> String {
    let value = form.value(field);
    match field {
        Field::Password => MASK.to_string().repeat(value.chars().count()),
        Field::Email | Field::Company => value.to_string(),
    }
}

/// Render the login form centered in the frame.
///
/// Places the terminal cursor at the end of the focused input.
pub fn render_login(frame: &mut Frame, form: &LoginForm, palette: &Palette) {
    let area = centered_box(LOGIN_FORM_WIDTH, LOGIN_FORM_HEIGHT, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Roster · Sign in ")
        .borders(Borders::ALL)
        .border_style(palette.border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label_width = usize::from(LOGIN_LABEL_WIDTH);
    let value_width = usize::from(inner.width).saturating_sub(label_width + 2);

    let mut lines = vec![
        Line::styled(" Team member directory", palette.muted),
        empty_line(),
    ];

    let first_field_row = lines.len();
    for field in Field::ALL {
        let focused = form.focus() == field;
        let marker = if focused { "›" } else { " " };
        let label = format!("{marker}{:<width$}", field.label(), width = label_width - 1);
        let label_style = if focused { palette.accent } else { palette.detail };
        let value = display_value(form, field);
        let value = truncate_from_left(&value, value_width);

        lines.push(Line::from(vec![
            Span::raw(" "),
            Span::styled(label, label_style),
            Span::raw(" "),
            Span::styled(value, palette.title),
        ]));
    }

    lines.push(empty_line());
    lines.push(match form.error() {
        Some(err) => Line::styled(format!(" {err}"), palette.error),
        None => empty_line(),
    });
    lines.push(Line::styled(
        format!(" Demo: {DEMO_EMAIL} / {DEMO_PASSWORD} / {DEMO_COMPANY}"),
        palette.muted,
    ));
    lines.push(empty_line());
    lines.push(Line::from(vec![
        Span::styled(" Enter", palette.accent),
        Span::styled(" sign in  ", palette.muted),
        Span::styled("Tab", palette.accent),
        Span::styled(" next field  ", palette.muted),
        Span::styled("Esc", palette.accent),
        Span::styled(" quit", palette.muted),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);

    // Cursor after the focused value
    let focus_index = Field::ALL
        .iter()
        .position(|field| *field == form.focus())
        .unwrap_or(0);
    let shown = truncate_from_left(&display_value(form, form.focus()), value_width);
    let column = 1 + label_width + 1 + display_width(&shown);
    let row = first_field_row + focus_index;
    if column < usize::from(inner.width) && row < usize::from(inner.height) {
        frame.set_cursor_position(Position::new(
            inner.x + column as u16,
            inner.y + row as u16,
        ));
    }
}

/// Keep the end of `text` visible when it is wider than `max_width`; a leading
/// `…` marks the hidden start.
fn truncate_from_left(text: &str, max_width: usize) -> String {
    let reversed: String = text.chars().rev().collect();
    truncate_to_width(&reversed, max_width).chars().rev().collect()
}
