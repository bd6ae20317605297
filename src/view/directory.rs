//! Member list rendering.
//!
//! The list is a column of fixed-height member cards followed by one footer row.
//! Rendering only reads the session: the viewport height it was laid out for is
//! recorded by the app before each frame.

use super::constants::{HEADER_HEIGHT, STATUS_BAR_HEIGHT};
use super::helpers::{display_width, truncate_to_width};
use super::styles::Palette;
use crate::model::{FetchError, MemberRecord};
use crate::state::directory::{DirectorySession, MEMBER_ROW_HEIGHT};
use crate::state::ListSnapshot;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Screen areas of the directory view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryAreas {
    /// Title bar.
    pub header: Rect,
    /// Scrolling member list.
    pub list: Rect,
    /// Status bar.
    pub status: Rect,
}

/// Split the frame into header, list and status bar.
pub fn directory_layout(area: Rect) -> DirectoryAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    DirectoryAreas {
        header: chunks[0],
        list: chunks[1],
        status: chunks[2],
    }
}

/// Render the whole directory screen.
pub fn render_directory(frame: &mut Frame, session: &DirectorySession, palette: &Palette) {
    let areas = directory_layout(frame.area());
    let snapshot = session.snapshot();
    let last_error = session.controller().last_error();

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" Team Directory", palette.title),
        Span::styled("  signed in", palette.muted),
    ]));
    frame.render_widget(header, areas.header);

    let width = usize::from(areas.list.width);
    let lines: Vec<Line> = (session.scroll_top()..)
        .take(usize::from(areas.list.height))
        .map_while(|row| document_line(&snapshot, last_error, row, width, palette))
        .collect();
    frame.render_widget(Paragraph::new(lines), areas.list);

    render_status_bar(frame, areas.status, &snapshot, last_error, palette);
}

/// The line at document row `row`, or `None` past the footer.
fn document_line(
    snapshot: &ListSnapshot<'_>,
    last_error: Option<&FetchError>,
    row: usize,
    width: usize,
    palette: &Palette,
) -> Option<Line<'static>> {
    let index = row / MEMBER_ROW_HEIGHT;
    let offset = row % MEMBER_ROW_HEIGHT;

    match snapshot.members.get(index) {
        Some(member) => Some(member_line(member, offset, width, palette)),
        None if index == snapshot.members.len() && offset == 0 => {
            Some(footer_line(snapshot, last_error, width, palette))
        }
        None => None,
    }
}

/// One of the four rows of a member card.
fn member_line(member: &MemberRecord, offset: usize, width: usize, palette: &Palette) -> Line<'static> {
    match offset {
        0 => {
            let name = truncate_to_width(member.name(), width.saturating_sub(1)).into_owned();
            let used = 1 + display_width(&name);
            let handle = format!("  @{}", member.username());
            let handle = truncate_to_width(&handle, width.saturating_sub(used)).into_owned();
            Line::from(vec![
                Span::raw(" "),
                Span::styled(name, palette.title),
                Span::styled(handle, palette.handle),
            ])
        }
        1 => detail_line(
            &[member.email(), member.phone(), member.website()],
            width,
            palette,
        ),
        2 => detail_line(&[member.company(), member.city()], width, palette),
        _ => Line::from(""),
    }
}

/// Indented `a · b · c`, skipping blank parts.
fn detail_line(parts: &[&str], width: usize, palette: &Palette) -> Line<'static> {
    let joined = parts
        .iter()
        .filter(|part| !part.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" · ");
    let text = format!("   {joined}");
    Line::styled(truncate_to_width(&text, width).into_owned(), palette.detail)
}

fn footer_line(
    snapshot: &ListSnapshot<'_>,
    last_error: Option<&FetchError>,
    width: usize,
    palette: &Palette,
) -> Line<'static> {
    let (text, style) = footer_text(snapshot, last_error);
    let style = match style {
        FooterStyle::Muted => palette.muted,
        FooterStyle::Error => palette.error,
    };
    Line::styled(truncate_to_width(&format!(" {text}"), width).into_owned(), style)
}

enum FooterStyle {
    Muted,
    Error,
}

fn footer_text(snapshot: &ListSnapshot<'_>, last_error: Option<&FetchError>) -> (String, FooterStyle) {
    if snapshot.fetch_in_flight {
        ("Loading more members…".to_string(), FooterStyle::Muted)
    } else if snapshot.exhausted {
        ("End of directory".to_string(), FooterStyle::Muted)
    } else if let Some(err) = last_error {
        (
            format!("Could not load members ({err}). Scroll to retry."),
            FooterStyle::Error,
        )
    } else {
        ("Scroll down for more".to_string(), FooterStyle::Muted)
    }
}

/// Left-hand status bar text: member count, last page and fetch state.
pub fn status_text(snapshot: &ListSnapshot<'_>, last_error: Option<&FetchError>) -> String {
    let count = snapshot.members.len();
    let noun = if count == 1 { "member" } else { "members" };
    let mut parts = vec![format!("{count} {noun}")];

    if count > 0 {
        parts.push(format!("page {}", snapshot.cursor));
    }

    let state = if snapshot.fetch_in_flight {
        "loading"
    } else if snapshot.exhausted {
        "all loaded"
    } else if last_error.is_some() {
        "fetch failed"
    } else {
        "more available"
    };
    parts.push(state.to_string());

    parts.join(" · ")
}

const KEY_HINTS: &str = "j/k scroll · L logout · ? help · q quit ";

fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    snapshot: &ListSnapshot<'_>,
    last_error: Option<&FetchError>,
    palette: &Palette,
) {
    let width = usize::from(area.width);
    let left = format!(" {}", status_text(snapshot, last_error));
    let left_width = display_width(&left);

    // Hints only when both fit side by side
    let line = if left_width + display_width(KEY_HINTS) + 1 <= width {
        let gap = width - left_width - display_width(KEY_HINTS);
        format!("{left}{}{KEY_HINTS}", " ".repeat(gap))
    } else {
        truncate_to_width(&left, width).into_owned()
    };

    frame.render_widget(Paragraph::new(line).style(palette.status_bar), area);
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;
