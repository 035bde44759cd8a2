//! UI rendering for the selector.
//!
//! Left pane: location filter. Right pane: search input above the ranked
//! results. A one-line help bar runs along the bottom.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::Focus;
use crate::tui::Theme;
use crate::App;

/// Draw the selector.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(app.theme.background)),
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(columns[1]);

    draw_locations(frame, app, columns[0]);
    draw_search(frame, app, right[0]);
    draw_results(frame, app, right[1]);
    draw_help_bar(frame, app, rows[1]);
}

fn pane<'a>(theme: &Theme, title: String, focused: bool) -> Block<'a> {
    let border = if focused { theme.primary } else { theme.border };
    let title_style = if focused {
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_dim)
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title)
        .title_style(title_style)
}

fn draw_locations(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Locations;

    let items: Vec<ListItem> = app
        .locations
        .iter()
        .map(|name| {
            let checked = app.location_filter.contains(name);
            let (mark, mark_style) = if checked {
                (
                    "[✓] ",
                    Style::default()
                        .fg(theme.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("[ ] ", Style::default().fg(theme.text_muted))
            };
            let name_style = if app.is_location_enabled(name) {
                Style::default().fg(theme.text)
            } else {
                Style::default().fg(theme.text_muted)
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, mark_style),
                Span::styled(name.as_str(), name_style),
            ]))
        })
        .collect();

    let title = format!(" Locations ({}) ", app.filter_summary());
    let list = List::new(items)
        .block(pane(theme, title, focused))
        .highlight_style(Style::default().bg(theme.selected_bg));

    let selected = (focused && !app.locations.is_empty()).then_some(app.location_cursor);
    let mut state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_search(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Search;

    let line = if app.query.is_empty() {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(theme.primary)),
            Span::styled("Type to search commands...", Style::default().fg(theme.text_muted)),
        ])
    } else {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(theme.primary)),
            Span::styled(app.query.as_str(), Style::default().fg(theme.text)),
        ])
    };

    let title = format!(" Search ({}/{}) ", app.results.len(), app.entries.len());
    frame.render_widget(Paragraph::new(line).block(pane(theme, title, focused)), area);

    if focused {
        let offset = u16::try_from(app.query.chars().count() + 2).unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(offset)
            .min(area.right().saturating_sub(2));
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn draw_results(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Results;

    let items: Vec<ListItem> = app
        .result_entries()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("[{}] ", entry.display_name),
                    Style::default().fg(theme.accent),
                ),
                Span::styled(entry.command.as_str(), Style::default().fg(theme.text)),
            ]))
        })
        .collect();

    let title = if app.results.is_empty() {
        " Commands (no matches) ".to_string()
    } else {
        " Commands ".to_string()
    };
    let highlight = if focused {
        Style::default()
            .bg(theme.selected_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(theme.selected_bg)
    };
    let list = List::new(items)
        .block(pane(theme, title, focused))
        .highlight_style(highlight)
        .highlight_symbol("▶ ");

    let selected = (!app.results.is_empty()).then_some(app.cursor);
    let mut state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_help_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let hint = match app.focus {
        Focus::Locations => "↑↓ move  Space toggle",
        Focus::Search => "type to filter  ↑↓ results  Enter run first",
        Focus::Results => "↑↓ move  Enter select",
    };

    let line = Line::from(vec![
        Span::styled(format!(" {hint}"), Style::default().fg(theme.text_dim)),
        Span::styled("  │  ", Style::default().fg(theme.border)),
        Span::styled(
            "Tab focus  Ctrl+U clear  Ctrl+L reset  Esc cancel",
            Style::default().fg(theme.text_muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
