//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, the
//! loading/error banner, and the help overlay.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, View};
use crate::orchestrator::FetchState;

/// Render the header bar: title, today's date, and the fetch state.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (icon_style, state) = match &app.state {
        FetchState::Ready(_) => (Style::default().fg(app.theme.favorable), "Ready"),
        FetchState::Failed(_) => (
            Style::default().fg(app.theme.unfavorable).add_modifier(Modifier::BOLD),
            "Error",
        ),
        FetchState::Loading => (Style::default().fg(app.theme.highlight), "Loading..."),
        FetchState::Idle => (Style::default().add_modifier(Modifier::DIM), "Idle"),
    };

    let today = chrono::Local::now().format("%A, %B %-d, %Y");

    let line = Line::from(vec![
        Span::styled(" ● ", icon_style),
        Span::styled(
            "FINANCIAL DASHBOARD ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::raw(today.to_string()),
        Span::raw(" │ "),
        Span::styled(state, icon_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!("{}:{}", i + 1, view.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: source, time of the last successful load, available controls.
/// Temporary status messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = match &app.state {
        FetchState::Ready(_) => {
            let updated = app
                .last_updated
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string());
            format!(
                " {} | Updated {} | Tab:switch r:refresh e:export ?:help q:quit",
                app.source_description(),
                updated
            )
        }
        FetchState::Failed(_) => format!(" {} | Error | r:retry q:quit", app.source_description()),
        FetchState::Loading => format!(" {} | Loading... | q:quit", app.source_description()),
        FetchState::Idle => format!(" {} | r:load q:quit", app.source_description()),
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the content area when there is no dashboard to show.
///
/// Shows the loading notice, the failure message, or a hint to load.
pub fn render_banner(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match &app.state {
        FetchState::Loading => (
            "Loading dashboard data...".to_string(),
            Style::default().fg(app.theme.highlight),
        ),
        FetchState::Failed(message) => (
            message.clone(),
            Style::default().fg(app.theme.unfavorable).add_modifier(Modifier::BOLD),
        ),
        _ => (
            "No data loaded. Press 'r' to load.".to_string(),
            Style::default().add_modifier(Modifier::DIM),
        ),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .areas(inner);

    let paragraph = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, middle);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  Tab/S-Tab   Next/previous view"),
        Line::from("  1-5         Jump to view"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Refresh data"),
        Line::from("  e         Export to JSON"),
        Line::from("  ?         Toggle help"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 18u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
