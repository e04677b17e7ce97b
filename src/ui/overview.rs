//! Market overview rendering.
//!
//! Top gainers and losers side by side, with the market sentiment split
//! underneath.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Cell, Gauge, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::dashboard::MoverRow;
use crate::data::OverviewView;

/// Render the overview view.
pub fn render(frame: &mut Frame, app: &App, overview: &OverviewView, area: Rect) {
    let [tables, sentiment] =
        Layout::vertical([Constraint::Min(5), Constraint::Length(5)]).areas(area);
    let [gainers, losers] =
        Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).areas(tables);

    render_movers(frame, app, " Top Gainers ", &overview.gainers, gainers);
    render_movers(frame, app, " Top Losers ", &overview.losers, losers);
    render_sentiment(frame, app, overview, sentiment);
}

fn render_movers(frame: &mut Frame, app: &App, title: &str, movers: &[MoverRow], area: Rect) {
    let header = Row::new(vec![
        Cell::from("Symbol"),
        Cell::from("Name"),
        Cell::from("Price"),
        Cell::from("Change"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = movers
        .iter()
        .map(|m| {
            Row::new(vec![
                Cell::from(m.symbol.clone()),
                Cell::from(m.name.clone()),
                Cell::from(m.price.clone()),
                Cell::from(format!("{} {}", m.direction.symbol(), m.change))
                    .style(app.theme.direction_style(m.direction)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );

    frame.render_widget(table, area);
}

fn render_sentiment(frame: &mut Frame, app: &App, overview: &OverviewView, area: Rect) {
    let block = Block::default()
        .title(" Market Sentiment ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let sentiment = &overview.sentiment;
    let total: f64 = sentiment.shares.iter().map(|s| s.max(0.0)).sum();
    let parts = [
        ("Bullish", &sentiment.bullish, sentiment.shares[0], app.theme.favorable),
        ("Neutral", &sentiment.neutral, sentiment.shares[1], app.theme.neutral),
        ("Bearish", &sentiment.bearish, sentiment.shares[2], app.theme.unfavorable),
    ];

    let cells = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(inner);
    for ((name, label, share, color), cell) in parts.into_iter().zip(cells.iter()) {
        let ratio = if total > 0.0 {
            (share.max(0.0) / total).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color))
            .ratio(ratio)
            .label(Span::raw(format!("{} {}", name, label)));
        frame.render_widget(gauge, *cell);
    }
}
