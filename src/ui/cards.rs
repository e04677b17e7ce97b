//! Card grid rendering.
//!
//! Each card shows the formatted headline value, the change indicator, and
//! a line chart of its assembled series. Chart color follows the card's
//! tone, so a falling rate draws green.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::series::series_bounds;
use crate::data::{Card, Section};

/// Width below which cards are stacked in a single column.
const TWO_COLUMN_MIN_WIDTH: u16 = 80;

/// Render a section as a grid of cards.
pub fn render(frame: &mut Frame, app: &App, section: &Section, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ({}) ", section.title, section.cards.len()))
        .borders(Borders::TOP)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if section.cards.is_empty() {
        let empty = Paragraph::new("No metrics in this section")
            .style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(empty, inner);
        return;
    }

    let columns = if inner.width >= TWO_COLUMN_MIN_WIDTH { 2 } else { 1 };
    let rows = section.cards.len().div_ceil(columns);

    let row_areas = Layout::vertical(vec![Constraint::Ratio(1, rows as u32); rows]).split(inner);

    for (row, chunk) in section.cards.chunks(columns).enumerate() {
        let cells =
            Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns]).split(row_areas[row]);
        for (card, cell) in chunk.iter().zip(cells.iter()) {
            render_card(frame, app, card, *cell);
        }
    }
}

/// Render a single card.
fn render_card(frame: &mut Frame, app: &App, card: &Card, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", card.title))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [headline, chart_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);

    let direction = card.change.direction();
    let change_style = app.theme.change_style(direction, card.tone);
    let mut change = Vec::new();
    if !direction.symbol().is_empty() {
        change.push(Span::styled(format!("{} ", direction.symbol()), change_style));
    }
    change.push(Span::styled(card.change.to_string(), change_style));
    change.push(Span::styled(
        format!(" {}", card.change_label),
        Style::default().add_modifier(Modifier::DIM),
    ));

    let lines = vec![
        Line::from(Span::styled(card.value.clone(), app.theme.value)),
        Line::from(change),
    ];
    frame.render_widget(Paragraph::new(lines), headline);

    if chart_area.height < 3 {
        return;
    }
    render_chart(frame, app, card, chart_area);
}

/// Render a card's series as a line chart.
fn render_chart(frame: &mut Frame, app: &App, card: &Card, area: Rect) {
    let Some((y_min, y_max)) = series_bounds(&card.series) else {
        let empty =
            Paragraph::new("No history").style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(empty, area);
        return;
    };

    let points: Vec<(f64, f64)> = card
        .series
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();
    let x_max = (points.len().saturating_sub(1) as f64).max(1.0);

    let x_labels: Vec<Span> = match (card.series.first(), card.series.last()) {
        (Some(first), Some(last)) if card.series.len() > 1 => {
            vec![Span::raw(first.name.clone()), Span::raw(last.name.clone())]
        }
        (Some(only), _) => vec![Span::raw(only.name.clone())],
        _ => Vec::new(),
    };

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.theme.tone_color(card.tone)))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(x_labels)
                .style(Style::default().fg(app.theme.border)),
        )
        .y_axis(
            Axis::default()
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(card.kind.format(y_min)),
                    Span::raw(card.kind.format(y_max)),
                ])
                .style(Style::default().fg(app.theme.border)),
        );

    frame.render_widget(chart, area);
}
