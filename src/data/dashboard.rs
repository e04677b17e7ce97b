//! Display model built from a complete [`DashboardSnapshot`].
//!
//! Everything the UI (or the JSON export) shows is computed here: formatted
//! headline values, change indicators, favorable/unfavorable tone, and the
//! assembled chart series for each card.

use serde::Serialize;

use super::metrics::{DashboardSnapshot, MarketMover, MetricGroup, MetricSnapshot};
use super::normalize::{
    format_abbreviated_currency, format_currency, format_headline_currency, format_percentage,
    format_signed_percentage, format_share_percentage, to_number, ChangeIndicator, Direction,
};
use super::series::{assemble_with, ChartPoint, Label, LabelPolicy};

/// Caption shown next to every card's change indicator.
pub const CHANGE_LABEL: &str = "vs yesterday";

/// The kind of card, which decides formatting, tone and labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    /// Index levels: plain two-decimal values, rising is favorable.
    Stock,
    /// Interest rates: percentages, falling is favorable.
    Rate,
    /// Banking metrics: abbreviated currency, rising is favorable, and the
    /// series follows the metric's own history length.
    Metric,
}

impl CardKind {
    /// Format a value the way this card displays it.
    pub fn format(&self, value: f64) -> String {
        match self {
            CardKind::Stock => format_currency(&value),
            CardKind::Rate => format_percentage(&value),
            CardKind::Metric => format_abbreviated_currency(&value),
        }
    }

    fn tone(&self, change: f64) -> Tone {
        let favorable = match self {
            CardKind::Stock | CardKind::Metric => change >= 0.0,
            CardKind::Rate => change < 0.0,
        };
        if favorable {
            Tone::Favorable
        } else {
            Tone::Unfavorable
        }
    }
}

/// Whether a card's movement is good news, used for chart color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Favorable,
    Unfavorable,
}

/// A single metric card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub key: String,
    pub title: String,
    pub kind: CardKind,
    pub value: String,
    pub change: ChangeIndicator,
    pub change_label: &'static str,
    pub tone: Tone,
    pub series: Vec<ChartPoint>,
}

impl Card {
    /// Build a card for one metric.
    ///
    /// `current` and `change` are coerced independently; a malformed change
    /// leaves the value intact and shows a neutral indicator.
    pub fn build(kind: CardKind, key: &str, metric: &MetricSnapshot, labels: &[Label]) -> Self {
        let policy = match kind {
            CardKind::Stock | CardKind::Rate => LabelPolicy::Axis(labels),
            CardKind::Metric => LabelPolicy::Borrowed(labels),
        };

        Self {
            key: key.to_string(),
            title: metric.label.clone().unwrap_or_else(|| key.to_string()),
            kind,
            value: kind.format(to_number(&metric.current)),
            change: ChangeIndicator::from_raw(&metric.change),
            change_label: CHANGE_LABEL,
            tone: kind.tone(to_number(&metric.change)),
            series: assemble_with(&metric.history, policy),
        }
    }
}

/// Identifies one of the card sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Stocks,
    Crypto,
    Rates,
    Banking,
}

impl SectionId {
    pub const ALL: [SectionId; 4] = [
        SectionId::Stocks,
        SectionId::Crypto,
        SectionId::Rates,
        SectionId::Banking,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SectionId::Stocks => "Stock Indices",
            SectionId::Crypto => "Crypto Indices",
            SectionId::Rates => "Interest Rates",
            SectionId::Banking => "Banking Metrics",
        }
    }

    fn kind(&self) -> CardKind {
        match self {
            SectionId::Stocks | SectionId::Crypto => CardKind::Stock,
            SectionId::Rates => CardKind::Rate,
            SectionId::Banking => CardKind::Metric,
        }
    }

    fn group<'a>(&self, snapshot: &'a DashboardSnapshot) -> &'a MetricGroup {
        match self {
            SectionId::Stocks => &snapshot.stock_indices,
            SectionId::Crypto => &snapshot.crypto_indices,
            SectionId::Rates => &snapshot.interest_rates,
            SectionId::Banking => &snapshot.daily_metrics,
        }
    }
}

/// A titled grid of cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub id: SectionId,
    pub title: &'static str,
    pub cards: Vec<Card>,
}

/// One formatted row of the gainers/losers tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoverRow {
    pub symbol: String,
    pub name: String,
    pub price: String,
    pub change: String,
    pub direction: Direction,
}

impl MoverRow {
    fn build(mover: &MarketMover) -> Self {
        Self {
            symbol: mover.symbol.clone(),
            name: mover.name.clone(),
            price: format_headline_currency(&mover.price),
            change: format_signed_percentage(&mover.change),
            direction: ChangeIndicator::from_raw(&mover.change).direction(),
        }
    }
}

/// Formatted sentiment shares.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentView {
    pub bullish: String,
    pub neutral: String,
    pub bearish: String,
    /// Coerced bullish, neutral and bearish shares, for gauges.
    pub shares: [f64; 3],
}

/// The market overview section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewView {
    pub gainers: Vec<MoverRow>,
    pub losers: Vec<MoverRow>,
    pub sentiment: SentimentView,
}

/// The complete display model for one fetch cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub sections: Vec<Section>,
    pub overview: OverviewView,
    pub time_labels: Vec<Label>,
}

impl DashboardView {
    /// Build the display model from a complete snapshot.
    pub fn build(snapshot: &DashboardSnapshot) -> Self {
        let sections = SectionId::ALL
            .iter()
            .map(|id| Section {
                id: *id,
                title: id.title(),
                cards: id
                    .group(snapshot)
                    .entries()
                    .iter()
                    .map(|(key, metric)| {
                        Card::build(id.kind(), key, metric, &snapshot.time_labels)
                    })
                    .collect(),
            })
            .collect();

        let overview = &snapshot.market_overview;
        let sentiment = &overview.market_sentiment;

        Self {
            sections,
            overview: OverviewView {
                gainers: overview.top_gainers.iter().map(MoverRow::build).collect(),
                losers: overview.top_losers.iter().map(MoverRow::build).collect(),
                sentiment: SentimentView {
                    bullish: format_share_percentage(&sentiment.bullish),
                    neutral: format_share_percentage(&sentiment.neutral),
                    bearish: format_share_percentage(&sentiment.bearish),
                    shares: [
                        to_number(&sentiment.bullish),
                        to_number(&sentiment.neutral),
                        to_number(&sentiment.bearish),
                    ],
                },
            },
            time_labels: snapshot.time_labels.clone(),
        }
    }

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}
