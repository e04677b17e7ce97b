//! Chart series assembly.
//!
//! Pairs a metric's raw history with time-axis labels. The chart renderer
//! positions points by index against the axis ticks, so the length policy
//! here matters more than the values: when labels are supplied the series is
//! exactly as long as the label sequence, with missing or malformed history
//! entries rendered as `0`.

use serde::Serialize;

use super::normalize::{to_number, Numeric};

/// A display string naming a position on the time axis ("9AM", "Mon").
pub type Label = String;

/// One renderable chart point. `value` is always finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub name: Label,
    pub value: f64,
}

/// How points are named, and which sequence governs the series length.
#[derive(Debug, Clone, Copy)]
pub enum LabelPolicy<'a> {
    /// Iterate the labels; history entries past the end become `0`.
    Axis(&'a [Label]),
    /// Iterate the history; name each point from the labels where one exists,
    /// otherwise `Day N`.
    Borrowed(&'a [Label]),
    /// Iterate the history with `Day N` names only.
    Synthetic,
}

/// Synthetic label for a history index (1-based).
pub fn synthetic_label(index: usize) -> Label {
    format!("Day {}", index + 1)
}

/// Assemble a chart series from a history and an optional label sequence.
///
/// With labels, the output has one point per label. Without labels, the
/// output has one point per history entry, named `Day 1`, `Day 2`, ...
/// An empty label slice is still "supplied" and yields an empty series.
///
/// ```
/// use findash::data::series::assemble;
/// use serde_json::json;
///
/// let history = [json!(3.75), json!("invalid"), json!("5.22")];
/// let labels = vec!["Mon".to_string(), "Tue".to_string(), "Wed".to_string()];
/// let points = assemble(&history, Some(labels.as_slice()));
///
/// let values: Vec<f64> = points.iter().map(|p| p.value).collect();
/// assert_eq!(values, vec![3.75, 0.0, 5.22]);
/// assert_eq!(points[1].name, "Tue");
/// ```
pub fn assemble<T: Numeric>(history: &[T], labels: Option<&[Label]>) -> Vec<ChartPoint> {
    match labels {
        Some(labels) => assemble_with(history, LabelPolicy::Axis(labels)),
        None => assemble_with(history, LabelPolicy::Synthetic),
    }
}

/// Assemble a chart series under an explicit [`LabelPolicy`].
pub fn assemble_with<T: Numeric>(history: &[T], policy: LabelPolicy<'_>) -> Vec<ChartPoint> {
    match policy {
        LabelPolicy::Axis(labels) => labels
            .iter()
            .enumerate()
            .map(|(i, label)| ChartPoint {
                name: label.clone(),
                value: to_number(&history.get(i)),
            })
            .collect(),
        LabelPolicy::Borrowed(labels) => history
            .iter()
            .enumerate()
            .map(|(i, raw)| ChartPoint {
                name: labels
                    .get(i)
                    .filter(|label| !label.is_empty())
                    .cloned()
                    .unwrap_or_else(|| synthetic_label(i)),
                value: to_number(raw),
            })
            .collect(),
        LabelPolicy::Synthetic => history
            .iter()
            .enumerate()
            .map(|(i, raw)| ChartPoint {
                name: synthetic_label(i),
                value: to_number(raw),
            })
            .collect(),
    }
}

/// Padded y-axis bounds for a series.
///
/// Returns `None` for an empty series. A flat series gets a symmetric pad so
/// the axis never collapses to a zero-height range.
pub fn series_bounds(points: &[ChartPoint]) -> Option<(f64, f64)> {
    let first = points.first()?.value;
    let (min, max) = points
        .iter()
        .fold((first, first), |(lo, hi), p| (lo.min(p.value), hi.max(p.value)));

    let range = max - min;
    let pad = if range > f64::EPSILON {
        range * 0.05
    } else {
        (max.abs() * 0.01).max(1.0)
    };

    Some((min - pad, max + pad))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn labels(names: &[&str]) -> Vec<Label> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_assemble_mixed_history() {
        let history = [json!(3.75), json!("invalid"), json!("5.22")];
        let labels = labels(&["Mon", "Tue", "Wed"]);

        let points = assemble(&history, Some(labels.as_slice()));

        assert_eq!(
            points,
            vec![
                ChartPoint { name: "Mon".into(), value: 3.75 },
                ChartPoint { name: "Tue".into(), value: 0.0 },
                ChartPoint { name: "Wed".into(), value: 5.22 },
            ]
        );
    }

    #[test]
    fn test_labels_govern_length() {
        let axis = labels(&["9AM", "10AM", "11AM", "12PM", "1PM", "2PM", "3PM", "4PM"]);

        // Shorter history pads with zeros
        let short = [json!(1), json!(2)];
        let points = assemble(&short, Some(axis.as_slice()));
        assert_eq!(points.len(), axis.len());
        assert_eq!(points[1].value, 2.0);
        assert!(points[2..].iter().all(|p| p.value == 0.0));

        // Longer history is truncated to the axis
        let long: Vec<Value> = (0..20).map(|i| json!(i)).collect();
        let points = assemble(&long, Some(axis.as_slice()));
        assert_eq!(points.len(), axis.len());
        assert_eq!(points.last().unwrap().name, "4PM");
        assert_eq!(points.last().unwrap().value, 7.0);
    }

    #[test]
    fn test_length_property_over_many_shapes() {
        for label_count in 1..8 {
            let axis: Vec<Label> = (0..label_count).map(|i| format!("t{i}")).collect();
            for history_len in 0..10 {
                let history: Vec<f64> = (0..history_len).map(|i| i as f64 * 1.5).collect();
                let points = assemble(&history, Some(axis.as_slice()));
                assert_eq!(points.len(), axis.len());
                assert!(points.iter().all(|p| p.value.is_finite()));
            }
        }
    }

    #[test]
    fn test_empty_labels_yield_empty_series() {
        let history = [json!(1.0), json!(2.0)];
        let points = assemble(&history, Some(Vec::<Label>::new().as_slice()));
        assert!(points.is_empty());
    }

    #[test]
    fn test_missing_labels_fall_back_to_day_n() {
        let history = [json!(10), json!("11"), json!(null)];
        let points = assemble(&history, None);

        let names: Vec<&str> = points.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Day 1", "Day 2", "Day 3"]);
        assert_eq!(points[2].value, 0.0);
    }

    #[test]
    fn test_borrowed_labels_follow_history_length() {
        let axis = labels(&["Mon", "Tue", "Wed", "Thu", "Fri", "Today"]);

        let history = [json!(12100000), json!(12200000), json!(12300000)];
        let points = assemble_with(&history, LabelPolicy::Borrowed(&axis));
        assert_eq!(points.len(), 3);
        assert_eq!(points[2].name, "Wed");

        let axis = labels(&["Mon"]);
        let points = assemble_with(&history, LabelPolicy::Borrowed(&axis));
        let names: Vec<&str> = points.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Mon", "Day 2", "Day 3"]);

        let axis = labels(&["", "Tue"]);
        let points = assemble_with(&[json!(1), json!(2)], LabelPolicy::Borrowed(&axis));
        let names: Vec<&str> = points.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Day 1", "Tue"]);
    }

    #[test]
    fn test_series_bounds() {
        assert!(series_bounds(&[]).is_none());

        let history = [4.40, 4.38, 4.32];
        let points = assemble(&history, None);
        let (lo, hi) = series_bounds(&points).unwrap();
        assert!(lo < 4.32 && hi > 4.40);

        let flat = assemble(&[0.0, 0.0], None);
        let (lo, hi) = series_bounds(&flat).unwrap();
        assert_eq!((lo, hi), (-1.0, 1.0));
    }
}
