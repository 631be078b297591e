//! Grouped mean / median / mode
//!
//! A single pass groups records by label in first-occurrence order, dropping
//! any record whose measurement is missing or non-finite. Each surviving group
//! is then summarised into a [`StatsRow`]. Groups never end up empty, so every
//! emitted row has a mean, a median and a mode.

use indexmap::IndexMap;
use serde::Serialize;

/// Summary of one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsRow {
    /// Group label, e.g. `Class 1`.
    pub label: String,
    pub mean: f64,
    pub median: f64,
    /// Always `Some` for rows produced by [`compute`].
    pub mode: Option<f64>,
}

/// Group `records` by `group_key` and summarise the values produced by
/// `measure` for each group.
///
/// Records for which `group_key` returns `None`, or `measure` returns `None`
/// or a non-finite number, do not contribute to any group. Rows come back in
/// the order in which their group first received a valid value. Exact values
/// are returned; rounding for display happens in [`crate::stats::table`].
///
/// ```
/// use wine_stats::stats::engine::compute;
///
/// let samples = [("a", 1.0), ("b", 4.0), ("a", 3.0)];
/// let rows = compute(&samples, |s| Some(s.0.to_string()), |s| Some(s.1));
///
/// assert_eq!(rows[0].label, "a");
/// assert_eq!(rows[0].mean, 2.0);
/// assert_eq!(rows[1].mode, Some(4.0));
/// ```
pub fn compute<R, K, M>(records: &[R], group_key: K, measure: M) -> Vec<StatsRow>
where
    K: Fn(&R) -> Option<String>,
    M: Fn(&R) -> Option<f64>,
{
    let groups = group_values(records, group_key, measure);

    groups
        .into_iter()
        .filter_map(|(label, values)| {
            let (Some(avg), Some(mid)) = (mean(&values), median(&values)) else {
                log::debug!("Dropping empty group {label}");
                return None;
            };
            Some(StatsRow {
                label,
                mean: avg,
                median: mid,
                mode: mode(&values),
            })
        })
        .collect()
}

/// Collect the valid measurements per label, keeping both label order and
/// value order as they appear in `records`.
pub fn group_values<R, K, M>(records: &[R], group_key: K, measure: M) -> IndexMap<String, Vec<f64>>
where
    K: Fn(&R) -> Option<String>,
    M: Fn(&R) -> Option<f64>,
{
    let mut groups: IndexMap<String, Vec<f64>> = IndexMap::new();
    let mut skipped = 0usize;

    for record in records {
        let Some(label) = group_key(record) else {
            skipped += 1;
            continue;
        };
        match measure(record) {
            Some(value) if value.is_finite() => groups.entry(label).or_default().push(value),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        log::debug!(
            "Skipped {skipped} of {} records without a valid label or measurement",
            records.len()
        );
    }
    groups
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median of a sorted copy of `values`; the input order is left untouched.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Most frequent value, ties going to the value that reached the top count
/// first. `None` for an empty slice.
pub fn mode(values: &[f64]) -> Option<f64> {
    let mut tracker = ModeTracker::default();
    for &value in values {
        tracker.observe(value);
    }
    tracker.mode()
}

// ---------------------------------------------------------------------------
// ModeTracker
// ---------------------------------------------------------------------------

/// Running frequency table used to find the mode in one pass.
///
/// Counts are kept per distinct value in first-seen order. The reported mode
/// only changes when a value's count becomes strictly greater than the best
/// count so far (see [`first_to_strictly_exceed`]), so with all-distinct input
/// the first value wins.
#[derive(Debug, Clone, Default)]
pub struct ModeTracker {
    counts: IndexMap<u64, usize>,
    best: Option<(f64, usize)>,
}

impl ModeTracker {
    pub fn observe(&mut self, value: f64) {
        let count = self.counts.entry(frequency_key(value)).or_insert(0);
        *count += 1;
        if first_to_strictly_exceed(*count, self.best) {
            self.best = Some((value, *count));
        }
    }

    pub fn mode(&self) -> Option<f64> {
        self.best.map(|(value, _)| value)
    }

    /// Occurrences of `value` seen so far.
    #[cfg(test)]
    fn count(&self, value: f64) -> usize {
        self.counts.get(&frequency_key(value)).copied().unwrap_or(0)
    }

    /// Distinct values in first-seen order with their counts.
    #[cfg(test)]
    fn frequencies(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.counts.iter().map(|(&bits, &count)| (f64::from_bits(bits), count))
    }
}

/// Tie-break rule for the mode: a value takes over only when its count is
/// strictly greater than the current best. Equal counts keep the earlier
/// holder.
pub fn first_to_strictly_exceed(count: usize, best: Option<(f64, usize)>) -> bool {
    best.map_or(true, |(_, best_count)| count > best_count)
}

// -0.0 and 0.0 compare equal and must share a bucket.
fn frequency_key(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn mean_is_sum_over_count() {
        let values = [1.5, 2.5, 4.0, 0.25];
        let m = mean(&values).unwrap();
        assert!((m - 8.25 / 4.0).abs() < EPS);
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&[5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[7.0]), Some(7.0));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn median_leaves_input_order_alone() {
        let values = vec![3.0, 1.0, 2.0];
        let _ = median(&values);
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn mode_ties_go_to_first_value_to_reach_max() {
        assert_eq!(mode(&[1.0, 1.0, 2.0, 2.0]), Some(1.0));
        // 2 is seen first, but 1 reaches a count of two first.
        assert_eq!(mode(&[2.0, 1.0, 1.0, 2.0]), Some(1.0));
        assert_eq!(mode(&[1.0, 2.0, 2.0, 1.0, 1.0]), Some(1.0));
    }

    #[test]
    fn mode_of_distinct_values_is_first_value() {
        assert_eq!(mode(&[3.0, 1.0, 2.0]), Some(3.0));
    }

    #[test]
    fn mode_of_empty_is_none() {
        assert_eq!(mode(&[]), None);
    }

    #[test]
    fn tracker_treats_signed_zeros_as_one_value() {
        let mut tracker = ModeTracker::default();
        tracker.observe(5.0);
        tracker.observe(-0.0);
        tracker.observe(0.0);
        assert_eq!(tracker.count(0.0), 2);
        // The value that pushed the count over the top is reported.
        assert!(tracker.mode().is_some_and(|m| m == 0.0 && m.is_sign_positive()));
        assert_eq!(
            tracker.frequencies().collect::<Vec<_>>(),
            vec![(5.0, 1), (0.0, 2)]
        );
    }

    #[test]
    fn strict_exceed_rule() {
        assert!(first_to_strictly_exceed(1, None));
        assert!(first_to_strictly_exceed(3, Some((1.0, 2))));
        assert!(!first_to_strictly_exceed(2, Some((1.0, 2))));
    }

    #[test]
    fn groups_follow_first_valid_occurrence() {
        let samples = [
            ("b", None),
            ("a", Some(1.0)),
            ("b", Some(2.0)),
            ("a", Some(f64::NAN)),
            ("c", Some(f64::INFINITY)),
        ];
        let groups = group_values(&samples, |s| Some(s.0.to_string()), |s| s.1);

        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(groups["a"], vec![1.0]);
        assert!(!groups.contains_key("c"));
    }

    #[test]
    fn records_without_label_are_skipped() {
        let samples = [(None, 1.0), (Some("x"), 2.0)];
        let rows = compute(&samples, |s| s.0.map(str::to_string), |s| Some(s.1));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "x");
    }

    #[test]
    fn empty_input_gives_no_rows() {
        let samples: [(&str, f64); 0] = [];
        assert!(compute(&samples, |s| Some(s.0.to_string()), |s| Some(s.1)).is_empty());
    }
}
