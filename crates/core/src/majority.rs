//! Per-instance majority-vote label aggregation.
//!
//! Clustered detections arrive with one label observation per member;
//! the cluster (instance) takes the label observed most often.

use std::collections::BTreeMap;

/// Majority label per instance over `(instance, label)` observations.
///
/// Ties are broken toward the lexicographically smallest label so the
/// result is deterministic regardless of observation order.  Instances
/// with no observations simply do not appear.
pub fn majority_labels<'a, I>(observations: I) -> BTreeMap<i64, String>
where
    I: IntoIterator<Item = (i64, &'a str)>,
{
    let mut counts: BTreeMap<i64, BTreeMap<&str, usize>> = BTreeMap::new();
    for (instance, label) in observations {
        *counts.entry(instance).or_default().entry(label).or_default() += 1;
    }

    counts
        .into_iter()
        .filter_map(|(instance, labels)| {
            labels
                .into_iter()
                .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(a.0)))
                .map(|(label, _)| (instance, label.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_most_frequent_label() {
        let result = majority_labels([
            (1, "X"),
            (1, "X"),
            (1, "Y"),
            (2, "Y"),
            (2, "Z"),
            (2, "Z"),
        ]);
        assert_eq!(result[&1], "X");
        assert_eq!(result[&2], "Z");
    }

    #[test]
    fn tie_breaks_to_smallest_label() {
        let result = majority_labels([(1, "Y"), (1, "X")]);
        assert_eq!(result[&1], "X");
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(majority_labels([]).is_empty());
    }

    #[test]
    fn single_observation() {
        let result = majority_labels([(7, "Kelp")]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[&7], "Kelp");
    }
}
