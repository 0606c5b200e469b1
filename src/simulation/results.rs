// src/simulation/results.rs
use crate::core::basis_labels;
use std::collections::BTreeMap;
use std::fmt;

/// Sampled measurement outcomes: basis label -> number of shots that landed there.
///
/// Labels are ordered lexicographically, which for fixed-width binary labels is
/// also basis-index order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeasurementCounts {
    counts: BTreeMap<String, u64>,
}

impl MeasurementCounts {
    /// Creates an empty count table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one shot to `label`.
    pub(crate) fn record(&mut self, label: String) {
        *self.counts.entry(label).or_insert(0) += 1;
    }

    /// Count for `label`; 0 when it was never observed.
    pub fn get(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Total number of shots recorded.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Labels observed at least once, in basis order.
    pub fn populated_labels(&self) -> Vec<&str> {
        self.counts.iter().filter(|(_, c)| **c > 0).map(|(l, _)| l.as_str()).collect()
    }

    /// Iterates `(label, count)` pairs of observed labels in basis order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(l, c)| (l.as_str(), *c))
    }

    /// Counts for every label of an `num_qubits` register, zeros included.
    pub fn dense(&self, num_qubits: usize) -> Vec<(String, u64)> {
        basis_labels(num_qubits)
            .into_iter()
            .map(|label| {
                let count = self.get(&label);
                (label, count)
            })
            .collect()
    }
}

impl FromIterator<(String, u64)> for MeasurementCounts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (label, count) in iter {
            *counts.entry(label).or_insert(0) += count;
        }
        Self { counts }
    }
}

impl fmt::Display for MeasurementCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement Counts ({} shots):", self.total())?;
        if self.counts.is_empty() {
            writeln!(f, "  No shots recorded.")?;
        }
        for (label, count) in &self.counts {
            writeln!(f, "  {}: {}", label, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_fills_missing_labels_with_zero() {
        let counts: MeasurementCounts = [("00".to_string(), 3), ("11".to_string(), 5)].into_iter().collect();
        assert_eq!(
            counts.dense(2),
            vec![
                ("00".to_string(), 3),
                ("01".to_string(), 0),
                ("10".to_string(), 0),
                ("11".to_string(), 5),
            ]
        );
        assert_eq!(counts.total(), 8);
        assert_eq!(counts.populated_labels(), vec!["00", "11"]);
    }

    #[test]
    fn record_accumulates() {
        let mut counts = MeasurementCounts::new();
        counts.record("01".to_string());
        counts.record("01".to_string());
        assert_eq!(counts.get("01"), 2);
        assert_eq!(counts.get("10"), 0);
    }
}
