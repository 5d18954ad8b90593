//! Measurement samples and histograms.

use ndarray::{Array2, ArrayView1, Axis};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{DeviceError, DeviceResult};

/// Per-shot, per-wire measurement outcomes.
///
/// Laid out as a `(shot, wire)` matrix of 0/1 values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Samples {
    bits: Array2<u8>,
}

impl Samples {
    /// Unpack raw integer outcomes into one bit per wire.
    ///
    /// Wire `w` of a shot is bit `w` of the raw value, least significant
    /// first, so `5` on three wires unpacks to `[1, 0, 1]`.
    pub fn from_raw(raw: &[u64], num_wires: usize) -> DeviceResult<Self> {
        if num_wires < 64 {
            if let Some(&sample) = raw.iter().find(|&&s| s >> num_wires != 0) {
                return Err(DeviceError::InvalidSample { sample, num_wires });
            }
        }

        let bits = Array2::from_shape_fn((raw.len(), num_wires), |(shot, wire)| {
            let shift = u32::try_from(wire).unwrap_or(u32::MAX);
            (raw[shot].checked_shr(shift).unwrap_or(0) & 1) as u8
        });
        Ok(Self { bits })
    }

    /// The `(shot, wire)` bit matrix.
    pub fn bits(&self) -> &Array2<u8> {
        &self.bits
    }

    /// Number of shots.
    pub fn num_shots(&self) -> usize {
        self.bits.nrows()
    }

    /// Number of wires.
    pub fn num_wires(&self) -> usize {
        self.bits.ncols()
    }

    /// Outcomes of a single shot, one entry per wire.
    pub fn shot(&self, index: usize) -> Option<ArrayView1<'_, u8>> {
        (index < self.num_shots()).then(|| self.bits.row(index))
    }

    /// Estimate `<Z>` on a wire from the samples (`+1` for 0, `-1` for 1).
    pub fn expval_z(&self, wire: usize) -> Option<f64> {
        if wire >= self.num_wires() || self.num_shots() == 0 {
            return None;
        }
        let ones = self
            .bits
            .index_axis(Axis(1), wire)
            .iter()
            .filter(|&&b| b == 1)
            .count();
        let shots = self.num_shots() as f64;
        Some((shots - 2.0 * ones as f64) / shots)
    }

    /// Aggregate shots into a bitstring histogram (wire 0 first).
    pub fn counts(&self) -> Counts {
        let mut counts = Counts::new();
        for row in self.bits.rows() {
            let bitstring: String = row
                .iter()
                .map(|&b| if b != 0 { '1' } else { '0' })
                .collect();
            counts.insert(bitstring, 1);
        }
        counts
    }
}

/// Histogram of measured bitstrings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Occurrences of `bitstring`.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of recorded shots.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no outcome has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Outcomes sorted by descending count, ties broken by bitstring.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut entries: Vec<_> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The most frequent outcome.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.sorted().into_iter().next()
    }
}
