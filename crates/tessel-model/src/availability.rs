//! Gate placement resolution.
//!
//! Expands a gate's placement policy into the concrete ordered list of qubit
//! tuples it will be embedded at. Resolution is deterministic: identical
//! inputs always produce identical placement lists, and the resolved list is
//! frozen into the built model's metadata.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::labels::{QubitLabel, QubitTuple};
use crate::topology::Topology;

/// Where a gate may be placed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AvailabilityPolicy {
    /// Width 1: every qubit. Width 2: every topology edge, both orientations
    /// for undirected topologies. Width ≥ 3 is rejected.
    #[default]
    AllEdges,
    /// Every width-w subset of the qubit labels, in lexicographic order of
    /// label positions. For gates symmetric under qubit-order swap.
    AllCombinations,
    /// Every ordered arrangement of w distinct qubit labels. For
    /// order-sensitive gates (control vs target).
    AllPermutations,
    /// An explicit ordered placement list, used verbatim.
    Explicit(Vec<QubitTuple>),
}

/// Resolve a gate's placement policy into concrete qubit tuples.
pub fn resolve(
    gate: &str,
    width: usize,
    policy: &AvailabilityPolicy,
    labels: &[QubitLabel],
    topology: &Topology,
) -> ModelResult<Vec<QubitTuple>> {
    match policy {
        AvailabilityPolicy::Explicit(tuples) => {
            for t in tuples {
                if t.len() != width {
                    return Err(ModelError::PlacementWidthMismatch {
                        gate: gate.to_string(),
                        expected: width,
                        got: t.len(),
                    });
                }
                for q in t.labels() {
                    if !labels.contains(q) {
                        return Err(ModelError::UnknownPlacementLabel {
                            gate: gate.to_string(),
                            label: q.to_string(),
                        });
                    }
                }
            }
            Ok(tuples.clone())
        }
        AvailabilityPolicy::AllCombinations => Ok(combinations(labels, width)),
        AvailabilityPolicy::AllPermutations => Ok(permutations(labels, width)),
        AvailabilityPolicy::AllEdges => match width {
            1 => Ok(labels
                .iter()
                .map(|q| QubitTuple(vec![q.clone()]))
                .collect()),
            2 => Ok(topology
                .edges(true)
                .into_iter()
                .map(|(a, b)| QubitTuple(vec![a, b]))
                .collect()),
            w => Err(ModelError::UnsupportedPlacementWidth {
                gate: gate.to_string(),
                width: w,
            }),
        },
    }
}

/// All width-w subsets, lexicographic on label positions.
fn combinations(labels: &[QubitLabel], width: usize) -> Vec<QubitTuple> {
    let n = labels.len();
    if width > n {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut idx: Vec<usize> = (0..width).collect();
    loop {
        out.push(QubitTuple(idx.iter().map(|&i| labels[i].clone()).collect()));
        // Advance the rightmost index that can still move.
        let mut k = width;
        loop {
            if k == 0 {
                return out;
            }
            k -= 1;
            if idx[k] + 1 <= n - (width - k) {
                idx[k] += 1;
                for j in (k + 1)..width {
                    idx[j] = idx[j - 1] + 1;
                }
                break;
            }
        }
    }
}

/// All ordered arrangements of w distinct labels, lexicographic on index
/// sequences.
fn permutations(labels: &[QubitLabel], width: usize) -> Vec<QubitTuple> {
    let n = labels.len();
    if width > n {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut current = Vec::with_capacity(width);
    let mut used = vec![false; n];
    fn rec(
        labels: &[QubitLabel],
        width: usize,
        used: &mut Vec<bool>,
        current: &mut Vec<usize>,
        out: &mut Vec<QubitTuple>,
    ) {
        if current.len() == width {
            out.push(QubitTuple(
                current.iter().map(|&i| labels[i].clone()).collect(),
            ));
            return;
        }
        for i in 0..labels.len() {
            if !used[i] {
                used[i] = true;
                current.push(i);
                rec(labels, width, used, current, out);
                current.pop();
                used[i] = false;
            }
        }
    }
    rec(labels, width, &mut used, &mut current, &mut out);
    out
}
