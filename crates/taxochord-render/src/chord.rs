//! Matrix → angular chord geometry.
//!
//! [`DefaultChordLayout`] follows d3-chord (undirected): group spans are proportional to row
//! totals, `pad_angle` separates consecutive groups, and each ribbon end covers the share of its
//! group given by the matrix cell. Angles are radians clockwise from 12 o'clock.

use crate::{Error, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::f64::consts::TAU;
use taxochord_core::SimilarityMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordLayoutOptions {
    pub pad_angle: f64,
    pub sort_subgroups_descending: bool,
}

impl Default for ChordLayoutOptions {
    fn default() -> Self {
        Self {
            pad_angle: 0.05,
            sort_subgroups_descending: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordGroup {
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub value: f64,
}

impl ChordGroup {
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

/// One end of a ribbon: a sub-span of group `index`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordEnd {
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Chord {
    pub source: ChordEnd,
    pub target: ChordEnd,
}

impl Chord {
    pub fn touches(&self, group: usize) -> bool {
        self.source.index == group || self.target.index == group
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChordLayout {
    pub groups: Vec<ChordGroup>,
    pub ribbons: Vec<Chord>,
}

pub trait ChordLayoutProvider {
    fn layout(&self, matrix: &SimilarityMatrix, options: &ChordLayoutOptions)
    -> Result<ChordLayout>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultChordLayout;

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

impl ChordLayoutProvider for DefaultChordLayout {
    fn layout(
        &self,
        matrix: &SimilarityMatrix,
        options: &ChordLayoutOptions,
    ) -> Result<ChordLayout> {
        let n = matrix.len();
        if !(options.pad_angle.is_finite() && options.pad_angle >= 0.0) {
            return Err(Error::InvalidMatrix {
                message: format!("pad angle must be finite and >= 0, got {}", options.pad_angle),
            });
        }
        for i in 0..n {
            for (j, v) in matrix.row(i).iter().enumerate() {
                if !(v.is_finite() && *v >= 0.0) {
                    return Err(Error::InvalidMatrix {
                        message: format!("cell ({i}, {j}) must be finite and >= 0, got {v}"),
                    });
                }
            }
        }
        if n == 0 {
            return Ok(ChordLayout::default());
        }

        let group_sums: Vec<f64> = (0..n).map(|i| matrix.row_total(i)).collect();
        let total: f64 = group_sums.iter().sum();
        let available = (TAU - options.pad_angle * n as f64).max(0.0);
        let k = if total > 0.0 { available / total } else { 0.0 };
        // With nothing to draw d3 still pads groups apart as long as there is room for padding.
        let dx = if k > 0.0 || (total <= 0.0 && available > 0.0) {
            options.pad_angle
        } else {
            TAU / n as f64
        };

        // Slots indexed by `i * n + j` with `i <= j`, filled as each endpoint is visited.
        let mut slots: Vec<(Option<ChordEnd>, Option<ChordEnd>)> = vec![(None, None); n * n];
        let mut groups = Vec::with_capacity(n);
        let mut x = 0.0;
        for i in 0..n {
            let x0 = x;
            let mut subgroups: Vec<usize> = (0..n)
                .filter(|&j| matrix.get(i, j) != 0.0 || matrix.get(j, i) != 0.0)
                .collect();
            if options.sort_subgroups_descending {
                subgroups.sort_by(|&a, &b| descending(matrix.get(i, a), matrix.get(i, b)));
            }
            for j in subgroups {
                let value = matrix.get(i, j);
                let start = x;
                x += value * k;
                let end = ChordEnd {
                    index: i,
                    start_angle: start,
                    end_angle: x,
                    value,
                };
                if i < j {
                    slots[i * n + j].0 = Some(end);
                } else {
                    let slot = &mut slots[j * n + i];
                    slot.1 = Some(end);
                    if i == j {
                        slot.0 = Some(end);
                    }
                }
            }
            groups.push(ChordGroup {
                index: i,
                start_angle: x0,
                end_angle: x,
                value: group_sums[i],
            });
            x += dx;
        }

        let ribbons = slots
            .into_iter()
            .filter_map(|(source, target)| {
                Some(Chord {
                    source: source?,
                    target: target?,
                })
            })
            .collect();

        Ok(ChordLayout { groups, ribbons })
    }
}
