//! Active-boundary tracking across a sweep.
//!
//! At every x the finite curve values are sorted and each adjacent pair is a
//! candidate boundary. The tracker follows one ordered pair of curves from
//! step to step so crossings elsewhere do not make the boundary jump.
//! Simultaneous crossings of three or more curves at one x have no
//! principled tie-break; candidates are then compared in ascending-y order
//! and the first best one wins.

/// Two curve indices bounding the region, lower first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryPair {
    pub lower: usize,
    pub upper: usize,
}

impl BoundaryPair {
    /// Returns `true` if the pairs have at least one curve in common.
    #[must_use]
    pub fn shares_curve_with(&self, other: &BoundaryPair) -> bool {
        self.lower == other.lower
            || self.lower == other.upper
            || self.upper == other.lower
            || self.upper == other.upper
    }
}

/// A candidate boundary at one x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub pair: BoundaryPair,
    pub lower_y: f64,
    pub upper_y: f64,
}

impl Candidate {
    #[must_use]
    pub fn height(&self) -> f64 {
        self.upper_y - self.lower_y
    }
}

/// Follows the active boundary pair through a left-to-right sweep.
#[derive(Debug, Default)]
pub struct BoundaryTracker {
    active: Option<(BoundaryPair, f64)>,
}

impl BoundaryTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The pair chosen at the latest valid step.
    #[must_use]
    pub fn active(&self) -> Option<BoundaryPair> {
        self.active.map(|(pair, _)| pair)
    }

    /// Processes the `(curve index, y)` values of one step.
    ///
    /// Returns `None` (leaving the active pair untouched) when fewer than two
    /// values are finite.
    pub fn step(&mut self, values: &[(usize, f64)]) -> Option<Candidate> {
        let candidates = candidates(values);
        let chosen = match self.active {
            None => widest(&candidates)?,
            Some((pair, height)) => candidates
                .iter()
                .find(|c| c.pair == pair)
                .copied()
                .or_else(|| {
                    closest_height(
                        candidates.iter().filter(|c| c.pair.shares_curve_with(&pair)),
                        height,
                    )
                })
                .or_else(|| closest_height(candidates.iter(), height))?,
        };
        self.active = Some((chosen.pair, chosen.height()));
        Some(chosen)
    }
}

/// Adjacent pairs of the finite values sorted by ascending y.
///
/// The sort is stable, so equal values keep their curve order.
#[must_use]
pub fn candidates(values: &[(usize, f64)]) -> Vec<Candidate> {
    let mut finite: Vec<(usize, f64)> = values
        .iter()
        .copied()
        .filter(|(_, y)| y.is_finite())
        .collect();
    finite.sort_by(|a, b| a.1.total_cmp(&b.1));
    finite
        .windows(2)
        .map(|w| Candidate {
            pair: BoundaryPair {
                lower: w[0].0,
                upper: w[1].0,
            },
            lower_y: w[0].1,
            upper_y: w[1].1,
        })
        .collect()
}

fn widest(candidates: &[Candidate]) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for c in candidates {
        if best.is_none_or(|b| c.height() > b.height()) {
            best = Some(*c);
        }
    }
    best
}

fn closest_height<'a>(
    candidates: impl Iterator<Item = &'a Candidate>,
    target: f64,
) -> Option<Candidate> {
    let mut best: Option<(Candidate, f64)> = None;
    for c in candidates {
        let distance = (c.height() - target).abs();
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((*c, distance));
        }
    }
    best.map(|(c, _)| c)
}
