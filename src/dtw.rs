//! Dynamic time warping over numeric sequences.
//!
//! Computes the cumulative alignment cost between two sequences under the
//! classic recurrence
//!
//! ```text
//! D[i][j] = |a[i-1] - b[j-1]| + min(D[i-1][j] + penalty,   // insertion
//!                                   D[i][j-1] + penalty,   // deletion
//!                                   D[i-1][j-1])           // match
//! ```
//!
//! with an optional Sakoe–Chiba band and slope penalty. Three memory modes
//! trade footprint against path recovery: a single rolling row, two rows, or
//! the full (N+1)×(M+1) table (required for [`DtwOptions::return_path`]).

use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Backtrack tolerance when matching a cell against its predecessors.
const EPSILON: f64 = 1e-9;

/// How much state the aligner keeps while filling the cost table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryMode {
    /// One rolling row: cost only.
    None,
    /// Current and previous row: cost only.
    #[default]
    TwoRows,
    /// The whole cost table: enables path recovery.
    FullMatrix,
}

/// Options for [`dtw`].
#[derive(Debug, Clone)]
pub struct DtwOptions {
    /// Memory regime; see [`MemoryMode`].
    pub memory: MemoryMode,
    /// Sakoe–Chiba band half-width. `None` leaves the alignment
    /// unconstrained; `Some(0)` forces the pure diagonal.
    pub window: Option<usize>,
    /// Non-negative cost added to insertion and deletion steps.
    pub slope_penalty: f64,
    /// Recover the warping path. Requires [`MemoryMode::FullMatrix`].
    pub return_path: bool,
}

impl Default for DtwOptions {
    fn default() -> Self {
        DtwOptions {
            memory: MemoryMode::default(),
            window: None,
            slope_penalty: 0.0,
            return_path: false,
        }
    }
}

impl DtwOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn memory(mut self, memory: MemoryMode) -> Self {
        self.memory = memory;
        self
    }

    pub fn window(mut self, half_width: usize) -> Self {
        self.window = Some(half_width);
        self
    }

    pub fn slope_penalty(mut self, penalty: f64) -> Self {
        self.slope_penalty = penalty;
        self
    }

    pub fn return_path(mut self) -> Self {
        self.return_path = true;
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.slope_penalty >= 0.0 && self.slope_penalty.is_finite()) {
            return Err(Error::OptionViolation(format!(
                "slope penalty must be a non-negative finite number, got {}",
                self.slope_penalty
            )));
        }
        if self.return_path && self.memory != MemoryMode::FullMatrix {
            return Err(Error::OptionViolation(
                "path recovery requires the full-matrix memory mode".into(),
            ));
        }
        Ok(())
    }
}

/// Result of [`dtw`]: the cumulative cost (possibly `+∞` when a window makes
/// alignment infeasible), the warping path when requested, and the filled
/// cost table under [`MemoryMode::FullMatrix`].
#[derive(Debug, Clone)]
pub struct DtwOutput {
    pub distance: f64,
    /// Index pairs from `(0, 0)` to `(n-1, m-1)`, present iff
    /// [`DtwOptions::return_path`] was set.
    pub path: Option<Vec<(usize, usize)>>,
    /// The (N+1)×(M+1) cumulative cost table, present under
    /// [`MemoryMode::FullMatrix`].
    pub matrix: Option<Matrix>,
}

/// Align two sequences and return their cumulative warping cost.
///
/// # Complexity
/// * Time: **O(N · M)** (a window prunes cells but not the scan).
/// * Auxiliary space: **O(N · M)** under [`MemoryMode::FullMatrix`],
///   **O(M)** under [`MemoryMode::TwoRows`], **O(1)** beyond one row under
///   [`MemoryMode::None`].
///
/// # Example
/// ```
/// use graphwerk::dtw::{dtw, DtwOptions, MemoryMode};
///
/// let a = [1.0, 2.0, 3.0];
/// let b = [1.0, 2.0, 2.0, 3.0];
/// let opts = DtwOptions::new().memory(MemoryMode::FullMatrix).return_path();
/// let out = dtw(&a, &b, &opts).unwrap();
/// assert_eq!(out.distance, 0.0);
/// assert_eq!(out.path.unwrap().len(), 4);
/// ```
pub fn dtw(a: &[f64], b: &[f64], opts: &DtwOptions) -> Result<DtwOutput> {
    if a.is_empty() {
        return Err(Error::EmptyInput("first sequence"));
    }
    if b.is_empty() {
        return Err(Error::EmptyInput("second sequence"));
    }
    opts.validate()?;

    tracing::trace!(
        n = a.len(),
        m = b.len(),
        mode = ?opts.memory,
        "aligning sequences"
    );
    match opts.memory {
        MemoryMode::FullMatrix => full_matrix(a, b, opts),
        MemoryMode::TwoRows => Ok(DtwOutput {
            distance: two_rows(a, b, opts),
            path: None,
            matrix: None,
        }),
        MemoryMode::None => Ok(DtwOutput {
            distance: rolling_row(a, b, opts),
            path: None,
            matrix: None,
        }),
    }
}

fn in_band(i: usize, j: usize, window: Option<usize>) -> bool {
    window.map_or(true, |w| i.abs_diff(j) <= w)
}

fn full_matrix(a: &[f64], b: &[f64], opts: &DtwOptions) -> Result<DtwOutput> {
    let (n, m) = (a.len(), b.len());
    let penalty = opts.slope_penalty;
    let mut d = Matrix::filled(n + 1, m + 1, f64::INFINITY);
    d[(0, 0)] = 0.0;

    for i in 1..=n {
        for j in 1..=m {
            if !in_band(i, j, opts.window) {
                continue;
            }
            let cost = (a[i - 1] - b[j - 1]).abs();
            let best = (d[(i - 1, j)] + penalty)
                .min(d[(i, j - 1)] + penalty)
                .min(d[(i - 1, j - 1)]);
            d[(i, j)] = cost + best;
        }
    }

    let distance = d[(n, m)];
    let path = if opts.return_path {
        Some(backtrack(a, b, &d, penalty)?)
    } else {
        None
    };
    Ok(DtwOutput {
        distance,
        path,
        matrix: Some(d),
    })
}

/// Walk backward from `(n, m)` to the origin, choosing at each cell the
/// predecessor whose stored value explains it: match first, then insertion,
/// then deletion, within [`EPSILON`].
fn backtrack(a: &[f64], b: &[f64], d: &Matrix, penalty: f64) -> Result<Vec<(usize, usize)>> {
    let (mut i, mut j) = (a.len(), b.len());
    if !d[(i, j)].is_finite() {
        return Err(Error::IncompletePath { row: i, col: j });
    }
    let mut path = Vec::with_capacity(i.max(j));
    loop {
        path.push((i - 1, j - 1));
        if i == 1 && j == 1 {
            break;
        }
        let cost = (a[i - 1] - b[j - 1]).abs();
        let base = d[(i, j)] - cost;
        if i > 1 && j > 1 && (d[(i - 1, j - 1)] - base).abs() <= EPSILON {
            i -= 1;
            j -= 1;
        } else if i > 1 && (d[(i - 1, j)] + penalty - base).abs() <= EPSILON {
            i -= 1;
        } else if j > 1 && (d[(i, j - 1)] + penalty - base).abs() <= EPSILON {
            j -= 1;
        } else {
            return Err(Error::IncompletePath { row: i, col: j });
        }
    }
    path.reverse();
    Ok(path)
}

fn two_rows(a: &[f64], b: &[f64], opts: &DtwOptions) -> f64 {
    let (n, m) = (a.len(), b.len());
    let penalty = opts.slope_penalty;
    let mut prev = vec![f64::INFINITY; m + 1];
    let mut cur = vec![f64::INFINITY; m + 1];
    prev[0] = 0.0;

    for i in 1..=n {
        cur.fill(f64::INFINITY);
        for j in 1..=m {
            if !in_band(i, j, opts.window) {
                continue;
            }
            let cost = (a[i - 1] - b[j - 1]).abs();
            let best = (prev[j] + penalty)
                .min(cur[j - 1] + penalty)
                .min(prev[j - 1]);
            cur[j] = cost + best;
        }
        core::mem::swap(&mut prev, &mut cur);
    }
    prev[m]
}

/// One rolling row with a diagonal carry: constant extra memory beyond the
/// row itself.
fn rolling_row(a: &[f64], b: &[f64], opts: &DtwOptions) -> f64 {
    let (n, m) = (a.len(), b.len());
    let penalty = opts.slope_penalty;
    let mut row = vec![f64::INFINITY; m + 1];
    row[0] = 0.0;

    for i in 1..=n {
        // row currently holds D[i-1][..]; rewrite it in place into D[i][..]
        let mut diagonal = row[0];
        row[0] = f64::INFINITY;
        for j in 1..=m {
            let above = row[j];
            if in_band(i, j, opts.window) {
                let cost = (a[i - 1] - b[j - 1]).abs();
                let best = (above + penalty).min(row[j - 1] + penalty).min(diagonal);
                row[j] = cost + best;
            } else {
                row[j] = f64::INFINITY;
            }
            diagonal = above;
        }
    }
    row[m]
}
