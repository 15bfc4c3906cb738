//! Deterministic synthetic sequence builders: pulse envelopes, linear
//! chirps, and OHLC walks.
//!
//! All three resolve the shared [`BuildOptions`](super::BuildOptions) and
//! take their random source from the config when one is seeded there,
//! falling back to a local source seeded from the `seed` argument. A size of
//! zero yields no data.

use core::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{BuildOptions, PulseShape};
use crate::error::Result;

/// One standard-normal draw via the Box–Muller transform.
fn gaussian(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// A rectangular or triangular pulse of `n` samples with optional linear
/// trend and Gaussian noise.
///
/// The rectangular envelope occupies the central half of the window; the
/// triangular envelope ramps linearly up to the configured amplitude at the
/// midpoint and back down.
pub fn pulse(n: usize, seed: u64, options: &BuildOptions) -> Result<Vec<f64>> {
    let mut cfg = options.clone().resolve()?;
    if n == 0 {
        return Ok(Vec::new());
    }
    let mut rng = cfg
        .rng
        .take()
        .unwrap_or_else(|| StdRng::seed_from_u64(seed));

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let envelope = match cfg.pulse_shape {
            PulseShape::Rectangular => {
                if i >= n / 4 && i < 3 * n / 4 {
                    cfg.amplitude
                } else {
                    0.0
                }
            }
            PulseShape::Triangular => {
                if n == 1 {
                    cfg.amplitude
                } else {
                    let mid = (n - 1) as f64 / 2.0;
                    cfg.amplitude * (1.0 - (i as f64 - mid).abs() / mid)
                }
            }
        };
        let noise = if cfg.noise_sigma > 0.0 {
            cfg.noise_sigma * gaussian(&mut rng)
        } else {
            0.0
        };
        out.push(envelope + cfg.trend * i as f64 + noise);
    }
    Ok(out)
}

/// A linear chirp of `n` samples sweeping from the configured base frequency
/// to the sweep target (both in cycles per window), with optional trend and
/// noise. The phase accumulates sample by sample, so the sweep is continuous.
pub fn chirp(n: usize, seed: u64, options: &BuildOptions) -> Result<Vec<f64>> {
    let mut cfg = options.clone().resolve()?;
    if n == 0 {
        return Ok(Vec::new());
    }
    let mut rng = cfg
        .rng
        .take()
        .unwrap_or_else(|| StdRng::seed_from_u64(seed));
    let f0 = cfg.frequency;
    let f1 = cfg.sweep_to.unwrap_or(f0);

    let mut out = Vec::with_capacity(n);
    let mut phase = 0.0f64;
    for i in 0..n {
        let progress = i as f64 / n as f64;
        let instantaneous = f0 + (f1 - f0) * progress;
        phase += TAU * instantaneous / n as f64;
        let noise = if cfg.noise_sigma > 0.0 {
            cfg.noise_sigma * gaussian(&mut rng)
        } else {
            0.0
        };
        out.push(cfg.amplitude * phase.sin() + cfg.trend * i as f64 + noise);
    }
    Ok(out)
}

/// Intraday steps simulated per OHLC day.
const INTRADAY_STEPS: usize = 24;

/// Price the walk opens at on day zero.
const OPENING_PRICE: f64 = 100.0;

/// Daily open/high/low/close series produced by [`ohlc`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OhlcSeries {
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

impl OhlcSeries {
    pub fn days(&self) -> usize {
        self.open.len()
    }

    /// The `(open, high, low, close)` tuple for one day.
    pub fn day(&self, index: usize) -> Option<(f64, f64, f64, f64)> {
        (index < self.days()).then(|| {
            (
                self.open[index],
                self.high[index],
                self.low[index],
                self.close[index],
            )
        })
    }
}

/// A geometric-Brownian-motion-like discrete walk: each day runs a fixed
/// number of intraday steps whose relative increments are driven by the
/// configured trend (drift) and noise sigma (volatility). Every day satisfies
/// `low ≤ min(open, close) ≤ max(open, close) ≤ high`.
pub fn ohlc(days: usize, seed: u64, options: &BuildOptions) -> Result<OhlcSeries> {
    let mut cfg = options.clone().resolve()?;
    let mut series = OhlcSeries::default();
    if days == 0 {
        return Ok(series);
    }
    let mut rng = cfg
        .rng
        .take()
        .unwrap_or_else(|| StdRng::seed_from_u64(seed));

    let mut price = OPENING_PRICE;
    for _ in 0..days {
        let open = price;
        let mut high = open;
        let mut low = open;
        for _ in 0..INTRADAY_STEPS {
            let shock = cfg.noise_sigma * gaussian(&mut rng);
            // floor the multiplicative step so the price stays positive
            let factor = (1.0 + cfg.trend + shock).max(0.01);
            price *= factor;
            high = high.max(price);
            low = low.min(price);
        }
        series.open.push(open);
        series.high.push(high);
        series.low.push(low);
        series.close.push(price);
    }
    Ok(series)
}
