//! Deterministic synthetic-data builders.
//!
//! [`compose`] produces a graph by applying an ordered chain of
//! [`Constructor`]s against a configuration resolved once from
//! [`BuildOptions`]. With a fixed seed the emission order, vertex counts,
//! and edge counts are identical across runs. The sibling sequence builders
//! ([`pulse`], [`chirp`], [`ohlc`]) share the same option set.
//!
//! Options are chainable setters validated eagerly; the first invalid value
//! is remembered and surfaced as an `OptionViolation` when the options are
//! resolved at an entry point.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Graph, Mode};

mod glyph;
mod glyph_data;
mod sequence;
mod topology;

pub use glyph::SCOPE_SEPARATOR;
pub use sequence::{chirp, ohlc, pulse, OhlcSeries};

/// Hub vertex identifier used by star, wheel, and centred-solid emitters.
/// Part of the public contract.
pub const CENTER: &str = "Center";

/// The five platonic solids known to [`Constructor::Platonic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatonicSolid {
    Tetrahedron,
    Cube,
    Octahedron,
    Dodecahedron,
    Icosahedron,
}

/// The base layer a hexagram's chords are drawn over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexagramBase {
    /// Six-cycle plus the two overlaid triangles.
    Cycle,
    /// Seven-vertex wheel (hubbed six-cycle) plus the triangles.
    Wheel,
}

/// Envelope shape used by [`pulse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PulseShape {
    #[default]
    Rectangular,
    Triangular,
}

type Namer = Arc<dyn Fn(usize) -> String + Send + Sync>;
type WeightGen = Arc<dyn Fn(&mut StdRng) -> i64 + Send + Sync>;

/// Chainable builder options.
///
/// ```
/// use graphwerk::build::{compose, BuildOptions, Constructor};
/// use graphwerk::graph::Mode;
///
/// let g = compose(
///     Mode::WEIGHTED,
///     BuildOptions::new().seed(7),
///     &[Constructor::Cycle(5)],
/// )
/// .unwrap();
/// assert_eq!(g.vertex_count(), 5);
/// assert_eq!(g.edge_count(), 5);
/// ```
#[derive(Clone)]
pub struct BuildOptions {
    namer: Namer,
    seed: Option<u64>,
    weight_gen: Option<WeightGen>,
    left_prefix: String,
    right_prefix: String,
    amplitude: f64,
    frequency: f64,
    sweep_to: Option<f64>,
    trend: f64,
    noise_sigma: f64,
    pulse_shape: PulseShape,
    err: Option<String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            namer: Arc::new(|i| format!("v{i}")),
            seed: None,
            weight_gen: None,
            left_prefix: "L".to_owned(),
            right_prefix: "R".to_owned(),
            amplitude: 1.0,
            frequency: 1.0,
            sweep_to: None,
            trend: 0.0,
            noise_sigma: 0.0,
            pulse_shape: PulseShape::default(),
            err: None,
        }
    }
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(mut self, message: impl Into<String>) -> Self {
        if self.err.is_none() {
            self.err = Some(message.into());
        }
        self
    }

    /// Replace the vertex-identifier generator (index → identifier).
    pub fn vertex_namer(mut self, namer: impl Fn(usize) -> String + Send + Sync + 'static) -> Self {
        self.namer = Arc::new(namer);
        self
    }

    /// Seed the composition's random source. One seed per composition is the
    /// reproducibility contract.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the edge-weight generator. Requires a seed.
    pub fn weight_generator(
        mut self,
        generator: impl Fn(&mut StdRng) -> i64 + Send + Sync + 'static,
    ) -> Self {
        self.weight_gen = Some(Arc::new(generator));
        self
    }

    /// Identifier prefixes for the two sides of a complete bipartite graph.
    pub fn bipartite_prefixes(mut self, left: &str, right: &str) -> Self {
        if left.is_empty() || right.is_empty() {
            return self.fail("bipartite prefixes must be non-empty");
        }
        self.left_prefix = left.to_owned();
        self.right_prefix = right.to_owned();
        self
    }

    pub fn amplitude(mut self, amplitude: f64) -> Self {
        if !(amplitude > 0.0 && amplitude.is_finite()) {
            return self.fail(format!("amplitude must be positive, got {amplitude}"));
        }
        self.amplitude = amplitude;
        self
    }

    /// Base frequency in cycles per window.
    pub fn frequency(mut self, frequency: f64) -> Self {
        if !(frequency > 0.0 && frequency.is_finite()) {
            return self.fail(format!("frequency must be positive, got {frequency}"));
        }
        self.frequency = frequency;
        self
    }

    /// Target frequency a chirp sweeps to; defaults to the base frequency.
    pub fn sweep_to(mut self, frequency: f64) -> Self {
        if !(frequency > 0.0 && frequency.is_finite()) {
            return self.fail(format!("sweep target must be positive, got {frequency}"));
        }
        self.sweep_to = Some(frequency);
        self
    }

    /// Linear trend slope added per sample.
    pub fn trend(mut self, slope: f64) -> Self {
        if !slope.is_finite() {
            return self.fail(format!("trend slope must be finite, got {slope}"));
        }
        self.trend = slope;
        self
    }

    /// Gaussian noise standard deviation (also the OHLC volatility).
    pub fn noise_sigma(mut self, sigma: f64) -> Self {
        if !(sigma >= 0.0 && sigma.is_finite()) {
            return self.fail(format!(
                "noise standard deviation must be non-negative, got {sigma}"
            ));
        }
        self.noise_sigma = sigma;
        self
    }

    pub fn pulse_shape(mut self, shape: PulseShape) -> Self {
        self.pulse_shape = shape;
        self
    }

    pub(crate) fn resolve(self) -> Result<Config> {
        if let Some(message) = self.err {
            return Err(Error::OptionViolation(message));
        }
        if self.weight_gen.is_some() && self.seed.is_none() {
            return Err(Error::OptionViolation(
                "a custom weight generator requires a seeded random source".into(),
            ));
        }
        Ok(Config {
            namer: self.namer,
            rng: self.seed.map(StdRng::seed_from_u64),
            weight_gen: self
                .weight_gen
                .unwrap_or_else(|| Arc::new(|rng: &mut StdRng| rng.gen_range(1..=100))),
            left_prefix: self.left_prefix,
            right_prefix: self.right_prefix,
            amplitude: self.amplitude,
            frequency: self.frequency,
            sweep_to: self.sweep_to,
            trend: self.trend,
            noise_sigma: self.noise_sigma,
            pulse_shape: self.pulse_shape,
        })
    }
}

/// Options resolved into an immutable configuration (the random source being
/// the one mutable part, threaded by `&mut`).
pub(crate) struct Config {
    namer: Namer,
    pub(crate) rng: Option<StdRng>,
    weight_gen: WeightGen,
    pub(crate) left_prefix: String,
    pub(crate) right_prefix: String,
    pub(crate) amplitude: f64,
    pub(crate) frequency: f64,
    pub(crate) sweep_to: Option<f64>,
    pub(crate) trend: f64,
    pub(crate) noise_sigma: f64,
    pub(crate) pulse_shape: PulseShape,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("rng", &self.rng)
            .field("left_prefix", &self.left_prefix)
            .field("right_prefix", &self.right_prefix)
            .field("amplitude", &self.amplitude)
            .field("frequency", &self.frequency)
            .field("sweep_to", &self.sweep_to)
            .field("trend", &self.trend)
            .field("noise_sigma", &self.noise_sigma)
            .field("pulse_shape", &self.pulse_shape)
            .finish()
    }
}

impl Config {
    pub(crate) fn name(&self, index: usize) -> String {
        (self.namer)(index)
    }

    /// One weight draw. Constant 1 when no random source is configured, so
    /// unseeded weighted compositions stay deterministic.
    pub(crate) fn draw_weight(&mut self) -> i64 {
        match self.rng.as_mut() {
            Some(rng) => (self.weight_gen)(rng),
            None => 1,
        }
    }
}

/// Emit one semantically undirected connection: a single edge on an
/// undirected graph, both directions with the same weight draw on a directed
/// one. Re-emitting an existing connection is a no-op (outside multigraph
/// mode), keeping composition idempotent.
pub(crate) fn connect(graph: &Graph, cfg: &mut Config, from: &str, to: &str) -> Result<()> {
    if !graph.mode().contains(Mode::MULTI) && graph.has_edge(from, to) {
        return Ok(());
    }
    let weight = if graph.is_weighted() {
        cfg.draw_weight()
    } else {
        0
    };
    graph.add_edge(from, to, weight)?;
    if graph.is_directed() {
        graph.add_edge(to, from, weight)?;
    }
    Ok(())
}

/// The constructor catalogue. Each variant emits its vertices and edges in a
/// fixed, documented order.
#[derive(Debug, Clone, PartialEq)]
pub enum Constructor {
    /// Ring of `n ≥ 3` vertices.
    Cycle(usize),
    /// Chain of `n ≥ 2` vertices.
    Path(usize),
    /// Hub-and-spokes over `n ≥ 2` total vertices; the hub is [`CENTER`].
    Star(usize),
    /// Ring of `n − 1` vertices plus a hub; `n ≥ 4`.
    Wheel(usize),
    /// Clique over `n ≥ 1` vertices.
    Complete(usize),
    /// All edges between a left side of `n1 ≥ 1` and a right side of
    /// `n2 ≥ 1` vertices, identified by the configured prefixes.
    CompleteBipartite(usize, usize),
    /// `rows × cols` lattice with 4-neighbourhood, identifiers `"r,c"`.
    Grid { rows: usize, cols: usize },
    /// Independent Bernoulli trial with probability `p` over every
    /// unordered vertex pair. Interior `p` requires a seed.
    RandomSparse { n: usize, p: f64 },
    /// `d`-regular graph over `n` vertices by stub matching with bounded
    /// retries. Undirected graphs only; `n · d` must be even.
    RandomRegular { n: usize, d: usize },
    /// Canonical edge set of one of the five platonic solids, optionally
    /// with a [`CENTER`] hub connected to every vertex.
    Platonic {
        solid: PlatonicSolid,
        with_centre: bool,
    },
    /// Two overlaid triangles over a six-cycle or a wheel.
    Hexagram(HexagramBase),
    /// One letter glyph with canonical vertex identifiers.
    Letter(char),
    /// A word of letter glyphs; a non-empty scope namespaces every glyph by
    /// position, an empty scope requires all glyphs to be distinct.
    Word { text: String, scope: String },
    /// One digit glyph with canonical vertex identifiers.
    Digit(char),
    /// A run of digit glyphs; scoping as for [`Constructor::Word`].
    Number { text: String, scope: String },
}

impl Constructor {
    /// Short tag used for error wrapping and trace events.
    pub fn name(&self) -> &'static str {
        match self {
            Constructor::Cycle(_) => "Cycle",
            Constructor::Path(_) => "Path",
            Constructor::Star(_) => "Star",
            Constructor::Wheel(_) => "Wheel",
            Constructor::Complete(_) => "Complete",
            Constructor::CompleteBipartite(..) => "CompleteBipartite",
            Constructor::Grid { .. } => "Grid",
            Constructor::RandomSparse { .. } => "RandomSparse",
            Constructor::RandomRegular { .. } => "RandomRegular",
            Constructor::Platonic { .. } => "Platonic",
            Constructor::Hexagram(_) => "Hexagram",
            Constructor::Letter(_) => "Letter",
            Constructor::Word { .. } => "Word",
            Constructor::Digit(_) => "Digit",
            Constructor::Number { .. } => "Number",
        }
    }

    fn apply(&self, graph: &Graph, cfg: &mut Config) -> Result<()> {
        match self {
            Constructor::Cycle(n) => topology::cycle(graph, cfg, *n),
            Constructor::Path(n) => topology::path(graph, cfg, *n),
            Constructor::Star(n) => topology::star(graph, cfg, *n),
            Constructor::Wheel(n) => topology::wheel(graph, cfg, *n),
            Constructor::Complete(n) => topology::complete(graph, cfg, *n),
            Constructor::CompleteBipartite(n1, n2) => topology::bipartite(graph, cfg, *n1, *n2),
            Constructor::Grid { rows, cols } => topology::grid(graph, cfg, *rows, *cols),
            Constructor::RandomSparse { n, p } => topology::random_sparse(graph, cfg, *n, *p),
            Constructor::RandomRegular { n, d } => topology::random_regular(graph, cfg, *n, *d),
            Constructor::Platonic { solid, with_centre } => {
                topology::platonic(graph, cfg, *solid, *with_centre)
            }
            Constructor::Hexagram(base) => topology::hexagram(graph, cfg, *base),
            Constructor::Letter(ch) => glyph::emit(graph, cfg, &ch.to_string(), "", true),
            Constructor::Word { text, scope } => glyph::emit(graph, cfg, text, scope, true),
            Constructor::Digit(ch) => glyph::emit(graph, cfg, &ch.to_string(), "", false),
            Constructor::Number { text, scope } => glyph::emit(graph, cfg, text, scope, false),
        }
    }
}

/// Build a fresh graph by applying every constructor in order against the
/// resolved options.
///
/// Any constructor error aborts the whole composition, wrapped with the
/// constructor's name; the original error kind remains checkable through
/// [`Error::kind`].
pub fn compose(mode: Mode, options: BuildOptions, constructors: &[Constructor]) -> Result<Graph> {
    let mut cfg = options.resolve()?;
    let graph = Graph::new(mode);
    for constructor in constructors {
        debug!(constructor = constructor.name(), "applying constructor");
        constructor
            .apply(&graph, &mut cfg)
            .map_err(|source| Error::Constructor {
                constructor: constructor.name(),
                source: Box::new(source),
            })?;
    }
    Ok(graph)
}
