//! Cost estimates that steer the search.
//!
//! Every heuristic is evaluated for a `candidate` cell that is being reached from its predecessor
//! `origin`, with the search `goal` and an optional [DirectionBias] describing a preferred travel
//! direction. Heuristics are injected into the search loop through the [Heuristic] trait, which is
//! also implemented for plain closures of the same shape.
use core::f64::consts::SQRT_2;
use core::str::FromStr;

use grid_util::point::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Weight of the perpendicular drift term of [DirectionalHeuristic].
pub const PERPENDICULAR_WEIGHT: f64 = 0.6;
/// Weight of the forward projection term of [DirectionalHeuristic].
pub const PROJECTION_WEIGHT: f64 = 0.4;
/// Weight of the lateral alignment penalty of [OctileHeuristic].
pub const ALIGNMENT_WEIGHT: f64 = 0.1;

/// A preferred direction of travel. The zero vector means "no preference".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DirectionBias {
    pub dx: f64,
    pub dy: f64,
}

impl DirectionBias {
    pub const ZERO: DirectionBias = DirectionBias { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> DirectionBias {
        DirectionBias { dx, dy }
    }

    /// The bias pointing from `start` straight at `goal`.
    pub fn towards(start: &Point, goal: &Point) -> DirectionBias {
        DirectionBias::new((goal.x - start.x) as f64, (goal.y - start.y) as f64)
    }

    pub fn magnitude(&self) -> f64 {
        self.dx.hypot(self.dy)
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude() == 0.0
    }

    /// The unit vector along the bias, or [None] for the zero vector.
    pub fn normalized(&self) -> Option<(f64, f64)> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 || !magnitude.is_finite() {
            None
        } else {
            Some((self.dx / magnitude, self.dy / magnitude))
        }
    }
}

/// Octile distance: cheapest 8-connected route with unit orthogonal and √2 diagonal steps.
pub fn octile_distance(p1: &Point, p2: &Point) -> f64 {
    let delta_x = (p1.x - p2.x).abs() as f64;
    let delta_y = (p1.y - p2.y).abs() as f64;
    delta_x.max(delta_y) + (SQRT_2 - 1.0) * delta_x.min(delta_y)
}

pub fn euclidean_distance(p1: &Point, p2: &Point) -> f64 {
    ((p1.x - p2.x) as f64).hypot((p1.y - p2.y) as f64)
}

pub fn chebyshev_distance(p1: &Point, p2: &Point) -> f64 {
    (p1.x - p2.x).abs().max((p1.y - p2.y).abs()) as f64
}

/// A cost estimate for reaching `goal` through `candidate`, entered from `origin`.
pub trait Heuristic {
    fn estimate(
        &self,
        candidate: &Point,
        goal: &Point,
        origin: &Point,
        bias: &DirectionBias,
    ) -> f64;

    /// Name used when logging search results.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Heuristic for F
where
    F: Fn(&Point, &Point, &Point, &DirectionBias) -> f64,
{
    fn estimate(
        &self,
        candidate: &Point,
        goal: &Point,
        origin: &Point,
        bias: &DirectionBias,
    ) -> f64 {
        self(candidate, goal, origin, bias)
    }
}

/// Rewards forward progress along the bias and penalises drifting away from the line through
/// `origin` along the bias. Does not consult the goal unless the bias is the zero vector, in
/// which case it degrades to the octile distance to the goal.
///
/// `origin` is the predecessor of `candidate`, so the line moves with the search and only the
/// sideways component of the single step is penalised. Drift accumulated over earlier steps is
/// not measured; a heuristic that wants it can compare against a fixed anchor cell instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectionalHeuristic;

impl Heuristic for DirectionalHeuristic {
    fn estimate(
        &self,
        candidate: &Point,
        goal: &Point,
        origin: &Point,
        bias: &DirectionBias,
    ) -> f64 {
        let Some((unit_x, unit_y)) = bias.normalized() else {
            return octile_distance(candidate, goal);
        };
        let move_x = (candidate.x - origin.x) as f64;
        let move_y = (candidate.y - origin.y) as f64;
        let projection = move_x * unit_x + move_y * unit_y;
        // Cross product with the unit bias: distance to the line through origin.
        let perpendicular = (unit_y * move_x - unit_x * move_y).abs();
        PERPENDICULAR_WEIGHT * perpendicular - PROJECTION_WEIGHT * projection
    }

    fn name(&self) -> &str {
        "directional"
    }
}

/// Octile distance to the goal plus a small penalty for stepping across the bias direction.
/// With the zero bias this is the plain octile distance.
#[derive(Clone, Copy, Debug, Default)]
pub struct OctileHeuristic;

impl Heuristic for OctileHeuristic {
    fn estimate(
        &self,
        candidate: &Point,
        goal: &Point,
        origin: &Point,
        bias: &DirectionBias,
    ) -> f64 {
        let step_x = (candidate.x - origin.x).abs() as f64;
        let step_y = (candidate.y - origin.y).abs() as f64;
        let misalignment = (bias.dy * step_x - bias.dx * step_y).abs();
        octile_distance(candidate, goal) + ALIGNMENT_WEIGHT * misalignment
    }

    fn name(&self) -> &str {
        "octile"
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EuclideanHeuristic;

impl Heuristic for EuclideanHeuristic {
    fn estimate(&self, candidate: &Point, goal: &Point, _: &Point, _: &DirectionBias) -> f64 {
        euclidean_distance(candidate, goal)
    }

    fn name(&self) -> &str {
        "euclidean"
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ChebyshevHeuristic;

impl Heuristic for ChebyshevHeuristic {
    fn estimate(&self, candidate: &Point, goal: &Point, _: &Point, _: &DirectionBias) -> f64 {
        chebyshev_distance(candidate, goal)
    }

    fn name(&self) -> &str {
        "chebyshev"
    }
}

/// Always zero, turning the search into Dijkstra's algorithm.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _: &Point, _: &Point, _: &Point, _: &DirectionBias) -> f64 {
        0.0
    }

    fn name(&self) -> &str {
        "dijkstra"
    }
}

/// The built-in heuristics, selectable at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HeuristicKind {
    Directional,
    #[default]
    Octile,
    Euclidean,
    Chebyshev,
    Zero,
}

impl Heuristic for HeuristicKind {
    fn estimate(
        &self,
        candidate: &Point,
        goal: &Point,
        origin: &Point,
        bias: &DirectionBias,
    ) -> f64 {
        match self {
            HeuristicKind::Directional => {
                DirectionalHeuristic.estimate(candidate, goal, origin, bias)
            }
            HeuristicKind::Octile => OctileHeuristic.estimate(candidate, goal, origin, bias),
            HeuristicKind::Euclidean => EuclideanHeuristic.estimate(candidate, goal, origin, bias),
            HeuristicKind::Chebyshev => ChebyshevHeuristic.estimate(candidate, goal, origin, bias),
            HeuristicKind::Zero => ZeroHeuristic.estimate(candidate, goal, origin, bias),
        }
    }

    fn name(&self) -> &str {
        match self {
            HeuristicKind::Directional => DirectionalHeuristic.name(),
            HeuristicKind::Octile => OctileHeuristic.name(),
            HeuristicKind::Euclidean => EuclideanHeuristic.name(),
            HeuristicKind::Chebyshev => ChebyshevHeuristic.name(),
            HeuristicKind::Zero => ZeroHeuristic.name(),
        }
    }
}

impl FromStr for HeuristicKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "directional" => Ok(HeuristicKind::Directional),
            "octile" => Ok(HeuristicKind::Octile),
            "euclidean" => Ok(HeuristicKind::Euclidean),
            "chebyshev" => Ok(HeuristicKind::Chebyshev),
            "dijkstra" | "zero" => Ok(HeuristicKind::Zero),
            _ => Err(ConfigError::UnknownHeuristic(s.to_owned())),
        }
    }
}
