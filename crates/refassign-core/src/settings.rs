//! Fixed problem settings: soft-constraint weights and the travel model.

/// Average travel speed used when no other value is configured, in km/h.
pub const DEFAULT_AVERAGE_SPEED_KMH: i64 = 50;

/// Multipliers applied to each soft constraint's raw cost.
///
/// Weights are fixed when an [`Instance`](crate::Instance) is built and never
/// change afterwards, so concurrent searches over copies of one instance agree
/// on the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Weights {
    pub lack_of_experience: i64,
    pub games_distribution: i64,
    pub total_distance: i64,
    pub optional_referee: i64,
    pub assignment_frequency: i64,
    pub referee_incompatibility: i64,
    pub team_incompatibility: i64,
}

impl Weights {
    /// All weights set to one.
    pub const UNIT: Weights = Weights::uniform(1);

    /// All weights set to zero.
    pub const ZERO: Weights = Weights::uniform(0);

    pub const fn uniform(weight: i64) -> Self {
        Weights {
            lack_of_experience: weight,
            games_distribution: weight,
            total_distance: weight,
            optional_referee: weight,
            assignment_frequency: weight,
            referee_incompatibility: weight,
            team_incompatibility: weight,
        }
    }

    /// Builds weights from the conventional command-line order
    /// `loe, gd, td, o, af, ri, ti`.
    pub const fn from_array(w: [i64; 7]) -> Self {
        Weights {
            lack_of_experience: w[0],
            games_distribution: w[1],
            total_distance: w[2],
            optional_referee: w[3],
            assignment_frequency: w[4],
            referee_incompatibility: w[5],
            team_incompatibility: w[6],
        }
    }

    pub const fn to_array(&self) -> [i64; 7] {
        [
            self.lack_of_experience,
            self.games_distribution,
            self.total_distance,
            self.optional_referee,
            self.assignment_frequency,
            self.referee_incompatibility,
            self.team_incompatibility,
        ]
    }

    pub fn is_valid(&self) -> bool {
        self.to_array().iter().all(|w| *w >= 0)
    }
}

impl Default for Weights {
    fn default() -> Self {
        Weights::UNIT
    }
}

/// Everything about an instance that is configuration rather than data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProblemSettings {
    pub weights: Weights,
    pub average_speed_kmh: i64,
}

impl ProblemSettings {
    pub fn new(weights: Weights) -> Self {
        Self {
            weights,
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
        }
    }

    pub fn with_average_speed(mut self, speed_kmh: i64) -> Self {
        self.average_speed_kmh = speed_kmh;
        self
    }
}

impl Default for ProblemSettings {
    fn default() -> Self {
        Self::new(Weights::default())
    }
}
