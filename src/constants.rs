/// Weight of league points in a team's strength
pub const WEIGHT_POINTS: f64 = 0.4;

/// Weight of matches won in a team's strength
pub const WEIGHT_WINS: f64 = 0.3;

/// Weight of (positive) goal difference in a team's strength
pub const WEIGHT_GOALS: f64 = 0.2;

/// Home uplift, applied to the home side's own weighted strength
pub const WEIGHT_HOME: f64 = 0.1;

/// Smallest percentage a team receives when strengths are non-zero
pub const MIN_PREDICTION_PERCENT: f64 = 2.0;

/// Scoring attempts per side in a simulated match
pub const GOAL_ATTEMPTS: u16 = 5;

/// League points for a win
pub const POINTS_FOR_WIN: i32 = 3;

/// League points for a draw
pub const POINTS_FOR_DRAW: i32 = 1;
