use crate::models::{EntryKind, WorkoutSubtype};

/// Minimum score a workout must reach to be accepted at submission time.
pub const MIN_WORKOUT_SCORE: f64 = 1.0;

/// Fixed score credited for an (approved) rest day.
pub const REST_DAY_SCORE: f64 = 1.0;

const MAX_SCORE: f64 = 2.0;
const RUN_DISTANCE_NORMALIZER: f64 = 4.0;
const CYCLING_DISTANCE_NORMALIZER: f64 = 10.0;
const GOLF_FULL_ROUND_HOLES: f64 = 9.0;

/// Raw metrics from a submission; each field is optional because subtypes
/// report different measurements.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkoutMetrics {
    pub duration_minutes: Option<f64>,
    pub distance_km: Option<f64>,
    pub steps: Option<i64>,
    pub holes: Option<i32>,
}

/// Normalization thresholds, relaxed for older members.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeThresholds {
    pub base_duration: f64,
    pub min_steps: f64,
    pub max_steps: f64,
}

impl AgeThresholds {
    pub fn for_age(age: Option<i32>) -> Self {
        match age {
            Some(age) if age > 75 => Self {
                base_duration: 30.0,
                min_steps: 3000.0,
                max_steps: 6000.0,
            },
            Some(age) if age > 65 => Self {
                base_duration: 30.0,
                min_steps: 5000.0,
                max_steps: 10000.0,
            },
            _ => Self {
                base_duration: 45.0,
                min_steps: 10000.0,
                max_steps: 20000.0,
            },
        }
    }
}

/// Converts a raw submission into its normalized score in `[0, 2]`.
///
/// Total: unknown subtypes fall back to the duration formula, and a
/// metric-free submission scores the neutral 1.0, so this never fails.
pub fn compute_score(
    kind: EntryKind,
    subtype: WorkoutSubtype,
    metrics: &WorkoutMetrics,
    age: Option<i32>,
) -> f64 {
    if kind == EntryKind::Rest {
        return REST_DAY_SCORE;
    }

    let thresholds = AgeThresholds::for_age(age);

    match subtype {
        WorkoutSubtype::Steps => steps_score(metrics.steps.unwrap_or(0) as f64, &thresholds),
        WorkoutSubtype::Golf => {
            (f64::from(metrics.holes.unwrap_or(0)) / GOLF_FULL_ROUND_HOLES).min(MAX_SCORE)
        }
        WorkoutSubtype::Run | WorkoutSubtype::Cardio => endurance_score(
            metrics,
            thresholds.base_duration,
            RUN_DISTANCE_NORMALIZER,
        ),
        WorkoutSubtype::Cycling => endurance_score(
            metrics,
            thresholds.base_duration,
            CYCLING_DISTANCE_NORMALIZER,
        ),
        WorkoutSubtype::Other => match metrics.duration_minutes {
            Some(duration) => (duration / thresholds.base_duration).min(MAX_SCORE),
            None => 1.0,
        },
    }
}

fn steps_score(steps: f64, thresholds: &AgeThresholds) -> f64 {
    if steps < thresholds.min_steps {
        return 0.0;
    }
    let capped = steps.min(thresholds.max_steps);
    let span = thresholds.max_steps - thresholds.min_steps;
    (1.0 + (capped - thresholds.min_steps) / span).min(MAX_SCORE)
}

fn endurance_score(metrics: &WorkoutMetrics, base_duration: f64, distance_normalizer: f64) -> f64 {
    let by_duration = metrics.duration_minutes.unwrap_or(0.0) / base_duration;
    let by_distance = metrics.distance_km.unwrap_or(0.0) / distance_normalizer;
    by_duration.max(by_distance).min(MAX_SCORE)
}
