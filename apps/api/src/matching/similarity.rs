use tracing::warn;

use crate::matching::profile::fold;

/// Experience weight when the requester is out to win.
pub const WIN_HACKATHON_WEIGHT: f64 = 2.0;
/// Experience weight when the requester is there to learn.
pub const GAIN_EXPERIENCE_WEIGHT: f64 = 1.5;
pub const DEFAULT_EXPERIENCE_WEIGHT: f64 = 1.0;

/// Multiplier applied to the experience column of every compared row.
pub fn experience_weight(goal: Option<&str>) -> f64 {
    match goal.map(fold).as_deref() {
        Some("win hackathon") => WIN_HACKATHON_WEIGHT,
        Some("gain experience") => GAIN_EXPERIENCE_WEIGHT,
        _ => DEFAULT_EXPERIENCE_WEIGHT,
    }
}

/// Cosine similarity in [-1, 1].
///
/// A zero-magnitude side (e.g. a profile with nothing filled in) scores 0.0.
/// Mismatched lengths mean the rows were never aligned; that also scores 0.0.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        warn!(
            a_len = a.len(),
            b_len = b.len(),
            "feature rows are not aligned; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}
