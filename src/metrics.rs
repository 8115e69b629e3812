use crate::PerformanceSnapshot;

/// Plain engagement rate: interactions over views. Zero views means the
/// rate is undefined and reported as 0.
pub fn engagement_rate(snapshot: &PerformanceSnapshot) -> f64 {
    if snapshot.views == 0 {
        return 0.0;
    }
    snapshot.interactions() as f64 / snapshot.views as f64
}

/// Mean engagement rate across a snapshot sequence. Empty input scores 0.
pub fn engagement_score(snapshots: &[PerformanceSnapshot]) -> f64 {
    if snapshots.is_empty() {
        return 0.0;
    }
    let total: f64 = snapshots.iter().map(engagement_rate).sum();
    total / snapshots.len() as f64
}

/// Quality-weighted engagement: comments count double, shares triple.
/// Kept separate from the plain rate; pattern ranking uses this form,
/// everything else uses `engagement_rate`.
pub fn weighted_engagement(snapshot: &PerformanceSnapshot) -> f64 {
    if snapshot.views == 0 {
        return 0.0;
    }
    let weighted =
        snapshot.likes as f64 + snapshot.comments as f64 * 2.0 + snapshot.shares as f64 * 3.0;
    weighted / snapshot.views as f64
}

/// Mean weighted engagement across a snapshot sequence. Empty input scores 0.
pub fn weighted_engagement_score(snapshots: &[PerformanceSnapshot]) -> f64 {
    if snapshots.is_empty() {
        return 0.0;
    }
    let total: f64 = snapshots.iter().map(weighted_engagement).sum();
    total / snapshots.len() as f64
}

/// Population variance. Empty input yields 0.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values
        .iter()
        .map(|value| (value - mean) * (value - mean))
        .sum::<f64>()
        / values.len() as f64
}

/// Pearson-style correlation over paired values.
///
/// Returns 0 with fewer than 3 pairs or when either standard deviation
/// is zero; the threshold guards divide-by-zero and is part of the
/// contract, not a statistical refinement.
pub fn correlation(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 3 {
        return 0.0;
    }

    let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
    let mean_y = ys[..n].iter().sum::<f64>() / n as f64;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = xs[i] - mean_x;
        let dy = ys[i] - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return 0.0;
    }
    covariance / (var_x.sqrt() * var_y.sqrt())
}
