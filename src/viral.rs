use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{safe_ratio, trend, Platform, PerformanceSnapshot};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViralWeights {
    pub share_rate: f64,
    pub growth_rate: f64,
    pub engagement_speed: f64,
}

impl Default for ViralWeights {
    fn default() -> Self {
        Self {
            share_rate: 0.5,
            growth_rate: 0.3,
            engagement_speed: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViralPotential {
    VeryLow,
    Low,
    Moderate,
    High,
    ExtremelyHigh,
}

impl ViralPotential {
    pub fn from_score(score: f64) -> Self {
        if score > 8.0 {
            ViralPotential::ExtremelyHigh
        } else if score > 6.0 {
            ViralPotential::High
        } else if score > 4.0 {
            ViralPotential::Moderate
        } else if score > 2.0 {
            ViralPotential::Low
        } else {
            ViralPotential::VeryLow
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViralPotential::VeryLow => "Potencial viral muito baixo",
            ViralPotential::Low => "Baixo potencial viral",
            ViralPotential::Moderate => "Potencial viral moderado",
            ViralPotential::High => "Alto potencial viral",
            ViralPotential::ExtremelyHigh => "Potencial viral extremamente alto",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ViralReport {
    pub score: f64,
    pub potential: ViralPotential,
    pub assessment: String,
    pub share_rate: f64,
    pub growth_rate: f64,
    pub engagement_speed: f64,
    pub key_factors: Vec<String>,
    pub platform_share_probability: BTreeMap<String, f64>,
}

#[derive(Debug, Clone)]
pub struct ViralScorer {
    weights: ViralWeights,
}

impl ViralScorer {
    pub fn new(weights: ViralWeights) -> Self {
        Self { weights }
    }

    /// Scores one content item from its chronologically ordered snapshots.
    pub fn score(&self, snapshots: &[PerformanceSnapshot]) -> ViralReport {
        let total_views: u64 = snapshots.iter().map(|snapshot| snapshot.views).sum();
        let total_shares: u64 = snapshots.iter().map(|snapshot| snapshot.shares).sum();

        let share_rate = safe_ratio(total_shares as f64, total_views as f64) * 100.0;
        let growth_rate = trend::growth_rate(snapshots);
        let engagement_speed = trend::engagement_speed(snapshots);

        let score = share_rate * self.weights.share_rate
            + growth_rate * self.weights.growth_rate
            + engagement_speed * self.weights.engagement_speed;

        let potential = ViralPotential::from_score(score);

        let mut key_factors = Vec::new();
        if share_rate > 5.0 {
            key_factors.push("Alta taxa de compartilhamento".to_string());
        }
        if growth_rate > 50.0 {
            key_factors.push("Crescimento acelerado de visualizações".to_string());
        }
        if engagement_speed > 7.0 {
            key_factors.push("Engajamento rápido após a publicação".to_string());
        }

        ViralReport {
            score,
            potential,
            assessment: potential.label().to_string(),
            share_rate,
            growth_rate,
            engagement_speed,
            key_factors,
            platform_share_probability: platform_share_probability(snapshots),
        }
    }
}

fn platform_share_probability(snapshots: &[PerformanceSnapshot]) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<Platform, (u64, u64)> = BTreeMap::new();
    for snapshot in snapshots {
        let entry = totals.entry(snapshot.platform).or_insert((0, 0));
        entry.0 += snapshot.views;
        entry.1 += snapshot.shares;
    }

    totals
        .into_iter()
        .map(|(platform, (views, shares))| {
            let probability = safe_ratio(shares as f64, views as f64) * 100.0;
            (platform.label().to_string(), probability)
        })
        .collect()
}
