//! Shapes for the `/analysis/dashboard/*` aggregate endpoints.

use serde::Deserialize;

/// `GET /analysis/dashboard/stats`: the four summary cards.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_analyses: u64,
    /// Average sentiment score in percent (0-100)
    #[serde(default)]
    pub avg_sentiment: f64,
    #[serde(default)]
    pub risk_alerts: u64,
    #[serde(default)]
    pub topics_analyzed: u64,
}

/// One point of `GET /analysis/dashboard/sentiment-trends`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendPoint {
    /// Axis label, e.g. a month or day
    pub label: String,
    pub score: f64,
}

/// `GET /analysis/dashboard/risk-distribution`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RiskDistribution {
    #[serde(default)]
    pub low: u64,
    #[serde(default)]
    pub medium: u64,
    #[serde(default)]
    pub high: u64,
}

impl RiskDistribution {
    pub fn total(&self) -> u64 {
        self.low + self.medium + self.high
    }
}

/// One bar of `GET /analysis/dashboard/topics-frequency`.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicFrequency {
    pub topic: String,
    pub count: u64,
}
