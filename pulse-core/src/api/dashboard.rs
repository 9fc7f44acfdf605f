//! `/analysis/dashboard/*` aggregate endpoints.

use crate::error::PulseResult;
use crate::models::{DashboardStats, RiskDistribution, TopicFrequency, TrendPoint};

use super::http::ApiClient;

#[derive(Debug, Clone)]
pub struct DashboardApi {
    client: ApiClient,
}

impl DashboardApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> PulseResult<DashboardStats> {
        self.client.get("/analysis/dashboard/stats").await
    }

    pub async fn sentiment_trends(&self) -> PulseResult<Vec<TrendPoint>> {
        self.client.get("/analysis/dashboard/sentiment-trends").await
    }

    pub async fn risk_distribution(&self) -> PulseResult<RiskDistribution> {
        self.client.get("/analysis/dashboard/risk-distribution").await
    }

    pub async fn topics_frequency(&self) -> PulseResult<Vec<TopicFrequency>> {
        self.client.get("/analysis/dashboard/topics-frequency").await
    }
}
