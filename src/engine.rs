use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, warn};

use crate::audience::{self, AudienceInsights};
use crate::compare::{self, ComparisonReport};
use crate::config::EngineConfig;
use crate::error::AnalyticsError;
use crate::factors::{self, EngagementFactor};
use crate::patterns::{self, PatternReport};
use crate::predict::{self, PredictionReport, PredictionRequest};
use crate::recommend::{self, RecommendationReport};
use crate::store::{ContentStore, StoreError};
use crate::viral::{ViralReport, ViralScorer};
use crate::{metrics, trend, ContentItem, Creator, JoinedContentView, Platform};

#[derive(Debug, Clone, Serialize)]
pub struct ContentInsights {
    pub content_id: String,
    pub title: String,
    pub platform: Platform,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub engagement_rate: f64,
    pub engagement_score: f64,
    pub weighted_engagement_score: f64,
    pub growth_rate: f64,
    pub engagement_speed: f64,
    pub viral: ViralReport,
}

/// Stateless analytics over an immutable per-invocation snapshot of the
/// creator's content. All store reads happen before computation starts;
/// nothing is cached or written back.
pub struct AnalyticsEngine<S> {
    store: S,
    config: EngineConfig,
    viral: ViralScorer,
}

impl<S: ContentStore> AnalyticsEngine<S> {
    pub fn new(store: S, config: EngineConfig) -> Self {
        let viral = ViralScorer::new(config.viral.clone());
        Self {
            store,
            config,
            viral,
        }
    }

    pub async fn content_insights(
        &self,
        content_id: &str,
    ) -> Result<ContentInsights, AnalyticsError> {
        let content = self
            .store
            .content_by_id(content_id)
            .await
            .map_err(|err| self.internal("content_insights", content_id, err))?
            .ok_or_else(|| AnalyticsError::ContentNotFound(content_id.to_string()))?;

        let snapshots = self
            .store
            .performance_by_content(content_id)
            .await
            .map_err(|err| self.internal("content_insights", content_id, err))?;
        if snapshots.is_empty() {
            warn!(content_id, "no performance data for content");
            return Err(AnalyticsError::InsufficientData(format!(
                "o conteúdo {} ainda não possui dados de desempenho",
                content_id
            )));
        }

        let view = JoinedContentView::new(content, snapshots);
        let Some(latest) = view.latest() else {
            return Err(AnalyticsError::InsufficientData(format!(
                "o conteúdo {} ainda não possui dados de desempenho",
                content_id
            )));
        };

        Ok(ContentInsights {
            content_id: view.content.id.clone(),
            title: view.content.title.clone(),
            platform: view.content.platform,
            views: latest.views,
            likes: latest.likes,
            comments: latest.comments,
            shares: latest.shares,
            engagement_rate: metrics::engagement_rate(latest),
            engagement_score: view.engagement_score(),
            weighted_engagement_score: view.weighted_engagement_score(),
            growth_rate: trend::growth_rate(&view.snapshots),
            engagement_speed: trend::engagement_speed(&view.snapshots),
            viral: self.viral.score(&view.snapshots),
        })
    }

    pub async fn high_performance_patterns(
        &self,
        creator_id: &str,
        top_n: Option<usize>,
    ) -> Result<PatternReport, AnalyticsError> {
        let top_n = top_n.unwrap_or(self.config.patterns.default_top_n);
        if top_n == 0 {
            return Err(AnalyticsError::InvalidArgument(
                "o número de posts analisados deve ser maior que zero".to_string(),
            ));
        }

        let (_, views) = self
            .creator_views("high_performance_patterns", creator_id)
            .await?;
        Ok(patterns::extract_patterns(&views, top_n))
    }

    pub async fn content_recommendations(
        &self,
        creator_id: &str,
    ) -> Result<RecommendationReport, AnalyticsError> {
        let (creator, views) = self
            .creator_views("content_recommendations", creator_id)
            .await?;
        let patterns = patterns::extract_patterns(&views, self.config.patterns.default_top_n);
        Ok(recommend::generate(&creator, &views, &patterns))
    }

    pub async fn audience_insights(
        &self,
        creator_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<AudienceInsights, AnalyticsError> {
        let views = self
            .creator_views_between("audience_insights", creator_id, start, end)
            .await?;
        Ok(audience::insights(&views))
    }

    pub async fn compare_content_types(
        &self,
        creator_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<ComparisonReport, AnalyticsError> {
        let views = self
            .creator_views_between("compare_content_types", creator_id, start, end)
            .await?;
        Ok(compare::compare(&views))
    }

    pub async fn engagement_factors(
        &self,
        creator_id: &str,
    ) -> Result<Vec<EngagementFactor>, AnalyticsError> {
        let (_, views) = self.creator_views("engagement_factors", creator_id).await?;
        Ok(factors::analyze(&views))
    }

    pub async fn predict_performance(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionReport, AnalyticsError> {
        let (_, views) = self
            .creator_views("predict_performance", &request.creator_id)
            .await?;
        Ok(predict::predict(request, &views))
    }

    /// Fetches and joins everything the per-creator operations need,
    /// failing fast on the expected missing-data conditions.
    async fn creator_views(
        &self,
        operation: &'static str,
        creator_id: &str,
    ) -> Result<(Creator, Vec<JoinedContentView>), AnalyticsError> {
        let creator = self
            .store
            .creator_by_id(creator_id)
            .await
            .map_err(|err| self.internal(operation, creator_id, err))?
            .ok_or_else(|| AnalyticsError::CreatorNotFound(creator_id.to_string()))?;

        let content = self
            .store
            .content_by_creator(creator_id)
            .await
            .map_err(|err| self.internal(operation, creator_id, err))?;

        let views = self.join(operation, creator_id, content).await?;
        Ok((creator, views))
    }

    async fn creator_views_between(
        &self,
        operation: &'static str,
        creator_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<JoinedContentView>, AnalyticsError> {
        if start >= end {
            return Err(AnalyticsError::InvalidArgument(
                "a data inicial deve ser anterior à data final".to_string(),
            ));
        }

        self.store
            .creator_by_id(creator_id)
            .await
            .map_err(|err| self.internal(operation, creator_id, err))?
            .ok_or_else(|| AnalyticsError::CreatorNotFound(creator_id.to_string()))?;

        let content = self
            .store
            .content_by_creator_between(creator_id, start, end)
            .await
            .map_err(|err| self.internal(operation, creator_id, err))?;

        self.join(operation, creator_id, content).await
    }

    async fn join(
        &self,
        operation: &'static str,
        creator_id: &str,
        content: Vec<ContentItem>,
    ) -> Result<Vec<JoinedContentView>, AnalyticsError> {
        if content.is_empty() {
            warn!(operation, creator_id, "creator has no content in scope");
            return Err(AnalyticsError::InsufficientData(
                "nenhum conteúdo encontrado para o criador no período selecionado".to_string(),
            ));
        }

        let mut views = Vec::with_capacity(content.len());
        for item in content {
            let snapshots = self
                .store
                .performance_by_content(&item.id)
                .await
                .map_err(|err| self.internal(operation, creator_id, err))?;
            views.push(JoinedContentView::new(item, snapshots));
        }

        if !views.iter().any(JoinedContentView::has_performance) {
            warn!(operation, creator_id, "creator has no performance data");
            return Err(AnalyticsError::InsufficientData(
                "o criador ainda não possui dados de desempenho".to_string(),
            ));
        }
        Ok(views)
    }

    /// Unexpected store faults never reach callers with internals
    /// attached; they are logged here and collapsed to `Internal`.
    fn internal(&self, operation: &'static str, id: &str, err: StoreError) -> AnalyticsError {
        error!(operation, id, error = %err, "store operation failed");
        AnalyticsError::Internal
    }
}
