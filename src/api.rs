use axum::http::StatusCode;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use creator_analytics::predict::PredictionRequest;
use creator_analytics::{AnalyticsError, Platform};

#[derive(Debug, Deserialize)]
pub struct ApiPredictionRequest {
    pub creator_id: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub platform: Option<String>,
    pub has_media: Option<bool>,
    pub publish_hour: Option<u32>,
}

impl ApiPredictionRequest {
    pub fn into_request(self) -> Result<PredictionRequest, String> {
        let creator_id = self.creator_id.unwrap_or_default().trim().to_string();
        if creator_id.is_empty() {
            return Err("creator_id is required".to_string());
        }

        let title = self.title.unwrap_or_default().trim().to_string();
        if title.is_empty() {
            return Err("title is required".to_string());
        }

        let platform_raw = self.platform.unwrap_or_default();
        let platform = Platform::from_str(&platform_raw)
            .ok_or_else(|| format!("invalid platform: {}", platform_raw))?;

        if let Some(hour) = self.publish_hour {
            if hour > 23 {
                return Err(format!("invalid publish_hour (0-23): {}", hour));
            }
        }

        Ok(PredictionRequest {
            creator_id,
            title,
            body: self.body.unwrap_or_default(),
            platform,
            has_media: self.has_media.unwrap_or(false),
            publish_hour: self.publish_hour,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateRangeQuery {
    /// Resolves the range, defaulting to the last 90 days.
    pub fn resolve(&self) -> Result<(DateTime<Utc>, DateTime<Utc>), String> {
        let end = match self.end.as_deref() {
            Some(raw) => parse_date(raw)?,
            None => Utc::now(),
        };
        let start = match self.start.as_deref() {
            Some(raw) => parse_date(raw)?,
            None => end - chrono::Duration::days(90),
        };
        Ok((start, end))
    }
}

pub fn parse_date(raw: &str) -> Result<DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("invalid date '{}': {}", raw, err))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| format!("invalid date '{}'", raw))?;
    Ok(DateTime::from_naive_utc_and_offset(midnight, Utc))
}

/// Maps the engine failure taxonomy onto HTTP statuses. The message is
/// already display-safe; internals were logged at the engine boundary.
pub fn error_response(error: AnalyticsError) -> (StatusCode, String) {
    let status = match &error {
        AnalyticsError::CreatorNotFound(_) | AnalyticsError::ContentNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        AnalyticsError::InsufficientData(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AnalyticsError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        AnalyticsError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, error.to_string())
}
