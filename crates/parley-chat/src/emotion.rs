//! Client for the optional emotion advisory service.
//!
//! The service classifies a chat message and proposes replies. It is
//! advisory only: [`EmotionClient::advise`] swallows every failure so a
//! slow or broken service never gets in the way of the chat.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ChatError, ChatResult};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Allowed distance of the score sum from 1.
const SUM_TOLERANCE: f64 = 0.01;

/// The service's answer for one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionAnalysis {
    /// Score per emotion label, each in `[0, 1]`.
    pub emotions: BTreeMap<String, f64>,
    /// The label with the highest score.
    pub dominant_emotion: String,
    /// Suggested replies for the dominant emotion.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl EmotionAnalysis {
    /// Check that the scores form a distribution and the dominant label is its maximum.
    pub fn validate(&self) -> ChatResult<()> {
        if self.emotions.is_empty() {
            return Err(invalid("no emotion scores"));
        }
        if let Some((label, score)) = self
            .emotions
            .iter()
            .find(|(_, s)| !(0.0..=1.0).contains(*s))
        {
            return Err(invalid(format!("score for {label} out of range: {score}")));
        }

        let sum: f64 = self.emotions.values().sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(invalid(format!("scores sum to {sum:.3}")));
        }

        let Some(dominant) = self.emotions.get(&self.dominant_emotion) else {
            return Err(invalid(format!(
                "dominant emotion {} has no score",
                self.dominant_emotion
            )));
        };
        let max = self.emotions.values().copied().fold(0.0, f64::max);
        if *dominant < max {
            return Err(invalid(format!(
                "dominant emotion {} is not the highest score",
                self.dominant_emotion
            )));
        }
        Ok(())
    }

    /// Emotions sorted by score, highest first.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .emotions
            .iter()
            .map(|(label, score)| (label.as_str(), *score))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

fn invalid(message: impl Into<String>) -> ChatError {
    ChatError::InvalidResponse(message.into())
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct ServiceError {
    error: String,
}

/// HTTP client for `POST {endpoint}/analyze`.
#[derive(Debug, Clone)]
pub struct EmotionClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl EmotionClient {
    /// Create a client for the service rooted at `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> ChatResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ChatError::Network(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The URL requests are sent to.
    pub fn url(&self) -> String {
        format!("{}/analyze", self.endpoint)
    }

    /// Analyze `text` and validate the answer.
    pub async fn analyze(&self, text: &str) -> ChatResult<EmotionAnalysis> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyText);
        }

        let url = self.url();
        debug!(%url, chars = text.len(), "requesting emotion analysis");

        let request = self.client.post(&url).json(&AnalyzeRequest { text });
        let response = tokio::time::timeout(self.timeout, request.send())
            .await
            .map_err(|_| ChatError::Timeout)?
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        let bytes = tokio::time::timeout(self.timeout, response.bytes())
            .await
            .map_err(|_| ChatError::Timeout)?
            .map_err(|e| ChatError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ServiceError>(&bytes)
                .map(|e| e.error)
                .unwrap_or_default();
            return Err(ChatError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let analysis: EmotionAnalysis =
            serde_json::from_slice(&bytes).map_err(|e| invalid(e.to_string()))?;
        analysis.validate()?;
        debug!(dominant = %analysis.dominant_emotion, "emotion analysis received");
        Ok(analysis)
    }

    /// Like [`analyze`](Self::analyze), but any failure is logged and yields `None`.
    pub async fn advise(&self, text: &str) -> Option<EmotionAnalysis> {
        match self.analyze(text).await {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                warn!(error = %e, "emotion advice unavailable");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(scores: &[(&str, f64)], dominant: &str) -> EmotionAnalysis {
        EmotionAnalysis {
            emotions: scores.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            dominant_emotion: dominant.to_string(),
            suggestions: vec![],
        }
    }

    #[test]
    fn valid_distribution_passes() {
        let a = analysis(&[("happy", 0.75), ("neutral", 0.25)], "happy");
        assert!(a.validate().is_ok());
    }

    #[test]
    fn sum_within_tolerance_passes() {
        let a = analysis(&[("happy", 0.5), ("sad", 0.505)], "sad");
        assert!(a.validate().is_ok());
    }

    #[test]
    fn bad_sum_rejected() {
        let a = analysis(&[("happy", 0.5), ("sad", 0.3)], "happy");
        assert!(matches!(a.validate(), Err(ChatError::InvalidResponse(_))));
    }

    #[test]
    fn out_of_range_rejected() {
        let a = analysis(&[("happy", 1.2), ("sad", -0.2)], "happy");
        assert!(a.validate().is_err());
    }

    #[test]
    fn dominant_must_be_max() {
        let a = analysis(&[("happy", 0.3), ("sad", 0.7)], "happy");
        let err = a.validate().unwrap_err();
        assert!(err.to_string().contains("not the highest"));
    }

    #[test]
    fn dominant_must_exist() {
        let a = analysis(&[("neutral", 1.0)], "angry");
        assert!(a.validate().is_err());
    }

    #[test]
    fn empty_scores_rejected() {
        assert!(analysis(&[], "neutral").validate().is_err());
    }

    #[test]
    fn ties_allowed_for_dominant() {
        let a = analysis(&[("happy", 0.5), ("surprised", 0.5)], "surprised");
        assert!(a.validate().is_ok());
    }

    #[test]
    fn ranked_highest_first() {
        let a = analysis(&[("happy", 0.2), ("neutral", 0.1), ("sad", 0.7)], "sad");
        let labels: Vec<&str> = a.ranked().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["sad", "happy", "neutral"]);
    }

    #[test]
    fn deserializes_service_shape() {
        let json = r#"{
            "emotions": { "happy": 0.75, "sad": 0, "angry": 0, "surprised": 0, "neutral": 0.25 },
            "dominantEmotion": "happy",
            "suggestions": ["That's wonderful!"]
        }"#;
        let a: EmotionAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(a.dominant_emotion, "happy");
        assert_eq!(a.suggestions.len(), 1);
        assert!(a.validate().is_ok());
    }

    #[test]
    fn url_joins_endpoint() {
        let client = EmotionClient::new("http://localhost:5001/api/emotion/").unwrap();
        assert_eq!(client.url(), "http://localhost:5001/api/emotion/analyze");
    }

    #[tokio::test]
    async fn blank_text_not_sent() {
        let client = EmotionClient::new("http://127.0.0.1:9").unwrap();
        assert!(matches!(client.analyze("  ").await, Err(ChatError::EmptyText)));
    }
}
