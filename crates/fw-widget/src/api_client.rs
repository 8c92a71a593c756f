use fw_core::error::AppError;
use fw_core::feedback::FeedbackEntry;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin client for the logging endpoint. One attempt per call, no retries;
/// the pipeline treats any failure as "keep the local copy".
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let base_url: String = base_url.into();
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| AppError::Network(err.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub async fn submit(&self, entry: &FeedbackEntry) -> Result<(), AppError> {
        let response = self
            .client
            .post(format!("{}/api/feedback", self.base_url))
            .json(entry)
            .send()
            .await
            .map_err(|err| AppError::Network(err.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "endpoint returned status {}",
                response.status()
            )));
        }
        Ok(())
    }

    pub async fn fetch_all(&self) -> Result<Vec<FeedbackEntry>, AppError> {
        #[derive(Deserialize)]
        struct ListBody {
            feedback: Vec<FeedbackEntry>,
        }

        let response = self
            .client
            .get(format!("{}/api/feedback", self.base_url))
            .send()
            .await
            .map_err(|err| AppError::Network(err.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "endpoint returned status {}",
                response.status()
            )));
        }

        let body: ListBody = response
            .json()
            .await
            .map_err(|err| AppError::Network(err.to_string()))?;
        Ok(body.feedback)
    }
}
