mod dto;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::env;

use lesson_core::model::{Exercise, LessonDetail, LessonId, LessonOverview, Level, VocabWord};

use crate::backend::{ApiError, LessonRepository, ProgressSink, WordRepository};
use dto::{CompletionBody, ExerciseDto, LessonDto, WordDto};

/// Where the backend lives. Read once at startup; the rest of the client
/// never touches the environment.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("DEUTSCH_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "http://localhost:5000/api".into());
        Self { base_url }
    }
}

/// REST client for the lesson backend.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|err| ApiError::Connection(err.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[async_trait]
impl LessonRepository for HttpBackend {
    async fn list_lessons(&self) -> Result<Vec<LessonOverview>, ApiError> {
        let rows: Vec<LessonDto> = self.get_json("lessons").await?;
        Ok(rows.iter().map(LessonDto::overview).collect())
    }

    async fn get_lesson(&self, id: &LessonId) -> Result<LessonDetail, ApiError> {
        let row: LessonDto = self.get_json(&format!("lessons/{id}")).await?;
        Ok(row.into_domain())
    }

    async fn lesson_exercises(&self, id: &LessonId) -> Result<Vec<Exercise>, ApiError> {
        let rows: Vec<ExerciseDto> = self.get_json(&format!("lessons/{id}/exercises")).await?;
        Ok(dto::exercises_into_domain(rows))
    }

    async fn lesson_words(&self, id: &LessonId) -> Result<Vec<VocabWord>, ApiError> {
        let rows: Vec<WordDto> = self.get_json(&format!("lessons/{id}/words")).await?;
        Ok(dto::words_into_domain(rows))
    }
}

#[async_trait]
impl WordRepository for HttpBackend {
    async fn random_words(
        &self,
        count: u32,
        level: Option<Level>,
    ) -> Result<Vec<VocabWord>, ApiError> {
        let path = match level {
            Some(level) => format!("words/random/{count}?level={level}"),
            None => format!("words/random/{count}"),
        };
        let rows: Vec<WordDto> = self.get_json(&path).await?;
        Ok(dto::words_into_domain(rows))
    }
}

#[async_trait]
impl ProgressSink for HttpBackend {
    async fn post_completion(&self, lesson: &LessonId, score_percent: u8) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url(&format!("lessons/{lesson}/complete")))
            .json(&CompletionBody {
                score: score_percent,
            })
            .send()
            .await
            .map_err(|err| ApiError::Connection(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_points_at_local_backend() {
        let config = ApiConfig::new("http://localhost:5000/api/");
        let backend = HttpBackend::new(&config);
        assert_eq!(
            backend.url("lessons/l1/exercises"),
            "http://localhost:5000/api/lessons/l1/exercises"
        );
    }
}
