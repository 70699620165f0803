//! REST client for the persistence service.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::PersistenceService;
use crate::config::BoardConfig;
use crate::error::{PersistenceError, PersistenceResult};
use crate::models::{Card, Expense, Need, ScoutingMedia, Todo};

#[derive(Serialize)]
struct LoginArgs<'a> {
    password: &'a str,
}

#[derive(Serialize)]
struct SettingArgs<'a> {
    value: &'a str,
}

#[derive(Deserialize)]
struct SettingValue {
    value: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReorderArgs<'a> {
    photo_ids: &'a [String],
}

/// JSON-over-HTTP implementation of [`PersistenceService`].
#[derive(Debug, Clone)]
pub struct HttpPersistence {
    client: Client,
    base_url: String,
}

impl HttpPersistence {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check the shared password. `Ok(false)` means the service refused it.
    pub async fn login(&self, password: &str) -> PersistenceResult<bool> {
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&LoginArgs { password })
            .send()
            .await
            .map_err(transport)?;
        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::UNAUTHORIZED => Ok(false),
            status => Err(PersistenceError::Server {
                status: status.as_u16(),
            }),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> PersistenceResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(transport)?;
        let response = check_status(response)?;
        response
            .json::<T>()
            .await
            .map_err(|e| PersistenceError::Decode(e.to_string()))
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> PersistenceResult<()> {
        debug!(%method, path, "persistence write");
        let response = self
            .client
            .request(method, self.url(path))
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        check_status(response).map(|_| ())
    }

    async fn delete(&self, path: &str) -> PersistenceResult<()> {
        debug!(path, "persistence delete");
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .map_err(transport)?;
        check_status(response).map(|_| ())
    }
}

fn transport(err: reqwest::Error) -> PersistenceError {
    PersistenceError::Transport(err.to_string())
}

fn check_status(response: reqwest::Response) -> PersistenceResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(PersistenceError::Server {
            status: status.as_u16(),
        })
    }
}

#[async_trait(?Send)]
impl PersistenceService for HttpPersistence {
    async fn list_cards(&self) -> PersistenceResult<Vec<Card>> {
        self.get_json("/api/cards").await
    }

    async fn create_card(&self, card: &Card) -> PersistenceResult<()> {
        self.send_json(Method::POST, "/api/cards", card).await
    }

    async fn update_card(&self, id: &str, card: &Card) -> PersistenceResult<()> {
        self.send_json(Method::PUT, &format!("/api/cards/{}", id), card)
            .await
    }

    async fn delete_card(&self, id: &str) -> PersistenceResult<()> {
        self.delete(&format!("/api/cards/{}", id)).await
    }

    async fn list_needs(&self) -> PersistenceResult<Vec<Need>> {
        self.get_json("/api/needs").await
    }

    async fn create_need(&self, need: &Need) -> PersistenceResult<()> {
        self.send_json(Method::POST, "/api/needs", need).await
    }

    async fn delete_need(&self, id: &str) -> PersistenceResult<()> {
        self.delete(&format!("/api/needs/{}", id)).await
    }

    async fn list_todos(&self) -> PersistenceResult<Vec<Todo>> {
        self.get_json("/api/todos").await
    }

    async fn create_todo(&self, todo: &Todo) -> PersistenceResult<()> {
        self.send_json(Method::POST, "/api/todos", todo).await
    }

    async fn update_todo(&self, id: &str, todo: &Todo) -> PersistenceResult<()> {
        self.send_json(Method::PUT, &format!("/api/todos/{}", id), todo)
            .await
    }

    async fn delete_todo(&self, id: &str) -> PersistenceResult<()> {
        self.delete(&format!("/api/todos/{}", id)).await
    }

    async fn get_setting(&self, key: &str) -> PersistenceResult<Option<String>> {
        let setting: SettingValue = self.get_json(&format!("/api/settings/{}", key)).await?;
        Ok(setting.value)
    }

    async fn set_setting(&self, key: &str, value: &str) -> PersistenceResult<()> {
        self.send_json(
            Method::POST,
            &format!("/api/settings/{}", key),
            &SettingArgs { value },
        )
        .await
    }

    async fn list_expenses(&self) -> PersistenceResult<Vec<Expense>> {
        self.get_json("/api/budget/expenses").await
    }

    async fn create_expense(&self, expense: &Expense) -> PersistenceResult<()> {
        self.send_json(Method::POST, "/api/budget/expenses", expense)
            .await
    }

    async fn update_expense(&self, id: &str, expense: &Expense) -> PersistenceResult<()> {
        self.send_json(Method::PUT, &format!("/api/budget/expenses/{}", id), expense)
            .await
    }

    async fn delete_expense(&self, id: &str) -> PersistenceResult<()> {
        self.delete(&format!("/api/budget/expenses/{}", id)).await
    }

    async fn list_media(&self) -> PersistenceResult<Vec<ScoutingMedia>> {
        self.get_json("/api/scouting/photos").await
    }

    async fn create_media(&self, media: &ScoutingMedia) -> PersistenceResult<()> {
        self.send_json(Method::POST, "/api/scouting/photos", media)
            .await
    }

    async fn update_media(&self, id: &str, media: &ScoutingMedia) -> PersistenceResult<()> {
        self.send_json(Method::PUT, &format!("/api/scouting/photos/{}", id), media)
            .await
    }

    async fn delete_media(&self, id: &str) -> PersistenceResult<()> {
        self.delete(&format!("/api/scouting/photos/{}", id)).await
    }

    async fn reorder_photos(&self, ordered_ids: &[String]) -> PersistenceResult<()> {
        self.send_json(
            Method::POST,
            "/api/scouting/photos/reorder",
            &ReorderArgs {
                photo_ids: ordered_ids,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped() {
        let http = HttpPersistence::new("http://localhost:3000/");
        assert_eq!(http.base_url(), "http://localhost:3000");
        assert_eq!(http.url("/api/cards"), "http://localhost:3000/api/cards");
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let http = HttpPersistence::new("http://127.0.0.1:9");
        match http.list_cards().await {
            Err(PersistenceError::Transport(_)) => {}
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
