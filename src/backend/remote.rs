use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Method;
use tracing::debug;

use super::Backend;
use crate::config::RemoteConfig;
use crate::error::{Error, Result};
use crate::models::{NewWorkout, WorkoutEntry};

/// A hosted table reached through its REST endpoint (`/rest/v1/<table>`).
pub struct RemoteBackend {
    client: Client,
    endpoint: String,
    anon_key: String,
}

impl RemoteBackend {
    pub fn new(config: &RemoteConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: &RemoteConfig, client: Client) -> Self {
        RemoteBackend {
            client,
            endpoint: format!(
                "{}/rest/v1/{}",
                config.url.trim_end_matches('/'),
                config.table
            ),
            anon_key: config.anon_key.clone(),
        }
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, &self.endpoint)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }
}

fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(Error::Status { status, body })
}

impl Backend for RemoteBackend {
    fn fetch_all(&mut self) -> Result<Vec<WorkoutEntry>> {
        let response = self
            .request(Method::GET)
            .query(&[("select", "*"), ("order", "date.desc")])
            .send()?;
        let entries: Vec<WorkoutEntry> = check(response)?.json()?;
        debug!("fetched {} workouts from {}", entries.len(), self.endpoint);
        Ok(entries)
    }

    fn insert(&mut self, new: NewWorkout) -> Result<WorkoutEntry> {
        let response = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(&[new])
            .send()?;
        let rows: Vec<WorkoutEntry> = check(response)?.json()?;
        rows.into_iter().next().ok_or(Error::EmptyResponse)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE)
            .query(&[("id", format!("eq.{}", id))])
            .send()?;
        check(response)?;
        Ok(())
    }

    fn sync(&mut self, _entries: &[WorkoutEntry]) -> Result<()> {
        // The table has no order column; reordering lasts for this session only.
        Ok(())
    }
}
