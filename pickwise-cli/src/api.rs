/// HTTP client for the itinerary service.
///
/// Every failure comes back as a human-readable message. Nothing here
/// touches the ranking state, so a failed request can simply be retried.
use pickwise_core::{Constraints, Event, Itinerary, ItineraryRequest, ScoredEvent};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

pub struct ApiClient {
    client: Client,
    endpoint: String,
}

impl ApiClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        ApiClient {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, String> {
        let url = self.url(path);
        debug!(%url, "POST");

        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| format!("Could not reach the itinerary service: {e}"))?;

        if !resp.status().is_success() {
            return Err(failure_message(resp).await);
        }

        resp.json()
            .await
            .map_err(|e| format!("Unexpected response from the itinerary service: {e}"))
    }

    /// Candidate activities for the given constraints.
    pub async fn generate_activities(&self, constraints: &Constraints) -> Result<Vec<Event>, String> {
        self.post("/generate_activities", constraints).await
    }

    /// An itinerary weighted by the per-candidate scores.
    pub async fn generate_itinerary(
        &self,
        constraints: &Constraints,
        events: &[ScoredEvent],
    ) -> Result<Itinerary, String> {
        let body = ItineraryRequest { constraints, events };
        self.post("/generate_itinerary", &body).await
    }
}

async fn failure_message(resp: Response) -> String {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    error_text(status, &body)
}

/// The service's own error text if it sent one, otherwise the status.
fn error_text(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("Request failed ({})", status.as_u16())
    } else {
        body.to_string()
    }
}
