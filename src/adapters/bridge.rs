//! HTTP bridge to a media adapter living in another process.
//!
//! The page (or native client) that owns the real WebRTC adapter exposes a
//! small JSON endpoint set; this adapter maps [`MediaAdapter`] calls onto it.
//!
//! | Call | Request |
//! |------|---------|
//! | `state` | `GET {base}/state` |
//! | `server_stats` | `GET {base}/server-stats` |
//! | `stats(Transport(send))` | `GET {base}/stats/transport/send` |
//! | `stats(Producer(id))` | `GET {base}/stats/producer/{id}` |
//! | `stats(Consumer(id))` | `GET {base}/stats/consumer/{id}` |
//! | `restart_send_ice` | `POST {base}/actions/restart-send-ice` |
//! | `restart_recv_ice` | `POST {base}/actions/restart-recv-ice` |
//! | `connect` / `disconnect` | `POST {base}/actions/connect` / `disconnect` |
//!
//! Presence data carried in the `/state` payload is mirrored into a
//! [`SharedRoster`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{AdapterError, AdapterResult};
use crate::models::{AdapterState, ServerStats};
use crate::stats::StatsReport;
use crate::traits::{HttpClient, MediaAdapter, Response, SharedRoster, StatsTarget};

/// [`MediaAdapter`] backed by an HTTP bridge.
pub struct HttpMediaAdapter<C: HttpClient> {
    client: C,
    base_url: String,
    roster: SharedRoster,
}

impl<C: HttpClient> HttpMediaAdapter<C> {
    /// Adapter for the bridge at `base_url`; a trailing slash is ignored.
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            roster: SharedRoster::new(),
        }
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Roster kept in sync with the bridge's presence data.
    pub fn roster(&self) -> SharedRoster {
        self.roster.clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn stats_path(target: &StatsTarget) -> String {
        match target {
            StatsTarget::Transport(direction) => {
                format!("/stats/transport/{}", direction.as_path())
            }
            StatsTarget::Producer(id) => format!("/stats/producer/{}", urlencoding::encode(id)),
            StatsTarget::Consumer(id) => format!("/stats/consumer/{}", urlencoding::encode(id)),
        }
    }

    fn check(response: Response, what: &str) -> AdapterResult<Response> {
        match response.status {
            s if (200..300).contains(&s) => Ok(response),
            404 => Err(AdapterError::Unavailable(what.to_string())),
            status => Err(AdapterError::Status {
                status,
                message: response.text(),
            }),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> AdapterResult<T> {
        let response = self.client.get(&self.url(path)).await?;
        let response = Self::check(response, what)?;
        Ok(response.json()?)
    }

    async fn action(&self, name: &str) -> AdapterResult<()> {
        tracing::info!(action = name, "forwarding action to adapter bridge");
        let response = self
            .client
            .post(&self.url(&format!("/actions/{}", name)), "{}")
            .await?;
        Self::check(response, name).map(|_| ())
    }
}

#[async_trait]
impl<C: HttpClient> MediaAdapter for HttpMediaAdapter<C> {
    async fn state(&self) -> AdapterResult<AdapterState> {
        let state: AdapterState = self.get_json("/state", "adapter state").await?;
        self.roster.replace(
            state
                .presences
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        Ok(state)
    }

    async fn server_stats(&self) -> AdapterResult<ServerStats> {
        self.get_json("/server-stats", "server stats").await
    }

    async fn stats(&self, target: &StatsTarget) -> AdapterResult<StatsReport> {
        self.get_json(&Self::stats_path(target), &target.to_string())
            .await
    }

    async fn restart_send_ice(&self) -> AdapterResult<()> {
        self.action("restart-send-ice").await
    }

    async fn restart_recv_ice(&self) -> AdapterResult<()> {
        self.action("restart-recv-ice").await
    }

    async fn connect(&self) -> AdapterResult<()> {
        self.action("connect").await
    }

    async fn disconnect(&self) -> AdapterResult<()> {
        self.action("disconnect").await
    }
}
