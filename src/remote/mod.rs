//! Remote save
//!
//! The transport is supplied by the host through `RemoteSink`. Remote sync
//! is independent of the local history log: a failure is reported to the
//! caller and logged, and local snapshots are never touched.

use serde::{Deserialize, Serialize};

use crate::errors::TabError;
use crate::models::Tab;

/// Body of a remote save request
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct RemotePayload {
    pub token: String,
    /// The encoded document
    pub data: String,
    pub id: String,
}

impl RemotePayload {
    pub fn for_tab(tab: &Tab, token: impl Into<String>) -> Result<Self, TabError> {
        Ok(Self {
            token: token.into(),
            data: tab.encode()?,
            id: tab.id.clone(),
        })
    }

    pub fn to_json(&self) -> Result<String, TabError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Delivers a payload to a remote endpoint
pub trait RemoteSink {
    /// `Err` carries a human-readable reason (status line, network error, ...)
    fn put(&mut self, endpoint: &str, payload: &RemotePayload) -> Result<(), String>;
}

/// The tab upload endpoint on `server_url`
pub fn tab_endpoint(server_url: &str) -> String {
    format!("{}/tab/", server_url.trim_end_matches('/'))
}

/// Send `tab` to `server_url` through `sink`
pub fn sync_to_remote(
    tab: &Tab,
    sink: &mut dyn RemoteSink,
    server_url: &str,
    token: &str,
) -> Result<(), TabError> {
    let endpoint = tab_endpoint(server_url);
    let payload = RemotePayload::for_tab(tab, token)?;

    sink.put(&endpoint, &payload).map_err(|reason| {
        log::warn!("remote save of tab {} failed: {}", tab.id, reason);
        TabError::RemoteSync { endpoint, reason }
    })?;

    log::info!("tab {} saved to {}", tab.id, server_url);
    Ok(())
}
