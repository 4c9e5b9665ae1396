//! # Collectors
//!
//! The network side of a run, in the order the calls are made:
//!
//! - **`hosts`**: lists one page of hosts of a site
//! - **`realtime`**: asks for the realtime values of a metric catalog for all listed hosts in one request
//! - **`Orchestrator`**: logs in, drives both collectors and renders the result, one stage at a time

pub mod hosts;
pub mod orchestrator;
pub mod realtime;

pub use hosts::{
    list_hosts,
    Page,
};
pub use orchestrator::{
    Orchestrator,
    Stage,
};
pub use realtime::{
    build_request,
    request_metrics,
};

use crate::error::{
    Error,
    Result,
};
use serde::de::DeserializeOwned;

/// Fails on non-2xx status, then decodes the JSON body.
pub(crate) async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let url = response.url().clone();
    let response = response.error_for_status().map_err(|e| Error::request(&url, e))?;
    let body = response.bytes().await.map_err(|e| Error::request(&url, e))?;
    serde_json::from_slice(&body).map_err(|e| Error::decode(&url, e))
}
