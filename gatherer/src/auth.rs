use crate::{
    endpoint,
    error::{
        Error,
        Result,
    },
    transport::{
        ACCEPT_JSON_V8,
        CONTENT_TYPE_JSON,
        X_AUTH_TOKEN,
    },
};
use reqwest::{
    header::{
        ACCEPT,
        ACCEPT_LANGUAGE,
        CONTENT_TYPE,
    },
    StatusCode,
};
use std::fmt;
use url::Url;

/// Bearer token handed out by the login endpoint. Valid for the lifetime of the run, no expiry is tracked.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}

/// Exchanges user name and password for a [`Session`].
///
/// Sent with the plain client: the login call is the only one that goes out without `X-Auth-Token`.
pub async fn login(client: &reqwest::Client, base_url: &Url, user: &str, password: &str) -> Result<Session> {
    let url = endpoint::session_url(base_url)?;

    debug!(%url, %user, "Requesting session token");

    let response = client
        .post(url)
        .header(ACCEPT, ACCEPT_JSON_V8)
        .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
        .header(ACCEPT_LANGUAGE, "zh_CN")
        .header("X-Auth-User", user)
        .header("X-Auth-Key", password)
        .header("X-Auth-UserType", "0")
        .send()
        .await
        .map_err(|e| Error::Authentication(format!("login request failed: {e}")))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(Error::Authentication(status.to_string()));
    }

    let token = response
        .headers()
        .get(X_AUTH_TOKEN)
        .ok_or_else(|| Error::Authentication("login response carries no X-Auth-Token header".to_string()))?
        .to_str()
        .map_err(|_| Error::Authentication("X-Auth-Token header is not visible ASCII".to_string()))?;

    if token.is_empty() {
        return Err(Error::Authentication("X-Auth-Token header is empty".to_string()));
    }

    info!(%user, "Logged in");
    Ok(Session::new(token))
}
