use crate::error::{
    Error,
    Result,
};
use url::Url;

/// Appends path segments to `base`, tolerating a trailing slash on the base path.
pub fn join_path(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| Error::Url(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// `{base}/session`
pub fn session_url(base: &Url) -> Result<Url> {
    join_path(base, &["session"])
}

/// `{base}/service/sites/{site_id}`
pub fn site_url(base: &Url, site_id: &str) -> Result<Url> {
    join_path(base, &["service", "sites", site_id])
}
