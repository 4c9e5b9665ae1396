use crate::{
    collectors::decode_json,
    endpoint,
    error::Result,
    metrics::{
        host::HostPage,
        Host,
    },
    transport::Transport,
};
use url::Url;

/// One page of a listing. Only a single page is ever requested per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self { limit: 100, offset: 0 }
    }
}

/// `GET {site_url}/hosts?limit=..&offset=..`, hosts in response order.
pub async fn list_hosts(transport: &Transport, site_url: &Url, page: Page) -> Result<Vec<Host>> {
    let mut url = endpoint::join_path(site_url, &["hosts"])?;
    url.query_pairs_mut()
        .append_pair("limit", &page.limit.to_string())
        .append_pair("offset", &page.offset.to_string());

    debug!(%url, "Listing hosts");
    let page: HostPage = decode_json(transport.get(url).await?).await?;

    info!(count = page.hosts.len(), "Listed hosts");
    for host in &page.hosts {
        info!(urn = %host.urn, name = %host.name, ip = %host.ip, "Host");
    }

    Ok(page.hosts)
}
