use serde::{
    Deserialize,
    Serialize,
};

/// A host registered at a site, as returned by the host listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub urn: String,
    pub name: String,
    pub ip: String,
}

/// Body of `GET .../hosts`. Other fields of the page (totals, cluster data) are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct HostPage {
    pub(crate) hosts: Vec<Host>,
}
