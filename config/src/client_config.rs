use serde::{
    Deserialize,
    Serialize,
};
use strum::{
    Display,
    EnumString,
};

/// Which metric identifiers are requested for every listed host.
#[derive(Debug, Default, Clone, Copy, Display, EnumString, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MetricCatalog {
    /// Host-level catalog, 15 identifiers.
    #[default]
    Host,
    /// VM-level catalog, 9 identifiers.
    Vm,
}

/// Certificate verification for the HTTPS connection to the platform.
#[derive(Debug, Default, Clone, Copy, Display, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub enum TlsPolicy {
    #[default]
    Verify,
    /// Trust any certificate the server presents. Must be opted into explicitly.
    AcceptInvalidCerts,
}

impl TlsPolicy {
    pub fn from_accept_invalid_certs(accept: bool) -> Self {
        if accept {
            Self::AcceptInvalidCerts
        } else {
            Self::Verify
        }
    }

    pub fn accepts_invalid_certs(self) -> bool {
        matches!(self, Self::AcceptInvalidCerts)
    }
}
