//! # fc-metrics gatherer
//!
//! Collects realtime metrics of the hosts of one FusionCompute site over the platform's HTTP API.
//!
//! ## Architecture
//!
//! - **`transport`**: HTTP client construction and the [`Transport`] that stamps the session token and versioned
//!   JSON headers on every authenticated call
//! - **`auth`**: login endpoint, produces the [`Session`]
//! - **`collectors`**: host listing, the batched realtime request and the [`Orchestrator`] running them in order
//! - **`metrics`**: wire types and the host/VM metric catalogs
//! - **`render`**: flattens the realtime response into `metric{name="object"}=value` lines
//!
//! ## Usage
//!
//! ```no_run
//! # async fn run(config: fc_metrics_config::Config) -> fc_metrics_gatherer::Result<()> {
//! use fc_metrics_gatherer::Orchestrator;
//!
//! for sample in Orchestrator::new(&config)?.run().await? {
//!     println!("{sample}");
//! }
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate tracing;

pub mod auth;
pub mod collectors;
pub mod endpoint;
pub mod error;
pub mod metrics;
pub mod render;
pub mod transport;

pub use auth::Session;
pub use collectors::{
    build_request,
    list_hosts,
    request_metrics,
    Orchestrator,
    Page,
    Stage,
};
pub use error::{
    Error,
    Result,
};
pub use metrics::{
    metric_ids,
    Host,
    MetricRequestEntry,
    MetricResponseItem,
    MetricSample,
    MetricValue,
};
pub use render::{
    render,
    RenderedSample,
};
pub use transport::Transport;
