use crate::{
    auth,
    collectors::{
        hosts::{
            self,
            Page,
        },
        realtime,
    },
    endpoint,
    error::{
        Error,
        Result,
    },
    metrics::{
        Host,
        MetricResponseItem,
    },
    render::{
        self,
        RenderedSample,
    },
    transport::{
        self,
        Transport,
    },
};
use fc_metrics_config::{
    Config,
    MetricCatalog,
};
use strum::Display;
use url::Url;

/// Where a run currently stands. Stages only ever move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum Stage {
    Unauthenticated,
    Authenticated,
    HostsListed,
    MetricsFetched,
    Rendered,
}

/// Drives one collection run: login, host listing, realtime request, rendering.
pub struct Orchestrator {
    base_url: Url,
    site_url: Url,
    user: String,
    password: String,
    page: Page,
    catalog: MetricCatalog,
    max_hosts_per_request: usize,
    transport: Transport,
    stage: Stage,
    hosts: Vec<Host>,
    items: Vec<MetricResponseItem>,
}

impl Orchestrator {
    /// Create the HTTP client once and resolve the site endpoint.
    pub fn new(config: &Config) -> Result<Self> {
        let client = transport::build_client(config.tls_policy(), config.request_timeout)?;
        Self::with_client(config, client)
    }

    pub fn with_client(config: &Config, client: reqwest::Client) -> Result<Self> {
        let site_url = endpoint::site_url(&config.url, &config.site_id)?;
        debug!(%site_url, catalog = %config.catalog, "Resolved site endpoint");

        Ok(Self {
            base_url: config.url.clone(),
            site_url,
            user: config.user.clone(),
            password: config.password.clone(),
            page: Page {
                limit: config.limit,
                offset: config.offset,
            },
            catalog: config.catalog,
            max_hosts_per_request: config.max_hosts_per_request,
            transport: Transport::new(client),
            stage: Stage::Unauthenticated,
            hosts: Vec::new(),
            items: Vec::new(),
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    fn expect_stage(&self, expected: Stage, action: &'static str) -> Result<()> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(Error::Stage {
                stage: self.stage,
                action,
            })
        }
    }

    fn advance(&mut self, to: Stage) {
        debug!(from = %self.stage, %to, "Stage transition");
        self.stage = to;
    }

    pub async fn authenticate(&mut self) -> Result<()> {
        self.expect_stage(Stage::Unauthenticated, "log in")?;
        let session = auth::login(self.transport.client(), &self.base_url, &self.user, &self.password).await?;
        self.transport.install_session(session);
        self.advance(Stage::Authenticated);
        Ok(())
    }

    pub async fn list_hosts(&mut self) -> Result<&[Host]> {
        self.expect_stage(Stage::Authenticated, "list hosts")?;
        self.hosts = hosts::list_hosts(&self.transport, &self.site_url, self.page).await?;
        self.advance(Stage::HostsListed);
        Ok(&self.hosts)
    }

    pub async fn fetch_metrics(&mut self) -> Result<&[MetricResponseItem]> {
        self.expect_stage(Stage::HostsListed, "request metrics")?;
        self.items = realtime::request_metrics(
            &self.transport,
            &self.site_url,
            &self.hosts,
            self.catalog,
            self.max_hosts_per_request,
        )
        .await?;
        self.advance(Stage::MetricsFetched);
        Ok(&self.items)
    }

    pub fn render(&mut self) -> Result<Vec<RenderedSample>> {
        self.expect_stage(Stage::MetricsFetched, "render")?;
        let samples = render::render(&self.items)?;
        self.advance(Stage::Rendered);
        Ok(samples)
    }

    /// All stages in order. The first failure ends the run, later stages are never attempted.
    pub async fn run(mut self) -> Result<Vec<RenderedSample>> {
        self.authenticate().await?;
        self.list_hosts().await?;
        self.fetch_metrics().await?;
        self.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{
            method,
            path,
        },
        Mock,
        MockServer,
        ResponseTemplate,
    };

    fn config(server: &MockServer) -> Config {
        Config::from_yaml(&format!("url: {}\nuser: admin\npassword: secret\n", server.uri())).unwrap()
    }

    async fn mount_login(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/session"))
            .respond_with(ResponseTemplate::new(200).insert_header("X-Auth-Token", "tok"))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn stages_cannot_be_skipped() {
        let server = MockServer::start().await;
        let mut orchestrator = Orchestrator::new(&config(&server)).unwrap();

        assert_eq!(orchestrator.stage(), Stage::Unauthenticated);
        assert!(matches!(
            orchestrator.list_hosts().await,
            Err(Error::Stage {
                stage: Stage::Unauthenticated,
                ..
            })
        ));
        assert!(matches!(orchestrator.render(), Err(Error::Stage { .. })));
    }

    #[tokio::test]
    async fn stages_cannot_be_repeated() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        let mut orchestrator = Orchestrator::new(&config(&server)).unwrap();

        orchestrator.authenticate().await.unwrap();
        assert_eq!(orchestrator.stage(), Stage::Authenticated);
        assert!(matches!(orchestrator.authenticate().await, Err(Error::Stage { .. })));
    }

    #[tokio::test]
    async fn failed_login_stops_the_run() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/session"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = Orchestrator::new(&config(&server)).unwrap().run().await;
        assert!(matches!(result, Err(Error::Authentication(_))));
    }

    #[tokio::test]
    async fn empty_site_renders_nothing() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("GET"))
            .and(path("/service/sites/1/hosts"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"hosts":[]}"#))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/service/sites/1/monitors/realtimedata"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(0)
            .mount(&server)
            .await;

        let samples = Orchestrator::new(&config(&server)).unwrap().run().await.unwrap();
        assert!(samples.is_empty());
    }
}
