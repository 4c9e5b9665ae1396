use color_eyre::Result;
use eyre::Context as _;
use fc_metrics_config::Config;
use fc_metrics_gatherer::Orchestrator;
use std::io::{
    self,
    Write,
};

/// A single collection run: everything is fetched and rendered before the first line is written.
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    #[instrument(level = "debug", skip(self), fields(url = %self.config.url, site = %self.config.site_id))]
    pub async fn run(self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = io::BufWriter::new(stdout.lock());
        self.run_to(&mut out).await?;
        out.flush().context("Failed to flush metric lines")
    }

    pub async fn run_to(self, out: &mut impl Write) -> Result<()> {
        let samples = Orchestrator::new(&self.config)?
            .run()
            .await
            .wrap_err("Metric collection aborted")?;

        info!(samples = samples.len(), "Rendered metric lines");
        for sample in samples {
            writeln!(out, "{sample}").context("Failed to write metric line")?;
        }
        Ok(())
    }
}
