use clap::Parser;
use color_eyre::Result;
use fc_metrics::{
    init_errors,
    logging,
    App,
    Args,
    Config,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_errors()?;
    let args = Args::parse();
    logging::log_init(args.debug)?;

    App::new(Config::new(args)?).run().await
}
