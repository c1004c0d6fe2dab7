use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use geo_enu::config::{CliArgs, PipelineConfig};
use geo_enu::pipeline::Pipeline;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Init tracing; logs go to stderr so stdout stays clean for results
    let filter = if args.verbose {
        EnvFilter::new("geo_enu=debug")
    } else {
        EnvFilter::new("geo_enu=info")
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if args.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config: PipelineConfig = args.into();

    // Configure rayon thread pool
    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure rayon thread pool")?;
    }

    match Pipeline::run(&config) {
        Ok(result) => {
            eprintln!(
                "Done: {} points converted in {:.3}s",
                result.point_count,
                result.duration.as_secs_f64()
            );
            Ok(())
        }
        Err(e) => {
            error!(%e, "Conversion failed");
            Err(anyhow::anyhow!(e)).context("geo-enu conversion failed")
        }
    }
}
