use super::config_dir;
use crate::cli::InfoArgs;
use crate::config::PartialRunConfig;
use crate::error::Result;
use remdkit::workflows::generate::load_dimensions;
use tracing::info;

pub fn run(args: InfoArgs) -> Result<()> {
    let partial_config = PartialRunConfig::from_file(&args.config)?;
    let dimensions = partial_config.into_dimensions(&config_dir(&args.config));

    info!("Loading exchange dimensions...");
    let set = load_dimensions(&dimensions)?;

    if set.is_empty() {
        println!("No exchange dimensions defined: the run is a single plain MD replica.");
        return Ok(());
    }

    println!(
        "{:<4} {:<14} {:<22} {:>6}  {}",
        "#", "KIND", "PROTOCOL", "SIZE", "DESCRIPTION"
    );
    for (position, dimension) in set.iter().enumerate() {
        println!(
            "{:<4} {:<14} {:<22} {:>6}  {}",
            position,
            dimension.kind().tag(),
            dimension.exchange_protocol().tag(),
            dimension.size(),
            dimension.description()
        );
    }
    println!("Total replicas: {}", set.total_replicas());
    Ok(())
}
