use super::config_dir;
use crate::cli::GenerateArgs;
use crate::config::PartialRunConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use crate::writers::{CsvReplicaWriter, EXCHANGE_GROUPS_FILE, REPLICA_TABLE_FILE, TomlGroupWriter};
use remdkit::engine::progress::ProgressReporter;
use remdkit::workflows::generate::{self, GenerationPlan};
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run(args: GenerateArgs) -> Result<()> {
    let partial_config = PartialRunConfig::from_file(&args.config)?;
    info!("Merging configuration from file and CLI arguments...");
    let run_config = partial_config.merge_with_cli(&args, &config_dir(&args.config))?;

    let replica_path = args.output.join(REPLICA_TABLE_FILE);
    let groups_path = args.output.join(EXCHANGE_GROUPS_FILE);
    if !args.dry_run && !args.force {
        ensure_absent(&replica_path)?;
        ensure_absent(&groups_path)?;
    }

    info!("Loading exchange dimensions...");
    let set = generate::load_dimensions(&run_config.dimensions)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Generating replica layout...");
    let plan = generate::run(&set, &run_config.generation, &reporter)?;
    print_summary(&plan);

    if args.dry_run {
        println!("Dry run: no files written.");
        return Ok(());
    }

    // Render both documents before touching the output directory.
    let mut replica_writer = CsvReplicaWriter::new(Vec::new());
    let mut group_writer = TomlGroupWriter::new(Vec::new());
    generate::write_plan(&plan, &mut replica_writer, &mut group_writer)?;
    let replica_table = replica_writer.into_inner()?;
    let group_document = group_writer.into_inner();

    std::fs::create_dir_all(&args.output)?;
    info!("Writing replica table to {:?}", &replica_path);
    std::fs::write(&replica_path, replica_table)?;
    println!("✓ Replica table written to: {}", replica_path.display());

    // Plain MD runs have no exchange groups and get no group document.
    if plan.exchange_groups.is_empty() {
        if groups_path.exists() {
            info!("Removing stale exchange groups at {:?}", &groups_path);
            std::fs::remove_file(&groups_path)?;
        }
    } else {
        info!("Writing exchange groups to {:?}", &groups_path);
        std::fs::write(&groups_path, group_document)?;
        println!("✓ Exchange groups written to: {}", groups_path.display());
    }
    Ok(())
}

fn ensure_absent(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(CliError::OutputExists(PathBuf::from(path)));
    }
    Ok(())
}

fn print_summary(plan: &GenerationPlan) {
    println!(
        "{} replica(s), {} increment mode.",
        plan.total_replicas(),
        plan.increment_mode
    );
    for table in &plan.exchange_groups {
        println!(
            "  dimension {} [{}] {}: {} group(s) of {} - {}",
            table.dimension,
            table.kind,
            table.protocol,
            table.groups.len(),
            table.groups.first().map_or(0, |g| g.members.len()),
            table.description
        );
    }
    for (warning, count) in &plan.warnings {
        println!("  warning: {} ({} replica(s))", warning, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn setup_run(dir: &TempDir) -> PathBuf {
        fs::write(
            dir.path().join("temperatures.toml"),
            r#"
            kind = "temperature"
            temperatures = [300.0, 320.0, 340.0]
            "#,
        )
        .unwrap();
        let config = dir.path().join("run.toml");
        fs::write(
            &config,
            r#"
            [defaults]
            topology = "system.parm7"

            [[dimension]]
            file = "temperatures.toml"

            [[dimension]]
            kind = "ph"
            ph = [6.5, 7.5]
            "#,
        )
        .unwrap();
        config
    }

    fn generate_args(config: &Path, output: &Path, extra: &[&str]) -> GenerateArgs {
        let mut argv = vec![
            "remdkit".to_string(),
            "generate".to_string(),
            "-c".to_string(),
            config.to_string_lossy().to_string(),
            "-o".to_string(),
            output.to_string_lossy().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        match Cli::parse_from(argv).command {
            Commands::Generate(args) => args,
            other => panic!("Expected 'generate' subcommand, got {:?}", other),
        }
    }

    #[test]
    fn generate_writes_replica_table_and_groups() {
        let dir = tempdir().unwrap();
        let config = setup_run(&dir);
        let output = dir.path().join("layout");

        run(generate_args(&config, &output, &[])).unwrap();

        let table = fs::read_to_string(output.join(REPLICA_TABLE_FILE)).unwrap();
        assert_eq!(table.lines().count(), 1 + 6);
        assert!(table.lines().nth(2).unwrap().starts_with("2,\"(1,0)\",320.0,system.parm7,6.5"));

        let groups: toml::Table =
            toml::from_str(&fs::read_to_string(output.join(EXCHANGE_GROUPS_FILE)).unwrap())
                .unwrap();
        assert_eq!(groups["dimension"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempdir().unwrap();
        let config = setup_run(&dir);
        let output = dir.path().join("layout");

        run(generate_args(&config, &output, &["--dry-run"])).unwrap();
        assert!(!output.exists());
    }

    #[test]
    fn existing_output_requires_force() {
        let dir = tempdir().unwrap();
        let config = setup_run(&dir);
        let output = dir.path().join("layout");
        fs::create_dir_all(&output).unwrap();
        fs::write(output.join(REPLICA_TABLE_FILE), "stale").unwrap();

        let result = run(generate_args(&config, &output, &[]));
        assert!(matches!(result, Err(CliError::OutputExists(_))));

        run(generate_args(&config, &output, &["--force"])).unwrap();
        let table = fs::read_to_string(output.join(REPLICA_TABLE_FILE)).unwrap();
        assert!(table.starts_with("replica,coordinate"));
    }

    #[test]
    fn missing_topology_aborts_before_writing() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("run.toml");
        fs::write(
            &config,
            "[[dimension]]\nkind = \"temperature\"\ntemperatures = [300.0, 310.0]\n",
        )
        .unwrap();
        let output = dir.path().join("layout");

        let result = run(generate_args(&config, &output, &[]));
        assert!(matches!(result, Err(CliError::Generation(_))));
        assert!(!output.exists());
    }

    #[test]
    fn plain_md_run_writes_only_replica_table() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("run.toml");
        fs::write(&config, "[defaults]\ntopology = \"system.parm7\"\n").unwrap();
        let output = dir.path().join("layout");

        run(generate_args(&config, &output, &[])).unwrap();
        assert!(output.join(REPLICA_TABLE_FILE).exists());
        assert!(!output.join(EXCHANGE_GROUPS_FILE).exists());
    }

    #[test]
    fn forced_plain_md_run_removes_stale_groups() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("layout");
        run(generate_args(&setup_run(&dir), &output, &[])).unwrap();
        assert!(output.join(EXCHANGE_GROUPS_FILE).exists());

        let config = dir.path().join("plain.toml");
        fs::write(&config, "[defaults]\ntopology = \"system.parm7\"\n").unwrap();
        run(generate_args(&config, &output, &["--force"])).unwrap();

        let table = fs::read_to_string(output.join(REPLICA_TABLE_FILE)).unwrap();
        assert_eq!(table.lines().count(), 1 + 1);
        assert!(!output.join(EXCHANGE_GROUPS_FILE).exists());
    }

    #[test]
    fn failed_generation_leaves_existing_outputs_untouched() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("layout");
        run(generate_args(&setup_run(&dir), &output, &[])).unwrap();
        let table = fs::read_to_string(output.join(REPLICA_TABLE_FILE)).unwrap();
        let groups = fs::read_to_string(output.join(EXCHANGE_GROUPS_FILE)).unwrap();

        let config = dir.path().join("no_topology.toml");
        fs::write(
            &config,
            "[[dimension]]\nkind = \"temperature\"\ntemperatures = [300.0, 310.0]\n",
        )
        .unwrap();
        let result = run(generate_args(&config, &output, &["--force"]));
        assert!(matches!(result, Err(CliError::Generation(_))));

        assert_eq!(fs::read_to_string(output.join(REPLICA_TABLE_FILE)).unwrap(), table);
        assert_eq!(fs::read_to_string(output.join(EXCHANGE_GROUPS_FILE)).unwrap(), groups);
    }
}
