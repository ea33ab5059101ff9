//! CLI handler for the generate command.

use anyhow::Context;
use serde::Serialize;
use sql_obfuscator::delivery::{prompt_overwrite, write_script};
use sql_obfuscator::formatter::Dialect;
use sql_obfuscator::mapping::load_column_specs;
use sql_obfuscator::script::{generate_script, ScriptStats};
use sql_obfuscator::seeds::{load_seeds, SeedData};
use std::path::{Path, PathBuf};

/// JSON output for the generate command
#[derive(Serialize)]
struct GenerateJsonOutput {
    config_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_file: Option<String>,
    custom_seed_files: Vec<String>,
    dry_run: bool,
    statistics: ScriptStats,
}

pub fn run(
    config: PathBuf,
    output: Option<PathBuf>,
    dialect: String,
    custom: Vec<PathBuf>,
    force: bool,
    dry_run: bool,
    json: bool,
) -> anyhow::Result<()> {
    let dialect: Dialect = dialect.parse()?;

    // Defaults are parsed once here and handed to the seed store
    let defaults = SeedData::defaults().context("built-in seed data is invalid")?;
    let seeds = load_seeds(defaults, &custom).context("error loading seed data")?;

    let specs = load_column_specs(&config)
        .with_context(|| format!("error reading mapping file {}", config.display()))?;

    let (script, stats) =
        generate_script(dialect, &seeds, &specs).context("error generating script")?;

    if dry_run {
        if json {
            output_json(&config, None, &custom, true, stats)?;
        } else {
            print!("{}", script);
        }
        return Ok(());
    }

    let output = output.context("--output is required unless --dry-run is given")?;
    let result = if force {
        write_script(&output, &script, |_| Ok(true))
    } else {
        write_script(&output, &script, prompt_overwrite)
    };
    let written = result.context("error writing file")?;

    if json {
        output_json(&config, Some(output.as_path()), &custom, false, stats)?;
    } else {
        eprintln!(
            "Wrote {} bytes to {} ({} tables, {} columns, {} seed rows)",
            written,
            output.display(),
            stats.tables,
            stats.columns,
            stats.seed_rows
        );
    }

    Ok(())
}

fn output_json(
    config: &Path,
    output: Option<&Path>,
    custom: &[PathBuf],
    dry_run: bool,
    statistics: ScriptStats,
) -> anyhow::Result<()> {
    let out = GenerateJsonOutput {
        config_file: config.display().to_string(),
        output_file: output.map(|p| p.display().to_string()),
        custom_seed_files: custom.iter().map(|p| p.display().to_string()).collect(),
        dry_run,
        statistics,
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
