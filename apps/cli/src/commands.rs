//! CLI command definitions, routing, and tracing setup.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use forumindex_core::{parse_document, render_records, transform};
use forumindex_shared::{
    AppConfig, ForumIndexError, TransformConfig, init_config, load_config, load_config_from,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// forumindex: turn a forum export into search index records.
#[derive(Parser)]
#[command(
    name = "forumindex",
    version,
    about = "Transform forum posts and categories into size-bounded search records.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.forumindex/forumindex.toml.
    #[arg(long, global = true, env = "FORUMINDEX_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Transform a forum export (JSON) into search records (JSON).
    Transform {
        /// Base URL of the forum, used to build post links.
        #[arg(long, env = "FORUM_URL")]
        base_url: Option<String>,

        /// Top-level hierarchy label for every record.
        #[arg(long)]
        lvl0: Option<String>,

        /// Tag added to every record (repeatable).
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Maximum compact-JSON size of one record, in bytes.
        #[arg(long)]
        max_record_bytes: Option<usize>,

        /// Source document to read ("-" or omitted for stdin).
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Where to write the records (omitted for stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a config file with defaults (to --config when given).
    Init {
        /// Overwrite an existing config file.
        #[arg(long)]
        force: bool,
    },
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
///
/// Logs go to stderr; stdout is reserved for the record array.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "forumindex=info",
        1 => "forumindex=debug",
        _ => "forumindex=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Transform {
            base_url,
            lvl0,
            tags,
            max_record_bytes,
            input,
            output,
        } => {
            let app = resolve_app_config(config_path)?;
            let mut config = TransformConfig::from(&app);
            if let Some(base_url) = base_url {
                config.base_url = base_url;
            }
            if let Some(lvl0) = lvl0 {
                config.lvl0 = lvl0;
            }
            if !tags.is_empty() {
                config.tags = tags;
            }
            if let Some(limit) = max_record_bytes {
                config.max_record_bytes = limit;
            }
            cmd_transform(config, input.as_deref(), output.as_deref())
        }
        Command::Config { action } => match action {
            ConfigAction::Init { force } => cmd_config_init(config_path, force),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

fn resolve_app_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_transform(config: TransformConfig, input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let config = config.validated()?;
    info!(
        base_url = %config.base_url,
        lvl0 = %config.lvl0,
        tags = ?config.tags,
        "transforming forum export"
    );

    let raw = read_input(input)?;
    let doc = parse_document(&raw)?;
    let result = transform(&doc, &config)?;

    // Rendered in full before anything is written.
    let rendered = render_records(&result.records)?;
    write_output(output, &rendered)?;

    eprintln!(
        "Transformed {} posts into {} records ({} skipped).",
        result.posts_seen,
        result.records.len(),
        result.posts_skipped
    );

    Ok(())
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => {
            let raw = std::fs::read_to_string(path).map_err(|e| ForumIndexError::io(path, e))?;
            Ok(raw)
        }
        _ => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .wrap_err("failed to read source document from stdin")?;
            Ok(raw)
        }
    }
}

fn write_output(output: Option<&Path>, rendered: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered).map_err(|e| ForumIndexError::io(path, e))?;
            info!(path = %path.display(), "records written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .wrap_err("failed to write records to stdout")?;
        }
    }
    Ok(())
}

fn cmd_config_init(path: Option<&Path>, force: bool) -> Result<()> {
    let path = init_config(path, force)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_app_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn transform_accepts_repeated_tags() {
        let cli = Cli::try_parse_from([
            "forumindex",
            "transform",
            "--base-url",
            "https://discuss.example.com",
            "--tag",
            "community",
            "--tag",
            "support",
        ])
        .expect("parse args");

        match cli.command {
            Command::Transform { tags, base_url, .. } => {
                assert_eq!(tags, vec!["community", "support"]);
                assert_eq!(base_url.as_deref(), Some("https://discuss.example.com"));
            }
            Command::Config { .. } => panic!("expected transform"),
        }
    }

    #[test]
    fn config_init_takes_force_and_config_path() {
        let cli = Cli::try_parse_from([
            "forumindex",
            "--config",
            "/tmp/forumindex/custom.toml",
            "config",
            "init",
            "--force",
        ])
        .expect("parse args");

        assert_eq!(cli.config.as_deref(), Some(Path::new("/tmp/forumindex/custom.toml")));
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigAction::Init { force: true }
            }
        ));
    }
}
