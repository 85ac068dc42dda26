//! javadoc-migrate binary
//!
//! Rewrites AsciiDoc sources to use `javadoc:` inline macros.
//!
//! Cache directory precedence:
//!   1. --cache-dir flag
//!   2. JAVADOC_MIGRATE_CACHE_DIR env var
//!   3. XDG / platform cache dir via dirs crate
//!   4. Fallback: ./.javadoc-migrate-cache

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use javadoc_migrate::{
    doc_engine::{cache::Cache, config::ConfigResolver, fetcher::Fetcher},
    migrate, IndexBuilder, Lookup, NameIndex, Rewriter, Settings,
};
use tracing_subscriber::EnvFilter;

/// Command line interface for javadoc-migrate.
#[derive(Debug, Parser)]
#[command(
    name = "javadoc-migrate",
    version,
    about = "Migrate AsciiDoc API links and code spans to javadoc: inline macros"
)]
struct Cli {
    /// Explicit cache directory (overrides env + platform default)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// JSON file overriding the built-in rewrite and URL tables
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Suppress info logs (only warnings+)
    #[arg(long, global = true)]
    quiet: bool,

    /// Force ANSI color output in logs
    #[arg(long, global = true)]
    color: bool,

    /// Disable ANSI color output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rewrite every .adoc file below DOCS_DIR in place
    Migrate {
        docs_dir: PathBuf,

        /// Antora component descriptor listing javadoc attributes
        #[arg(long, value_name = "FILE", required_unless_present = "xrefs_only")]
        config: Option<PathBuf>,

        /// Locally rendered javadoc site of this module
        #[arg(long, value_name = "DIR")]
        site: Option<PathBuf>,

        /// Only rewrite explicit API links; no index is built
        #[arg(long)]
        xrefs_only: bool,
    },

    /// Show how names resolve through the index
    Lookup {
        #[arg(required = true)]
        names: Vec<String>,

        #[arg(long, value_name = "FILE")]
        config: PathBuf,

        #[arg(long, value_name = "DIR")]
        site: Option<PathBuf>,
    },

    /// Print the resolved cache directory and exit
    PrintCacheDir,
}

fn resolve_cache_dir(cli: &Cli) -> PathBuf {
    if let Some(dir) = &cli.cache_dir {
        return dir.clone();
    }
    if let Ok(env_dir) = std::env::var("JAVADOC_MIGRATE_CACHE_DIR") {
        return PathBuf::from(env_dir);
    }
    if let Some(base) = dirs::cache_dir() {
        return base.join("javadoc-migrate");
    }
    // Fallback: local hidden directory
    PathBuf::from(".").join(".javadoc-migrate-cache")
}

async fn build_index(
    cache_dir: &Path,
    settings: &Settings,
    config: &Path,
    site: Option<&Path>,
) -> Result<NameIndex> {
    let text = std::fs::read_to_string(config)
        .with_context(|| format!("Failed to read {}", config.display()))?;
    let resolver = ConfigResolver::new(&settings.self_name, settings.url_substitutions.clone());
    let javadoc_config = resolver.resolve(text.lines());

    let cache = Cache::new(cache_dir)?;
    let fetcher = Fetcher::new()?;
    let index = IndexBuilder::new(&cache, &fetcher)
        .always_external(settings.always_external_packages.clone())
        .build(site, &javadoc_config)
        .await?;
    Ok(index)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging / tracing setup
    let mut fmt = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                if cli.quiet {
                    "warn"
                } else {
                    "javadoc_migrate=info"
                }
                .parse()?,
            ),
        )
        .with_writer(std::io::stderr)
        .with_target(false);

    // Color handling precedence: --no-color > inherited tty auto > --color
    if cli.no_color {
        fmt = fmt.with_ansi(false);
    } else if cli.color {
        fmt = fmt.with_ansi(true);
    }
    fmt.init();

    let cache_dir = resolve_cache_dir(&cli);
    let settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    match &cli.command {
        Command::PrintCacheDir => {
            println!("{}", cache_dir.display());
        }
        Command::Migrate {
            docs_dir,
            config,
            site,
            xrefs_only,
        } => {
            let report = match (config, *xrefs_only) {
                (Some(config), false) => {
                    let index = build_index(&cache_dir, &settings, config, site.as_deref()).await?;
                    migrate::migrate_tree(docs_dir, &Rewriter::new(&settings, &index)?)?
                }
                _ => migrate::migrate_tree(docs_dir, &Rewriter::xrefs_only(&settings)?)?,
            };
            println!(
                "{} changed, {} unchanged, {} skipped",
                report.changed, report.unchanged, report.skipped
            );
        }
        Command::Lookup {
            names,
            config,
            site,
        } => {
            let index = build_index(&cache_dir, &settings, config, site.as_deref()).await?;
            let rules = javadoc_migrate::rewrite::TypeNameRules::from_settings(&settings);
            let mut ambiguous = 0;
            for name in names {
                let (annotation, bare) = match name.strip_prefix('@') {
                    Some(bare) => (true, bare),
                    None => (false, name.as_str()),
                };
                match index.lookup(rules.lookup_key(bare, annotation)) {
                    Lookup::Missing => println!("{name} -> (no mapping)"),
                    Lookup::Unique(location) => println!("{name} -> {location}"),
                    Lookup::Ambiguous(candidates) => {
                        ambiguous += 1;
                        println!("{name} -> AMBIGUOUS: {}", candidates.join(", "));
                    }
                }
            }
            if ambiguous > 0 {
                return Err(anyhow!("{ambiguous} name(s) resolved ambiguously"));
            }
        }
    }

    Ok(())
}
