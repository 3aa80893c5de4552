//! Discovery Kit CLI
//!
//! Command-line interface for inspecting, round-tripping and fetching
//! Google API Discovery documents.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use discovery_kit_common::FetcherConfig;
use discovery_kit_fetcher::ApisFetcher;
use discovery_kit_model::{DiscoveryDocument, Resource};
use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "discovery-kit")]
#[command(version, about = "Inspect and fetch Google API Discovery documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML file with fetcher settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Root URL of the Discovery service (overrides the config file)
    #[arg(long, global = true)]
    root_url: Option<String>,

    /// Quota accounting key sent as `quotaUser`
    #[arg(long, global = true)]
    quota_user: Option<String>,

    /// Partial response selector sent as `fields`
    #[arg(long, global = true)]
    fields: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a Discovery document and summarize it
    #[command(after_help = "EXAMPLES:\n  \
        # Summarize a local document\n  \
        discovery-kit inspect storage-v1.json\n\n  \
        # Include the resource tree\n  \
        discovery-kit inspect storage-v1.json --tree")]
    Inspect {
        /// Path to the Discovery document
        file: PathBuf,

        /// Print the resource tree with every method
        #[arg(long)]
        tree: bool,
    },

    /// Decode a Discovery document and print it re-encoded
    Roundtrip {
        /// Path to the Discovery document
        file: PathBuf,

        /// Print compact JSON instead of pretty JSON
        #[arg(long)]
        compact: bool,
    },

    /// List the APIs known to the Discovery service
    #[command(after_help = "EXAMPLES:\n  \
        # Preferred versions only\n  \
        discovery-kit list --preferred\n\n  \
        # Every version of one API\n  \
        discovery-kit list --name storage")]
    List {
        /// Only include APIs with this name
        #[arg(long)]
        name: Option<String>,

        /// Only include the preferred version of each API
        #[arg(long)]
        preferred: bool,
    },

    /// Fetch the Discovery document of one API version
    #[command(after_help = "EXAMPLES:\n  \
        discovery-kit fetch storage v1 --output storage-v1.json")]
    Fetch {
        /// API name (e.g., "storage")
        api: String,

        /// API version (e.g., "v1")
        version: String,

        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if cli.verbose {
        eprintln!("{} Verbose mode enabled", "→".cyan());
    }

    match &cli.command {
        Commands::Inspect { file, tree } => inspect_command(file, *tree, cli.verbose)?,
        Commands::Roundtrip { file, compact } => roundtrip_command(file, *compact)?,
        Commands::List { name, preferred } => {
            let config = load_config(&cli)?;
            list_command(config, name.as_deref(), *preferred)?;
        }
        Commands::Fetch {
            api,
            version,
            output,
        } => {
            let config = load_config(&cli)?;
            fetch_command(config, api, version, output.as_deref())?;
        }
    }

    Ok(())
}

/// Merge the config file (if any) with command-line overrides
fn load_config(cli: &Cli) -> Result<FetcherConfig> {
    let mut config = match &cli.config {
        Some(path) => FetcherConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => FetcherConfig::default(),
    };

    if let Some(root_url) = &cli.root_url {
        config.root_url = root_url.clone();
    }
    if let Some(quota_user) = &cli.quota_user {
        config.quota_user = Some(quota_user.clone());
    }
    if let Some(fields) = &cli.fields {
        config.fields = Some(fields.clone());
    }
    config.validate().context("Invalid fetcher settings")?;

    debug!("Fetcher config: {:?}", config);
    Ok(config)
}

fn inspect_command(path: &Path, tree: bool, verbose: bool) -> Result<()> {
    eprintln!("{} Reading Discovery document: {}", "→".cyan(), path.display());

    let doc = DiscoveryDocument::from_file(path).context("Failed to load Discovery doc")?;
    let methods = doc.all_methods();

    println!("\n{}", "Discovery Document:".bold());
    println!("  ID: {}", doc.id.yellow());
    println!("  Title: {}", doc.title);
    println!("  Version: {}", doc.version.yellow());
    println!("  Revision: {}", doc.revision);
    println!("  Root URL: {}{}", doc.root_url, doc.service_path);
    println!("  Schemas: {}", doc.schemas.len());
    println!("  Resources: {}", doc.resources.len());
    println!("  Methods: {}", methods.len());
    println!("  Scopes: {}", doc.auth.scopes.len());

    if verbose {
        println!("\n{}", "Scopes:".bold());
        for (scope, description) in &doc.auth.scopes {
            println!("  • {} ({})", scope.cyan(), description);
        }
    }

    if tree {
        println!("\n{}", "Resources:".bold());
        for (name, method) in &doc.methods {
            println!("  {} {} {}", "◦".green(), name, method.http_method.dimmed());
        }
        print_resources(&doc.resources, 1);
    }

    Ok(())
}

fn print_resources(resources: &BTreeMap<String, Resource>, depth: usize) {
    let indent = "  ".repeat(depth);
    for (name, resource) in resources {
        println!("{}• {}", indent, name.cyan());
        for (method_name, method) in &resource.methods {
            let upload = if method.media_upload.is_some() {
                " [upload]"
            } else {
                ""
            };
            println!(
                "{}  {} {} {} {}{}",
                indent,
                "◦".green(),
                method_name,
                method.http_method.dimmed(),
                method.path,
                upload.yellow()
            );
        }
        print_resources(&resource.resources, depth + 1);
    }
}

fn roundtrip_command(path: &Path, compact: bool) -> Result<()> {
    let doc = DiscoveryDocument::from_file(path).context("Failed to load Discovery doc")?;
    let text = doc
        .to_json_string(!compact)
        .context("Failed to encode Discovery doc")?;
    println!("{}", text);
    Ok(())
}

fn list_command(config: FetcherConfig, name: Option<&str>, preferred: bool) -> Result<()> {
    eprintln!("{} Listing APIs from {}", "→".cyan(), config.root_url);

    let fetcher = ApisFetcher::http(config).context("Failed to create fetcher")?;
    let list = fetcher
        .list_apis(name, preferred)
        .context("Failed to list APIs")?;

    for item in &list.items {
        let marker = if item.preferred {
            "✓".green()
        } else {
            " ".normal()
        };
        println!("{} {:<40} {}", marker, item.id.yellow(), item.title);
    }
    eprintln!("\n{} {} APIs", "✓".green(), list.items.len());

    Ok(())
}

fn fetch_command(
    config: FetcherConfig,
    api: &str,
    version: &str,
    output: Option<&Path>,
) -> Result<()> {
    eprintln!(
        "{} Fetching Discovery document for {} {}",
        "→".cyan(),
        api.yellow(),
        version.yellow()
    );

    let fetcher = ApisFetcher::http(config).context("Failed to create fetcher")?;
    let doc = fetcher
        .get_discovery_document(api, version)
        .with_context(|| format!("Failed to fetch Discovery document for {} {}", api, version))?;

    let text = doc
        .to_json_string(true)
        .context("Failed to encode Discovery doc")?;
    match output {
        Some(path) => {
            fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Wrote {} ({} schemas, {} methods)",
                "✓".green(),
                path.display(),
                doc.schemas.len(),
                doc.all_methods().len()
            );
        }
        None => println!("{}", text),
    }

    Ok(())
}
