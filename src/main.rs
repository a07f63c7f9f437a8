use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

use profile_urls::config::AppConfig;
use profile_urls::enrich::{enrich_rows, GitHubClient, RowStore, TwitterClient};
use profile_urls::platform::{
    classify_profile_url, get_custom_domain_from_email, is_well_known_platform_domain, ProfileMatch,
};
use profile_urls::url_parser::{normalize_url, NormalizeOptions};
use profile_urls::utils::logger::init_logger;

#[derive(Debug, Parser)]
#[command(
    name = "profile-urls",
    version,
    about = "Normalize URLs and recognize social profile links"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the canonical form of a URL
    Normalize(NormalizeArgs),
    /// Print one JSON line per input describing the recognized profile
    Classify {
        #[arg(required = true)]
        inputs: Vec<String>,
    },
    /// Print the custom (non-mailbox-provider) domain of each email address
    EmailDomain {
        #[arg(required = true)]
        emails: Vec<String>,
    },
    /// Look up GitHub and X follower counts for rows in a JSON file
    Enrich(EnrichArgs),
}

#[derive(Debug, Args)]
struct NormalizeArgs {
    url: String,
    /// Strip a leading `www.` from the host
    #[arg(long)]
    strip_www: bool,
    #[arg(long)]
    keep_trailing_slash: bool,
    #[arg(long)]
    keep_port: bool,
    /// Reject bare domains like `example.com/path`
    #[arg(long)]
    strict: bool,
}

impl NormalizeArgs {
    fn options(&self) -> NormalizeOptions {
        NormalizeOptions {
            strip_www: self.strip_www,
            remove_trailing_slash: !self.keep_trailing_slash,
            remove_explicit_port: !self.keep_port,
            allow_sloppy_uris: !self.strict,
            ..Default::default()
        }
    }
}

#[derive(Debug, Args)]
struct EnrichArgs {
    /// JSON array of `{id, github_url, twitter_url}` rows
    #[arg(long)]
    input: PathBuf,
    /// Write the rows, with follower counts merged in, to this file
    #[arg(long)]
    output: Option<PathBuf>,
    /// Overrides the configured concurrency
    #[arg(long)]
    concurrency: Option<usize>,
}

#[derive(Debug, Serialize)]
struct Classification<'a> {
    input: &'a str,
    #[serde(flatten)]
    profile: Option<ProfileMatch>,
    well_known: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    init_logger(config.log_dir.as_deref())?;
    debug!("Loaded configuration: concurrency={}", config.concurrency);

    match cli.command {
        Command::Normalize(args) => {
            let options = args.options();
            match normalize_url(&args.url, &options) {
                Some(normalized) => println!("{}", normalized),
                None => bail!("'{}' cannot be normalized", args.url),
            }
        }
        Command::Classify { inputs } => {
            for input in &inputs {
                let line = Classification {
                    input,
                    profile: classify_profile_url(input),
                    well_known: is_well_known_platform_domain(input),
                };
                println!("{}", serde_json::to_string(&line)?);
            }
        }
        Command::EmailDomain { emails } => {
            for email in &emails {
                let domain = get_custom_domain_from_email(email);
                println!("{}\t{}", email, domain.as_deref().unwrap_or("-"));
            }
        }
        Command::Enrich(args) => run_enrich(args, &config).await?,
    }

    Ok(())
}

async fn run_enrich(args: EnrichArgs, config: &AppConfig) -> Result<()> {
    let bearer_token = config
        .twitter_bearer_token
        .clone()
        .context("PROFILE_URLS_TWITTER_BEARER_TOKEN must be set to look up X followers")?;

    let timeout = config.request_timeout();
    let github = GitHubClient::new(&config.github_api_url, config.github_token.clone(), timeout)?;
    let twitter = TwitterClient::new(&config.twitter_api_url, bearer_token, timeout)?;

    let store = RowStore::load(&args.input).await?;
    let rows = store.pending_rows();
    let concurrency = args.concurrency.unwrap_or(config.concurrency);
    info!("Enriching {} pending rows with concurrency {}", rows.len(), concurrency);

    let enriched = enrich_rows(rows, &github, &twitter, &store, concurrency).await;
    println!("{}", serde_json::to_string_pretty(&enriched)?);

    if let Some(output) = &args.output {
        store.flush(output).await?;
    }

    Ok(())
}
