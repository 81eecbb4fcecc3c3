use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use std::sync::Arc;
use swapcache::config::{get_config_clone, load_config_from_path, CONFIG_FILE_PATH};
use swapcache::database::SwapInfoDb;
use swapcache::logger::{self, LogLevel, LogTag};
use swapcache::swaps::{QuoteResponse, SwapInfo, SwapInfoCache, SwapInfoKey, SwapInfoOptions};

/// Inspect and maintain the swap info cache database.
#[derive(Parser, Debug)]
#[command(name = "tool_swap_info_cache", about = "Inspect and maintain the swap info cache")]
struct Args {
    /// TOML configuration file
    #[arg(long, default_value = CONFIG_FILE_PATH)]
    config: String,

    /// Database path (overrides `cache.db_path`)
    #[arg(long)]
    db: Option<String>,

    /// Enable debug logs for these tags (cache, store, jupiter, decoder)
    #[arg(long, value_delimiter = ',')]
    debug: Vec<String>,

    /// Minimum log level (error, warning, info, debug, verbose)
    #[arg(long, value_parser = parse_log_level)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the record stored for a route
    Get {
        #[arg(long)]
        input: String,
        #[arg(long)]
        output: String,
        /// Hop pool addresses in route order
        #[arg(long, value_delimiter = ',', required = true)]
        ammkeys: Vec<String>,
        /// Also print expired records
        #[arg(long, default_value_t = false)]
        include_expired: bool,
    },
    /// Delete the record stored for a route
    Remove {
        #[arg(long)]
        input: String,
        #[arg(long)]
        output: String,
        #[arg(long, value_delimiter = ',', required = true)]
        ammkeys: Vec<String>,
    },
    /// Delete every expired record
    Purge,
    /// Row counts
    Stats,
    /// Resolve a quote (JSON file from `/quote`) through the cache
    Fetch {
        #[arg(long)]
        quote: String,
        /// Wallet the instruction is built for
        #[arg(long)]
        user: String,
        /// Skip the lookup and do not write back
        #[arg(long, default_value_t = false)]
        no_cache: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(level) = args.log_level {
        logger::update_logger_config(|cfg| cfg.min_level = level);
    }
    if !args.debug.is_empty() {
        logger::enable_debug_tags(args.debug.iter().cloned());
    }

    load_config_from_path(&args.config)?;
    let mut config = get_config_clone();
    if let Some(db) = args.db {
        config.cache.db_path = db;
    }

    let db = Arc::new(SwapInfoDb::open(&config.cache.db_path)?);
    let cache = SwapInfoCache::from_config_with_store(&config, db.clone())?;

    match args.command {
        Command::Get {
            input,
            output,
            ammkeys,
            include_expired,
        } => {
            let key = SwapInfoKey::new(input, output, ammkeys);
            let record = if include_expired {
                db.get(&key)?
            } else {
                cache.get_cached(&key).await?
            };
            match record {
                Some(info) => print_record(&info)?,
                None => logger::info(LogTag::Cache, "No cached record for this route"),
            }
        }
        Command::Remove {
            input,
            output,
            ammkeys,
        } => {
            let key = SwapInfoKey::new(input, output, ammkeys);
            let removed = db.remove_key(&key)?;
            logger::info(
                LogTag::Store,
                &format!("Removed: {}", if removed { "yes" } else { "no record" }),
            );
        }
        Command::Purge => {
            let now = chrono::Utc::now().timestamp_millis();
            let purged = db.purge_expired(now)?;
            logger::info(LogTag::Store, &format!("Purged {} expired records", purged));
        }
        Command::Stats => {
            let total = db.count()?;
            let temporary = db.count_temporary()?;
            println!("database:  {}", db.path());
            println!("records:   {}", total);
            println!("temporary: {}", temporary);
            println!("permanent: {}", total.saturating_sub(temporary));
        }
        Command::Fetch {
            quote,
            user,
            no_cache,
        } => {
            let raw = std::fs::read_to_string(&quote)
                .with_context(|| format!("Failed to read quote file {}", quote))?;
            let quote: QuoteResponse =
                serde_json::from_str(&raw).context("Quote file is not a Jupiter quote response")?;
            let user = Pubkey::from_str(&user).context("Invalid user public key")?;

            let options = if no_cache {
                SwapInfoOptions::bypass()
            } else {
                cache.default_options()
            };
            let info = cache
                .get_routes_and_base_instructions(&quote, &user, &options)
                .await?;
            cache.flush().await;
            print_record(&info)?;
        }
    }

    Ok(())
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    LogLevel::parse(value).ok_or_else(|| format!("unknown log level '{}'", value))
}

fn print_record(info: &SwapInfo) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(info)?);
    Ok(())
}
