//! Command-line options and their conversion into a validated `Config`.
//!
//! All input validation happens in `Config::try_from(Opt)`, before any
//! network activity: target presence, mode exclusivity, date parsing, and
//! format/mode coherence.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::Parser;

use crate::config::constants::{
    DATE_FLAG_FORMAT, DEFAULT_CONCURRENCY, DEFAULT_RATE_LIMIT_RPS, DEFAULT_TIMEOUT_SECS,
};
use crate::config::types::{Config, DateRange, LogFormat, LogLevel, OutputFormat, QueryMode};

/// Command-line options.
#[derive(Debug, Parser)]
#[command(
    name = "wayback_index",
    version,
    about = "Query the web.archive.org CDX index for the historical snapshots of a domain"
)]
pub struct Opt {
    /// Target domain to query (omit when --input-file is used)
    #[arg(value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// File containing target domains, one per line (use - for stdin)
    #[arg(long, value_name = "FILE")]
    pub input_file: Option<PathBuf>,

    /// Emit browsable snapshot replay links instead of raw URLs
    #[arg(long)]
    pub browsable: bool,

    /// Emit the unique subdomains discovered in the archived URLs
    #[arg(long)]
    pub subdomains: bool,

    /// Emit full records with metadata (see --format)
    #[arg(long)]
    pub records: bool,

    /// Output format; csv, json and xml imply --records
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Remove duplicate URLs within each domain's result set
    #[arg(long)]
    pub unique_urls: bool,

    /// Regex pattern to filter URLs (an invalid pattern disables filtering)
    #[arg(long, value_name = "REGEX")]
    pub filter: Option<String>,

    /// Only include snapshots captured on or after this date
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub start_date: Option<String>,

    /// Only include snapshots captured on or before this date
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub end_date: Option<String>,

    /// Maximum number of results per domain (0 for unlimited)
    #[arg(long, default_value_t = 0, value_name = "N")]
    pub max_results: usize,

    /// Number of concurrent record processors per domain
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY, value_name = "N")]
    pub concurrent: usize,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_name = "SECONDS")]
    pub timeout: u64,

    /// Maximum requests per second (0 disables rate limiting)
    #[arg(long, default_value_t = DEFAULT_RATE_LIMIT_RPS, value_name = "RPS")]
    pub rate_limit: u32,

    /// Output file (standard output when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Verbose output (per-line diagnostics and a run summary on stderr)
    #[arg(short, long)]
    pub verbose: bool,

    /// Log level
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

impl TryFrom<Opt> for Config {
    type Error = anyhow::Error;

    fn try_from(opt: Opt) -> Result<Self> {
        match (&opt.domain, &opt.input_file) {
            (None, None) => bail!("No target domain supplied (pass a domain or --input-file)"),
            (Some(_), Some(_)) => bail!("Pass either a domain or --input-file, not both"),
            _ => {}
        }

        let selected = [opt.browsable, opt.subdomains, opt.records]
            .iter()
            .filter(|flag| **flag)
            .count();
        if selected > 1 {
            bail!("Options --browsable, --subdomains and --records are mutually exclusive");
        }

        let mode = if opt.browsable {
            QueryMode::Browsable
        } else if opt.subdomains {
            QueryMode::Subdomains
        } else if opt.records
            || matches!(
                opt.format,
                Some(OutputFormat::Csv | OutputFormat::Json | OutputFormat::Xml)
            )
        {
            QueryMode::Records
        } else {
            QueryMode::Urls
        };

        let format = match (mode, opt.format) {
            (QueryMode::Records, None) => OutputFormat::Csv,
            (QueryMode::Records, Some(OutputFormat::Text)) => {
                bail!("--records requires --format csv, json or xml")
            }
            (QueryMode::Records, Some(format)) => format,
            (_, None) | (_, Some(OutputFormat::Text)) => OutputFormat::Text,
            (_, Some(_)) => {
                bail!("--format csv, json and xml conflict with --browsable and --subdomains")
            }
        };

        if opt.concurrent == 0 {
            bail!("--concurrent must be at least 1");
        }

        let date_range = if opt.start_date.is_some() || opt.end_date.is_some() {
            let start = match opt.start_date.as_deref() {
                Some(value) => Some(day_start(parse_date_flag(value, "start date")?)),
                None => None,
            };
            let end = match opt.end_date.as_deref() {
                Some(value) => day_end(parse_date_flag(value, "end date")?),
                None => Utc::now(),
            };
            if let Some(start) = start {
                if start > end {
                    bail!("Start date is after end date");
                }
            }
            Some(DateRange { start, end })
        } else {
            None
        };

        Ok(Config {
            domain: opt.domain,
            input_file: opt.input_file,
            output: opt.output,
            mode,
            format,
            unique_urls: opt.unique_urls,
            regex_filter: opt.filter,
            date_range,
            max_results: opt.max_results,
            concurrent: opt.concurrent,
            timeout_seconds: opt.timeout,
            rate_limit_rps: opt.rate_limit,
            verbose: opt.verbose,
            log_level: opt.log_level,
            log_format: opt.log_format,
            ..Config::default()
        })
    }
}

fn parse_date_flag(value: &str, which: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FLAG_FORMAT)
        .with_context(|| format!("Invalid {} format (expected YYYY-MM-DD): {}", which, value))
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// An end date covers the whole end day, so the bound sits at 23:59:59.
fn day_end(date: NaiveDate) -> DateTime<Utc> {
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    date.and_time(end_of_day).and_utc()
}
