//! wayback_index library: archive index querying functionality
//!
//! This library queries the web.archive.org CDX index for the historical
//! snapshots of one or more domains and renders the results as raw URLs,
//! browsable replay links, unique subdomains, or tabular records
//! (CSV/JSON/XML). Retrieval is rate limited and timeout bounded, and
//! record processing within a domain fans out across a bounded worker pool.
//!
//! # Example
//!
//! ```no_run
//! use wayback_index::{run_query, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     domain: Some("example.com".to_string()),
//!     max_results: 100,
//!     ..Default::default()
//! };
//!
//! let report = run_query(config).await?;
//! eprintln!("{} records from {} domain(s)",
//!           report.records_emitted, report.domains_attempted);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

mod aggregate;
mod app;
pub mod config;
mod error_handling;
mod fetch;
pub mod initialization;
mod record;
pub mod render;
mod subdomain;

// Re-export public API
pub use aggregate::RunResult;
pub use config::{Config, DateRange, LogFormat, LogLevel, Opt, OutputFormat, QueryMode};
pub use error_handling::{FetchError, ProcessingStats};
pub use record::ArchiveRecord;
pub use run::{run_query, run_query_with_endpoint, RunReport};

// Internal run module (contains the main orchestration logic)
mod run {
    use std::fs::File;
    use std::io::{self, BufWriter, Write};
    use std::sync::Arc;

    use anyhow::{bail, Context, Result};
    use log::error;
    use url::Url;

    use crate::aggregate::{aggregate, RunResult};
    use crate::app::load_targets;
    use crate::config::{Config, CDX_ENDPOINT};
    use crate::error_handling::{
        print_statistics, ErrorType, FetchError, ProcessingStats, WarningType,
    };
    use crate::fetch::{fetch_index, normalize_target, spawn_line_workers, QueryContext};
    use crate::initialization::{init_client, init_rate_limiter};
    use crate::record::UrlFilter;
    use crate::render::render;

    /// Summary of a completed run.
    #[derive(Debug, Clone)]
    pub struct RunReport {
        /// Number of target domains processed.
        pub domains_attempted: usize,
        /// Number of domains whose index fetch failed.
        pub domains_failed: usize,
        /// Total records rendered across all domains.
        pub records_emitted: usize,
        /// Elapsed time in seconds.
        pub elapsed_seconds: f64,
    }

    /// Runs a query with the provided configuration.
    ///
    /// This is the main entry point for the library. It loads the target
    /// domains, fetches each domain's index under the global rate limit,
    /// runs the records through the parse/filter/aggregate pipeline, and
    /// renders each domain's results into the configured sink.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No target domains can be loaded
    /// - The output sink cannot be created
    /// - The single configured domain fails to fetch
    /// - Rendering fails (sink write failure)
    ///
    /// Fetch failures in multi-domain runs are reported per domain and do
    /// not abort the run; they are counted in `RunReport::domains_failed`.
    pub async fn run_query(config: Config) -> Result<RunReport> {
        run_query_with_endpoint(config, CDX_ENDPOINT).await
    }

    /// Runs a query against a specific CDX endpoint.
    ///
    /// The CLI always uses the production endpoint via [`run_query`]; this
    /// variant exists so tests can point the pipeline at a local server.
    pub async fn run_query_with_endpoint(config: Config, endpoint: &str) -> Result<RunReport> {
        let targets = load_targets(&config).await?;
        if targets.is_empty() {
            bail!("No target domains to process");
        }

        let endpoint = Url::parse(endpoint).context("Invalid CDX endpoint URL")?;
        let client = init_client(&config)
            .await
            .context("Failed to initialize HTTP client")?;
        let stats = Arc::new(ProcessingStats::new());

        let filter = Arc::new(UrlFilter::compile(config.regex_filter.as_deref()));
        if config.regex_filter.is_some() && !filter.is_active() {
            stats.increment_warning(WarningType::InvalidRegexFilter);
        }

        let ctx = QueryContext {
            client,
            endpoint,
            filter,
            stats: Arc::clone(&stats),
            rate_limiter: init_rate_limiter(config.rate_limit_rps),
        };

        // The sink is opened once and shared by all domains; output for
        // completed domains is never discarded
        let mut sink: Box<dyn Write> = match &config.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout()),
        };

        let start_time = std::time::Instant::now();
        let outcome = process_targets(&targets, &config, &ctx, sink.as_mut()).await;
        let flush_result = sink.flush();

        if let Some(limiter) = &ctx.rate_limiter {
            limiter.stop();
        }

        let (domains_failed, records_emitted) = outcome?;
        flush_result.context("Failed to flush output sink")?;

        if config.verbose {
            print_statistics(&stats);
        }

        Ok(RunReport {
            domains_attempted: targets.len(),
            domains_failed,
            records_emitted,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }

    /// Processes every target in input order, rendering into the shared sink.
    ///
    /// Returns `(domains_failed, records_emitted)`. A fetch error is fatal
    /// in single-domain runs and reported-and-skipped otherwise; a render
    /// error is always fatal.
    async fn process_targets(
        targets: &[String],
        config: &Config,
        ctx: &QueryContext,
        sink: &mut dyn Write,
    ) -> Result<(usize, usize)> {
        let single_domain = targets.len() == 1;
        let mut domains_failed = 0usize;
        let mut records_emitted = 0usize;

        for target in targets {
            let host = normalize_target(target);
            match process_domain(&host, ctx, config).await {
                Ok(result) => {
                    records_emitted += result.count;
                    render(result, config, &mut *sink)
                        .with_context(|| format!("Failed to render output for {}", host))?;
                }
                Err(e) => {
                    ctx.stats.increment_error(ErrorType::from_fetch_error(&e));
                    domains_failed += 1;
                    if single_domain {
                        return Err(anyhow::Error::new(e)
                            .context(format!("Failed to process {}", host)));
                    }
                    error!("Error processing {}: {}", host, e);
                }
            }
        }

        Ok((domains_failed, records_emitted))
    }

    /// Fetches one domain's index and runs it through the pipeline.
    async fn process_domain(
        host: &str,
        ctx: &QueryContext,
        config: &Config,
    ) -> Result<RunResult, FetchError> {
        let body = fetch_index(ctx, host, config.timeout_seconds).await?;
        let rx = spawn_line_workers(
            body,
            config.concurrent,
            Arc::clone(&ctx.filter),
            Arc::clone(&ctx.stats),
        );
        Ok(aggregate(rx, config).await)
    }
}
