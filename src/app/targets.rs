//! Target domain loading.

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use crate::config::Config;

/// Loads the list of target domains for a run.
///
/// A single positional domain takes precedence; otherwise domains are read
/// from the input file, one per line, skipping blank lines and `#` comments.
/// The special path `-` reads from stdin.
///
/// # Errors
///
/// Returns an error when no target source is configured or the input file
/// cannot be read.
pub async fn load_targets(config: &Config) -> Result<Vec<String>> {
    if let Some(domain) = &config.domain {
        return Ok(vec![domain.clone()]);
    }

    let Some(path) = &config.input_file else {
        bail!("No target domain or input file supplied");
    };

    if path.as_os_str() == "-" {
        log::info!("Reading target domains from stdin");
        read_targets(BufReader::new(tokio::io::stdin()).lines()).await
    } else {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open input file: {}", path.display()))?;
        read_targets(BufReader::new(file).lines()).await
    }
}

async fn read_targets<R>(mut lines: Lines<R>) -> Result<Vec<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut targets = Vec::new();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read line from input")?
    {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        targets.push(trimmed.to_string());
    }
    Ok(targets)
}
