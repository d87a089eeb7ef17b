//! Poll state commands.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use artipoll_core::PollStateStore;
use serde_json::json;

use crate::formatting::{print_key_value, print_section_header, print_success, SectionStyle};

use super::load_config;

pub async fn cmd_last_poll(config_path: &Path, search: Option<&str>, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let state = PollStateStore::from_config(&config.cache)?;

    let searches: Vec<_> = match search {
        Some(name) => vec![config
            .search(name)
            .ok_or_else(|| anyhow!("Search '{}' is not configured", name))?],
        None => config.searches.iter().collect(),
    };

    let mut rows = Vec::with_capacity(searches.len());
    for search in searches {
        let timestamp = state.get_last_poll_cycle_timestamp(search).await?;
        rows.push((search, timestamp));
    }

    if json {
        let entries: Vec<_> = rows
            .iter()
            .map(|(search, timestamp)| {
                json!({
                    "search": search.name,
                    "partition": search.partition_name,
                    "group_id": search.group_id,
                    "last_poll_cycle_timestamp": timestamp,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    print_section_header("Last poll cycles", SectionStyle::Primary);
    for (search, timestamp) in rows {
        let value = match timestamp {
            Some(ts) => ts.to_string(),
            None => "never polled".to_string(),
        };
        print_key_value(&format!("{} [{}:{}]", search.name, search.partition_name, search.group_id), &value);
    }
    println!();
    Ok(())
}

pub async fn cmd_record_poll(config_path: &Path, search: &str, timestamp: Option<i64>) -> Result<()> {
    let config = load_config(config_path)?;
    let state = PollStateStore::from_config(&config.cache)?;
    let search = config
        .search(search)
        .ok_or_else(|| anyhow!("Search '{}' is not configured", search))?;

    let timestamp = match timestamp {
        Some(ts) => ts,
        None => now_millis()?,
    };
    state
        .set_last_poll_cycle_timestamp(search, timestamp)
        .await
        .with_context(|| format!("Failed to record poll cycle for '{}'", search.name))?;

    print_success(&format!("Recorded poll cycle {} for {}", timestamp, search.name));
    Ok(())
}

fn now_millis() -> Result<i64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock is before the Unix epoch")?;
    i64::try_from(elapsed.as_millis()).context("Timestamp out of range")
}
