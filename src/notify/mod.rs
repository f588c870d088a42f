//! Webhook notification push.
//!
//! Delivers scan alerts as markdown messages to a CP-WeChat-compatible
//! webhook. The receiving side rejects oversized payloads, so long bodies
//! are split into chunks of at most [`NOTIFY_CHUNK_LINES`] lines, posted in
//! order with a short pause between chunks to keep them sequenced.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use serde_json::json;

use crate::config::{NOTIFY_CHUNK_LINES, NOTIFY_CHUNK_PAUSE, NOTIFY_TIMEOUT_SECS};

/// Pushes a titled markdown message to `webhook`.
///
/// The title line carries the tool version and the scan date so a channel
/// receiving multiple reports stays legible. Each chunk after the first
/// repeats neither title nor date.
pub async fn push(webhook: &str, title: &str, body: &str) -> Result<()> {
    let header = format!(
        "## {} <font color=\"comment\">v{}</font>\n#### {}\n",
        title,
        env!("CARGO_PKG_VERSION"),
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    );

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(NOTIFY_TIMEOUT_SECS))
        .build()
        .context("failed to build notification client")?;

    let chunks = chunk_lines(body, NOTIFY_CHUNK_LINES);
    let total = chunks.len();
    for (i, chunk) in chunks.into_iter().enumerate() {
        let content = if i == 0 {
            format!("{}{}", header, chunk)
        } else {
            chunk
        };
        send_markdown(&client, webhook, &content)
            .await
            .with_context(|| format!("notification chunk {}/{} failed", i + 1, total))?;
        if i + 1 < total {
            tokio::time::sleep(NOTIFY_CHUNK_PAUSE).await;
        }
    }
    Ok(())
}

async fn send_markdown(client: &reqwest::Client, webhook: &str, content: &str) -> Result<()> {
    let response = client
        .post(webhook)
        .json(&markdown_payload(content))
        .send()
        .await?;
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(anyhow!("webhook returned {}: {}", status, text));
    }
    log::debug!("Pushed {} bytes to webhook", content.len());
    Ok(())
}

fn markdown_payload(content: &str) -> serde_json::Value {
    json!({
        "msgtype": "markdown",
        "markdown": { "content": content },
    })
}

/// Splits `body` into groups of at most `max_lines` lines.
///
/// Trailing newlines inside each chunk are preserved; an empty body yields
/// a single empty chunk so the titled header still goes out.
fn chunk_lines(body: &str, max_lines: usize) -> Vec<String> {
    let lines: Vec<&str> = body.lines().collect();
    if lines.is_empty() {
        return vec![String::new()];
    }
    lines
        .chunks(max_lines)
        .map(|chunk| {
            let mut s = chunk.join("\n");
            s.push('\n');
            s
        })
        .collect()
}
