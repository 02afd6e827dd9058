use std::io;
use std::time::Duration;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use parley_chat::{EmotionClient, JsonLinesSink, MessageSink, OutgoingMessage};

pub fn run(text: &str, endpoint: &str, timeout_ms: u64, reply: Option<usize>) -> Result<(), String> {
    let client = EmotionClient::new(endpoint)
        .map_err(|e| e.to_string())?
        .with_timeout(Duration::from_millis(timeout_ms));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("runtime error: {e}"))?;
    let analysis = runtime
        .block_on(client.analyze(text))
        .map_err(|e| e.to_string())?;

    if let Some(n) = reply {
        let suggestion = n
            .checked_sub(1)
            .and_then(|i| analysis.suggestions.get(i))
            .ok_or_else(|| {
                format!(
                    "no suggestion #{n} ({} available)",
                    analysis.suggestions.len()
                )
            })?;
        let message = OutgoingMessage::text(suggestion)
            .ok_or_else(|| format!("suggestion #{n} is empty"))?;
        let mut sink = JsonLinesSink::new(io::stdout().lock());
        return sink.send(message).map_err(|e| e.to_string());
    }

    println!(
        "  dominant: {}",
        analysis.dominant_emotion.as_str().bold()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Emotion", "Score"]);
    for (emotion, score) in analysis.ranked() {
        table.add_row(vec![emotion.to_string(), format!("{score:.2}")]);
    }
    println!("{table}");

    if !analysis.suggestions.is_empty() {
        println!();
        println!("  {}", "Suggestions".bold());
        for (i, suggestion) in analysis.suggestions.iter().enumerate() {
            println!("    {}. {suggestion}", i + 1);
        }
    }

    Ok(())
}
