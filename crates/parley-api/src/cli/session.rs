//! Session listing CLI command.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use crate::state::AppState;

/// List all chat sessions, newest first.
///
/// # Examples
///
/// ```bash
/// parley sessions
/// parley sessions --json
/// ```
pub async fn list_sessions(state: &AppState, json: bool) -> Result<()> {
    let sessions = state.chat_service.list_sessions().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!();
        println!(
            "  {} No sessions yet. Start the server with: {}",
            style("i").blue().bold(),
            style("parley serve").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Created").fg(Color::White),
    ]);

    for session in &sessions {
        let title_display = if session.title.chars().count() > 40 {
            let prefix: String = session.title.chars().take(37).collect();
            format!("{prefix}...")
        } else {
            session.title.clone()
        };

        table.add_row(vec![
            Cell::new(session.id.to_string()),
            Cell::new(title_display),
            Cell::new(session.created_at.format("%Y-%m-%d %H:%M").to_string()),
        ]);
    }

    println!("{table}");
    Ok(())
}
