//! `poolside messages`: print the message registry or check its consistency.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use poolside_core::message::{self, registry};

/// Print every registered category with its status code and text.
pub fn list_messages(json: bool) -> Result<()> {
    let entries: Vec<_> = registry::entries().collect();

    if json {
        let rows: Vec<serde_json::Value> = entries
            .iter()
            .map(|(status, category, text)| {
                serde_json::json!({
                    "status": status,
                    "category": category.as_str(),
                    "text": text,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Status").fg(Color::White),
        Cell::new("Category").fg(Color::White),
        Cell::new("Text").fg(Color::White),
    ]);

    for (status, category, text) in &entries {
        let status_color = if *status < 400 { Color::Green } else { Color::Red };
        table.add_row(vec![
            Cell::new(status).fg(status_color),
            Cell::new(category.as_str()).fg(Color::Cyan),
            Cell::new(text),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!("  {} categories", style(entries.len()).bold());
    println!();

    Ok(())
}

/// Fail unless every category resolves to exactly one status code.
pub fn check_messages(json: bool) -> Result<()> {
    message::validate()?;

    if json {
        println!("{}", serde_json::json!({"valid": true}));
    } else {
        println!(
            "  {} Message registry is consistent",
            style("✓").green().bold()
        );
    }
    Ok(())
}
