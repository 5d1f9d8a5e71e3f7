//! To-do list commands.

use anyhow::{Result, bail};
use comfy_table::Table;

use super::AppContext;

pub async fn lists() -> Result<()> {
    let ctx = AppContext::build()?;
    ctx.require_login()?;

    ctx.store.fetch_lists().await;
    ctx.check_session()?;

    let state = ctx.store.snapshot();
    if let Some(message) = state.error_message {
        bail!(message);
    }
    if state.lists.is_empty() {
        println!("No lists yet. Create one with `tempo create <title>`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(["ID", "Title", "Created"]);
    for list in &state.lists {
        table.add_row([
            list.id.to_string(),
            list.title.clone(),
            list.created_at.format("%Y-%m-%d").to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn show(id: i64) -> Result<()> {
    let ctx = AppContext::build()?;
    ctx.require_login()?;

    // The selection is only valid against a known set of lists.
    ctx.store.fetch_lists().await;
    ctx.check_session()?;
    if let Some(message) = ctx.store.snapshot().error_message {
        bail!(message);
    }

    ctx.store.select_list(id).await;
    ctx.check_session()?;

    let state = ctx.store.snapshot();
    if let Some(message) = state.error_message {
        bail!(message);
    }

    let title = state
        .selected_list_title
        .unwrap_or_else(|| format!("List {id}"));
    println!("{title}");

    if state.selected_items.is_empty() {
        println!("No items.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(["ID", "Task", "Done", "Priority", "Due"]);
    for item in &state.selected_items {
        table.add_row([
            item.id.to_string(),
            item.task.clone(),
            if item.is_completed { "x" } else { "" }.to_string(),
            item.priority.to_string(),
            item.due_date
                .map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string()),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn create(title: &str) -> Result<()> {
    let ctx = AppContext::build()?;
    ctx.require_login()?;

    ctx.store.create_list(title).await;
    ctx.check_session()?;

    let state = ctx.store.snapshot();
    if let Some(message) = state.error_message {
        bail!(message);
    }
    println!("Created \"{title}\" ({} lists total)", state.lists.len());
    Ok(())
}
