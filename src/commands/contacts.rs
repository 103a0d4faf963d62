//! Contact commands: sync, search.
//!
//! CHANGELOG:
//! - 10/19/2026 - sync/search against the Contacts.app cache
//! - 01/10/2026 - Implemented list and add with JSON file I/O (Claude)

use super::Workspace;
use crate::contacts::search::{search as search_contacts, suggest};
use crate::contacts::Contact;
use crate::output::OutputControls;
use anyhow::Result;
use serde_json::json;

/// Refresh the contacts cache from Contacts.app.
pub fn sync(ws: &Workspace, output: &OutputControls) -> Result<()> {
    if !output.json {
        println!("Syncing contacts from Mac Contacts app (this may take a moment)...");
    }
    let contacts = ws.directory.sync()?;

    if output.json {
        output.print(&json!({
            "success": true,
            "count": contacts.len(),
            "cache": ws.directory.cache().path(),
        }));
    } else {
        println!("Synced {} contacts.", contacts.len());
    }
    Ok(())
}

/// Cached contacts, syncing first if there is no cache yet.
fn contacts_or_sync(ws: &Workspace) -> Result<Vec<Contact>> {
    match ws.directory.cached() {
        Some(cached) => Ok(cached),
        None => {
            tracing::info!("no contacts cache; syncing before search");
            ws.directory.sync()
        }
    }
}

/// Search cached contacts by name.
pub fn search(ws: &Workspace, query: &str, output: &OutputControls) -> Result<Vec<Contact>> {
    let all = contacts_or_sync(ws)?;
    let matches: Vec<Contact> = search_contacts(&all, query).into_iter().cloned().collect();
    let suggestions: Vec<&str> = if matches.is_empty() {
        suggest(&all, query, 3).into_iter().map(|c| c.name.as_str()).collect()
    } else {
        Vec::new()
    };

    if output.json {
        output.print(&json!({
            "query": query,
            "contacts": matches,
            "suggestions": suggestions,
        }));
        return Ok(matches);
    }

    if matches.is_empty() {
        println!("No contacts found matching '{}'", query);
        if !suggestions.is_empty() {
            println!("Did you mean: {}?", suggestions.join(", "));
        }
        return Ok(matches);
    }

    println!("Found {} match(es):", matches.len());
    for (i, c) in matches.iter().enumerate() {
        println!("  {}. {} - {}", i + 1, c.name, c.phone);
    }
    Ok(matches)
}
