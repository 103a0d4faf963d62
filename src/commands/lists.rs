//! List commands: lists, show, add, remove, delete.
//!
//! CHANGELOG:
//! - 10/19/2026 - Initial implementation

use super::Workspace;
use crate::contacts::Contact;
use crate::lists::{validate_name, ListError};
use crate::output::OutputControls;
use anyhow::{anyhow, bail, Result};
use serde_json::json;

/// Print every list with its size.
pub fn list(ws: &Workspace, output: &OutputControls) -> Result<()> {
    let summaries = ws.store.summaries()?;

    if output.json {
        output.print(&summaries);
        return Ok(());
    }

    if summaries.is_empty() {
        println!("No party lists yet.");
        println!("Run 'party-planner' to create one interactively.");
        return Ok(());
    }

    println!("Party lists ({}):", summaries.len());
    println!("{}", "-".repeat(50));
    for summary in &summaries {
        println!("{} ({} contacts)", summary.name, summary.count);
    }
    Ok(())
}

/// Print the contacts of one list.
pub fn show(ws: &Workspace, name: &str, output: &OutputControls) -> Result<()> {
    let name = validate_name(name)?;
    if !ws.store.exists(name) {
        return Err(ListError::NotFound(name.to_string()).into());
    }
    let contacts = ws.store.load(name);

    if output.json {
        output.print(&json!({ "list": name, "contacts": contacts }));
        return Ok(());
    }

    println!("--- {} ---", name);
    if contacts.is_empty() {
        println!("  (No contacts)");
    }
    for (i, c) in contacts.iter().enumerate() {
        println!("  {}. {} - {}", i + 1, c.name, c.phone);
    }
    Ok(())
}

/// Append a contact, creating the list if needed.
///
/// Fails when the recipient is already on the list, so scripts see a
/// non-zero exit.
pub fn add(ws: &Workspace, list: &str, name: &str, phone: &str, output: &OutputControls) -> Result<()> {
    let list = validate_name(list)?;
    let (name, phone) = (name.trim(), phone.trim());
    if name.is_empty() {
        bail!("Name cannot be empty.");
    }
    if phone.is_empty() {
        bail!("Phone number cannot be empty.");
    }

    let mut contacts = ws.store.load(list);
    let contact = Contact::new(name, phone);

    if let Some(existing) = contacts.iter().find(|c| c.same_recipient(&contact)) {
        bail!("{} is already on '{}' as {}", phone, list, existing.name);
    }

    contacts.push(contact);
    ws.store.save(list, &contacts)?;

    if output.json {
        output.print(&json!({ "success": true, "list": list, "count": contacts.len() }));
    } else {
        println!("Added {} ({}) to '{}'", name, phone, list);
    }
    Ok(())
}

/// Remove the contact at a 1-based position.
pub fn remove(ws: &Workspace, list: &str, index: usize, output: &OutputControls) -> Result<Contact> {
    let list = validate_name(list)?;
    if !ws.store.exists(list) {
        return Err(ListError::NotFound(list.to_string()).into());
    }

    let mut contacts = ws.store.load(list);
    if index == 0 || index > contacts.len() {
        return Err(anyhow!(
            "Invalid number {} ('{}' has {} contacts)",
            index,
            list,
            contacts.len()
        ));
    }

    let removed = contacts.remove(index - 1);
    ws.store.save(list, &contacts)?;

    if output.json {
        output.print(&json!({ "success": true, "list": list, "removed": removed }));
    } else {
        println!("Removed {} from '{}'.", removed.name, list);
    }
    Ok(removed)
}

/// Delete a list file. Requires `yes` since there is no prompt here.
pub fn delete(ws: &Workspace, list: &str, yes: bool, output: &OutputControls) -> Result<()> {
    let list = validate_name(list)?;
    if !yes {
        bail!("Refusing to delete '{}' without --yes", list);
    }
    ws.store.delete(list)?;

    if output.json {
        output.print(&json!({ "success": true, "deleted": list }));
    } else {
        println!("Deleted '{}'.", list);
    }
    Ok(())
}
