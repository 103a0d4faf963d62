//! Opening screen: choose, view, or create a party list.

use super::style::{rainbow_text, rule};
use super::{ActiveList, Shell};
use crate::lists::validate_name;
use anyhow::Result;
use std::io::{BufRead, Write};

const WELCOME: &str = "Welcome to Party Planning. Create a new list if you have none, then create a text draft, and we will text everyone individually using the messages app on your mac.";

impl<R: BufRead, W: Write> Shell<'_, R, W> {
    /// Returns the list to work on, or `None` when input closes.
    pub(crate) fn select_or_create_list(&mut self) -> Result<Option<ActiveList>> {
        self.console.say(format!("\n{}", rule()))?;
        self.console.say(format!("         {}", rainbow_text("PARTY PLANNER")))?;
        self.console.say(WELCOME)?;
        self.console.say(rule())?;

        loop {
            let summaries = self.store.summaries()?;
            if summaries.is_empty() {
                self.console.say("\nNo existing party lists found.")?;
                self.console.say("Let's create your first one!\n")?;
                return self.create_new_list();
            }

            self.console.say("\nExisting party lists:")?;
            for (i, summary) in summaries.iter().enumerate() {
                self.console
                    .say(format!("  {}. {} ({} contacts)", i + 1, summary.name, summary.count))?;
            }
            self.console.say("\n  N. Create new list")?;
            self.console.say("  V. View a list's contacts")?;
            self.console.say("")?;

            let Some(choice) = self
                .console
                .prompt("Select a list, 'N' for new, or 'V' to view: ")?
            else {
                return Ok(None);
            };

            match choice.to_lowercase().as_str() {
                "n" => return self.create_new_list(),
                "v" => {
                    let Some(pick) = self.console.prompt("Enter list number to view: ")? else {
                        return Ok(None);
                    };
                    match pick.parse::<usize>() {
                        Ok(n) if n >= 1 && n <= summaries.len() => {
                            let name = &summaries[n - 1].name;
                            let contacts = self.store.load(name);
                            self.console.say(format!("\n--- {} ---", name))?;
                            if contacts.is_empty() {
                                self.console.say("  (No contacts)")?;
                            } else {
                                self.print_contacts(&contacts)?;
                            }
                        }
                        Ok(_) => self.console.say("Invalid number.")?,
                        Err(_) => self.console.say("Invalid input.")?,
                    }
                }
                other => match other.parse::<usize>() {
                    Ok(n) if n >= 1 && n <= summaries.len() => {
                        let name = summaries[n - 1].name.clone();
                        let contacts = self.store.load(&name);
                        self.console
                            .say(format!("\nLoaded '{}' with {} contacts.", name, contacts.len()))?;
                        return Ok(Some(ActiveList { name, contacts }));
                    }
                    _ => self.console.say("Invalid choice.")?,
                },
            }
        }
    }

    /// Name a new list, fill it from the address book, and save it.
    pub(crate) fn create_new_list(&mut self) -> Result<Option<ActiveList>> {
        let name = loop {
            let Some(raw) = self.console.prompt("Name for this party list: ")? else {
                return Ok(None);
            };
            let name = match validate_name(&raw) {
                Ok(name) => name.to_string(),
                Err(e) => {
                    self.console.say(e.to_string())?;
                    continue;
                }
            };

            if self.store.exists(&name) {
                self.console
                    .say(format!("A list named '{}' already exists.", name))?;
                let Some(answer) = self.console.prompt("Overwrite? (y/n): ")? else {
                    return Ok(None);
                };
                if !answer.eq_ignore_ascii_case("y") {
                    continue;
                }
            }
            break name;
        };

        self.console.say("")?;
        let all = self.load_contacts()?;
        let selected = if all.is_empty() {
            self.console
                .say("No contacts found. You can add contacts manually later.")?;
            Vec::new()
        } else {
            self.search_contacts(all, Vec::new())?
        };

        if self.persist(&name, &selected)? {
            self.console
                .say(format!("\nCreated '{}' with {} contacts.", name, selected.len()))?;
            tracing::info!(list = %name, count = selected.len(), "created list");
        } else {
            self.console.say(format!(
                "\n'{}' was not saved; its {} contacts are kept for this session only.",
                name,
                selected.len()
            ))?;
        }

        Ok(Some(ActiveList {
            name,
            contacts: selected,
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::contacts::Contact;
    use crate::shell::testing::*;

    #[test]
    fn test_first_run_creates_list_from_search() {
        let h = Harness::new();
        let out = h.run(&["bbq", "ada", "1", "done", "0"]);

        assert!(out.contains("No existing party lists found."));
        assert!(out.contains("Using 3 cached contacts."));
        assert!(out.contains("Found 2 match(es):"));
        assert!(out.contains("+ Added Ada Lovelace"));
        assert!(out.contains("Created 'bbq' with 1 contacts."));

        let saved = h.store.load("bbq");
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, "Ada Lovelace");
    }

    #[test]
    fn test_failed_save_is_not_reported_as_created() {
        let h = Harness::new();
        // A directory where the list file belongs makes the write fail
        std::fs::create_dir_all(h.dir.path().join("lists").join("bbq.json")).unwrap();

        let out = h.run(&["bbq", "ada", "1", "done", "0"]);

        assert!(out.contains("Could not save 'bbq'"));
        assert!(out.contains("'bbq' was not saved; its 1 contacts are kept for this session only."));
        assert!(!out.contains("Created 'bbq'"));
    }

    #[test]
    fn test_empty_and_invalid_names_reprompt() {
        let h = Harness::new();
        let out = h.run(&["", "../x", "party", "done", "0"]);
        assert!(out.contains("Name cannot be empty."));
        assert!(out.contains("Invalid list name '../x'"));
        assert!(h.store.exists("party"));
    }

    #[test]
    fn test_existing_name_requires_overwrite_confirmation() {
        let h = Harness::new();
        h.store.save("bbq", &[Contact::new("Old", "1")]).unwrap();

        let out = h.run(&["n", "bbq", "n", "bbq", "y", "done", "0"]);

        assert_eq!(out.matches("A list named 'bbq' already exists.").count(), 2);
        assert!(h.store.load("bbq").is_empty());
    }

    #[test]
    fn test_view_then_select() {
        let h = Harness::new();
        h.store.save("bbq", &address_book()).unwrap();

        let out = h.run(&["v", "1", "v", "7", "x", "1", "0"]);

        assert!(out.contains("--- bbq ---"));
        assert!(out.contains("  2. Grace Hopper - +1 555 0200"));
        assert!(out.contains("Invalid number."));
        assert!(out.contains("Invalid choice."));
        assert!(out.contains("Loaded 'bbq' with 3 contacts."));
    }

    #[test]
    fn test_no_address_book_creates_empty_list() {
        let h = Harness::uncached(Vec::new());
        let out = h.run(&["solo", "0"]);
        assert!(out.contains("Synced 0 contacts."));
        assert!(out.contains("No contacts found. You can add contacts manually later."));
        assert!(h.store.exists("solo"));
    }
}
