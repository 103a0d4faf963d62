//! Contact retrieval and the search-and-select loop.

use super::style::{rule, BOLD_BLUE, RESET};
use super::Shell;
use crate::contacts::search::{looks_like_selection, parse_selection, search, suggest};
use crate::contacts::Contact;
use anyhow::Result;
use std::io::{BufRead, Write};

const SUGGESTION_LIMIT: usize = 3;

impl<R: BufRead, W: Write> Shell<'_, R, W> {
    /// Contacts from the cache, syncing from Contacts.app on a miss.
    pub(crate) fn load_contacts(&mut self) -> Result<Vec<Contact>> {
        if let Some(cached) = self.directory.cached() {
            self.console.say(format!(
                "Using {} cached contacts. (Type 'sync' to refresh from Mac Contacts)\n",
                cached.len()
            ))?;
            return Ok(cached);
        }
        Ok(self.sync_contacts()?.unwrap_or_default())
    }

    /// Refresh from Contacts.app; `None` if the sync failed (already reported).
    pub(crate) fn sync_contacts(&mut self) -> Result<Option<Vec<Contact>>> {
        self.console
            .say("Syncing contacts from Mac Contacts app (this may take a moment)...")?;
        match self.directory.sync() {
            Ok(contacts) => {
                self.console.say(format!("Synced {} contacts.\n", contacts.len()))?;
                Ok(Some(contacts))
            }
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "contact sync failed");
                self.console.say(format!("Error loading contacts: {:#}", e))?;
                self.console
                    .say("Try again, or check Contacts access in System Settings > Privacy & Security.")?;
                Ok(None)
            }
        }
    }

    /// Search `all` and add picks to `selected` until the user types `done`.
    ///
    /// Closing input ends the loop like `done`, so picks made so far are kept.
    pub(crate) fn search_contacts(
        &mut self,
        mut all: Vec<Contact>,
        mut selected: Vec<Contact>,
    ) -> Result<Vec<Contact>> {
        self.console.say(rule())?;
        self.console.say("Search and add contacts to your party list")?;
        self.console
            .say("Commands: 'list' | 'sync' | 'done' | or type to search")?;
        self.console.say(rule())?;

        let search_label = format!(
            "\n{}SEARCH YOUR CONTACTS:{} (or 'list'/'sync'/'done'): ",
            BOLD_BLUE, RESET
        );

        loop {
            self.console
                .say(format!("\nParty list: {} contact(s)", selected.len()))?;
            let Some(query) = self.console.prompt(&search_label)? else {
                break;
            };

            match query.to_lowercase().as_str() {
                "done" => break,
                "sync" => {
                    if let Some(fresh) = self.sync_contacts()? {
                        if !fresh.is_empty() {
                            self.console.say("Contacts refreshed from Mac Contacts app.")?;
                        }
                        all = fresh;
                    }
                    continue;
                }
                "list" => {
                    if selected.is_empty() {
                        self.console.say("\n(No contacts added yet)")?;
                    } else {
                        self.console.say("\n--- Current Party List ---")?;
                        self.print_contacts(&selected)?;
                    }
                    continue;
                }
                "" => continue,
                _ => {}
            }

            if looks_like_selection(&query) {
                self.console
                    .say("(Enter a search term first, then select by number)")?;
                continue;
            }

            let matches = search(&all, &query);
            if matches.is_empty() {
                self.console
                    .say(format!("No contacts found matching '{}'", query))?;
                let close = suggest(&all, &query, SUGGESTION_LIMIT);
                if !close.is_empty() {
                    let names: Vec<&str> = close.iter().map(|c| c.name.as_str()).collect();
                    self.console.say(format!("Did you mean: {}?", names.join(", ")))?;
                }
                continue;
            }

            self.console
                .say(format!("\nFound {} match(es):", matches.len()))?;
            for (i, contact) in matches.iter().enumerate() {
                let marker = if selected.iter().any(|s| s.same_recipient(contact)) {
                    " [added]"
                } else {
                    ""
                };
                self.console.say(format!(
                    "  {}. {} - {}{}",
                    i + 1,
                    contact.name,
                    contact.phone,
                    marker
                ))?;
            }

            self.console.say(
                "\nEnter numbers to add (e.g., 1,3,5), 'a' for all, or press Enter to search again:",
            )?;
            let Some(selection) = self.console.prompt("> ")? else {
                break;
            };
            if selection.is_empty() {
                continue;
            }

            let picks = match parse_selection(&selection, matches.len()) {
                Ok(picks) => picks,
                Err(e) => {
                    self.console.say(e.to_string())?;
                    continue;
                }
            };

            let mut added = 0;
            for idx in picks {
                let contact = matches[idx];
                if !selected.iter().any(|s| s.same_recipient(contact)) {
                    self.console.say(format!("  + Added {}", contact.name))?;
                    selected.push(contact.clone());
                    added += 1;
                }
            }
            if added == 0 {
                self.console.say("  (All selected contacts already in list)")?;
            }
        }

        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use crate::contacts::Contact;
    use crate::shell::testing::*;

    #[test]
    fn test_select_all_and_dedupe() {
        let h = Harness::new();
        h.store.save("bbq", &[Contact::new("Ada L", "15550100")]).unwrap();

        // open bbq, add via search, pick all "ad" matches, then again
        let out = h.run(&["1", "2", "ad", "a", "ad", "1", "list", "done", "0"]);

        assert!(out.contains("Ada Lovelace - +1 555 0100 [added]"));
        assert!(out.contains("+ Added Adam Smith"));
        assert!(!out.contains("+ Added Ada Lovelace"));
        assert!(out.contains("(All selected contacts already in list)"));
        assert!(out.contains("--- Current Party List ---"));

        let saved = h.store.load("bbq");
        let names: Vec<&str> = saved.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ada L", "Adam Smith"]);
    }

    #[test]
    fn test_numbers_before_search_and_bad_selection() {
        let h = Harness::new();
        let out = h.run(&["bbq", "1,2", "grace", "one", "", "done", "0"]);
        assert!(out.contains("(Enter a search term first, then select by number)"));
        assert!(out.contains("Invalid selection."));
        assert!(h.store.load("bbq").is_empty());
    }

    #[test]
    fn test_no_match_offers_suggestion() {
        let h = Harness::new();
        let out = h.run(&["bbq", "grcae", "done", "0"]);
        assert!(out.contains("No contacts found matching 'grcae'"));
        assert!(out.contains("Did you mean: Grace Hopper?"));
    }

    #[test]
    fn test_sync_inside_search_loop() {
        let h = Harness::uncached(vec![Contact::from_address_book("Zed Shaw", "555 0900")]);
        h.directory
            .cache()
            .save(&[Contact::from_address_book("Old Cache", "555 0001")])
            .unwrap();

        let out = h.run(&["bbq", "zed", "sync", "zed", "1", "done", "0"]);

        assert!(out.contains("No contacts found matching 'zed'"));
        assert!(out.contains("Contacts refreshed from Mac Contacts app."));
        assert_eq!(h.store.load("bbq")[0].name, "Zed Shaw");
    }

    #[test]
    fn test_eof_keeps_picks() {
        let h = Harness::new();
        h.run(&["bbq", "grace", "1"]);
        assert_eq!(h.store.load("bbq")[0].name, "Grace Hopper");
    }
}
