//! Per-list menu: view, add, remove, delete, and the way into the send flow.

use super::style::{rainbow_text, rule, BOLD, RESET};
use super::{ActiveList, Flow, Shell};
use crate::contacts::Contact;
use anyhow::Result;
use std::io::{BufRead, Write};

impl<R: BufRead, W: Write> Shell<'_, R, W> {
    /// `Flow::Continue` means "back to list selection".
    pub(crate) fn party_menu(&mut self, list: ActiveList) -> Result<Flow> {
        let ActiveList { name, mut contacts } = list;

        loop {
            self.print_menu(&name, contacts.len())?;
            let Some(choice) = self.console.prompt("> ")? else {
                return Ok(Flow::Exit);
            };

            let flow = match choice.as_str() {
                "1" => {
                    self.view_contacts(&contacts)?;
                    Flow::Continue
                }
                "2" => self.add_more_contacts(&name, &mut contacts)?,
                "3" => self.add_contact_manually(&name, &mut contacts)?,
                "4" => self.remove_contact(&name, &mut contacts)?,
                "5" => return Ok(Flow::Continue),
                "6" => self.send_texts(&contacts)?,
                "7" => match self.delete_list(&name)? {
                    Some(true) => return Ok(Flow::Continue),
                    Some(false) => Flow::Continue,
                    None => Flow::Exit,
                },
                "0" => return Ok(Flow::Exit),
                _ => {
                    self.console.say("Invalid option.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
    }

    fn print_menu(&mut self, name: &str, count: usize) -> Result<()> {
        self.console.say(format!("\n{}", rule()))?;
        self.console.say(format!("  {}", name))?;
        self.console.say(format!("  {} contact(s) ready to party", count))?;
        self.console.say(rule())?;

        self.console.say("\n  MANAGE YOUR LIST")?;
        self.console.say("  ----------------")?;
        self.console.say("  1. View contacts")?;
        self.console.say("  2. Add contacts (search)")?;
        self.console.say("  3. Add contact manually")?;
        self.console.say("  4. Remove contact")?;
        self.console.say("  5. Switch/create list")?;
        self.console.say("  7. Delete this list")?;

        self.console.say("\n  ~*~*~*~*~*~*~*~*~*~*~*~*~*~*~*~*~*~")?;
        self.console.say(format!(
            "        {}{}{}",
            BOLD,
            rainbow_text("READY TO MAKE IT HAPPEN?"),
            RESET
        ))?;
        self.console.say("  ~*~*~*~*~*~*~*~*~*~*~*~*~*~*~*~*~*~")?;
        self.console
            .say(format!("  6. SEND THE TEXTS --> {} people are waiting!", count))?;
        self.console.say("      (your party starts here)")?;

        self.console.say("\n  0. Exit")?;
        self.console.say("")?;
        Ok(())
    }

    fn view_contacts(&mut self, contacts: &[Contact]) -> Result<()> {
        if contacts.is_empty() {
            self.console.say("\nNo contacts in your party list yet.")?;
            return Ok(());
        }
        self.console.say("\n--- Party Contacts ---")?;
        self.print_contacts(contacts)?;
        self.console
            .say(format!("\nTotal: {} contact(s)", contacts.len()))?;
        Ok(())
    }

    fn add_more_contacts(&mut self, name: &str, contacts: &mut Vec<Contact>) -> Result<Flow> {
        let all = self.load_contacts()?;
        if all.is_empty() {
            self.console.say("No contacts available.")?;
            return Ok(Flow::Continue);
        }

        *contacts = self.search_contacts(all, std::mem::take(contacts))?;
        self.persist(name, contacts)?;
        Ok(Flow::Continue)
    }

    fn add_contact_manually(&mut self, name: &str, contacts: &mut Vec<Contact>) -> Result<Flow> {
        self.console.say("\n--- Add Contact Manually ---")?;
        let Some(person) = self.console.prompt("Name: ")? else {
            return Ok(Flow::Exit);
        };
        if person.is_empty() {
            self.console.say("Name cannot be empty.")?;
            return Ok(Flow::Continue);
        }

        let Some(phone) = self.console.prompt("Phone number: ")? else {
            return Ok(Flow::Exit);
        };
        if phone.is_empty() {
            self.console.say("Phone number cannot be empty.")?;
            return Ok(Flow::Continue);
        }

        let contact = Contact::new(person, phone);
        if let Some(existing) = contacts.iter().find(|c| c.same_recipient(&contact)) {
            self.console.say(format!(
                "{} is already on the list as {}.",
                contact.phone, existing.name
            ))?;
            return Ok(Flow::Continue);
        }

        self.console
            .say(format!("Added {} to your party list!", contact.name))?;
        contacts.push(contact);
        self.persist(name, contacts)?;
        Ok(Flow::Continue)
    }

    fn remove_contact(&mut self, name: &str, contacts: &mut Vec<Contact>) -> Result<Flow> {
        if contacts.is_empty() {
            self.console.say("\nNo contacts to remove.")?;
            return Ok(Flow::Continue);
        }

        self.view_contacts(contacts)?;
        self.console.say("\nEnter number to remove, or 'c' to cancel:")?;
        let Some(choice) = self.console.prompt("> ")? else {
            return Ok(Flow::Exit);
        };
        if choice.eq_ignore_ascii_case("c") {
            return Ok(Flow::Continue);
        }

        match choice.parse::<usize>() {
            Ok(n) if n >= 1 && n <= contacts.len() => {
                let removed = contacts.remove(n - 1);
                self.persist(name, contacts)?;
                self.console
                    .say(format!("Removed {} from your party list.", removed.name))?;
            }
            Ok(_) => self.console.say("Invalid number.")?,
            Err(_) => self.console.say("Invalid input.")?,
        }
        Ok(Flow::Continue)
    }

    /// `Some(true)` if the list is gone, `Some(false)` if kept, `None` on closed input.
    fn delete_list(&mut self, name: &str) -> Result<Option<bool>> {
        let Some(answer) = self
            .console
            .prompt(&format!("Delete '{}' permanently? (y/n): ", name))?
        else {
            return Ok(None);
        };
        if !answer.eq_ignore_ascii_case("y") {
            return Ok(Some(false));
        }

        match self.store.delete(name) {
            Ok(()) => {
                self.console.say(format!("Deleted '{}'.", name))?;
                Ok(Some(true))
            }
            Err(e) => {
                self.console.say(format!("Could not delete '{}': {}", name, e))?;
                Ok(Some(false))
            }
        }
    }
}
