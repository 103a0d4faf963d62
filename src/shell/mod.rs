//! Interactive shell: pick a list, manage it, and send the texts.
//!
//! Every screen reads from a [`Console`], so closing stdin (Ctrl-D) unwinds
//! the whole session cleanly instead of erroring.
//!
//! CHANGELOG:
//! - 10/19/2026 - Initial implementation

pub mod console;
mod lists;
mod menu;
mod picker;
mod send;
pub mod style;

pub use console::Console;

use crate::compose::MessageGenerator;
use crate::contacts::directory::ContactDirectory;
use crate::contacts::Contact;
use crate::lists::ListStore;
use crate::messaging::Messenger;
use anyhow::Result;
use std::io::{BufRead, Write};

/// Whether a screen wants the session to keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Exit,
}

/// The list currently being worked on.
#[derive(Debug, Clone)]
pub(crate) struct ActiveList {
    pub name: String,
    pub contacts: Vec<Contact>,
}

/// Shell state and its collaborators.
pub struct Shell<'a, R, W> {
    console: Console<R, W>,
    store: &'a ListStore,
    directory: &'a ContactDirectory,
    messenger: &'a dyn Messenger,
    generator: Option<&'a dyn MessageGenerator>,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(
        console: Console<R, W>,
        store: &'a ListStore,
        directory: &'a ContactDirectory,
        messenger: &'a dyn Messenger,
    ) -> Self {
        Self {
            console,
            store,
            directory,
            messenger,
            generator: None,
        }
    }

    /// Offer AI-drafted messages in the send flow.
    pub fn with_generator(mut self, generator: &'a dyn MessageGenerator) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Run until the user exits or input closes.
    pub fn run(&mut self) -> Result<()> {
        tracing::debug!(lists_dir = ?self.store.dir(), "interactive session started");
        while let Some(list) = self.select_or_create_list()? {
            if self.party_menu(list)? == Flow::Exit {
                break;
            }
        }
        self.console.say("\nGoodbye! Party on!")?;
        Ok(())
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Save a list, reporting (not propagating) failures so the session survives.
    fn persist(&mut self, name: &str, contacts: &[Contact]) -> Result<bool> {
        match self.store.save(name, contacts) {
            Ok(()) => Ok(true),
            Err(e) => {
                tracing::error!(list = name, error = %e, "failed to save list");
                self.console.say(format!("Could not save '{}': {}", name, e))?;
                Ok(false)
            }
        }
    }

    fn print_contacts(&mut self, contacts: &[Contact]) -> Result<()> {
        for (i, c) in contacts.iter().enumerate() {
            self.console.say(format!("  {}. {} - {}", i + 1, c.name, c.phone))?;
        }
        Ok(())
    }
}
