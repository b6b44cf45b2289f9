//! Shell state, command dispatch, and CLI error types.

use std::path::PathBuf;

use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;
use thiserror::Error;

use crate::config::{Config, ConfigManager};
use crate::errors::ListingError;
use crate::wizard::Wizard;

use super::commands;
use super::output;

/// Fatal shell errors; command-level failures stay inside the loop.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Listing(#[from] ListingError),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Recoverable failure of a single command. Reported and swallowed by the
/// loop; never tears the shell down.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Message(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Listing(#[from] ListingError),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl CommandError {
    pub fn message(text: impl Into<String>) -> Self {
        CommandError::Message(text.into())
    }
}

macro_rules! message_from {
    ($($source:ty),+ $(,)?) => {
        $(impl From<$source> for CommandError {
            fn from(err: $source) -> Self {
                CommandError::Message(err.to_string())
            }
        })+
    };
}

message_from!(
    crate::draft::ActivityError,
    crate::draft::FieldError,
    crate::images::ImageError,
    crate::pricing::QuoteError,
    crate::wizard::WizardError,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub(crate) struct CommandEntry {
    pub name: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
}

pub(crate) const COMMANDS: &[CommandEntry] = &[
    CommandEntry {
        name: "new-draft",
        usage: "new-draft",
        summary: "Start a fresh property wizard (add flow, unrestricted jumps)",
    },
    CommandEntry {
        name: "edit-draft",
        usage: "edit-draft <file.json>",
        summary: "Load a saved draft into an edit wizard (forward jumps re-validate)",
    },
    CommandEntry {
        name: "set",
        usage: "set <field> <value...>",
        summary: "Set one scalar field (title, description, location, latitude, longitude, type, bedrooms, bathrooms, max-guests, price)",
    },
    CommandEntry {
        name: "show",
        usage: "show",
        summary: "Summarize the draft in progress",
    },
    CommandEntry {
        name: "steps",
        usage: "steps",
        summary: "List wizard steps and the current position",
    },
    CommandEntry {
        name: "next",
        usage: "next",
        summary: "Validate the current step and advance",
    },
    CommandEntry {
        name: "back",
        usage: "back",
        summary: "Step backward (no validation)",
    },
    CommandEntry {
        name: "goto",
        usage: "goto <step>",
        summary: "Jump to a step, subject to the session's jump policy",
    },
    CommandEntry {
        name: "amenity",
        usage: "amenity <add|remove> <name...>",
        summary: "Toggle a catalog amenity on the draft",
    },
    CommandEntry {
        name: "amenities",
        usage: "amenities",
        summary: "List the amenity catalog with selections",
    },
    CommandEntry {
        name: "activity",
        usage: "activity <add|remove> <name...>",
        summary: "Toggle a preset activity or add/remove a custom one",
    },
    CommandEntry {
        name: "activities",
        usage: "activities",
        summary: "List selected activities (custom entries marked)",
    },
    CommandEntry {
        name: "image",
        usage: "image <add|remove|move|left|right|primary|list> ...",
        summary: "Manage the draft's image gallery (0-based indexes)",
    },
    CommandEntry {
        name: "save",
        usage: "save <file.json>",
        summary: "Save the draft to a JSON file",
    },
    CommandEntry {
        name: "submit",
        usage: "submit [file.json]",
        summary: "Submit the finished draft (final step only)",
    },
    CommandEntry {
        name: "quote",
        usage: "quote <price> [check-in check-out]",
        summary: "Price a stay (dates as YYYY-MM-DD)",
    },
    CommandEntry {
        name: "config",
        usage: "config <show|currency <code>>",
        summary: "Show or change CLI configuration",
    },
    CommandEntry {
        name: "help",
        usage: "help",
        summary: "Show this command list",
    },
    CommandEntry {
        name: "version",
        usage: "version",
        summary: "Show build information",
    },
    CommandEntry {
        name: "exit",
        usage: "exit",
        summary: "Leave the shell",
    },
];

pub struct ShellContext {
    pub mode: CliMode,
    pub running: bool,
    pub(crate) session: Option<Wizard>,
    pub(crate) config: Config,
    pub(crate) config_manager: ConfigManager,
    pub(crate) theme: ColorfulTheme,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        Ok(Self {
            mode,
            running: true,
            session: None,
            config,
            config_manager,
            theme: ColorfulTheme::default(),
        })
    }

    pub fn prompt(&self) -> String {
        match &self.session {
            Some(wizard) => format!("listing [{}]> ", wizard.step_number()),
            None => "listing> ".to_string(),
        }
    }

    pub(crate) fn command_names(&self) -> Vec<String> {
        COMMANDS
            .iter()
            .map(|entry| entry.name.to_string())
            .chain(std::iter::once("quit".to_string()))
            .collect()
    }

    /// Requires an active wizard session for draft-editing commands.
    pub(crate) fn wizard_mut(&mut self) -> Result<&mut Wizard, CommandError> {
        self.session
            .as_mut()
            .ok_or_else(|| CommandError::message("No draft in progress. Run `new-draft` first."))
    }

    pub(crate) fn wizard(&self) -> Result<&Wizard, CommandError> {
        self.session
            .as_ref()
            .ok_or_else(|| CommandError::message("No draft in progress. Run `new-draft` first."))
    }

    pub(crate) fn remember_draft(&mut self, path: &PathBuf) {
        self.config.last_draft = Some(path.display().to_string());
        if let Err(err) = self.config_manager.save(&self.config) {
            tracing::warn!(error = %err, "could not persist config");
        }
    }

    /// Yes/no confirmation; script mode always answers yes so piped
    /// sessions never block on a prompt.
    pub(crate) fn confirm(&self, prompt: &str, default: bool) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt("Leave the shell?")
            .default(true)
            .interact()
            .map_err(|err| CliError::Io(std::io::Error::other(err.to_string())))
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        match command {
            "new-draft" => commands::new_draft(self),
            "edit-draft" => commands::edit_draft(self, args),
            "set" => commands::set_field(self, args),
            "show" => commands::show(self),
            "steps" => commands::steps(self),
            "next" => commands::next(self),
            "back" => commands::back(self),
            "goto" => commands::goto(self, args),
            "amenity" => commands::amenity(self, args),
            "amenities" => commands::amenities(self),
            "activity" => commands::activity(self, args),
            "activities" => commands::activities(self),
            "image" => commands::image(self, args),
            "save" => commands::save(self, args),
            "submit" => commands::submit(self, args),
            "quote" => commands::quote(self, args),
            "config" => commands::config(self, args),
            "help" => commands::help(),
            "version" => commands::version(),
            "exit" | "quit" => return Ok(LoopControl::Exit),
            _ => {
                output::warning(format!("Unknown command `{raw}`."));
                self.suggest_command(raw);
                Ok(())
            }
        }?;
        Ok(LoopControl::Continue)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        let needle = input.to_lowercase();
        let mut suggestions: Vec<_> = self
            .command_names()
            .into_iter()
            .map(|name| (levenshtein(&needle, &name), name))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::info(format!("Did you mean `{best}`? Try `help` for the full list."));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        output::error(err);
    }
}
