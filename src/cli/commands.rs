//! Command handlers behind the shell dispatch table.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::catalog::{self, AMENITIES};
use crate::draft::{PropertyDraft, ScalarField, SetField};
use crate::images::{
    aspect_ratio, grid_layout, AspectHint, PathPreviewDecoder, SelectedFile,
};
use crate::pricing;
use crate::utils::persistence;
use crate::wizard::{SubmitRejected, SubmitSink, Wizard, WizardStep, TOTAL_STEPS};

use super::context::{CommandError, ShellContext, COMMANDS};
use super::output;

type CommandResult = Result<(), CommandError>;

pub(crate) fn new_draft(context: &mut ShellContext) -> CommandResult {
    if context.session.is_some() && !context.confirm("Discard the draft in progress?", false)? {
        output::info("Keeping the current draft.");
        return Ok(());
    }
    context.session = Some(Wizard::new_add());
    output::success("New property draft started.");
    output::info(format!("Step: {}", WizardStep::BasicInfo));
    Ok(())
}

pub(crate) fn edit_draft(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(CommandError::Usage("edit-draft <file.json>"));
    };
    let path = PathBuf::from(path);
    let draft = persistence::load_draft_from_file(&path)?;
    context.session = Some(Wizard::new_edit(draft));
    context.remember_draft(&path);
    output::success(format!("Editing draft from {}.", path.display()));
    Ok(())
}

pub(crate) fn set_field(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (field, value) = match args {
        [] => return Err(CommandError::Usage("set <field> <value...>")),
        [field, rest @ ..] => (ScalarField::from_str(field)?, rest.join(" ")),
    };
    let wizard = context.wizard_mut()?;
    wizard.draft_mut().set_field(field, &value)?;
    output::success(format!("{} updated.", field.name()));
    Ok(())
}

pub(crate) fn show(context: &ShellContext) -> CommandResult {
    let wizard = context.wizard()?;
    let draft = wizard.draft();
    output::section("Draft in progress");
    let display = |text: &str| {
        if text.is_empty() {
            "-".to_string()
        } else {
            text.to_string()
        }
    };
    let rows = vec![
        ("Title".to_string(), display(&draft.title)),
        ("Description".to_string(), display(&draft.description)),
        ("Location".to_string(), display(&draft.location)),
        (
            "Coordinates".to_string(),
            match (&draft.latitude, &draft.longitude) {
                (Some(lat), Some(lon)) => format!("{lat}, {lon}"),
                (Some(lat), None) => format!("{lat}, -"),
                (None, Some(lon)) => format!("-, {lon}"),
                (None, None) => "-".to_string(),
            },
        ),
        (
            "Type".to_string(),
            draft
                .property_type
                .map(|kind| kind.label().to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
        (
            "Rooms".to_string(),
            format!(
                "{} bed / {} bath, up to {} guests",
                count(draft.bedrooms),
                count(draft.bathrooms),
                count(draft.max_guests)
            ),
        ),
        (
            "Price".to_string(),
            draft
                .price_per_night
                .map(|price| format!("{price} {}/night", context.config.currency))
                .unwrap_or_else(|| "-".to_string()),
        ),
        ("Amenities".to_string(), join_or_dash(&draft.amenities)),
        (
            "Activities".to_string(),
            join_or_dash(&draft.activity_preferences),
        ),
        (
            "Images".to_string(),
            format!("{} uploaded", draft.images.len()),
        ),
    ];
    output::listing(&rows);
    output::info(format!("Step: {}", wizard.current_step()));
    Ok(())
}

fn count(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "?".into())
}

fn join_or_dash(entries: &[String]) -> String {
    if entries.is_empty() {
        "-".to_string()
    } else {
        entries.join(", ")
    }
}

pub(crate) fn steps(context: &ShellContext) -> CommandResult {
    let wizard = context.wizard()?;
    output::section("Wizard steps");
    let rows: Vec<_> = WizardStep::ALL
        .iter()
        .map(|step| {
            let marker = if *step == wizard.current_step() {
                "->"
            } else {
                "  "
            };
            (
                format!("{marker} {}.", step.number()),
                step.title().to_string(),
            )
        })
        .collect();
    output::listing(&rows);
    Ok(())
}

pub(crate) fn next(context: &mut ShellContext) -> CommandResult {
    let wizard = context.wizard_mut()?;
    let step = wizard.go_next()?;
    output::success(format!("Now on {step}."));
    Ok(())
}

pub(crate) fn back(context: &mut ShellContext) -> CommandResult {
    let wizard = context.wizard_mut()?;
    let step = wizard.go_previous();
    output::info(format!("Now on {step}."));
    Ok(())
}

pub(crate) fn goto(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [number] = args else {
        return Err(CommandError::Usage("goto <step>"));
    };
    let number: usize = number
        .parse()
        .map_err(|_| CommandError::message(format!("Enter a step number (1..={TOTAL_STEPS})")))?;
    let wizard = context.wizard_mut()?;
    let step = wizard.go_to_step(number)?;
    output::success(format!("Now on {step}."));
    Ok(())
}

pub(crate) fn amenity(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (action, name) = match args {
        [action, rest @ ..] if !rest.is_empty() => (*action, rest.join(" ")),
        _ => return Err(CommandError::Usage("amenity <add|remove> <name...>")),
    };
    let included = parse_toggle(action, "amenity <add|remove> <name...>")?;
    if !catalog::is_catalog_amenity(&name) {
        return Err(CommandError::message(format!(
            "`{name}` is not a catalog amenity. Run `amenities` for the list."
        )));
    }
    let wizard = context.wizard_mut()?;
    wizard
        .draft_mut()
        .toggle_set_field(SetField::Amenities, &name, included);
    output::success(format!(
        "{name} {}.",
        if included { "selected" } else { "deselected" }
    ));
    Ok(())
}

pub(crate) fn amenities(context: &ShellContext) -> CommandResult {
    let wizard = context.wizard()?;
    output::section("Amenities");
    let rows: Vec<_> = AMENITIES
        .iter()
        .map(|name| {
            let marker = if wizard.draft().has_amenity(name) {
                "[x]"
            } else {
                "[ ]"
            };
            (marker.to_string(), name.to_string())
        })
        .collect();
    output::listing(&rows);
    Ok(())
}

pub(crate) fn activity(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (action, name) = match args {
        [action, rest @ ..] if !rest.is_empty() => (*action, rest.join(" ")),
        _ => return Err(CommandError::Usage("activity <add|remove> <name...>")),
    };
    let included = parse_toggle(action, "activity <add|remove> <name...>")?;
    let wizard = context.wizard_mut()?;
    if included {
        if catalog::is_preset_activity(&name) {
            wizard
                .draft_mut()
                .toggle_set_field(SetField::ActivityPreferences, &name, true);
        } else {
            wizard.draft_mut().add_custom_activity(&name)?;
        }
        output::success(format!("{name} added."));
    } else {
        wizard.draft_mut().remove_activity(&name);
        output::success(format!("{name} removed."));
    }
    Ok(())
}

pub(crate) fn activities(context: &ShellContext) -> CommandResult {
    let wizard = context.wizard()?;
    let draft = wizard.draft();
    output::section("Activity preferences");
    if draft.activity_preferences.is_empty() {
        output::info("None selected yet.");
        return Ok(());
    }
    let rows: Vec<_> = draft
        .activity_preferences
        .iter()
        .map(|name| {
            let origin = if catalog::is_preset_activity(name) {
                ""
            } else {
                "(custom)"
            };
            (name.to_string(), origin.to_string())
        })
        .collect();
    output::listing(&rows);
    Ok(())
}

pub(crate) fn image(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "image <add|remove|move|left|right|primary|list> ...";
    let wizard = context.wizard_mut()?;
    let images = &mut wizard.draft_mut().images;
    match args {
        ["add", paths @ ..] if !paths.is_empty() => {
            let files: Vec<_> = paths
                .iter()
                .map(|path| SelectedFile::from_path(PathBuf::from(path)))
                .collect();
            let outcome = images.add_images(files, &PathPreviewDecoder);
            for rejected in &outcome.rejected {
                output::warning(&rejected.reason);
            }
            output::success(format!(
                "{} image(s) added ({} in gallery).",
                outcome.accepted(),
                images.len()
            ));
        }
        ["remove", index] => {
            let index = parse_index(index)?;
            let id = images
                .items()
                .get(index)
                .map(|image| image.id)
                .ok_or_else(|| {
                    CommandError::message(format!(
                        "No image at index {index} (gallery holds {})",
                        images.len()
                    ))
                })?;
            let removed = images.remove(id)?;
            output::success(format!("Removed {removed}."));
        }
        ["move", from, to] => {
            images.reorder(parse_index(from)?, parse_index(to)?)?;
            output::success("Image moved.");
        }
        ["left", index] => {
            images.move_left(parse_index(index)?)?;
            output::success("Image moved left.");
        }
        ["right", index] => {
            images.move_right(parse_index(index)?)?;
            output::success("Image moved right.");
        }
        ["primary", index] => {
            images.set_primary(parse_index(index)?)?;
            output::success("Primary image updated.");
        }
        ["list"] => {
            output::section("Gallery");
            if images.is_empty() {
                output::info("No images uploaded yet.");
                return Ok(());
            }
            let primary = images.primary_index();
            let total = images.len();
            let rows: Vec<_> = images
                .items()
                .iter()
                .enumerate()
                .map(|(index, image)| {
                    let mut notes = Vec::new();
                    if index == primary {
                        notes.push("primary");
                    }
                    if aspect_ratio(total, index) == AspectHint::Landscape {
                        notes.push("landscape");
                    }
                    (format!("{index}: {image}"), notes.join(", "))
                })
                .collect();
            output::listing(&rows);
            let hint = grid_layout(total);
            let mut layout = format!("Layout: up to {} column(s)", hint.columns);
            if hint.centered {
                layout.push_str(", centered");
            }
            if let Some(visible) = hint.overflow_after {
                layout.push_str(&format!(", overflow indicator after slot {visible}"));
            }
            output::info(layout);
        }
        _ => return Err(CommandError::Usage(USAGE)),
    }
    Ok(())
}

pub(crate) fn save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(CommandError::Usage("save <file.json>"));
    };
    let path = PathBuf::from(path);
    let wizard = context.wizard()?;
    persistence::save_draft_to_file(wizard.draft(), &path)?;
    context.remember_draft(&path);
    output::success(format!("Draft saved to {}.", path.display()));
    Ok(())
}

/// Mock submit collaborator: logs the snapshot and optionally writes it
/// out, standing in for the marketplace API.
struct FileSink {
    path: Option<PathBuf>,
}

impl SubmitSink for FileSink {
    fn submit(&mut self, draft: &PropertyDraft) -> Result<(), SubmitRejected> {
        tracing::info!(title = %draft.title, images = draft.images.len(), "submitting property draft");
        if let Some(path) = &self.path {
            persistence::save_draft_to_file(draft, path)
                .map_err(|err| SubmitRejected(err.to_string()))?;
        }
        Ok(())
    }
}

pub(crate) fn submit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args {
        [] => None,
        [path] => Some(PathBuf::from(path)),
        _ => return Err(CommandError::Usage("submit [file.json]")),
    };
    context.wizard()?;
    if !context.confirm("Submit this property?", true)? {
        output::info("Submission cancelled.");
        return Ok(());
    }
    let wizard = context.wizard()?;
    let mut sink = FileSink { path };
    wizard.submit(&mut sink)?;
    output::success("Property submitted successfully!");
    context.session = None;
    Ok(())
}

pub(crate) fn quote(context: &ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "quote <price> [check-in check-out]";
    let (price, check_in, check_out) = match args {
        [price] => (*price, None, None),
        [price, check_in, check_out] => {
            (*price, Some(parse_date(check_in)?), Some(parse_date(check_out)?))
        }
        _ => return Err(CommandError::Usage(USAGE)),
    };
    let price: f64 = price
        .parse()
        .ok()
        .filter(|value| *value > 0.0)
        .ok_or_else(|| CommandError::message("Price must be a number greater than zero"))?;

    let quote = pricing::quote_for_stay(price, check_in, check_out)?;
    let currency = &context.config.currency;
    output::section("Stay quote");
    output::listing(&[
        ("Nights".to_string(), quote.nights.to_string()),
        (
            "Subtotal".to_string(),
            format!("{} {currency}", quote.subtotal),
        ),
        (
            "Cleaning fee".to_string(),
            format!("{} {currency}", quote.cleaning_fee),
        ),
        (
            "Service fee".to_string(),
            format!("{} {currency}", quote.service_fee),
        ),
        ("Total".to_string(), format!("{} {currency}", quote.total)),
    ]);
    Ok(())
}

pub(crate) fn config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["show"] | [] => {
            output::section("Configuration");
            output::listing(&[
                ("Currency".to_string(), context.config.currency.clone()),
                (
                    "Last draft".to_string(),
                    context
                        .config
                        .last_draft
                        .clone()
                        .unwrap_or_else(|| "-".to_string()),
                ),
                (
                    "Config file".to_string(),
                    context.config_manager.path().display().to_string(),
                ),
            ]);
        }
        ["currency", code] => {
            context.config.currency = code.to_uppercase();
            context.config_manager.save(&context.config)?;
            output::success(format!("Currency set to {}.", context.config.currency));
        }
        _ => return Err(CommandError::Usage("config <show|currency <code>>")),
    }
    Ok(())
}

pub(crate) fn help() -> CommandResult {
    output::section("Commands");
    let rows: Vec<_> = COMMANDS
        .iter()
        .map(|entry| (entry.usage.to_string(), entry.summary.to_string()))
        .collect();
    output::listing(&rows);
    Ok(())
}

pub(crate) fn version() -> CommandResult {
    output::section("Listing Core");
    output::listing(&[
        (
            "Version".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        ),
        (
            "Build".to_string(),
            format!(
                "{} ({})",
                env!("LISTING_CORE_BUILD_HASH"),
                env!("LISTING_CORE_BUILD_STATUS")
            ),
        ),
        (
            "Built at".to_string(),
            env!("LISTING_CORE_BUILD_TIMESTAMP").to_string(),
        ),
        (
            "Target".to_string(),
            format!(
                "{} / {}",
                env!("LISTING_CORE_BUILD_TARGET"),
                env!("LISTING_CORE_BUILD_PROFILE")
            ),
        ),
        (
            "Rustc".to_string(),
            env!("LISTING_CORE_BUILD_RUSTC").to_string(),
        ),
    ]);
    Ok(())
}

fn parse_toggle(action: &str, usage: &'static str) -> Result<bool, CommandError> {
    match action {
        "add" => Ok(true),
        "remove" => Ok(false),
        _ => Err(CommandError::Usage(usage)),
    }
}

fn parse_index(value: &str) -> Result<usize, CommandError> {
    value
        .parse()
        .map_err(|_| CommandError::message("Enter a 0-based image index"))
}

fn parse_date(value: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CommandError::message("Use YYYY-MM-DD format"))
}
