use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{display_name, now_millis, now_utc, parse_contact_id};
use anyhow::{anyhow, Context as _, Result};
use clap::{ArgAction, Args};
use dialbook_core::{
    ContactApi, ContactDetailDto, ContactEditor, ContactGroupDto, ContactListItemDto, ContactListSession,
    DeviceBook, OperationResult,
};
use dialbook_sources::{MacosDeviceBook, VcfDeviceBook};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long, short)]
    pub query: Option<String>,
    #[arg(long, action = ArgAction::SetTrue)]
    pub grouped: bool,
    #[arg(long, value_name = "PATH")]
    pub device_vcf: Option<PathBuf>,
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "device_vcf")]
    pub macos_device: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct AddContactArgs {
    #[arg(long)]
    pub first: String,
    #[arg(long)]
    pub last: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "image")]
    pub random_image: bool,
}

#[derive(Debug, Args)]
pub struct EditContactArgs {
    pub id: String,
    #[arg(long)]
    pub first: Option<String>,
    #[arg(long)]
    pub last: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "image")]
    pub random_image: bool,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: String,
}

#[derive(Debug, Serialize)]
struct DeleteOutput {
    deleted: String,
    remaining: usize,
}

pub fn list_contacts(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    if let Some(query) = args.query.as_deref() {
        let trimmed = query.trim();
        if !trimmed.is_empty() {
            ctx.store
                .search_history()
                .add(now_utc(), trimmed)
                .with_context(|| "record search history")?;
        }
    }

    let mut session = ContactListSession::new();
    session.reload(ctx.api).with_context(|| "load contacts")?;
    if let Some(query) = args.query.as_deref() {
        session.set_query(query);
    }

    let device_vcf = args.device_vcf.or_else(|| ctx.config.device.vcf_path.clone());
    if args.macos_device {
        load_device(&mut session, &MacosDeviceBook::new());
    } else if let Some(path) = device_vcf {
        load_device(&mut session, &VcfDeviceBook::new(path));
    }

    if args.grouped {
        let groups: Vec<ContactGroupDto> = session
            .grouped()
            .iter()
            .map(|group| ContactGroupDto::from_group(group, &session))
            .collect();
        if ctx.json {
            return print_json(&groups);
        }
        for group in groups {
            println!("[{}]", group.key);
            for item in &group.contacts {
                print_item(item);
            }
        }
        return Ok(());
    }

    let items: Vec<ContactListItemDto> = session
        .visible()
        .iter()
        .map(|contact| ContactListItemDto::from_contact(contact, &session))
        .collect();
    if ctx.json {
        return print_json(&items);
    }
    for item in &items {
        print_item(item);
    }
    Ok(())
}

/// Device numbers are optional; a failure just means nothing is marked.
fn load_device<D: DeviceBook>(session: &mut ContactListSession, book: &D) {
    match session.load_device_numbers(book) {
        Ok(count) => debug!(source = book.source_name(), count, "device numbers loaded"),
        Err(err) => debug!(source = book.source_name(), error = %err, "device numbers unavailable"),
    }
}

fn print_item(item: &ContactListItemDto) {
    let marker = if item.on_device { "*" } else { " " };
    let id = item.id.as_deref().unwrap_or("-");
    println!(
        "{} {}  {}  {}",
        marker,
        id,
        display_name(&item.first_name, &item.last_name),
        item.phone_number
    );
}

pub fn show_contact(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let id = parse_contact_id(&args.id)?;
    let contact = ctx
        .api
        .find_by_id(&id)
        .ok_or_else(|| not_found("contact not found"))?;
    let detail = ContactDetailDto::from(&contact);

    if ctx.json {
        return print_json(&detail);
    }
    println!("id: {}", detail.id.as_deref().unwrap_or("-"));
    println!("name: {}", display_name(&detail.first_name, &detail.last_name));
    println!("phone: {}", detail.phone_number);
    println!("image: {}", detail.profile_image_url);
    Ok(())
}

pub fn add_contact(ctx: &Context<'_>, args: AddContactArgs) -> Result<()> {
    let mut editor = ContactEditor::new();
    editor.draft.first_name = args.first;
    editor.draft.last_name = args.last;
    editor.draft.phone_number = args.phone;
    if let Some(image) = args.image {
        editor.draft.profile_image_url = image;
    }
    if args.random_image {
        editor.draft.randomize_image(now_millis());
    }

    save(ctx, &mut editor, "created")
}

pub fn edit_contact(ctx: &Context<'_>, args: EditContactArgs) -> Result<()> {
    let id = parse_contact_id(&args.id)?;
    let mut editor = ContactEditor::open(ctx.api, &id);
    if !editor.is_existing() {
        return Err(not_found("contact not found"));
    }

    let mut changed = false;
    if let Some(first) = args.first {
        editor.draft.first_name = first;
        changed = true;
    }
    if let Some(last) = args.last {
        editor.draft.last_name = last;
        changed = true;
    }
    if let Some(phone) = args.phone {
        editor.draft.phone_number = phone;
        changed = true;
    }
    if let Some(image) = args.image {
        editor.draft.profile_image_url = image;
        changed = true;
    }
    if args.random_image {
        editor.draft.randomize_image(now_millis());
        changed = true;
    }
    if !changed {
        return Err(invalid_input("no updates provided"));
    }

    save(ctx, &mut editor, "updated")
}

fn save(ctx: &Context<'_>, editor: &mut ContactEditor, verb: &str) -> Result<()> {
    match editor.save(ctx.api) {
        OperationResult::Saved => {}
        OperationResult::ValidationError => {
            return Err(invalid_input(
                editor.last_error().unwrap_or("missing required field"),
            ));
        }
        _ => {
            return Err(anyhow!(
                "save failed: {}",
                editor.last_error().unwrap_or("unknown error")
            ));
        }
    }

    let id = editor
        .id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    let name = display_name(&editor.draft.first_name, &editor.draft.last_name);
    if ctx.json {
        let request = editor.draft.validate()?;
        return print_json(&serde_json::json!({
            "id": editor.id().map(|id| id.to_string()),
            "contact": request,
        }));
    }
    println!("{} {} {}", verb, id, name);
    Ok(())
}

pub fn delete_contact(ctx: &Context<'_>, args: DeleteArgs) -> Result<()> {
    let id = parse_contact_id(&args.id)?;
    let mut session = ContactListSession::new();
    session
        .delete(ctx.api, &id)
        .with_context(|| format!("delete contact {}", id))?;
    if let Some(err) = session.error() {
        warn!(error = %err, "contact deleted but the list could not be refreshed");
    }

    let output = DeleteOutput {
        deleted: id.to_string(),
        remaining: session.all().len(),
    };
    if ctx.json {
        print_json(&output)
    } else {
        println!("deleted {}", output.deleted);
        Ok(())
    }
}
