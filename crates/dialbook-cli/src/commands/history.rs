use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::now_utc;
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List saved searches, newest first
    Ls,
    Add(HistoryQueryArgs),
    Rm(HistoryQueryArgs),
    Clear,
}

#[derive(Debug, Args)]
pub struct HistoryQueryArgs {
    pub query: String,
}

pub fn list_history(ctx: &Context<'_>) -> Result<()> {
    let entries = ctx.store.search_history().list()?;
    if ctx.json {
        return print_json(&entries);
    }
    for entry in entries {
        println!("{}", entry);
    }
    Ok(())
}

pub fn add_history(ctx: &Context<'_>, args: HistoryQueryArgs) -> Result<()> {
    let query = args.query.trim();
    if query.is_empty() {
        return Err(invalid_input("query cannot be empty"));
    }
    let added = ctx.store.search_history().add(now_utc(), query)?;
    if !ctx.json {
        if added {
            println!("added {}", query);
        } else {
            println!("already saved {}", query);
        }
    }
    Ok(())
}

pub fn remove_history(ctx: &Context<'_>, args: HistoryQueryArgs) -> Result<()> {
    let removed = ctx.store.search_history().remove(&args.query)?;
    if !ctx.json {
        if removed {
            println!("removed {}", args.query);
        } else {
            println!("not saved {}", args.query);
        }
    }
    Ok(())
}

pub fn clear_history(ctx: &Context<'_>) -> Result<()> {
    let removed = ctx.store.search_history().clear()?;
    if !ctx.json {
        println!("cleared {} entries", removed);
    }
    Ok(())
}
