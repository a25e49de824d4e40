use anyhow::Result;
use dialbook_config::AppConfig;
use dialbook_sources::HttpContactApi;
use dialbook_store::Store;
use serde::Serialize;
use std::io::{self, Write};

pub mod completions;
pub mod contacts;
pub mod history;

pub struct Context<'a> {
    pub store: &'a Store,
    pub api: &'a HttpContactApi,
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
