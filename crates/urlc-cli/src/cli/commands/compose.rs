//! `urlc compose BASE [OVERRIDES]` – merge URL parts.

use anyhow::Result;
use urlc_core::{MergeFlags, UrlComposer};

pub fn run_compose(
    composer: &UrlComposer,
    base: &str,
    overrides: Option<&str>,
    flags: MergeFlags,
    json: bool,
) -> Result<()> {
    let composed = composer.compose(base, overrides.unwrap_or(""), flags)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&composed.parts)?);
    } else {
        println!("{}", composed.url);
    }
    Ok(())
}
