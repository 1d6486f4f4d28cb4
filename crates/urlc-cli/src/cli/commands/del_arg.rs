//! `urlc del-arg KEY...` – remove query arguments.

use anyhow::Result;
use urlc_core::UrlComposer;

pub fn run_del_arg(composer: &UrlComposer, keys: &[String], uri: Option<&str>) -> Result<()> {
    println!("{}", composer.del_arg(keys.iter().cloned(), uri)?);
    Ok(())
}
