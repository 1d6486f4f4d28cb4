//! `urlc decode-query QUERY` – show how a query string decodes.

use anyhow::Result;
use urlc_core::QueryCodec;

pub fn run_decode_query(codec: &QueryCodec, query: &str) -> Result<()> {
    let map = codec.decode(query.strip_prefix('?').unwrap_or(query));
    println!("{}", serde_json::to_string_pretty(&map)?);
    Ok(())
}
