//! `urlc add-arg PARAM...` – add, replace or remove query arguments.

use anyhow::Result;
use urlc_core::{ArgMap, ArgValue, QueryCodec, QueryValue, UrlComposer};

pub fn run_add_arg(composer: &UrlComposer, params: &[String], uri: Option<&str>) -> Result<()> {
    let args = parse_params(composer.codec(), params);
    tracing::debug!("add-arg {:?} uri={:?}", args, uri);
    println!("{}", composer.add_arg(&args, uri)?);
    Ok(())
}

/// PARAMs use query syntax (`a=1`, `f[x]=2`, `flag`); `key!` removes `key`.
/// Removal keys are decoded like set keys, so `a+b!` removes what `a+b=1` sets.
pub(crate) fn parse_params(codec: &QueryCodec, params: &[String]) -> ArgMap {
    let mut removals = Vec::new();
    let mut sets = Vec::new();
    for param in params {
        match param.strip_suffix('!') {
            Some(key) => removals.extend(codec.decode(key).into_keys()),
            None => sets.push(param.as_str()),
        }
    }

    let mut args: ArgMap = codec
        .decode(&sets.join("&"))
        .into_iter()
        .map(|(k, v)| match v {
            QueryValue::Value(ref s) if s.is_empty() => (k, ArgValue::SetEmpty),
            v => (k, ArgValue::Keep(v)),
        })
        .collect();
    for key in removals {
        args.insert(key, ArgValue::Remove);
    }
    args
}
