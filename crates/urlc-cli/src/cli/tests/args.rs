//! Tests for add-arg and del-arg.

use super::parse;
use crate::cli::commands::parse_params;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use urlc_core::{ArgValue, QueryCodec, QueryValue, UrlComposer};

fn strings(params: &[&str]) -> Vec<String> {
    params.iter().map(|s| s.to_string()).collect()
}

#[test]
fn cli_parse_add_arg() {
    match parse(&["urlc", "add-arg", "a=1", "flag", "old!", "--uri", "/p?old=1"]) {
        CliCommand::AddArg { params, uri } => {
            assert_eq!(params, vec!["a=1", "flag", "old!"]);
            assert_eq!(uri.as_deref(), Some("/p?old=1"));
        }
        _ => panic!("expected AddArg"),
    }
}

#[test]
fn cli_parse_add_arg_requires_params() {
    assert!(Cli::try_parse_from(["urlc", "add-arg"]).is_err());
}

#[test]
fn cli_parse_del_arg() {
    match parse(&["urlc", "del-arg", "a", "b"]) {
        CliCommand::DelArg { keys, uri } => {
            assert_eq!(keys, vec!["a", "b"]);
            assert!(uri.is_none());
        }
        _ => panic!("expected DelArg"),
    }
}

#[test]
fn params_map_to_arg_values() {
    let args = parse_params(
        &QueryCodec::default(),
        &strings(&["a=1", "flag", "old!", "name=two+words"]),
    );
    assert_eq!(args["a"], ArgValue::Keep(QueryValue::from("1")));
    assert_eq!(args["flag"], ArgValue::SetEmpty);
    assert_eq!(args["old"], ArgValue::Remove);
    assert_eq!(args["name"], ArgValue::Keep(QueryValue::from("two words")));
}

#[test]
fn params_with_brackets_nest() {
    let args = parse_params(&QueryCodec::default(), &strings(&["ids[]=1", "ids[]=2"]));
    let out = UrlComposer::default()
        .add_arg(&args, Some("http://a.com/?x=1"))
        .unwrap();
    assert_eq!(out, "http://a.com/?x=1&ids[]=1&ids[]=2");
}

#[test]
fn removal_keys_are_decoded_like_set_keys() {
    let codec = QueryCodec::default();
    let args = parse_params(&codec, &strings(&["a+b!", "c%5Fd!"]));
    assert_eq!(args["a b"], ArgValue::Remove);
    assert_eq!(args["c_d"], ArgValue::Remove);

    let out = UrlComposer::default()
        .add_arg(&args, Some("http://a.com/?a+b=1&c_d=2&e=3"))
        .unwrap();
    assert_eq!(out, "http://a.com/?e=3");
}
