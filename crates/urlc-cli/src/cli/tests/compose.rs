//! Tests for compose, current, decode-query and completions.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use urlc_core::MergeFlag;

#[test]
fn cli_parse_compose_defaults() {
    match parse(&["urlc", "compose", "http://a.com/x"]) {
        CliCommand::Compose {
            base,
            overrides,
            flags,
            json,
        } => {
            assert_eq!(base, "http://a.com/x");
            assert!(overrides.is_none());
            assert!(flags.is_empty());
            assert!(!json);
        }
        _ => panic!("expected Compose"),
    }
}

#[test]
fn cli_parse_compose_flags() {
    match parse(&[
        "urlc",
        "compose",
        "http://a.com/x?x=1",
        "?y=2",
        "-f",
        "join-query",
        "--flag",
        "STRIP_AUTH",
        "--json",
    ]) {
        CliCommand::Compose {
            overrides,
            flags,
            json,
            ..
        } => {
            assert_eq!(overrides.as_deref(), Some("?y=2"));
            assert_eq!(flags, vec![MergeFlag::JoinQuery, MergeFlag::StripAuth]);
            assert!(json);
        }
        _ => panic!("expected Compose with flags"),
    }
}

#[test]
fn cli_parse_compose_rejects_unknown_flag() {
    assert!(Cli::try_parse_from(["urlc", "compose", "http://a.com/", "-f", "join-all"]).is_err());
}

#[test]
fn cli_parse_global_config() {
    let cli = Cli::try_parse_from(["urlc", "current", "--config", "/tmp/urlc.toml"]).unwrap();
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/tmp/urlc.toml"))
    );
    assert!(matches!(cli.command, CliCommand::Current));
}

#[test]
fn cli_parse_decode_query() {
    match parse(&["urlc", "decode-query", "?a=1&b[]=2"]) {
        CliCommand::DecodeQuery { query } => assert_eq!(query, "?a=1&b[]=2"),
        _ => panic!("expected DecodeQuery"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["urlc", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, clap_complete::Shell::Bash),
        _ => panic!("expected Completions"),
    }
}
