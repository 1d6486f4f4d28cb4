//! CLI for the urlc URL composition toolkit.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use urlc_core::{config, MergeFlag, RequestContext};

use commands::{
    run_add_arg, run_completions, run_compose, run_current, run_decode_query, run_del_arg,
};

/// Top-level CLI for urlc.
#[derive(Debug, Parser)]
#[command(name = "urlc")]
#[command(about = "urlc: compose URLs and edit their query arguments", long_about = None)]
pub struct Cli {
    /// Read configuration from PATH instead of ~/.config/urlc/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Merge OVERRIDES into BASE and print the resulting URL.
    Compose {
        /// Base URL (may be partial, e.g. `/path?x=1`).
        base: String,

        /// Override parts written as a (partial) URL, e.g. `?y=2` or `other.html`.
        overrides: Option<String>,

        /// Merge flag, repeatable (replace, join-path, join-query, strip-auth, strip-all, ...).
        /// Defaults to `default_flags` from the config file.
        #[arg(short = 'f', long = "flag", value_name = "FLAG")]
        flags: Vec<MergeFlag>,

        /// Print the final URL parts as JSON instead of the URL.
        #[arg(long)]
        json: bool,
    },

    /// Add, replace or remove query arguments.
    AddArg {
        /// `key=value` sets a value, bare `key` adds a valueless argument, `key!` removes it.
        #[arg(required = true, value_name = "PARAM")]
        params: Vec<String>,

        /// URI to edit; defaults to the CGI request URI.
        #[arg(long)]
        uri: Option<String>,
    },

    /// Remove query arguments by name.
    DelArg {
        /// Argument names to remove.
        #[arg(required = true, value_name = "KEY")]
        keys: Vec<String>,

        /// URI to edit; defaults to the CGI request URI.
        #[arg(long)]
        uri: Option<String>,
    },

    /// Print the current request URL reconstructed from CGI variables.
    Current,

    /// Decode a query string and print it as JSON.
    DecodeQuery {
        /// Query string, with or without the leading `?`.
        query: String,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        let request = RequestContext::from_lookup(|name| std::env::var(name).ok());
        let composer = cfg.composer().with_request_uri(request.request_uri());

        match cli.command {
            CliCommand::Compose {
                base,
                overrides,
                flags,
                json,
            } => {
                let flags = if flags.is_empty() {
                    cfg.merge_flags()
                } else {
                    flags.into_iter().collect()
                };
                run_compose(&composer, &base, overrides.as_deref(), flags, json)?;
            }
            CliCommand::AddArg { params, uri } => {
                run_add_arg(&composer, &params, uri.as_deref())?
            }
            CliCommand::DelArg { keys, uri } => run_del_arg(&composer, &keys, uri.as_deref())?,
            CliCommand::Current => run_current(&request),
            CliCommand::DecodeQuery { query } => run_decode_query(composer.codec(), &query)?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
