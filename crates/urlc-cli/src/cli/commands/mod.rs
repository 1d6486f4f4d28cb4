//! CLI command handlers, one per file.

mod add_arg;
mod completions;
mod compose;
mod current;
mod decode_query;
mod del_arg;

pub use add_arg::run_add_arg;
pub use completions::run_completions;
pub use compose::run_compose;
pub use current::run_current;
pub use decode_query::run_decode_query;
pub use del_arg::run_del_arg;

#[cfg(test)]
pub(crate) use add_arg::parse_params;
