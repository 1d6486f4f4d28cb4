pub mod config;
pub mod logging;

pub mod composer;
pub mod context;
pub mod error;
pub mod flags;
pub mod query;
pub mod url_parts;

pub use composer::{add_arg, compose, del_arg, ArgMap, ArgValue, Composed, UrlComposer};
pub use context::RequestContext;
pub use error::UrlError;
pub use flags::{MergeFlag, MergeFlags};
pub use query::{QueryCodec, QueryMap, QueryValue};
pub use url_parts::{IntoUrlParts, UrlParts};
