//! URL composition: merge override parts into a base URL under
//! [`MergeFlags`], and the query-argument helpers built on top of it.

use crate::error::UrlError;
use crate::flags::{MergeFlag, MergeFlags};
use crate::query::{QueryCodec, QueryMap, QueryValue};
use crate::url_parts::{IntoUrlParts, UrlParts};
use indexmap::IndexMap;
use std::fmt;

/// Per-key instruction for [`UrlComposer::add_arg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// Set the parameter to this value.
    Keep(QueryValue),
    /// Drop the parameter from the query.
    Remove,
    /// Keep the parameter without a value (`?flag`).
    SetEmpty,
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        ArgValue::Keep(v.into())
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        ArgValue::Keep(v.into())
    }
}

impl From<QueryValue> for ArgValue {
    fn from(v: QueryValue) -> Self {
        ArgValue::Keep(v)
    }
}

/// Ordered argument edits.
pub type ArgMap = IndexMap<String, ArgValue>;

/// Result of [`UrlComposer::compose`]: the serialized URL and the final parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composed {
    pub url: String,
    pub parts: UrlParts,
}

impl fmt::Display for Composed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Composes URLs with a given query codec.
///
/// The composer never reads the environment. The fallback URI for
/// [`add_arg`](Self::add_arg) is injected with
/// [`with_request_uri`](Self::with_request_uri).
#[derive(Debug, Clone, Default)]
pub struct UrlComposer {
    codec: QueryCodec,
    request_uri: Option<String>,
}

impl UrlComposer {
    pub fn new(codec: QueryCodec) -> Self {
        Self {
            codec,
            request_uri: None,
        }
    }

    /// URI used by `add_arg`/`del_arg` when the caller passes none.
    pub fn with_request_uri(mut self, uri: impl Into<String>) -> Self {
        self.request_uri = Some(uri.into());
        self
    }

    pub fn codec(&self) -> &QueryCodec {
        &self.codec
    }

    pub fn request_uri(&self) -> Option<&str> {
        self.request_uri.as_deref()
    }

    /// Merges `overrides` into `base` and serializes the result.
    ///
    /// Scheme and host from `overrides` always win. With `Replace`, every
    /// other present override field replaces the base field. Without it only
    /// `JoinPath` and `JoinQuery` apply: a relative path is joined onto the
    /// base path's directory, and queries are deep-merged. Strip flags are
    /// applied last.
    ///
    /// # Examples
    ///
    /// - `compose("http://a.com/path?x=1", "?y=2", JOIN_QUERY)` → `http://a.com/path?x=1&y=2`
    /// - `compose("http://a.com/dir/file.html", "other.html", JOIN_PATH)` →
    ///   `http://a.com/dir/other.html`
    ///
    /// A result with a scheme, user info or port but no host is rejected
    /// with [`UrlError::InvalidUrl`].
    pub fn compose(
        &self,
        base: impl IntoUrlParts,
        overrides: impl IntoUrlParts,
        flags: MergeFlags,
    ) -> Result<Composed, UrlError> {
        let mut url = base.into_url_parts()?;
        let parts = overrides.into_url_parts()?;
        if url.is_empty() && parts.is_empty() {
            return Err(UrlError::InvalidArguments(
                "base and overrides are both empty",
            ));
        }

        let flags = flags.expanded();
        tracing::debug!("compose flags={:?}", flags);

        let UrlParts {
            scheme,
            user,
            pass,
            host,
            port,
            path,
            query,
            fragment,
        } = parts;

        if scheme.is_some() {
            url.scheme = scheme;
        }
        if host.is_some() {
            url.host = host;
        }
        // An empty override path never clears the base path.
        let path = path.filter(|p| !p.is_empty());

        if flags.contains(MergeFlag::Replace) {
            replace_if_present(&mut url.user, user);
            replace_if_present(&mut url.pass, pass);
            replace_if_present(&mut url.port, port);
            replace_if_present(&mut url.path, path);
            replace_if_present(&mut url.query, query);
            replace_if_present(&mut url.fragment, fragment);
        } else {
            if let Some(path) = path.filter(|_| flags.contains(MergeFlag::JoinPath)) {
                let joined = join_path(url.path.as_deref(), &path);
                tracing::trace!("join path {:?} + {:?} -> {:?}", url.path, path, joined);
                url.path = Some(joined);
            }
            if let Some(query) = query.filter(|_| flags.contains(MergeFlag::JoinQuery)) {
                url.query = Some(match url.query.as_deref() {
                    Some(existing) => self.join_query(existing, &query),
                    None => query,
                });
            }
        }

        if let Some(path) = url.path.as_mut() {
            if !path.is_empty() && !path.starts_with('/') {
                path.insert(0, '/');
            }
        }

        strip(&mut url, flags);

        let serialized = url.to_string();
        let has_authority =
            url.scheme.is_some() || url.user.is_some() || url.pass.is_some() || url.port.is_some();
        if has_authority && url.host.is_none() {
            return Err(UrlError::invalid_url(&serialized, "missing host"));
        }
        tracing::trace!("composed {}", serialized);
        Ok(Composed {
            url: serialized,
            parts: url,
        })
    }

    /// Adds, replaces or removes query arguments of `uri` (or of the
    /// injected request URI when `uri` is `None`).
    ///
    /// The result keeps the shape of the input: no leading `/` or `?` is
    /// introduced that the input did not have, and a dangling `?` is trimmed.
    ///
    /// # Examples
    ///
    /// - `{"foo": Remove}` on `http://a.com/?foo=1&bar=2` → `http://a.com/?bar=2`
    /// - `{"baz": SetEmpty}` on `http://a.com/?a=1` → `http://a.com/?a=1&baz`
    pub fn add_arg(&self, new_params: &ArgMap, uri: Option<&str>) -> Result<String, UrlError> {
        let uri = uri.or(self.request_uri.as_deref()).unwrap_or("");
        let mut parts = UrlParts::parse(uri)?;

        let mut params = if let Some(query) = parts.query.take() {
            self.codec.decode(&query)
        } else if parts.path.as_deref().is_some_and(|p| p.contains('=')) {
            // Inputs like "a=1&b=2" parse as a path.
            let query = parts.path.take().unwrap_or_default();
            self.codec.decode(&query)
        } else {
            QueryMap::new()
        };

        for (key, value) in new_params {
            match value {
                ArgValue::Keep(v) => {
                    params.insert(key.clone(), v.clone());
                }
                ArgValue::SetEmpty => {
                    params.insert(key.clone(), QueryValue::Value(String::new()));
                }
                ArgValue::Remove => {
                    params.shift_remove(key);
                }
            }
        }

        let overrides = UrlParts::default().with_query(self.codec.encode(&params));
        let composed = self.compose(parts, overrides, MergeFlags::REPLACE)?;

        let mut out = composed.url.as_str();
        if !uri.contains('/') {
            out = out.strip_prefix('/').unwrap_or(out);
        }
        if !uri.contains('?') {
            out = out.strip_prefix('?').unwrap_or(out);
        }
        Ok(out.trim_end_matches('?').to_string())
    }

    /// Removes every key in `keys` from the query of `uri`.
    pub fn del_arg<I, K>(&self, keys: I, uri: Option<&str>) -> Result<String, UrlError>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let params: ArgMap = keys
            .into_iter()
            .map(|k| (k.into(), ArgValue::Remove))
            .collect();
        self.add_arg(&params, uri)
    }

    fn join_query(&self, base: &str, overrides: &str) -> String {
        let merged = QueryCodec::merge(
            self.codec.decode(base),
            self.codec.decode(overrides),
            true,
        );
        self.codec.encode(&merged)
    }
}

/// [`UrlComposer::compose`] with the default codec.
pub fn compose(
    base: impl IntoUrlParts,
    overrides: impl IntoUrlParts,
    flags: MergeFlags,
) -> Result<Composed, UrlError> {
    UrlComposer::default().compose(base, overrides, flags)
}

/// [`UrlComposer::add_arg`] on an explicit URI with the default codec.
pub fn add_arg(new_params: &ArgMap, uri: &str) -> Result<String, UrlError> {
    UrlComposer::default().add_arg(new_params, Some(uri))
}

/// [`UrlComposer::del_arg`] on an explicit URI with the default codec.
pub fn del_arg<I, K>(keys: I, uri: &str) -> Result<String, UrlError>
where
    I: IntoIterator<Item = K>,
    K: Into<String>,
{
    UrlComposer::default().del_arg(keys, Some(uri))
}

fn replace_if_present<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// A relative path replaces the last segment of `base`; an absolute one (or
/// a missing base) is used as is.
fn join_path(base: Option<&str>, relative: &str) -> String {
    match base {
        Some(base) if !relative.starts_with('/') => {
            let dir = base.rsplit_once('/').map_or("", |(dir, _)| dir);
            format!(
                "{}/{}",
                dir.trim_end_matches('/'),
                relative.trim_start_matches('/')
            )
        }
        _ => relative.to_string(),
    }
}

fn strip(url: &mut UrlParts, flags: MergeFlags) {
    if flags.contains(MergeFlag::StripUser) {
        url.user = None;
    }
    if flags.contains(MergeFlag::StripPass) {
        url.pass = None;
    }
    if flags.contains(MergeFlag::StripPort) {
        url.port = None;
    }
    if flags.contains(MergeFlag::StripPath) {
        url.path = None;
    }
    if flags.contains(MergeFlag::StripQuery) {
        url.query = None;
    }
    if flags.contains(MergeFlag::StripFragment) {
        url.fragment = None;
    }
}
