//! Lenient splitter for full and partial URLs.

use super::UrlParts;
use crate::error::UrlError;

pub(super) fn parse_url(input: &str) -> Result<UrlParts, UrlError> {
    let mut parts = UrlParts::default();
    let mut rest = input;

    if let Some((before, fragment)) = rest.split_once('#') {
        parts.fragment = Some(fragment.to_string());
        rest = before;
    }
    if let Some((before, query)) = rest.split_once('?') {
        parts.query = Some(query.to_string());
        rest = before;
    }

    if let Some((scheme, after)) = split_scheme(input, rest)? {
        parts.scheme = Some(scheme.to_string());
        rest = parse_authority(input, after, &mut parts)?;
    } else if let Some(after) = rest.strip_prefix("//") {
        rest = parse_authority(input, after, &mut parts)?;
    }

    if !rest.is_empty() {
        parts.path = Some(rest.to_string());
    }
    Ok(parts)
}

/// Only `scheme://` counts; a candidate containing `/` belongs to the path.
fn split_scheme<'a>(input: &str, rest: &'a str) -> Result<Option<(&'a str, &'a str)>, UrlError> {
    let Some((scheme, after)) = rest.split_once("://") else {
        return Ok(None);
    };
    if scheme.contains('/') {
        return Ok(None);
    }
    if !is_valid_scheme(scheme) {
        return Err(UrlError::invalid_url(input, "malformed scheme"));
    }
    Ok(Some((scheme, after)))
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Consumes `[user[:pass]@]host[:port]` and returns what follows (the path).
fn parse_authority<'a>(
    input: &str,
    after: &'a str,
    parts: &mut UrlParts,
) -> Result<&'a str, UrlError> {
    let (authority, path) = match after.find('/') {
        Some(i) => after.split_at(i),
        None => (after, ""),
    };

    let host_port = match authority.rsplit_once('@') {
        Some((userinfo, host_port)) => {
            match userinfo.split_once(':') {
                Some((user, pass)) => {
                    parts.user = Some(user.to_string());
                    parts.pass = Some(pass.to_string());
                }
                None => parts.user = Some(userinfo.to_string()),
            }
            host_port
        }
        None => authority,
    };

    let (host, port) = split_port(input, host_port)?;
    if host.is_empty() {
        return Err(UrlError::invalid_url(input, "missing host"));
    }
    if url::Host::parse(host).is_err() {
        return Err(UrlError::invalid_url(input, "malformed host"));
    }
    parts.host = Some(host.to_string());
    parts.port = port;
    Ok(path)
}

fn split_port<'a>(input: &str, host_port: &'a str) -> Result<(&'a str, Option<u32>), UrlError> {
    let (host, port) = if host_port.starts_with('[') {
        let Some(end) = host_port.find(']') else {
            return Err(UrlError::invalid_url(input, "unterminated IPv6 host"));
        };
        let (host, tail) = host_port.split_at(end + 1);
        match tail.strip_prefix(':') {
            Some(port) => (host, port),
            None if tail.is_empty() => (host, ""),
            None => return Err(UrlError::invalid_url(input, "malformed host")),
        }
    } else {
        host_port.rsplit_once(':').unwrap_or((host_port, ""))
    };

    if port.is_empty() {
        return Ok((host, None));
    }
    if !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UrlError::invalid_url(input, "invalid port"));
    }
    let port = port
        .parse::<u32>()
        .map_err(|_| UrlError::invalid_url(input, "port out of range"))?;
    Ok((host, Some(port)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_url() {
        let p = parse_url("https://user:pw@example.com:8080/a/b.html?x=1&y=2#frag").unwrap();
        assert_eq!(p.scheme.as_deref(), Some("https"));
        assert_eq!(p.user.as_deref(), Some("user"));
        assert_eq!(p.pass.as_deref(), Some("pw"));
        assert_eq!(p.host.as_deref(), Some("example.com"));
        assert_eq!(p.port, Some(8080));
        assert_eq!(p.path.as_deref(), Some("/a/b.html"));
        assert_eq!(p.query.as_deref(), Some("x=1&y=2"));
        assert_eq!(p.fragment.as_deref(), Some("frag"));
    }

    #[test]
    fn host_only() {
        let p = parse_url("http://a.com").unwrap();
        assert_eq!(p.host.as_deref(), Some("a.com"));
        assert!(p.path.is_none());
        assert!(p.query.is_none());
    }

    #[test]
    fn query_without_path() {
        let p = parse_url("http://a.com?x=1").unwrap();
        assert!(p.path.is_none());
        assert_eq!(p.query.as_deref(), Some("x=1"));
    }

    #[test]
    fn user_without_password() {
        let p = parse_url("ftp://anon@files.example.org/pub").unwrap();
        assert_eq!(p.user.as_deref(), Some("anon"));
        assert!(p.pass.is_none());
    }

    #[test]
    fn scheme_relative() {
        let p = parse_url("//cdn.example.com/lib.js").unwrap();
        assert!(p.scheme.is_none());
        assert_eq!(p.host.as_deref(), Some("cdn.example.com"));
        assert_eq!(p.path.as_deref(), Some("/lib.js"));
    }

    #[test]
    fn partial_inputs() {
        let p = parse_url("/path/only?x=1").unwrap();
        assert_eq!(p.path.as_deref(), Some("/path/only"));
        assert_eq!(p.query.as_deref(), Some("x=1"));

        let p = parse_url("?a=1").unwrap();
        assert!(p.path.is_none());
        assert_eq!(p.query.as_deref(), Some("a=1"));

        let p = parse_url("foo=bar&x=1").unwrap();
        assert_eq!(p.path.as_deref(), Some("foo=bar&x=1"));

        let p = parse_url("other.html").unwrap();
        assert_eq!(p.path.as_deref(), Some("other.html"));

        let p = parse_url("#top").unwrap();
        assert_eq!(p.fragment.as_deref(), Some("top"));
        assert!(p.path.is_none());
    }

    #[test]
    fn empty_input_is_empty_parts() {
        assert!(parse_url("").unwrap().is_empty());
    }

    #[test]
    fn embedded_url_in_path_is_not_a_scheme() {
        let p = parse_url("/redirect/http://other.com/x").unwrap();
        assert!(p.scheme.is_none());
        assert_eq!(p.path.as_deref(), Some("/redirect/http://other.com/x"));
    }

    #[test]
    fn embedded_url_in_query_is_not_a_scheme() {
        let p = parse_url("/go?to=http://other.com").unwrap();
        assert!(p.scheme.is_none());
        assert_eq!(p.query.as_deref(), Some("to=http://other.com"));
    }

    #[test]
    fn ipv6_host_with_port() {
        let p = parse_url("http://[::1]:3000/x").unwrap();
        assert_eq!(p.host.as_deref(), Some("[::1]"));
        assert_eq!(p.port, Some(3000));
    }

    #[test]
    fn empty_port_is_absent() {
        let p = parse_url("http://a.com:/x").unwrap();
        assert!(p.port.is_none());
    }

    #[test]
    fn errors_name_the_input() {
        for (input, reason) in [
            ("http://", "missing host"),
            ("http:///x", "missing host"),
            ("://a.com", "malformed scheme"),
            ("1http://a.com", "malformed scheme"),
            ("http://a.com:http/", "invalid port"),
            ("http://a.com:99999999999/", "port out of range"),
            ("http://exa mple.com/", "malformed host"),
            ("http://[::1/", "unterminated IPv6 host"),
        ] {
            match parse_url(input) {
                Err(UrlError::InvalidUrl { input: got, reason: why }) => {
                    assert_eq!(got, input);
                    assert_eq!(why, reason, "input {input}");
                }
                other => panic!("expected InvalidUrl for {input}, got {other:?}"),
            }
        }
    }
}
