//! Snapshot of the incoming request, used to derive the "current" URL.
//!
//! Nothing here reads process state on its own: callers hand in a variable
//! lookup (the CLI passes `std::env::var`), so the result is a plain value.

/// CGI-style request data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Raw `HTTPS` variable (`on`, `1`, `off`, ...).
    pub https: Option<String>,
    pub auth_user: Option<String>,
    pub auth_password: Option<String>,
    /// `Host` header value, possibly including a port.
    pub host: String,
    pub server_port: Option<u32>,
    /// Path and query as requested, e.g. `/search?q=x`.
    pub request_uri: Option<String>,
    /// Script path, used when no request URI is available.
    pub script_name: Option<String>,
    pub query_string: Option<String>,
}

impl RequestContext {
    /// Builds a context from CGI variable names, trying the PHP-style names
    /// (`PHP_AUTH_USER`, `PHP_SELF`) before the generic ones.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&str]| names.iter().find_map(|&name| lookup(name));
        Self {
            https: lookup("HTTPS"),
            auth_user: first(&["PHP_AUTH_USER", "AUTH_USER"]),
            auth_password: first(&["PHP_AUTH_PW", "AUTH_PW"]),
            host: first(&["HTTP_HOST", "SERVER_NAME"]).unwrap_or_default(),
            server_port: lookup("SERVER_PORT").and_then(|p| p.trim().parse().ok()),
            request_uri: lookup("REQUEST_URI"),
            script_name: first(&["PHP_SELF", "SCRIPT_NAME"]),
            query_string: lookup("QUERY_STRING"),
        }
    }

    pub fn is_https(&self) -> bool {
        self.https
            .as_deref()
            .is_some_and(|v| !v.is_empty() && !v.eq_ignore_ascii_case("off"))
    }

    /// Reconstructs the URL the client requested. The port is only written
    /// when it differs from the scheme default.
    pub fn current_url(&self) -> String {
        let https = self.is_https();
        let mut url = String::from(if https { "https://" } else { "http://" });

        if let Some(user) = &self.auth_user {
            url.push_str(user);
            if let Some(pw) = &self.auth_password {
                url.push(':');
                url.push_str(pw);
            }
            url.push('@');
        }

        url.push_str(&self.host);
        let default_port = if https { 443 } else { 80 };
        if let Some(port) = self.server_port.filter(|p| *p != default_port) {
            url.push(':');
            url.push_str(&port.to_string());
        }

        url.push_str(&self.request_uri());
        url
    }

    /// Request URI, falling back to script name plus query string.
    pub fn request_uri(&self) -> String {
        if let Some(uri) = &self.request_uri {
            return uri.clone();
        }
        let mut uri = self.script_name.clone().unwrap_or_default();
        if let Some(query) = &self.query_string {
            uri.push('?');
            uri.push_str(query);
        }
        uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn ctx(vars: &[(&str, &str)]) -> RequestContext {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RequestContext::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn plain_http_default_port() {
        let c = ctx(&[
            ("HTTP_HOST", "example.com"),
            ("SERVER_PORT", "80"),
            ("REQUEST_URI", "/a?b=1"),
        ]);
        assert!(!c.is_https());
        assert_eq!(c.current_url(), "http://example.com/a?b=1");
    }

    #[test]
    fn https_non_default_port() {
        let c = ctx(&[
            ("HTTPS", "on"),
            ("HTTP_HOST", "example.com"),
            ("SERVER_PORT", "8443"),
            ("REQUEST_URI", "/"),
        ]);
        assert!(c.is_https());
        assert_eq!(c.current_url(), "https://example.com:8443/");
    }

    #[test]
    fn https_off_is_http() {
        let c = ctx(&[("HTTPS", "off"), ("HTTP_HOST", "a.com"), ("SERVER_PORT", "443")]);
        assert!(!c.is_https());
        assert_eq!(c.current_url(), "http://a.com:443");
    }

    #[test]
    fn auth_and_script_fallback() {
        let c = ctx(&[
            ("PHP_AUTH_USER", "bob"),
            ("PHP_AUTH_PW", "pw"),
            ("HTTP_HOST", "a.com"),
            ("SCRIPT_NAME", "/index.cgi"),
            ("QUERY_STRING", "x=1"),
        ]);
        assert_eq!(c.current_url(), "http://bob:pw@a.com/index.cgi?x=1");
        assert_eq!(c.request_uri(), "/index.cgi?x=1");
    }

    #[test]
    fn empty_environment() {
        let c = ctx(&[]);
        assert_eq!(c.current_url(), "http://");
        assert_eq!(c.request_uri(), "");
    }
}
