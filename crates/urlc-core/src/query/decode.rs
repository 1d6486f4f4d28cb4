//! Lenient query parsing with bracket-key nesting.

use super::{QueryMap, QueryValue};
use url::form_urlencoded;

pub(super) fn decode(query: &str, is_separator: impl Fn(char) -> bool) -> QueryMap {
    let mut map = QueryMap::new();
    for segment in query.split(is_separator) {
        if segment.is_empty() {
            continue;
        }
        // Splits on the first '=', decodes '+' and %XX, passes bad escapes through.
        let Some((key, value)) = form_urlencoded::parse(segment.as_bytes()).next() else {
            continue;
        };
        insert_pair(&mut map, &key, value.into_owned());
    }
    map
}

fn insert_pair(map: &mut QueryMap, raw_key: &str, value: String) {
    let (base, subs) = split_key(raw_key);
    if base.is_empty() {
        return;
    }
    insert_path(map, base, &subs, value);
}

/// `a[b][]` -> (`a`, [`b`, ``]). Keys without a well-formed bracket suffix
/// are returned whole.
fn split_key(raw: &str) -> (&str, Vec<&str>) {
    let open = match raw.find('[') {
        Some(i) if i > 0 => i,
        _ => return (raw, Vec::new()),
    };
    let mut subs = Vec::new();
    let mut rest = &raw[open..];
    while let Some(inner) = rest.strip_prefix('[') {
        let Some(close) = inner.find(']') else {
            break;
        };
        subs.push(&inner[..close]);
        rest = &inner[close + 1..];
    }
    if subs.is_empty() {
        return (raw, subs);
    }
    (&raw[..open], subs)
}

fn insert_path(map: &mut QueryMap, key: &str, subs: &[&str], value: String) {
    let Some((next, rest)) = subs.split_first() else {
        map.insert(key.to_string(), QueryValue::Value(value));
        return;
    };
    let entry = map
        .entry(key.to_string())
        .or_insert_with(|| QueryValue::Map(QueryMap::new()));
    if !matches!(entry, QueryValue::Map(_)) {
        *entry = QueryValue::Map(QueryMap::new());
    }
    if let QueryValue::Map(children) = entry {
        let child_key = if next.is_empty() {
            next_index(children).to_string()
        } else {
            next.to_string()
        };
        insert_path(children, &child_key, rest, value);
    }
}

/// One past the largest integer key, or 0.
fn next_index(map: &QueryMap) -> usize {
    map.keys()
        .filter_map(|k| k.parse::<usize>().ok())
        .map(|i| i + 1)
        .max()
        .unwrap_or(0)
}
