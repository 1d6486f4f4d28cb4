//! Query serialization.

use super::{QueryMap, QueryValue};
use url::form_urlencoded::byte_serialize;

pub(super) fn encode(map: &QueryMap, separator: char) -> String {
    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        push_pairs(&mut pairs, &form_encode(key), value);
    }
    let mut buf = [0; 4];
    let separator: &str = separator.encode_utf8(&mut buf);
    pairs.join(separator)
}

/// `key` is already encoded; bracket suffixes are appended literally.
fn push_pairs(pairs: &mut Vec<String>, key: &str, value: &QueryValue) {
    match value {
        QueryValue::Value(v) if v.is_empty() => pairs.push(key.to_string()),
        QueryValue::Value(v) => pairs.push(format!("{}={}", key, form_encode(v))),
        QueryValue::Map(children) => {
            let list = is_scalar_list(children);
            for (sub, child) in children {
                let child_key = if list {
                    format!("{}[]", key)
                } else {
                    format!("{}[{}]", key, form_encode(sub))
                };
                push_pairs(pairs, &child_key, child);
            }
        }
    }
}

fn form_encode(s: &str) -> String {
    byte_serialize(s.as_bytes()).collect()
}

/// Keys are exactly `0..n` in order and every value is a plain string, so
/// `key[]` re-decodes to the same map.
fn is_scalar_list(map: &QueryMap) -> bool {
    map.iter()
        .enumerate()
        .all(|(i, (k, v))| *k == i.to_string() && matches!(v, QueryValue::Value(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, QueryValue)]) -> QueryMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn plain_pairs() {
        let m = map(&[("a", "1".into()), ("b", "two words".into())]);
        assert_eq!(encode(&m, '&'), "a=1&b=two+words");
    }

    #[test]
    fn reserved_characters_escaped() {
        let m = map(&[("q", "a&b=c/d".into()), ("k y", "é".into())]);
        assert_eq!(encode(&m, '&'), "q=a%26b%3Dc%2Fd&k+y=%C3%A9");
    }

    #[test]
    fn empty_value_is_valueless() {
        let m = map(&[("a", "1".into()), ("flag", "".into()), ("b", "2".into())]);
        assert_eq!(encode(&m, '&'), "a=1&flag&b=2");
    }

    #[test]
    fn nested_map_uses_brackets() {
        let inner = map(&[("x", "1".into()), ("y", "2".into())]);
        let m = map(&[("filter", inner.into())]);
        assert_eq!(encode(&m, '&'), "filter[x]=1&filter[y]=2");
    }

    #[test]
    fn scalar_list_uses_empty_brackets() {
        let list = map(&[("0", "a".into()), ("1", "b".into())]);
        let m = map(&[("ids", list.into())]);
        assert_eq!(encode(&m, '&'), "ids[]=a&ids[]=b");
    }

    #[test]
    fn sparse_list_keeps_indices() {
        let list = map(&[("0", "a".into()), ("2", "b".into())]);
        let m = map(&[("ids", list.into())]);
        assert_eq!(encode(&m, '&'), "ids[0]=a&ids[2]=b");
    }

    #[test]
    fn empty_nested_map_emits_nothing() {
        let m = map(&[("a", QueryMap::new().into()), ("b", "1".into())]);
        assert_eq!(encode(&m, '&'), "b=1");
    }
}
