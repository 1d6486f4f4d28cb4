//! Query map merging: deep (nested maps merged key by key) or shallow.

use super::{QueryMap, QueryValue};

pub(super) fn merge(mut base: QueryMap, overrides: QueryMap, deep: bool) -> QueryMap {
    for (key, incoming) in overrides {
        match incoming {
            QueryValue::Map(children) if deep => {
                if let Some(QueryValue::Map(existing)) = base.get_mut(&key) {
                    let current = std::mem::take(existing);
                    *existing = merge(current, children, true);
                } else {
                    base.insert(key, QueryValue::Map(children));
                }
            }
            other => {
                base.insert(key, other);
            }
        }
    }
    base
}
