use std::collections::HashMap;

/// Parse an `&`-separated `key=value` string into a map.
///
/// Used for both POST form bodies and GET query strings. Each pair is split
/// at its first `=`; a pair without one produces nothing. When a key repeats
/// the last occurrence wins. Values pass through verbatim — this codec does
/// no percent-decoding.
pub fn parse_query_string(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}
