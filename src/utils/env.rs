//! Parser for in-container environment listings

use std::collections::HashMap;

/// Parse the output of running `env` inside a container into a key/value map.
///
/// A line is kept only if splitting on `=` yields exactly two non-empty
/// segments; malformed lines are dropped without error. Values stay as text.
pub fn parse_env(raw: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();

    for line in raw.lines() {
        let segments: Vec<&str> = line.split('=').collect();

        if segments.len() != 2 {
            continue;
        }

        let (key, value) = (segments[0], segments[1]);
        if key.is_empty() || value.is_empty() {
            continue;
        }

        vars.insert(key.to_string(), value.to_string());
    }

    vars
}
