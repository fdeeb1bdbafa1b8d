//! Shared decoding policy for analytics API payloads.
//!
//! The wire contract is lower-snake-case JSON, but the producer has drifted
//! before (casing, stray comments, trailing commas), so every operation
//! decodes through the same lenient pipeline:
//!
//! 1. strip `//` and `/* */` comments and trailing commas (string-aware);
//! 2. lowercase property names so struct matching is case-insensitive,
//!    leaving the keys of map-valued fields untouched (those are data);
//! 3. deserialize with missing fields defaulting and unknown fields ignored.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Fields whose JSON object values are maps keyed by data (course names,
/// action labels), not by property names. Their keys must survive verbatim.
const MAP_VALUED_FIELDS: &[&str] = &["evasao_por_curso", "recent_actions_summary_global"];

/// Decode a response body under the shared lenient policy.
pub fn from_lenient_json<T: DeserializeOwned>(body: &str) -> Result<T, serde_json::Error> {
    let cleaned = strip_json_extensions(body);
    let mut value: Value = serde_json::from_str(&cleaned)?;
    normalize_property_names(&mut value);
    serde_json::from_value(value)
}

/// Lowercase object keys recursively, except the immediate keys of
/// map-valued fields.
fn normalize_property_names(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let entries: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
            for (key, mut val) in entries {
                let lowered = key.to_lowercase();
                if MAP_VALUED_FIELDS.contains(&lowered.as_str()) {
                    // keys one level down are data; still normalize the
                    // property names inside each entry's value
                    if let Value::Object(inner) = &mut val {
                        for nested in inner.values_mut() {
                            normalize_property_names(nested);
                        }
                    }
                } else {
                    normalize_property_names(&mut val);
                }
                map.insert(lowered, val);
            }
        }
        Value::Array(items) => {
            for item in items {
                normalize_property_names(item);
            }
        }
        _ => {}
    }
}

/// Remove `//` comments, `/* */` comments and trailing commas, leaving
/// string contents untouched.
fn strip_json_extensions(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let len = chars.len();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    let mut in_string = false;

    while i < len {
        let c = chars[i];

        if in_string {
            out.push(c);
            if c == '\\' && i + 1 < len {
                out.push(chars[i + 1]);
                i += 2;
                continue;
            }
            if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
                i += 1;
            }
            '/' if i + 1 < len && chars[i + 1] == '/' => {
                while i < len && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if i + 1 < len && chars[i + 1] == '*' => {
                i += 2;
                while i + 1 < len && !(chars[i] == '*' && chars[i + 1] == '/') {
                    i += 1;
                }
                i = (i + 2).min(len);
            }
            ',' if closes_after(&chars, i + 1) => {
                // trailing comma: drop it, the comments/whitespace after it
                // are handled on the next iterations
                i += 1;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

/// True when the next structural token after `start` (skipping whitespace
/// and comments) closes an object or array.
fn closes_after(chars: &[char], start: usize) -> bool {
    let len = chars.len();
    let mut j = start;
    loop {
        while j < len && chars[j].is_whitespace() {
            j += 1;
        }
        if j + 1 < len && chars[j] == '/' && chars[j + 1] == '/' {
            while j < len && chars[j] != '\n' {
                j += 1;
            }
            continue;
        }
        if j + 1 < len && chars[j] == '/' && chars[j + 1] == '*' {
            j += 2;
            while j + 1 < len && !(chars[j] == '*' && chars[j + 1] == '/') {
                j += 1;
            }
            j = (j + 2).min(len);
            continue;
        }
        break;
    }
    j < len && (chars[j] == '}' || chars[j] == ']')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn strips_line_and_block_comments() {
        let body = "{\n  // a comment\n  \"a\": 1, /* block */ \"b\": 2\n}";
        let value: Value = from_lenient_json(body).expect("should decode");
        assert_eq!(value["a"], 1);
        assert_eq!(value["b"], 2);
    }

    #[test]
    fn strips_trailing_commas() {
        let body = r#"{"a": [1, 2, 3,], "b": {"c": 1,},}"#;
        let value: Value = from_lenient_json(body).expect("should decode");
        assert_eq!(value["a"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["b"]["c"], 1);
    }

    #[test]
    fn trailing_comma_before_comment_and_close() {
        let body = "{\"a\": 1, // note\n}";
        let value: Value = from_lenient_json(body).expect("should decode");
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn comment_markers_inside_strings_survive() {
        let body = r#"{"url": "http://x/y", "note": "a // b /* c */ d, }"}"#;
        let value: Value = from_lenient_json(body).expect("should decode");
        assert_eq!(value["url"], "http://x/y");
        assert_eq!(value["note"], "a // b /* c */ d, }");
    }

    #[test]
    fn property_names_match_case_insensitively() {
        #[derive(serde::Deserialize)]
        struct Shape {
            user_id: String,
            total_actions_global: i64,
        }

        let body = r#"{"User_ID": "9", "Total_Actions_Global": 4}"#;
        let shape: Shape = from_lenient_json(body).expect("should decode");
        assert_eq!(shape.user_id, "9");
        assert_eq!(shape.total_actions_global, 4);
    }

    #[test]
    fn map_valued_field_keys_are_preserved() {
        #[derive(serde::Deserialize)]
        struct Shape {
            evasao_por_curso: HashMap<String, Inner>,
        }
        #[derive(serde::Deserialize)]
        struct Inner {
            total_alunos: i64,
        }

        let body = r#"{"Evasao_Por_Curso": {"Intro to X": {"Total_Alunos": 10}}}"#;
        let shape: Shape = from_lenient_json(body).expect("should decode");
        let inner = shape
            .evasao_por_curso
            .get("Intro to X")
            .expect("mixed-case course key must survive");
        assert_eq!(inner.total_alunos, 10);
    }
}
