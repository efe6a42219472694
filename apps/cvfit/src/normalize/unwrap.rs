//! Locates the real CV payload inside server wrappers and JSON-string layers.

use serde_json::Value;

/// Nested wrapper levels peeled after the outer wrapper.
const MAX_UNWRAP_DEPTH: usize = 3;

/// Outer wrappers used by the API and older clients, first present wins.
const WRAPPER_KEYS: &[&str] = &["parsed_data", "data", "builder", "content"];

/// Keys that mark a nested `data` value as a CV document.
const DOCUMENT_MARKERS: &[&str] = &["personalInfo", "builder", "experiences"];

/// Parses `value` as JSON when it is a string holding valid JSON; otherwise
/// returns it unchanged.
pub fn try_parse(value: Value) -> Value {
    match value {
        Value::String(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
        other => other,
    }
}

/// Accepts any known server/legacy shape and returns the flat builder payload.
///
/// Returns `Value::Null` for empty input. Never fails: anything that cannot be
/// unwrapped further is returned as-is.
pub fn unwrap_builder(payload: &Value) -> Value {
    let payload = try_parse(payload.clone());
    if !truthy(&payload) {
        return Value::Null;
    }

    let mut current = peel_outer_wrapper(payload);

    for _ in 0..MAX_UNWRAP_DEPTH {
        current = try_parse(current);
        let Value::Object(map) = &current else {
            break;
        };

        // { data: {...} } where the inner value carries builder fields
        if let Some(inner) = map
            .get("data")
            .map(|data| try_parse(data.clone()))
            .filter(looks_like_document)
        {
            current = inner;
            continue;
        }

        // { builder: {...} } around a document without its own personal info
        if !map.get("personalInfo").is_some_and(truthy) {
            if let Some(inner) = map.get("builder").filter(|b| truthy(b)) {
                current = inner.clone();
                continue;
            }
        }

        break;
    }

    try_parse(current)
}

fn peel_outer_wrapper(payload: Value) -> Value {
    let inner = payload.as_object().and_then(|map| {
        WRAPPER_KEYS
            .iter()
            .find_map(|key| map.get(*key).filter(|v| !v.is_null()).cloned())
    });
    try_parse(inner.unwrap_or(payload))
}

fn looks_like_document(value: &Value) -> bool {
    value.as_object().is_some_and(|map| {
        DOCUMENT_MARKERS
            .iter()
            .any(|key| map.get(*key).is_some_and(truthy))
    })
}

/// Loose presence test for values coming from untyped clients.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_input_is_null() {
        assert_eq!(unwrap_builder(&Value::Null), Value::Null);
        assert_eq!(unwrap_builder(&json!("")), Value::Null);
        assert_eq!(unwrap_builder(&json!(false)), Value::Null);
    }

    #[test]
    fn test_plain_document_passes_through() {
        let doc = json!({ "personalInfo": { "fullName": "A" }, "experiences": [] });
        assert_eq!(unwrap_builder(&doc), doc);
    }

    #[test]
    fn test_peels_parsed_data_wrapper() {
        let payload = json!({ "id": 7, "parsed_data": { "personalInfo": { "fullName": "B" } } });
        assert_eq!(unwrap_builder(&payload)["personalInfo"]["fullName"], "B");
    }

    #[test]
    fn test_peels_content_json_string() {
        let inner = json!({ "experiences": [{ "company": "Acme" }] }).to_string();
        let payload = json!({ "content": inner });
        assert_eq!(unwrap_builder(&payload)["experiences"][0]["company"], "Acme");
    }

    #[test]
    fn test_nested_data_with_json_string() {
        let inner = json!({ "personalInfo": { "fullName": "A" } }).to_string();
        let payload = json!({ "data": { "data": inner } });
        assert_eq!(unwrap_builder(&payload)["personalInfo"]["fullName"], "A");
    }

    #[test]
    fn test_builder_inside_data() {
        let payload = json!({
            "template_id": "modern",
            "data": { "builder": { "personalInfo": { "fullName": "C" } } }
        });
        assert_eq!(unwrap_builder(&payload)["personalInfo"]["fullName"], "C");
    }

    #[test]
    fn test_null_personal_info_still_unwraps_builder() {
        let payload = json!({
            "data": { "personalInfo": null, "builder": { "personalInfo": { "fullName": "B" } } }
        });
        assert_eq!(unwrap_builder(&payload)["personalInfo"]["fullName"], "B");
    }

    #[test]
    fn test_present_personal_info_keeps_document() {
        let payload = json!({
            "data": { "personalInfo": { "fullName": "Outer" }, "builder": { "personalInfo": { "fullName": "Inner" } } }
        });
        assert_eq!(unwrap_builder(&payload)["personalInfo"]["fullName"], "Outer");
    }

    #[test]
    fn test_top_level_json_string() {
        let payload = json!({ "data": { "personalInfo": { "fullName": "D" } } }).to_string();
        assert_eq!(
            unwrap_builder(&Value::String(payload))["personalInfo"]["fullName"],
            "D"
        );
    }

    #[test]
    fn test_data_that_is_not_a_document_stops_unwrapping() {
        let payload = json!({ "data": { "data": { "unrelated": true }, "personalInfo": {} } });
        let unwrapped = unwrap_builder(&payload);
        assert!(unwrapped.get("personalInfo").is_some());
        assert_eq!(unwrapped["data"]["unrelated"], true);
    }

    #[test]
    fn test_unparseable_string_is_kept() {
        assert_eq!(unwrap_builder(&json!("not json")), json!("not json"));
    }

    #[test]
    fn test_depth_is_bounded() {
        let mut payload = json!({ "personalInfo": { "fullName": "deep" } });
        for _ in 0..6 {
            payload = json!({ "builder": payload });
        }
        // one outer peel plus three nested levels leaves two wrappers in place
        let unwrapped = unwrap_builder(&payload);
        assert!(unwrapped.get("builder").is_some());
        assert!(unwrapped.get("personalInfo").is_none());
    }
}
