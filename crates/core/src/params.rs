//! Pure helper functions for extracting typed parameters from a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. If the key is
//! missing or the value is not the expected type, the default is returned.
//! These never fail — they always produce a usable value.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
///
/// Only succeeds if the JSON value is a non-negative integer that fits in `u64`,
/// then converts to `usize`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- param_f64 --

    #[test]
    fn param_f64_extracts_existing_float() {
        let params = json!({"noise_scale": 0.01});
        assert!((param_f64(&params, "noise_scale", 0.005) - 0.01).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_extracts_integer_as_float() {
        let params = json!({"radius": 300});
        assert!((param_f64(&params, "radius", 0.0) - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_when_key_missing() {
        let params = json!({"other": 1.0});
        assert!((param_f64(&params, "max_speed", 2.0) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_when_wrong_type() {
        let params = json!({"max_speed": "fast"});
        assert!((param_f64(&params, "max_speed", 2.0) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_for_null_value() {
        let params = json!({"max_speed": null});
        assert!((param_f64(&params, "max_speed", 5.0) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_for_non_object() {
        let params = json!("not an object");
        assert!((param_f64(&params, "max_speed", 7.0) - 7.0).abs() < f64::EPSILON);
    }

    // -- param_usize --

    #[test]
    fn param_usize_extracts_existing_integer() {
        let params = json!({"particles": 150});
        assert_eq!(param_usize(&params, "particles", 0), 150);
    }

    #[test]
    fn param_usize_returns_default_when_key_missing() {
        let params = json!({});
        assert_eq!(param_usize(&params, "particles", 70), 70);
    }

    #[test]
    fn param_usize_returns_default_for_float_value() {
        // 2.5 is not a valid u64, so should fall back to default
        let params = json!({"particles": 2.5});
        assert_eq!(param_usize(&params, "particles", 99), 99);
    }

    #[test]
    fn param_usize_returns_default_for_negative_integer() {
        let params = json!({"particles": -1});
        assert_eq!(param_usize(&params, "particles", 5), 5);
    }

    #[test]
    fn param_usize_returns_default_for_string_value() {
        let params = json!({"particles": "many"});
        assert_eq!(param_usize(&params, "particles", 8), 8);
    }

    // -- param_bool --

    #[test]
    fn param_bool_extracts_true() {
        let params = json!({"vignette": true});
        assert!(param_bool(&params, "vignette", false));
    }

    #[test]
    fn param_bool_extracts_false() {
        let params = json!({"vignette": false});
        assert!(!param_bool(&params, "vignette", true));
    }

    #[test]
    fn param_bool_returns_default_when_key_missing() {
        let params = json!({});
        assert!(param_bool(&params, "vignette", true));
    }

    #[test]
    fn param_bool_returns_default_for_wrong_type() {
        let params = json!({"vignette": 1});
        assert!(!param_bool(&params, "vignette", false));
    }

    // -- param_string --

    #[test]
    fn param_string_extracts_existing_string() {
        let params = json!({"palette": "carnival"});
        assert_eq!(param_string(&params, "palette", "mono"), "carnival");
    }

    #[test]
    fn param_string_returns_default_when_key_missing() {
        let params = json!({});
        assert_eq!(param_string(&params, "color_mode", "palette"), "palette");
    }

    #[test]
    fn param_string_returns_default_for_wrong_type() {
        let params = json!({"color_mode": 42});
        assert_eq!(param_string(&params, "color_mode", "hue"), "hue");
    }

    #[test]
    fn param_string_handles_empty_string_value() {
        let params = json!({"palette": ""});
        assert_eq!(param_string(&params, "palette", "carnival"), "");
    }
}
