//! Request body validation
//!
//! Dog bodies are checked against a fixed field schema. Every violation is
//! collected so a client sees all of them in one response.

use crate::models::NewDog;
use serde_json::{Map, Value};

/// One allow-listed field and the check its value must pass on create
pub struct FieldRule {
    pub name: &'static str,
    pub check: fn(Option<&Value>) -> bool,
    pub message: &'static str,
}

/// Writable dog fields, in the order their errors are reported
pub const DOG_FIELDS: [FieldRule; 4] = [
    FieldRule {
        name: "name",
        check: is_string,
        message: "name should be a string",
    },
    FieldRule {
        name: "age",
        check: is_truthy_number,
        message: "age should be a number",
    },
    FieldRule {
        name: "breed",
        check: is_string,
        message: "breed should be a string",
    },
    FieldRule {
        name: "description",
        check: is_string,
        message: "description should be a string",
    },
];

fn is_string(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(_)))
}

fn is_truthy_number(value: Option<&Value>) -> bool {
    match value {
        Some(value) => is_truthy(value) && !to_number(value).is_nan(),
        None => false,
    }
}

/// Error messages for body keys outside the schema, in body order
pub fn unknown_keys(body: &Map<String, Value>) -> Vec<String> {
    body.keys()
        .filter(|key| !DOG_FIELDS.iter().any(|rule| rule.name == key.as_str()))
        .map(|key| format!("'{key}' is not a valid key"))
        .collect()
}

/// Validated create body. `age` is already coerced but may still be fractional.
#[derive(Debug, Clone, PartialEq)]
pub struct DogDraft {
    pub name: String,
    pub age: f64,
    pub breed: String,
    pub description: String,
}

impl DogDraft {
    /// Convert to a storable record; `None` when `age` does not fit an integer column
    pub fn into_new_dog(self) -> Option<NewDog> {
        Some(NewDog {
            name: self.name,
            age: whole_number(self.age)?,
            breed: self.breed,
            description: self.description,
        })
    }
}

/// Validate a create body: unknown keys first, then each schema field
pub fn validate_new_dog(body: &Map<String, Value>) -> Result<DogDraft, Vec<String>> {
    let mut errors = unknown_keys(body);

    for rule in &DOG_FIELDS {
        if !(rule.check)(body.get(rule.name)) {
            errors.push(rule.message.to_string());
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let text = |field: &str| {
        body.get(field)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    Ok(DogDraft {
        name: text("name"),
        age: body.get("age").map(to_number).unwrap_or(f64::NAN),
        breed: text("breed"),
        description: text("description"),
    })
}

/// Validate an update body: only key membership is checked
pub fn validate_patch(body: &Map<String, Value>) -> Result<(), Vec<String>> {
    let errors = unknown_keys(body);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `Some` when `n` is a whole number within `i32` range
pub fn whole_number(n: f64) -> Option<i32> {
    if n.fract() == 0.0 && n >= f64::from(i32::MIN) && n <= f64::from(i32::MAX) {
        Some(n as i32)
    } else {
        None
    }
}

/// Falsy values: `null`, `false`, `0`, and the empty string
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Loose numeric conversion of a JSON value
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_number(s),
        Value::Array(_) => parse_number(&to_text(value)),
        Value::Object(_) => f64::NAN,
    }
}

/// String form used when an array is converted to a number
fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(to_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Loose numeric parse of text, NaN when it is not a number.
///
/// Surrounding whitespace is ignored and blank text is zero. Accepts decimal
/// literals with optional sign and exponent, `Infinity`, and unsigned
/// `0x`/`0o`/`0b` integers.
pub fn parse_number(text: &str) -> f64 {
    let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&text[2..], radix);
    }

    // f64's parser also takes "inf" and "nan", which are not numbers here
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return f64::NAN;
    }

    text.parse().unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits.chars().try_fold(0.0, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
    .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_valid_body_coerces_age() {
        let draft = validate_new_dog(&body(json!({
            "name": "Rex",
            "age": "3",
            "breed": "Lab",
            "description": "friendly"
        })))
        .unwrap();

        assert_eq!(draft.age, 3.0);
        assert_eq!(
            draft.into_new_dog(),
            Some(NewDog {
                name: "Rex".to_string(),
                age: 3,
                breed: "Lab".to_string(),
                description: "friendly".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_keys_reported_first_in_body_order() {
        let errors = validate_new_dog(&body(json!({
            "zeta": 1,
            "name": 5,
            "alpha": 2,
            "age": 3,
            "breed": "Lab",
            "description": "x"
        })))
        .unwrap_err();

        assert_eq!(
            errors,
            vec![
                "'zeta' is not a valid key",
                "'alpha' is not a valid key",
                "name should be a string",
            ]
        );
    }

    #[test]
    fn test_empty_body_reports_every_field() {
        let errors = validate_new_dog(&Map::new()).unwrap_err();

        assert_eq!(
            errors,
            vec![
                "name should be a string",
                "age should be a number",
                "breed should be a string",
                "description should be a string",
            ]
        );
    }

    #[test]
    fn test_age_must_be_truthy_and_numeric() {
        for age in [json!("abc"), json!(0), json!(""), json!(null), json!(false), json!({})] {
            let errors = validate_new_dog(&body(json!({
                "name": "Rex",
                "age": age.clone(),
                "breed": "Lab",
                "description": "x"
            })))
            .unwrap_err();
            assert_eq!(errors, vec!["age should be a number"], "age = {age}");
        }
    }

    #[test]
    fn test_fractional_age_passes_validation_but_does_not_store() {
        let draft = validate_new_dog(&body(json!({
            "name": "Rex",
            "age": 2.5,
            "breed": "Lab",
            "description": "x"
        })))
        .unwrap();

        assert_eq!(draft.into_new_dog(), None);
    }

    #[test]
    fn test_patch_only_checks_keys() {
        assert!(validate_patch(&body(json!({"name": 5, "age": "old"}))).is_ok());
        assert_eq!(
            validate_patch(&body(json!({"owner": "me", "name": "Max"}))).unwrap_err(),
            vec!["'owner' is not a valid key"]
        );
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), 42.0);
        assert_eq!(parse_number("  7 \n"), 7.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("-1.5e2"), -150.0);
        assert_eq!(parse_number("0x1F"), 31.0);
        assert_eq!(parse_number("0b101"), 5.0);
        assert_eq!(parse_number("Infinity"), f64::INFINITY);
        assert!(parse_number("abc").is_nan());
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("NaN").is_nan());
        assert!(parse_number("12abc").is_nan());
        assert!(parse_number("-0x10").is_nan());
    }

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(&json!(true)), 1.0);
        assert_eq!(to_number(&json!(null)), 0.0);
        assert_eq!(to_number(&json!([])), 0.0);
        assert_eq!(to_number(&json!(["8"])), 8.0);
        assert!(to_number(&json!([1, 2])).is_nan());
        assert!(to_number(&json!({"a": 1})).is_nan());
    }

    #[test]
    fn test_whole_number() {
        assert_eq!(whole_number(3.0), Some(3));
        assert_eq!(whole_number(-4.0), Some(-4));
        assert_eq!(whole_number(2.5), None);
        assert_eq!(whole_number(f64::NAN), None);
        assert_eq!(whole_number(f64::INFINITY), None);
        assert_eq!(whole_number(1e12), None);
    }
}
