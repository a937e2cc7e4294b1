use serde::{Deserialize, Serialize};

/// Bitrate exactly as the server reported it.
///
/// Numbers are bits per second. Strings may carry a `k` suffix (kilobits per
/// second) or be the `"N/A"` sentinel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BitrateInput {
    #[default]
    Missing,
    Number(f64),
    Text(String),
}

pub const NOT_AVAILABLE: &str = "N/A";

impl BitrateInput {
    /// Bits per second, or `None` when the value is absent, the sentinel, or
    /// does not start with a number.
    pub fn bits_per_second(&self) -> Option<f64> {
        match self {
            BitrateInput::Missing => None,
            BitrateInput::Number(value) => Some(*value),
            BitrateInput::Text(raw) => {
                if raw.is_empty() || raw == NOT_AVAILABLE {
                    return None;
                }
                match raw.strip_suffix('k') {
                    Some(kilobits) => parse_leading_float(kilobits).map(|value| value * 1000.0),
                    None => parse_leading_float(raw),
                }
            }
        }
    }
}

impl From<f64> for BitrateInput {
    fn from(value: f64) -> Self {
        BitrateInput::Number(value)
    }
}

impl From<i64> for BitrateInput {
    fn from(value: i64) -> Self {
        BitrateInput::Number(value as f64)
    }
}

impl From<u64> for BitrateInput {
    fn from(value: u64) -> Self {
        BitrateInput::Number(value as f64)
    }
}

impl From<&str> for BitrateInput {
    fn from(value: &str) -> Self {
        BitrateInput::Text(value.to_string())
    }
}

impl From<String> for BitrateInput {
    fn from(value: String) -> Self {
        BitrateInput::Text(value)
    }
}

impl<T: Into<BitrateInput>> From<Option<T>> for BitrateInput {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Longest numeric prefix of `raw` (after leading whitespace), so `"12.5abc"`
/// reads as `12.5` and `"abc"` reads as nothing.
fn parse_leading_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;

    for (idx, ch) in trimmed.char_indices() {
        match ch {
            '+' | '-' if idx == 0 => {}
            '+' | '-' if seen_exp && trimmed[..idx].ends_with(['e', 'E']) => {}
            '0'..='9' => {
                seen_digit = true;
                end = idx + 1;
                continue;
            }
            '.' if !seen_dot && !seen_exp => seen_dot = true,
            'e' | 'E' if seen_digit && !seen_exp => seen_exp = true,
            _ => break,
        }
    }

    if !seen_digit {
        return None;
    }

    trimmed[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kilobit_suffix_is_scaled() {
        assert_eq!(BitrateInput::from("5120k").bits_per_second(), Some(5_120_000.0));
    }

    #[test]
    fn plain_strings_are_bits_per_second() {
        assert_eq!(BitrateInput::from("1500").bits_per_second(), Some(1500.0));
        assert_eq!(BitrateInput::from("  42.5 bps").bits_per_second(), Some(42.5));
        assert_eq!(BitrateInput::from("1e3").bits_per_second(), Some(1000.0));
    }

    #[test]
    fn sentinel_and_garbage_have_no_value() {
        assert_eq!(BitrateInput::from("N/A").bits_per_second(), None);
        assert_eq!(BitrateInput::from("").bits_per_second(), None);
        assert_eq!(BitrateInput::from("fast").bits_per_second(), None);
        assert_eq!(BitrateInput::from("k").bits_per_second(), None);
        assert_eq!(BitrateInput::from(None::<f64>).bits_per_second(), None);
    }

    #[test]
    fn deserializes_numbers_strings_and_null() {
        let values: Vec<BitrateInput> =
            serde_json::from_str(r#"[2500000, "800k", "N/A", null]"#).unwrap();
        assert_eq!(
            values,
            vec![
                BitrateInput::Number(2_500_000.0),
                BitrateInput::Text("800k".to_string()),
                BitrateInput::Text("N/A".to_string()),
                BitrateInput::Missing,
            ]
        );
    }
}
