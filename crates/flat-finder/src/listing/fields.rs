//! Tolerant readers for numeric catalog fields. Exports carry numbers as JSON
//! numbers, quoted strings (sometimes with thousands separators) or floats
//! such as `7.0` for integral values. Anything unreadable degrades to absent
//! instead of failing the whole catalog.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use tracing::warn;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Missing(()),
    Number(f64),
    Text(String),
    Flag(bool),
    Other(IgnoredAny),
}

impl RawNumber {
    /// `Ok(None)` for an explicit null, `Err(())` for a present but unreadable value.
    fn into_f64(self) -> Result<Option<f64>, ()> {
        match self {
            RawNumber::Missing(()) => Ok(None),
            RawNumber::Number(value) if value.is_finite() => Ok(Some(value)),
            RawNumber::Text(text) => {
                let cleaned = text.trim().replace(',', "");
                if cleaned.is_empty() {
                    return Ok(None);
                }
                match cleaned.parse::<f64>() {
                    Ok(value) if value.is_finite() => Ok(Some(value)),
                    _ => Err(()),
                }
            }
            RawNumber::Number(_) | RawNumber::Flag(_) | RawNumber::Other(_) => Err(()),
        }
    }
}

fn integral(value: f64) -> Option<u32> {
    (value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX)).then(|| value as u32)
}

pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawNumber::deserialize(deserializer)?.into_f64() {
        Ok(value) => Ok(value),
        Err(()) => {
            warn!("unreadable numeric catalog field; treating as absent");
            Ok(None)
        }
    }
}

pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawNumber::deserialize(deserializer)?.into_f64() {
        Ok(None) => Ok(None),
        Ok(Some(value)) => match integral(value) {
            Some(level) => Ok(Some(level)),
            None => {
                warn!(value, "non-integral level in catalog; treating as absent");
                Ok(None)
            }
        },
        Err(()) => {
            warn!("unreadable level in catalog; treating as absent");
            Ok(None)
        }
    }
}

/// Quota counts arrive as numbers, numeric strings or availability flags.
/// Anything else counts as no remaining quota.
pub(crate) fn count_or_flag<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawNumber::deserialize(deserializer)?;
    if let RawNumber::Flag(flag) = raw {
        return Ok(u32::from(flag));
    }
    if let RawNumber::Text(text) = &raw {
        match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => return Ok(1),
            "false" | "no" => return Ok(0),
            _ => {}
        }
    }

    match raw.into_f64() {
        Ok(value) => Ok(value
            .filter(|count| *count > 0.0)
            .map_or(0, |count| count.min(f64::from(u32::MAX)) as u32)),
        Err(()) => {
            warn!("unreadable ethnic quota count; treating as exhausted");
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "lenient_f64")]
        amount: Option<f64>,
        #[serde(default, deserialize_with = "lenient_u32")]
        level: Option<u32>,
        #[serde(default, deserialize_with = "count_or_flag")]
        quota: u32,
    }

    fn read(json: &str) -> Row {
        serde_json::from_str(json).expect("lenient fields never reject a value")
    }

    #[test]
    fn numbers_and_numeric_strings_are_read() {
        let row = read(r#"{"amount": "1,250.5", "level": "07", "quota": "3"}"#);
        assert_eq!(row.amount, Some(1_250.5));
        assert_eq!(row.level, Some(7));
        assert_eq!(row.quota, 3);

        let row = read(r#"{"amount": 98, "level": 12.0, "quota": 2.0}"#);
        assert_eq!(row.amount, Some(98.0));
        assert_eq!(row.level, Some(12));
        assert_eq!(row.quota, 2);
    }

    #[test]
    fn unreadable_values_degrade_to_absent() {
        let row = read(r#"{"amount": "n/a", "level": 7.5, "quota": "plenty"}"#);
        assert_eq!(row.amount, None);
        assert_eq!(row.level, None);
        assert_eq!(row.quota, 0);

        let row = read(r#"{"amount": [1], "level": -3, "quota": {"left": 2}}"#);
        assert_eq!(row.amount, None);
        assert_eq!(row.level, None);
        assert_eq!(row.quota, 0);

        let row = read(r#"{"amount": null, "level": "", "quota": null}"#);
        assert_eq!(row.amount, None);
        assert_eq!(row.level, None);
        assert_eq!(row.quota, 0);
    }

    #[test]
    fn quota_flags_in_any_spelling() {
        assert_eq!(read(r#"{"quota": true}"#).quota, 1);
        assert_eq!(read(r#"{"quota": "Yes"}"#).quota, 1);
        assert_eq!(read(r#"{"quota": "false"}"#).quota, 0);
    }
}
