//! Lenient field decoding for stored records
//!
//! Records accumulated over several versions of the data-entry forms store the
//! same field in different shapes: dates as `YYYY-MM-DD` or full ISO
//! timestamps, numbers as numbers or numeric strings, empty strings where a
//! value was cleared. These `deserialize_with` helpers read all of them and
//! fall back to "absent" instead of failing the whole record.

use std::fmt;

use chrono::NaiveDate;
use serde::de::{self, DeserializeOwned, IgnoredAny, IntoDeserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::flags::CompletionFlag;

/// Any scalar a stored field may hold
#[derive(Debug, Clone, PartialEq)]
enum Raw {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    /// Arrays and objects where a scalar was expected
    Nested,
}

struct RawVisitor;

impl<'de> Visitor<'de> for RawVisitor {
    type Value = Raw;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Raw, E> {
        Ok(Raw::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Raw, E> {
        Ok(Raw::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Raw, E> {
        Ok(Raw::UInt(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Raw, E> {
        Ok(Raw::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Raw, E> {
        Ok(Raw::Str(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Raw, E> {
        Ok(Raw::Str(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<Raw, E> {
        Ok(Raw::Null)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Raw, E> {
        Ok(Raw::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Raw, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Raw, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Raw::Nested)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Raw, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Raw::Nested)
    }
}

fn raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Raw, D::Error> {
    deserializer.deserialize_any(RawVisitor)
}

/// Parse a stored date: `YYYY-MM-DD`, or the date part of an ISO timestamp
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Optional date; empty strings, nulls and unparseable text decode as `None`
pub fn date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    Ok(match raw(deserializer)? {
        Raw::Str(s) => {
            let parsed = parse_date(&s);
            if parsed.is_none() && !s.trim().is_empty() {
                log::warn!("Ignoring unparseable date value '{s}'");
            }
            parsed
        }
        _ => None,
    })
}

/// Optional non-negative whole number (ages, counts, gravida)
pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(match raw(deserializer)? {
        Raw::UInt(v) => u32::try_from(v).ok(),
        Raw::Int(v) => u32::try_from(v).ok(),
        Raw::Float(v) if v >= 0.0 && v.is_finite() => Some(v.trunc() as u32),
        Raw::Str(s) => {
            let s = s.trim();
            s.parse::<u32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|v| *v >= 0.0).map(|v| v.trunc() as u32))
        }
        _ => None,
    })
}

/// Optional measurement (weight, height, BMI, birth weight)
pub fn measure<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match raw(deserializer)? {
        Raw::UInt(v) => Some(v as f64),
        Raw::Int(v) => Some(v as f64),
        Raw::Float(v) if v.is_finite() => Some(v),
        Raw::Str(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

/// Plain boolean that may have been stored as text or a number
pub fn boolean<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match raw(deserializer)? {
        Raw::Bool(v) => v,
        Raw::Int(v) => v != 0,
        Raw::UInt(v) => v != 0,
        Raw::Str(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1"),
        _ => false,
    })
}

/// Optional free text; empty strings decode as `None`, numbers as their text
pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match raw(deserializer)? {
        Raw::Str(s) if !s.trim().is_empty() => Some(s),
        Raw::Int(v) => Some(v.to_string()),
        Raw::UInt(v) => Some(v.to_string()),
        Raw::Float(v) => Some(v.to_string()),
        _ => None,
    })
}

/// Free text that defaults to an empty string
pub fn text_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    text(deserializer).map(Option::unwrap_or_default)
}

/// Optional coded value (outcome, sex, trimester, ...)
///
/// Unknown codes are logged and decoded as `None` rather than rejecting the record.
pub fn code<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = match raw(deserializer)? {
        Raw::Str(s) if !s.trim().is_empty() => s,
        _ => return Ok(None),
    };
    let de: de::value::StrDeserializer<'_, de::value::Error> = value.trim().into_deserializer();
    match T::deserialize(de) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            log::warn!("Ignoring unknown code '{value}': {e}");
            Ok(None)
        }
    }
}

/// Completion flag in any of its stored shapes
pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<CompletionFlag, D::Error> {
    Ok(match raw(deserializer)? {
        Raw::Bool(v) => CompletionFlag::Bool(v),
        Raw::Str(s) => CompletionFlag::Text(s),
        Raw::Int(v) => CompletionFlag::Bool(v != 0),
        Raw::UInt(v) => CompletionFlag::Bool(v != 0),
        _ => CompletionFlag::Absent,
    })
}

/// Sequence that tolerates `null` in place of an empty list
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
