//! Positional date slots
//!
//! TD doses and postnatal contacts are recorded in numbered slots. Their order
//! is the slot number, not the order in which dates were entered, and empty
//! slots may sit between populated ones.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::lenient;

/// Fixed number of optional dates addressed by 1-based slot number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionalSlots<const N: usize> {
    dates: [Option<NaiveDate>; N],
}

impl<const N: usize> Default for PositionalSlots<N> {
    fn default() -> Self {
        Self { dates: [None; N] }
    }
}

impl<const N: usize> PositionalSlots<N> {
    /// Number of slots
    pub const LEN: usize = N;

    /// Build from slot values in order
    #[must_use]
    pub const fn new(dates: [Option<NaiveDate>; N]) -> Self {
        Self { dates }
    }

    /// Date in a 1-based slot, `None` when empty or out of range
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<NaiveDate> {
        slot.checked_sub(1).and_then(|i| self.dates.get(i).copied().flatten())
    }

    /// Set or clear a 1-based slot; returns false when the slot is out of range
    pub fn set(&mut self, slot: usize, date: Option<NaiveDate>) -> bool {
        match slot.checked_sub(1).and_then(|i| self.dates.get_mut(i)) {
            Some(entry) => {
                *entry = date;
                true
            }
            None => false,
        }
    }

    /// All slots in order
    #[must_use]
    pub const fn as_array(&self) -> &[Option<NaiveDate>; N] {
        &self.dates
    }

    /// Populated slots as `(slot, date)` pairs
    pub fn populated(&self) -> impl Iterator<Item = (usize, NaiveDate)> + '_ {
        self.dates
            .iter()
            .enumerate()
            .filter_map(|(i, date)| date.map(|d| (i + 1, d)))
    }

    /// Number of populated slots
    #[must_use]
    pub fn count(&self) -> usize {
        self.dates.iter().filter(|d| d.is_some()).count()
    }

    /// Highest populated slot number, 0 when all are empty
    #[must_use]
    pub fn highest_populated(&self) -> usize {
        self.dates.iter().rposition(Option::is_some).map_or(0, |i| i + 1)
    }
}

/// Tetanus-diphtheria doses `td1`..`td5`
pub type TdDoses = PositionalSlots<5>;

/// Postnatal care contacts `pnc_date_1`..`pnc_date_4`
pub type PncContacts = PositionalSlots<4>;

/// Stored layout of the TD slots
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TdFields {
    #[serde(default, deserialize_with = "lenient::date")]
    td1: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::date")]
    td2: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::date")]
    td3: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::date")]
    td4: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::date")]
    td5: Option<NaiveDate>,
}

impl From<TdFields> for TdDoses {
    fn from(f: TdFields) -> Self {
        Self::new([f.td1, f.td2, f.td3, f.td4, f.td5])
    }
}

impl From<TdDoses> for TdFields {
    fn from(slots: TdDoses) -> Self {
        let [td1, td2, td3, td4, td5] = *slots.as_array();
        Self { td1, td2, td3, td4, td5 }
    }
}

/// Stored layout of the PNC slots
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PncFields {
    #[serde(default, deserialize_with = "lenient::date")]
    pnc_date_1: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::date")]
    pnc_date_2: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::date")]
    pnc_date_3: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::date")]
    pnc_date_4: Option<NaiveDate>,
}

impl From<PncFields> for PncContacts {
    fn from(f: PncFields) -> Self {
        Self::new([f.pnc_date_1, f.pnc_date_2, f.pnc_date_3, f.pnc_date_4])
    }
}

impl From<PncContacts> for PncFields {
    fn from(slots: PncContacts) -> Self {
        let [pnc_date_1, pnc_date_2, pnc_date_3, pnc_date_4] = *slots.as_array();
        Self {
            pnc_date_1,
            pnc_date_2,
            pnc_date_3,
            pnc_date_4,
        }
    }
}

impl Serialize for TdDoses {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TdFields::from(*self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TdDoses {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        TdFields::deserialize(deserializer).map(Self::from)
    }
}

impl Serialize for PncContacts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PncFields::from(*self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PncContacts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        PncFields::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 1, day)
    }

    #[test]
    fn test_slots_are_one_based() {
        let mut slots = TdDoses::default();
        assert!(slots.set(2, d(5)));
        assert!(!slots.set(0, d(5)));
        assert!(!slots.set(6, d(5)));
        assert_eq!(slots.get(2), d(5));
        assert_eq!(slots.get(1), None);
        assert_eq!(slots.highest_populated(), 2);
        assert_eq!(slots.count(), 1);
    }

    #[test]
    fn test_stored_layout_is_flat() {
        let json = r#"{"pnc_date_1": "2024-01-02", "pnc_date_3": "2024-01-09"}"#;
        let slots: PncContacts = serde_json::from_str(json).unwrap();
        assert_eq!(slots.populated().collect::<Vec<_>>(), vec![(1, d(2).unwrap()), (3, d(9).unwrap())]);
        let back = serde_json::to_value(slots).unwrap();
        assert_eq!(back["pnc_date_3"], "2024-01-09");
        assert!(back["pnc_date_2"].is_null());
    }
}
