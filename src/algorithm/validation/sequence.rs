//! Ordering rules for the dated sub-collections

use chrono::NaiveDate;

use super::ValidationError;
use crate::models::SupplementKind;

/// How a collection orders its dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceRule {
    /// Append-ordered list: a new or edited entry must be later than every other entry
    Chronological,
    /// Numbered slots: a date must fall strictly between its populated neighbours
    Positional,
}

/// The dated sub-collections of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    PrenatalVisits,
    Supplements(SupplementKind),
    LabLogs,
    PostpartumLogs,
    TdDoses,
    PncContacts,
}

impl Collection {
    /// Every ordered collection, supplement kinds separately
    pub const ORDERED: [Self; 7] = [
        Self::PrenatalVisits,
        Self::Supplements(SupplementKind::Ifa),
        Self::Supplements(SupplementKind::Mms),
        Self::Supplements(SupplementKind::Calcium),
        Self::PostpartumLogs,
        Self::TdDoses,
        Self::PncContacts,
    ];

    /// Ordering discipline, `None` for collections without one
    #[must_use]
    pub const fn rule(&self) -> Option<SequenceRule> {
        match self {
            Self::PrenatalVisits | Self::Supplements(_) | Self::PostpartumLogs => {
                Some(SequenceRule::Chronological)
            }
            Self::TdDoses | Self::PncContacts => Some(SequenceRule::Positional),
            Self::LabLogs => None,
        }
    }

    /// Stored field name of the collection
    #[must_use]
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::PrenatalVisits => "prenatal_visits",
            Self::Supplements(kind) => kind.field_name(),
            Self::LabLogs => "lab_logs",
            Self::PostpartumLogs => "postpartum_logs",
            Self::TdDoses => "td",
            Self::PncContacts => "pnc_date",
        }
    }

    /// Stored field name of a 1-based slot
    #[must_use]
    pub fn slot_field(&self, slot: usize) -> String {
        match self {
            Self::TdDoses => format!("td{slot}"),
            Self::PncContacts => format!("pnc_date_{slot}"),
            other => format!("{}[{}]", other.field_name(), slot.saturating_sub(1)),
        }
    }

    fn entry_label(&self) -> &'static str {
        match self {
            Self::PrenatalVisits => "Visit date",
            Self::Supplements(SupplementKind::Ifa) => "IFA log date",
            Self::Supplements(SupplementKind::Mms) => "MMS log date",
            Self::Supplements(SupplementKind::Calcium) => "Calcium log date",
            Self::LabLogs => "Lab date",
            Self::PostpartumLogs => "Postpartum log date",
            Self::TdDoses => "Td dose",
            Self::PncContacts => "Contact",
        }
    }
}

/// Check a date against the other entries of a chronological collection
///
/// An appended entry must follow every existing entry. An edited entry must
/// follow every entry before it in the list and precede every entry after it,
/// so the edit keeps its position.
///
/// # Arguments
/// * `dates` - Dates of the current entries, in list order
/// * `replacing` - Index of the entry being edited, `None` when appending
/// * `new_date` - Date of the new or edited entry
/// * `collection` - Collection being edited, for error reporting
///
/// # Returns
/// An `OutOfOrderDate` error carrying the conflicting date
pub fn check_chronological(
    dates: &[Option<NaiveDate>],
    replacing: Option<usize>,
    new_date: NaiveDate,
    collection: Collection,
) -> Result<(), ValidationError> {
    let split = replacing.unwrap_or(dates.len()).min(dates.len());
    let latest_before = dates[..split].iter().filter_map(|date| *date).max();
    let earliest_after = dates
        .iter()
        .skip(split + 1)
        .filter_map(|date| *date)
        .min();

    if let Some(latest) = latest_before.filter(|latest| new_date <= *latest) {
        return Err(ValidationError::out_of_order(
            collection.field_name(),
            latest,
            format!(
                "{} {new_date} must be after the earlier entry ({latest})",
                collection.entry_label()
            ),
        ));
    }
    if let Some(earliest) = earliest_after.filter(|earliest| new_date >= *earliest) {
        return Err(ValidationError::out_of_order(
            collection.field_name(),
            earliest,
            format!(
                "{} {new_date} must be before the later entry ({earliest})",
                collection.entry_label()
            ),
        ));
    }
    Ok(())
}

/// Check a date against the populated neighbours of a positional slot
///
/// Every earlier populated slot must hold an earlier date and every later
/// populated slot a later one.
pub fn check_positional(
    slots: &[Option<NaiveDate>],
    slot: usize,
    new_date: NaiveDate,
    collection: Collection,
) -> Result<(), ValidationError> {
    if slot == 0 || slot > slots.len() {
        return Err(ValidationError::invalid_range(
            collection.field_name(),
            format!("slot {slot} is outside 1..={}", slots.len()),
        ));
    }
    let index = slot - 1;

    for (i, existing) in slots.iter().enumerate() {
        let Some(existing) = *existing else { continue };
        if i < index && existing >= new_date {
            return Err(ValidationError::out_of_order(
                collection.slot_field(slot),
                existing,
                format!(
                    "{} {slot} ({new_date}) cannot be earlier than or same as {} {} ({existing})",
                    collection.entry_label(),
                    collection.entry_label(),
                    i + 1
                ),
            ));
        }
        if i > index && existing <= new_date {
            return Err(ValidationError::out_of_order(
                collection.slot_field(slot),
                existing,
                format!(
                    "{} {slot} ({new_date}) cannot be later than or same as {} {} ({existing})",
                    collection.entry_label(),
                    collection.entry_label(),
                    i + 1
                ),
            ));
        }
    }
    Ok(())
}

/// Whether populated dates appear in strictly increasing order
#[must_use]
pub fn is_strictly_increasing(dates: impl IntoIterator<Item = Option<NaiveDate>>) -> bool {
    let mut previous: Option<NaiveDate> = None;
    for date in dates.into_iter().flatten() {
        if previous.is_some_and(|p| date <= p) {
            return false;
        }
        previous = Some(date);
    }
    true
}
