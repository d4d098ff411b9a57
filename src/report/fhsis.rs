//! FHSIS M1 maternal care template
//!
//! The template is three sections of numbered indicator rows, each row
//! carrying the three age-band columns and a total. Low and unknown birth
//! weights are reported split by sex instead of by age band.

use super::layout::{Line, LineKind};
use crate::algorithm::indicators::{Indicator, IndicatorReport};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::filter::ReportPeriod;
use crate::sink::{Cell, Table};

/// Column headers of the rendered table
pub const FHSIS_COLUMNS: [&str; 5] = ["Indicators", "10-14", "15-19", "20-49", "Total"];

const fn counts(label: &'static str, indicator: Indicator) -> Line {
    Line { label, kind: LineKind::Counts(indicator) }
}

const fn heading(label: &'static str) -> Line {
    Line { label, kind: LineKind::Heading }
}

const fn by_sex(label: &'static str, male: Indicator, female: Indicator) -> Line {
    Line { label, kind: LineKind::BySex { male, female } }
}

/// Template sections in order
pub const SECTIONS: [(&str, &[Line]); 3] = [
    ("Prenatal Care", PRENATAL),
    ("Intrapartum Care and Delivery Outcome", INTRAPARTUM),
    ("Postpartum and Newborn Care", POSTPARTUM),
];

const PRENATAL: &[Line] = &[
    counts("1. Pregnant women with at least 4 pre-natal check-ups", Indicator::Visits4),
    heading("2. No. of pregnant women assessed of their nutritional status during the 1st trimester"),
    counts("   a. Pregnant women seen in the 1st trimester who have normal BMI", Indicator::BmiNormal),
    counts("   b. Pregnant women seen in the 1st trimester who have low BMI", Indicator::BmiLow),
    counts("   c. Pregnant women seen in the 1st trimester who have high BMI", Indicator::BmiHigh),
    counts("3. Pregnant women for the first time given at least 2 doses of Td vaccination", Indicator::Td2PlusFirst),
    counts(
        "4. Pregnant women for the 2nd or more times given at least 3 doses of Td vaccination (Td2 Plus)",
        Indicator::Td2PlusRepeat,
    ),
    counts("5. Pregnant women who completed the dose of iron with folic acid supplementation", Indicator::Iron),
    counts("6. Pregnant women who completed doses of calcium carbonate supplementation", Indicator::Calcium),
    counts("7. Pregnant women given one dose of deworming tablet", Indicator::Deworming),
    counts("8. Pregnant women screened for syphilis", Indicator::SyphilisScreen),
    counts("10. Pregnant women tested positive for syphilis", Indicator::SyphilisPositive),
    counts("11. Pregnant women screened for Hepatitis B", Indicator::HepBScreen),
    counts("12. Pregnant women tested positive for Hepatitis B", Indicator::HepBPositive),
    counts("13. Pregnant women screened for HIV", Indicator::HivScreen),
    counts("14. Pregnant women tested for CBC (Hgb and Hct count)", Indicator::AnemiaScreen),
    counts("15. Pregnant women tested for CBC (Hgb and Hct) diagnosed with anemia", Indicator::AnemiaPositive),
    counts("16. Pregnant women screened for gestational diabetes", Indicator::GdScreen),
    counts("17. Pregnant women tested positive for gestational diabetes", Indicator::GdPositive),
];

const INTRAPARTUM: &[Line] = &[
    counts("18. Number of deliveries", Indicator::Deliveries),
    counts("19. Number of live births", Indicator::LiveBirths),
    counts("   a. Number of live births with normal birth weight", Indicator::LbNormal),
    by_sex("   b. Number of live births with low birth weight", Indicator::LbLowMale, Indicator::LbLowFemale),
    by_sex(
        "   c. Number of live births with unknown birth weight",
        Indicator::LbUnknownMale,
        Indicator::LbUnknownFemale,
    ),
    heading("20. Number of deliveries attended by skilled health professionals"),
    counts("   a. Number of deliveries attended by a doctor", Indicator::AttendantMd),
    counts("   b. Number of deliveries attended by a nurse", Indicator::AttendantRn),
    counts("   c. Number of deliveries attended by midwives", Indicator::AttendantMw),
    heading("21. Number of health facility-based deliveries"),
    counts("   a. Number of deliveries in public health facility", Indicator::FacilityPublic),
    counts("   b. Number of deliveries in private health facility", Indicator::FacilityPrivate),
    counts("22. Number of non-facility-based deliveries", Indicator::NonFacility),
    heading("23. Type of Delivery"),
    counts("   a. Number of vaginal deliveries", Indicator::DelVaginal),
    counts("   b. Number of deliveries by cesarean section", Indicator::DelCs),
    heading("24. Pregnancy Outcome"),
    counts("   a. Number of full-term births", Indicator::OutcomeFt),
    counts("   b. Number of pre-term births", Indicator::OutcomePt),
    counts("   c. Number of fetal deaths", Indicator::OutcomeFd),
    counts("   d. Number of abortion/miscarriage", Indicator::OutcomeAb),
];

const POSTPARTUM: &[Line] = &[
    counts(
        "25. Number of postpartum women together with their newborn who completed at least 2 postpartum check-ups",
        Indicator::Pnc2,
    ),
    counts("   a. Number of postpartum women who completed 4 postpartum check-ups", Indicator::Pnc4),
    counts(
        "26. Number of postpartum women who completed iron with folic acid supplementation",
        Indicator::PostpartumIfa,
    ),
    counts("27. Number of postpartum women with Vitamin A supplementation", Indicator::VitA),
    counts("28. No. of pregnant women who are diagnosed with hypertension", Indicator::Hypertension),
    counts("29a. No. of deliveries with 4 ANC", Indicator::Anc4Delivery),
    counts("29b. No. of deliveries with 1 ANC during 1st trimester", Indicator::Anc1stTri),
    counts("30. No. of women who gave birth for the 1st time", Indicator::FirstBirth),
    counts(
        "31. No. of women who gave birth who are Grand Multigravida (G5 and above)",
        Indicator::GrandMultigravida,
    ),
];

fn labelled(label: &str, rest: [Cell; 4]) -> Vec<Cell> {
    let mut row = Vec::with_capacity(FHSIS_COLUMNS.len());
    row.push(Cell::text(label));
    row.extend(rest);
    row
}

/// Render an indicator report into the FHSIS template
///
/// # Arguments
/// * `report` - Aggregated indicator counts
/// * `period` - Month and barangay printed in the header
/// * `config` - Supplies the city printed in the header
///
/// # Returns
/// A table of `[label, 10-14, 15-19, 20-49, total]` rows: three header rows,
/// then each section title followed by its indicator rows
pub fn render_fhsis(report: &IndicatorReport, period: &ReportPeriod, config: &ReportConfig) -> Result<Table> {
    let mut table = Table::new(FHSIS_COLUMNS);
    let blank = || [Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty];

    for (key, value) in [
        ("Month", period.month_label()),
        ("City", config.city_label.clone()),
        ("Barangay", period.locality_label().to_string()),
    ] {
        table.push_row(labelled(key, [Cell::text(value), Cell::Empty, Cell::Empty, Cell::Empty]))?;
    }

    for (title, lines) in SECTIONS {
        table.push_row(labelled(title, blank()))?;
        for line in lines {
            for row in line.render(report) {
                table.push_row(row)?;
            }
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_every_indicator_has_a_row() {
        let mut seen = FxHashSet::default();
        for (_, lines) in SECTIONS {
            for line in lines {
                seen.extend(line.indicators());
            }
        }
        for indicator in Indicator::ALL {
            if *indicator == Indicator::HivPositive {
                assert!(!seen.contains(indicator), "the form has no HIV positive line");
            } else {
                assert!(seen.contains(indicator), "{indicator} missing from template");
            }
        }
    }

    #[test]
    fn test_header_rows() {
        let period = ReportPeriod::new(2024, Some(3)).unwrap();
        let table = render_fhsis(&IndicatorReport::default(), &period, &ReportConfig::default()).unwrap();
        assert_eq!(table.cell(0, "10-14"), Some(&Cell::Text("March 2024".to_string())));
        assert_eq!(table.cell(1, "10-14"), Some(&Cell::Text("Batangas City".to_string())));
        assert_eq!(table.cell(2, "10-14"), Some(&Cell::Text("All".to_string())));
        assert_eq!(table.cell(3, "Indicators"), Some(&Cell::Text("Prenatal Care".to_string())));
    }
}
