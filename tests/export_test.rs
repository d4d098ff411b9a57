mod utils;

use maternal_registry::algorithm::export::TCL_COLUMNS;
use maternal_registry::filter::ReportPeriod;
use maternal_registry::report::{FHSIS_COLUMNS, render_fhsis};
use maternal_registry::{Cell, ExportConfig, IndicatorEngine, ReportConfig, TclLayout};
use utils::{cohort, d, registered_patient, with_visits};

#[test]
fn test_three_visits_fill_first_three_columns() {
    let patient = with_visits(registered_patient("Grace", "Mendoza", 27), 3);
    let row = TclLayout::default().build(&patient);

    assert_eq!(row.get("visit_1"), Some(&Cell::Date(d(1, 3))));
    assert_eq!(row.get("visit_2"), Some(&Cell::Date(d(1, 10))));
    assert_eq!(row.get("visit_3"), Some(&Cell::Date(d(1, 17))));
    for i in 4..=8 {
        assert_eq!(row.get(&format!("visit_{i}")), Some(&Cell::Empty));
    }
    assert_eq!(row.get("visit_9"), None);
}

#[test]
fn test_case_list_table_matches_layout() {
    let patients = cohort();
    let table = TclLayout::default().build_table(&patients).unwrap();
    assert_eq!(table.len(), patients.len());
    assert_eq!(table.columns(), TCL_COLUMNS.as_slice());

    let wide = TclLayout::from(&ExportConfig {
        max_visit_columns: 12,
        ..ExportConfig::default()
    });
    let visit_columns = wide.columns().iter().filter(|c| c.starts_with("visit_")).count();
    assert_eq!(visit_columns, 12);
}

#[test]
fn test_fhsis_table_has_one_row_per_line() {
    let patients = cohort();
    let config = ReportConfig::default();
    let report = IndicatorEngine::new(config.clone()).aggregate(&patients);
    let period = ReportPeriod::new(2024, Some(1)).unwrap();

    let table = render_fhsis(&report, &period, &config).unwrap();
    assert_eq!(table.columns(), FHSIS_COLUMNS.map(String::from).as_slice());
    assert_eq!(table.cell(0, "10-14"), Some(&Cell::from("January 2024")));

    let visits_row = (0..table.len())
        .find(|r| {
            table
                .cell(*r, "Indicators")
                .is_some_and(|c| c.to_string().contains("at least 4 pre-natal check-ups"))
        })
        .unwrap();
    let total = report.get(maternal_registry::Indicator::Visits4).total;
    assert_eq!(table.cell(visits_row, "Total"), Some(&Cell::from(total)));
}
