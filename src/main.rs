use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, bail};
use log::{info, warn};
use maternal_registry::algorithm::validation::check_invariants;
use maternal_registry::store::read_patient_array;
use maternal_registry::utils::logging::log_warning;
use maternal_registry::{
    DashboardSummary, ExportConfig, IndicatorEngine, JsonDirRepository, ParquetSink,
    PatientRepository, ReportConfig, ReportPeriod, TabularSink, TclLayout, render_fhsis,
};

const USAGE: &str = "usage: maternal-registry <records.json | records-dir> <year> [month] [barangay]";

struct Args {
    input: PathBuf,
    year: i32,
    month: Option<u32>,
    barangay: Option<String>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = env::args().skip(1);
    let Some(input) = args.next() else {
        bail!("{USAGE}");
    };
    let year = args
        .next()
        .context(USAGE)?
        .parse::<i32>()
        .context("year must be a number")?;
    let month = args
        .next()
        .filter(|m| !m.eq_ignore_ascii_case("all"))
        .map(|m| m.parse::<u32>())
        .transpose()
        .context("month must be a number between 1 and 12")?;
    let barangay = args.next().filter(|b| !b.eq_ignore_ascii_case("all"));
    Ok(Args {
        input: PathBuf::from(input),
        year,
        month,
        barangay,
    })
}

fn load_records(input: &Path) -> anyhow::Result<Vec<maternal_registry::Patient>> {
    let patients = if input.is_dir() {
        JsonDirRepository::open_existing(input)?.list()?
    } else {
        read_patient_array(input)?
    };
    for patient in &patients {
        if let Err(err) = check_invariants(patient) {
            log_warning(&format!("Record {}: {err}", patient.label()), Some(input));
        }
    }
    Ok(patients)
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let report_config = ReportConfig::from_env().context("invalid report configuration")?;
    let export_config = ExportConfig::from_env();
    info!("{report_config}");
    info!("{export_config}");

    let start = Instant::now();
    let patients = load_records(&args.input)
        .with_context(|| format!("failed to load records from {}", args.input.display()))?;
    info!("Loaded {} records from {}", patients.len(), args.input.display());

    let today = chrono::Local::now().date_naive();
    let dashboard = DashboardSummary::compute(&patients, today);
    info!(
        "Dashboard: {} total, {} high risk, {} due for a visit",
        dashboard.total, dashboard.high_risk, dashboard.due
    );

    let period = ReportPeriod::new(args.year, args.month)?.with_locality(args.barangay);
    let selected = period.select(&patients);
    if selected.is_empty() {
        warn!("No records with activity in {period}");
    }

    let report = IndicatorEngine::new(report_config.clone()).aggregate(&selected);
    info!("{report}");

    let tcl = TclLayout::from(&export_config).build_table(&selected)?;
    let fhsis = render_fhsis(&report, &period, &report_config)?;

    let suffix = match args.month {
        Some(month) => format!("{}_{month:02}", args.year),
        None => args.year.to_string(),
    };
    let mut sink = ParquetSink::new(&export_config.output_dir)?;
    sink.write_table(&format!("tcl_{suffix}"), &tcl)?;
    sink.write_table(&format!("fhsis_{suffix}"), &fhsis)?;

    info!(
        "Wrote {} files to {} in {:?}",
        sink.written().len(),
        sink.dir().display(),
        start.elapsed()
    );
    Ok(())
}
