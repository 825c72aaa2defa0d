// Entry point and high-level CLI flow.
//
// The Rust binary mirrors the sections of the original dashboard:
// - Option [1] ingests a CSV file into the session batch.
// - Option [2] loads a synthetic sample batch instead.
// - Option [3] renders the analytics view (KPI cards, chart, table).
// - Option [4] exports the anomalous subset to a date-stamped CSV.
mod classify;
mod export;
mod metrics;
mod parser;
mod sample;
mod types;
mod util;
mod view;

use chrono::Local;
use classify::{
    Classifier, RandomClassifier, ThresholdClassifier, DEFAULT_AMOUNT_THRESHOLD,
    DEFAULT_ANOMALY_RATE,
};
use once_cell::sync::Lazy;
use parser::DefaultRanges;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use types::BillingRecord;

// Simple in-memory app state: one batch per session, replaced wholesale
// when a new load or sample generation happens.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { data: None }));

struct AppState {
    data: Option<Vec<BillingRecord>>,
}

fn default_classifier() -> Box<dyn Classifier> {
    Box::new(RandomClassifier::new(
        DEFAULT_ANOMALY_RATE,
        StdRng::from_entropy(),
    ))
}

/// Let the user pick the detection mode for a new batch: the rule-based
/// amount threshold, or the random reference classifier.
fn choose_classifier() -> Box<dyn Classifier> {
    if !prompt_yes_no("Flag bills above an amount threshold? (Y/N, N = random sampling): ") {
        return default_classifier();
    }
    let raw = read_line(&format!("Amount threshold [{}]: ", DEFAULT_AMOUNT_THRESHOLD));
    let threshold = util::parse_f64_safe(Some(raw.as_str()))
        .filter(|v| *v >= 0.0)
        .unwrap_or(DEFAULT_AMOUNT_THRESHOLD);
    Box::new(ThresholdClassifier::new(threshold))
}

/// Read a single line of input after printing the given prompt.
fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask a Y/N question until the user answers one or the other.
fn prompt_yes_no(prompt: &str) -> bool {
    loop {
        match read_line(prompt).to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: ingest a CSV file into the session batch.
///
/// The upload surface only accepts `.csv` paths; anything else is rejected
/// before the parser is invoked.
fn handle_upload() {
    let path = read_line("Path to CSV file: ");
    let is_csv = Path::new(&path)
        .extension()
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if !is_csv {
        println!("Only .csv files are supported.\n");
        return;
    }
    let has_header = prompt_yes_no("Does the file have a header row? (Y/N): ");
    let mut classifier = choose_classifier();

    let mut rng = StdRng::from_entropy();
    match parser::load_csv(
        &path,
        has_header,
        &DefaultRanges::default(),
        &mut rng,
        &mut *classifier,
    ) {
        Ok(records) => {
            let m = metrics::compute_metrics(&records);
            println!(
                "Processed {} records ({} flagged as anomalies).\n",
                util::format_int(m.total_records as u64),
                util::format_int(m.total_anomalies as u64)
            );
            let mut state = APP_STATE.lock().unwrap();
            state.data = Some(records);
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

/// Handle option [2]: replace the session batch with synthetic sample data.
fn handle_sample() {
    let mut classifier = choose_classifier();
    let mut rng = StdRng::from_entropy();
    let records =
        sample::generate_sample(&DefaultRanges::default(), &mut rng, &mut *classifier);
    let m = metrics::compute_metrics(&records);
    println!(
        "Loaded {} sample records ({} flagged as anomalies).\n",
        util::format_int(m.total_records as u64),
        util::format_int(m.total_anomalies as u64)
    );
    let mut state = APP_STATE.lock().unwrap();
    state.data = Some(records);
}

/// Handle option [3]: render KPI cards, the anomaly chart, and the table.
fn handle_analytics() {
    let data = {
        let state = APP_STATE.lock().unwrap();
        state.data.clone()
    };
    let Some(data) = data else {
        println!("No data available for analysis. Upload data first (option 1).\n");
        return;
    };

    let m = metrics::compute_metrics(&data);
    view::print_kpi_cards(&m);
    view::print_anomaly_chart(&data);
    view::print_record_table(&data);
}

/// Handle option [4]: write the anomalous subset to a date-stamped CSV.
///
/// When nothing is loaded, a fresh sample batch is exported instead, the
/// same fallback the original dashboard's export button had.
fn handle_export() {
    let data = {
        let state = APP_STATE.lock().unwrap();
        state.data.clone()
    };
    let data = match data {
        Some(d) => d,
        None => {
            println!("No data loaded; exporting a fresh sample batch.");
            let mut rng = StdRng::from_entropy();
            let mut classifier = default_classifier();
            sample::generate_sample(&DefaultRanges::default(), &mut rng, &mut *classifier)
        }
    };

    let filename = export::export_filename(Local::now().date_naive());
    let csv_text = match export::render_anomaly_csv(&data) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Export error: {}\n", e);
            return;
        }
    };
    if let Err(e) = std::fs::write(&filename, csv_text) {
        eprintln!("Write error: {}\n", e);
        return;
    }

    let m = metrics::compute_metrics(&data);
    println!("Anomaly data exported to {}\n", filename);
    println!("Export statistics:");
    println!("  Total Records : {}", util::format_int(m.total_records as u64));
    println!("  Anomalies     : {}", util::format_int(m.total_anomalies as u64));
    println!(
        "  Anomaly Rate  : {}%",
        util::format_number(metrics::anomaly_rate_pct(&m), 1)
    );
    println!(
        "  Avg Amount    : ${}\n",
        util::format_number(m.average_billed_amount, 2)
    );
}

fn main() {
    println!("Telecom Billing Anomaly Analyzer\n");
    loop {
        println!("[1] Upload billing data (CSV)");
        println!("[2] Load sample data");
        println!("[3] View analytics");
        println!("[4] Export anomaly data");
        println!("[5] Exit\n");
        match read_line("Enter choice: ").as_str() {
            "1" => {
                println!("");
                handle_upload();
            }
            "2" => {
                println!("");
                handle_sample();
            }
            "3" => {
                println!("");
                handle_analytics();
            }
            "4" => {
                println!("");
                handle_export();
            }
            "5" => {
                println!("Exiting the program.");
                break;
            }
            _ => {
                println!("Invalid choice. Please enter 1-5.\n");
            }
        }
    }
}
