// Console rendering of the analytics section: KPI cards, the two-category
// anomaly chart, and the capped record table.
use crate::metrics::anomaly_rate_pct;
use crate::types::{BillingRecord, KpiMetrics, RecordRow};
use crate::util::{format_int, format_number};
use tabled::{settings::Style, Table};

/// The record table shows at most this many rows, with an overflow note.
pub const TABLE_PREVIEW_ROWS: usize = 10;

const CHART_MAX_WIDTH: usize = 40;

pub fn print_kpi_cards(metrics: &KpiMetrics) {
    println!("Total Records      : {}", format_int(metrics.total_records as u64));
    println!("Total Anomalies    : {}", format_int(metrics.total_anomalies as u64));
    println!("Anomaly Rate       : {}%", format_number(anomaly_rate_pct(metrics), 1));
    println!("Avg Billed Amount  : ${}", format_number(metrics.average_billed_amount, 2));
    println!("");
}

/// Scaled bar length for one category, capped at `CHART_MAX_WIDTH`.
///
/// Non-zero counts always get at least one mark so small categories stay
/// visible next to large ones.
fn bar_len(count: usize, max: usize) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    ((count * CHART_MAX_WIDTH) / max).max(1)
}

pub fn print_anomaly_chart(records: &[BillingRecord]) {
    let anomaly_count = records.iter().filter(|r| r.is_anomaly).count();
    let normal_count = records.len() - anomaly_count;
    let max = normal_count.max(anomaly_count);

    println!("Billing Anomaly Analysis");
    println!(
        "  Normal Bills  | {} {}",
        "#".repeat(bar_len(normal_count, max)),
        format_int(normal_count as u64)
    );
    println!(
        "  Anomaly Bills | {} {}",
        "#".repeat(bar_len(anomaly_count, max)),
        format_int(anomaly_count as u64)
    );
    println!("");
}

pub fn print_record_table(records: &[BillingRecord]) {
    if records.is_empty() {
        println!("(no records)\n");
        return;
    }
    let rows: Vec<RecordRow> = records
        .iter()
        .take(TABLE_PREVIEW_ROWS)
        .map(RecordRow::from)
        .collect();
    let table_str = Table::new(rows).with(Style::markdown()).to_string();
    println!("{}", table_str);
    if records.len() > TABLE_PREVIEW_ROWS {
        println!(
            "Showing {} of {} records",
            TABLE_PREVIEW_ROWS,
            format_int(records.len() as u64)
        );
    }
    println!("");
}
