use crate::classify::Classifier;
use crate::types::BillingRecord;
use crate::util::{parse_count_safe, parse_f64_safe};
use csv::ReaderBuilder;
use rand::Rng;
use std::error::Error;
use std::ops::Range;

/// Period label used when column 2 is missing.
pub const DEFAULT_BILLING_PERIOD: &str = "2024-01";

/// Ranges the parser draws from when a numeric field is missing or fails to
/// parse. Carried as configuration rather than hard-coded constants; the
/// defaults reproduce the original dashboard's placeholder ranges.
#[derive(Debug, Clone)]
pub struct DefaultRanges {
    pub total_amount: Range<f64>,
    pub data_usage: Range<f64>,
    pub call_minutes: Range<u32>,
    pub sms_count: Range<u32>,
}

impl Default for DefaultRanges {
    fn default() -> Self {
        DefaultRanges {
            total_amount: 50.0..250.0,
            data_usage: 1.0..11.0,
            call_minutes: 100..600,
            sms_count: 20..120,
        }
    }
}

pub(crate) fn synth_phone<R: Rng>(rng: &mut R) -> String {
    format!(
        "+1-{:03}-{:03}-{:04}",
        rng.gen_range(0..1000),
        rng.gen_range(0..1000),
        rng.gen_range(0..10_000)
    )
}

/// Turn raw rows of field strings into typed billing records.
///
/// Column mapping is positional and fixed: 0→customer name, 1→phone,
/// 2→billing period, 3→total amount, 4→data usage, 5→call minutes,
/// 6→SMS count. When `has_header` is true the first non-blank row is
/// dropped. Blank rows are skipped entirely.
///
/// Malformed or missing fields never fail the parse: string fields fall
/// back to synthesized placeholders and numeric fields to a uniform draw
/// from `ranges`. The classifier runs once per emitted record to set the
/// anomaly flag. `id` is `BILL-NNNN`, numbered from 1 in emitted order,
/// independent of any input identifier.
pub fn parse_rows<R: Rng>(
    rows: &[Vec<String>],
    has_header: bool,
    ranges: &DefaultRanges,
    rng: &mut R,
    classifier: &mut dyn Classifier,
) -> Vec<BillingRecord> {
    let data_rows = rows
        .iter()
        .filter(|row| !row.iter().all(|f| f.trim().is_empty()))
        .skip(if has_header { 1 } else { 0 });

    let mut records = Vec::new();
    for (idx, row) in data_rows.enumerate() {
        let seq = idx + 1;
        let text_field = |pos: usize| -> Option<&str> {
            row.get(pos).map(|s| s.trim()).filter(|s| !s.is_empty())
        };

        let customer_name = match text_field(0) {
            Some(s) => s.to_string(),
            None => format!("Customer {}", seq),
        };
        let phone_number = match text_field(1) {
            Some(s) => s.to_string(),
            None => synth_phone(rng),
        };
        let billing_period = text_field(2)
            .unwrap_or(DEFAULT_BILLING_PERIOD)
            .to_string();

        // The record fields are non-negative, so a negative parse result is
        // treated like a parse failure and defaulted.
        let total_amount = parse_f64_safe(row.get(3).map(String::as_str))
            .filter(|v| *v >= 0.0)
            .unwrap_or_else(|| rng.gen_range(ranges.total_amount.clone()));
        let data_usage = parse_f64_safe(row.get(4).map(String::as_str))
            .filter(|v| *v >= 0.0)
            .unwrap_or_else(|| rng.gen_range(ranges.data_usage.clone()));
        let call_minutes = parse_count_safe(row.get(5).map(String::as_str))
            .unwrap_or_else(|| rng.gen_range(ranges.call_minutes.clone()));
        let sms_count = parse_count_safe(row.get(6).map(String::as_str))
            .unwrap_or_else(|| rng.gen_range(ranges.sms_count.clone()));

        let mut record = BillingRecord {
            id: format!("BILL-{:04}", seq),
            customer_name,
            phone_number,
            billing_period,
            total_amount,
            data_usage,
            call_minutes,
            sms_count,
            is_anomaly: false,
        };
        record.is_anomaly = classifier.classify(&record);
        records.push(record);
    }
    records
}

/// Read a CSV file and parse it into a batch of billing records.
///
/// Only opening the file can fail; rows the csv reader cannot decode are
/// skipped, matching the parser's never-fails contract for row data.
pub fn load_csv<R: Rng>(
    path: &str,
    has_header: bool,
    ranges: &DefaultRanges,
    rng: &mut R,
    classifier: &mut dyn Classifier,
) -> Result<Vec<BillingRecord>, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(path)?;
    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(_) => continue,
        };
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }
    Ok(parse_rows(&rows, has_header, ranges, rng, classifier))
}
