use crate::core::estimator::EstimationEngine;
use crate::core::summary::DATE_FORMAT;
use crate::domain::model::{EstimateRequest, FeatureSizes};
use crate::domain::ports::Predictor;
use crate::utils::error::Result;
use crate::utils::validation::{parse_date_time, parse_feature_size};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

#[derive(Debug, Deserialize)]
struct InputRow {
    #[serde(default)]
    item_id: Option<String>,
    f0: String,
    f1: String,
    f2: String,
    #[serde(default)]
    created: Option<String>,
}

#[derive(Debug, Serialize)]
struct OutputRow {
    item_id: String,
    status: &'static str,
    cost_hours: Option<i64>,
    turnaround_days: Option<i64>,
    delivery_date: Option<String>,
    summary: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn build_request(row: InputRow, default_created: NaiveDateTime) -> Result<EstimateRequest> {
    let features = FeatureSizes::new(
        parse_feature_size("f0", &row.f0)?,
        parse_feature_size("f1", &row.f1)?,
        parse_feature_size("f2", &row.f2)?,
    );

    let created = match non_blank(row.created) {
        Some(value) => parse_date_time("created", &value)?,
        None => default_created,
    };

    let mut request = EstimateRequest::new(features).with_created(created);
    if let Some(item_id) = non_blank(row.item_id) {
        request = request.with_item_id(item_id);
    }
    Ok(request)
}

/// Estimates every row of a CSV with columns `item_id,f0,f1,f2,created`.
///
/// A bad row is written out with status `error` and counted as failed; the
/// remaining rows still run. Only unreadable CSV or write failures abort.
pub fn run_batch<C, T, R, W>(
    engine: &EstimationEngine<C, T>,
    input: R,
    output: W,
    default_created: NaiveDateTime,
) -> Result<BatchReport>
where
    C: Predictor,
    T: Predictor,
    R: Read,
    W: Write,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    let mut writer = csv::Writer::from_writer(output);
    let mut report = BatchReport::default();

    for (index, row) in reader.deserialize::<InputRow>().enumerate() {
        let row = row?;
        let item_id = non_blank(row.item_id.clone()).unwrap_or_else(|| format!("row-{}", index + 1));

        let outcome = build_request(row, default_created).and_then(|request| engine.estimate(&request));

        let out = match outcome {
            Ok(result) => {
                report.succeeded += 1;
                OutputRow {
                    item_id,
                    status: "ok",
                    cost_hours: Some(result.cost_hours),
                    turnaround_days: Some(result.turnaround_days),
                    delivery_date: Some(result.delivery_date.format(DATE_FORMAT).to_string()),
                    summary: result.summary_text,
                }
            }
            Err(e) => {
                e.log(&format!("Row {} ({}) failed", index + 1, item_id));
                report.failed += 1;
                OutputRow {
                    item_id,
                    status: "error",
                    cost_hours: None,
                    turnaround_days: None,
                    delivery_date: None,
                    summary: e.user_friendly_message(),
                }
            }
        };

        writer.serialize(out)?;
    }

    writer.flush()?;
    tracing::info!(
        "Batch finished: {} succeeded, {} failed",
        report.succeeded,
        report.failed
    );
    Ok(report)
}
