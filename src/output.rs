//! Report writers.

use serde::Serialize;
use std::io::Write;

use crate::config::OutputFormat;
use crate::error::RewardsResult;
use crate::points::Points;
use crate::report::RewardsReport;

const SUMMARY_HEADER: [&str; 4] = [
    "customer_id",
    "customer_name",
    "total_points",
    "transaction_count",
];

const MONTHLY_HEADER: [&str; 6] = [
    "customer_id",
    "customer_name",
    "month",
    "month_label",
    "points",
    "transaction_count",
];

#[derive(Serialize)]
struct SummaryRow<'a> {
    customer_id: &'a str,
    customer_name: &'a str,
    total_points: Points,
    transaction_count: usize,
}

#[derive(Serialize)]
struct MonthlyRow<'a> {
    customer_id: &'a str,
    customer_name: &'a str,
    month: String,
    month_label: &'a str,
    points: Points,
    transaction_count: usize,
}

/// Write the report in the requested format.
pub fn write_report<W: Write>(
    report: &RewardsReport,
    format: OutputFormat,
    writer: W,
) -> RewardsResult<()> {
    match format {
        OutputFormat::Summary => write_summary_csv(report, writer),
        OutputFormat::Monthly => write_monthly_csv(report, writer),
        OutputFormat::Json => write_json(report, writer),
    }
}

/// One row per customer.
fn write_summary_csv<W: Write>(report: &RewardsReport, writer: W) -> RewardsResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if report.is_empty() {
        // Write header manually when no customers
        csv_writer.write_record(SUMMARY_HEADER)?;
    }
    for reward in report {
        csv_writer.serialize(SummaryRow {
            customer_id: &reward.customer_id,
            customer_name: &reward.customer_name,
            total_points: reward.total_points,
            transaction_count: reward.transaction_count,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// One row per customer and month, months in chronological order.
fn write_monthly_csv<W: Write>(report: &RewardsReport, writer: W) -> RewardsResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut wrote_any = false;
    for reward in report {
        for bucket in reward.monthly_breakdown() {
            csv_writer.serialize(MonthlyRow {
                customer_id: &reward.customer_id,
                customer_name: &reward.customer_name,
                month: bucket.month_key.to_string(),
                month_label: &bucket.month_label,
                points: bucket.points,
                transaction_count: bucket.transaction_count,
            })?;
            wrote_any = true;
        }
    }
    if !wrote_any {
        csv_writer.write_record(MONTHLY_HEADER)?;
    }

    csv_writer.flush()?;
    Ok(())
}

fn write_json<W: Write>(report: &RewardsReport, mut writer: W) -> RewardsResult<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
