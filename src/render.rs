//! Thin render adapter: plain-text and JSON views of a [`DashboardReport`].
//!
//! The charting front end consumes the JSON form; the text form is what the
//! command-line tool prints.

use crate::dashboard::{DashboardReport, Panel, PanelData};
use crate::metrics::{CategoryShipping, MetricResult};

/// Render every panel as a titled, column-aligned text table.
pub fn text(report: &DashboardReport) -> String {
    report
        .panels
        .iter()
        .map(panel_text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the report as pretty-printed JSON.
pub fn json(report: &DashboardReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

fn panel_text(panel: &Panel) -> String {
    let mut out = format!("## {}\n", panel.title);
    if let Some(message) = panel.message {
        out.push_str(&format!("  {message}\n"));
        return out;
    }

    match &panel.result {
        PanelData::RevenueByCategory(MetricResult::Data(rows)) => {
            let mut table = vec![cells(["category", "revenue"])];
            table.extend(
                rows.iter()
                    .map(|r| vec![r.category.to_string(), format!("{:.2}", r.revenue)]),
            );
            out.push_str(&format_table(&table));
        }
        PanelData::RevenueTrend(MetricResult::Data(trend)) => {
            let mut header = vec!["month".to_string()];
            header.extend(trend.series.iter().map(|s| s.category.to_string()));
            let mut table = vec![header];
            for (i, month) in trend.months.iter().enumerate() {
                let mut row = vec![month.to_string()];
                row.extend(trend.series.iter().map(|s| format!("{:.2}", s.revenue[i])));
                table.push(row);
            }
            out.push_str(&format_table(&table));
        }
        PanelData::ShippingTimeByCategory(MetricResult::Data(views)) => {
            out.push_str("Top 5 Categories with Fastest Shipping\n");
            out.push_str(&shipping_table(&views.fastest));
            out.push_str("Top 5 Categories with Slowest Shipping\n");
            out.push_str(&shipping_table(&views.slowest));
        }
        PanelData::ShippingTimeVsReview(MetricResult::Data(points)) => {
            let mut table = vec![cells(["shipping days", "avg review"])];
            table.extend(points.iter().map(|p| {
                vec![
                    format!("{:.1}", p.shipping_time),
                    format!("{:.2}", p.avg_review_score),
                ]
            }));
            out.push_str(&format_table(&table));
        }
        PanelData::RefundsByCategory(MetricResult::Data(rows)) => {
            let mut table = vec![cells(["category", "refunds"])];
            table.extend(
                rows.iter()
                    .map(|r| vec![r.category.to_string(), r.refunds.to_string()]),
            );
            out.push_str(&format_table(&table));
        }
        PanelData::RefundReviewDistribution(MetricResult::Data(dist)) => {
            let mut table = vec![cells(["score", "count"])];
            table.extend(
                dist.counts
                    .iter()
                    .map(|c| vec![c.score.to_string(), c.count.to_string()]),
            );
            out.push_str(&format_table(&table));
        }
        // Empty results carry a message and were handled above.
        _ => {}
    }
    out
}

fn shipping_table(rows: &[CategoryShipping]) -> String {
    let mut table = vec![cells(["category", "avg days"])];
    table.extend(
        rows.iter()
            .map(|r| vec![r.category.to_string(), format!("{:.2}", r.avg_shipping_days)]),
    );
    format_table(&table)
}

fn cells<const N: usize>(labels: [&str; N]) -> Vec<String> {
    labels.iter().map(|l| l.to_string()).collect()
}

/// First column left-aligned, the rest right-aligned.
fn format_table(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            rows.iter()
                .filter_map(|r| r.get(c))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in rows {
        let line = row
            .iter()
            .enumerate()
            .map(|(c, cell)| {
                if c == 0 {
                    format!("{:<width$}", cell, width = widths[c])
                } else {
                    format!("{:>width$}", cell, width = widths[c])
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
