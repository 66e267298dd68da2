// ==========================================
// 供应链风险驾驶舱 - 报表导出
// ==========================================
// 职责: 汇总（含主数据关联）/ 周明细 / 处置清单导出为 CSV
// 说明: csv 不支持 serde(flatten)，汇总导出使用扁平行结构
// ==========================================

use crate::domain::projection::{ActionItem, EnrichedSummaryRow, ProjectionRow};
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("文件写入失败: {0}")]
    Io(#[from] std::io::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;

/// 汇总导出行（扁平）
#[derive(Debug, Serialize)]
struct SummaryCsvRow<'a> {
    sku: &'a str,
    location: &'a str,
    total_demand: f64,
    total_served: f64,
    total_unmet: f64,
    min_nai: f64,
    min_poh: f64,
    safety_stock_qty: f64,
    on_hand_qty: f64,
    fill_rate: f64,
    stockout_flag: u8,
    first_stockout_week: Option<NaiveDate>,
    safety_breach_flag: u8,
    first_safety_breach_week: Option<NaiveDate>,
    unit_revenue: f64,
    unit_cogs: f64,
    revenue_at_risk: f64,
}

impl<'a> From<&'a EnrichedSummaryRow> for SummaryCsvRow<'a> {
    fn from(row: &'a EnrichedSummaryRow) -> Self {
        let s = &row.summary;
        Self {
            sku: &s.sku,
            location: &s.location,
            total_demand: s.total_demand,
            total_served: s.total_served,
            total_unmet: s.total_unmet,
            min_nai: s.min_nai,
            min_poh: s.min_poh,
            safety_stock_qty: s.safety_stock_qty,
            on_hand_qty: s.on_hand_qty,
            fill_rate: s.fill_rate,
            stockout_flag: s.stockout_flag,
            first_stockout_week: s.first_stockout_week,
            safety_breach_flag: s.safety_breach_flag,
            first_safety_breach_week: s.first_safety_breach_week,
            unit_revenue: row.unit_revenue,
            unit_cogs: row.unit_cogs,
            revenue_at_risk: row.revenue_at_risk,
        }
    }
}

/// 写出汇总
pub fn write_summary<W: Write>(writer: W, rows: &[EnrichedSummaryRow]) -> ReportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(SummaryCsvRow::from(row))?;
    }
    wtr.flush()?;
    Ok(())
}

/// 写出周明细
pub fn write_detail<W: Write>(writer: W, rows: &[ProjectionRow]) -> ReportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// 写出处置清单
pub fn write_actions<W: Write>(writer: W, rows: &[ActionItem]) -> ReportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// 汇总导出到文件
pub fn export_summary(path: &Path, rows: &[EnrichedSummaryRow]) -> ReportResult<()> {
    write_summary(std::fs::File::create(path)?, rows)?;
    tracing::info!(rows = rows.len(), path = %path.display(), "汇总已导出");
    Ok(())
}

/// 明细导出到文件
pub fn export_detail(path: &Path, rows: &[ProjectionRow]) -> ReportResult<()> {
    write_detail(std::fs::File::create(path)?, rows)?;
    tracing::info!(rows = rows.len(), path = %path.display(), "周明细已导出");
    Ok(())
}
