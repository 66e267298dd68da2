// ==========================================
// 供应链风险驾驶舱 - 序列汇总
// ==========================================
// 职责: 按 (sku, location) 汇总周明细
// 口径:
// - fill_rate = total_served / total_demand，无需求时为 1.0
// - stockout_flag = min_nai < 0
// - safety_breach_flag = min_poh < safety_stock_qty
//   安全库存按序列常量处理；若引入随时间变化的安全库存，需改为"任一周低于当周目标"
// - 首次断货周 / 首次跌破安全库存周: 满足条件的最早 week_start，无则为 None
// ==========================================

use crate::domain::projection::{ProjectionRow, SummaryRow};
use crate::domain::types::SeriesKey;

/// 汇总单序列明细（rows 按周升序）
pub fn summarize_series(key: &SeriesKey, rows: &[ProjectionRow]) -> SummaryRow {
    let mut total_demand = 0.0;
    let mut total_served = 0.0;
    let mut total_unmet = 0.0;
    let mut min_nai = f64::INFINITY;
    let mut min_poh = f64::INFINITY;
    let mut safety_stock_qty = f64::NEG_INFINITY;
    let mut on_hand_qty = f64::NEG_INFINITY;

    for row in rows {
        total_demand += row.forecast_qty;
        total_served += row.served_qty;
        total_unmet += row.unmet_qty;
        min_nai = min_nai.min(row.nai);
        min_poh = min_poh.min(row.poh);
        safety_stock_qty = safety_stock_qty.max(row.safety_stock_qty);
        on_hand_qty = on_hand_qty.max(row.on_hand_qty);
    }

    // 空序列不会出现（horizon >= 1），这里兜底为 0
    if rows.is_empty() {
        min_nai = 0.0;
        min_poh = 0.0;
        safety_stock_qty = 0.0;
        on_hand_qty = 0.0;
    }

    let fill_rate = if total_demand > 0.0 {
        total_served / total_demand
    } else {
        1.0
    };

    let first_stockout_week = rows.iter().find(|r| r.stockout).map(|r| r.week_start);
    let first_safety_breach_week = rows.iter().find(|r| r.safety_breach).map(|r| r.week_start);

    SummaryRow {
        sku: key.sku.clone(),
        location: key.location.clone(),
        total_demand,
        total_served,
        total_unmet,
        min_nai,
        min_poh,
        safety_stock_qty,
        on_hand_qty,
        fill_rate,
        stockout_flag: u8::from(min_nai < 0.0),
        first_stockout_week,
        safety_breach_flag: u8::from(min_poh < safety_stock_qty),
        first_safety_breach_week,
    }
}
