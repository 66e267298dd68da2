// ==========================================
// 供应链风险驾驶舱 - 库存递推
// ==========================================
// 职责: 单序列逐周递推 NAI / POH / 满足量 / 未满足量
// 递推（每周，按 week_start 升序，无前瞻）:
//   avail  = max(0, nai_prev + supply)
//   served = min(forecast, avail)
//   unmet  = forecast - served
//   nai    = nai_prev + supply - forecast   (不截断，负数表示欠交)
//   poh    = max(0, nai)
// 初始 nai_prev = 序列期初在手库存；数量为实数，此处不取整
// ==========================================

use crate::domain::projection::ProjectionRow;
use crate::engine::grid::{GridCell, SeriesGrid};

// ==========================================
// SeriesState - 序列递推状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesState {
    pub nai_prev: f64,
}

/// 单周递推结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekOutcome {
    pub nai: f64,
    pub poh: f64,
    pub served_qty: f64,
    pub unmet_qty: f64,
}

impl SeriesState {
    pub fn new(on_hand_qty: f64) -> Self {
        Self {
            nai_prev: on_hand_qty,
        }
    }

    /// 推进一周
    pub fn step(self, forecast_qty: f64, supply_qty: f64) -> (Self, WeekOutcome) {
        let avail = (self.nai_prev + supply_qty).max(0.0);
        let served_qty = forecast_qty.min(avail);
        let unmet_qty = forecast_qty - served_qty;
        let nai = self.nai_prev + supply_qty - forecast_qty;
        let poh = nai.max(0.0);

        (
            Self { nai_prev: nai },
            WeekOutcome {
                nai,
                poh,
                served_qty,
                unmet_qty,
            },
        )
    }
}

/// 单序列递推（含行级标记）
pub fn project_series(series: &SeriesGrid) -> Vec<ProjectionRow> {
    let mut rows = Vec::with_capacity(series.cells.len());

    series
        .cells
        .iter()
        .fold(SeriesState::new(series.on_hand_qty), |state, cell: &GridCell| {
            let (next, outcome) = state.step(cell.forecast_qty, cell.supply_qty);

            rows.push(ProjectionRow {
                sku: series.key.sku.clone(),
                location: series.key.location.clone(),
                week_start: cell.week_start,
                forecast_qty: cell.forecast_qty,
                supply_qty: cell.supply_qty,
                on_hand_qty: series.on_hand_qty,
                safety_stock_qty: series.safety_stock_qty,
                nai: outcome.nai,
                poh: outcome.poh,
                served_qty: outcome.served_qty,
                unmet_qty: outcome.unmet_qty,
                stockout: outcome.nai < 0.0,
                safety_breach: outcome.poh < series.safety_stock_qty,
            });

            next
        });

    rows
}
