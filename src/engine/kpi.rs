// ==========================================
// 供应链风险驾驶舱 - KPI 计算引擎
// ==========================================
// 职责: 情景变换 → 网格构建 → 逐序列递推 → 汇总
// 输入: 库存快照 + 周需求 + 周供应 + 情景参数
// 输出: KpiResult（汇总 + 周明细）
// 红线: 纯函数，无 I/O，同输入同参数结果逐位一致
// ==========================================

use crate::domain::projection::KpiResult;
use crate::domain::records::{DemandRecord, InventoryRecord, SupplyRecord};
use crate::domain::scenario::ScenarioParams;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::grid::{anchor_week, build_grid, check_horizon, week_sequence};
use crate::engine::projection::project_series;
use crate::engine::scenario::{apply_demand_uplift, apply_supply_delay};
use crate::engine::summary::summarize_series;
use chrono::{Local, NaiveDate, Weekday};

// ==========================================
// KpiEngine - KPI 计算引擎
// ==========================================
pub struct KpiEngine {
    week_start: Weekday,               // 周起始日
    reference_date: Option<NaiveDate>, // 无需求/供应时的锚点（None = 今天）
}

impl KpiEngine {
    /// 构造函数
    ///
    /// # 参数
    /// - `week_start`: 周起始日（网格锚点回退到该日）
    pub fn new(week_start: Weekday) -> Self {
        Self {
            week_start,
            reference_date: None,
        }
    }

    /// 固定"今天"（需求与供应均为空时的网格锚点）
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算 KPI
    ///
    /// # 参数
    /// - `inventory`: 库存快照（键空间来源）
    /// - `demand`: 周需求预测
    /// - `supply`: 周供应计划
    /// - `params`: 情景参数
    ///
    /// # 返回
    /// - Ok(KpiResult): 汇总按 (sku, location) 排序，明细按 (sku, location, week_start) 排序
    /// - Err(EngineError): 推演周数为 0 / 情景参数非有限值 / 日期越界
    pub fn compute(
        &self,
        inventory: &[InventoryRecord],
        demand: &[DemandRecord],
        supply: &[SupplyRecord],
        params: &ScenarioParams,
    ) -> EngineResult<KpiResult> {
        check_horizon(params.horizon_weeks)?;
        if !params.demand_uplift_pct.is_finite() {
            return Err(EngineError::NonFiniteParameter {
                name: "demand_uplift_pct",
                value: params.demand_uplift_pct,
            });
        }

        // 1. 情景变换
        let demand = apply_demand_uplift(demand, params.demand_uplift_pct);
        let supply = apply_supply_delay(supply, params.supply_delay_weeks)?;

        // 2. 网格构建
        let today = self
            .reference_date
            .unwrap_or_else(|| Local::now().date_naive());
        let anchor = anchor_week(&demand, &supply, today, self.week_start);
        let weeks = week_sequence(anchor, params.horizon_weeks)?;
        let grid = build_grid(inventory, &demand, &supply, weeks);

        if grid.dropped_demand_rows > 0 || grid.dropped_supply_rows > 0 {
            tracing::debug!(
                dropped_demand_rows = grid.dropped_demand_rows,
                dropped_supply_rows = grid.dropped_supply_rows,
                "库存键空间外的需求/供应行已忽略"
            );
        }

        // 3. 逐序列递推 + 汇总（序列间无依赖）
        let mut detail = Vec::with_capacity(grid.series.len() * grid.weeks.len());
        let mut summary = Vec::with_capacity(grid.series.len());
        for series in &grid.series {
            let rows = project_series(series);
            summary.push(summarize_series(&series.key, &rows));
            detail.extend(rows);
        }

        tracing::info!(
            anchor = %anchor,
            horizon_weeks = params.horizon_weeks,
            series = summary.len(),
            stockouts = summary.iter().filter(|s| s.has_stockout()).count(),
            "KPI 计算完成"
        );

        Ok(KpiResult {
            summary,
            detail,
            weeks: grid.weeks,
        })
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for KpiEngine {
    fn default() -> Self {
        Self::new(Weekday::Mon)
    }
}
