// ==========================================
// 供应链风险驾驶舱 - 网格构建
// ==========================================
// 职责: SKU × 库位 × 周 全量网格 + 需求/供应/库存聚合关联
// 口径:
// - 锚点: 需求/供应中最早的 week_start，均无数据时取"今天"，再回退到所在周起始日
// - 键空间: 以库存表中出现的 (sku, location) 为准，库存外的需求/供应行静默丢弃
// - 同一 (sku, location, week) 多行求和，网格中无匹配的单元格取 0
// ==========================================

use crate::domain::records::{DemandRecord, InventoryRecord, SupplyRecord};
use crate::domain::types::SeriesKey;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::scenario::shift_weeks;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::collections::{BTreeMap, HashMap};

// ==========================================
// GridCell - 网格单元（单周）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub week_start: NaiveDate,
    pub forecast_qty: f64,
    pub supply_qty: f64,
}

// ==========================================
// SeriesGrid - 单序列网格
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesGrid {
    pub key: SeriesKey,
    pub on_hand_qty: f64,      // 同键库存求和
    pub safety_stock_qty: f64, // 同键安全库存求和
    pub cells: Vec<GridCell>,  // 按周升序，长度 = horizon
}

// ==========================================
// Grid - 全量网格
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub weeks: Vec<NaiveDate>,
    pub series: Vec<SeriesGrid>, // 按键排序
    pub dropped_demand_rows: usize,
    pub dropped_supply_rows: usize,
}

/// 回退到所在周的周起始日
pub fn snap_to_week_start(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (date.weekday().num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7;
    // offset < 7，不会越界
    date - Days::new(u64::from(offset))
}

/// 计算网格锚点
pub fn anchor_week(
    demand: &[DemandRecord],
    supply: &[SupplyRecord],
    today: NaiveDate,
    week_start: Weekday,
) -> NaiveDate {
    let earliest = demand
        .iter()
        .filter_map(|r| r.week_start)
        .chain(supply.iter().filter_map(|r| r.week_start))
        .min();

    snap_to_week_start(earliest.unwrap_or(today), week_start)
}

/// 生成连续周序列
pub fn week_sequence(anchor: NaiveDate, horizon_weeks: u32) -> EngineResult<Vec<NaiveDate>> {
    (0..horizon_weeks).map(|i| shift_weeks(anchor, i)).collect()
}

/// 按 (键, 周) 求和
fn aggregate_by_week(
    rows: impl Iterator<Item = (SeriesKey, Option<NaiveDate>, f64)>,
) -> HashMap<(SeriesKey, NaiveDate), f64> {
    let mut totals = HashMap::new();
    for (key, week, qty) in rows {
        if let Some(week) = week {
            *totals.entry((key, week)).or_insert(0.0) += qty;
        }
    }
    totals
}

/// 构建全量网格
pub fn build_grid(
    inventory: &[InventoryRecord],
    demand: &[DemandRecord],
    supply: &[SupplyRecord],
    weeks: Vec<NaiveDate>,
) -> Grid {
    // 1. 库存按键求和（键空间）
    let mut stock: BTreeMap<SeriesKey, (f64, f64)> = BTreeMap::new();
    for record in inventory {
        let entry = stock.entry(record.key()).or_insert((0.0, 0.0));
        entry.0 += record.on_hand_qty;
        entry.1 += record.safety_stock_qty;
    }

    // 2. 统计键空间外的行（仅用于日志）
    let dropped_demand_rows = demand
        .iter()
        .filter(|r| !stock.contains_key(&r.key()))
        .count();
    let dropped_supply_rows = supply
        .iter()
        .filter(|r| !stock.contains_key(&r.key()))
        .count();

    // 3. 需求 / 供应按 (键, 周) 聚合
    let demand_totals = aggregate_by_week(
        demand
            .iter()
            .map(|r| (r.key(), r.week_start, r.forecast_qty)),
    );
    let supply_totals = aggregate_by_week(
        supply
            .iter()
            .map(|r| (r.key(), r.week_start, r.supply_qty)),
    );

    // 4. 键 × 周 笛卡尔积 + 左关联
    let series = stock
        .into_iter()
        .map(|(key, (on_hand_qty, safety_stock_qty))| {
            let cells = weeks
                .iter()
                .map(|&week_start| {
                    let cell_key = (key.clone(), week_start);
                    GridCell {
                        week_start,
                        forecast_qty: demand_totals.get(&cell_key).copied().unwrap_or(0.0),
                        supply_qty: supply_totals.get(&cell_key).copied().unwrap_or(0.0),
                    }
                })
                .collect();

            SeriesGrid {
                key,
                on_hand_qty,
                safety_stock_qty,
                cells,
            }
        })
        .collect();

    Grid {
        weeks,
        series,
        dropped_demand_rows,
        dropped_supply_rows,
    }
}

/// 校验推演周数
pub fn check_horizon(horizon_weeks: u32) -> EngineResult<()> {
    if horizon_weeks == 0 {
        return Err(EngineError::InvalidHorizon(horizon_weeks));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_snap_to_monday() {
        // 2026-01-22 是周四
        assert_eq!(snap_to_week_start(d(2026, 1, 22), Weekday::Mon), d(2026, 1, 19));
        assert_eq!(snap_to_week_start(d(2026, 1, 19), Weekday::Mon), d(2026, 1, 19));
        // 周日回退 6 天
        assert_eq!(snap_to_week_start(d(2026, 1, 25), Weekday::Mon), d(2026, 1, 19));
        // 周起始日为周日
        assert_eq!(snap_to_week_start(d(2026, 1, 22), Weekday::Sun), d(2026, 1, 18));
    }

    #[test]
    fn test_anchor_uses_earliest_of_demand_and_supply() {
        let demand = vec![DemandRecord::new(d(2026, 2, 2), "A", "L", 1.0)];
        let supply = vec![SupplyRecord::new(d(2026, 1, 21), "A", "L", 1.0)];

        let anchor = anchor_week(&demand, &supply, d(2030, 1, 1), Weekday::Mon);
        assert_eq!(anchor, d(2026, 1, 19));
    }

    #[test]
    fn test_anchor_falls_back_to_today() {
        let anchor = anchor_week(&[], &[], d(2026, 10, 18), Weekday::Mon);
        assert_eq!(anchor, d(2026, 10, 12));
    }

    #[test]
    fn test_week_sequence_is_contiguous() {
        let weeks = week_sequence(d(2026, 1, 19), 3).unwrap();
        assert_eq!(weeks, vec![d(2026, 1, 19), d(2026, 1, 26), d(2026, 2, 2)]);
    }

    #[test]
    fn test_build_grid_sums_and_drops_unknown_keys() {
        let inventory = vec![
            InventoryRecord::new("A", "L", 5.0, 1.0),
            InventoryRecord::new("A", "L", 3.0, 2.0),
        ];
        let demand = vec![
            DemandRecord::new(d(2026, 1, 19), "A", "L", 4.0),
            DemandRecord::new(d(2026, 1, 19), "A", "L", 6.0),
            DemandRecord::new(d(2026, 1, 19), "Z", "L", 99.0),
        ];
        let supply = vec![SupplyRecord::new(d(2026, 1, 26), "A", "L", 7.0)];
        let weeks = week_sequence(d(2026, 1, 19), 2).unwrap();

        let grid = build_grid(&inventory, &demand, &supply, weeks);

        assert_eq!(grid.series.len(), 1);
        assert_eq!(grid.dropped_demand_rows, 1);
        let series = &grid.series[0];
        assert_eq!(series.on_hand_qty, 8.0);
        assert_eq!(series.safety_stock_qty, 3.0);
        assert_eq!(series.cells[0].forecast_qty, 10.0);
        assert_eq!(series.cells[0].supply_qty, 0.0);
        assert_eq!(series.cells[1].forecast_qty, 0.0);
        assert_eq!(series.cells[1].supply_qty, 7.0);
    }

    #[test]
    fn test_check_horizon() {
        assert!(check_horizon(1).is_ok());
        assert_eq!(check_horizon(0), Err(EngineError::InvalidHorizon(0)));
    }
}
