// ==========================================
// 供应链风险驾驶舱 - 情景变换
// ==========================================
// 职责: 需求上浮（乘以 1 + pct）/ 供应延迟（到货周后移 N×7 天）
// 说明: 上浮比例低于 -100% 无业务意义，由调用方负责，这里不做校验
// ==========================================

use crate::domain::records::{DemandRecord, SupplyRecord};
use crate::engine::error::{EngineError, EngineResult};
use chrono::{Days, NaiveDate};

/// 需求上浮
pub fn apply_demand_uplift(demand: &[DemandRecord], uplift_pct: f64) -> Vec<DemandRecord> {
    let mut scaled = demand.to_vec();
    if uplift_pct != 0.0 {
        let factor = 1.0 + uplift_pct;
        for record in scaled.iter_mut() {
            record.forecast_qty *= factor;
        }
    }
    scaled
}

/// 供应延迟
pub fn apply_supply_delay(supply: &[SupplyRecord], delay_weeks: u32) -> EngineResult<Vec<SupplyRecord>> {
    let mut shifted = supply.to_vec();
    if delay_weeks == 0 {
        return Ok(shifted);
    }

    for record in shifted.iter_mut() {
        if let Some(week) = record.week_start {
            record.week_start = Some(shift_weeks(week, delay_weeks)?);
        }
    }
    Ok(shifted)
}

/// 日期后移 N 周
pub fn shift_weeks(date: NaiveDate, weeks: u32) -> EngineResult<NaiveDate> {
    date.checked_add_days(Days::new(7 * u64::from(weeks)))
        .ok_or_else(|| EngineError::DateOutOfRange(format!("{} + {} 周", date, weeks)))
}
