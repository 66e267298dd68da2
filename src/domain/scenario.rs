// ==========================================
// 供应链风险驾驶舱 - 情景参数
// ==========================================
// 职责: what-if 杠杆（需求上浮 / 供应延迟）与推演周期
// 说明: 取值范围由调用方校验，引擎不做范围约束
// ==========================================

use serde::{Deserialize, Serialize};

/// 情景参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    /// 推演周数（>= 1）
    pub horizon_weeks: u32,

    /// 需求上浮比例（0.10 = +10%）
    #[serde(default)]
    pub demand_uplift_pct: f64,

    /// 供应延迟周数
    #[serde(default)]
    pub supply_delay_weeks: u32,
}

impl ScenarioParams {
    pub fn new(horizon_weeks: u32, demand_uplift_pct: f64, supply_delay_weeks: u32) -> Self {
        Self {
            horizon_weeks,
            demand_uplift_pct,
            supply_delay_weeks,
        }
    }

    pub fn with_horizon(mut self, horizon_weeks: u32) -> Self {
        self.horizon_weeks = horizon_weeks;
        self
    }

    pub fn with_demand_uplift(mut self, demand_uplift_pct: f64) -> Self {
        self.demand_uplift_pct = demand_uplift_pct;
        self
    }

    pub fn with_supply_delay(mut self, supply_delay_weeks: u32) -> Self {
        self.supply_delay_weeks = supply_delay_weeks;
        self
    }
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            horizon_weeks: 8,
            demand_uplift_pct: 0.0,
            supply_delay_weeks: 0,
        }
    }
}

/// 情景参数允许范围（调用方校验用，默认值与驾驶舱滑块一致）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioLimits {
    pub max_demand_uplift_pct: f64,
    pub max_supply_delay_weeks: u32,
    pub min_horizon_weeks: u32,
    pub max_horizon_weeks: u32,
}

impl Default for ScenarioLimits {
    fn default() -> Self {
        Self {
            max_demand_uplift_pct: 0.5,
            max_supply_delay_weeks: 8,
            min_horizon_weeks: 4,
            max_horizon_weeks: 16,
        }
    }
}
