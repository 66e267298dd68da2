// ==========================================
// 供应链风险驾驶舱 - 情景参数校验器
// ==========================================
// 职责: 调用方侧的情景参数范围校验（引擎本身不限制范围）
// 默认范围: 需求上浮 0–50%，供应延迟 0–8 周，推演周期 4–16 周
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::scenario::{ScenarioLimits, ScenarioParams};

/// 校验情景参数
///
/// # 返回
/// - Ok(()): 校验通过
/// - Err(ApiError::InvalidInput): 首个越界参数
pub fn validate_scenario(params: &ScenarioParams, limits: &ScenarioLimits) -> ApiResult<()> {
    let uplift = params.demand_uplift_pct;
    if !uplift.is_finite() || uplift < 0.0 || uplift > limits.max_demand_uplift_pct {
        return Err(ApiError::InvalidInput(format!(
            "demand_uplift_pct={} 超出范围 [0, {}]",
            uplift, limits.max_demand_uplift_pct
        )));
    }

    if params.supply_delay_weeks > limits.max_supply_delay_weeks {
        return Err(ApiError::InvalidInput(format!(
            "supply_delay_weeks={} 超出范围 [0, {}]",
            params.supply_delay_weeks, limits.max_supply_delay_weeks
        )));
    }

    if params.horizon_weeks < limits.min_horizon_weeks
        || params.horizon_weeks > limits.max_horizon_weeks
    {
        return Err(ApiError::InvalidInput(format!(
            "horizon_weeks={} 超出范围 [{}, {}]",
            params.horizon_weeks, limits.min_horizon_weeks, limits.max_horizon_weeks
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pass() {
        assert!(validate_scenario(&ScenarioParams::default(), &ScenarioLimits::default()).is_ok());
    }

    #[test]
    fn test_boundaries_inclusive() {
        let limits = ScenarioLimits::default();
        assert!(validate_scenario(&ScenarioParams::new(4, 0.5, 8), &limits).is_ok());
        assert!(validate_scenario(&ScenarioParams::new(16, 0.0, 0), &limits).is_ok());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let limits = ScenarioLimits::default();

        for params in [
            ScenarioParams::new(8, 0.6, 0),
            ScenarioParams::new(8, -0.1, 0),
            ScenarioParams::new(8, f64::NAN, 0),
            ScenarioParams::new(8, 0.0, 9),
            ScenarioParams::new(3, 0.0, 0),
            ScenarioParams::new(17, 0.0, 0),
        ] {
            assert!(
                matches!(validate_scenario(&params, &limits), Err(ApiError::InvalidInput(_))),
                "{:?}",
                params
            );
        }
    }
}
