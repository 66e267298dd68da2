// ==========================================
// 供应链风险驾驶舱 - 驾驶舱 API
// ==========================================
// 职责: 校验 → 映射 → KPI 计算 → 主数据关联 → 处置建议 → 指标
// 说明: 工作簿加载与缓存由调用方决定，本层只消费已加载的 Workbook
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::validate_scenario;
use crate::config::ConfigManager;
use crate::domain::projection::{ActionItem, EnrichedSummaryRow, ExecutiveMetrics, KpiResult};
use crate::domain::records::MasterDataRecord;
use crate::domain::scenario::{ScenarioLimits, ScenarioParams};
use crate::engine::{executive_metrics, KpiEngine, MasterDataEnricher, RecommendationEngine};
use crate::importer::{
    sheet_names, DqValidator, DqValidatorImpl, FieldMapper, ImportError, RawTable,
    UniversalFileParser, ValidationReport, Workbook,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// 驾驶舱报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CockpitReport {
    /// 本次计算使用的情景参数
    pub params: ScenarioParams,
    /// 引擎原始输出（汇总 + 周明细）
    pub result: KpiResult,
    /// 关联主数据后的汇总
    pub enriched: Vec<EnrichedSummaryRow>,
    /// 处置清单（风险收入降序）
    pub actions: Vec<ActionItem>,
    /// 顶部指标
    pub metrics: ExecutiveMetrics,
    /// 本次计算的生效配置（含默认值）
    pub config: BTreeMap<String, String>,
}

// ==========================================
// CockpitApi - 驾驶舱 API
// ==========================================
pub struct CockpitApi {
    validator: DqValidatorImpl,
    mapper: FieldMapper,
    engine: KpiEngine,
    enricher: MasterDataEnricher,
    recommender: RecommendationEngine,
    limits: ScenarioLimits,
    default_params: ScenarioParams,
    config: BTreeMap<String, String>,
}

impl CockpitApi {
    /// 按配置创建
    pub fn new(config: &ConfigManager) -> Self {
        let week_start = config.get_week_start();
        Self {
            validator: DqValidatorImpl::new(week_start),
            mapper: FieldMapper::new(),
            engine: KpiEngine::new(week_start),
            enricher: MasterDataEnricher::new(
                config.get_default_unit_revenue(),
                config.get_default_unit_cogs(),
            ),
            recommender: RecommendationEngine::new(
                config.get_promo_cover_multiple(),
                config.get_promo_min_poh(),
            ),
            limits: config.get_scenario_limits(),
            default_params: config.get_default_scenario(),
            config: config.effective_values(),
        }
    }

    /// 固定"今天"（需求与供应均为空时的锚点）
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.engine = self.engine.with_reference_date(date);
        self
    }

    /// 配置中的默认情景参数
    pub fn default_params(&self) -> ScenarioParams {
        self.default_params
    }

    /// 情景参数范围
    pub fn limits(&self) -> &ScenarioLimits {
        &self.limits
    }

    /// 加载工作簿（xlsx/xls/csv/CSV 目录）
    pub fn load_workbook(&self, path: &Path) -> ApiResult<Workbook> {
        Ok(UniversalFileParser.load(path)?)
    }

    /// 数据质量校验
    pub fn validate(&self, workbook: &Workbook) -> ValidationReport {
        self.validator.validate(workbook)
    }

    /// 校验情景参数范围
    pub fn check_scenario(&self, params: &ScenarioParams) -> ApiResult<()> {
        validate_scenario(params, &self.limits)
    }

    /// 运行驾驶舱计算
    ///
    /// # 参数
    /// - `workbook`: 已加载的工作簿
    /// - `params`: 情景参数（范围校验由调用方通过 check_scenario 决定）
    ///
    /// # 返回
    /// - Ok(CockpitReport)
    /// - Err(ApiError::ValidationFailed): 数据质量未通过，不进入计算
    /// - Err(ApiError::Import / Engine): 映射或计算失败
    pub fn run(&self, workbook: &Workbook, params: &ScenarioParams) -> ApiResult<CockpitReport> {
        let report = self.validate(workbook);
        if !report.is_valid {
            tracing::warn!(errors = report.errors.len(), "数据质量校验未通过");
            return Err(ApiError::ValidationFailed {
                errors: report.errors,
            });
        }

        // 1. 映射为强类型记录
        let inventory = self.mapper.map_inventory(required(workbook, sheet_names::INVENTORY)?)?;
        let demand = self.mapper.map_demand(required(workbook, sheet_names::DEMAND_PLAN)?)?;
        let supply = self.mapper.map_supply(required(workbook, sheet_names::SUPPLY_PLAN)?)?;
        let master_data: Option<Vec<MasterDataRecord>> = workbook
            .get(sheet_names::MASTER_DATA)
            .map(|table| self.mapper.map_master_data(table));

        tracing::debug!(
            inventory = inventory.len(),
            demand = demand.len(),
            supply = supply.len(),
            master_data = master_data.as_ref().map_or(0, Vec::len),
            "工作簿映射完成"
        );

        // 2. KPI 计算
        let result = self.engine.compute(&inventory, &demand, &supply, params)?;

        // 3. 主数据关联 + 处置建议
        let enriched = self.enricher.enrich(&result.summary, master_data.as_deref());
        let actions = self.recommender.build_actions(&enriched);
        let metrics = executive_metrics(&enriched);

        Ok(CockpitReport {
            params: *params,
            result,
            enriched,
            actions,
            metrics,
            config: self.config.clone(),
        })
    }
}

impl Default for CockpitApi {
    fn default() -> Self {
        Self::new(&ConfigManager::new())
    }
}

/// 取必需工作表（校验通过后理论上必然存在）
fn required<'a>(workbook: &'a Workbook, sheet: &str) -> ApiResult<&'a RawTable> {
    workbook
        .get(sheet)
        .ok_or_else(|| ApiError::Import(ImportError::MissingSheet(sheet.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Recommendation;

    fn workbook(tables: Vec<RawTable>) -> Workbook {
        tables.into_iter().map(|t| (t.name.clone(), t)).collect()
    }

    fn basic_workbook() -> Workbook {
        workbook(vec![
            RawTable::from_rows(
                "Inventory",
                &["as_of_date", "sku", "location", "on_hand_qty", "safety_stock_qty"],
                &[vec!["2026-01-16", "A", "DC1", "5", "0"]],
            ),
            RawTable::from_rows(
                "Demand_Plan",
                &["week_start", "sku", "location", "forecast_qty"],
                &[
                    vec!["2026-01-19", "A", "DC1", "10"],
                    vec!["2026-01-26", "A", "DC1", "10"],
                ],
            ),
            RawTable::from_rows(
                "Supply_Plan",
                &["week_start", "sku", "location", "supply_qty"],
                &[vec!["2026-01-26", "A", "DC1", "20"]],
            ),
        ])
    }

    #[test]
    fn test_run_rejects_invalid_workbook() {
        let api = CockpitApi::default();
        let mut book = basic_workbook();
        book.remove("Supply_Plan");

        let err = api.run(&book, &ScenarioParams::default()).unwrap_err();
        assert_eq!(
            err.validation_errors(),
            &["Missing required sheet: Supply_Plan".to_string()]
        );
    }

    #[test]
    fn test_run_produces_report() {
        let api = CockpitApi::default();
        let params = ScenarioParams::default().with_horizon(2);

        let report = api.run(&basic_workbook(), &params).unwrap();

        assert_eq!(report.result.summary.len(), 1);
        assert_eq!(report.result.detail.len(), 2);
        assert_eq!(report.enriched[0].revenue_at_risk, 5.0);
        assert_eq!(report.actions[0].recommendation, Recommendation::Expedite);
        assert_eq!(report.metrics.skus_with_stockouts, 1);
        assert_eq!(report.params, params);
    }

    #[test]
    fn test_run_uses_master_data_when_present() {
        let api = CockpitApi::default();
        let mut book = basic_workbook();
        book.insert(
            "Master_Data".to_string(),
            RawTable::from_rows("Master_Data", &["sku", "unit_revenue", "unit_cogs"], &[vec!["A", "4", "2"]]),
        );

        let report = api.run(&book, &ScenarioParams::default().with_horizon(2)).unwrap();
        assert_eq!(report.enriched[0].unit_revenue, 4.0);
        assert_eq!(report.metrics.total_revenue_at_risk, 20.0);
    }

    #[test]
    fn test_check_scenario_uses_configured_limits() {
        let mut config = ConfigManager::new();
        config.set(crate::config::config_keys::MAX_SUPPLY_DELAY_WEEKS, "2");
        let api = CockpitApi::new(&config);

        assert!(api.check_scenario(&ScenarioParams::default().with_supply_delay(2)).is_ok());
        assert!(api.check_scenario(&ScenarioParams::default().with_supply_delay(3)).is_err());
    }

    #[test]
    fn test_report_carries_effective_config() {
        let mut config = ConfigManager::new();
        config.set(crate::config::config_keys::PROMO_MIN_POH, "250");
        let api = CockpitApi::new(&config);

        let report = api.run(&basic_workbook(), &ScenarioParams::default().with_horizon(2)).unwrap();
        assert_eq!(report.config.get("promo_min_poh").map(String::as_str), Some("250"));
        assert_eq!(report.config.get("week_start_weekday").map(String::as_str), Some("Mon"));
        assert_eq!(report.config.get("default_unit_revenue").map(String::as_str), Some("1"));
    }
}
