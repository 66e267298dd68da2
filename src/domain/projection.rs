// ==========================================
// 供应链风险驾驶舱 - 推演结果领域模型
// ==========================================
// 职责: 周明细（ProjectionRow）/ 汇总（SummaryRow）/ 计算结果（KpiResult）
// 用途: 驾驶舱展示、导出，只读数据
// ==========================================

use crate::domain::types::Recommendation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ProjectionRow - 周推演明细
// ==========================================
// 同一序列内按 week_start 升序、无缺周
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    pub sku: String,
    pub location: String,
    pub week_start: NaiveDate,

    // ===== 网格输入 =====
    pub forecast_qty: f64,     // 需求（已含上浮）
    pub supply_qty: f64,       // 到货（已含延迟）
    pub on_hand_qty: f64,      // 期初在手（序列常量）
    pub safety_stock_qty: f64, // 安全库存（序列常量）

    // ===== 递推输出 =====
    #[serde(rename = "NAI")]
    pub nai: f64,              // 净可用库存（可为负，表示欠交）
    #[serde(rename = "POH")]
    pub poh: f64,              // 预计在手（>= 0）
    pub served_qty: f64,       // 满足量
    pub unmet_qty: f64,        // 未满足量

    // ===== 行级标记 =====
    pub stockout: bool,        // NAI < 0
    pub safety_breach: bool,   // POH < 安全库存
}

// ==========================================
// SummaryRow - 序列汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub sku: String,
    pub location: String,

    pub total_demand: f64,
    pub total_served: f64,
    pub total_unmet: f64,
    pub min_nai: f64,
    pub min_poh: f64,
    pub safety_stock_qty: f64,
    pub on_hand_qty: f64,

    pub fill_rate: f64,                          // 满足率，无需求时为 1.0
    pub stockout_flag: u8,                       // min_nai < 0
    pub first_stockout_week: Option<NaiveDate>,  // 首次断货周
    pub safety_breach_flag: u8,                  // min_poh < 安全库存
    pub first_safety_breach_week: Option<NaiveDate>,
}

impl SummaryRow {
    pub fn has_stockout(&self) -> bool {
        self.stockout_flag == 1
    }

    pub fn has_safety_breach(&self) -> bool {
        self.safety_breach_flag == 1
    }
}

// ==========================================
// KpiResult - 单次计算结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiResult {
    pub summary: Vec<SummaryRow>,     // 按 (sku, location) 排序
    pub detail: Vec<ProjectionRow>,   // 按 (sku, location, week_start) 排序
    pub weeks: Vec<NaiveDate>,        // 推演周序列
}

impl KpiResult {
    /// 下钻: 取单个序列的周明细（按周升序）
    pub fn series_detail(&self, sku: &str, location: &str) -> Vec<&ProjectionRow> {
        self.detail
            .iter()
            .filter(|row| row.sku == sku && row.location == location)
            .collect()
    }

    /// 取单个序列的汇总行
    pub fn summary_for(&self, sku: &str, location: &str) -> Option<&SummaryRow> {
        self.summary
            .iter()
            .find(|row| row.sku == sku && row.location == location)
    }
}

// ==========================================
// EnrichedSummaryRow - 关联主数据后的汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedSummaryRow {
    #[serde(flatten)]
    pub summary: SummaryRow,
    pub unit_revenue: f64,
    pub unit_cogs: f64,
    pub revenue_at_risk: f64, // total_unmet × unit_revenue
}

// ==========================================
// ActionItem - 处置清单行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub sku: String,
    pub location: String,
    pub recommendation: Recommendation,
    pub revenue_at_risk: f64,
    pub fill_rate: f64,
    pub first_stockout_week: Option<NaiveDate>,
    pub first_safety_breach_week: Option<NaiveDate>,
}

// ==========================================
// ExecutiveMetrics - 驾驶舱顶部指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveMetrics {
    pub total_revenue_at_risk: f64,
    pub skus_with_stockouts: usize,
    pub avg_fill_rate: Option<f64>, // 无序列时为 None
    pub safety_breaches: usize,
}
