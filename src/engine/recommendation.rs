// ==========================================
// 供应链风险驾驶舱 - 处置建议
// ==========================================
// 职责: 序列级处置建议 + 处置清单排序 + 驾驶舱指标
// 规则（按优先级）:
// 1. 断货 → EXPEDITE（加急）
// 2. 跌破安全库存 → REPLENISH（补货）
// 3. min_poh > 安全库存 × 覆盖倍数 且 min_poh > 促销下限 → PROMO（促销去化）
// 4. 其他 → OK
// ==========================================

use crate::domain::projection::{ActionItem, EnrichedSummaryRow, ExecutiveMetrics};
use crate::domain::types::Recommendation;
use std::cmp::Ordering;

pub const DEFAULT_PROMO_COVER_MULTIPLE: f64 = 3.0;
pub const DEFAULT_PROMO_MIN_POH: f64 = 10_000.0;

// ==========================================
// RecommendationEngine - 处置建议引擎
// ==========================================
pub struct RecommendationEngine {
    promo_cover_multiple: f64, // 安全库存覆盖倍数
    promo_min_poh: f64,        // 促销最低 POH
}

impl RecommendationEngine {
    pub fn new(promo_cover_multiple: f64, promo_min_poh: f64) -> Self {
        Self {
            promo_cover_multiple,
            promo_min_poh,
        }
    }

    /// 单序列建议
    pub fn recommend(&self, row: &EnrichedSummaryRow) -> Recommendation {
        let summary = &row.summary;
        if summary.has_stockout() {
            Recommendation::Expedite
        } else if summary.has_safety_breach() {
            Recommendation::Replenish
        } else if summary.min_poh > summary.safety_stock_qty * self.promo_cover_multiple
            && summary.min_poh > self.promo_min_poh
        {
            Recommendation::Promo
        } else {
            Recommendation::Ok
        }
    }

    /// 处置清单（风险收入降序，首次断货周升序，无断货排最后）
    pub fn build_actions(&self, rows: &[EnrichedSummaryRow]) -> Vec<ActionItem> {
        let mut actions: Vec<ActionItem> = rows
            .iter()
            .map(|row| ActionItem {
                sku: row.summary.sku.clone(),
                location: row.summary.location.clone(),
                recommendation: self.recommend(row),
                revenue_at_risk: row.revenue_at_risk,
                fill_rate: row.summary.fill_rate,
                first_stockout_week: row.summary.first_stockout_week,
                first_safety_breach_week: row.summary.first_safety_breach_week,
            })
            .collect();

        // sort_by 为稳定排序，同序保持汇总顺序
        actions.sort_by(|a, b| {
            b.revenue_at_risk
                .partial_cmp(&a.revenue_at_risk)
                .unwrap_or(Ordering::Equal)
                .then_with(|| match (a.first_stockout_week, b.first_stockout_week) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                })
        });

        actions
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PROMO_COVER_MULTIPLE, DEFAULT_PROMO_MIN_POH)
    }
}

/// 驾驶舱指标
pub fn executive_metrics(rows: &[EnrichedSummaryRow]) -> ExecutiveMetrics {
    let avg_fill_rate = if rows.is_empty() {
        None
    } else {
        Some(rows.iter().map(|r| r.summary.fill_rate).sum::<f64>() / rows.len() as f64)
    };

    ExecutiveMetrics {
        total_revenue_at_risk: rows.iter().map(|r| r.revenue_at_risk).sum(),
        skus_with_stockouts: rows.iter().filter(|r| r.summary.has_stockout()).count(),
        avg_fill_rate,
        safety_breaches: rows.iter().filter(|r| r.summary.has_safety_breach()).count(),
    }
}
