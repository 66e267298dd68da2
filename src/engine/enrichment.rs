// ==========================================
// 供应链风险驾驶舱 - 主数据关联
// ==========================================
// 职责: 汇总行关联单位收入/成本，计算风险收入
// 口径:
// - 主数据含 location 列时按 (sku, location) 关联，否则按 sku 关联
// - 重复键取首次出现
// - 未匹配或空值走默认单价（unit_revenue = 1.0，unit_cogs = 0.5）
// - revenue_at_risk = total_unmet × unit_revenue
// ==========================================

use crate::domain::projection::{EnrichedSummaryRow, SummaryRow};
use crate::domain::records::MasterDataRecord;
use std::collections::HashMap;

pub const DEFAULT_UNIT_REVENUE: f64 = 1.0;
pub const DEFAULT_UNIT_COGS: f64 = 0.5;

/// 关联键（按库位 / 仅按物料）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum JoinKey {
    SkuLocation(String, String),
    Sku(String),
}

// ==========================================
// MasterDataEnricher - 主数据关联器
// ==========================================
pub struct MasterDataEnricher {
    default_unit_revenue: f64,
    default_unit_cogs: f64,
}

impl MasterDataEnricher {
    pub fn new(default_unit_revenue: f64, default_unit_cogs: f64) -> Self {
        Self {
            default_unit_revenue,
            default_unit_cogs,
        }
    }

    /// 关联主数据
    ///
    /// # 参数
    /// - `summary`: 引擎汇总行
    /// - `master_data`: 主数据（None = 工作簿无 Master_Data 表）
    pub fn enrich(
        &self,
        summary: &[SummaryRow],
        master_data: Option<&[MasterDataRecord]>,
    ) -> Vec<EnrichedSummaryRow> {
        let master_data = master_data.unwrap_or(&[]);
        let by_location = master_data.iter().any(|r| r.location.is_some());

        let mut lookup: HashMap<JoinKey, &MasterDataRecord> = HashMap::new();
        for record in master_data {
            lookup
                .entry(Self::record_key(record, by_location))
                .or_insert(record);
        }

        let mut unmatched = 0usize;
        let enriched: Vec<EnrichedSummaryRow> = summary
            .iter()
            .map(|row| {
                let key = if by_location {
                    JoinKey::SkuLocation(row.sku.clone(), row.location.clone())
                } else {
                    JoinKey::Sku(row.sku.clone())
                };
                let matched = lookup.get(&key);
                if matched.is_none() {
                    unmatched += 1;
                }

                let unit_revenue = matched
                    .and_then(|r| r.unit_revenue)
                    .unwrap_or(self.default_unit_revenue);
                let unit_cogs = matched
                    .and_then(|r| r.unit_cogs)
                    .unwrap_or(self.default_unit_cogs);

                EnrichedSummaryRow {
                    summary: row.clone(),
                    unit_revenue,
                    unit_cogs,
                    revenue_at_risk: row.total_unmet * unit_revenue,
                }
            })
            .collect();

        if !master_data.is_empty() && unmatched > 0 {
            tracing::debug!(unmatched, total = summary.len(), "部分序列未匹配主数据，使用默认单价");
        }

        enriched
    }

    fn record_key(record: &MasterDataRecord, by_location: bool) -> JoinKey {
        match (&record.location, by_location) {
            (Some(location), true) => JoinKey::SkuLocation(record.sku.clone(), location.clone()),
            (None, true) => JoinKey::SkuLocation(record.sku.clone(), String::new()),
            (_, false) => JoinKey::Sku(record.sku.clone()),
        }
    }
}

impl Default for MasterDataEnricher {
    fn default() -> Self {
        Self::new(DEFAULT_UNIT_REVENUE, DEFAULT_UNIT_COGS)
    }
}
