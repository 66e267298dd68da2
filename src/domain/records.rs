// ==========================================
// 供应链风险驾驶舱 - 输入记录领域模型
// ==========================================
// 职责: 库存快照 / 需求计划 / 供应计划 / 主数据 的强类型行
// 红线: 缺失列以显式默认值建模（数量=0，日期=None），不做运行时补列
// ==========================================

use crate::domain::types::SeriesKey;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// InventoryRecord - 库存快照行
// ==========================================
// 同一 (sku, location) 多行时数量求和，不覆盖
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub row_number: usize,               // 源表行号（从 1 开始，不含表头）
    pub sku: String,                     // 物料编码
    pub location: String,                // 库位
    pub as_of_date: Option<NaiveDate>,   // 快照日期
    pub on_hand_qty: f64,                // 在手库存
    #[serde(default)]
    pub safety_stock_qty: f64,           // 安全库存（可选列，默认 0）
}

impl InventoryRecord {
    pub fn new(sku: &str, location: &str, on_hand_qty: f64, safety_stock_qty: f64) -> Self {
        Self {
            row_number: 0,
            sku: sku.to_string(),
            location: location.to_string(),
            as_of_date: None,
            on_hand_qty,
            safety_stock_qty,
        }
    }

    pub fn key(&self) -> SeriesKey {
        SeriesKey::new(self.sku.clone(), self.location.clone())
    }
}

// ==========================================
// DemandRecord - 周需求预测行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandRecord {
    pub row_number: usize,
    pub week_start: Option<NaiveDate>, // 周起始日（空值行不参与聚合）
    pub sku: String,
    pub location: String,
    pub forecast_qty: f64,             // 预测需求量
}

impl DemandRecord {
    pub fn new(week_start: NaiveDate, sku: &str, location: &str, forecast_qty: f64) -> Self {
        Self {
            row_number: 0,
            week_start: Some(week_start),
            sku: sku.to_string(),
            location: location.to_string(),
            forecast_qty,
        }
    }

    pub fn key(&self) -> SeriesKey {
        SeriesKey::new(self.sku.clone(), self.location.clone())
    }
}

// ==========================================
// SupplyRecord - 周供应计划行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyRecord {
    pub row_number: usize,
    pub week_start: Option<NaiveDate>, // 到货周起始日
    pub sku: String,
    pub location: String,
    pub supply_qty: f64,               // 计划到货量
}

impl SupplyRecord {
    pub fn new(week_start: NaiveDate, sku: &str, location: &str, supply_qty: f64) -> Self {
        Self {
            row_number: 0,
            week_start: Some(week_start),
            sku: sku.to_string(),
            location: location.to_string(),
            supply_qty,
        }
    }

    pub fn key(&self) -> SeriesKey {
        SeriesKey::new(self.sku.clone(), self.location.clone())
    }
}

// ==========================================
// MasterDataRecord - 物料主数据行（可选表）
// ==========================================
// location 为 None 表示按 sku 维度关联
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterDataRecord {
    pub sku: String,
    pub location: Option<String>,
    pub unit_revenue: Option<f64>, // 单位收入（空值走默认）
    pub unit_cogs: Option<f64>,    // 单位成本（空值走默认）
}
