// ==========================================
// 供应链风险驾驶舱 - 字段映射器实现
// ==========================================
// 职责: 原始表 → 强类型记录 + 类型转换
// 口径:
// - 缺失列按默认值补齐（数量 0，日期 None）
// - 数量列非数值按 0 处理
// - 日期列非空且无法解析 → DateFormatError（唯一的强制失败）
// ==========================================

use crate::domain::records::{DemandRecord, InventoryRecord, MasterDataRecord, SupplyRecord};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::raw_table::RawTable;
use chrono::NaiveDate;
use std::collections::HashMap;

// 列名常量
pub mod columns {
    pub const AS_OF_DATE: &str = "as_of_date";
    pub const WEEK_START: &str = "week_start";
    pub const SKU: &str = "sku";
    pub const LOCATION: &str = "location";
    pub const ON_HAND_QTY: &str = "on_hand_qty";
    pub const SAFETY_STOCK_QTY: &str = "safety_stock_qty";
    pub const FORECAST_QTY: &str = "forecast_qty";
    pub const SUPPLY_QTY: &str = "supply_qty";
    pub const UNIT_REVENUE: &str = "unit_revenue";
    pub const UNIT_COGS: &str = "unit_cogs";
}

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 映射库存快照表
    pub fn map_inventory(&self, table: &RawTable) -> ImportResult<Vec<InventoryRecord>> {
        table
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let row_number = idx + 1;
                Ok(InventoryRecord {
                    row_number,
                    sku: self.get_key(row, columns::SKU),
                    location: self.get_key(row, columns::LOCATION),
                    as_of_date: self.get_date(table, row, columns::AS_OF_DATE, row_number)?,
                    on_hand_qty: self.get_qty(row, columns::ON_HAND_QTY),
                    safety_stock_qty: self.get_qty(row, columns::SAFETY_STOCK_QTY),
                })
            })
            .collect()
    }

    /// 映射需求计划表
    pub fn map_demand(&self, table: &RawTable) -> ImportResult<Vec<DemandRecord>> {
        table
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let row_number = idx + 1;
                Ok(DemandRecord {
                    row_number,
                    week_start: self.get_date(table, row, columns::WEEK_START, row_number)?,
                    sku: self.get_key(row, columns::SKU),
                    location: self.get_key(row, columns::LOCATION),
                    forecast_qty: self.get_qty(row, columns::FORECAST_QTY),
                })
            })
            .collect()
    }

    /// 映射供应计划表
    pub fn map_supply(&self, table: &RawTable) -> ImportResult<Vec<SupplyRecord>> {
        table
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let row_number = idx + 1;
                Ok(SupplyRecord {
                    row_number,
                    week_start: self.get_date(table, row, columns::WEEK_START, row_number)?,
                    sku: self.get_key(row, columns::SKU),
                    location: self.get_key(row, columns::LOCATION),
                    supply_qty: self.get_qty(row, columns::SUPPLY_QTY),
                })
            })
            .collect()
    }

    /// 映射主数据表
    ///
    /// 表中无 location 列时，所有记录按 sku 维度关联
    pub fn map_master_data(&self, table: &RawTable) -> Vec<MasterDataRecord> {
        let by_location = table.has_column(columns::LOCATION);

        table
            .rows
            .iter()
            .map(|row| MasterDataRecord {
                sku: self.get_key(row, columns::SKU),
                location: if by_location {
                    Some(self.get_key(row, columns::LOCATION))
                } else {
                    None
                },
                unit_revenue: self
                    .cleaner
                    .parse_f64(row.get(columns::UNIT_REVENUE).map(|v| v.as_str())),
                unit_cogs: self
                    .cleaner
                    .parse_f64(row.get(columns::UNIT_COGS).map(|v| v.as_str())),
            })
            .collect()
    }

    fn get_key(&self, row: &HashMap<String, String>, key: &str) -> String {
        self.cleaner.normalize_key(row.get(key).map(|v| v.as_str()))
    }

    fn get_qty(&self, row: &HashMap<String, String>, key: &str) -> f64 {
        self.cleaner.coerce_f64(row.get(key).map(|v| v.as_str()))
    }

    fn get_date(
        &self,
        table: &RawTable,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<NaiveDate>> {
        self.cleaner
            .parse_date(row.get(key).map(|v| v.as_str()))
            .map_err(|value| ImportError::DateFormatError {
                sheet: table.name.clone(),
                row: row_number,
                field: key.to_string(),
                value,
            })
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}
