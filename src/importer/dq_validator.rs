// ==========================================
// 供应链风险驾驶舱 - 数据质量校验器实现
// ==========================================
// 职责: 结构校验（工作表 / 列）+ 值校验（非负数量 / 周起始日对齐）
// 规则:
// 1. 存在任一结构错误时只返回结构错误，不做值校验
// 2. 数量列非数值按 0 处理（宽松口径），仅负数报错
// 3. 日期无法解析 与 非周起始日 分别报错并给出行数
// ==========================================

use crate::domain::types::weekday_plural;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::field_mapper::columns;
use crate::importer::importer_trait::{DqValidator as DqValidatorTrait, ValidationReport};
use crate::importer::raw_table::{sheet_names, RawTable, Workbook};
use chrono::{Datelike, Weekday};

/// 必需工作表（校验顺序即错误输出顺序）
pub const REQUIRED_SHEETS: [&str; 3] = [
    sheet_names::INVENTORY,
    sheet_names::DEMAND_PLAN,
    sheet_names::SUPPLY_PLAN,
];

/// 各工作表必需列
pub fn required_columns(sheet: &str) -> &'static [&'static str] {
    match sheet {
        sheet_names::INVENTORY => &[
            columns::AS_OF_DATE,
            columns::SKU,
            columns::LOCATION,
            columns::ON_HAND_QTY,
        ],
        sheet_names::DEMAND_PLAN => &[
            columns::WEEK_START,
            columns::SKU,
            columns::LOCATION,
            columns::FORECAST_QTY,
        ],
        sheet_names::SUPPLY_PLAN => &[
            columns::WEEK_START,
            columns::SKU,
            columns::LOCATION,
            columns::SUPPLY_QTY,
        ],
        _ => &[],
    }
}

pub struct DqValidator {
    week_start: Weekday, // 周起始日（默认周一）
    cleaner: DataCleaner,
}

impl DqValidator {
    pub fn new(week_start: Weekday) -> Self {
        Self {
            week_start,
            cleaner: DataCleaner,
        }
    }

    /// 结构校验: 工作表存在 / 非空 / 必需列齐全
    fn validate_structure(&self, workbook: &Workbook) -> Vec<String> {
        let mut errors = Vec::new();

        for sheet in REQUIRED_SHEETS {
            let table = match workbook.get(sheet) {
                Some(t) => t,
                None => {
                    errors.push(format!("Missing required sheet: {}", sheet));
                    continue;
                }
            };

            // 空表不再检查列
            if table.is_empty() {
                errors.push(format!("Sheet {} is empty.", sheet));
                continue;
            }

            let missing: Vec<&str> = required_columns(sheet)
                .iter()
                .copied()
                .filter(|c| !table.has_column(c))
                .collect();
            if !missing.is_empty() {
                errors.push(format!(
                    "Sheet {} missing columns: [{}]",
                    sheet,
                    missing.join(", ")
                ));
            }
        }

        errors
    }

    /// 数量列非负校验（非数值按 0 处理）
    fn has_negative(&self, table: &RawTable, column: &str) -> bool {
        if !table.has_column(column) {
            return false;
        }
        table
            .column_values(column)
            .any(|v| self.cleaner.coerce_f64(v) < 0.0)
    }

    /// 周起始日校验
    ///
    /// # 返回
    /// (无法解析的行数, 非周起始日的行数)
    fn count_week_start_violations(&self, table: &RawTable) -> (usize, usize) {
        let mut invalid = 0;
        let mut misaligned = 0;

        for value in table.column_values(columns::WEEK_START) {
            match self.cleaner.parse_date(value) {
                Ok(Some(date)) => {
                    if date.weekday() != self.week_start {
                        misaligned += 1;
                    }
                }
                // 空白与无法解析同样计为无效日期
                Ok(None) | Err(_) => invalid += 1,
            }
        }

        (invalid, misaligned)
    }

    /// 计划表（需求 / 供应）值校验
    fn validate_plan_sheet(&self, table: &RawTable, qty_column: &str, errors: &mut Vec<String>) {
        let sheet = table.name.as_str();

        let (invalid, misaligned) = self.count_week_start_violations(table);
        if invalid > 0 {
            errors.push(format!(
                "{}: Invalid dates in week_start. Found {} invalid rows.",
                sheet, invalid
            ));
        }
        if misaligned > 0 {
            errors.push(format!(
                "{}: week_start must be {}. Found {} invalid rows.",
                sheet,
                weekday_plural(self.week_start),
                misaligned
            ));
        }

        if self.has_negative(table, qty_column) {
            errors.push(format!("{}: {} contains negative values", sheet, qty_column));
        }
    }
}

impl Default for DqValidator {
    fn default() -> Self {
        Self::new(Weekday::Mon)
    }
}

impl DqValidatorTrait for DqValidator {
    fn validate(&self, workbook: &Workbook) -> ValidationReport {
        let errors = self.validate_structure(workbook);
        if !errors.is_empty() {
            tracing::warn!(error_count = errors.len(), "结构校验未通过");
            return ValidationReport::from_errors(errors);
        }

        let mut errors = Vec::new();

        // 库存: 在手 / 安全库存非负
        if let Some(inventory) = workbook.get(sheet_names::INVENTORY) {
            for column in [columns::ON_HAND_QTY, columns::SAFETY_STOCK_QTY] {
                if self.has_negative(inventory, column) {
                    errors.push(format!("Inventory sheet contains negative values in {}", column));
                }
            }
        }

        if let Some(demand) = workbook.get(sheet_names::DEMAND_PLAN) {
            self.validate_plan_sheet(demand, columns::FORECAST_QTY, &mut errors);
        }

        if let Some(supply) = workbook.get(sheet_names::SUPPLY_PLAN) {
            self.validate_plan_sheet(supply, columns::SUPPLY_QTY, &mut errors);
        }

        if errors.is_empty() {
            tracing::debug!("数据校验通过");
        } else {
            tracing::warn!(error_count = errors.len(), "值校验未通过");
        }

        ValidationReport::from_errors(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory(on_hand: &str) -> RawTable {
        RawTable::from_rows(
            "Inventory",
            &["as_of_date", "sku", "location", "on_hand_qty"],
            &[vec!["2026-01-01", "A", "L", on_hand]],
        )
    }

    fn plan(name: &str, qty_col: &str, week: &str, qty: &str) -> RawTable {
        RawTable::from_rows(
            name,
            &["week_start", "sku", "location", qty_col],
            &[vec![week, "A", "L", qty]],
        )
    }

    fn workbook(tables: Vec<RawTable>) -> Workbook {
        tables.into_iter().map(|t| (t.name.clone(), t)).collect()
    }

    #[test]
    fn test_valid_workbook() {
        let wb = workbook(vec![
            inventory("100"),
            plan("Demand_Plan", "forecast_qty", "2026-01-19", "10"),
            plan("Supply_Plan", "supply_qty", "2026-01-19", "50"),
        ]);

        let report = DqValidator::default().validate(&wb);
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_missing_sheets_in_order() {
        let wb = workbook(vec![RawTable::new("Inventory", vec![])]);

        let report = DqValidator::default().validate(&wb);
        assert!(!report.is_valid);
        assert_eq!(
            report.errors,
            vec![
                "Sheet Inventory is empty.".to_string(),
                "Missing required sheet: Demand_Plan".to_string(),
                "Missing required sheet: Supply_Plan".to_string(),
            ]
        );
    }

    #[test]
    fn test_structural_errors_suppress_value_checks() {
        let mut bad_inventory = inventory("-5");
        bad_inventory.headers.retain(|h| h != "location");
        let wb = workbook(vec![
            bad_inventory,
            plan("Demand_Plan", "forecast_qty", "2026-01-20", "10"),
            plan("Supply_Plan", "supply_qty", "2026-01-19", "10"),
        ]);

        let report = DqValidator::default().validate(&wb);
        assert_eq!(
            report.errors,
            vec!["Sheet Inventory missing columns: [location]".to_string()]
        );
    }

    #[test]
    fn test_negative_quantities() {
        let wb = workbook(vec![
            inventory("-10"),
            plan("Demand_Plan", "forecast_qty", "2026-01-19", "-1"),
            plan("Supply_Plan", "supply_qty", "2026-01-19", "oops"),
        ]);

        let report = DqValidator::default().validate(&wb);
        assert_eq!(
            report.errors,
            vec![
                "Inventory sheet contains negative values in on_hand_qty".to_string(),
                "Demand_Plan: forecast_qty contains negative values".to_string(),
            ]
        );
    }

    #[test]
    fn test_week_start_alignment_and_parsing() {
        let mut demand = plan("Demand_Plan", "forecast_qty", "2026-01-20", "10");
        demand.push_values(vec![
            "garbage".to_string(),
            "A".to_string(),
            "L".to_string(),
            "1".to_string(),
        ]);
        let wb = workbook(vec![
            inventory("100"),
            demand,
            plan("Supply_Plan", "supply_qty", "2026-01-19", "10"),
        ]);

        let report = DqValidator::default().validate(&wb);
        assert_eq!(
            report.errors,
            vec![
                "Demand_Plan: Invalid dates in week_start. Found 1 invalid rows.".to_string(),
                "Demand_Plan: week_start must be Mondays. Found 1 invalid rows.".to_string(),
            ]
        );
    }

    #[test]
    fn test_configurable_week_start() {
        let wb = workbook(vec![
            inventory("100"),
            plan("Demand_Plan", "forecast_qty", "2026-01-18", "10"),
            plan("Supply_Plan", "supply_qty", "2026-01-18", "10"),
        ]);

        assert!(DqValidator::new(Weekday::Sun).validate(&wb).is_valid);
        assert!(!DqValidator::new(Weekday::Mon).validate(&wb).is_valid);
    }
}
