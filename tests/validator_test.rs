// ==========================================
// DqValidator 数据质量校验集成测试
// ==========================================
// 测试目标: 验证结构校验与值校验的错误清单
// 覆盖范围: 缺表 / 空表 / 缺列 / 负数 / 非法日期 / 非周一
// ==========================================

use chrono::Weekday;
use supply_chain_risk::importer::{DqValidator, DqValidatorImpl, RawTable, Workbook};

// ==========================================
// 测试辅助函数
// ==========================================

fn inventory(on_hand: &str, safety: &str) -> RawTable {
    RawTable::from_rows(
        "Inventory",
        &["as_of_date", "sku", "location", "on_hand_qty", "safety_stock_qty"],
        &[vec!["2026-01-01", "A", "L", on_hand, safety]],
    )
}

fn demand(rows: &[(&str, &str)]) -> RawTable {
    let rows: Vec<Vec<&str>> = rows
        .iter()
        .map(|(week, qty)| vec![*week, "A", "L", *qty])
        .collect();
    RawTable::from_rows("Demand_Plan", &["week_start", "sku", "location", "forecast_qty"], &rows)
}

fn supply(rows: &[(&str, &str)]) -> RawTable {
    let rows: Vec<Vec<&str>> = rows
        .iter()
        .map(|(week, qty)| vec![*week, "A", "L", *qty])
        .collect();
    RawTable::from_rows("Supply_Plan", &["week_start", "sku", "location", "supply_qty"], &rows)
}

fn workbook(tables: Vec<RawTable>) -> Workbook {
    tables.into_iter().map(|t| (t.name.clone(), t)).collect()
}

fn valid_workbook() -> Workbook {
    workbook(vec![
        inventory("100", "10"),
        demand(&[("2026-01-19", "10")]),
        supply(&[("2026-01-19", "50")]),
    ])
}

// ==========================================
// 结构校验
// ==========================================

#[test]
fn test_valid_workbook_passes() {
    let report = DqValidatorImpl::default().validate(&valid_workbook());

    assert!(report.is_valid);
    assert!(report.errors.is_empty());
}

#[test]
fn test_safety_stock_column_is_optional() {
    let book = workbook(vec![
        RawTable::from_rows(
            "Inventory",
            &["as_of_date", "sku", "location", "on_hand_qty"],
            &[vec!["2026-01-01", "A", "L", "100"]],
        ),
        demand(&[("2026-01-19", "10")]),
        supply(&[("2026-01-19", "50")]),
    ]);

    assert!(DqValidatorImpl::default().validate(&book).is_valid);
}

#[test]
fn test_all_missing_sheets_reported() {
    let report = DqValidatorImpl::default().validate(&Workbook::new());

    assert!(!report.is_valid);
    assert_eq!(
        report.errors,
        vec![
            "Missing required sheet: Inventory",
            "Missing required sheet: Demand_Plan",
            "Missing required sheet: Supply_Plan",
        ]
    );
}

#[test]
fn test_empty_sheet_and_missing_columns() {
    let book = workbook(vec![
        RawTable::from_rows("Inventory", &["sku", "location", "on_hand_qty"], &[vec!["A", "L", "1"]]),
        demand(&[]),
        // 负数值不会被报告: 结构错误时不做值校验
        supply(&[("2026-01-20", "-5")]),
    ]);

    let report = DqValidatorImpl::default().validate(&book);

    assert_eq!(
        report.errors,
        vec![
            "Sheet Inventory missing columns: [as_of_date]",
            "Sheet Demand_Plan is empty.",
        ]
    );
}

// ==========================================
// 值校验
// ==========================================

#[test]
fn test_negative_inventory_values() {
    let mut book = valid_workbook();
    book.insert("Inventory".to_string(), inventory("-10", "-1"));

    let report = DqValidatorImpl::default().validate(&book);

    assert_eq!(
        report.errors,
        vec![
            "Inventory sheet contains negative values in on_hand_qty",
            "Inventory sheet contains negative values in safety_stock_qty",
        ]
    );
}

#[test]
fn test_non_numeric_quantities_are_lenient() {
    let mut book = valid_workbook();
    book.insert("Inventory".to_string(), inventory("n/a", ""));

    assert!(DqValidatorImpl::default().validate(&book).is_valid);
}

#[test]
fn test_plan_sheet_errors() {
    let book = workbook(vec![
        inventory("100", "0"),
        demand(&[("2026-01-20", "10"), ("2026-01-21", "10"), ("2026-01-19", "-1")]),
        supply(&[("not a date", "5"), ("2026-01-19", "5")]),
    ]);

    let report = DqValidatorImpl::default().validate(&book);

    assert_eq!(
        report.errors,
        vec![
            "Demand_Plan: week_start must be Mondays. Found 2 invalid rows.",
            "Demand_Plan: forecast_qty contains negative values",
            "Supply_Plan: Invalid dates in week_start. Found 1 invalid rows.",
        ]
    );
}

#[test]
fn test_configured_week_start_weekday() {
    // 2026-01-18 为周日
    let book = workbook(vec![
        inventory("100", "0"),
        demand(&[("2026-01-18", "10")]),
        supply(&[("2026-01-19", "5")]),
    ]);

    let report = DqValidatorImpl::new(Weekday::Sun).validate(&book);

    assert_eq!(
        report.errors,
        vec!["Supply_Plan: week_start must be Sundays. Found 1 invalid rows."]
    );
}

#[test]
fn test_comma_quantities_are_non_numeric() {
    // "-1,5" 不按千分位解析成 -15，视为非数值 → 0，不报负数
    let book = workbook(vec![
        inventory("1,000", "0"),
        demand(&[("2026-01-19", "-1,5")]),
        supply(&[("2026-01-19", "5")]),
    ]);

    assert!(DqValidatorImpl::default().validate(&book).is_valid);
}
