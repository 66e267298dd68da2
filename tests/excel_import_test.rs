// ==========================================
// Excel 工作簿导入测试
// ==========================================
// 测试目标: xlsx → Workbook → 校验 → 计算
// 测试数据: tests/fixtures/cockpit_basic.xlsx
// - week_start / as_of_date 为日期格式单元格（序列号 + 日期样式）
// - Master_Data 无 location 列（按 sku 关联）
// ==========================================

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use supply_chain_risk::api::CockpitApi;
use supply_chain_risk::domain::{Recommendation, ScenarioParams};
use supply_chain_risk::importer::{ExcelParser, FileParser, UniversalFileParser};

// ==========================================
// 测试辅助函数
// ==========================================

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/cockpit_basic.xlsx")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ==========================================
// 解析
// ==========================================

#[test]
fn test_excel_reads_all_sheets() {
    let workbook = ExcelParser.parse_workbook(&fixture_path()).unwrap();

    let mut names: Vec<&str> = workbook.keys().map(String::as_str).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["Demand_Plan", "Inventory", "Master_Data", "Supply_Plan"]);

    assert_eq!(workbook["Inventory"].len(), 2);
    assert_eq!(workbook["Demand_Plan"].len(), 3);
    assert_eq!(workbook["Supply_Plan"].len(), 1);
    assert_eq!(workbook["Master_Data"].len(), 1);
}

#[test]
fn test_excel_date_cells_render_as_iso_dates() {
    let workbook = UniversalFileParser.load(fixture_path()).unwrap();

    let demand = &workbook["Demand_Plan"];
    let weeks: Vec<Option<&str>> = demand.column_values("week_start").collect();
    assert_eq!(
        weeks,
        vec![Some("2026-01-19"), Some("2026-01-26"), Some("2026-01-19")]
    );

    let inventory = &workbook["Inventory"];
    assert_eq!(
        inventory.rows[0].get("as_of_date").map(String::as_str),
        Some("2026-01-16")
    );
    // 数值单元格不带多余小数
    assert_eq!(
        inventory.rows[1].get("on_hand_qty").map(String::as_str),
        Some("40")
    );
}

// ==========================================
// 校验 + 计算
// ==========================================

#[test]
fn test_excel_workbook_passes_validation() {
    let api = CockpitApi::default();
    let workbook = api.load_workbook(&fixture_path()).unwrap();

    let report = api.validate(&workbook);
    assert!(report.is_valid, "unexpected errors: {:?}", report.errors);
}

#[test]
fn test_excel_workbook_end_to_end() {
    let api = CockpitApi::default();
    let workbook = api.load_workbook(&fixture_path()).unwrap();

    let cockpit = api
        .run(&workbook, &ScenarioParams::default().with_horizon(2))
        .unwrap();

    assert_eq!(cockpit.result.weeks, vec![date(2026, 1, 19), date(2026, 1, 26)]);
    assert_eq!(cockpit.result.summary.len(), 2);

    // A: 期初 5，首周需求 10 → 欠交 5；次周到货 20 补回
    let a: Vec<f64> = cockpit
        .result
        .series_detail("A", "DC1")
        .iter()
        .map(|row| row.nai)
        .collect();
    assert_eq!(a, vec![-5.0, 5.0]);

    let a_summary = cockpit.result.summary_for("A", "DC1").unwrap();
    assert_eq!(a_summary.total_unmet, 5.0);
    assert_eq!(a_summary.fill_rate, 0.75);
    assert_eq!(a_summary.first_stockout_week, Some(date(2026, 1, 19)));

    // B: 期初 40，需求 5，始终高于安全库存 10
    let b: Vec<f64> = cockpit
        .result
        .series_detail("B", "DC1")
        .iter()
        .map(|row| row.poh)
        .collect();
    assert_eq!(b, vec![35.0, 35.0]);
    assert_eq!(cockpit.result.summary_for("B", "DC1").unwrap().safety_breach_flag, 0);

    // 主数据按 sku 关联，B 未匹配取默认单价
    let a_enriched = cockpit.enriched.iter().find(|r| r.summary.sku == "A").unwrap();
    assert_eq!(a_enriched.unit_revenue, 2.5);
    assert_eq!(a_enriched.revenue_at_risk, 12.5);
    let b_enriched = cockpit.enriched.iter().find(|r| r.summary.sku == "B").unwrap();
    assert_eq!(b_enriched.unit_revenue, 1.0);

    let recommendations: Vec<(&str, Recommendation)> = cockpit
        .actions
        .iter()
        .map(|a| (a.sku.as_str(), a.recommendation))
        .collect();
    assert_eq!(
        recommendations,
        vec![("A", Recommendation::Expedite), ("B", Recommendation::Ok)]
    );
    assert_eq!(cockpit.metrics.total_revenue_at_risk, 12.5);
}
