// ==========================================
// 供应链风险驾驶舱 - 命令行入口
// ==========================================
// 用法:
//   supply-chain-risk data.xlsx
//   supply-chain-risk data.xlsx --horizon 12 --uplift 0.1 --delay 2
//   supply-chain-risk ./csv_dir --summary-out summary.csv --detail-out detail.csv
//   supply-chain-risk data.xlsx --json > report.json
// 退出码: 0 成功 / 1 运行失败 / 2 数据质量校验未通过
// ==========================================

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use supply_chain_risk::api::{ApiError, CockpitApi, CockpitReport};
use supply_chain_risk::config::ConfigManager;
use supply_chain_risk::logging::{self, LogFormat};
use supply_chain_risk::report;

// ==========================================
// 命令行参数
// ==========================================
#[derive(Parser, Debug)]
#[command(name = "supply-chain-risk")]
#[command(about = "供应链风险驾驶舱 - 周度库存推演与断货风险分析")]
#[command(version)]
struct Args {
    /// 输入工作簿（.xlsx / .xls / .csv 或 CSV 目录）
    ///
    /// 文本日期支持 YYYY-MM-DD、YYYYMMDD、YYYY/MM/DD、M/D/YYYY；
    /// 数量列不识别千分位逗号（"1,000" 视为非数值，按 0 处理）
    input: PathBuf,

    /// 配置文件（JSON）
    #[arg(short, long, env = "SUPPLY_RISK_CONFIG")]
    config: Option<PathBuf>,

    /// 推演周数（默认取配置 default_horizon_weeks）
    #[arg(long)]
    horizon: Option<u32>,

    /// 需求上浮比例（0.1 = +10%）
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    uplift: f64,

    /// 供应延迟周数
    #[arg(long, default_value_t = 0)]
    delay: u32,

    /// 汇总导出路径（CSV）
    #[arg(long)]
    summary_out: Option<PathBuf>,

    /// 周明细导出路径（CSV）
    #[arg(long)]
    detail_out: Option<PathBuf>,

    /// 以 JSON 输出完整报告
    #[arg(long)]
    json: bool,

    /// 显示处置清单前 N 行
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// 日志输出为 JSON
    #[arg(long)]
    log_json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_with(if args.log_json { LogFormat::Json } else { LogFormat::Text });

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("错误: {:#}", err);
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> anyhow::Result<ExitCode> {
    tracing::debug!("{} v{}", supply_chain_risk::APP_NAME, supply_chain_risk::VERSION);

    // 1. 配置
    let config = match &args.config {
        Some(path) => ConfigManager::load(path)?,
        None => ConfigManager::load_default()?,
    };
    tracing::debug!(config = %config.get_config_snapshot(), "生效配置");
    let api = CockpitApi::new(&config);

    // 2. 情景参数
    let mut params = api
        .default_params()
        .with_demand_uplift(args.uplift)
        .with_supply_delay(args.delay);
    if let Some(horizon) = args.horizon {
        params = params.with_horizon(horizon);
    }
    api.check_scenario(&params)?;

    // 3. 加载 + 计算
    let workbook = api
        .load_workbook(&args.input)
        .with_context(|| format!("无法加载 {}", args.input.display()))?;

    let cockpit = match api.run(&workbook, &params) {
        Ok(report) => report,
        Err(ApiError::ValidationFailed { errors }) => {
            eprintln!("数据质量校验未通过:");
            for error in &errors {
                eprintln!("  - {}", error);
            }
            return Ok(ExitCode::from(2));
        }
        Err(err) => return Err(err.into()),
    };

    // 4. 导出
    if let Some(path) = &args.summary_out {
        report::export_summary(path, &cockpit.enriched)?;
    }
    if let Some(path) = &args.detail_out {
        report::export_detail(path, &cockpit.result.detail)?;
    }

    // 5. 输出
    if args.json {
        println!("{}", serde_json::to_string_pretty(&cockpit)?);
    } else {
        print_cockpit(&cockpit, args.top);
    }

    Ok(ExitCode::SUCCESS)
}

fn print_cockpit(cockpit: &CockpitReport, top: usize) {
    let metrics = &cockpit.metrics;
    let weeks = &cockpit.result.weeks;

    if let (Some(first), Some(last)) = (weeks.first(), weeks.last()) {
        println!(
            "推演区间: {} ~ {}（{} 周，需求上浮 {:.0}%，供应延迟 {} 周）",
            first,
            last,
            weeks.len(),
            cockpit.params.demand_uplift_pct * 100.0,
            cockpit.params.supply_delay_weeks
        );
    }
    println!("风险收入合计: {:.2}", metrics.total_revenue_at_risk);
    println!("断货序列数: {}", metrics.skus_with_stockouts);
    match metrics.avg_fill_rate {
        Some(rate) => println!("平均满足率: {:.1}%", rate * 100.0),
        None => println!("平均满足率: -"),
    }
    println!("跌破安全库存序列数: {}", metrics.safety_breaches);

    if cockpit.actions.is_empty() {
        return;
    }

    println!();
    println!(
        "{:<16} {:<12} {:<10} {:>14} {:>8} {:>12}",
        "sku", "location", "action", "revenue@risk", "fill", "stockout"
    );
    for action in cockpit.actions.iter().take(top) {
        println!(
            "{:<16} {:<12} {:<10} {:>14.2} {:>7.1}% {:>12}",
            action.sku,
            action.location,
            action.recommendation.to_string(),
            action.revenue_at_risk,
            action.fill_rate * 100.0,
            action
                .first_stockout_week
                .map(|w| w.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }
}
