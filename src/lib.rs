// ==========================================
// 供应链风险驾驶舱 - 核心库
// ==========================================
// 技术栈: Rust + calamine/csv + tracing
// 系统定位: 决策支持（库存递推 + 断货/安全库存风险 + 处置建议）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与结果类型
pub mod domain;

// 导入层 - 外部表格
pub mod importer;

// 引擎层 - KPI 计算
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 报表导出
pub mod report;

// API 层 - 驾驶舱接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    ActionItem, DemandRecord, EnrichedSummaryRow, ExecutiveMetrics, InventoryRecord, KpiResult,
    MasterDataRecord, ProjectionRow, Recommendation, ScenarioLimits, ScenarioParams, SeriesKey,
    SummaryRow, SupplyRecord,
};

// 引擎
pub use engine::{KpiEngine, MasterDataEnricher, RecommendationEngine};

// API
pub use api::{CockpitApi, CockpitReport};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "供应链风险驾驶舱";
