// ==========================================
// 供应链风险驾驶舱 - 领域模型层
// ==========================================
// 职责: 定义输入记录、推演结果、情景参数等领域类型
// 红线: 不含文件解析逻辑,不含引擎逻辑
// ==========================================

pub mod projection;
pub mod records;
pub mod scenario;
pub mod types;

// 重导出核心类型
pub use projection::{
    ActionItem, EnrichedSummaryRow, ExecutiveMetrics, KpiResult, ProjectionRow, SummaryRow,
};
pub use records::{DemandRecord, InventoryRecord, MasterDataRecord, SupplyRecord};
pub use scenario::{ScenarioLimits, ScenarioParams};
pub use types::{Recommendation, SeriesKey};
