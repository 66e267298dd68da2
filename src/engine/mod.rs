// ==========================================
// 供应链风险驾驶舱 - 引擎层
// ==========================================
// 职责: KPI 递推计算 + 主数据关联 + 处置建议
// 红线: 引擎不做文件 I/O，不读配置文件，输入输出均为领域类型
// ==========================================

pub mod enrichment;
pub mod error;
pub mod grid;
pub mod kpi;
pub mod projection;
pub mod recommendation;
pub mod scenario;
pub mod summary;

// 重导出核心引擎
pub use enrichment::MasterDataEnricher;
pub use error::{EngineError, EngineResult};
pub use grid::{snap_to_week_start, Grid, SeriesGrid};
pub use kpi::KpiEngine;
pub use projection::{project_series, SeriesState, WeekOutcome};
pub use recommendation::{executive_metrics, RecommendationEngine};
pub use summary::summarize_series;
