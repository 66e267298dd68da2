// ==========================================
// 供应链风险驾驶舱 - API 层
// ==========================================
// 职责: 驾驶舱业务接口，供 CLI 及其他前端调用
// ==========================================

pub mod cockpit_api;
pub mod error;
pub mod validator;

// 重导出核心类型
pub use cockpit_api::{CockpitApi, CockpitReport};
pub use error::{ApiError, ApiResult};
pub use validator::validate_scenario;
