// ==========================================
// 供应链风险驾驶舱 - 配置层
// ==========================================
// 职责: 系统配置管理（周起始日、默认单价、处置阈值、情景范围）
// 存储: JSON 键值文件
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigError, ConfigManager, ConfigResult, CONFIG_PATH_ENV};
