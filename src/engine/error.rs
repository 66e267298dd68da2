// ==========================================
// 供应链风险驾驶舱 - 引擎错误类型
// ==========================================
// 口径: 引擎仅在无法计算的输入上失败，返回单一描述性错误，不产生部分结果
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("推演周数必须 >= 1，实际 {0}")]
    InvalidHorizon(u32),

    #[error("情景参数 {name} 不是有限数值: {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },

    #[error("日期越界: {0}")]
    DateOutOfRange(String),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
