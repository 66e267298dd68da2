// ==========================================
// 供应链风险驾驶舱 - API层错误类型
// ==========================================
// 职责: 汇总导入层 / 引擎层错误，转换为调用方可读的错误消息
// ==========================================

use crate::engine::EngineError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    /// 工作簿未通过数据质量校验（不进入计算）
    #[error("数据质量校验未通过: {}", errors.join("; "))]
    ValidationFailed { errors: Vec<String> },

    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 下游层错误
    // ==========================================
    #[error("导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("计算失败: {0}")]
    Engine(#[from] EngineError),
}

impl ApiError {
    /// 数据质量错误明细（非校验错误时为空）
    pub fn validation_errors(&self) -> &[String] {
        match self {
            ApiError::ValidationFailed { errors } => errors,
            _ => &[],
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
