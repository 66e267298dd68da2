// ==========================================
// 供应链风险驾驶舱 - 导入层 Trait
// ==========================================
// 职责: 定义文件解析 / 数据校验接口（不包含实现）
// ==========================================

use crate::importer::error::ImportResult;
use crate::importer::raw_table::Workbook;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件 → 工作簿（表名 → 原始表）
// 实现者: ExcelParser, CsvDirectoryParser
pub trait FileParser: Send + Sync {
    /// 解析文件为工作簿
    ///
    /// # 参数
    /// - path: 文件（或目录）路径
    ///
    /// # 返回
    /// - Ok(Workbook): 全部工作表
    /// - Err: 文件读取错误、格式错误
    fn parse_workbook(&self, path: &Path) -> ImportResult<Workbook>;
}

// ==========================================
// DqValidator Trait
// ==========================================
// 用途: 结构 / 业务规则校验（计算前置条件）
// 实现者: DqValidatorImpl
pub trait DqValidator: Send + Sync {
    /// 校验工作簿
    ///
    /// # 返回
    /// - ValidationReport: is_valid + 有序错误信息列表
    ///
    /// # 说明
    /// - 纯函数，无副作用
    /// - 错误以列表形式收集，不抛出
    fn validate(&self, workbook: &Workbook) -> ValidationReport;
}

// ==========================================
// ValidationReport - 校验结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}
