// ==========================================
// 供应链风险驾驶舱 - 导入层
// ==========================================
// 职责: 外部表格数据加载、校验、映射为强类型记录
// 支持: Excel, CSV, CSV 目录
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod raw_table;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use dq_validator::DqValidator as DqValidatorImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvDirectoryParser, CsvParser, ExcelParser, UniversalFileParser};
pub use raw_table::{sheet_names, RawTable, Workbook};

// 重导出 Trait 接口
pub use importer_trait::{DqValidator, FileParser, ValidationReport};
