// ==========================================
// 供应链风险驾驶舱 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls, 全部工作表) / CSV (.csv, 单表) / CSV 目录（每个文件一张表）
// 说明: 只提供纯加载函数，缓存策略由调用方决定
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use crate::importer::raw_table::{RawTable, Workbook};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveTime;
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 解析单个 CSV 文件为原始表（表名取文件名主干）
    pub fn parse_table(&self, path: &Path) -> ImportResult<RawTable> {
        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = extension_of(path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut table = RawTable::new(name, headers);
        for result in reader.records() {
            let record = result?;
            table.push_values(record.iter().map(|v| v.to_string()).collect());
        }

        tracing::debug!(sheet = %table.name, rows = table.len(), "CSV 表解析完成");
        Ok(table)
    }
}

// ==========================================
// CSV 目录 Parser 实现
// ==========================================
// 目录下每个 <Sheet>.csv 对应一张表
pub struct CsvDirectoryParser;

impl FileParser for CsvDirectoryParser {
    fn parse_workbook(&self, path: &Path) -> ImportResult<Workbook> {
        if !path.is_dir() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let mut entries: Vec<_> = std::fs::read_dir(path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && extension_of(p) == "csv")
            .collect();
        entries.sort();

        let parser = CsvParser;
        let mut workbook = Workbook::new();
        for file_path in entries {
            let table = parser.parse_table(&file_path)?;
            workbook.insert(table.name.clone(), table);
        }

        Ok(workbook)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_workbook(&self, path: &Path) -> ImportResult<Workbook> {
        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = extension_of(path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut excel = open_workbook_auto(path)?;

        let sheet_names = excel.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::ExcelParseError("Excel 文件无工作表".to_string()));
        }

        let mut workbook = Workbook::new();
        for sheet_name in sheet_names {
            let range = excel.worksheet_range(&sheet_name)?;

            // 提取表头（第一行），无表头视为空表
            let mut rows = range.rows();
            let headers: Vec<String> = match rows.next() {
                Some(header_row) => header_row
                    .iter()
                    .map(|cell| cell_to_string(cell).trim().to_string())
                    .collect(),
                None => Vec::new(),
            };

            let mut table = RawTable::new(sheet_name.clone(), headers);
            for data_row in rows {
                table.push_values(data_row.iter().map(cell_to_string).collect());
            }

            tracing::debug!(sheet = %sheet_name, rows = table.len(), "工作表解析完成");
            workbook.insert(sheet_name, table);
        }

        Ok(workbook)
    }
}

/// 单元格 → 字符串（日期单元格输出 YYYY-MM-DD）
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) if value.time() == NaiveTime::MIN => {
                value.date().format("%Y-%m-%d").to_string()
            }
            Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
        other => other.to_string(),
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    /// 加载工作簿
    ///
    /// - 目录: 按 CSV 目录解析
    /// - .xlsx/.xls: 解析全部工作表
    /// - .csv: 单表，表名取文件名主干
    pub fn load<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Workbook> {
        let path = file_path.as_ref();
        if path.is_dir() {
            return CsvDirectoryParser.parse_workbook(path);
        }

        match extension_of(path).as_str() {
            "csv" => {
                let table = CsvParser.parse_table(path)?;
                let mut workbook = Workbook::new();
                workbook.insert(table.name.clone(), table);
                Ok(workbook)
            }
            "xlsx" | "xls" => ExcelParser.parse_workbook(path),
            ext => Err(ImportError::UnsupportedFormat(ext.to_string())),
        }
    }
}
