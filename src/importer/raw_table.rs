// ==========================================
// 供应链风险驾驶舱 - 原始表结构
// ==========================================
// 职责: 文件解析后的中间表示（表头 + 行记录 HashMap<列名, 值>）
// ==========================================

use std::collections::{BTreeMap, HashMap};

/// 工作簿: 表名 → 原始表
pub type Workbook = BTreeMap<String, RawTable>;

// 表名常量
pub mod sheet_names {
    pub const INVENTORY: &str = "Inventory";
    pub const DEMAND_PLAN: &str = "Demand_Plan";
    pub const SUPPLY_PLAN: &str = "Supply_Plan";
    pub const MASTER_DATA: &str = "Master_Data";
}

/// 原始表（全部单元格以去空白后的字符串保存）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// 由表头与行值构造（行值按表头顺序，多余值忽略）
    pub fn from_rows(name: &str, headers: &[&str], rows: &[Vec<&str>]) -> Self {
        let mut table = Self::new(name, headers.iter().map(|h| h.to_string()).collect());
        for values in rows {
            table.push_values(values.iter().map(|v| v.to_string()).collect());
        }
        table
    }

    /// 追加一行（按表头位置对齐），完全空白行跳过
    pub fn push_values(&mut self, values: Vec<String>) {
        let mut row_map = HashMap::new();
        for (col_idx, value) in values.into_iter().enumerate() {
            if let Some(header) = self.headers.get(col_idx) {
                row_map.insert(header.clone(), value.trim().to_string());
            }
        }

        if row_map.values().all(|v| v.is_empty()) {
            return;
        }

        self.rows.push(row_map);
    }

    /// 无数据行即视为空表
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// 按列取值（列缺失或单元格缺失时返回 None）
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = Option<&'a str>> + 'a {
        self.rows
            .iter()
            .map(move |row| row.get(column).map(|v| v.as_str()))
    }
}
