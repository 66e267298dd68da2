// ==========================================
// 供应链风险驾驶舱 - 领域类型定义
// ==========================================
// 职责: 序列键、处置建议、周起始日等基础类型
// ==========================================

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 序列键 (SKU × 库位)
// ==========================================
// 排序: 先 sku 后 location（与输出顺序一致）
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    pub sku: String,
    pub location: String,
}

impl SeriesKey {
    pub fn new(sku: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            location: location.into(),
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.sku, self.location)
    }
}

// ==========================================
// 处置建议 (Recommendation)
// ==========================================
// 优先级: EXPEDITE > REPLENISH > PROMO > OK
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Expedite,  // 断货: 加急补货
    Replenish, // 跌破安全库存: 补货
    Promo,     // 库存远超安全库存: 促销去化
    Ok,        // 正常
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Expedite => write!(f, "EXPEDITE"),
            Recommendation::Replenish => write!(f, "REPLENISH"),
            Recommendation::Promo => write!(f, "PROMO"),
            Recommendation::Ok => write!(f, "OK"),
        }
    }
}

// ==========================================
// 周起始日解析
// ==========================================

/// 解析周起始日配置值（MON / MONDAY / 0 均可）
pub fn parse_weekday(value: &str) -> Option<Weekday> {
    match value.trim().to_uppercase().as_str() {
        "MON" | "MONDAY" | "0" => Some(Weekday::Mon),
        "TUE" | "TUESDAY" | "1" => Some(Weekday::Tue),
        "WED" | "WEDNESDAY" | "2" => Some(Weekday::Wed),
        "THU" | "THURSDAY" | "3" => Some(Weekday::Thu),
        "FRI" | "FRIDAY" | "4" => Some(Weekday::Fri),
        "SAT" | "SATURDAY" | "5" => Some(Weekday::Sat),
        "SUN" | "SUNDAY" | "6" => Some(Weekday::Sun),
        _ => None,
    }
}

/// 周起始日的英文复数名称（用于校验错误信息，如 "Mondays"）
pub fn weekday_plural(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mondays",
        Weekday::Tue => "Tuesdays",
        Weekday::Wed => "Wednesdays",
        Weekday::Thu => "Thursdays",
        Weekday::Fri => "Fridays",
        Weekday::Sat => "Saturdays",
        Weekday::Sun => "Sundays",
    }
}
