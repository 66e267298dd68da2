// ==========================================
// 供应链风险驾驶舱 - 数据清洗器实现
// ==========================================
// 职责: TRIM / 数值宽松转换 / 日期解析
// 口径:
// - 非数值按 0 处理（宽松口径，不视为失败）
// - 不识别千分位 / 小数逗号，"1,5" 与 "1,000" 均视为非数值
// - 斜杠日期先按 年/月/日，再按 月/日/年（Excel 导出的 CSV 常见写法）
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};

pub struct DataCleaner;

// 支持的日期格式
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

impl DataCleaner {
    /// 标准化键字段（TRIM）
    pub fn normalize_key(&self, value: Option<&str>) -> String {
        value.map(|v| v.trim().to_string()).unwrap_or_default()
    }

    /// 空白 → None
    pub fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 尝试解析数值（空白 / 非数值 / 非有限值 → None）
    pub fn parse_f64(&self, value: Option<&str>) -> Option<f64> {
        self.normalize_null(value)
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    /// 宽松数值转换（无法解析时取 0）
    pub fn coerce_f64(&self, value: Option<&str>) -> f64 {
        self.parse_f64(value).unwrap_or(0.0)
    }

    /// 解析日期
    ///
    /// # 返回
    /// - Ok(None): 空白
    /// - Ok(Some(date)): 解析成功（带时间部分时取日期）
    /// - Err(value): 非空且无法解析，返回原值
    pub fn parse_date(&self, value: Option<&str>) -> Result<Option<NaiveDate>, String> {
        let trimmed = match self.normalize_null(value) {
            None => return Ok(None),
            Some(v) => v,
        };

        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(&trimmed, fmt) {
                return Ok(Some(date));
            }
        }

        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(&trimmed, fmt) {
                return Ok(Some(dt.date()));
            }
        }

        Err(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_key(Some("  DC1  ")), "DC1");
        assert_eq!(cleaner.normalize_key(None), "");
    }

    #[test]
    fn test_coerce_f64_lenient() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.coerce_f64(Some("12.5")), 12.5);
        assert_eq!(cleaner.coerce_f64(Some("1e3")), 1000.0);
        assert_eq!(cleaner.coerce_f64(Some("abc")), 0.0);
        assert_eq!(cleaner.coerce_f64(Some("")), 0.0);
        assert_eq!(cleaner.coerce_f64(Some("NaN")), 0.0);
        assert_eq!(cleaner.coerce_f64(None), 0.0);
        assert_eq!(cleaner.coerce_f64(Some("-3")), -3.0);
    }

    #[test]
    fn test_comma_numbers_are_not_numeric() {
        let cleaner = DataCleaner;
        // 小数逗号不能被当作千分位放大
        assert_eq!(cleaner.coerce_f64(Some("1,5")), 0.0);
        assert_eq!(cleaner.coerce_f64(Some("1,000")), 0.0);
        assert_eq!(cleaner.parse_f64(Some("-2,5")), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let cleaner = DataCleaner;
        let expected = NaiveDate::from_ymd_opt(2026, 1, 19).unwrap();

        assert_eq!(cleaner.parse_date(Some("2026-01-19")), Ok(Some(expected)));
        assert_eq!(cleaner.parse_date(Some("20260119")), Ok(Some(expected)));
        assert_eq!(cleaner.parse_date(Some("2026/01/19")), Ok(Some(expected)));
        assert_eq!(
            cleaner.parse_date(Some("2026-01-19 00:00:00")),
            Ok(Some(expected))
        );
        assert_eq!(cleaner.parse_date(Some("1/19/2026")), Ok(Some(expected)));
        assert_eq!(cleaner.parse_date(Some("01/19/2026")), Ok(Some(expected)));
        assert_eq!(
            cleaner.parse_date(Some("1/19/2026 0:00")),
            Ok(Some(expected))
        );
        assert_eq!(cleaner.parse_date(Some(" ")), Ok(None));
        assert_eq!(cleaner.parse_date(None), Ok(None));
    }

    #[test]
    fn test_parse_date_invalid() {
        let cleaner = DataCleaner;
        assert_eq!(
            cleaner.parse_date(Some("not-a-date")),
            Err("not-a-date".to_string())
        );
        assert!(cleaner.parse_date(Some("2026-02-30")).is_err());
        // 日/月/年 不识别（19 不是月份）
        assert!(cleaner.parse_date(Some("19/1/2026")).is_err());
    }
}
