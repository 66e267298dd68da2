// ==========================================
// 供应链风险驾驶舱 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、快照
// 存储: JSON 键值文件（{"key": value}），文件不存在时全部走默认值
// 路径: SUPPLY_RISK_CONFIG 环境变量 > <config_dir>/supply-chain-risk/config.json
// ==========================================

use crate::domain::scenario::{ScenarioLimits, ScenarioParams};
use crate::domain::types::parse_weekday;
use crate::engine::enrichment::{DEFAULT_UNIT_COGS, DEFAULT_UNIT_REVENUE};
use crate::engine::recommendation::{DEFAULT_PROMO_COVER_MULTIPLE, DEFAULT_PROMO_MIN_POH};
use chrono::Weekday;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "SUPPLY_RISK_CONFIG";

// ==========================================
// ConfigError - 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("配置文件格式错误 {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("配置文件顶层必须是 JSON 对象: {0}")]
    NotAnObject(PathBuf),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: BTreeMap<String, String>,
}

impl ConfigManager {
    /// 空配置（全部默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 文件加载
    ///
    /// # 参数
    /// - path: 配置文件路径（不存在时返回空配置）
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Ok(Self::new());
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: Value = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let object = match parsed {
            Value::Object(map) => map,
            _ => return Err(ConfigError::NotAnObject(path.to_path_buf())),
        };

        // 数值/布尔统一转为字符串，由类型化 getter 解析
        let values = object
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key, s)),
                Value::Null => None,
                other => Some((key, other.to_string())),
            })
            .collect();

        tracing::info!(path = %path.display(), "配置文件已加载");
        Ok(Self { values })
    }

    /// 从默认路径加载
    pub fn load_default() -> ConfigResult<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::new()),
        }
    }

    /// 默认配置文件路径
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        dirs::config_dir().map(|dir| dir.join("supply-chain-risk").join("config.json"))
    }

    /// 覆写单项配置（内存中）
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// 读取配置原值
    pub fn get_global_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.as_str())
    }

    /// 生效配置（含默认值），按键排序
    ///
    /// # 用途
    /// - 写入 CockpitReport.config，随 `--json` 输出，便于复核口径
    pub fn effective_values(&self) -> BTreeMap<String, String> {
        let limits = self.get_scenario_limits();
        [
            (config_keys::WEEK_START_WEEKDAY, format!("{:?}", self.get_week_start())),
            (config_keys::DEFAULT_HORIZON_WEEKS, self.get_default_horizon_weeks().to_string()),
            (config_keys::DEFAULT_UNIT_REVENUE, self.get_default_unit_revenue().to_string()),
            (config_keys::DEFAULT_UNIT_COGS, self.get_default_unit_cogs().to_string()),
            (config_keys::PROMO_COVER_MULTIPLE, self.get_promo_cover_multiple().to_string()),
            (config_keys::PROMO_MIN_POH, self.get_promo_min_poh().to_string()),
            (config_keys::MAX_DEMAND_UPLIFT_PCT, limits.max_demand_uplift_pct.to_string()),
            (config_keys::MAX_SUPPLY_DELAY_WEEKS, limits.max_supply_delay_weeks.to_string()),
            (config_keys::MIN_HORIZON_WEEKS, limits.min_horizon_weeks.to_string()),
            (config_keys::MAX_HORIZON_WEEKS, limits.max_horizon_weeks.to_string()),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
    }

    /// 获取所有配置的快照（JSON格式，含默认值）
    pub fn get_config_snapshot(&self) -> String {
        serde_json::to_string(&self.effective_values()).unwrap_or_else(|_| "{}".to_string())
    }

    /// 解析数值配置，格式错误时告警并回退默认值
    fn parse_or<T: FromStr + Copy>(&self, key: &str, default: T) -> T {
        match self.values.get(key) {
            None => default,
            Some(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
                tracing::warn!(key, value = %raw, "配置值格式错误，使用默认值");
                default
            }),
        }
    }

    // ===== 日历 =====

    /// 周起始日（默认周一）
    pub fn get_week_start(&self) -> Weekday {
        match self.values.get(config_keys::WEEK_START_WEEKDAY) {
            None => Weekday::Mon,
            Some(raw) => parse_weekday(raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "week_start_weekday 无法识别，使用周一");
                Weekday::Mon
            }),
        }
    }

    // ===== 情景 =====

    pub fn get_default_horizon_weeks(&self) -> u32 {
        self.parse_or(config_keys::DEFAULT_HORIZON_WEEKS, ScenarioParams::default().horizon_weeks)
    }

    /// 默认情景参数（仅推演周数可配置）
    pub fn get_default_scenario(&self) -> ScenarioParams {
        ScenarioParams::default().with_horizon(self.get_default_horizon_weeks())
    }

    pub fn get_scenario_limits(&self) -> ScenarioLimits {
        let defaults = ScenarioLimits::default();
        ScenarioLimits {
            max_demand_uplift_pct: self
                .parse_or(config_keys::MAX_DEMAND_UPLIFT_PCT, defaults.max_demand_uplift_pct),
            max_supply_delay_weeks: self
                .parse_or(config_keys::MAX_SUPPLY_DELAY_WEEKS, defaults.max_supply_delay_weeks),
            min_horizon_weeks: self.parse_or(config_keys::MIN_HORIZON_WEEKS, defaults.min_horizon_weeks),
            max_horizon_weeks: self.parse_or(config_keys::MAX_HORIZON_WEEKS, defaults.max_horizon_weeks),
        }
    }

    // ===== 主数据默认单价 =====

    pub fn get_default_unit_revenue(&self) -> f64 {
        self.parse_or(config_keys::DEFAULT_UNIT_REVENUE, DEFAULT_UNIT_REVENUE)
    }

    pub fn get_default_unit_cogs(&self) -> f64 {
        self.parse_or(config_keys::DEFAULT_UNIT_COGS, DEFAULT_UNIT_COGS)
    }

    // ===== 处置建议 =====

    pub fn get_promo_cover_multiple(&self) -> f64 {
        self.parse_or(config_keys::PROMO_COVER_MULTIPLE, DEFAULT_PROMO_COVER_MULTIPLE)
    }

    pub fn get_promo_min_poh(&self) -> f64 {
        self.parse_or(config_keys::PROMO_MIN_POH, DEFAULT_PROMO_MIN_POH)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 日历
    pub const WEEK_START_WEEKDAY: &str = "week_start_weekday";

    // 情景
    pub const DEFAULT_HORIZON_WEEKS: &str = "default_horizon_weeks";
    pub const MAX_DEMAND_UPLIFT_PCT: &str = "max_demand_uplift_pct";
    pub const MAX_SUPPLY_DELAY_WEEKS: &str = "max_supply_delay_weeks";
    pub const MIN_HORIZON_WEEKS: &str = "min_horizon_weeks";
    pub const MAX_HORIZON_WEEKS: &str = "max_horizon_weeks";

    // 主数据默认单价
    pub const DEFAULT_UNIT_REVENUE: &str = "default_unit_revenue";
    pub const DEFAULT_UNIT_COGS: &str = "default_unit_cogs";

    // 处置建议
    pub const PROMO_COVER_MULTIPLE: &str = "promo_cover_multiple";
    pub const PROMO_MIN_POH: &str = "promo_min_poh";
}
