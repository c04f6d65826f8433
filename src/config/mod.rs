use crate::core::calculator::calendar::{DEFAULT_HOLIDAYS, HolidayCalendar};
use crate::core::calculator::payroll::{
    DEFAULT_OVERTIME_THRESHOLD_HOURS, NegativeDurationPolicy, OvertimeMode, PayrollPolicy,
};
use crate::errors::{AppError, AppResult};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_rest_day")]
    pub rest_day: String,
    #[serde(default = "default_holidays")]
    pub holidays: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holidays_file: Option<String>,
    #[serde(default = "default_overtime_threshold")]
    pub overtime_threshold_hours: f64,
    #[serde(default)]
    pub overtime_mode: OvertimeMode,
    #[serde(default)]
    pub negative_durations: NegativeDurationPolicy,
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

fn default_rest_day() -> String {
    "Sun".to_string()
}
fn default_holidays() -> Vec<String> {
    DEFAULT_HOLIDAYS.iter().map(|d| d.to_string()).collect()
}
fn default_overtime_threshold() -> f64 {
    DEFAULT_OVERTIME_THRESHOLD_HOURS
}
fn default_search_limit() -> usize {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            rest_day: default_rest_day(),
            holidays: default_holidays(),
            holidays_file: None,
            overtime_threshold_hours: default_overtime_threshold(),
            overtime_mode: OvertimeMode::default(),
            negative_durations: NegativeDurationPolicy::default(),
            search_limit: default_search_limit(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.qrattend`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".qrattend")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("qrattend.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("qrattend.sqlite")
    }

    /// Load configuration from the default file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), ?cfg, "loaded configuration");
        Ok(cfg)
    }

    /// Write the configuration file (creating the directory) and an empty DB file.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }

    pub fn rest_weekday(&self) -> AppResult<Weekday> {
        self.rest_day
            .trim()
            .parse::<Weekday>()
            .map_err(|_| AppError::Config(format!("invalid rest_day: {}", self.rest_day)))
    }

    /// Build the holiday calendar from `rest_day`, `holidays` and `holidays_file`.
    pub fn calendar(&self) -> AppResult<HolidayCalendar> {
        let mut dates = self.holidays.clone();

        if let Some(file) = &self.holidays_file {
            let content = fs::read_to_string(file)
                .map_err(|e| AppError::Config(format!("cannot read holidays_file {file}: {e}")))?;
            let extra: Vec<String> = serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("invalid holidays_file {file}: {e}")))?;
            dates.extend(extra);
        }

        Ok(HolidayCalendar::from_date_strings(
            self.rest_weekday()?,
            dates,
        ))
    }

    pub fn payroll_policy(&self) -> PayrollPolicy {
        PayrollPolicy {
            overtime_threshold_hours: self.overtime_threshold_hours,
            overtime_mode: self.overtime_mode,
            negative_durations: self.negative_durations,
        }
    }
}
