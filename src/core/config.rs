use crate::core::SimError;
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

pub const LOG_LEVEL_VAR: &str = "FWD_SIM_LOG_LEVEL";
pub const LOG_FILE_VAR: &str = "FWD_SIM_LOG_FILE";

/// 起動時に一度だけ組み立て、各処理へ明示的に渡す実行設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub mode: Mode,
    pub logging: LoggingConfig,
}

/// 実行モード（同時に選べるのは一つだけ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// 転送テーブルのレコードをテキストで表示
    PrintTable { forward_file: PathBuf },
    /// トレースファイルのパケットをテキストで表示
    PrintTrace { trace_file: PathBuf },
    /// 転送テーブルを構築し、各パケットの処理結果を出力
    Simulate {
        forward_file: PathBuf,
        trace_file: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: LevelFilter,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Warn,
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Result<Self, SimError> {
        // .envが無くてもエラーにはしない
        dotenv::dotenv().ok();

        Self::from_values(
            std::env::var(LOG_LEVEL_VAR).ok(),
            std::env::var(LOG_FILE_VAR).ok(),
        )
    }

    fn from_values(level: Option<String>, file: Option<String>) -> Result<Self, SimError> {
        let level = match level {
            Some(value) => LevelFilter::from_str(value.trim()).map_err(|_| {
                SimError::Config(format!("無効なログレベル: {}={}", LOG_LEVEL_VAR, value))
            })?,
            None => LevelFilter::Warn,
        };

        let file = file
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self { level, file })
    }
}
