use std::net::Ipv4Addr;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("ファイルを開けません: {}: {}", .path.display(), .source)]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{what}の読み込み中にエラーが発生しました: {source}")]
    Read {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("重複したルートが転送テーブルにあります: {0}")]
    DuplicateRoute(Ipv4Addr),

    #[error("出力エラー: {0}")]
    Output(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ロガーのセットアップに失敗しました: {0}")]
    Logger(String),
}

impl SimError {
    /// 書き込み先が閉じられただけかどうか（`| head` など）
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, SimError::Output(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }
}

pub type SimResult<T> = Result<T, SimError>;
