use crate::core::{LoggingConfig, SimError};
use env_logger::{Builder, Target};
use std::fs::File;
use std::io::Write;

pub fn setup_logger(config: &LoggingConfig) -> Result<(), SimError> {
    let mut builder = Builder::new();

    builder
        .filter_level(config.level)
        // タイムスタンプ付きのフォーマット
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        });

    // 標準出力は結果の出力に使うので、ログはファイルか標準エラーへ
    match &config.file {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| SimError::Logger(format!("{}: {}", path.display(), e)))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(Target::Stderr);
        }
    }

    builder
        .try_init()
        .map_err(|e| SimError::Logger(e.to_string()))
}
