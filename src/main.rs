use clap::{CommandFactory, Parser};
use fwd_sim::cli::Cli;
use fwd_sim::core::{Configuration, LoggingConfig, SimError, SimResult};
use fwd_sim::modes;
use fwd_sim::setup_logger::setup_logger;
use log::warn;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help / --version もここを通る
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        // 出力先が先に閉じられた場合（`| head` など）
        Err(e) if e.is_broken_pipe() => ExitCode::SUCCESS,
        Err(SimError::Usage(message)) => {
            // 標準エラーが閉じられていても診断の失敗は無視する
            let mut stderr = io::stderr().lock();
            let _ = writeln!(stderr, "error: {}", message);
            let _ = writeln!(stderr, "{}", Cli::command().render_help());
            ExitCode::FAILURE
        }
        Err(e) => {
            let _ = writeln!(io::stderr(), "error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> SimResult<()> {
    let config = Configuration {
        mode: cli.mode()?,
        logging: LoggingConfig::from_env()?,
    };
    setup_logger(&config.logging)?;

    if let Some(path) = cli.unused_file() {
        warn!("このモードでは使わないファイルが指定されました: {}", path.display());
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    modes::run(&config.mode, &mut out)
}
