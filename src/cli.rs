use crate::core::{Mode, SimError};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "fwd-sim",
    about = "転送テーブルとパケットトレースからルーターの転送判定をシミュレートします",
    version
)]
pub struct Cli {
    /// パケット表示モード
    #[arg(short = 'p', overrides_with = "packet_print")]
    pub packet_print: bool,

    /// 転送テーブル表示モード
    #[arg(short = 'r', overrides_with = "table_print")]
    pub table_print: bool,

    /// シミュレーションモード
    #[arg(short = 's', overrides_with = "simulation")]
    pub simulation: bool,

    /// 転送テーブルファイル
    #[arg(short = 'f', value_name = "forward_file")]
    pub forward_file: Option<PathBuf>,

    /// トレースファイル
    #[arg(short = 't', value_name = "trace_file")]
    pub trace_file: Option<PathBuf>,
}

impl Cli {
    /// 引数の組み合わせを検証して実行モードを決める
    pub fn mode(&self) -> Result<Mode, SimError> {
        let selected = [self.packet_print, self.table_print, self.simulation]
            .into_iter()
            .filter(|&flag| flag)
            .count();

        match selected {
            0 => return Err(usage("no command line option given")),
            1 => {}
            _ => return Err(usage("only one option at a time allowed")),
        }

        if self.packet_print {
            let trace_file = self.trace_file.clone().ok_or_else(|| usage("-p requires -t trace_file"))?;
            return Ok(Mode::PrintTrace { trace_file });
        }

        if self.table_print {
            let forward_file = self.forward_file.clone().ok_or_else(|| usage("-r requires -f forward_file"))?;
            return Ok(Mode::PrintTable { forward_file });
        }

        match (&self.forward_file, &self.trace_file) {
            (Some(forward_file), Some(trace_file)) => Ok(Mode::Simulate {
                forward_file: forward_file.clone(),
                trace_file: trace_file.clone(),
            }),
            (None, None) => Err(usage("-s requires -f forward_file and -t trace_file")),
            (None, Some(_)) => Err(usage("-s requires -f forward_file")),
            (Some(_), None) => Err(usage("-s requires -t trace_file")),
        }
    }

    /// 選択したモードが使わないファイル指定（表示モードでのみ起こりうる）
    pub fn unused_file(&self) -> Option<&Path> {
        if self.packet_print {
            self.forward_file.as_deref()
        } else if self.table_print {
            self.trace_file.as_deref()
        } else {
            None
        }
    }
}

fn usage(message: &str) -> SimError {
    SimError::Usage(message.to_string())
}
