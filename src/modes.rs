use crate::core::{Mode, SimError, SimResult};
use crate::format::{decision_line, table_line, trace_line};
use crate::record::{ForwardingEntry, PacketRecord, RecordReader};
use crate::routing::{decide, Decision, ForwardingTable};
use log::info;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// シミュレーションの集計
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimulationSummary {
    pub sent: u64,
    pub sent_default: u64,
    pub dropped_checksum: u64,
    pub dropped_expired: u64,
    pub dropped_policy: u64,
    pub dropped_unknown: u64,
}

impl SimulationSummary {
    pub fn record(&mut self, decision: &Decision) {
        match decision {
            Decision::Send { .. } => self.sent += 1,
            Decision::SendDefault { .. } => self.sent_default += 1,
            Decision::DropChecksum => self.dropped_checksum += 1,
            Decision::DropExpired => self.dropped_expired += 1,
            Decision::DropPolicy => self.dropped_policy += 1,
            Decision::DropUnknown => self.dropped_unknown += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.sent + self.sent_default + self.dropped()
    }

    pub fn dropped(&self) -> u64 {
        self.dropped_checksum + self.dropped_expired + self.dropped_policy + self.dropped_unknown
    }
}

/// 選択されたモードを実行し、結果を`out`に書き出す
pub fn run<W: Write>(mode: &Mode, out: &mut W) -> SimResult<()> {
    match mode {
        Mode::PrintTable { forward_file } => {
            let count = print_table(open_file(forward_file)?, out)?;
            info!("{}件の転送テーブルエントリを表示しました", count);
        }
        Mode::PrintTrace { trace_file } => {
            let count = print_trace(open_file(trace_file)?, out)?;
            info!("{}件のパケットを表示しました", count);
        }
        Mode::Simulate {
            forward_file,
            trace_file,
        } => {
            let table = ForwardingTable::load(open_file(forward_file)?)?;
            let summary = simulate(&table, open_file(trace_file)?, out)?;
            info!(
                "シミュレーション完了: {}件 (転送 {}, デフォルト {}, 破棄 {})",
                summary.total(),
                summary.sent,
                summary.sent_default,
                summary.dropped()
            );
        }
    }
    out.flush()?;
    Ok(())
}

pub fn open_file(path: &Path) -> SimResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| SimError::FileOpen {
            path: path.to_path_buf(),
            source,
        })
}

/// テーブルを構築せず、レコードを読んだ順にそのまま表示する
pub fn print_table<R: Read, W: Write>(reader: R, out: &mut W) -> SimResult<u64> {
    let mut count = 0;
    for entry in RecordReader::<R, ForwardingEntry>::new(reader) {
        writeln!(out, "{}", table_line(&entry?))?;
        count += 1;
    }
    Ok(count)
}

pub fn print_trace<R: Read, W: Write>(reader: R, out: &mut W) -> SimResult<u64> {
    let mut count = 0;
    for packet in RecordReader::<R, PacketRecord>::new(reader) {
        writeln!(out, "{}", trace_line(&packet?))?;
        count += 1;
    }
    Ok(count)
}

/// パケットを一件ずつ判定し、判定結果を一行ずつ書き出す
pub fn simulate<R: Read, W: Write>(
    table: &ForwardingTable,
    reader: R,
    out: &mut W,
) -> SimResult<SimulationSummary> {
    let mut summary = SimulationSummary::default();
    for packet in RecordReader::<R, PacketRecord>::new(reader) {
        let packet = packet?;
        let decision = decide(&packet, table);
        writeln!(out, "{}", decision_line(&packet.timestamp, &decision))?;
        summary.record(&decision);
    }
    Ok(summary)
}
