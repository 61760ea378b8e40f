use crate::core::{SimError, SimResult};
use crate::record::{ForwardingEntry, RecordReader};
use log::{debug, info, warn};
use std::collections::{BTreeMap, HashSet};
use std::io::Read;

/// 宛先アドレスの上位8ビットで引く転送テーブル
///
/// 構築後は読み取り専用。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardingTable {
    routes: BTreeMap<u8, ForwardingEntry>,
    default_interface: Option<u16>,
}

impl ForwardingTable {
    /// デコード済みのエントリ列からテーブルを構築する
    pub fn from_entries<I>(entries: I) -> SimResult<Self>
    where
        I: IntoIterator<Item = ForwardingEntry>,
    {
        let mut builder = TableBuilder::new();
        for entry in entries {
            builder.add(entry)?;
        }
        Ok(builder.build())
    }

    /// 転送テーブルファイルの内容を読み込んで構築する
    pub fn load<R: Read>(reader: R) -> SimResult<Self> {
        let mut builder = TableBuilder::new();
        for entry in RecordReader::<R, ForwardingEntry>::new(reader) {
            builder.add(entry?)?;
        }
        let table = builder.build();
        info!(
            "転送テーブルを読み込みました: {}件のルート, デフォルト: {:?}",
            table.len(),
            table.default_interface()
        );
        Ok(table)
    }

    pub fn lookup(&self, addr: u32) -> Option<&ForwardingEntry> {
        self.routes.get(&route_key(addr))
    }

    pub fn default_interface(&self) -> Option<u16> {
        self.default_interface
    }

    /// 上位8ビットで畳み込んだ後のルート数
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// 照合に使う上位8ビット
pub fn route_key(addr: u32) -> u8 {
    (addr >> 24) as u8
}

#[derive(Debug, Default)]
pub struct TableBuilder {
    table: ForwardingTable,
    seen: HashSet<u32>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: ForwardingEntry) -> SimResult<()> {
        if entry.is_default_route() {
            // 複数ある場合は後勝ち
            if let Some(previous) = self.table.default_interface {
                warn!(
                    "デフォルトルートが複数あります: インターフェース{}を{}で上書きします",
                    previous, entry.interface
                );
            }
            self.table.default_interface = Some(entry.interface);
            return Ok(());
        }

        if !self.seen.insert(entry.prefix) {
            return Err(SimError::DuplicateRoute(entry.address()));
        }

        if let Some(replaced) = self.table.routes.insert(entry.key(), entry) {
            debug!(
                "上位8ビットが同じルートを上書きしました: {} -> {}",
                replaced.address(),
                entry.address()
            );
        }
        Ok(())
    }

    pub fn build(self) -> ForwardingTable {
        self.table
    }
}
