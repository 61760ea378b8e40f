use super::WireRecord;
use bytes::Buf;
use std::net::Ipv4Addr;

/// デフォルトルートを表すプレフィックス（0.0.0.0）
pub const DEFAULT_ROUTE_PREFIX: u32 = 0;
/// ヌルルート（宛先のパケットは黙って破棄）を表すインターフェース
pub const NULL_INTERFACE: u16 = 0;

// 0                   1                   2                   3
// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                            Prefix                             |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |         Prefix Length         |           Interface           |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardingEntry {
    pub prefix: u32,
    pub prefix_len: u16,
    pub interface: u16,
}

impl ForwardingEntry {
    pub fn new(prefix: u32, prefix_len: u16, interface: u16) -> Self {
        Self {
            prefix,
            prefix_len,
            interface,
        }
    }

    pub fn is_default_route(&self) -> bool {
        self.prefix == DEFAULT_ROUTE_PREFIX
    }

    pub fn is_null_route(&self) -> bool {
        self.interface == NULL_INTERFACE
    }

    /// 照合に使う上位8ビット
    pub fn key(&self) -> u8 {
        (self.prefix >> 24) as u8
    }

    pub fn address(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.prefix)
    }
}

impl WireRecord for ForwardingEntry {
    const SIZE: usize = 8;
    const NAME: &'static str = "転送テーブル";

    fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < Self::SIZE {
            return None;
        }

        let mut buf = &data[..Self::SIZE];
        let prefix = buf.get_u32();
        let prefix_len = buf.get_u16();
        let interface = buf.get_u16();

        Some(Self::new(prefix, prefix_len, interface))
    }
}
