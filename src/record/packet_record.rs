use super::WireRecord;
use bytes::Buf;
use std::fmt;
use std::net::Ipv4Addr;

/// 正常なパケットであることを示すチェックサム欄の値
pub const VALID_CHECKSUM: u16 = 1234;

const TIMESTAMP_SIZE: usize = 8;
const IP_HEADER_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub seconds: u32,
    pub microseconds: u32,
}

impl Timestamp {
    pub fn new(seconds: u32, microseconds: u32) -> Self {
        Self {
            seconds,
            microseconds,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:06}", self.seconds, self.microseconds)
    }
}

/// トレースファイルのパケット1件
///
/// キャプチャ時刻の後にIPv4ヘッダーが続く。判定に使わないヘッダー欄は読み飛ばす。
///
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Seconds                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                       Microseconds                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |Version|  IHL  |Type of Service|          Total Length         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |         Identification        |Flags|      Fragment Offset    |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  Time to Live |    Protocol   |         Header Checksum       |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                       Source Address                          |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                    Destination Address                        |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketRecord {
    pub timestamp: Timestamp,
    pub src_addr: u32,
    pub dst_addr: u32,
    pub checksum_marker: u16,
    pub ttl: u8,
}

impl PacketRecord {
    pub fn has_valid_checksum(&self) -> bool {
        self.checksum_marker == VALID_CHECKSUM
    }

    pub fn source(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.src_addr)
    }

    pub fn destination(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.dst_addr)
    }
}

impl WireRecord for PacketRecord {
    const SIZE: usize = TIMESTAMP_SIZE + IP_HEADER_SIZE;
    const NAME: &'static str = "トレースファイル";

    fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < Self::SIZE {
            return None;
        }

        let mut buf = &data[..Self::SIZE];
        let timestamp = Timestamp::new(buf.get_u32(), buf.get_u32());

        // Version/IHL, ToS, Total Length, Identification, Flags/Fragment Offset
        buf.advance(8);
        let ttl = buf.get_u8();
        // Protocol
        buf.advance(1);
        let checksum_marker = buf.get_u16();
        let src_addr = buf.get_u32();
        let dst_addr = buf.get_u32();

        Some(Self {
            timestamp,
            src_addr,
            dst_addr,
            checksum_marker,
            ttl,
        })
    }
}
