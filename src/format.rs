//! 各モードの出力行の組み立て

use crate::record::{ForwardingEntry, PacketRecord, Timestamp};
use crate::routing::Decision;
use std::net::Ipv4Addr;

/// ホストバイトオーダーのアドレスをドット区切り10進で表す
pub fn quad(addr: u32) -> String {
    Ipv4Addr::from(addr).to_string()
}

/// `<a>.<b>.<c>.<d> <prefix_len> <interface>`
pub fn table_line(entry: &ForwardingEntry) -> String {
    format!("{} {} {}", quad(entry.prefix), entry.prefix_len, entry.interface)
}

/// `<sec>.<usec> <src> <dst> <P|F> <ttl>`（TTLはキャプチャ時の値）
pub fn trace_line(packet: &PacketRecord) -> String {
    format!(
        "{} {} {} {} {}",
        packet.timestamp,
        quad(packet.src_addr),
        quad(packet.dst_addr),
        if packet.has_valid_checksum() { 'P' } else { 'F' },
        packet.ttl
    )
}

/// `<sec>.<usec> <action>`
pub fn decision_line(timestamp: &Timestamp, decision: &Decision) -> String {
    format!("{} {}", timestamp, decision)
}
