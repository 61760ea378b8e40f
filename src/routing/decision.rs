use super::table::ForwardingTable;
use crate::record::PacketRecord;
use log::trace;
use std::fmt;

/// パケット1件に対する処理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// 一致したルートのインターフェースへ転送
    Send { interface: u16 },
    /// デフォルトルートへ転送
    SendDefault { interface: u16 },
    DropChecksum,
    DropExpired,
    /// ヌルルートに一致
    DropPolicy,
    /// 一致するルートもデフォルトルートも無い
    DropUnknown,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Send { interface } => write!(f, "send {}", interface),
            Decision::SendDefault { interface } => write!(f, "default {}", interface),
            Decision::DropChecksum => f.write_str("drop checksum"),
            Decision::DropExpired => f.write_str("drop expired"),
            Decision::DropPolicy => f.write_str("drop policy"),
            Decision::DropUnknown => f.write_str("drop unknown"),
        }
    }
}

/// このルーターを1ホップ通過したものとしてパケットの行き先を決める
///
/// 判定順は固定: TTLを減らす → チェックサム → TTL切れ → ルート検索。
/// ヌルルートへの一致はデフォルトルートより優先する。
pub fn decide(packet: &PacketRecord, table: &ForwardingTable) -> Decision {
    let ttl = packet.ttl.saturating_sub(1);

    let decision = if !packet.has_valid_checksum() {
        Decision::DropChecksum
    } else if ttl == 0 {
        Decision::DropExpired
    } else {
        match table.lookup(packet.dst_addr) {
            Some(route) if route.is_null_route() => Decision::DropPolicy,
            Some(route) => Decision::Send {
                interface: route.interface,
            },
            None => match table.default_interface() {
                Some(interface) => Decision::SendDefault { interface },
                None => Decision::DropUnknown,
            },
        }
    };

    trace!("{} -> {}: {}", packet.source(), packet.destination(), decision);
    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ForwardingEntry, Timestamp, VALID_CHECKSUM};
    use proptest::prelude::*;

    const TEN_NET: u32 = 0x0A00_0000;

    fn packet(dst_addr: u32, ttl: u8, checksum_marker: u16) -> PacketRecord {
        PacketRecord {
            timestamp: Timestamp::new(1, 0),
            src_addr: 0xC0A8_0001,
            dst_addr,
            checksum_marker,
            ttl,
        }
    }

    fn table(routes: &[(u32, u16)]) -> ForwardingTable {
        ForwardingTable::from_entries(routes.iter().map(|&(p, i)| ForwardingEntry::new(p, 8, i)))
            .unwrap()
    }

    #[test]
    fn sends_on_matching_route() {
        let table = table(&[(TEN_NET, 1), (0, 9)]);
        assert_eq!(
            decide(&packet(0x0A00_0005, 5, VALID_CHECKSUM), &table),
            Decision::Send { interface: 1 }
        );
    }

    #[test]
    fn falls_back_to_default_route() {
        let table = table(&[(TEN_NET, 1), (0, 9)]);
        assert_eq!(
            decide(&packet(0xC0A8_0101, 5, VALID_CHECKSUM), &table),
            Decision::SendDefault { interface: 9 }
        );
    }

    #[test]
    fn unknown_without_default_route() {
        let table = table(&[(TEN_NET, 1)]);
        assert_eq!(
            decide(&packet(0xC0A8_0101, 5, VALID_CHECKSUM), &table),
            Decision::DropUnknown
        );
    }

    #[test]
    fn ttl_of_one_expires_here() {
        let table = table(&[(TEN_NET, 1)]);
        assert_eq!(
            decide(&packet(0x0A00_0005, 1, VALID_CHECKSUM), &table),
            Decision::DropExpired
        );
        assert_eq!(
            decide(&packet(0x0A00_0005, 2, VALID_CHECKSUM), &table),
            Decision::Send { interface: 1 }
        );
    }

    #[test]
    fn ttl_of_zero_does_not_wrap() {
        let table = table(&[(TEN_NET, 1)]);
        assert_eq!(
            decide(&packet(0x0A00_0005, 0, VALID_CHECKSUM), &table),
            Decision::DropExpired
        );
    }

    #[test]
    fn null_route_beats_default_route() {
        let table = table(&[(TEN_NET, 0), (0, 9)]);
        assert_eq!(
            decide(&packet(0x0A01_0101, 64, VALID_CHECKSUM), &table),
            Decision::DropPolicy
        );
    }

    #[test]
    fn renders_literal_tokens() {
        assert_eq!(Decision::Send { interface: 1 }.to_string(), "send 1");
        assert_eq!(Decision::SendDefault { interface: 9 }.to_string(), "default 9");
        assert_eq!(Decision::DropChecksum.to_string(), "drop checksum");
        assert_eq!(Decision::DropExpired.to_string(), "drop expired");
        assert_eq!(Decision::DropPolicy.to_string(), "drop policy");
        assert_eq!(Decision::DropUnknown.to_string(), "drop unknown");
    }

    proptest! {
        #[test]
        fn bad_checksum_always_wins(
            dst in any::<u32>(),
            ttl in any::<u8>(),
            checksum in any::<u16>().prop_filter("無効な値のみ", |c| *c != VALID_CHECKSUM),
        ) {
            let table = table(&[(TEN_NET, 0), (0, 9)]);
            prop_assert_eq!(decide(&packet(dst, ttl, checksum), &table), Decision::DropChecksum);
        }

        #[test]
        fn null_route_never_uses_default(ttl in 2u8.., low in 0u32..0x0100_0000) {
            let table = table(&[(TEN_NET, 0), (0, 9)]);
            let dst = TEN_NET | low;
            prop_assert_eq!(decide(&packet(dst, ttl, VALID_CHECKSUM), &table), Decision::DropPolicy);
        }

        #[test]
        fn expiry_depends_only_on_decremented_ttl(dst in any::<u32>(), ttl in any::<u8>()) {
            let table = table(&[(TEN_NET, 1), (0, 9)]);
            let decision = decide(&packet(dst, ttl, VALID_CHECKSUM), &table);
            prop_assert_eq!(decision == Decision::DropExpired, ttl <= 1);
        }
    }
}
