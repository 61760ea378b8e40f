pub mod forwarding_entry;
pub mod packet_record;

pub use forwarding_entry::ForwardingEntry;
pub use packet_record::{PacketRecord, Timestamp, VALID_CHECKSUM};

use crate::core::{SimError, SimResult};
use log::debug;
use std::io::{ErrorKind, Read};
use std::marker::PhantomData;

/// 固定長・ネットワークバイトオーダーのレコード
pub trait WireRecord: Sized {
    /// レコード1件のバイト数
    const SIZE: usize;
    /// ログやエラーに使う名前
    const NAME: &'static str;

    /// `data`の先頭`SIZE`バイトをデコードする。`SIZE`未満ならNone（入力の終わり）
    fn parse(data: &[u8]) -> Option<Self>;
}

/// `Read`から固定長レコードを一件ずつ取り出す
///
/// 末尾の不完全なレコードはエラーではなく入力の終わりとして扱い、読み捨てる。
pub struct RecordReader<R, T> {
    reader: R,
    buffer: Vec<u8>,
    finished: bool,
    _record: PhantomData<T>,
}

impl<R: Read, T: WireRecord> RecordReader<R, T> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: vec![0u8; T::SIZE],
            finished: false,
            _record: PhantomData,
        }
    }

    pub fn next_record(&mut self) -> SimResult<Option<T>> {
        if self.finished {
            return Ok(None);
        }

        let filled = self.fill()?;
        if filled < T::SIZE {
            self.finished = true;
            if filled > 0 {
                debug!(
                    "{}の末尾に不完全なレコードがあります ({} / {} バイト)。読み捨てます",
                    T::NAME,
                    filled,
                    T::SIZE
                );
            }
            return Ok(None);
        }

        Ok(T::parse(&self.buffer))
    }

    // バッファが埋まるか入力が尽きるまで読む
    fn fill(&mut self) -> SimResult<usize> {
        let mut filled = 0;
        while filled < T::SIZE {
            match self.reader.read(&mut self.buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.finished = true;
                    return Err(SimError::Read {
                        what: T::NAME,
                        source: e,
                    });
                }
            }
        }
        Ok(filled)
    }
}

impl<R: Read, T: WireRecord> Iterator for RecordReader<R, T> {
    type Item = SimResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    // 1バイトずつしか返さないリーダー
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::PermissionDenied, "denied"))
        }
    }

    const TWO_ENTRIES: [u8; 16] = [
        10, 0, 0, 0, 0, 8, 0, 1, //
        192, 168, 0, 0, 0, 16, 0, 2,
    ];

    #[test]
    fn reads_every_complete_record() {
        let reader: RecordReader<_, ForwardingEntry> = RecordReader::new(Cursor::new(TWO_ENTRIES));
        let entries: Vec<_> = reader.collect::<SimResult<_>>().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].interface, 2);
    }

    #[test]
    fn empty_input_has_no_records() {
        let mut reader: RecordReader<_, ForwardingEntry> = RecordReader::new(Cursor::new(Vec::new()));
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn truncated_trailing_record_is_dropped() {
        let mut data = TWO_ENTRIES.to_vec();
        data.extend_from_slice(&[172, 16, 0]);
        let reader: RecordReader<_, ForwardingEntry> = RecordReader::new(Cursor::new(data));
        let entries: Vec<_> = reader.collect::<SimResult<_>>().unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn short_reads_are_reassembled() {
        let reader: RecordReader<_, ForwardingEntry> = RecordReader::new(Trickle(&TWO_ENTRIES));
        let entries: Vec<_> = reader.collect::<SimResult<_>>().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].prefix, 0x0A00_0000);
    }

    #[test]
    fn io_errors_are_reported_once() {
        let mut reader: RecordReader<_, PacketRecord> = RecordReader::new(Failing);
        match reader.next() {
            Some(Err(SimError::Read { what, .. })) => assert_eq!(what, "トレースファイル"),
            other => panic!("読み込みエラーになるはず: {:?}", other.map(|r| r.is_ok())),
        }
        assert!(reader.next().is_none());
    }
}
