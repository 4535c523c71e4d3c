//! Property-based tests for reverse reading.
//!
//! These tests use proptest to check the reader's cursor accounting and
//! reversal over many generated sources and buffer sizes, for both
//! stepping strategies.

use proptest::prelude::*;
use reverse_reader::{ReverseReader, Stepping};
use std::io::Cursor;

fn arb_stepping() -> impl Strategy<Value = Stepping> {
    prop_oneof![Just(Stepping::Batched), Just(Stepping::PerByte)]
}

fn arb_content() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..300)
}

fn reader_at_end(content: &[u8], stepping: Stepping) -> ReverseReader<Cursor<Vec<u8>>> {
    ReverseReader::from_end(Cursor::new(content.to_vec())).unwrap().with_stepping(stepping)
}

proptest! {
    /// A backward read from the end either fills the buffer or hits zero.
    #[test]
    fn prop_backward_fills_or_ends(
        content in prop::collection::vec(any::<u8>(), 1..300),
        len in 1usize..400,
        stepping in arb_stepping(),
    ) {
        let n = content.len();
        let mut reader = reader_at_end(&content, stepping);
        let mut buf = vec![0u8; len];

        let filled = reader.read_back(&mut buf).unwrap();
        let pos = reader.position().unwrap() as usize;
        if len <= n {
            prop_assert_eq!(filled.count, len);
            prop_assert!(!filled.end_of_stream);
            prop_assert_eq!(pos, n - len);
        } else {
            prop_assert_eq!(filled.count, n);
            prop_assert!(filled.end_of_stream);
            prop_assert_eq!(pos, 0);
        }
    }

    /// Draining with any buffer size yields the reversed content, and the
    /// cursor drops by exactly the reported count on every call.
    #[test]
    fn prop_drain_reverses_content(
        content in arb_content(),
        len in 1usize..64,
        stepping in arb_stepping(),
    ) {
        let mut reader = reader_at_end(&content, stepping);
        let mut buf = vec![0u8; len];
        let mut out = Vec::with_capacity(content.len());

        loop {
            let before = reader.position().unwrap();
            let filled = reader.read_back(&mut buf).unwrap();
            let after = reader.position().unwrap();
            prop_assert_eq!(before - after, filled.count as u64);

            out.extend_from_slice(&buf[..filled.count]);
            if filled.end_of_stream {
                break;
            }
        }

        let expected: Vec<u8> = content.iter().rev().copied().collect();
        prop_assert_eq!(out, expected);
    }

    /// A forward read of the same length undoes a backward read.
    #[test]
    fn prop_round_trip_restores_cursor(
        content in arb_content(),
        start_frac in 0.0f64..=1.0,
        len in 1usize..64,
        stepping in arb_stepping(),
    ) {
        let start = (content.len() as f64 * start_frac) as u64;
        let mut reader = reader_at_end(&content, stepping);
        reader.get_mut().set_position(start);

        let mut back = vec![0u8; len];
        let k = reader.read_back(&mut back).unwrap().count;

        let mut fwd = vec![0u8; k];
        let filled = reader.read_forward(&mut fwd).unwrap();
        prop_assert_eq!(filled.count, k);
        prop_assert_eq!(reader.position().unwrap(), start);

        back.truncate(k);
        back.reverse();
        prop_assert_eq!(back, fwd);
    }

    /// Forward reads advance the cursor by exactly the reported count.
    #[test]
    fn prop_forward_accounting(
        content in arb_content(),
        len in 1usize..64,
    ) {
        let mut reader = ReverseReader::new(Cursor::new(content.clone()));
        let mut buf = vec![0u8; len];
        let mut out = Vec::new();

        loop {
            let before = reader.position().unwrap();
            let filled = reader.read_forward(&mut buf).unwrap();
            prop_assert_eq!(reader.position().unwrap() - before, filled.count as u64);

            out.extend_from_slice(&buf[..filled.count]);
            if filled.end_of_stream {
                break;
            }
        }
        prop_assert_eq!(out, content);
    }
}
