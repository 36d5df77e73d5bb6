// -*- coding: utf-8 -*-

//! Decoder for the firmware debug stream.
//!
//! The firmware sends `[id, lo, hi]` frames round-robin over all probes,
//! followed by an end marker frame `[0xFF, 0xFF, 0xFF]`.

const MARKER: u8 = 0xFF;

/// Debug probe ids, as sent by the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Button(usize),
    Ticks,
    StackFree,
}

pub const NR_BUTTONS: usize = 4;

impl Probe {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0..=3 => Some(Probe::Button(id.into())),
            4 => Some(Probe::Ticks),
            5 => Some(Probe::StackFree),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Value { probe: Probe, value: u16 },
    End,
}

/// Byte-wise frame decoder.
///
/// It synchronizes on the end marker and drops back into
/// the unsynchronized state on any unknown probe id.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    synced: bool,
    marker_count: usize,
    buf: [u8; 3],
    len: usize,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn is_synced(&self) -> bool {
        self.synced
    }

    fn lose_sync(&mut self) {
        self.synced = false;
        self.marker_count = 0;
        self.len = 0;
    }

    pub fn push(&mut self, byte: u8) -> Option<Frame> {
        if !self.synced {
            if byte == MARKER {
                self.marker_count += 1;
                return None;
            }
            let had_marker = self.marker_count >= 3;
            self.marker_count = 0;
            if !had_marker {
                return None;
            }
            // The last three marker bytes were the end frame.
            // This byte starts the first probe frame.
            self.synced = true;
            self.len = 0;
        }

        self.buf[self.len] = byte;
        self.len += 1;
        if self.len < self.buf.len() {
            return None;
        }
        self.len = 0;

        let [id, lo, hi] = self.buf;
        if self.buf == [MARKER; 3] {
            return Some(Frame::End);
        }
        match Probe::from_id(id) {
            Some(probe) => Some(Frame::Value {
                probe,
                value: u16::from_le_bytes([lo, hi]),
            }),
            None => {
                self.lose_sync();
                None
            }
        }
    }
}

/// One full round of probe values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Round {
    pub buttons: [Option<u8>; NR_BUTTONS],
    pub ticks: Option<u16>,
    pub stack_free: Option<u16>,
}

impl Round {
    pub fn update(&mut self, probe: Probe, value: u16) {
        match probe {
            Probe::Button(index) => {
                if let Some(b) = self.buttons.get_mut(index) {
                    *b = Some(value as u8);
                }
            }
            Probe::Ticks => self.ticks = Some(value),
            Probe::StackFree => self.stack_free = Some(value),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn decode(dec: &mut FrameDecoder, bytes: &[u8]) -> Vec<Frame> {
        bytes.iter().filter_map(|b| dec.push(*b)).collect()
    }

    #[test]
    fn test_sync_on_marker() {
        let mut dec = FrameDecoder::new();
        // Start byte, then the tail of a round, then the marker.
        let frames = decode(&mut dec, &[0xFF, 4, 0x34, 0x12, 5, 0x00, 0x01]);
        assert!(frames.is_empty());
        assert!(!dec.is_synced());

        let frames = decode(&mut dec, &[0xFF, 0xFF, 0xFF, 0, 0xFF, 0x00, 4, 0x34, 0x12]);
        assert!(dec.is_synced());
        assert_eq!(
            frames,
            [
                Frame::Value {
                    probe: Probe::Button(0),
                    value: 0x00FF
                },
                Frame::Value {
                    probe: Probe::Ticks,
                    value: 0x1234
                },
            ]
        );

        let frames = decode(&mut dec, &[0xFF, 0xFF, 0xFF]);
        assert_eq!(frames, [Frame::End]);
    }

    #[test]
    fn test_marker_preceded_by_ff_value() {
        let mut dec = FrameDecoder::new();
        // The high byte of the last value is 0xFF, directly followed by the marker.
        let frames = decode(&mut dec, &[5, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 3, 0x7F, 0x00]);
        assert_eq!(
            frames,
            [Frame::Value {
                probe: Probe::Button(3),
                value: 0x7F
            }]
        );
    }

    #[test]
    fn test_resync_on_garbage() {
        let mut dec = FrameDecoder::new();
        decode(&mut dec, &[0xFF, 0xFF, 0xFF]);
        let frames = decode(&mut dec, &[0x42, 0x00, 0x00]);
        assert!(frames.is_empty());
        assert!(!dec.is_synced());

        let frames = decode(&mut dec, &[0xFF, 0xFF, 0xFF, 1, 0x80, 0x00]);
        assert_eq!(
            frames,
            [Frame::Value {
                probe: Probe::Button(1),
                value: 0x80
            }]
        );
    }

    #[test]
    fn test_round() {
        let mut round = Round::default();
        round.update(Probe::Button(2), 0x7F);
        round.update(Probe::Ticks, 1000);
        round.update(Probe::StackFree, 512);
        assert_eq!(round.buttons, [None, None, Some(0x7F), None]);
        assert_eq!(round.ticks, Some(1000));
        assert_eq!(round.stack_free, Some(512));
    }
}

// vim: ts=4 sw=4 expandtab
