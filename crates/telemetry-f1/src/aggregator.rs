//! Per-frame grouping of decoded packets.
//!
//! Packets arrive in log order and are filed under their `frame_id`. Within a
//! frame the latest packet of each kind wins. Frames are sorted once, when
//! the aggregator is finished.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde::ser::SerializeMap;

use crate::packets::DecodedPacket;
use crate::protocol::PacketKind;

/// Latest value per packet kind for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FrameRecord<V = DecodedPacket> {
    packets: BTreeMap<PacketKind, V>,
}

impl<V> Default for FrameRecord<V> {
    fn default() -> Self {
        Self {
            packets: BTreeMap::new(),
        }
    }
}

impl<V> FrameRecord<V> {
    pub fn get(&self, kind: PacketKind) -> Option<&V> {
        self.packets.get(&kind)
    }

    pub fn contains(&self, kind: PacketKind) -> bool {
        self.packets.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    /// Kinds and values in packet-id order.
    pub fn iter(&self) -> impl Iterator<Item = (PacketKind, &V)> {
        self.packets.iter().map(|(k, v)| (*k, v))
    }

    /// Returns the value this one replaced, if any.
    fn insert(&mut self, kind: PacketKind, value: V) -> Option<V> {
        self.packets.insert(kind, value)
    }
}

/// Accumulates `(frame_id, kind, value)` triples into frame records.
#[derive(Debug, Clone)]
pub struct FrameAggregator<V = DecodedPacket> {
    frames: HashMap<u32, FrameRecord<V>>,
}

impl<V> Default for FrameAggregator<V> {
    fn default() -> Self {
        Self {
            frames: HashMap::new(),
        }
    }
}

impl<V> FrameAggregator<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// File `value` under `kind` in frame `frame_id`, replacing any earlier
    /// value of the same kind. Returns `true` if a value was replaced.
    pub fn insert(&mut self, frame_id: u32, kind: PacketKind, value: V) -> bool {
        self.frames
            .entry(frame_id)
            .or_default()
            .insert(kind, value)
            .is_some()
    }

    /// Number of distinct frames seen.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// All frames in ascending `frame_id` order.
    pub fn finish(self) -> Vec<(u32, FrameRecord<V>)> {
        let mut frames: Vec<_> = self.frames.into_iter().collect();
        frames.sort_unstable_by_key(|(frame_id, _)| *frame_id);
        frames
    }
}

impl FrameAggregator<DecodedPacket> {
    /// File a decoded packet under its own frame id and kind.
    pub fn push(&mut self, packet: DecodedPacket) -> bool {
        self.insert(packet.frame_id, packet.kind(), packet)
    }
}

/// Serialises finished frames as a JSON object keyed by frame id.
///
/// Keys keep the slice order, which is ascending after
/// [`FrameAggregator::finish`].
#[derive(Debug, Clone, Copy)]
pub struct FrameMap<'a, V = DecodedPacket>(pub &'a [(u32, FrameRecord<V>)]);

impl<V: Serialize> Serialize for FrameMap<'_, V> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (frame_id, record) in self.0 {
            map.serialize_entry(&frame_id.to_string(), record)?;
        }
        map.end()
    }
}
