//! Labelled world markers observed by the camera pipeline, with decay and
//! eventual purge.

use wheelly_core::{CameraEvent, Millis, Point};

/// How long an unreinforced marker is still trusted before it is dropped
/// from the set entirely.
#[derive(Copy, Clone, Debug)]
pub struct MarkerDecay {
    /// Age beyond which a marker is considered stale (still present, but
    /// [`LabelMarker::is_active`] returns `false`).
    pub decay_ms: i64,
    /// Age beyond which a marker is purged from the set by [`MarkerSet::clean`].
    pub clean_decay_ms: i64,
}

impl Default for MarkerDecay {
    fn default() -> Self {
        Self { decay_ms: 10_000, clean_decay_ms: 60_000 }
    }
}

/// Two observations within this radius are treated as the same physical
/// marker and merged rather than creating a duplicate entry.
const MERGE_RADIUS_M: f64 = 0.5;

/// A labelled point in the world, reinforced by repeated camera
/// observations.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelMarker {
    pub label: String,
    pub position: Point,
    pub first_seen: Millis,
    pub last_seen: Millis,
    pub observations: u32,
}

impl LabelMarker {
    /// `true` if this marker has been reinforced within `decay.decay_ms`.
    pub fn is_active(&self, now: Millis, decay: MarkerDecay) -> bool {
        now.since(self.last_seen) <= decay.decay_ms
    }

    fn observe_again(&mut self, position: Point, at: Millis) {
        self.position = position;
        self.last_seen = at;
        self.observations += 1;
    }
}

/// The set of labelled markers currently known, indexed by nothing in
/// particular — lookups scan linearly, which is fine at the handful-of-
/// markers scale this system operates at.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkerSet {
    markers: Vec<LabelMarker>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[LabelMarker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Fold a camera event into the set: reinforces an existing marker of
    /// the same label within [`MERGE_RADIUS_M`], or adds a new one. Events
    /// with no distance estimate (and hence no world position) are ignored —
    /// a bearing alone cannot place a marker.
    pub fn observe(&mut self, event: &CameraEvent) {
        let Some(position) = event.world_point() else { return };
        if let Some(existing) = self
            .markers
            .iter_mut()
            .find(|m| m.label == event.label && m.position.distance(position) <= MERGE_RADIUS_M)
        {
            existing.observe_again(position, event.time);
            return;
        }
        self.markers.push(LabelMarker {
            label: event.label.clone(),
            position,
            first_seen: event.time,
            last_seen: event.time,
            observations: 1,
        });
    }

    /// Purge markers not reinforced within `decay.clean_decay_ms`.
    pub fn clean(&mut self, now: Millis, decay: MarkerDecay) {
        self.markers.retain(|m| now.since(m.last_seen) <= decay.clean_decay_ms);
    }

    /// Remove every marker immediately — used by the map-clearing state.
    pub fn purge(&mut self) {
        self.markers.clear();
    }

    /// The nearest active marker to `from` within `(min_distance,
    /// max_distance]`, optionally restricted to a specific `label`.
    pub fn nearest(
        &self,
        from: Point,
        label: Option<&str>,
        min_distance: f64,
        max_distance: f64,
        now: Millis,
        decay: MarkerDecay,
    ) -> Option<&LabelMarker> {
        self.markers
            .iter()
            .filter(|m| m.is_active(now, decay))
            .filter(|m| label.is_none_or(|l| m.label == l))
            .filter_map(|m| {
                let d = from.distance(m.position);
                (d > min_distance && d <= max_distance).then_some((d, m))
            })
            .min_by(|(d1, _), (d2, _)| d1.total_cmp(d2))
            .map(|(_, m)| m)
    }
}
