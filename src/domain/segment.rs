use super::codec::TimelineConfig;
use super::marker::Marker;

/// A derived block of the day: the half-open interval between two adjacent
/// markers, labeled by the left-bounding marker's content.
///
/// Segments are never stored; they are recomputed in full from the marker
/// list on every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub start_position: f64,
    pub end_position: f64,
    /// Content of the left-bounding marker.
    pub content: String,
    /// Duration of the block, fractional minutes.
    pub minutes: f64,
}

/// Derive the full segment list from position-sorted markers.
///
/// Only the regions between adjacent markers are blocks: nothing is emitted
/// before the first marker or after the last one, so the derived set covers
/// exactly `[min position, max position]` with no gaps and no overlaps.
pub fn derive_segments(sorted: &[&Marker], config: &TimelineConfig) -> Vec<Segment> {
    sorted
        .windows(2)
        .map(|pair| {
            let (left, right) = (pair[0], pair[1]);
            Segment {
                start_position: left.position,
                end_position: right.position,
                content: left.content.clone(),
                minutes: config.span_minutes(left.position, right.position),
            }
        })
        .collect()
}
