pub mod classify;
pub mod codec;
pub mod marker;
pub mod segment;
pub mod timeline;

pub use classify::{
    aggregate_categories, aggregate_tags, classify, extract_tags, Category, UNCATEGORIZED_TAG,
};
pub use codec::{clamp_position, format_minutes, TimelineConfig, MAX_POSITION, MIN_POSITION};
pub use marker::{
    content_summary, is_placeholder, Marker, MarkerId, MarkerKind, MarkerStore, StoreError,
    PLACEHOLDER_CONTENT,
};
pub use segment::{derive_segments, Segment};
pub use timeline::Timeline;
