use super::codec::clamp_position;
use thiserror::Error;
use uuid::Uuid;

/// Default content assigned to a freshly placed marker.
///
/// Kept byte-identical to the label the original web data format used, so
/// exported files from it classify the same way here.
pub const PLACEHOLDER_CONTENT: &str = "新事项";

/// Stable identity for a marker.
///
/// Identity is by id, never by position: positions collide transiently while
/// a marker is being dragged across a neighbor.
pub type MarkerId = Uuid;

/// Errors from marker store operations.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    /// Position was NaN or infinite.
    #[error("marker position must be a finite number, got {0}")]
    InvalidPosition(f64),
    /// Operation referenced an id the store does not hold.
    #[error("no marker with id {0}")]
    NotFound(MarkerId),
}

/// Visual/semantic state of a marker, derived from its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// Placed but not yet labeled; excluded from aggregation.
    Temporary,
    /// Carries a real label.
    Confirmed,
}

/// A user-placed divider on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Unique id for internal references (not persisted).
    pub id: MarkerId,
    /// Percentage along the bar, always within [0, 100].
    pub position: f64,
    /// Free-text note (Markdown, hashtags allowed).
    pub content: String,
    /// Insertion sequence, the deterministic tie-break for equal positions.
    pub seq: u64,
}

impl Marker {
    /// Whether the marker has been given a real label yet.
    pub fn kind(&self) -> MarkerKind {
        if is_placeholder(&self.content) {
            MarkerKind::Temporary
        } else {
            MarkerKind::Confirmed
        }
    }

    /// Short plain-text preview of the content, for bar annotations.
    ///
    /// Strips Markdown punctuation and keeps the first few characters.
    pub fn summary(&self) -> String {
        content_summary(&self.content)
    }
}

/// True for content that should be treated as "not yet written".
pub fn is_placeholder(content: &str) -> bool {
    let trimmed = content.trim();
    trimmed.is_empty() || trimmed == PLACEHOLDER_CONTENT
}

/// Plain-text preview: Markdown punctuation stripped, first 5 characters.
pub fn content_summary(content: &str) -> String {
    content
        .chars()
        .filter(|c| !matches!(c, '#' | '*' | '`' | '_' | '~'))
        .take(5)
        .collect()
}

/// Ordered collection of markers; the single source of truth for the bar.
///
/// Internal order is insertion order. [`sorted`](Self::sorted) produces the
/// position-ascending view segment derivation runs over; ties break on the
/// insertion sequence so the order is total and deterministic.
#[derive(Debug, Default)]
pub struct MarkerStore {
    markers: Vec<Marker>,
    next_seq: u64,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a new marker. The position is clamped onto the bar; a missing
    /// content defaults to the placeholder.
    pub fn insert(&mut self, position: f64, content: Option<&str>) -> Result<MarkerId, StoreError> {
        if !position.is_finite() {
            return Err(StoreError::InvalidPosition(position));
        }

        let marker = Marker {
            id: Uuid::new_v4(),
            position: clamp_position(position),
            content: content.unwrap_or(PLACEHOLDER_CONTENT).to_string(),
            seq: self.next_seq,
        };
        self.next_seq += 1;

        let id = marker.id;
        self.markers.push(marker);
        Ok(id)
    }

    /// Move a marker, clamping onto the bar. Out-of-range positions clamp;
    /// only non-finite ones are rejected.
    pub fn move_to(&mut self, id: MarkerId, position: f64) -> Result<(), StoreError> {
        if !position.is_finite() {
            return Err(StoreError::InvalidPosition(position));
        }
        let marker = self.get_mut(id)?;
        marker.position = clamp_position(position);
        Ok(())
    }

    /// Replace a marker's content (and with it, its derived kind).
    pub fn set_content(&mut self, id: MarkerId, content: &str) -> Result<(), StoreError> {
        let marker = self.get_mut(id)?;
        marker.content = content.to_string();
        Ok(())
    }

    /// Remove a marker, returning it.
    pub fn remove(&mut self, id: MarkerId) -> Result<Marker, StoreError> {
        let index = self
            .markers
            .iter()
            .position(|m| m.id == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(self.markers.remove(index))
    }

    /// Drop every marker.
    pub fn clear(&mut self) {
        self.markers.clear();
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    fn get_mut(&mut self, id: MarkerId) -> Result<&mut Marker, StoreError> {
        self.markers
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Markers in insertion order (the order persistence writes them in).
    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    /// Markers sorted by position ascending, insertion sequence as the
    /// tie-break. Positions are finite by construction, so the comparison
    /// is total.
    pub fn sorted(&self) -> Vec<&Marker> {
        let mut sorted: Vec<&Marker> = self.markers.iter().collect();
        sorted.sort_by(|a, b| {
            a.position
                .partial_cmp(&b.position)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.seq.cmp(&b.seq))
        });
        sorted
    }

    /// Rebuild the store from persisted `(position, content)` pairs.
    ///
    /// Positions are clamped; records with non-finite positions are dropped.
    /// Persisted order is not trusted to be sorted.
    pub fn restore<'a>(&mut self, records: impl IntoIterator<Item = (f64, &'a str)>) {
        self.markers.clear();
        for (position, content) in records {
            if !position.is_finite() {
                continue;
            }
            let marker = Marker {
                id: Uuid::new_v4(),
                position: clamp_position(position),
                content: content.to_string(),
                seq: self.next_seq,
            };
            self.next_seq += 1;
            self.markers.push(marker);
        }
    }
}
