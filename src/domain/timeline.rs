use super::classify::{aggregate_categories, aggregate_tags, Category};
use super::codec::TimelineConfig;
use super::marker::{Marker, MarkerId, MarkerStore, StoreError};
use super::segment::{derive_segments, Segment};
use std::collections::BTreeMap;

/// The owning engine: marker store plus every derived view of it.
///
/// All mutation goes through here so the derived state can never be stale;
/// each operation re-derives segments and both aggregate sets synchronously
/// before returning. Reads immediately after a mutation always see a
/// consistent picture. Nothing here touches the UI or the filesystem.
#[derive(Debug)]
pub struct Timeline {
    config: TimelineConfig,
    store: MarkerStore,
    segments: Vec<Segment>,
    category_totals: BTreeMap<Category, f64>,
    tag_totals: BTreeMap<String, f64>,
}

impl Timeline {
    pub fn new(config: TimelineConfig) -> Self {
        Self {
            config,
            store: MarkerStore::new(),
            segments: Vec::new(),
            category_totals: BTreeMap::new(),
            tag_totals: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn insert_marker(
        &mut self,
        position: f64,
        content: Option<&str>,
    ) -> Result<MarkerId, StoreError> {
        let id = self.store.insert(position, content)?;
        self.refresh();
        Ok(id)
    }

    pub fn move_marker(&mut self, id: MarkerId, position: f64) -> Result<(), StoreError> {
        self.store.move_to(id, position)?;
        self.refresh();
        Ok(())
    }

    pub fn set_content(&mut self, id: MarkerId, content: &str) -> Result<(), StoreError> {
        self.store.set_content(id, content)?;
        self.refresh();
        Ok(())
    }

    pub fn remove_marker(&mut self, id: MarkerId) -> Result<Marker, StoreError> {
        let removed = self.store.remove(id)?;
        self.refresh();
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.refresh();
    }

    /// Rebuild from persisted records (positions clamped, junk dropped).
    pub fn restore<'a>(&mut self, records: impl IntoIterator<Item = (f64, &'a str)>) {
        self.store.restore(records);
        self.refresh();
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.store.get(id)
    }

    /// Markers in insertion order (the order persistence writes).
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.store.iter()
    }

    /// Markers sorted by position, the order the bar renders in.
    pub fn sorted_markers(&self) -> Vec<&Marker> {
        self.store.sorted()
    }

    pub fn marker_count(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn category_totals(&self) -> &BTreeMap<Category, f64> {
        &self.category_totals
    }

    pub fn tag_totals(&self) -> &BTreeMap<String, f64> {
        &self.tag_totals
    }

    /// Minutes between a marker and its left neighbor in sorted order, for
    /// the editor's "since previous marker" hint. `None` for the leftmost
    /// marker or an unknown id.
    pub fn gap_to_previous(&self, id: MarkerId) -> Option<f64> {
        let sorted = self.store.sorted();
        let index = sorted.iter().position(|m| m.id == id)?;
        if index == 0 {
            return None;
        }
        Some(
            self.config
                .span_minutes(sorted[index - 1].position, sorted[index].position),
        )
    }

    /// Neighbor of a marker in sorted order, for selection movement.
    pub fn neighbor(&self, id: MarkerId, offset: isize) -> Option<MarkerId> {
        let sorted = self.store.sorted();
        let index = sorted.iter().position(|m| m.id == id)? as isize;
        let target = index + offset;
        if target < 0 {
            return None;
        }
        sorted.get(target as usize).map(|m| m.id)
    }

    fn refresh(&mut self) {
        let segments = derive_segments(&self.store.sorted(), &self.config);
        self.category_totals = aggregate_categories(&segments);
        self.tag_totals = aggregate_tags(&segments);
        self.segments = segments;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classify::UNCATEGORIZED_TAG;

    fn timeline() -> Timeline {
        Timeline::new(TimelineConfig::default())
    }

    #[test]
    fn test_mutations_recompute_synchronously() {
        let mut tl = timeline();
        tl.insert_marker(25.0, Some("写代码 #work")).unwrap();
        assert!(tl.segments().is_empty());

        tl.insert_marker(50.0, Some("午休")).unwrap();
        // Derived state is already current when insert returns.
        assert_eq!(tl.segments().len(), 1);
        assert_eq!(tl.category_totals()[&Category::WorkStudy], 360.0);
        assert_eq!(tl.tag_totals()["work"], 360.0);
    }

    #[test]
    fn test_move_reshapes_segments() {
        let mut tl = timeline();
        let a = tl.insert_marker(20.0, Some("a")).unwrap();
        tl.insert_marker(60.0, Some("b")).unwrap();

        tl.move_marker(a, 40.0).unwrap();
        assert_eq!(tl.segments()[0].start_position, 40.0);
        assert_eq!(tl.segments()[0].minutes, tl.config().span_minutes(40.0, 60.0));
    }

    #[test]
    fn test_remove_leaves_consistent_derived_state() {
        let mut tl = timeline();
        tl.insert_marker(0.0, Some("睡眠")).unwrap();
        let mid = tl.insert_marker(30.0, Some("摸鱼")).unwrap();
        tl.insert_marker(80.0, Some("阅读")).unwrap();
        assert_eq!(tl.segments().len(), 2);

        tl.remove_marker(mid).unwrap();
        assert_eq!(tl.segments().len(), 1);
        assert!(tl.segments().iter().all(|s| s.content != "摸鱼"));
        assert!(!tl.category_totals().contains_key(&Category::Distraction));
    }

    #[test]
    fn test_failed_operation_changes_nothing() {
        let mut tl = timeline();
        tl.insert_marker(10.0, Some("a")).unwrap();
        tl.insert_marker(90.0, Some("b")).unwrap();
        let before = tl.segments().to_vec();

        let ghost = uuid::Uuid::new_v4();
        assert!(tl.move_marker(ghost, 50.0).is_err());
        assert!(tl.set_content(ghost, "x").is_err());
        assert!(tl.remove_marker(ghost).is_err());
        assert_eq!(tl.segments(), &before[..]);
    }

    #[test]
    fn test_restore_from_unsorted_records() {
        let mut tl = timeline();
        tl.restore(vec![(50.0, "午休"), (0.0, "睡眠"), (25.0, "写代码")]);

        let sorted = tl.sorted_markers();
        assert_eq!(sorted.len(), 3);
        assert_eq!(sorted[0].content, "睡眠");
        assert_eq!(tl.segments().len(), 2);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut tl = timeline();
        tl.insert_marker(10.0, Some("阅读")).unwrap();
        tl.insert_marker(70.0, Some("摸鱼")).unwrap();

        tl.clear();
        assert!(tl.is_empty());
        assert!(tl.segments().is_empty());
        assert!(tl.category_totals().is_empty());
        assert!(tl.tag_totals().is_empty());
    }

    #[test]
    fn test_gap_to_previous() {
        let mut tl = timeline();
        let first = tl.insert_marker(10.0, Some("a")).unwrap();
        let second = tl.insert_marker(35.0, Some("b")).unwrap();

        assert_eq!(tl.gap_to_previous(first), None);
        assert_eq!(tl.gap_to_previous(second), Some(360.0));
    }

    #[test]
    fn test_untagged_content_lands_in_uncategorized() {
        let mut tl = timeline();
        tl.insert_marker(0.0, Some("摸鱼")).unwrap();
        // 30 minutes on the default 24h bar.
        tl.insert_marker(100.0 * 0.5 / 24.0, Some("")).unwrap();

        let totals = tl.tag_totals();
        assert!((totals[UNCATEGORIZED_TAG] - 30.0).abs() < 1e-9);
    }
}
