//! R-tree snapshot of craft centres for bulk proximity queries.
//!
//! [`Space::close_neighbors`][crate::Space::close_neighbors] is a linear
//! scan, which is fine for one query.  When many observations are built in
//! the same tick, build a [`ProximityIndex`] once and query it instead.  The
//! index is a snapshot: it does not follow the space after it is built.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use sc_core::{CraftId, Vec2};

use crate::Space;

/// Entry stored in the R-tree: a craft centre and its id.
#[derive(Clone)]
struct CraftEntry {
    point: [f64; 2],
    id:    CraftId,
}

impl RTreeObject for CraftEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for CraftEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

pub struct ProximityIndex {
    tree: RTree<CraftEntry>,
}

impl ProximityIndex {
    /// Bulk-load the current craft positions of `space`.
    pub fn build(space: &Space) -> Self {
        let entries = space
            .iter()
            .map(|c| CraftEntry { point: c.position().into(), id: c.id() })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Craft strictly within `radius` of `point`, nearest first (ties by id).
    pub fn within(&self, point: Vec2, radius: f64) -> Vec<CraftId> {
        let query: [f64; 2] = point.into();
        let r2 = radius * radius;
        let mut hits: Vec<(f64, CraftId)> = self
            .tree
            .locate_within_distance(query, r2)
            .map(|e| (e.distance_2(&query), e.id))
            .filter(|&(d2, _)| d2 < r2)
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        hits.into_iter().map(|(_, id)| id).collect()
    }

    /// The craft nearest to `point`.
    pub fn nearest(&self, point: Vec2) -> Option<CraftId> {
        let query: [f64; 2] = point.into();
        self.tree.nearest_neighbor(&query).map(|e| e.id)
    }

    /// Up to `k` craft nearest to `point`, sorted by ascending distance.
    pub fn k_nearest(&self, point: Vec2, k: usize) -> Vec<CraftId> {
        let query: [f64; 2] = point.into();
        self.tree.nearest_neighbor_iter(&query).take(k).map(|e| e.id).collect()
    }
}
