use crate::db::indices::*;
use crate::db::item::{Pad, TrackItem};
use crate::db::layer::LayerMask;
use crate::geom::point::Point;
use crate::geom::rect::Rect;
use crate::geom::rtree::SpatialIndex;
use std::collections::{HashMap, HashSet};

/// Copper items of one board.
///
/// Track items live in slots addressed by [`TrackId`]; the board sequence is
/// a separate vector of handles, so reordering never invalidates a handle.
pub struct Board {
    tracks: Vec<Option<TrackItem>>,
    order: Vec<TrackId>,

    pub pads: Vec<Pad>,
    pad_index: SpatialIndex,
    pub pad_name_map: HashMap<String, PadId>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            tracks: Vec::with_capacity(1000),
            order: Vec::with_capacity(1000),
            pads: Vec::new(),
            pad_index: SpatialIndex::new(),
            pad_name_map: HashMap::new(),
        }
    }

    pub fn num_tracks(&self) -> usize {
        self.order.len()
    }

    pub fn num_pads(&self) -> usize {
        self.pads.len()
    }

    pub fn add_pad(&mut self, pad: Pad) -> PadId {
        let id = PadId::new(self.pads.len());
        self.pad_index.insert(pad.position, id.index());
        self.pad_name_map.insert(pad.name.clone(), id);
        self.pads.push(pad);
        id
    }

    pub fn pad(&self, id: PadId) -> Option<&Pad> {
        self.pads.get(id.index())
    }

    /// Appends an item to the end of the board sequence.
    pub fn add_track(&mut self, item: TrackItem) -> TrackId {
        let id = TrackId::new(self.tracks.len());
        self.tracks.push(Some(item));
        self.order.push(id);
        id
    }

    pub fn remove_track(&mut self, id: TrackId) -> Option<TrackItem> {
        let item = self.tracks.get_mut(id.index())?.take()?;
        self.order.retain(|&t| t != id);
        Some(item)
    }

    #[inline]
    pub fn track(&self, id: TrackId) -> Option<&TrackItem> {
        self.tracks.get(id.index()).and_then(|t| t.as_ref())
    }

    #[inline]
    pub fn track_mut(&mut self, id: TrackId) -> Option<&mut TrackItem> {
        self.tracks.get_mut(id.index()).and_then(|t| t.as_mut())
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.track(id).is_some()
    }

    /// Handles in board sequence order.
    pub fn order(&self) -> &[TrackId] {
        &self.order
    }

    pub fn position_of(&self, id: TrackId) -> Option<usize> {
        self.order.iter().position(|&t| t == id)
    }

    /// Items in board sequence order.
    pub fn tracks(&self) -> impl Iterator<Item = (TrackId, &TrackItem)> + '_ {
        self.order
            .iter()
            .filter_map(move |&id| self.track(id).map(|t| (id, t)))
    }

    /// First pad anchored exactly at `pos` on one of the `mask` layers.
    pub fn pad_at(&self, pos: Point<i32>, mask: LayerMask) -> Option<PadId> {
        self.pad_index
            .query_point(pos)
            .into_iter()
            .map(PadId::new)
            .find(|&id| self.pads[id.index()].layers.intersects(mask))
    }

    /// Items with an endpoint at `pos` on one of the `mask` layers, in board
    /// order, skipping everything in `skip`.
    pub fn items_at<'a>(
        &'a self,
        pos: Point<i32>,
        mask: LayerMask,
        skip: &'a HashSet<TrackId>,
    ) -> impl Iterator<Item = TrackId> + 'a {
        self.tracks()
            .filter(move |(id, t)| {
                !skip.contains(id) && t.touches(pos) && t.layer_mask().intersects(mask)
            })
            .map(|(id, _)| id)
    }

    /// First via at `pos` on one of the `mask` layers, skipping `skip`.
    pub fn via_at(
        &self,
        pos: Point<i32>,
        mask: LayerMask,
        skip: &HashSet<TrackId>,
    ) -> Option<TrackId> {
        self.items_at(pos, mask, skip)
            .find(|&id| self.track(id).is_some_and(|t| t.is_via()))
    }

    /// Attaches segment endpoints to the pads they land on. Returns the number
    /// of attachments made.
    pub fn link_pads(&mut self) -> usize {
        let mut links = 0;
        for i in 0..self.tracks.len() {
            let Some(item) = &self.tracks[i] else {
                continue;
            };
            if item.is_via() {
                continue;
            }
            let mask = item.layer_mask();
            let start_pad = self.pad_at(item.start, mask);
            let end_pad = self.pad_at(item.end, mask);
            links += start_pad.is_some() as usize + end_pad.is_some() as usize;

            if let Some(item) = self.tracks[i].as_mut() {
                item.start_pad = start_pad;
                item.end_pad = end_pad;
            }
        }
        log::debug!("Linked {} track ends to pads", links);
        links
    }

    /// Moves `items` so they are consecutive in the board sequence, in the
    /// given order, starting where `items[0]` currently sits. Handles not on
    /// the board are ignored.
    pub fn make_contiguous(&mut self, items: &[TrackId]) {
        let Some(head) = items.first().and_then(|&h| self.position_of(h)) else {
            return;
        };
        let moved: HashSet<TrackId> = items.iter().copied().collect();

        let mut order = Vec::with_capacity(self.order.len());
        for (i, &id) in self.order.iter().enumerate() {
            if i == head {
                order.extend(items.iter().copied().filter(|&t| self.contains(t)));
            } else if !moved.contains(&id) {
                order.push(id);
            }
        }
        self.order = order;
    }

    /// Union of every pad and track extent, or `None` for an empty board.
    pub fn bounding_box(&self) -> Option<Rect> {
        let pads = self.pads.iter().map(|p| p.bounding_box());
        let tracks = self.tracks().map(|(_, t)| t.bounding_box());
        pads.chain(tracks).reduce(|a, b| a.merge(&b))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
