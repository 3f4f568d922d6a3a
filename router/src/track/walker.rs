use pcb_common::db::core::Board;
use pcb_common::db::indices::{PadId, TrackId};
use pcb_common::db::layer::LayerMask;
use pcb_common::geom::point::Point;
use std::collections::HashSet;

/// Why a walk stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkStop {
    Pad(PadId),
    /// Two or more unvisited items meet at the stop point.
    Junction,
    /// Nothing left to follow.
    Dangling,
}

/// Follows single connections through the board from a point, recording the
/// items it crosses. The visited set belongs to the walker, so several walks
/// may run over the same board at once.
///
/// Vias met on the way are recorded but not visited: whether a via belongs to
/// the chain depends on what else it connects, which is only known once every
/// walk has finished.
pub struct ChainWalker<'a> {
    board: &'a Board,
    visited: HashSet<TrackId>,
    /// Visited items and recorded vias, in discovery order.
    found: Vec<TrackId>,
    vias: Vec<TrackId>,
}

impl<'a> ChainWalker<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            visited: HashSet::new(),
            found: Vec::new(),
            vias: Vec::new(),
        }
    }

    /// Marks `id` as part of the chain. Returns false if it already was.
    pub fn visit(&mut self, id: TrackId) -> bool {
        if !self.visited.insert(id) {
            return false;
        }
        self.found.push(id);
        true
    }

    pub fn is_visited(&self, id: TrackId) -> bool {
        self.visited.contains(&id)
    }

    pub fn visited(&self) -> &HashSet<TrackId> {
        &self.visited
    }

    pub fn found(&self) -> &[TrackId] {
        &self.found
    }

    /// Vias recorded so far, in discovery order.
    pub fn vias(&self) -> &[TrackId] {
        &self.vias
    }

    /// Walks from `pos` on `mask` until a pad, a junction or a dead end.
    pub fn walk_from(&mut self, mut pos: Point<i32>, mut mask: LayerMask) -> WalkStop {
        let board = self.board;
        loop {
            if let Some(pad) = board.pad_at(pos, mask) {
                return WalkStop::Pad(pad);
            }

            let via = board.via_at(pos, mask, &self.visited);
            if let Some((id, item)) = via.and_then(|id| board.track(id).map(|t| (id, t))) {
                mask = item.layer_mask();
                if !self.vias.contains(&id) {
                    self.vias.push(id);
                    self.found.push(id);
                }
            }

            // The candidate scan borrows the visited set; end it before visiting.
            let (first, second) = {
                let mut candidates = board
                    .items_at(pos, mask, &self.visited)
                    .filter(|&id| Some(id) != via);
                (candidates.next(), candidates.next())
            };
            let Some(next) = first else {
                return WalkStop::Dangling;
            };
            if second.is_some() {
                return WalkStop::Junction;
            }
            let Some(item) = board.track(next) else {
                return WalkStop::Dangling;
            };

            self.visit(next);
            pos = item.other_end(pos);
            mask = item.layer_mask();
        }
    }
}
