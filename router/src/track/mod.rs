//! Connectivity analysis over the board's track sequence.
//!
//! A chain is a maximal run of items where consecutive items share an
//! endpoint on a common layer. It ends on a pad, at a junction of three or
//! more items, or at a dangling end.

pub mod ends;
pub mod marker;
pub mod survey;
pub mod walker;

pub use ends::{TrackEnds, orient_chain, track_ends};
pub use marker::{mark_track, trace_chain};
pub use survey::survey_chains;
pub use walker::{ChainWalker, WalkStop};

use pcb_common::db::indices::TrackId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackError {
    #[error("track item {0} is not on the board")]
    UnknownItem(TrackId),
    #[error("track is a closed loop: no free end found")]
    ClosedLoop,
    #[error("chain is empty")]
    EmptyChain,
}

/// A marked chain. `items[0]` is the head: the chain item that comes first
/// in the board sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain {
    pub items: Vec<TrackId>,
    /// Summed copper length, rounded.
    pub length: i64,
    /// Summed package length of the pads at the chain's ends, rounded.
    pub die_length: i64,
}

impl Chain {
    pub fn head(&self) -> TrackId {
        self.items[0]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.items.contains(&id)
    }
}
