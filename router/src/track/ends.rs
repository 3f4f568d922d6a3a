use super::TrackError;
use pcb_common::db::core::Board;
use pcb_common::db::indices::TrackId;
use pcb_common::db::item::TrackItem;
use pcb_common::geom::point::Point;

/// Terminal items of an oriented chain: `start`'s start point and `end`'s end
/// point are the two free ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackEnds {
    pub start: TrackId,
    pub end: TrackId,
}

/// Orients the `count` items that follow `head` in the board sequence, as
/// left there by a reordering [`mark_track`](super::mark_track).
pub fn track_ends(board: &mut Board, head: TrackId, count: usize) -> Result<TrackEnds, TrackError> {
    let at = board.position_of(head).ok_or(TrackError::UnknownItem(head))?;
    let chain: Vec<TrackId> = board.order().iter().skip(at).take(count).copied().collect();
    orient_chain(board, &chain)
}

/// Finds the two items holding the free ends of `chain` and swaps their
/// endpoints (with the pad attachments) so the chain reads from
/// `start.start` to `end.end`. Only items of `chain` count as connections.
pub fn orient_chain(board: &mut Board, chain: &[TrackId]) -> Result<TrackEnds, TrackError> {
    match chain {
        [] => return Err(TrackError::EmptyChain),
        [only] => {
            if !board.contains(*only) {
                return Err(TrackError::UnknownItem(*only));
            }
            return Ok(TrackEnds {
                start: *only,
                end: *only,
            });
        }
        _ => {}
    }

    let mut start: Option<TrackId> = None;
    for &id in chain {
        let item = board.track(id).ok_or(TrackError::UnknownItem(id))?;
        if item.is_via() {
            continue;
        }
        let (from, to) = (item.start, item.end);

        if is_free_end(board, chain, id, from) {
            match start {
                None => start = Some(id),
                Some(first) => {
                    flip(board, id);
                    return Ok(TrackEnds { start: first, end: id });
                }
            }
        }

        if is_free_end(board, chain, id, to) {
            match start {
                None => {
                    flip(board, id);
                    start = Some(id);
                }
                Some(first) => return Ok(TrackEnds { start: first, end: id }),
            }
        }
    }

    log::debug!("No two free ends among {} chain items", chain.len());
    Err(TrackError::ClosedLoop)
}

/// True when no other chain item touches `pos` on `id`'s layers, looking
/// through a chain via sitting there.
fn is_free_end(board: &Board, chain: &[TrackId], id: TrackId, pos: Point<i32>) -> bool {
    let Some(item) = board.track(id) else {
        return false;
    };
    let mut mask = item.layer_mask();

    let via = touching(board, chain, id, pos)
        .find(|(_, t)| t.is_via() && t.layer_mask().intersects(mask))
        .map(|(via, t)| {
            mask |= t.layer_mask();
            via
        });

    !touching(board, chain, id, pos).any(|(other, t)| Some(other) != via && t.layer_mask().intersects(mask))
}

/// Chain items other than `id` with an endpoint at `pos`.
fn touching<'a>(
    board: &'a Board,
    chain: &'a [TrackId],
    id: TrackId,
    pos: Point<i32>,
) -> impl Iterator<Item = (TrackId, &'a TrackItem)> + 'a {
    chain
        .iter()
        .copied()
        .filter(move |&other| other != id)
        .filter_map(move |other| board.track(other).map(|t| (other, t)))
        .filter(move |(_, t)| t.touches(pos))
}

fn flip(board: &mut Board, id: TrackId) {
    if let Some(item) = board.track_mut(id) {
        item.swap_ends();
    }
}
