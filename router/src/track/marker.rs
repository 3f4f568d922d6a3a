use super::walker::ChainWalker;
use super::{Chain, TrackError};
use pcb_common::db::core::Board;
use pcb_common::db::indices::TrackId;
use std::collections::HashSet;

/// Finds the chain through `seed` without touching the board. Items are
/// returned in board order.
pub fn trace_chain(board: &Board, seed: TrackId) -> Result<Chain, TrackError> {
    let (members, _) = collect_members(board, seed)?;
    let items: Vec<TrackId> = board
        .order()
        .iter()
        .copied()
        .filter(|id| members.contains(id))
        .collect();
    Ok(measure(board, items))
}

/// Finds the chain through `seed`. With `reorder`, the chain is made
/// contiguous in the board sequence, starting where its first item sat, and
/// the returned items follow that new order.
pub fn mark_track(board: &mut Board, seed: TrackId, reorder: bool) -> Result<Chain, TrackError> {
    if !reorder {
        return trace_chain(board, seed);
    }

    let (members, discovered) = collect_members(board, seed)?;
    let head = board
        .order()
        .iter()
        .copied()
        .find(|id| members.contains(id))
        .ok_or(TrackError::EmptyChain)?;

    let mut items = Vec::with_capacity(members.len());
    items.push(head);
    items.extend(discovered.into_iter().filter(|&id| id != head && members.contains(&id)));
    board.make_contiguous(&items);

    log::debug!("Reordered chain of {} items at {:?}", items.len(), head);
    Ok(measure(board, items))
}

/// Members of the chain through `seed`, plus every item in the order it was
/// discovered.
fn collect_members(
    board: &Board,
    seed: TrackId,
) -> Result<(HashSet<TrackId>, Vec<TrackId>), TrackError> {
    let item = board.track(seed).ok_or(TrackError::UnknownItem(seed))?;

    let mut walker = ChainWalker::new(board);
    walker.visit(seed);

    if item.is_via() {
        // A via on a pad terminal is bounded there: it is a chain of its own.
        if board.pad_at(item.start, item.layer_mask()).is_some() {
            return Ok((walker.visited().clone(), vec![seed]));
        }
        let neighbours: Vec<TrackId> = board
            .items_at(item.start, item.layer_mask(), walker.visited())
            .take(3)
            .collect();
        // A via joining three or more items is a chain of its own.
        if neighbours.len() >= 3 {
            return Ok((walker.visited().clone(), vec![seed]));
        }
        for id in neighbours {
            let Some(next) = board.track(id) else {
                continue;
            };
            if walker.visit(id) {
                walker.walk_from(next.other_end(item.start), next.layer_mask());
            }
        }
    } else {
        let mask = item.layer_mask();
        walker.walk_from(item.start, mask);
        walker.walk_from(item.end, mask);
    }

    let mut members = walker.visited().clone();
    resolve_vias(board, walker.vias(), &mut members);
    Ok((members, walker.found().to_vec()))
}

/// Adds the recorded vias that belong to the chain. A via stays when the
/// items it touches outside the chain all sit on one layer: removing it would
/// not disconnect anything else. Vias are resolved latest first.
fn resolve_vias(board: &Board, vias: &[TrackId], members: &mut HashSet<TrackId>) {
    for &via_id in vias.iter().rev() {
        let Some(via) = board.track(via_id) else {
            continue;
        };
        members.insert(via_id);

        let others: Vec<TrackId> = board.items_at(via.start, via.layer_mask(), members).collect();
        let mut layers = others.iter().filter_map(|&id| board.track(id)).map(|t| t.layer);
        if let Some(first) = layers.next() {
            if layers.any(|layer| layer != first) {
                members.remove(&via_id);
            }
        }
    }
}

pub(crate) fn measure(board: &Board, items: Vec<TrackId>) -> Chain {
    let mut length = 0.0;
    let mut die_length = 0.0;
    for item in items.iter().filter_map(|&id| board.track(id)) {
        length += item.length();
        for pad in [item.start_pad, item.end_pad].into_iter().flatten() {
            if let Some(pad) = board.pad(pad) {
                die_length += pad.die_length as f64;
            }
        }
    }

    Chain {
        items,
        length: length.round() as i64,
        die_length: die_length.round() as i64,
    }
}
