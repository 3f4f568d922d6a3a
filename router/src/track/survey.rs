use super::Chain;
use super::marker::{measure, trace_chain};
use pcb_common::db::core::Board;
use pcb_common::db::indices::TrackId;
use pcb_common::util::profiler::ScopedTimer;
use rayon::prelude::*;
use std::collections::HashSet;

/// Splits the board into chains, traced read-only from each item in board
/// order. A seed already covered by an earlier chain is skipped, and items an
/// earlier chain claimed are dropped from later ones, so every item is
/// counted exactly once. Chains are returned in the order of their seeds.
pub fn survey_chains(board: &Board, parallel: bool) -> Vec<Chain> {
    let mut timer = ScopedTimer::new("Chain survey");
    let seeds = board.order();
    let mut survey = Survey::new(board);

    if parallel {
        let traced: Vec<(TrackId, Chain)> = seeds
            .par_iter()
            .filter_map(|&seed| trace_chain(board, seed).ok().map(|chain| (seed, chain)))
            .collect();
        for (seed, chain) in traced {
            survey.accept(seed, chain);
        }
    } else {
        for &seed in seeds {
            if survey.covers(seed) {
                continue;
            }
            if let Ok(chain) = trace_chain(board, seed) {
                survey.accept(seed, chain);
            }
        }
    }

    timer.record_items(seeds.len());
    log::info!(
        "Surveyed {} items: {} chains ({})",
        seeds.len(),
        survey.chains.len(),
        if parallel { "parallel" } else { "sequential" }
    );
    survey.chains
}

struct Survey<'a> {
    board: &'a Board,
    covered: HashSet<TrackId>,
    chains: Vec<Chain>,
}

impl<'a> Survey<'a> {
    fn new(board: &'a Board) -> Self {
        Self {
            board,
            covered: HashSet::new(),
            chains: Vec::new(),
        }
    }

    fn covers(&self, id: TrackId) -> bool {
        self.covered.contains(&id)
    }

    fn accept(&mut self, seed: TrackId, chain: Chain) {
        if self.covers(seed) {
            return;
        }
        let total = chain.items.len();
        let items: Vec<TrackId> = chain
            .items
            .iter()
            .copied()
            .filter(|&id| self.covered.insert(id))
            .collect();
        if items.len() == total {
            self.chains.push(chain);
        } else {
            log::debug!("Chain at {:?} shares {} items with earlier chains", seed, total - items.len());
            self.chains.push(measure(self.board, items));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcb_common::db::item::TrackItem;
    use pcb_common::geom::point::Point;

    fn seg(board: &mut Board, a: (i32, i32), b: (i32, i32)) -> TrackId {
        board.add_track(TrackItem::segment(Point::new(a.0, a.1), Point::new(b.0, b.1), 10, 0))
    }

    fn board() -> Board {
        let mut board = Board::new();
        seg(&mut board, (0, 0), (100, 0));
        seg(&mut board, (1000, 0), (1000, 100));
        seg(&mut board, (100, 0), (200, 0));
        seg(&mut board, (1000, 100), (1000, 300));
        seg(&mut board, (5000, 5000), (5100, 5000));
        board
    }

    #[test]
    fn finds_each_chain_once() {
        let board = board();
        let chains = survey_chains(&board, false);
        let lengths: Vec<i64> = chains.iter().map(|c| c.length).collect();
        assert_eq!(lengths, vec![200, 300, 100]);
        assert_eq!(chains.iter().map(Chain::len).sum::<usize>(), board.num_tracks());
    }

    #[test]
    fn junction_via_is_counted_once() {
        let mut board = Board::new();
        let v = board.add_track(TrackItem::via(Point::new(0, 100), 40, 0, 15));
        let a = seg(&mut board, (0, 0), (0, 100));
        let b = board.add_track(TrackItem::segment(Point::new(0, 100), Point::new(100, 100), 10, 15));
        let c = board.add_track(TrackItem::segment(Point::new(0, 100), Point::new(-100, 100), 10, 15));

        // Traced alone, the chain through `a` keeps the via as well.
        assert!(trace_chain(&board, a).unwrap().contains(v));

        let chains = survey_chains(&board, false);
        let items: Vec<Vec<TrackId>> = chains.iter().map(|c| c.items.clone()).collect();
        assert_eq!(items, vec![vec![v], vec![a], vec![b], vec![c]]);
        assert_eq!(chains[1].length, 100);
        assert_eq!(chains, survey_chains(&board, true));
    }

    #[test]
    fn parallel_matches_sequential() {
        let board = board();
        assert_eq!(survey_chains(&board, true), survey_chains(&board, false));
    }
}
