use crate::db::core::Board;
use crate::db::item::{Pad, PadShape, TrackItem};
use crate::db::layer::{BOTTOM_COPPER, LayerId, TOP_COPPER};
use crate::geom::point::Point;
use crate::util::config::GeneratorConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const LATTICE: i32 = 500;
const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Builds a synthetic board: `chains` random walks of `segments_per_chain`
/// segments on a lattice, each starting and ending on a pad, switching
/// between the outer copper layers through vias.
pub fn generate_board(config: &GeneratorConfig) -> Board {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut board = Board::new();

    let cols = (config.width / LATTICE).max(2);
    let rows = (config.height / LATTICE).max(2);

    log::info!(
        "Generating board: {} chains x {} segments on a {}x{} lattice (seed {})",
        config.chains,
        config.segments_per_chain,
        cols,
        rows,
        config.seed
    );

    for chain in 0..config.chains {
        let net = chain as u32 + 1;
        let mut pos = Point::new(
            rng.gen_range(0..cols) * LATTICE,
            rng.gen_range(0..rows) * LATTICE,
        );
        let mut layer: LayerId = if rng.gen_bool(0.5) { TOP_COPPER } else { BOTTOM_COPPER };

        board.add_pad(random_pad(&mut rng, format!("N{}-A", net), pos, config));

        for _ in 0..config.segments_per_chain {
            if rng.gen_bool(config.via_ratio.clamp(0.0, 1.0)) {
                board.add_track(
                    TrackItem::via(pos, config.track_width * 3, BOTTOM_COPPER, TOP_COPPER)
                        .with_net(net),
                );
                layer = if layer == TOP_COPPER { BOTTOM_COPPER } else { TOP_COPPER };
            }

            let (dx, dy) = DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())];
            let steps = rng.gen_range(1..=4);
            let next = Point::new(
                (pos.x + dx * steps * LATTICE).clamp(0, (cols - 1) * LATTICE),
                (pos.y + dy * steps * LATTICE).clamp(0, (rows - 1) * LATTICE),
            );
            if next == pos {
                continue;
            }

            board.add_track(
                TrackItem::segment(pos, next, config.track_width, layer).with_net(net),
            );
            pos = next;
        }

        board.add_pad(random_pad(&mut rng, format!("N{}-B", net), pos, config));
    }

    let links = board.link_pads();
    log::info!(
        "Generated {} track items and {} pads ({} pad attachments)",
        board.num_tracks(),
        board.num_pads(),
        links
    );
    board
}

fn random_pad(rng: &mut StdRng, name: String, pos: Point<i32>, config: &GeneratorConfig) -> Pad {
    let w = config.track_width * rng.gen_range(3..=6);
    let h = config.track_width * rng.gen_range(3..=6);
    let shape = match rng.gen_range(0..4) {
        0 => PadShape::Circle,
        1 => PadShape::Rect,
        2 => PadShape::Oval,
        _ => PadShape::Trapezoid {
            delta: Point::new(config.track_width, 0),
        },
    };
    let orientation = [0, 450, 900, 1800, 2700][rng.gen_range(0..5)];
    let die_length = if config.max_die_length > 0 {
        rng.gen_range(0..=config.max_die_length)
    } else {
        0
    };

    Pad::new(name, pos, Point::new(w, h), shape)
        .with_orientation(orientation)
        .with_die_length(die_length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_board() {
        let config = GeneratorConfig {
            chains: 10,
            ..GeneratorConfig::default()
        };
        let a = generate_board(&config);
        let b = generate_board(&config);

        assert_eq!(a.num_tracks(), b.num_tracks());
        assert_eq!(a.num_pads(), 20);
        let ta: Vec<_> = a.tracks().map(|(_, t)| t.clone()).collect();
        let tb: Vec<_> = b.tracks().map(|(_, t)| t.clone()).collect();
        assert_eq!(ta, tb);
    }

    #[test]
    fn tracks_stay_on_the_board() {
        let config = GeneratorConfig {
            chains: 25,
            width: 5_000,
            height: 5_000,
            ..GeneratorConfig::default()
        };
        let board = generate_board(&config);
        for (_, t) in board.tracks() {
            for p in [t.start, t.end] {
                assert!(p.x >= 0 && p.x < 5_000);
                assert!(p.y >= 0 && p.y < 5_000);
            }
        }
    }
}
