//! MCTS benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! Measures full searches at varying simulation budgets, searches from
//! different game phases, and the hot tree operations (expansion,
//! rollout, backpropagation).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use games_nogo::{Board, Color};
use mcts::{MctsSearch, PlayoutPolicy, SearchConfig, SearchTree};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// A mid-game position reached by seeded random self-play.
fn midgame_position(seed: u64, plies: usize) -> (Board, Color) {
    let mut playout = PlayoutPolicy::new();
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut board = Board::new();
    let mut color = Color::Black;

    for _ in 0..plies {
        if playout.play_random(&mut board, color, &mut rng).is_none() {
            break;
        }
        color = color.opponent();
    }
    (board, color)
}

fn bench_search_simulations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search_simulations");

    for sims in [50u32, 100, 200, 400] {
        group.throughput(Throughput::Elements(sims as u64));
        group.bench_with_input(BenchmarkId::new("empty_board", sims), &sims, |b, &sims| {
            let config = SearchConfig::default().with_simulations(sims);

            b.iter(|| {
                let mut search = MctsSearch::new(config.clone());
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                black_box(search.search(&Board::new(), Color::Black, &mut rng))
            });
        });
    }

    group.finish();
}

fn bench_game_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_game_phases");
    let config = SearchConfig::default().with_simulations(200);

    group.bench_function("opening", |b| {
        b.iter(|| {
            let mut search = MctsSearch::new(config.clone());
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            black_box(search.search(&Board::new(), Color::Black, &mut rng))
        });
    });

    let (midgame, to_move) = midgame_position(7, 30);
    group.bench_function("midgame", |b| {
        b.iter(|| {
            let mut search = MctsSearch::new(config.clone());
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            black_box(search.search(&midgame, to_move, &mut rng))
        });
    });

    let rave_config = SearchConfig::default().with_rave().with_simulations(200);
    group.bench_function("opening_rave", |b| {
        b.iter(|| {
            let mut search = MctsSearch::new(rave_config.clone());
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            black_box(search.search(&Board::new(), Color::Black, &mut rng))
        });
    });

    group.finish();
}

fn bench_tree_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_tree_ops");

    group.bench_function("expand_empty_root", |b| {
        b.iter(|| {
            let mut tree = SearchTree::new(Board::new(), Color::Black);
            tree.expand(tree.root());
            black_box(tree.len())
        });
    });

    let (midgame, to_move) = midgame_position(11, 40);
    group.bench_function("rollout_midgame", |b| {
        let mut playout = PlayoutPolicy::new();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        b.iter(|| black_box(playout.rollout(&midgame, to_move, &mut rng)));
    });

    group.bench_function("backup_depth_chain", |b| {
        b.iter_batched(
            || {
                // A short selected path: root -> child -> grandchild.
                let mut tree = SearchTree::new(Board::new(), Color::Black);
                tree.expand(tree.root());
                let child = tree.get(tree.root()).children[0];
                tree.expand(child);
                let grandchild = tree.get(child).children[0];
                (tree, grandchild)
            },
            |(mut tree, leaf)| {
                tree.backup(leaf, Color::Black, 1, 0.5);
                black_box(tree)
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_search_simulations,
    bench_game_phases,
    bench_tree_operations,
);

criterion_main!(benches);
