use criterion::{Criterion, criterion_group, criterion_main};
use mines_core::*;
use std::hint::black_box;

fn opened_game(hazard_count: TileCount, opened: usize) -> GameState {
    let config = GameConfig::new(hazard_count, 10.0)
        .unwrap()
        .with_advisor(AdvisorConfig::disabled());
    let layout = RandomLayoutGenerator::new(7).generate(hazard_count).unwrap();
    let safe: Vec<TileId> = (0..GRID_SIZE as TileId)
        .filter(|&tile_id| !layout.contains_hazard(tile_id))
        .take(opened)
        .collect();

    let mut state = GameState::from_layout(&config, layout).unwrap();
    for tile_id in safe {
        state = state.reveal_tile(tile_id).unwrap().0;
    }
    state
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for hazard_count in [1, 5, 12, 24] {
        group.bench_function(format!("{hazard_count}_hazards"), |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                RandomLayoutGenerator::new(black_box(seed)).generate(hazard_count)
            })
        });
    }
    group.finish();
}

fn bench_advisory(c: &mut Criterion) {
    let mut group = c.benchmark_group("advisory");
    for (hazard_count, opened) in [(3, 0), (5, 6), (8, 12)] {
        let state = opened_game(hazard_count, opened);
        let obs = Observation::from_state(&state);
        group.bench_function(format!("{hazard_count}h_{opened}open"), |b| {
            b.iter(|| Advisory::compute(black_box(&obs), StrategyMode::Balanced))
        });
    }
    group.finish();
}

fn bench_reveal(c: &mut Criterion) {
    let state = opened_game(5, 4).with_advisor(Some(StrategyMode::Balanced));
    let target = (0..GRID_SIZE as TileId)
        .find(|&tile_id| {
            let tile = state.tile(tile_id).unwrap();
            !tile.is_revealed && !tile.is_hazard
        })
        .unwrap();

    c.bench_function("reveal_with_advisory", |b| {
        b.iter(|| black_box(&state).reveal_tile(target))
    });
}

criterion_group!(benches, bench_generate, bench_advisory, bench_reveal);
criterion_main!(benches);
