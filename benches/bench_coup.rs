use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use rand::{Rng, thread_rng};
use coup_engine::ai::RandomDecider;
use coup_engine::{Coup, Player, Rules};

fn complete_game(num_players: usize) {
    let mut rng = thread_rng();
    let players = (0..num_players)
        .map(|idx| Player::ai(format!("P{idx}"), RandomDecider::new(rng.gen())))
        .collect();

    let mut coup = black_box(Coup::new(players, Rules::default(), rng.gen()).unwrap());
    for _ in 0..1000 {
        if coup.handle_turn().unwrap() {
            break;
        }
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("complete_game");
    for num_players in 2..=6usize {
        group.bench_with_input(BenchmarkId::from_parameter(num_players), &num_players, |b, &num_players| {
            b.iter(|| complete_game(num_players))
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
