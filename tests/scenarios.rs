//! End-to-end annealing scenarios.

use rand::rngs::StdRng;
use rand::SeedableRng;

use tsp_anneal::annealing::{Annealer, Cooling, CoolingSchedule, DeltaMode, Schedule};
use tsp_anneal::harness::{
    gap_to_reference, sample_cost_differences, simulate, suggest_initial_temperature,
};
use tsp_anneal::models::{City, Tour, TspInstance, TspProblem};
use tsp_anneal::moves::neighbor;
use tsp_anneal::tsplib::{parse_instance, parse_tour};
use tsp_anneal::AnnealError;

fn unit_square() -> TspInstance {
    TspInstance::new(vec![
        City::new(0.0, 0.0),
        City::new(1.0, 0.0),
        City::new(1.0, 1.0),
        City::new(0.0, 1.0),
    ])
}

/// Geometric schedule with a fixed chain, expressed through the trait.
struct ChainSchedule {
    t0: f64,
    alpha: f64,
    steps: usize,
    chain: usize,
}

impl CoolingSchedule for ChainSchedule {
    fn initial_temperature(&self) -> f64 {
        self.t0
    }
    fn steps(&self) -> usize {
        self.steps
    }
    fn next_temperature(&self, current: f64, _step: usize) -> f64 {
        self.alpha * current
    }
    fn continue_inner(&self, inner: usize) -> bool {
        inner < self.chain
    }
}

#[test]
fn crossing_square_tour_is_uncrossed() {
    let instance = unit_square();
    let initial = Tour::new(vec![0, 1, 3, 2]).expect("valid");
    assert!((instance.tour_length(initial.cities()) - (2.0 + 2.0 * 2f64.sqrt())).abs() < 1e-10);

    let schedule = ChainSchedule {
        t0: 10.0,
        alpha: 0.9,
        steps: 50,
        chain: 20,
    };
    let mut optimal = 0;
    for seed in 0..30 {
        let mut rng = StdRng::seed_from_u64(seed);
        let outcome = Annealer::new(&instance)
            .run(initial.clone(), &schedule, &mut rng)
            .expect("valid run");
        if (outcome.cost - 4.0).abs() < 1e-9 {
            optimal += 1;
        }
        assert_eq!(outcome.cost_trace.len(), 1_000);
    }
    assert!(optimal >= 27, "only {optimal}/30 runs ended on the optimal tour");
}

#[test]
fn zero_steps_leave_tour_untouched() {
    let instance = unit_square().with_precomputed_distances();
    let initial = Tour::new(vec![0, 1, 3, 2]).expect("valid");
    let mut rng = StdRng::seed_from_u64(0);
    let outcome = Annealer::new(&instance)
        .run(initial.clone(), &Schedule::default().with_steps(0), &mut rng)
        .expect("valid run");
    assert_eq!(outcome.tour, initial);
    assert_eq!(outcome.best_tour, initial);
    assert!(outcome.cost_trace.is_empty());
}

#[test]
fn single_city_is_trivial() {
    let instance = TspInstance::new(vec![City::new(1.0, 1.0)]);
    let tour = Tour::identity(1);
    assert_eq!(instance.tour_length(tour.cities()), 0.0);

    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..20 {
        let (next, _) = neighbor(&tour, &mut rng);
        assert_eq!(next, tour);
    }
    let outcome = Annealer::new(&instance)
        .with_delta_mode(DeltaMode::Relative)
        .run(tour.clone(), &Schedule::geometric(1.0, 0.5, 4, 5), &mut rng)
        .expect("valid run");
    assert_eq!(outcome.tour, tour);
    assert!(outcome.cost_trace.iter().all(|c| *c == 0.0));
}

#[test]
fn on_the_fly_and_precomputed_runs_match() {
    let cities: Vec<City> = (0..14)
        .map(|i| City::new(((i * 37) % 17) as f64, ((i * 11) % 13) as f64))
        .collect();
    let lazy = TspInstance::new(cities.clone());
    let eager = TspInstance::new(cities).with_precomputed_distances();
    let schedule = Schedule::geometric(4.0, 0.9, 15, 40);

    let run = |instance: &TspInstance| {
        let mut rng = StdRng::seed_from_u64(77);
        let initial = Tour::random(14, &mut rng);
        Annealer::new(instance)
            .run(initial, &schedule, &mut rng)
            .expect("valid run")
    };
    let a = run(&lazy);
    let b = run(&eager);
    assert_eq!(a.tour, b.tour);
    for (x, y) in a.cost_trace.iter().zip(&b.cost_trace) {
        assert!((x - y).abs() < 1e-9);
    }
}

#[test]
fn tsplib_instance_anneals_towards_known_tour() {
    let text = "NAME : hexagon6\n\
TYPE : TSP\n\
DIMENSION : 6\n\
EDGE_WEIGHT_TYPE : EUC_2D\n\
NODE_COORD_SECTION\n\
1 2 0\n\
2 1 1.7320508075688772\n\
3 -1 1.7320508075688772\n\
4 -2 0\n\
5 -1 -1.7320508075688772\n\
6 1 -1.7320508075688772\n\
EOF\n";
    let instance = parse_instance(text).expect("valid").with_precomputed_distances();
    let optimum = parse_tour("TOUR_SECTION\n1 2 3 4 5 6\n-1\n").expect("valid");
    let optimal_cost = instance.tour_length(optimum.cities());
    assert!((optimal_cost - 12.0).abs() < 1e-9);

    let mut rng = StdRng::seed_from_u64(5);
    let batch = simulate(
        &instance,
        5,
        &Schedule::geometric(5.0, 0.9, 60, 50),
        DeltaMode::Absolute,
        &mut rng,
    )
    .expect("valid batch");
    let best = batch.best().expect("non-empty");
    assert!((best.best_cost - optimal_cost).abs() < 1e-9);

    let gaps = gap_to_reference(&best.cost_trace, optimal_cost);
    assert!(gaps.iter().all(|g| *g >= -1e-9));
}

#[test]
fn calibrated_temperature_drives_relative_runs() {
    let cities: Vec<City> = (0..20)
        .map(|i| {
            let a = i as f64 * 0.7;
            City::new(50.0 + 40.0 * a.cos(), 50.0 + 25.0 * (1.3 * a).sin())
        })
        .collect();
    let instance = TspInstance::new(cities).with_precomputed_distances();
    let mut rng = StdRng::seed_from_u64(13);

    let diffs = sample_cost_differences(&instance, Tour::random(20, &mut rng), 500, &mut rng)
        .expect("valid walk");
    let t0 = suggest_initial_temperature(&diffs, 0.8).expect("positive mean");

    let schedule = Schedule::default()
        .with_initial_temperature(t0)
        .with_steps(40)
        .with_cooling(Cooling::Geometric { alpha: 0.85 })
        .with_chain_length(100);
    let batch = simulate(&instance, 3, &schedule, DeltaMode::Relative, &mut rng).expect("valid");

    let early = batch.mean_acceptance_rates()[0];
    let late = *batch.mean_acceptance_rates().last().expect("40 steps");
    assert!(early > late, "acceptance should fall as the system cools: {early} vs {late}");
}

#[test]
fn invalid_inputs_fail_before_running() {
    let instance = unit_square();
    let mut rng = StdRng::seed_from_u64(3);
    let engine = Annealer::new(&instance);

    let bad_alpha = Schedule::default().with_cooling(Cooling::Geometric { alpha: 0.0 });
    assert!(matches!(
        engine.run(Tour::identity(4), &bad_alpha, &mut rng),
        Err(AnnealError::InvalidCooling(_))
    ));

    let wrong_size = Tour::identity(5);
    assert_eq!(
        engine.run(wrong_size, &Schedule::default(), &mut rng).unwrap_err(),
        AnnealError::TourLengthMismatch { tour: 5, cities: 4 }
    );
}
