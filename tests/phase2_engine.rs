//! Phase 2 tests: The clustering engine end to end.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use art2a_cluster::{
    Art2aConfig, Art2aError, ClusterResult, ClusteringEngine, EngineState, PermutationGenerator,
};

// ==================== Helpers ====================

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn run(data: Vec<Vec<f64>>, vigilance: f64, seed: u64) -> ClusterResult<f64> {
    init_logger();
    let mut engine = ClusteringEngine::new(data, Art2aConfig::new(vigilance)).unwrap();
    engine.cluster_result(false, seed).unwrap()
}

/// Random non-negative matrix; roughly one in ten components is zero.
fn random_matrix(rng: &mut impl Rng, rows: usize, dim: usize) -> Vec<Vec<f64>> {
    (0..rows)
        .map(|_| {
            let mut row: Vec<f64> = (0..dim)
                .map(|_| {
                    if rng.gen_bool(0.1) {
                        0.0
                    } else {
                        rng.gen_range(0.0..1.0)
                    }
                })
                .collect();
            row[rng.gen_range(0..dim)] += 0.5;
            row
        })
        .collect()
}

// ==================== Scenario Tests ====================

#[test]
fn test_scenario_two_groups() {
    let data = vec![
        vec![1.0, 0.0],
        vec![0.99, 0.14],
        vec![0.0, 1.0],
        vec![0.02, 0.999],
    ];
    for seed in 0..5 {
        let result = run(data.clone(), 0.8, seed);
        assert_eq!(result.number_of_detected_clusters(), 2);
        let view = result.cluster_view();
        assert_eq!(view[0], view[1]);
        assert_eq!(view[2], view[3]);
        assert_ne!(view[0], view[2]);
    }
}

#[test]
fn test_scenario_high_vigilance_fragments() {
    let data: Vec<Vec<f64>> = (0..10).map(|k| vec![1.0, k as f64]).collect();
    let result = run(data, 0.999999, 42);
    assert_eq!(result.number_of_detected_clusters(), 10);
    for c in 0..10 {
        assert_eq!(result.cluster_indices(c).unwrap().len(), 1);
    }
}

#[test]
fn test_scenario_low_vigilance_single_cluster() {
    let mut rng = StdRng::seed_from_u64(5);
    let data: Vec<Vec<f64>> = (0..25)
        .map(|_| (0..6).map(|_| rng.gen_range(0.01..1.0)).collect())
        .collect();
    let result = run(data, 0.000001, 8);
    assert_eq!(result.number_of_detected_clusters(), 1);
    assert_eq!(result.cluster_indices(0).unwrap(), (0..25).collect::<Vec<_>>());
}

#[test]
fn test_scenario_null_row_excluded() {
    let data = vec![
        vec![1.0, 0.2, 0.0],
        vec![0.0, 0.0, 0.0],
        vec![0.0, 0.3, 1.0],
        vec![0.9, 0.1, 0.0],
    ];
    let result = run(data, 0.7, 11);
    assert_eq!(result.cluster_view()[1], None);
    assert_eq!(result.unclassified_indices(), vec![1]);
    let total: usize = result.cluster_sizes().iter().sum();
    assert_eq!(total, 3);
    for c in 0..result.number_of_detected_clusters() {
        assert!(!result.cluster_indices(c).unwrap().contains(&1));
    }
}

#[test]
fn test_budget_exhaustion_raises_convergence_failure() {
    init_logger();
    let data = vec![vec![1.0f64, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]];
    let mut engine =
        ClusteringEngine::new(data, Art2aConfig::new(0.9).max_epochs(1)).unwrap();
    let err = engine.cluster_result(true, 3).unwrap_err();
    assert!(matches!(err, Art2aError::ConvergenceFailure { epochs: 1 }));
    assert!(!err.is_configuration_error());
    assert!(matches!(engine.state(), EngineState::Failed { .. }));
}

#[test]
fn test_budget_exhausted_while_inputs_keep_moving() {
    init_logger();
    // Unit vectors at 0, 30 and 60 degrees. At vigilance 0.8 only neighbours
    // resonate, and with learning rate 1 a cluster jumps onto its last input.
    let deg = |d: f64| vec![d.to_radians().cos(), d.to_radians().sin()];
    let data = vec![deg(0.0), deg(30.0), deg(60.0)];

    // A seed that presents the inputs in order in both epochs: epoch 1 chains
    // all three into cluster 0 and leaves it at 60 degrees, so in epoch 2 input 0
    // no longer resonates and moves to a new cluster.
    let seed = (0..100_000u64)
        .find(|&s| {
            let mut generator = PermutationGenerator::new(s);
            generator.next_permutation(3) == [0, 1, 2]
                && generator.next_permutation(3) == [0, 1, 2]
        })
        .unwrap();

    let config = Art2aConfig::new(0.8).max_epochs(2).learning_rate(1.0);
    let mut engine = ClusteringEngine::new(data, config).unwrap();
    let err = engine.cluster_result(true, seed).unwrap_err();
    assert!(matches!(err, Art2aError::ConvergenceFailure { epochs: 2 }));
    assert!(matches!(engine.state(), EngineState::Failed { epochs: 2, .. }));
}

#[test]
fn test_converges_after_at_least_two_epochs() {
    let result = run(vec![vec![1.0, 1.0]], 0.5, 0);
    assert_eq!(result.number_of_detected_clusters(), 1);
    assert_eq!(result.number_of_epochs(), 2);
}

// ==================== Property Tests ====================

#[test]
fn test_deterministic_for_same_seed() {
    let mut rng = StdRng::seed_from_u64(17);
    let data = random_matrix(&mut rng, 60, 12);
    let mut engine = ClusteringEngine::new(data, Art2aConfig::new(0.6)).unwrap();
    let a = engine.cluster_result(false, 2024).unwrap();
    let b = engine.cluster_result(false, 2024).unwrap();
    assert_eq!(a.cluster_view(), b.cluster_view());
    assert_eq!(a.number_of_epochs(), b.number_of_epochs());
    assert_eq!(a.number_of_detected_clusters(), b.number_of_detected_clusters());
}

#[test]
fn test_result_or_convergence_failure_never_empty() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(3);
    for vigilance in [0.05, 0.3, 0.5, 0.7, 0.9, 0.99] {
        let data = random_matrix(&mut rng, 40, 8);
        let config = Art2aConfig::new(vigilance).max_epochs(25);
        let mut engine = ClusteringEngine::new(data, config).unwrap();
        match engine.cluster_result(false, rng.gen()) {
            Ok(result) => {
                assert!(result.number_of_detected_clusters() >= 1);
                let count = result.number_of_detected_clusters();
                for c in result.cluster_view() {
                    assert!(c.map_or(false, |c| c < count));
                }
            }
            Err(Art2aError::ConvergenceFailure { epochs }) => assert_eq!(epochs, 25),
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
}

#[test]
fn test_cluster_sizes_sum_to_classified_inputs() {
    let mut rng = StdRng::seed_from_u64(23);
    let mut data = random_matrix(&mut rng, 50, 10);
    data[7] = vec![0.0; 10];
    data[31] = vec![0.0; 10];
    let result = run(data, 0.75, 9);
    let classified = result.cluster_view().iter().filter(|c| c.is_some()).count();
    assert_eq!(classified, 48);
    assert_eq!(result.cluster_sizes().iter().sum::<usize>(), classified);
}

#[test]
fn test_higher_vigilance_gives_no_fewer_clusters_on_separated_data() {
    let data = vec![
        vec![1.0, 0.0, 0.0],
        vec![0.95, 0.05, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.95, 0.05],
        vec![0.0, 0.0, 1.0],
        vec![0.05, 0.0, 0.95],
    ];
    let coarse = run(data.clone(), 0.2, 1);
    let fine = run(data, 0.9, 1);
    assert!(coarse.number_of_detected_clusters() <= fine.number_of_detected_clusters());
    assert_eq!(fine.number_of_detected_clusters(), 3);
}

#[test]
fn test_single_precision_run() {
    let data: Vec<Vec<f32>> = vec![
        vec![1.0, 0.0],
        vec![0.99, 0.14],
        vec![0.0, 1.0],
        vec![0.02, 0.999],
    ];
    let mut engine = ClusteringEngine::new(data, Art2aConfig::new(0.8)).unwrap();
    let result = engine.cluster_result(false, 1).unwrap();
    assert_eq!(result.number_of_detected_clusters(), 2);
    assert!((result.vigilance_parameter() - 0.8f32).abs() < 1e-6);
}

#[test]
fn test_randomized_indices_are_a_permutation() {
    let data: Vec<Vec<f64>> = (0..12).map(|i| vec![1.0, i as f64]).collect();
    let engine = ClusteringEngine::new(data, Art2aConfig::new(0.5)).unwrap();
    let mut order = engine.randomize_vector_indices(77);
    assert_eq!(order, engine.randomize_vector_indices(77));
    order.sort_unstable();
    assert_eq!(order, (0..12).collect::<Vec<_>>());
}
