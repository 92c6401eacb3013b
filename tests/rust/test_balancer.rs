/// Integration tests for the balancer decision logic.
use slacksim_balancer::*;
use slacksim_core::workload::RecordedLatencies;

fn classic_pool() -> Balancer {
    Balancer::from_weights([("A", 3), ("B", 4), ("C", 7)]).unwrap()
}

#[test]
fn test_first_selection_goes_to_the_tightest_backend() {
    let mut balancer = classic_pool();

    let chosen = balancer.select_backend().unwrap();
    assert_eq!(chosen.name(), "A");
    assert_eq!(chosen.current_load(), 1);
    assert_eq!(chosen.slack_time(), 2);
}

#[test]
fn test_optimization_cycle_reshapes_the_pool() {
    let mut balancer = classic_pool();
    let mut workload = RecordedLatencies::new(vec![0, 300, 150]).unwrap();

    balancer.optimize_weights(&mut workload);

    let weights: Vec<i64> = balancer.backends().iter().map(|b| b.weight()).collect();
    assert_eq!(weights, [3, 2, 4]);

    let energies: Vec<f64> = balancer
        .backends()
        .iter()
        .map(|b| b.energy_estimate())
        .collect();
    assert_eq!(energies, [30.0, 0.0, 35.0]);
    assert_eq!(workload.replayed(), 3);
}

#[test]
fn test_empty_pool_behavior() {
    let mut balancer = Balancer::new(Vec::new()).unwrap();
    let mut workload = RecordedLatencies::new(vec![120]).unwrap();

    balancer.optimize_weights(&mut workload);
    assert_eq!(workload.replayed(), 0, "empty pool must not consume samples");

    assert_eq!(
        balancer.select_backend().unwrap_err(),
        BalancerError::EmptyPool
    );
}

#[test]
fn test_tied_slack_resolves_to_pool_order() {
    let mut balancer = Balancer::from_weights([("x", 4), ("y", 4)]).unwrap();
    assert_eq!(balancer.select_backend().unwrap().name(), "x");
    // x's slack dropped to 3, strictly below y's 4; it stays the target.
    assert_eq!(balancer.select_backend().unwrap().name(), "x");
}

#[test]
fn test_sustained_slow_workload_decays_weights_to_the_floor() {
    let mut balancer = classic_pool();
    let mut workload = FixedSampler::new(300);

    for _ in 0..10 {
        balancer.optimize_weights(&mut workload);
    }

    for backend in balancer.backends() {
        assert_eq!(backend.weight(), MIN_WEIGHT);
        assert_eq!(backend.energy_estimate(), 0.0);
    }
    assert_eq!(balancer.optimization_cycles(), 10);
}

#[test]
fn test_sample_above_the_ceiling_pushes_energy_negative() {
    let mut balancer = Balancer::from_weights([("hot", 6)]).unwrap();
    let mut workload = RecordedLatencies::new(vec![450]).unwrap();

    balancer.optimize_weights(&mut workload);

    let backend = &balancer.backends()[0];
    assert_eq!(backend.energy_estimate(), -30.0);
    assert_eq!(backend.weight(), 2); // floor(6 / 2.5)
}

#[test]
fn test_interleaved_selection_and_optimization_hold_invariants() {
    let mut balancer = classic_pool();
    let mut workload = RecordedLatencies::new(vec![80, 220, 140, 310, 0]).unwrap();

    for round in 0..20 {
        balancer.optimize_weights(&mut workload);
        let loads_before: Vec<u64> = balancer
            .backends()
            .iter()
            .map(|b| b.current_load())
            .collect();

        balancer.select_backend().unwrap();

        let total_after: u64 = balancer.backends().iter().map(|b| b.current_load()).sum();
        let total_before: u64 = loads_before.iter().sum();
        assert_eq!(total_after, total_before + 1, "round {}", round);

        for backend in balancer.backends() {
            assert!(backend.weight() >= MIN_WEIGHT);
            assert_eq!(
                backend.slack_time(),
                backend.weight() - backend.current_load() as i64
            );
        }
    }
}

#[test]
fn test_snapshots_serialize_for_export() {
    let mut balancer = classic_pool();
    balancer.select_backend().unwrap();

    let snaps = balancer.snapshots();
    let json = serde_json::to_string(&snaps).unwrap();
    let restored: Vec<BackendSnapshot> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.len(), 3);
    assert_eq!(restored[0].name, "A");
    assert_eq!(restored[0].current_load, 1);
    assert_eq!(restored[2].rated_energy, 70.0);
}
