use std::collections::BTreeSet;
use std::thread;

use draft_lottery::{
    DraftConfig, LotteryError, OddsTable, run_complete_lottery, run_seeded_lottery,
    valid_position_range, validate_round,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn default_league_produces_fifty_valid_picks() {
    let cfg = DraftConfig::default_config();
    let order = cfg.identity_order();
    for seed in 0..50 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let picks = run_complete_lottery(&cfg, &order, &mut rng).unwrap();
        assert_eq!(picks.len(), 50);

        let rounds: BTreeSet<u32> = picks.iter().map(|p| p.round).collect();
        assert_eq!(rounds, (1..=5).collect::<BTreeSet<u32>>());
        for round in 1..=5 {
            let round_picks: Vec<_> = picks.iter().filter(|p| p.round == round).cloned().collect();
            assert_eq!(round_picks.len(), 10);
            assert!(validate_round(&round_picks, 10, 2).is_empty());
            let numbers: Vec<u32> = round_picks.iter().map(|p| p.pick_number).collect();
            assert_eq!(numbers, (1..=10).collect::<Vec<_>>());
        }
        assert!(picks.iter().all(|p| (-2..=2).contains(&p.movement)));
    }
}

#[test]
fn every_pick_lands_inside_its_window() {
    let cfg = DraftConfig::default_config();
    let draw = run_seeded_lottery(&cfg, &cfg.identity_order(), 2024).unwrap();
    for pick in &draw.picks {
        let range = valid_position_range(pick.original_position, 10, 2);
        assert!(range.contains(pick.pick_number), "{pick}");
    }
}

#[test]
fn wider_cap_and_larger_league_hold_invariants() {
    let mut cfg = DraftConfig::default_config();
    cfg.team_count = 14;
    cfg.round_count = 3;
    cfg.teams = (1..=14).map(|p| format!("Club {p}")).collect();
    cfg.team_odds = (1..=14).fold(OddsTable::new(), |mut table, position| {
        table.insert(position, f64::from(position));
        table
    });
    cfg.settings.max_movement = 3;
    assert!(cfg.validate().is_ok());

    let mut rng = SmallRng::seed_from_u64(14);
    let picks = run_complete_lottery(&cfg, &cfg.identity_order(), &mut rng).unwrap();
    assert_eq!(picks.len(), 42);
    for round in 1..=3 {
        let round_picks: Vec<_> = picks.iter().filter(|p| p.round == round).cloned().collect();
        assert!(validate_round(&round_picks, 14, 3).is_empty());
    }
    assert!(picks.iter().all(|p| p.team_id.starts_with("Club ")));
}

#[test]
fn order_length_mismatch_is_rejected_before_any_round() {
    let cfg = DraftConfig::default_config();
    let mut rng = SmallRng::seed_from_u64(0);
    let err = run_complete_lottery(&cfg, &[1, 2, 3, 4, 5], &mut rng).unwrap_err();
    let message = err.to_string();
    assert!(matches!(err, LotteryError::InitialOrderLength { .. }));
    assert!(message.contains('5') && message.contains("10"), "{message}");

    let long: Vec<u32> = (1..=11).collect();
    assert!(run_seeded_lottery(&cfg, &long, 1).is_err());
}

#[test]
fn parallel_invocations_are_independent() {
    let cfg = DraftConfig::default_config();
    let expected = run_seeded_lottery(&cfg, &cfg.identity_order(), 31).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cfg = cfg.clone();
            thread::spawn(move || run_seeded_lottery(&cfg, &cfg.identity_order(), 31).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn draw_serializes_with_snake_case_fields() {
    let cfg = DraftConfig::default_config();
    let draw = run_seeded_lottery(&cfg, &cfg.identity_order(), 5).unwrap();
    let value = serde_json::to_value(&draw).unwrap();
    let first = &value["picks"][0];
    for key in ["round", "pick_number", "team_id", "original_position", "movement"] {
        assert!(first.get(key).is_some(), "missing {key}");
    }
    assert_eq!(value["seed"], 5);
}
