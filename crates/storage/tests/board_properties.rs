use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use storage::error::SchedulingError;
use storage::models::HeatLimitType;
use storage::scheduling::{
    BoardEntry, BoardHeat, BoardTicketType, CapacityPolicy, HeatBoard, auto_assign,
};
use uuid::Uuid;

fn at(minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 9, 6)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
        + chrono::Duration::minutes(i64::from(minute))
}

struct Fixture {
    board: HeatBoard,
    entry_ids: HashSet<Uuid>,
    limit: u32,
}

fn fixture(limit_type: HeatLimitType, limit: i32, seed: u64) -> Fixture {
    let mut rng = StdRng::seed_from_u64(seed);
    let ticket_types: Vec<BoardTicketType> = [1u32, 2, 3]
        .iter()
        .map(|&team_size| BoardTicketType {
            ticket_type_id: Uuid::new_v4(),
            team_size,
        })
        .collect();
    let all_types: Vec<Uuid> = ticket_types.iter().map(|tt| tt.ticket_type_id).collect();

    let heats: Vec<BoardHeat> = (0..5)
        .map(|i| BoardHeat {
            heat_id: Uuid::new_v4(),
            start_time: at(i * 12),
            ticket_type_ids: all_types.clone(),
            lanes: Vec::new(),
        })
        .collect();

    let pool: Vec<BoardEntry> = (0..40)
        .map(|_| BoardEntry {
            entry_id: Uuid::new_v4(),
            ticket_type_id: *all_types.choose(&mut rng).unwrap(),
        })
        .collect();
    let entry_ids = pool.iter().map(|e| e.entry_id).collect();

    Fixture {
        board: HeatBoard::new(
            CapacityPolicy::new(limit_type, Some(limit)).unwrap(),
            ticket_types,
            heats,
            pool,
        ),
        entry_ids,
        limit: limit as u32,
    }
}

/// Every entry sits in exactly one of: the pool, one lane.
fn assert_conserved(board: &HeatBoard, entry_ids: &HashSet<Uuid>) {
    let mut seen = HashSet::new();
    for entry in board.unassigned() {
        assert!(seen.insert(entry.entry_id), "entry duplicated in pool");
    }
    for heat in board.heats() {
        for lane in &heat.lanes {
            assert!(seen.insert(lane.entry_id), "entry held twice");
        }
    }
    assert_eq!(&seen, entry_ids);
}

fn assert_capacity(board: &HeatBoard, limit: u32) {
    for heat in board.heats() {
        assert!(
            board.used_capacity(heat) <= limit,
            "heat {} over capacity",
            heat.heat_id
        );
        let numbers: HashSet<i32> = heat.lanes.iter().map(|l| l.lane_number).collect();
        assert_eq!(numbers.len(), heat.lanes.len(), "lane numbers collide");
    }
}

fn run_random_operations(limit_type: HeatLimitType, limit: i32, seed: u64) {
    let Fixture {
        mut board,
        entry_ids,
        limit,
    } = fixture(limit_type, limit, seed);
    let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);
    let heat_ids: Vec<Uuid> = board.heats().iter().map(|h| h.heat_id).collect();

    for _ in 0..500 {
        let lane_ids: Vec<Uuid> = board
            .heats()
            .iter()
            .flat_map(|h| h.lanes.iter().map(|l| l.lane_id))
            .collect();
        let target = *heat_ids.choose(&mut rng).unwrap();

        match rng.gen_range(0..3) {
            0 => {
                let pool: Vec<Uuid> = board.unassigned().iter().map(|e| e.entry_id).collect();
                if let Some(&entry_id) = pool.choose(&mut rng) {
                    let before = board.placements();
                    match board.assign(entry_id, target) {
                        Ok(_) => {}
                        Err(SchedulingError::HeatFull { heat_id }) => {
                            assert_eq!(heat_id, target);
                            assert_eq!(board.placements(), before);
                        }
                        Err(other) => panic!("unexpected error {:?}", other),
                    }
                }
            }
            1 => {
                if let Some(&lane_id) = lane_ids.choose(&mut rng) {
                    board.unassign(lane_id).unwrap();
                }
            }
            _ => {
                if let Some(&lane_id) = lane_ids.choose(&mut rng) {
                    let source = board.lane(lane_id).unwrap().0.heat_id;
                    if board.move_lane(lane_id, target).is_err() {
                        assert_eq!(board.lane(lane_id).unwrap().0.heat_id, source);
                    }
                }
            }
        }

        assert_conserved(&board, &entry_ids);
        assert_capacity(&board, limit);
    }
}

#[test]
fn test_random_operations_conserve_entries_under_entries_limit() {
    for seed in 0..8 {
        run_random_operations(HeatLimitType::Entries, 6, seed);
    }
}

#[test]
fn test_random_operations_conserve_entries_under_athletes_limit() {
    for seed in 0..8 {
        run_random_operations(HeatLimitType::Athletes, 10, seed);
    }
}

#[test]
fn test_auto_assign_after_manual_moves_respects_capacity() {
    let Fixture {
        mut board,
        entry_ids,
        limit,
    } = fixture(HeatLimitType::Athletes, 9, 42);

    let first_heat = board.heats()[0].heat_id;
    let pool: Vec<Uuid> = board.unassigned().iter().map(|e| e.entry_id).collect();
    for entry_id in pool.into_iter().take(3) {
        let _ = board.assign(entry_id, first_heat);
    }
    let manual = board.placements();

    let outcome = auto_assign(&mut board, &[], false);

    for (entry_id, heat_id) in &manual {
        assert_eq!(board.placements().get(entry_id), Some(heat_id));
    }
    assert_eq!(outcome.placed.len() + outcome.unplaced.len() + manual.len(), entry_ids.len());
    assert_conserved(&board, &entry_ids);
    assert_capacity(&board, limit);
}

#[test]
fn test_one_ticket_per_heat_never_mixes_types() {
    let Fixture {
        mut board,
        entry_ids,
        limit,
    } = fixture(HeatLimitType::Entries, 8, 7);

    auto_assign(&mut board, &[], true);

    for heat in board.heats() {
        let types: HashSet<Uuid> = heat.lanes.iter().map(|l| l.ticket_type_id).collect();
        assert!(types.len() <= 1);
    }
    assert_conserved(&board, &entry_ids);
    assert_capacity(&board, limit);
}
