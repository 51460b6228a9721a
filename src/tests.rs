#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use crate::builder::MapBuilder;
    use crate::engine::{execute, Run, RunOutcome};
    use crate::enumerate::{candidates, partitions, Partition, Tier};
    use crate::level::{LevelDescriptor, SolveReport};
    use crate::location::{Direction, Location};
    use crate::map::{can_advance, LevelError, Map, MoveMode};
    use crate::medal::{Medal, MedalThresholds};
    use crate::program::Instruction::{
        CallProc1, CallProc2, Jump, ToggleLight, TurnLeft, TurnRight, Walk,
    };
    use crate::program::{Instruction, Program};
    use crate::solve::{solve, solve_parallel, SolveConfig, SolveOutcome};
    use crate::tile::TileKind;

    fn medals(gold: usize, silver: usize, bronze: usize) -> MedalThresholds {
        MedalThresholds { gold, silver, bronze }
    }

    fn config(max_size: usize) -> SolveConfig {
        SolveConfig { max_size, step_limit: 200, medals: medals(5, 7, 9) }
    }

    /// A 1×`length` row of height-0 tiles, the last one a light, bot at the
    /// left end facing along the row.
    fn row_level(length: usize) -> Map {
        let mut builder = MapBuilder::with_dims((
            NonZero::new(length).unwrap(),
            NonZero::new(1).unwrap(),
        ));
        builder.light_at(Location(length - 1, 0), 0);
        builder.build().unwrap()
    }

    #[test]
    fn movement_legality() {
        assert!(can_advance(0, 0, MoveMode::Walk));
        assert!(can_advance(3, 3, MoveMode::Walk));
        assert!(!can_advance(0, 1, MoveMode::Walk));
        assert!(!can_advance(1, 0, MoveMode::Walk));

        assert!(can_advance(0, 1, MoveMode::Jump));
        assert!(can_advance(1, 0, MoveMode::Jump));
        assert!(can_advance(4, 3, MoveMode::Jump));
        assert!(!can_advance(0, 0, MoveMode::Jump));
        assert!(!can_advance(0, 2, MoveMode::Jump));
        assert!(!can_advance(3, 1, MoveMode::Jump));
    }

    #[test]
    fn single_light_under_bot() {
        // 1×1 level, bot starts on its only light
        let mut builder =
            MapBuilder::with_dims((NonZero::new(1).unwrap(), NonZero::new(1).unwrap()));
        builder.light_at(Location(0, 0), 0);
        let map = builder.build().unwrap();

        match solve(&map, &config(3)) {
            SolveOutcome::Solved(solution) => {
                assert_eq!(solution.program, Program::main_only(vec![ToggleLight]));
                assert_eq!(solution.size(), 1);
                assert_eq!(solution.steps, 1);
                assert_eq!(solution.medal, Medal::Gold);
            }
            other => panic!("expected a solve, got {other:?}"),
        }
    }

    #[test]
    fn straight_row_minimal_is_main_only() {
        let map = row_level(5);

        match solve(&map, &config(6)) {
            SolveOutcome::Solved(solution) => {
                assert_eq!(
                    solution.program,
                    Program::main_only(vec![Walk, Walk, Walk, Walk, ToggleLight]),
                );
                assert_eq!(solution.size(), 5);
                assert_eq!(solution.steps, 5);
            }
            other => panic!("expected a solve, got {other:?}"),
        }
    }

    #[test]
    fn no_smaller_program_solves_the_row() {
        // exhaustive check one size below the known minimum
        let map = row_level(5);

        for program in candidates(4) {
            assert!(
                !matches!(execute(&program, &map, 200), RunOutcome::Solved { .. }),
                "{program} should not solve the 5-tile row",
            );
        }
    }

    #[test]
    fn procedure_compression_beats_flat_program() {
        // a 7-tile row takes 7 slots without procedures; with them, fewer
        let map = row_level(7);

        match solve(&map, &config(7)) {
            SolveOutcome::Solved(solution) => {
                assert_eq!(solution.size(), 6);
                assert!(!solution.program.proc1.is_empty());

                // replaying the solution reproduces the identical result
                assert_eq!(
                    execute(&solution.program, &map, 200),
                    RunOutcome::Solved { steps: solution.steps },
                );
            }
            other => panic!("expected a solve, got {other:?}"),
        }
    }

    #[test]
    fn isolated_light_is_never_falsely_solved() {
        // the light sits behind a height gap of 3; neither walk nor jump is legal
        let mut builder =
            MapBuilder::with_dims((NonZero::new(2).unwrap(), NonZero::new(1).unwrap()));
        builder.light_at(Location(1, 0), 3);
        let map = builder.build().unwrap();

        assert_eq!(solve(&map, &config(5)), SolveOutcome::Failed { max_size: 5 });
        assert_eq!(solve_parallel(&map, &config(5)), SolveOutcome::Failed { max_size: 5 });
    }

    #[test]
    fn jump_climbs_exactly_one_height_unit() {
        let mut builder =
            MapBuilder::with_dims((NonZero::new(4).unwrap(), NonZero::new(1).unwrap()));
        builder
            .tile_at(Location(1, 0), TileKind::Plain, 1)
            .tile_at(Location(2, 0), TileKind::Plain, 2)
            .light_at(Location(3, 0), 2);
        let map = builder.build().unwrap();

        let stairs = Program::main_only(vec![Jump, Jump, Walk, ToggleLight]);
        assert_eq!(execute(&stairs, &map, 200), RunOutcome::Solved { steps: 4 });

        // walking into the first step no-ops without progress, twice over
        let level_walk = Program::main_only(vec![Walk, Walk, Walk, ToggleLight]);
        assert_eq!(execute(&level_walk, &map, 200), RunOutcome::LoopDetected);
    }

    #[test]
    fn elevator_carries_the_bot_up() {
        // plain 0 | elevator 0 | light 2: actuate the elevator, ride it, walk off
        let mut builder =
            MapBuilder::with_dims((NonZero::new(3).unwrap(), NonZero::new(1).unwrap()));
        builder.elevator_at(Location(1, 0), 0).light_at(Location(2, 0), 2);
        let map = builder.build().unwrap();

        let program = Program::main_only(vec![Walk, ToggleLight, Walk, ToggleLight]);
        assert_eq!(execute(&program, &map, 200), RunOutcome::Solved { steps: 4 });
    }

    #[test]
    fn elevator_phase_wraps_around() {
        // bot starts on an elevator; two actuations lift it 0 -> 2 -> 4
        let mut builder =
            MapBuilder::with_dims((NonZero::new(2).unwrap(), NonZero::new(1).unwrap()));
        builder.elevator_at(Location(0, 0), 0).light_at(Location(1, 0), 4);
        let map = builder.build().unwrap();

        let program =
            Program::main_only(vec![ToggleLight, ToggleLight, Walk, ToggleLight]);
        assert_eq!(execute(&program, &map, 200), RunOutcome::Solved { steps: 4 });
    }

    #[test]
    fn spinning_in_place_is_a_loop() {
        let map = row_level(2);
        let program = Program::main_only(vec![TurnLeft; 5]);
        assert_eq!(execute(&program, &map, 200), RunOutcome::LoopDetected);
    }

    #[test]
    fn bumping_the_wall_twice_is_a_loop() {
        let mut builder =
            MapBuilder::with_dims((NonZero::new(1).unwrap(), NonZero::new(1).unwrap()));
        builder.light_at(Location(0, 0), 0);
        let map = builder.build().unwrap();

        let program = Program::main_only(vec![Walk, Walk]);
        assert_eq!(execute(&program, &map, 200), RunOutcome::LoopDetected);
    }

    #[test]
    fn strict_progress_never_flags_a_loop() {
        let map = row_level(5);

        // every step changes the world; the run must end in a solve, not a loop flag
        let solving = Program::main_only(vec![Walk, Walk, Walk, Walk, ToggleLight]);
        assert_eq!(execute(&solving, &map, 200), RunOutcome::Solved { steps: 5 });

        // still strict progress, just not enough of it
        let partial = Program::main_only(vec![Walk, Walk, Walk, Walk]);
        assert_eq!(execute(&partial, &map, 200), RunOutcome::Failed);
    }

    #[test]
    fn step_budget_exhaustion() {
        let map = row_level(5);
        let program = Program::main_only(vec![Walk, Walk, Walk, Walk, ToggleLight]);
        assert_eq!(execute(&program, &map, 3), RunOutcome::StepLimitExceeded);
    }

    #[test]
    fn call_only_spiral_terminates_on_budget() {
        // P1 and P2 call each other before ever reaching a primitive, so the
        // run can only end when the calls have drained the budget
        let map = row_level(2);
        let program = Program::new(
            vec![CallProc1],
            vec![CallProc2, Walk],
            vec![CallProc1, Walk],
        );
        assert_eq!(execute(&program, &map, 50), RunOutcome::StepLimitExceeded);
    }

    #[test]
    fn replay_is_deterministic() {
        let map = row_level(5);
        let program = Program::main_only(vec![Walk, Walk, Walk, Walk, ToggleLight]);

        let run_to_end = |map: &Map| {
            let mut run = Run::new(&program, map, 200);
            let outcome = loop {
                if let Some(outcome) = run.advance() {
                    break outcome;
                }
            };
            (outcome, run.world_state())
        };

        let (first_outcome, first_state) = run_to_end(&map);
        let (second_outcome, second_state) = run_to_end(&map);

        assert_eq!(first_outcome, second_outcome);
        assert_eq!(first_state, second_state);
        assert_eq!(first_state.position(), Location(4, 0));
        assert_eq!(first_state.lit_count(), 1);
    }

    #[test]
    fn partitions_are_tier_ordered() {
        assert_eq!(
            partitions(3),
            vec![
                Partition { main: 3, proc1: 0, proc2: 0 },
                Partition { main: 1, proc1: 2, proc2: 0 },
                Partition { main: 2, proc1: 1, proc2: 0 },
                Partition { main: 1, proc1: 1, proc2: 1 },
            ],
        );
        assert_eq!(partitions(3)[0].tier(), Tier::MainOnly);
        assert_eq!(partitions(3)[1].tier(), Tier::OneProc);
        assert_eq!(partitions(3)[3].tier(), Tier::TwoProc);
        assert!(partitions(0).is_empty());
    }

    #[test]
    fn degenerate_programs_are_never_enumerated() {
        for size in 1..=4 {
            for program in candidates(size) {
                assert!(!program.main.is_empty());
                assert_ne!(program.proc1.as_slice(), [CallProc1]);
                assert_ne!(program.proc2.as_slice(), [CallProc2]);
                assert!(
                    !(program.proc1.as_slice() == [CallProc2]
                        && program.proc2.as_slice() == [CallProc1]),
                    "bodyless mutual recursion enumerated: {program}",
                );

                for body in [&program.proc1, &program.proc2] {
                    assert!(
                        body.is_empty() || body.iter().any(Instruction::is_action),
                        "actionless procedure enumerated: {program}",
                    );
                }

                // calls to empty procedures are never emitted
                let all = program
                    .main
                    .iter()
                    .chain(&program.proc1)
                    .chain(&program.proc2);
                for instruction in all {
                    match instruction {
                        CallProc1 => assert!(!program.proc1.is_empty()),
                        CallProc2 => assert!(!program.proc2.is_empty()),
                        _ => {}
                    }
                }
            }
        }
    }

    #[test]
    fn valid_hand_program_is_enumerated_at_its_size() {
        let wanted = Program::new(
            vec![CallProc1, CallProc1, ToggleLight],
            vec![Walk, Walk, Walk],
            vec![],
        );
        assert!(candidates(6).any(|program| program == wanted));
    }

    #[test]
    fn medal_boundaries() {
        let thresholds = medals(5, 7, 9);

        assert_eq!(thresholds.score(4), Medal::Gold);
        assert_eq!(thresholds.score(5), Medal::Gold);
        assert_eq!(thresholds.score(6), Medal::Silver);
        assert_eq!(thresholds.score(7), Medal::Silver);
        assert_eq!(thresholds.score(8), Medal::Bronze);
        assert_eq!(thresholds.score(9), Medal::Bronze);
        assert_eq!(thresholds.score(10), Medal::None);
    }

    #[test]
    fn parallel_solve_matches_sequential() {
        let map = row_level(5);

        let sequential = solve(&map, &config(6));
        let parallel = solve_parallel(&map, &config(6));

        match (&sequential, &parallel) {
            (SolveOutcome::Solved(a), SolveOutcome::Solved(b)) => {
                assert_eq!(a.size(), b.size());
                // same structural tier: no procedures either way
                assert!(a.program.proc1.is_empty() && a.program.proc2.is_empty());
                assert!(b.program.proc1.is_empty() && b.program.proc2.is_empty());
            }
            other => panic!("expected two solves, got {other:?}"),
        }
    }

    #[test]
    fn builder_rejects_invalid_levels() {
        // no lights at all
        let empty =
            MapBuilder::with_dims((NonZero::new(2).unwrap(), NonZero::new(2).unwrap()));
        assert!(matches!(empty.build(), Err(LevelError::NoLightTiles)));

        // feature out of bounds poisons the builder
        let mut oob =
            MapBuilder::with_dims((NonZero::new(2).unwrap(), NonZero::new(2).unwrap()));
        oob.light_at(Location(5, 0), 0);
        assert!(oob.is_valid().is_some());
        assert!(matches!(oob.build(), Err(LevelError::FeatureOutOfBounds(Location(5, 0)))));

        // more lights than the lit bitmask can track
        let mut crowded =
            MapBuilder::with_dims((NonZero::new(65).unwrap(), NonZero::new(1).unwrap()));
        for x in 0..65 {
            crowded.light_at(Location(x, 0), 0);
        }
        assert!(matches!(crowded.build(), Err(LevelError::TooManyLights)));
    }

    #[test]
    fn descriptor_validation() {
        let ragged: LevelDescriptor = serde_json::from_value(serde_json::json!({
            "tiles": [
                [{"t": "plain", "h": 0}],
                [{"t": "plain", "h": 0}, {"t": "light", "h": 0}],
            ],
            "start": {"x": 0, "y": 0, "direction": "east"},
            "medals": {"gold": 1, "silver": 2, "bronze": 3},
        }))
        .unwrap();
        assert!(matches!(ragged.to_map(), Err(LevelError::NonRectangular)));

        let bad_start: LevelDescriptor = serde_json::from_value(serde_json::json!({
            "tiles": [[{"t": "light", "h": 0}]],
            "start": {"x": 9, "y": 0, "direction": "north"},
            "medals": {"gold": 1, "silver": 2, "bronze": 3},
        }))
        .unwrap();
        assert!(matches!(bad_start.to_map(), Err(LevelError::StartOutOfBounds(Location(9, 0)))));
    }

    #[test]
    fn descriptor_to_report_round_trip() {
        let descriptor: LevelDescriptor = serde_json::from_value(serde_json::json!({
            "tiles": [[
                {"t": "plain", "h": 0},
                {"t": "plain", "h": 0},
                {"t": "plain", "h": 0},
                {"t": "plain", "h": 0},
                {"t": "light", "h": 0},
            ]],
            "start": {"x": 0, "y": 0, "direction": "east"},
            "medals": {"gold": 5, "silver": 7, "bronze": 9},
        }))
        .unwrap();

        let map = descriptor.to_map().unwrap();
        let outcome = solve(
            &map,
            &SolveConfig { max_size: 6, step_limit: 200, medals: descriptor.medals },
        );
        let report = SolveReport::from(&outcome);

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({
                "status": "solved",
                "main": "WWWWL",
                "proc1": "",
                "proc2": "",
                "size": 5,
                "steps": 5,
                "medal": "gold",
            }),
        );

        // and the failure shape
        let failed = SolveReport::from(&SolveOutcome::Failed { max_size: 4 });
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            serde_json::json!({"status": "failed", "max_size": 4}),
        );
    }

    #[test]
    fn turning_levels_solve_too() {
        // 2×2 with lights in two corners; the bot must turn to reach the second
        let mut builder =
            MapBuilder::with_dims((NonZero::new(2).unwrap(), NonZero::new(2).unwrap()));
        builder
            .light_at(Location(1, 0), 0)
            .light_at(Location(1, 1), 0)
            .start_at(Location(0, 0), Direction::East);
        let map = builder.build().unwrap();

        // a procedure without a self-call runs once and returns; this lights
        // only the first corner, so it is no shortcut
        let called_once =
            Program::new(vec![CallProc1], vec![Walk, ToggleLight, TurnRight], vec![]);
        assert_eq!(execute(&called_once, &map, 200), RunOutcome::Failed);
        assert_eq!(solve(&map, &config(4)), SolveOutcome::Failed { max_size: 4 });

        // the true minimum is the flat W L > W L
        match solve(&map, &config(5)) {
            SolveOutcome::Solved(solution) => {
                assert_eq!(
                    solution.program,
                    Program::main_only(vec![Walk, ToggleLight, TurnRight, Walk, ToggleLight]),
                );
                assert_eq!(solution.size(), 5);
                assert_eq!(solution.steps, 5);
            }
            other => panic!("expected a solve, got {other:?}"),
        }
    }
}
