use std::{fs::OpenOptions, io::Write};

use gomoku_replay::{Pipeline, ReplayConfig, Tick};
use proptest::prelude::*;

fn chunk(number: usize, complete: bool, noise: usize) -> String {
    let mut text = String::new();
    for _ in 0..noise {
        text.push_str("eval 0.25 depth 4\n");
    }
    text.push_str(&format!("Move {number}\nPlayer {}\n", number % 2 + 1));
    for row in 0..20 {
        if !complete && row == 19 {
            text.push_str("-----");
            break;
        }
        text.push_str(&"-".repeat(20));
        text.push('\n');
    }
    text
}

proptest! {
    #[test]
    fn history_never_shrinks(steps in prop::collection::vec((any::<bool>(), 0usize..4), 1..12)) {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(dir.path().join("board.log"), ReplayConfig::default());
        let mut state = pipeline.new_state();
        let mut last_len = 0;
        let mut complete_moves = 0;

        for (number, (complete, noise)) in steps.into_iter().enumerate() {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(pipeline.path())
                .unwrap();
            file.write_all(chunk(number + 1, complete, noise).as_bytes()).unwrap();
            if complete {
                complete_moves += 1;
            } else {
                // The truncated row is completed by the next write.
                file.write_all(b"\n").unwrap();
            }
            drop(file);

            let tick = pipeline.tick(&mut state);
            prop_assert!(!matches!(tick, Tick::TransientFailure(_)));
            let len = state.history().len();
            prop_assert!(len >= last_len);
            prop_assert_eq!(len, complete_moves);
            last_len = len;
        }
    }
}
