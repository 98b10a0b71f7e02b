/// Run this example with cargo run --example simple
use ranked_set::RankedSet;
use std::sync::Arc;
use std::thread;

fn main() {
    let board = RankedSet::new();

    // Members are unique, ranks are not
    if board.add("alice".to_string(), 3).unwrap() {
        println!("alice joined at rank 3");
    }
    board.add("bob".to_string(), 3).unwrap();
    board.add("carol".to_string(), 7).unwrap();
    if !board.add("alice".to_string(), 9).unwrap() {
        println!("... alice is already ranked {}", board.get_rank("alice"));
    }

    // Point and range lookups by rank
    dbg!(board.get(3).unwrap());
    dbg!(board.get_range(0, 10).unwrap());

    // Bad input is an error, not a panic
    if let Err(err) = board.get_range(5, 5) {
        println!("rejected: {}", err);
    }

    if board.remove("carol") {
        println!("... I removed carol");
    }
    dbg!(board.len(), board.is_empty());

    // Share it between threads
    let board = Arc::new(board);
    let writers: Vec<_> = (0..4)
        .map(|t| {
            let board = Arc::clone(&board);
            thread::spawn(move || {
                for i in 0..250 {
                    board.add(format!("player-{}-{}", t, i), i % 50).unwrap();
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }
    dbg!(board.len(), board.get_range(0, 1).unwrap().len());
    println!("{}", board.debug_levels().join("\n"));
}
