// ============================================================================
// Basic Usage Example
// ============================================================================

use matchmaking_engine::prelude::*;
use std::sync::Arc;

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt::init();

    println!("=== Matchmaking Engine Example ===\n");

    let events = Arc::new(QueueEventHandler::new());
    let mut matchmaker = MatchmakerBuilder::new("ranked-eu")
        .deterministic(42)
        .build(events.clone())
        .expect("valid configuration");

    println!("Created matchmaker for pool {}\n", matchmaker.pool());

    // Spread out so nobody pairs on arrival
    println!("Admitting waiting players...");
    for i in 0u64..5 {
        let mut request = MatchRequest::new(i, 1000 + i * 100, 20);
        if i % 2 == 1 {
            request = request.with_attributes(["smurf"]);
        }
        let outcome = matchmaker.submit(request);
        println!("  player {} -> matched: {}", i, outcome.is_matched());
    }

    println!("\n=== Waiting Pool ===");
    for participant in matchmaker.participants() {
        println!("  {} @ {}", participant.id(), participant.rating());
    }

    // Within reach of player 2, but refuses smurfs
    println!("\n=== Submitting Close Request ===");
    let outcome = matchmaker.submit(MatchRequest::new(100u64, 1210, 20).with_exclusions(["smurf"]));
    match outcome.peer {
        Some(peer) => println!("Player {} paired with {}", outcome.participant, peer),
        None => println!("Player {} is waiting", outcome.participant),
    }

    // Player 3 is within reach but carries an attribute the arrival refuses
    println!("\n=== Submitting Blocked Request ===");
    let outcome = matchmaker.submit(MatchRequest::new(101u64, 1305, 20).with_exclusions(["smurf"]));
    println!("Player {} matched: {}", outcome.participant, outcome.is_matched());

    println!("\n=== Cancelling ===");
    println!("Cancel player 0: {}", matchmaker.cancel(ParticipantId::new(0)));
    println!("Cancel player 0 again: {}", matchmaker.cancel(ParticipantId::new(0)));

    println!("\n=== Events ===");
    for event in events.drain() {
        println!("  {:?}", event);
    }

    println!("\nWaiting participants: {}", matchmaker.len());
    match matchmaker.verify_consistency() {
        Ok(()) => println!("Pool is consistent"),
        Err(e) => println!("Consistency error: {}", e),
    }
}
