// src/bin/holdem_dev_cli.rs

use holdem_engine::api::{HandService, RecordingTimer};
use holdem_engine::domain::card::cards_to_string;
use holdem_engine::domain::chips::Chips;
use holdem_engine::domain::hand::EngineConfig;
use holdem_engine::domain::seed::HandSeed;
use holdem_engine::domain::HandId;
use holdem_engine::engine::{HandOutcome, Participant, PlayerAction};
use holdem_engine::infra::InMemoryHandRepository;

fn main() {
    env_logger::init();

    println!("holdem_dev_cli: скриптовая раздача через полный стек…");

    let config = EngineConfig::new(Chips::new(50), Chips::new(100));
    let mut service = HandService::new(config, InMemoryHandRepository::new(), RecordingTimer::default());

    let hand_id: HandId = 1;
    let seed = HandSeed::from_u64(42);
    let participants = [
        Participant {
            seat_pos: 0,
            user_ref: 101,
            stack: Chips::new(10_000),
        },
        Participant {
            seat_pos: 1,
            user_ref: 102,
            stack: Chips::new(10_000),
        },
        Participant {
            seat_pos: 2,
            user_ref: 103,
            stack: Chips::new(4_000),
        },
    ];

    let started = service
        .start_hand(hand_id, seed, &participants, 0)
        .expect("start_hand failed");
    let mut version = started.version;
    print_events(&started.events);

    // Сценарий: UTG рейзит, блайнды уравнивают, дальше все чекают до шоудауна.
    let script = [
        (0u8, PlayerAction::Raise(Chips::new(300))),
        (1u8, PlayerAction::Call),
        (2u8, PlayerAction::Call),
        // флоп
        (1u8, PlayerAction::Check),
        (2u8, PlayerAction::Check),
        (0u8, PlayerAction::Check),
        // тёрн
        (1u8, PlayerAction::Check),
        (2u8, PlayerAction::Check),
        (0u8, PlayerAction::Check),
        // ривер
        (1u8, PlayerAction::Check),
        (2u8, PlayerAction::Check),
        (0u8, PlayerAction::Check),
    ];

    for (seat, action) in script {
        println!();
        println!("--- место {seat}: {action:?} (v{version}) ---");
        match service.submit_action(hand_id, seat, action, version) {
            Ok(ok) => {
                version = ok.version;
                print_events(&ok.events);
                if let HandOutcome::Finished(summary) = &ok.outcome {
                    println!();
                    println!("================ РАЗДАЧА ЗАВЕРШЕНА ================");
                    println!("борд: {}", cards_to_string(&summary.board));
                    for r in &summary.results {
                        println!(
                            "  место {}: выиграно {}, рука: {}",
                            r.seat_pos,
                            r.won,
                            r.hand_desc.as_deref().unwrap_or("—")
                        );
                    }
                    return;
                }
            }
            Err(e) => {
                println!("отказ: {e}");
                return;
            }
        }
    }
}

fn print_events(events: &[holdem_engine::engine::HandEvent]) {
    for e in events {
        println!("  [{}] {:?}", e.index, e.kind);
    }
}
