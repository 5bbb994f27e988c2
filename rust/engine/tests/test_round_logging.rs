use std::fs;

use pazaak_engine::deck::DrawPile;
use pazaak_engine::engine::Engine;
use pazaak_engine::game::{MatchSetup, Phase, Seat};
use pazaak_engine::logger::{RoundLogger, RoundRecord};
use pazaak_engine::side_deck::SideDeck;

fn finished_round() -> Engine {
    let mut engine = Engine::new(Some(3));
    engine.start_match(
        MatchSetup::new(SideDeck::default_deck())
            .first(Seat::Player)
            .draw_pile(DrawPile::with_order(3, &[9, 3, 1])),
    );
    engine.stand(Seat::Player).unwrap();
    engine.draw(Seat::Opponent).unwrap();
    engine.stand(Seat::Opponent).unwrap();
    assert_eq!(engine.phase(), Phase::RoundOver);
    engine
}

#[test]
fn writes_one_line_per_round_with_lf_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("logs").join("rounds.jsonl");
    let engine = finished_round();

    let mut logger = RoundLogger::create(&path).expect("create logger");
    let id = logger.next_id();
    let rec = RoundRecord::from_snapshot(&id, Some(engine.seed()), &engine.snapshot());
    logger.write(&rec).expect("write");
    logger.write(&rec).expect("write again");

    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text.lines().count(), 2);

    let v: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
    assert_eq!(v["match_id"], id.as_str());
    assert_eq!(v["round"], 1);
    assert_eq!(v["first"], "player");
    assert_eq!(v["player"]["score"], 9);
    assert_eq!(v["opponent"]["score"], 4);
    assert_eq!(v["outcome"]["result"], "win");
    assert_eq!(v["outcome"]["winner"], "player");
    assert!(v["ts"].is_string(), "ts should be injected");
}

#[test]
fn reopening_appends_and_keeps_preset_ts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("rounds.jsonl");
    let engine = finished_round();
    let rec = RoundRecord::from_snapshot("20250102-000001", None, &engine.snapshot());

    RoundLogger::create(&path).unwrap().write(&rec).unwrap();
    let preset = RoundRecord {
        ts: Some("2030-01-01T00:00:00Z".to_string()),
        ..rec
    };
    RoundLogger::create(&path).unwrap().write(&preset).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 2);
    let last: RoundRecord = serde_json::from_str(text.lines().last().unwrap()).unwrap();
    assert_eq!(last.ts.as_deref(), Some("2030-01-01T00:00:00Z"));
    assert_eq!(last.player.cards.len(), 1);
    assert_eq!(last.match_id, "20250102-000001");
}

#[test]
fn sequential_ids_increment() {
    let mut logger = RoundLogger::detached("20251231");
    assert_eq!(logger.next_id(), "20251231-000001");
    assert_eq!(logger.next_id(), "20251231-000002");
}
