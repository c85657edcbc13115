use skyjo_core::{
    calculate_final_scores, Deck, GameState, Hand, Phase, Player, PlayerInfo, ScoreError,
    ScoreSheet, TurnPhase,
};
use std::collections::BTreeMap;

fn table() -> Vec<PlayerInfo> {
    vec![
        PlayerInfo::new("alice", "Alice"),
        PlayerInfo::new("bob", "Bob"),
        PlayerInfo::new("charlie", "Charlie"),
    ]
}

fn raw(alice: i32, bob: i32, charlie: i32) -> BTreeMap<String, i32> {
    BTreeMap::from([
        ("alice".to_string(), alice),
        ("bob".to_string(), bob),
        ("charlie".to_string(), charlie),
    ])
}

fn three_rounds(threshold: i32) -> ScoreSheet {
    let mut sheet = ScoreSheet::new(table(), threshold);
    sheet.add_round(&raw(12, 25, -5), "charlie").expect("r1");
    sheet.add_round(&raw(8, 15, 20), "charlie").expect("r2");
    sheet.add_round(&raw(-2, 0, 10), "alice").expect("r3");
    sheet
}

#[test]
fn rounds_are_scored_with_the_finisher_rule() {
    let sheet = three_rounds(100);
    let rounds = sheet.rounds();
    assert_eq!(rounds.len(), 3);
    assert!(rounds[0].is_strictly_lowest);
    assert_eq!(rounds[0].scores["charlie"], -5);
    assert!(!rounds[1].is_strictly_lowest);
    assert_eq!(rounds[1].scores["charlie"], 40);
    assert_eq!(rounds[1].raw_scores["charlie"], 20);
    assert_eq!(rounds[2].scores["alice"], -2);
    assert_eq!(
        rounds.iter().map(|round| round.id).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn totals_follow_seat_order() {
    let sheet = three_rounds(100);
    let totals: Vec<(String, i32)> = sheet
        .totals()
        .into_iter()
        .map(|total| (total.player_id, total.total))
        .collect();
    assert_eq!(
        totals,
        vec![
            ("alice".to_string(), 18),
            ("bob".to_string(), 40),
            ("charlie".to_string(), 45),
        ]
    );
    assert_eq!(sheet.total_for("bob"), Some(40));
    assert_eq!(sheet.total_for("dave"), None);
}

#[test]
fn game_ends_at_threshold_and_lowest_wins() {
    let open = three_rounds(100);
    assert!(!open.is_game_over());
    assert_eq!(open.winner(), None);

    let over = three_rounds(40);
    assert!(over.is_game_over());
    let winner = over.winner().expect("winner");
    assert_eq!(winner.player_id, "alice");
    assert_eq!(winner.total, 18);
}

#[test]
fn standings_break_ties_by_seat() {
    let mut sheet = ScoreSheet::new(table(), 10);
    sheet.add_round(&raw(12, 4, 4), "alice").expect("round");
    let order: Vec<String> = sheet
        .standings()
        .into_iter()
        .map(|total| total.player_id)
        .collect();
    assert_eq!(order, vec!["bob", "charlie", "alice"]);
    assert_eq!(sheet.winner().map(|w| w.player_id), Some("bob".to_string()));
}

#[test]
fn deleting_a_round_recomputes_totals() {
    let mut sheet = three_rounds(40);
    let removed = sheet.delete_round(2).expect("delete");
    assert_eq!(removed.finisher_id, "charlie");
    let totals: Vec<i32> = sheet.totals().iter().map(|total| total.total).collect();
    assert_eq!(totals, vec![10, 25, 5]);
    assert!(!sheet.is_game_over());
    assert_eq!(sheet.delete_round(2), Err(ScoreError::UnknownRound(2)));
}

#[test]
fn round_ids_are_not_reused_after_delete() {
    let mut sheet = three_rounds(100);
    sheet.delete_round(3).expect("delete");
    let added = sheet.add_round(&raw(1, 2, 3), "alice").expect("add");
    assert_eq!(added.id, 4);
}

#[test]
fn bad_entries_are_rejected() {
    let mut sheet = ScoreSheet::new(table(), 100);
    assert_eq!(
        sheet.add_round(&raw(1, 2, 3), "dave"),
        Err(ScoreError::UnknownFinisher("dave".to_string()))
    );

    let mut missing = raw(1, 2, 3);
    missing.remove("bob");
    assert_eq!(
        sheet.add_round(&missing, "alice"),
        Err(ScoreError::MissingScore("bob".to_string()))
    );

    let mut extra = raw(1, 2, 3);
    extra.insert("eve".to_string(), 9);
    assert_eq!(
        sheet.add_round(&extra, "alice"),
        Err(ScoreError::UnknownPlayer("eve".to_string()))
    );
    assert!(sheet.rounds().is_empty());
}

#[test]
fn reset_clears_rounds() {
    let mut sheet = three_rounds(40);
    sheet.reset();
    assert!(sheet.rounds().is_empty());
    assert!(!sheet.is_game_over());
    assert_eq!(sheet.players().len(), 3);
    assert_eq!(sheet.threshold(), 40);
    let added = sheet.add_round(&raw(1, 2, 3), "alice").expect("add");
    assert_eq!(added.id, 1);
}

#[test]
fn virtual_rounds_use_the_same_rule_as_manual_entry() {
    let hands = [
        [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, -40],
        [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, -60],
        [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, -50],
    ];
    let state = GameState {
        players: table()
            .into_iter()
            .zip(hands)
            .map(|(info, values)| Player {
                id: info.id,
                name: info.name,
                hand: Hand::revealed(values),
            })
            .collect(),
        current_player_index: 0,
        deck: Deck::default(),
        drawn_card: None,
        phase: Phase::Finished,
        turn_phase: TurnPhase::Draw,
        finishing_player_index: Some(0),
        deck_seed: 0,
        recycles: 0,
        cleared: Vec::new(),
    };
    let result = calculate_final_scores(&state);

    let mut virtual_sheet = ScoreSheet::new(table(), 100);
    let recorded = virtual_sheet.record_result(&result).expect("record").clone();

    let mut manual_sheet = ScoreSheet::new(table(), 100);
    let entered = manual_sheet.add_round(&raw(26, 6, 16), "alice").expect("add");

    assert_eq!(&recorded, entered);
    assert_eq!(recorded.scores["alice"], 52);
}

#[test]
fn record_result_needs_a_finisher() {
    let mut sheet = ScoreSheet::new(table(), 100);
    let mut result = calculate_final_scores(&GameState {
        players: table()
            .into_iter()
            .map(|info| Player {
                id: info.id,
                name: info.name,
                hand: Hand::revealed([0; 12]),
            })
            .collect(),
        current_player_index: 0,
        deck: Deck::default(),
        drawn_card: None,
        phase: Phase::Finished,
        turn_phase: TurnPhase::Draw,
        finishing_player_index: None,
        deck_seed: 0,
        recycles: 0,
        cleared: Vec::new(),
    });
    assert_eq!(sheet.record_result(&result), Err(ScoreError::NoFinisher));
    result.finisher_id = Some("alice".to_string());
    assert!(sheet.record_result(&result).is_ok());
}
