// SPDX-License-Identifier: MIT OR Apache-2.0

mod common;

use chessboard_core::mapping::to_engine;
use chessboard_core::{
    BoardEvent, CandidateMove, Color, EventOutcome, InteractionState, PieceKind, RulesEngine,
    TerminalCondition, UiCoord,
};
use common::*;

#[test]
fn pawn_single_step_is_applied() {
    let (mut ctrl, exporter) = controller();

    assert_eq!(click(&mut ctrl, at("e2")), EventOutcome::Selected(at("e2")));
    let outcome = click(&mut ctrl, at("e3"));

    assert!(matches!(outcome, EventOutcome::MoveApplied(_)));
    assert_eq!(ctrl.engine().history().len(), 1);
    assert_eq!(ctrl.state().interaction, InteractionState::Idle);
    assert!(ctrl.state().game_over.is_none());
    assert!(exporter.records.borrow().is_empty());
}

#[test]
fn clicks_on_empty_or_opponent_squares_do_nothing_while_idle() {
    let (mut ctrl, _) = controller();

    assert_eq!(click(&mut ctrl, at("e4")), EventOutcome::Ignored);
    assert_eq!(click(&mut ctrl, at("e7")), EventOutcome::Ignored);
    assert_eq!(ctrl.state().interaction, InteractionState::Idle);
    assert!(ctrl.state().pending_clicks().is_empty());
}

#[test]
fn reclicking_selected_square_deselects() {
    let (mut ctrl, _) = controller();

    click(&mut ctrl, at("g1"));
    assert_eq!(click(&mut ctrl, at("g1")), EventOutcome::Deselected);
    assert_eq!(ctrl.state().selected(), None);
    assert!(ctrl.state().pending_clicks().is_empty());
}

#[test]
fn clicking_another_own_piece_moves_selection() {
    let (mut ctrl, _) = controller();

    click(&mut ctrl, at("e2"));
    assert_eq!(click(&mut ctrl, at("d2")), EventOutcome::Selected(at("d2")));
    assert_eq!(ctrl.state().pending_clicks(), &[at("d2")]);
    assert!(ctrl.engine().history().is_empty());
}

#[test]
fn illegal_second_click_resets_selection() {
    let (mut ctrl, _) = controller();

    click(&mut ctrl, at("e2"));
    assert_eq!(click(&mut ctrl, at("e5")), EventOutcome::MoveRejected);
    assert_eq!(ctrl.state().interaction, InteractionState::Idle);
    assert!(ctrl.state().pending_clicks().is_empty());
    assert!(ctrl.engine().history().is_empty());
}

#[test]
fn move_applied_only_when_legal() {
    let (probe, _) = controller();
    let legal = probe.engine().legal_moves();

    for from in UiCoord::all() {
        let from_square = to_engine(from, false);
        let own = probe
            .engine()
            .piece_at(from_square)
            .map_or(false, |p| p.color == Color::White);
        if !own {
            continue;
        }
        for to in UiCoord::all().filter(|to| *to != from) {
            let (mut ctrl, _) = controller();
            click(&mut ctrl, from);
            let outcome = click(&mut ctrl, to);

            let mv = CandidateMove::new(from_square, to_engine(to, false));
            let applied = matches!(outcome, EventOutcome::MoveApplied(_));
            assert_eq!(applied, legal.contains(&mv), "move {}", mv);
            assert_eq!(ctrl.engine().history().len(), usize::from(applied));
            assert!(ctrl.state().pending_clicks().len() <= 1);
        }
    }
}

#[test]
fn fools_mate_ends_game_and_exports_once() {
    let (mut ctrl, exporter) = controller();

    play(&mut ctrl, "f2", "f3");
    play(&mut ctrl, "e7", "e5");
    play(&mut ctrl, "g2", "g4");
    let outcome = play(&mut ctrl, "d8", "h4");

    let mate = TerminalCondition::Checkmate { winner: Color::Black };
    assert_eq!(outcome, EventOutcome::GameOver(mate));
    let over = ctrl.state().game_over.clone().expect("game over");
    assert_eq!(over.text, "Black wins, Checkmate!");
    assert!(over.exported_to.is_some());

    // Board clicks are frozen and never export again
    assert_eq!(click(&mut ctrl, at("e1")), EventOutcome::Ignored);
    assert_eq!(click(&mut ctrl, at("a2")), EventOutcome::Ignored);
    assert_eq!(exporter.records.borrow().len(), 1);

    let record = exporter.records.borrow()[0].clone();
    assert_eq!(record.san_moves, vec!["f3", "e5", "g4", "Qh4#"]);
    assert_eq!(record.result.as_pgn(), "0-1");
}

#[test]
fn scholars_mate_declares_white_winner() {
    let (mut ctrl, exporter) = controller();

    for (from, to) in [
        ("e2", "e4"),
        ("e7", "e5"),
        ("f1", "c4"),
        ("b8", "c6"),
        ("d1", "h5"),
        ("g8", "f6"),
    ] {
        assert!(matches!(play(&mut ctrl, from, to), EventOutcome::MoveApplied(_)));
    }
    play(&mut ctrl, "h5", "f7");

    assert_eq!(ctrl.engine().side_to_move(), Color::Black);
    let over = ctrl.state().game_over.clone().expect("game over");
    assert_eq!(over.condition, TerminalCondition::Checkmate { winner: Color::White });
    assert_eq!(over.text, "White wins, Checkmate!");
    assert_eq!(exporter.records.borrow().len(), 1);
}

#[test]
fn undo_clears_game_over_and_replaying_exports_again() {
    let (mut ctrl, exporter) = controller();

    play(&mut ctrl, "f2", "f3");
    play(&mut ctrl, "e7", "e5");
    play(&mut ctrl, "g2", "g4");
    play(&mut ctrl, "d8", "h4");
    assert!(ctrl.state().game_over.is_some());

    let outcome = ctrl.handle_event(BoardEvent::Undo).unwrap();
    assert!(matches!(outcome, EventOutcome::Undone(Some(_))));
    assert!(ctrl.state().game_over.is_none());
    assert_eq!(ctrl.engine().history().len(), 3);

    play(&mut ctrl, "d8", "h4");
    assert!(ctrl.state().game_over.is_some());
    assert_eq!(exporter.records.borrow().len(), 2);
}

#[test]
fn undo_on_empty_history_is_noop() {
    let (mut ctrl, _) = controller();
    click(&mut ctrl, at("e2"));

    assert_eq!(ctrl.handle_event(BoardEvent::Undo).unwrap(), EventOutcome::Undone(None));
    assert!(ctrl.engine().history().is_empty());
    assert_eq!(ctrl.state().selected(), None);
}

#[test]
fn reset_starts_fresh_game() {
    let (mut ctrl, _) = controller();
    play(&mut ctrl, "e2", "e4");
    ctrl.handle_event(BoardEvent::ScrollDown).unwrap();
    click(&mut ctrl, at("e7"));

    assert_eq!(ctrl.handle_event(BoardEvent::Reset).unwrap(), EventOutcome::Reset);
    assert!(ctrl.engine().history().is_empty());
    assert_eq!(ctrl.engine().side_to_move(), Color::White);
    assert_eq!(ctrl.state().interaction, InteractionState::Idle);
    assert_eq!(ctrl.state().scroll_offset, 0);
}

#[test]
fn scroll_clamps_at_zero() {
    let (mut ctrl, _) = controller();

    assert_eq!(ctrl.handle_event(BoardEvent::ScrollUp).unwrap(), EventOutcome::Scrolled(0));
    ctrl.handle_event(BoardEvent::ScrollDown).unwrap();
    ctrl.handle_event(BoardEvent::ScrollDown).unwrap();
    assert_eq!(ctrl.state().scroll_offset, 2);
    ctrl.handle_event(BoardEvent::ScrollUp).unwrap();
    assert_eq!(ctrl.state().scroll_offset, 1);
}

#[test]
fn flip_clears_selection_and_maps_clicks() {
    let (mut ctrl, _) = controller();
    click(&mut ctrl, at("e2"));

    assert_eq!(ctrl.handle_event(BoardEvent::Flip).unwrap(), EventOutcome::Flipped(true));
    assert_eq!(ctrl.state().selected(), None);
    assert!(ctrl.state().pending_clicks().is_empty());

    // With the board flipped, e2 is drawn at row 1, column 3 and e4 at row 3, column 3
    click(&mut ctrl, UiCoord::new(1, 3));
    let outcome = click(&mut ctrl, UiCoord::new(3, 3));
    assert!(matches!(outcome, EventOutcome::MoveApplied(_)));
    assert_eq!(ctrl.engine().san_history(), ["e4".to_string()]);
}

#[test]
fn export_failure_propagates() {
    let engine = chessboard_core::ShakmatyEngine::new();
    let mut ctrl = chessboard_core::InteractionController::with_engine(engine, Box::new(FailingExporter));

    click(&mut ctrl, at("f2"));
    ctrl.handle_event(BoardEvent::Click(at("f3"))).unwrap();
    play(&mut ctrl, "e7", "e5");
    play(&mut ctrl, "g2", "g4");
    click(&mut ctrl, at("d8"));
    let result = ctrl.handle_event(BoardEvent::Click(at("h4")));

    assert!(result.is_err());
    assert!(ctrl.state().game_over.is_some());
}

#[test]
fn promotion_choice_is_required() {
    let (mut ctrl, _) = controller_from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1");

    click(&mut ctrl, at("a7"));
    let outcome = click(&mut ctrl, at("a8"));
    assert!(matches!(outcome, EventOutcome::PromotionPending(_)));
    assert!(ctrl.state().pending_clicks().is_empty());
    assert_eq!(ctrl.view().promotion_pending, Some(Color::White));

    // Everything but a valid choice is ignored while waiting
    assert_eq!(click(&mut ctrl, at("h1")), EventOutcome::Ignored);
    assert_eq!(ctrl.handle_event(BoardEvent::Undo).unwrap(), EventOutcome::Ignored);
    assert_eq!(ctrl.handle_event(BoardEvent::Flip).unwrap(), EventOutcome::Ignored);
    assert_eq!(
        ctrl.handle_event(BoardEvent::ChoosePromotion(PieceKind::King)).unwrap(),
        EventOutcome::Ignored
    );
    assert!(ctrl.engine().history().is_empty());

    let outcome = ctrl
        .handle_event(BoardEvent::ChoosePromotion(PieceKind::Rook))
        .unwrap();
    assert!(matches!(outcome, EventOutcome::MoveApplied(mv) if mv.promotion == Some(PieceKind::Rook)));
    assert_eq!(ctrl.state().interaction, InteractionState::Idle);
    let promoted = ctrl.engine().piece_at(to_engine(at("a8"), false)).unwrap();
    assert_eq!(promoted.kind, PieceKind::Rook);
    // The new rook checks the king down the a-file
    assert_eq!(ctrl.engine().san_history(), ["a8=R+".to_string()]);
}

#[test]
fn each_promotion_choice_produces_that_piece() {
    for kind in PieceKind::PROMOTION_CHOICES {
        let (mut ctrl, _) = controller_from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1");
        play(&mut ctrl, "a7", "a8");
        ctrl.handle_event(BoardEvent::ChoosePromotion(kind)).unwrap();
        let promoted = ctrl.engine().piece_at(to_engine(at("a8"), false)).unwrap();
        assert_eq!(promoted.kind, kind);
    }
}

#[test]
fn black_promotes_on_first_rank() {
    let (mut ctrl, _) = controller_from_fen("k6K/8/8/8/8/8/p7/8 b - - 0 1");

    let outcome = play(&mut ctrl, "a2", "a1");
    assert!(matches!(outcome, EventOutcome::PromotionPending(_)));
    assert_eq!(ctrl.view().promotion_pending, Some(Color::Black));
}

#[test]
fn black_promotes_on_flipped_board() {
    let (mut ctrl, _) = controller_from_fen("k6K/8/8/8/8/8/p7/7R b - - 0 1");
    ctrl.handle_event(BoardEvent::Flip).unwrap();

    // a2 and a1 sit in the right-hand column when viewed from Black's side
    let (a2, a1) = (UiCoord::new(1, 7), UiCoord::new(0, 7));
    assert_eq!(ctrl.view().piece(a2).map(|p| p.kind), Some(PieceKind::Pawn));

    assert_eq!(click(&mut ctrl, a2), EventOutcome::Selected(a2));
    let outcome = click(&mut ctrl, a1);
    assert!(matches!(outcome, EventOutcome::PromotionPending(mv) if mv.to == to_engine(a1, true)));
    assert_eq!(ctrl.view().promotion_pending, Some(Color::Black));

    let outcome = ctrl
        .handle_event(BoardEvent::ChoosePromotion(PieceKind::Bishop))
        .unwrap();
    assert!(matches!(outcome, EventOutcome::MoveApplied(_)));

    let promoted = ctrl.view().piece(a1).unwrap();
    assert_eq!((promoted.kind, promoted.color), (PieceKind::Bishop, Color::Black));
    // Long diagonal to the white king on h8
    assert_eq!(ctrl.engine().san_history(), ["a1=B+".to_string()]);
}

#[test]
fn blocked_pawn_gets_no_promotion_dialog() {
    let (mut ctrl, _) = controller_from_fen("n7/P7/8/8/8/8/8/k6K w - - 0 1");

    assert_eq!(play(&mut ctrl, "a7", "a8"), EventOutcome::MoveRejected);
    assert_eq!(ctrl.state().interaction, InteractionState::Idle);
}

#[test]
fn promotion_that_mates_ends_game() {
    let (mut ctrl, exporter) = controller_from_fen("k7/2P5/1K6/8/8/8/8/8 w - - 0 1");

    play(&mut ctrl, "c7", "c8");
    let outcome = ctrl
        .handle_event(BoardEvent::ChoosePromotion(PieceKind::Queen))
        .unwrap();

    assert_eq!(
        outcome,
        EventOutcome::GameOver(TerminalCondition::Checkmate { winner: Color::White })
    );
    assert_eq!(exporter.records.borrow().len(), 1);
}

#[test]
fn stalemate_reports_draw() {
    let (mut ctrl, exporter) = controller_from_fen("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1");

    let outcome = play(&mut ctrl, "f1", "f7");

    assert_eq!(outcome, EventOutcome::GameOver(TerminalCondition::Stalemate));
    assert_eq!(ctrl.state().game_over.as_ref().unwrap().text, "Draw by stalemate!");
    assert_eq!(exporter.records.borrow()[0].result.as_pgn(), "1/2-1/2");
}
