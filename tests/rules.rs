/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use stoat::{
    in_check, legal_moves, Color, Difficulty, EngineError, GameSession, GameStatus, Move,
    PieceKind, Position, Square,
};

#[cfg(test)]
mod starting_position {
    use super::*;

    #[test]
    fn pawns_have_two_moves_knights_two_others_none() {
        let session = GameSession::new();

        for file in "abcdefgh".chars() {
            let pawn: Square = format!("{file}2").parse().unwrap();
            assert_eq!(session.legal_destinations(pawn).len(), 2, "pawn on {pawn}");
        }

        for knight in [Square::B1, Square::G1] {
            assert_eq!(session.legal_destinations(knight).len(), 2);
        }

        for other in [Square::A1, Square::C1, Square::D1, Square::E1, Square::F1, Square::H1] {
            assert_eq!(session.legal_destinations(other).len(), 0);
        }
    }

    #[test]
    fn opposing_pieces_yield_no_destinations() {
        let session = GameSession::new();
        assert!(session.legal_destinations(Square::E7).is_empty());
        assert!(session.legal_destinations(Square::B8).is_empty());
    }

    #[test]
    fn empty_squares_yield_no_destinations() {
        let session = GameSession::new();
        assert!(session.legal_destinations(Square::E4).is_empty());
    }
}

#[cfg(test)]
mod king_safety {
    use super::*;

    /// No legal move may leave the mover's own king in check.
    fn assert_all_moves_safe(fen: &str) {
        let position = Position::from_fen(fen).unwrap();
        let mover = position.side_to_move();
        for mv in legal_moves(&position, mover) {
            let next = position.with_applied(mv).unwrap();
            assert!(!in_check(&next, mover), "{mv} leaves the king in check ({fen})");
        }
    }

    #[test]
    fn legal_moves_never_expose_the_king() {
        // Positions featuring pins, checks, and en passant
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            // White is in check from the bishop and must address it
            "4k3/8/8/8/7b/8/8/4K3 w - - 0 1",
            // The d5 pawn is pinned against the king
            "4k3/8/8/q2P3K/8/8/8/8 w - - 0 1",
            // En passant is available but would expose the king on the fifth rank
            "8/8/8/q1pP3K/8/8/8/4k3 w - c6 0 2",
        ] {
            assert_all_moves_safe(fen);
        }
    }

    #[test]
    fn pinned_en_passant_capture_is_rejected() {
        // Both pawns sit between the queen and the king; taking en passant
        // would remove them both and expose the king along the rank
        let position = Position::from_fen("8/8/8/q1pP3K/8/8/8/4k3 w - c6 0 2").unwrap();
        let moves = legal_moves(&position, Color::White);
        assert!(!moves.contains(&Move::new(Square::D5, Square::C6)));
        // The plain push remains available
        assert!(moves.contains(&Move::new(Square::D5, Square::D6)));
    }
}

#[cfg(test)]
mod status {
    use super::*;

    #[test]
    fn back_rank_mate_is_checkmate() {
        // The queen on e7, defended by the king on e6, mates the bare king
        let session = GameSession::from_fen("4k3/4Q3/4K3/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(session.status(), GameStatus::Checkmate);
        assert!(session.in_check());

        // Every square of the mated side yields no moves
        for index in 0..64u8 {
            let square: Square = format!(
                "{}{}",
                (b'a' + index % 8) as char,
                (b'1' + index / 8) as char
            )
            .parse()
            .unwrap();
            assert!(session.legal_destinations(square).is_empty());
        }
    }

    #[test]
    fn cornered_king_with_no_moves_is_stalemate() {
        let session = GameSession::from_fen("k7/2Q5/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(session.status(), GameStatus::Stalemate);
        assert!(!session.in_check());
    }

    #[test]
    fn check_with_moves_remaining_is_check() {
        // White queen checks the black king, which can step aside
        let session = GameSession::from_fen("4k3/8/8/4Q3/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(session.status(), GameStatus::Check);
        assert!(session.in_check());
    }

    #[test]
    fn bare_kings_are_a_draw() {
        let session = GameSession::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(session.status(), GameStatus::Draw);
    }

    #[test]
    fn king_and_knight_cannot_mate() {
        let session = GameSession::from_fen("4k3/8/8/8/8/8/8/4KN2 w - - 0 1").unwrap();
        assert_eq!(session.status(), GameStatus::Draw);
    }

    #[test]
    fn hundred_quiet_plies_draw_by_fifty_move_rule() {
        let session = GameSession::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 100 60").unwrap();
        assert_eq!(session.status(), GameStatus::Draw);
    }

    #[test]
    fn no_moves_accepted_after_game_over() {
        let mut session = GameSession::from_fen("4k3/4Q3/4K3/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(
            session.apply_move(Square::E8, Square::D8, None),
            Err(EngineError::GameOver)
        );
    }
}

#[cfg(test)]
mod en_passant {
    use super::*;

    /// Plays the moves leading to an en passant opportunity for White:
    /// the black d-pawn double-pushes beside the white e-pawn on the fifth rank.
    fn session_with_ep_available() -> GameSession {
        let mut session = GameSession::new();
        for (from, to) in [
            (Square::E2, Square::E4),
            (Square::A7, Square::A6),
            (Square::E4, Square::E5),
            (Square::D7, Square::D5),
        ] {
            session.apply_move(from, to, None).unwrap();
        }
        session
    }

    #[test]
    fn capture_onto_the_empty_square_is_offered() {
        let session = session_with_ep_available();
        let destinations = session.legal_destinations(Square::E5);
        assert!(destinations.contains(&Square::D6));
        assert!(destinations.contains(&Square::E6));
    }

    #[test]
    fn capturing_removes_the_pawn_beside_the_mover() {
        let mut session = session_with_ep_available();
        let record = session.apply_move(Square::E5, Square::D6, None).unwrap();

        assert!(record.en_passant);
        assert_eq!(record.notation, "pawne5-d6 e.p.");
        assert!(session.position().is_empty(Square::D5), "victim pawn must be gone");
        assert_eq!(
            session.position().piece_at(Square::D6).map(|p| p.kind()),
            Some(PieceKind::Pawn)
        );
    }

    #[test]
    fn opportunity_expires_after_one_ply() {
        let mut session = session_with_ep_available();

        // White declines; one full turn goes by
        session.apply_move(Square::B1, Square::C3, None).unwrap();
        session.apply_move(Square::A6, Square::A5, None).unwrap();

        assert!(!session.legal_destinations(Square::E5).contains(&Square::D6));
        assert_eq!(
            session.apply_move(Square::E5, Square::D6, None),
            Err(EngineError::IllegalDestination {
                from: Square::E5,
                to: Square::D6
            })
        );
    }
}

#[cfg(test)]
mod promotion {
    use super::*;

    const FEN: &str = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1";

    #[test]
    fn reaching_the_final_rank_requires_a_choice() {
        let mut session = GameSession::from_fen(FEN).unwrap();
        let before = *session.position();

        assert_eq!(
            session.apply_move(Square::A7, Square::A8, None),
            Err(EngineError::PromotionRequired {
                from: Square::A7,
                to: Square::A8
            })
        );

        // Nothing changed: same board, same side to move, no history
        assert_eq!(*session.position(), before);
        assert_eq!(session.side_to_move(), Color::White);
        assert!(session.history().is_empty());
    }

    #[test]
    fn supplying_a_kind_promotes_the_pawn() {
        let mut session = GameSession::from_fen(FEN).unwrap();
        let record = session
            .apply_move(Square::A7, Square::A8, Some(PieceKind::Queen))
            .unwrap();

        assert_eq!(record.promotion, Some(PieceKind::Queen));
        assert_eq!(record.notation, "pawna7-a8=queen");
        let promoted = session.position().piece_at(Square::A8).unwrap();
        assert_eq!(promoted.kind(), PieceKind::Queen);
        assert_eq!(promoted.color(), Color::White);
    }

    #[test]
    fn underpromotion_is_honored() {
        let mut session = GameSession::from_fen(FEN).unwrap();
        session
            .apply_move(Square::A7, Square::A8, Some(PieceKind::Knight))
            .unwrap();
        assert_eq!(
            session.position().piece_at(Square::A8).map(|p| p.kind()),
            Some(PieceKind::Knight)
        );
    }
}

#[cfg(test)]
mod executor {
    use super::*;

    #[test]
    fn applying_a_move_appends_history_and_flips_the_turn() {
        let mut session = GameSession::new();
        let record = session.apply_move(Square::E2, Square::E4, None).unwrap();

        assert_eq!(record.from, Square::E2);
        assert_eq!(record.to, Square::E4);
        assert_eq!(record.notation, "pawne2-e4");
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.side_to_move(), Color::Black);
    }

    #[test]
    fn rejections_leave_the_session_untouched() {
        let mut session = GameSession::new();

        assert_eq!(
            session.apply_move(Square::E4, Square::E5, None),
            Err(EngineError::EmptyOrigin(Square::E4))
        );
        assert_eq!(
            session.apply_move(Square::E7, Square::E5, None),
            Err(EngineError::WrongSide(Square::E7))
        );
        assert_eq!(
            session.apply_move(Square::E2, Square::E5, None),
            Err(EngineError::IllegalDestination {
                from: Square::E2,
                to: Square::E5
            })
        );

        assert!(session.history().is_empty());
        assert_eq!(session.side_to_move(), Color::White);
        assert_eq!(session.position().to_fen(), stoat::FEN_STARTPOS);
    }

    #[test]
    fn capture_is_recorded() {
        let mut session = GameSession::new();
        for (from, to) in [
            (Square::E2, Square::E4),
            (Square::D7, Square::D5),
        ] {
            session.apply_move(from, to, None).unwrap();
        }

        let record = session.apply_move(Square::E4, Square::D5, None).unwrap();
        assert_eq!(record.captured.map(|p| p.kind()), Some(PieceKind::Pawn));
        assert_eq!(record.captured.map(|p| p.color()), Some(Color::Black));
        assert!(!record.en_passant);
    }

    #[test]
    fn reset_restores_the_starting_position() {
        let mut session = GameSession::new();
        session.apply_move(Square::E2, Square::E4, None).unwrap();
        session.reset();

        assert!(session.history().is_empty());
        assert_eq!(session.side_to_move(), Color::White);
        assert_eq!(session.position().to_fen(), stoat::FEN_STARTPOS);
    }
}

#[cfg(test)]
mod fen {
    use super::*;

    #[test]
    fn startpos_round_trips() {
        let position = Position::from_fen(stoat::FEN_STARTPOS).unwrap();
        assert_eq!(position.to_fen(), stoat::FEN_STARTPOS);
    }

    #[test]
    fn double_push_exposes_the_en_passant_target() {
        let mut session = GameSession::new();
        session.apply_move(Square::E2, Square::E4, None).unwrap();

        let fen = session.position().to_fen();
        assert_eq!(
            fen,
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );

        // And loading it back restores the opportunity
        let reloaded = Position::from_fen(&fen).unwrap();
        assert_eq!(reloaded.ep_square(), Some(Square::E3));
    }

    #[test]
    fn missing_kings_are_rejected() {
        for fen in [
            "8/8/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/4K3/4K3 w - - 0 1",
        ] {
            assert!(matches!(
                Position::from_fen(fen),
                Err(EngineError::MalformedPosition(_))
            ));
        }
    }

    #[test]
    fn garbage_is_rejected() {
        for fen in [
            "",
            "rnbqkbnr/pppppppp/8/8",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - zero 1",
        ] {
            assert!(Position::from_fen(fen).is_err(), "{fen:?} should be rejected");
        }
    }

    #[test]
    fn rights_are_revoked_as_rooks_and_kings_move() {
        let mut session = GameSession::new();
        for (from, to) in [
            (Square::H2, Square::H4),
            (Square::H7, Square::H5),
            (Square::H1, Square::H3),
        ] {
            session.apply_move(from, to, None).unwrap();
        }

        let rights = session.position().castling_rights(Color::White);
        assert!(!rights.short);
        assert!(rights.long);
    }
}

#[cfg(test)]
mod ai {
    use super::*;

    #[test]
    fn expert_always_takes_a_uniquely_best_move() {
        // The hanging queen dwarfs every alternative by far more than the
        // expert selection window
        let session = GameSession::from_fen("q3k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let expected = Move::new(Square::A1, Square::A8);

        for _ in 0..50 {
            assert_eq!(session.ai_move(Difficulty::Expert), Some(expected));
        }
    }

    #[test]
    fn every_tier_returns_a_legal_move() {
        let session = GameSession::new();
        let legal = legal_moves(session.position(), Color::White);

        for difficulty in Difficulty::all() {
            for _ in 0..20 {
                let mv = session.ai_move(difficulty).unwrap();
                assert!(legal.contains(&mv), "{difficulty} chose illegal {mv}");
            }
        }
    }

    #[test]
    fn mated_side_gets_no_move() {
        let session = GameSession::from_fen("4k3/4Q3/4K3/8/8/8/8/8 b - - 0 1").unwrap();
        for difficulty in Difficulty::all() {
            assert_eq!(session.ai_move(difficulty), None);
        }
    }
}
