// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rules engine backed by the shakmaty crate

use anyhow::{anyhow, Result};
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::Uci;
use shakmaty::{Bitboard, Board, CastlingMode, Chess, EnPassantMode, File, Move, Position, Rank, Role, Square};

use super::{RulesEngine, TerminalCondition};
use crate::{CandidateMove, Color, EngineSquare, GameError, Piece, PieceKind};

/// Half-moves without capture or pawn move that end the game (75 full moves)
const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

/// Occurrences of one position that end the game
const FIVEFOLD: usize = 5;

/// Standard chess played through shakmaty
#[derive(Debug, Clone)]
pub struct ShakmatyEngine {
    /// Current position
    position: Chess,
    /// Position before each applied move, parallel to `history`
    previous: Vec<Chess>,
    /// Applied moves
    history: Vec<CandidateMove>,
    /// SAN of each applied move, computed in the position it was played from
    san: Vec<String>,
    /// FEN of a non-standard starting position
    start_fen: Option<String>,
}

impl ShakmatyEngine {
    /// Create an engine at the standard starting position
    pub fn new() -> Self {
        Self {
            position: Chess::default(),
            previous: Vec::new(),
            history: Vec::new(),
            san: Vec::new(),
            start_fen: None,
        }
    }

    /// Create an engine from a FEN string
    pub fn from_fen(fen: &str) -> Result<Self> {
        let parsed: Fen = fen
            .parse()
            .map_err(|e| anyhow!("Failed to parse FEN '{}': {}", fen, e))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| anyhow!("FEN '{}' is not a legal position: {}", fen, e))?;

        Ok(Self {
            position,
            previous: Vec::new(),
            history: Vec::new(),
            san: Vec::new(),
            start_fen: Some(fen.trim().to_string()),
        })
    }

    /// Find the shakmaty move matching a candidate
    fn find_legal(&self, mv: CandidateMove) -> Option<Move> {
        self.position
            .legal_moves()
            .into_iter()
            .find(|m| candidate_from_move(m) == Some(mv))
    }

    /// Number of times the current position has occurred, counting itself
    fn repetition_count(&self) -> usize {
        let current = RepetitionKey::of(&self.position);
        1 + self
            .previous
            .iter()
            .filter(|pos| RepetitionKey::of(*pos) == current)
            .count()
    }
}

impl Default for ShakmatyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesEngine for ShakmatyEngine {
    fn piece_at(&self, square: EngineSquare) -> Option<Piece> {
        self.position
            .board()
            .piece_at(to_shakmaty_square(square))
            .map(|piece| Piece::new(kind_from_role(piece.role), color_from_shakmaty(piece.color)))
    }

    fn side_to_move(&self) -> Color {
        color_from_shakmaty(self.position.turn())
    }

    fn legal_moves(&self) -> Vec<CandidateMove> {
        self.position
            .legal_moves()
            .iter()
            .filter_map(candidate_from_move)
            .collect()
    }

    fn submit(&mut self, mv: CandidateMove) -> Result<(), GameError> {
        if let Some(kind) = mv.promotion {
            if !kind.is_promotion_choice() {
                return Err(GameError::InvalidPromotion(kind));
            }
        }

        let m = self.find_legal(mv).ok_or(GameError::IllegalMove(mv))?;

        self.previous.push(self.position.clone());
        let san = SanPlus::from_move_and_play_unchecked(&mut self.position, &m);
        self.san.push(san.to_string());
        self.history.push(mv);

        Ok(())
    }

    fn undo(&mut self) -> Result<CandidateMove, GameError> {
        let position = self.previous.pop().ok_or(GameError::NothingToUndo)?;
        self.position = position;
        self.san.pop();
        self.history.pop().ok_or(GameError::NothingToUndo)
    }

    fn terminal_condition(&self) -> Option<TerminalCondition> {
        if self.position.is_checkmate() {
            // The side to move is the one that got mated
            let winner = self.side_to_move().opposite();
            return Some(TerminalCondition::Checkmate { winner });
        }
        if self.position.is_stalemate() {
            return Some(TerminalCondition::Stalemate);
        }
        if self.position.is_insufficient_material() {
            return Some(TerminalCondition::InsufficientMaterial);
        }
        if self.position.halfmoves() >= SEVENTY_FIVE_MOVE_PLIES {
            return Some(TerminalCondition::SeventyFiveMoves);
        }
        if self.repetition_count() >= FIVEFOLD {
            return Some(TerminalCondition::FivefoldRepetition);
        }
        None
    }

    fn history(&self) -> &[CandidateMove] {
        &self.history
    }

    fn san_history(&self) -> &[String] {
        &self.san
    }

    fn start_fen(&self) -> Option<&str> {
        self.start_fen.as_deref()
    }
}

/// Parts of a position that decide whether two positions repeat
#[derive(PartialEq, Eq)]
struct RepetitionKey {
    board: Board,
    turn: shakmaty::Color,
    castling_rights: Bitboard,
    ep_square: Option<Square>,
}

impl RepetitionKey {
    fn of(pos: &Chess) -> Self {
        Self {
            board: pos.board().clone(),
            turn: pos.turn(),
            castling_rights: pos.castles().castling_rights(),
            ep_square: pos.ep_square(EnPassantMode::Legal),
        }
    }
}

fn candidate_from_move(m: &Move) -> Option<CandidateMove> {
    match m.to_uci(CastlingMode::Standard) {
        Uci::Normal { from, to, promotion } => Some(CandidateMove {
            from: from_shakmaty_square(from),
            to: from_shakmaty_square(to),
            promotion: promotion.map(kind_from_role),
        }),
        _ => None,
    }
}

fn to_shakmaty_square(square: EngineSquare) -> Square {
    Square::from_coords(File::new(u32::from(square.file)), Rank::new(u32::from(square.rank)))
}

fn from_shakmaty_square(square: Square) -> EngineSquare {
    EngineSquare::new(square.file() as u8, square.rank() as u8)
}

fn kind_from_role(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

fn color_from_shakmaty(color: shakmaty::Color) -> Color {
    match color {
        shakmaty::Color::White => Color::White,
        shakmaty::Color::Black => Color::Black,
    }
}
