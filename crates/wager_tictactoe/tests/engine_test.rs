//! Tests for the turn state machine.

use wager_tictactoe::rules::{check_winner, is_draw, is_full, winning_line};
use wager_tictactoe::{
    Board, Engine, GameStatus, Line, MoveOutcome, Player, Position, Square, Turn,
};

fn play(moves: &[Position]) -> Engine {
    let mut engine = Engine::new();
    for pos in moves {
        engine.attempt_move(*pos);
    }
    engine
}

#[test]
fn test_first_player_wins_top_row() {
    // X (0,0), O (1,1), X (0,1), O (1,0), X (0,2)
    let engine = play(&[
        Position::TopLeft,
        Position::Center,
        Position::TopCenter,
        Position::MiddleLeft,
        Position::TopRight,
    ]);

    assert_eq!(
        *engine.status(),
        GameStatus::Won {
            winner: Player::X,
            line: Line::Row(0)
        }
    );
    // The turn has passed to the losing side.
    assert_eq!(engine.turn(), Turn::Second);
    assert_eq!(engine.turn().flip().mark(), Player::X);
}

#[test]
fn test_second_player_wins_diagonal() {
    let engine = play(&[
        Position::TopCenter,
        Position::TopLeft,
        Position::TopRight,
        Position::Center,
        Position::MiddleLeft,
        Position::BottomRight,
    ]);

    assert_eq!(
        *engine.status(),
        GameStatus::Won {
            winner: Player::O,
            line: Line::Diagonal
        }
    );
}

#[test]
fn test_full_board_without_line_is_draw() {
    // X O X / X O O / O X X
    let engine = play(&[
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::Center,
        Position::MiddleLeft,
        Position::MiddleRight,
        Position::BottomCenter,
        Position::BottomLeft,
        Position::BottomRight,
    ]);

    assert_eq!(*engine.status(), GameStatus::Draw);
    assert_eq!(engine.history().len(), 9);
}

#[test]
fn test_win_on_last_square_is_not_draw() {
    // X O X / O X O / O X X -> X completes the diagonal with the ninth mark
    let engine = play(&[
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomCenter,
        Position::BottomLeft,
        Position::BottomRight,
    ]);

    assert!(matches!(
        engine.status(),
        GameStatus::Won {
            winner: Player::X,
            ..
        }
    ));
}

#[test]
fn test_terminal_state_is_absorbing() {
    let mut engine = play(&[
        Position::TopLeft,
        Position::Center,
        Position::TopCenter,
        Position::MiddleLeft,
        Position::TopRight,
    ]);
    let before = engine.clone();

    assert_eq!(engine.attempt_move(Position::BottomRight), MoveOutcome::GameOver);
    assert_eq!(engine, before);
    assert_eq!(engine.board().get(Position::BottomRight), Square::Empty);
}

#[test]
fn test_occupied_square_keeps_turn() {
    let mut engine = play(&[Position::Center]);
    assert_eq!(engine.attempt_move(Position::Center), MoveOutcome::Occupied);
    assert_eq!(engine.turn(), Turn::Second);
    assert_eq!(engine.board().occupied(), 1);
}

#[test]
fn test_placed_outcome_reports_mark() {
    let mut engine = Engine::new();
    assert_eq!(
        engine.attempt_move(Position::BottomLeft),
        MoveOutcome::Placed {
            mark: Player::X,
            position: Position::BottomLeft
        }
    );
}

#[test]
fn test_status_serializes() {
    let status = GameStatus::Won {
        winner: Player::O,
        line: Line::Column(2),
    };
    let json = serde_json::to_string(&status).expect("serialize");
    let back: GameStatus = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, status);
}

/// Index triples for every line, in `Line::ALL` order.
const TRIPLES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Board number `n` read as nine base-3 digits: 0 empty, 1 X, 2 O.
fn board_from_code(mut n: u32) -> Board {
    let mut board = Board::new();
    for pos in Position::ALL {
        let square = match n % 3 {
            0 => Square::Empty,
            1 => Square::Occupied(Player::X),
            _ => Square::Occupied(Player::O),
        };
        board.set(pos, square);
        n /= 3;
    }
    board
}

fn naive_winner(squares: &[Square; 9]) -> Option<(Player, Line)> {
    TRIPLES
        .iter()
        .zip(Line::ALL)
        .find_map(|([a, b, c], line)| match squares[*a] {
            Square::Occupied(p) if squares[*b] == squares[*a] && squares[*c] == squares[*a] => {
                Some((p, line))
            }
            _ => None,
        })
}

#[test]
fn test_rules_agree_with_naive_check_on_every_board() {
    for code in 0..3u32.pow(9) {
        let board = board_from_code(code);
        let squares = board.squares();
        let expected = naive_winner(squares);
        let full = squares.iter().all(|s| *s != Square::Empty);

        assert_eq!(winning_line(&board), expected, "board {code}");
        assert_eq!(check_winner(&board), expected.map(|(p, _)| p), "board {code}");
        assert_eq!(is_full(&board), full, "board {code}");
        assert_eq!(is_draw(&board), full && expected.is_none(), "board {code}");
    }
}
