use noughts::game::core::{Outcome, Player, Square, LINES};
use noughts::game::position::Position;
use pretty_assertions::assert_eq;

fn legal_position(input: &str) {
    let position = Position::try_from(input).expect("we are parsing valid positions: {input}");
    assert_eq!(position.to_string(), input.trim().to_lowercase());
    assert!(position.is_legal());
    assert_eq!(position.outcome(), Outcome::Unknown);
    assert_eq!(position.plies_left(), None);
}

#[test]
#[allow(unused_results)]
fn basic_positions() {
    legal_position("---,---,---");
    legal_position("x--,---,---");
    legal_position("---,-o-,---");
    legal_position("XOX,-O-,OX-");
    legal_position("xox,oxo,oxo");
    legal_position("xxx,oo-,---\n");
    legal_position("  -x-,-o-,--- ");
}

#[test]
#[should_panic(expected = "board should have 3 rows")]
#[allow(unused_results)]
fn missing_row() {
    Position::try_from("xo-,---").unwrap();
}

#[test]
#[should_panic(expected = "row 2 should have 3 squares, got 4")]
#[allow(unused_results)]
fn long_row() {
    Position::try_from("xo-,----,---").unwrap();
}

#[test]
#[should_panic(expected = "invalid mark '*' on c3")]
#[allow(unused_results)]
fn unknown_mark() {
    Position::try_from("xo-,---,--*").unwrap();
}

#[test]
#[should_panic(expected = "mark counts should differ by at most one, got 3 x and 1 o")]
#[allow(unused_results)]
fn too_many_marks() {
    Position::try_from("xxx,o--,---").unwrap();
}

#[test]
#[should_panic(expected = "both players have completed a line")]
#[allow(unused_results)]
fn two_winners() {
    Position::try_from("ooo,xxx,---").unwrap();
}

#[test]
#[should_panic(expected = "x can not move with 1 x and 0 o on the board, expected o")]
#[allow(unused_results)]
fn wrong_player_to_move() {
    Position::parse("x--,---,---", Some(Player::X)).unwrap();
}

#[test]
fn play_game() {
    let moves = [
        Square::B2,
        Square::A1,
        Square::C3,
        Square::C1,
        Square::B1,
        Square::B3,
        Square::A2,
        Square::C2,
        Square::A3,
    ];
    let mut position = Position::empty();
    for square in moves {
        assert_eq!(position.winner(), None);
        let player = position.to_move();
        position = position.apply_move(square, player).unwrap();
        assert_eq!(position.to_move(), !player);
        // Every intermediate position can be parsed back.
        let parsed = Position::try_from(position.to_string().as_str()).unwrap();
        assert_eq!(parsed, position);
    }
    assert_eq!(position.to_string(), "oxo,xxo,xox");
    assert!(position.is_full());
    assert_eq!(position.winner(), None);
}

#[test]
fn every_line_wins() {
    for line in LINES {
        for player in [Player::X, Player::O] {
            let mut position = Position::empty();
            for square in line {
                position = position.apply_move(square, player).unwrap();
            }
            assert_eq!(position.winner(), Some(player), "{line:?}");
        }
    }
}
