use assert_cmd::Command;
use predicates::boolean::PredicateBooleanExt;
use predicates::str::contains;

const BINARY_NAME: &str = "noughts";

fn noughts() -> Command {
    Command::cargo_bin(BINARY_NAME).expect("Binary should be built")
}

#[test]
fn best_play() {
    drop(
        noughts()
            .arg("xx-,-o-,---")
            .assert()
            .success()
            .stdout(
                contains("Best play by both sides:")
                    .and(contains("O to move: draw in 6 plies"))
                    .and(contains("O plays c1"))
                    .and(contains("O to move: draw in 0 plies")),
            ),
    );
}

#[test]
fn empty_board() {
    drop(
        noughts()
            .args(["---,---,---", "--verbosity", "quiet"])
            .assert()
            .success()
            .stdout("draw in 9 plies\n"),
    );
}

#[test]
fn quickest_loss() {
    drop(
        noughts()
            .args(["XX-,O--,---", "--verbosity=quiet"])
            .assert()
            .success()
            .stdout("X wins in 2 plies\n"),
    );
}

#[test]
fn explicit_player_to_move() {
    drop(
        noughts()
            .args(["--to-move", "o", "--verbosity", "quiet", "xx-,oo-,---"])
            .assert()
            .success()
            .stdout("O wins in 1 ply\n"),
    );
    drop(
        noughts()
            .args(["--to-move", "x", "x--,---,---"])
            .assert()
            .failure()
            .stderr(contains("x can not move with 1 x and 0 o on the board")),
    );
}

#[test]
fn debug_output() {
    drop(
        noughts()
            .args(["xox,oxo,ox-", "--verbosity", "debug"])
            .assert()
            .success()
            .stdout(
                contains("Input position:")
                    .and(contains("Game tree (2 nodes):"))
                    .and(contains("Analyzed game tree, 2 positions resolved, 0 pruned (2 nodes):"))
                    .and(contains("depth 1, after c3"))
                    .and(contains("X plays c3")),
            ),
    );
}

#[test]
fn invalid_boards() {
    drop(
        noughts()
            .arg("xo-,-a-,---")
            .assert()
            .failure()
            .stderr(contains("invalid board 'xo-,-a-,---'").and(contains("invalid mark 'a' on b2"))),
    );
    drop(
        noughts()
            .arg("xo-,---")
            .assert()
            .failure()
            .stderr(contains("board should have 3 rows")),
    );
    drop(
        noughts()
            .arg("xxx,o--,---")
            .assert()
            .failure()
            .stderr(contains("mark counts should differ by at most one")),
    );
}

#[test]
fn missing_board() {
    drop(noughts().assert().failure().stderr(contains("Usage")));
}

#[test]
fn version() {
    drop(
        noughts()
            .arg("--version")
            .assert()
            .success()
            .stdout(contains("noughts")),
    );
}
