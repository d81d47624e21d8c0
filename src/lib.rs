//! Tic-tac-toe solver: computes the best play for both sides from any legal
//! position by building the complete game tree and labeling it with
//! retrograde analysis. The command-line usage is described in `README.md`.
//!
//! ```
//! use noughts::game::core::Outcome;
//! use noughts::game::position::Position;
//!
//! let tree = noughts::search::solve(Position::empty());
//! // Tic-tac-toe is a draw with best play.
//! assert_eq!(tree.root().position().outcome(), Outcome::Draw);
//! assert_eq!(tree.root().position().plies_left(), Some(9));
//! ```

// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]
// Rustdoc lints.
#![warn(
    rustdoc::private_doc_tests,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![deny(clippy::perf)]

pub mod game;
pub mod report;
pub mod search;

use shadow_rs::shadow;

shadow!(build);

/// Build target and profile. Produced by `build.rs`.
const TARGET: &str = include_str!(concat!(env!("OUT_DIR"), "/target"));

/// Returns the full version that can be used to identify how the solver was
/// built in the first place.
#[must_use]
pub fn version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Returns the version, the build target and whether the build is clean, for
/// `--version` output.
#[must_use]
pub fn build_info() -> String {
    let mut info = format!("{} {}\ntarget: {TARGET}", env!("CARGO_PKG_NAME"), version());
    if !shadow_rs::git_clean() {
        info.push_str("\nwarning: built with uncommitted changes");
    }
    info
}
