#![no_main]
use libfuzzer_sys::fuzz_target;
use noughts::game::position::Position;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(position) = Position::try_from(s) {
            // Accepted boards are printed back in the canonical encoding.
            let reparsed = Position::try_from(position.to_string().as_str())
                .expect("printed positions are valid");
            assert_eq!(reparsed.to_string(), position.to_string());
            assert!(position.is_legal());
        }
    }
});
