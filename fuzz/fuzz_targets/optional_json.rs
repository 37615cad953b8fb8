#![no_main]

use libfuzzer_sys::fuzz_target;
use synckit::value::Optional;

// Fuzz Optional deserialization from arbitrary JSON
//
// Whatever parses must re-serialize to JSON that parses back to the same
// state. Parse failures must not panic.
fuzz_target!(|data: &[u8]| {
    let Ok(parsed) = serde_json::from_slice::<Optional<serde_json::Value>>(data) else {
        return;
    };
    assert!(parsed.is_present());

    let Ok(json) = serde_json::to_vec(&parsed) else {
        return;
    };
    let back: Optional<serde_json::Value> =
        serde_json::from_slice(&json).expect("re-serialized Optional must parse");
    assert_eq!(back, parsed);
});
