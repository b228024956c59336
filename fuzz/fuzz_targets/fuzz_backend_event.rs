#![no_main]

use libfuzzer_sys::fuzz_target;
use wallet_navbar::backend::EventEnvelope;
use wallet_navbar::model::DaemonState;

fuzz_target!(|data: &[u8]| {
    // Arbitrary input lines must decode or fail cleanly
    if let Ok(line) = std::str::from_utf8(data) {
        if let Ok(envelope) = EventEnvelope::parse(line) {
            let _ = envelope.into_event();
        }

        // Progress must stay within 0..=100 for any heights
        if let Ok(state) = serde_json::from_str::<DaemonState>(line) {
            if let Some(percent) = state.progress_percent() {
                assert!(percent <= 100);
            }
        }
    }
});
