#![no_main]

use libfuzzer_sys::fuzz_target;
use wallet_navbar::config::NavbarConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(config) = serde_json::from_str::<NavbarConfig>(s) {
            let _ = config.quit_delay();
            let _ = config.wallet_route(u64::MAX);
        }
    }
});
