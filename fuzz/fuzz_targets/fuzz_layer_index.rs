#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(entries) = plan_overlay::persistence::parse_index(data) {
        for entry in entries.into_iter().flatten() {
            // Gelesene Extents dürfen beim Validieren nicht paniken
            let _ = entry.extent.validate();
        }
    }
});
