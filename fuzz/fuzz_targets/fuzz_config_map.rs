#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Any JSON object must either validate or return an error, never panic
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(data) {
        let _ = rotalog::LoggerConfig::from_map(&map);
    }
});
