#![no_main]

use libfuzzer_sys::fuzz_target;

use dockgrep_log_scanner::split_lines;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let lines = split_lines(text);
        assert!(lines.iter().all(|line| !line.contains('\n')));
        assert!(lines.len() <= text.matches('\n').count() + 1);
    }
});
