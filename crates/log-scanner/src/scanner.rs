//! 재개 가능한 로그 스캔 커서
//!
//! [`LogScanner`]는 하나의 로그 스트림에 대한 스캔 위치를 소유합니다.
//! 호출자는 매번 전체 로그를 넘기고, 스캐너는 마지막으로 매칭된 라인 이후만 검사합니다.
//!
//! # 상태 전이
//!
//! ```text
//!            match                 match
//!   Fresh ──────────▶ Advanced ──────────▶ Advanced
//!     ▲                  │
//!     └──── reset() ─────┘
//! ```
//!
//! 매칭이 없으면 상태는 바뀌지 않습니다.

use metrics::counter;
use regex::Regex;
use tracing::debug;

use dockgrep_core::metrics::{SCAN_LINES_TOTAL, SCAN_MATCHES_TOTAL};

use crate::error::ScanError;
use crate::record::MatchRecord;

/// Compiles a search pattern, mapping regex errors to [`ScanError::InvalidPattern`].
pub fn compile_pattern(pattern: &str) -> Result<Regex, ScanError> {
    Regex::new(pattern).map_err(|e| ScanError::InvalidPattern {
        pattern: pattern.to_owned(),
        reason: e.to_string(),
    })
}

/// Scan position of one log stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Nothing matched yet; the next scan starts at line 0.
    #[default]
    Fresh,
    /// `cursor` is the index of the last line returned by a successful scan.
    Advanced {
        /// Absolute index of the last matched line.
        cursor: usize,
    },
}

/// Incremental grep over a growing, line-oriented log.
///
/// Each call scans only the lines after the last match reported so far.
/// The cursor moves to the *last matching line* of a call, not to the last
/// line examined, so trailing non-matching lines stay in the next window.
///
/// One scanner belongs to one log stream. Every mutating method takes
/// `&mut self`, so callers sharing a stream across tasks must wrap the
/// scanner in their own lock or keep one scanner per task.
#[derive(Debug, Clone, Default)]
pub struct LogScanner {
    state: ScanState,
    /// Most recently compiled pattern, reused while callers poll with the same string.
    compiled: Option<Regex>,
}

impl LogScanner {
    /// Creates a scanner in the [`ScanState::Fresh`] state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scan state.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Index of the last matched line, or `None` before the first match.
    pub fn cursor(&self) -> Option<usize> {
        match self.state {
            ScanState::Fresh => None,
            ScanState::Advanced { cursor } => Some(cursor),
        }
    }

    /// First line index eligible for the next scan.
    pub fn window_start(&self) -> usize {
        match self.state {
            ScanState::Fresh => 0,
            ScanState::Advanced { cursor } => cursor.saturating_add(1),
        }
    }

    /// Forgets the scan position so the next call re-examines the whole log.
    pub fn reset(&mut self) {
        debug!(previous = ?self.state, "log scanner reset");
        self.state = ScanState::Fresh;
    }

    /// Returns every line after the cursor that matches `pattern`.
    ///
    /// On at least one match the cursor moves to the last returned line.
    ///
    /// # Errors
    ///
    /// [`ScanError::InvalidPattern`] if `pattern` is not a valid regex. The
    /// cursor is left untouched in that case.
    pub fn scan_matches<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        pattern: &str,
    ) -> Result<Vec<MatchRecord>, ScanError> {
        let regex = self.compile(pattern)?;
        Ok(self.scan_matches_regex(lines, &regex))
    }

    /// Returns whether any line after the cursor matches `pattern`.
    ///
    /// Moves the cursor exactly like [`scan_matches`](Self::scan_matches) would.
    ///
    /// # Errors
    ///
    /// [`ScanError::InvalidPattern`] if `pattern` is not a valid regex.
    pub fn has_match<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        pattern: &str,
    ) -> Result<bool, ScanError> {
        let regex = self.compile(pattern)?;
        Ok(self.has_match_regex(lines, &regex))
    }

    /// [`scan_matches`](Self::scan_matches) with a precompiled pattern.
    pub fn scan_matches_regex<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        regex: &Regex,
    ) -> Vec<MatchRecord> {
        let start = self.window_start();
        let Some(window) = self.window(lines, start) else {
            return Vec::new();
        };

        let records: Vec<MatchRecord> = window
            .iter()
            .enumerate()
            .filter_map(|(offset, line)| {
                let line: &str = line.as_ref();
                regex
                    .is_match(line)
                    .then(|| MatchRecord::new(start + offset, line))
            })
            .collect();

        counter!(SCAN_LINES_TOTAL).increment(window.len() as u64);
        if let Some(last) = records.last() {
            self.advance_to(last.line_number);
        }
        counter!(SCAN_MATCHES_TOTAL).increment(records.len() as u64);

        debug!(
            window_start = start,
            window_len = window.len(),
            matches = records.len(),
            cursor = ?self.cursor(),
            "scanned log window"
        );
        records
    }

    /// [`has_match`](Self::has_match) with a precompiled pattern.
    pub fn has_match_regex<S: AsRef<str>>(&mut self, lines: &[S], regex: &Regex) -> bool {
        let start = self.window_start();
        let Some(window) = self.window(lines, start) else {
            return false;
        };

        // 커서는 마지막 매칭 라인으로 이동하므로 뒤에서부터 찾으면 충분합니다.
        let last = window
            .iter()
            .rposition(|line| regex.is_match(line.as_ref()));

        counter!(SCAN_LINES_TOTAL).increment(window.len() as u64);
        if let Some(offset) = last {
            self.advance_to(start + offset);
            counter!(SCAN_MATCHES_TOTAL).increment(1);
        }

        debug!(
            window_start = start,
            window_len = window.len(),
            matched = last.is_some(),
            cursor = ?self.cursor(),
            "checked log window"
        );
        last.is_some()
    }

    /// Lines eligible for this call, or `None` when the window is empty.
    fn window<'a, S>(&self, lines: &'a [S], start: usize) -> Option<&'a [S]> {
        if start > lines.len() {
            // 로그가 커서보다 짧아졌습니다 (컨테이너 재생성, 로그 로테이션 등).
            debug!(
                window_start = start,
                log_len = lines.len(),
                "log shorter than scan cursor, nothing to scan"
            );
            return None;
        }
        let window = &lines[start..];
        (!window.is_empty()).then_some(window)
    }

    fn advance_to(&mut self, line_number: usize) {
        debug_assert!(
            self.cursor().is_none_or(|c| line_number > c),
            "scan cursor must only move forward"
        );
        self.state = ScanState::Advanced {
            cursor: line_number,
        };
    }

    /// Compiles `pattern`, reusing the cached regex when the string is unchanged.
    fn compile(&mut self, pattern: &str) -> Result<Regex, ScanError> {
        if let Some(regex) = self.compiled.as_ref().filter(|r| r.as_str() == pattern) {
            return Ok(regex.clone());
        }
        let regex = compile_pattern(pattern)?;
        self.compiled = Some(regex.clone());
        Ok(regex)
    }
}
