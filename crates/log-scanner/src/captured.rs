//! 캡처된 명령 출력 검색
//!
//! 이미지 빌드, pull, exec 결과처럼 한 번 받아서 끝나는 출력은 커서가 필요 없습니다.
//! [`CapturedLogs`]는 전체 버퍼를 매번 처음부터 검색합니다.

use std::fmt;

use regex::Regex;

use crate::error::ScanError;
use crate::record::MatchRecord;
use crate::scanner::compile_pattern;

/// Splits raw output into lines.
///
/// Splits on `\n`, strips one trailing `\r` per line, and drops the empty
/// segment a trailing newline would produce.
pub fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let body = text.strip_suffix('\n').unwrap_or(text);
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_owned())
        .collect()
}

/// Captured output of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedLogs {
    lines: Vec<String>,
}

impl CapturedLogs {
    /// Builds a buffer from raw output text.
    pub fn from_output(text: &str) -> Self {
        Self {
            lines: split_lines(text),
        }
    }

    /// Builds a buffer from already split lines.
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// All captured lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Every line matching `pattern`, with its 0-based position.
    pub fn grep(&self, pattern: &str) -> Result<Vec<MatchRecord>, ScanError> {
        let regex = compile_pattern(pattern)?;
        Ok(self.grep_regex(&regex))
    }

    /// Whether any line matches `pattern`.
    pub fn contains_match(&self, pattern: &str) -> Result<bool, ScanError> {
        let regex = compile_pattern(pattern)?;
        Ok(self.lines.iter().any(|line| regex.is_match(line)))
    }

    pub fn grep_regex(&self, regex: &Regex) -> Vec<MatchRecord> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| regex.is_match(line))
            .map(|(idx, line)| MatchRecord::new(idx, line.as_str()))
            .collect()
    }
}

impl From<&str> for CapturedLogs {
    fn from(text: &str) -> Self {
        Self::from_output(text)
    }
}

impl fmt::Display for CapturedLogs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}
