//! 매칭 결과 레코드

use std::fmt;

use serde::{Deserialize, Serialize};

/// 매칭된 한 줄
///
/// `line_number`는 스캔 윈도우 기준이 아니라 전체 로그 기준의 0-based 위치입니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchRecord {
    /// 전체 로그에서의 라인 위치 (0부터 시작)
    pub line_number: usize,
    /// 라인 원문
    pub line: String,
}

impl MatchRecord {
    /// 새 레코드를 생성합니다.
    pub fn new(line_number: usize, line: impl Into<String>) -> Self {
        Self {
            line_number,
            line: line.into(),
        }
    }
}

impl From<MatchRecord> for (usize, String) {
    fn from(record: MatchRecord) -> Self {
        (record.line_number, record.line)
    }
}

impl fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.line_number, self.line)
    }
}
