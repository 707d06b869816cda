//! 증분 로그 스캐너
//!
//! 컨테이너 stdout/stderr처럼 계속 늘어나는 라인 단위 로그에서
//! 이전에 매칭된 위치 이후만 검색하는 커서를 제공합니다.
//!
//! # 모듈 구성
//!
//! - [`scanner`]: 재개 가능한 커서를 가진 [`LogScanner`]
//! - [`captured`]: 커서 없는 일회성 검색 [`CapturedLogs`] (build/exec 출력 등)
//! - [`record`]: 매칭 결과 [`MatchRecord`]
//! - [`error`]: 도메인 에러 타입
//!
//! # 예시
//!
//! ```
//! use dockgrep_log_scanner::LogScanner;
//!
//! let mut scanner = LogScanner::new();
//! let log = ["Hi 0", "Hi 1", "Hi 2", "Hi 3"];
//! let first = scanner.scan_matches(&log, r"Hi \d")?;
//! assert_eq!(first.len(), 4);
//! assert_eq!(scanner.cursor(), Some(3));
//!
//! let grown = ["Hi 0", "Hi 1", "Hi 2", "Hi 3", "Hi 4", "Hi 5"];
//! let next = scanner.scan_matches(&grown, r"Hi \d")?;
//! assert_eq!(next[0].line_number, 4);
//! # Ok::<(), dockgrep_log_scanner::ScanError>(())
//! ```

pub mod captured;
pub mod error;
pub mod record;
pub mod scanner;

// --- 주요 타입 re-export ---

pub use captured::{CapturedLogs, split_lines};
pub use error::ScanError;
pub use record::MatchRecord;
pub use scanner::{LogScanner, ScanState, compile_pattern};
