//! 메트릭 이름 상수
//!
//! 각 크레이트는 이 상수를 사용하여 `metrics::counter!()` 매크로를 호출합니다.
//! 익스포터는 설치하지 않으므로 기본 no-op recorder로 기록됩니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `dockgrep_`
//! - 접미어: `_total` (counter)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(dockgrep_core::metrics::SCAN_MATCHES_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 결과 레이블 키 (success, failure)
pub const LABEL_RESULT: &str = "result";

// ─── Log Scanner 메트릭 ─────────────────────────────────────────────

/// Log Scanner: 스캔 윈도우에서 검사한 라인 수 (counter)
pub const SCAN_LINES_TOTAL: &str = "dockgrep_scan_lines_total";

/// Log Scanner: 매칭된 라인 수 (counter)
pub const SCAN_MATCHES_TOTAL: &str = "dockgrep_scan_matches_total";

// ─── Container Logs 메트릭 ──────────────────────────────────────────

/// Container Logs: Docker 로그 조회 횟수 (counter, label: result)
pub const LOG_FETCHES_TOTAL: &str = "dockgrep_log_fetches_total";

/// Container Logs: Docker 로그 조회 실패 횟수 (counter)
pub const LOG_FETCH_FAILURES_TOTAL: &str = "dockgrep_log_fetch_failures_total";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_names_share_prefix() {
        for name in [
            SCAN_LINES_TOTAL,
            SCAN_MATCHES_TOTAL,
            LOG_FETCHES_TOTAL,
            LOG_FETCH_FAILURES_TOTAL,
        ] {
            assert!(name.starts_with("dockgrep_"), "{name}");
            assert!(name.ends_with("_total"), "{name}");
        }
    }
}
