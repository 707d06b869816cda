//! 로그 스캐너 에러 타입
//!
//! 패턴 컴파일 실패만이 에러입니다. 빈 로그나 매칭 없음은 정상 결과로 취급합니다.

use dockgrep_core::error::DockgrepError;

/// 로그 스캐너 도메인 에러
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// 정규식으로 컴파일할 수 없는 패턴
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// 호출자가 전달한 원본 패턴
        pattern: String,
        /// 정규식 엔진이 보고한 사유
        reason: String,
    },
}

impl From<ScanError> for DockgrepError {
    fn from(err: ScanError) -> Self {
        DockgrepError::Scan(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pattern_display() {
        let err = ScanError::InvalidPattern {
            pattern: "[unclosed".to_owned(),
            reason: "unclosed character class".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("[unclosed"));
        assert!(msg.contains("unclosed character class"));
    }

    #[test]
    fn converts_to_dockgrep_error() {
        let err = ScanError::InvalidPattern {
            pattern: "(".to_owned(),
            reason: "unclosed group".to_owned(),
        };
        let top: DockgrepError = err.into();
        assert!(matches!(top, DockgrepError::Scan(_)));
    }
}
