//! 컨테이너 로그 에러 타입
//!
//! [`ContainerLogsError`]는 로그 조회와 감시 중 발생하는 모든 에러를 표현합니다.
//! `From<ContainerLogsError> for DockgrepError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.

use dockgrep_core::error::DockgrepError;
use dockgrep_log_scanner::ScanError;

/// 컨테이너 로그 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ContainerLogsError {
    /// Docker API 호출 실패
    #[error("docker api error: {0}")]
    DockerApi(String),

    /// Docker 소켓 연결 실패
    #[error("docker connection error: {0}")]
    DockerConnection(String),

    /// 컨테이너를 찾을 수 없음
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    /// 컨테이너 이름/ID 형식 오류
    #[error("invalid container reference '{reference}': {reason}")]
    InvalidContainerRef {
        /// 전달된 이름 또는 ID
        reference: String,
        /// 거부 사유
        reason: String,
    },

    /// 패턴 컴파일 실패
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// 대기 시간 내에 패턴이 나타나지 않음
    #[error("timed out after {waited_ms}ms waiting for '{pattern}' in container '{container}'")]
    WaitTimeout {
        /// 대상 컨테이너
        container: String,
        /// 기다린 패턴
        pattern: String,
        /// 실제 대기 시간 (밀리초)
        waited_ms: u64,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl From<ContainerLogsError> for DockgrepError {
    fn from(err: ContainerLogsError) -> Self {
        match err {
            ContainerLogsError::Scan(scan) => scan.into(),
            ContainerLogsError::Config { field, reason } => {
                DockgrepError::Config(dockgrep_core::ConfigError::InvalidValue { field, reason })
            }
            other => DockgrepError::Container(other.to_string()),
        }
    }
}
