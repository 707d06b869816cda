//! 컨테이너 로그 감시 설정
//!
//! [`LogWatchConfig`]는 core의 [`WatchConfig`](dockgrep_core::config::WatchConfig)를
//! 기반으로 범위 검증과 빌더를 제공합니다.
//!
//! # 사용 예시
//! ```ignore
//! use dockgrep_core::config::DockgrepConfig;
//! use dockgrep_container_logs::config::LogWatchConfig;
//!
//! let core_config = DockgrepConfig::default();
//! let config = LogWatchConfig::from_core(&core_config.watch);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::docker::LogStreams;
use crate::error::ContainerLogsError;

/// 컨테이너 로그 감시 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogWatchConfig {
    /// Docker 소켓 경로
    pub docker_socket: String,
    /// 로그 폴링 주기 (밀리초)
    pub poll_interval_ms: u64,
    /// 패턴 대기 타임아웃 (초)
    pub wait_timeout_secs: u64,
    /// stdout 포함 여부
    pub include_stdout: bool,
    /// stderr 포함 여부
    pub include_stderr: bool,
}

impl Default for LogWatchConfig {
    fn default() -> Self {
        Self::from_core(&dockgrep_core::config::WatchConfig::default())
    }
}

/// 설정 범위 상수
const MIN_POLL_INTERVAL_MS: u64 = 10;
const MAX_POLL_INTERVAL_MS: u64 = 60_000;
const MAX_WAIT_TIMEOUT_SECS: u64 = 3600;

impl LogWatchConfig {
    /// core의 `WatchConfig`에서 감시 설정을 생성합니다.
    pub fn from_core(core: &dockgrep_core::config::WatchConfig) -> Self {
        Self {
            docker_socket: core.docker_socket.clone(),
            poll_interval_ms: core.poll_interval_ms,
            wait_timeout_secs: core.wait_timeout_secs,
            include_stdout: core.include_stdout,
            include_stderr: core.include_stderr,
        }
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), ContainerLogsError> {
        if !(MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(&self.poll_interval_ms) {
            return Err(ContainerLogsError::Config {
                field: "poll_interval_ms".to_owned(),
                reason: format!("must be {MIN_POLL_INTERVAL_MS}-{MAX_POLL_INTERVAL_MS}"),
            });
        }

        if self.wait_timeout_secs == 0 || self.wait_timeout_secs > MAX_WAIT_TIMEOUT_SECS {
            return Err(ContainerLogsError::Config {
                field: "wait_timeout_secs".to_owned(),
                reason: format!("must be 1-{MAX_WAIT_TIMEOUT_SECS}"),
            });
        }

        if !self.include_stdout && !self.include_stderr {
            return Err(ContainerLogsError::Config {
                field: "include_stdout".to_owned(),
                reason: "at least one of include_stdout/include_stderr must be true".to_owned(),
            });
        }

        if self.docker_socket.is_empty() {
            return Err(ContainerLogsError::Config {
                field: "docker_socket".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        Ok(())
    }

    /// 폴링 주기
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// 대기 타임아웃
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    /// 조회할 출력 스트림
    pub fn streams(&self) -> LogStreams {
        LogStreams {
            stdout: self.include_stdout,
            stderr: self.include_stderr,
        }
    }
}

/// 감시 설정 빌더
#[derive(Default)]
pub struct LogWatchConfigBuilder {
    config: LogWatchConfig,
}

impl LogWatchConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// Docker 소켓 경로를 설정합니다.
    pub fn docker_socket(mut self, socket: impl Into<String>) -> Self {
        self.config.docker_socket = socket.into();
        self
    }

    /// 폴링 주기(밀리초)를 설정합니다.
    pub fn poll_interval_ms(mut self, ms: u64) -> Self {
        self.config.poll_interval_ms = ms;
        self
    }

    /// 대기 타임아웃(초)을 설정합니다.
    pub fn wait_timeout_secs(mut self, secs: u64) -> Self {
        self.config.wait_timeout_secs = secs;
        self
    }

    /// stdout 포함 여부를 설정합니다.
    pub fn include_stdout(mut self, include: bool) -> Self {
        self.config.include_stdout = include;
        self
    }

    /// stderr 포함 여부를 설정합니다.
    pub fn include_stderr(mut self, include: bool) -> Self {
        self.config.include_stderr = include;
        self
    }

    /// 설정을 검증하고 `LogWatchConfig`를 생성합니다.
    pub fn build(self) -> Result<LogWatchConfig, ContainerLogsError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        LogWatchConfig::default().validate().unwrap();
    }

    #[test]
    fn from_core_preserves_values() {
        let core = dockgrep_core::config::WatchConfig {
            docker_socket: "/run/docker.sock".to_owned(),
            poll_interval_ms: 250,
            wait_timeout_secs: 5,
            include_stdout: true,
            include_stderr: false,
        };
        let config = LogWatchConfig::from_core(&core);
        assert_eq!(config.docker_socket, "/run/docker.sock");
        assert_eq!(config.poll_interval_ms, 250);
        assert_eq!(config.wait_timeout_secs, 5);
        assert_eq!(
            config.streams(),
            LogStreams {
                stdout: true,
                stderr: false
            }
        );
    }

    #[test]
    fn validate_rejects_too_fast_polling() {
        let config = LogWatchConfig {
            poll_interval_ms: 9,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_boundary_poll_interval() {
        for ms in [MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS] {
            let config = LogWatchConfig {
                poll_interval_ms: ms,
                ..Default::default()
            };
            assert!(config.validate().is_ok(), "{ms}");
        }
        let config = LogWatchConfig {
            poll_interval_ms: MAX_POLL_INTERVAL_MS + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = LogWatchConfig {
            wait_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_excessive_timeout() {
        let config = LogWatchConfig {
            wait_timeout_secs: 3601,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_no_streams() {
        let config = LogWatchConfig {
            include_stdout: false,
            include_stderr: false,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("include_stdout"));
    }

    #[test]
    fn validate_rejects_empty_socket() {
        let config = LogWatchConfig {
            docker_socket: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn durations_follow_fields() {
        let config = LogWatchConfig {
            poll_interval_ms: 750,
            wait_timeout_secs: 12,
            ..Default::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(750));
        assert_eq!(config.wait_timeout(), Duration::from_secs(12));
    }

    #[test]
    fn builder_all_setters() {
        let config = LogWatchConfigBuilder::new()
            .docker_socket("/custom/docker.sock")
            .poll_interval_ms(100)
            .wait_timeout_secs(60)
            .include_stdout(false)
            .include_stderr(true)
            .build()
            .unwrap();

        assert_eq!(config.docker_socket, "/custom/docker.sock");
        assert_eq!(config.poll_interval_ms, 100);
        assert_eq!(config.wait_timeout_secs, 60);
        assert!(!config.include_stdout);
        assert!(config.include_stderr);
    }

    #[test]
    fn builder_rejects_invalid_config() {
        let result = LogWatchConfigBuilder::new().wait_timeout_secs(0).build();
        assert!(matches!(result, Err(ContainerLogsError::Config { .. })));
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = LogWatchConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: LogWatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
