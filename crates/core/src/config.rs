//! 설정 관리 -- dockgrep.toml 파싱 및 런타임 설정
//!
//! [`DockgrepConfig`]는 모든 크레이트의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`DOCKGREP_WATCH_POLL_INTERVAL_MS=250` 형식)
//! 3. 설정 파일 (`dockgrep.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), dockgrep_core::error::DockgrepError> {
//! use dockgrep_core::config::DockgrepConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = DockgrepConfig::load("dockgrep.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = DockgrepConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, DockgrepError};

/// dockgrep 통합 설정
///
/// `dockgrep.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockgrepConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 컨테이너 로그 감시 설정
    #[serde(default)]
    pub watch: WatchConfig,
}

impl DockgrepConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DockgrepError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, DockgrepError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DockgrepError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                DockgrepError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 없으면 기본값을 사용합니다.
    ///
    /// CLI는 설정 파일 없이도 동작해야 하므로 `FileNotFound`만 기본값으로 대체하고
    /// 그 외 에러(파싱 실패 등)는 그대로 전파합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, DockgrepError> {
        match Self::load(path.as_ref()).await {
            Ok(config) => Ok(config),
            Err(DockgrepError::Config(ConfigError::FileNotFound { path })) => {
                tracing::debug!(path = %path, "config file not found, using defaults");
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(e),
        }
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, DockgrepError> {
        toml::from_str(toml_str).map_err(|e| {
            DockgrepError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `DOCKGREP_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "DOCKGREP_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "DOCKGREP_GENERAL_LOG_FORMAT");

        // Watch
        override_string(
            &mut self.watch.docker_socket,
            "DOCKGREP_WATCH_DOCKER_SOCKET",
        );
        override_u64(
            &mut self.watch.poll_interval_ms,
            "DOCKGREP_WATCH_POLL_INTERVAL_MS",
        );
        override_u64(
            &mut self.watch.wait_timeout_secs,
            "DOCKGREP_WATCH_WAIT_TIMEOUT_SECS",
        );
        override_bool(
            &mut self.watch.include_stdout,
            "DOCKGREP_WATCH_INCLUDE_STDOUT",
        );
        override_bool(
            &mut self.watch.include_stderr,
            "DOCKGREP_WATCH_INCLUDE_STDERR",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    ///
    /// 여기서는 섹션 간 공통 형식만 검사합니다. 감시 주기 등의 범위 검증은
    /// `dockgrep-container-logs`의 `LogWatchConfig::validate()`가 담당합니다.
    pub fn validate(&self) -> Result<(), DockgrepError> {
        check_one_of(
            "general.log_level",
            &self.general.log_level,
            &["trace", "debug", "info", "warn", "error"],
        )?;
        check_one_of("general.log_format", &self.general.log_format, &["json", "pretty"])?;

        if self.watch.docker_socket.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "watch.docker_socket".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }

        if !self.watch.include_stdout && !self.watch.include_stderr {
            return Err(ConfigError::InvalidValue {
                field: "watch.include_stdout".to_owned(),
                reason: "at least one of include_stdout/include_stderr must be true".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 컨테이너 로그 감시 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
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

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            docker_socket: "/var/run/docker.sock".to_owned(),
            poll_interval_ms: 500,
            wait_timeout_secs: 30,
            include_stdout: true,
            include_stderr: true,
        }
    }
}

fn check_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), DockgrepError> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(ConfigError::InvalidValue {
        field: field.to_owned(),
        reason: format!("'{value}' is not one of: {}", allowed.join(", ")),
    }
    .into())
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}
