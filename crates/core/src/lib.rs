//! dockgrep 공통 크레이트
//!
//! 모든 dockgrep 크레이트가 공유하는 설정, 최상위 에러, 메트릭 이름을 정의합니다.
//!
//! - [`config`]: `dockgrep.toml` 파싱 및 환경변수 오버라이드
//! - [`error`]: 최상위 에러 타입 (`DockgrepError`)
//! - [`metrics`]: 메트릭 이름 상수

pub mod config;
pub mod error;
pub mod metrics;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, DockgrepError};

// 설정
pub use config::{DockgrepConfig, GeneralConfig, WatchConfig};
