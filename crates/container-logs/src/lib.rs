//! 컨테이너 로그 감시
//!
//! Docker 데몬에서 컨테이너 로그 전체를 가져와 [`LogScanner`](dockgrep_log_scanner::LogScanner)로
//! 증분 검색합니다. 이미지 빌드/실행 같은 컨테이너 관리는 하지 않고 로그 조회만 합니다.
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`ContainerLogsError`)
//! - [`config`]: Watch configuration (`LogWatchConfig`, builder)
//! - [`docker`]: Docker API abstraction (`DockerClient` trait, `BollardDockerClient`)
//! - [`watch`]: Per-container grep cursor (`ContainerLogWatch`)
//!
//! # Architecture
//!
//! ```text
//! Docker Daemon --logs--> DockerClient --lines--> ContainerLogWatch
//!                                                      |
//!                                                 LogScanner (cursor)
//!                                                      |
//!                                                 MatchRecord / bool
//! ```

pub mod config;
pub mod docker;
pub mod error;
pub mod watch;

// --- Public API Re-exports ---

// Configuration
pub use config::{LogWatchConfig, LogWatchConfigBuilder};

// Error
pub use error::ContainerLogsError;

// Docker API
pub use docker::{BollardDockerClient, DockerClient, LogStreams};

// Watch
pub use watch::ContainerLogWatch;
