//! Docker API abstraction for testability.
//!
//! The [`DockerClient`] trait covers the read-only calls the log watcher
//! needs, allowing production code to use [`BollardDockerClient`] while
//! tests use `MockDockerClient`.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐
//! │ ContainerLogWatch │
//! └─────────┬─────────┘
//!           │
//!           ▼
//!    ┌─────────────┐
//!    │DockerClient │ (trait)
//!    └─────────────┘
//!         │     │
//!         ▼     ▼
//!   ┌───────┐ ┌────┐
//!   │Bollard│ │Mock│
//!   └───┬───┘ └────┘
//!       │
//!       ▼
//!   Docker Daemon
//! ```
//!
//! # Container Reference Validation
//!
//! Methods accept a container name or ID and validate it before calling the API:
//! - Must be 1-128 characters
//! - First character must be an ASCII letter or digit
//! - Remaining characters must be ASCII letters, digits, `_`, `.` or `-`
//!
//! # Examples
//!
//! ```ignore
//! use dockgrep_container_logs::{BollardDockerClient, DockerClient, LogStreams};
//!
//! let client = BollardDockerClient::connect_local()?;
//! let lines = client.container_logs("web", LogStreams::default()).await?;
//! # Ok::<(), dockgrep_container_logs::ContainerLogsError>(())
//! ```

use std::future::Future;
use std::sync::Arc;

use bytes::BytesMut;
use futures::TryStreamExt;

use dockgrep_log_scanner::split_lines;

use crate::error::ContainerLogsError;

const MAX_CONTAINER_REF_LEN: usize = 128;

/// Validates a container name or ID before it reaches the Docker API.
pub(crate) fn validate_container_ref(reference: &str) -> Result<(), ContainerLogsError> {
    let invalid = |reason: &str| ContainerLogsError::InvalidContainerRef {
        reference: reference.to_owned(),
        reason: reason.to_owned(),
    };

    if reference.is_empty() || reference.len() > MAX_CONTAINER_REF_LEN {
        return Err(invalid("length must be 1-128"));
    }
    let mut chars = reference.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid("must start with an ASCII letter or digit"));
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')) {
        return Err(invalid("contains characters outside [A-Za-z0-9_.-]"));
    }
    Ok(())
}

/// Output streams to include when fetching container logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogStreams {
    pub stdout: bool,
    pub stderr: bool,
}

impl Default for LogStreams {
    fn default() -> Self {
        Self {
            stdout: true,
            stderr: true,
        }
    }
}

/// Trait abstracting the Docker calls used for log watching.
///
/// The trait is `Send + Sync + 'static`, allowing one client to be shared
/// by several watchers through an `Arc`.
///
/// # Error Handling
///
/// - **404 errors**: Converted to `ContainerLogsError::ContainerNotFound`
/// - **Connection errors**: Wrapped as `ContainerLogsError::DockerConnection`
/// - **Bad references**: `ContainerLogsError::InvalidContainerRef`, no API call made
pub trait DockerClient: Send + Sync + 'static {
    /// Fetches the complete log of a container, split into lines.
    ///
    /// Always returns the log from its first line; the caller decides which
    /// part is new.
    ///
    /// # Errors
    ///
    /// - `ContainerLogsError::ContainerNotFound`: Container does not exist (404)
    /// - `ContainerLogsError::DockerApi`: Other API errors
    fn container_logs(
        &self,
        container: &str,
        streams: LogStreams,
    ) -> impl Future<Output = Result<Vec<String>, ContainerLogsError>> + Send;

    /// Resolves a container name or ID prefix to the full container ID.
    ///
    /// # Errors
    ///
    /// - `ContainerLogsError::ContainerNotFound`: No such container (404)
    fn resolve_container(
        &self,
        name_or_id: &str,
    ) -> impl Future<Output = Result<String, ContainerLogsError>> + Send;

    /// Checks Docker daemon connectivity.
    ///
    /// # Errors
    ///
    /// Returns `ContainerLogsError::DockerConnection` if the daemon is unreachable.
    fn ping(&self) -> impl Future<Output = Result<(), ContainerLogsError>> + Send;
}

/// Maps a bollard error for `action` on `container` into the domain error.
fn map_api_error(
    container: &str,
    action: &str,
    err: bollard::errors::Error,
) -> ContainerLogsError {
    match err {
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        } => ContainerLogsError::ContainerNotFound(container.to_owned()),
        other => ContainerLogsError::DockerApi(format!("{action} '{container}' failed: {other}")),
    }
}

/// Production Docker client implementation using `bollard`.
///
/// Communicates with the Docker daemon via a Unix socket.
/// Internally uses `Arc<bollard::Docker>` for safe sharing across async tasks.
///
/// # Connection Management
///
/// - Connection timeout: 120 seconds
/// - API version: Default (auto-negotiated)
/// - Socket path: Configurable (default: `/var/run/docker.sock`)
pub struct BollardDockerClient {
    docker: Arc<bollard::Docker>,
}

impl BollardDockerClient {
    /// Connects to Docker using the default local socket.
    ///
    /// # Errors
    ///
    /// Returns `ContainerLogsError::DockerConnection` if the connection fails
    /// (e.g., socket not found, permission denied, daemon not running).
    pub fn connect_local() -> Result<Self, ContainerLogsError> {
        let docker = bollard::Docker::connect_with_local_defaults().map_err(|e| {
            ContainerLogsError::DockerConnection(format!("failed to connect to docker: {e}"))
        })?;
        Ok(Self {
            docker: Arc::new(docker),
        })
    }

    /// Connects to Docker using a specific socket path.
    ///
    /// # Errors
    ///
    /// Returns `ContainerLogsError::DockerConnection` if the connection fails.
    pub fn connect_with_socket(socket_path: &str) -> Result<Self, ContainerLogsError> {
        let docker =
            bollard::Docker::connect_with_socket(socket_path, 120, bollard::API_DEFAULT_VERSION)
                .map_err(|e| {
                    ContainerLogsError::DockerConnection(format!(
                        "failed to connect to docker at {socket_path}: {e}"
                    ))
                })?;
        Ok(Self {
            docker: Arc::new(docker),
        })
    }
}

impl DockerClient for BollardDockerClient {
    async fn container_logs(
        &self,
        container: &str,
        streams: LogStreams,
    ) -> Result<Vec<String>, ContainerLogsError> {
        validate_container_ref(container)?;

        use bollard::container::{LogOutput, LogsOptions};

        let options = LogsOptions::<String> {
            follow: false,
            stdout: streams.stdout,
            stderr: streams.stderr,
            tail: "all".to_owned(),
            ..Default::default()
        };

        let chunks: Vec<LogOutput> = self
            .docker
            .logs(container, Some(options))
            .try_collect()
            .await
            .map_err(|e| map_api_error(container, "fetch logs of", e))?;

        // 멀티플렉스 프레임 경계가 라인 경계와 일치하지 않으므로 바이트를 먼저 이어 붙입니다.
        let mut buffer = BytesMut::new();
        for chunk in chunks {
            buffer.extend_from_slice(&chunk.into_bytes());
        }

        Ok(split_lines(&String::from_utf8_lossy(&buffer)))
    }

    async fn resolve_container(&self, name_or_id: &str) -> Result<String, ContainerLogsError> {
        validate_container_ref(name_or_id)?;

        let details = self
            .docker
            .inspect_container(name_or_id, None)
            .await
            .map_err(|e| map_api_error(name_or_id, "inspect", e))?;

        details.id.ok_or_else(|| {
            ContainerLogsError::DockerApi(format!("inspect '{name_or_id}' returned no id"))
        })
    }

    async fn ping(&self) -> Result<(), ContainerLogsError> {
        self.docker
            .ping()
            .await
            .map_err(|e| ContainerLogsError::DockerConnection(format!("ping failed: {e}")))?;
        Ok(())
    }
}

/// 테스트용 Mock Docker 클라이언트
///
/// 호출될 때마다 미리 준비한 로그 스냅샷을 차례로 반환합니다.
/// 마지막 스냅샷 이후에는 마지막 스냅샷을 계속 반환합니다.
#[cfg(test)]
#[derive(Default)]
pub struct MockDockerClient {
    /// 컨테이너 이름 -> ID
    pub containers: Vec<(String, String)>,
    /// 순서대로 반환할 로그 스냅샷
    pub snapshots: Vec<Vec<String>>,
    /// 로그 조회 실패를 시뮬레이션할지 여부
    pub fail_fetch: bool,
    fetches: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockDockerClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(mut self, name: &str, id: &str) -> Self {
        self.containers.push((name.to_owned(), id.to_owned()));
        self
    }

    pub fn with_snapshot(mut self, lines: &[&str]) -> Self {
        self.snapshots
            .push(lines.iter().map(|l| (*l).to_owned()).collect());
        self
    }

    pub fn with_failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    /// 지금까지의 로그 조회 횟수
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn knows(&self, reference: &str) -> bool {
        self.containers
            .iter()
            .any(|(name, id)| name == reference || id.starts_with(reference))
    }
}

#[cfg(test)]
impl DockerClient for MockDockerClient {
    async fn container_logs(
        &self,
        container: &str,
        _streams: LogStreams,
    ) -> Result<Vec<String>, ContainerLogsError> {
        validate_container_ref(container)?;
        let n = self
            .fetches
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if self.fail_fetch {
            return Err(ContainerLogsError::DockerApi("mock failure".to_owned()));
        }
        if !self.knows(container) {
            return Err(ContainerLogsError::ContainerNotFound(container.to_owned()));
        }
        Ok(self
            .snapshots
            .get(n)
            .or_else(|| self.snapshots.last())
            .cloned()
            .unwrap_or_default())
    }

    async fn resolve_container(&self, name_or_id: &str) -> Result<String, ContainerLogsError> {
        validate_container_ref(name_or_id)?;
        self.containers
            .iter()
            .find(|(name, id)| name == name_or_id || id.starts_with(name_or_id))
            .map(|(_, id)| id.clone())
            .ok_or_else(|| ContainerLogsError::ContainerNotFound(name_or_id.to_owned()))
    }

    async fn ping(&self) -> Result<(), ContainerLogsError> {
        Ok(())
    }
}
