//! 컨테이너 로그 감시 -- 컨테이너별 grep 커서
//!
//! [`ContainerLogWatch`]는 컨테이너 하나와 [`LogScanner`] 하나를 묶습니다.
//! 호출할 때마다 Docker에서 로그 전체를 다시 가져오고, 스캐너 커서 이후만 검색합니다.
//! 감시 객체를 버리면 커서도 함께 사라지므로, 증분 동작을 원하면 호출 사이에 유지해야 합니다.

use std::sync::Arc;

use metrics::counter;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use dockgrep_core::metrics::{LABEL_RESULT, LOG_FETCH_FAILURES_TOTAL, LOG_FETCHES_TOTAL};
use dockgrep_log_scanner::{LogScanner, MatchRecord, compile_pattern};

use crate::config::LogWatchConfig;
use crate::docker::DockerClient;
use crate::error::ContainerLogsError;

/// 컨테이너 로그 감시기
pub struct ContainerLogWatch<D: DockerClient> {
    /// Docker 클라이언트
    docker: Arc<D>,
    /// 감시 대상 컨테이너 (이름 또는 ID)
    container: String,
    /// 이 컨테이너 전용 스캔 커서
    scanner: LogScanner,
    /// 감시 설정
    config: LogWatchConfig,
}

impl<D: DockerClient> ContainerLogWatch<D> {
    /// 새 감시기를 생성합니다.
    ///
    /// 컨테이너 존재 여부는 확인하지 않습니다. 첫 조회 시점에 확인됩니다.
    pub fn new(docker: Arc<D>, container: impl Into<String>, config: LogWatchConfig) -> Self {
        Self {
            docker,
            container: container.into(),
            scanner: LogScanner::new(),
            config,
        }
    }

    /// 컨테이너 이름을 ID로 확인한 뒤 감시기를 생성합니다.
    ///
    /// 같은 이름으로 컨테이너가 다시 만들어져도 원래 컨테이너만 감시하도록 ID를 고정합니다.
    pub async fn attach(
        docker: Arc<D>,
        name_or_id: &str,
        config: LogWatchConfig,
    ) -> Result<Self, ContainerLogsError> {
        config.validate()?;
        let id = docker.resolve_container(name_or_id).await?;
        info!(container = name_or_id, id = %id, "attached log watch");
        Ok(Self::new(docker, id, config))
    }

    /// 감시 대상 컨테이너
    pub fn container(&self) -> &str {
        &self.container
    }

    /// 마지막으로 매칭된 라인 위치
    pub fn cursor(&self) -> Option<usize> {
        self.scanner.cursor()
    }

    pub fn scanner(&self) -> &LogScanner {
        &self.scanner
    }

    pub fn config(&self) -> &LogWatchConfig {
        &self.config
    }

    /// 커서를 초기화하여 다음 검색이 첫 줄부터 시작하도록 합니다.
    pub fn reset(&mut self) {
        self.scanner.reset();
    }

    /// 컨테이너 로그 전체를 가져옵니다.
    pub async fn fetch_lines(&self) -> Result<Vec<String>, ContainerLogsError> {
        match self
            .docker
            .container_logs(&self.container, self.config.streams())
            .await
        {
            Ok(lines) => {
                counter!(LOG_FETCHES_TOTAL, LABEL_RESULT => "success").increment(1);
                debug!(container = %self.container, lines = lines.len(), "fetched container logs");
                Ok(lines)
            }
            Err(e) => {
                counter!(LOG_FETCHES_TOTAL, LABEL_RESULT => "failure").increment(1);
                counter!(LOG_FETCH_FAILURES_TOTAL).increment(1);
                warn!(container = %self.container, error = %e, "failed to fetch container logs");
                Err(e)
            }
        }
    }

    /// 커서 이후에 `pattern`과 매칭되는 모든 라인을 반환합니다.
    ///
    /// 패턴이 잘못되었으면 Docker를 호출하지 않고 바로 실패합니다.
    pub async fn grep_logs(
        &mut self,
        pattern: &str,
    ) -> Result<Vec<MatchRecord>, ContainerLogsError> {
        let regex = compile_pattern(pattern)?;
        let lines = self.fetch_lines().await?;
        Ok(self.scanner.scan_matches_regex(&lines, &regex))
    }

    /// 커서 이후에 `pattern`이 나타났는지 여부를 반환합니다.
    pub async fn has_logged(&mut self, pattern: &str) -> Result<bool, ContainerLogsError> {
        let regex = compile_pattern(pattern)?;
        let lines = self.fetch_lines().await?;
        Ok(self.scanner.has_match_regex(&lines, &regex))
    }

    /// `pattern`이 나타날 때까지 폴링합니다.
    ///
    /// `poll_interval_ms`마다 로그를 다시 가져오며, `wait_timeout_secs` 안에 매칭이 없으면
    /// [`ContainerLogsError::WaitTimeout`]을 반환합니다. 조회 에러는 즉시 전파됩니다.
    pub async fn wait_for(
        &mut self,
        pattern: &str,
    ) -> Result<Vec<MatchRecord>, ContainerLogsError> {
        let regex = compile_pattern(pattern)?;
        let poll_interval = self.config.poll_interval();
        let timeout = self.config.wait_timeout();
        let started = Instant::now();

        info!(
            container = %self.container,
            pattern,
            timeout_secs = timeout.as_secs(),
            "waiting for log pattern"
        );

        loop {
            let lines = self.fetch_lines().await?;
            let records = self.scanner.scan_matches_regex(&lines, &regex);
            if !records.is_empty() {
                info!(
                    container = %self.container,
                    pattern,
                    matches = records.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "log pattern found"
                );
                return Ok(records);
            }

            let waited = started.elapsed();
            if waited >= timeout {
                return Err(ContainerLogsError::WaitTimeout {
                    container: self.container.clone(),
                    pattern: pattern.to_owned(),
                    waited_ms: waited.as_millis() as u64,
                });
            }
            tokio::time::sleep(poll_interval.min(timeout - waited)).await;
        }
    }
}
