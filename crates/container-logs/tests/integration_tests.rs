//! 통합 테스트 -- 컨테이너 로그 감시 플로우 검증
//!
//! 로그가 계속 늘어나는 컨테이너를 흉내 내는 mock 클라이언트로
//! 증분 grep, reset, 대기, 독립 커서 시나리오를 확인합니다.

use std::sync::Arc;
use std::time::Duration;

use dockgrep_container_logs::{
    ContainerLogWatch, ContainerLogsError, LogWatchConfig, LogWatchConfigBuilder,
};
use dockgrep_log_scanner::MatchRecord;

// Mock Docker client for integration tests
mod mock {
    use super::*;
    use dockgrep_container_logs::{DockerClient, LogStreams};
    use tokio::sync::Mutex;

    /// 컨테이너 하나의 stdout/stderr를 흉내 냅니다.
    pub struct TestDockerClient {
        name: String,
        id: String,
        stdout: Arc<Mutex<Vec<String>>>,
        stderr: Arc<Mutex<Vec<String>>>,
        fail_fetch: Arc<Mutex<bool>>,
    }

    impl TestDockerClient {
        pub fn new(name: &str, id: &str) -> Self {
            Self {
                name: name.to_owned(),
                id: id.to_owned(),
                stdout: Arc::new(Mutex::new(Vec::new())),
                stderr: Arc::new(Mutex::new(Vec::new())),
                fail_fetch: Arc::new(Mutex::new(false)),
            }
        }

        pub async fn emit(&self, line: &str) {
            self.stdout.lock().await.push(line.to_owned());
        }

        pub async fn emit_stderr(&self, line: &str) {
            self.stderr.lock().await.push(line.to_owned());
        }

        pub async fn set_fail_fetch(&self, fail: bool) {
            *self.fail_fetch.lock().await = fail;
        }

        fn matches(&self, reference: &str) -> bool {
            reference == self.name || self.id.starts_with(reference)
        }
    }

    impl DockerClient for TestDockerClient {
        async fn container_logs(
            &self,
            container: &str,
            streams: LogStreams,
        ) -> Result<Vec<String>, ContainerLogsError> {
            if *self.fail_fetch.lock().await {
                return Err(ContainerLogsError::DockerConnection(
                    "daemon went away".to_owned(),
                ));
            }
            if !self.matches(container) {
                return Err(ContainerLogsError::ContainerNotFound(container.to_owned()));
            }
            let mut lines = Vec::new();
            if streams.stdout {
                lines.extend(self.stdout.lock().await.iter().cloned());
            }
            if streams.stderr {
                lines.extend(self.stderr.lock().await.iter().cloned());
            }
            Ok(lines)
        }

        async fn resolve_container(&self, name_or_id: &str) -> Result<String, ContainerLogsError> {
            if self.matches(name_or_id) {
                Ok(self.id.clone())
            } else {
                Err(ContainerLogsError::ContainerNotFound(name_or_id.to_owned()))
            }
        }

        async fn ping(&self) -> Result<(), ContainerLogsError> {
            Ok(())
        }
    }
}

use mock::TestDockerClient;

fn config() -> LogWatchConfig {
    LogWatchConfigBuilder::new()
        .poll_interval_ms(50)
        .wait_timeout_secs(1)
        .build()
        .expect("valid config")
}

#[tokio::test]
async fn test_continuous_log_grepping() {
    let client = Arc::new(TestDockerClient::new("dockgrep_test", "0123456789ab"));
    for i in 0..4 {
        client.emit(&format!("Hi {i}")).await;
    }

    let mut watch = ContainerLogWatch::attach(Arc::clone(&client), "dockgrep_test", config())
        .await
        .expect("container exists");

    let logs = watch.grep_logs(r"Hi \d").await.expect("valid pattern");
    assert_eq!(logs[0], MatchRecord::new(0, "Hi 0"));
    assert_eq!(logs.len(), 4);

    client.emit("Hi 4").await;
    client.emit("Hi 5").await;

    let next_logs = watch.grep_logs(r"Hi \d").await.expect("valid pattern");
    assert_eq!(next_logs[0].line_number, logs[logs.len() - 1].line_number + 1);
    assert_eq!(next_logs.len(), 2);
}

#[tokio::test]
async fn test_independent_watchers_on_same_container() {
    let client = Arc::new(TestDockerClient::new("web", "abcdef"));
    client.emit("Serving Flask app").await;
    client.emit("Running on http://0.0.0.0:5000/").await;

    let mut first = ContainerLogWatch::new(Arc::clone(&client), "web", config());
    let mut second = ContainerLogWatch::new(Arc::clone(&client), "web", config());

    assert!(first.has_logged("Running on").await.unwrap());
    assert_eq!(first.cursor(), Some(1));
    assert_eq!(second.cursor(), None);
    assert!(second.has_logged("Serving Flask app").await.unwrap());
    assert!(!first.has_logged("Serving Flask app").await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_wait_for_pattern_emitted_later() {
    let client = Arc::new(TestDockerClient::new("web", "abcdef"));
    client.emit(" * Serving Flask app \"index\"").await;

    let producer = {
        let client = Arc::clone(&client);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(300)).await;
            client.emit(" * Debug mode: off").await;
            client
                .emit(" * Running on http://0.0.0.0:5000/ (Press CTRL+C to quit)")
                .await;
        })
    };

    let mut watch = ContainerLogWatch::new(Arc::clone(&client), "web", config());
    let records = watch
        .wait_for(r"Running on http://0\.0\.0\.0:5000/")
        .await
        .expect("pattern should appear before timeout");
    producer.await.expect("producer task");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].line_number, 2);
    assert_eq!(watch.cursor(), Some(2));
}

#[tokio::test(start_paused = true)]
async fn test_wait_for_timeout_keeps_cursor() {
    let client = Arc::new(TestDockerClient::new("web", "abcdef"));
    client.emit("ready").await;

    let mut watch = ContainerLogWatch::new(Arc::clone(&client), "web", config());
    assert!(watch.has_logged("ready").await.unwrap());

    let result = watch.wait_for("ready").await;
    assert!(matches!(result, Err(ContainerLogsError::WaitTimeout { .. })));
    assert_eq!(watch.cursor(), Some(0));

    watch.reset();
    assert_eq!(watch.wait_for("ready").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_stream_selection() {
    let client = Arc::new(TestDockerClient::new("web", "abcdef"));
    client.emit("stdout line").await;
    client.emit_stderr("Traceback (most recent call last):").await;

    let stdout_only = LogWatchConfigBuilder::new()
        .include_stderr(false)
        .build()
        .unwrap();
    let mut watch = ContainerLogWatch::new(Arc::clone(&client), "web", stdout_only);
    assert!(!watch.has_logged("Traceback").await.unwrap());

    let mut watch = ContainerLogWatch::new(Arc::clone(&client), "web", config());
    assert!(watch.has_logged("Traceback").await.unwrap());
}

#[tokio::test]
async fn test_docker_connection_lost_mid_watch() {
    let client = Arc::new(TestDockerClient::new("web", "abcdef"));
    client.emit("Hi 0").await;

    let mut watch = ContainerLogWatch::new(Arc::clone(&client), "web", config());
    assert!(watch.has_logged("Hi").await.unwrap());

    client.set_fail_fetch(true).await;
    let err = watch.has_logged("Hi").await.unwrap_err();
    assert!(matches!(err, ContainerLogsError::DockerConnection(_)));
    assert_eq!(watch.cursor(), Some(0));

    client.set_fail_fetch(false).await;
    client.emit("Hi 1").await;
    assert_eq!(
        watch.grep_logs("Hi").await.unwrap(),
        vec![MatchRecord::new(1, "Hi 1")]
    );
}

#[tokio::test]
async fn test_missing_container() {
    let client = Arc::new(TestDockerClient::new("web", "abcdef"));
    let result = ContainerLogWatch::attach(client, "db", config()).await;
    assert!(matches!(result, Err(ContainerLogsError::ContainerNotFound(_))));
}
