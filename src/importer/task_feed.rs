// ==========================================
// Maverick 物流运营 - 合作方任务源
// ==========================================
// 数据形态: [{ "userId": 1, "id": 1, "title": "...", "completed": false }, ...]
// JsonFileTaskFeed: 读取导出的 JSON 文件（每次拉取重新读取）
// HttpTaskFeed: GET {base_url}/todos?userId=N，阻塞请求带超时
// InMemoryTaskFeed: 预置数据，供测试与离线演示
// ==========================================

use crate::domain::partner::PartnerTask;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::TaskFeed;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// HTTP 任务源默认超时（秒）
pub const DEFAULT_FEED_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedItem {
    user_id: i64,
    id: i64,
    title: String,
    completed: bool,
}

/// 按 userId 过滤并转换为 PartnerTask（保持源顺序）
fn tasks_for_user(items: Vec<FeedItem>, source_user_id: i64) -> Vec<PartnerTask> {
    items
        .into_iter()
        .filter(|item| item.user_id == source_user_id)
        .map(|item| PartnerTask {
            id: item.id,
            title: item.title,
            completed: item.completed,
        })
        .collect()
}

// ==========================================
// JsonFileTaskFeed
// ==========================================
pub struct JsonFileTaskFeed {
    path: PathBuf,
}

impl JsonFileTaskFeed {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TaskFeed for JsonFileTaskFeed {
    fn source_name(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_tasks(&self, source_user_id: i64) -> ImportResult<Vec<PartnerTask>> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| ImportError::FeedUnavailable {
            source_name: self.source_name(),
            message: e.to_string(),
        })?;

        let items: Vec<FeedItem> = serde_json::from_str(&raw)?;
        Ok(tasks_for_user(items, source_user_id))
    }
}

// ==========================================
// HttpTaskFeed
// ==========================================
pub struct HttpTaskFeed {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpTaskFeed {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_FEED_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn unavailable(&self, message: String) -> ImportError {
        ImportError::FeedUnavailable {
            source_name: self.source_name(),
            message,
        }
    }
}

impl TaskFeed for HttpTaskFeed {
    fn source_name(&self) -> String {
        self.endpoint()
    }

    fn fetch_tasks(&self, source_user_id: i64) -> ImportResult<Vec<PartnerTask>> {
        let endpoint = self.endpoint();
        tracing::debug!(endpoint = %endpoint, source_user_id, "拉取合作方任务");

        // 连接失败 / 超时 / 非 2xx 均视为任务源不可用
        let response = self
            .agent
            .get(&endpoint)
            .query("userId", source_user_id.to_string())
            .call()
            .map_err(|e| self.unavailable(e.to_string()))?;

        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| self.unavailable(format!("读取响应失败: {}", e)))?;

        let items: Vec<FeedItem> = serde_json::from_str(&body)?;
        Ok(tasks_for_user(items, source_user_id))
    }
}

// ==========================================
// InMemoryTaskFeed
// ==========================================
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskFeed {
    tasks: HashMap<i64, Vec<PartnerTask>>,
}

impl InMemoryTaskFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条任务（按插入顺序返回）
    pub fn with_task(mut self, source_user_id: i64, id: i64, title: &str, completed: bool) -> Self {
        self.tasks.entry(source_user_id).or_default().push(PartnerTask {
            id,
            title: title.to_string(),
            completed,
        });
        self
    }
}

impl TaskFeed for InMemoryTaskFeed {
    fn source_name(&self) -> String {
        "in-memory".to_string()
    }

    fn fetch_tasks(&self, source_user_id: i64) -> ImportResult<Vec<PartnerTask>> {
        Ok(self.tasks.get(&source_user_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_json_feed_按用户过滤() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"userId": 1, "id": 1, "title": "delectus aut autem", "completed": false}},
                {{"userId": 1, "id": 2, "title": "quis ut nam", "completed": true}},
                {{"userId": 2, "id": 21, "title": "suscipit repellat", "completed": true}}
            ]"#
        )
        .unwrap();

        let feed = JsonFileTaskFeed::new(file.path());
        let tasks = feed.fetch_tasks(1).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, 1);
        assert!(!tasks[0].completed);
        assert!(feed.fetch_tasks(9).unwrap().is_empty());
    }

    #[test]
    fn test_json_feed_文件缺失为不可用() {
        let feed = JsonFileTaskFeed::new("/nonexistent/todos.json");
        assert!(matches!(
            feed.fetch_tasks(1),
            Err(ImportError::FeedUnavailable { .. })
        ));
    }

    #[test]
    fn test_json_feed_格式错误() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let feed = JsonFileTaskFeed::new(file.path());
        assert!(matches!(feed.fetch_tasks(1), Err(ImportError::FeedFormatError(_))));
    }

    /// 本地桩服务: 依次对每个连接返回一条预置 HTTP 响应
    fn serve_responses(responses: Vec<String>) -> String {
        use std::io::Read;
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            for response in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut buf = [0u8; 4096];
                let mut request = Vec::new();
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut buf).unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }
                stream.write_all(response.as_bytes()).unwrap();
            }
        });
        format!("http://{}", addr)
    }

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
    }

    #[test]
    fn test_http_feed_正常拉取() {
        let body = r#"[
            {"userId": 2, "id": 21, "title": "suscipit repellat", "completed": true},
            {"userId": 2, "id": 22, "title": "distinctio vitae", "completed": false},
            {"userId": 3, "id": 41, "title": "other partner", "completed": true}
        ]"#;
        let base_url = serve_responses(vec![http_response("200 OK", body)]);

        let feed = HttpTaskFeed::new(&format!("{}/", base_url));
        assert_eq!(feed.source_name(), format!("{}/todos", base_url));

        let tasks = feed.fetch_tasks(2).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, 21);
        assert!(tasks[0].completed);
        assert!(!tasks[1].completed);
    }

    #[test]
    fn test_http_feed_服务端错误为不可用() {
        let base_url = serve_responses(vec![http_response("500 Internal Server Error", "{}")]);
        let feed = HttpTaskFeed::new(&base_url);
        assert!(matches!(
            feed.fetch_tasks(1),
            Err(ImportError::FeedUnavailable { .. })
        ));
    }

    #[test]
    fn test_http_feed_响应格式错误() {
        let base_url = serve_responses(vec![http_response("200 OK", "<html>maintenance</html>")]);
        let feed = HttpTaskFeed::new(&base_url);
        assert!(matches!(feed.fetch_tasks(1), Err(ImportError::FeedFormatError(_))));
    }

    #[test]
    fn test_http_feed_连接失败为不可用() {
        // 绑定后立即释放端口，确保无人监听
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let feed = HttpTaskFeed::with_timeout(&format!("http://{}", addr), Duration::from_secs(2));
        assert!(matches!(
            feed.fetch_tasks(1),
            Err(ImportError::FeedUnavailable { .. })
        ));
    }

    #[test]
    fn test_in_memory_feed() {
        let feed = InMemoryTaskFeed::new()
            .with_task(1, 10, "a", true)
            .with_task(1, 11, "b", false);
        assert_eq!(feed.fetch_tasks(1).unwrap().len(), 2);
        assert!(feed.fetch_tasks(2).unwrap().is_empty());
    }
}
