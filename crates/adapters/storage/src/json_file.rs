//! JSON 文件集合存储
//!
//! 每个集合对应一个 JSON 数组文件，整体读取、整体覆盖

use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tankfarm_common::{RetryConfig, is_transient_io, with_conditional_retry};
use tankfarm_errors::{AppError, AppResult};
use tankfarm_ports::CollectionStore;
use tokio::sync::Mutex;
use tracing::debug;

/// JSON 文件存储
pub struct JsonFileStore<T> {
    path: PathBuf,
    retry: RetryConfig,
    /// 进程内串行化文件访问
    lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            retry: RetryConfig::default(),
            lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    /// 在数据目录下创建集合文件存储，如 `data/tanks.json`
    pub fn in_dir(data_dir: impl AsRef<Path>, file_name: &str) -> Self {
        Self::new(data_dir.as_ref().join(file_name))
    }

    /// 设置写入重试策略
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// 先写临时文件再 rename，避免读到写了一半的文件
    async fn write_atomically(&self, payload: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let temp = self.temp_path();
        tokio::fs::write(&temp, payload).await?;
        tokio::fs::rename(&temp, &self.path).await
    }
}

#[async_trait]
impl<T> CollectionStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn read(&self) -> AppResult<Vec<T>> {
        let _guard = self.lock.lock().await;

        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Collection file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(AppError::storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        // 损坏的文件不能当作空集合，否则下一次写入会覆盖原数据
        serde_json::from_slice(&content).map_err(|e| {
            AppError::storage(format!(
                "Corrupt collection file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    async fn write(&self, items: &[T]) -> AppResult<()> {
        let payload = serde_json::to_vec_pretty(items)?;
        let _guard = self.lock.lock().await;

        with_conditional_retry(
            &self.retry,
            "json_store_write",
            || self.write_atomically(&payload),
            is_transient_io,
        )
        .await
        .map_err(|e| {
            AppError::storage(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        debug!(path = %self.path.display(), count = items.len(), "Collection written");
        Ok(())
    }
}
