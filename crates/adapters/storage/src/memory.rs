//! 进程内存集合存储

use async_trait::async_trait;
use tankfarm_errors::AppResult;
use tankfarm_ports::CollectionStore;
use tokio::sync::RwLock;

/// 内存存储
#[derive(Debug, Default)]
pub struct MemoryStore<T> {
    items: RwLock<Vec<T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// 以初始数据创建
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

#[async_trait]
impl<T> CollectionStore<T> for MemoryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn read(&self) -> AppResult<Vec<T>> {
        Ok(self.items.read().await.clone())
    }

    async fn write(&self, items: &[T]) -> AppResult<()> {
        *self.items.write().await = items.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_replaces_whole_collection() {
        let store = MemoryStore::with_items(vec![1, 2, 3]);
        store.write(&[9]).await.unwrap();
        assert_eq!(store.read().await.unwrap(), vec![9]);
    }
}
