//! 集合存储 trait 定义

use async_trait::async_trait;
use tankfarm_errors::AppResult;

/// 实体集合存储
///
/// 每个实体集合整体读取、整体覆盖写入。读-改-写的串行化由调用方负责。
#[async_trait]
pub trait CollectionStore<T>: Send + Sync
where
    T: Send + Sync,
{
    /// 读取整个集合（不存在时为空）
    async fn read(&self) -> AppResult<Vec<T>>;

    /// 用给定快照覆盖整个集合
    async fn write(&self, items: &[T]) -> AppResult<()>;
}
