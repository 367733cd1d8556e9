//! 实体基础 trait

/// 实体 trait
pub trait Entity {
    type Id: PartialEq;

    fn id(&self) -> &Self::Id;
}

/// 按 ID 在快照中查找实体（软引用：找不到返回 None）
pub fn find_entity<'a, T: Entity>(items: &'a [T], id: &T::Id) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

/// 按 ID 查找实体下标
pub fn position_of<T: Entity>(items: &[T], id: &T::Id) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}
