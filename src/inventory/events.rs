use bevy::prelude::*;

use crate::algorithms::SortKey;
use crate::items::ItemId;

/// 从物品表生成 count 个实例放进背包
#[derive(Event)]
pub struct GiveItemEvent {
    pub id:    String,
    pub count: u32,
}

#[derive(Event)]
pub struct ListInventoryEvent;   // 让 CLI 请求打印背包

/// 按 ID 或名称丢弃物品
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum RemoveItemEvent {
    Id(ItemId),
    Name(String),
    /// 纯数字：先当 ID，背包里没有这个 ID 再按名称找
    IdOrName(String),
}

#[derive(Event, Debug, Clone, Copy)]
pub struct SortInventoryEvent(pub SortKey);

/// 三种查找方式
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum SearchItemEvent {
    /// 二分查找精确名称
    Name(String),
    /// 顺序查找全部同类型
    Type(String),
    /// 递归模糊查找
    Criteria(String),
}

#[derive(Event)]
pub struct ExportCsvEvent;

#[derive(Event)]
pub struct ShowStatisticsEvent;

#[derive(Event)]
pub struct SnapshotEvent;
