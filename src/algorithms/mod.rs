//! 排序与查找策略，均为作用于切片的纯函数

pub mod search;
pub mod sort;

pub use sort::SortKey;
