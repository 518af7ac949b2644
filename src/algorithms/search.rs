//! 三种查找：二分、顺序、递归

use std::cmp::Ordering;

/// 二分查找（下界）。`probe` 返回元素相对目标的大小，输入必须已按同一规则排好序。
/// 有重复时返回第一个相等元素的下标
pub fn binary_search_index<T, F>(sorted: &[T], mut probe: F) -> Option<usize>
where
    F: FnMut(&T) -> Ordering,
{
    let (mut lo, mut hi) = (0, sorted.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if probe(&sorted[mid]) == Ordering::Less {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    let item = sorted.get(lo)?;
    (probe(item) == Ordering::Equal).then_some(lo)
}

pub fn binary_search<T, F>(sorted: &[T], probe: F) -> Option<&T>
where
    F: FnMut(&T) -> Ordering,
{
    binary_search_index(sorted, probe).map(|idx| &sorted[idx])
}

/// 顺序查找，返回全部匹配，保持原顺序
pub fn sequential_search<T, P>(items: &[T], mut pred: P) -> Vec<&T>
where
    P: FnMut(&T) -> bool,
{
    let mut found = Vec::new();
    for item in items {
        if pred(item) {
            found.push(item);
        }
    }
    found
}

/// 从 `index` 开始查找第一个匹配，结果与线性扫描一致。
/// 逐个推进下标而不是真的递归，背包再大也不会爆栈
pub fn recursive_search<'a, T, P>(items: &'a [T], index: usize, pred: &P) -> Option<&'a T>
where
    P: Fn(&T) -> bool,
{
    items.get(index..)?.iter().find(|item| pred(item))
}
