//! 四种排序：选择、插入、冒泡、归并
//!
//! 全部返回新的 Vec，不动输入切片；全部稳定，相同比较器下结果一致。

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::items::Item;

/// 选择排序。取最左侧的最小值并整体右移，而不是交换，以保持稳定
pub fn selection_sort<T, F>(items: &[T], mut cmp: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut out = items.to_vec();
    for i in 0..out.len() {
        let mut min = i;
        for j in (i + 1)..out.len() {
            if cmp(&out[j], &out[min]) == Ordering::Less {
                min = j;
            }
        }
        out[i..=min].rotate_right(1);
    }
    out
}

/// 插入排序
pub fn insertion_sort<T, F>(items: &[T], mut cmp: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut out = items.to_vec();
    for i in 1..out.len() {
        let mut j = i;
        while j > 0 && cmp(&out[j - 1], &out[j]) == Ordering::Greater {
            out.swap(j - 1, j);
            j -= 1;
        }
    }
    out
}

/// 冒泡排序，一轮无交换即提前结束
pub fn bubble_sort<T, F>(items: &[T], mut cmp: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut out = items.to_vec();
    let mut end = out.len();
    while end > 1 {
        let mut swapped = false;
        for j in 1..end {
            if cmp(&out[j - 1], &out[j]) == Ordering::Greater {
                out.swap(j - 1, j);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
        end -= 1;
    }
    out
}

/// 自顶向下归并排序；相等时取左半边，保证与其他三种一致
pub fn merge_sort<T, F>(items: &[T], mut cmp: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    merge_sort_by(items, &mut cmp)
}

fn merge_sort_by<T, F>(items: &[T], cmp: &mut F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items.to_vec();
    }
    let (left, right) = items.split_at(items.len() / 2);
    let left = merge_sort_by(left, cmp);
    let right = merge_sort_by(right, cmp);

    let mut out = Vec::with_capacity(items.len());
    let (mut l, mut r) = (0, 0);
    while l < left.len() && r < right.len() {
        if cmp(&left[l], &right[r]) == Ordering::Greater {
            out.push(right[r].clone());
            r += 1;
        } else {
            out.push(left[l].clone());
            l += 1;
        }
    }
    out.extend_from_slice(&left[l..]);
    out.extend_from_slice(&right[r..]);
    out
}

/// 稀有度高的在前
pub fn by_rarity(a: &Item, b: &Item) -> Ordering {
    b.tier().cmp(&a.tier())
}

pub fn by_type(a: &Item, b: &Item) -> Ordering {
    a.item_type.cmp(&b.item_type)
}

/// 按名称字典序；二分查找必须使用同一比较
pub fn by_name(a: &Item, b: &Item) -> Ordering {
    a.name.cmp(&b.name)
}

/// 排序键，每个键固定对应一种算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// 选择排序
    Rarity,
    /// 冒泡排序
    Type,
    /// 插入排序
    Name,
    /// 归并排序（按名称）
    Advanced,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Rarity,
        SortKey::Type,
        SortKey::Name,
        SortKey::Advanced,
    ];

    pub fn algorithm(self) -> &'static str {
        match self {
            SortKey::Rarity => "selection",
            SortKey::Type => "bubble",
            SortKey::Name => "insertion",
            SortKey::Advanced => "merge",
        }
    }

    /// 对副本排序并返回
    pub fn apply(self, items: &[Item]) -> Vec<Item> {
        match self {
            SortKey::Rarity => selection_sort(items, by_rarity),
            SortKey::Type => bubble_sort(items, by_type),
            SortKey::Name => insertion_sort(items, by_name),
            SortKey::Advanced => merge_sort(items, by_name),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Rarity => "rarity",
            SortKey::Type => "type",
            SortKey::Name => "name",
            SortKey::Advanced => "advanced",
        };
        f.write_str(name)
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rarity" | "r" => Ok(SortKey::Rarity),
            "type" | "t" => Ok(SortKey::Type),
            "name" | "n" => Ok(SortKey::Name),
            "advanced" | "a" => Ok(SortKey::Advanced),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_all(input: &[(u8, char)]) -> [Vec<(u8, char)>; 4] {
        [
            selection_sort(input, key_only),
            insertion_sort(input, key_only),
            bubble_sort(input, key_only),
            merge_sort(input, key_only),
        ]
    }

    fn key_only(a: &(u8, char), b: &(u8, char)) -> Ordering {
        a.0.cmp(&b.0)
    }

    fn permutations(items: &[(u8, char)]) -> Vec<Vec<(u8, char)>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut out = Vec::new();
        for i in 0..items.len() {
            let mut rest = items.to_vec();
            let head = rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, head);
                out.push(tail);
            }
        }
        out
    }

    #[test]
    fn all_sorters_are_stable_and_agree() {
        let base = [(3, 'a'), (1, 'b'), (3, 'c'), (2, 'd'), (1, 'e')];
        for input in permutations(&base) {
            let expected = {
                let mut v = input.clone();
                v.sort_by(key_only);
                v
            };
            for sorted in run_all(&input) {
                assert_eq!(sorted, expected, "input {input:?}");
            }
        }
    }

    #[test]
    fn sorting_is_idempotent_and_leaves_input_alone() {
        let input = vec![(2, 'x'), (1, 'y'), (2, 'z')];
        for once in run_all(&input) {
            for twice in run_all(&once) {
                assert_eq!(twice, once);
            }
        }
        assert_eq!(input, vec![(2, 'x'), (1, 'y'), (2, 'z')]);
    }

    #[test]
    fn empty_and_single() {
        for sorted in run_all(&[]) {
            assert!(sorted.is_empty());
        }
        for sorted in run_all(&[(1, 'a')]) {
            assert_eq!(sorted, vec![(1, 'a')]);
        }
    }

    #[test]
    fn name_keys_produce_same_order() {
        let items = vec![
            Item::basic(1, "Potion", "consumable"),
            Item::material(2, "Copper", "metal", 2, 1),
            Item::basic(3, "Apple", "food"),
            Item::material(4, "Potion", "herb", 1, 1),
        ];
        let by_insertion = SortKey::Name.apply(&items);
        let by_merge = SortKey::Advanced.apply(&items);
        assert_eq!(by_insertion, by_merge);
        let ids: Vec<u32> = by_insertion.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![3, 2, 1, 4]);
    }

    #[test]
    fn rarity_puts_rarest_first() {
        let items = vec![
            Item::material(1, "Sand", "stone", 1, 1),
            Item::material(2, "Star Jade", "gem", 5, 1),
            Item::basic(3, "Torch", "tool"),
        ];
        let ids: Vec<u32> = SortKey::Rarity.apply(&items).iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn parse_keys() {
        for key in SortKey::ALL {
            assert_eq!(key.to_string().parse::<SortKey>(), Ok(key));
        }
        assert!("price".parse::<SortKey>().is_err());
    }
}
