//! 文字 CLI：读取 stdin → 解析命令 → 执行并打印

use bevy::app::AppExit;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::num::NonZero;
use std::sync::{Arc, Mutex};

use crate::algorithms::SortKey;
use crate::character::components::{Character, Player};
use crate::character::events::{GainExp, ShowStats};
use crate::core::{events::LogEvent, states::AppState};
use crate::data::{ItemAssets, schema::ItemList, uuid_from_id};
use crate::equipment::events::{EquipEvent, ShowEquipmentEvent, UnequipEvent};
use crate::inventory::components::Inventory;
use crate::inventory::events::*;
use crate::items::ItemId;

static CLI_BUFFER: Lazy<Arc<Mutex<VecDeque<String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(VecDeque::new())));

const HELP: &str = "命令列表:
  help                   查看帮助
  status                 查看当前状态
  exit / quit            退出程序
  items [token]          列出物品表 / 用 id、uuid、名称查询
  give <id> [count]      给予物品
  inventory              查看背包
  remove <#id|id|name>   丢弃物品
  sort <key>             排序: rarity / type / name / advanced
  search <name>          二分查找名称
  type <type>            按类型查找
  find <criteria>        递归模糊查找
  csv                    导出 CSV
  stats                  背包统计
  snapshot               输出存档快照 (JSON)
  equip <item-id>        装备物品
  unequip <slot>         卸下槽位装备
  gear                   查看身上装备
  exp <amount>           获得经验
  me                     查看角色属性";

/// 插件入口
pub struct DebugCliPlugin;
impl Plugin for DebugCliPlugin {
    fn build(&self, app: &mut App) {
        {
            let buffer = CLI_BUFFER.clone();
            std::thread::spawn(move || {
                use std::io::{self, BufRead};
                let stdin = io::stdin();
                for line in stdin.lock().lines().map_while(Result::ok) {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if let Ok(mut buf) = buffer.lock() {
                        buf.push_back(line.to_string());
                    }
                }
            });
        }
        app
            // 事件：原始输入行
            .add_event::<CliLine>()
            // 每帧从 buffer 取出所有命令行写入事件
            .add_systems(Update, read_stdin)
            // 仅在 InGame 处理命令
            .add_systems(
                Update,
                execute_cli_commands.run_if(in_state(AppState::InGame)),
            );
    }
}

/* ---------------------------- 事件与枚举 ---------------------------- */

/// 终端敲的一整行
#[derive(Event)]
pub struct CliLine(pub String);

/// 我们支持的命令
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Status,
    Exit,
    Items(Option<String>), // None=全部；Some(token)=按 id/uuid/name 查询
    Give { id: String, count: u32 },
    Inventory,
    Remove(RemoveItemEvent),
    Sort(SortKey),
    Search(SearchItemEvent),
    Csv,
    Stats,
    Snapshot,
    Equip(ItemId),
    Unequip(String),
    Gear,
    Exp(u32),
    Me,
    Invalid(String),
    Unsupported(String),
}

/// 命令产生的下游事件
#[derive(SystemParam)]
struct CliOutputs<'w, 's> {
    give: EventWriter<'w, GiveItemEvent>,
    list: EventWriter<'w, ListInventoryEvent>,
    remove: EventWriter<'w, RemoveItemEvent>,
    sort: EventWriter<'w, SortInventoryEvent>,
    search: EventWriter<'w, SearchItemEvent>,
    csv: EventWriter<'w, ExportCsvEvent>,
    stats: EventWriter<'w, ShowStatisticsEvent>,
    snapshot: EventWriter<'w, SnapshotEvent>,
    equip: EventWriter<'w, EquipEvent>,
    unequip: EventWriter<'w, UnequipEvent>,
    gear: EventWriter<'w, ShowEquipmentEvent>,
    exp: EventWriter<'w, GainExp>,
    show_stats: EventWriter<'w, ShowStats>,
    players: Query<'w, 's, &'static Character, With<Player>>,
}

/* ---------------------------- 读取 stdin ---------------------------- */

fn read_stdin(mut writer: EventWriter<CliLine>) {
    let Ok(mut buffer) = CLI_BUFFER.lock() else {
        return;
    };
    while let Some(line) = buffer.pop_front() {
        writer.write(CliLine(line));
    }
}

/* ---------------------------- 命令执行 ---------------------------- */

fn execute_cli_commands(
    mut line_reader: EventReader<CliLine>,
    mut app_exit: EventWriter<AppExit>,
    mut log: EventWriter<LogEvent>,
    state: Res<State<AppState>>,
    item_assets: Res<ItemAssets>,
    lists: Res<Assets<ItemList>>,
    inventory: Res<Inventory>,
    mut out: CliOutputs,
) {
    for CliLine(input) in line_reader.read() {
        match parse_command(input) {
            Command::Help => {
                log.write(LogEvent(HELP.into()));
            }

            Command::Status => {
                let cnt = item_assets.list(&lists).map_or(0, |list| list.items.len());
                let player = out
                    .players
                    .single()
                    .map_or_else(|_| "-".to_string(), |c| format!("{} Lv.{}", c.name, c.level()));
                log.write(LogEvent(format!(
                    "State: {:?}, Items Loaded: {}, Player: {}, Weight: {}/{}",
                    state.get(),
                    cnt,
                    player,
                    inventory.current_weight(),
                    inventory.max_weight()
                )));
            }

            Command::Exit => {
                log.write(LogEvent("Bye~".into()));
                app_exit.write(AppExit::Error(NonZero::<u8>::MIN));
            }

            Command::Items(token) => {
                let Some(list) = item_assets.list(&lists) else {
                    log.write(LogEvent("物品表尚未加载".into()));
                    continue;
                };
                match token {
                    None => {
                        // 全部列出
                        for entry in &list.items {
                            log.write(LogEvent(format!(
                                "{} | {} | {}",
                                uuid_from_id(&entry.id),
                                entry.id,
                                entry.name
                            )));
                        }
                    }
                    Some(t) => {
                        if let Some(e) = list.find(&t) {
                            let item = e.instantiate(0);
                            log.write(LogEvent(format!(
                                "==================================================
UUID   : {}
ID     : {}
Name   : {}
Type   : {}
Rarity : {}
Weight : {}
Value  : {}
==================================================",
                                uuid_from_id(&e.id),
                                e.id,
                                e.name,
                                item.item_type,
                                item.stars(),
                                item.weight,
                                item.value
                            )));
                        } else {
                            log.write(LogEvent("未找到匹配物品".into()));
                        }
                    }
                }
            }

            Command::Give { id, count } => {
                out.give.write(GiveItemEvent { id, count });
            }

            Command::Inventory => {
                out.list.write(ListInventoryEvent);
            }

            Command::Remove(ev) => {
                out.remove.write(ev);
            }

            Command::Sort(key) => {
                out.sort.write(SortInventoryEvent(key));
            }

            Command::Search(ev) => {
                out.search.write(ev);
            }

            Command::Csv => {
                out.csv.write(ExportCsvEvent);
            }

            Command::Stats => {
                out.stats.write(ShowStatisticsEvent);
            }

            Command::Snapshot => {
                out.snapshot.write(SnapshotEvent);
            }

            Command::Equip(item) => {
                out.equip.write(EquipEvent { item });
            }

            Command::Unequip(slot) => {
                out.unequip.write(UnequipEvent { slot });
            }

            Command::Gear => {
                out.gear.write(ShowEquipmentEvent);
            }

            Command::Exp(amount) => {
                out.exp.write(GainExp {
                    entity: None,
                    amount,
                });
            }

            Command::Me => {
                out.show_stats.write(ShowStats { entity: None });
            }

            Command::Invalid(reason) => {
                log.write(LogEvent(reason));
            }

            Command::Unsupported(cmd) => {
                log.write(LogEvent(format!("不支持的命令: {cmd}")));
            }
        }
    }
}

/* ---------------------------- 工具函数 ---------------------------- */

fn parse_command(input: &str) -> Command {
    let mut parts = input.split_whitespace();
    let cmd = parts.next().unwrap_or("").to_lowercase();
    // 名称可能带空格，剩余部分整体作为参数
    let rest = parts.clone().collect::<Vec<_>>().join(" ");
    match cmd.as_str() {
        "help" | "h" | "?" => Command::Help,
        "status" | "s" => Command::Status,
        "exit" | "quit" | "q" => Command::Exit,
        "items" | "item" | "i" => {
            let token = parts.next().map(|s| s.to_string());
            Command::Items(token)
        }
        "give" => {
            let id = parts.next().unwrap_or("").to_string();
            let cnt = parts.next().unwrap_or("1").parse().unwrap_or(1);
            Command::Give { id, count: cnt }
        }
        "inventory" | "inv" => Command::Inventory,
        // `#12` 一定是 ID；`12` 可能是 ID 也可能是名字
        "remove" | "drop" if !rest.is_empty() => {
            let explicit = rest.strip_prefix('#').and_then(|id| id.parse::<u32>().ok());
            match explicit {
                Some(id) => Command::Remove(RemoveItemEvent::Id(ItemId(id))),
                None if rest.parse::<u32>().is_ok() => {
                    Command::Remove(RemoveItemEvent::IdOrName(rest))
                }
                None => Command::Remove(RemoveItemEvent::Name(rest)),
            }
        }
        "sort" => match rest.parse::<SortKey>() {
            Ok(key) => Command::Sort(key),
            Err(err) => Command::Invalid(err),
        },
        "search" if !rest.is_empty() => Command::Search(SearchItemEvent::Name(rest)),
        "type" if !rest.is_empty() => Command::Search(SearchItemEvent::Type(rest)),
        "find" if !rest.is_empty() => Command::Search(SearchItemEvent::Criteria(rest)),
        "csv" => Command::Csv,
        "stats" => Command::Stats,
        "snapshot" => Command::Snapshot,
        "equip" => match rest.parse::<u32>() {
            Ok(id) => Command::Equip(ItemId(id)),
            Err(_) => Command::Invalid(format!("无效的物品 ID: {rest}")),
        },
        "unequip" if !rest.is_empty() => Command::Unequip(rest),
        "gear" => Command::Gear,
        "exp" => match rest.parse::<u32>() {
            Ok(amount) => Command::Exp(amount),
            Err(_) => Command::Invalid(format!("无效的经验值: {rest}")),
        },
        "me" => Command::Me,
        "remove" | "drop" | "search" | "type" | "find" | "unequip" => {
            Command::Invalid(format!("{cmd} 需要参数"))
        }
        other => Command::Unsupported(other.into()),
    }
}
