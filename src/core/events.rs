use bevy::prelude::*;

/// 面向玩家的一行输出，由 main 统一打印
#[derive(Event, Debug, Clone)]
pub struct LogEvent(pub String);

impl LogEvent {
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into())
    }
}
