//! # 三张牌对决核心逻辑库
//!
//! 这个 `core` crate 包含单桌三张牌对决游戏的回合引擎：
//! 牌与牌堆、手牌、换牌规则、计分规则，以及把它们串起来的下注状态机。
//! 它与具体的表现层（终端、图形界面）解耦，
//! 表现层只需要向 `RoundEngine` 发送指令并读取快照。

mod card;
mod config;
mod error;
mod logic;
mod message;
mod state;

pub use card::*;

pub use config::*;

pub use error::*;

pub use logic::decide_winner;

pub use message::*;

pub use state::*;
