//! 引擎错误类型。
//!
//! 所有错误都是可恢复的：出错时引擎状态保持调用前的样子，
//! 由表现层把消息展示给用户后重试即可。

use crate::card::Card;
use crate::state::Phase;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// 下注额为 0 或超过余额
    #[error("无效的下注额 ${amount}（当前余额 ${balance}）")]
    InvalidBet { amount: u64, balance: u64 },

    /// 下注输入不是合法的非负整数
    #[error("请输入有效的下注额，而不是 \"{0}\"")]
    UnparsableBet(String),

    #[error("牌位 {index} 超出范围（手牌共 {len} 张）")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("本局最多只能换 2 张牌")]
    ReplacementLimitReached,

    #[error("第 {} 张牌本局已经换过了", .0 + 1)]
    CardAlreadyReplaced(usize),

    #[error("当前阶段 {phase:?} 不能执行 {operation}")]
    WrongPhase { operation: &'static str, phase: Phase },

    #[error("牌堆已空")]
    EmptyDeck,

    #[error("手牌已满")]
    HandFull,

    #[error("牌堆中出现重复的牌 {0}")]
    DuplicateCard(Card),

    #[error("配置无效: {0}")]
    InvalidConfig(String),

    /// 派彩后余额超出 u64 能表示的范围
    #[error("余额溢出")]
    BalanceOverflow,
}

impl GameError {
    /// 属于"下注无效"一类的错误
    pub fn is_bet_error(&self) -> bool {
        matches!(self, GameError::InvalidBet { .. } | GameError::UnparsableBet(_))
    }
}

pub type GameResult<T> = Result<T, GameError>;
