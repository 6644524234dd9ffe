use crate::error::{GameError, GameResult};
use rand::Rng;
use rand::prelude::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

// --- 核心数据结构定义 ---

/// 花色 (Suit)
/// 变体顺序与牌面图片编号一致：梅花=1, 黑桃=2, 方块=3, 红心=4
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Suit {
    Club,    // 梅花 ♣️
    Spade,   // 黑桃 ♠️
    Diamond, // 方块 ♦️
    Heart,   // 红心 ♥️
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Club, Suit::Spade, Suit::Diamond, Suit::Heart];
}

/// 点数 (Rank)
/// 本游戏里 A 只算 1 点，所以排在最前面
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven,
        Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King,
    ];

    /// J、Q、K 是特殊牌 (special)
    pub fn is_special(self) -> bool {
        matches!(self, Rank::Jack | Rank::Queen | Rank::King)
    }

    /// 计算余数时的点数：A=1，2~10 为牌面值。
    /// 特殊牌不参与求和，返回 0。
    pub fn pip_value(self) -> u8 {
        match self {
            Rank::Jack | Rank::Queen | Rank::King => 0,
            // Ace 是第 0 个变体
            numeric => numeric as u8 + 1,
        }
    }
}

/// 单张扑克牌 (Card)
/// 构造后不可变，special 由点数推导而来
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn is_special(&self) -> bool {
        self.rank.is_special()
    }
}

/// 一手牌的得分 (HandScore)
/// 字段顺序就是比较顺序：先比特殊牌数量，再比余数。
/// 派生的 `Ord` 按字段字典序比较，可以直接用 `>` 判断胜负。
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Serialize, Deserialize)]
pub struct HandScore {
    pub special_count: u8,
    pub remainder: u8,
}

// --- 实现辅助功能 ---

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Suit::Club => "♣",
            Suit::Spade => "♠",
            Suit::Diamond => "♦",
            Suit::Heart => "♥",
        })
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl fmt::Display for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "特殊牌 {} 张, 余数 {}", self.special_count, self.remainder)
    }
}

// --- 牌组 ---

/// 牌堆 (Deck)
/// `cards` 的末尾是牌堆顶，抽牌时从末尾取出。
/// `Default` 是一个空牌堆。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// 创建一副完整的 52 张牌并洗牌
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Deck {
        let mut deck = Deck::ordered();
        deck.shuffle(rng);
        deck
    }

    /// 未洗过的 52 张牌，按花色、点数顺序排列
    pub fn ordered() -> Deck {
        let mut cards = Vec::with_capacity(52);
        for &suit in &Suit::ALL {
            for &rank in &Rank::ALL {
                cards.push(Card { rank, suit });
            }
        }
        Deck { cards }
    }

    /// 按给定顺序发牌的牌堆：`cards[0]` 最先被抽出。
    /// 主要用于测试中安排牌局。
    pub fn stacked(cards: &[Card]) -> GameResult<Deck> {
        let mut seen = HashSet::with_capacity(cards.len());
        for card in cards {
            if !seen.insert(*card) {
                return Err(GameError::DuplicateCard(*card));
            }
        }
        Ok(Deck { cards: cards.iter().rev().copied().collect() })
    }

    /// 打乱剩余的牌
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// 从牌堆顶抽一张牌并移出牌堆
    pub fn draw(&mut self) -> GameResult<Card> {
        self.cards.pop().ok_or(GameError::EmptyDeck)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

// --- 牌力评估逻辑 ---

/// 统计特殊牌 (J/Q/K) 的数量
pub fn count_special_cards(cards: &[Card]) -> u8 {
    cards.iter().filter(|c| c.is_special()).count() as u8
}

/// 非特殊牌点数之和对 10 取余
pub fn calculate_remainder(cards: &[Card]) -> u8 {
    let sum: u32 = cards
        .iter()
        .filter(|c| !c.is_special())
        .map(|c| c.rank.pip_value() as u32)
        .sum();
    (sum % 10) as u8
}

/// 评估一手牌的得分
pub fn evaluate_hand(cards: &[Card]) -> HandScore {
    HandScore {
        special_count: count_special_cards(cards),
        remainder: calculate_remainder(cards),
    }
}

// --- 单元测试 ---
