use crate::card::{Card, Deck, HandScore, Rank, Suit, evaluate_hand};
use crate::config::TableConfig;
use crate::error::{GameError, GameResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// 每手牌的张数
pub const HAND_SIZE: usize = 3;
/// 每局最多可以换的牌数：三张里第三张永远锁定
pub const MAX_REPLACEMENTS: usize = HAND_SIZE - 1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    AwaitingBet,
    InPlay,
    Evaluated, // 一局结束，结算完成
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Outcome {
    PlayerWin,
    DealerWin,
}

/// 空牌位的占位牌，`len` 之后的牌位始终是它
const EMPTY_SLOT: Card = Card::new(Rank::Ace, Suit::Club);

/// 手牌 (Hand)，固定 3 个牌位
/// 前 `len` 个牌位有效，发牌时依次填入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    slots: [Card; HAND_SIZE],
    len: usize,
}

impl Default for Hand {
    fn default() -> Self {
        Hand::new()
    }
}

impl Hand {
    pub fn new() -> Hand {
        Hand { slots: [EMPTY_SLOT; HAND_SIZE], len: 0 }
    }

    /// 发牌时加入一张牌
    pub fn add_card(&mut self, card: Card) -> GameResult<()> {
        if self.len >= HAND_SIZE {
            return Err(GameError::HandFull);
        }
        self.slots[self.len] = card;
        self.len += 1;
        Ok(())
    }

    /// 替换指定位置的牌，返回被换下的牌
    pub fn replace_card(&mut self, index: usize, card: Card) -> GameResult<Card> {
        if index >= self.len {
            return Err(GameError::IndexOutOfRange { index, len: self.len });
        }
        Ok(std::mem::replace(&mut self.slots[index], card))
    }

    pub fn clear(&mut self) {
        self.slots = [EMPTY_SLOT; HAND_SIZE];
        self.len = 0;
    }

    pub fn cards(&self) -> &[Card] {
        &self.slots[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == HAND_SIZE
    }

    pub fn special_count(&self) -> u8 {
        self.score().special_count
    }

    pub fn remainder(&self) -> u8 {
        self.score().remainder
    }

    pub fn score(&self) -> HandScore {
        evaluate_hand(self.cards())
    }
}

/// 持有手牌的参与者（玩家或庄家）
pub trait Participant {
    fn hand(&self) -> &Hand;
    fn hand_mut(&mut self) -> &mut Hand;

    fn score(&self) -> HandScore {
        self.hand().score()
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub balance: u64,
    pub hand: Hand,
}

#[derive(Debug, Clone, Default)]
pub struct Dealer {
    pub hand: Hand,
}

impl Player {
    pub fn new(balance: u64) -> Player {
        Player { balance, hand: Hand::new() }
    }
}

impl Participant for Player {
    fn hand(&self) -> &Hand {
        &self.hand
    }

    fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }
}

impl Participant for Dealer {
    fn hand(&self) -> &Hand {
        &self.hand
    }

    fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }
}

/// 交给表现层的只读快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub round: u32,
    pub phase: Phase,
    pub bet: u64,
    pub balance: u64,
    pub player_hand: Vec<Card>,
    // 庄家的牌在结算前为 None
    pub dealer_hand: Vec<Option<Card>>,
    pub dealer_hand_visible: bool,
    pub replacement_used: [bool; HAND_SIZE],
    pub replacements_left: usize,
    pub game_over: bool,
}

/// 一局结算的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub outcome: Outcome,
    pub player_hand: Vec<Card>,
    pub dealer_hand: Vec<Card>,
    pub player_score: HandScore,
    pub dealer_score: HandScore,
    pub bet: u64,
    /// 返还给玩家的金额：赢了是 2 倍下注额，输了是 0
    pub payout: u64,
    pub snapshot: RoundSnapshot,
}

/// 单张牌桌的回合引擎，持有一局游戏的全部状态
#[derive(Debug)]
pub struct RoundEngine {
    pub(crate) config: TableConfig,
    pub(crate) player: Player,
    pub(crate) dealer: Dealer,
    pub(crate) deck: Deck,
    pub(crate) rng: StdRng,
    pub(crate) phase: Phase,
    pub(crate) bet: u64,
    pub(crate) round: u32,
    pub(crate) replacement_used: [bool; HAND_SIZE],
}

// --- RoundEngine 的只读方法 ---

impl RoundEngine {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn balance(&self) -> u64 {
        self.player.balance
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// 庄家真实的手牌。表现层应该在结算前隐藏它
    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer.hand
    }

    pub fn replacement_used(&self) -> [bool; HAND_SIZE] {
        self.replacement_used
    }

    /// 本局还能换几张牌
    pub fn replacements_left(&self) -> usize {
        if self.phase != Phase::InPlay {
            return 0;
        }
        let used = self.replacement_used.iter().filter(|&&u| u).count();
        MAX_REPLACEMENTS.saturating_sub(used)
    }

    /// 余额为 0 且没有进行中的牌局时，游戏无法继续
    pub fn is_game_over(&self) -> bool {
        self.player.balance == 0 && self.phase != Phase::InPlay
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let dealer_hand_visible = self.phase == Phase::Evaluated;
        let dealer_hand = self
            .dealer
            .hand
            .cards()
            .iter()
            .map(|c| if dealer_hand_visible { Some(*c) } else { None })
            .collect();

        RoundSnapshot {
            round: self.round,
            phase: self.phase,
            bet: self.bet,
            balance: self.player.balance,
            player_hand: self.player.hand.cards().to_vec(),
            dealer_hand,
            dealer_hand_visible,
            replacement_used: self.replacement_used,
            replacements_left: self.replacements_left(),
            game_over: self.is_game_over(),
        }
    }
}
