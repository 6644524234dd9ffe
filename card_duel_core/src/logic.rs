use crate::card::*;
use crate::config::TableConfig;
use crate::error::{GameError, GameResult};
use crate::state::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

// --- 核心游戏流程函数 ---

impl RoundEngine {
    /// 按配置创建引擎，玩家拿到初始余额，等待下注
    pub fn new(config: TableConfig) -> GameResult<RoundEngine> {
        config.validate()?;

        // 牌堆在下注时才创建，种子的第一次使用就是第一局的洗牌
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(RoundEngine {
            player: Player::new(config.starting_balance),
            dealer: Dealer::default(),
            deck: Deck::default(),
            rng,
            phase: Phase::AwaitingBet,
            bet: 0,
            round: 0,
            replacement_used: [false; HAND_SIZE],
            config,
        })
    }

    /// 下注并开始新的一局
    ///
    /// - 验证下注额：必须大于 0 且不超过余额，否则状态不变。
    ///   赢了之后的余额 (余额 + 下注额) 超出 u64 时同样拒绝。
    /// - 扣除下注额。
    /// - 创建一副新牌并洗牌，玩家和庄家轮流各发 3 张。
    /// - 重置换牌记录，进入 InPlay 阶段。
    ///
    /// 在 Evaluated 阶段调用时会先开始新的一局。
    pub fn place_bet(&mut self, amount: u64) -> GameResult<RoundSnapshot> {
        if self.phase == Phase::InPlay {
            return Err(self.wrong_phase("place_bet"));
        }
        let balance = self.player.balance;
        if amount == 0 || amount > balance || balance.checked_add(amount).is_none() {
            return Err(GameError::InvalidBet { amount, balance });
        }

        // 先在局部完成发牌，全部成功后再写回状态
        let mut deck = Deck::new(&mut self.rng);
        debug!(round = self.round + 1, cards = deck.len(), "新牌堆洗牌完成");
        let mut player_hand = Hand::new();
        let mut dealer_hand = Hand::new();
        for _ in 0..HAND_SIZE {
            player_hand.add_card(deck.draw()?)?;
            dealer_hand.add_card(deck.draw()?)?;
        }

        self.player.balance -= amount;
        self.bet = amount;
        self.deck = deck;
        self.player.hand = player_hand;
        self.dealer.hand = dealer_hand;
        self.replacement_used = [false; HAND_SIZE];
        self.round += 1;
        self.phase = Phase::InPlay;

        info!(round = self.round, bet = amount, balance = self.player.balance, "下注成功，发牌完成");
        Ok(self.snapshot())
    }

    /// 解析文本形式的下注额后下注
    pub fn place_bet_str(&mut self, input: &str) -> GameResult<RoundSnapshot> {
        let trimmed = input.trim();
        let amount = trimmed
            .parse::<u64>()
            .map_err(|_| GameError::UnparsableBet(trimmed.to_string()))?;
        self.place_bet(amount)
    }

    /// 玩家换掉第 `index` 张牌 (从 0 开始)
    ///
    /// 换牌规则：按调用前已经换过的张数计算剩余可换牌位，
    /// 只剩最后一个没换过的牌位时一律拒绝，所以每局最多换 2 张。
    pub fn replace_card(&mut self, index: usize) -> GameResult<RoundSnapshot> {
        if self.phase != Phase::InPlay {
            return Err(self.wrong_phase("replace_card"));
        }

        let len = self.player.hand.len();
        if index >= len {
            return Err(GameError::IndexOutOfRange { index, len });
        }

        let used = self.replacement_used.iter().filter(|&&u| u).count();
        let remaining = HAND_SIZE - used;
        if remaining <= 1 {
            return Err(GameError::ReplacementLimitReached);
        }
        if self.replacement_used[index] {
            return Err(GameError::CardAlreadyReplaced(index));
        }

        let card = self.deck.draw()?;
        let discarded = self.player.hand.replace_card(index, card)?;
        self.replacement_used[index] = true;

        debug!(round = self.round, index, %discarded, %card, "玩家换牌");
        Ok(self.snapshot())
    }

    /// 结算本局
    ///
    /// 先比特殊牌 (J/Q/K) 的数量，多者胜；
    /// 数量相同时比非特殊牌点数之和的个位数，大者胜；
    /// 仍然相同则庄家胜。
    /// 玩家获胜时返还 2 倍下注额。
    pub fn evaluate(&mut self) -> GameResult<RoundResult> {
        if self.phase != Phase::InPlay {
            return Err(self.wrong_phase("evaluate"));
        }

        let player_score = self.player.score();
        let dealer_score = self.dealer.score();
        let outcome = decide_winner(player_score, dealer_score);

        let bet = self.bet;
        let payout = match outcome {
            Outcome::PlayerWin => bet.checked_mul(2).ok_or(GameError::BalanceOverflow)?,
            Outcome::DealerWin => 0,
        };
        // 先算好新余额，溢出时状态保持不变
        let balance = self.player.balance.checked_add(payout).ok_or(GameError::BalanceOverflow)?;
        self.player.balance = balance;

        let player_hand = self.player.hand.cards().to_vec();
        let dealer_hand = self.dealer.hand.cards().to_vec();

        // 清空手牌，准备下一局
        self.player.hand.clear();
        self.dealer.hand.clear();
        self.bet = 0;
        self.phase = Phase::Evaluated;

        info!(
            round = self.round,
            ?outcome,
            %player_score,
            %dealer_score,
            payout,
            balance = self.player.balance,
            "本局结算完成"
        );

        Ok(RoundResult {
            outcome,
            player_hand,
            dealer_hand,
            player_score,
            dealer_score,
            bet,
            payout,
            snapshot: self.snapshot(),
        })
    }

    /// 结算后回到等待下注阶段
    pub fn new_round(&mut self) -> GameResult<RoundSnapshot> {
        if self.phase == Phase::InPlay {
            return Err(self.wrong_phase("new_round"));
        }
        self.reset_round();
        Ok(self.snapshot())
    }

    /// 重新开始一场游戏：余额恢复为初始值
    pub fn restart(&mut self) -> RoundSnapshot {
        self.reset_round();
        self.player.balance = self.config.starting_balance;
        self.round = 0;
        self.deck = Deck::default();
        info!(balance = self.player.balance, "重新开始游戏");
        self.snapshot()
    }

    // --- 辅助逻辑函数 ---

    fn reset_round(&mut self) {
        self.player.hand.clear();
        self.dealer.hand.clear();
        self.bet = 0;
        self.replacement_used = [false; HAND_SIZE];
        self.phase = Phase::AwaitingBet;
    }

    fn wrong_phase(&self, operation: &'static str) -> GameError {
        GameError::WrongPhase { operation, phase: self.phase }
    }
}

/// 得分相同时庄家胜
pub fn decide_winner(player: HandScore, dealer: HandScore) -> Outcome {
    if player > dealer {
        Outcome::PlayerWin
    } else {
        Outcome::DealerWin
    }
}

// --- 单元测试 ---
