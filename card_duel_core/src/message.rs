use crate::error::GameResult;
use crate::state::{RoundEngine, RoundResult, RoundSnapshot};
use serde::{Deserialize, Serialize};

// --- 表现层 -> 引擎 的指令 ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 下注并发牌
    PlaceBet(u64),
    /// 换掉指定牌位的牌 (从 0 开始)
    Replace(usize),
    /// 结算本局
    Evaluate,
    /// 结算后开始新的一局
    NewRound,
    /// 余额恢复初始值，重新开始游戏
    Restart,
}

// --- 引擎 -> 表现层 的事件 ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// 下注成功，双方各拿到 3 张牌
    Dealt(RoundSnapshot),
    Replaced { index: usize, snapshot: RoundSnapshot },
    /// 结算结果，庄家的牌在这里公开
    Evaluated(RoundResult),
    RoundReset(RoundSnapshot),
    Restarted(RoundSnapshot),
}

impl Event {
    /// 事件发生后的快照
    pub fn snapshot(&self) -> &RoundSnapshot {
        match self {
            Event::Dealt(s) | Event::RoundReset(s) | Event::Restarted(s) => s,
            Event::Replaced { snapshot, .. } => snapshot,
            Event::Evaluated(result) => &result.snapshot,
        }
    }
}

impl RoundEngine {
    /// 表现层的统一入口
    pub fn apply(&mut self, command: Command) -> GameResult<Event> {
        match command {
            Command::PlaceBet(amount) => self.place_bet(amount).map(Event::Dealt),
            Command::Replace(index) => self
                .replace_card(index)
                .map(|snapshot| Event::Replaced { index, snapshot }),
            Command::Evaluate => self.evaluate().map(Event::Evaluated),
            Command::NewRound => self.new_round().map(Event::RoundReset),
            Command::Restart => Ok(Event::Restarted(self.restart())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use crate::error::GameError;
    use crate::state::Phase;

    fn setup_engine() -> RoundEngine {
        RoundEngine::new(TableConfig { starting_balance: 50, seed: Some(3) }).unwrap()
    }

    #[test]
    fn test_full_round_through_commands() {
        let mut engine = setup_engine();

        let event = engine.apply(Command::PlaceBet(20)).unwrap();
        assert!(matches!(event, Event::Dealt(_)));
        assert_eq!(event.snapshot().balance, 30);

        let event = engine.apply(Command::Replace(1)).unwrap();
        assert!(matches!(event, Event::Replaced { index: 1, .. }));

        let event = engine.apply(Command::Evaluate).unwrap();
        let Event::Evaluated(result) = &event else {
            panic!("应该是结算事件: {event:?}");
        };
        assert!(result.snapshot.balance == 30 || result.snapshot.balance == 70);
        assert_eq!(event.snapshot().phase, Phase::Evaluated);

        let event = engine.apply(Command::NewRound).unwrap();
        assert_eq!(event.snapshot().phase, Phase::AwaitingBet);
    }

    #[test]
    fn test_rejected_command_reports_error() {
        let mut engine = setup_engine();
        assert!(matches!(engine.apply(Command::Evaluate), Err(GameError::WrongPhase { .. })));
        assert!(matches!(engine.apply(Command::PlaceBet(51)), Err(GameError::InvalidBet { .. })));
        assert_eq!(engine.balance(), 50);
    }

    #[test]
    fn test_restart_command() {
        let mut engine = setup_engine();
        engine.apply(Command::PlaceBet(50)).unwrap();
        let event = engine.apply(Command::Restart).unwrap();
        assert_eq!(event, Event::Restarted(engine.snapshot()));
        assert_eq!(event.snapshot().balance, 50);
    }

    #[test]
    fn test_event_serializes_to_json() {
        let mut engine = setup_engine();
        let event = engine.apply(Command::PlaceBet(10)).unwrap();
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
        // 庄家的牌在 JSON 中也是隐藏的
        assert!(json.contains("\"dealer_hand\":[null,null,null]"));
    }
}
