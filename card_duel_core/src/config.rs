use crate::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};

/// 初始余额，与最初的桌面版保持一致
pub const DEFAULT_STARTING_BALANCE: u64 = 100;

/// 牌桌配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// 新游戏开始时玩家的余额
    pub starting_balance: u64,
    /// 固定的洗牌种子；为 None 时使用系统熵
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            starting_balance: DEFAULT_STARTING_BALANCE,
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> GameResult<()> {
        if self.starting_balance == 0 {
            return Err(GameError::InvalidConfig("初始余额必须大于 0".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TableConfig::default();
        assert_eq!(config.starting_balance, 100);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_balance_rejected() {
        let config = TableConfig { starting_balance: 0, seed: None };
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: TableConfig = serde_json::from_str(r#"{"seed": 9}"#).unwrap();
        assert_eq!(config.starting_balance, DEFAULT_STARTING_BALANCE);
        assert_eq!(config.seed, Some(9));
    }
}
