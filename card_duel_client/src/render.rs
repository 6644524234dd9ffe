use card_duel_core::{Card, Event, Outcome, Phase, Rank, RoundResult, RoundSnapshot, Suit};

pub const CARD_BACK_IMAGE: &str = "back.gif";

/// 牌面图片文件名，例如 `card_213.gif` 是黑桃 K。
/// 花色：梅花=1, 黑桃=2, 方块=3, 红心=4；点数：A=1, J=11, Q=12, K=13。
pub fn card_image_name(card: &Card) -> String {
    let suit = match card.suit() {
        Suit::Club => 1,
        Suit::Spade => 2,
        Suit::Diamond => 3,
        Suit::Heart => 4,
    };
    let rank = match card.rank() {
        Rank::Jack => 11,
        Rank::Queen => 12,
        Rank::King => 13,
        other => other.pip_value(),
    };
    format!("card_{}{}.gif", suit, rank)
}

/// 一排牌位对应的图片，未公开的牌显示牌背
fn render_images<'a>(cards: impl IntoIterator<Item = &'a Option<Card>>) -> String {
    cards
        .into_iter()
        .map(|c| c.as_ref().map_or(CARD_BACK_IMAGE.to_string(), card_image_name))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_cards(cards: &[Card]) -> String {
    cards.iter().map(|c| format!("[{}]", c)).collect::<Vec<_>>().join(" ")
}

fn render_hidden(cards: &[Option<Card>]) -> String {
    cards
        .iter()
        .map(|c| c.map_or("[??]".to_string(), |c| format!("[{}]", c)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// 渲染快照：庄家的牌、玩家的牌、可用的换牌按钮和余额
pub fn render_snapshot(snapshot: &RoundSnapshot) -> String {
    let mut lines = Vec::new();

    if snapshot.phase == Phase::InPlay {
        lines.push(format!("庄家: {}", render_hidden(&snapshot.dealer_hand)));
        lines.push(format!("玩家: {}", render_cards(&snapshot.player_hand)));
        let player_images: Vec<Option<Card>> = snapshot.player_hand.iter().copied().map(Some).collect();
        lines.push(format!(
            "图片: 庄家 {} | 玩家 {}",
            render_images(&snapshot.dealer_hand),
            render_images(&player_images)
        ));

        let slots: Vec<String> = snapshot
            .replacement_used
            .iter()
            .enumerate()
            .map(|(i, used)| {
                if *used || snapshot.replacements_left == 0 {
                    format!("({} 不可换)", i + 1)
                } else {
                    format!("(replace {})", i + 1)
                }
            })
            .collect();
        lines.push(format!("换牌: {}", slots.join(" ")));
        lines.push(format!("你当前的下注是: ${}", snapshot.bet));
    } else if snapshot.game_over {
        lines.push("你已经没钱了！请输入 restart 开始新游戏。".to_string());
    } else {
        lines.push("请下注！".to_string());
    }

    lines.push(format!("你现在有: ${}", snapshot.balance));
    lines.join("\n")
}

pub fn render_result(result: &RoundResult) -> String {
    let verdict = match result.outcome {
        Outcome::PlayerWin => format!("玩家赢了这一局！赢得 ${}", result.payout),
        Outcome::DealerWin => "庄家赢了这一局！".to_string(),
    };
    [
        format!("庄家: {}  ({})", render_cards(&result.dealer_hand), result.dealer_score),
        format!("玩家: {}  ({})", render_cards(&result.player_hand), result.player_score),
        verdict,
        render_snapshot(&result.snapshot),
    ]
    .join("\n")
}

pub fn render_event(event: &Event) -> String {
    match event {
        Event::Evaluated(result) => render_result(result),
        Event::Replaced { index, snapshot } => {
            format!("换掉了第 {} 张牌\n{}", index + 1, render_snapshot(snapshot))
        }
        Event::Restarted(snapshot) => format!("新游戏开始\n{}", render_snapshot(snapshot)),
        Event::Dealt(snapshot) | Event::RoundReset(snapshot) => render_snapshot(snapshot),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_duel_core::{RoundEngine, TableConfig};

    #[test]
    fn test_card_image_names() {
        assert_eq!(card_image_name(&Card::new(Rank::Ace, Suit::Club)), "card_11.gif");
        assert_eq!(card_image_name(&Card::new(Rank::King, Suit::Spade)), "card_213.gif");
        assert_eq!(card_image_name(&Card::new(Rank::Ten, Suit::Diamond)), "card_310.gif");
        assert_eq!(card_image_name(&Card::new(Rank::Queen, Suit::Heart)), "card_412.gif");
        assert_eq!(card_image_name(&Card::new(Rank::Seven, Suit::Heart)), "card_47.gif");
    }

    #[test]
    fn test_in_play_hides_dealer() {
        let mut engine = RoundEngine::new(TableConfig { starting_balance: 100, seed: Some(1) }).unwrap();
        let snapshot = engine.place_bet(10).unwrap();
        let text = render_snapshot(&snapshot);
        assert!(text.contains("庄家: [??] [??] [??]"));
        let player_images: Vec<String> = snapshot.player_hand.iter().map(card_image_name).collect();
        assert!(text.contains(&format!(
            "图片: 庄家 back.gif back.gif back.gif | 玩家 {}",
            player_images.join(" ")
        )));
        assert!(text.contains("(replace 1)"));
        assert!(text.contains("$90"));
    }

    #[test]
    fn test_slots_locked_after_two_replacements() {
        let mut engine = RoundEngine::new(TableConfig::default()).unwrap();
        engine.place_bet(10).unwrap();
        engine.replace_card(0).unwrap();
        let snapshot = engine.replace_card(1).unwrap();
        let text = render_snapshot(&snapshot);
        assert!(text.contains("(3 不可换)"));
        assert!(!text.contains("replace"));
    }

    #[test]
    fn test_result_reveals_dealer() {
        let mut engine = RoundEngine::new(TableConfig::default()).unwrap();
        engine.place_bet(10).unwrap();
        let result = engine.evaluate().unwrap();
        let text = render_result(&result);
        assert!(!text.contains("??"));
        assert!(text.contains("赢了这一局"));
    }
}
