mod render;

use clap::Parser;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use card_duel_core::{Command, Event, GameError, RoundEngine, TableConfig, DEFAULT_STARTING_BALANCE};

/// 三张牌对决的终端客户端
#[derive(Parser, Debug)]
#[command(name = "card-duel", about = "单人三张牌对决（终端版）")]
struct Args {
    /// 初始余额
    #[arg(long, default_value_t = DEFAULT_STARTING_BALANCE)]
    balance: u64,

    /// 固定洗牌种子，便于复现牌局
    #[arg(long)]
    seed: Option<u64>,

    /// 以 JSON 输出每个事件
    #[arg(long)]
    json: bool,
}

/// 用户输入解析后的动作
enum Input {
    Engine(Command),
    /// 下注额需要交给引擎校验，保留原始文本
    Bet(String),
    State,
    Help,
    Exit,
}

fn parse_input(line: &str) -> Result<Input, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        ["bet", amount] => Ok(Input::Bet(amount.to_string())),
        ["bet"] => Err("用法: bet <金额>".to_string()),
        ["replace", slot] => match slot.parse::<usize>() {
            // 界面上的牌位从 1 开始
            Ok(n) if n >= 1 => Ok(Input::Engine(Command::Replace(n - 1))),
            _ => Err("用法: replace <1-3>".to_string()),
        },
        ["eval"] | ["evaluate"] => Ok(Input::Engine(Command::Evaluate)),
        ["new"] => Ok(Input::Engine(Command::NewRound)),
        ["restart"] => Ok(Input::Engine(Command::Restart)),
        ["state"] => Ok(Input::State),
        ["help"] => Ok(Input::Help),
        ["exit"] | ["quit"] => Ok(Input::Exit),
        _ => Err(format!("未知命令: {}", line.trim())),
    }
}

fn print_help() {
    println!("--- 三张牌对决 ---");
    println!("可用命令:");
    println!("  bet <金额>                - 下注并发牌");
    println!("  replace <1-3>             - 换掉一张牌 (每局最多 2 张)");
    println!("  eval                      - 亮牌结算");
    println!("  new                       - 结算后开始新的一局");
    println!("  restart                   - 余额恢复初始值，重新开始");
    println!("  state                     - 查看当前状态");
    println!("  exit                      - 退出");
}

fn print_event(event: &Event, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string(event)?);
    } else {
        println!("\n{}\n", render::render_event(event));
    }
    Ok(())
}

fn report_error(err: &GameError) {
    warn!(%err, "操作被拒绝");
    println!("{}", err);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 日志写到 stderr，避免和牌桌输出混在一起
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = TableConfig { starting_balance: args.balance, seed: args.seed };
    let mut engine = RoundEngine::new(config)?;

    print_help();
    println!("\n{}\n", render::render_snapshot(&engine.snapshot()));

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = stdin.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let input = match parse_input(&line) {
            Ok(input) => input,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        let outcome = match input {
            Input::Engine(command) => engine.apply(command),
            Input::Bet(amount) => engine.place_bet_str(&amount).map(Event::Dealt),
            Input::State => {
                println!("\n{}\n", render::render_snapshot(&engine.snapshot()));
                continue;
            }
            Input::Help => {
                print_help();
                continue;
            }
            Input::Exit => {
                println!("再见！");
                break;
            }
        };

        match outcome {
            Ok(event) => print_event(&event, args.json)?,
            Err(err) => report_error(&err),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert!(matches!(parse_input("bet 20"), Ok(Input::Bet(a)) if a == "20"));
        assert!(matches!(parse_input("replace 1"), Ok(Input::Engine(Command::Replace(0)))));
        assert!(matches!(parse_input("  eval "), Ok(Input::Engine(Command::Evaluate))));
        assert!(matches!(parse_input("new"), Ok(Input::Engine(Command::NewRound))));
        assert!(matches!(parse_input("quit"), Ok(Input::Exit)));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_input("bet").is_err());
        assert!(parse_input("replace 0").is_err());
        assert!(parse_input("replace x").is_err());
        assert!(parse_input("fold").is_err());
    }

    #[test]
    fn test_out_of_range_slot_reaches_engine() {
        // 4 号牌位由引擎判定越界
        assert!(matches!(parse_input("replace 4"), Ok(Input::Engine(Command::Replace(3)))));
    }
}
