// src/bin/bigtwo_dev_cli.rs

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use dialoguer::{Confirm, Input};
use log::{error, warn};

use bigtwo_engine::domain::{parse_cards, Card, PlayerId, PlayerKind, TableConfig};
use bigtwo_engine::engine::{
    EngineError, GameSession, RoundEvent, RoundEventKind, TurnKind,
};
use bigtwo_engine::eval::describe_hand;
use bigtwo_engine::infra::{DeterministicRng, SystemRng};
use bigtwo_engine::players::{Decision, DecisionRequest, Player, Robot};

/// Консольная партия в Big Two: один человек против трёх роботов.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed для детерминированной раздачи.
    #[arg(long)]
    seed: Option<u64>,

    /// Все четыре места занимают роботы.
    #[arg(long, default_value_t = false)]
    robots_only: bool,

    /// JSON-файл с конфигом стола.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Сколько раундов сыграть без вопроса "ещё раз?".
    #[arg(long)]
    rounds: Option<usize>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            error!("bad table config: {}", e);
            std::process::exit(2);
        }
    };

    let names: HashMap<PlayerId, String> = config
        .players
        .iter()
        .map(|p| (p.id, p.name.clone()))
        .collect();

    let mut players: Vec<Box<dyn Player>> = config
        .players
        .iter()
        .map(|p| -> Box<dyn Player> {
            match p.kind {
                PlayerKind::Human => Box::new(ConsolePlayer::default()),
                PlayerKind::Computer => Box::new(Robot::new()),
            }
        })
        .collect();

    let mut session = match GameSession::new(1, "Big Two".to_string(), config) {
        Ok(s) => s,
        Err(e) => {
            error!("cannot create table: {}", e);
            std::process::exit(2);
        }
    };

    let mut printer = |event: &RoundEvent| print_event(&names, event);

    loop {
        let result = match args.seed {
            Some(seed) => {
                let round_seed = seed.wrapping_add(session.rounds_played() as u64);
                session.play_round(&mut DeterministicRng::from_seed(round_seed), &mut players, &mut printer)
            }
            None => session.play_round(&mut SystemRng, &mut players, &mut printer),
        };

        if let Err(e) = result {
            error!("round aborted: {}", e);
            std::process::exit(1);
        }

        println!();
        for (id, name) in sorted_names(&names) {
            println!("  {:<8} побед: {}", name, session.wins(id));
        }

        let again = match args.rounds {
            Some(n) => session.rounds_played() < n,
            None => Confirm::new()
                .with_prompt("Сыграть ещё раз?")
                .default(true)
                .interact()
                .unwrap_or(false),
        };
        if !again {
            break;
        }
    }
}

fn load_config(args: &Args) -> Result<TableConfig, String> {
    let config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
            TableConfig::from_json(&json).map_err(|e| e.to_string())?
        }
        None if args.robots_only => TableConfig::robots_only(),
        None => TableConfig::standard(),
    };
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn sorted_names(names: &HashMap<PlayerId, String>) -> Vec<(PlayerId, &str)> {
    let mut v: Vec<(PlayerId, &str)> = names.iter().map(|(id, n)| (*id, n.as_str())).collect();
    v.sort_by_key(|(id, _)| *id);
    v
}

fn pretty_cards(cards: &[Card]) -> String {
    cards.iter().map(Card::pretty).collect::<Vec<_>>().join(" ")
}

fn player_name(names: &HashMap<PlayerId, String>, id: PlayerId) -> &str {
    names.get(&id).map(String::as_str).unwrap_or("?")
}

/// Печатает событие раунда в консоль.
fn print_event(names: &HashMap<PlayerId, String>, event: &RoundEvent) {
    match &event.kind {
        RoundEventKind::RoundStarted { round_id, turn_order, .. } => {
            println!();
            println!("================ ROUND {} =================", round_id);
            let order: Vec<&str> = turn_order.iter().map(|id| player_name(names, *id)).collect();
            println!("Порядок хода: {}", order.join(" → "));
        }
        RoundEventKind::CardsDealt { .. } => {}
        RoundEventKind::HandPlayed { player_id, combo, cards_left } => {
            println!(
                "{:<8} {:<16} {}   (осталось карт: {})",
                player_name(names, *player_id),
                describe_hand(combo.category),
                pretty_cards(combo.cards()),
                cards_left
            );
        }
        RoundEventKind::Passed { player_id } => {
            println!("{:<8} пас", player_name(names, *player_id));
        }
        RoundEventKind::RoundWon { player_id, .. } => {
            println!();
            println!("*** {} выиграл раунд! ***", player_name(names, *player_id));
        }
    }
}

/// Человек за клавиатурой.
#[derive(Debug, Default)]
struct ConsolePlayer {
    fallback: Robot,
}

impl ConsolePlayer {
    fn prompt(&self, request: &DecisionRequest<'_>) -> Result<Decision, dialoguer::Error> {
        println!();
        println!("Ваши карты: {}", pretty_cards(request.hand.cards()));
        match request.turn {
            TurnKind::Opening => println!("Первый ход: рука должна содержать 3♦."),
            TurnKind::FreeTurn => println!("Все спасовали: ходите любой рукой."),
            TurnKind::Response { target } => println!(
                "На поле: {} {}",
                describe_hand(target.category),
                pretty_cards(target.cards())
            ),
        }

        loop {
            let line: String = Input::new()
                .with_prompt("Карты (например `3d 3c`), `pass` или `?` для подсказки")
                .interact_text()?;
            let line = line.trim();

            if line.eq_ignore_ascii_case("pass") {
                return Ok(Decision::Pass);
            }
            if line == "?" {
                for combo in request.options {
                    println!("  {:<16} {}", describe_hand(combo.category), pretty_cards(combo.cards()));
                }
                continue;
            }
            match parse_cards(line) {
                Ok(cards) if !cards.is_empty() => return Ok(Decision::Play(cards)),
                Ok(_) => println!("Введите хотя бы одну карту."),
                Err(e) => println!("Не понял: {}", e),
            }
        }
    }
}

impl Player for ConsolePlayer {
    fn act(&mut self, request: &DecisionRequest<'_>) -> Decision {
        if request.can_pass() && request.options.is_empty() {
            println!("Нечем бить – автоматический пас.");
            return Decision::Pass;
        }
        match self.prompt(request) {
            Ok(decision) => decision,
            Err(e) => {
                warn!("console input failed ({}), robot plays instead", e);
                self.fallback.choose(request)
            }
        }
    }

    fn on_rejected(&mut self, error: &EngineError) {
        println!("Ход отклонён: {}", error);
    }
}
