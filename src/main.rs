use std::fs::File;
use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use coup_engine::ai::RandomDecider;
use coup_engine::human::Console;
use coup_engine::{Coup, Player, Rules};

const AI_NAMES: [&str; 12] = [
    "Ada", "Basil", "Cleo", "Dario", "Edith", "Felix",
    "Greta", "Hugo", "Iris", "Jonas", "Kira", "Luca",
];

#[derive(Parser, Debug)]
#[command(name = "coup", about = "Play The Resistance: Coup against computer opponents")]
struct Args {
    /// Seats at the table, including yours
    #[arg(short, long, default_value_t = 4)]
    players: usize,
    #[arg(short, long, default_value = "You")]
    name: String,
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many turns even without a winner
    #[arg(long, default_value_t = 200)]
    max_turns: usize,
    /// JSON file overriding the default rules
    #[arg(long)]
    rules: Option<PathBuf>,
    /// Only computer players
    #[arg(long)]
    spectate: bool,
    #[arg(long)]
    history_json: Option<PathBuf>,
    #[arg(long)]
    history_csv: Option<PathBuf>,
}

fn seat_players(args: &Args, seed: u64) -> Vec<Player> {
    let mut rng = Pcg64::seed_from_u64(seed);
    let mut names: Vec<&str> = AI_NAMES.iter().copied().filter(|&name| name != args.name).collect();
    names.shuffle(&mut rng);

    let mut players = Vec::with_capacity(args.players);
    if !args.spectate {
        players.push(Player::human(args.name.clone(), Console));
    }

    let ai_seats = args.players.saturating_sub(players.len());
    for (offset, name) in names.into_iter().take(ai_seats).enumerate() {
        let decider = RandomDecider::new(seed.wrapping_add(offset as u64 + 1));
        players.push(Player::ai(name, decider));
    }

    players
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let rules = match &args.rules {
        Some(path) => Rules::load(path).with_context(|| format!("reading rules from {}", path.display()))?,
        None => Rules::default(),
    };

    let mut coup = Coup::new(seat_players(&args, seed), rules, seed)?;
    log::info!("seed {seed}");

    let mut finished = false;
    while !finished && coup.turn() < args.max_turns {
        finished = coup.handle_turn()?;
        if let Some(record) = coup.history().last() {
            println!("{}", format!("--- turn {} ---", record.turn).bold());
            print!("{record}");
        }
    }

    match coup.winner() {
        Some(winner) => println!("{}", format!("{} wins!", coup.players()[winner].name()).green().bold()),
        None if finished => println!("Game ended early."),
        None => println!("No winner after {} turns.", coup.turn()),
    }

    if let Some(path) = &args.history_json {
        std::fs::write(path, coup.history().to_json()?).with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.history_csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        coup.history().write_csv(file)?;
    }

    Ok(())
}
