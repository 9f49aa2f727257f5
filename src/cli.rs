use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cards::{parse_hand, Card, Deck};
use crate::config::GameConfig;
use crate::display::{
    frequencies_table, hand_display, held_display, paytable_table, playthrough_table, print_error,
    print_section, share_bar, strategy_table, styled_rank, validation_table,
};
use crate::error::PokerResult;
use crate::hand_evaluator::{rank_hand, ALL_HAND_RANKS, HAND_SIZE};
use crate::paytable::Paytable;
use crate::play::{parse_hold, play_command};
use crate::session::Session;
use crate::simulation::run_playthroughs;
use crate::solver::{evaluate_hold, mask_from_flags, optimal_strategy, SolverConfig};
use crate::validation::{exact_frequencies, theoretical_share, validate, DEFAULT_ITERATIONS};

#[derive(Parser)]
#[command(name = "vpoker", version = "1.0.0", about = "Five-card draw video poker \u{2014} play, solve holds, and check the odds.")]
struct Cli {
    /// JSON config file (bankroll, decks, seed, paytable, solver sample sizes)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive session
    Play {
        /// Starting credits
        #[arg(long)]
        bankroll: Option<u64>,
        /// Number of 52-card packs in the shoe
        #[arg(long)]
        decks: Option<usize>,
        /// Paytable name (see `vpoker paytable`)
        #[arg(long)]
        paytable: Option<String>,
        /// Seed for the deck
        #[arg(long)]
        seed: Option<u64>,
        /// Use the full sample budget for hints instead of the quick one
        #[arg(long)]
        full_hints: bool,
    },
    /// Classify a five-card hand
    Rank {
        /// Five cards (e.g., "As Ks Qs Js Ts")
        hand: String,
    },
    /// Find the expected-value-maximising hold for a dealt hand
    Solve {
        /// Five cards (e.g., "Jh Jd 4s 7c 9h")
        hand: String,
        /// Evaluate only this hold, by position (e.g., "1 2")
        #[arg(long)]
        hold: Option<String>,
        /// Use the quick sample budget
        #[arg(short, long)]
        quick: bool,
        /// Seed for reproducible estimates
        #[arg(long)]
        seed: Option<u64>,
        /// Number of holds to list
        #[arg(short, long, default_value = "10")]
        top: usize,
    },
    /// Compare sampled hand frequencies with theory (chi-square)
    Validate {
        /// Number of hands to sample
        #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: usize,
        /// Seed for reproducible sampling
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Enumerate all 2,598,960 hands and count each rank
    Frequencies,
    /// Deal hands, solve each, and accumulate expected winnings
    Simulate {
        /// Number of hands to play
        #[arg(short, long, default_value = "7")]
        plays: usize,
        /// Use the quick sample budget
        #[arg(short, long)]
        quick: bool,
        /// Seed for the deck and solver
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show a paytable, or list the available ones
    Paytable {
        /// Paytable name
        name: Option<String>,
    },
}

pub fn run() {
    let cli = Cli::parse();
    dispatch(cli);
}

pub fn run_with_args(args: Vec<String>) {
    let cli = Cli::parse_from(args);
    dispatch(cli);
}

fn dispatch(cli: Cli) {
    crate::logging::init(cli.verbose);

    let config = match &cli.config {
        Some(path) => match GameConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                print_error(&format!("{}: {}", path.display(), e));
                return;
            }
        },
        None => GameConfig::default(),
    };

    let result = match cli.command {
        Commands::Play {
            bankroll,
            decks,
            paytable,
            seed,
            full_hints,
        } => {
            let mut config = config;
            if let Some(b) = bankroll {
                config.starting_bankroll = b;
            }
            if let Some(d) = decks {
                config.num_decks = d;
            }
            if let Some(p) = paytable {
                config.paytable = p;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            cmd_play(config, full_hints)
        }
        Commands::Rank { hand } => cmd_rank(&hand),
        Commands::Solve {
            hand,
            hold,
            quick,
            seed,
            top,
        } => cmd_solve(&config, &hand, hold.as_deref(), solver_config(&config, quick, seed), top),
        Commands::Validate { iterations, seed } => cmd_validate(iterations, seed.or(config.seed)),
        Commands::Frequencies => cmd_frequencies(),
        Commands::Simulate { plays, quick, seed } => {
            cmd_simulate(&config, plays, solver_config(&config, quick, seed), seed.or(config.seed))
        }
        Commands::Paytable { name } => cmd_paytable(name.as_deref()),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
    }
}

fn solver_config(config: &GameConfig, quick: bool, seed: Option<u64>) -> SolverConfig {
    let mut solver = if quick {
        SolverConfig::quick()
    } else {
        config.solver.clone()
    };
    solver.seed = seed.or(config.solver.seed);
    solver
}

fn parse_five(hand: &str) -> PokerResult<Vec<Card>> {
    let cards = parse_hand(hand)?;
    rank_hand(&cards)?;
    Ok(cards)
}

fn cmd_play(config: GameConfig, full_hints: bool) -> PokerResult<()> {
    config.validate()?;
    let mut session = Session::with_config(&config)?;
    let hints = if full_hints {
        config.solver.clone()
    } else {
        let mut quick = SolverConfig::quick();
        quick.seed = config.solver.seed;
        quick
    };
    play_command(&mut session, &hints);
    Ok(())
}

fn cmd_rank(hand: &str) -> PokerResult<()> {
    let cards = parse_five(hand)?;
    let rank = rank_hand(&cards)?;
    let paytable = Paytable::default();

    println!();
    println!("  {}  {}", hand_display(&cards), styled_rank(rank));
    println!(
        "  Pays {} per coin ({} at max bet)",
        paytable.multiplier(rank).to_string().bold(),
        paytable.payout(rank, paytable.max_bet)
    );
    println!();
    Ok(())
}

fn cmd_solve(
    config: &GameConfig,
    hand: &str,
    hold: Option<&str>,
    solver: SolverConfig,
    top: usize,
) -> PokerResult<()> {
    let cards = parse_five(hand)?;
    let paytable = config.paytable()?;
    let deck = Deck::without(config.num_decks, &cards, config.seed)?;

    println!();
    println!("  {}  {}", "Dealt:".bold(), hand_display(&cards));
    println!("  {}  {}", "Rank:".bold(), styled_rank(rank_hand(&cards)?));

    if let Some(hold) = hold {
        let flags = parse_hold(hold).ok_or_else(|| {
            crate::error::PokerError::InvalidValue(format!("bad hold positions: {}", hold))
        })?;
        let mask = mask_from_flags(&flags)?;
        let five: [Card; HAND_SIZE] = [cards[0], cards[1], cards[2], cards[3], cards[4]];
        let k = flags.iter().filter(|&&h| h).count();
        let mut rng = match solver.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let choice = evaluate_hold(&five, mask, &deck, &paytable, solver.sample_sizes[k], &mut rng)?;
        print_section(
            "Hold",
            &format!(
                "{}  EV {:.4} over {} samples",
                held_display(&cards, &flags),
                choice.expected_value,
                choice.samples
            ),
        );
        println!();
        return Ok(());
    }

    let start = Instant::now();
    let report = optimal_strategy(&cards, &deck, &paytable, &solver)?;
    let best = report.best();

    print_section(
        "Optimal hold",
        &format!(
            "{}  EV {}",
            held_display(&cards, &best.hold_flags()),
            format!("{:.4}", best.expected_value).green().bold()
        ),
    );
    println!("\n{}", strategy_table(&report, top));
    println!(
        "  {}",
        format!("Solved in {:.2}s", start.elapsed().as_secs_f64()).dimmed()
    );
    println!();
    Ok(())
}

fn cmd_validate(iterations: usize, seed: Option<u64>) -> PokerResult<()> {
    // Theory covers a single pack, whatever the session shoe size.
    let deck = Deck::new(1)?;
    let start = Instant::now();
    let report = validate(&deck, iterations, seed)?;

    print_section("Hand distribution", &format!("{} hands sampled", iterations));
    let shares = report.observed_share();
    let theory = theoretical_share();
    for &rank in ALL_HAND_RANKS.iter().rev() {
        let i = rank.index();
        println!(
            "  {:>17}: {:>10.6} %  {}",
            rank.to_string(),
            shares[i] * 100.0,
            share_bar(shares[i] / theory[0], 30).dimmed()
        );
    }

    print_section("Chi-square test", "");
    println!("{}", validation_table(&report));
    println!(
        "  {}",
        format!("Sampled in {:.2}s", start.elapsed().as_secs_f64()).dimmed()
    );
    println!();
    Ok(())
}

fn cmd_frequencies() -> PokerResult<()> {
    let start = Instant::now();
    let counts = exact_frequencies();
    print_section("Exact pre-draw frequencies", "single 52-card pack");
    println!("{}", frequencies_table(&counts));
    println!(
        "  {}",
        format!("Enumerated in {:.2}s", start.elapsed().as_secs_f64()).dimmed()
    );
    println!();
    Ok(())
}

fn cmd_simulate(config: &GameConfig, plays: usize, solver: SolverConfig, seed: Option<u64>) -> PokerResult<()> {
    let paytable = config.paytable()?;
    let mut deck = match seed {
        Some(s) => Deck::with_seed(config.num_decks, s)?,
        None => Deck::new(config.num_decks)?,
    };

    let start = Instant::now();
    let summary = run_playthroughs(&mut deck, plays, &paytable, &solver)?;

    print_section("Playthrough", &format!("{} hands, {}", plays, paytable.name));
    println!("{}", playthrough_table(&summary));
    println!(
        "  Expected return {:.2}%  winnings {:+.2} coins",
        summary.return_rate() * 100.0,
        summary.winnings
    );
    println!(
        "  {}",
        format!("Simulated in {:.2}s", start.elapsed().as_secs_f64()).dimmed()
    );
    println!();
    Ok(())
}

fn cmd_paytable(name: Option<&str>) -> PokerResult<()> {
    match name {
        Some(n) => {
            let paytable = Paytable::named(n)?;
            println!("\n{}\n", paytable_table(&paytable));
        }
        None => {
            print_section("Paytables", "");
            for name in Paytable::available() {
                println!("  {}", name);
            }
            println!("\n{}\n", paytable_table(&Paytable::default()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solver_config_flags() {
        let config = GameConfig::default();
        let quick = solver_config(&config, true, Some(3));
        assert_eq!(quick.sample_sizes, SolverConfig::quick().sample_sizes);
        assert_eq!(quick.seed, Some(3));

        let full = solver_config(&config, false, None);
        assert_eq!(full, SolverConfig::default());
    }

    #[test]
    fn parse_five_requires_five_cards() {
        assert!(parse_five("As Ks Qs").is_err());
        assert!(parse_five("As Ks Qs Js Ts").is_ok());
    }

    #[test]
    fn run_with_args_paytable() {
        run_with_args(vec!["vpoker".to_string(), "paytable".to_string()]);
    }

    #[test]
    fn solve_single_hold_bitstring() {
        let cli = Cli::parse_from(["vpoker", "solve", "As Ks Qs Js Ts", "--hold", "11111", "--seed", "2"]);
        let Commands::Solve { hold, .. } = &cli.command else {
            panic!("expected solve");
        };
        assert_eq!(hold.as_deref(), Some("11111"));

        let config = GameConfig::default();
        let solver = solver_config(&config, true, Some(2));
        assert!(cmd_solve(&config, "As Ks Qs Js Ts", Some("11111"), solver.clone(), 5).is_ok());
        assert!(cmd_solve(&config, "As Ks Qs Js Ts", Some("10110"), solver.clone(), 5).is_ok());
        assert!(cmd_solve(&config, "As Ks Qs Js Ts", Some("1 2 4"), solver.clone(), 5).is_ok());
        assert!(cmd_solve(&config, "As Ks Qs Js Ts", Some("9"), solver, 5).is_err());
    }

    #[test]
    fn cli_parses_solve() {
        let cli = Cli::parse_from(["vpoker", "solve", "Jh Jd 4s 7c 9h", "--quick", "--top", "5"]);
        match cli.command {
            Commands::Solve { hand, quick, top, .. } => {
                assert_eq!(hand, "Jh Jd 4s 7c 9h");
                assert!(quick);
                assert_eq!(top, 5);
            }
            _ => panic!("expected solve"),
        }
    }
}
