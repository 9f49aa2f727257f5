use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::display::{hand_display, held_display, position_labels, styled_rank};
use crate::error::PokerError;
use crate::hand_evaluator::HAND_SIZE;
use crate::session::Session;
use crate::solver::{optimal_strategy, SolverConfig};

// ---------------------------------------------------------------------------
// Input helpers
// ---------------------------------------------------------------------------

fn prompt(message: &str, default: Option<&str>, reader: &mut dyn BufRead, writer: &mut dyn Write) -> String {
    if let Some(d) = default {
        write!(writer, "{} [{}]: ", message, d).ok();
    } else {
        write!(writer, "{}: ", message).ok();
    }
    writer.flush().ok();

    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => "q".to_string(),
        Ok(_) => {
            let trimmed = line.trim().to_string();
            if trimmed.is_empty() {
                default.unwrap_or("").to_string()
            } else {
                trimmed
            }
        }
        Err(_) => "q".to_string(),
    }
}

/// Parses `1 3 5`, `135`, `1,3,5`, `all` or `none` into hold flags. A
/// five-character string of `0`/`1` such as `10110` is read as one flag per
/// position instead.
pub fn parse_hold(text: &str) -> Option<[bool; HAND_SIZE]> {
    let text = text.trim().to_lowercase();
    match text.as_str() {
        "all" => return Some([true; HAND_SIZE]),
        "" | "none" => return Some([false; HAND_SIZE]),
        _ => {}
    }
    if text.len() == HAND_SIZE && text.chars().all(|c| matches!(c, '0' | '1')) {
        let bits: Vec<char> = text.chars().collect();
        return Some(std::array::from_fn(|i| bits[i] == '1'));
    }
    let mut flags = [false; HAND_SIZE];
    for c in text.chars().filter(|c| !matches!(c, ' ' | ',')) {
        let pos = c.to_digit(10)? as usize;
        if pos == 0 || pos > HAND_SIZE {
            return None;
        }
        flags[pos - 1] = true;
    }
    Some(flags)
}

fn hold_positions(flags: &[bool]) -> String {
    let held: Vec<String> = flags
        .iter()
        .enumerate()
        .filter(|&(_, &h)| h)
        .map(|(i, _)| (i + 1).to_string())
        .collect();
    if held.is_empty() {
        "none".to_string()
    } else {
        held.join(" ")
    }
}

// ---------------------------------------------------------------------------
// Interactive session
// ---------------------------------------------------------------------------

struct QuitSession;

pub fn play_command(session: &mut Session, solver: &SolverConfig) {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut reader = stdin.lock();
    let mut writer = stdout.lock();
    run_interactive_session(session, solver, &mut reader, &mut writer);
}

pub fn run_interactive_session(
    session: &mut Session,
    solver: &SolverConfig,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) {
    writeln!(writer).ok();
    writeln!(writer, "{}", "Video Poker \u{2014} Jacks or Better".cyan().bold()).ok();
    writeln!(
        writer,
        "Type {} at any prompt to quit, {} at the hold prompt for the solver's pick.\n",
        "'q'".bold(),
        "'hint'".bold()
    )
    .ok();

    loop {
        if session.bankroll() == 0 {
            writeln!(writer, "  {}", "Out of credits.".red().bold()).ok();
            break;
        }
        if play_one_hand(session, solver, reader, writer).is_err() {
            break;
        }
    }

    let net = session.net_gain();
    let net_str = if net >= 0 {
        format!("{:+}", net).green().bold().to_string()
    } else {
        format!("{:+}", net).red().bold().to_string()
    };
    writeln!(
        writer,
        "\n  Final bankroll {}  (net {})\n",
        session.bankroll().to_string().bold(),
        net_str
    )
    .ok();
}

fn play_one_hand(
    session: &mut Session,
    solver: &SolverConfig,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<(), QuitSession> {
    let max_bet = session.paytable().max_bet;
    writeln!(writer, "\n  Bankroll: {}", session.bankroll().to_string().bold()).ok();

    // -- Bet and deal --
    loop {
        let answer = prompt(&format!("  Bet (1-{})", max_bet), Some(&max_bet.to_string()), reader, writer);
        if answer.eq_ignore_ascii_case("q") {
            return Err(QuitSession);
        }
        let bet = match answer.parse::<u64>() {
            Ok(b) => b,
            Err(_) => {
                writeln!(writer, "  {}", "Enter a whole number of coins.".yellow()).ok();
                continue;
            }
        };
        match session.place_bet(bet) {
            Ok(_) => break,
            Err(e @ PokerError::InsufficientFunds { .. }) | Err(e @ PokerError::InvalidBet { .. }) => {
                writeln!(writer, "  {}", e.to_string().yellow()).ok();
            }
            Err(e) => {
                writeln!(writer, "  {}", e.to_string().red()).ok();
                return Err(QuitSession);
            }
        }
    }

    writeln!(writer, "\n  {}", hand_display(session.cards_in_hand())).ok();
    writeln!(writer, "  {}", position_labels(HAND_SIZE).dimmed()).ok();
    writeln!(writer, "  {}", styled_rank(session.current_hand_rank())).ok();

    // -- Hold and redraw --
    let flags = loop {
        let answer = prompt("  Hold (e.g. 1 3 5, all, none, hint)", Some("none"), reader, writer);
        match answer.to_lowercase().as_str() {
            "q" => return Err(QuitSession),
            "hint" | "h" => {
                match optimal_strategy(session.cards_in_hand(), session.deck(), session.paytable(), solver) {
                    Ok(report) => {
                        let best = report.best();
                        writeln!(
                            writer,
                            "  Solver: hold {}  ({})  EV {:.3}",
                            hold_positions(&best.hold_flags()).bold(),
                            held_display(session.cards_in_hand(), &best.hold_flags()),
                            best.expected_value
                        )
                        .ok();
                    }
                    Err(e) => {
                        writeln!(writer, "  {}", e.to_string().red()).ok();
                    }
                }
                continue;
            }
            other => match parse_hold(other) {
                Some(flags) => break flags,
                None => {
                    writeln!(writer, "  {}", "Use positions 1-5, 'all' or 'none'.".yellow()).ok();
                }
            },
        }
    };

    let rank = match session.apply_hold(&flags) {
        Ok(rank) => rank,
        Err(e) => {
            writeln!(writer, "  {}", e.to_string().red()).ok();
            return Err(QuitSession);
        }
    };
    writeln!(writer, "\n  {}", hand_display(session.cards_in_hand())).ok();
    writeln!(writer, "  {}", styled_rank(rank)).ok();

    // -- Payout --
    match session.settle_payout() {
        Ok(0) => {
            writeln!(writer, "  {}", "No win.".dimmed()).ok();
        }
        Ok(won) => {
            writeln!(writer, "  {} {}", "WIN".green().bold(), won.to_string().green().bold()).ok();
        }
        Err(e) => {
            writeln!(writer, "  {}", e.to_string().red()).ok();
            return Err(QuitSession);
        }
    }
    Ok(())
}
