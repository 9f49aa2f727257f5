use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::cards::{Card, Suit};
use crate::hand_evaluator::{HandRank, ALL_HAND_RANKS, NUM_RANKS};
use crate::paytable::Paytable;
use crate::simulation::PlaythroughSummary;
use crate::solver::StrategyReport;
use crate::validation::{theoretical_share, ValidationReport, PRE_DRAW_FREQUENCIES, TOTAL_HANDS};

fn colored_card(card: &Card) -> String {
    let text = card.pretty();
    match card.suit {
        Suit::Spades => text.white().to_string(),
        Suit::Hearts => text.red().to_string(),
        Suit::Diamonds => text.blue().to_string(),
        Suit::Clubs => text.green().to_string(),
    }
}

pub fn hand_display(cards: &[Card]) -> String {
    cards.iter().map(colored_card).collect::<Vec<_>>().join(" ")
}

/// Held cards in colour, discarded ones dimmed.
pub fn held_display(cards: &[Card], hold: &[bool]) -> String {
    cards
        .iter()
        .zip(hold)
        .map(|(card, &held)| {
            if held {
                colored_card(card).bold().to_string()
            } else {
                card.pretty().dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Position numbers under a hand, 1-based.
pub fn position_labels(len: usize) -> String {
    (1..=len)
        .map(|i| format!("{:<2}", i))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn styled_rank(rank: HandRank) -> String {
    let name = rank.to_string();
    match rank {
        HandRank::RoyalFlush | HandRank::StraightFlush | HandRank::FourOfAKind => {
            name.magenta().bold().to_string()
        }
        HandRank::FullHouse | HandRank::Flush | HandRank::Straight => name.green().bold().to_string(),
        HandRank::ThreeOfAKind | HandRank::TwoPair | HandRank::JacksOrBetter => {
            name.yellow().bold().to_string()
        }
        HandRank::Nothing => name.dimmed().to_string(),
    }
}

pub fn share_bar(share: f64, width: usize) -> String {
    let filled = ((share.clamp(0.0, 1.0)) * width as f64) as usize;
    "\u{2588}".repeat(filled) + &"\u{2591}".repeat(width - filled)
}

pub fn paytable_table(paytable: &Paytable) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("Hand")];
    for bet in 1..=paytable.max_bet {
        header.push(Cell::new(format!("{} coin", bet)).set_alignment(CellAlignment::Right));
    }
    table.set_header(header);

    for &rank in ALL_HAND_RANKS.iter().rev().filter(|&&r| r != HandRank::Nothing) {
        let mut row = vec![Cell::new(styled_rank(rank))];
        for bet in 1..=paytable.max_bet {
            row.push(Cell::new(paytable.payout(rank, bet)).set_alignment(CellAlignment::Right));
        }
        table.add_row(row);
    }

    format!("  {}\n{}", paytable.name.bold(), table)
}

pub fn strategy_table(report: &StrategyReport, top: usize) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#"),
        Cell::new("Hold"),
        Cell::new("EV").set_alignment(CellAlignment::Right),
        Cell::new("Samples").set_alignment(CellAlignment::Right),
    ]);

    for (i, choice) in report.ranked().into_iter().take(top).enumerate() {
        let hold = if choice.held.is_empty() {
            "discard all".dimmed().to_string()
        } else {
            hand_display(&choice.held)
        };
        let ev = format!("{:.4}", choice.expected_value);
        let ev = if choice.mask as usize == report.best {
            ev.green().bold().to_string()
        } else if choice.expected_value >= 1.0 {
            ev.yellow().to_string()
        } else {
            ev
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(hold),
            Cell::new(ev).set_alignment(CellAlignment::Right),
            Cell::new(choice.samples).set_alignment(CellAlignment::Right),
        ]);
    }

    table.to_string()
}

pub fn validation_table(report: &ValidationReport) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Hand"),
        Cell::new("Observed").set_alignment(CellAlignment::Right),
        Cell::new("Expected").set_alignment(CellAlignment::Right),
        Cell::new("Share").set_alignment(CellAlignment::Right),
        Cell::new("Theory").set_alignment(CellAlignment::Right),
        Cell::new("Deviation").set_alignment(CellAlignment::Right),
    ]);

    let observed_share = report.observed_share();
    let theory = theoretical_share();
    for i in (0..NUM_RANKS).rev() {
        table.add_row(vec![
            Cell::new(styled_rank(ALL_HAND_RANKS[i])),
            Cell::new(report.observed[i]).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", report.expected[i])).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.6}%", observed_share[i] * 100.0)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.6}%", theory[i] * 100.0)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.3}", report.chi_square.per_rank[i])).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold().to_string()),
        Cell::new(report.iterations).set_alignment(CellAlignment::Right),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(format!("{:.3}", report.chi_square.total).bold().to_string())
            .set_alignment(CellAlignment::Right),
    ]);

    table.to_string()
}

pub fn frequencies_table(counts: &[u64; NUM_RANKS]) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Hand"),
        Cell::new("Combinations").set_alignment(CellAlignment::Right),
        Cell::new("Known").set_alignment(CellAlignment::Right),
        Cell::new(""),
    ]);

    for i in (0..NUM_RANKS).rev() {
        let status = if counts[i] == PRE_DRAW_FREQUENCIES[i] {
            "\u{2713}".green().to_string()
        } else {
            "\u{2717}".red().to_string()
        };
        table.add_row(vec![
            Cell::new(styled_rank(ALL_HAND_RANKS[i])),
            Cell::new(counts[i]).set_alignment(CellAlignment::Right),
            Cell::new(PRE_DRAW_FREQUENCIES[i]).set_alignment(CellAlignment::Right),
            Cell::new(status),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold().to_string()),
        Cell::new(counts.iter().sum::<u64>()).set_alignment(CellAlignment::Right),
        Cell::new(TOTAL_HANDS).set_alignment(CellAlignment::Right),
        Cell::new(""),
    ]);

    table.to_string()
}

pub fn playthrough_table(summary: &PlaythroughSummary) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Dealt"),
        Cell::new("Optimal hold"),
        Cell::new("EV").set_alignment(CellAlignment::Right),
        Cell::new("Running").set_alignment(CellAlignment::Right),
    ]);

    let mut running = 0.0;
    for play in &summary.hands {
        running += play.choice.expected_value - 1.0;
        let running_str = if running >= 0.0 {
            format!("{:+.2}", running).green().to_string()
        } else {
            format!("{:+.2}", running).red().to_string()
        };
        table.add_row(vec![
            Cell::new(hand_display(&play.dealt)),
            Cell::new(held_display(&play.dealt, &play.choice.hold_flags())),
            Cell::new(format!("{:.2}", play.choice.expected_value)).set_alignment(CellAlignment::Right),
            Cell::new(running_str).set_alignment(CellAlignment::Right),
        ]);
    }

    table.to_string()
}

pub fn print_section(title: &str, content: &str) {
    println!("\n{}", title.cyan().bold());
    println!("  {}", content);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_bar_width() {
        assert_eq!(share_bar(0.5, 10).chars().count(), 10);
        assert_eq!(share_bar(2.0, 4), "\u{2588}".repeat(4));
    }

    #[test]
    fn position_labels_numbered() {
        assert_eq!(position_labels(3), "1  2  3 ");
    }
}
