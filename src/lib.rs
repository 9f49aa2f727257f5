//! Five-card draw video poker: cards and decks, a hand classifier, a
//! bet/deal/hold/payout session, a Monte Carlo hold solver and a
//! statistical self-test of the ranking code.

pub mod cards;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod hand;
pub mod hand_evaluator;
pub mod logging;
pub mod paytable;
pub mod play;
pub mod session;
pub mod simulation;
pub mod solver;
pub mod validation;
