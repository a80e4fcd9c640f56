//! Pure business-calculation rules for EcoSim.
//!
//! This crate contains the calculation schemes, progression rules and seed
//! data that are independent of any lobby state, storage, or runtime.
//! Functions take plain data and return results. Nothing here performs I/O
//! or draws random numbers, so every function is deterministic and
//! unit-testable.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | Seed message templates, products and suppliers |
//! | [`contribution`] | Contribution margin and break-even point |
//! | [`difference`] | Solving for the unknown markup between fixed buy and sell prices |
//! | [`experience`] | XP curve, XP rewards, player statistics and badges |
//! | [`grading`] | Checking student step values against computed schemes |
//! | [`modules`] | Per-lobby learning-area switches |
//! | [`money`] | Percentage identities, rounding, German formatting |
//! | [`pin`] | Lobby PIN alphabet, validation and display |
//! | [`procurement`] | Landed cost from list price (Bezugskalkulation) |
//! | [`rankings`] | Company leaderboards |
//! | [`scenarios`] | Contract disturbance and market event templates |
//! | [`trade_pricing`] | Forward and reverse trade pricing (Handelskalkulation) |

pub mod catalog;
pub mod contribution;
pub mod difference;
pub mod experience;
pub mod grading;
pub mod modules;
pub mod money;
pub mod pin;
pub mod procurement;
pub mod rankings;
pub mod scenarios;
pub mod trade_pricing;
