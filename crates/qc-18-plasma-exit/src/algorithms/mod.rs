//! # Algorithms Module
//!
//! Dispute window calculation and congestion evidence.

pub mod challenge_period;
pub mod congestion;

pub use challenge_period::ChallengePeriodPolicy;
pub use congestion::{count_congestion_evidence, invariant_congestion_evidence};
