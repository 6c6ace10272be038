/// Day/hour iteration over a simulated year.
pub mod clock;
pub mod engine;
/// Grid ledger with tariff selection by hour.
pub mod grid;
pub mod projection;
pub mod report;
pub mod types;

pub use engine::Engine;
pub use projection::{YearParameters, run_projection};
