pub mod assembler;
pub mod types;

pub use assembler::ChartCalculator;
pub use types::{ChartCore, ChartResult, HouseData, TimedChart, UntimedChart};
