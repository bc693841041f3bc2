pub mod setting;
pub mod weight;

pub use setting::{GoalSetting, Setting};
pub use weight::{DateRangeFilter, NewWeightEntry, WeightChanges, WeightEntry};
