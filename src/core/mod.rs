mod engine;
mod types;

pub use engine::{project, project_with_table};
pub use types::{
    AgeTracking, DEFAULT_GROWTH_RATE, GrowthTable, Industry, ProjectionInput, ProjectionResult,
    YearSnapshot,
};
