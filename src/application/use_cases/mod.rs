pub mod analyze;
pub mod compare;
pub mod research_context;
pub mod summarize;
