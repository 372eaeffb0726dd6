pub mod generate_analysis;

pub use generate_analysis::GenerateAnalysisUseCase;
