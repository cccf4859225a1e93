// Market structure analysis core
pub mod analysis;

// Market-wide scanning
pub mod scanner;
