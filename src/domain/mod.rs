// Candles, indicators, structure and scoring types
pub mod market;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
