pub mod benchmarks;
pub mod metrics;
pub mod rankings;
