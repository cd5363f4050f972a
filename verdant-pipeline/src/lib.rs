pub mod pipeline;
pub mod record;
pub mod roadnet;

pub use pipeline::Pipeline;
pub use record::ScoreRecord;

/// Installs a fmt subscriber so `log` records from the pipeline show up.
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt().try_init();
}
