/// How much the solver logs. Each level maps to the most detailed
/// [`tracing::Level`] that is still printed.
#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors only
    Silent,
    /// Search start, finish and periodic statistics
    #[default]
    Normal,
    /// Every expansion
    Verbose,
    /// Frontier decisions as well
    Debug,
}

impl From<Verbosity> for tracing::Level {
    fn from(value: Verbosity) -> Self {
        match value {
            Verbosity::Silent => tracing::Level::ERROR,
            Verbosity::Normal => tracing::Level::INFO,
            Verbosity::Verbose => tracing::Level::DEBUG,
            Verbosity::Debug => tracing::Level::TRACE,
        }
    }
}
