use std::error::Error;
use std::fmt;

use crate::GameError;

/// Severity buckets used when the process dies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalTier {
    /// A game error: asset, render, lifecycle or config failure.
    Runtime,
    /// Any other error type.
    Std,
    /// A panic or something that is not an error value at all.
    Unknown,
}

/// Title and message shown for a fatal failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalReport {
    pub tier: FatalTier,
    pub title: &'static str,
    pub message: String,
}

impl FatalReport {
    /// Log the report and write it to stderr.
    pub fn emit(&self) {
        tracing::error!(tier = ?self.tier, title = self.title, "{}", self.message);
        eprintln!("{self}");
    }
}

impl fmt::Display for FatalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Pick the tier of `error` by looking for a [`GameError`] anywhere in its
/// source chain.
pub fn classify(error: &(dyn Error + 'static)) -> FatalReport {
    let mut current = Some(error);
    while let Some(err) = current {
        if let Some(game) = err.downcast_ref::<GameError>() {
            return FatalReport {
                tier: FatalTier::Runtime,
                title: "Stronghold Royale: FATAL",
                message: game.to_string(),
            };
        }
        current = err.source();
    }
    tracing::debug!(%error, "non-game error escaped the loop");
    FatalReport {
        tier: FatalTier::Std,
        title: "Stronghold Royale: std::FATAL",
        message: "Unknown std error.".to_string(),
    }
}

pub fn panic_report() -> FatalReport {
    FatalReport {
        tier: FatalTier::Unknown,
        title: "Stronghold Royale: unknown FATAL",
        message: "Unknown error. For details look into the log.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stronghold_render::RenderError;

    #[derive(Debug)]
    struct Startup(GameError);

    impl fmt::Display for Startup {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("startup failed")
        }
    }

    impl Error for Startup {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn game_error_is_runtime_tier() {
        let report = classify(&GameError::NotReady);
        assert_eq!(report.tier, FatalTier::Runtime);
        assert_eq!(report.title, "Stronghold Royale: FATAL");
        assert_eq!(report.message, "game state ticked before on_create");
    }

    #[test]
    fn game_error_deeper_in_the_chain_is_found() {
        let err = Startup(GameError::Render(RenderError::NoAdapter));
        let report = classify(&err);
        assert_eq!(report.tier, FatalTier::Runtime);
        assert_eq!(report.message, RenderError::NoAdapter.to_string());
    }

    #[test]
    fn foreign_error_is_std_tier() {
        let err = std::io::Error::other("disk on fire");
        let report = classify(&err);
        assert_eq!(report.tier, FatalTier::Std);
        assert_eq!(report.message, "Unknown std error.");
    }

    #[test]
    fn panic_is_unknown_tier() {
        let report = panic_report();
        assert_eq!(report.tier, FatalTier::Unknown);
        assert_eq!(
            report.to_string(),
            "Stronghold Royale: unknown FATAL: Unknown error. For details look into the log."
        );
    }
}
