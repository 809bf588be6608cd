use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GameKind {
    Snake,
    Arkanoid,
    Dino,
}

/// Command-line options. There is no config file and nothing is persisted.
#[derive(Debug, Parser)]
#[command(name = "eggcade", version, about = "Snake, Arkanoid and Dino Run in the terminal")]
pub struct Config {
    /// Seed every game's RNG for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Terminal event poll interval in milliseconds.
    #[arg(long, default_value_t = 16)]
    pub poll_ms: u64,

    /// Open a game directly instead of the home screen.
    #[arg(long, value_enum)]
    pub game: Option<GameKind>,

    /// Write logs to this file (the terminal is busy with the UI).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// RNG for the `n`th session opened in this process.
    pub fn rng(&self, n: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(n)),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn defaults() {
        let c = Config::parse_from(["eggcade"]);
        assert_eq!(c.poll_ms, 16);
        assert!(c.seed.is_none());
        assert!(c.game.is_none());
        assert!(c.log_file.is_none());
    }

    #[test]
    fn parses_game_and_seed() {
        let c = Config::parse_from(["eggcade", "--game", "arkanoid", "--seed", "9", "--poll-ms", "5"]);
        assert_eq!(c.game, Some(GameKind::Arkanoid));
        assert_eq!(c.seed, Some(9));
        assert_eq!(c.poll_ms, 5);
    }

    #[test]
    fn seeded_rngs_repeat() {
        let c = Config::parse_from(["eggcade", "--seed", "9"]);
        let a: u64 = c.rng(2).gen();
        let b: u64 = c.rng(2).gen();
        assert_eq!(a, b);
    }
}
