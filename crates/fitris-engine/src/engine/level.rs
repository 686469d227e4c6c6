use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{Board, BoardPos, CellState, CellTag};

/// Rows at the top of the board kept free of obstacles so a shape can spawn.
pub const SPAWN_CLEARANCE: usize = 5;

/// Difficulty tier deciding which obstacles a level contains.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum LevelTier {
    /// No obstacles.
    #[display("0")]
    Clear,
    /// Static blocks only.
    #[default]
    #[display("1")]
    Static,
    /// Static blocks and explosives, evenly mixed.
    #[display("2")]
    Mixed,
    /// Explosives only.
    #[display("3")]
    Explosive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid level tier {_0}, expected 0 to 3")]
pub struct InvalidLevelTierError(#[error(not(source))] pub u8);

impl TryFrom<u8> for LevelTier {
    type Error = InvalidLevelTierError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Clear),
            1 => Ok(Self::Static),
            2 => Ok(Self::Mixed),
            3 => Ok(Self::Explosive),
            _ => Err(InvalidLevelTierError(value)),
        }
    }
}

impl From<LevelTier> for u8 {
    fn from(tier: LevelTier) -> Self {
        match tier {
            LevelTier::Clear => 0,
            LevelTier::Static => 1,
            LevelTier::Mixed => 2,
            LevelTier::Explosive => 3,
        }
    }
}

/// Seed for deterministic level generation.
///
/// A 128-bit seed, serialized as 32 hexadecimal characters. The same seed
/// always produces the same sequence of levels.
///
/// # Example
///
/// ```
/// use fitris_engine::LevelSeed;
/// use rand::Rng as _;
///
/// let seed: LevelSeed = rand::rng().random();
/// let parsed: LevelSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("{:032x}", u128::from_be_bytes(*_0))]
pub struct LevelSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid level seed {input:?}: expected 32 hexadecimal characters")]
pub struct ParseLevelSeedError {
    #[error(not(source))]
    input: String,
}

impl std::str::FromStr for LevelSeed {
    type Err = ParseLevelSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseLevelSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for LevelSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LevelSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `LevelSeed` values with `rng.random()`.
impl Distribution<LevelSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> LevelSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        LevelSeed(seed)
    }
}

/// Scatters obstacles over a board according to a [`LevelTier`].
#[derive(Debug, Clone)]
pub struct LevelGenerator {
    rng: Pcg32,
}

impl Default for LevelGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelGenerator {
    /// Creates a generator with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but deterministic.
    #[must_use]
    pub fn with_seed(seed: LevelSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Writes `obstacle_count` obstacles tagged [`CellTag::Always`] onto `board`.
    ///
    /// Positions are drawn uniformly from the columns and from every row
    /// except the top [`SPAWN_CLEARANCE`] rows. Repeated positions overwrite
    /// each other, so fewer distinct cells may end up occupied.
    pub fn generate(&mut self, board: &mut Board, obstacle_count: usize, tier: LevelTier) {
        if tier == LevelTier::Clear || obstacle_count == 0 {
            return;
        }
        let rows = board.height().saturating_sub(SPAWN_CLEARANCE);
        if rows == 0 || board.width() == 0 {
            tracing::warn!(
                width = board.width(),
                height = board.height(),
                "board too small for level obstacles"
            );
            return;
        }

        for _ in 0..obstacle_count {
            let x = self.rng.random_range(0..board.width());
            let y = self.rng.random_range(0..rows);
            let state = self.roll_state(tier);
            let pos = BoardPos::new(
                i32::try_from(x).unwrap_or(i32::MAX),
                i32::try_from(y).unwrap_or(i32::MAX),
            );
            board.set_state(pos, state, CellTag::Always);
        }
        tracing::info!(%tier, obstacle_count, "level generated");
    }

    fn roll_state(&mut self, tier: LevelTier) -> CellState {
        match tier {
            LevelTier::Clear => unreachable!("clear levels have no obstacles to roll"),
            LevelTier::Static => CellState::Static,
            LevelTier::Mixed if self.rng.random_bool(0.5) => CellState::Static,
            LevelTier::Mixed | LevelTier::Explosive => CellState::Explosive,
        }
    }
}
