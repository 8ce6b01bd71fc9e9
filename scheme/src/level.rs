use rug::Integer;

use crate::{
    error::{Error, Result},
    parameters::Parameters,
};

/// Bit-width at which an operation reduces its output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Width {
    /// Modulus `qi(level)` of the ciphertext's level.
    #[default]
    Level,
    /// Extended modulus `P * qi(level)`: keeps `log_special` extra high bits.
    Extended,
}

/// Modulus chain of a parameter set.
///
/// Levels are numbered from 1 (modulus `q`) to `L`; every level drops
/// `log_p` bits: `logqi(level) = log_q - log_p * (level - 1)`.
/// `qi` and `Pqi` are stored at index `L - level`, so that the chain is
/// increasing with the index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelContext {
    log_q: usize,
    log_p: usize,
    log_special: usize,
    max_level: usize,
    qi: Vec<Integer>,
    pqi: Vec<Integer>,
}

impl LevelContext {
    pub fn new(params: &Parameters) -> Self {
        let max_level: usize = params.max_level();
        let log_q: usize = params.log_q();
        let log_p: usize = params.log_p();
        let log_special: usize = params.log_special();
        let qi: Vec<Integer> = (0..max_level)
            .map(|t| Integer::from(1) << (log_q - log_p * (max_level - 1 - t)) as u32)
            .collect();
        let pqi: Vec<Integer> = qi.iter().map(|q| Integer::from(q << log_special as u32)).collect();
        Self {
            log_q,
            log_p,
            log_special,
            max_level,
            qi,
            pqi,
        }
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// Returns [Error::InvalidLevel] if `level` is not in `[1, L]`.
    pub fn check(&self, level: usize) -> Result<()> {
        if level == 0 || level > self.max_level {
            return Err(Error::InvalidLevel {
                level,
                max: self.max_level,
            });
        }
        Ok(())
    }

    /// Bit-length of `qi(level)`.
    pub fn log_qi(&self, level: usize) -> Result<usize> {
        self.check(level)?;
        Ok(self.log_q - self.log_p * (level - 1))
    }

    /// Bit-length of `P * qi(level)`.
    pub fn log_pqi(&self, level: usize) -> Result<usize> {
        Ok(self.log_qi(level)? + self.log_special)
    }

    pub fn qi(&self, level: usize) -> Result<&Integer> {
        self.check(level)?;
        Ok(&self.qi[self.max_level - level])
    }

    pub fn pqi(&self, level: usize) -> Result<&Integer> {
        self.check(level)?;
        Ok(&self.pqi[self.max_level - level])
    }

    /// Bit-length an operation at `level` reduces to under the policy `width`.
    pub fn bits(&self, level: usize, width: Width) -> Result<usize> {
        match width {
            Width::Level => self.log_qi(level),
            Width::Extended => self.log_pqi(level),
        }
    }

    /// Checks a transition from `from` to `to` and returns the number of
    /// levels it crosses.
    pub fn jump(&self, from: usize, to: usize) -> Result<usize> {
        self.check(from)?;
        if to > self.max_level {
            return Err(Error::LevelExhausted {
                level: to,
                max: self.max_level,
            });
        }
        if to < from {
            return Err(Error::InvalidLevelTransition { from, to });
        }
        Ok(to - from)
    }
}
