//! Random `public_id` generator.

use rand::Rng;

use userauths_core::config::PublicIdSettings;
use userauths_core::profile::{PublicId, PublicIdGenerator};
use userauths_core::Result;

/// Draws fixed-length ids uniformly from the configured alphabet.
///
/// With the default eleven-letter alphabet and ten characters this is a
/// base-11 number with roughly 2.6e10 possible values; collisions are left
/// to the repository's retry loop.
#[derive(Debug, Clone)]
pub struct RandomPublicIdGenerator {
    symbols: Vec<char>,
    length: usize,
}

impl RandomPublicIdGenerator {
    pub fn new(settings: &PublicIdSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            symbols: settings.symbols(),
            length: settings.length,
        })
    }
}

impl PublicIdGenerator for RandomPublicIdGenerator {
    fn generate(&self) -> PublicId {
        let mut rng = rand::thread_rng();
        let value: String = (0..self.length)
            .map(|_| self.symbols[rng.gen_range(0..self.symbols.len())])
            .collect();
        PublicId::from_trusted(value)
    }
}
