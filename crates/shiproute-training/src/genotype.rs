use rand::Rng;
use serde::{Deserialize, Serialize};
use shiproute_grid::MoveDirective;

/// Fixed-length sequence of moves encoding one candidate route.
///
/// Genotypes are plain values: operators never modify a parent in place, they work on
/// clones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genotype {
    genes: Vec<MoveDirective>,
}

impl Genotype {
    /// Default number of moves in a genotype.
    pub const DEFAULT_LENGTH: usize = 100;

    #[must_use]
    pub fn from_genes(genes: Vec<MoveDirective>) -> Self {
        Self { genes }
    }

    /// Creates a genotype of `len` moves drawn uniformly from the four directions.
    pub fn random<R>(rng: &mut R, len: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        let genes = (0..len).map(|_| rng.random()).collect();
        Self { genes }
    }

    #[must_use]
    pub fn genes(&self) -> &[MoveDirective] {
        &self.genes
    }

    pub(crate) fn genes_mut(&mut self) -> &mut [MoveDirective] {
        &mut self.genes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

impl FromIterator<MoveDirective> for Genotype {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = MoveDirective>,
    {
        Self {
            genes: iter.into_iter().collect(),
        }
    }
}
