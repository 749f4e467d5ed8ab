//! Use-case cores: the database-independent part of each workload family.
//!
//! A core owns the simulation interval, the fleet size and the random source of one generator,
//! and knows how to sample the tags and windows its queries filter on.

use std::collections::HashSet;
use std::fmt;

use rand::RngCore;

use crate::error::{Error, Result};
use crate::go_rand::GoRngExt;

pub mod devops;
pub mod iot;

/// The workload family a query belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum UseCase {
    Devops,
    Iot,
}

impl UseCase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Devops => "devops",
            Self::Iot => "iot",
        }
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Draw `n` distinct tag names `<kind>_<k>`, `k` in `0..scale`, keeping draw order.
pub(crate) fn random_tags<R>(
    rng: &mut R,
    kind: &'static str,
    n: usize,
    scale: usize,
) -> Result<Vec<String>>
where
    R: RngCore + ?Sized,
{
    if n < 1 {
        return Err(Error::TooFewTags { kind, requested: n });
    }
    if n > scale {
        return Err(Error::TooManyTags {
            kind,
            requested: n,
            scale,
        });
    }

    Ok(random_subset(rng, n, scale)
        .into_iter()
        .map(|k| format!("{kind}_{k}"))
        .collect())
}

/// `n` distinct indices from `0..total`, in the order they were drawn.
fn random_subset<R>(rng: &mut R, n: usize, total: usize) -> Vec<usize>
where
    R: RngCore + ?Sized,
{
    let mut seen = HashSet::with_capacity(n);
    let mut picked = Vec::with_capacity(n);
    while picked.len() < n {
        let k = rng.intn(total);
        if seen.insert(k) {
            picked.push(k);
        }
    }
    picked
}
