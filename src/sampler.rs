//! Seeded sampling of challenge indices without replacement.
//!
//! The reference derivation is SHA-256 over the seed, the digest read as a
//! big-endian integer keying MT19937, then CPython's `random.sample` over
//! `range(n_total)`, sorted. For fixed inputs the result is reproducible by any
//! verifier using the same digest and sampler, including
//! `sorted(random.sample(range(n), k))` after
//! `random.seed(int(sha256(seed).hexdigest(), 16))`.

use crate::core::{SeedHasher, Sha256SeedHasher};
use crate::error::Error;
use crate::mt::Mt19937;
use crate::types::SamplingParams;
use derive_builder::Builder;
use std::collections::HashSet;
use std::sync::Arc;

/// Derive `k` sorted, distinct indices in `[0, n_total)` from `seed`.
pub fn derive_indices(seed: &[u8], n_total: usize, k: usize) -> Result<Vec<usize>, Error> {
    derive_indices_with(&Sha256SeedHasher, seed, SamplingParams::new(n_total, k))
}

/// Same as [`derive_indices`] with an explicit seed digest.
pub fn derive_indices_with(
    hasher: &dyn SeedHasher,
    seed: &[u8],
    params: SamplingParams,
) -> Result<Vec<usize>, Error> {
    if let Err(err) = params.validate() {
        tracing::warn!(n_total = params.n_total, k = params.k, %err, "rejected sampling parameters");
        return Err(err);
    }
    let digest = hasher.digest(seed);
    let mut rng = Mt19937::from_digest(&digest);
    let mut indices = sample_indices(&mut rng, params.n_total, params.k)?;
    indices.sort_unstable();
    tracing::debug!(
        n_total = params.n_total,
        k = params.k,
        digest = %hex::encode(digest),
        "derived challenge indices"
    );
    Ok(indices)
}

/// Draw `k` distinct values from `[0, n_total)` in generation order.
///
/// Small populations are drawn by a partial Fisher-Yates over an explicit
/// pool, large ones by rejection against a set of already selected values.
/// The switch point and the draw order follow CPython's `random.sample`.
/// Fails with [`Error::InvalidParams`] when `n_total == 0` or `k > n_total`.
pub fn sample_indices(
    rng: &mut Mt19937,
    n_total: usize,
    k: usize,
) -> Result<Vec<usize>, Error> {
    SamplingParams::new(n_total, k).validate()?;
    let mut result = Vec::with_capacity(k);
    if n_total <= pool_threshold(k) {
        let mut pool: Vec<usize> = (0..n_total).collect();
        for i in 0..k {
            let j = rng.randbelow((n_total - i) as u64) as usize;
            result.push(pool[j]);
            pool[j] = pool[n_total - i - 1];
        }
    } else {
        let mut selected = HashSet::with_capacity(k);
        for _ in 0..k {
            let mut j = rng.randbelow(n_total as u64) as usize;
            while selected.contains(&j) {
                j = rng.randbelow(n_total as u64) as usize;
            }
            selected.insert(j);
            result.push(j);
        }
    }
    Ok(result)
}

// 21 plus the hash table size a set of k elements would need.
fn pool_threshold(k: usize) -> usize {
    let mut setsize = 21usize;
    if k > 5 {
        let target = k.saturating_mul(3);
        let mut table = 1usize;
        while table < target {
            table = table.saturating_mul(4);
        }
        setsize = setsize.saturating_add(table);
    }
    setsize
}

/// Reusable sampler with fixed parameters and seed digest.
#[derive(Builder, Debug, Clone)]
#[builder(pattern = "owned")]
pub struct DeterministicSampler {
    pub n_total: usize,
    pub k: usize,
    #[builder(default = "Arc::new(Sha256SeedHasher)")]
    pub hasher: Arc<dyn SeedHasher>,
}

impl DeterministicSamplerBuilder {
    /// Build and reject parameters that could never produce a sample.
    pub fn build_validated(self) -> Result<DeterministicSampler, Error> {
        let sampler = self
            .build()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        sampler.params().validate()?;
        Ok(sampler)
    }
}

impl DeterministicSampler {
    pub fn from_params(params: SamplingParams) -> Result<Self, Error> {
        DeterministicSamplerBuilder::default()
            .n_total(params.n_total)
            .k(params.k)
            .build_validated()
    }

    pub fn params(&self) -> SamplingParams {
        SamplingParams::new(self.n_total, self.k)
    }

    /// Derive the sorted challenge indices for `seed`.
    pub fn sample(&self, seed: &[u8]) -> Result<Vec<usize>, Error> {
        derive_indices_with(self.hasher.as_ref(), seed, self.params())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Blake3SeedHasher;
    use proptest::prelude::*;

    const DEMO_INDICES: [usize; 10] = [246, 264, 269, 291, 400, 470, 517, 642, 658, 719];

    #[test]
    fn demo_seed_matches_reference_sample() {
        let indices = derive_indices(b"demo-seed", 1000, 10).unwrap();
        assert_eq!(indices, DEMO_INDICES);
    }

    #[test]
    fn pool_branch_matches_reference_sample() {
        assert_eq!(
            derive_indices(b"abc", 30, 7).unwrap(),
            vec![1, 2, 4, 6, 12, 16, 26]
        );
    }

    #[test]
    fn large_sample_matches_reference() {
        let expected = vec![
            3, 4, 6, 8, 9, 10, 13, 15, 16, 18, 19, 21, 22, 24, 26, 27, 28, 29, 31, 32, 34, 36,
            38, 39, 41, 47, 48, 50, 51, 52, 56, 58, 63, 67, 70, 71, 72, 73, 75, 77, 78, 79, 81,
            83, 86, 87, 88, 94, 95, 98,
        ];
        assert_eq!(derive_indices(b"abc", 100, 50).unwrap(), expected);
    }

    #[test]
    fn nearly_full_sample_omits_one_index() {
        let indices = derive_indices(b"q", 64, 63).unwrap();
        let expected: Vec<usize> = (0..64).filter(|&i| i != 54).collect();
        assert_eq!(indices, expected);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn populations_wider_than_32_bits() {
        assert_eq!(
            derive_indices(b"big", 1 << 40, 5).unwrap(),
            vec![631687214081, 785012578106, 935427005985, 990779494217, 1065122478387]
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn populations_wider_than_32_bits_large_key() {
        assert_eq!(
            derive_indices(b"big", 1 << 62, 8).unwrap(),
            vec![
                139303150266341000,
                911834376776440490,
                2663676165402522625,
                3278680309409077050,
                3923910922800422433,
                4149058085841751881,
                4452309462899702067,
                4581920343781137855,
            ]
        );
    }

    #[test]
    fn zero_sample_is_empty() {
        assert!(derive_indices(b"x", 5, 0).unwrap().is_empty());
    }

    #[test]
    fn full_sample_covers_population() {
        assert_eq!(
            derive_indices(b"demo-seed", 10, 10).unwrap(),
            (0..10).collect::<Vec<_>>()
        );
        assert_eq!(derive_indices(b"demo-seed", 1, 1).unwrap(), vec![0]);
    }

    #[test]
    fn oversized_sample_is_rejected() {
        let err = derive_indices(b"demo-seed", 10, 11).unwrap_err();
        assert!(matches!(err, Error::InvalidParams(_)));
    }

    #[test]
    fn empty_population_is_rejected() {
        let err = derive_indices(b"demo-seed", 0, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidParams(_)));
    }

    #[test]
    fn empty_seed_is_accepted() {
        let a = derive_indices(b"", 50, 5).unwrap();
        assert_eq!(a, derive_indices(b"", 50, 5).unwrap());
        assert_eq!(a.len(), 5);
    }

    #[test]
    fn pool_threshold_tracks_set_table_size() {
        assert_eq!(pool_threshold(0), 21);
        assert_eq!(pool_threshold(5), 21);
        assert_eq!(pool_threshold(6), 21 + 64);
        assert_eq!(pool_threshold(10), 21 + 64);
        assert_eq!(pool_threshold(22), 21 + 256);
    }

    #[test]
    fn sample_indices_reports_draw_order() {
        let digest = Sha256SeedHasher.digest(b"demo-seed");
        let mut rng = Mt19937::from_digest(&digest);
        let mut drawn = sample_indices(&mut rng, 1000, 10).unwrap();
        assert_eq!(drawn.len(), 10);
        drawn.sort_unstable();
        assert_eq!(drawn, DEMO_INDICES);
    }

    #[test]
    fn sample_indices_rejects_oversized_sample() {
        let mut rng = Mt19937::from_key(&[1]);
        let err = sample_indices(&mut rng, 100, 101).unwrap_err();
        assert!(matches!(err, Error::InvalidParams(_)));
    }

    #[test]
    fn sample_indices_rejects_empty_population() {
        let mut rng = Mt19937::from_key(&[1]);
        let err = sample_indices(&mut rng, 0, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidParams(_)));
        assert!(sample_indices(&mut rng, 0, 3).is_err());
    }

    #[test]
    fn builder_defaults_to_sha256() {
        let sampler = DeterministicSamplerBuilder::default()
            .n_total(1000)
            .k(10)
            .build_validated()
            .unwrap();
        assert_eq!(sampler.sample(b"demo-seed").unwrap(), DEMO_INDICES);
    }

    #[test]
    fn builder_rejects_invalid_params() {
        let err = DeterministicSamplerBuilder::default()
            .n_total(3)
            .k(4)
            .build_validated()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParams(_)));

        let err = DeterministicSamplerBuilder::default()
            .k(4)
            .build_validated()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn custom_hasher_changes_the_sample() {
        let sampler = DeterministicSamplerBuilder::default()
            .n_total(1000)
            .k(10)
            .hasher(Arc::new(Blake3SeedHasher))
            .build_validated()
            .unwrap();
        let indices = sampler.sample(b"demo-seed").unwrap();
        assert_eq!(indices.len(), 10);
        assert_ne!(indices, DEMO_INDICES);
        assert_eq!(indices, sampler.sample(b"demo-seed").unwrap());
    }

    #[test]
    fn from_params_round_trips() {
        let sampler = DeterministicSampler::from_params(SamplingParams::new(1000, 10)).unwrap();
        assert_eq!(sampler.params(), SamplingParams::new(1000, 10));
        assert!(DeterministicSampler::from_params(SamplingParams::new(0, 0)).is_err());
    }

    proptest! {
        #[test]
        fn sample_invariants_hold(
            seed in proptest::collection::vec(any::<u8>(), 0..48),
            n_total in 1usize..2000,
            k_raw in 0usize..=2000,
        ) {
            let k = k_raw % (n_total + 1);
            let first = derive_indices(&seed, n_total, k).unwrap();
            let second = derive_indices(&seed, n_total, k).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), k);
            prop_assert!(first.iter().all(|&i| i < n_total));
            prop_assert!(first.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn oversized_samples_always_fail(n_total in 1usize..500, extra in 1usize..50) {
            prop_assert!(derive_indices(b"seed", n_total, n_total + extra).is_err());
        }
    }
}
