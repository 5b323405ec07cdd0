use foldback::Stage;
use foldback::analysis::{AnalysisConfig, analyze_stage, compose_cascade, fold_block};
use ndarray::Array1;
use proptest::prelude::*;

fn stage_config() -> AnalysisConfig {
    AnalysisConfig {
        stage_bins: 64,
        ..AnalysisConfig::default()
    }
}

proptest! {
    #[test]
    fn no_aliasing_without_decimation(taps in prop::collection::vec(0.05f64..1.0, 1..32)) {
        let a = analyze_stage(&taps, 1, 48_000.0, 48_000.0, &stage_config()).unwrap();
        prop_assert!(a.alias.alias_level.iter().all(|&v| v == 0.0));
        prop_assert_eq!(&a.alias.folded_magnitude, &a.alias.baseband_magnitude);
    }

    #[test]
    fn folding_never_removes_energy(
        taps in prop::collection::vec(0.05f64..1.0, 1..48),
        decimation in 1usize..6,
    ) {
        let fs = 48_000.0 * decimation as f64;
        let a = analyze_stage(&taps, decimation, fs, 48_000.0, &stage_config()).unwrap();
        prop_assert_eq!(a.alias.len(), 64);
        for (folded, base) in a.alias.folded_magnitude.iter().zip(&a.alias.baseband_magnitude) {
            prop_assert!(folded >= base);
        }
        prop_assert!(a.alias.alias_level.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn odd_fold_is_an_involution(block in prop::collection::vec(-10.0f64..10.0, 1..64)) {
        let block = Array1::from(block);
        let twice = fold_block(false, fold_block(false, block.view()).view());
        prop_assert_eq!(&twice, &block);
        prop_assert_eq!(fold_block(true, block.view()), block);
    }

    #[test]
    fn composed_grid_follows_total_decimation(
        decimations in prop::collection::vec(1usize..=4, 1..=4),
        input_rate in 1_000.0f64..4_000_000.0,
    ) {
        let stages: Vec<Stage> = decimations
            .iter()
            .map(|&d| Stage::new(vec![1.0, 2.0, 1.0], d).unwrap())
            .collect();
        let cfg = AnalysisConfig {
            cascade_bins: 4096,
            ..AnalysisConfig::default()
        };
        let out = compose_cascade(&stages, input_rate, &cfg).unwrap();

        let product: usize = decimations.iter().product();
        prop_assert_eq!(out.combined.bins, 4096 / product);
        prop_assert_eq!(out.combined.response.len(), 4096 / product);
        let expected_rate = input_rate / product as f64;
        prop_assert!((out.combined.sample_rate - expected_rate).abs() <= 1e-9 * expected_rate);

        for pair in out.grids.windows(2) {
            prop_assert!(pair[1].bins <= pair[0].bins);
            prop_assert!(pair[1].sample_rate <= pair[0].sample_rate);
        }
        for (k, d) in decimations.iter().enumerate() {
            let (next_bins, next_rate) = match out.grids.get(k + 1) {
                Some(next) => (next.bins, next.sample_rate),
                None => (out.combined.bins, out.combined.sample_rate),
            };
            if *d > 1 {
                prop_assert!(next_bins < out.grids[k].bins);
                prop_assert!(next_rate < out.grids[k].sample_rate);
            }
        }
    }
}
