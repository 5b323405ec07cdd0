use foldback::analysis::{AnalysisConfig, CascadeReport, CascadeState};
use foldback::{Cascade, FrequencyResponse, Stage, analyze_cascade};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn value_types_are_send_sync() {
    assert_send_sync::<Stage>();
    assert_send_sync::<Cascade>();
    assert_send_sync::<FrequencyResponse>();
    assert_send_sync::<CascadeState>();
    assert_send_sync::<CascadeReport>();
    assert_send_sync::<AnalysisConfig>();
}

#[test]
fn concurrent_reports_agree() {
    let cascade = Cascade::from_pairs(
        vec![(vec![1.0, 3.0, 3.0, 1.0], 4), (vec![1.0, 1.0], 2)],
        1_536_000.0,
    )
    .unwrap();
    let cfg = AnalysisConfig {
        stage_bins: 128,
        cascade_bins: 2048,
        ..AnalysisConfig::default()
    };

    let reference = analyze_cascade(&cascade, &cfg).unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| analyze_cascade(&cascade, &cfg).unwrap()))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), reference);
        }
    });
}

#[test]
fn analysis_does_not_touch_inputs() {
    let taps = vec![0.5, 1.0, 0.5];
    let stage = Stage::new(taps.clone(), 2).unwrap();
    let cascade = Cascade::new(vec![stage.clone()], 48_000.0).unwrap();
    let _ = analyze_cascade(&cascade, &AnalysisConfig::default()).unwrap();
    assert_eq!(stage.taps(), taps.as_slice());
    assert_eq!(cascade.stages()[0], stage);
}
