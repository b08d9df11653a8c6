//! Property tests for the layout core.

use effects_core::{
    Dataset, IdentityNormalizer, LinearScale, OverviewGeometry, evaluate, layout_overview,
    stack_offset,
};
use effects_model::{EffectRecord, GroupKey, SupportGateConfig};
use proptest::prelude::*;

fn id_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ ]?(tft|TFT|Tft)_?[0-9]{1,3}_?[a-zA-Z0-9_]{1,12}[ ]?",
        "[a-zA-Z_]{0,16}",
        "\\PC{0,20}",
    ]
}

proptest! {
    #[test]
    fn identity_is_idempotent(raw in id_strategy()) {
        let identity = IdentityNormalizer::default();
        let once = identity.normalize(&raw);
        prop_assert_eq!(identity.normalize(&once), once);
    }

    #[test]
    fn gate_is_pure(
        n_support in prop::option::of(0.0f64..500.0),
        ci_high in prop::option::of(-1.0f64..1.0),
        group_max_n in 0.0f64..50_000.0,
        rare in any::<bool>(),
    ) {
        let record = EffectRecord {
            character_id: "TFT15_Ashe".to_string(),
            star: 2,
            feature: if rare { "Ornn Artifact".to_string() } else { "Infinity Edge".to_string() },
            coef: Some(0.0),
            ci_low: None,
            ci_high,
            n_support,
            n_total: None,
        };
        let config = SupportGateConfig::default();
        prop_assert_eq!(
            evaluate(&record, group_max_n, &config),
            evaluate(&record.clone(), group_max_n, &config.clone())
        );
    }

    #[test]
    fn scaler_clamps_to_pixel_range(value in -10.0f64..10.0, width in 600u32..3000) {
        let scale = LinearScale::new((-0.5, 0.2), (150.0, f64::from(width) - 60.0));
        let px = scale.apply(value);
        prop_assert!((150.0..=f64::from(width) - 60.0).contains(&px));
        if value <= -0.5 {
            prop_assert_eq!(px, 150.0);
        }
        if value >= 0.2 {
            prop_assert_eq!(px, f64::from(width) - 60.0);
        }
    }

    #[test]
    fn stack_positions_are_distinct(count in 1usize..40) {
        let geometry = OverviewGeometry::default();
        let spacing = geometry.stack_spacing(count);
        let mut offsets: Vec<f64> = (0..count).map(|i| stack_offset(i, spacing)).collect();
        offsets.sort_by(f64::total_cmp);
        for pair in offsets.windows(2) {
            prop_assert!(pair[1] - pair[0] >= f64::from(geometry.min_spacing));
        }
    }

    #[test]
    fn small_buckets_never_overlap(coefs in prop::collection::vec(-0.45f64..0.15, 1..4)) {
        let records: Vec<EffectRecord> = coefs
            .iter()
            .enumerate()
            .map(|(i, _)| EffectRecord {
                character_id: "TFT15_Ashe".to_string(),
                star: 2,
                feature: format!("item {i}"),
                // all share one bucket
                coef: Some(coefs[0]),
                ci_low: None,
                ci_high: None,
                n_support: Some(1_000.0),
                n_total: Some(1_000.0),
            })
            .collect();
        let dataset = Dataset::new(records);
        let geometry = OverviewGeometry::default();
        let layout = layout_overview(
            &dataset,
            &SupportGateConfig::default(),
            &[GroupKey::new("TFT15_Ashe", 2)],
            1000,
            &geometry,
        );
        let mut ys: Vec<i32> = layout.items().map(|item| item.y).collect();
        prop_assert_eq!(ys.len(), coefs.len());
        ys.sort_unstable();
        for pair in ys.windows(2) {
            prop_assert!(pair[1] - pair[0] >= geometry.item_size as i32);
        }
    }
}

#[test]
fn scaler_midpoint_maps_to_pixel_midpoint() {
    let scale = LinearScale::new((-0.5, 0.5), (100.0, 300.0));
    assert_eq!(scale.apply(0.0), 200.0);
}
