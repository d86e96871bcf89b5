mod common;

use common::init_logger;
use common::synthetic_image::{
    mixed_scene, paint_rough_gray, paint_textured_rust, solid_rgb, with_patches, GRAY, RUST,
};
use corrosion_detector::color::intensity_image;
use corrosion_detector::image::ColorImageU8;
use corrosion_detector::stages::{clean, extract_signals, TimingBreakdown, Window};
use corrosion_detector::{
    CorrosionDetector, DetectionConfig, DetectionReport, PipelineType, Region,
};

const W: usize = 128;
const H: usize = 104;

fn sensitivities() -> impl Iterator<Item = f32> {
    (0..=10).map(|i| i as f32 / 10.0)
}

fn run(
    pipeline_type: PipelineType,
    sensitivity: f32,
    min_area_px: i64,
    buffer: &[u8],
) -> DetectionReport {
    let config =
        DetectionConfig::new(pipeline_type, sensitivity, min_area_px).expect("valid config");
    CorrosionDetector::new(config)
        .expect("valid detector")
        .detect_with_diagnostics(ColorImageU8::rgb(W, H, buffer))
}

#[test]
fn regions_respect_area_and_confidence_bounds() {
    init_logger();
    let scene = mixed_scene(W, H);
    for pipeline_type in PipelineType::ALL {
        for sensitivity in sensitivities() {
            for min_area in [1i64, 60, 400] {
                let report = run(pipeline_type, sensitivity, min_area, &scene);
                let result = &report.result;
                assert_eq!(result.region_count, result.regions.len());
                assert!((0.0..=100.0).contains(&result.total_area_pct));
                for region in &result.regions {
                    assert!(
                        region.area_px as i64 >= min_area,
                        "{pipeline_type} s={sensitivity}: area {} < {min_area}",
                        region.area_px
                    );
                    assert!((0.0..=1.0).contains(&region.confidence));
                    let bbox = region.bounding_box;
                    assert!(bbox.right() as usize <= W && bbox.bottom() as usize <= H);
                    assert!(region.area_px as u64 <= bbox.area());
                }
                let masks = report.masks.as_ref().expect("masks for valid input");
                assert!(
                    result.total_area_px as usize <= masks.cleaned.count(),
                    "regions overlap or exceed the cleaned mask"
                );
            }
        }
    }
}

#[test]
fn regions_are_sorted_by_confidence() {
    init_logger();
    let scene = mixed_scene(W, H);
    let result = run(PipelineType::General, 0.8, 30, &scene).result;
    assert!(result.region_count >= 2, "scene should give several regions");
    for pair in result.regions.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }
}

#[test]
fn detection_is_deterministic() {
    init_logger();
    let scene = mixed_scene(W, H);
    for pipeline_type in PipelineType::ALL {
        let a = run(pipeline_type, 0.65, 40, &scene).result;
        let b = run(pipeline_type, 0.65, 40, &scene).result;
        assert_eq!(a.regions, b.regions, "{pipeline_type}");
        assert_eq!(a.total_area_pct, b.total_area_pct);
    }
}

#[test]
fn total_area_never_shrinks_with_sensitivity() {
    init_logger();
    let scene = mixed_scene(W, H);
    for pipeline_type in PipelineType::ALL {
        for min_area in [1i64, 150] {
            let mut previous = 0.0f32;
            for sensitivity in sensitivities() {
                let pct = run(pipeline_type, sensitivity, min_area, &scene)
                    .result
                    .total_area_pct;
                assert!(
                    pct >= previous,
                    "{pipeline_type} min_area={min_area}: {pct:.3}% at s={sensitivity} < {previous:.3}%"
                );
                previous = pct;
            }
        }
    }
}

#[test]
fn faint_rust_only_appears_at_high_sensitivity() {
    init_logger();
    let scene = mixed_scene(W, H);
    let low = run(PipelineType::General, 0.3, 100, &scene).result;
    let high = run(PipelineType::General, 1.0, 100, &scene).result;
    let in_faint_patch = |r: &Region| r.bounding_box.contains(30, 70);
    assert!(!low.regions.iter().any(in_faint_patch));
    assert!(high.regions.iter().any(in_faint_patch));
    assert!(high.total_area_pct > low.total_area_pct);
}

#[test]
fn signal_masks_grow_with_sensitivity() {
    init_logger();
    let scene = mixed_scene(W, H);
    let image = ColorImageU8::rgb(W, H, &scene);
    let gray = intensity_image(&image);
    let window = Window::for_image(W, H);
    for pipeline_type in PipelineType::ALL {
        let profile = pipeline_type.profile();
        let mut timings = TimingBreakdown::default();
        let mut previous = extract_signals(&image, &gray, window, profile, 0.0, &mut timings);
        for sensitivity in sensitivities().skip(1) {
            let current =
                extract_signals(&image, &gray, window, profile, sensitivity, &mut timings);
            for (name, before, after) in [
                ("color", &previous.color, &current.color),
                ("texture", &previous.texture, &current.texture),
                ("edge", &previous.edge, &current.edge),
            ] {
                let lost = before
                    .data
                    .iter()
                    .zip(after.data.iter())
                    .filter(|(&b, &a)| b != 0 && a == 0)
                    .count();
                assert_eq!(lost, 0, "{pipeline_type} {name} mask shrank at s={sensitivity}");
            }
            previous = current;
        }
    }
}

#[test]
fn cleaned_mask_is_a_fixed_point_of_cleaning() {
    init_logger();
    let scene = mixed_scene(W, H);
    for pipeline_type in PipelineType::ALL {
        for sensitivity in [0.2, 0.5, 0.9] {
            let report = run(pipeline_type, sensitivity, 1, &scene);
            let masks = report.masks.expect("masks");
            assert_eq!(clean(&masks.cleaned), masks.cleaned, "{pipeline_type} s={sensitivity}");
            assert_eq!(clean(&masks.fused), masks.cleaned);
        }
    }
}

#[test]
fn flat_rust_passes_every_pipeline_type() {
    init_logger();
    let flat = with_patches(W, H, &[(30, 25, 50, RUST)]);
    for pipeline_type in PipelineType::ALL {
        let result = run(pipeline_type, 0.6, 100, &flat).result;
        assert_eq!(result.region_count, 1, "{pipeline_type}: {:?}", result.regions);
        let bbox = result.regions[0].bounding_box;
        assert!(bbox.contains(30, 25) && bbox.contains(79, 74), "{pipeline_type}: {bbox:?}");
        assert!(result.regions[0].area_px >= 2500);
    }
}

#[test]
fn colorless_roughness_counts_only_under_subsea() {
    init_logger();
    let mut rough = solid_rgb(W, H, GRAY);
    paint_rough_gray(&mut rough, W, 30, 25, 50, 50);

    let subsea = run(PipelineType::Subsea, 0.6, 100, &rough).result;
    assert_eq!(subsea.region_count, 1, "regions: {:?}", subsea.regions);
    let region = &subsea.regions[0];
    let bbox = region.bounding_box;
    assert!((24..=32).contains(&bbox.x) && (19..=27).contains(&bbox.y), "{bbox:?}");
    assert!(region.area_px >= 2000, "area {}", region.area_px);
    assert_eq!(region.scores.color_support, 0.0);

    for pipeline_type in [PipelineType::CrossCountry, PipelineType::General] {
        let land = run(pipeline_type, 0.6, 100, &rough).result;
        assert_eq!(land.region_count, 0, "{pipeline_type}: {:?}", land.regions);
    }
}

#[test]
fn textured_rust_is_found_under_subsea() {
    init_logger();
    let mut rough = solid_rgb(W, H, GRAY);
    paint_textured_rust(&mut rough, W, 30, 25, 50, 50);
    let result = run(PipelineType::Subsea, 0.6, 100, &rough).result;
    assert_eq!(result.region_count, 1, "regions: {:?}", result.regions);
    let bbox = result.regions[0].bounding_box;
    assert!((24..=32).contains(&bbox.x) && (19..=27).contains(&bbox.y), "{bbox:?}");
    assert!(result.regions[0].area_px >= 1600);
}

#[test]
fn trace_reports_coverage_and_window() {
    init_logger();
    let scene = mixed_scene(W, H);
    let report = run(PipelineType::CrossCountry, 0.5, 50, &scene);
    let trace = &report.trace;
    assert_eq!(trace.window, Some(Window::for_image(W, H)));
    assert!(trace.coverage.color > 0.0);
    assert!(trace.coverage.cleaned <= 1.0);
    assert!(trace.components >= trace.candidates);
    assert_eq!(trace.candidates, report.result.region_count);
    assert!(trace.timings.total_ms >= 0.0);
    assert!(trace.timings.stage_ms("morphology").is_some());
}
