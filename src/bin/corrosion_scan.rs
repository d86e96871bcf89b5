use corrosion_detector::config::load_config;
use corrosion_detector::image::io::{
    fit_within, load_rgb_image, render_overlay, save_mask_png, save_rgb_png, write_json_file,
};
use corrosion_detector::CorrosionDetector;
use std::env;
use std::error::Error;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let mut image = load_rgb_image(&config.input)?;
    if config.resize.enabled {
        image = fit_within(&image, config.resize.max_width, config.resize.max_height);
    }

    let detector = CorrosionDetector::new(config.detection)?;
    let settings = detector.config();
    let report = detector.detect_with_diagnostics(image.as_view());
    let result = &report.result;

    write_json_file(&config.output.result_json, result)?;
    if let Some(path) = &config.output.trace_json {
        write_json_file(path, &report.trace)?;
    }
    if let Some(path) = &config.output.overlay_image {
        save_rgb_png(&render_overlay(&image, &result.regions), path)?;
    }
    if let (Some(path), Some(masks)) = (&config.output.mask_image, &report.masks) {
        save_mask_png(&masks.cleaned, path)?;
    }

    if result.is_empty() {
        println!(
            "No corrosion regions found in {} ({}x{}, {} pipeline, sensitivity {:.2})",
            config.input.display(),
            image.width(),
            image.height(),
            settings.pipeline_type,
            settings.sensitivity
        );
    } else {
        println!(
            "Found {} region(s) covering {:.2}% of {} (max confidence {:.3}, {} pipeline)",
            result.region_count,
            result.total_area_pct,
            config.input.display(),
            result.max_confidence,
            settings.pipeline_type
        );
        for severity in corrosion_detector::Severity::ALL.iter().rev() {
            let count = result.severity_histogram.get(*severity);
            if count > 0 {
                println!("  {severity}: {count}");
            }
        }
    }
    println!("Saved result to {}", config.output.result_json.display());
    Ok(())
}

fn usage() -> String {
    "Usage: corrosion_scan <config.json>".to_string()
}
