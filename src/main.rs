use clap::Parser;
use image::{GenericImageView, ImageReader};
use std::path::PathBuf;

use shelfgaps::{Pipeline, PipelineConfig, Roi, annotate};

#[derive(Parser)]
#[command(name = "shelfgaps")]
#[command(about = "Find book-spine boundaries on a shelf photo and measure the gaps between them")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Region to analyse as top,bottom,left,right (default: whole image)
    #[arg(long, value_name = "T,B,L,R", conflicts_with = "shelves")]
    roi: Option<Roi>,

    /// Shelf lines (y positions); each pair of neighbours bounds one band
    #[arg(long, value_name = "Y1,Y2,...", value_delimiter = ',', num_args = 1..)]
    shelves: Option<Vec<u32>>,

    /// JSON file with pipeline parameters
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Save intermediate images to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Save an annotated copy of each region to directory
    #[arg(long, value_name = "DIR")]
    annotate_out: Option<PathBuf>,

    /// Print detections as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = match &args.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    log::info!("loading image: {:?}", args.image_path);
    let img = ImageReader::open(&args.image_path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
    let (width, height) = img.dimensions();
    log::info!("image loaded: {}x{}", width, height);

    let rois = match (&args.roi, &args.shelves) {
        (Some(roi), _) => vec![*roi],
        (None, Some(lines)) => {
            let bands = Roi::bands(lines, width, height);
            if bands.is_empty() {
                anyhow::bail!("need at least two distinct shelf lines inside the image");
            }
            bands
        }
        (None, None) => vec![Roi::full(width, height)],
    };

    let mut pipeline = Pipeline::new(config)?;
    if let Some(debug_dir) = args.debug_out {
        pipeline = pipeline.with_debug(debug_dir)?;
    }

    let detections = pipeline.run_shelves(&img, &rois)?;

    if let Some(dir) = &args.annotate_out {
        std::fs::create_dir_all(dir)?;
        for (i, (roi, detection)) in rois.iter().zip(&detections).enumerate() {
            let path = dir.join(format!("shelf_{:02}.png", i + 1));
            annotate(&roi.crop(&img)?, detection).save(&path)?;
            log::info!("saved {}", path.display());
        }
    }

    if args.json {
        let report: Vec<_> = rois
            .iter()
            .zip(&detections)
            .map(|(roi, detection)| serde_json::json!({ "roi": roi, "detection": detection }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (i, (roi, detection)) in rois.iter().zip(&detections).enumerate() {
        println!(
            "\n=== Shelf {} (rows {}..{}, columns {}..{}) ===",
            i + 1,
            roi.top,
            roi.bottom,
            roi.left,
            roi.right
        );

        if detection.is_empty() {
            println!("No boundaries detected.");
            continue;
        }

        let positions: Vec<String> = detection.boundaries.iter().map(|x| x.to_string()).collect();
        println!("Boundaries: {}", positions.join(", "));
        println!("Number of gaps: {}", detection.gap_count());
        for (j, gap) in detection.gaps.iter().enumerate() {
            println!(
                "  Gap {}: x={} -> x={}  width={} px",
                j + 1,
                gap.start_x,
                gap.end_x,
                gap.width
            );
        }
    }

    Ok(())
}
