mod common;

use common::*;

#[test]
fn each_band_is_detected_independently() -> anyhow::Result<()> {
    let img = two_shelves(400, 300, &[100, 200, 300], &[80, 240]);
    let rois = Roi::bands(&[0, 300, 600], 400, 600);
    assert_eq!(rois.len(), 2);

    let detections = detect_shelves(&img, &rois, &PipelineConfig::default())?;
    assert_eq!(detections.len(), 2);

    let upper: Vec<i32> = [100, 200, 300].into_iter().map(expected_boundary).collect();
    let lower: Vec<i32> = [80, 240].into_iter().map(expected_boundary).collect();
    assert_near(&detections[0].boundaries, &upper, 6);
    assert_near(&detections[1].boundaries, &lower, 6);
    assert_eq!(detections[1].gap_count(), 1);
    Ok(())
}

#[test]
fn band_matches_standalone_run_on_the_crop() -> anyhow::Result<()> {
    let img = two_shelves(400, 300, &[100, 200, 300], &[80, 240]);
    let roi = Roi::new(300, 600, 0, 400);
    let config = PipelineConfig::default();

    let from_shelves = detect_shelves(&img, &[roi], &config)?;
    let standalone = detect_boundaries(&roi.crop(&img)?, &config)?;
    assert_eq!(from_shelves[0], standalone);
    Ok(())
}

#[test]
fn roi_coordinates_are_local() -> anyhow::Result<()> {
    let img = two_shelves(400, 300, &[100, 200, 300], &[80, 240]);
    let roi = Roi::new(0, 300, 150, 400);

    let detection = detect_shelves(&img, &[roi], &PipelineConfig::default())?;
    let expected: Vec<i32> = [200, 300]
        .into_iter()
        .map(|x| expected_boundary(x) - 150)
        .collect();
    assert_near(&detection[0].boundaries, &expected, 6);
    Ok(())
}

#[test]
fn out_of_bounds_region_fails_before_processing() {
    let img = standard_shelf();
    let rois = [Roi::new(0, 300, 0, 400), Roi::new(0, 301, 0, 400)];
    let result = detect_shelves(&img, &rois, &PipelineConfig::default());
    assert!(matches!(result, Err(DetectError::InvalidInput(_))));
}

#[test]
fn no_regions_give_no_detections() -> anyhow::Result<()> {
    let detections = detect_shelves(&standard_shelf(), &[], &PipelineConfig::default())?;
    assert!(detections.is_empty());
    Ok(())
}
