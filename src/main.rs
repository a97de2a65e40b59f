use map_frame::{FrameParams, FrameResolver, GeoCoord, Georeferencer, ImageSize, Line};

fn main() {
    env_logger::init();

    // Demo stub: a 6000×5000 scan whose frame sits ~300 px in from the edges,
    // two of the borders reported twice the way a Hough transform over a
    // thick stroke would.
    let size = ImageSize::new(6000, 5000);
    let lines = vec![
        Line::new(310.0, 0.0),
        Line::new(318.0, 0.004),
        Line::new(5690.0, 0.0),
        Line::new(305.0, 1.5708),
        Line::new(4702.0, 1.5708),
        Line::new(4695.0, 1.565),
    ];
    let coords = [
        GeoCoord::new(35.1, 139.1),
        GeoCoord::new(35.1, 139.2),
        GeoCoord::new(35.0, 139.1),
        GeoCoord::new(35.0, 139.2),
    ];

    let resolver = FrameResolver::new(FrameParams::default());
    let report = resolver.resolve_detailed(&lines, size);
    let Some(detection) = report.detection else {
        eprintln!(
            "frame not resolved: {}",
            report.error.unwrap_or_default()
        );
        std::process::exit(1);
    };
    println!(
        "groups={} corners={:?} latency_ms={:.3}",
        report.trace.groups.len(),
        detection.quad.to_array(),
        report.trace.timings.total_ms
    );

    match Georeferencer::fit(&detection.quad, &coords) {
        Ok(geo) => {
            for gcp in geo.gcps() {
                println!("{} pixel={:?} world={:?}", gcp.id, gcp.pixel, gcp.world);
            }
            if let Some((lat, lon)) = geo.transform_lat_lon(3000.0, 2500.0) {
                println!("center lat={lat:.5} lon={lon:.5}");
            }
        }
        Err(err) => {
            eprintln!("georeferencing failed: {err}");
            std::process::exit(1);
        }
    }
}
