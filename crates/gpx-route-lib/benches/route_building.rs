//! Benchmarks for route building
//!
//! Run with: cargo bench --package gpx-route-lib

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use geo::Point;
use gpx::{Gpx, Track, TrackSegment, Waypoint};
use gpx_route_lib::{RouteData, TrackSelection, build_coordinates, build_extent, parse_gpx};
use std::fmt::Write;

/// Generate a track with the specified number of points split over a few segments
fn generate_track(num_points: usize, segments: usize) -> Track {
    let mut track = Track::default();
    let per_segment = num_points.div_ceil(segments.max(1));

    for chunk in (0..num_points).collect::<Vec<_>>().chunks(per_segment.max(1)) {
        let mut segment = TrackSegment::default();
        for &i in chunk {
            let t = i as f64 / num_points as f64;
            let lat = 52.0 + t * 0.1 + (t * 50.0).sin() * 0.001;
            let lon = 4.0 + t * 0.1 + (t * 30.0).cos() * 0.001;
            segment.points.push(Waypoint::new(Point::new(lon, lat)));
        }
        track.segments.push(segment);
    }
    track
}

/// The same track serialized as GPX 1.1 XML
fn generate_gpx_xml(num_points: usize) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\"?>\n<gpx version=\"1.1\" creator=\"bench\">\n<trk><trkseg>\n",
    );
    for i in 0..num_points {
        let t = i as f64 / num_points as f64;
        let _ = writeln!(
            xml,
            "<trkpt lat=\"{:.6}\" lon=\"{:.6}\"></trkpt>",
            52.0 + t * 0.1,
            4.0 + t * 0.1
        );
    }
    xml.push_str("</trkseg></trk>\n</gpx>\n");
    xml
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for num_points in [1_000, 50_000] {
        let track = generate_track(num_points, 4);
        group.throughput(Throughput::Elements(num_points as u64));

        group.bench_with_input(
            BenchmarkId::new("coordinates", num_points),
            &track,
            |b, track| b.iter(|| build_coordinates(track)),
        );

        let coordinates = build_coordinates(&track);
        group.bench_with_input(
            BenchmarkId::new("extent", num_points),
            &coordinates,
            |b, coordinates| b.iter(|| build_extent(coordinates)),
        );

        let mut gpx = Gpx::default();
        gpx.tracks.push(track);
        group.bench_with_input(BenchmarkId::new("route", num_points), &gpx, |b, gpx| {
            b.iter(|| RouteData::from_gpx(gpx, TrackSelection::First))
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.sample_size(20);

    let num_points = 10_000;
    let xml = generate_gpx_xml(num_points);
    group.throughput(Throughput::Elements(num_points as u64));
    group.bench_function("parse_and_build_10k", |b| {
        b.iter(|| {
            let gpx = parse_gpx(xml.as_bytes()).unwrap();
            RouteData::from_gpx(&gpx, TrackSelection::First).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_parse);
criterion_main!(benches);
