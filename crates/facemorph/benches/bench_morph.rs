use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use facemorph::image::{Image, ImageSize};
use facemorph::imgproc::parallel::ExecutionStrategy;
use facemorph::{CorrespondenceMesh, MorphConfig, MorphSession, Point2, PointSet, TriangleIndex};

/// A regular grid of points with two triangles per cell.
fn grid(size: ImageSize, cells: usize, jitter: f32) -> (PointSet, CorrespondenceMesh) {
    let (sx, sy) = (
        (size.width - 1) as f32 / cells as f32,
        (size.height - 1) as f32 / cells as f32,
    );

    let mut points = Vec::with_capacity((cells + 1) * (cells + 1));
    for j in 0..=cells {
        for i in 0..=cells {
            let inner = i > 0 && i < cells && j > 0 && j < cells;
            let d = if inner { jitter * sx } else { 0.0 };
            points.push(Point2::new(i as f32 * sx + d, j as f32 * sy - d));
        }
    }

    let at = |i: usize, j: usize| j * (cells + 1) + i;
    let mut triangles = Vec::with_capacity(2 * cells * cells);
    for j in 0..cells {
        for i in 0..cells {
            triangles.push(TriangleIndex([at(i, j), at(i + 1, j), at(i + 1, j + 1)]));
            triangles.push(TriangleIndex([at(i, j), at(i + 1, j + 1), at(i, j + 1)]));
        }
    }

    let num_points = points.len();
    (
        PointSet::new(points),
        CorrespondenceMesh::from_indices(triangles, num_points).unwrap(),
    )
}

fn bench_morph(c: &mut Criterion) {
    let mut group = c.benchmark_group("Morph");

    for (width, height) in [(256, 224), (512, 448)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);
        let size: ImageSize = [*width, *height].into();

        let (points_a, mesh) = grid(size, 8, 0.0);
        let (points_b, _) = grid(size, 8, 0.2);

        let session = MorphSession::from_mesh(
            Image::<f32, 3>::from_size_val(size, 40.0).unwrap(),
            points_a,
            Image::<f32, 3>::from_size_val(size, 220.0).unwrap(),
            points_b,
            mesh,
        )
        .unwrap();

        for strategy in [ExecutionStrategy::Serial, ExecutionStrategy::Parallel] {
            let config = MorphConfig {
                strategy,
                ..Default::default()
            };
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", strategy), &parameter_string),
                &config,
                |b, config| b.iter(|| session.morph(black_box(0.5), black_box(config))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_morph);
criterion_main!(benches);
