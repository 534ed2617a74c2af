use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use facemorph_image::Image;
use facemorph_imgproc::{
    draw::fill_convex_poly,
    interpolation::{BorderMode, InterpolationMode},
    warp::{get_affine_transform, warp_affine},
};

fn bench_warp_affine(c: &mut Criterion) {
    let mut group = c.benchmark_group("WarpAffine");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image_size = [*width, *height].into();
        let image = Image::<u8, 3>::new(image_size, vec![0u8; width * height * 3]).unwrap();
        let image_f32 = image.cast::<f32>().unwrap();

        let output = Image::<f32, 3>::from_size_val(image_size, 0.0).unwrap();
        let (w, h) = (*width as f32, *height as f32);
        let m = get_affine_transform(
            &[(0.0, 0.0), (w, 0.0), (0.0, h)],
            &[(w * 0.1, h * 0.2), (w * 0.9, h * 0.1), (w * 0.2, h * 0.8)],
        )
        .unwrap();

        for border in [BorderMode::Constant, BorderMode::Replicate] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", border), &parameter_string),
                &(&image_f32, &output, m),
                |b, i| {
                    let (src, mut dst, m) = (i.0.clone(), i.1.clone(), i.2);
                    b.iter(|| {
                        warp_affine(
                            black_box(&src),
                            black_box(&mut dst),
                            black_box(&m),
                            black_box(InterpolationMode::Bilinear),
                            black_box(border),
                        )
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_fill_convex_poly(c: &mut Criterion) {
    let mut group = c.benchmark_group("FillConvexPoly");

    for size in [64usize, 256, 1024].iter() {
        let mut mask = Image::<f32, 1>::from_size_val([*size, *size].into(), 0.0).unwrap();
        let s = *size as f32;
        let triangle = [(0.0, 0.0), (s - 1.0, s * 0.3), (s * 0.4, s - 1.0)];

        group.bench_with_input(BenchmarkId::new("triangle", size), &triangle, |b, t| {
            b.iter(|| fill_convex_poly(black_box(&mut mask), black_box(&t[..]), [1.0]))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_warp_affine, bench_fill_convex_poly);
criterion_main!(benches);
