use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use planewarp_image::Image;
use planewarp_imgproc::{
    draw::GuideStyle,
    parallel::ExecutionStrategy,
    warp::{render_preview, warp_perspective_split, SplitRegion},
};

fn bench_warp_perspective_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("WarpPerspectiveSplit");

    let m = [[0.95, 0.04, 12.0], [-0.03, 1.02, 8.0], [0.0001, 0.00005, 1.0]];

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image_size = [*width, *height].into();
        let src = Image::<u8, 4>::new(image_size, vec![128u8; width * height * 4]).unwrap();
        let base = Image::<u8, 4>::from_size_val(image_size, 0).unwrap();

        for (name, strategy) in [
            ("serial", ExecutionStrategy::Serial),
            ("par_rows", ExecutionStrategy::ParallelRows),
        ] {
            group.bench_with_input(
                BenchmarkId::new(name, &parameter_string),
                &(&src, &base),
                |b, i| {
                    b.iter(|| {
                        warp_perspective_split(
                            black_box(i.0),
                            black_box(i.1),
                            black_box(&m),
                            SplitRegion::full(),
                            strategy,
                        )
                    })
                },
            );
        }

        group.bench_with_input(
            BenchmarkId::new("preview_half", &parameter_string),
            &(&src, &base),
            |b, i| {
                let split = SplitRegion::new(50.0, 100.0).unwrap();
                let guides = GuideStyle::default();
                b.iter(|| {
                    render_preview(
                        black_box(i.0),
                        black_box(i.1),
                        black_box(&m),
                        split,
                        ExecutionStrategy::ParallelRows,
                        &guides,
                    )
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_warp_perspective_split);
criterion_main!(benches);
