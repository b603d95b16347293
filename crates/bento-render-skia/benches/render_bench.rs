use bento_core::data::Point2D;
use bento_core::{DashboardContext, Fixtures, LineChart, PageId, Scene, Size, Theme, Widget};
use bento_render_skia::{RenderOptions, SkiaRenderer};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn line_scene(n: usize) -> Scene {
    let chart = LineChart::new((0..n).map(|i| Point2D::new(i as f64, (i as f64 * 0.01).sin() * 10.0)).collect());
    let size = Size::new(800.0, 500.0);
    let mut scene = Scene::new(size).with_background(Theme::dark().bg_primary);
    chart.draw(size, &Theme::dark(), &mut scene);
    scene
}

fn bench_render(c: &mut Criterion) {
    let renderer = SkiaRenderer::new();
    let opts = RenderOptions { draw_text: false, ..RenderOptions::default() };
    let mut group = c.benchmark_group("render_png_bytes");
    for &n in &[10_000usize, 50_000usize] {
        let scene = line_scene(n);
        group.bench_function(format!("line_{n}"), |b| {
            b.iter(|| black_box(renderer.render_to_png_bytes(&scene, &opts)));
        });
    }
    let page = PageId::Gallery.build(&Fixtures::default()).render(&DashboardContext::default(), 1280.0);
    group.bench_function("gallery_page", |b| b.iter(|| black_box(renderer.render_to_rgba8(&page, &opts))));
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
