//! Layout benchmarks for trellis.

use std::{hint::black_box, time::Duration};

use criterion::{Criterion, criterion_group, criterion_main};
use trellis::{Axis, Canvas, Core, Dock, Expanse, NodeId, layout::Layout};

/// Build a tree `depth` levels deep where every container holds `width`
/// children docked round-robin against its edges.
fn grid(core: &mut Core, parent: NodeId, depth: usize, width: usize) {
    if depth == 0 {
        return;
    }
    for i in 0..width {
        let dock = match i % 5 {
            0 => Dock::Left,
            1 => Dock::Top,
            2 => Dock::Right,
            3 => Dock::Bottom,
            _ => Dock::Fill,
        };
        let mut l = Layout::docked(dock);
        l.desired.w = Some(20);
        l.desired.h = Some(10);
        let child = core
            .add_container(parent, l)
            .expect("Failed to add container");
        grid(core, child, depth - 1, width);
    }
}

/// Benchmark a full measure and arrange pass over a wide tree.
fn benchmark_full_layout(c: &mut Criterion) {
    let mut core = Core::default();
    let root = core.root();
    grid(&mut core, root, 4, 5);

    c.bench_function("full_layout", |b| {
        b.iter(|| {
            core.invalidate(root);
            core.layout(black_box(Expanse::new(800, 600)))
                .expect("Failed to lay out");
        });
    });
}

/// Benchmark an edit inside a scroll region, which re-lays out only the
/// region.
fn benchmark_scroll_region_edit(c: &mut Criterion) {
    let mut canvas = Canvas::new(Expanse::new(800, 600));
    let root = canvas.root();
    grid(&mut canvas.core, root, 3, 5);
    let region = canvas
        .core
        .add_scroll_region(root, Layout::fill())
        .expect("Failed to add scroll region");
    let content = canvas
        .core
        .scroll_content(region)
        .expect("Failed to find scroll content");
    let leaf = canvas
        .core
        .add_container(content, Layout::new().size(400, 2000))
        .expect("Failed to add leaf");
    grid(&mut canvas.core, leaf, 3, 5);
    canvas.do_think(Duration::ZERO).expect("Failed to tick");

    let mut h = 2000;
    c.bench_function("scroll_region_edit", |b| {
        b.iter(|| {
            h = if h == 2000 { 2100 } else { 2000 };
            canvas
                .core
                .update_layout(leaf, |l| l.desired.h = Some(h))
                .expect("Failed to update layout");
            canvas.do_think(Duration::ZERO).expect("Failed to tick");
            black_box(canvas.core.scroll_fraction(region, Axis::Vertical))
        });
    });
}

criterion_group!(benches, benchmark_full_layout, benchmark_scroll_region_edit);
criterion_main!(benches);
