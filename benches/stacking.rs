// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for stack layout.
//!
//! Measures the performance of:
//! - Registering heights as toasts mount
//! - Computing every offset of a position group
//! - Building the render model of a full surface

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use iced_toaster::config::Config;
use iced_toaster::toast::heights::{HeightEntry, Heights};
use iced_toaster::toast::toaster::Message;
use iced_toaster::toast::{
    Position, ToastFeed, ToastId, ToastInput, ToastOptions, ToastStore, Toaster,
};
use iced_toaster::ui::theming::{ResolvedTheme, ThemeMode, ThemeTracker};
use std::hint::black_box;
use std::time::Instant;

const SIZES: [u64; 3] = [3, 30, 300];

fn filled(count: u64) -> Heights {
    (0..count).fold(Heights::new(), |heights, n| {
        heights.upsert(HeightEntry {
            toast_id: ToastId::Num(n),
            height: 40.0 + (n % 5) as f32 * 8.0,
            position: if n % 3 == 0 {
                Position::TopCenter
            } else {
                Position::BottomRight
            },
        })
    })
}

/// Benchmark height registration.
fn bench_register_heights(c: &mut Criterion) {
    let mut group = c.benchmark_group("heights_register");
    for count in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| black_box(filled(count)));
        });
    }
    group.finish();
}

/// Benchmark offset computation for one group.
fn bench_group_offsets(c: &mut Criterion) {
    let mut group = c.benchmark_group("heights_offsets");
    for count in SIZES {
        let heights = filled(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &heights, |b, heights| {
            b.iter(|| black_box(heights.group(Position::BottomRight).offsets(14.0)));
        });
    }
    group.finish();
}

/// Benchmark the render model of a surface with mounted toasts.
fn bench_surface_stack(c: &mut Criterion) {
    let mut group = c.benchmark_group("surface_stack");
    for count in SIZES {
        let store = ToastStore::new();
        let mut feed = ToastFeed::connect(&store);
        let theme = ThemeTracker::with_detector(ThemeMode::Light, || ResolvedTheme::Light);
        let mut toaster = Toaster::with_theme(store.clone(), Config::default(), theme);
        let now = Instant::now();

        for n in 0..count {
            let id = store.message(format!("toast {n}"), ToastOptions::new());
            while let Some(event) = feed.try_next() {
                toaster.update(Message::Store(event), now);
            }
            toaster.update(
                Message::Toast {
                    id,
                    input: ToastInput::Measured(52.0),
                },
                now,
            );
        }

        group.bench_with_input(BenchmarkId::from_parameter(count), &toaster, |b, toaster| {
            b.iter(|| black_box(toaster.stack(Position::BottomRight).len()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_register_heights,
    bench_group_offsets,
    bench_surface_stack
);
criterion_main!(benches);
