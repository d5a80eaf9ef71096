use blurhash_engine::{base83, ComputeStrategy, Decoder, Encoder, PixelBuffer, PixelLayout};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const STRATEGIES: [ComputeStrategy; 3] = [
    ComputeStrategy::Scalar,
    ComputeStrategy::Vectorized,
    ComputeStrategy::DataParallel,
];

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn gradient_image(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            pixels.push((x * 255 / width) as u8);
            pixels.push((y * 255 / height) as u8);
            pixels.push(128);
        }
    }
    pixels
}

// ---------------------------------------------------------------------------
// Encode benchmarks
// ---------------------------------------------------------------------------

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for &(w, h) in &[(32u32, 32u32), (128, 128), (512, 512)] {
        let img = gradient_image(w as usize, h as usize);
        let buf = PixelBuffer::new(&img, w, h, PixelLayout::Rgb).unwrap();
        group.throughput(Throughput::Elements((w as u64) * (h as u64)));
        for strategy in STRATEGIES {
            let encoder = Encoder::new(4, 3).unwrap().with_strategy(strategy);
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), format!("{w}x{h}")),
                &buf,
                |b, buf| b.iter(|| encoder.encode(buf).unwrap()),
            );
        }
    }

    group.finish();
}

fn bench_encode_component_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_components");

    let img = gradient_image(128, 128);
    let buf = PixelBuffer::new(&img, 128, 128, PixelLayout::Rgb).unwrap();
    for &(cx, cy) in &[(1u32, 1u32), (4, 3), (9, 9)] {
        for strategy in STRATEGIES {
            let encoder = Encoder::new(cx, cy).unwrap().with_strategy(strategy);
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), format!("{cx}x{cy}")),
                &buf,
                |b, buf| b.iter(|| encoder.encode(buf).unwrap()),
            );
        }
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Decode benchmarks
// ---------------------------------------------------------------------------

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    // Pre-encode a hash to decode
    let img = gradient_image(64, 64);
    let buf = PixelBuffer::new(&img, 64, 64, PixelLayout::Rgb).unwrap();
    let hash = Encoder::new(4, 3).unwrap().encode(&buf).expect("encode ok");

    for &(w, h) in &[(32u32, 32u32), (128, 128), (256, 256)] {
        group.throughput(Throughput::Elements((w as u64) * (h as u64)));
        for strategy in STRATEGIES {
            let decoder = Decoder::new().with_strategy(strategy);
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), format!("{w}x{h}")),
                &hash,
                |b, hash| b.iter(|| decoder.decode(hash, w, h).unwrap()),
            );
        }
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Base83 benchmarks
// ---------------------------------------------------------------------------

fn bench_base83(c: &mut Criterion) {
    let mut group = c.benchmark_group("base83");

    group.bench_function("encode_4_chars", |b| {
        b.iter(|| base83::encode(123456, 4).unwrap());
    });

    group.bench_function("decode_4_chars", |b| {
        let s = base83::encode(123456, 4).unwrap();
        b.iter(|| base83::decode(&s));
    });

    group.bench_function("decode_strict_4_chars", |b| {
        let s = base83::encode(123456, 4).unwrap();
        b.iter(|| base83::decode_strict(&s).unwrap());
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// sRGB / linear conversion benchmarks
// ---------------------------------------------------------------------------

fn bench_srgb_linear(c: &mut Criterion) {
    let mut group = c.benchmark_group("srgb_linear");

    group.bench_function("srgb_to_linear_256_values", |b| {
        b.iter(|| {
            let mut sum = 0.0f64;
            for i in 0..=255u8 {
                sum += blurhash_engine::srgb_to_linear(i);
            }
            sum
        });
    });

    group.bench_function("linear_to_srgb_256_values", |b| {
        b.iter(|| {
            let mut sum = 0u32;
            for i in 0..256u32 {
                let linear = i as f64 / 255.0;
                sum += blurhash_engine::linear_to_srgb(linear) as u32;
            }
            sum
        });
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Criterion harness
// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    bench_encode,
    bench_encode_component_counts,
    bench_decode,
    bench_base83,
    bench_srgb_linear,
);
criterion_main!(benches);
