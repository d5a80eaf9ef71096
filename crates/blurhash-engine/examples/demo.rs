//! BlurHash Demo - Encode and decode with every execution strategy
//!
//! Run with: RUST_LOG=debug cargo run --example demo

use blurhash_engine::{
    compare, components, ComparisonMethod, ComputeStrategy, Decoder, Encoder, PixelBuffer,
    PixelLayout,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== BlurHash Demo ===\n");

    // A 64x48 RGBA gradient: red grows to the right, green grows downward.
    let width = 64u32;
    let height = 48u32;
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push((x * 255 / (width - 1)) as u8);
            pixels.push((y * 255 / (height - 1)) as u8);
            pixels.push(128);
            pixels.push(255);
        }
    }
    let image = PixelBuffer::new(&pixels, width, height, PixelLayout::Rgba)?;
    println!("1. Created a {width}x{height} RGBA gradient image\n");

    println!("2. Encoding with 4x3 components:");
    let mut hashes = Vec::new();
    for strategy in [
        ComputeStrategy::Scalar,
        ComputeStrategy::Vectorized,
        ComputeStrategy::DataParallel,
    ] {
        let hash = Encoder::new(4, 3)?.with_strategy(strategy).encode(&image)?;
        println!("   {:<12} {hash}", format!("{strategy:?}"));
        hashes.push(hash);
    }

    let hash = &hashes[0];
    let (cx, cy) = components(hash)?;
    println!("\n3. Extracted components from hash: {cx}x{cy}\n");

    let decoder = Decoder::new();
    let reference = decoder.decode(hash, 32, 24)?;
    println!("4. Decoded to 32x24 ({} bytes)", reference.as_bytes().len());
    println!("   First pixel RGB: {:?}", reference.pixel(0, 0));
    println!("   Last pixel RGB:  {:?}", reference.pixel(31, 23));

    let punched = decoder.with_punch(1.8).decode(hash, 32, 24)?;
    let result = compare(&reference, &punched, ComparisonMethod::default())?;
    println!(
        "\n5. Punch 1.8 changes {:.1}% of pixels noticeably",
        result.differing_ratio * 100.0
    );

    println!("\n=== Demo Complete ===");
    Ok(())
}
