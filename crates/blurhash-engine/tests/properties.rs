use blurhash_engine::{
    base83, components, decode, encode, BlurhashError, HashDefect, PixelBuffer, PixelLayout,
};
use proptest::prelude::*;

fn image_strategy() -> impl Strategy<Value = (u32, u32, Vec<u8>)> {
    (1u32..=12, 1u32..=12).prop_flat_map(|(w, h)| {
        (
            Just(w),
            Just(h),
            proptest::collection::vec(any::<u8>(), (w * h * 3) as usize),
        )
    })
}

proptest! {
    #[test]
    fn base83_decode_inverts_encode(length in 1usize..=6, seed in any::<u64>()) {
        let value = seed % 83u64.pow(length as u32);
        let encoded = base83::encode(value, length).unwrap();
        prop_assert_eq!(encoded.chars().count(), length);
        prop_assert_eq!(base83::decode(&encoded), value);
        prop_assert_eq!(base83::decode_strict(&encoded).unwrap(), value);
    }

    #[test]
    fn hash_length_follows_components(
        (w, h, pixels) in image_strategy(),
        cx in 1u32..=9,
        cy in 1u32..=9,
    ) {
        let hash = encode(&pixels, w, h, cx, cy).unwrap();
        prop_assert_eq!(hash.chars().count(), 4 + 2 * (cx * cy) as usize);
        prop_assert!(hash.chars().all(|ch| base83::digit_value(ch).is_some()));
        prop_assert_eq!(components(&hash).unwrap(), (cx, cy));
    }

    #[test]
    fn decode_size_matches_request(
        (w, h, pixels) in image_strategy(),
        out_w in 1u32..=20,
        out_h in 1u32..=20,
    ) {
        let hash = encode(&pixels, w, h, 3, 3).unwrap();
        let decoded = decode(&hash, out_w, out_h, 1.0).unwrap();
        prop_assert_eq!(decoded.len(), (out_w * out_h * 3) as usize);
    }

    #[test]
    fn wrong_length_is_rejected(cx in 1u32..=9, cy in 1u32..=9, delta in 1usize..=3, grow in any::<bool>()) {
        let pixels = vec![90u8; 4 * 4 * 3];
        let hash = encode(&pixels, 4, 4, cx, cy).unwrap();
        let expected = hash.len();
        let altered = if grow {
            format!("{hash}{}", "0".repeat(delta))
        } else {
            hash[..expected - delta].to_string()
        };
        let actual = altered.chars().count();
        let result = decode(&altered, 4, 4, 1.0);
        if actual < 6 {
            prop_assert_eq!(result, Err(BlurhashError::MalformedHash(HashDefect::TooShort { actual })));
        } else {
            prop_assert_eq!(
                result,
                Err(BlurhashError::MalformedHash(HashDefect::LengthMismatch { expected, actual }))
            );
        }
    }

    #[test]
    fn solid_images_decode_to_their_colour(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let pixels: Vec<u8> = std::iter::repeat([r, g, b]).take(9).flatten().collect();
        let image = PixelBuffer::new(&pixels, 3, 3, PixelLayout::Rgb).unwrap();
        let hash = blurhash_engine::Encoder::new(1, 1).unwrap().encode(&image).unwrap();
        prop_assert_eq!(decode(&hash, 2, 2, 1.0).unwrap(), [r, g, b].repeat(4));
    }
}
