#![no_main]
use libfuzzer_sys::fuzz_target;
use zentx2d::*;

fuzz_target!(|data: &[u8]| {
    // First byte picks the mode, the rest is the payload. Bulk and per-pixel
    // decoding must agree for every mode.
    let Some((&tag, payload)) = data.split_first() else {
        return;
    };
    let Ok(mode) = ColorMode::from_tag(u32::from(tag % 12)) else {
        return;
    };
    let Ok(texture) = Texture::new(0, 0, mode, payload, None) else {
        return;
    };

    let bulk = texture.pixels(enough::Unstoppable).expect("bulk decode failed");
    assert_eq!(bulk.len(), texture.pixel_count());
    for (i, c) in bulk.iter().enumerate() {
        assert_eq!(texture.pixel(i).ok(), Some(*c), "pixel {i} mismatch");
    }
    assert!(texture.pixel(bulk.len()).is_err());

    let bytes = texture.to_rgba_bytes(enough::Unstoppable).expect("byte decode failed");
    assert_eq!(bytes.len(), bulk.len() * 4);
});
