#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Container read + full decode must never panic
    let _ = zentx2d::TextureInfo::from_bytes(data);
    let _ = zentx2d::decode(data, enough::Unstoppable);
});
