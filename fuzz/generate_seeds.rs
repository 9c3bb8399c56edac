#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(width: u32, height: u32, mode: u32) -> Vec<u8> {
    let mut out = b"Tx2D".to_vec();
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&mode.to_le_bytes());
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Lum1 8x1
    let mut lum1 = header(8, 1, 0);
    lum1.push(0b1010_0101);
    fs::write(format!("{dir}/lum1_8x1.tx2d"), lum1).unwrap();

    // Palette2 4x1 with palette block
    let mut pal2 = header(4, 1, 6);
    pal2.extend_from_slice(b"plte");
    for c in [0x0000_00FFu32, 0xFF00_00FF, 0x00FF_00FF, 0x0000_FFFF] {
        pal2.extend_from_slice(&c.to_le_bytes());
    }
    pal2.push(0b00_01_10_11);
    fs::write(format!("{dir}/palette2_4x1.tx2d"), pal2).unwrap();

    // RGB565 2x1
    let mut rgb565 = header(2, 1, 9);
    rgb565.extend_from_slice(&[0xF8, 0x00, 0x07, 0xE0]);
    fs::write(format!("{dir}/rgb565_2x1.tx2d"), rgb565).unwrap();

    // RGBA8 1x1
    let mut rgba = header(1, 1, 11);
    rgba.extend_from_slice(&[10, 20, 30, 40]);
    fs::write(format!("{dir}/rgba8_1x1.tx2d"), rgba).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_magic.bin"), b"Tx2D").unwrap();
    fs::write(format!("{dir}/bad_mode.bin"), header(1, 1, 99)).unwrap();
    let mut short_plte = header(1, 1, 8);
    short_plte.extend_from_slice(b"plte\x00\x00");
    fs::write(format!("{dir}/short_plte.bin"), short_plte).unwrap();

    println!("Generated seed corpus in {dir}/");
}
