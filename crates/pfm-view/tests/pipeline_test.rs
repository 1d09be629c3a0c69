//! End-to-end pipeline behaviour: in-memory PFM/PHM streams through
//! decode, tone mapping, remap and assembly.

use std::io::Cursor;

use half::f16;
use pfm_io::{PortableMap, ReadStatus};
use pfm_view::{render, Viewer, ViewerState};

fn pfm_f32(magic: &str, width: i64, height: i64, samples: &[f32]) -> Vec<u8> {
    let mut bytes = format!("{magic} {width} {height} -1.0\n").into_bytes();
    for s in samples {
        bytes.extend_from_slice(&s.to_le_bytes());
    }
    bytes
}

fn phm_f16(magic: &str, width: i64, height: i64, samples: &[f32]) -> Vec<u8> {
    let mut bytes = format!("{magic} {width} {height} -1.0\n").into_bytes();
    for s in samples {
        bytes.extend_from_slice(&f16::from_f32(*s).to_le_bytes());
    }
    bytes
}

#[test]
fn mono_float32_scenario() {
    // 2x1 mono float32: header implies 8 bytes; the stream carries four
    // samples, so two are payload and two are trailing garbage.
    let data = pfm_f32("Pf", 2, 1, &[0.0, 0.5, 1.0, 0.25]);
    let map = PortableMap::read_from(&mut Cursor::new(data)).unwrap();

    assert_eq!(map.header.raw_byte_size(), 8);
    assert_eq!(map.payload.status(), ReadStatus::Trailing { pending: 8 });

    let viewer = Viewer::new(map);
    let display = viewer.display();
    assert_eq!(display.width(), 2);
    assert_eq!(display.height(), 1);
    assert_eq!(display.pixels().len(), 6);

    // Grayscale expansion: R=G=B per pixel, and 0.5 beats 0.0.
    let px = display.pixels();
    assert!(px[0] == px[1] && px[1] == px[2]);
    assert!(px[3] == px[4] && px[4] == px[5]);
    assert!(px[3] > px[0]);
}

#[test]
fn rgb_float16_scenario() {
    // PH 1x1: exactly 6 payload bytes.
    let data = phm_f16("PH", 1, 1, &[0.2, 0.4, 0.8]);
    let map = PortableMap::read_from(&mut Cursor::new(data)).unwrap();

    assert_eq!(map.header.raw_byte_size(), 6);
    assert_eq!(map.payload.status(), ReadStatus::Complete);

    let viewer = Viewer::new(map);
    let display = viewer.display();
    assert_eq!((display.width(), display.height()), (1, 1));
    let px = display.pixels();
    // Monotonic radiance ordering survives the pipeline.
    assert!(px[0] < px[1] && px[1] < px[2]);
}

#[test]
fn short_stream_renders_black_tail() {
    // 2x2 mono, only the first two of four samples delivered.
    let data = pfm_f32("Pf", 2, 2, &[0.8, 0.8]);
    let map = PortableMap::read_from(&mut Cursor::new(data)).unwrap();
    assert_eq!(
        map.payload.status(),
        ReadStatus::Short {
            read: 8,
            expected: 16
        }
    );

    let state = ViewerState {
        gamma: false,
        tone: false,
        ..ViewerState::default()
    };
    let display = render(&map, &state);

    // Delivered samples display bright, zero-filled tail displays black.
    assert!(display.row(0).iter().all(|&v| v > 0));
    assert!(display.row(1).iter().all(|&v| v == 0));
}

#[test]
fn unchanged_parameters_yield_identical_buffers() {
    let data = pfm_f32("PF", 2, 2, &[0.1; 12]);
    let map = PortableMap::read_from(&mut Cursor::new(data)).unwrap();
    let state = ViewerState::default();

    let first = render(&map, &state);
    let second = render(&map, &state);
    assert_eq!(first, second);
}

#[test]
fn exposure_brightens_midtones() {
    let data = pfm_f32("Pf", 1, 1, &[0.1]);
    let map = PortableMap::read_from(&mut Cursor::new(data)).unwrap();
    let mut viewer = Viewer::new(map);

    let dim = viewer.display().pixels()[0];
    viewer.set_exposure(8.0);
    let bright = viewer.display().pixels()[0];
    assert!(bright > dim);
}
