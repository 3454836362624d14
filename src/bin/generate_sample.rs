use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use image::{Rgb, RgbImage};
use serde::Serialize;

/// Writes a sample GrowLocations.csv and map7.png for trying out grow-map.
#[derive(Parser, Debug)]
struct Args {
    /// Directory the two files are written to
    #[arg(default_value = ".")]
    out_dir: PathBuf,

    /// Number of location rows
    #[arg(long, default_value_t = 400)]
    rows: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct LocationRow {
    serial: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    sensor_type: &'static str,
    code: String,
    begin_time: String,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}

// Roughly the default plotting window, widened so some rows fall outside it.
const LAT_RANGE: (f64, f64) = (-14.0, 5.0);
const LON_RANGE: (f64, f64) = (48.0, 61.0);
const SENSOR_TYPES: [&str; 3] = ["Flower Power", "Parrot Pot", "Thingful"];

fn location_rows(rng: &mut SimpleRng, count: usize) -> Vec<LocationRow> {
    (0..count)
        .map(|i| {
            // Every 37th row lacks a coordinate, like field uploads that never got a fix.
            let blank = i % 37 == 36;
            let latitude = (!blank).then(|| rng.uniform(LAT_RANGE.0, LAT_RANGE.1));
            let longitude = Some(rng.uniform(LON_RANGE.0, LON_RANGE.1));
            LocationRow {
                serial: format!("GROW-{:05}", 10_000 + i),
                latitude: latitude.map(|v| (v * 1e4).round() / 1e4),
                longitude: longitude.map(|v| (v * 1e4).round() / 1e4),
                sensor_type: SENSOR_TYPES[i % SENSOR_TYPES.len()],
                code: format!("{:x}", rng.next_u64() & 0xffff_ffff),
                begin_time: format!("2017-{:02}-{:02}T00:00:00Z", 1 + i % 12, 1 + i % 28),
            }
        })
        .collect()
}

/// Blue-to-green gradient with a light grid every 50 px.
fn map_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if x % 50 == 0 || y % 50 == 0 {
            return Rgb([230, 230, 230]);
        }
        let fx = x as f32 / width as f32;
        let fy = y as f32 / height as f32;
        Rgb([
            (40.0 + 60.0 * fx) as u8,
            (110.0 + 120.0 * fy) as u8,
            (200.0 - 120.0 * fy) as u8,
        ])
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let mut rng = SimpleRng::new(42);

    let csv_path = args.out_dir.join("GrowLocations.csv");
    let mut writer = csv::Writer::from_path(&csv_path)
        .with_context(|| format!("creating {}", csv_path.display()))?;
    for row in location_rows(&mut rng, args.rows) {
        writer.serialize(row).context("writing location row")?;
    }
    writer.flush().context("flushing CSV")?;

    let map_path = args.out_dir.join("map7.png");
    map_image(800, 600)
        .save(&map_path)
        .with_context(|| format!("writing {}", map_path.display()))?;

    println!(
        "Wrote {} locations to {} and the backdrop to {}",
        args.rows,
        csv_path.display(),
        map_path.display()
    );
    Ok(())
}
