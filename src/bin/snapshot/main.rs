// snapshot - Render the rain headless to a PNG
//
// Runs the world for a number of frames, encodes the last one and rasterizes
// it with a built-in bitmap font. Handy for eyeballing tuning changes without
// a browser.
//
// Usage: cargo run --bin snapshot -- [--width N] [--height N] [--frames N]
//                                    [--seed N] [--config FILE] [--out FILE]

mod glyphs;
mod raster;

use std::env;
use std::fs;
use std::process;

use glyph_rain::{Config, Encoder, RainWorld, State};

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let mut width = 800u32;
    let mut height = 600u32;
    let mut frames = 900u32;
    let mut seed: Option<u32> = None;
    let mut config_path: Option<String> = None;
    let mut out = String::from("rain.png");

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--width" => { width = value.and_then(|s| s.parse().ok()).unwrap_or(width); i += 2; }
            "--height" => { height = value.and_then(|s| s.parse().ok()).unwrap_or(height); i += 2; }
            "--frames" => { frames = value.and_then(|s| s.parse().ok()).unwrap_or(frames); i += 2; }
            "--seed" => { seed = value.and_then(|s| s.parse().ok()); i += 2; }
            "--config" => { config_path = value.cloned(); i += 2; }
            "--out" => { out = value.cloned().unwrap_or(out); i += 2; }
            "--help" | "-h" => {
                println!("Usage: {} [--width N] [--height N] [--frames N] [--seed N] [--config FILE] [--out FILE]", args[0]);
                return;
            }
            other => {
                eprintln!("ignoring unknown argument {other}");
                i += 1;
            }
        }
    }

    let mut config = match config_path {
        Some(path) => match fs::read_to_string(&path).map_err(|e| e.to_string()).and_then(|s| Config::from_json(&s)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{path}: {e}");
                process::exit(1);
            }
        },
        None => Config::default(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }

    if width == 0 || height == 0 {
        eprintln!("width and height must be positive");
        process::exit(1);
    }

    println!("Rendering {} frames at {}x{} (seed {})...", frames, width, height, config.seed);

    let mut world = RainWorld::with_config(width, height, &config);
    let mut cues = 0usize;
    for _ in 0..frames {
        world.tick();
        cues += world.drain_cues().count();
    }

    let falling = world.entities().iter().filter(|e| e.state == State::Falling).count();
    let stacked = world.entities().len() - falling;
    println!("  {} falling, {} stacked, {} plucks", falling, stacked, cues);

    let mut encoder = Encoder::new(width, height, config.seed.rotate_left(16));
    let cmds = encoder.encode(&world).to_vec();
    let img = raster::paint(&cmds, encoder.grain(), width, height);

    if let Err(e) = img.save(&out) {
        eprintln!("failed to write {out}: {e}");
        process::exit(1);
    }

    println!("Done! Wrote {}", out);
}
