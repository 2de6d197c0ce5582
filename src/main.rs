//! Headless demo driver.
//!
//! Steps the cloud simulation at a fixed rate for a wall-clock-independent
//! number of simulated seconds, spinning the globe transform and orbiting
//! the camera the way a windowed host would, and reports throughput.

use cirrus::util::FpsCounter;
use cirrus::{BallView, FlowConfig, FlowSphere, Quat, Transform, Vec3, CLOUDPOINT_STRIDE};

const STEP_RATE: f64 = 60.0;

struct Options {
    config: FlowConfig,
    seconds: f64,
}

/// Parse command line arguments
fn parse_args() -> Result<Options, String> {
    let args: Vec<String> = std::env::args().collect();
    let mut config = FlowConfig::default();
    let mut seconds = 10.0;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config = FlowConfig::load(&args[i + 1])?;
                    i += 1;
                }
            },
            "--streamlines" => config = FlowConfig::streamlines(),
            "--points" | "-n" => {
                if i + 1 < args.len() {
                    if let Ok(n) = args[i + 1].parse::<usize>() {
                        config.points = n;
                    }
                    i += 1;
                }
            },
            "--seed" | "-s" => {
                if i + 1 < args.len() {
                    if let Ok(s) = args[i + 1].parse::<u64>() {
                        config.seed = s;
                    }
                    i += 1;
                }
            },
            "--seconds" | "-t" => {
                if i + 1 < args.len() {
                    if let Ok(t) = args[i + 1].parse::<f64>() {
                        seconds = t;
                    }
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: cirrus [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --config F, -c F    Load simulation config from a JSON file");
                println!("  --streamlines       Use the streamline-visualization preset");
                println!("  --points N, -n N    Particle pool size (default: 12000)");
                println!("  --seed S, -s S      Particle sampler seed (default: 0)");
                println!("  --seconds T, -t T   Simulated seconds to run (default: 10)");
                println!("  --help              Show this help message");
                std::process::exit(0);
            },
            _ => {},
        }
        i += 1;
    }

    Ok(Options { config, seconds })
}

/// Mean wind speed over the particle buffer
fn mean_speed(coordinates: &[f32]) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for record in coordinates.chunks_exact(CLOUDPOINT_STRIDE) {
        sum += (f64::from(record[3]).powi(2)
            + f64::from(record[4]).powi(2)
            + f64::from(record[5]).powi(2))
        .sqrt();
        count += 1;
    }
    if count > 0 {
        sum / count as f64
    } else {
        0.0
    }
}

fn max_age(coordinates: &[f32]) -> f32 {
    coordinates
        .chunks_exact(CLOUDPOINT_STRIDE)
        .map(|record| record[6])
        .fold(0.0, f32::max)
}

fn main() -> Result<(), String> {
    let options = parse_args()?;
    let dt = 1.0 / STEP_RATE;
    let steps = (options.seconds * STEP_RATE).round() as u64;

    println!("=== cirrus ===");
    println!(
        "Points: {}  Lifetime: {}s  Seed: {}",
        options.config.points, options.config.lifetime, options.config.seed
    );
    println!(
        "Noise: amplitude {:.5}  frequency {}  seed {}",
        options.config.noise_amplitude, options.config.noise_frequency, options.config.noise_seed
    );
    println!(
        "Simulating {:.1}s at {} steps/s...",
        options.seconds, STEP_RATE
    );
    println!();

    let mut sphere = FlowSphere::new(&options.config);
    let mut globe = Transform::default();
    let mut ball_view = BallView::at_distance(6.4);

    let mut fps_counter = FpsCounter::new(60);
    let start = std::time::Instant::now();
    let mut next_report = 1.0;

    for step in 1..=steps {
        let (_, _, avg_rate) = fps_counter.tick();
        sphere.advance(dt);

        // spin the globe and orbit the camera like a windowed host would
        globe.rotate(Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), dt * 0.1));
        globe.update_matrices();
        ball_view.theta += dt * 0.05;
        let (_eye, _view) = ball_view.position_and_view_matrix();

        let t = step as f64 * dt;
        if t + 1e-9 >= next_report {
            println!(
                "  t={:>5.1}s  {:>7.0} steps/s  mean |v| {:.3}  max age {:.2}s  theta {:+.3}",
                t,
                avg_rate,
                mean_speed(sphere.coordinates()),
                max_age(sphere.coordinates()),
                sphere.theta()
            );
            next_report += 1.0;
        }
    }

    let elapsed = start.elapsed().as_secs_f64();
    println!();
    if elapsed > 0.0 {
        println!(
            "Done: {} steps in {:.2}s wall ({:.0} steps/s)",
            steps,
            elapsed,
            steps as f64 / elapsed
        );
    } else {
        println!("Done: {} steps", steps);
    }

    Ok(())
}
