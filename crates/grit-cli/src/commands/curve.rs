//! Transfer curve printing command.
//!
//! Prints `input output` pairs of the clamped wet curve, ready for gnuplot
//! or a spreadsheet.

use clap::Args;
use grit_effects::SaturationAlgorithm;

#[derive(Args)]
pub struct CurveArgs {
    /// Saturation algorithm
    #[arg(short, long, default_value = "tape")]
    algorithm: SaturationAlgorithm,

    /// Drive in percent (0 to 100)
    #[arg(short, long, default_value_t = 100.0)]
    gain: f32,

    /// DC offset added before shaping (-1 to 1)
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    bias: f32,

    /// Number of points across [-1, 1]
    #[arg(short, long, default_value_t = 21, value_parser = clap::value_parser!(u32).range(2..))]
    points: u32,
}

/// Sample the wet curve of `algorithm` at `points` evenly spaced inputs.
fn transfer_curve(
    algorithm: SaturationAlgorithm,
    gain: f32,
    bias: f32,
    points: u32,
) -> Vec<(f32, f32)> {
    let drive = algorithm.map_gain(gain.clamp(0.0, 100.0) / 100.0);
    let bias = bias.clamp(-1.0, 1.0);
    let last = (points.max(2) - 1) as f32;
    (0..points.max(2))
        .map(|i| {
            let x = -1.0 + 2.0 * i as f32 / last;
            (x, algorithm.shape(x + bias, drive))
        })
        .collect()
}

pub fn run(args: CurveArgs) -> anyhow::Result<()> {
    let drive = args.algorithm.map_gain(args.gain.clamp(0.0, 100.0) / 100.0);
    println!(
        "# {} gain {}% (drive {drive}) bias {}",
        args.algorithm, args.gain, args.bias
    );
    println!("# input output");
    for (x, y) in transfer_curve(args.algorithm, args.gain, args.bias, args.points) {
        println!("{x:.4} {y:.6}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_unit_interval() {
        let curve = transfer_curve(SaturationAlgorithm::HardClip, 0.0, 0.0, 5);
        let inputs: Vec<f32> = curve.iter().map(|&(x, _)| x).collect();
        assert_eq!(inputs, [-1.0, -0.5, 0.0, 0.5, 1.0]);
        // Drive 1 leaves the unit interval untouched.
        assert!(curve.iter().all(|&(x, y)| x == y));
    }

    #[test]
    fn rectifier_is_non_negative() {
        let curve = transfer_curve(SaturationAlgorithm::FullWaveRectifier, 50.0, 0.0, 11);
        assert!(curve.iter().all(|&(_, y)| (0.0..=1.0).contains(&y)));
    }

    #[test]
    fn bias_shifts_input() {
        let plain = transfer_curve(SaturationAlgorithm::HardClip, 0.0, 0.0, 3);
        let biased = transfer_curve(SaturationAlgorithm::HardClip, 0.0, 0.5, 3);
        assert_eq!(plain[1].1, 0.0);
        assert_eq!(biased[1].1, 0.5);
        assert_eq!(biased[2].1, 1.0);
    }
}
