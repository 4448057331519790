use argh::FromArgs;
use serde::Deserialize;
use std::path::PathBuf;

use planewarp::geometry::{find_homography, HomographyError, RansacParams};
use planewarp::imgproc::{
    draw::GuideStyle,
    parallel::ExecutionStrategy,
    warp::{render_preview, SplitRegion},
};
use planewarp::io as pio;

#[derive(FromArgs)]
/// Estimate a homography from point pairs and write a split warp preview
struct Args {
    /// path to the source image that gets warped
    #[argh(option, short = 's')]
    source: PathBuf,

    /// path to the target image the warp is composited on
    #[argh(option, short = 't')]
    target: PathBuf,

    /// path to a json file with the point correspondences
    #[argh(option, short = 'p')]
    points: PathBuf,

    /// path of the output png
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// percentage of the target width that shows the warp
    #[argh(option, default = "50.0")]
    split_x: f64,

    /// percentage of the target height that shows the warp
    #[argh(option, default = "100.0")]
    split_y: f64,

    /// random seed for RANSAC, overrides the one in the points file
    #[argh(option)]
    seed: Option<u64>,

    /// run the warp on the current thread only
    #[argh(switch)]
    serial: bool,
}

/// Correspondences file, points given in each image's pixel coordinates.
#[derive(Deserialize)]
struct PointPairs {
    points1: Vec<[f64; 2]>,
    points2: Vec<[f64; 2]>,
    #[serde(default)]
    ransac: RansacParams,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let pairs: PointPairs = serde_json::from_reader(std::fs::File::open(&args.points)?)?;
    let mut params = pairs.ransac;
    if args.seed.is_some() {
        params.random_seed = args.seed;
    }

    let estimate = find_homography(&pairs.points1, &pairs.points2, &params)?;
    log::info!(
        "estimated homography with {:?} from {} pairs",
        estimate.method,
        pairs.points1.len()
    );

    println!("homography:\n{}", estimate.homography);
    println!(
        "inliers: {}/{}",
        estimate.inliers.len(),
        pairs.points1.len()
    );

    if estimate.is_degenerate() {
        log::error!("the correspondences do not determine a homography");
        return Err(HomographyError::DegenerateConfiguration {
            zeroed_pivots: estimate.zeroed_pivots,
        }
        .into());
    }

    let source = pio::read_image_rgba8(&args.source)?;
    let target = pio::read_image_rgba8(&args.target)?;

    let split = SplitRegion::new(args.split_x, args.split_y)?;
    let strategy = if args.serial {
        ExecutionStrategy::Serial
    } else {
        ExecutionStrategy::ParallelRows
    };

    let preview = render_preview(
        &source,
        &target,
        estimate.homography.matrix(),
        split,
        strategy,
        &GuideStyle::default(),
    )?;

    pio::write_image_png_rgba8(&args.output, &preview)?;
    println!("preview written to {}", args.output.display());

    Ok(())
}
