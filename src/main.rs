use clap::Parser;
use fractal_worker::{
    CircleArea, CliRenderController, Complex, DepthPainterKind, FractalFunction, FractalSettings,
    ImageFilePresenter, Precision, Real, SplitPolicy, Worker,
};
use fractal_worker::core::data::real::GUARD_DIGITS;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fractal_worker")]
#[command(about = "Renders one escape-time fractal frame to an image file")]
struct Args {
    #[arg(long, default_value = "-0.5", allow_hyphen_values = true)]
    center_x: String,

    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    center_y: String,

    /// Width of the view along the shorter image side
    #[arg(long, default_value = "3")]
    diameter: String,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    #[arg(long, default_value_t = 256)]
    max_depth: u32,

    #[arg(long, default_value = "2")]
    escape_edge: String,

    /// One of "Fire gradient", "Blue-white gradient", "Grayscale"
    #[arg(long, default_value = "Fire gradient")]
    painter: String,

    /// Render the Julia set for this constant, given as "re,im"
    #[arg(long, allow_hyphen_values = true)]
    julia: Option<String>,

    /// Minimum significant decimal digits; deep views raise it automatically
    #[arg(long)]
    digits: Option<usize>,

    #[arg(long, default_value_t = 4)]
    split_rows: u32,

    #[arg(long, default_value_t = 4)]
    split_cols: u32,

    /// Worker threads; defaults to one per core
    #[arg(short, long)]
    threads: Option<usize>,

    #[arg(short, long, default_value = "output/fractal.png")]
    output: PathBuf,
}

impl Args {
    fn settings(&self) -> Result<FractalSettings, Box<dyn std::error::Error>> {
        let digits = [&self.center_x, &self.center_y, &self.diameter]
            .iter()
            .map(|text| text.trim().len())
            .max()
            .unwrap_or_default()
            + GUARD_DIGITS;

        let area = CircleArea::parse(
            &self.center_x,
            &self.center_y,
            &self.diameter,
            Precision::Decimal(digits),
        )?;

        let function = match &self.julia {
            Some(c) => FractalFunction::Julia {
                c: Complex::parse(c, Precision::Native)?,
            },
            None => FractalFunction::Mandelbrot,
        };

        let defaults = FractalSettings::default();

        Ok(FractalSettings {
            area,
            max_depth: self.max_depth,
            escape_edge: Real::parse(&self.escape_edge, Precision::Native)?,
            painter: DepthPainterKind::from_name(&self.painter)?,
            function,
            precision: self.digits.map_or(Precision::Native, Precision::Decimal),
            split_policy: SplitPolicy {
                rows: self.split_rows,
                cols: self.split_cols,
                ..defaults.split_policy
            },
            ..defaults
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let settings = args.settings()?;

    let worker = match args.threads {
        Some(threads) => Worker::new(threads)?,
        None => Worker::with_default_threads()?,
    };

    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut controller = CliRenderController::new(ImageFilePresenter::new(), worker);

    let duration = controller.generate(&settings, args.width, args.height)?;
    controller.write(&args.output)?;

    println!(
        "Rendered {}x{} in {:?} -> {}",
        args.width,
        args.height,
        duration,
        args.output.display()
    );

    Ok(())
}
