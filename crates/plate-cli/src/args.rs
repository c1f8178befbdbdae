use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Turn an SVG fiducial marker into printable base and cut plates.
#[derive(Debug, Clone, Parser)]
#[command(name = "marker-plates", version, about, long_about = None)]
pub struct Args {
    /// SVG marker image. Prompted for when omitted.
    pub image: Option<PathBuf>,

    /// Thickness of the white (base) plate.
    #[arg(long, value_name = "MM")]
    pub base: Option<f64>,

    /// Thickness of the black (cut) plate.
    #[arg(long, value_name = "MM")]
    pub cut: Option<f64>,

    /// Lift the cut plate and pocket the base plate to match it.
    #[arg(long)]
    pub black_inside: bool,

    /// Skip the back-face checkerboard relief.
    #[arg(long, conflicts_with = "checker_thickness")]
    pub no_checkerboard: bool,

    /// Depth of the checkerboard recesses.
    #[arg(long, value_name = "MM")]
    pub checker_thickness: Option<f64>,

    /// Checkerboard cells, e.g. `11x11`.
    #[arg(long, value_name = "COLSxROWS", value_parser = parse_grid)]
    pub grid: Option<(u32, u32)>,

    /// Fraction of each checker cell left as wall, in [0, 1).
    #[arg(long, value_name = "FRACTION")]
    pub inset: Option<f64>,

    /// JSON plate config. Values in it are not prompted for.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output directory.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub out: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Stl)]
    pub format: OutputFormat,

    /// Also write a JSON run report.
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Use defaults instead of prompting for missing values.
    #[arg(long)]
    pub no_prompt: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Binary STL.
    Stl,
    StlAscii,
    /// AP203 STEP.
    Step,
}

/// Parse `COLSxROWS`, both at least 1.
pub fn parse_grid(value: &str) -> Result<(u32, u32), String> {
    let (cols, rows) = value
        .split_once(|c: char| c.eq_ignore_ascii_case(&'x'))
        .ok_or_else(|| format!("expected COLSxROWS, got `{value}`"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<u32>()
            .ok()
            .filter(|&n| n >= 1)
            .ok_or_else(|| format!("grid dimension `{s}` must be a positive integer"))
    };
    Ok((parse(cols)?, parse(rows)?))
}
