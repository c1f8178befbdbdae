use std::io::{BufRead, Write};
use std::path::PathBuf;

use plate_export::{
    write_report, PlateNames, PlateReport, PresentationSink, StepSink, StlEncoding, StlSink,
};
use plate_kernel::BoxKernel;
use plate_ops::{generate_plates_from_path, load_config, validate_config};
use plate_types::PlateConfig;
use tracing::{info, warn};

use crate::args::{Args, OutputFormat};
use crate::errors::CliError;
use crate::prompt::Prompter;

/// Everything needed for one run once flags, config file and prompts are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub image: PathBuf,
    pub config: PlateConfig,
}

/// Merge the config file, command-line flags and interactive answers.
///
/// Flags win over the config file. Values neither gives are prompted for in
/// a fixed order, unless prompting is off, in which case the defaults stand.
pub fn resolve<R: BufRead, W: Write>(
    args: &Args,
    prompter: &mut Prompter<R, W>,
) -> Result<Resolved, CliError> {
    let interactive = !args.no_prompt;

    let image = match &args.image {
        Some(path) => path.clone(),
        None if interactive => PathBuf::from(prompter.ask("Image dir:", "image")?),
        None => return Err(CliError::MissingInput { parameter: "image" }),
    };

    let (mut config, from_file) = match &args.config {
        Some(path) => (load_config(path)?, true),
        None => (PlateConfig::default(), false),
    };
    let ask = interactive && !from_file;

    config.base_thickness = match args.base {
        Some(v) => v,
        None if ask => prompter.ask_f64("White thickness:", "base_thickness")?,
        None => config.base_thickness,
    };
    config.cut_thickness = match args.cut {
        Some(v) => v,
        None if ask => prompter.ask_f64("Black thickness:", "cut_thickness")?,
        None => config.cut_thickness,
    };
    config.black_inside |= args.black_inside;

    let checker = &mut config.checkerboard;
    if args.no_checkerboard {
        checker.enabled = false;
    } else if let Some(t) = args.checker_thickness {
        checker.enabled = true;
        checker.thickness = t;
    } else if ask {
        checker.enabled = prompter.ask_yes_no("Use checkerboard? (y/n):", "checkerboard.enabled")?;
        if checker.enabled {
            checker.thickness =
                prompter.ask_f64("Checkerboard thickness:", "checkerboard.thickness")?;
        }
    }
    if let Some(grid) = args.grid {
        checker.grid = grid;
    }
    if let Some(inset) = args.inset {
        checker.inset_margin = inset;
    }

    validate_config(&config)?;
    Ok(Resolved { image, config })
}

/// Generate and export plates for one image. Returns the files written.
pub fn run<R: BufRead, W: Write>(
    args: &Args,
    prompter: &mut Prompter<R, W>,
) -> Result<Vec<PathBuf>, CliError> {
    let Resolved { image, config } = resolve(args, prompter)?;
    info!(image = %image.display(), ?config, "generating plates");

    let mut kernel = BoxKernel::new();
    let output = generate_plates_from_path(&mut kernel, &image, &config).map_err(|source| {
        CliError::Image {
            path: image.display().to_string(),
            source,
        }
    })?;
    for warning in &output.diagnostics.warnings {
        warn!("{warning}");
    }

    let names = PlateNames::from_path(&image);
    let mut written = match args.format {
        OutputFormat::Stl | OutputFormat::StlAscii => {
            let encoding = if args.format == OutputFormat::StlAscii {
                StlEncoding::Ascii
            } else {
                StlEncoding::Binary
            };
            let mut sink = StlSink::new(&args.out, encoding);
            sink.present(&mut kernel, &output.plates, &names)?;
            sink.written
        }
        OutputFormat::Step => {
            let mut sink = StepSink::new(&args.out);
            sink.present(&mut kernel, &output.plates, &names)?;
            sink.written
        }
    };

    if let Some(path) = &args.report {
        let source = image.display().to_string();
        write_report(path, &PlateReport::new(&source, &output))?;
        written.push(path.clone());
    }
    Ok(written)
}
