use clap::{ArgAction, CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use thumbstrip::config::{self, ConfigError, Overrides};
use thumbstrip::imaging::RustEngine;
use thumbstrip::logger;
use thumbstrip::pipeline::{Pipeline, StripError};

#[derive(Parser)]
#[command(name = "thumbstrip")]
#[command(about = "Pack images into a single thumbnail strip")]
#[command(long_about = "\
Pack images into a single thumbnail strip

Every image is scaled to the row height, placed left to right in the order
given, and wrapped onto a new row when it would overflow the strip width.
The strip is written as one image; a map file can record where each
thumbnail landed:

  name<TAB>x0<TAB>y0<TAB>x1<TAB>y1

The output is [format:]path. Use '-' for standard output, e.g. 'png:-'.
Without a format prefix the format comes from the file extension.")]
#[command(version)]
#[command(disable_help_flag = true)]
struct Cli {
    /// Output image, [format:]path ("-" for stdout) [default: pnm:-]
    #[arg(short, long, value_name = "DEST")]
    output: Option<String>,

    /// Write a coordinate map to this file
    #[arg(short, long = "map", value_name = "FILE")]
    map: Option<PathBuf>,

    /// Row height in pixels [default: 28]
    #[arg(short = 'h', long, value_parser = clap::value_parser!(u32).range(1..))]
    height: Option<u32>,

    /// Space between thumbnails and rows in pixels [default: 4]
    #[arg(short = 's', long)]
    space: Option<u32>,

    /// Strip width in pixels [default: 732]
    #[arg(short = 'w', long, value_parser = clap::value_parser!(u32).range(1..))]
    width: Option<u32>,

    /// Parallel decode workers (default: sequential)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Read settings from a TOML file; flags override it
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report progress on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Print help
    #[arg(short = '?', long, action = ArgAction::Help)]
    help: Option<bool>,

    /// Images to pack, in order
    inputs: Vec<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            row_height: self.height,
            spacing: self.space,
            canvas_width: self.width,
            output: self.output.clone(),
            map_file: self.map.clone(),
            max_processes: self.jobs,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("thumbstrip: {err}");
            if matches!(err, StripError::Config(ConfigError::NoInputImages)) {
                eprintln!("{}", Cli::command().render_usage());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), StripError> {
    let config = config::load_config(cli.config.as_deref())?.with_overrides(cli.overrides());
    let engine = RustEngine::new();
    Pipeline::new(&engine, config).run(&cli.inputs)?;
    Ok(())
}
