extern crate monthmap as lib;

use flexi_logger::{FileSpec, Logger};
use lib::calendar::{MonthInput, YearInput};
use lib::color::{parse_color_list, Color, ColormapRegistry};
use lib::config::RenderConfig;
use lib::layout::{CANVAS_HEIGHT, CANVAS_WIDTH};
use lib::raster::{load_font, Canvas, ImageCanvas, SystemFonts};
use lib::table::{parse_value_list, TomlTable};
use lib::week::FirstDay;
use lib::MonthPlotBuilder;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "monthmap",
    about = "Draws a calendar month with every day colored by its data."
)]
pub struct Args {
    #[structopt(name = "MONTH", help = "month number (1-12) or English name")]
    pub month: String,

    #[structopt(name = "YEAR", help = "year, two digit years are in the 2000s")]
    pub year: YearInput,

    #[structopt(
        short = "o",
        long = "output",
        help = "path of the PNG to write",
        parse(from_os_str)
    )]
    pub output: PathBuf,

    #[structopt(
        short = "d",
        long = "data",
        help = "TOML file with 'colors' and/or 'values' arrays",
        parse(from_os_str)
    )]
    pub data: Option<PathBuf>,

    #[structopt(long = "values", help = "comma separated values, one per day")]
    pub values: Option<String>,

    #[structopt(long = "colors", help = "comma separated colors, one per day")]
    pub colors: Option<String>,

    #[structopt(long = "colormap", help = "colormap for values, '_r' reverses it")]
    pub colormap: Option<String>,

    #[structopt(long = "font", help = "font name or path to a font file")]
    pub font: Option<String>,

    #[structopt(long = "first-day", help = "Monday, Sunday, Saturday or Friday")]
    pub first_day: Option<FirstDay>,

    #[structopt(long = "precision", help = "decimal places of annotations")]
    pub precision: Option<usize>,

    #[structopt(long = "no-annotation", help = "do not print values into cells")]
    pub no_annotation: bool,

    #[structopt(long = "no-day-numbers", help = "do not print day numbers")]
    pub no_day_numbers: bool,

    #[structopt(long = "text-color")]
    pub text_color: Option<Color>,

    #[structopt(long = "background-color")]
    pub background_color: Option<Color>,

    #[structopt(long = "neutral-color", help = "fill of days without data")]
    pub neutral_color: Option<Color>,

    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut RenderConfig) {
        if let Some(colormap) = &self.colormap {
            config.colormap_name = colormap.clone();
        }
        if let Some(font) = &self.font {
            config.font_name = font.clone();
        }
        if let Some(first_day) = self.first_day {
            config.first_day = first_day;
        }
        if let Some(precision) = self.precision {
            config.annotation_precision = precision;
        }
        if let Some(color) = &self.text_color {
            config.text_color = color.clone();
        }
        if let Some(color) = &self.background_color {
            config.background_color = color.clone();
        }
        if let Some(color) = &self.neutral_color {
            config.neutral_color = color.clone();
        }
        config.show_annotation &= !self.no_annotation;
        config.show_day_numbers &= !self.no_day_numbers;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = &args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    std::panic::set_hook(Box::new(|info| {
        eprintln!("monthmap ran into a fatal error!");
        eprintln!(
            "Consider filing an issue with a log file and the backtrace below at {}",
            env!("CARGO_PKG_REPOSITORY")
        );

        eprintln!("{}", info);
        eprintln!("{:?}", backtrace::Backtrace::new());
    }));

    let mut config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    args.apply(&mut config.render);

    let table = args.data.as_deref().map(TomlTable::load).transpose()?;

    let mut builder = MonthPlotBuilder::new(MonthInput::from_arg(&args.month), args.year)
        .with_config(config.render);

    if let Some(colors) = &args.colors {
        builder = builder.with_colors(parse_color_list(colors)?);
    }
    if let Some(values) = &args.values {
        builder = builder.with_values(parse_value_list(values)?);
    }
    if let Some(table) = &table {
        builder = builder.with_table(table);
    }

    let fonts = SystemFonts::new(config.font_dirs);
    let plot = builder.finish(ColormapRegistry::builtin(), &fonts)?;

    let background = plot.config().background_color.to_rgb()?;
    let mut canvas = ImageCanvas::new(CANVAS_WIDTH, CANVAS_HEIGHT, background)
        .with_font(load_font(plot.font_path())?);

    plot.render(&mut canvas)?;
    canvas.save(&args.output)?;

    Ok(())
}
