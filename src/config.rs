use serde::Deserialize;
use std::env;
use std::fs;
use std::iter::FromIterator;
use std::path::{Path, PathBuf};

use crate::color::Color;
use crate::error::{Error, ErrorKind, Result};
use crate::week::FirstDay;

const CONFIG_PATH_ENV_VAR: &str = "MONTHMAP_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Result<Vec<PathBuf>> {
    let config_env: Option<PathBuf> = env::var_os(CONFIG_PATH_ENV_VAR).map(PathBuf::from);

    let home = dirs::home_dir().ok_or_else(|| {
        Error::new(ErrorKind::ConfigError, "Unable to find home directory")
    })?;

    let home_config = PathBuf::from_iter([&home, &PathBuf::from(".monthmap.toml")].iter());

    let config_xdg = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from_iter([PathBuf::from(dir), PathBuf::from("monthmap/config.toml")].iter())
    } else {
        PathBuf::from_iter(
            [
                home.as_path(),
                Path::new(".config"),
                Path::new("monthmap"),
                Path::new("config.toml"),
            ]
            .iter(),
        )
    };

    let mut locations = vec![config_xdg, home_config];

    if let Some(path) = config_env {
        locations.insert(0, path);
    }

    Ok(locations)
}

/// Settings for drawing one month.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub colormap_name: String,
    /// Fill for padding slots and days without data.
    pub neutral_color: Color,
    pub text_color: Color,
    pub background_color: Color,
    pub font_name: String,
    pub first_day: FirstDay,
    pub show_annotation: bool,
    pub annotation_precision: usize,
    pub show_day_numbers: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            colormap_name: "viridis".to_owned(),
            neutral_color: Color::Named("lightgray".to_owned()),
            text_color: Color::Named("black".to_owned()),
            background_color: Color::Named("white".to_owned()),
            font_name: "DejaVuSans".to_owned(),
            first_day: FirstDay::Monday,
            show_annotation: true,
            annotation_precision: 2,
            show_day_numbers: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    colormap: Option<String>,
    neutral_color: Option<Color>,
    text_color: Option<Color>,
    background_color: Option<Color>,
    font: Option<String>,
    first_day: Option<FirstDay>,
    annotation: Option<bool>,
    annotation_precision: Option<usize>,
    day_numbers: Option<bool>,
    #[serde(default)]
    font_dirs: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub render: RenderConfig,
    /// Searched for fonts before the system font directories.
    pub font_dirs: Vec<PathBuf>,
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        let defaults = RenderConfig::default();

        Ok(Config {
            render: RenderConfig {
                colormap_name: file.colormap.unwrap_or(defaults.colormap_name),
                neutral_color: file.neutral_color.unwrap_or(defaults.neutral_color),
                text_color: file.text_color.unwrap_or(defaults.text_color),
                background_color: file.background_color.unwrap_or(defaults.background_color),
                font_name: file.font.unwrap_or(defaults.font_name),
                first_day: file.first_day.unwrap_or(defaults.first_day),
                show_annotation: file.annotation.unwrap_or(defaults.show_annotation),
                annotation_precision: file
                    .annotation_precision
                    .unwrap_or(defaults.annotation_precision),
                show_day_numbers: file.day_numbers.unwrap_or(defaults.show_day_numbers),
            },
            font_dirs: file.font_dirs,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content).map_err(|err| {
            let msg = format!("{} ({})", err.message.as_deref().unwrap_or(""), path.display());
            err.with_msg(&msg)
        })?;

        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }
}

/// Loads `explicit` if given, otherwise the first config file that exists
/// in the usual locations. Without any file the defaults are used.
pub fn load_suitable_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path);
    }

    for location in find_configfile_locations()? {
        if location.is_file() {
            return Config::load(&location);
        }
        log::debug!("no configuration at {}", location.display());
    }

    log::debug!("using default configuration");
    Ok(Config::default())
}
