use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

use super::Rgb;
use crate::error::{Error, ErrorKind, Result};

/// A continuous color scale over `[0, 1]`.
pub trait Colormap: Send + Sync {
    /// Maps a normalized scalar to unit RGB intensities. Inputs outside of
    /// `[0, 1]` are clamped.
    fn map(&self, t: f64) -> [f64; 3];

    fn rgb(&self, t: f64) -> Rgb {
        Rgb::from_unit(self.map(t))
    }
}

type Stop = (f64, [f64; 3]);

/// Piecewise linear interpolation between fixed stops.
#[derive(Debug, Clone, Copy)]
pub struct LinearSegmented {
    stops: &'static [Stop],
}

impl LinearSegmented {
    /// `stops` must start at 0.0, end at 1.0 and be sorted.
    pub const fn new(stops: &'static [Stop]) -> Self {
        LinearSegmented { stops }
    }
}

impl Colormap for LinearSegmented {
    fn map(&self, t: f64) -> [f64; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        for window in self.stops.windows(2) {
            let (lo, lo_rgb) = window[0];
            let (hi, hi_rgb) = window[1];

            if t <= hi {
                let frac = if hi > lo { (t - lo) / (hi - lo) } else { 0.0 };
                return [
                    lo_rgb[0] + (hi_rgb[0] - lo_rgb[0]) * frac,
                    lo_rgb[1] + (hi_rgb[1] - lo_rgb[1]) * frac,
                    lo_rgb[2] + (hi_rgb[2] - lo_rgb[2]) * frac,
                ];
            }
        }

        self.stops.last().map(|(_, rgb)| *rgb).unwrap_or([0.0; 3])
    }
}

/// Runs a colormap backwards.
pub struct Reversed(pub Arc<dyn Colormap>);

impl Colormap for Reversed {
    fn map(&self, t: f64) -> [f64; 3] {
        self.0.map(1.0 - t)
    }
}

const VIRIDIS: &[Stop] = &[
    (0.0, [0.267004, 0.004874, 0.329415]),
    (0.125, [0.282623, 0.140926, 0.457517]),
    (0.25, [0.229739, 0.322361, 0.545706]),
    (0.375, [0.172719, 0.448791, 0.557885]),
    (0.5, [0.127568, 0.566949, 0.550556]),
    (0.625, [0.134692, 0.658636, 0.517649]),
    (0.75, [0.266941, 0.748751, 0.440573]),
    (0.875, [0.477504, 0.821444, 0.318195]),
    (1.0, [0.993248, 0.906157, 0.143936]),
];

const PLASMA: &[Stop] = &[
    (0.0, [0.050383, 0.029803, 0.527975]),
    (0.25, [0.494877, 0.011990, 0.657865]),
    (0.5, [0.798216, 0.280197, 0.469538]),
    (0.75, [0.973416, 0.585761, 0.251540]),
    (1.0, [0.940015, 0.975158, 0.131326]),
];

const INFERNO: &[Stop] = &[
    (0.0, [0.001462, 0.000466, 0.013866]),
    (0.25, [0.341500, 0.062325, 0.429425]),
    (0.5, [0.735683, 0.215906, 0.330245]),
    (0.75, [0.978422, 0.557937, 0.034931]),
    (1.0, [0.988362, 0.998364, 0.644924]),
];

const MAGMA: &[Stop] = &[
    (0.0, [0.001462, 0.000466, 0.013866]),
    (0.25, [0.316654, 0.071690, 0.485380]),
    (0.5, [0.716387, 0.214982, 0.475290]),
    (0.75, [0.986700, 0.535582, 0.382210]),
    (1.0, [0.987053, 0.991438, 0.749504]),
];

const CIVIDIS: &[Stop] = &[
    (0.0, [0.0, 0.135112, 0.304751]),
    (0.25, [0.274952, 0.330306, 0.421482]),
    (0.5, [0.487026, 0.479170, 0.471708]),
    (0.75, [0.735077, 0.641327, 0.414037]),
    (1.0, [0.995737, 0.909344, 0.217772]),
];

const GREYS: &[Stop] = &[(0.0, [1.0, 1.0, 1.0]), (1.0, [0.0, 0.0, 0.0])];

const BLUES: &[Stop] = &[
    (0.0, [0.968627, 0.984314, 1.0]),
    (0.5, [0.419608, 0.682353, 0.839216]),
    (1.0, [0.031373, 0.188235, 0.419608]),
];

const GREENS: &[Stop] = &[
    (0.0, [0.968627, 0.988235, 0.960784]),
    (0.5, [0.454902, 0.768627, 0.462745]),
    (1.0, [0.0, 0.266667, 0.105882]),
];

const REDS: &[Stop] = &[
    (0.0, [1.0, 0.960784, 0.941176]),
    (0.5, [0.984314, 0.415686, 0.290196]),
    (1.0, [0.403922, 0.0, 0.050980]),
];

const ORANGES: &[Stop] = &[
    (0.0, [1.0, 0.960784, 0.921569]),
    (0.5, [0.992157, 0.552941, 0.235294]),
    (1.0, [0.498039, 0.152941, 0.015686]),
];

const PURPLES: &[Stop] = &[
    (0.0, [0.988235, 0.984314, 0.992157]),
    (0.5, [0.619608, 0.603922, 0.784314]),
    (1.0, [0.247059, 0.0, 0.490196]),
];

const RDYLGN: &[Stop] = &[
    (0.0, [0.647059, 0.0, 0.149020]),
    (0.25, [0.956863, 0.427451, 0.262745]),
    (0.5, [1.0, 1.0, 0.749020]),
    (0.75, [0.450980, 0.764706, 0.388235]),
    (1.0, [0.0, 0.407843, 0.215686]),
];

const COOLWARM: &[Stop] = &[
    (0.0, [0.229806, 0.298718, 0.753683]),
    (0.5, [0.865003, 0.865003, 0.865003]),
    (1.0, [0.705673, 0.015556, 0.150233]),
];

static BUILTIN: Lazy<ColormapRegistry> = Lazy::new(ColormapRegistry::with_builtin);

/// Read-only lookup of colormaps by name.
#[derive(Default, Clone)]
pub struct ColormapRegistry {
    maps: HashMap<String, Arc<dyn Colormap>>,
}

impl ColormapRegistry {
    const REVERSED_SUFFIX: &'static str = "_r";

    pub fn new() -> Self {
        Self::default()
    }

    /// The shared registry with every built-in colormap.
    pub fn builtin() -> &'static ColormapRegistry {
        &BUILTIN
    }

    pub fn with_builtin() -> Self {
        let mut registry = Self::new();

        for (name, stops) in [
            ("viridis", VIRIDIS),
            ("plasma", PLASMA),
            ("inferno", INFERNO),
            ("magma", MAGMA),
            ("cividis", CIVIDIS),
            ("Greys", GREYS),
            ("Blues", BLUES),
            ("Greens", GREENS),
            ("Reds", REDS),
            ("Oranges", ORANGES),
            ("Purples", PURPLES),
            ("RdYlGn", RDYLGN),
            ("coolwarm", COOLWARM),
        ]
        .iter()
        {
            registry.register(name, LinearSegmented::new(*stops));
        }

        registry
    }

    pub fn register<C: Colormap + 'static>(&mut self, name: &str, colormap: C) {
        self.maps.insert(name.to_owned(), Arc::new(colormap));
    }

    /// Looks up `name`; a trailing `_r` selects the reversed map.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Colormap>> {
        if let Some(colormap) = self.maps.get(name) {
            return Ok(Arc::clone(colormap));
        }

        if let Some(base) = name.strip_suffix(Self::REVERSED_SUFFIX) {
            if let Some(colormap) = self.maps.get(base) {
                return Ok(Arc::new(Reversed(Arc::clone(colormap))));
            }
        }

        Err(Error::new(
            ErrorKind::UnsupportedColormap,
            &format!(
                "colormap '{}' is not registered, available are {} (append _r to reverse)",
                name,
                self.names().join(", ")
            ),
        ))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.maps.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
