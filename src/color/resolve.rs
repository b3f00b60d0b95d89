use itertools::{Itertools, MinMaxResult};
use std::sync::Arc;

use super::{Color, Colormap, ColormapRegistry};
use crate::error::{Error, ErrorKind, Result};
use crate::table::Table;

/// Every place a day's color may come from. Explicit columns are consulted
/// before the table; within one source colors beat values.
#[derive(Default)]
pub struct ColorSources<'a> {
    pub colors: Option<Vec<Color>>,
    pub values: Option<Vec<Option<f64>>>,
    pub table: Option<&'a dyn Table>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColors {
    /// One entry per day, `None` where there is no data.
    pub colors: Vec<Option<Color>>,
    /// Values to annotate the days with, if any were given.
    pub values: Option<Vec<Option<f64>>>,
}

enum Fill {
    Colors(Vec<Color>),
    Values(Vec<Option<f64>>),
}

pub struct ColorResolver {
    colormap: Arc<dyn Colormap>,
}

impl ColorResolver {
    pub fn new(registry: &ColormapRegistry, colormap_name: &str) -> Result<Self> {
        Ok(ColorResolver {
            colormap: registry.get(colormap_name)?,
        })
    }

    pub fn with_colormap(colormap: Arc<dyn Colormap>) -> Self {
        ColorResolver { colormap }
    }

    pub fn resolve(&self, sources: ColorSources<'_>, day_count: u32) -> Result<ResolvedColors> {
        let ColorSources {
            colors,
            values,
            table,
        } = sources;

        let table_colors = || table.and_then(|table| table.colors());
        let table_values = || table.and_then(|table| table.values()).map(sanitize);

        let values = values.map(sanitize);

        let fill = if let Some(colors) = colors {
            Fill::Colors(colors)
        } else if let Some(values) = &values {
            Fill::Values(values.clone())
        } else if let Some(colors) = table_colors() {
            Fill::Colors(colors)
        } else if let Some(values) = table_values() {
            Fill::Values(values)
        } else {
            return Err(no_color_source());
        };

        let values = values.or_else(table_values);
        if let Some(values) = &values {
            check_count("values", values.len(), day_count)?;
        }

        let colors = match fill {
            Fill::Colors(colors) => {
                check_count("colors", colors.len(), day_count)?;
                colors.into_iter().map(Some).collect()
            }
            // counted above, they are the annotation values as well
            Fill::Values(values) => self.map_values(&values),
        };

        Ok(ResolvedColors { colors, values })
    }

    fn map_values(&self, values: &[Option<f64>]) -> Vec<Option<Color>> {
        normalize(values)
            .into_iter()
            .map(|norm| norm.map(|t| Color::Rgb(self.colormap.rgb(t))))
            .collect()
    }
}

fn no_color_source() -> Error {
    Error::new(
        ErrorKind::NoColorSourceError,
        "neither colors nor values were given, directly or through a 'colors' or 'values' column",
    )
}

fn check_count(what: &str, got: usize, day_count: u32) -> Result<()> {
    if got == day_count as usize {
        Ok(())
    } else {
        Err(Error::new(
            ErrorKind::ColorCountMismatch,
            &format!("expected {} {} for this month, got {}", day_count, what, got),
        ))
    }
}

fn sanitize(values: Vec<Option<f64>>) -> Vec<Option<f64>> {
    values
        .into_iter()
        .map(|value| value.filter(|v| v.is_finite()))
        .collect()
}

/// Rescales present values linearly onto `[0, 1]`. If every present value is
/// the same they all map to 0.
pub fn normalize(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let (min, max) = match values.iter().flatten().filter(|v| v.is_finite()).minmax_by(|a, b| {
        a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
    }) {
        MinMaxResult::NoElements => return vec![None; values.len()],
        MinMaxResult::OneElement(v) => (*v, *v),
        MinMaxResult::MinMax(min, max) => (*min, *max),
    };

    let span = max - min;

    values
        .iter()
        .map(|value| {
            value.filter(|v| v.is_finite()).map(|v| {
                if span > 0.0 {
                    (v - min) / span
                } else {
                    0.0
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::table::TomlTable;

    fn resolver() -> ColorResolver {
        ColorResolver::new(ColormapRegistry::builtin(), "Greys").unwrap()
    }

    fn rgb(colors: &[Option<Color>]) -> Vec<Option<Rgb>> {
        colors
            .iter()
            .map(|c| c.as_ref().map(|c| c.to_rgb().unwrap()))
            .collect()
    }

    #[test]
    fn normalizes_linearly() {
        assert_eq!(
            normalize(&[Some(1.0), Some(2.0), Some(3.0)]),
            vec![Some(0.0), Some(0.5), Some(1.0)]
        );
    }

    #[test]
    fn equal_values_normalize_to_zero() {
        assert_eq!(
            normalize(&[Some(4.0), Some(4.0), None]),
            vec![Some(0.0), Some(0.0), None]
        );
        assert_eq!(normalize(&[None, None]), vec![None, None]);
    }

    #[test]
    fn values_through_colormap() {
        let resolved = resolver()
            .resolve(
                ColorSources {
                    values: Some(vec![Some(1.0), None, Some(2.0), Some(3.0)]),
                    ..Default::default()
                },
                4,
            )
            .unwrap();

        assert_eq!(
            rgb(&resolved.colors),
            vec![
                Some(Rgb::new(255, 255, 255)),
                None,
                Some(Rgb::new(128, 128, 128)),
                Some(Rgb::new(0, 0, 0)),
            ]
        );
        assert_eq!(
            resolved.values,
            Some(vec![Some(1.0), None, Some(2.0), Some(3.0)])
        );
    }

    #[test]
    fn nan_is_missing() {
        let resolved = resolver()
            .resolve(
                ColorSources {
                    values: Some(vec![Some(f64::NAN), Some(2.0)]),
                    ..Default::default()
                },
                2,
            )
            .unwrap();

        assert_eq!(resolved.colors[0], None);
        assert_eq!(resolved.values, Some(vec![None, Some(2.0)]));
    }

    #[test]
    fn infinity_is_missing() {
        assert_eq!(
            normalize(&[Some(1.0), Some(f64::INFINITY), Some(3.0)]),
            vec![Some(0.0), None, Some(1.0)]
        );

        let resolved = resolver()
            .resolve(
                ColorSources {
                    values: Some(vec![Some(f64::NEG_INFINITY), Some(2.0)]),
                    ..Default::default()
                },
                2,
            )
            .unwrap();

        assert_eq!(resolved.colors[0], None);
        assert_eq!(resolved.values, Some(vec![None, Some(2.0)]));
    }

    #[test]
    fn explicit_colors_pass_through() {
        let colors = vec![Color::Named("red".to_owned()), Color::from((0, 0, 255))];
        let resolved = resolver()
            .resolve(
                ColorSources {
                    colors: Some(colors.clone()),
                    values: Some(vec![Some(1.0), Some(9.0)]),
                    ..Default::default()
                },
                2,
            )
            .unwrap();

        assert_eq!(
            resolved.colors,
            colors.into_iter().map(Some).collect::<Vec<_>>()
        );
        assert_eq!(resolved.values, Some(vec![Some(1.0), Some(9.0)]));
    }

    #[test]
    fn annotation_values_are_counted_too() {
        let red = Color::Named("red".to_owned());

        let err = resolver()
            .resolve(
                ColorSources {
                    colors: Some(vec![red.clone(); 30]),
                    values: Some(vec![Some(1.0); 3]),
                    ..Default::default()
                },
                30,
            )
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ColorCountMismatch));

        let table = TomlTable::parse("values = [1, 2, 3]").unwrap();
        let err = resolver()
            .resolve(
                ColorSources {
                    colors: Some(vec![red; 30]),
                    table: Some(&table),
                    ..Default::default()
                },
                30,
            )
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ColorCountMismatch));
    }

    #[test]
    fn count_mismatch() {
        let err = resolver()
            .resolve(
                ColorSources {
                    colors: Some(vec![Color::from((0, 0, 0))]),
                    ..Default::default()
                },
                30,
            )
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ColorCountMismatch));

        let err = resolver()
            .resolve(
                ColorSources {
                    values: Some(vec![Some(1.0); 31]),
                    ..Default::default()
                },
                30,
            )
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ColorCountMismatch));
    }

    #[test]
    fn no_source() {
        let err = resolver()
            .resolve(ColorSources::default(), 30)
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::NoColorSourceError));

        let empty = TomlTable::default();
        let err = resolver()
            .resolve(
                ColorSources {
                    table: Some(&empty),
                    ..Default::default()
                },
                30,
            )
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::NoColorSourceError));
    }

    #[test]
    fn table_colors_beat_table_values() {
        let table = TomlTable::parse(
            r##"
            colors = ["black", "white"]
            values = [5, 6]
            "##,
        )
        .unwrap();

        let resolved = resolver()
            .resolve(
                ColorSources {
                    table: Some(&table),
                    ..Default::default()
                },
                2,
            )
            .unwrap();

        assert_eq!(
            rgb(&resolved.colors),
            vec![Some(Rgb::new(0, 0, 0)), Some(Rgb::new(255, 255, 255))]
        );
        assert_eq!(resolved.values, Some(vec![Some(5.0), Some(6.0)]));
    }

    #[test]
    fn explicit_values_beat_table_colors() {
        let table = TomlTable::parse(r#"colors = ["red", "red"]"#).unwrap();

        let resolved = resolver()
            .resolve(
                ColorSources {
                    values: Some(vec![Some(0.0), Some(1.0)]),
                    table: Some(&table),
                    ..Default::default()
                },
                2,
            )
            .unwrap();

        assert_eq!(
            rgb(&resolved.colors),
            vec![Some(Rgb::new(255, 255, 255)), Some(Rgb::new(0, 0, 0))]
        );
    }

    #[test]
    fn unknown_colormap() {
        let err = ColorResolver::new(ColormapRegistry::builtin(), "nope")
            .err()
            .unwrap();
        assert!(matches!(err.kind, ErrorKind::UnsupportedColormap));
    }
}
