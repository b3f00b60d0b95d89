use std::path::{Path, PathBuf};

use crate::calendar::{self, MonthInput, MonthSpec, YearInput};
use crate::color::{Color, ColorResolver, ColorSources, ColormapRegistry};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::grid::GridSlots;
use crate::layout::{self, RenderPlan};
use crate::raster::{self, Canvas, FontProvider, Measure};
use crate::table::Table;
use crate::week::{self, WeekAlignment};

/// Collects the inputs for one month plot. Nothing is checked until
/// `finish`, which either validates everything or fails on the first bad
/// input.
pub struct MonthPlotBuilder<'a> {
    month: MonthInput,
    year: YearInput,
    colors: Option<Vec<Color>>,
    values: Option<Vec<Option<f64>>>,
    table: Option<&'a dyn Table>,
    config: RenderConfig,
}

impl<'a> MonthPlotBuilder<'a> {
    pub fn new<M: Into<MonthInput>, Y: Into<YearInput>>(month: M, year: Y) -> Self {
        MonthPlotBuilder {
            month: month.into(),
            year: year.into(),
            colors: None,
            values: None,
            table: None,
            config: RenderConfig::default(),
        }
    }

    pub fn with_colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn with_values(mut self, values: Vec<Option<f64>>) -> Self {
        self.values = Some(values);
        self
    }

    pub fn with_table(mut self, table: &'a dyn Table) -> Self {
        self.table = Some(table);
        self
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn finish(
        self,
        colormaps: &ColormapRegistry,
        fonts: &dyn FontProvider,
    ) -> Result<MonthPlot> {
        let spec = calendar::resolve(&self.month, self.year)?;
        let facts = spec.facts();
        let alignment = week::align(&facts, self.config.first_day);

        for color in [
            &self.config.neutral_color,
            &self.config.text_color,
            &self.config.background_color,
        ]
        .iter()
        {
            color.to_rgb()?;
        }

        let font_path = fonts.resolve(&self.config.font_name)?;

        let resolver = ColorResolver::new(colormaps, &self.config.colormap_name)?;
        let resolved = resolver.resolve(
            ColorSources {
                colors: self.colors,
                values: self.values,
                table: self.table,
            },
            facts.day_count,
        )?;

        for color in resolved.colors.iter().flatten() {
            color.to_rgb()?;
        }

        let grid = GridSlots::build(&alignment, &resolved.colors, resolved.values.as_deref());

        log::debug!(
            "{}: {} days starting at column {}, {} visible rows",
            spec,
            grid.day_count(),
            alignment.leading_offset,
            grid.visible_rows()
        );

        Ok(MonthPlot {
            spec,
            alignment,
            grid,
            config: self.config,
            font_path,
        })
    }
}

/// A validated month, ready to be laid out and drawn.
#[derive(Debug, Clone)]
pub struct MonthPlot {
    spec: MonthSpec,
    alignment: WeekAlignment,
    grid: GridSlots,
    config: RenderConfig,
    font_path: PathBuf,
}

impl MonthPlot {
    pub fn spec(&self) -> &MonthSpec {
        &self.spec
    }

    pub fn alignment(&self) -> &WeekAlignment {
        &self.alignment
    }

    pub fn grid(&self) -> &GridSlots {
        &self.grid
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn font_path(&self) -> &Path {
        &self.font_path
    }

    pub fn layout(&self, measure: &dyn Measure) -> Result<RenderPlan> {
        layout::layout(
            &self.spec,
            &self.alignment,
            &self.grid,
            &self.config,
            measure,
        )
    }

    pub fn render<C: Canvas>(&self, canvas: &mut C) -> Result<()> {
        let plan = self.layout(&*canvas)?;
        raster::paint(&plan, canvas);
        Ok(())
    }
}
