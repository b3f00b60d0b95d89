use itertools::repeat_n;

use crate::color::Color;
use crate::week::WeekAlignment;

pub const COLUMNS: usize = 7;
pub const ROWS: usize = 6;
pub const SLOTS: usize = COLUMNS * ROWS;

/// One position of the month grid. Padding slots carry no day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slot {
    pub day: Option<u32>,
    pub color: Option<Color>,
    pub value: Option<f64>,
}

impl Slot {
    pub fn is_padding(&self) -> bool {
        self.day.is_none()
    }
}

/// The 6×7 slots of one month, row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSlots {
    slots: Vec<Slot>,
}

impl GridSlots {
    /// `colors` holds one entry per day of the month, as does `values` if
    /// given.
    pub fn build(
        alignment: &WeekAlignment,
        colors: &[Option<Color>],
        values: Option<&[Option<f64>]>,
    ) -> Self {
        let offset = alignment.leading_offset as usize;

        let days = colors.iter().enumerate().map(|(idx, color)| Slot {
            day: Some(idx as u32 + 1),
            color: color.clone(),
            value: values.and_then(|values| values.get(idx).copied().flatten()),
        });

        let mut slots: Vec<Slot> = repeat_n(Slot::default(), offset)
            .chain(days)
            .chain(repeat_n(Slot::default(), SLOTS))
            .take(SLOTS)
            .collect();

        // A blank last row is already what would replace it, so only the
        // first row needs checking. Padding slots are all alike, so moving
        // the row to the end is the same as appending a fresh one.
        // `align` keeps the offset below a week, so only alignments built
        // by hand reach this.
        if slots[..COLUMNS].iter().all(Slot::is_padding) {
            slots.rotate_left(COLUMNS);
        }

        GridSlots { slots }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Slot]> {
        self.slots.chunks(COLUMNS)
    }

    pub fn day_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_padding()).count()
    }

    /// Rows holding at least one day.
    pub fn visible_rows(&self) -> usize {
        self.rows()
            .filter(|row| row.iter().any(|slot| !slot.is_padding()))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{resolve, MonthInput, YearInput};
    use crate::week::{align, FirstDay};

    fn alignment(leading_offset: u32) -> WeekAlignment {
        WeekAlignment {
            leading_offset,
            day_labels: crate::week::DAY_LABELS,
        }
    }

    #[test]
    fn pads_to_full_grid() {
        let colors = vec![None; 30];
        let grid = GridSlots::build(&alignment(4), &colors, None);

        assert_eq!(grid.slots().len(), SLOTS);
        assert_eq!(grid.day_count(), 30);
        assert!(grid.slots()[..4].iter().all(Slot::is_padding));
        assert_eq!(grid.slots()[4].day, Some(1));
        assert_eq!(grid.slots()[33].day, Some(30));
        assert!(grid.slots()[34..].iter().all(Slot::is_padding));
        assert_eq!(grid.visible_rows(), 5);
    }

    #[test]
    fn values_follow_days() {
        let colors = vec![Some(Color::from((1, 1, 1))); 28];
        let mut values = vec![None; 28];
        values[0] = Some(3.5);
        values[27] = Some(-1.0);

        let grid = GridSlots::build(&alignment(6), &colors, Some(values.as_slice()));
        assert_eq!(grid.slots()[6].value, Some(3.5));
        assert_eq!(grid.slots()[6].color, Some(Color::from((1, 1, 1))));
        assert_eq!(grid.slots()[33].value, Some(-1.0));
        assert_eq!(grid.slots()[7].value, None);
        assert_eq!(grid.slots()[7].day, Some(2));
    }

    #[test]
    fn hand_built_blank_first_row_moves_to_the_end() {
        let colors = vec![None; 28];
        let grid = GridSlots::build(&alignment(7), &colors, None);

        assert_eq!(grid.slots().len(), SLOTS);
        assert_eq!(grid.slots()[0].day, Some(1));
        assert_eq!(grid.day_count(), 28);
        assert_eq!(grid.visible_rows(), 4);
    }

    #[test]
    fn missing_data_days_are_not_padding() {
        // A first week without data still keeps its row
        let grid = GridSlots::build(&alignment(0), &vec![None; 31], None);
        assert_eq!(grid.slots()[0].day, Some(1));
    }

    #[test]
    fn every_month_fills_42_slots() {
        for year in [2023i64, 2024, 1900, 2000].iter() {
            for month in 1..=12 {
                let spec = resolve(&MonthInput::Number(month), YearInput(*year)).unwrap();
                let facts = spec.facts();
                for first_day in [
                    FirstDay::Monday,
                    FirstDay::Sunday,
                    FirstDay::Saturday,
                    FirstDay::Friday,
                ]
                .iter()
                {
                    let colors = vec![None; facts.day_count as usize];
                    let grid = GridSlots::build(&align(&facts, *first_day), &colors, None);

                    assert_eq!(grid.slots().len(), SLOTS);
                    assert_eq!(grid.day_count(), facts.day_count as usize);
                    assert_eq!(grid.rows().count(), ROWS);
                    assert!(grid.slots()[..COLUMNS].iter().any(|s| !s.is_padding()));
                }
            }
        }
    }
}
