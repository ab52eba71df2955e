//! State of the interactive pace table.
//!
//! One pace drives every row. Editing a row re-derives the pace from what is
//! typed as long as the text passes the time grammar; stepping nudges the pace
//! by the unit under the cursor and re-renders the row.

use crate::models::Distance;
use crate::pace::{PaceCodec, StepDirection, is_valid_time, step_pace};

#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    pub buffer: String,
    /// Byte offset; the buffer is always ASCII.
    pub cursor: usize,
}

#[derive(Debug, Clone)]
pub struct PaceEditor {
    pub ms_per_metre: f64,
    pub distances: Vec<Distance>,
    pub selected: usize,
    pub input: Option<Input>,
}

impl PaceEditor {
    pub fn new(ms_per_metre: f64, distances: Vec<Distance>) -> Self {
        Self {
            ms_per_metre,
            distances,
            selected: 0,
            input: None,
        }
    }

    fn codec(&self) -> Option<PaceCodec> {
        self.distances
            .get(self.selected)
            .map(|d| PaceCodec::new(d.distance_m, d.show_ms))
    }

    /// Text shown for row `idx`: the live buffer while editing, else the pace.
    pub fn display(&self, idx: usize) -> String {
        if idx == self.selected {
            if let Some(input) = &self.input {
                return input.buffer.clone();
            }
        }
        self.distances
            .get(idx)
            .map(|d| PaceCodec::new(d.distance_m, d.show_ms).format(self.ms_per_metre))
            .unwrap_or_default()
    }

    pub fn is_editing(&self) -> bool {
        self.input.is_some()
    }

    pub fn input_is_valid(&self) -> bool {
        self.input.as_ref().is_none_or(|i| is_valid_time(&i.buffer))
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.distances.len() {
            self.selected += 1;
        }
    }

    pub fn begin_edit(&mut self) {
        if self.distances.is_empty() {
            return;
        }
        let buffer = self.display(self.selected);
        let cursor = buffer.len();
        self.input = Some(Input { buffer, cursor });
    }

    pub fn finish_edit(&mut self) {
        self.input = None;
    }

    pub fn insert(&mut self, c: char) {
        if !(c.is_ascii_digit() || c == ':' || c == '.') {
            return;
        }
        if let Some(input) = &mut self.input {
            input.buffer.insert(input.cursor, c);
            input.cursor += 1;
        }
        self.apply_input();
    }

    pub fn backspace(&mut self) {
        if let Some(input) = &mut self.input {
            if input.cursor > 0 {
                input.cursor -= 1;
                input.buffer.remove(input.cursor);
            }
        }
        self.apply_input();
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if let Some(input) = &mut self.input {
            input.cursor = input
                .cursor
                .saturating_add_signed(delta)
                .min(input.buffer.len());
        }
    }

    /// Arrow keys and the scroll wheel. Outside of editing the cursor is taken
    /// to sit at the end of the row, which steps the smallest shown unit.
    pub fn step(&mut self, direction: StepDirection) {
        let Some(codec) = self.codec() else {
            return;
        };
        let (text, cursor) = match &self.input {
            Some(input) => (input.buffer.clone(), input.cursor),
            None => {
                let text = codec.format(self.ms_per_metre);
                let len = text.len();
                (text, len)
            }
        };
        if let Ok(next) = step_pace(self.ms_per_metre, &text, cursor, codec.distance, direction) {
            self.ms_per_metre = next;
        }
        if let Some(input) = &mut self.input {
            input.buffer = codec.format(self.ms_per_metre);
            input.cursor = cursor.min(input.buffer.len());
        }
    }

    fn apply_input(&mut self) {
        let (Some(codec), Some(input)) = (self.codec(), &self.input) else {
            return;
        };
        if !is_valid_time(&input.buffer) {
            return;
        }
        if let Ok(pace) = codec.parse(&input.buffer) {
            self.ms_per_metre = pace;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> PaceEditor {
        PaceEditor::new(270.0, Distance::defaults())
    }

    fn select(editor: &mut PaceEditor, id: &str) {
        editor.selected = editor.distances.iter().position(|d| d.id == id).unwrap();
    }

    #[test]
    fn rows_derive_from_one_pace() {
        let e = editor();
        assert_eq!(e.display(0), "27.000");
        assert_eq!(e.display(1), "4:30");
        assert_eq!(e.display(6), "45:00");
    }

    #[test]
    fn typing_a_valid_time_moves_every_row() {
        let mut e = editor();
        select(&mut e, "5km");
        e.begin_edit();
        for _ in 0.."22:30".len() {
            e.backspace();
        }
        for c in "20:00".chars() {
            e.insert(c);
        }
        assert!(e.input_is_valid());
        assert_eq!(e.ms_per_metre, 240.0);
        assert_eq!(e.display(1), "4:00");
        e.finish_edit();
        assert_eq!(e.display(5), "20:00");
    }

    #[test]
    fn invalid_text_keeps_the_last_good_pace() {
        let mut e = editor();
        select(&mut e, "1km");
        e.begin_edit();
        e.insert(':');
        assert!(!e.input_is_valid());
        assert_eq!(e.ms_per_metre, 270.0);
        e.insert('x');
        assert_eq!(e.input.as_ref().unwrap().buffer, "4:30:");
    }

    #[test]
    fn arrows_step_the_unit_under_the_cursor() {
        let mut e = editor();
        select(&mut e, "1km");
        e.begin_edit();
        e.move_cursor(-10);
        e.step(StepDirection::Up);
        assert_eq!(e.ms_per_metre, 330.0);
        assert_eq!(e.input.as_ref().unwrap().buffer, "5:30");
        assert_eq!(e.input.as_ref().unwrap().cursor, 0);

        e.move_cursor(3);
        e.step(StepDirection::Down);
        assert_eq!(e.display(1), "5:29");
    }

    #[test]
    fn stepping_without_editing_uses_the_last_unit() {
        let mut e = editor();
        select(&mut e, "100m");
        e.step(StepDirection::Up);
        // "27.000" with the cursor at the end steps a tenth at 100 m
        assert!((e.ms_per_metre - 271.0).abs() < 1e-9);
        assert_eq!(e.display(0), "27.100");
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut e = editor();
        e.select_prev();
        assert_eq!(e.selected, 0);
        for _ in 0..20 {
            e.select_next();
        }
        assert_eq!(e.selected, e.distances.len() - 1);
    }
}
