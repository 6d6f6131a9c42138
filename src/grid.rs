//! Checkbox grid widget for editing a boolean collision matrix.
//!
//! Renders the packed triangle the way engine inspectors draw collision
//! matrices: one column per key in descending order, one row per key in
//! ascending order, each row one cell shorter than the last.
//!
//! # Example
//!
//! ```ignore
//! use colmat::{CollisionMatrix, MatrixGrid};
//!
//! let mut matrix = CollisionMatrix::<bool>::new(4, false);
//! let names = ["Default".to_string(), "Player".to_string()];
//!
//! egui::CentralPanel::default().show(ctx, |ui| {
//!     if MatrixGrid::new(&mut matrix).names(&names).show(ui) {
//!         // A cell changed; persist the matrix.
//!     }
//! });
//! ```

use crate::matrix::CollisionMatrix;

/// Triangular checkbox grid over a `CollisionMatrix<bool>`.
pub struct MatrixGrid<'a> {
    matrix: &'a mut CollisionMatrix<bool>,
    names: Option<&'a [String]>,
}

impl<'a> MatrixGrid<'a> {
    /// Build a grid for `matrix`.
    pub fn new(matrix: &'a mut CollisionMatrix<bool>) -> Self {
        Self {
            matrix,
            names: None,
        }
    }

    /// Label rows and columns with `names` instead of key indices.
    ///
    /// Index `i` names key `i`; keys past the end of the slice fall back
    /// to their index.
    pub fn names(mut self, names: &'a [String]) -> Self {
        self.names = Some(names);
        self
    }

    /// Render the grid. Returns whether any cell changed.
    pub fn show(mut self, ui: &mut egui::Ui) -> bool {
        let count = self.matrix.effective_count();
        let self_intersect = self.matrix.self_intersect();
        let mut changed = false;

        egui::Grid::new("collision_matrix_grid")
            .min_col_width(18.0)
            .show(ui, |ui| {
                // Header row: columns run from the highest key down, so the
                // triangle leans left under its labels.
                ui.label("");
                for i in 0..count {
                    let mut name_index = count - i - 1;
                    if !self_intersect {
                        name_index += 1;
                    }
                    ui.label(self.name(name_index));
                }
                ui.end_row();

                for a in 0..count {
                    ui.label(self.name(a));
                    let length = self.matrix.row_length(a);
                    for x in 0..length {
                        let mut b = a + length - x - 1;
                        if !self_intersect {
                            b += 1;
                        }

                        let mut value = *self.matrix.get(a, b);
                        if ui.checkbox(&mut value, "").changed() {
                            self.matrix.set(a, b, value);
                            changed = true;
                        }
                    }
                    ui.end_row();
                }
            });

        changed
    }

    fn name(&self, index: usize) -> String {
        match self.names.and_then(|names| names.get(index)) {
            Some(name) => name.clone(),
            None => index.to_string(),
        }
    }
}
