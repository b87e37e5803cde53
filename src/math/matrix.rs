use rand::Rng;

/// Dense row-major matrix.
///
/// Weight matrices use one row per neuron in the receiving layer and one
/// column per neuron in the layer that feeds it.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Independent samples from U[-half_range, +half_range].
    pub fn uniform<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        half_range: f64,
        rng: &mut R,
    ) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen_range(-half_range..=half_range);
            }
        }

        res
    }

    /// Wraps nested rows. Returns `None` when the rows are ragged.
    pub fn from_data(data: Vec<Vec<f64>>) -> Option<Matrix> {
        let cols = data.first().map_or(0, |row| row.len());
        if data.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Matrix {
            rows: data.len(),
            cols,
            data,
        })
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i]
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements in row-major order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().flat_map(|row| row.iter().copied())
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut f64> + '_ {
        self.data.iter_mut().flat_map(|row| row.iter_mut())
    }
}
