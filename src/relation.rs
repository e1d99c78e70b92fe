//! The relation holding the points of an evaluation.
//!
//! Points are identified by a [DataId] which is their row in the relation.

use ndarray::Array2;

/// point identifier, the row of the point in its relation
pub type DataId = usize;

/// Access to the vectors of an evaluated relation.
pub trait Relation<T>: Sync {
    /// number of points of the relation
    fn size(&self) -> usize;

    /// vector of a point, None if id is not in the relation
    fn get(&self, id: DataId) -> Option<&[T]>;

    /// Dimension of the vectors, used as exponent in the core distance estimator.
    /// Returns None if the relation is not a vector field with a common dimension.
    fn dimensionality(&self) -> Option<usize>;
}

/// A relation storing each point as a row vector.
#[derive(Clone, Debug)]
pub struct VectorRelation<T> {
    data: Vec<Vec<T>>,
    /// common dimension of rows, None if rows differ in length or are empty
    dim: Option<usize>,
}

impl<T> VectorRelation<T> {
    pub fn new(data: Vec<Vec<T>>) -> Self {
        let dim = match data.first() {
            Some(first) if !first.is_empty() => {
                let d = first.len();
                if data.iter().all(|v| v.len() == d) {
                    Some(d)
                } else {
                    log::warn!("VectorRelation rows do not have a common dimension");
                    None
                }
            }
            _ => None,
        };
        log::debug!("VectorRelation::new nb points : {}, dim : {:?}", data.len(), dim);
        VectorRelation { data, dim }
    }

    /// returns a reference to the rows
    pub fn get_data(&self) -> &Vec<Vec<T>> {
        &self.data
    }
} // end of impl VectorRelation

impl<T: Clone> VectorRelation<T> {
    /// one point by row of the array
    pub fn from_array2(mat: &Array2<T>) -> Self {
        let data = mat.rows().into_iter().map(|row| row.to_vec()).collect();
        VectorRelation::new(data)
    }
}

impl<T: Sync> Relation<T> for VectorRelation<T> {
    fn size(&self) -> usize {
        self.data.len()
    }

    fn get(&self, id: DataId) -> Option<&[T]> {
        self.data.get(id).map(|v| v.as_slice())
    }

    fn dimensionality(&self) -> Option<usize> {
        self.dim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    #[test]
    fn dimensionality_of_rows() {
        let rel = VectorRelation::new(vec![vec![0., 1.], vec![2., 3.], vec![4., 5.]]);
        assert_eq!(rel.size(), 3);
        assert_eq!(rel.dimensionality(), Some(2));
        assert_eq!(rel.get(1), Some(&[2., 3.][..]));
        assert_eq!(rel.get(3), None);
    }

    #[test]
    fn ragged_rows_are_not_spatial() {
        let rel = VectorRelation::new(vec![vec![0., 1.], vec![2.]]);
        assert_eq!(rel.dimensionality(), None);
        let empty = VectorRelation::<f64>::new(Vec::new());
        assert_eq!(empty.dimensionality(), None);
    }

    #[test]
    fn from_array2_rows() {
        let mat = array![[0.0_f32, 1.0, 2.0], [3.0, 4.0, 5.0]];
        let rel = VectorRelation::from_array2(&mat);
        assert_eq!(rel.size(), 2);
        assert_eq!(rel.dimensionality(), Some(3));
        assert_eq!(rel.get(1), Some(&[3.0_f32, 4.0, 5.0][..]));
    }
}
