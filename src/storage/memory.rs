use crate::model::{AttributeRecord, StorageError};

/// Saved cars, in the order they were added. Duplicates are allowed.
#[derive(Debug, Default, Clone)]
pub struct SavedCars {
    cars: Vec<AttributeRecord>,
}

impl SavedCars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a car and returns its position.
    pub fn save(&mut self, car: AttributeRecord) -> usize {
        self.cars.push(car);
        self.cars.len() - 1
    }

    /// Removes the car at `index`; later cars shift down by one.
    pub fn delete(&mut self, index: usize) -> Result<AttributeRecord, StorageError> {
        if index >= self.cars.len() {
            return Err(StorageError::IndexOutOfRange {
                index,
                len: self.cars.len(),
            });
        }
        Ok(self.cars.remove(index))
    }

    pub fn all(&self) -> &[AttributeRecord] {
        &self.cars
    }

    pub fn len(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }
}
