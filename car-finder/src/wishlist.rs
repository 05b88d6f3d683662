use log::{debug, info};
use shared::data::{Car, CarId};

use crate::{error::StorageError, storage::Storage};

/// The storage key the wishlist lives under.
pub const WISHLIST_KEY: &str = "wishlist";

/// Cars the user favorited, in the order they were added. Ids are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wishlist {
    cars: Vec<Car>,
}

impl Wishlist {
    /// Reads the wishlist from storage. An absent key or a blank value gives an
    /// empty wishlist.
    ///
    /// # Errors
    ///
    /// This function will return an error if the storage could not be read or
    /// the stored value is not a JSON list of cars.
    pub fn load(storage: &impl Storage) -> Result<Self, StorageError> {
        let Some(raw) = storage
            .get(WISHLIST_KEY)?
            .filter(|raw| !raw.trim().is_empty())
        else {
            debug!("No stored wishlist, starting empty.");
            return Ok(Self::default());
        };

        let cars: Vec<Car> =
            serde_json::from_str(&raw).map_err(|source| StorageError::Malformed {
                key: WISHLIST_KEY.into(),
                source,
            })?;
        info!("Loaded {} wishlisted cars.", cars.len());
        Ok(Self { cars })
    }

    /// Adds the car if its id is absent, removes it otherwise, then rewrites
    /// the whole stored list.
    ///
    /// The in-memory change is kept even when the write fails.
    ///
    /// # Errors
    ///
    /// This function will return an error if the new list could not be stored.
    pub fn toggle(&mut self, car: &Car, storage: &mut impl Storage) -> Result<(), StorageError> {
        if let Some(index) = self.position(car.id) {
            self.cars.remove(index);
            info!("Removed {} from the wishlist.", car.title());
        } else {
            self.cars.push(car.clone());
            info!("Added {} to the wishlist.", car.title());
        }
        self.save(storage)
    }

    #[must_use]
    pub fn contains(&self, id: CarId) -> bool {
        self.position(id).is_some()
    }

    #[must_use]
    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    fn position(&self, id: CarId) -> Option<usize> {
        self.cars.iter().position(|car| car.id == id)
    }

    fn save(&self, storage: &mut impl Storage) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.cars).map_err(|source| StorageError::Serialize {
            key: WISHLIST_KEY.into(),
            source,
        })?;
        storage.set(WISHLIST_KEY, &raw)
    }
}
