use chrono::{DateTime, Local};
use log::{debug, error, info, warn};
use shared::{
    data::{Car, CarId},
    filters::{FilterKey, Filters},
};

use crate::{
    error::{FetchError, StorageError},
    pagination::Pagination,
    storage::Storage,
    wishlist::Wishlist,
};

/// Identifies a catalog request. Later requests have larger ids.
pub type RequestId = u64;

/// A catalog fetch the caller has to run and report back through
/// [`CarFinder::finish_fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: RequestId,
    pub filters: Filters,
}

/// All state behind the car finder view.
///
/// Changing a filter never fetches on its own. It hands back a
/// [`FetchRequest`] and the response is applied with [`CarFinder::finish_fetch`].
#[derive(Debug)]
pub struct CarFinder<S: Storage> {
    filters: Filters,
    cars: Vec<Car>,
    wishlist: Wishlist,
    storage: S,
    pagination: Pagination,
    loading: bool,
    error: Option<String>,
    wishlist_error: Option<String>,
    dark_mode: bool,
    latest_request: RequestId,
    last_updated: Option<DateTime<Local>>,
}

impl<S: Storage> CarFinder<S> {
    /// Creates the view state and reads the stored wishlist once.
    ///
    /// # Errors
    ///
    /// This function will return an error if the stored wishlist could not be
    /// read or is malformed.
    pub fn new(storage: S) -> Result<Self, StorageError> {
        let wishlist = Wishlist::load(&storage)?;
        Ok(Self {
            filters: Filters::default(),
            cars: Vec::new(),
            wishlist,
            storage,
            pagination: Pagination::default(),
            loading: false,
            error: None,
            wishlist_error: None,
            dark_mode: false,
            latest_request: 0,
            last_updated: None,
        })
    }

    /// Replaces one filter token and returns the fetch that reflects it.
    pub fn update_filter(&mut self, key: FilterKey, value: impl Into<String>) -> FetchRequest {
        self.filters.set(key, value);
        debug!("Filter {key} is now '{}'", self.filters.get(key));
        self.begin_fetch()
    }

    /// Marks a request as in flight with the current filters.
    pub fn begin_fetch(&mut self) -> FetchRequest {
        self.latest_request += 1;
        self.loading = true;
        info!("Fetching cars (request {}).", self.latest_request);
        FetchRequest {
            id: self.latest_request,
            filters: self.filters.clone(),
        }
    }

    /// Applies the outcome of request `id`.
    ///
    /// Returns `false` and changes nothing when a newer request has been issued
    /// since. On failure the current car list is kept.
    pub fn finish_fetch(&mut self, id: RequestId, result: Result<Vec<Car>, FetchError>) -> bool {
        if id != self.latest_request {
            debug!(
                "Discarding response to request {id}, request {} supersedes it.",
                self.latest_request
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(mut cars) => {
                self.filters.sort_order().apply(&mut cars);
                info!("Fetched {} cars (request {id}).", cars.len());
                self.cars = cars;
                self.pagination.reset();
                self.error = None;
                self.last_updated = Some(Local::now());
            }
            Err(err) => {
                error!("Request {id} failed. {err}");
                self.error = Some(err.to_string());
            }
        }
        true
    }

    /// Adds or removes a car from the wishlist and writes it through to storage.
    ///
    /// A failed write keeps the toggle, is logged and stays readable through
    /// [`CarFinder::wishlist_error`] until the next successful write.
    pub fn toggle_wishlist(&mut self, car: &Car) {
        match self.wishlist.toggle(car, &mut self.storage) {
            Ok(()) => self.wishlist_error = None,
            Err(err) => {
                warn!("Could not save the wishlist. {err}");
                self.wishlist_error = Some(err.to_string());
            }
        }
    }

    pub fn select_page(&mut self, page: usize) {
        self.pagination.select(page);
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
    }

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    #[must_use]
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    #[must_use]
    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// The cars on the current page.
    #[must_use]
    pub fn page_cars(&self) -> &[Car] {
        self.pagination.slice(&self.cars)
    }

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.pagination.page()
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.cars.len())
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The message of the last failed fetch, cleared by the next successful one.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn wishlist_error(&self) -> Option<&str> {
        self.wishlist_error.as_deref()
    }

    #[must_use]
    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    #[must_use]
    pub fn is_wishlisted(&self, id: CarId) -> bool {
        self.wishlist.contains(id)
    }

    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    #[must_use]
    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
