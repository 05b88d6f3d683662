use log::debug;
use reqwest::{Client, ClientBuilder, Request};
use shared::{data::Car, filters::Filters};

use crate::error::FetchError;

/// Path of the car listing, relative to the API base.
pub const CARS_PATH: &str = "/api/cars";

/// HTTP access to the car catalog backend.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    endpoint: String,
}

impl CatalogClient {
    /// # Errors
    ///
    /// This function will return an error if the HTTP client could not be initialised.
    pub fn new(api_base: &str) -> Result<Self, FetchError> {
        let client = ClientBuilder::new().build()?;
        Ok(Self {
            client,
            endpoint: format!("{}{CARS_PATH}", api_base.trim_end_matches('/')),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Builds `GET /api/cars` with every filter as a query parameter.
    ///
    /// # Errors
    ///
    /// This function will return an error if the endpoint is not a valid URL.
    pub fn cars_request(&self, filters: &Filters) -> Result<Request, FetchError> {
        Ok(self.client.get(&self.endpoint).query(filters).build()?)
    }

    /// Fetches the cars matching `filters`, in the order the server returns them.
    ///
    /// # Errors
    ///
    /// This function will return an error if the request fails, the server
    /// answers with a non-success status or the body is not a list of cars.
    pub async fn fetch_cars(&self, filters: &Filters) -> Result<Vec<Car>, FetchError> {
        let request = self.cars_request(filters)?;
        debug!("GET {}", request.url());
        let response = self.client.execute(request).await?.error_for_status()?;
        Ok(response.json::<Vec<Car>>().await?)
    }

    /// Downloads the raw bytes of a card image.
    ///
    /// # Errors
    ///
    /// This function will return an error if the request fails or the server
    /// answers with a non-success status.
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!("GET {url}");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}
