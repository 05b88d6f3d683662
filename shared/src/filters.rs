use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::data::Car;

/// The filter set sent to the catalog as query parameters.
///
/// Field order is the order the parameters appear in the query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub brand: String,
    pub price: String,
    pub fuel: String,
    pub seats: String,
    pub search: String,
    pub sort: String,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            brand: "all".into(),
            price: "any".into(),
            fuel: "any".into(),
            seats: "any".into(),
            search: String::new(),
            sort: "none".into(),
        }
    }
}

impl Filters {
    #[must_use]
    pub fn get(&self, key: FilterKey) -> &str {
        match key {
            FilterKey::Brand => &self.brand,
            FilterKey::Price => &self.price,
            FilterKey::Fuel => &self.fuel,
            FilterKey::Seats => &self.seats,
            FilterKey::Search => &self.search,
            FilterKey::Sort => &self.sort,
        }
    }

    /// Replaces the token stored under `key`. This is the only way filters change.
    pub fn set(&mut self, key: FilterKey, value: impl Into<String>) {
        let slot = match key {
            FilterKey::Brand => &mut self.brand,
            FilterKey::Price => &mut self.price,
            FilterKey::Fuel => &mut self.fuel,
            FilterKey::Seats => &mut self.seats,
            FilterKey::Search => &mut self.search,
            FilterKey::Sort => &mut self.sort,
        };
        *slot = value.into();
    }

    #[must_use]
    pub fn sort_order(&self) -> SortOrder {
        SortOrder::from_token(&self.sort)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Brand,
    Price,
    Fuel,
    Seats,
    Search,
    Sort,
}

impl FilterKey {
    /// The keys rendered as pick lists, in display order.
    pub const SELECTABLE: [FilterKey; 5] = [
        FilterKey::Brand,
        FilterKey::Price,
        FilterKey::Fuel,
        FilterKey::Seats,
        FilterKey::Sort,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FilterKey::Brand => "brand",
            FilterKey::Price => "price",
            FilterKey::Fuel => "fuel",
            FilterKey::Seats => "seats",
            FilterKey::Search => "search",
            FilterKey::Sort => "sort",
        }
    }

    /// The choices offered for this key. Free text keys have none.
    #[must_use]
    pub fn options(self) -> &'static [FilterOption] {
        match self {
            FilterKey::Brand => BRAND_OPTIONS,
            FilterKey::Price => PRICE_OPTIONS,
            FilterKey::Fuel => FUEL_OPTIONS,
            FilterKey::Seats => SEAT_OPTIONS,
            FilterKey::Sort => SORT_OPTIONS,
            FilterKey::Search => &[],
        }
    }

    /// Looks up the option matching the token currently set in `filters`.
    #[must_use]
    pub fn selected(self, filters: &Filters) -> Option<FilterOption> {
        let token = filters.get(self);
        self.options()
            .iter()
            .find(|option| option.token == token)
            .copied()
    }
}

impl Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable value for a filter: the token sent to the server and the label shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterOption {
    pub token: &'static str,
    pub label: &'static str,
}

impl FilterOption {
    const fn new(token: &'static str, label: &'static str) -> Self {
        Self { token, label }
    }
}

impl Display for FilterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

const BRAND_OPTIONS: &[FilterOption] = &[
    FilterOption::new("all", "All Brands"),
    FilterOption::new("Toyota", "Toyota"),
    FilterOption::new("Honda", "Honda"),
    FilterOption::new("Ford", "Ford"),
    FilterOption::new("BMW", "BMW"),
];

const PRICE_OPTIONS: &[FilterOption] = &[
    FilterOption::new("any", "Any Price"),
    FilterOption::new("0-20000", "Below $20,000"),
    FilterOption::new("20000-50000", "$20,000 - $50,000"),
    FilterOption::new("50000-100000", "$50,000 - $100,000"),
];

const FUEL_OPTIONS: &[FilterOption] = &[
    FilterOption::new("any", "Any Fuel"),
    FilterOption::new("Petrol", "Petrol"),
    FilterOption::new("Diesel", "Diesel"),
    FilterOption::new("Electric", "Electric"),
];

const SEAT_OPTIONS: &[FilterOption] = &[
    FilterOption::new("any", "Any Seats"),
    FilterOption::new("2", "2 Seats"),
    FilterOption::new("4", "4 Seats"),
    FilterOption::new("5", "5 Seats"),
    FilterOption::new("7", "7 Seats"),
];

const SORT_OPTIONS: &[FilterOption] = &[
    FilterOption::new("none", "Sort by"),
    FilterOption::new("asc", "Price: Low to High"),
    FilterOption::new("desc", "Price: High to Low"),
];

/// Client side ordering applied to a fetched car list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Keep the order the server returned.
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortOrder {
    /// Anything other than `asc` or `desc` means no sorting.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "asc" => SortOrder::Ascending,
            "desc" => SortOrder::Descending,
            _ => SortOrder::None,
        }
    }

    /// Sorts by price. The sort is stable so equal prices keep server order.
    pub fn apply(self, cars: &mut [Car]) {
        match self {
            SortOrder::None => {}
            SortOrder::Ascending => cars.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortOrder::Descending => cars.sort_by(|a, b| b.price.total_cmp(&a.price)),
        }
    }
}
