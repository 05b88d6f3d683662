use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

pub type CarId = u64;

/// A single catalog entry as served by `/api/cars`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    pub brand: String,
    pub model: String,
    pub price: f64,
    pub fuel: Fuel,
    pub seats: u32,
    pub image: String,
}

impl Car {
    /// The card title, e.g. `Toyota Corolla`.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    /// The `Petrol • 5 seats` line shown under the price.
    #[must_use]
    pub fn details(&self) -> String {
        format!("{} \u{2022} {} seats", self.fuel, self.seats)
    }

    #[must_use]
    pub fn price_label(&self) -> String {
        format_price(self.price)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fuel {
    Petrol,
    Diesel,
    Electric,
}

impl Fuel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Fuel::Petrol => "Petrol",
            Fuel::Diesel => "Diesel",
            Fuel::Electric => "Electric",
        }
    }
}

impl Display for Fuel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formats a price in dollars with thousands separators. Cents are only shown
/// when the price is not a whole amount.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_price(price: f64) -> String {
    let sign = if price < 0.0 { "-" } else { "" };
    let cents = (price.abs() * 100.0).round() as u64;
    let (whole, fraction) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if fraction == 0 {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{fraction:02}")
    }
}
