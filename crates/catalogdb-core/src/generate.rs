//! Synthetic product catalog for load testing and demos.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::types::Record;

const BRANDS: &[&str] = &["Nike", "Adidas", "Logitech", "Sony", "Apple", "Samsung", "Lenovo", "Ikea", "Fitbit", "HP"];

const ITEMS: &[(&str, &str)] = &[
    ("Running Shoes", "Footwear"),
    ("Wireless Mouse", "Electronics"),
    ("Yoga Mat", "Fitness"),
    ("Gaming Keyboard", "Electronics"),
    ("Water Bottle", "Home & Kitchen"),
    ("Smart Watch", "Electronics"),
    ("Bluetooth Speaker", "Electronics"),
    ("Desk Lamp", "Home & Kitchen"),
    ("Laptop Stand", "Accessories"),
    ("Backpack", "Accessories"),
];

const COLORS: &[&str] = &["Black", "White", "Blue", "Red", "Green", "Gray", "Silver"];

/// Build `size` records with ids `1..=size`.
///
/// With `Some(seed)` the output is identical on every run; `None` seeds from
/// OS entropy.
pub fn generate_catalog(size: usize, seed: Option<u64>) -> Vec<Record> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    (1..=size as u64)
        .map(|id| {
            let (item, category) = *ITEMS.choose(&mut rng).unwrap_or(&ITEMS[0]);
            let brand = BRANDS.choose(&mut rng).unwrap_or(&BRANDS[0]);
            let color = COLORS.choose(&mut rng).unwrap_or(&COLORS[0]);
            Record::new(id, format!("{brand} {item} – {color}"), category)
        })
        .collect()
}
