use std::str::FromStr;

pub const MENU: &str = "\
----------------------------------------
What would you like to do next?
1. Add Product
2. View All Products
3. Sell Product
4. Restock Product
5. View Low Stock Items
6. Generate Report
7. Save & Exit
----------------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddProduct,
    ViewAll,
    Sell,
    Restock,
    LowStock,
    Report,
    SaveAndExit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    Choice(MenuChoice),
    OutOfRange(i64),
    NotANumber,
}

impl MenuInput {
    pub fn parse(line: &str) -> Self {
        match line.trim().parse::<i64>() {
            Ok(1) => MenuInput::Choice(MenuChoice::AddProduct),
            Ok(2) => MenuInput::Choice(MenuChoice::ViewAll),
            Ok(3) => MenuInput::Choice(MenuChoice::Sell),
            Ok(4) => MenuInput::Choice(MenuChoice::Restock),
            Ok(5) => MenuInput::Choice(MenuChoice::LowStock),
            Ok(6) => MenuInput::Choice(MenuChoice::Report),
            Ok(7) => MenuInput::Choice(MenuChoice::SaveAndExit),
            Ok(n) => MenuInput::OutOfRange(n),
            Err(_) => MenuInput::NotANumber,
        }
    }
}

/// Accepts `₹` and thousands separators, e.g. `₹1,250.50`.
pub fn parse_price(input: &str) -> Option<f64> {
    let cleaned: String = input
        .chars()
        .filter(|c| *c != '₹' && *c != ',')
        .collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
}

pub fn parse_number<T: FromStr>(input: &str) -> Option<T> {
    input.trim().parse().ok()
}
