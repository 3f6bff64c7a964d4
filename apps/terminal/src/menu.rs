//! # Main Menu
//!
//! ```text
//! --------------------------------------------------
//! ----------- Welcome to HP Petrol Pump ------------
//! --------------------------------------------------
//! Available Fuel Types:
//! A. Premium Gasoline  (₱78.90/L)
//! B. Unleaded Gasoline (₱72.50/L)
//! C. Diesel            (₱68.30/L)
//! D. LPG               (₱60.00/L)
//! V. View Transaction History
//! S. Sales Summary
//! X. Delete Transaction History
//! Q. Exit
//! --------------------------------------------------
//! ```

use pump_core::RateTable;

use crate::console::SCREEN_WIDTH;

/// Keys reserved for commands; fuel keys may not use them.
pub const COMMAND_KEYS: [char; 4] = ['V', 'S', 'X', 'Q'];

/// A parsed menu selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    /// Buy the named fuel.
    Fuel(String),
    History,
    Summary,
    DeleteHistory,
    Exit,
    /// Anything not on the menu.
    Invalid(String),
}

/// Fuel keys plus the fixed commands.
#[derive(Debug, Clone)]
pub struct Menu {
    station_name: String,
    fuels: Vec<(char, String)>,
}

impl Menu {
    /// Creates a menu. Keys are expected upper-case and unique.
    pub fn new(station_name: impl Into<String>, fuels: Vec<(char, String)>) -> Self {
        Menu {
            station_name: station_name.into(),
            fuels,
        }
    }

    /// Fuel entries in display order.
    pub fn fuels(&self) -> &[(char, String)] {
        &self.fuels
    }

    /// Parses a line typed at the menu prompt.
    pub fn parse(&self, input: &str) -> MenuChoice {
        let choice = input.trim().to_uppercase();
        let mut chars = choice.chars();
        let key = match (chars.next(), chars.next()) {
            (Some(key), None) => key,
            _ => return MenuChoice::Invalid(choice),
        };

        match key {
            'V' => MenuChoice::History,
            'S' => MenuChoice::Summary,
            'X' => MenuChoice::DeleteHistory,
            'Q' => MenuChoice::Exit,
            _ => self
                .fuels
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, fuel)| MenuChoice::Fuel(fuel.clone()))
                .unwrap_or(MenuChoice::Invalid(choice)),
        }
    }

    /// Renders the menu. Fuels without a rate show no price.
    pub fn render(&self, rates: &RateTable, currency_symbol: &str) -> String {
        let rule = "-".repeat(SCREEN_WIDTH);
        let name_width = self.fuels.iter().map(|(_, f)| f.chars().count()).max().unwrap_or(0);

        let mut lines = vec![
            rule.clone(),
            format!(
                "{:-^width$}",
                format!(" Welcome to {} ", self.station_name),
                width = SCREEN_WIDTH
            ),
            rule.clone(),
            "Available Fuel Types:".to_string(),
        ];

        for (key, fuel) in &self.fuels {
            match rates.rate_for(fuel) {
                Some(rate) => lines.push(format!(
                    "{}. {:<name_width$} ({}/L)",
                    key,
                    fuel,
                    rate.with_symbol(currency_symbol)
                )),
                None => lines.push(format!("{}. {}", key, fuel)),
            }
        }

        lines.push("V. View Transaction History".to_string());
        lines.push("S. Sales Summary".to_string());
        lines.push("X. Delete Transaction History".to_string());
        lines.push("Q. Exit".to_string());
        lines.push(rule);

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pump_core::Money;

    fn menu() -> Menu {
        Menu::new(
            "HP Petrol Pump",
            vec![('A', "Premium Gasoline".to_string()), ('C', "Diesel".to_string())],
        )
    }

    #[test]
    fn test_parse_commands_case_insensitive() {
        let menu = menu();
        assert_eq!(menu.parse("v"), MenuChoice::History);
        assert_eq!(menu.parse(" S "), MenuChoice::Summary);
        assert_eq!(menu.parse("x"), MenuChoice::DeleteHistory);
        assert_eq!(menu.parse("q"), MenuChoice::Exit);
    }

    #[test]
    fn test_parse_fuel() {
        let menu = menu();
        assert_eq!(menu.parse("c"), MenuChoice::Fuel("Diesel".to_string()));
    }

    #[test]
    fn test_parse_invalid() {
        let menu = menu();
        assert_eq!(menu.parse("B"), MenuChoice::Invalid("B".to_string()));
        assert_eq!(menu.parse("AC"), MenuChoice::Invalid("AC".to_string()));
        assert_eq!(menu.parse(""), MenuChoice::Invalid(String::new()));
    }

    #[test]
    fn test_render() {
        let mut rates = RateTable::empty();
        rates.insert("Diesel", Money::from_cents(6830)).unwrap();

        let text = menu().render(&rates, "₱");
        assert!(text.contains("Welcome to HP Petrol Pump"));
        assert!(text.contains("A. Premium Gasoline\n"));
        assert!(text.contains("(₱68.30/L)"));
        assert!(text.contains("Q. Exit"));
    }
}
