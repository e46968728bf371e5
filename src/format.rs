use serde::{Deserialize, Serialize};

/// Separators used when presenting numbers on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NumberFormat {
    pub thousands_separator: char,
    pub decimal_separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            thousands_separator: '.',
            decimal_separator: '.',
        }
    }
}

impl NumberFormat {
    pub fn group_thousands(&self, value: u64) -> String {
        let digits = value.to_string();
        let mut output = String::with_capacity(digits.len() + digits.len() / 3);

        for (index, digit) in digits.chars().enumerate() {
            if index > 0 && (digits.len() - index) % 3 == 0 {
                output.push(self.thousands_separator);
            }
            output.push(digit);
        }

        output
    }

    pub fn fixed(&self, value: f64, decimals: usize) -> String {
        let rendered = format!("{value:.decimals$}");
        if self.decimal_separator == '.' {
            rendered
        } else {
            rendered.replacen('.', &self.decimal_separator.to_string(), 1)
        }
    }
}

/// Cuts `title` to `max_chars` characters and appends `...`.
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    let mut truncated: String = title.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}
