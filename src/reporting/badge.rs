use serde::Serialize;

pub const FINDINGS_COLOR: &str = "#4dabf7";
pub const EMPTY_COLOR: &str = "#666666";

/// Indicator state: number of non-empty categories plus a colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub count: usize,
    pub text: String,
    pub color: &'static str,
}

impl Badge {
    pub fn from_count(count: usize) -> Self {
        if count == 0 {
            Self {
                count,
                text: String::new(),
                color: EMPTY_COLOR,
            }
        } else {
            Self {
                count,
                text: count.to_string(),
                color: FINDINGS_COLOR,
            }
        }
    }
}
