use serde::{Deserialize, Serialize};

/// A row of the `offers` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: i64,
    pub topup_rb: u64,
    pub tizo: u64,
    pub label: Option<String>,
}

impl Offer {
    /// Bonus over a 1:1 conversion, in whole percent (rounded down)
    pub fn bonus_percent(&self) -> u64 {
        if self.topup_rb == 0 || self.tizo <= self.topup_rb {
            return 0;
        }
        (self.tizo - self.topup_rb) * 100 / self.topup_rb
    }
}

/// Offer to be inserted (id assigned by SQLite)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOffer {
    pub topup_rb: u64,
    pub tizo: u64,
    pub label: Option<String>,
}

/// Tier list inserted into an empty offers table: (Rb, Tizo, label)
pub const DEFAULT_OFFERS: &[(u64, u64, &str)] = &[
    (100, 150, "Starter"),
    (150, 240, "Mini"),
    (200, 320, "Regular"),
    (250, 420, "Regular+"),
    (300, 520, "Fun"),
    (400, 720, "Super Fun"),
    (550, 1020, "Mega"),
    (600, 1200, "Double Up"),
    (1000, 2100, "Family"),
    (1500, 3300, "Party"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bonus_percent() {
        let offer = Offer {
            id: 1,
            topup_rb: 600,
            tizo: 1200,
            label: None,
        };
        assert_eq!(offer.bonus_percent(), 100);

        let flat = Offer {
            tizo: 600,
            ..offer
        };
        assert_eq!(flat.bonus_percent(), 0);
    }

    #[test]
    fn test_default_offers_are_bonus_only_and_sorted() {
        assert!(DEFAULT_OFFERS.iter().all(|&(rb, tizo, _)| tizo >= rb));
        assert!(DEFAULT_OFFERS.windows(2).all(|w| w[0].0 < w[1].0));
    }
}
