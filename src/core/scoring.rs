use crate::domain::model::{Item, Receipt};
use chrono::{Datelike, Timelike};
use serde::Serialize;

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const POINTS_PER_ITEM_PAIR: u64 = 5;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;

// 14:00 與 16:00，以當日分鐘數表示 (不含端點)
const AFTERNOON_START_MINUTE: u32 = 14 * 60;
const AFTERNOON_END_MINUTE: u32 = 16 * 60;

/// Contribution of each rule to a receipt's score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    pub retailer_name: u64,
    pub round_dollar_total: u64,
    pub quarter_multiple_total: u64,
    pub item_pairs: u64,
    pub item_descriptions: u64,
    pub odd_purchase_day: u64,
    pub afternoon_purchase: u64,
}

impl PointsBreakdown {
    /// Saturates at `u64::MAX` instead of wrapping.
    pub fn total(&self) -> u64 {
        [
            self.retailer_name,
            self.round_dollar_total,
            self.quarter_multiple_total,
            self.item_pairs,
            self.item_descriptions,
            self.odd_purchase_day,
            self.afternoon_purchase,
        ]
        .into_iter()
        .fold(0, u64::saturating_add)
    }
}

pub fn compute_score(receipt: &Receipt) -> u64 {
    let breakdown = score_breakdown(receipt);
    let points = breakdown.total();
    tracing::info!("🧾 {} earned {} points", receipt.retailer, points);
    points
}

pub fn score_breakdown(receipt: &Receipt) -> PointsBreakdown {
    let breakdown = PointsBreakdown {
        retailer_name: retailer_name_points(&receipt.retailer),
        round_dollar_total: round_dollar_points(receipt.total.value()),
        quarter_multiple_total: quarter_multiple_points(receipt.total.value()),
        item_pairs: item_pair_points(receipt.items.len()),
        item_descriptions: receipt
            .items
            .iter()
            .map(item_description_points)
            .fold(0, u64::saturating_add),
        odd_purchase_day: odd_day_points(receipt.purchase_date.day()),
        afternoon_purchase: afternoon_points(
            receipt.purchase_time.hour() * 60 + receipt.purchase_time.minute(),
        ),
    };

    tracing::debug!(
        "{} points - retailer name '{}'",
        breakdown.retailer_name,
        receipt.retailer
    );
    tracing::debug!(
        "{} points - total {} is a round dollar amount",
        breakdown.round_dollar_total,
        receipt.total
    );
    tracing::debug!(
        "{} points - total {} is a multiple of 0.25",
        breakdown.quarter_multiple_total,
        receipt.total
    );
    tracing::debug!(
        "{} points - {} items ({} pairs @ {} points each)",
        breakdown.item_pairs,
        receipt.items.len(),
        receipt.items.len() / 2,
        POINTS_PER_ITEM_PAIR
    );
    tracing::debug!(
        "{} points - item descriptions with a length multiple of 3",
        breakdown.item_descriptions
    );
    tracing::debug!(
        "{} points - purchase day {} is odd",
        breakdown.odd_purchase_day,
        receipt.purchase_date
    );
    tracing::debug!(
        "{} points - purchase time {} is between 2:00pm and 4:00pm",
        breakdown.afternoon_purchase,
        receipt.purchase_time.format("%H:%M")
    );

    breakdown
}

fn retailer_name_points(retailer: &str) -> u64 {
    retailer.chars().filter(|c| c.is_alphanumeric()).count() as u64
}

fn round_dollar_points(total_cents: u64) -> u64 {
    if total_cents % 100 == 0 {
        ROUND_DOLLAR_POINTS
    } else {
        0
    }
}

fn quarter_multiple_points(total_cents: u64) -> u64 {
    if total_cents % 25 == 0 {
        QUARTER_MULTIPLE_POINTS
    } else {
        0
    }
}

fn item_pair_points(item_count: usize) -> u64 {
    ((item_count / 2) as u64).saturating_mul(POINTS_PER_ITEM_PAIR)
}

/// ceil(price * 0.2) when the trimmed description length is a multiple of 3.
fn item_description_points(item: &Item) -> u64 {
    let description = item.short_description.trim();
    if description.chars().count() % 3 != 0 {
        return 0;
    }

    // price * 0.2 = cents / 500，無條件進位
    let points = item.price.value().div_ceil(500);
    tracing::trace!(
        "{} points - '{}' is {} characters, price {} * 0.2 rounded up",
        points,
        description,
        description.chars().count(),
        item.price
    );
    points
}

fn odd_day_points(day: u32) -> u64 {
    if day % 2 == 1 {
        ODD_DAY_POINTS
    } else {
        0
    }
}

fn afternoon_points(minute_of_day: u32) -> u64 {
    if minute_of_day > AFTERNOON_START_MINUTE && minute_of_day < AFTERNOON_END_MINUTE {
        AFTERNOON_POINTS
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Cents, ReceiptPayload};

    fn receipt(value: serde_json::Value) -> Receipt {
        let payload: ReceiptPayload = serde_json::from_value(value).unwrap();
        Receipt::try_from(payload).unwrap()
    }

    fn item(description: &str, cents: u64) -> Item {
        Item {
            short_description: description.to_string(),
            price: Cents(cents),
        }
    }

    #[test]
    fn test_retailer_name_points() {
        assert_eq!(retailer_name_points("Target"), 6);
        assert_eq!(retailer_name_points("M&M Corner Market"), 14);
        assert_eq!(retailer_name_points("7-Eleven #42"), 9);
        assert_eq!(retailer_name_points("Café Zoë"), 7);
        assert_eq!(retailer_name_points(""), 0);
    }

    #[test]
    fn test_total_rules() {
        assert_eq!(round_dollar_points(3535), 0);
        assert_eq!(quarter_multiple_points(3535), 0);

        assert_eq!(round_dollar_points(900), 50);
        assert_eq!(quarter_multiple_points(900), 25);

        assert_eq!(round_dollar_points(299), 0);
        assert_eq!(quarter_multiple_points(299), 0);

        assert_eq!(round_dollar_points(1075), 0);
        assert_eq!(quarter_multiple_points(1075), 25);

        assert_eq!(round_dollar_points(0), 50);
        assert_eq!(quarter_multiple_points(0), 25);
    }

    #[test]
    fn test_item_pair_points() {
        assert_eq!(item_pair_points(0), 0);
        assert_eq!(item_pair_points(1), 0);
        assert_eq!(item_pair_points(2), 5);
        assert_eq!(item_pair_points(4), 10);
        assert_eq!(item_pair_points(5), 10);
    }

    #[test]
    fn test_item_description_points() {
        // "Emils Cheese Pizza" has 18 characters: ceil(12.25 * 0.2) = 3
        assert_eq!(item_description_points(&item("Emils Cheese Pizza", 1225)), 3);
        // trimmed to 24 characters: ceil(12.00 * 0.2) = 3
        assert_eq!(
            item_description_points(&item("   Klarbrunn 12-PK 12 FL OZ  ", 1200)),
            3
        );
        assert_eq!(item_description_points(&item("Mountain Dew 12PK", 649)), 0);
        // exact multiple of 5 dollars does not round up further
        assert_eq!(item_description_points(&item("abc", 1000)), 2);
        assert_eq!(item_description_points(&item("abc", 1)), 1);
        assert_eq!(item_description_points(&item("abc", 0)), 0);
    }

    #[test]
    fn test_odd_day_points() {
        assert_eq!(odd_day_points(1), 6);
        assert_eq!(odd_day_points(20), 0);
        assert_eq!(odd_day_points(31), 6);
    }

    #[test]
    fn test_afternoon_points_excludes_boundaries() {
        assert_eq!(afternoon_points(13 * 60 + 1), 0);
        assert_eq!(afternoon_points(14 * 60), 0);
        assert_eq!(afternoon_points(14 * 60 + 1), 10);
        assert_eq!(afternoon_points(14 * 60 + 33), 10);
        assert_eq!(afternoon_points(15 * 60 + 59), 10);
        assert_eq!(afternoon_points(16 * 60), 0);
    }

    #[test]
    fn test_target_receipt_scores_28() {
        let receipt = receipt(serde_json::json!({
            "retailer": "Target",
            "purchaseDate": "2022-01-01",
            "purchaseTime": "13:01",
            "items": [
                {"shortDescription": "Mountain Dew 12PK", "price": "6.49"},
                {"shortDescription": "Emils Cheese Pizza", "price": "12.25"},
                {"shortDescription": "Knorr Creamy Chicken", "price": "1.26"},
                {"shortDescription": "Doritos Nacho Cheese", "price": "3.35"},
                {"shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00"}
            ],
            "total": "35.35"
        }));

        let breakdown = score_breakdown(&receipt);
        assert_eq!(
            breakdown,
            PointsBreakdown {
                retailer_name: 6,
                round_dollar_total: 0,
                quarter_multiple_total: 0,
                item_pairs: 10,
                item_descriptions: 6,
                odd_purchase_day: 6,
                afternoon_purchase: 0,
            }
        );
        assert_eq!(compute_score(&receipt), 28);
    }

    #[test]
    fn test_corner_market_receipt_scores_109() {
        let receipt = receipt(serde_json::json!({
            "retailer": "M&M Corner Market",
            "purchaseDate": "2022-03-20",
            "purchaseTime": "14:33",
            "items": [
                {"shortDescription": "Gatorade", "price": "2.25"},
                {"shortDescription": "Gatorade", "price": "2.25"},
                {"shortDescription": "Gatorade", "price": "2.25"},
                {"shortDescription": "Gatorade", "price": "2.25"}
            ],
            "total": "9.00"
        }));

        assert_eq!(compute_score(&receipt), 109);
        assert_eq!(compute_score(&receipt), compute_score(&receipt));
    }

    #[test]
    fn test_huge_prices_saturate_instead_of_overflowing() {
        let receipt = Receipt {
            retailer: "Target".to_string(),
            purchase_date: chrono::NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            purchase_time: chrono::NaiveTime::from_hms_opt(13, 1, 0).unwrap(),
            items: (0..600).map(|_| item("abc", u64::MAX)).collect(),
            total: Cents(u64::MAX),
        };

        let breakdown = score_breakdown(&receipt);
        assert_eq!(breakdown.item_descriptions, u64::MAX);
        assert_eq!(compute_score(&receipt), u64::MAX);
    }

    #[test]
    fn test_empty_receipt_only_scores_total_and_day_rules() {
        let receipt = receipt(serde_json::json!({
            "retailer": "",
            "purchaseDate": "2022-03-20",
            "purchaseTime": "09:00",
            "items": [],
            "total": "0.00"
        }));

        assert_eq!(compute_score(&receipt), 75);
    }
}
