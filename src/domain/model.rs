use crate::utils::error::{ReceiptError, Result};
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Largest accepted amount: 1,000,000,000.00.
pub const MAX_CENTS: u64 = 100_000_000_000;

// chrono 與 rust_decimal 的解析較寬鬆，先以固定格式過濾
static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("valid amount pattern"));
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date pattern"));
static TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}$").expect("valid time pattern"));

/// Receipt as submitted over the wire. Every field is kept as text until
/// [`Receipt::try_from`] parses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptPayload {
    pub retailer: String,
    pub purchase_date: String,
    pub purchase_time: String,
    pub items: Vec<ItemPayload>,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    pub short_description: String,
    pub price: String,
}

/// Non-negative money amount in whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cents(pub u64);

impl Cents {
    pub fn value(self) -> u64 {
        self.0
    }

    /// 解析 "12.34" 這類金額字串，最多兩位小數且不得為負
    pub fn parse(field: &str, raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.starts_with('-') {
            return Err(ReceiptError::malformed(field, raw, "must not be negative"));
        }
        if !AMOUNT_PATTERN.is_match(trimmed) {
            return Err(ReceiptError::malformed(
                field,
                raw,
                "is not a plain decimal amount like 12.34",
            ));
        }

        let amount = Decimal::from_str(trimmed)
            .map_err(|e| ReceiptError::malformed(field, raw, format!("is not a decimal amount ({})", e)))?;

        if amount.normalize().scale() > 2 {
            return Err(ReceiptError::malformed(
                field,
                raw,
                "has more than 2 decimal places",
            ));
        }

        amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.trunc().to_u64())
            .filter(|cents| *cents <= MAX_CENTS)
            .map(Cents)
            .ok_or_else(|| ReceiptError::malformed(field, raw, "is out of range"))
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub short_description: String,
    pub price: Cents,
}

/// Validated receipt. Construction parses every field the scoring rules read,
/// so scoring itself cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub retailer: String,
    pub purchase_date: NaiveDate,
    pub purchase_time: NaiveTime,
    pub items: Vec<Item>,
    pub total: Cents,
}

impl TryFrom<ReceiptPayload> for Receipt {
    type Error = ReceiptError;

    fn try_from(payload: ReceiptPayload) -> Result<Self> {
        if !DATE_PATTERN.is_match(payload.purchase_date.trim()) {
            return Err(ReceiptError::malformed(
                "purchaseDate",
                &payload.purchase_date,
                "is not a YYYY-MM-DD date",
            ));
        }
        if !TIME_PATTERN.is_match(payload.purchase_time.trim()) {
            return Err(ReceiptError::malformed(
                "purchaseTime",
                &payload.purchase_time,
                "is not a 24h HH:MM time",
            ));
        }

        let purchase_date = NaiveDate::parse_from_str(payload.purchase_date.trim(), DATE_FORMAT)
            .map_err(|e| {
                ReceiptError::malformed(
                    "purchaseDate",
                    &payload.purchase_date,
                    format!("is not a YYYY-MM-DD date ({})", e),
                )
            })?;

        let purchase_time = NaiveTime::parse_from_str(payload.purchase_time.trim(), TIME_FORMAT)
            .map_err(|e| {
                ReceiptError::malformed(
                    "purchaseTime",
                    &payload.purchase_time,
                    format!("is not a 24h HH:MM time ({})", e),
                )
            })?;

        let total = Cents::parse("total", &payload.total)?;

        let items = payload
            .items
            .into_iter()
            .enumerate()
            .map(|(index, item)| -> Result<Item> {
                let price = Cents::parse(&format!("items[{}].price", index), &item.price)?;
                Ok(Item {
                    short_description: item.short_description,
                    price,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            retailer: payload.retailer,
            purchase_date,
            purchase_time,
            items,
            total,
        })
    }
}

/// Record kept by the store: the receipt and the points it earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredReceipt {
    pub id: String,
    pub receipt: Receipt,
    pub points: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: u64,
}
