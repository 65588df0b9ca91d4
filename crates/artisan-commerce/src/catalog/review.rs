//! Customer reviews.

use crate::ids::{CustomerId, ProductId, ReviewId};
use serde::{Deserialize, Serialize};

/// Moderation state of a review. Only approved reviews are shown to buyers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

/// A customer review of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub customer_id: CustomerId,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub text: String,
    /// Attached photo or video URLs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<String>,
    #[serde(default)]
    pub status: ReviewStatus,
    /// Unix timestamp of submission.
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<i64>,
}

impl Review {
    /// Create a pending review. The rating is clamped to 1..=5.
    pub fn new(
        id: ReviewId,
        product_id: ProductId,
        customer_id: CustomerId,
        rating: u8,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            product_id,
            customer_id,
            rating: rating.clamp(1, 5),
            text: text.into(),
            media: Vec::new(),
            status: ReviewStatus::Pending,
            created_at: crate::current_timestamp(),
            approved_at: None,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status == ReviewStatus::Approved
    }

    /// Mark approved, stamping `approved_at`.
    pub fn approve(&mut self) {
        self.status = ReviewStatus::Approved;
        self.approved_at = Some(crate::current_timestamp());
    }

    pub fn reject(&mut self) {
        self.status = ReviewStatus::Rejected;
        self.approved_at = None;
    }
}

/// Mean star rating, or `None` for no reviews.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    Some(f64::from(total) / reviews.len() as f64)
}
