//! Schema-tolerant extraction of product metadata and sentiment counts.
//!
//! Backends for different platforms answer with different shapes: the
//! sentiment counts may sit at the top level or under `sentiment_analysis`,
//! the description may be `description` or `product_details`, the image may be
//! `image_url` or a comma-joined `image_urls`. Every multi-name field is read
//! through a priority-ordered lookup table below.

use serde::Serialize;
use serde_json::Value;

// ============================================================================
// Lookup tables
// ============================================================================

/// How a candidate field is turned into a value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldShape {
    /// Use the value as-is
    Single,
    /// Comma-joined list; only the first entry is used
    FirstOfCommaList,
}

/// One candidate source for a metadata field
#[derive(Debug, Clone, Copy)]
pub struct FieldSource {
    pub key: &'static str,
    pub shape: FieldShape,
}

const fn single(key: &'static str) -> FieldSource {
    FieldSource {
        key,
        shape: FieldShape::Single,
    }
}

pub const TITLE_FIELDS: &[FieldSource] = &[single("product_title")];

pub const DESCRIPTION_FIELDS: &[FieldSource] = &[single("description"), single("product_details")];

pub const IMAGE_FIELDS: &[FieldSource] = &[
    single("image_url"),
    FieldSource {
        key: "image_urls",
        shape: FieldShape::FirstOfCommaList,
    },
];

pub const PRICE_FIELDS: &[FieldSource] = &[single("price")];

pub const REVIEWS_ANALYZED_FIELDS: &[&str] = &["total_reviews_analyzed", "total_reviews"];

/// Sub-object preferred over the top level when it carries the counts.
pub const SENTIMENT_CONTAINER: &str = "sentiment_analysis";

// ============================================================================
// Data model
// ============================================================================

/// Unvalidated JSON payload returned by a scrape endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawResult(pub Value);

impl RawResult {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Message of a truthy `error` field, if the backend declared a failure.
    pub fn declared_error(&self) -> Option<String> {
        self.get("error").filter(|v| is_truthy(v)).map(display_text)
    }
}

impl From<Value> for RawResult {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Presentational product fields. `None` means hide the element.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<String>,
    pub reviews_analyzed: Option<u64>,
}

/// Positive / neutral / negative breakdown, never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SentimentTriple {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

/// Share of each bucket in percent; all zero when the total is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Percentages {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl SentimentTriple {
    pub fn new(positive: f64, neutral: f64, negative: f64) -> Self {
        Self {
            positive: non_negative(positive),
            neutral: non_negative(neutral),
            negative: non_negative(negative),
        }
    }

    pub fn total(&self) -> f64 {
        self.positive + self.neutral + self.negative
    }

    /// Get the share of `value` in the total (0.0 - 100.0)
    pub fn pct(&self, value: f64) -> f64 {
        let total = self.total();
        if total > 0.0 {
            value / total * 100.0
        } else {
            0.0
        }
    }

    pub fn percentages(&self) -> Percentages {
        Percentages {
            positive: self.pct(self.positive),
            neutral: self.pct(self.neutral),
            negative: self.pct(self.negative),
        }
    }
}

impl Percentages {
    /// One decimal plus a percent sign, e.g. `30.0%`.
    pub fn format(value: f64) -> String {
        format!("{:.1}%", value)
    }

    /// Display text in positive, neutral, negative order.
    pub fn texts(&self) -> [String; 3] {
        [
            Self::format(self.positive),
            Self::format(self.neutral),
            Self::format(self.negative),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedResult {
    pub metadata: ProductMetadata,
    pub sentiment: SentimentTriple,
}

// ============================================================================
// Normalization
// ============================================================================

pub fn normalize(raw: &RawResult) -> NormalizedResult {
    let payload = &raw.0;

    let metadata = ProductMetadata {
        title: lookup_text(payload, TITLE_FIELDS),
        description: lookup_text(payload, DESCRIPTION_FIELDS),
        image_url: lookup_text(payload, IMAGE_FIELDS),
        price: lookup_text(payload, PRICE_FIELDS),
        reviews_analyzed: lookup_count(payload, REVIEWS_ANALYZED_FIELDS),
    };

    let source = match payload.get(SENTIMENT_CONTAINER) {
        Some(nested) if is_truthy(nested) => nested,
        _ => payload,
    };
    let sentiment = SentimentTriple::new(
        read_number(source, "positive"),
        read_number(source, "neutral"),
        read_number(source, "negative"),
    );

    NormalizedResult {
        metadata,
        sentiment,
    }
}

/// First present candidate, shaped per its table entry.
fn lookup_text(payload: &Value, sources: &[FieldSource]) -> Option<String> {
    sources.iter().find_map(|source| {
        let value = payload.get(source.key).filter(|v| is_truthy(v))?;
        match source.shape {
            FieldShape::Single => Some(display_text(value)),
            FieldShape::FirstOfCommaList => first_listed(value),
        }
    })
}

/// Leading entry of a comma-joined string or of a JSON array of strings.
fn first_listed(value: &Value) -> Option<String> {
    let first = match value {
        Value::String(text) => text.split(',').next()?,
        Value::Array(items) => items.first()?.as_str()?,
        _ => return None,
    };
    Some(first.trim().to_string()).filter(|first| !first.is_empty())
}

/// The first key holding a non-null value decides, even when it reads 0.
fn lookup_count(payload: &Value, keys: &[&str]) -> Option<u64> {
    let value = keys
        .iter()
        .filter_map(|key| payload.get(*key))
        .find(|v| !v.is_null())?;
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0)
            .map(|f| f as u64)
    })
}

fn read_number(source: &Value, key: &str) -> f64 {
    source.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Truthiness as the backend's JSON consumers see it.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn norm(value: Value) -> NormalizedResult {
        normalize(&RawResult::new(value))
    }

    #[test]
    fn test_flat_counts() {
        let result = norm(json!({"positive": 3, "neutral": 1, "negative": 6}));
        assert_eq!(result.sentiment, SentimentTriple::new(3.0, 1.0, 6.0));

        let pct = result.sentiment.percentages();
        assert!((pct.positive - 30.0).abs() < 1e-9);
        assert!((pct.neutral - 10.0).abs() < 1e-9);
        assert!((pct.negative - 60.0).abs() < 1e-9);
        assert_eq!(pct.texts(), ["30.0%", "10.0%", "60.0%"]);
    }

    #[test]
    fn test_nested_counts_preferred_over_flat() {
        let result = norm(json!({
            "positive": 50,
            "sentiment_analysis": {"positive": 1, "neutral": 1, "negative": 0}
        }));
        assert_eq!(result.sentiment, SentimentTriple::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_empty_payload_has_zero_percentages() {
        let result = norm(json!({}));
        assert_eq!(result.sentiment, SentimentTriple::default());
        assert_eq!(result.sentiment.total(), 0.0);
        assert_eq!(result.sentiment.percentages(), Percentages::default());
        assert_eq!(result.sentiment.percentages().texts(), ["0.0%", "0.0%", "0.0%"]);
        assert_eq!(result.metadata, ProductMetadata::default());
    }

    #[test]
    fn test_null_sentiment_container_falls_back_to_top_level() {
        let result = norm(json!({"sentiment_analysis": null, "positive": 2}));
        assert_eq!(result.sentiment, SentimentTriple::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_partial_and_bad_counts_read_as_zero() {
        let result = norm(json!({"positive": "many", "neutral": -4, "negative": 2.5}));
        assert_eq!(result.sentiment, SentimentTriple::new(0.0, 0.0, 2.5));
        assert!((result.sentiment.percentages().negative - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent_payload_from_flipkart_endpoint() {
        let result = norm(json!({"positive": 62.5, "neutral": 12.5, "negative": 25.0}));
        assert_eq!(result.sentiment.percentages().texts(), ["62.5%", "12.5%", "25.0%"]);
    }

    #[test]
    fn test_image_from_comma_list() {
        let result = norm(json!({"image_urls": "a.png,b.png"}));
        assert_eq!(result.metadata.image_url.as_deref(), Some("a.png"));
    }

    #[test]
    fn test_image_from_json_array() {
        let result = norm(json!({"image_urls": ["a.png", "b.png"]}));
        assert_eq!(result.metadata.image_url.as_deref(), Some("a.png"));

        let odd = norm(json!({"image_urls": {"main": "a.png"}}));
        assert_eq!(odd.metadata.image_url, None);
        let numbers = norm(json!({"image_urls": [1, 2]}));
        assert_eq!(numbers.metadata.image_url, None);
    }

    #[test]
    fn test_image_url_wins_over_list() {
        let result = norm(json!({"image_url": "main.jpg", "image_urls": "a.png,b.png"}));
        assert_eq!(result.metadata.image_url.as_deref(), Some("main.jpg"));
    }

    #[test]
    fn test_description_sources() {
        let details = norm(json!({"product_details": "d"}));
        assert_eq!(details.metadata.description.as_deref(), Some("d"));

        let description = norm(json!({"description": "d"}));
        assert_eq!(description.metadata.description.as_deref(), Some("d"));

        let both = norm(json!({"description": "primary", "product_details": "fallback"}));
        assert_eq!(both.metadata.description.as_deref(), Some("primary"));
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        // Backends fill missing detail columns with "".
        let result = norm(json!({
            "product_title": "",
            "description": "",
            "product_details": "Cotton, regular fit",
            "image_url": "",
            "price": ""
        }));
        assert!(result.metadata.title.is_none());
        assert_eq!(result.metadata.description.as_deref(), Some("Cotton, regular fit"));
        assert!(result.metadata.image_url.is_none());
        assert!(result.metadata.price.is_none());
    }

    #[test]
    fn test_zero_reviews_analyzed_is_not_replaced_by_total() {
        let zero = norm(json!({"total_reviews": 340, "total_reviews_analyzed": 0}));
        assert_eq!(zero.metadata.reviews_analyzed, Some(0));

        let null = norm(json!({"total_reviews": 340, "total_reviews_analyzed": null}));
        assert_eq!(null.metadata.reviews_analyzed, Some(340));
        let missing = norm(json!({"total_reviews": 340}));
        assert_eq!(missing.metadata.reviews_analyzed, Some(340));
    }

    #[test]
    fn test_nykaa_style_payload() {
        let result = norm(json!({
            "product_title": "Matte Lipstick",
            "image_url": "https://images.nykaa.com/lip.jpg",
            "description": "Long wear",
            "total_ratings": 1200,
            "total_reviews": 340,
            "sentiment_analysis": {"positive": 20, "neutral": 3, "negative": 2},
            "total_reviews_analyzed": 25,
            "csv_file": "nykaa_reviews.csv"
        }));
        assert_eq!(result.metadata.title.as_deref(), Some("Matte Lipstick"));
        assert_eq!(result.metadata.reviews_analyzed, Some(25));
        assert_eq!(result.sentiment, SentimentTriple::new(20.0, 3.0, 2.0));
        assert_eq!(result.sentiment.percentages().texts(), ["80.0%", "12.0%", "8.0%"]);
    }

    #[test]
    fn test_numeric_price_is_displayed() {
        let result = norm(json!({"price": 4999}));
        assert_eq!(result.metadata.price.as_deref(), Some("4999"));
    }

    #[test]
    fn test_declared_error_truthiness() {
        assert_eq!(
            RawResult::new(json!({"error": "boom"})).declared_error(),
            Some("boom".to_string())
        );
        assert_eq!(
            RawResult::new(json!({"error": {"code": 7}})).declared_error(),
            Some("{\"code\":7}".to_string())
        );
        assert!(RawResult::new(json!({"error": ""})).declared_error().is_none());
        assert!(RawResult::new(json!({"error": null})).declared_error().is_none());
        assert!(RawResult::new(json!({"error": false})).declared_error().is_none());
        assert!(RawResult::new(json!({"positive": 1})).declared_error().is_none());
    }
}
