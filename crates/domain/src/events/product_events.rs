use super::DomainEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Asks the image pipeline to produce compressed variants of a product's raw images.
///
/// Delivery is at-least-once; consumers deduplicate on `task_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageProcessingRequested {
    pub task_id: Uuid,
    pub product_id: i64,
    pub image_urls: Vec<String>,
    pub requested_at: DateTime<Utc>,
}

impl ImageProcessingRequested {
    pub fn new(product_id: i64, image_urls: Vec<String>) -> Self {
        Self {
            task_id: Uuid::new_v4(),
            product_id,
            image_urls,
            requested_at: Utc::now(),
        }
    }
}

impl DomainEvent for ImageProcessingRequested {
    fn event_type() -> &'static str {
        "ImageProcessingRequested"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_payload_field_names() {
        let task = ImageProcessingRequested::new(42, vec!["a.jpg".to_string()]);
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["product_id"], 42);
        assert_eq!(json["image_urls"][0], "a.jpg");
        assert!(json.get("task_id").is_some());
    }

    #[test]
    fn test_each_task_gets_a_fresh_id() {
        let first = ImageProcessingRequested::new(1, vec![]);
        let second = ImageProcessingRequested::new(1, vec![]);
        assert_ne!(first.task_id, second.task_id);
    }

    #[test]
    fn test_event_type() {
        assert_eq!(ImageProcessingRequested::event_type(), "ImageProcessingRequested");
        assert_eq!(ImageProcessingRequested::event_version(), 1);
    }
}
