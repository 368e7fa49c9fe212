use async_trait::async_trait;
use domain::ImageProcessingRequested;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum PublisherError {
    #[error("Failed to create Kafka producer: {0}")]
    ProducerCreation(String),

    #[error("Failed to serialize task: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to publish task: {0}")]
    PublishFailed(String),
}

/// Notification channel for image processing work
#[async_trait]
pub trait ImageTaskPublisher: Send + Sync {
    /// Publish a task. Delivery is at-least-once with no ordering guarantee.
    async fn publish(&self, task: &ImageProcessingRequested) -> Result<(), PublisherError>;
}

/// Kafka publisher for image processing tasks
pub struct KafkaImagePublisher {
    producer: FutureProducer,
    topic: String,
}

impl KafkaImagePublisher {
    /// Create a new KafkaImagePublisher
    ///
    /// # Arguments
    /// * `brokers` - Comma-separated list of Kafka brokers (e.g., "localhost:9092")
    /// * `topic` - The topic image tasks are written to
    ///
    /// # Example
    /// ```no_run
    /// use messaging::KafkaImagePublisher;
    ///
    /// let publisher = KafkaImagePublisher::new("localhost:9092", "image_processing".to_string())
    ///     .expect("Failed to create publisher");
    /// ```
    pub fn new(brokers: &str, topic: String) -> Result<Self, PublisherError> {
        info!("Creating Kafka producer for brokers: {}", brokers);

        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .set("acks", "all")
            .set("retries", "3")
            .create()
            .map_err(|e| PublisherError::ProducerCreation(e.to_string()))?;

        info!("Kafka producer created successfully for topic: {}", topic);

        Ok(Self { producer, topic })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

/// Tasks for the same product land on the same partition.
fn partition_key(task: &ImageProcessingRequested) -> String {
    task.product_id.to_string()
}

#[async_trait]
impl ImageTaskPublisher for KafkaImagePublisher {
    async fn publish(&self, task: &ImageProcessingRequested) -> Result<(), PublisherError> {
        let payload = serde_json::to_string(task)?;
        let key = partition_key(task);

        let record = FutureRecord::to(&self.topic).key(&key).payload(&payload);

        match self
            .producer
            .send(record, Timeout::After(Duration::from_secs(5)))
            .await
        {
            Ok((partition, offset)) => {
                info!(
                    product_id = task.product_id,
                    task_id = %task.task_id,
                    "Image task published to topic '{}', partition {}, offset {}",
                    self.topic,
                    partition,
                    offset
                );
                Ok(())
            }
            Err((err, _)) => {
                warn!(
                    product_id = task.product_id,
                    "Failed to publish image task: {}", err
                );
                Err(PublisherError::PublishFailed(err.to_string()))
            }
        }
    }
}
