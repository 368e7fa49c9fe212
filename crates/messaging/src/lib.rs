pub mod producer;

pub use producer::{ImageTaskPublisher, KafkaImagePublisher, PublisherError};
