pub mod generate_client;

pub use generate_client::{GenerateTransport, HttpGenerateClient};
