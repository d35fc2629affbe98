//! 検索サービス呼び出し

pub mod fetch_transport;

pub use fetch_transport::FetchTransport;
