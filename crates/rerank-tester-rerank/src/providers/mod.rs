pub mod cohere;

pub use cohere::CohereRerankProvider;
