mod embedding;
mod synthesis;
mod vector_index;

pub use embedding::IEmbeddingProvider;
pub use synthesis::IAnswerSynthesizer;
pub use vector_index::IVectorIndex;
