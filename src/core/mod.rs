mod aggregator;
mod chunk;
mod engine;
mod filters;
mod pipeline;
mod serializer;
mod signature;
mod tokenizer;
mod walker;
mod weights;

pub use aggregator::{AggregateEntry, Aggregator, Tokens};
pub use chunk::{
    parse_chunk, MethodRecord, TargetMethod, TargetType, TupleRecord, TypeRecord, TypedValue,
    CALL_KIND, CLASS_MARKER,
};
pub use filters::{FilterLists, SignatureFilter, ValueFilter};
pub use pipeline::{keep_tuple, PipelineOptions, TupleProcessor, ValueType};
pub use serializer::{OutputSummary, TupleWriter};
pub use signature::SignatureBuilder;
pub use tokenizer::SignatureTokenizer;
pub use walker::{ChunkWalker, WalkStats};
pub use weights::TokenWeighter;

// Export the main engine
pub use engine::{Engine, RunSummary};
