pub mod converter;

pub use converter::{
    convert, convert_text, process_subscription, refresh, ConvertError, ConvertOptions,
    ConvertOutcome,
};
