pub mod parser;
pub mod tokenizer;

pub use parser::{parse_record, parse_records};
pub use tokenizer::Tokenizer;
