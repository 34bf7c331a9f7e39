//! Options positioning: chain summarisation and directional flow classification.

pub mod chain;
pub mod flow;

pub use chain::{max_pain, summarize_chain, OptionContract};
pub use flow::{classify_flow, FlowClass, OptionsFlow};
