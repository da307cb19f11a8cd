//! These models represent the objects passed between the caller and the relay
//!
//! There are two related formats we need to interact with:
//! - the generic chat shape sent by the interface (role + string or part list content)
//! - anthropic messages, sent from the relay to the LLM
//!
//! The inbound models are deliberately loose. Anything the relay does not understand is kept
//! as raw json and forwarded untouched, so newer interfaces can send provider native content
//! without a release here.
pub mod chat;
pub mod content;
pub mod message;
