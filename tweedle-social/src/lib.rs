//! Social network clients used by Tweedle.
//!
//! Only Twitter/X is implemented. The wire protocol (OAuth 1.0a signing,
//! transport, rate-limit headers) is delegated to `egg-mode`.
pub mod twitter;
