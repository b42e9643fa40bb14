//! Slotmatch Core Types
//!
//! This crate provides the leaf types shared by the Slotmatch placement
//! engine and its hosts. It includes:
//!
//! - **Geometry**: Points, sizes, bounds and insets ([`geometry`] module)
//! - **Identifiers**: Cell and block ids and match identities ([`identifier`] module)
//! - **Text**: The text measurement boundary and its implementations ([`text`] module)
//! - **Content**: What a block displays and how it is measured ([`content`] module)

pub mod content;
pub mod geometry;
pub mod identifier;
pub mod text;
