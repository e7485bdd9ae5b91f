//! Cueline Core Types and Definitions
//!
//! This crate provides the foundational types for the Cueline scene
//! choreography engine. It includes:
//!
//! - **Identifiers**: Efficient string-interned entity identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types and anchors ([`geometry`] module)
//! - **Elements**: Text and shape scene elements ([`element`] module)
//! - **Steps**: Choreography steps and ordered sequences ([`step`] module)

pub mod color;
pub mod element;
pub mod geometry;
pub mod identifier;
pub mod step;
