//! Rendering tokens back to text
//!
//! This module contains everything that turns a built [`TokenTree`](crate::token::TokenTree)
//! back into a string:
//! - default per-kind rendering and the linear / subtree serializers ([`render`])
//! - the per-kind override table ([`grammar`])
//! - a one-line-per-token tree dump for debugging ([`treeviz`])

pub mod grammar;
pub mod render;
pub mod treeviz;

pub use grammar::{Grammar, RenderRule, TokenView};
pub use render::{default_render, Renderer};
pub use treeviz::to_treeviz_str;
