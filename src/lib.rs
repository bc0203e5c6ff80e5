#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `qtrc` is a lossless/near-lossless image and video codec built on
//! quadtree decomposition, an adaptive context-modeled range coder, and
//! a content-addressed tile cache.
//!
//! This crate is a thin re-export of [`qtrc_internal`]; the actual codec
//! lives in `qtrc_core`, kept as a separate crate so it can be linked
//! independently of this crate's CLI/demo dependencies.

pub use qtrc_internal::*;

pub mod config;
