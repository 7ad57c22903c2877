//! Geospatial aggregation and multi-criteria filtering for research funding data

pub mod cache;
pub mod config;
pub mod data;
pub mod error;
pub mod filter;
pub mod geo;
pub mod graph;
pub mod pipeline;
pub mod records;
pub mod storage;

pub use anyhow::{anyhow, Result};
pub use error::AggregationError;
