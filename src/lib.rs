//! chan-chart: conversion and caching pipeline for Chan-style analysis.
//!
//! Turns a hierarchical technical-analysis result (K-line bars plus derived
//! strokes, segments, pivot zones, and buy/sell signal points) into a
//! layered, renderer-agnostic chart model, with a TTL-bounded single-flight
//! cache in front of the analysis engine.

pub mod api;
pub mod cache;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartService, LoadRequest, RequestKey};
pub use cache::AnalysisCache;
pub use config::{DisplayConfig, Timeframe, compile, timeframe_catalog};
pub use engine::{AnalysisEngine, AnalysisRequest, AnalysisResult};
pub use error::{ChartError, ChartResult};
pub use render::{FigureSpec, VisualizationBundle, assemble_figure};
