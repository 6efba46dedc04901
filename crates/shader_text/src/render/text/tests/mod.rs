//! End-to-end tests for the text pipeline
//!
//! Text in, glyph indices on the device and slot-tagged quads out.

mod pipeline_tests;
