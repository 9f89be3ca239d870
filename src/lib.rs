//! # Photo Export
//!
//! Batch normalizer for website photo galleries. A catalog lists which source
//! photos to publish, under what name, and with what alt text, title and
//! category. Each one is resized to a maximum width, re-encoded to WebP
//! (optionally with a JPEG fallback), and recorded in a JSON manifest the
//! site renders from.
//!
//! # Pipeline
//!
//! ```text
//! export.toml ─┐
//! catalog.toml ┴→  export  →  output_dir/*.webp (+ *.jpg)
//!                          →  output_dir/manifest.json
//!                  verify  ←  (signatures + manifest dimensions)
//! ```
//!
//! Entries are processed one at a time in catalog order. A missing or broken
//! source skips that entry only; the manifest always holds exactly the
//! entries that were written.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `export.toml` loading, validation, and the stock config |
//! | [`catalog`] | Catalog document (TOML or JSON) loading and validation |
//! | [`imaging`] | Decode, resize, encode: the per-image normalizer |
//! | [`manifest`] | Manifest entries, JSON serialization, category tally |
//! | [`export`] | The batch run: catalog → outputs + manifest, with progress events |
//! | [`verify`] | Post-export checks of file signatures and manifest dimensions |
//! | [`naming`] | Output file names and public `src` paths |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Opaque Output
//!
//! Every source is flattened to 8-bit RGB before encoding. Gallery photos
//! have no use for transparency, and a single pixel layout keeps the WebP and
//! JPEG encoders on the same input.
//!
//! ## Width-Only Fitting
//!
//! Only width is capped; height follows from the aspect ratio
//! ([`imaging::calculate_fit_width`]). Images are never upscaled.
//!
//! ## Catalog as Data
//!
//! The list of images and their SEO metadata lives in its own file, not in
//! code, so it can be edited and validated independently. Output names and
//! the public URL prefix are resolved by [`naming`].
//!
//! ## Pure-Rust Imaging
//!
//! Decoding and resizing use the `image` crate (Lanczos3); WebP encoding uses
//! `libwebp` through the `webp` crate. No ImageMagick, no external processes.

pub mod catalog;
pub mod config;
pub mod export;
pub mod imaging;
pub mod manifest;
pub mod naming;
pub mod output;
pub mod verify;

#[cfg(test)]
pub(crate) mod test_helpers;
