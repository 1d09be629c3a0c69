//! # pfm-view
//!
//! Tone-mapping display pipeline for PFM/PHM images.
//!
//! Takes a decoded [`pfm_io::PortableMap`] and derives an 8-bit RGB
//! [`DisplayBuffer`] under interactively adjustable exposure, gamma,
//! filmic-tone and flip parameters:
//!
//! ```text
//! raw samples -> ToneMapper -> signed bytes -> remap -> assemble -> DisplayBuffer
//! ```
//!
//! The [`Viewer`] ties the stages together: every parameter mutation
//! synchronously reruns the whole pipeline and hands the fresh buffer
//! to the registered observer, so an external renderer never blits a
//! half-updated image.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pfm_io::PortableMap;
//! use pfm_view::Viewer;
//!
//! let mut viewer = Viewer::new(PortableMap::read("render.pfm")?);
//! viewer.on_update(|display| blit(display));
//! viewer.set_exposure(2.0); // recomputes and calls blit
//! ```
//!
//! The windowing surface, widgets and file dialog stay outside this
//! crate; [`input::InputSource`] and [`Viewer::on_update`] are the only
//! seams they connect through.

#![warn(missing_docs)]

pub mod assemble;
pub mod input;
pub mod remap;
pub mod state;
pub mod tone;

pub use assemble::{assemble as assemble_display, DisplayBuffer};
pub use input::InputSource;
pub use remap::centered_to_unsigned;
pub use state::{render, Viewer, ViewerState, MIN_EXPOSURE};
pub use tone::{F16ToneMapper, F32ToneMapper, ToneMapper, ToneOptions};
