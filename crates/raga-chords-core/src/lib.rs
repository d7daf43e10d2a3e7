//! Core domain model and chord engine for raga-chords.
//!
//! This crate resolves a raga's aroha/avaroha into a pitch-class scale,
//! instantiates every chord template that fits wholly inside that scale,
//! scores and tags the results, and orders them for presentation. It also
//! carries the built-in raga library, the standard template catalog, and
//! the MIDI export used by the command-line front end.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod catalog;
pub mod chord;
pub mod error;
pub mod midi;
pub mod pitch;
pub mod raga;
pub mod scale;
pub mod template;
pub mod view;

pub use catalog::RagaLibrary;
pub use chord::{generate, ChordRequest, GeneratedChord};
pub use error::{Error, Result};
pub use pitch::PitchClass;
pub use raga::{Drone, Raga, Tradition};
pub use scale::Scale;
pub use template::{ChordTag, ChordTemplate, TagSet, TemplateCatalog};
