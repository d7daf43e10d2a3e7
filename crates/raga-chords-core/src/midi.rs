//! MIDI export for a single chord.
//!
//! Produces a Standard MIDI File (format 0, one track) that sounds every chord
//! tone together for two beats at 120 BPM. Pitch classes are placed in octave
//! 4 above the tonic, so Sa on C is middle C.

use midly::{
    num::{u15, u24, u28, u4, u7},
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
};
use std::path::Path;

use crate::chord::GeneratedChord;
use crate::error::{Error, Result};
use crate::pitch::{midi_note, PitchClass};

/// Ticks per quarter note in MIDI output.
pub const TICKS_PER_QUARTER: u16 = 480;

/// 120 BPM, in microseconds per quarter note.
const TEMPO_MICROSECONDS: u32 = 500_000;

/// How long the chord sounds, in beats.
const HOLD_BEATS: u32 = 2;

const VELOCITY: u8 = 80;

const OCTAVE: i32 = 4;

/// Appended to the chord name to form the track name.
const TRACK_SUFFIX: &str = " - Raga Chord Explorer";

/// MIDI note numbers for `notes` with Sa at `tonic` in the given octave.
pub fn midi_notes(notes: &[PitchClass], tonic: PitchClass, octave: i32) -> Result<Vec<u8>> {
    notes
        .iter()
        .map(|&pc| {
            midi_note(pc, tonic, octave).ok_or_else(|| {
                Error::Midi(format!("pitch class {} in octave {} is out of range", pc, octave))
            })
        })
        .collect()
}

/// Encode a chord as an in-memory SMF byte buffer.
pub fn chord_to_smf(notes: &[PitchClass], tonic: PitchClass, name: &str) -> Result<Vec<u8>> {
    let keys = midi_notes(notes, tonic, OCTAVE)?;
    let track_name = format!("{}{}", name, TRACK_SUFFIX);
    let channel = u4::new(0);

    let mut track: Track<'_> = Vec::with_capacity(keys.len() * 2 + 3);

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(track_name.as_bytes())),
    });
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(TEMPO_MICROSECONDS))),
    });

    for &key in &keys {
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn {
                    key: u7::new(key),
                    vel: u7::new(VELOCITY),
                },
            },
        });
    }

    // The first note-off carries the whole hold; the rest follow at once.
    let hold = u32::from(TICKS_PER_QUARTER) * HOLD_BEATS;
    for (i, &key) in keys.iter().enumerate() {
        track.push(TrackEvent {
            delta: u28::new(if i == 0 { hold } else { 0 }),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOff {
                    key: u7::new(key),
                    vel: u7::new(0),
                },
            },
        });
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    let mut smf = Smf::new(Header::new(
        Format::SingleTrack,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));
    smf.tracks.push(track);

    let mut buf = Vec::new();
    smf.write(&mut buf)
        .map_err(|e| Error::Midi(format!("failed to write MIDI: {}", e)))?;

    log::debug!("Encoded {} ({} notes) as {} MIDI bytes", name, keys.len(), buf.len());
    Ok(buf)
}

/// Write a generated chord to a `.mid` file.
pub fn write_chord_midi(chord: &GeneratedChord, tonic: PitchClass, path: &Path) -> Result<()> {
    let name = chord.display_name(tonic);
    let bytes = chord_to_smf(&chord.notes, tonic, &name)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
