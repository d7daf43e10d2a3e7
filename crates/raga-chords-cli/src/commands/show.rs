use anyhow::Result;
use raga_chords_core::pitch::{frequency, note_name, sargam, PitchClass};
use raga_chords_core::view::scale_degree;
use raga_chords_core::RagaLibrary;

use super::{format_notes, format_sargam};

/// Octave the frequency column is computed in.
const DISPLAY_OCTAVE: i32 = 4;

/// Print a raga's scale, vadi/samvadi, drone and pakad.
pub fn show_raga(library: &RagaLibrary, id: &str, tonic: PitchClass) -> Result<()> {
    let raga = library.get(id)?;
    let scale = raga.scale();

    println!("\n{}\n", raga);
    if let Some(parent) = &raga.parent {
        println!("  Parent:  {}", parent);
    }
    println!("  Aroha:   {}", phrase(&raga.aroha));
    println!("  Avaroha: {}", phrase(&raga.avaroha));
    if raga.is_asymmetric() {
        println!("           (ascent and descent use different notes)");
    }

    println!("\n  {:<4} {:<5} {:<4} {:>9}", "Deg", "Note", "Sa", "Hz");
    for pc in scale.iter() {
        // Sa sits on the tonic, so the sounding pitch wraps past B.
        let sounding = pc.transpose(i32::from(tonic.value()));
        let octave = if sounding.value() < tonic.value() {
            DISPLAY_OCTAVE + 1
        } else {
            DISPLAY_OCTAVE
        };
        println!(
            "  {:<4} {:<5} {:<4} {:>9.2}",
            scale_degree(pc, scale),
            sargam(pc, PitchClass::SA),
            note_name(pc, tonic),
            frequency(sounding, octave)
        );
    }

    println!();
    if let Some(vadi) = raga.vadi {
        println!("  Vadi:    {} ({})", sargam(vadi, PitchClass::SA), note_name(vadi, tonic));
    }
    if let Some(samvadi) = raga.samvadi {
        println!(
            "  Samvadi: {} ({})",
            sargam(samvadi, PitchClass::SA),
            note_name(samvadi, tonic)
        );
    }
    println!(
        "  Drone:   {} ({})",
        raga.drone,
        format_notes(raga.drone.pitch_classes(), tonic)
    );

    if !raga.pakad.is_empty() {
        println!("\n  Pakad:");
        for line in &raga.pakad {
            println!("    {}", phrase(line));
        }
    }

    if !raga.notes.is_empty() {
        println!("\n  {}", raga.notes);
    }

    println!();
    Ok(())
}

/// Sargam for a phrase of semitone offsets, marking the upper octave with `'`.
fn phrase(steps: &[u8]) -> String {
    steps
        .iter()
        .map(|&step| {
            let syllable = format_sargam(&[PitchClass::from(step)]);
            if step >= 12 {
                format!("{}'", syllable)
            } else {
                syllable
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
