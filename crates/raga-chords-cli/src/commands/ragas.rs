use anyhow::Result;
use raga_chords_core::{RagaLibrary, Tradition};

/// Tradition filter accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TraditionArg {
    Hindustani,
    Carnatic,
}

impl From<TraditionArg> for Tradition {
    fn from(arg: TraditionArg) -> Self {
        match arg {
            TraditionArg::Hindustani => Self::Hindustani,
            TraditionArg::Carnatic => Self::Carnatic,
        }
    }
}

/// List ragas grouped by tradition.
pub fn list_ragas(library: &RagaLibrary, tradition: Option<TraditionArg>) -> Result<()> {
    let traditions: Vec<Tradition> = match tradition {
        Some(t) => vec![t.into()],
        None => vec![Tradition::Hindustani, Tradition::Carnatic],
    };

    for tradition in traditions {
        let ragas: Vec<_> = library.by_tradition(tradition).collect();
        if ragas.is_empty() {
            continue;
        }

        println!("\n{} ({})\n", tradition, ragas.len());
        for raga in ragas {
            let parent = raga
                .parent
                .as_deref()
                .map(|p| format!("  [{}]", p))
                .unwrap_or_default();
            println!("  {:<18} {:<20}{}", raga.id, raga.name, parent);
        }
    }

    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tradition_arg_conversion() {
        assert_eq!(Tradition::from(TraditionArg::Carnatic), Tradition::Carnatic);
        assert_eq!(
            Tradition::from(TraditionArg::Hindustani),
            Tradition::Hindustani
        );
    }
}
